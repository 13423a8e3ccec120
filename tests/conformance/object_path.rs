//! The same scenarios, verified against an instance of each class. Methods
//! found on the class are bound, so the outcomes match the class path.

use conform::testing::sig;
use conform::{Candidate, MethodMismatch, Object};

use crate::common::*;

#[test]
fn test_class_doesnt_implement() {
    assert_does_not_implement(class_doesnt_implement().verify_object());
}

#[test]
fn test_class_doesnt_implement_but_declares_later() {
    let scenario = class_doesnt_implement();
    let instance = Object::instance_of(&scenario.class);
    assert_does_not_implement(scenario.registry.verify_object(&scenario.interface, &instance));

    scenario
        .registry
        .implement(&scenario.class, &scenario.interface);
    assert!(scenario
        .registry
        .verify_object(&scenario.interface, &instance)
        .is_ok());
}

#[test]
fn test_class_doesnt_have_required_method_simple() {
    assert_broken(
        class_doesnt_have_required_method_simple().verify_object(),
        "method",
    );
}

#[test]
fn test_class_has_required_method_simple() {
    assert!(class_has_required_method_simple().verify_object().is_ok());
}

#[test]
fn test_class_doesnt_have_required_method_derived() {
    assert_broken(
        class_doesnt_have_required_method_derived().verify_object(),
        "method",
    );
}

#[test]
fn test_class_has_required_method_derived() {
    assert!(class_has_required_method_derived().verify_object().is_ok());
}

#[test]
fn test_method_takes_wrong_arg_names_but_ok() {
    assert!(method_takes_wrong_arg_names_but_ok().verify_object().is_ok());
}

#[test]
fn test_method_takes_not_enough_args() {
    assert_broken_method(method_takes_not_enough_args().verify_object());
}

#[test]
fn test_method_takes_extra_arg() {
    assert_broken_method(method_takes_extra_arg().verify_object());
}

#[test]
fn test_method_takes_extra_arg_with_default() {
    assert!(method_takes_extra_arg_with_default().verify_object().is_ok());
}

#[test]
fn test_method_takes_only_positional_args() {
    assert!(method_takes_only_positional_args().verify_object().is_ok());
}

#[test]
fn test_method_takes_only_kwargs() {
    assert_broken_method(method_takes_only_kwargs().verify_object());
}

#[test]
fn test_method_takes_extra_starargs() {
    assert!(method_takes_extra_starargs().verify_object().is_ok());
}

#[test]
fn test_method_takes_extra_starargs_and_kwargs() {
    assert!(method_takes_extra_starargs_and_kwargs()
        .verify_object()
        .is_ok());
}

#[test]
fn test_method_doesnt_take_required_positional_and_starargs() {
    assert_broken_method(method_doesnt_take_required_positional_and_starargs().verify_object());
}

#[test]
fn test_method_takes_required_positional_and_starargs() {
    assert!(method_takes_required_positional_and_starargs()
        .verify_object()
        .is_ok());
}

#[test]
fn test_method_takes_only_starargs() {
    assert!(method_takes_only_starargs().verify_object().is_ok());
}

#[test]
fn test_method_takes_required_kwargs() {
    assert!(method_takes_required_kwargs().verify_object().is_ok());
}

#[test]
fn test_method_takes_positional_plus_required_starargs() {
    assert_broken_method(method_takes_positional_plus_required_starargs().verify_object());
}

#[test]
fn test_method_doesnt_take_required_kwargs() {
    assert_broken_method(method_doesnt_take_required_kwargs().verify_object());
}

#[test]
fn test_class_has_method_for_iface_attr() {
    assert!(class_has_method_for_iface_attr().verify_object().is_ok());
}

#[test]
fn test_class_has_nonmethod_for_method() {
    let reason = assert_broken_method(class_has_nonmethod_for_method().verify_object());
    assert_eq!(reason, MethodMismatch::NotCallable);
}

#[test]
fn test_instance_attribute_shadows_class_member() {
    let scenario = method_takes_not_enough_args();
    // An instance-level function is not bound, so it is compared as written
    let instance = Object::instance_of(&scenario.class).with_function("method", sig("a"));
    assert!(scenario
        .registry
        .verify_object(&scenario.interface, &instance)
        .is_ok());
}

#[test]
fn test_declaration_on_one_instance_does_not_cover_others() {
    let scenario = Scenario::undeclared(
        interface_with_method("ICurrent", "method", "a"),
        class_with_function("Current", "method", "self, a"),
    );
    let declared = Object::instance_of(&scenario.class).into_shared();
    let other = Object::instance_of(&scenario.class);

    scenario.registry.provide(&declared, &scenario.interface);

    assert!(scenario
        .registry
        .verify_object(&scenario.interface, &declared)
        .is_ok());
    assert_does_not_implement(scenario.registry.verify_object(&scenario.interface, &other));
    assert_eq!(other.name(), "Current instance");
}
