//! Classes are inspected unbound: the receiver is stripped before comparing.

use conform::MethodMismatch;

use crate::common::*;

#[test]
fn test_class_doesnt_implement() {
    assert_does_not_implement(class_doesnt_implement().verify_class());
}

#[test]
fn test_class_doesnt_implement_but_declares_later() {
    let scenario = class_doesnt_implement();
    assert_does_not_implement(scenario.verify_class());

    scenario
        .registry
        .implement(&scenario.class, &scenario.interface);
    assert!(scenario.verify_class().is_ok());
}

#[test]
fn test_class_doesnt_have_required_method_simple() {
    assert_broken(
        class_doesnt_have_required_method_simple().verify_class(),
        "method",
    );
}

#[test]
fn test_class_has_required_method_simple() {
    assert!(class_has_required_method_simple().verify_class().is_ok());
}

#[test]
fn test_class_doesnt_have_required_method_derived() {
    assert_broken(
        class_doesnt_have_required_method_derived().verify_class(),
        "method",
    );
}

#[test]
fn test_class_has_required_method_derived() {
    assert!(class_has_required_method_derived().verify_class().is_ok());
}

#[test]
fn test_method_takes_wrong_arg_names_but_ok() {
    assert!(method_takes_wrong_arg_names_but_ok().verify_class().is_ok());
}

#[test]
fn test_method_takes_not_enough_args() {
    let reason = assert_broken_method(method_takes_not_enough_args().verify_class());
    assert_eq!(
        reason,
        MethodMismatch::NotEnoughPositional {
            accepted: 0,
            supplied: 1
        }
    );
}

#[test]
fn test_method_takes_extra_arg() {
    let reason = assert_broken_method(method_takes_extra_arg().verify_class());
    assert_eq!(
        reason,
        MethodMismatch::TooManyRequired {
            required: 2,
            supplied: 1
        }
    );
}

#[test]
fn test_method_takes_extra_arg_with_default() {
    assert!(method_takes_extra_arg_with_default().verify_class().is_ok());
}

#[test]
fn test_method_takes_only_positional_args() {
    assert!(method_takes_only_positional_args().verify_class().is_ok());
}

#[test]
fn test_method_takes_only_kwargs() {
    assert_broken_method(method_takes_only_kwargs().verify_class());
}

#[test]
fn test_method_takes_extra_starargs() {
    assert!(method_takes_extra_starargs().verify_class().is_ok());
}

#[test]
fn test_method_takes_extra_starargs_and_kwargs() {
    assert!(method_takes_extra_starargs_and_kwargs()
        .verify_class()
        .is_ok());
}

#[test]
fn test_method_doesnt_take_required_positional_and_starargs() {
    let reason = assert_broken_method(
        method_doesnt_take_required_positional_and_starargs().verify_class(),
    );
    assert_eq!(reason, MethodMismatch::NoVarargsSupport);
}

#[test]
fn test_method_takes_required_positional_and_starargs() {
    assert!(method_takes_required_positional_and_starargs()
        .verify_class()
        .is_ok());
}

#[test]
fn test_method_takes_only_starargs() {
    assert!(method_takes_only_starargs().verify_class().is_ok());
}

#[test]
fn test_method_takes_required_kwargs() {
    assert!(method_takes_required_kwargs().verify_class().is_ok());
}

#[test]
fn test_method_takes_positional_plus_required_starargs() {
    assert_broken_method(method_takes_positional_plus_required_starargs().verify_class());
}

#[test]
fn test_method_doesnt_take_required_kwargs() {
    assert_broken_method(method_doesnt_take_required_kwargs().verify_class());
}

#[test]
fn test_class_has_method_for_iface_attr() {
    assert!(class_has_method_for_iface_attr().verify_class().is_ok());
}

#[test]
fn test_class_has_nonmethod_for_method() {
    let reason = assert_broken_method(class_has_nonmethod_for_method().verify_class());
    assert_eq!(reason, MethodMismatch::NotCallable);
}

#[test]
fn test_error_names_interface_candidate_and_member() {
    let err = method_takes_extra_arg().verify_class().unwrap_err();
    assert_eq!(err.interface(), "ICurrent");
    assert_eq!(err.candidate(), "Current");
    assert_eq!(err.member(), Some("method"));
}
