//! Interface and class inheritance working together.

use conform::testing::sig;
use conform::{verify_structure, Class, Interface, MethodMismatch, Object, Registry};

use crate::common::*;

#[test]
fn test_inherited_class_member_satisfies_interface() {
    let registry = Registry::new();
    let iface = interface_with_method("ICurrent", "method", "a");
    let base = class_with_function("Base", "method", "self, a");
    let derived = Class::builder("Derived").base(base).build();
    registry.implement(&derived, &iface);

    assert!(registry.verify_class(&iface, &derived).is_ok());
    assert!(registry
        .verify_object(&iface, &Object::instance_of(&derived))
        .is_ok());
}

#[test]
fn test_subclass_inherits_declaration() {
    let registry = Registry::new();
    let iface = interface_with_method("ICurrent", "method", "a");
    let base = class_with_function("Base", "method", "self, a");
    let derived = Class::builder("Derived").base(base.clone()).build();
    registry.implement(&base, &iface);

    assert!(registry.verify_class(&iface, &derived).is_ok());
}

#[test]
fn test_subclass_override_is_what_gets_checked() {
    let registry = Registry::new();
    let iface = interface_with_method("ICurrent", "method", "a");
    let base = class_with_function("Base", "method", "self, a");
    let derived = Class::builder("Derived")
        .base(base.clone())
        .function("method", sig("self"))
        .build();
    registry.implement(&base, &iface);

    assert!(registry.verify_class(&iface, &base).is_ok());
    assert_broken_method(registry.verify_class(&iface, &derived));
}

#[test]
fn test_declaring_derived_interface_covers_base() {
    let registry = Registry::new();
    let base = interface_with_method("IBase", "method", "");
    let derived = Interface::builder("IDerived")
        .extends(base.clone())
        .attribute("foo", "")
        .build();
    let class = Class::builder("Current")
        .function("method", sig("self"))
        .data("foo", serde_json::json!(null))
        .build();
    registry.implement(&class, &derived);

    assert!(registry.verify_class(&base, &class).is_ok());
    assert!(registry.verify_class(&derived, &class).is_ok());
}

#[test]
fn test_derived_interface_redeclaration_wins() {
    let registry = Registry::new();
    let base = interface_with_method("IBase", "method", "a, b");
    let derived = Interface::builder("IDerived")
        .extends(base.clone())
        .method("method", sig("a"))
        .build();
    let class = class_with_function("Current", "method", "self, a");
    registry.implement(&class, &derived);

    assert!(registry.verify_class(&derived, &class).is_ok());
    let reason = assert_broken_method(registry.verify_class(&base, &class));
    assert!(matches!(reason, MethodMismatch::NotEnoughPositional { .. }));
}

#[test]
fn test_all_inherited_members_are_enforced() {
    let left = Interface::builder("ILeft").attribute("l", "").build();
    let right = Interface::builder("IRight").attribute("r", "").build();
    let both = Interface::builder("IBoth").extends(left).extends(right).build();

    let partial = Class::builder("Partial")
        .data("l", serde_json::json!(1))
        .build();
    let err = verify_structure(&both, &*partial).unwrap_err();
    assert_eq!(err.member(), Some("r"));
}

#[test]
fn test_diamond_checks_the_member_c3_finds() {
    let registry = Registry::new();
    let iface = interface_with_method("ICurrent", "method", "a");
    let root = class_with_function("Root", "method", "self");
    let left = Class::builder("Left").base(root.clone()).build();
    let right = Class::builder("Right")
        .base(root)
        .function("method", sig("self, a"))
        .build();
    let diamond = Class::builder("Diamond").base(left).base(right).build();
    registry.implement(&diamond, &iface);

    // Diamond, Left, Right, Root: Right's override comes before Root's
    assert_eq!(
        diamond.resolution_order(),
        vec!["Diamond", "Left", "Right", "Root"]
    );
    assert!(registry.verify_class(&iface, &diamond).is_ok());
    assert!(registry
        .verify_object(&iface, &Object::instance_of(&diamond))
        .is_ok());
}
