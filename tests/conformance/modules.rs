//! Module-like objects: no class, functions stored directly and never bound.

use std::sync::Arc;

use conform::testing::sig;
use conform::{Interface, MethodMismatch, Object, Registry};

use crate::common::*;

fn dummy_module_interface() -> Arc<Interface> {
    Interface::builder("IDummyModule")
        .doc("Dummy interface for unit tests")
        .method("bar", sig("baz"))
        .build()
}

fn dummy_module() -> Arc<Object> {
    Object::module("dummy")
        .with_function("bar", sig("baz"))
        .into_shared()
}

#[test]
fn test_module() {
    let registry = Registry::new();
    let iface = dummy_module_interface();
    let module = dummy_module();
    registry.provide(&module, &iface);

    assert!(registry.verify_object(&iface, &module).is_ok());
}

#[test]
fn test_undeclared_module() {
    let registry = Registry::new();
    assert_does_not_implement(registry.verify_object(&dummy_module_interface(), &dummy_module()));
}

#[test]
fn test_module_missing_function() {
    let registry = Registry::new();
    let iface = dummy_module_interface();
    let module = Object::module("dummy").into_shared();
    registry.provide(&module, &iface);

    assert_broken(registry.verify_object(&iface, &module), "bar");
}

#[test]
fn test_module_functions_keep_their_first_parameter() {
    let registry = Registry::new();
    let iface = dummy_module_interface();
    // Written like a method, but nothing binds it
    let module = Object::module("dummy")
        .with_function("bar", sig("self, baz"))
        .into_shared();
    registry.provide(&module, &iface);

    let reason = assert_broken_method(registry.verify_object(&iface, &module));
    assert_eq!(
        reason,
        MethodMismatch::TooManyRequired {
            required: 2,
            supplied: 1
        }
    );
}

#[test]
fn test_module_data_for_attribute() {
    let registry = Registry::new();
    let iface = Interface::builder("IConfigured")
        .attribute("VERSION", "")
        .build();
    let module = Object::module("configured")
        .with_data("VERSION", serde_json::json!("1.0"))
        .into_shared();
    registry.provide(&module, &iface);

    assert!(registry.verify_object(&iface, &module).is_ok());
}

#[test]
fn test_module_opaque_function_is_uninspectable() {
    let registry = Registry::new();
    let iface = dummy_module_interface();
    let module = Object::module("native")
        .with_function("bar", conform::Callable::opaque())
        .into_shared();
    registry.provide(&module, &iface);

    let reason = assert_broken_method(registry.verify_object(&iface, &module));
    assert_eq!(reason, MethodMismatch::Uninspectable);
}
