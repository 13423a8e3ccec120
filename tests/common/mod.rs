//! Shared test fixtures: the verify scenarios, each a small world of one
//! interface and one class.
//!
//! Every scenario is checked twice, once through the class path and once
//! through the object path with an instance of the same class.

#![allow(dead_code)]

use std::sync::Arc;

use conform::{Class, ConformanceError, Interface, MethodMismatch, Object, Registry};

// Re-export canonical test utilities from conform::testing
pub use conform::testing::{class_with_function, interface_with_method};

// ============================================================================
// SCENARIO
// ============================================================================

pub struct Scenario {
    pub registry: Registry,
    pub interface: Arc<Interface>,
    pub class: Arc<Class>,
}

impl Scenario {
    /// `class` declares `interface`.
    pub fn declared(interface: Arc<Interface>, class: Arc<Class>) -> Self {
        let registry = Registry::new();
        registry.implement(&class, &interface);
        Self {
            registry,
            interface,
            class,
        }
    }

    pub fn undeclared(interface: Arc<Interface>, class: Arc<Class>) -> Self {
        Self {
            registry: Registry::new(),
            interface,
            class,
        }
    }

    pub fn verify_class(&self) -> Result<(), ConformanceError> {
        self.registry.verify_class(&self.interface, &self.class)
    }

    /// Verify a fresh instance of the scenario's class.
    pub fn verify_object(&self) -> Result<(), ConformanceError> {
        let instance = Object::instance_of(&self.class);
        self.registry.verify_object(&self.interface, &instance)
    }
}

/// Interface `ICurrent` with `method(<interface>)`, class `Current` with
/// `method(<class>)`, declared.
pub fn method_scenario(interface: &str, class: &str) -> Scenario {
    Scenario::declared(
        interface_with_method("ICurrent", "method", interface),
        class_with_function("Current", "method", class),
    )
}

// ============================================================================
// SCENARIOS
// ============================================================================

pub fn class_doesnt_implement() -> Scenario {
    Scenario::undeclared(
        Interface::builder("ICurrent").build(),
        Class::builder("Current").build(),
    )
}

pub fn class_doesnt_have_required_method_simple() -> Scenario {
    Scenario::declared(
        interface_with_method("ICurrent", "method", ""),
        Class::builder("Current").build(),
    )
}

pub fn class_has_required_method_simple() -> Scenario {
    method_scenario("", "self")
}

fn derived_interface() -> Arc<Interface> {
    let base = interface_with_method("IBase", "method", "");
    Interface::builder("IDerived").extends(base).build()
}

pub fn class_doesnt_have_required_method_derived() -> Scenario {
    Scenario::declared(derived_interface(), Class::builder("Current").build())
}

pub fn class_has_required_method_derived() -> Scenario {
    Scenario::declared(
        derived_interface(),
        class_with_function("Current", "method", "self"),
    )
}

pub fn method_takes_wrong_arg_names_but_ok() -> Scenario {
    method_scenario("a", "self, b")
}

pub fn method_takes_not_enough_args() -> Scenario {
    method_scenario("a", "self")
}

pub fn method_takes_extra_arg() -> Scenario {
    method_scenario("a", "self, a, b")
}

pub fn method_takes_extra_arg_with_default() -> Scenario {
    method_scenario("a", "self, a, b=None")
}

pub fn method_takes_only_positional_args() -> Scenario {
    method_scenario("a", "self, *args")
}

pub fn method_takes_only_kwargs() -> Scenario {
    method_scenario("a", "self, **kw")
}

pub fn method_takes_extra_starargs() -> Scenario {
    method_scenario("a", "self, a, *args")
}

pub fn method_takes_extra_starargs_and_kwargs() -> Scenario {
    method_scenario("a", "self, a, *args, **kw")
}

pub fn method_doesnt_take_required_positional_and_starargs() -> Scenario {
    method_scenario("a, *args", "self, a")
}

pub fn method_takes_required_positional_and_starargs() -> Scenario {
    method_scenario("a, *args", "self, a, *args")
}

pub fn method_takes_only_starargs() -> Scenario {
    method_scenario("a, *args", "self, *args")
}

pub fn method_takes_required_kwargs() -> Scenario {
    method_scenario("**kwargs", "self, **kw")
}

pub fn method_takes_positional_plus_required_starargs() -> Scenario {
    method_scenario("*args", "self, a, *args")
}

pub fn method_doesnt_take_required_kwargs() -> Scenario {
    method_scenario("**kwargs", "self, a")
}

pub fn class_has_method_for_iface_attr() -> Scenario {
    Scenario::declared(
        Interface::builder("ICurrent")
            .attribute("foo", "The foo Attribute")
            .build(),
        class_with_function("Current", "foo", "self"),
    )
}

pub fn class_has_nonmethod_for_method() -> Scenario {
    Scenario::declared(
        interface_with_method("ICurrent", "foo", ""),
        Class::builder("Current").data("foo", serde_json::json!(1)).build(),
    )
}

// ============================================================================
// ASSERTIONS
// ============================================================================

#[track_caller]
pub fn assert_does_not_implement(result: Result<(), ConformanceError>) {
    match result {
        Err(ConformanceError::DoesNotImplement { .. }) => {}
        other => panic!("expected DoesNotImplement, got {:?}", other),
    }
}

#[track_caller]
pub fn assert_broken(result: Result<(), ConformanceError>, member: &str) {
    match result {
        Err(ConformanceError::BrokenImplementation { member: found, .. }) => {
            assert_eq!(found, member)
        }
        other => panic!("expected BrokenImplementation, got {:?}", other),
    }
}

/// Returns the mismatch so callers can check the reason.
#[track_caller]
pub fn assert_broken_method(result: Result<(), ConformanceError>) -> MethodMismatch {
    match result {
        Err(ConformanceError::BrokenMethodImplementation { reason, .. }) => reason,
        other => panic!("expected BrokenMethodImplementation, got {:?}", other),
    }
}
