// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use std::sync::Arc;

use crate::candidate::{Candidate, Class};
use crate::interface::Interface;
use crate::types::Callable;

/// Parse a signature, panicking on malformed input.
pub fn sig(signature: &str) -> Callable {
    match signature.parse() {
        Ok(callable) => callable,
        Err(err) => panic!("bad test signature {:?}: {}", signature, err),
    }
}

/// An interface with a single method.
pub fn interface_with_method(name: &str, method: &str, signature: &str) -> Arc<Interface> {
    Interface::builder(name)
        .method(method, sig(signature))
        .build()
}

/// A class with a single function member (receiver included in `signature`).
pub fn class_with_function(name: &str, function: &str, signature: &str) -> Arc<Class> {
    Class::builder(name)
        .function(function, sig(signature))
        .build()
}

/// Declaration predicate that accepts everything.
pub fn declares_all(_: &dyn Candidate, _: &Interface) -> bool {
    true
}

/// Declaration predicate that rejects everything.
pub fn declares_nothing(_: &dyn Candidate, _: &Interface) -> bool {
    false
}
