// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The arity rules over arbitrary pairs of signatures.
//!
//! Whatever the shapes, verification returns `Ok` or a method error; and
//! since an instance binds exactly what the class path strips, both paths
//! must agree on every pair.

#![no_main]

use arbitrary::Arbitrary;
use conform::testing::declares_all;
use conform::{verify_class, verify_object, Callable, Class, Interface, Object};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Pair<'a> {
    interface: &'a str,
    candidate: &'a str,
}

fuzz_target!(|pair: Pair<'_>| {
    let (Ok(declared), Ok(implemented)) = (
        pair.interface.parse::<Callable>(),
        pair.candidate.parse::<Callable>(),
    ) else {
        return;
    };

    let iface = Interface::builder("IFuzz").method("m", declared).build();
    let class = Class::builder("Fuzz").function("m", implemented).build();
    let instance = Object::instance_of(&class);

    let by_class = verify_class(&declares_all, &iface, &class);
    let by_object = verify_object(&declares_all, &iface, &instance);

    assert_eq!(
        by_class.as_ref().err().and_then(|e| e.reason().copied()),
        by_object.as_ref().err().and_then(|e| e.reason().copied())
    );
    if let Err(err) = by_class {
        assert_eq!(err.member(), Some("m"));
    }
});
