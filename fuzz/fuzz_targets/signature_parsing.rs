// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Signature parsing under arbitrary text.
//!
//! Manifests are user input, so a malformed signature must come back as a
//! `SignatureParseError`, never a panic. Anything that parses must render
//! to text that parses back to the same callable.

#![no_main]

use conform::Callable;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|source: &str| {
    let Ok(callable) = source.parse::<Callable>() else {
        return;
    };

    let rendered = callable.to_string();
    let reparsed: Callable = rendered
        .parse()
        .unwrap_or_else(|e| panic!("rendered signature {:?} failed to parse: {}", rendered, e));
    assert_eq!(reparsed, callable);

    // Binding never grows a signature
    let bound = callable.bind();
    let before = callable.params().map_or(0, <[_]>::len);
    let after = bound.params().map_or(0, <[_]>::len);
    assert!(after <= before);
});
