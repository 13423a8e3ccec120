// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The conformance checker.
//!
//! Two entry points, one algorithm:
//!
//! ```text
//! verify_class ──┐                        ┌─ declares? ── no ──▶ DoesNotImplement
//!                ├──▶ verify(decls, I, C) ┤
//! verify_object ─┘                        └─ for each required member of I:
//!                                              missing ──────────▶ BrokenImplementation
//!                                              attribute ────────▶ ok (presence is enough)
//!                                              method, not callable ▶ BrokenMethodImplementation
//!                                              method, bad shape ─▶ BrokenMethodImplementation
//! ```
//!
//! Classes and objects differ only in how members are found and whether the
//! receiver is stripped before comparing signatures. Verification is
//! fail-fast and never mutates its inputs.

mod error;
mod report;

pub use error::{ConformanceError, MethodMismatch};
pub use report::{verify_declared, CheckOutcome, VerificationReport};
#[cfg(feature = "parallel")]
pub use report::{verify_declared_parallel, verify_declared_with_progress};

use tracing::{debug, trace};

use crate::candidate::{Candidate, Class, Object};
use crate::interface::{Interface, Requirement};
use crate::signature::SignatureDescriptor;
use crate::types::{Callable, Value};

/// The "declares conformance" predicate.
///
/// Evaluated on every verification, so declarations made after a candidate
/// was built are honoured.
pub trait Declarations {
    fn declares(&self, candidate: &dyn Candidate, interface: &Interface) -> bool;
}

impl<F> Declarations for F
where
    F: Fn(&dyn Candidate, &Interface) -> bool,
{
    fn declares(&self, candidate: &dyn Candidate, interface: &Interface) -> bool {
        self(candidate, interface)
    }
}

/// Verify that `class` conforms to `interface`. Methods are inspected unbound.
pub fn verify_class<D>(
    decls: &D,
    interface: &Interface,
    class: &Class,
) -> Result<(), ConformanceError>
where
    D: Declarations + ?Sized,
{
    verify(decls, interface, class)
}

/// Verify that `object` conforms to `interface`. Methods are inspected bound.
pub fn verify_object<D>(
    decls: &D,
    interface: &Interface,
    object: &Object,
) -> Result<(), ConformanceError>
where
    D: Declarations + ?Sized,
{
    verify(decls, interface, object)
}

/// Verify any candidate: declaration first, then structure.
pub fn verify<D>(
    decls: &D,
    interface: &Interface,
    candidate: &dyn Candidate,
) -> Result<(), ConformanceError>
where
    D: Declarations + ?Sized,
{
    debug!(
        interface = interface.name(),
        candidate = candidate.name(),
        kind = %candidate.kind(),
        "verifying"
    );

    if !decls.declares(candidate, interface) {
        let err = ConformanceError::DoesNotImplement {
            interface: interface.name().to_string(),
            candidate: candidate.name().to_string(),
        };
        debug!(error = %err, "verification failed");
        return Err(err);
    }

    verify_structure(interface, candidate).inspect_err(|err| {
        debug!(error = %err, "verification failed");
    })
}

/// Structural conformance only: skips the declaration check.
///
/// Answers "would this candidate conform if it declared the interface".
pub fn verify_structure(
    interface: &Interface,
    candidate: &dyn Candidate,
) -> Result<(), ConformanceError> {
    let strip_receiver = candidate.kind().strips_receiver();

    for (name, requirement) in interface.required_members() {
        let Some(value) = candidate.member(name) else {
            return Err(ConformanceError::BrokenImplementation {
                interface: interface.name().to_string(),
                candidate: candidate.name().to_string(),
                member: name.clone(),
            });
        };
        trace!(member = %name, found = value.describe(), "checking member");

        let Requirement::Method(declared) = requirement else {
            continue;
        };

        check_method(declared, &value, strip_receiver).map_err(|reason| {
            ConformanceError::BrokenMethodImplementation {
                interface: interface.name().to_string(),
                candidate: candidate.name().to_string(),
                member: name.clone(),
                reason,
            }
        })?;
    }

    Ok(())
}

fn check_method(
    declared: &Callable,
    value: &Value,
    strip_receiver: bool,
) -> Result<(), MethodMismatch> {
    let implemented = value.as_callable().ok_or(MethodMismatch::NotCallable)?;
    let required = SignatureDescriptor::from_callable(declared, false)?;
    let provided = SignatureDescriptor::from_callable(implemented, strip_receiver)?;

    match provided.incompatibility(&required) {
        Some(mismatch) => {
            trace!(required = %required, provided = %provided, %mismatch, "signature mismatch");
            Err(mismatch)
        }
        None => Ok(()),
    }
}
