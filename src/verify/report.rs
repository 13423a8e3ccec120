// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Batch verification of every declaration in a registry.
//!
//! Each declared (candidate, interface) pair is verified independently, so the
//! work parallelizes trivially. The report keeps registry order (candidate
//! name, then interface name) whichever way it was produced.

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::candidate::CandidateKind;
use crate::interface::Interface;
use crate::registry::{Registry, Subject};

use super::{verify, ConformanceError};

/// Result of verifying one declared pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub interface: String,
    pub candidate: String,
    pub kind: CandidateKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ConformanceError>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of a batch verification, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl VerificationReport {
    pub fn checked(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(CheckOutcome::passed)
    }
}

fn check_pair(registry: &Registry, subject: &Subject, interface: &Interface) -> CheckOutcome {
    let candidate = subject.as_candidate();
    CheckOutcome {
        interface: interface.name().to_string(),
        candidate: candidate.name().to_string(),
        kind: candidate.kind(),
        error: verify(registry, interface, candidate).err(),
    }
}

fn summarize(outcomes: Vec<CheckOutcome>) -> VerificationReport {
    let report = VerificationReport { outcomes };
    info!(
        checked = report.checked(),
        passed = report.passed_count(),
        "verified declarations"
    );
    report
}

/// Verify every declared (candidate, interface) pair in `registry`.
pub fn verify_declared(registry: &Registry) -> VerificationReport {
    let pairs: Vec<(Subject, Arc<Interface>)> = registry.subjects();
    let outcomes = pairs
        .iter()
        .map(|(subject, interface)| check_pair(registry, subject, interface))
        .collect();
    summarize(outcomes)
}

/// Parallel version of [`verify_declared`]. Same report, same order.
#[cfg(feature = "parallel")]
pub fn verify_declared_parallel(registry: &Registry) -> VerificationReport {
    verify_declared_with_progress(registry, &ProgressBar::hidden())
}

/// [`verify_declared_parallel`], advancing `progress` once per checked pair.
///
/// Sets the bar's length; finishing it is left to the caller.
#[cfg(feature = "parallel")]
pub fn verify_declared_with_progress(
    registry: &Registry,
    progress: &ProgressBar,
) -> VerificationReport {
    let pairs: Vec<(Subject, Arc<Interface>)> = registry.subjects();
    progress.set_length(pairs.len() as u64);
    let outcomes = pairs
        .par_iter()
        .map(|(subject, interface)| {
            let outcome = check_pair(registry, subject, interface);
            progress.inc(1);
            outcome
        })
        .collect();
    summarize(outcomes)
}
