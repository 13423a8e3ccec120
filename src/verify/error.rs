// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The three ways a verification can fail, and why a method can be broken.

use serde::Serialize;
use thiserror::Error;

use crate::signature::SignatureError;

/// A definitive verification failure. Only the first violation is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConformanceError {
    /// The candidate never declared conformance. Raised before any
    /// structural inspection.
    #[error("{candidate} does not implement interface {interface}")]
    DoesNotImplement {
        interface: String,
        candidate: String,
    },

    /// A required attribute or method is missing entirely.
    #[error("{candidate} failed to implement {interface}: the '{member}' attribute was not provided")]
    BrokenImplementation {
        interface: String,
        candidate: String,
        member: String,
    },

    /// The member exists but is not callable, or its signature is incompatible.
    #[error("{candidate} failed to implement {interface}: the contract of '{member}' is violated: {reason}")]
    BrokenMethodImplementation {
        interface: String,
        candidate: String,
        member: String,
        reason: MethodMismatch,
    },
}

impl ConformanceError {
    pub fn interface(&self) -> &str {
        match self {
            ConformanceError::DoesNotImplement { interface, .. }
            | ConformanceError::BrokenImplementation { interface, .. }
            | ConformanceError::BrokenMethodImplementation { interface, .. } => interface,
        }
    }

    pub fn candidate(&self) -> &str {
        match self {
            ConformanceError::DoesNotImplement { candidate, .. }
            | ConformanceError::BrokenImplementation { candidate, .. }
            | ConformanceError::BrokenMethodImplementation { candidate, .. } => candidate,
        }
    }

    /// The offending member, when the failure is about one.
    pub fn member(&self) -> Option<&str> {
        match self {
            ConformanceError::DoesNotImplement { .. } => None,
            ConformanceError::BrokenImplementation { member, .. }
            | ConformanceError::BrokenMethodImplementation { member, .. } => Some(member),
        }
    }

    pub fn reason(&self) -> Option<&MethodMismatch> {
        match self {
            ConformanceError::BrokenMethodImplementation { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Why a member cannot stand in for a method declared on an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "mismatch", rename_all = "snake_case")]
pub enum MethodMismatch {
    #[error("not a method")]
    NotCallable,

    #[error("uninspectable signature")]
    Uninspectable,

    #[error("implementation requires too many arguments ({required} required, interface supplies {supplied})")]
    TooManyRequired { required: usize, supplied: usize },

    #[error("implementation doesn't allow enough arguments ({accepted} accepted, interface may supply {supplied})")]
    NotEnoughPositional { accepted: usize, supplied: usize },

    #[error("implementation doesn't support keyword arguments")]
    NoKeywordSupport,

    #[error("implementation doesn't support variable arguments")]
    NoVarargsSupport,

    #[error("implementation requires too many keyword arguments ({required} required, interface supplies {supplied})")]
    TooManyRequiredKeywords { required: usize, supplied: usize },

    #[error("implementation doesn't accept enough keyword arguments ({accepted} accepted, interface may supply {supplied})")]
    NotEnoughKeywords { accepted: usize, supplied: usize },
}

impl From<SignatureError> for MethodMismatch {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::Uninspectable => MethodMismatch::Uninspectable,
        }
    }
}
