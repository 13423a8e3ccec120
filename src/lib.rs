// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime interface conformance checking.
//!
//! An [`Interface`] names the members a conforming candidate must expose:
//! attributes (presence only) and methods (with a signature). A candidate is
//! either a [`Class`] or an [`Object`] (an instance of a class, or a
//! module-like bag of members). Candidates *declare* conformance through a
//! [`Registry`]; verification checks the declaration and then the structure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  types.rs   │────▶│ signature.rs │────▶│  verify/     │
//! │ (Callable,  │     │ (Descriptor, │     │ (verify_*,   │
//! │  Param)     │     │  arity rules)│     │  errors)     │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                                        ▲
//!        ▼                                        │
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │interface.rs │────▶│ candidate.rs │────▶│ registry.rs  │
//! │ (flattened  │     │ (Class,      │     │ (declared    │
//! │  members)   │     │  Object)     │     │  conformance)│
//! └─────────────┘     └──────────────┘     └──────────────┘
//!                            ▲
//!                     ┌──────────────┐
//!                     │ manifest.rs  │  JSON description of a whole world
//!                     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use conform::{Class, Interface, Registry, ConformanceError};
//!
//! let iface = Interface::builder("ICurrent")
//!     .method("method", "a".parse().unwrap())
//!     .build();
//! let class = Class::builder("Current")
//!     .function("method", "self, a".parse().unwrap())
//!     .build();
//!
//! let registry = Registry::new();
//! assert!(matches!(
//!     registry.verify_class(&iface, &class),
//!     Err(ConformanceError::DoesNotImplement { .. })
//! ));
//!
//! registry.implement(&class, &iface);
//! assert!(registry.verify_class(&iface, &class).is_ok());
//! ```

pub mod candidate;
pub mod interface;
pub mod manifest;
pub mod registry;
pub mod signature;
pub mod types;
pub mod verify;

#[doc(hidden)]
pub mod testing;

pub use candidate::{
    Candidate, CandidateId, CandidateKind, Class, ClassBuilder, InconsistentHierarchy, Object,
};
pub use interface::{Interface, InterfaceBuilder, Requirement};
pub use manifest::{Catalog, Manifest, ManifestError, MemberDef, MANIFEST_VERSION};
pub use registry::{Registry, Subject};
pub use signature::{SignatureDescriptor, SignatureError};
pub use types::{Callable, Param, ParamKind, SignatureParseError, Value};
pub use verify::{
    verify, verify_class, verify_declared, verify_object, verify_structure, CheckOutcome,
    ConformanceError, Declarations, MethodMismatch, VerificationReport,
};
#[cfg(feature = "parallel")]
pub use verify::{verify_declared_parallel, verify_declared_with_progress};
