// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Interface specifications and their one-time inheritance flattening.
//!
//! An interface names the members a conforming class or object must expose.
//! Interfaces may extend other interfaces; the merge happens once, in
//! [`InterfaceBuilder::build`], and the checker only ever sees the flattened
//! result.
//!
//! # Resolution order
//!
//! ```text
//!          IBase
//!         /     \
//!     ILeft     IRight          order(IDerived) = IDerived, ILeft, IBase, IRight
//!         \     /
//!        IDerived
//! ```
//!
//! The interface comes first, then each base's own order, depth-first and left
//! to right; an interface reached twice keeps its first position. Members are
//! merged along that order and the first declaration of a name wins, so a
//! derived interface overrides its bases and the left-most base wins between
//! siblings.

use std::collections::HashSet;
use std::sync::Arc;

use crate::types::Callable;

/// One required member of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Presence alone satisfies it; callable or not.
    Attribute { doc: String },
    /// Must be callable with a compatible signature. Declared without a receiver.
    Method(Callable),
}

impl Requirement {
    pub fn is_method(&self) -> bool {
        matches!(self, Requirement::Method(_))
    }
}

/// A named, flattened set of required members.
#[derive(Debug)]
pub struct Interface {
    name: String,
    doc: String,
    bases: Vec<Arc<Interface>>,
    own: Vec<(String, Requirement)>,
    /// Interface names, most-derived first. Includes `name`.
    order: Vec<String>,
    flattened: Vec<(String, Requirement)>,
}

impl Interface {
    pub fn builder(name: impl Into<String>) -> InterfaceBuilder {
        InterfaceBuilder {
            name: name.into(),
            doc: String::new(),
            bases: Vec::new(),
            own: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn bases(&self) -> &[Arc<Interface>] {
        &self.bases
    }

    /// Members declared directly on this interface.
    pub fn own_members(&self) -> &[(String, Requirement)] {
        &self.own
    }

    /// Every required member, inherited ones included, without duplicates.
    ///
    /// Own members come first, then inherited members in resolution order.
    pub fn required_members(&self) -> &[(String, Requirement)] {
        &self.flattened
    }

    /// Look up a flattened member by name.
    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.flattened
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, requirement)| requirement)
    }

    /// Names of this interface and all interfaces it extends.
    pub fn resolution_order(&self) -> &[String] {
        &self.order
    }

    /// True when `other` is this interface or one of its (transitive) bases.
    ///
    /// Interfaces are identified by name.
    pub fn is_or_extends(&self, other: &Interface) -> bool {
        self.order.iter().any(|name| name == &other.name)
    }
}

/// Collects declarations for one interface; `build` flattens them.
#[derive(Debug, Clone)]
pub struct InterfaceBuilder {
    name: String,
    doc: String,
    bases: Vec<Arc<Interface>>,
    own: Vec<(String, Requirement)>,
}

impl InterfaceBuilder {
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn extends(mut self, base: Arc<Interface>) -> Self {
        self.bases.push(base);
        self
    }

    pub fn attribute(self, name: impl Into<String>, doc: impl Into<String>) -> Self {
        self.requirement(name, Requirement::Attribute { doc: doc.into() })
    }

    pub fn method(self, name: impl Into<String>, signature: Callable) -> Self {
        self.requirement(name, Requirement::Method(signature))
    }

    /// Declare a member. Redeclaring a name replaces the earlier declaration.
    pub fn requirement(mut self, name: impl Into<String>, requirement: Requirement) -> Self {
        let name = name.into();
        match self.own.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = requirement,
            None => self.own.push((name, requirement)),
        }
        self
    }

    pub fn build(self) -> Arc<Interface> {
        let mut order = vec![self.name.clone()];
        for base in &self.bases {
            for name in &base.order {
                if !order.contains(name) {
                    order.push(name.clone());
                }
            }
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut flattened = Vec::new();
        for (name, requirement) in &self.own {
            seen.insert(name.clone());
            flattened.push((name.clone(), requirement.clone()));
        }
        for interface_name in order.iter().skip(1) {
            let Some(declaring) = find_in_bases(&self.bases, interface_name) else {
                continue;
            };
            for (name, requirement) in &declaring.own {
                if seen.insert(name.clone()) {
                    flattened.push((name.clone(), requirement.clone()));
                }
            }
        }

        tracing::trace!(
            interface = %self.name,
            members = flattened.len(),
            bases = self.bases.len(),
            "flattened interface"
        );

        Arc::new(Interface {
            name: self.name,
            doc: self.doc,
            bases: self.bases,
            own: self.own,
            order,
            flattened,
        })
    }
}

fn find_in_bases<'a>(bases: &'a [Arc<Interface>], name: &str) -> Option<&'a Interface> {
    for base in bases {
        if base.name == name {
            return Some(base);
        }
        if let Some(found) = find_in_bases(&base.bases, name) {
            return Some(found);
        }
    }
    None
}
