// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The declaration registry: who claims to provide what.
//!
//! A class declares an interface with [`Registry::implement`]; a single object
//! (an instance or a module) with [`Registry::provide`]. Declarations can be
//! added at any point, and every verification asks the registry afresh.
//!
//! A declaration applies along the candidate's lineage: declaring on a class
//! covers its subclasses and their instances. Declaring a derived interface
//! also declares everything it extends.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::candidate::{Candidate, CandidateId, Class, Object};
use crate::interface::Interface;
use crate::verify::{self, ConformanceError, Declarations};

/// A candidate that made a declaration, kept so batch checks can revisit it.
#[derive(Debug, Clone)]
pub enum Subject {
    Class(Arc<Class>),
    Object(Arc<Object>),
}

impl Subject {
    pub fn as_candidate(&self) -> &dyn Candidate {
        match self {
            Subject::Class(class) => &**class,
            Subject::Object(object) => &**object,
        }
    }
}

#[derive(Debug)]
struct Declaration {
    subject: Subject,
    interfaces: Vec<Arc<Interface>>,
}

/// Thread-safe map from candidate identity to declared interfaces.
#[derive(Debug, Default)]
pub struct Registry {
    declarations: RwLock<HashMap<CandidateId, Declaration>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that `class` (and its subclasses and instances) implements
    /// `interface`.
    pub fn implement(&self, class: &Arc<Class>, interface: &Arc<Interface>) {
        self.record(Subject::Class(Arc::clone(class)), interface);
    }

    /// Declare that this particular object provides `interface`.
    pub fn provide(&self, object: &Arc<Object>, interface: &Arc<Interface>) {
        self.record(Subject::Object(Arc::clone(object)), interface);
    }

    fn record(&self, subject: Subject, interface: &Arc<Interface>) {
        let candidate = subject.as_candidate();
        let id = candidate.id();
        debug!(
            candidate = candidate.name(),
            kind = %candidate.kind(),
            interface = interface.name(),
            "declared conformance"
        );

        let mut declarations = self.declarations.write();
        let entry = declarations.entry(id).or_insert_with(|| Declaration {
            subject,
            interfaces: Vec::new(),
        });
        if !entry
            .interfaces
            .iter()
            .any(|existing| existing.name() == interface.name())
        {
            entry.interfaces.push(Arc::clone(interface));
        }
    }

    /// Every interface declared for `candidate` along its lineage.
    pub fn declared(&self, candidate: &dyn Candidate) -> Vec<Arc<Interface>> {
        let declarations = self.declarations.read();
        let mut found: Vec<Arc<Interface>> = Vec::new();
        for id in candidate.lineage() {
            let Some(declaration) = declarations.get(&id) else {
                continue;
            };
            for interface in &declaration.interfaces {
                if !found.iter().any(|f| f.name() == interface.name()) {
                    found.push(Arc::clone(interface));
                }
            }
        }
        found
    }

    /// Every (subject, interface) pair declared directly, sorted by candidate
    /// name, then interface name.
    pub fn subjects(&self) -> Vec<(Subject, Arc<Interface>)> {
        let declarations = self.declarations.read();
        let mut pairs: Vec<(Subject, Arc<Interface>)> = declarations
            .values()
            .flat_map(|declaration| {
                declaration
                    .interfaces
                    .iter()
                    .map(|interface| (declaration.subject.clone(), Arc::clone(interface)))
            })
            .collect();
        pairs.sort_by(|(a, ai), (b, bi)| {
            let (a, b) = (a.as_candidate(), b.as_candidate());
            a.name()
                .cmp(b.name())
                .then_with(|| a.id().cmp(&b.id()))
                .then_with(|| ai.name().cmp(bi.name()))
        });
        pairs
    }

    /// Number of declared (candidate, interface) pairs.
    pub fn len(&self) -> usize {
        self.declarations
            .read()
            .values()
            .map(|declaration| declaration.interfaces.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn verify_class(
        &self,
        interface: &Interface,
        class: &Class,
    ) -> Result<(), ConformanceError> {
        verify::verify_class(self, interface, class)
    }

    pub fn verify_object(
        &self,
        interface: &Interface,
        object: &Object,
    ) -> Result<(), ConformanceError> {
        verify::verify_object(self, interface, object)
    }
}

impl Declarations for Registry {
    fn declares(&self, candidate: &dyn Candidate, interface: &Interface) -> bool {
        let declarations = self.declarations.read();
        candidate
            .lineage()
            .iter()
            .filter_map(|id| declarations.get(id))
            .flat_map(|declaration| declaration.interfaces.iter())
            .any(|declared| declared.is_or_extends(interface))
    }
}
