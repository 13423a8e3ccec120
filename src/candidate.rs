// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Candidates: the classes and objects being verified.
//!
//! Both expose the same capability probe, [`Candidate::member`], but answer it
//! differently:
//!
//! | Candidate          | Lookup                                  | Functions come back |
//! |--------------------|-----------------------------------------|---------------------|
//! | `Class`            | class, then ancestors in C3 order       | unbound (receiver)  |
//! | `Object` (instance)| own attributes, then the class lookup   | bound (no receiver) |
//! | `Object` (module)  | own attributes only                     | as declared         |
//!
//! Everything is immutable once built and shared through `Arc`, so candidates
//! can be verified from any thread.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::types::{Callable, Value};

/// Process-unique identity of a class or object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandidateId(u64);

impl CandidateId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        CandidateId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Class,
    Object,
}

impl CandidateKind {
    /// Whether methods found on this kind of candidate are unbound.
    #[inline]
    pub fn strips_receiver(self) -> bool {
        self == CandidateKind::Class
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateKind::Class => write!(f, "class"),
            CandidateKind::Object => write!(f, "object"),
        }
    }
}

/// Anything that can be checked against an interface.
pub trait Candidate: Send + Sync {
    fn id(&self) -> CandidateId;

    fn name(&self) -> &str;

    fn kind(&self) -> CandidateKind;

    /// The member called `name`, as this candidate exposes it.
    fn member(&self, name: &str) -> Option<Cow<'_, Value>>;

    fn has_member(&self, name: &str) -> bool {
        self.member(name).is_some()
    }

    /// Identities whose conformance declarations apply to this candidate,
    /// starting with its own.
    fn lineage(&self) -> Vec<CandidateId>;
}

// =============================================================================
// CLASSES
// =============================================================================

/// A class-like type: named members plus base classes.
#[derive(Debug)]
pub struct Class {
    id: CandidateId,
    name: String,
    bases: Vec<Arc<Class>>,
    /// Ancestors in method resolution order, excluding the class itself.
    mro: Vec<Arc<Class>>,
    members: HashMap<String, Value>,
}

impl Class {
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            bases: Vec::new(),
            members: HashMap::new(),
        }
    }

    pub fn bases(&self) -> &[Arc<Class>] {
        &self.bases
    }

    /// Members defined directly on this class, sorted by name.
    pub fn own_members(&self) -> Vec<(&str, &Value)> {
        let mut members: Vec<(&str, &Value)> = self
            .members
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        members.sort_by(|a, b| a.0.cmp(b.0));
        members
    }

    /// Names of this class and its ancestors, in method resolution order.
    pub fn resolution_order(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.mro.iter().map(|class| class.name.as_str()))
            .collect()
    }

    /// Class-level lookup: this class, then its ancestors in resolution order.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.members
            .get(name)
            .or_else(|| self.mro.iter().find_map(|class| class.members.get(name)))
    }
}

/// The class followed by its ancestors.
fn linearization(class: &Arc<Class>) -> Vec<Arc<Class>> {
    std::iter::once(Arc::clone(class))
        .chain(class.mro.iter().cloned())
        .collect()
}

/// C3 merge of the bases' linearizations and the base list itself.
///
/// Returns `None` when no order preserves both every base's own order and
/// the local precedence of `bases`.
fn c3_merge(bases: &[Arc<Class>]) -> Option<Vec<Arc<Class>>> {
    let mut sequences: Vec<Vec<Arc<Class>>> = bases.iter().map(linearization).collect();
    sequences.push(bases.to_vec());

    let mut merged = Vec::new();
    loop {
        sequences.retain(|sequence| !sequence.is_empty());
        if sequences.is_empty() {
            return Some(merged);
        }

        let head = sequences
            .iter()
            .map(|sequence| &sequence[0])
            .find(|head| {
                !sequences
                    .iter()
                    .any(|sequence| sequence[1..].iter().any(|c| c.id == head.id))
            })
            .map(Arc::clone)?;

        for sequence in &mut sequences {
            if sequence[0].id == head.id {
                sequence.remove(0);
            }
        }
        merged.push(head);
    }
}

/// Depth-first, left to right, first occurrence kept.
fn depth_first(bases: &[Arc<Class>]) -> Vec<Arc<Class>> {
    let mut order: Vec<Arc<Class>> = Vec::new();
    for base in bases {
        for class in linearization(base) {
            if !order.iter().any(|seen| seen.id == class.id) {
                order.push(class);
            }
        }
    }
    order
}

/// The bases of a class admit no consistent resolution order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no consistent resolution order for class '{class}' (bases {bases:?})")]
pub struct InconsistentHierarchy {
    pub class: String,
    pub bases: Vec<String>,
}

impl Candidate for Class {
    fn id(&self) -> CandidateId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> CandidateKind {
        CandidateKind::Class
    }

    fn member(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.lookup(name).map(Cow::Borrowed)
    }

    fn lineage(&self) -> Vec<CandidateId> {
        std::iter::once(self.id)
            .chain(self.mro.iter().map(|class| class.id))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ClassBuilder {
    name: String,
    bases: Vec<Arc<Class>>,
    members: HashMap<String, Value>,
}

impl ClassBuilder {
    pub fn base(mut self, base: Arc<Class>) -> Self {
        self.bases.push(base);
        self
    }

    /// An instance method, declared with its receiver (`"self, a"`).
    pub fn function(self, name: impl Into<String>, signature: Callable) -> Self {
        self.member(name, Value::Function(signature))
    }

    pub fn data(self, name: impl Into<String>, data: serde_json::Value) -> Self {
        self.member(name, Value::Data(data))
    }

    pub fn member(mut self, name: impl Into<String>, value: Value) -> Self {
        self.members.insert(name.into(), value);
        self
    }

    /// Build the class, linearizing its bases with C3.
    ///
    /// A hierarchy C3 cannot order (a repeated base, or bases listed against
    /// an order some base already fixes) falls back to depth-first order.
    /// Use [`ClassBuilder::try_build`] to reject it instead.
    pub fn build(self) -> Arc<Class> {
        let mro = c3_merge(&self.bases).unwrap_or_else(|| {
            warn!(class = %self.name, "inconsistent hierarchy, using depth-first order");
            depth_first(&self.bases)
        });
        self.finish(mro)
    }

    pub fn try_build(self) -> Result<Arc<Class>, InconsistentHierarchy> {
        match c3_merge(&self.bases) {
            Some(mro) => Ok(self.finish(mro)),
            None => Err(InconsistentHierarchy {
                class: self.name,
                bases: self.bases.iter().map(|base| base.name.clone()).collect(),
            }),
        }
    }

    fn finish(self, mro: Vec<Arc<Class>>) -> Arc<Class> {
        Arc::new(Class {
            id: CandidateId::next(),
            name: self.name,
            bases: self.bases,
            mro,
            members: self.members,
        })
    }
}

// =============================================================================
// OBJECTS
// =============================================================================

/// An instance of a class, or a module-like bag of attributes.
#[derive(Debug)]
pub struct Object {
    id: CandidateId,
    name: String,
    class: Option<Arc<Class>>,
    attributes: HashMap<String, Value>,
}

impl Object {
    /// A module-like object with no class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CandidateId::next(),
            name: name.into(),
            class: None,
            attributes: HashMap::new(),
        }
    }

    /// Alias of [`Object::new`] that reads better at call sites.
    pub fn module(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    pub fn instance_of(class: &Arc<Class>) -> Self {
        Self {
            id: CandidateId::next(),
            name: format!("{} instance", class.name),
            class: Some(Arc::clone(class)),
            attributes: HashMap::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set an attribute on the object itself. Functions stored here are
    /// never bound.
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn with_function(self, name: impl Into<String>, signature: Callable) -> Self {
        self.with_attribute(name, Value::Function(signature))
    }

    pub fn with_data(self, name: impl Into<String>, data: serde_json::Value) -> Self {
        self.with_attribute(name, Value::Data(data))
    }

    pub fn class(&self) -> Option<&Arc<Class>> {
        self.class.as_ref()
    }

    pub fn into_shared(self) -> Arc<Object> {
        Arc::new(self)
    }
}

impl Candidate for Object {
    fn id(&self) -> CandidateId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> CandidateKind {
        CandidateKind::Object
    }

    fn member(&self, name: &str) -> Option<Cow<'_, Value>> {
        if let Some(value) = self.attributes.get(name) {
            return Some(Cow::Borrowed(value));
        }
        let value = self.class.as_ref()?.lookup(name)?;
        match value {
            Value::Function(callable) => Some(Cow::Owned(Value::Function(callable.bind()))),
            Value::Data(_) => Some(Cow::Borrowed(value)),
        }
    }

    fn lineage(&self) -> Vec<CandidateId> {
        let mut lineage = vec![self.id];
        if let Some(class) = &self.class {
            lineage.extend(class.lineage());
        }
        lineage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sig;
    use serde_json::json;

    #[test]
    fn test_class_lookup_walks_bases() {
        let base = Class::builder("Base")
            .function("inherited", sig("self"))
            .data("shadowed", json!("base"))
            .build();
        let derived = Class::builder("Derived")
            .base(base.clone())
            .data("shadowed", json!("derived"))
            .build();

        assert!(derived.has_member("inherited"));
        assert_eq!(
            derived.member("shadowed").as_deref(),
            Some(&Value::Data(json!("derived")))
        );
        assert!(!derived.has_member("missing"));
        assert_eq!(derived.lineage(), vec![derived.id(), base.id()]);
    }

    #[test]
    fn test_instance_binds_class_functions() {
        let class = Class::builder("Current")
            .function("method", sig("self, a"))
            .data("count", json!(3))
            .build();
        let instance = Object::instance_of(&class);

        assert_eq!(
            instance.member("method").as_deref(),
            Some(&Value::Function(sig("a")))
        );
        assert_eq!(
            instance.member("count").as_deref(),
            Some(&Value::Data(json!(3)))
        );
        assert_eq!(instance.name(), "Current instance");
        assert_eq!(instance.lineage(), vec![instance.id(), class.id()]);
    }

    #[test]
    fn test_own_attributes_shadow_the_class_and_stay_unbound() {
        let class = Class::builder("Current")
            .function("method", sig("self, a"))
            .build();
        let instance = Object::instance_of(&class).with_function("method", sig("x, y"));

        assert_eq!(
            instance.member("method").as_deref(),
            Some(&Value::Function(sig("x, y")))
        );
    }

    #[test]
    fn test_modules_have_only_their_attributes() {
        let module = Object::module("dummy")
            .with_function("bar", sig(""))
            .with_data("version", json!("1.0"));

        assert_eq!(module.kind(), CandidateKind::Object);
        assert!(module.has_member("bar"));
        assert!(module.has_member("version"));
        assert!(!module.has_member("baz"));
        assert_eq!(module.lineage(), vec![module.id()]);
    }

    #[test]
    fn test_diamond_lookup_follows_c3_order() {
        let a = Class::builder("A").function("m", sig("self")).build();
        let b = Class::builder("B").base(a.clone()).build();
        let c = Class::builder("C")
            .base(a.clone())
            .function("m", sig("self, x"))
            .build();
        let d = Class::builder("D").base(b.clone()).base(c.clone()).build();

        assert_eq!(d.resolution_order(), vec!["D", "B", "C", "A"]);
        assert_eq!(
            d.member("m").as_deref(),
            Some(&Value::Function(sig("self, x")))
        );
        assert_eq!(d.lineage(), vec![d.id(), b.id(), c.id(), a.id()]);
    }

    #[test]
    fn test_inconsistent_hierarchy_is_rejected_by_try_build() {
        let a = Class::builder("A").function("m", sig("self")).build();
        let b = Class::builder("B")
            .base(a.clone())
            .function("m", sig("self, x"))
            .build();

        // A before B contradicts B's own order (B, A)
        let err = Class::builder("X")
            .base(a.clone())
            .base(b.clone())
            .try_build()
            .unwrap_err();
        assert_eq!(err.class, "X");
        assert_eq!(err.bases, vec!["A", "B"]);

        assert!(Class::builder("Twice")
            .base(a.clone())
            .base(a.clone())
            .try_build()
            .is_err());
    }

    #[test]
    fn test_inconsistent_hierarchy_falls_back_to_depth_first() {
        let a = Class::builder("A").function("m", sig("self")).build();
        let b = Class::builder("B")
            .base(a.clone())
            .function("m", sig("self, x"))
            .build();
        let x = Class::builder("X").base(a).base(b).build();

        assert_eq!(x.resolution_order(), vec!["X", "A", "B"]);
        assert_eq!(x.member("m").as_deref(), Some(&Value::Function(sig("self"))));
    }

    #[test]
    fn test_identities_are_unique() {
        let a = Class::builder("Same").build();
        let b = Class::builder("Same").build();
        assert_ne!(a.id(), b.id());
    }
}
