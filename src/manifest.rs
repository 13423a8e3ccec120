// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON manifests describing a world to verify.
//!
//! A manifest lists interfaces, classes and objects by name, with signatures
//! written in the mini-syntax understood by [`Callable`]'s `FromStr`.
//! Declarations are part of the manifest (`implements` on classes, `provides`
//! on objects). Entries may reference each other in any order.
//!
//! ```json
//! {
//!   "version": 1,
//!   "interfaces": [
//!     { "name": "IBase", "methods": { "method": "a, *args" } },
//!     { "name": "IDerived", "extends": ["IBase"],
//!       "attributes": { "foo": "The foo attribute" } }
//!   ],
//!   "classes": [
//!     { "name": "Current", "implements": ["IDerived"],
//!       "members": { "method": { "function": "self, a, *args" },
//!                    "foo": { "data": 1 },
//!                    "native": "opaque" } }
//!   ],
//!   "objects": [
//!     { "name": "current", "class": "Current" },
//!     { "name": "dummy", "provides": ["IBase"],
//!       "attributes": { "method": { "function": "*args" } } }
//!   ]
//! }
//! ```

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::candidate::{Class, InconsistentHierarchy, Object};
use crate::interface::Interface;
use crate::registry::Registry;
use crate::types::{Callable, SignatureParseError, Value};

/// The only manifest version understood.
pub const MANIFEST_VERSION: u32 = 1;

fn default_version() -> u32 {
    MANIFEST_VERSION
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDef>,
    #[serde(default)]
    pub classes: Vec<ClassDef>,
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct InterfaceDef {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    #[serde(default)]
    pub extends: Vec<String>,
    /// Attribute name to documentation.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Method name to signature, declared without a receiver.
    #[serde(default)]
    pub methods: BTreeMap<String, String>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct ClassDef {
    pub name: String,
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    /// Functions are declared with their receiver.
    #[serde(default)]
    pub members: BTreeMap<String, MemberDef>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct ObjectDef {
    pub name: String,
    /// Makes the object an instance of this class; without it the object is
    /// module-like.
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub provides: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, MemberDef>,
}

/// A member value as written in a manifest.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MemberDef {
    /// `{"function": "self, a"}`
    Function(String),
    /// `"opaque"`: callable, signature unknown.
    Opaque,
    /// `{"data": <any JSON>}`
    Data(serde_json::Value),
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported manifest version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("duplicate {kind} '{name}'")]
    DuplicateName { kind: &'static str, name: String },
    #[error("'{member}' is declared both as attribute and method on {owner}")]
    DuplicateMember { owner: String, member: String },
    #[error("unknown interface '{name}' referenced by {referenced_by}")]
    UnknownInterface { name: String, referenced_by: String },
    #[error("unknown class '{name}' referenced by {referenced_by}")]
    UnknownClass { name: String, referenced_by: String },
    #[error("inheritance cycle through '{name}'")]
    Cycle { name: String },
    #[error(transparent)]
    Hierarchy(#[from] InconsistentHierarchy),
    #[error("invalid signature for {owner}.{member}: {source}")]
    Signature {
        owner: String,
        member: String,
        source: SignatureParseError,
    },
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest = serde_json::from_str(json)?;
        if manifest.version != MANIFEST_VERSION {
            return Err(ManifestError::UnsupportedVersion {
                found: manifest.version,
                expected: MANIFEST_VERSION,
            });
        }
        Ok(manifest)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Resolve every name and record every declaration.
    pub fn build(&self) -> Result<Catalog, ManifestError> {
        let interface_defs = index_by_name("interface", &self.interfaces, |d| &d.name)?;
        let class_defs = index_by_name("class", &self.classes, |d| &d.name)?;
        index_by_name("object", &self.objects, |d| &d.name)?;

        let mut interfaces = Resolver::new(interface_defs);
        for def in &self.interfaces {
            interfaces.resolve(&def.name, "manifest", &build_interface)?;
        }

        let mut classes = Resolver::new(class_defs);
        for def in &self.classes {
            classes.resolve(&def.name, "manifest", &build_class)?;
        }

        let registry = Registry::new();
        for def in &self.classes {
            let class = &classes.resolved[&def.name];
            for name in &def.implements {
                let interface = lookup_interface(&interfaces.resolved, name, &def.name)?;
                registry.implement(class, interface);
            }
        }

        let mut objects = BTreeMap::new();
        for def in &self.objects {
            let object = build_object(def, &classes.resolved)?;
            for name in &def.provides {
                let interface = lookup_interface(&interfaces.resolved, name, &def.name)?;
                registry.provide(&object, interface);
            }
            objects.insert(def.name.clone(), object);
        }

        Ok(Catalog {
            interfaces: interfaces.resolved,
            classes: classes.resolved,
            objects,
            registry,
        })
    }
}

fn index_by_name<'a, T>(
    kind: &'static str,
    defs: &'a [T],
    name: impl Fn(&T) -> &String,
) -> Result<HashMap<String, &'a T>, ManifestError> {
    let mut index = HashMap::with_capacity(defs.len());
    for def in defs {
        if index.insert(name(def).clone(), def).is_some() {
            return Err(ManifestError::DuplicateName {
                kind,
                name: name(def).clone(),
            });
        }
    }
    Ok(index)
}

fn lookup_interface<'a>(
    resolved: &'a BTreeMap<String, Arc<Interface>>,
    name: &str,
    referenced_by: &str,
) -> Result<&'a Arc<Interface>, ManifestError> {
    resolved
        .get(name)
        .ok_or_else(|| ManifestError::UnknownInterface {
            name: name.to_string(),
            referenced_by: referenced_by.to_string(),
        })
}

fn parse_signature(owner: &str, member: &str, source: &str) -> Result<Callable, ManifestError> {
    source.parse().map_err(|source| ManifestError::Signature {
        owner: owner.to_string(),
        member: member.to_string(),
        source,
    })
}

fn member_value(owner: &str, member: &str, def: &MemberDef) -> Result<Value, ManifestError> {
    Ok(match def {
        MemberDef::Function(signature) => {
            Value::Function(parse_signature(owner, member, signature)?)
        }
        MemberDef::Opaque => Value::Function(Callable::opaque()),
        MemberDef::Data(data) => Value::Data(data.clone()),
    })
}

/// Something that can be built once its named parents exist.
trait Inheriting {
    fn name(&self) -> &str;
    fn parents(&self) -> &[String];
    fn unknown_parent(name: &str, referenced_by: &str) -> ManifestError;
}

impl Inheriting for InterfaceDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn parents(&self) -> &[String] {
        &self.extends
    }

    fn unknown_parent(name: &str, referenced_by: &str) -> ManifestError {
        ManifestError::UnknownInterface {
            name: name.to_string(),
            referenced_by: referenced_by.to_string(),
        }
    }
}

impl Inheriting for ClassDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn parents(&self) -> &[String] {
        &self.bases
    }

    fn unknown_parent(name: &str, referenced_by: &str) -> ManifestError {
        ManifestError::UnknownClass {
            name: name.to_string(),
            referenced_by: referenced_by.to_string(),
        }
    }
}

/// Builds one entity from its definition and its already-built parents.
type BuildFn<D, T> = dyn Fn(&D, Vec<Arc<T>>) -> Result<Arc<T>, ManifestError>;

/// Depth-first resolution with cycle detection, shared by interfaces and classes.
struct Resolver<'a, D, T> {
    defs: HashMap<String, &'a D>,
    resolved: BTreeMap<String, Arc<T>>,
    visiting: HashSet<String>,
}

impl<'a, D: Inheriting, T> Resolver<'a, D, T> {
    fn new(defs: HashMap<String, &'a D>) -> Self {
        Self {
            defs,
            resolved: BTreeMap::new(),
            visiting: HashSet::new(),
        }
    }

    fn resolve(
        &mut self,
        name: &str,
        referenced_by: &str,
        build: &BuildFn<D, T>,
    ) -> Result<Arc<T>, ManifestError> {
        if let Some(done) = self.resolved.get(name) {
            return Ok(Arc::clone(done));
        }
        let def = *self
            .defs
            .get(name)
            .ok_or_else(|| D::unknown_parent(name, referenced_by))?;
        if !self.visiting.insert(name.to_string()) {
            return Err(ManifestError::Cycle {
                name: name.to_string(),
            });
        }

        let mut parents = Vec::with_capacity(def.parents().len());
        for parent in def.parents() {
            parents.push(self.resolve(parent, def.name(), build)?);
        }

        let built = build(def, parents)?;
        self.visiting.remove(name);
        self.resolved.insert(name.to_string(), Arc::clone(&built));
        Ok(built)
    }
}

fn build_interface(
    def: &InterfaceDef,
    bases: Vec<Arc<Interface>>,
) -> Result<Arc<Interface>, ManifestError> {
    let mut builder = Interface::builder(&def.name).doc(&def.doc);
    for base in bases {
        builder = builder.extends(base);
    }
    for (name, doc) in &def.attributes {
        builder = builder.attribute(name, doc);
    }
    for (name, signature) in &def.methods {
        if def.attributes.contains_key(name) {
            return Err(ManifestError::DuplicateMember {
                owner: def.name.clone(),
                member: name.clone(),
            });
        }
        builder = builder.method(name, parse_signature(&def.name, name, signature)?);
    }
    Ok(builder.build())
}

fn build_class(def: &ClassDef, bases: Vec<Arc<Class>>) -> Result<Arc<Class>, ManifestError> {
    let mut builder = Class::builder(&def.name);
    for base in bases {
        builder = builder.base(base);
    }
    for (name, member) in &def.members {
        builder = builder.member(name, member_value(&def.name, name, member)?);
    }
    Ok(builder.try_build()?)
}

fn build_object(
    def: &ObjectDef,
    classes: &BTreeMap<String, Arc<Class>>,
) -> Result<Arc<Object>, ManifestError> {
    let mut object = match &def.class {
        Some(class_name) => {
            let class = classes
                .get(class_name)
                .ok_or_else(|| ManifestError::UnknownClass {
                    name: class_name.clone(),
                    referenced_by: def.name.clone(),
                })?;
            Object::instance_of(class).named(&def.name)
        }
        None => Object::module(&def.name),
    };
    for (name, member) in &def.attributes {
        object = object.with_attribute(name, member_value(&def.name, name, member)?);
    }
    Ok(object.into_shared())
}

/// Everything a manifest describes, resolved and declared.
#[derive(Debug)]
pub struct Catalog {
    interfaces: BTreeMap<String, Arc<Interface>>,
    classes: BTreeMap<String, Arc<Class>>,
    objects: BTreeMap<String, Arc<Object>>,
    registry: Registry,
}

impl Catalog {
    pub fn interface(&self, name: &str) -> Option<&Arc<Interface>> {
        self.interfaces.get(name)
    }

    pub fn class(&self, name: &str) -> Option<&Arc<Class>> {
        self.classes.get(name)
    }

    pub fn object(&self, name: &str) -> Option<&Arc<Object>> {
        self.objects.get(name)
    }

    /// All interfaces, sorted by name.
    pub fn interfaces(&self) -> impl Iterator<Item = &Arc<Interface>> {
        self.interfaces.values()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
