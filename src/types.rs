// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a declaration: parameters, callables, and values.
//!
//! Rust has no runtime reflection over parameter lists, so every callable that
//! takes part in verification carries its declared shape explicitly. A
//! `Callable` is either a declared parameter list or opaque (it exists and can
//! be called, but nobody told us how).
//!
//! Signatures are usually written in a Python-like mini-syntax and parsed:
//!
//! ```text
//! self, a, b=None, /, c=0, *args, d, e=1, **kw
//! │     │  │       │  │    │      │         └─ variadic keyword (must be last)
//! │     │  │       │  │    │      └─ keyword-only (after * or *args)
//! │     │  │       │  │    └─ variadic positional
//! │     │  │       │  └─ positional-or-keyword
//! │     │  │       └─ everything before / is positional-only
//! │     │  └─ defaulted (the value itself is never looked at)
//! │     └─ required
//! └─ receiver (only meaningful for unbound methods)
//! ```
//!
//! # Invariants
//!
//! - **Parsed callables** have unique parameter names, no required positional
//!   parameter after a defaulted one, and nothing after `**kw`.
//! - **Hand-built callables** (`Callable::new`) are taken as declared. The
//!   signature model classifies parameters without re-validating their order.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// =============================================================================
// PARAMETERS
// =============================================================================

/// How a parameter can receive its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Only by position (declared before `/`).
    PositionalOnly,
    /// By position or by name.
    PositionalOrKeyword,
    /// `*args`: absorbs any number of extra positional arguments.
    VarPositional,
    /// Only by name (declared after `*` or `*args`).
    KeywordOnly,
    /// `**kw`: absorbs any number of extra keyword arguments.
    VarKeyword,
}

impl ParamKind {
    /// Whether a parameter of this kind occupies a positional slot.
    #[inline]
    pub fn is_positional(self) -> bool {
        matches!(
            self,
            ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword
        )
    }
}

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    /// Only the presence of a default matters, never its value.
    pub has_default: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, kind: ParamKind, has_default: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            has_default,
        }
    }

    /// Required positional-or-keyword parameter.
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositionalOrKeyword, false)
    }

    /// Defaulted positional-or-keyword parameter.
    pub fn optional(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositionalOrKeyword, true)
    }

    pub fn positional_only(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositionalOnly, false)
    }

    pub fn var_positional(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::VarPositional, false)
    }

    pub fn keyword_only(name: impl Into<String>, has_default: bool) -> Self {
        Self::new(name, ParamKind::KeywordOnly, has_default)
    }

    pub fn var_keyword(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::VarKeyword, false)
    }
}

// =============================================================================
// CALLABLES
// =============================================================================

/// Something that can be called, with its declared parameter list when known.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Callable {
    /// `None` means the callable is opaque: its signature cannot be inspected.
    params: Option<Vec<Param>>,
}

impl Callable {
    /// A callable with a declared parameter list.
    pub fn new(params: Vec<Param>) -> Self {
        Self {
            params: Some(params),
        }
    }

    /// A callable whose signature cannot be inspected (native or foreign code).
    pub fn opaque() -> Self {
        Self { params: None }
    }

    /// The declared parameters, or `None` for an opaque callable.
    pub fn params(&self) -> Option<&[Param]> {
        self.params.as_deref()
    }

    pub fn is_opaque(&self) -> bool {
        self.params.is_none()
    }

    /// The bound view of an unbound method.
    ///
    /// Drops the leading positional parameter (the receiver). A leading `*args`
    /// absorbs the receiver and is kept, and opaque callables stay opaque.
    pub fn bind(&self) -> Callable {
        match &self.params {
            Some(params) => match params.first() {
                Some(first) if first.kind.is_positional() => Callable::new(params[1..].to_vec()),
                _ => self.clone(),
            },
            None => Callable::opaque(),
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(params) = &self.params else {
            return write!(f, "<opaque>");
        };

        let last_positional_only = params
            .iter()
            .rposition(|p| p.kind == ParamKind::PositionalOnly);
        let mut star_emitted = false;
        let mut parts: Vec<String> = Vec::with_capacity(params.len() + 2);

        for (i, param) in params.iter().enumerate() {
            match param.kind {
                ParamKind::VarPositional => {
                    star_emitted = true;
                    parts.push(format!("*{}", param.name));
                }
                ParamKind::VarKeyword => parts.push(format!("**{}", param.name)),
                ParamKind::KeywordOnly => {
                    if !star_emitted {
                        star_emitted = true;
                        parts.push("*".to_string());
                    }
                    parts.push(render_named(param));
                }
                ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword => {
                    parts.push(render_named(param));
                }
            }
            if Some(i) == last_positional_only {
                parts.push("/".to_string());
            }
        }

        write!(f, "{}", parts.join(", "))
    }
}

fn render_named(param: &Param) -> String {
    if param.has_default {
        format!("{}=...", param.name)
    } else {
        param.name.clone()
    }
}

/// Why a signature string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureParseError {
    #[error("empty parameter at position {position}")]
    EmptyName { position: usize },
    #[error("'{name}' is not a valid parameter name")]
    InvalidName { name: String },
    #[error("duplicate parameter '{name}'")]
    DuplicateName { name: String },
    #[error("required parameter '{name}' follows a parameter with a default")]
    RequiredAfterDefault { name: String },
    #[error("'/' must follow at least one positional parameter")]
    MisplacedSlash,
    #[error("'/' may appear only once")]
    RepeatedSlash,
    #[error("'*' may appear only once")]
    RepeatedStar,
    #[error("bare '*' must be followed by a keyword-only parameter")]
    BareStarWithoutKeywords,
    #[error("'{token}' follows the variadic keyword parameter")]
    AfterVarKeyword { token: String },
}

fn validate_name(name: &str, position: usize) -> Result<(), SignatureParseError> {
    let Some(first) = name.chars().next() else {
        return Err(SignatureParseError::EmptyName { position });
    };
    let valid = (first.is_alphabetic() || first == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SignatureParseError::InvalidName {
            name: name.to_string(),
        })
    }
}

impl FromStr for Callable {
    type Err = SignatureParseError;

    /// Parse a declared signature such as `"self, a, b=None, *args, **kw"`.
    ///
    /// Default values may be any text without a comma; they are discarded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let source = s.trim();
        if source.is_empty() {
            return Ok(Callable::new(Vec::new()));
        }

        let mut params: Vec<Param> = Vec::new();
        let mut names: HashSet<String> = HashSet::new();
        let mut seen_default = false;
        let mut seen_slash = false;
        let mut seen_star = false;
        let mut bare_star_pending = false;
        let mut seen_var_keyword = false;

        for (position, raw) in source.split(',').enumerate() {
            let token = raw.trim();
            if seen_var_keyword {
                return Err(SignatureParseError::AfterVarKeyword {
                    token: token.to_string(),
                });
            }

            if token == "/" {
                if seen_slash {
                    return Err(SignatureParseError::RepeatedSlash);
                }
                if seen_star || params.is_empty() {
                    return Err(SignatureParseError::MisplacedSlash);
                }
                for param in &mut params {
                    param.kind = ParamKind::PositionalOnly;
                }
                seen_slash = true;
                continue;
            }

            if token == "*" {
                if seen_star {
                    return Err(SignatureParseError::RepeatedStar);
                }
                seen_star = true;
                bare_star_pending = true;
                continue;
            }

            let param = if let Some(name) = token.strip_prefix("**") {
                let name = name.trim();
                validate_name(name, position)?;
                seen_var_keyword = true;
                Param::var_keyword(name)
            } else if let Some(name) = token.strip_prefix('*') {
                if seen_star {
                    return Err(SignatureParseError::RepeatedStar);
                }
                let name = name.trim();
                validate_name(name, position)?;
                seen_star = true;
                Param::var_positional(name)
            } else {
                let (name, has_default) = match token.split_once('=') {
                    Some((name, _)) => (name.trim(), true),
                    None => (token, false),
                };
                validate_name(name, position)?;

                if seen_star {
                    bare_star_pending = false;
                    Param::keyword_only(name, has_default)
                } else {
                    if has_default {
                        seen_default = true;
                    } else if seen_default {
                        return Err(SignatureParseError::RequiredAfterDefault {
                            name: name.to_string(),
                        });
                    }
                    Param::new(name, ParamKind::PositionalOrKeyword, has_default)
                }
            };

            if !names.insert(param.name.clone()) {
                return Err(SignatureParseError::DuplicateName { name: param.name });
            }
            params.push(param);
        }

        if bare_star_pending {
            return Err(SignatureParseError::BareStarWithoutKeywords);
        }

        Ok(Callable::new(params))
    }
}

// =============================================================================
// VALUES
// =============================================================================

/// What a member of a class or object holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Anything callable: functions, methods, constructors.
    Function(Callable),
    /// Plain data. Never callable, whatever it contains.
    Data(serde_json::Value),
}

impl Value {
    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Function(callable) => Some(callable),
            Value::Data(_) => None,
        }
    }

    /// Short description used in log output.
    pub fn describe(&self) -> &'static str {
        match self {
            Value::Function(callable) if callable.is_opaque() => "opaque function",
            Value::Function(_) => "function",
            Value::Data(_) => "data",
        }
    }
}

impl From<Callable> for Value {
    fn from(callable: Callable) -> Self {
        Value::Function(callable)
    }
}

impl From<serde_json::Value> for Value {
    fn from(data: serde_json::Value) -> Self {
        Value::Data(data)
    }
}
