// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The signature model: normalized parameter shapes and arity compatibility.
//!
//! Both sides of a method check go through [`SignatureDescriptor::from_callable`]:
//! the interface's declared method (never stripped) and the candidate's member
//! (stripped of its receiver when it was found unbound on a class). The two
//! descriptors are then compared by [`SignatureDescriptor::incompatibility`].
//!
//! Parameter names are carried for display only. They are never compared:
//! `f(a)` on the interface is satisfied by `f(self, b)` on the class.
//!
//! # Compatibility rules
//!
//! `C` is the candidate, `I` the interface. First failing rule wins.
//!
//! | # | Fails when                                               | Reason                   |
//! |---|----------------------------------------------------------|--------------------------|
//! | 1 | `C.required > I.required`                                | `TooManyRequired`        |
//! | 2 | `C.positional < I.positional` and `C` has no `*args`     | `NotEnoughPositional`    |
//! | 3 | `I` has `**kw` and `C` does not                          | `NoKeywordSupport`       |
//! | 4 | `I` has `*args` and `C` does not                         | `NoVarargsSupport`       |
//! | 5 | `C.keyword_required > I.keyword_required`                | `TooManyRequiredKeywords`|
//! | 6 | `C` has no `**kw` and can't take all of `I`'s keyword-only params | `NotEnoughKeywords` |
//!
//! Rules 1-2 form the positional branch, rule 3 the keyword branch. They are
//! deliberately independent: `**kw` never absorbs a positional shortfall and
//! `*args` never stands in for keyword support.

use std::fmt;

use thiserror::Error;

use crate::types::{Callable, ParamKind};
use crate::verify::MethodMismatch;

/// The signature of a callable could not be inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("uninspectable signature")]
    Uninspectable,
}

/// Normalized, comparable shape of a callable's parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureDescriptor {
    /// Positional parameters without defaults, in order.
    pub required: Vec<String>,
    /// Positional parameters with defaults, in order.
    pub optional: Vec<String>,
    /// How many positional parameters (in declaration order) are positional-only.
    pub positional_only: usize,
    pub keyword_required: Vec<String>,
    pub keyword_optional: Vec<String>,
    pub var_positional: bool,
    pub var_keyword: bool,
}

impl SignatureDescriptor {
    /// Extract the descriptor of `callable`.
    ///
    /// With `strip_receiver`, the leading positional parameter is dropped first
    /// (an unbound method's receiver). A leading `*args` absorbs the receiver
    /// and nothing is dropped.
    pub fn from_callable(
        callable: &Callable,
        strip_receiver: bool,
    ) -> Result<Self, SignatureError> {
        let params = callable.params().ok_or(SignatureError::Uninspectable)?;
        let params = match params.first() {
            Some(first) if strip_receiver && first.kind.is_positional() => &params[1..],
            _ => params,
        };

        let mut descriptor = SignatureDescriptor::default();
        for param in params {
            let name = param.name.clone();
            match param.kind {
                ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword => {
                    if param.kind == ParamKind::PositionalOnly {
                        descriptor.positional_only += 1;
                    }
                    if param.has_default {
                        descriptor.optional.push(name);
                    } else {
                        descriptor.required.push(name);
                    }
                }
                ParamKind::KeywordOnly => {
                    if param.has_default {
                        descriptor.keyword_optional.push(name);
                    } else {
                        descriptor.keyword_required.push(name);
                    }
                }
                ParamKind::VarPositional => descriptor.var_positional = true,
                ParamKind::VarKeyword => descriptor.var_keyword = true,
            }
        }

        Ok(descriptor)
    }

    #[inline]
    pub fn required_count(&self) -> usize {
        self.required.len()
    }

    /// Most positional arguments accepted without `*args`.
    #[inline]
    pub fn positional_count(&self) -> usize {
        self.required.len() + self.optional.len()
    }

    #[inline]
    pub fn keyword_only_count(&self) -> usize {
        self.keyword_required.len() + self.keyword_optional.len()
    }

    /// Why `self` (the candidate) cannot stand in for `required` (the
    /// interface), or `None` when it can.
    pub fn incompatibility(&self, required: &SignatureDescriptor) -> Option<MethodMismatch> {
        if self.required_count() > required.required_count() {
            return Some(MethodMismatch::TooManyRequired {
                required: self.required_count(),
                supplied: required.required_count(),
            });
        }

        if self.positional_count() < required.positional_count() && !self.var_positional {
            return Some(MethodMismatch::NotEnoughPositional {
                accepted: self.positional_count(),
                supplied: required.positional_count(),
            });
        }

        if required.var_keyword && !self.var_keyword {
            return Some(MethodMismatch::NoKeywordSupport);
        }

        if required.var_positional && !self.var_positional {
            return Some(MethodMismatch::NoVarargsSupport);
        }

        if self.keyword_required.len() > required.keyword_required.len() {
            return Some(MethodMismatch::TooManyRequiredKeywords {
                required: self.keyword_required.len(),
                supplied: required.keyword_required.len(),
            });
        }

        if !self.var_keyword {
            let capacity = self.keyword_only_count() + self.keyword_capable_beyond(required);
            if capacity < required.keyword_only_count() {
                return Some(MethodMismatch::NotEnoughKeywords {
                    accepted: capacity,
                    supplied: required.keyword_only_count(),
                });
            }
        }

        None
    }

    /// Positional parameters of `self` that the interface never fills by
    /// position and that can still be passed by name.
    fn keyword_capable_beyond(&self, required: &SignatureDescriptor) -> usize {
        let first_free = required.positional_count().max(self.positional_only);
        self.positional_count().saturating_sub(first_free)
    }
}

impl fmt::Display for SignatureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        let positional = self
            .required
            .iter()
            .map(String::as_str)
            .chain(self.optional.iter().map(String::as_str));
        for (i, name) in positional.enumerate() {
            if i < self.required.len() {
                parts.push(name.to_string());
            } else {
                parts.push(format!("{}=...", name));
            }
            if self.positional_only > 0 && i + 1 == self.positional_only {
                parts.push("/".to_string());
            }
        }
        if self.var_positional || self.keyword_only_count() > 0 {
            parts.push("*".to_string());
        }
        parts.extend(self.keyword_required.iter().cloned());
        parts.extend(
            self.keyword_optional
                .iter()
                .map(|name| format!("{}=...", name)),
        );
        if self.var_keyword {
            parts.push("**".to_string());
        }
        write!(f, "({})", parts.join(", "))
    }
}
