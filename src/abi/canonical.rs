//! Solidity-style canonical signatures.
//!
//! `tuple` parameters are rendered as `(<component types>)<suffix>` where the
//! suffix is whatever followed `tuple` in the declared type (`[]`, `[3]`,
//! `[2][]`, …). Every other type is already canonical and copied verbatim.
//! Tuples are walked with an explicit stack so hostile nesting cannot grow
//! the call stack.

use core::fmt;

use crate::config::MAX_TUPLE_DEPTH;

use super::error::{AbiError, AbiResult};
use super::types::{AbiEntry, AbiParam, Components, EntryKind, TUPLE_PREFIX};

/// Canonical `name(type,…)` text of a function or event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalSignature(String);

impl CanonicalSignature {
    /// Returns the signature text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the UTF-8 bytes fed to the hash engine.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Consumes the signature and returns its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalSignature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CanonicalSignature> for String {
    fn from(signature: CanonicalSignature) -> Self {
        signature.0
    }
}

/// Tuple whose components are still being rendered.
struct TupleFrame<'a> {
    suffix: &'a str,
    pending: core::slice::Iter<'a, AbiParam>,
    rendered: Vec<String>,
}

impl TupleFrame<'_> {
    fn finish(&self) -> String {
        format!("({}){}", self.rendered.join(","), self.suffix)
    }
}

fn open_tuple(param: &AbiParam) -> AbiResult<Option<TupleFrame<'_>>> {
    if !param.is_tuple() {
        return Ok(None);
    }
    let suffix = &param.ty[TUPLE_PREFIX.len()..];
    match &param.components {
        Components::List(items) => Ok(Some(TupleFrame {
            suffix,
            pending: items.iter(),
            rendered: Vec::with_capacity(items.len()),
        })),
        Components::Absent => Err(AbiError::MissingComponents {
            ty: param.ty.clone(),
        }),
        Components::Invalid => Err(AbiError::InvalidComponents {
            ty: param.ty.clone(),
        }),
    }
}

/// Returns the canonical type string of a single parameter.
///
/// Fails when a `tuple…` parameter (at any depth) lacks a valid component
/// list, or when tuples nest deeper than [`MAX_TUPLE_DEPTH`].
pub fn canonical_type(param: &AbiParam) -> AbiResult<String> {
    let Some(root) = open_tuple(param)? else {
        return Ok(param.ty.clone());
    };

    let mut stack = vec![root];
    let mut finished = String::new();
    while let Some(frame) = stack.last_mut() {
        match frame.pending.next() {
            Some(child) => match open_tuple(child)? {
                Some(nested) => {
                    if stack.len() >= MAX_TUPLE_DEPTH {
                        return Err(AbiError::TupleDepthExceeded {
                            limit: MAX_TUPLE_DEPTH,
                        });
                    }
                    stack.push(nested);
                }
                None => frame.rendered.push(child.ty.clone()),
            },
            None => {
                let text = frame.finish();
                stack.pop();
                match stack.last_mut() {
                    Some(parent) => parent.rendered.push(text),
                    None => finished = text,
                }
            }
        }
    }
    Ok(finished)
}

/// Joins the canonical types of `params` with commas.
pub fn canonical_params(params: &[AbiParam]) -> AbiResult<String> {
    let types = params
        .iter()
        .map(canonical_type)
        .collect::<AbiResult<Vec<_>>>()?;
    Ok(types.join(","))
}

/// Returns `name(type,…)` for named functions and events.
///
/// `Ok(None)` means the entry has no signature (other kinds, or a missing
/// or empty name) and should be skipped. `Err` means the entry is malformed.
pub fn canonical_signature(entry: &AbiEntry) -> AbiResult<Option<CanonicalSignature>> {
    if !matches!(entry.kind, EntryKind::Function | EntryKind::Event) {
        return Ok(None);
    }
    let Some(name) = entry.non_empty_name() else {
        return Ok(None);
    };
    let params = canonical_params(&entry.params)?;
    Ok(Some(CanonicalSignature(format!("{name}({params})"))))
}
