use core::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Kind tag of an ABI entry (`"type"` in Solidity ABI JSON).
///
/// Only functions and events carry fingerprints. Entries without a tag are
/// treated as [`EntryKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Callable contract function.
    Function,
    /// Emitted log event.
    Event,
    /// Contract constructor.
    Constructor,
    /// Fallback function.
    Fallback,
    /// Plain ether receive function.
    Receive,
    /// Custom error declaration.
    Error,
    /// Any other or missing tag.
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Function => write!(f, "function"),
            EntryKind::Event => write!(f, "event"),
            EntryKind::Constructor => write!(f, "constructor"),
            EntryKind::Fallback => write!(f, "fallback"),
            EntryKind::Receive => write!(f, "receive"),
            EntryKind::Error => write!(f, "error"),
            EntryKind::Other => write!(f, "other"),
        }
    }
}

/// Nested component list of a `tuple…` parameter.
///
/// The three states are kept apart so that a tuple whose components are
/// missing or malformed is reported instead of being canonicalised as `()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Components {
    /// No `components` key (or an explicit `null`).
    #[default]
    Absent,
    /// Well-formed list of nested parameter descriptors.
    List(Vec<AbiParam>),
    /// `components` present but not a list of parameter objects.
    Invalid,
}

impl<'de> Deserialize<'de> for Components {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => Components::Absent,
            Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value::<AbiParam>)
                .collect::<Result<Vec<_>, _>>()
                .map(Components::List)
                .unwrap_or(Components::Invalid),
            _ => Components::Invalid,
        })
    }
}

/// Parameter descriptor (`inputs[i]` or a tuple component).
///
/// Names, `internalType` and `indexed` flags are ignored: only the structural
/// type participates in the canonical signature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbiParam {
    /// Declared Solidity type, e.g. `uint256`, `tuple[]`.
    #[serde(rename = "type", default)]
    pub ty: String,
    /// Nested components for `tuple…` types.
    #[serde(default)]
    pub components: Components,
}

impl AbiParam {
    /// Creates a scalar (non-tuple) parameter.
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            components: Components::Absent,
        }
    }

    /// Creates a tuple parameter. `ty` must start with `tuple` and may carry
    /// an array suffix such as `tuple[]` or `tuple[3]`.
    pub fn tuple(ty: impl Into<String>, components: Vec<AbiParam>) -> Self {
        Self {
            ty: ty.into(),
            components: Components::List(components),
        }
    }

    /// Returns `true` when the declared type is a tuple or tuple array.
    pub fn is_tuple(&self) -> bool {
        self.ty.starts_with(TUPLE_PREFIX)
    }
}

pub(crate) const TUPLE_PREFIX: &str = "tuple";

/// Single entry of a contract ABI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbiEntry {
    /// Entry kind tag.
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    /// Function, event or error name.
    #[serde(default)]
    pub name: Option<String>,
    /// Ordered input parameters.
    #[serde(rename = "inputs", alias = "params", default)]
    pub params: Vec<AbiParam>,
}

impl AbiEntry {
    /// Creates an entry of arbitrary kind.
    pub fn new(kind: EntryKind, name: impl Into<String>, params: Vec<AbiParam>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            params,
        }
    }

    /// Creates a function entry.
    pub fn function(name: impl Into<String>, params: Vec<AbiParam>) -> Self {
        Self::new(EntryKind::Function, name, params)
    }

    /// Creates an event entry.
    pub fn event(name: impl Into<String>, params: Vec<AbiParam>) -> Self {
        Self::new(EntryKind::Event, name, params)
    }

    /// Returns the name when present and non-empty.
    pub fn non_empty_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
