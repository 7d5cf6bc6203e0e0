use core::fmt;

/// Failure raised while canonicalising or parsing ABI descriptions.
///
/// Entries that simply have no selector or topic (constructors, unnamed
/// fallbacks, …) are *not* errors; the derivation helpers return `Ok(None)`
/// for those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// A `tuple…` parameter carried no `components` list.
    MissingComponents {
        /// Declared parameter type.
        ty: String,
    },
    /// A `tuple…` parameter carried `components` that are not a list of
    /// parameter descriptors.
    InvalidComponents {
        /// Declared parameter type.
        ty: String,
    },
    /// Tuple nesting exceeded the configured bound.
    TupleDepthExceeded {
        /// Maximum nesting depth accepted.
        limit: usize,
    },
    /// The ABI document was not valid JSON.
    InvalidJson(String),
    /// The ABI document parsed but its top level is not an array.
    NotAnArray,
}

impl fmt::Display for AbiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiError::MissingComponents { ty } => {
                write!(f, "tuple parameter `{ty}` has no components")
            }
            AbiError::InvalidComponents { ty } => {
                write!(f, "tuple parameter `{ty}` has malformed components")
            }
            AbiError::TupleDepthExceeded { limit } => {
                write!(f, "tuple nesting exceeds {limit} levels")
            }
            AbiError::InvalidJson(reason) => write!(f, "invalid ABI JSON: {reason}"),
            AbiError::NotAnArray => write!(f, "ABI JSON must be an array of entries"),
        }
    }
}

impl std::error::Error for AbiError {}

/// Convenient alias for ABI results.
pub type AbiResult<T> = core::result::Result<T, AbiError>;
