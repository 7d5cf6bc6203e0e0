//! Known-signature matching.
//!
//! An [`IndicatorTable`] holds the expected selector and topic bytes of the
//! signatures of interest. [`match_indicators`] derives each ABI entry's
//! fingerprint and tests membership by byte equality, so cosmetic
//! differences in the ABI text (parameter names, `internalType`, key order,
//! whitespace) cannot hide a match. [`scan_keywords`] is the plain-text
//! companion run over contract sources.

mod keywords;
mod matcher;
mod table;

pub use keywords::scan_keywords;
pub use matcher::{match_indicators, scan_entries, MalformedEntry, MatchOutcome};
pub use table::{IndicatorError, IndicatorTable};
