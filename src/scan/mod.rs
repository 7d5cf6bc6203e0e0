//! Contract-level scanning over explorer metadata.
//!
//! The [`Scanner`] ties the pieces together for one verified contract: the
//! ABI text is decoded entry by entry, fingerprints are matched against the
//! configured [`IndicatorTable`](crate::indicators::IndicatorTable), and the
//! normalised sources are searched for keywords. Fetching the metadata and
//! writing the reports are left to the caller.

mod batch;
mod metadata;
mod report;

#[cfg(test)]
mod tests;

pub use batch::scan_batch;
pub use metadata::{normalize_sources, ContractMetadata};
pub use report::{detect_indicators, IndicatorReport, Indicators, Scanner, SkippedEntry};
