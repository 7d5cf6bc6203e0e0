use super::metadata::ContractMetadata;
use super::report::{IndicatorReport, Scanner};

impl Scanner {
    /// Scans every contract and keeps the reports that matched, or all of
    /// them when `include_non_matches` is set. Output order follows input
    /// order whether or not the rayon pool is used.
    pub fn scan_batch(&self, contracts: &[ContractMetadata]) -> Vec<IndicatorReport> {
        #[cfg(feature = "parallel")]
        let reports: Vec<IndicatorReport> = if crate::utils::parallelism_enabled() {
            use rayon::prelude::*;
            let bytes: usize = contracts
                .iter()
                .map(|contract| contract.abi.len() + contract.source_code.len())
                .sum();
            let chunk = crate::utils::preferred_chunk_size(contracts.len(), bytes);
            contracts
                .par_iter()
                .with_min_len(chunk)
                .map(|contract| self.detect(contract))
                .collect()
        } else {
            contracts
                .iter()
                .map(|contract| self.detect(contract))
                .collect()
        };
        #[cfg(not(feature = "parallel"))]
        let reports: Vec<IndicatorReport> = contracts
            .iter()
            .map(|contract| self.detect(contract))
            .collect();

        let include_all = self.config().include_non_matches;
        reports
            .into_iter()
            .filter(|report| include_all || report.indicators.matched)
            .collect()
    }
}

/// Batch scan with a freshly compiled [`Scanner`].
pub fn scan_batch(
    contracts: &[ContractMetadata],
    config: &crate::config::ScanConfig,
) -> Result<Vec<IndicatorReport>, crate::config::ConfigError> {
    Ok(Scanner::new(config.clone())?.scan_batch(contracts))
}
