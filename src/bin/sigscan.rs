use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use abi_sigscan::config::{ScanConfig, USERPROOFHUB};
use abi_sigscan::scan::{ContractMetadata, IndicatorReport, Scanner};
use serde_json::Value;

const USAGE: &str = "usage: sigscan [--config PATH] [--network NAME] [--include-non-matches] \
                     [--output PATH] FILE...";

const DEFAULT_NETWORK: &str = "local";

struct Args {
    config: Option<PathBuf>,
    include_non_matches: bool,
    output: Option<PathBuf>,
    inputs: Vec<(String, PathBuf)>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = env::args().skip(1);
    let mut parsed = Args {
        config: None,
        include_non_matches: false,
        output: None,
        inputs: Vec::new(),
    };
    let mut network = DEFAULT_NETWORK.to_string();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or("--config needs a path")?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--network" => {
                let value = args.next().ok_or("--network needs a name")?;
                network = value.trim().to_lowercase();
            }
            "--output" => {
                let value = args.next().ok_or("--output needs a path")?;
                parsed.output = Some(PathBuf::from(value));
            }
            "--include-non-matches" => parsed.include_non_matches = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            path => parsed.inputs.push((network.clone(), PathBuf::from(path))),
        }
    }

    if parsed.inputs.is_empty() {
        return Err("no metadata files given".to_string());
    }
    Ok(parsed)
}

/// Accepts a single record, an array of records, or a raw explorer response
/// (`{"status": "1", "result": [...]}`).
fn load_metadata(path: &Path, network: &str) -> Result<Vec<ContractMetadata>, String> {
    let text = fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))?;
    let document: Value =
        serde_json::from_str(&text).map_err(|err| format!("{}: {err}", path.display()))?;

    let records = match document {
        Value::Array(items) => items,
        Value::Object(ref object) if object.contains_key("result") => {
            if object.get("status").and_then(Value::as_str) != Some("1") {
                log::warn!("{}: explorer reported an error: {}", path.display(), object["result"]);
                return Ok(Vec::new());
            }
            match object.get("result") {
                Some(Value::Array(items)) => items.clone(),
                _ => Vec::new(),
            }
        }
        other => vec![other],
    };

    records
        .into_iter()
        .map(|record| {
            let mut metadata: ContractMetadata = serde_json::from_value(record)
                .map_err(|err| format!("{}: {err}", path.display()))?;
            if metadata.network.is_none() {
                metadata.network = Some(network.to_string());
            }
            Ok(metadata)
        })
        .collect()
}

fn run(args: Args) -> Result<(), String> {
    let mut config: ScanConfig = match &args.config {
        Some(path) => ScanConfig::from_path(path).map_err(|err| err.to_string())?,
        None => (*USERPROOFHUB).clone(),
    };
    config.include_non_matches |= args.include_non_matches;
    let scanner = Scanner::new(config).map_err(|err| err.to_string())?;

    let mut contracts = Vec::new();
    for (network, path) in &args.inputs {
        contracts.extend(load_metadata(path, network)?);
    }

    let mut findings: BTreeMap<String, Vec<IndicatorReport>> = BTreeMap::new();
    for (network, _) in &args.inputs {
        findings.entry(network.clone()).or_default();
    }
    for report in scanner.scan_batch(&contracts) {
        let network = report
            .network
            .clone()
            .unwrap_or_else(|| DEFAULT_NETWORK.to_string());
        findings.entry(network).or_default().push(report);
    }

    let rendered = serde_json::to_string_pretty(&findings).map_err(|err| err.to_string())?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered).map_err(|err| format!("{}: {err}", path.display()))
        }
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {message}\n{USAGE}");
            return ExitCode::from(1);
        }
    };
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::from(1)
        }
    }
}
