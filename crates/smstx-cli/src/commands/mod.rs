//! Subcommands and shared helpers.

pub mod batch;
pub mod config;
pub mod explain;
pub mod parse;

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use smstx_core::{OutputFormat, ParseError, ParsedTransaction, SmstxConfig};

/// Output format selectable on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("smstx")
        .join("config.json")
}

/// Explicit config path, else the default file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SmstxConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(SmstxConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(SmstxConfig::from_file(&default_path)?)
    } else {
        Ok(SmstxConfig::default())
    }
}

/// Message from the argument, or all of stdin when absent.
pub fn read_message(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// One line of batch output.
#[derive(Debug, Serialize)]
pub struct BatchRecord {
    pub line: usize,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchRecord {
    pub fn new(line: usize, result: &Result<ParsedTransaction, ParseError>) -> Self {
        match result {
            Ok(tx) => Self {
                line,
                status: "success",
                amount: Some(tx.amount.to_string()),
                merchant: Some(tx.merchant.clone()),
                error: None,
            },
            Err(e) => Self {
                line,
                status: "error",
                amount: None,
                merchant: None,
                error: Some(e.to_string()),
            },
        }
    }
}

pub fn format_transaction(
    tx: &ParsedTransaction,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(tx)?),
        OutputFormat::Json => Ok(serde_json::to_string(tx)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(["amount", "merchant"])?;
            wtr.write_record([tx.amount.to_string().as_str(), tx.merchant.as_str()])?;
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => Ok(format!(
            "Amount:   {}\nMerchant: {}\n",
            tx.display_amount(),
            tx.merchant
        )),
    }
}

pub fn format_batch(
    records: &[BatchRecord],
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Json => Ok(serde_json::to_string(records)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(["line", "status", "amount", "merchant", "error"])?;
            for record in records {
                wtr.write_record([
                    record.line.to_string().as_str(),
                    record.status,
                    record.amount.as_deref().unwrap_or(""),
                    record.merchant.as_deref().unwrap_or(""),
                    record.error.as_deref().unwrap_or(""),
                ])?;
            }
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => {
            let mut output = String::new();
            for record in records {
                match (&record.amount, &record.merchant, &record.error) {
                    (Some(amount), Some(merchant), _) => {
                        output.push_str(&format!("{:>5}  {:>12}  {}\n", record.line, amount, merchant));
                    }
                    (_, _, error) => {
                        output.push_str(&format!(
                            "{:>5}  error: {}\n",
                            record.line,
                            error.as_deref().unwrap_or("unknown")
                        ));
                    }
                }
            }
            Ok(output)
        }
    }
}
