//! Parse command - extract a transaction from a single message.

use clap::Args;
use tracing::info;

use smstx_core::{SmsParser, TransactionParser};

use super::{format_transaction, load_config, read_message, FormatArg};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Message text (read from stdin when omitted)
    text: Option<String>,

    /// Output format (default from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let message = read_message(args.text)?;

    let parser = SmsParser::with_config(config.parser.clone());
    let tx = match parser.parse(&message) {
        Ok(tx) => tx,
        Err(e) => anyhow::bail!("Could not parse message: {}", e),
    };

    info!("Parsed {} at {}", tx.amount, tx.merchant);

    let format = args
        .format
        .map(Into::into)
        .unwrap_or(config.output.default_format);
    let output = format_transaction(&tx, format, config.output.pretty_json)?;
    println!("{}", output.trim_end());

    Ok(())
}
