//! Batch command - parse many messages, one per line.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, warn};

use smstx_core::SmsParser;

use super::{format_batch, load_config, BatchRecord, FormatArg};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input file with one message per line ("-" for stdin)
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Stop at the first message that cannot be parsed
    #[arg(long)]
    fail_fast: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let content = if args.input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        let path = PathBuf::from(&args.input);
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        fs::read_to_string(&path)?
    };

    let parser = SmsParser::with_config(config.parser.clone());
    let mut records = Vec::new();

    for (line, result) in parser.parse_batch(content.lines()) {
        if let Err(e) = &result {
            if args.fail_fast {
                anyhow::bail!("Line {}: {}", line, e);
            }
            warn!("Line {}: {}", line, e);
        }
        records.push(BatchRecord::new(line, &result));
    }

    let format = args
        .format
        .map(Into::into)
        .unwrap_or(config.output.default_format);
    let output = format_batch(&records, format, config.output.pretty_json)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    let parsed = records.iter().filter(|r| r.status == "success").count();
    let failed = records.len() - parsed;

    eprintln!();
    eprintln!("{}", style("Batch summary:").bold());
    eprintln!("  {} {}", style("Parsed:").green(), parsed);
    if failed > 0 {
        eprintln!("  {} {}", style("Failed:").red(), failed);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
