//! Explain command - show every rule's verdict on a message.

use std::fmt::Display;

use clap::Args;
use console::style;

use smstx_core::{MerchantSource, RuleTrace, SmsParser};

use super::{load_config, read_message};

/// Arguments for the explain command.
#[derive(Args)]
pub struct ExplainArgs {
    /// Message text (read from stdin when omitted)
    text: Option<String>,
}

pub fn run(args: ExplainArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let message = read_message(args.text)?;

    let parser = SmsParser::with_config(config.parser);
    let explanation = parser.explain(&message);

    println!("{}", style("Amount rules:").bold());
    print_traces(&explanation.amount_rules);

    println!();
    println!("{}", style("Merchant rules:").bold());
    print_traces(&explanation.merchant_rules);

    println!();
    match &explanation.outcome {
        Ok(outcome) => {
            let source = match outcome.merchant_source {
                MerchantSource::Rule(name) => name.to_string(),
                MerchantSource::Fallback => "token fallback".to_string(),
                MerchantSource::Placeholder => "placeholder".to_string(),
            };
            println!(
                "{} amount {} via {}",
                style("Result:").bold(),
                outcome.transaction.display_amount(),
                outcome.amount_rule
            );
            println!(
                "        merchant {:?} via {}",
                outcome.transaction.merchant, source
            );
        }
        Err(e) => println!("{} {}", style("Result:").bold(), style(e).red()),
    }

    Ok(())
}

fn print_traces<T: Display>(traces: &[RuleTrace<T>]) {
    for trace in traces {
        match &trace.hit {
            Some(hit) => println!(
                "  {} {:<24} {} ({:?})",
                style("✓").green(),
                trace.rule,
                hit.value,
                hit.source
            ),
            None => println!("  {} {}", style("✗").dim(), trace.rule),
        }
    }
}
