//! Command handlers for sleuthctl.

use crate::client::SleuthdClient;
use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use serde_json::Value;
use sleuth_common::api::LookupRequest;
use sleuth_common::normalize::NormalizedResult;

/// Handle lookup command
pub async fn lookup(
    addr: &str,
    email: &str,
    yes: bool,
    no_breaches: bool,
    timeout_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    // Same consent gate the API enforces, refused before leaving the machine.
    if !yes {
        bail!("Consent required. Re-run with --yes to assert you have permission to query this address.");
    }

    let client = SleuthdClient::new(addr)?;
    let req = LookupRequest {
        email: email.to_string(),
        consent: true,
        include_data_breaches: !no_breaches,
        timeout_ms,
    };

    let response = client.lookup(&req).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    match (response.ok, response.result) {
        (true, Some(result)) => {
            print_result(&result);
            Ok(())
        }
        (_, _) => bail!(
            "{}",
            response
                .error
                .unwrap_or_else(|| "lookup failed".to_string())
        ),
    }
}

fn print_result(result: &NormalizedResult) {
    println!();
    match &result.email {
        Some(email) => println!("{}", email.bold()),
        None => println!("{}", "(no email echoed by upstream)".dimmed()),
    }

    if result.cards.is_empty() {
        println!("{}", "No accounts found.".dimmed());
    }

    for card in &result.cards {
        println!();
        if card.subtitle.is_empty() {
            println!("{}", card.title.bold());
        } else {
            println!("{}  {}", card.title.bold(), card.subtitle.dimmed());
        }
        for field in &card.fields {
            println!("  {:<18} {}", field.label.dimmed(), render_value(&field.value));
        }
    }

    if result.breach_count > 0 {
        println!();
        println!("{}", format!("Breaches ({})", result.breach_count).red().bold());
        for breach in &result.breaches {
            let name = breach.name.as_deref().unwrap_or("Unknown");
            let date = breach.date.as_deref().unwrap_or("");
            let verified = match breach.verified {
                Some(true) => " [verified]",
                _ => "",
            };
            println!("  {} {}{}", name.bold(), date.dimmed(), verified);
            if !breach.description.is_empty() {
                println!("    {}", breach.description);
            }
        }
    }
}

/// Strings render bare; everything else as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Handle status command
pub async fn status(addr: &str) -> Result<()> {
    let client = SleuthdClient::new(addr)?;
    let health = client.health().await?;

    println!("sleuthd v{}", health.version);
    println!("  {:<8} {}", "status", health.status);
    println!("  {:<8} {}s", "uptime", health.uptime_seconds);
    Ok(())
}
