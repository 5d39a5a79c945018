use anyhow::Result;
use colored::*;
use serde_json::json;

use probe_core::{Probe, SuiteReport};

pub fn print_probe_list(probes: &[Probe]) {
    for probe in probes {
        let checks: Vec<String> = probe.assertions.iter().map(|a| a.description()).collect();
        println!(
            "{} {}",
            probe.name.bold(),
            format!("({} {:?})", probe.method, probe.target).dimmed()
        );
        println!("      {}", probe.description);
        println!("      checks: {}", checks.join(", ").dimmed());
    }
}

pub fn print_test_summary(report: &SuiteReport) {
    println!("\n{}", "=== TEST SUMMARY ===".bright_white().bold());
    println!("{} {}", "Base URL:".bold(), report.base_url);

    for outcome in &report.outcomes {
        let status = if outcome.passed() {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };

        println!("[{}] {} ({:?})", status, outcome.name, outcome.duration);

        if let Some(err) = outcome.failure() {
            println!("      {}", err.to_string().dimmed());
        }
    }

    println!(
        "\n{}: {} passed, {} failed",
        "Results".bold(),
        report.passed().to_string().green(),
        report.failed().to_string().red()
    );
}

pub fn print_json(report: &SuiteReport) -> Result<()> {
    let document = json!({
        "base_url": report.base_url,
        "passed": report.passed(),
        "failed": report.failed(),
        "outcomes": report.summaries(),
    });
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
