//! Sweep command - delete expired datasets.

use colored::Colorize;

use super::Context;

pub fn run(ctx: &Context, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let service = ctx.service(ctx.load_config()?);
    let report = service.sweep_expired();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} expired {}",
        "Removed".green().bold(),
        report.removed.len(),
        if report.removed.len() == 1 { "dataset" } else { "datasets" }
    );
    for id in &report.removed {
        println!("  {}", id.dimmed());
    }

    if !report.is_clean() {
        println!(
            "{} {} could not be removed:",
            "Warning:".yellow().bold(),
            report.failed.len()
        );
        for id in &report.failed {
            println!("  {}", id.red());
        }
    }

    Ok(())
}
