//! List command - approved datasets, newest first.

use colored::Colorize;

use super::{Context, print_summary};

pub fn run(
    ctx: &Context,
    start_after: Option<String>,
    limit: i64,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = ctx.service(ctx.load_config()?);
    let page = service.list(start_after.as_deref(), limit)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.is_empty() {
        println!("{}", "No approved datasets.".yellow());
        return Ok(());
    }

    for metadata in &page {
        print_summary(metadata);
    }

    if page.len() as i64 == limit {
        if let Some(last) = page.last() {
            println!();
            println!(
                "Next page: {}",
                format!("sheetset list --start-after {} --limit {}", last.id, limit).cyan()
            );
        }
    }

    Ok(())
}
