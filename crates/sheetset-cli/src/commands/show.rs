//! Show command - metadata preview of one dataset.

use colored::Colorize;

use super::{Context, format_cell, state_label};

pub fn run(ctx: &Context, id: String, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let service = ctx.service(ctx.load_config()?);
    let metadata = service.metadata(&id)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    println!(
        "{} {} [{}]",
        metadata.name.white().bold(),
        metadata.id.cyan(),
        state_label(&metadata)
    );
    println!("  Rows:    {}", metadata.size);
    println!(
        "  Source:  {} ({:?})",
        metadata.source_reference, metadata.source_type
    );
    println!("  Owner:   {}", metadata.user_id);
    if let Some(created) = metadata.created_time {
        println!("  Created: {}", created.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if let Some(archived) = metadata.archived_time {
        println!("  Archived: {}", archived.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!();

    println!("{}", "Columns:".yellow().bold());
    println!(
        "  {:>6} {:>6}  {:<24} {:<9} {:>8}  {}",
        "origin", "index", "title", "type", "decimals", "role"
    );
    for column in &metadata.header {
        println!(
            "  {:>6} {:>6}  {:<24} {:<9} {:>8}  {}",
            column.origin_index,
            column.index,
            column.title,
            column.col_type.label(),
            column.decimals,
            if column.is_output { "output" } else { "input" }
        );
    }

    if !metadata.examples.is_empty() {
        println!();
        println!("{}", "Examples:".yellow().bold());
        for row in &metadata.examples {
            let cells: Vec<String> = row.iter().map(format_cell).collect();
            println!("  {}", cells.join(" | "));
        }
    }

    Ok(())
}
