//! Ingest command - read delimited files into temporary datasets.

use std::path::PathBuf;

use colored::Colorize;

use super::{Context, print_summary};

pub fn run(
    ctx: &Context,
    source: PathBuf,
    range: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ctx.load_config()?;
    if let Some(range) = range {
        config.ingest.range = range;
    }
    config.validate()?;

    let service = ctx.service(config);
    let created = service.ingest(&source.to_string_lossy())?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&created)?);
        return Ok(());
    }

    if created.is_empty() {
        println!("{} {}", "No sheets found in".yellow(), source.display());
        return Ok(());
    }

    println!(
        "{} {} {}",
        "Ingested".green().bold(),
        created.len(),
        if created.len() == 1 { "sheet" } else { "sheets" }
    );
    for metadata in &created {
        print_summary(metadata);
    }
    println!();
    println!(
        "Inspect with {}, then approve with {}.",
        "sheetset show <ID>".cyan().bold(),
        "sheetset approve <ID> --name <NAME> --column origin:index".cyan().bold()
    );

    Ok(())
}
