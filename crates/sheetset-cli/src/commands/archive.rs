//! Archive command.

use colored::Colorize;

use super::Context;

pub fn run(ctx: &Context, id: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = ctx.load_config()?;
    let months = config.retention.archived_ttl_months;
    let service = ctx.service(config);

    let metadata = service.archive(&id)?;
    println!(
        "{} {} ({})",
        "Archived".green().bold(),
        metadata.name.white().bold(),
        metadata.id.cyan()
    );
    println!(
        "It will be removed by the first sweep after {} {}.",
        months,
        if months == 1 { "month" } else { "months" }
    );

    Ok(())
}
