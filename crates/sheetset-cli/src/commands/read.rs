//! Read command - print one page of a dataset as JSON.

use sheetset::parse_page_param;

use super::Context;

pub fn run(
    ctx: &Context,
    id: String,
    skip: String,
    limit: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let skip = parse_page_param("skip", &skip)?;
    let limit = match limit {
        Some(limit) => parse_page_param("limit", &limit)?,
        None => i64::MAX,
    };

    let service = ctx.service(ctx.load_config()?);
    let page = service.read(&id, skip, limit)?;
    println!("{}", serde_json::to_string_pretty(&page)?);

    Ok(())
}
