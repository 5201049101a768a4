//! Approve command - reshape a temporary dataset and make it permanent.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use colored::Colorize;
use sheetset::inference::default_title;
use sheetset::{ApprovalModel, HeaderSelection, HeaderSummary, SheetsetError};

use super::{Context, print_summary};
use crate::cli::ColumnSpec;

pub fn run(
    ctx: &Context,
    id: String,
    file: Option<PathBuf>,
    name: Option<String>,
    columns: Vec<ColumnSpec>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let service = ctx.service(ctx.load_config()?);

    let model = match file {
        Some(path) => {
            let reader = File::open(&path).map_err(|e| SheetsetError::Io {
                path: path.clone(),
                source: e,
            })?;
            serde_json::from_reader::<_, ApprovalModel>(BufReader::new(reader))
                .map_err(SheetsetError::from)?
        }
        None => {
            let current = service.metadata(&id)?;
            build_model(name.unwrap_or_default(), &columns, &current.header)
        }
    };

    let approved = service.approve(&id, &model)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&approved)?);
        return Ok(());
    }

    println!("{}", "Approved".green().bold());
    print_summary(&approved);
    Ok(())
}

/// Turn `--column` specs into an approval model.
///
/// A spec without a title keeps the title of the column it selects, or
/// falls back to the generated title for its new position.
fn build_model(name: String, columns: &[ColumnSpec], header: &[HeaderSummary]) -> ApprovalModel {
    let selections = columns
        .iter()
        .map(|spec| {
            let title = spec.title.clone().unwrap_or_else(|| {
                header
                    .iter()
                    .find(|h| h.index == spec.origin_index)
                    .map(|h| h.title.clone())
                    .unwrap_or_else(|| default_title(spec.index))
            });
            HeaderSelection::new(spec.origin_index, spec.index, title)
                .with_decimals(spec.decimals)
                .with_output(spec.is_output)
        })
        .collect();

    ApprovalModel::new(name, selections)
}
