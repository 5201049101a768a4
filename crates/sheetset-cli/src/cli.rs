//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sheetset: typed datasets from spreadsheet-shaped files
#[derive(Parser)]
#[command(name = "sheetset")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding stored datasets and metadata
    #[arg(long, global = true, default_value = ".sheetset")]
    pub store: PathBuf,

    /// Configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Owner recorded on ingested datasets (overrides the config file)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Only type a column as numeric when every value parses
    #[arg(long, global = true)]
    pub strict_numbers: bool,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a CSV/TSV file, or every delimited file in a directory
    Ingest {
        /// Path to a file or directory
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Cell range read from every sheet (e.g. "A:Z", "B2:F100")
        #[arg(long)]
        range: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List approved datasets, newest first
    List {
        /// Continue after this metadata id
        #[arg(long, value_name = "ID")]
        start_after: Option<String>,

        /// Maximum number of entries
        #[arg(short, long, default_value = "20", allow_negative_numbers = true)]
        limit: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one page of a dataset as JSON
    Read {
        /// Metadata id
        #[arg(value_name = "METADATA_ID")]
        id: String,

        /// First row of the page
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        skip: String,

        /// Row bound of the page (exclusive); default is the whole dataset
        #[arg(long, allow_hyphen_values = true)]
        limit: Option<String>,
    },

    /// Pick, rename and reorder columns, and make the dataset permanent
    Approve {
        /// Metadata id
        #[arg(value_name = "METADATA_ID")]
        id: String,

        /// Approval model as JSON: {"name": ..., "header": [...]}
        #[arg(short, long, conflicts_with_all = ["name", "columns"])]
        file: Option<PathBuf>,

        /// New dataset name
        #[arg(short, long, required_unless_present = "file")]
        name: Option<String>,

        /// Column selection: origin:index[:title[:decimals[:output]]]
        #[arg(short, long = "column", value_name = "SPEC")]
        columns: Vec<ColumnSpec>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Archive a dataset; it is removed by a later sweep
    Archive {
        /// Metadata id
        #[arg(value_name = "METADATA_ID")]
        id: String,
    },

    /// Delete expired temporary and archived datasets
    Sweep {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the metadata preview of a dataset
    Show {
        /// Metadata id
        #[arg(value_name = "METADATA_ID")]
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// One `--column` selection.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnSpec {
    pub origin_index: usize,
    pub index: usize,
    /// Keep the current title when absent.
    pub title: Option<String>,
    pub decimals: i8,
    pub is_output: bool,
}

impl std::str::FromStr for ColumnSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() < 2 || parts.len() > 5 {
            return Err(format!(
                "Invalid column spec: {}. Use origin:index[:title[:decimals[:output]]].",
                s
            ));
        }

        let number = |name: &str, value: &str| {
            value
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("Invalid {} in column spec: {}", name, value))
        };

        let origin_index = number("origin", parts[0])?;
        let index = number("index", parts[1])?;
        let title = parts
            .get(2)
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let decimals = match parts.get(3).map(|d| d.trim()) {
            None | Some("") => 0,
            Some(d) => d
                .parse::<i8>()
                .map_err(|_| format!("Invalid decimals in column spec: {}", d))?,
        };
        let is_output = match parts.get(4).map(|o| o.trim().to_lowercase()) {
            None => false,
            Some(o) => match o.as_str() {
                "" | "false" | "no" | "0" | "input" => false,
                "true" | "yes" | "1" | "output" => true,
                _ => return Err(format!("Invalid output flag in column spec: {}", o)),
            },
        };

        Ok(ColumnSpec {
            origin_index,
            index,
            title,
            decimals,
            is_output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_spec_minimal() {
        let spec: ColumnSpec = "2:0".parse().unwrap();
        assert_eq!(spec.origin_index, 2);
        assert_eq!(spec.index, 0);
        assert_eq!(spec.title, None);
        assert_eq!(spec.decimals, 0);
        assert!(!spec.is_output);
    }

    #[test]
    fn test_column_spec_full() {
        let spec: ColumnSpec = "0:1:price:2:output".parse().unwrap();
        assert_eq!(spec.title.as_deref(), Some("price"));
        assert_eq!(spec.decimals, 2);
        assert!(spec.is_output);

        let spec: ColumnSpec = "0:1::-1".parse().unwrap();
        assert_eq!(spec.title, None);
        assert_eq!(spec.decimals, -1);
    }

    #[test]
    fn test_column_spec_invalid() {
        assert!("1".parse::<ColumnSpec>().is_err());
        assert!("a:1".parse::<ColumnSpec>().is_err());
        assert!("1:2:t:x".parse::<ColumnSpec>().is_err());
        assert!("1:2:t:0:maybe".parse::<ColumnSpec>().is_err());
        assert!("1:2:t:0:true:extra".parse::<ColumnSpec>().is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "sheetset",
            "--store",
            "/tmp/s",
            "approve",
            "abc",
            "--name",
            "final",
            "--column",
            "1:0:age",
            "--column",
            "0:1",
        ])
        .unwrap();
        assert_eq!(cli.store, PathBuf::from("/tmp/s"));
        match cli.command {
            Commands::Approve { name, columns, .. } => {
                assert_eq!(name.as_deref(), Some("final"));
                assert_eq!(columns.len(), 2);
            }
            _ => panic!("expected approve"),
        }
    }

    #[test]
    fn test_cli_approve_requires_name_or_file() {
        assert!(Cli::try_parse_from(["sheetset", "approve", "abc"]).is_err());
    }
}
