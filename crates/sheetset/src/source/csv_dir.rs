//! Delimited text files as a tabular source.
//!
//! A source id is a path. A file is a source with one sheet named after the
//! file stem; a directory is a source with one sheet per entry, sorted by
//! file name. Files with a delimited-text extension are grid sheets, every
//! other entry is listed as [`SheetKind::Other`].

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::{GridRange, SheetInfo, SheetKind, SourceError, SourceResult, TabularSource};
use crate::schema::SourceType;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// File extensions read as grid sheets.
const GRID_EXTENSIONS: &[&str] = &["csv", "tsv", "txt", "psv"];

/// Reads CSV, TSV and similar files from the local file system.
#[derive(Debug, Clone, Default)]
pub struct CsvDirSource {
    root: Option<PathBuf>,
    delimiter: Option<u8>,
}

impl CsvDirSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative source ids against `root`.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Use a fixed delimiter instead of detecting one per file.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    fn resolve(&self, source_id: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(source_id),
            None => PathBuf::from(source_id),
        }
    }

    fn entries(&self, source_id: &str) -> SourceResult<Vec<(SheetInfo, PathBuf)>> {
        let path = self.resolve(source_id);

        if path.is_file() {
            return Ok(vec![(sheet_info(&path), path)]);
        }
        if !path.is_dir() {
            return Err(SourceError::NotFound(source_id.to_string()));
        }

        let read_dir = fs::read_dir(&path).map_err(|e| SourceError::Io {
            path: path.clone(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in read_dir {
            let entry_path = entry
                .map_err(|e| SourceError::Io {
                    path: path.clone(),
                    source: e,
                })?
                .path();
            if entry_path.is_file() {
                files.push(entry_path);
            }
        }
        files.sort();

        Ok(files
            .into_iter()
            .map(|file| (sheet_info(&file), file))
            .collect())
    }

    fn parse_file(&self, path: &Path) -> SourceResult<Vec<Vec<String>>> {
        let contents = fs::read(path).map_err(|e| SourceError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let Some(delimiter) = self.delimiter.or_else(|| detect_delimiter(&contents)) else {
            return Ok(Vec::new());
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(contents.as_slice());

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }
        Ok(rows)
    }
}

fn sheet_info(path: &Path) -> SheetInfo {
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let is_grid = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| GRID_EXTENSIONS.contains(&ext.as_str()));

    if is_grid {
        SheetInfo::grid(title)
    } else {
        SheetInfo::other(title)
    }
}

impl TabularSource for CsvDirSource {
    fn source_type(&self) -> SourceType {
        SourceType::UploadedFile
    }

    fn sheets(&self, source_id: &str) -> SourceResult<Vec<SheetInfo>> {
        Ok(self
            .entries(source_id)?
            .into_iter()
            .map(|(info, _)| info)
            .collect())
    }

    fn read_grid(
        &self,
        source_id: &str,
        sheet: &str,
        range: &GridRange,
    ) -> SourceResult<Vec<Vec<String>>> {
        let path = self
            .entries(source_id)?
            .into_iter()
            .find(|(info, _)| info.title == sheet && info.kind == SheetKind::Grid)
            .map(|(_, path)| path)
            .ok_or_else(|| SourceError::SheetNotFound {
                source_id: source_id.to_string(),
                sheet: sheet.to_string(),
            })?;

        Ok(range.apply(self.parse_file(&path)?))
    }
}

/// Detect the delimiter by analyzing the first few lines.
///
/// Returns `None` when the input has no non-blank lines.
fn detect_delimiter(bytes: &[u8]) -> Option<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return None;
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        let variance = counts
            .iter()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / counts.len() as f64;

        // Tab gets a slight bonus as it rarely occurs inside values
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Some(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter(b"a,b,c\n1,2,3\n4,5,6"), Some(b','));
        assert_eq!(detect_delimiter(b"a\tb\tc\n1\t2\t3"), Some(b'\t'));
        assert_eq!(detect_delimiter(b"a;b\n1;2"), Some(b';'));
        assert_eq!(detect_delimiter(b"\n  \n"), None);
    }

    #[test]
    fn test_quoted_delimiters_ignored() {
        assert_eq!(count_delimiter_in_line(r#""[1,2,3]",x"#, b','), 1);
    }

    #[test]
    fn test_single_file_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("people.csv");
        fs::write(&path, "name,age\nAlice,30\nBob\n").unwrap();

        let source = CsvDirSource::new();
        let id = path.to_string_lossy().into_owned();
        assert_eq!(source.sheets(&id).unwrap(), vec![SheetInfo::grid("people")]);

        let grid = source
            .read_grid(&id, "people", &GridRange::default())
            .unwrap();
        assert_eq!(
            grid,
            vec![vec!["name", "age"], vec!["Alice", "30"], vec!["Bob"]]
        );
    }

    #[test]
    fn test_directory_source() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.tsv"), "x\ty\n1\t2\n").unwrap();
        fs::write(dir.path().join("a.csv"), "q\n\"[1,2]\"\n").unwrap();
        fs::write(dir.path().join("chart.png"), [0u8, 1, 2]).unwrap();

        let source = CsvDirSource::new().with_root(dir.path());
        let sheets = source.sheets(".").unwrap();
        assert_eq!(
            sheets,
            vec![
                SheetInfo::grid("a"),
                SheetInfo::grid("b"),
                SheetInfo::other("chart"),
            ]
        );

        let grid = source.read_grid(".", "a", &GridRange::default()).unwrap();
        assert_eq!(grid, vec![vec!["q"], vec!["[1,2]"]]);

        assert!(matches!(
            source.read_grid(".", "chart", &GridRange::default()),
            Err(SourceError::SheetNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_and_empty() {
        let dir = TempDir::new().unwrap();
        let source = CsvDirSource::new().with_root(dir.path());
        assert!(matches!(
            source.sheets("missing.csv"),
            Err(SourceError::NotFound(_))
        ));

        fs::write(dir.path().join("empty.csv"), "").unwrap();
        let grid = source
            .read_grid("empty.csv", "empty", &GridRange::default())
            .unwrap();
        assert!(grid.is_empty());
    }
}
