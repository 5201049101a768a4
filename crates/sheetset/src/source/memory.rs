//! In-memory tabular source.

use indexmap::IndexMap;

use super::{GridRange, SheetInfo, SourceError, SourceResult, TabularSource};
use crate::schema::SourceType;

#[derive(Debug, Clone)]
struct MemorySheet {
    info: SheetInfo,
    grid: Vec<Vec<String>>,
}

/// Source whose sheets are held in memory, keyed by source id.
///
/// Useful for tests and for callers that already hold their grids.
#[derive(Debug, Clone)]
pub struct MemorySource {
    source_type: SourceType,
    sources: IndexMap<String, Vec<MemorySheet>>,
}

impl MemorySource {
    pub fn new(source_type: SourceType) -> Self {
        Self {
            source_type,
            sources: IndexMap::new(),
        }
    }

    /// Add a grid sheet to `source_id`.
    pub fn with_sheet(
        mut self,
        source_id: impl Into<String>,
        title: impl Into<String>,
        grid: Vec<Vec<String>>,
    ) -> Self {
        self.sources
            .entry(source_id.into())
            .or_default()
            .push(MemorySheet {
                info: SheetInfo::grid(title),
                grid,
            });
        self
    }

    /// Add a sheet without cell values (a chart, a pivot).
    pub fn with_chart(mut self, source_id: impl Into<String>, title: impl Into<String>) -> Self {
        self.sources
            .entry(source_id.into())
            .or_default()
            .push(MemorySheet {
                info: SheetInfo::other(title),
                grid: Vec::new(),
            });
        self
    }

    /// Register a source with no sheets at all.
    pub fn with_empty_source(mut self, source_id: impl Into<String>) -> Self {
        self.sources.entry(source_id.into()).or_default();
        self
    }

    fn source(&self, source_id: &str) -> SourceResult<&[MemorySheet]> {
        self.sources
            .get(source_id)
            .map(Vec::as_slice)
            .ok_or_else(|| SourceError::NotFound(source_id.to_string()))
    }
}

impl TabularSource for MemorySource {
    fn source_type(&self) -> SourceType {
        self.source_type
    }

    fn sheets(&self, source_id: &str) -> SourceResult<Vec<SheetInfo>> {
        Ok(self
            .source(source_id)?
            .iter()
            .map(|sheet| sheet.info.clone())
            .collect())
    }

    fn read_grid(
        &self,
        source_id: &str,
        sheet: &str,
        range: &GridRange,
    ) -> SourceResult<Vec<Vec<String>>> {
        self.source(source_id)?
            .iter()
            .find(|s| s.info.title == sheet && s.info.is_grid())
            .map(|s| range.apply(s.grid.clone()))
            .ok_or_else(|| SourceError::SheetNotFound {
                source_id: source_id.to_string(),
                sheet: sheet.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SheetKind;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_sheets_in_order() {
        let source = MemorySource::new(SourceType::GoogleWorksheet)
            .with_sheet("doc", "Data", vec![row(&["a"]), row(&["1"])])
            .with_chart("doc", "Chart")
            .with_sheet("doc", "More", vec![row(&["b"])]);

        let sheets = source.sheets("doc").unwrap();
        let kinds: Vec<SheetKind> = sheets.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SheetKind::Grid, SheetKind::Other, SheetKind::Grid]);
        assert_eq!(source.source_type(), SourceType::GoogleWorksheet);
    }

    #[test]
    fn test_read_grid_applies_range() {
        let source = MemorySource::new(SourceType::UploadedFile)
            .with_sheet("doc", "Data", vec![row(&["a", "b", "c"])]);
        let range = GridRange::parse("A:B").unwrap();
        assert_eq!(source.read_grid("doc", "Data", &range).unwrap(), vec![row(&["a", "b"])]);
    }

    #[test]
    fn test_unknown_source() {
        let source = MemorySource::new(SourceType::UploadedFile).with_empty_source("empty");
        assert!(source.sheets("empty").unwrap().is_empty());
        assert!(matches!(source.sheets("nope"), Err(SourceError::NotFound(_))));
        assert!(matches!(
            source.read_grid("empty", "x", &GridRange::default()),
            Err(SourceError::SheetNotFound { .. })
        ));
    }
}
