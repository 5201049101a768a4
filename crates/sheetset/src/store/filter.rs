//! Metadata list queries.

use std::cmp::Reverse;

use crate::schema::Metadata;

/// Page size used when none is given.
pub const DEFAULT_LIMIT: usize = 20;

/// Equality conditions on metadata flags. `None` matches anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub is_temporary: Option<bool>,
    pub is_archived: Option<bool>,
}

impl SearchQuery {
    /// Approved, non-archived metadata.
    pub fn listed() -> Self {
        Self {
            is_temporary: Some(false),
            is_archived: Some(false),
        }
    }

    pub fn matches(&self, metadata: &Metadata) -> bool {
        self.is_temporary.is_none_or(|v| v == metadata.is_temporary)
            && self.is_archived.is_none_or(|v| v == metadata.is_archived)
    }
}

/// Sort order of a list query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderBy {
    /// Newest first.
    #[default]
    CreatedTimeDesc,
    CreatedTimeAsc,
}

/// Cursor-paged metadata query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    /// Id of the last entry of the previous page.
    pub start_after: Option<String>,
    pub limit: usize,
    pub query: SearchQuery,
    pub order_by: OrderBy,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            start_after: None,
            limit: DEFAULT_LIMIT,
            query: SearchQuery::default(),
            order_by: OrderBy::default(),
        }
    }
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_after(mut self, id: impl Into<String>) -> Self {
        self.start_after = Some(id.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_query(mut self, query: SearchQuery) -> Self {
        self.query = query;
        self
    }

    pub fn with_order(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    /// Run the query over an in-memory collection.
    ///
    /// An unknown `start_after` id starts from the first entry.
    pub fn apply(&self, items: impl IntoIterator<Item = Metadata>) -> Vec<Metadata> {
        let mut matched: Vec<Metadata> = items
            .into_iter()
            .filter(|m| self.query.matches(m))
            .collect();

        // Ties break on id
        match self.order_by {
            OrderBy::CreatedTimeDesc => matched.sort_by(|a, b| {
                (Reverse(a.created_time), &a.id).cmp(&(Reverse(b.created_time), &b.id))
            }),
            OrderBy::CreatedTimeAsc => {
                matched.sort_by(|a, b| (a.created_time, &a.id).cmp(&(b.created_time, &b.id)))
            }
        }

        let start = self
            .start_after
            .as_deref()
            .and_then(|id| matched.iter().position(|m| m.id == id))
            .map_or(0, |position| position + 1);

        matched.into_iter().skip(start).take(self.limit).collect()
    }
}
