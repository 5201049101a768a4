//! Expiry policy for temporary and archived metadata.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::Metadata;

/// How long unapproved and archived metadata are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    /// Temporary metadata older than this many minutes expires.
    pub temporary_ttl_minutes: i64,
    /// Archived metadata older than this many months expires.
    pub archived_ttl_months: u32,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            temporary_ttl_minutes: 30,
            archived_ttl_months: 1,
        }
    }
}

impl RetentionPolicy {
    pub fn with_temporary_ttl_minutes(mut self, minutes: i64) -> Self {
        self.temporary_ttl_minutes = minutes;
        self
    }

    pub fn with_archived_ttl_months(mut self, months: u32) -> Self {
        self.archived_ttl_months = months;
        self
    }

    /// Whether `metadata` should be swept at `now`.
    ///
    /// Temporary metadata is aged by `created_time`, archived metadata by
    /// `archived_time`. Entries missing the relevant timestamp never expire,
    /// and neither do entries whose cutoff falls outside chrono's range.
    pub fn is_expired(&self, metadata: &Metadata, now: DateTime<Utc>) -> bool {
        let temporary_cutoff = Duration::try_minutes(self.temporary_ttl_minutes)
            .and_then(|ttl| now.checked_sub_signed(ttl));
        let archived_cutoff = now.checked_sub_months(Months::new(self.archived_ttl_months));

        let temporary_expired = metadata.is_temporary
            && metadata
                .created_time
                .zip(temporary_cutoff)
                .is_some_and(|(created, cutoff)| created <= cutoff);
        let archived_expired = metadata.is_archived
            && metadata
                .archived_time
                .zip(archived_cutoff)
                .is_some_and(|(archived, cutoff)| archived <= cutoff);

        temporary_expired || archived_expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Dataset, SourceType};

    fn metadata() -> Metadata {
        let dataset = Dataset::new("n", "u", Vec::new(), Vec::new());
        Metadata::derive(&dataset, SourceType::UploadedFile, "src")
    }

    #[test]
    fn test_temporary_expiry() {
        let policy = RetentionPolicy::default();
        let now = Utc::now();
        let mut m = metadata();

        m.created_time = Some(now - Duration::minutes(31));
        assert!(policy.is_expired(&m, now));

        m.created_time = Some(now - Duration::minutes(10));
        assert!(!policy.is_expired(&m, now));

        m.created_time = Some(now - Duration::minutes(31));
        m.is_temporary = false;
        assert!(!policy.is_expired(&m, now));
    }

    #[test]
    fn test_archived_expiry() {
        let policy = RetentionPolicy::default();
        let now = Utc::now();
        let mut m = metadata();
        m.is_temporary = false;
        m.is_archived = true;

        m.archived_time = Some(now - Duration::days(40));
        assert!(policy.is_expired(&m, now));

        m.archived_time = Some(now - Duration::days(3));
        assert!(!policy.is_expired(&m, now));

        m.archived_time = None;
        assert!(!policy.is_expired(&m, now));
    }

    #[test]
    fn test_custom_ttl() {
        let policy = RetentionPolicy::default().with_temporary_ttl_minutes(5);
        let now = Utc::now();
        let mut m = metadata();
        m.created_time = Some(now - Duration::minutes(6));
        assert!(policy.is_expired(&m, now));
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let now = Utc::now();
        let mut m = metadata();
        m.created_time = Some(now - Duration::days(365));

        let policy = RetentionPolicy::default().with_temporary_ttl_minutes(i64::MAX);
        assert!(!policy.is_expired(&m, now));

        m.is_temporary = false;
        m.is_archived = true;
        m.archived_time = Some(now - Duration::days(365));
        let policy = RetentionPolicy::default().with_archived_ttl_months(u32::MAX);
        assert!(!policy.is_expired(&m, now));
    }
}
