use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::change_event::ChangeKind;

/// A single entry in the change log (JSON lines format).
///
/// Values are stored flattened to strings; composite payloads keep
/// their structure in `additional_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub order_id: String,
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub email: Option<String>,
    pub action: ChangeKind,
    pub field_name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub additional_data: Option<serde_json::Value>,
}

/// Who made a change.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub name: String,
    pub email: Option<String>,
}

/// Column used to order query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Timestamp,
    OrderId,
    Action,
    User,
}

/// Filters and paging for change log queries. Unset filters match everything.
#[derive(Debug, Clone, PartialEq)]
pub struct LogFilter {
    pub order_id: Option<String>,
    pub action: Option<ChangeKind>,
    /// Case-insensitive substring of the user name or email.
    pub user: Option<String>,
    /// First day included (UTC).
    pub date_from: Option<NaiveDate>,
    /// Last day included (UTC).
    pub date_to: Option<NaiveDate>,
    /// Case-insensitive substring of field name, old value, new value or user name.
    pub search: Option<String>,
    pub sort_by: SortField,
    pub descending: bool,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl Default for LogFilter {
    fn default() -> Self {
        Self {
            order_id: None,
            action: None,
            user: None,
            date_from: None,
            date_to: None,
            search: None,
            sort_by: SortField::Timestamp,
            descending: true,
            limit: None,
            offset: 0,
        }
    }
}

impl LogFilter {
    /// Whether an entry passes every filter (paging is not applied here).
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if let Some(order_id) = &self.order_id
            && &entry.order_id != order_id
        {
            return false;
        }

        if let Some(action) = self.action
            && entry.action != action
        {
            return false;
        }

        if let Some(user) = &self.user {
            let needle = user.to_lowercase();
            let matches_name = entry.user.to_lowercase().contains(&needle);
            let matches_email = entry
                .email
                .as_ref()
                .is_some_and(|e| e.to_lowercase().contains(&needle));
            if !matches_name && !matches_email {
                return false;
            }
        }

        let day = entry.timestamp.date_naive();
        if self.date_from.is_some_and(|from| day < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| day > to) {
            return false;
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = |s: Option<&str>| s.is_some_and(|s| s.to_lowercase().contains(&needle));
            if !hit(entry.field_name.as_deref())
                && !hit(entry.old_value.as_deref())
                && !hit(entry.new_value.as_deref())
                && !hit(Some(&entry.user))
            {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry() -> LogEntry {
        LogEntry {
            id: 1,
            order_id: "1001".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap(),
            user: "Alice".to_string(),
            email: Some("alice@shop.test".to_string()),
            action: ChangeKind::StatusChanged,
            field_name: Some("status".to_string()),
            old_value: Some("pending".to_string()),
            new_value: Some("processing".to_string()),
            additional_data: None,
        }
    }

    #[test]
    fn default_filter_matches_everything() {
        assert!(LogFilter::default().matches(&entry()));
    }

    #[test]
    fn order_and_action_filters() {
        let filter = LogFilter {
            order_id: Some("1002".to_string()),
            ..LogFilter::default()
        };
        assert!(!filter.matches(&entry()));

        let filter = LogFilter {
            action: Some(ChangeKind::TotalChanged),
            ..LogFilter::default()
        };
        assert!(!filter.matches(&entry()));
    }

    #[test]
    fn user_filter_checks_name_and_email() {
        let by_name = LogFilter {
            user: Some("ALI".to_string()),
            ..LogFilter::default()
        };
        let by_email = LogFilter {
            user: Some("shop.test".to_string()),
            ..LogFilter::default()
        };
        let other = LogFilter {
            user: Some("bob".to_string()),
            ..LogFilter::default()
        };

        assert!(by_name.matches(&entry()));
        assert!(by_email.matches(&entry()));
        assert!(!other.matches(&entry()));
    }

    #[test]
    fn date_range_is_inclusive() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let filter = LogFilter {
            date_from: Some(day),
            date_to: Some(day),
            ..LogFilter::default()
        };
        assert!(filter.matches(&entry()));

        let after = LogFilter {
            date_from: NaiveDate::from_ymd_opt(2026, 3, 16),
            ..LogFilter::default()
        };
        assert!(!after.matches(&entry()));
    }

    #[test]
    fn search_covers_values_and_user() {
        for needle in ["stat", "PENDING", "process", "alice"] {
            let filter = LogFilter {
                search: Some(needle.to_string()),
                ..LogFilter::default()
            };
            assert!(filter.matches(&entry()), "search '{needle}' should match");
        }

        let miss = LogFilter {
            search: Some("refund".to_string()),
            ..LogFilter::default()
        };
        assert!(!miss.matches(&entry()));
    }
}
