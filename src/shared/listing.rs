//! Filtering, search and ordering shared by every back-office list.
//!
//! Lists are loaded in full and narrowed in memory: `status` is an exact
//! match on the row's status key (`"all"` or empty disables it) and `search`
//! is a case-insensitive substring match over the row's searchable fields.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
}

/// A row that can be narrowed by a [`ListQuery`].
pub trait Listable {
    fn search_fields(&self) -> Vec<&str>;

    fn status_key(&self) -> Option<&str> {
        None
    }

    fn created_at(&self) -> DateTime<Utc>;
}

impl ListQuery {
    pub fn with_search(search: &str) -> Self {
        Self {
            search: Some(search.to_string()),
            ..Default::default()
        }
    }

    pub fn with_status(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn wanted_status(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
    }

    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        if let Some(status) = self.wanted_status() {
            if item.status_key() != Some(status) {
                return false;
            }
        }

        match self.needle() {
            Some(needle) => item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle)),
            None => true,
        }
    }

    pub fn apply<T: Listable>(&self, items: Vec<T>) -> Vec<T> {
        let mut kept: Vec<T> = items.into_iter().filter(|i| self.matches(i)).collect();

        match self.sort {
            SortOrder::Newest => kept.sort_by_key(|i| std::cmp::Reverse(i.created_at())),
            SortOrder::Oldest => kept.sort_by_key(|i| i.created_at()),
        }

        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[derive(Debug, Clone)]
    struct Row {
        email: String,
        name: String,
        status: &'static str,
        created_at: DateTime<Utc>,
    }

    impl Listable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.email.as_str(), self.name.as_str()]
        }

        fn status_key(&self) -> Option<&str> {
            Some(self.status)
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
    }

    fn rows() -> Vec<Row> {
        let now = Utc::now();
        vec![
            Row {
                email: "Jean.Dupont@example.com".to_string(),
                name: "Jean".to_string(),
                status: "completed",
                created_at: now - Duration::days(3),
            },
            Row {
                email: "marie@example.com".to_string(),
                name: "Marie Curie".to_string(),
                status: "pending",
                created_at: now - Duration::days(1),
            },
            Row {
                email: "paul@example.com".to_string(),
                name: "Paul".to_string(),
                status: "completed",
                created_at: now,
            },
            Row {
                email: "anne@example.com".to_string(),
                name: "Anne".to_string(),
                status: "failed",
                created_at: now - Duration::days(2),
            },
            Row {
                email: "luc@example.com".to_string(),
                name: "Luc".to_string(),
                status: "refunded",
                created_at: now - Duration::days(5),
            },
        ]
    }

    #[test]
    fn status_filter_keeps_exact_matches_only() {
        let result = ListQuery::with_status("completed").apply(rows());

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| r.status == "completed"));
    }

    #[test]
    fn status_all_disables_filter() {
        let result = ListQuery::with_status("all").apply(rows());
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let result = ListQuery::with_search("dupont").apply(rows());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].email, "Jean.Dupont@example.com");
    }

    #[test]
    fn search_looks_at_every_field() {
        let result = ListQuery::with_search("CURIE").apply(rows());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].email, "marie@example.com");
    }

    #[test]
    fn blank_search_matches_everything() {
        let result = ListQuery::with_search("   ").apply(rows());
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn newest_first_by_default() {
        let result = ListQuery::default().apply(rows());

        let names: Vec<&str> = result.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Paul", "Marie Curie", "Anne", "Jean", "Luc"]);
    }

    #[test]
    fn oldest_first_when_requested() {
        let query = ListQuery {
            sort: SortOrder::Oldest,
            ..Default::default()
        };
        let result = query.apply(rows());

        assert_eq!(result.first().map(|r| r.name.as_str()), Some("Luc"));
        assert_eq!(result.last().map(|r| r.name.as_str()), Some("Paul"));
    }

    #[test]
    fn search_and_status_combine() {
        let query = ListQuery {
            search: Some("example".to_string()),
            status: Some("pending".to_string()),
            sort: SortOrder::Newest,
        };

        let result = query.apply(rows());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Marie Curie");
    }
}
