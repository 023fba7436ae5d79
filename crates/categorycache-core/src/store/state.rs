use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Category;

/// Snapshot of the category state published to UI code.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoriesState {
    pub categories: Vec<Category>,
    /// True only while a fetch sequence is in flight.
    pub loading: bool,
    pub error: Option<String>,
    /// When the list was last fetched from the network.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl CategoriesState {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Age of the last successful fetch, e.g. "5m ago".
    pub fn fetched_age_display(&self) -> String {
        self.fetched_at
            .map(|at| age_display(Utc::now(), at))
            .unwrap_or_else(|| "never".to_string())
    }
}

fn age_display(now: DateTime<Utc>, at: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        format!("{}h ago", (minutes + 30) / 60)
    } else {
        format!("{}d ago", (minutes + 720) / 1440)
    }
}
