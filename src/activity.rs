//! Activity feed helpers: time windows, summaries and text search.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::productive::{ApiError, ApiResult};
use crate::sanitize::strip_html;

/// Search looks back 90 days.
pub const SEARCH_WINDOW_HOURS: u32 = 2160;

/// Attributes of an activity that text search inspects, in order.
pub const SEARCH_FIELDS: &[&str] = &["title", "body", "item_name", "person_name", "project_name"];

pub const DEFAULT_ACTIVITY_HOURS: u32 = 24;

/// Activity kinds as numbered by the Productive API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Comment,
    Changeset,
    Email,
}

impl ActivityType {
    /// Value of `filter[type]`.
    pub fn code(self) -> u8 {
        match self {
            ActivityType::Comment => 1,
            ActivityType::Changeset => 2,
            ActivityType::Email => 3,
        }
    }
}

/// ISO-8601 UTC timestamp `hours` before `now`, second precision.
///
/// Windows reaching past the earliest representable time are rejected as
/// validation errors.
pub fn cutoff_from(now: DateTime<Utc>, hours: u32) -> ApiResult<String> {
    Duration::try_hours(i64::from(hours))
        .and_then(|window| now.checked_sub_signed(window))
        .map(|cutoff| cutoff.to_rfc3339_opts(SecondsFormat::Secs, true))
        .ok_or_else(|| ApiError::validation(format!("hours={hours} is out of range")))
}

pub fn cutoff(hours: u32) -> ApiResult<String> {
    cutoff_from(Utc::now(), hours)
}

/// Count activities by `type`, `event` and `item_type` attributes.
///
/// Non-object entries and missing attributes are skipped, but every entry
/// counts towards `total`.
pub fn summarize(activities: &[Value]) -> Value {
    let mut by_type = BTreeMap::<String, u64>::new();
    let mut by_event = BTreeMap::<String, u64>::new();
    let mut by_item_type = BTreeMap::<String, u64>::new();

    for attributes in activities.iter().filter_map(|a| a.get("attributes")) {
        tally(&mut by_type, attributes.get("type"));
        tally(&mut by_event, attributes.get("event"));
        tally(&mut by_item_type, attributes.get("item_type"));
    }

    json!({
        "by_type": by_type,
        "by_event": by_event,
        "by_item_type": by_item_type,
        "total": activities.len(),
    })
}

fn tally(counts: &mut BTreeMap<String, u64>, value: Option<&Value>) {
    let key = match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return,
    };
    *counts.entry(key).or_default() += 1;
}

/// Case-insensitive substring match over the searchable attributes, with
/// markup removed so matches agree with the sanitized text.
///
/// `needle` must already be lowercased and trimmed.
pub fn matches_query(activity: &Value, needle: &str) -> bool {
    let Some(attributes) = activity.get("attributes") else {
        return false;
    };
    SEARCH_FIELDS.iter().any(|field| {
        attributes
            .get(*field)
            .and_then(Value::as_str)
            .is_some_and(|text| strip_html(text).to_lowercase().contains(needle))
    })
}

/// Activities from `items` matching `query`, in their original order.
pub fn search<'a>(items: &'a [Value], query: &str) -> Vec<&'a Value> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .filter(|activity| matches_query(activity, &needle))
        .collect()
}
