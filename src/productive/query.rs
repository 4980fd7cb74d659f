//! Upstream query parameter construction.
//!
//! Productive expresses filtering, sorting and pagination through query keys
//! such as `filter[project_id][eq]`, `sort` and `page[size]`. Tools build a
//! [`QueryParams`] from their typed arguments and then merge caller-supplied
//! filters last, so callers can override anything the tool synthesized.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::warn;

use super::error::{ApiError, ApiResult};
use crate::config::MAX_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    /// Sent as repeated keys.
    List(Vec<String>),
}

/// Ordered query parameters; setting an existing key replaces its value in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.insert(key.into(), ParamValue::Single(value.to_string()));
        self
    }

    pub fn set_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    pub fn set_list<I, V>(&mut self, key: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.insert(key.into(), ParamValue::List(values));
        self
    }

    /// Set `page[number]` (when given) and `page[size]`.
    pub fn page(&mut self, number: Option<u32>, size: u32) -> &mut Self {
        self.set_opt("page[number]", number);
        self.set("page[size]", size)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Single value for `key`, if it is set as a scalar.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            ParamValue::Single(value) => Some(value),
            ParamValue::List(_) => None,
        }
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.entries.retain(|(k, _)| k != key);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge caller-supplied filters over the synthesized parameters.
    ///
    /// Scalars and arrays of scalars are accepted; `null` removes a key.
    pub fn merge(&mut self, extra: &BTreeMap<String, Value>) -> ApiResult<&mut Self> {
        for (key, value) in extra {
            match value {
                Value::Null => {
                    self.remove(key);
                }
                Value::Array(items) => {
                    let values = items
                        .iter()
                        .map(|item| scalar_to_string(key, item))
                        .collect::<ApiResult<Vec<_>>>()?;
                    self.insert(key.clone(), ParamValue::List(values));
                }
                other => {
                    let value = scalar_to_string(key, other)?;
                    self.insert(key.clone(), ParamValue::Single(value));
                }
            }
        }
        Ok(self)
    }

    /// Key/value pairs as sent on the wire, lists expanded into repeated keys.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.entries {
            match value {
                ParamValue::Single(v) => pairs.push((key.as_str(), v.as_str())),
                ParamValue::List(values) => {
                    for v in values {
                        pairs.push((key.as_str(), v.as_str()));
                    }
                }
            }
        }
        pairs
    }

    /// Filters echoed back to the agent: `filter[person_id]` becomes
    /// `person_id`, `filter[project_id][eq]` becomes `project_id.eq`.
    pub fn applied_filters(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .filter_map(|(key, value)| {
                let name = filter_name(key)?;
                let value = match value {
                    ParamValue::Single(v) => Value::String(v.clone()),
                    ParamValue::List(vs) => {
                        Value::Array(vs.iter().cloned().map(Value::String).collect())
                    }
                };
                Some((name, value))
            })
            .collect()
    }

    fn insert(&mut self, key: String, value: ParamValue) {
        match self.entries.iter_mut().find(|entry| entry.0 == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

/// Clamp a requested page size to the API ceiling.
///
/// Returns the effective size and, when clamping happened, the warning that
/// was logged.
pub fn clamp_page_size(requested: u32) -> (u32, Option<String>) {
    if requested > MAX_PAGE_SIZE {
        let message = format!(
            "page size {requested} exceeds API limit of {MAX_PAGE_SIZE}, using {MAX_PAGE_SIZE}"
        );
        warn!("{}", message);
        (MAX_PAGE_SIZE, Some(message))
    } else if requested == 0 {
        let message = "page size 0 is invalid, using 1".to_string();
        warn!("{}", message);
        (1, Some(message))
    } else {
        (requested, None)
    }
}

fn filter_name(key: &str) -> Option<String> {
    let rest = key.strip_prefix("filter[")?;
    let segments: Vec<&str> = rest
        .split(['[', ']'])
        .filter(|segment| !segment.is_empty())
        .collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("."))
    }
}

fn scalar_to_string(key: &str, value: &Value) -> ApiResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ApiError::validation(format!(
            "filter '{key}' must be a string, number, boolean or list of those"
        ))),
    }
}
