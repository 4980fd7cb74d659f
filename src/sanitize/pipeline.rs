use serde_json::{Map, Value};

use super::html::strip_html;
use super::policy::{
    PAGINATION_META_FIELDS, PROJECT_ATTRIBUTE_WHITELIST, PROJECT_FIELDS,
    PROJECT_RELATIONSHIP_WHITELIST, ResourceKind,
};
use crate::config::Config;

/// Field key of the derived browser link attached to resource objects.
pub const WEBAPP_URL_FIELD: &str = "webapp_url";

/// How aggressively attributes are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Single-item fetches and general lists: deny-list only.
    #[default]
    Full,
    /// Bulk browsing lists: essential allow-list, or heavy fields removed.
    Lean,
    /// Strict project shape; other kinds are treated as `Full`.
    ProjectWhitelist,
}

/// Recursive response filter.
///
/// Holds only the values needed to derive browser links, so one instance can
/// be built per request and discarded.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    webapp_url: String,
    organization_id: u64,
    projection: Projection,
}

impl Sanitizer {
    pub fn new(webapp_url: impl Into<String>, organization_id: u64) -> Self {
        Self {
            webapp_url: webapp_url.into().trim_end_matches('/').to_string(),
            organization_id,
            projection: Projection::Full,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.webapp_url.clone(), config.organization_id)
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Browser URL for a resource: `<origin>/<organization>/<type>/<id>`.
    pub fn resource_url(&self, kind: ResourceKind, id: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.webapp_url, self.organization_id, kind, id
        )
    }

    /// Clean an arbitrary JSON tree.
    ///
    /// Children are cleaned before their parents, so emptiness cascades
    /// upward in one pass. The root itself is never removed, only emptied.
    pub fn sanitize(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.clean_object(map)),
            Value::Array(items) => Value::Array(self.clean_items(items)),
            other => other.clone(),
        }
    }

    fn clean_items(&self, items: &[Value]) -> Vec<Value> {
        items
            .iter()
            .map(|item| self.sanitize(item))
            .filter(|item| !is_empty(item))
            .collect()
    }

    fn clean_object(&self, map: &Map<String, Value>) -> Map<String, Value> {
        let kind = resource_kind(map);
        let project_whitelist =
            self.projection == Projection::ProjectWhitelist && kind == Some(ResourceKind::Projects);

        let mut out = Map::new();
        for (key, value) in map {
            if key == "links" {
                continue;
            }
            if project_whitelist && !PROJECT_FIELDS.contains(&key.as_str()) {
                continue;
            }

            let cleaned = match (key.as_str(), value) {
                ("relationships", Value::Object(rels)) => {
                    Value::Object(self.clean_relationships(rels, project_whitelist))
                }
                _ => self.sanitize(value),
            };
            if is_empty(&cleaned) {
                continue;
            }

            let cleaned = match (key.as_str(), cleaned, kind) {
                ("attributes", Value::Object(attrs), Some(kind)) => {
                    Value::Object(self.filter_attributes(kind, attrs, project_whitelist))
                }
                ("meta", Value::Object(meta), _) => Value::Object(self.clean_meta(meta)),
                (_, other, _) => other,
            };
            if is_empty(&cleaned) {
                continue;
            }

            out.insert(key.clone(), cleaned);
        }

        // Added after pruning so the derived link can never be pruned away.
        if let Some(kind) = kind {
            if let Some(id) = resource_id(&out) {
                let url = self.resource_url(kind, &id);
                out.insert(WEBAPP_URL_FIELD.to_string(), Value::String(url));
            }
        }

        out
    }

    fn clean_relationships(
        &self,
        rels: &Map<String, Value>,
        project_whitelist: bool,
    ) -> Map<String, Value> {
        let mut out = Map::new();
        for (name, value) in rels {
            if name == "organization" || name == "links" {
                continue;
            }
            if project_whitelist && !PROJECT_RELATIONSHIP_WHITELIST.contains(&name.as_str()) {
                continue;
            }
            let cleaned = self.sanitize(value);
            if !is_empty(&cleaned) {
                out.insert(name.clone(), cleaned);
            }
        }
        out
    }

    fn filter_attributes(
        &self,
        kind: ResourceKind,
        attrs: Map<String, Value>,
        project_whitelist: bool,
    ) -> Map<String, Value> {
        let policy = kind.policy();

        let keep = |field: &str| -> bool {
            if project_whitelist {
                return PROJECT_ATTRIBUTE_WHITELIST.contains(&field);
            }
            match (self.projection, policy.essential) {
                (Projection::Lean, Some(essential)) => essential.contains(&field),
                (Projection::Lean, None) => {
                    !policy.deny.contains(&field) && !policy.heavy.contains(&field)
                }
                _ => !policy.deny.contains(&field),
            }
        };

        attrs
            .into_iter()
            .filter(|(field, _)| keep(field.as_str()))
            .filter_map(|(field, value)| {
                let value = match value {
                    Value::String(text) if policy.html.contains(&field.as_str()) => {
                        Value::String(strip_html(&text))
                    }
                    other => other,
                };
                // Stripping can leave nothing behind; prune again so a second
                // pass has nothing left to remove.
                (!is_empty(&value)).then_some((field, value))
            })
            .collect()
    }

    fn clean_meta(&self, meta: Map<String, Value>) -> Map<String, Value> {
        meta.into_iter()
            .filter(|(key, value)| match key.as_str() {
                "settings" => false,
                "included" => *value != Value::Bool(false),
                _ => true,
            })
            .filter(|(key, _)| {
                self.projection != Projection::ProjectWhitelist
                    || PAGINATION_META_FIELDS.contains(&key.as_str())
            })
            .collect()
    }
}

/// `null`, `""`, `{}` and `[]` are pruned; `false` and `0` are kept.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn resource_kind(map: &Map<String, Value>) -> Option<ResourceKind> {
    map.get("type")?.as_str()?.parse().ok()
}

fn resource_id(map: &Map<String, Value>) -> Option<String> {
    match map.get("id")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
