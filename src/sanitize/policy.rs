//! Per-resource field policies.

use std::fmt;
use std::str::FromStr;

/// Resource kinds the sanitizer knows how to filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Projects,
    Tasks,
    Comments,
    Todos,
    Pages,
    Attachments,
    Activities,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Projects,
        ResourceKind::Tasks,
        ResourceKind::Comments,
        ResourceKind::Todos,
        ResourceKind::Pages,
        ResourceKind::Attachments,
        ResourceKind::Activities,
    ];

    /// JSON:API `type` string for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Projects => "projects",
            ResourceKind::Tasks => "tasks",
            ResourceKind::Comments => "comments",
            ResourceKind::Todos => "todos",
            ResourceKind::Pages => "pages",
            ResourceKind::Attachments => "attachments",
            ResourceKind::Activities => "activities",
        }
    }

    pub fn policy(self) -> &'static AttributePolicy {
        match self {
            ResourceKind::Projects => &PROJECTS,
            ResourceKind::Tasks => &TASKS,
            ResourceKind::Comments => &COMMENTS,
            ResourceKind::Todos => &TODOS,
            ResourceKind::Pages => &PAGES,
            ResourceKind::Attachments => &ATTACHMENTS,
            ResourceKind::Activities => &ACTIVITIES,
        }
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown resource type: {s}"))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute handling for one resource kind.
#[derive(Debug)]
pub struct AttributePolicy {
    /// Internal or noisy fields removed from every projection.
    pub deny: &'static [&'static str],
    /// Rich-text fields reduced to plain text.
    pub html: &'static [&'static str],
    /// Allow-list applied instead of `deny` for lean list projections.
    pub essential: Option<&'static [&'static str]>,
    /// Large fields dropped from lean lists when there is no allow-list.
    pub heavy: &'static [&'static str],
}

pub const TASK_ESSENTIAL_FIELDS: &[&str] = &[
    "title",
    "number",
    "task_number",
    "status",
    "closed",
    "created_at",
    "updated_at",
    "last_activity_at",
    "initial_estimate",
    "remaining_time",
    "billable_time",
    "worked_time",
    "type_id",
    "private",
];

static PROJECTS: AttributePolicy = AttributePolicy {
    deny: &["preferences", "sample_data", "tag_colors"],
    html: &[],
    essential: None,
    heavy: &[],
};

static TASKS: AttributePolicy = AttributePolicy {
    deny: &[
        "creation_method_id",
        "email_key",
        "placement",
        "subtask_placement",
    ],
    html: &["description"],
    essential: Some(TASK_ESSENTIAL_FIELDS),
    heavy: &["description"],
};

static COMMENTS: AttributePolicy = AttributePolicy {
    deny: &["version_number", "reactions"],
    html: &["body"],
    essential: None,
    heavy: &[],
};

static TODOS: AttributePolicy = AttributePolicy {
    deny: &["placement"],
    html: &["description"],
    essential: None,
    heavy: &[],
};

static PAGES: AttributePolicy = AttributePolicy {
    deny: &["version_number", "preferences"],
    html: &["body"],
    essential: None,
    heavy: &["body"],
};

static ATTACHMENTS: AttributePolicy = AttributePolicy {
    deny: &["attachable_type_id"],
    html: &[],
    essential: None,
    heavy: &[],
};

static ACTIVITIES: AttributePolicy = AttributePolicy {
    deny: &[],
    html: &["body"],
    essential: None,
    heavy: &[],
};

/// Top-level fields kept on project objects by the project whitelist.
pub const PROJECT_FIELDS: &[&str] = &["id", "type", "attributes", "relationships"];

pub const PROJECT_ATTRIBUTE_WHITELIST: &[&str] = &[
    "name",
    "number",
    "project_number",
    "project_type_id",
    "project_color_id",
    "last_activity_at",
    "time_on_tasks",
    "archived_at",
    "created_at",
    "template",
    "duplication_status",
];

pub const PROJECT_RELATIONSHIP_WHITELIST: &[&str] = &["organization"];

/// Meta keys kept by the project whitelist.
pub const PAGINATION_META_FIELDS: &[&str] = &[
    "current_page",
    "total_pages",
    "total_count",
    "page_size",
    "max_page_size",
];
