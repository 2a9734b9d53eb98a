use serde::{Deserialize, Serialize};

use crate::filter::WhereExpression;

/// Label shown for groups the backend could not classify.
pub const UNCLASSIFIED_LABEL: &str = "Sin clasificar";

/// Grouped-count request, independent of the paginated list query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub group_by: String,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<WhereExpression>,
}

impl SummaryRequest {
    pub fn group_by(field: impl Into<String>) -> Self {
        Self { group_by: field.into(), where_clause: None }
    }

    pub fn with_where(mut self, where_clause: WhereExpression) -> Self {
        self.where_clause = Some(where_clause);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryGroup {
    #[serde(default)]
    pub group: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub total: u64,
    pub groups: Vec<SummaryGroup>,
}

/// One row of a rendered summary (e.g. a count badge on a status tab).
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryItem {
    pub label: String,
    pub value: u64,
    pub percentage: u32,
}

impl SummaryResponse {
    pub fn items(&self) -> Vec<SummaryItem> {
        self.groups
            .iter()
            .map(|group| {
                let label = match &group.group {
                    Some(label) if !label.is_empty() => label.clone(),
                    _ => UNCLASSIFIED_LABEL.to_string(),
                };
                let percentage = if self.total > 0 {
                    ((group.count as f64 / self.total as f64) * 100.0).round() as u32
                } else {
                    0
                };
                SummaryItem { label, value: group.count, percentage }
            })
            .collect()
    }
}

pub fn find_by_label<'a>(items: &'a [SummaryItem], label: &str) -> Option<&'a SummaryItem> {
    items.iter().find(|item| item.label.eq_ignore_ascii_case(label))
}

pub fn total_for_labels(items: &[SummaryItem], labels: &[&str]) -> u64 {
    items
        .iter()
        .filter(|item| labels.contains(&item.label.as_str()))
        .map(|item| item.value)
        .sum()
}
