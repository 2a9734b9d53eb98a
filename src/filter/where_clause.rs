use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::criteria::FilterCriterion;

/// Composable AND/OR tree of field-level criteria, serialized as
/// `{"field": {…}}`, `{"AND": […]}` or `{"OR": […]}`.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereExpression {
    Condition { field: String, criterion: FilterCriterion },
    And(Vec<WhereExpression>),
    Or(Vec<WhereExpression>),
}

impl WhereExpression {
    pub fn condition(field: impl Into<String>, criterion: impl Into<FilterCriterion>) -> Self {
        WhereExpression::Condition { field: field.into(), criterion: criterion.into() }
    }

    /// Conjunction of conditions. A single condition is used directly, never
    /// wrapped; an empty list means no clause at all.
    pub fn all_of(mut conditions: Vec<WhereExpression>) -> Option<WhereExpression> {
        match conditions.len() {
            0 => None,
            1 => Some(conditions.remove(0)),
            _ => Some(WhereExpression::And(conditions)),
        }
    }

    /// Disjunction of conditions, with the same single-child collapse.
    pub fn any_of(mut conditions: Vec<WhereExpression>) -> Option<WhereExpression> {
        match conditions.len() {
            0 => None,
            1 => Some(conditions.remove(0)),
            _ => Some(WhereExpression::Or(conditions)),
        }
    }

    /// Evaluates the tree against a JSON record.
    pub fn matches(&self, record: &Value) -> bool {
        match self {
            WhereExpression::Condition { field, criterion } => {
                criterion.matches(record.get(field).unwrap_or(&Value::Null))
            }
            WhereExpression::And(children) => children.iter().all(|c| c.matches(record)),
            WhereExpression::Or(children) => children.iter().any(|c| c.matches(record)),
        }
    }
}

impl Serialize for WhereExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            WhereExpression::Condition { field, criterion } => {
                map.serialize_entry(field, criterion)?;
            }
            WhereExpression::And(children) => map.serialize_entry("AND", children)?,
            WhereExpression::Or(children) => map.serialize_entry("OR", children)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WhereExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map: serde_json::Map<String, Value> = serde_json::Map::deserialize(deserializer)?;
        if map.len() != 1 {
            return Err(D::Error::custom(
                "where expression must contain exactly one field key or AND/OR group",
            ));
        }
        let (key, value) = map
            .into_iter()
            .next()
            .ok_or_else(|| D::Error::custom("where expression cannot be empty"))?;
        match key.as_str() {
            "AND" => {
                let children: Vec<WhereExpression> =
                    serde_json::from_value(value).map_err(D::Error::custom)?;
                if children.is_empty() {
                    return Err(D::Error::custom("AND group requires at least one child"));
                }
                Ok(WhereExpression::And(children))
            }
            "OR" => {
                let children: Vec<WhereExpression> =
                    serde_json::from_value(value).map_err(D::Error::custom)?;
                if children.is_empty() {
                    return Err(D::Error::custom("OR group requires at least one child"));
                }
                Ok(WhereExpression::Or(children))
            }
            _ => {
                let criterion: FilterCriterion =
                    serde_json::from_value(value).map_err(D::Error::custom)?;
                Ok(WhereExpression::Condition { field: key, criterion })
            }
        }
    }
}
