use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Criterion over string-valued fields. All comparisons are case-folded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StringCriterion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_with: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_with: Option<String>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub is_in: Option<Vec<String>>,
}

impl StringCriterion {
    pub fn equals(value: impl Into<String>) -> Self {
        Self { equals: Some(value.into()), ..Self::default() }
    }

    pub fn contains(value: impl Into<String>) -> Self {
        Self { contains: Some(value.into()), ..Self::default() }
    }

    pub fn starts_with(value: impl Into<String>) -> Self {
        Self { starts_with: Some(value.into()), ..Self::default() }
    }

    pub fn ends_with(value: impl Into<String>) -> Self {
        Self { ends_with: Some(value.into()), ..Self::default() }
    }

    pub fn is_in(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { is_in: Some(values.into_iter().map(Into::into).collect()), ..Self::default() }
    }

    // An empty `in` list counts as unset
    pub fn is_trivial(&self) -> bool {
        self.equals.is_none()
            && self.contains.is_none()
            && self.starts_with.is_none()
            && self.ends_with.is_none()
            && self.is_in.as_ref().map_or(true, |v| v.is_empty())
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        if self.is_trivial() {
            return true;
        }
        let folded = match value {
            Some(v) if !v.is_empty() => v.to_lowercase(),
            _ => return false,
        };
        if let Some(expected) = &self.equals {
            if folded != expected.to_lowercase() {
                return false;
            }
        }
        if let Some(needle) = &self.contains {
            if !folded.contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(prefix) = &self.starts_with {
            if !folded.starts_with(&prefix.to_lowercase()) {
                return false;
            }
        }
        if let Some(suffix) = &self.ends_with {
            if !folded.ends_with(&suffix.to_lowercase()) {
                return false;
            }
        }
        if let Some(options) = &self.is_in {
            if !options.is_empty() && !options.iter().any(|o| o.to_lowercase() == folded) {
                return false;
            }
        }
        true
    }
}

/// Criterion over numeric fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NumberCriterion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub is_in: Option<Vec<f64>>,
}

impl NumberCriterion {
    pub fn equals(value: f64) -> Self {
        Self { equals: Some(value), ..Self::default() }
    }

    pub fn gt(value: f64) -> Self {
        Self { gt: Some(value), ..Self::default() }
    }

    pub fn gte(value: f64) -> Self {
        Self { gte: Some(value), ..Self::default() }
    }

    pub fn lt(value: f64) -> Self {
        Self { lt: Some(value), ..Self::default() }
    }

    pub fn lte(value: f64) -> Self {
        Self { lte: Some(value), ..Self::default() }
    }

    pub fn between(low: f64, high: f64) -> Self {
        Self { gte: Some(low), lte: Some(high), ..Self::default() }
    }

    pub fn is_in(values: impl IntoIterator<Item = f64>) -> Self {
        Self { is_in: Some(values.into_iter().collect()), ..Self::default() }
    }

    pub fn is_trivial(&self) -> bool {
        self.equals.is_none()
            && self.gt.is_none()
            && self.gte.is_none()
            && self.lt.is_none()
            && self.lte.is_none()
            && self.is_in.as_ref().map_or(true, |v| v.is_empty())
    }

    pub fn matches(&self, value: Option<f64>) -> bool {
        if self.is_trivial() {
            return true;
        }
        let value = match value {
            Some(v) => v,
            None => return false,
        };
        if self.equals.map_or(false, |e| value != e) {
            return false;
        }
        if self.gt.map_or(false, |b| value <= b) {
            return false;
        }
        if self.gte.map_or(false, |b| value < b) {
            return false;
        }
        if self.lt.map_or(false, |b| value >= b) {
            return false;
        }
        if self.lte.map_or(false, |b| value > b) {
            return false;
        }
        if let Some(options) = &self.is_in {
            if !options.is_empty() && !options.contains(&value) {
                return false;
            }
        }
        true
    }
}

/// Criterion over date/datetime fields, compared as UTC instants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DateCriterion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<DateTime<Utc>>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub is_in: Option<Vec<DateTime<Utc>>>,
}

impl DateCriterion {
    pub fn equals(value: DateTime<Utc>) -> Self {
        Self { equals: Some(value), ..Self::default() }
    }

    pub fn after(value: DateTime<Utc>) -> Self {
        Self { gt: Some(value), ..Self::default() }
    }

    pub fn before(value: DateTime<Utc>) -> Self {
        Self { lt: Some(value), ..Self::default() }
    }

    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { gte: Some(from), lte: Some(to), ..Self::default() }
    }

    pub fn is_trivial(&self) -> bool {
        self.equals.is_none()
            && self.gt.is_none()
            && self.gte.is_none()
            && self.lt.is_none()
            && self.lte.is_none()
            && self.is_in.as_ref().map_or(true, |v| v.is_empty())
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        if self.is_trivial() {
            return true;
        }
        let value = match value.and_then(parse_instant) {
            Some(v) => v,
            None => return false,
        };
        if self.equals.map_or(false, |e| value != e) {
            return false;
        }
        if self.gt.map_or(false, |b| value <= b) {
            return false;
        }
        if self.gte.map_or(false, |b| value < b) {
            return false;
        }
        if self.lt.map_or(false, |b| value >= b) {
            return false;
        }
        if self.lte.map_or(false, |b| value > b) {
            return false;
        }
        if let Some(options) = &self.is_in {
            if !options.is_empty() && !options.contains(&value) {
                return false;
            }
        }
        true
    }
}

/// Criterion over enum-like fields. Unlike strings, comparison is exact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnumCriterion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals: Option<String>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub is_in: Option<Vec<String>>,
}

impl EnumCriterion {
    pub fn equals(value: impl Into<String>) -> Self {
        Self { equals: Some(value.into()), is_in: None }
    }

    pub fn is_in(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { equals: None, is_in: Some(values.into_iter().map(Into::into).collect()) }
    }

    pub fn is_trivial(&self) -> bool {
        self.equals.is_none() && self.is_in.as_ref().map_or(true, |v| v.is_empty())
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        if self.is_trivial() {
            return true;
        }
        let value = match value {
            Some(v) => v,
            None => return false,
        };
        if self.equals.as_deref().map_or(false, |e| value != e) {
            return false;
        }
        if let Some(options) = &self.is_in {
            if !options.is_empty() && !options.iter().any(|o| o == value) {
                return false;
            }
        }
        true
    }
}

/// Criterion over boolean fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BoolCriterion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equals: Option<bool>,
}

impl BoolCriterion {
    pub fn equals(value: bool) -> Self {
        Self { equals: Some(value) }
    }

    pub fn is_trivial(&self) -> bool {
        self.equals.is_none()
    }

    pub fn matches(&self, value: Option<bool>) -> bool {
        match self.equals {
            None => true,
            Some(expected) => value.map_or(false, |v| v == expected),
        }
    }
}

/// Closed union of criterion kinds, tagged by value domain.
///
/// Deserialization classifies by value shape: boolean operands resolve to
/// `Bool`, numeric to `Number`, RFC 3339 strings to `Date`, and remaining
/// string operands to `String` (the `Enum` kind exists at construction only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterCriterion {
    Bool(BoolCriterion),
    Number(NumberCriterion),
    Date(DateCriterion),
    String(StringCriterion),
    Enum(EnumCriterion),
}

impl FilterCriterion {
    /// A criterion with no operators set matches every record; otherwise a
    /// missing or mistyped field value never matches.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FilterCriterion::Bool(c) => c.matches(value.as_bool()),
            FilterCriterion::Number(c) => c.matches(value.as_f64()),
            FilterCriterion::Date(c) => c.matches(value.as_str()),
            FilterCriterion::String(c) => c.matches(value.as_str()),
            FilterCriterion::Enum(c) => c.matches(value.as_str()),
        }
    }

    pub fn is_trivial(&self) -> bool {
        match self {
            FilterCriterion::Bool(c) => c.is_trivial(),
            FilterCriterion::Number(c) => c.is_trivial(),
            FilterCriterion::Date(c) => c.is_trivial(),
            FilterCriterion::String(c) => c.is_trivial(),
            FilterCriterion::Enum(c) => c.is_trivial(),
        }
    }
}

impl From<StringCriterion> for FilterCriterion {
    fn from(c: StringCriterion) -> Self {
        FilterCriterion::String(c)
    }
}

impl From<NumberCriterion> for FilterCriterion {
    fn from(c: NumberCriterion) -> Self {
        FilterCriterion::Number(c)
    }
}

impl From<DateCriterion> for FilterCriterion {
    fn from(c: DateCriterion) -> Self {
        FilterCriterion::Date(c)
    }
}

impl From<EnumCriterion> for FilterCriterion {
    fn from(c: EnumCriterion) -> Self {
        FilterCriterion::Enum(c)
    }
}

impl From<BoolCriterion> for FilterCriterion {
    fn from(c: BoolCriterion) -> Self {
        FilterCriterion::Bool(c)
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&parsed));
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }
    None
}
