use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    // Anything that is not "desc" sorts ascending
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

/// One entry of a sort specification: `{"column": "nombres", "direction": "asc"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortColumn {
    pub column: String,
    pub direction: SortDirection,
}

impl SortColumn {
    pub fn asc(column: impl Into<String>) -> Self {
        Self { column: column.into(), direction: SortDirection::Asc }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self { column: column.into(), direction: SortDirection::Desc }
    }
}

/// Formats a sort list as the URL parameter form `column:direction[,…]`.
pub fn format_sort_param(sort: &[SortColumn]) -> String {
    sort.iter()
        .map(|s| format!("{}:{}", s.column, s.direction.as_str()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses the URL parameter form back into a sort list. Malformed segments
/// borrow the fallback's leading column; an empty result yields the fallback.
pub fn parse_sort_param(raw: &str, fallback: &[SortColumn]) -> Vec<SortColumn> {
    let parsed: Vec<SortColumn> = raw
        .split(',')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| {
            let mut parts = segment.splitn(2, ':');
            let column = parts.next().unwrap_or_default().trim();
            let direction = SortDirection::parse(parts.next().unwrap_or_default().trim());
            let column = if column.is_empty() {
                fallback.first().map(|s| s.column.clone()).unwrap_or_default()
            } else {
                column.to_string()
            };
            SortColumn { column, direction }
        })
        .collect();

    if parsed.is_empty() {
        fallback.to_vec()
    } else {
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_the_param_form() {
        let sort = vec![SortColumn::desc("created_at"), SortColumn::asc("nombres")];
        let raw = format_sort_param(&sort);
        assert_eq!(raw, "created_at:desc,nombres:asc");
        assert_eq!(parse_sort_param(&raw, &[]), sort);
    }

    #[test]
    fn malformed_segments_fall_back() {
        let fallback = vec![SortColumn::asc("nombres")];
        assert_eq!(parse_sort_param("", &fallback), fallback);
        assert_eq!(parse_sort_param(":desc", &fallback), vec![SortColumn::desc("nombres")]);
        assert_eq!(parse_sort_param("email", &fallback), vec![SortColumn::asc("email")]);
    }
}
