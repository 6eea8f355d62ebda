use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five kinds of criterion a filter set can hold, at most one each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKind {
    Search,
    Language,
    Tags,
    Favorite,
    DateRange,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Search,
        FilterKind::Language,
        FilterKind::Tags,
        FilterKind::Favorite,
        FilterKind::DateRange,
    ];
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FilterKind::Search => "search",
            FilterKind::Language => "language",
            FilterKind::Tags => "tags",
            FilterKind::Favorite => "favorite",
            FilterKind::DateRange => "date range",
        };
        f.write_str(label)
    }
}

/// One constraint narrowing the visible snippets.
///
/// Serializes as `{"type": "...", "value": ...}`, e.g.
/// `{"type":"dateRange","value":["2024-07-01T00:00:00Z","2024-07-06T00:00:00Z"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum FilterCriterion {
    /// Case-insensitive text matched against title, description, code and tag names
    Search(String),
    /// Canonical language ids; empty means any language
    Language(Vec<String>),
    /// Tag names, any one of which must be on the snippet; empty means any
    Tags(Vec<String>),
    /// `true` keeps favorites only, `false` keeps everything
    Favorite(bool),
    /// Inclusive creation-time window
    DateRange(DateTime<Utc>, DateTime<Utc>),
}

impl FilterCriterion {
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterCriterion::Search(_) => FilterKind::Search,
            FilterCriterion::Language(_) => FilterKind::Language,
            FilterCriterion::Tags(_) => FilterKind::Tags,
            FilterCriterion::Favorite(_) => FilterKind::Favorite,
            FilterCriterion::DateRange(..) => FilterKind::DateRange,
        }
    }

    pub fn search(text: impl Into<String>) -> Self {
        FilterCriterion::Search(text.into())
    }

    pub fn languages<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterCriterion::Language(dedup(languages))
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterCriterion::Tags(dedup(tags))
    }

    pub fn favorite(only_favorites: bool) -> Self {
        FilterCriterion::Favorite(only_favorites)
    }

    pub fn date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        FilterCriterion::DateRange(start, end)
    }

    /// Whole-day window: from the first instant of `start` to the last instant of `end`, UTC
    pub fn date_range_days(start: NaiveDate, end: NaiveDate) -> Self {
        FilterCriterion::DateRange(start_of_day(start), end_of_day(end))
    }
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterCriterion::Search(text) => write!(f, "search: \"{}\"", text),
            FilterCriterion::Language(langs) => write!(f, "language: {}", list_or_any(langs)),
            FilterCriterion::Tags(tags) => write!(f, "tags: {}", list_or_any(tags)),
            FilterCriterion::Favorite(true) => f.write_str("favorites only"),
            FilterCriterion::Favorite(false) => f.write_str("favorites: any"),
            FilterCriterion::DateRange(start, end) => write!(
                f,
                "created: {} .. {}",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%Y-%m-%d %H:%M")
            ),
        }
    }
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or_default();
    Utc.from_utc_datetime(&date.and_time(last))
}

fn dedup<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let value = value.into();
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn list_or_any(values: &[String]) -> String {
    if values.is_empty() {
        "any".to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criterion_reports_its_kind() {
        assert_eq!(FilterCriterion::search("x").kind(), FilterKind::Search);
        assert_eq!(FilterCriterion::languages(["rust"]).kind(), FilterKind::Language);
        assert_eq!(FilterCriterion::tags(Vec::<String>::new()).kind(), FilterKind::Tags);
        assert_eq!(FilterCriterion::favorite(false).kind(), FilterKind::Favorite);
        let day = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert_eq!(
            FilterCriterion::date_range_days(day, day).kind(),
            FilterKind::DateRange
        );
    }

    #[test]
    fn set_constructors_drop_duplicates() {
        assert_eq!(
            FilterCriterion::tags(["web", "js", "web"]),
            FilterCriterion::Tags(vec!["web".into(), "js".into()])
        );
    }

    #[test]
    fn serializes_with_type_and_value() {
        let json = serde_json::to_value(FilterCriterion::languages(["rust"])).unwrap();
        assert_eq!(json, serde_json::json!({"type": "language", "value": ["rust"]}));

        let json = serde_json::to_value(FilterCriterion::favorite(true)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "favorite", "value": true}));

        let parsed: FilterCriterion = serde_json::from_str(
            r#"{"type":"dateRange","value":["2024-07-01T00:00:00Z","2024-07-06T00:00:00Z"]}"#,
        )
        .unwrap();
        assert_eq!(parsed.kind(), FilterKind::DateRange);
    }

    #[test]
    fn whole_day_window_covers_both_days() {
        let day = NaiveDate::from_ymd_opt(2024, 7, 5).unwrap();
        let FilterCriterion::DateRange(start, end) = FilterCriterion::date_range_days(day, day)
        else {
            panic!("expected a date range");
        };
        assert_eq!(start.to_rfc3339(), "2024-07-05T00:00:00+00:00");
        assert_eq!(end.date_naive(), day);
        assert!(end > start);
    }
}
