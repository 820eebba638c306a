use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Deserialize, JsonSchema)]
pub struct StatusInput {
    /// Payment status to match (default: completed)
    pub status: Option<String>,
}

#[derive(Deserialize, JsonSchema)]
pub struct CustomRangeInput {
    /// ISO 8601 start date or datetime, inclusive (e.g. 2024-03-01)
    pub start_date: String,
    /// ISO 8601 end date or datetime, inclusive; a bare date means midnight
    pub end_date: String,
    pub status: Option<String>,
}

#[derive(Deserialize, JsonSchema)]
pub struct LastNDaysInput {
    /// Number of days to look back (default: 30, at least 1)
    pub days: Option<i64>,
    pub status: Option<String>,
}

#[derive(Deserialize, JsonSchema)]
pub struct ByCategoryInput {
    /// Optional ISO 8601 start date
    pub start_date: Option<String>,
    /// Optional ISO 8601 end date
    pub end_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize, JsonSchema)]
pub struct ByMonthInput {
    /// Calendar year, e.g. 2024
    pub year: i32,
    pub status: Option<String>,
}
