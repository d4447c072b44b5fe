//! Fixtures shared by the unit tests.

use serde_json::{json, Value};

pub fn sanction_json(
    function: &str,
    first_name: &str,
    last_name: &str,
    date: &str,
    discipline: &str,
    season: i64,
) -> Value {
    json!({
        "function": function,
        "firstName": first_name,
        "lastName": last_name,
        "competitionSummary": {
            "date": date,
            "disciplineCode": discipline,
            "seasonCode": season
        }
    })
}

pub fn json_body(records: &[Value]) -> String {
    Value::Array(records.to_vec()).to_string()
}

/// `count` athlete rows for one discipline, one per day of January.
pub fn athletes_for(discipline: &str, season: i64, count: u32) -> Vec<Value> {
    (1..=count)
        .map(|day| {
            sanction_json(
                "athlete",
                &format!("First{}", day),
                &format!("{}Last{}", discipline, day),
                &format!("{}-01-{:02}", season, day.min(28)),
                discipline,
                season,
            )
        })
        .collect()
}
