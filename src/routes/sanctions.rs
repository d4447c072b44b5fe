use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{de, Deserialize, Deserializer};

use crate::aggregator::{self, SanctionQuery};
use crate::error::ApiError;
use crate::models::SanctionRecord;
use super::AppState;

/// Query parameters for the aggregated sanctions list
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanctionsQuery {
    #[serde(default, deserialize_with = "blank_as_none")]
    season: Option<i32>,
    /// Comma-separated discipline codes, e.g. "SB,FS"
    #[serde(default)]
    discipline: Option<String>,
    #[serde(default)]
    athlete_name: Option<String>,
}

/// Frontend forms send unset fields as `season=`; read those as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// GET /api/sanctions - Latest athlete sanctions across disciplines
///
/// Query params:
/// - season: only this season (e.g. 2024)
/// - discipline: comma-separated codes, defaults to SB,FS,CC,NK
/// - athleteName: first or last name prefix, case-insensitive
pub async fn get_sanctions(
    State(state): State<AppState>,
    Query(params): Query<SanctionsQuery>,
) -> Result<Json<Vec<SanctionRecord>>, ApiError> {
    let query = SanctionQuery::new(
        params.season,
        params.discipline.as_deref(),
        params.athlete_name.as_deref(),
    );

    let sanctions = aggregator::aggregate_sanctions(&state.fis, &query).await?;

    Ok(Json(sanctions))
}

/// GET /api/sanctions/{discipline}/{season} - Latest sanctions for a single discipline
///
/// Relays one upstream call without role filtering.
pub async fn get_discipline_sanctions(
    State(state): State<AppState>,
    Path((discipline, season)): Path<(String, i32)>,
) -> Result<Json<Vec<SanctionRecord>>, ApiError> {
    let discipline = discipline.trim().to_uppercase();

    let sanctions = state
        .fis
        .fetch_sanctions(&discipline, Some(season))
        .await
        .map_err(|e| {
            tracing::error!("Error fetching sanctions for {}/{}: {}", discipline, season, e);
            e
        })?;

    Ok(Json(aggregator::rank(sanctions)))
}
