use futures::future::join_all;

use crate::fis::{FisClient, FisError};
use crate::models::{SanctionRecord, DEFAULT_DISCIPLINES};

/// Upper bound on records returned to the frontend.
pub const MAX_RECORDS: usize = 20;

/// Filters for one aggregated sanctions lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanctionQuery {
    pub season: Option<i32>,
    /// Normalized discipline codes. Empty means [`DEFAULT_DISCIPLINES`].
    pub disciplines: Vec<String>,
    /// Lowercased name prefix.
    pub athlete_name: Option<String>,
}

impl SanctionQuery {
    pub fn new(season: Option<i32>, discipline: Option<&str>, athlete_name: Option<&str>) -> Self {
        let athlete_name = athlete_name
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty());

        SanctionQuery {
            season,
            disciplines: discipline.map(parse_disciplines).unwrap_or_default(),
            athlete_name,
        }
    }

    /// Disciplines to fetch, in request order.
    pub fn disciplines_to_fetch(&self) -> Vec<&str> {
        if self.disciplines.is_empty() {
            DEFAULT_DISCIPLINES.to_vec()
        } else {
            self.disciplines.iter().map(String::as_str).collect()
        }
    }

    fn keeps(&self, record: &SanctionRecord) -> bool {
        if !record.is_athlete() {
            return false;
        }

        if !self.disciplines.is_empty() {
            let matched = record
                .discipline_code()
                .is_some_and(|code| self.disciplines.iter().any(|d| d.eq_ignore_ascii_case(code)));
            if !matched {
                return false;
            }
        }

        if let Some(season) = self.season {
            let matched = record
                .season_code()
                .is_some_and(|code| code.matches(&season.to_string()));
            if !matched {
                return false;
            }
        }

        match &self.athlete_name {
            Some(prefix) => record.name_starts_with(prefix),
            None => true,
        }
    }
}

/// Split a comma-separated discipline list ("sb, FS,,cc") into unique upper-case codes.
pub fn parse_disciplines(raw: &str) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();

    for code in raw.split(',').map(|c| c.trim().to_uppercase()) {
        if !code.is_empty() && !codes.contains(&code) {
            codes.push(code);
        }
    }

    codes
}

/// Fetch every requested discipline concurrently and return the filtered,
/// newest-first, truncated result.
///
/// All requests are awaited even when one fails. Any failure fails the whole
/// lookup; a rate limit on any discipline wins over other errors.
pub async fn aggregate_sanctions(
    client: &FisClient,
    query: &SanctionQuery,
) -> Result<Vec<SanctionRecord>, FisError> {
    let disciplines = query.disciplines_to_fetch();

    let requests = disciplines
        .iter()
        .map(|discipline| client.fetch_sanctions(discipline, query.season));
    let results = join_all(requests).await;

    let records = merge_results(&disciplines, results)?;
    tracing::debug!(
        "Merged {} sanctions from {} disciplines",
        records.len(),
        disciplines.len()
    );

    Ok(filter_and_rank(records, query))
}

fn merge_results(
    disciplines: &[&str],
    results: Vec<Result<Vec<SanctionRecord>, FisError>>,
) -> Result<Vec<SanctionRecord>, FisError> {
    let mut records = Vec::new();
    let mut failure: Option<FisError> = None;

    for (discipline, result) in disciplines.iter().zip(results) {
        match result {
            Ok(batch) => records.extend(batch),
            Err(err) => {
                tracing::error!("Error fetching sanctions for {}: {}", discipline, err);
                failure = match failure {
                    Some(existing) if existing.is_rate_limited() || !err.is_rate_limited() => {
                        Some(existing)
                    }
                    _ => Some(err),
                };
            }
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(records),
    }
}

/// Apply the query filters, then sort and truncate.
pub fn filter_and_rank(records: Vec<SanctionRecord>, query: &SanctionQuery) -> Vec<SanctionRecord> {
    let kept = records.into_iter().filter(|r| query.keeps(r)).collect();
    rank(kept)
}

/// Newest competition first, capped at [`MAX_RECORDS`]. Records without a
/// readable date go last; ties keep their incoming order.
pub fn rank(mut records: Vec<SanctionRecord>) -> Vec<SanctionRecord> {
    records.sort_by(|a, b| b.competition_date().cmp(&a.competition_date()));
    records.truncate(MAX_RECORDS);
    records
}
