use crate::core::normalizer::required_column;
use crate::domain::model::{RankingEntry, RawTable};
use crate::utils::error::Result;

pub const INSTITUTION_COLUMN: &str = "Institution_Name";
pub const LOCATION_COLUMN: &str = "Location";
pub const RANK_COLUMN: &str = "RANK_2025";
pub const OVERALL_SCORE_COLUMN: &str = "Overall_Score";
pub const ACADEMIC_SCORE_COLUMN: &str = "Academic_Reputation_Score";
pub const EMPLOYER_SCORE_COLUMN: &str = "Employer_Reputation_Score";

/// 載入排名表；無法解析的排名視為缺值，不會中斷
pub fn load_rankings(table: &RawTable, source: &str) -> Result<Vec<RankingEntry>> {
    let name_idx = required_column(table, INSTITUTION_COLUMN, source)?;
    let location_idx = required_column(table, LOCATION_COLUMN, source)?;
    let rank_idx = table.column_index(RANK_COLUMN);
    let overall_idx = table.column_index(OVERALL_SCORE_COLUMN);
    let academic_idx = table.column_index(ACADEMIC_SCORE_COLUMN);
    let employer_idx = table.column_index(EMPLOYER_SCORE_COLUMN);

    if rank_idx.is_none() {
        tracing::warn!("'{}' has no '{}' column; every rank is absent", source, RANK_COLUMN);
    }

    let entries: Vec<RankingEntry> = table
        .rows
        .iter()
        .map(|row| RankingEntry {
            institution_name: RawTable::cell(row, Some(name_idx)).trim().to_string(),
            location: RawTable::cell(row, Some(location_idx)).trim().to_string(),
            rank: parse_rank(RawTable::cell(row, rank_idx)),
            overall_score: parse_score(RawTable::cell(row, overall_idx)),
            academic_reputation_score: parse_score(RawTable::cell(row, academic_idx)),
            employer_reputation_score: parse_score(RawTable::cell(row, employer_idx)),
        })
        .collect();

    let unranked = entries.iter().filter(|e| e.rank.is_none()).count();
    tracing::debug!(
        "Loaded {} ranking entries from '{}' ({} without a numeric rank)",
        entries.len(),
        source,
        unranked
    );

    Ok(entries)
}

/// Integer text, or decimal text with no fractional part. `"=15"` and
/// `"601-610"` are not numbers and come back as `None`.
pub fn parse_rank(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(rank) = trimmed.parse::<i64>() {
        return Some(rank);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Some(value as i64),
        _ => None,
    }
}

pub fn parse_score(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
