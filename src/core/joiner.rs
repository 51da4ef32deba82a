use crate::domain::model::{EnrichedUniversity, RankingEntry, University};
use std::collections::HashMap;

/// Left join on `(name, country) == (institution_name, location)`.
///
/// Exact, case-sensitive match. Every university appears exactly once in the
/// output, in input order. When several ranking rows share a key the first
/// one wins.
pub fn join(universities: &[University], rankings: &[RankingEntry]) -> Vec<EnrichedUniversity> {
    let mut index: HashMap<(&str, &str), &RankingEntry> = HashMap::with_capacity(rankings.len());
    let mut duplicates = 0usize;
    for entry in rankings {
        let key = (entry.institution_name.as_str(), entry.location.as_str());
        if index.contains_key(&key) {
            duplicates += 1;
            continue;
        }
        index.insert(key, entry);
    }
    if duplicates > 0 {
        tracing::debug!("Ignored {} duplicate ranking rows (first occurrence wins)", duplicates);
    }

    let enriched: Vec<EnrichedUniversity> = universities
        .iter()
        .map(|u| EnrichedUniversity {
            university: u.clone(),
            ranking: index
                .get(&(u.name.as_str(), u.country.as_str()))
                .map(|entry| (*entry).clone()),
        })
        .collect();

    let matched = enriched.iter().filter(|e| e.ranking.is_some()).count();
    tracing::info!(
        "🔗 Joined {} universities with rankings ({} matched)",
        enriched.len(),
        matched
    );

    enriched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uni(name: &str, country: &str) -> University {
        University {
            name: name.to_string(),
            country: country.to_string(),
            state_province: None,
            domains: vec![],
            web_pages: vec![],
        }
    }

    fn ranked(name: &str, location: &str, rank: Option<i64>) -> RankingEntry {
        RankingEntry {
            institution_name: name.to_string(),
            location: location.to_string(),
            rank,
            overall_score: None,
            academic_reputation_score: None,
            employer_reputation_score: None,
        }
    }

    #[test]
    fn preserves_cardinality_and_order() {
        let universities = vec![uni("A", "X"), uni("B", "X"), uni("A", "Y")];
        let rankings = vec![ranked("A", "X", Some(3)), ranked("Z", "X", Some(1))];

        let joined = join(&universities, &rankings);

        assert_eq!(joined.len(), universities.len());
        let names: Vec<&str> = joined.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["A", "B", "A"]);
        assert_eq!(joined[0].rank(), Some(3));
        assert_eq!(joined[1].ranking, None);
        assert_eq!(joined[2].ranking, None);
    }

    #[test]
    fn first_duplicate_ranking_wins() {
        let universities = vec![uni("A", "X")];
        let rankings = vec![ranked("A", "X", Some(10)), ranked("A", "X", Some(2))];

        let joined = join(&universities, &rankings);

        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].rank(), Some(10));
    }

    #[test]
    fn match_is_case_sensitive() {
        let joined = join(&[uni("Test U", "Testland")], &[ranked("test u", "Testland", Some(1))]);
        assert_eq!(joined[0].ranking, None);
    }

    #[test]
    fn empty_rankings_keep_all_rows() {
        let joined = join(&[uni("A", "X"), uni("B", "Y")], &[]);
        assert_eq!(joined.len(), 2);
        assert!(joined.iter().all(|e| e.ranking.is_none()));
    }
}
