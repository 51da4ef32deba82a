use crate::core::dataset::Dataset;
use crate::domain::filter::{FilterState, StateFilter, ALL_STATES};
use crate::domain::model::{EnrichedUniversity, FrequencyRow, RankingEntry, Summary, University};
use std::collections::{BTreeSet, HashMap};

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_FREQUENCY_LIMIT: usize = 10;

/// 比較結果：名稱與找到的資料 (找不到時為 `None`)
pub type Comparison<'a> = (String, Option<&'a EnrichedUniversity>);

/// Read-only queries over a loaded [`Dataset`].
///
/// Every operation is total: empty inputs and unknown keys give empty
/// results. Results are new collections; the dataset is never modified.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    dataset: &'a Dataset,
    frequency_limit: usize,
}

impl<'a> QueryEngine<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            frequency_limit: DEFAULT_FREQUENCY_LIMIT,
        }
    }

    pub fn with_frequency_limit(mut self, limit: usize) -> Self {
        self.frequency_limit = limit;
        self
    }

    pub fn filter(
        &self,
        country: &str,
        state: &StateFilter,
        name_substring: Option<&str>,
    ) -> Vec<University> {
        let needle = name_substring
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let filtered: Vec<University> = self
            .dataset
            .universities
            .iter()
            .filter(|u| u.country == country)
            .filter(|u| state.matches(u.state_province.as_deref()))
            .filter(|u| match &needle {
                Some(needle) => u.name.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .cloned()
            .collect();

        tracing::debug!(
            "Filter country={:?} state={} search={:?} -> {} rows",
            country,
            state,
            name_substring,
            filtered.len()
        );
        filtered
    }

    /// 依完整的篩選狀態過濾；沒有選國家時回傳空集合
    pub fn filter_state(&self, state: &FilterState) -> Vec<University> {
        match state.country.as_deref() {
            Some(country) => self.filter(country, &state.state, state.search_query()),
            None => Vec::new(),
        }
    }

    /// Entries for `country` with a rank, smallest rank first. Ties keep
    /// input order.
    pub fn top_n_by_rank(&self, country: &str, n: usize) -> Vec<RankingEntry> {
        let mut ranked: Vec<&RankingEntry> = self
            .dataset
            .rankings
            .iter()
            .filter(|e| e.location == country && e.rank.is_some())
            .collect();
        ranked.sort_by_key(|e| e.rank);
        ranked.into_iter().take(n).cloned().collect()
    }

    pub fn comparable_names(&self) -> Vec<String> {
        self.dataset
            .enriched
            .iter()
            .filter(|e| e.rank().is_some() && !e.name().is_empty())
            .map(|e| e.name().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Looks up each name in the enriched collection. Blank and repeated
    /// names are skipped; the order of the remaining names is kept. The UI
    /// caps the selection at three names, this method does not.
    ///
    /// A name shared by several directory records resolves to the first
    /// ranked one, so every name from [`Self::comparable_names`] finds its
    /// ranking.
    pub fn compare<S: AsRef<str>>(&self, names: &[S]) -> Vec<Comparison<'a>> {
        let mut results: Vec<Comparison<'a>> = Vec::new();
        for name in names.iter().map(AsRef::as_ref) {
            if name.is_empty() || results.iter().any(|(seen, _)| seen == name) {
                continue;
            }
            let mut matches = self.dataset.enriched.iter().filter(|e| e.name() == name);
            let first = matches.clone().next();
            let found = matches.find(|e| e.rank().is_some()).or(first);
            if found.is_none() {
                tracing::debug!("No data found for '{}'", name);
            }
            results.push((name.to_string(), found));
        }
        results
    }

    pub fn country_frequency(&self) -> Vec<FrequencyRow> {
        top_counts(
            self.dataset
                .universities
                .iter()
                .map(|u| u.country.as_str()),
            self.frequency_limit,
        )
    }

    /// Counts every domain occurrence, so a university with three domains
    /// contributes three counts.
    pub fn domain_frequency(&self) -> Vec<FrequencyRow> {
        top_counts(
            self.dataset
                .universities
                .iter()
                .flat_map(|u| u.domains.iter().map(String::as_str)),
            self.frequency_limit,
        )
    }

    pub fn countries(&self) -> Vec<String> {
        self.dataset
            .universities
            .iter()
            .filter(|u| !u.country.is_empty())
            .map(|u| u.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// `"All"` followed by the sorted states present for `country`.
    pub fn state_options(&self, country: &str) -> Vec<String> {
        let states: BTreeSet<&str> = self
            .dataset
            .universities
            .iter()
            .filter(|u| u.country == country)
            .filter_map(|u| u.state_province.as_deref())
            .collect();

        std::iter::once(ALL_STATES.to_string())
            .chain(states.into_iter().map(str::to_string))
            .collect()
    }

    pub fn domain_options(&self) -> Vec<String> {
        self.dataset
            .universities
            .iter()
            .flat_map(|u| u.domains.iter())
            .filter(|d| !d.is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn summary(&self, filtered: &[University]) -> Summary {
        Summary {
            total_universities: filtered.len(),
            countries_represented: self.countries().len(),
            unique_domains: self.domain_options().len(),
        }
    }
}

/// 依次數遞減排序，次數相同時保留第一次出現的順序
fn top_counts<'s, I>(values: I, limit: usize) -> Vec<FrequencyRow>
where
    I: Iterator<Item = &'s str>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.filter(|v| !v.is_empty()) {
        let count = counts.entry(value).or_insert_with(|| {
            order.push(value);
            0
        });
        *count += 1;
    }

    let mut rows: Vec<FrequencyRow> = order
        .into_iter()
        .map(|label| FrequencyRow {
            label: label.to_string(),
            count: counts[label],
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows.truncate(limit);
    rows
}
