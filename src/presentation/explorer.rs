use crate::core::query::QueryEngine;
use crate::domain::filter::{FilterState, ALL_STATES};
use crate::domain::model::{RankingEntry, Summary, University};
use crate::presentation::{join_or_na, View, NOT_AVAILABLE};
use serde::Serialize;
use std::io::Write;

pub const NO_RESULTS_MESSAGE: &str =
    "No universities found matching your criteria. Try adjusting your filters.";

#[derive(Debug, Clone, Serialize)]
pub struct ExplorerView {
    pub country: String,
    pub state: String,
    pub search: Option<String>,
    pub summary: Summary,
    pub top_n: usize,
    pub top_ranked: Vec<RankingEntry>,
    pub universities: Vec<University>,
}

impl ExplorerView {
    pub fn build(engine: &QueryEngine<'_>, filters: &FilterState, top_n: usize) -> Self {
        let universities = engine.filter_state(filters);
        let country = filters.country.clone().unwrap_or_default();

        Self {
            summary: engine.summary(&universities),
            top_n,
            top_ranked: engine.top_n_by_rank(&country, top_n),
            state: filters.state.to_string(),
            search: filters.search_query().map(str::to_string),
            country,
            universities,
        }
    }
}

impl View for ExplorerView {
    fn render_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "🌍 Global University Explorer")?;
        writeln!(
            out,
            "Total Universities: {} | Countries Represented: {} | Unique Domains: {}",
            self.summary.total_universities,
            self.summary.countries_represented,
            self.summary.unique_domains
        )?;

        if !self.top_ranked.is_empty() {
            writeln!(out)?;
            writeln!(
                out,
                "🏆 Top {} Universities in {} (QS 2025 Rankings)",
                self.top_n,
                self.country
            )?;
            for entry in &self.top_ranked {
                let rank = entry
                    .rank
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string());
                writeln!(out, "  {}", entry.institution_name)?;
                writeln!(out, "    QS Rank: {}", rank)?;
                writeln!(out, "    Location: {}", entry.location)?;
            }
        }

        writeln!(out)?;
        if self.universities.is_empty() {
            writeln!(out, "⚠️ {}", NO_RESULTS_MESSAGE)?;
            return Ok(());
        }

        let scope = if self.state == ALL_STATES {
            String::new()
        } else {
            format!(" ({})", self.state)
        };
        writeln!(out, "🏛️ Universities in {}{}", self.country, scope)?;
        for u in &self.universities {
            writeln!(out, "  {}", u.name)?;
            let location = if u.country.is_empty() {
                "Not specified"
            } else {
                u.country.as_str()
            };
            writeln!(out, "    Location: {}", location)?;
            writeln!(out, "    Domains: {}", join_or_na(&u.domains, ", "))?;
            writeln!(out, "    Website: {}", join_or_na(&u.web_pages, " | "))?;
        }
        Ok(())
    }
}
