use crate::core::query::QueryEngine;
use crate::domain::model::EnrichedUniversity;
use crate::presentation::{join_or_na, View, NOT_AVAILABLE};
use serde::Serialize;
use std::io::Write;
use url::Url;

pub const NOT_FOUND_MESSAGE: &str = "Data not found for this university.";
pub const EMPTY_SELECTION_MESSAGE: &str =
    "Select universities from the dropdowns above to compare them.";

#[derive(Debug, Clone, Serialize)]
pub struct CompareView {
    pub cards: Vec<CompareCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareCard {
    pub name: String,
    pub details: Option<CardDetails>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardDetails {
    pub country: String,
    pub state_province: Option<String>,
    pub websites: Vec<String>,
    pub domains: Vec<String>,
    pub rank: Option<i64>,
    pub overall_score: Option<f64>,
    pub academic_reputation_score: Option<f64>,
    pub employer_reputation_score: Option<f64>,
}

impl CardDetails {
    fn from_enriched(entry: &EnrichedUniversity) -> Self {
        let u = &entry.university;
        Self {
            country: title_case(&u.country),
            state_province: u.state_province.clone(),
            websites: u.web_pages.iter().map(|page| website_host(page)).collect(),
            domains: u.domains.clone(),
            rank: entry.rank(),
            overall_score: entry.overall_score(),
            academic_reputation_score: entry.academic_reputation_score(),
            employer_reputation_score: entry.employer_reputation_score(),
        }
    }
}

impl CompareView {
    pub fn build<S: AsRef<str>>(engine: &QueryEngine<'_>, names: &[S]) -> Self {
        let cards = engine
            .compare(names)
            .into_iter()
            .map(|(name, found)| CompareCard {
                name,
                details: found.map(CardDetails::from_enriched),
            })
            .collect();
        Self { cards }
    }
}

impl View for CompareView {
    fn render_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "⚖️ Compare Universities")?;
        if self.cards.is_empty() {
            writeln!(out, "ℹ️ {}", EMPTY_SELECTION_MESSAGE)?;
            return Ok(());
        }

        writeln!(out, "Comparison Results")?;
        for card in &self.cards {
            writeln!(out)?;
            writeln!(out, "  {}", card.name)?;
            let Some(details) = &card.details else {
                writeln!(out, "    {}", NOT_FOUND_MESSAGE)?;
                continue;
            };

            writeln!(out, "    Country: {}", details.country)?;
            if let Some(state) = &details.state_province {
                writeln!(out, "    State/Province: {}", state)?;
            }
            writeln!(out, "    Website: {}", join_or_na(&details.websites, " | "))?;
            writeln!(out, "    Domains: {}", join_or_na(&details.domains, " | "))?;
            writeln!(out, "    QS Rank (2025): {}", display_rank(details.rank))?;
            writeln!(out, "    Overall Score: {}", display_score(details.overall_score))?;
            writeln!(
                out,
                "    Academic Rep. Score: {}",
                display_score(details.academic_reputation_score)
            )?;
            writeln!(
                out,
                "    Employer Rep. Score: {}",
                display_score(details.employer_reputation_score)
            )?;
        }
        Ok(())
    }
}

fn display_rank(rank: Option<i64>) -> String {
    rank.map(|r| r.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn display_score(score: Option<f64>) -> String {
    score
        .map(|s| format!("{:.1}", s))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// 只顯示網址的主機名稱；無法解析時取 `//` 之後到第一個 `/` 之前
pub fn website_host(page: &str) -> String {
    if let Some(host) = Url::parse(page).ok().and_then(|u| u.host_str().map(str::to_string)) {
        return host;
    }
    let after_scheme = page.rsplit("//").next().unwrap_or(page);
    after_scheme
        .split('/')
        .next()
        .unwrap_or(after_scheme)
        .to_string()
}

/// Uppercases the first letter of every word and lowercases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if previous_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    out
}
