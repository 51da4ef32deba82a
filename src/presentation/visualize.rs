use crate::core::query::QueryEngine;
use crate::domain::filter::FilterState;
use crate::domain::model::FrequencyRow;
use crate::presentation::View;
use serde::Serialize;
use std::io::Write;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Serialize)]
pub struct VisualizeView {
    pub top_countries: Vec<FrequencyRow>,
    pub top_domains: Vec<FrequencyRow>,
    pub filtered_count: usize,
}

impl VisualizeView {
    pub fn build(engine: &QueryEngine<'_>, filters: &FilterState) -> Self {
        Self {
            top_countries: engine.country_frequency(),
            top_domains: engine.domain_frequency(),
            filtered_count: engine.filter_state(filters).len(),
        }
    }
}

impl View for VisualizeView {
    fn render_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "📊 University Statistics Dashboard")?;
        writeln!(out)?;
        writeln!(out, "🌍 Top {} Countries by Number of Universities", self.top_countries.len())?;
        render_bars(out, &self.top_countries)?;
        writeln!(out)?;
        writeln!(out, "🕸️ Most Common Domains")?;
        render_bars(out, &self.top_domains)?;
        writeln!(out)?;
        writeln!(out, "📌 Filtered University Count")?;
        writeln!(
            out,
            "🔎 Showing {} universities based on applied filters.",
            self.filtered_count
        )?;
        Ok(())
    }
}

/// 以最大值為基準縮放的水平長條圖
fn render_bars<W: Write>(out: &mut W, rows: &[FrequencyRow]) -> std::io::Result<()> {
    let Some(max) = rows.iter().map(|r| r.count).max() else {
        return writeln!(out, "  (no data)");
    };
    let label_width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);

    for row in rows {
        let filled = if max == 0 {
            0
        } else {
            (row.count * BAR_WIDTH).div_ceil(max)
        };
        writeln!(
            out,
            "  {:<width$} {} {}",
            row.label,
            "█".repeat(filled),
            row.count,
            width = label_width
        )?;
    }
    Ok(())
}
