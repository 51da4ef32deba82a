//! Explorer, Compare and Visualize views.
//!
//! Each view is a serializable snapshot built from [`QueryEngine`] results,
//! rendered either as plain text for a terminal or as JSON.
//!
//! [`QueryEngine`]: crate::core::query::QueryEngine

pub mod compare;
pub mod explorer;
pub mod visualize;

use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

pub use compare::CompareView;
pub use explorer::ExplorerView;
pub use visualize::VisualizeView;

pub const NOT_AVAILABLE: &str = "N/A";

pub trait View: Serialize {
    fn render_text<W: Write>(&self, out: &mut W) -> std::io::Result<()>;

    fn render_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

pub(crate) fn join_or_na(items: &[String], separator: &str) -> String {
    if items.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        items.join(separator)
    }
}
