//! Process-wide dataset cache.
//!
//! The dataset is built once, at the first call to [`get_or_load`], and is
//! read-only afterwards. There is no way to replace or mutate it; a new
//! dataset requires a new process. Tests should build [`Dataset`] values
//! directly instead of going through here.

use crate::core::dataset::Dataset;
use crate::utils::error::Result;
use std::sync::OnceLock;

static DATASET: OnceLock<Dataset> = OnceLock::new();

pub fn get_or_load<F>(loader: F) -> Result<&'static Dataset>
where
    F: FnOnce() -> Result<Dataset>,
{
    if let Some(dataset) = DATASET.get() {
        tracing::debug!("Using cached dataset");
        return Ok(dataset);
    }
    let dataset = loader()?;
    Ok(DATASET.get_or_init(|| dataset))
}

pub fn get() -> Option<&'static Dataset> {
    DATASET.get()
}
