use serde::{Deserialize, Serialize};
use std::fmt;

pub const ALL_STATES: &str = "All";
pub const COMPARE_SLOTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StateFilter {
    #[default]
    All,
    Only(String),
}

impl StateFilter {
    /// `"All"` 是不篩選州/省的哨兵值
    pub fn parse(value: &str) -> Self {
        if value == ALL_STATES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn matches(&self, state: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => state == Some(wanted.as_str()),
        }
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_STATES),
            Self::Only(state) => f.write_str(state),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Explorer,
    Compare,
    Visualize,
}

/// 使用者目前的篩選狀態；`reset` 回到預設值
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub country: Option<String>,
    pub state: StateFilter,
    pub search: Option<String>,
    pub comparisons: [Option<String>; COMPARE_SLOTS],
    pub view: ViewMode,
}

impl FilterState {
    pub fn new(country: Option<String>) -> Self {
        Self {
            country,
            ..Self::default()
        }
    }

    /// Clears every filter. The country falls back to `default_country`,
    /// which callers pass as the first entry of the country selector.
    pub fn reset(&mut self, default_country: Option<&str>) {
        *self = Self::new(default_country.map(str::to_string));
    }

    pub fn set_comparison(&mut self, slot: usize, name: Option<String>) -> bool {
        match self.comparisons.get_mut(slot) {
            Some(entry) => {
                *entry = name.filter(|n| !n.trim().is_empty());
                true
            }
            None => false,
        }
    }

    /// Non-empty selections in slot order, duplicates dropped.
    pub fn selected_comparisons(&self) -> Vec<String> {
        let mut selected: Vec<String> = Vec::new();
        for name in self.comparisons.iter().flatten() {
            if !name.is_empty() && !selected.contains(name) {
                selected.push(name.clone());
            }
        }
        selected
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search.as_deref().filter(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_filter_sentinel() {
        assert_eq!(StateFilter::parse("All"), StateFilter::All);
        assert_eq!(StateFilter::parse("Ohio"), StateFilter::Only("Ohio".to_string()));
        assert!(StateFilter::All.matches(None));
        assert!(StateFilter::parse("Ohio").matches(Some("Ohio")));
        assert!(!StateFilter::parse("Ohio").matches(None));
        assert_eq!(StateFilter::parse("Ohio").to_string(), "Ohio");
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = FilterState::new(Some("Testland".to_string()));
        state.state = StateFilter::parse("North");
        state.search = Some("tech".to_string());
        state.set_comparison(0, Some("Test U".to_string()));
        state.view = ViewMode::Compare;

        state.reset(Some("Albania"));

        assert_eq!(state.country.as_deref(), Some("Albania"));
        assert_eq!(state.state, StateFilter::All);
        assert!(state.search_query().is_none());
        assert!(state.selected_comparisons().is_empty());
        assert_eq!(state.view, ViewMode::Explorer);
    }

    #[test]
    fn selected_comparisons_skip_blank_and_duplicates() {
        let mut state = FilterState::default();
        state.set_comparison(0, Some("B U".to_string()));
        state.set_comparison(1, Some("  ".to_string()));
        state.set_comparison(2, Some("B U".to_string()));
        assert!(!state.set_comparison(3, Some("C U".to_string())));

        assert_eq!(state.selected_comparisons(), vec!["B U".to_string()]);
    }
}
