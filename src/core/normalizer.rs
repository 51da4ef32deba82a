use crate::core::list_literal::decode_list;
use crate::domain::model::{RawTable, University};
use crate::utils::error::{ExplorerError, Result};

pub const NAME_COLUMN: &str = "name";
pub const COUNTRY_COLUMN: &str = "country";
pub const STATE_COLUMN: &str = "state-province";
pub const STATE_COLUMN_ALT: &str = "State-Province";
pub const DOMAINS_COLUMN: &str = "domains";
pub const WEB_PAGES_COLUMN: &str = "web_pages";

/// 這些字串在州/省欄位中視為缺值
const STATE_PLACEHOLDERS: [&str; 3] = ["nan", "None", ""];

/// 將大學目錄原始資料正規化為 [`University`]
///
/// `source` 只用於錯誤訊息。缺少 `name` 或 `country` 欄位會回傳
/// [`ExplorerError::MissingColumn`]；州/省欄位不存在時補成缺值。
pub fn normalize(mut table: RawTable, source: &str) -> Result<Vec<University>> {
    if table.rename_column(STATE_COLUMN_ALT, STATE_COLUMN) {
        tracing::debug!("Renamed column '{}' to '{}'", STATE_COLUMN_ALT, STATE_COLUMN);
    }
    let state_idx = table.ensure_column(STATE_COLUMN);

    let name_idx = required_column(&table, NAME_COLUMN, source)?;
    let country_idx = required_column(&table, COUNTRY_COLUMN, source)?;
    let domains_idx = table.column_index(DOMAINS_COLUMN);
    let web_pages_idx = table.column_index(WEB_PAGES_COLUMN);

    let mut fallback_decodes = 0usize;
    let mut universities = Vec::with_capacity(table.len());

    for row in &table.rows {
        let mut list_field = |idx: Option<usize>| {
            let decoded = decode_list(RawTable::cell(row, idx));
            if decoded.used_fallback {
                fallback_decodes += 1;
            }
            decoded.items
        };
        let domains = list_field(domains_idx);
        let web_pages = list_field(web_pages_idx);

        universities.push(University {
            name: RawTable::cell(row, Some(name_idx)).to_string(),
            country: RawTable::cell(row, Some(country_idx)).to_string(),
            state_province: normalize_state(RawTable::cell(row, Some(state_idx))),
            domains,
            web_pages,
        });
    }

    if fallback_decodes > 0 {
        tracing::warn!(
            "⚠️ {} list cells in '{}' were not valid list literals; used fallback split",
            fallback_decodes,
            source
        );
    }
    tracing::debug!("Normalized {} university records from '{}'", universities.len(), source);

    Ok(universities)
}

pub fn normalize_state(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if STATE_PLACEHOLDERS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn required_column(table: &RawTable, column: &str, source: &str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| ExplorerError::MissingColumn {
            file: source.to_string(),
            column: column.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn headers(cells: &[&str]) -> Vec<String> {
        row(cells)
    }

    #[test]
    fn normalizes_example_row() {
        let table = RawTable::new(
            headers(&["name", "country", "state-province", "domains", "web_pages"]),
            vec![row(&["Test U", "Testland", "", "['test.edu']", "['http://test.edu']"])],
        );

        let universities = normalize(table, "list_of_univs.csv").unwrap();

        assert_eq!(universities.len(), 1);
        let u = &universities[0];
        assert_eq!(u.name, "Test U");
        assert_eq!(u.country, "Testland");
        assert_eq!(u.state_province, None);
        assert_eq!(u.domains, vec!["test.edu".to_string()]);
        assert_eq!(u.web_pages, vec!["http://test.edu".to_string()]);
    }

    #[test]
    fn renames_alternate_state_column_and_trims() {
        let table = RawTable::new(
            headers(&["name", "country", "State-Province", "domains", "web_pages"]),
            vec![
                row(&["A U", "Testland", "  North  ", "[]", "[]"]),
                row(&["B U", "Testland", "nan", "[]", "[]"]),
                row(&["C U", "Testland", "None", "[]", "[]"]),
            ],
        );

        let universities = normalize(table, "dir.csv").unwrap();

        assert_eq!(universities[0].state_province.as_deref(), Some("North"));
        assert_eq!(universities[1].state_province, None);
        assert_eq!(universities[2].state_province, None);
    }

    #[test]
    fn missing_optional_columns_are_synthesized() {
        let table = RawTable::new(
            headers(&["name", "country"]),
            vec![row(&["A U", "Testland"])],
        );

        let universities = normalize(table, "dir.csv").unwrap();

        assert_eq!(universities[0].state_province, None);
        assert!(universities[0].domains.is_empty());
        assert!(universities[0].web_pages.is_empty());
    }

    #[test]
    fn malformed_lists_are_still_sequences() {
        let table = RawTable::new(
            headers(&["name", "country", "domains", "web_pages"]),
            vec![row(&["A U", "Testland", "[a.edu, b.edu", "http://a.edu"])],
        );

        let universities = normalize(table, "dir.csv").unwrap();

        assert_eq!(universities[0].domains, vec!["a.edu".to_string(), "b.edu".to_string()]);
        assert_eq!(universities[0].web_pages, vec!["http://a.edu".to_string()]);
    }

    #[test]
    fn missing_name_column_is_an_error() {
        let table = RawTable::new(headers(&["country"]), vec![row(&["Testland"])]);

        match normalize(table, "dir.csv") {
            Err(ExplorerError::MissingColumn { file, column }) => {
                assert_eq!(file, "dir.csv");
                assert_eq!(column, "name");
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }
}
