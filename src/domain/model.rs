use serde::{Deserialize, Serialize};

/// 讀進來尚未正規化的表格：標頭 + 每列字串
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Renames `from` to `to` when `from` exists. Returns whether a rename happened.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.headers[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// 欄位不存在時補上一個全空的欄位，回傳欄位索引
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.headers.push(name.to_string());
        let idx = self.headers.len() - 1;
        for row in &mut self.rows {
            row.resize(idx + 1, String::new());
        }
        idx
    }

    /// Cells past the end of a short row read as empty.
    pub fn cell<'a>(row: &'a [String], idx: Option<usize>) -> &'a str {
        idx.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct University {
    pub name: String,
    pub country: String,
    pub state_province: Option<String>,
    pub domains: Vec<String>,
    pub web_pages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub institution_name: String,
    pub location: String,
    pub rank: Option<i64>,
    pub overall_score: Option<f64>,
    pub academic_reputation_score: Option<f64>,
    pub employer_reputation_score: Option<f64>,
}

/// 目錄資料加上排名欄位；沒有對應排名時 `ranking` 為 `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedUniversity {
    #[serde(flatten)]
    pub university: University,
    pub ranking: Option<RankingEntry>,
}

impl EnrichedUniversity {
    pub fn name(&self) -> &str {
        &self.university.name
    }

    pub fn rank(&self) -> Option<i64> {
        self.ranking.as_ref().and_then(|r| r.rank)
    }

    pub fn overall_score(&self) -> Option<f64> {
        self.ranking.as_ref().and_then(|r| r.overall_score)
    }

    pub fn academic_reputation_score(&self) -> Option<f64> {
        self.ranking.as_ref().and_then(|r| r.academic_reputation_score)
    }

    pub fn employer_reputation_score(&self) -> Option<f64> {
        self.ranking.as_ref().and_then(|r| r.employer_reputation_score)
    }
}

/// 聚合結果的一列，例如 (國家, 數量)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRow {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_universities: usize,
    pub countries_represented: usize,
    pub unique_domains: usize,
}
