use crate::core::joiner::join;
use crate::core::normalizer::normalize;
use crate::core::rankings::load_rankings;
use crate::domain::model::{EnrichedUniversity, RankingEntry, RawTable, University};
use crate::domain::ports::{ConfigProvider, Storage, TextEncoding};
use crate::utils::error::{ExplorerError, Result};

/// 整個 session 共用的唯讀資料集
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub universities: Vec<University>,
    pub rankings: Vec<RankingEntry>,
    pub enriched: Vec<EnrichedUniversity>,
}

impl Dataset {
    pub fn from_parts(universities: Vec<University>, rankings: Vec<RankingEntry>) -> Self {
        let enriched = join(&universities, &rankings);
        Self {
            universities,
            rankings,
            enriched,
        }
    }

    /// 從 storage 讀取兩個來源檔並完成正規化與 join
    pub fn load<S: Storage, C: ConfigProvider>(storage: &S, config: &C) -> Result<Self> {
        let universities_path = config.universities_path();
        let rankings_path = config.rankings_path();

        tracing::info!("📥 Loading university directory from: {}", universities_path);
        let directory_text = read_source(storage, universities_path, TextEncoding::Utf8)?;
        let directory = parse_table(&directory_text)?;
        let universities = normalize(directory, universities_path)?;

        tracing::info!("📥 Loading rankings from: {}", rankings_path);
        let rankings_text = read_source(storage, rankings_path, config.rankings_encoding())?;
        let rankings_table = parse_table(&rankings_text)?;
        let rankings = load_rankings(&rankings_table, rankings_path)?;

        tracing::info!(
            "✅ Loaded {} universities and {} ranking entries",
            universities.len(),
            rankings.len()
        );

        Ok(Self::from_parts(universities, rankings))
    }
}

fn read_source<S: Storage>(storage: &S, path: &str, encoding: TextEncoding) -> Result<String> {
    let bytes = storage.read_file(path).map_err(|e| match e {
        ExplorerError::IoError(source) => ExplorerError::MissingSourceFile {
            path: path.to_string(),
            source,
        },
        other => other,
    })?;
    decode_text(bytes, encoding).ok_or_else(|| ExplorerError::EncodingError {
        path: path.to_string(),
        encoding: encoding.label().to_string(),
    })
}

/// Latin-1 maps each byte to the code point of the same value, so it never fails.
pub fn decode_text(bytes: Vec<u8>, encoding: TextEncoding) -> Option<String> {
    let text = match encoding {
        TextEncoding::Utf8 => String::from_utf8(bytes).ok()?,
        TextEncoding::Latin1 => bytes.into_iter().map(char::from).collect(),
    };
    Some(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// 解析含標頭列的 CSV。比標頭長的列會被截斷，短的列讀取時視為空值。
pub fn parse_table(text: &str) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .take(headers.len())
                .map(str::to_string)
                .collect(),
        );
    }

    Ok(RawTable::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MemoryStorage {
        files: HashMap<String, Vec<u8>>,
    }

    impl Storage for MemoryStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.get(path).cloned().ok_or_else(|| {
                ExplorerError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, _data: &[u8]) -> Result<String> {
            Ok(path.to_string())
        }
    }

    struct MockConfig;

    impl ConfigProvider for MockConfig {
        fn universities_path(&self) -> &str {
            "univs.csv"
        }

        fn rankings_path(&self) -> &str {
            "qs.csv"
        }

        fn rankings_encoding(&self) -> TextEncoding {
            TextEncoding::Latin1
        }

        fn output_path(&self) -> &str {
            "."
        }

        fn export_filename(&self) -> &str {
            "filtered_universities.csv"
        }
    }

    #[test]
    fn parse_table_handles_quoted_lists() {
        let text = "name,domains\n\"Test U\",\"['a.edu', 'b.edu']\"\nShort\n";
        let table = parse_table(text).unwrap();

        assert_eq!(table.headers, vec!["name", "domains"]);
        assert_eq!(table.rows[0][1], "['a.edu', 'b.edu']");
        assert_eq!(table.rows[1].len(), 1);
    }

    #[test]
    fn latin1_and_bom_decoding() {
        assert_eq!(
            decode_text(vec![b'S', 0xE3, b'o'], TextEncoding::Latin1).as_deref(),
            Some("São")
        );
        assert_eq!(
            decode_text("\u{feff}name".as_bytes().to_vec(), TextEncoding::Utf8).as_deref(),
            Some("name")
        );
        assert_eq!(decode_text(vec![0xFF, 0xFE], TextEncoding::Utf8), None);
    }

    #[test]
    fn load_joins_both_sources() {
        let mut files = HashMap::new();
        files.insert(
            "univs.csv".to_string(),
            b"name,country,state-province,domains,web_pages\nTest U,Testland,,['test.edu'],['http://test.edu']\n".to_vec(),
        );
        files.insert(
            "qs.csv".to_string(),
            b"RANK_2025,Institution_Name,Location,Overall_Score\n12, Test U , Testland ,70.1\n".to_vec(),
        );

        let dataset = Dataset::load(&MemoryStorage { files }, &MockConfig).unwrap();

        assert_eq!(dataset.universities.len(), 1);
        assert_eq!(dataset.enriched.len(), 1);
        assert_eq!(dataset.enriched[0].rank(), Some(12));
        assert_eq!(dataset.enriched[0].overall_score(), Some(70.1));
    }

    #[test]
    fn missing_source_file_names_the_path() {
        let storage = MemoryStorage {
            files: HashMap::new(),
        };

        match Dataset::load(&storage, &MockConfig) {
            Err(ExplorerError::MissingSourceFile { path, .. }) => assert_eq!(path, "univs.csv"),
            other => panic!("expected MissingSourceFile, got {:?}", other),
        }
    }
}
