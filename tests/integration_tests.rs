use anyhow::Result;
use tempfile::TempDir;
use uni_explorer::core::export::{export_to_storage, EXPORT_FILENAME};
use uni_explorer::domain::filter::{FilterState, StateFilter};
use uni_explorer::domain::ports::{ConfigProvider, Storage};
use uni_explorer::presentation::{CompareView, ExplorerView, View, VisualizeView};
use uni_explorer::{AppConfig, Dataset, ExplorerError, LocalStorage, QueryEngine};

const DIRECTORY_CSV: &str = "\
web_pages,name,alpha_two_code,State-Province,domains,country
\"['http://test.edu']\",Test U,TL,,\"['test.edu']\",Testland
\"['http://north.edu', 'http://www.north.edu']\",North Tech,TL,North,\"['north.edu', 'nt.edu']\",Testland
\"[http://broken.edu\",Broken College,TL,nan,\"['broken.edu'\",Testland
\"['http://other.edu']\",Other U,OL,None,\"['other.edu']\",Otherland
";

fn rankings_latin1() -> Vec<u8> {
    let mut bytes = b"RANK_2025,Institution_Name,Location,Overall_Score,Academic_Reputation_Score,Employer_Reputation_Score\n".to_vec();
    bytes.extend_from_slice(b"12, Test U , Testland ,88.5,90,70.2\n");
    bytes.extend_from_slice(b"=40,North Tech,Testland,50,,\n");
    bytes.extend_from_slice(b"3,Other U,Otherland,99,99,99\n");
    // "Universit\xe9 Libre" in Latin-1
    bytes.extend_from_slice(b"7,Universit\xe9 Libre,Otherland,95,,\n");
    bytes
}

fn write_fixture(dir: &TempDir) -> Result<AppConfig> {
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    storage.write_file("univs.csv", DIRECTORY_CSV.as_bytes())?;
    storage.write_file("rankings.csv", &rankings_latin1())?;

    let base = dir.path().to_str().unwrap().replace('\\', "/");
    let config = AppConfig::from_toml_str(&format!(
        r#"
[data]
base_path = "{base}"
universities_path = "univs.csv"
rankings_path = "rankings.csv"

[export]
output_path = "{base}/out"
"#
    ))?;
    Ok(config)
}

#[test]
fn test_end_to_end_load_and_query() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = write_fixture(&temp_dir)?;
    let storage = LocalStorage::new(config.data.base_path.clone());

    let dataset = Dataset::load(&storage, &config)?;
    let engine = QueryEngine::new(&dataset);

    assert_eq!(dataset.universities.len(), 4);
    assert_eq!(dataset.enriched.len(), 4);

    let test_u = &dataset.universities[0];
    assert_eq!(test_u.state_province, None);
    assert_eq!(test_u.domains, vec!["test.edu"]);
    assert_eq!(test_u.web_pages, vec!["http://test.edu"]);

    // 壞掉的 list literal 仍然是序列
    let broken = &dataset.universities[2];
    assert_eq!(broken.domains, vec!["broken.edu"]);
    assert_eq!(broken.web_pages, vec!["http://broken.edu"]);
    assert_eq!(broken.state_province, None);

    assert_eq!(dataset.enriched[0].rank(), Some(12));
    assert_eq!(dataset.enriched[1].rank(), None);
    assert!(dataset.enriched[1].ranking.is_some());

    assert!(dataset
        .rankings
        .iter()
        .any(|r| r.institution_name == "Université Libre"));

    let testland = engine.filter("Testland", &StateFilter::All, None);
    assert_eq!(testland.len(), 3);
    assert_eq!(engine.filter("Testland", &StateFilter::parse("North"), None).len(), 1);
    assert_eq!(engine.state_options("Testland"), vec!["All", "North"]);

    let top = engine.top_n_by_rank("Otherland", 5);
    let names: Vec<&str> = top.iter().map(|e| e.institution_name.as_str()).collect();
    assert_eq!(names, vec!["Other U", "Université Libre"]);

    assert_eq!(engine.comparable_names(), vec!["Other U", "Test U"]);

    let compared = engine.compare(&["Test U", "Nonexistent U"]);
    assert_eq!(compared[0].1.and_then(|e| e.rank()), Some(12));
    assert!(compared[1].1.is_none());

    Ok(())
}

#[test]
fn test_views_render_from_loaded_dataset() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = write_fixture(&temp_dir)?;
    let storage = LocalStorage::new(config.data.base_path.clone());
    let dataset = Dataset::load(&storage, &config)?;
    let engine = QueryEngine::new(&dataset);

    let filters = FilterState::new(Some("Testland".to_string()));

    let mut out = Vec::new();
    ExplorerView::build(&engine, &filters, config.view.top_n).render_text(&mut out)?;
    CompareView::build(&engine, &["Test U"]).render_text(&mut out)?;
    VisualizeView::build(&engine, &filters).render_text(&mut out)?;
    let text = String::from_utf8(out)?;

    assert!(text.contains(&format!("Top {} Universities in Testland", config.view.top_n)));
    assert!(text.contains("Website: http://north.edu | http://www.north.edu"));
    assert!(text.contains("QS Rank (2025): 12"));
    assert!(text.contains("Showing 3 universities"));

    Ok(())
}

#[test]
fn test_export_snapshot_reloads() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = write_fixture(&temp_dir)?;
    let storage = LocalStorage::new(config.data.base_path.clone());
    let dataset = Dataset::load(&storage, &config)?;
    let engine = QueryEngine::new(&dataset);

    let filtered = engine.filter("Testland", &StateFilter::All, Some("tech"));
    let out_storage = LocalStorage::new(config.output_path().to_string());
    let path = export_to_storage(&out_storage, config.export_filename(), &filtered)?;

    assert!(path.ends_with(EXPORT_FILENAME));
    let reloaded_config = AppConfig::from_toml_str(&format!(
        r#"
[data]
universities_path = "{}"
rankings_path = "rankings.csv"
"#,
        EXPORT_FILENAME
    ))?;

    // 匯出檔當作目錄來源，排名檔沿用原始目錄
    struct SplitStorage<'a> {
        export: &'a LocalStorage,
        data: &'a LocalStorage,
    }
    impl Storage for SplitStorage<'_> {
        fn read_file(&self, path: &str) -> uni_explorer::Result<Vec<u8>> {
            if path == EXPORT_FILENAME {
                self.export.read_file(path)
            } else {
                self.data.read_file(path)
            }
        }

        fn write_file(&self, path: &str, data: &[u8]) -> uni_explorer::Result<String> {
            self.export.write_file(path, data)
        }
    }

    let split = SplitStorage {
        export: &out_storage,
        data: &storage,
    };
    let reloaded = Dataset::load(&split, &reloaded_config)?;

    assert_eq!(reloaded.universities, filtered);
    Ok(())
}

#[test]
fn test_missing_source_file_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let config = AppConfig::default();

    match Dataset::load(&storage, &config) {
        Err(ExplorerError::MissingSourceFile { path, .. }) => {
            assert_eq!(path, "list_of_univs.csv");
        }
        other => panic!("expected MissingSourceFile, got {:?}", other.map(|d| d.universities.len())),
    }
    Ok(())
}
