use crate::core::export::EXPORT_FILENAME;
use crate::core::query::{DEFAULT_FREQUENCY_LIMIT, DEFAULT_TOP_N};
use crate::domain::filter::COMPARE_SLOTS;
use crate::domain::ports::{ConfigProvider, TextEncoding};
use crate::utils::error::{ExplorerError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_UNIVERSITIES_PATH: &str = "list_of_univs.csv";
pub const DEFAULT_RANKINGS_PATH: &str = "QS World University Rankings 2025 (Top global universities).csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub view: ViewConfig,
    pub export: ExportConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub base_path: String,
    pub universities_path: String,
    pub rankings_path: String,
    pub rankings_encoding: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_path: ".".to_string(),
            universities_path: DEFAULT_UNIVERSITIES_PATH.to_string(),
            rankings_path: DEFAULT_RANKINGS_PATH.to_string(),
            rankings_encoding: "latin1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub top_n: usize,
    pub frequency_limit: usize,
    pub max_compare: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            frequency_limit: DEFAULT_FREQUENCY_LIMIT,
            max_compare: COMPARE_SLOTS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: ".".to_string(),
            filename: EXPORT_FILENAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ExplorerError::ConfigError {
            message: format!("cannot read '{}': {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ExplorerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Option<Regex>> = OnceLock::new();
        let Some(re) = ENV_VAR
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").ok())
            .as_ref()
        else {
            return content.to_string();
        };

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }

    pub fn encoding(&self) -> TextEncoding {
        TextEncoding::parse(&self.data.rankings_encoding).unwrap_or_default()
    }
}

impl ConfigProvider for AppConfig {
    fn universities_path(&self) -> &str {
        &self.data.universities_path
    }

    fn rankings_path(&self) -> &str {
        &self.data.rankings_path
    }

    fn rankings_encoding(&self) -> TextEncoding {
        self.encoding()
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn export_filename(&self) -> &str {
        &self.export.filename
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data.base_path", &self.data.base_path)?;
        validation::validate_path("data.universities_path", &self.data.universities_path)?;
        validation::validate_path("data.rankings_path", &self.data.rankings_path)?;
        validation::validate_file_extension("data.universities_path", &self.data.universities_path, &["csv"])?;
        validation::validate_file_extension("data.rankings_path", &self.data.rankings_path, &["csv"])?;

        if TextEncoding::parse(&self.data.rankings_encoding).is_none() {
            validation::validate_one_of(
                "data.rankings_encoding",
                &self.data.rankings_encoding,
                &["latin1", "utf8"],
            )?;
        }

        validation::validate_positive_number("view.top_n", self.view.top_n, 1)?;
        validation::validate_positive_number("view.frequency_limit", self.view.frequency_limit, 1)?;
        validation::validate_range("view.max_compare", self.view.max_compare, 1, COMPARE_SLOTS)?;

        validation::validate_path("export.output_path", &self.export.output_path)?;
        validation::validate_file_extension("export.filename", &self.export.filename, &["csv"])?;

        Ok(())
    }
}
