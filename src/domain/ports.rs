use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<String>;
}

/// 文字編碼；排名表預設為 Latin-1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    Utf8,
    #[default]
    Latin1,
}

impl TextEncoding {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "utf8" => Some(Self::Utf8),
            "latin1" | "iso88591" => Some(Self::Latin1),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "Latin-1",
        }
    }
}

pub trait ConfigProvider {
    fn universities_path(&self) -> &str;
    fn rankings_path(&self) -> &str;
    fn rankings_encoding(&self) -> TextEncoding;
    fn output_path(&self) -> &str;
    fn export_filename(&self) -> &str;
}
