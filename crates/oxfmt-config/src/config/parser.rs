//! Reading and parsing configuration files
//!
//! `.jsonc` files go through json5 (comments and trailing commas allowed),
//! everything else through strict serde_json.

use std::path::Path;

use serde_json::{Map, Value};
use tokio::fs;

use super::document::ConfigDocument;
use crate::error::LoadFailure;

/// Syntax accepted for a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// Strict JSON
    Json,
    /// JSON with comments and trailing commas
    Jsonc,
}

impl ConfigFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonc") => ConfigFormat::Jsonc,
            _ => ConfigFormat::Json,
        }
    }
}

/// Parse configuration text; the top level must be an object
pub fn parse_document(content: &str, format: ConfigFormat) -> Result<ConfigDocument, LoadFailure> {
    let options: Map<String, Value> = match format {
        ConfigFormat::Json => serde_json::from_str(content)?,
        ConfigFormat::Jsonc => json5::from_str(content)?,
    };
    Ok(ConfigDocument::from_map(options))
}

/// Read the whole file at `path` and parse it according to its extension
pub async fn read_document(path: &Path) -> Result<ConfigDocument, LoadFailure> {
    let content = fs::read_to_string(path).await?;
    let format = ConfigFormat::from_path(path);
    tracing::trace!("Parsing {} as {:?}", path.display(), format);
    parse_document(&content, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("/a/.oxfmtrc.jsonc")),
            ConfigFormat::Jsonc
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("/a/.oxfmtrc.json")),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("custom-config")),
            ConfigFormat::Json
        );
    }

    #[test]
    fn test_jsonc_line_comment() {
        let doc = parse_document(
            "{//c\n\"singleQuote\":true,\n\"tabWidth\":4\n}",
            ConfigFormat::Jsonc,
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({ "singleQuote": true, "tabWidth": 4 })
        );
    }

    #[test]
    fn test_jsonc_block_comment_and_trailing_comma() {
        let doc = parse_document(
            "{\n  /* width */\n  \"printWidth\": 100,\n  \"semi\": false,\n}",
            ConfigFormat::Jsonc,
        )
        .unwrap();

        assert_eq!(doc.get("semi"), Some(&json!(false)));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_json_rejects_comments() {
        let result = parse_document("{//c\n\"semi\":true}", ConfigFormat::Json);
        assert!(matches!(result, Err(LoadFailure::Json(_))));
    }

    #[test]
    fn test_invalid_json() {
        let result = parse_document("{ invalid json }", ConfigFormat::Json);
        assert!(matches!(result, Err(LoadFailure::Json(_))));

        let result = parse_document("{ invalid json }", ConfigFormat::Jsonc);
        assert!(matches!(result, Err(LoadFailure::Jsonc(_))));
    }

    #[test]
    fn test_top_level_must_be_object() {
        assert!(parse_document("[1, 2]", ConfigFormat::Json).is_err());
        assert!(parse_document("42", ConfigFormat::Jsonc).is_err());
    }

    #[tokio::test]
    async fn test_read_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".oxfmtrc.json");
        std::fs::write(&path, r#"{"printWidth": 80, "semi": false}"#).unwrap();

        let doc = read_document(&path).await.unwrap();
        assert_eq!(doc.get("printWidth"), Some(&json!(80)));
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_document(&temp_dir.path().join("missing.json")).await;
        assert!(matches!(result, Err(LoadFailure::Read(_))));
    }
}
