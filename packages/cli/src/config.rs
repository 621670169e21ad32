use mailclip_compiler_mjml::{FontDeclaration, SerializeOptions};
use mailclip_document::Attributes;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "mailclip.config.json";

/// Mailclip configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing .tree.json templates
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Where compiled .mjml files go (next to the sources when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,

    /// Replaces the built-in baseline font list when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_fonts: Option<Vec<FontDeclaration>>,

    /// Attributes for the mj-body wrapper
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub body_attributes: Attributes,
}

fn default_src_dir() -> String {
    "templates".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    pub fn to_serialize_options(&self) -> SerializeOptions {
        let mut options = SerializeOptions {
            body_attributes: self.body_attributes.clone(),
            ..SerializeOptions::default()
        };
        if let Some(fonts) = &self.baseline_fonts {
            options.baseline_fonts = fonts.clone();
        }
        options
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: None,
            baseline_fonts: None,
            body_attributes: Attributes::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "srcDir": "emails",
            "outDir": "dist",
            "baselineFonts": [{ "name": "Roboto", "href": "https://example.com/roboto.css" }],
            "bodyAttributes": { "background-color": "#f4f4f4", "width": "600px" }
        }"##;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "emails");
        assert_eq!(config.out_dir.as_deref(), Some("dist"));
        assert_eq!(config.baseline_fonts.as_ref().unwrap()[0].name, "Roboto");
        assert_eq!(config.body_attributes.get("width"), Some("600px"));
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.src_dir, "templates");
        assert!(config.out_dir.is_none());
        assert!(config.baseline_fonts.is_none());
        assert!(config.body_attributes.is_empty());
    }

    #[test]
    fn test_serialize_options_from_config() {
        let defaults = Config::default().to_serialize_options();
        assert_eq!(defaults.baseline_fonts[0].name, "Inter");

        let config = Config {
            baseline_fonts: Some(vec![]),
            body_attributes: [("background-color", "#ffffff")].into_iter().collect(),
            ..Config::default()
        };
        let options = config.to_serialize_options();
        assert!(options.baseline_fonts.is_empty());
        assert_eq!(options.body_attributes.get("background-color"), Some("#ffffff"));
        assert_eq!(options.indent, "  ");
    }

    #[test]
    fn test_missing_config_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().display().to_string()).unwrap();
        assert_eq!(config.src_dir, "templates");
    }
}
