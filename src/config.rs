use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::devops::{default_install_markers, InstallPolicy};
use crate::error::{DragonError, Result};

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "DRAGON_CONFIG";

/// User defaults, consulted after command-line options and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Fallback when `GOROOT` is unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_root: Option<String>,
    /// Fallback when `GOPATH` is unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub go_path: Option<String>,
    /// Default `tools=` selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<String>,
    /// Additional catalog entries (name -> package)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra_tools: BTreeMap<String, String>,
    /// Substrings of `go get` stderr that call for a `go install` step
    #[serde(default = "default_install_markers")]
    pub install_markers: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            go_root: None,
            go_path: None,
            tools: None,
            extra_tools: BTreeMap::new(),
            install_markers: default_install_markers(),
        }
    }
}

const KEYS: &str = "go_root, go_path, tools, install_markers, tool.<name>";

impl AppConfig {
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(shellexpand::tilde(&path).as_ref()));
            }
        }
        let dir = dirs::config_dir()
            .ok_or_else(|| DragonError::Config("Could not determine config directory".to_string()))?;
        Ok(dir.join("dragon").join("config.yaml"))
    }

    /// Load the config file, or defaults when there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .map_err(|e| DragonError::Config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| DragonError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Set a single key. An empty value clears optional keys. The config is
    /// left untouched when the result would not validate.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        let optional = Some(value.to_string()).filter(|v| !v.is_empty());
        match key {
            "go_root" | "go-root" | "GOROOT" => next.go_root = optional,
            "go_path" | "go-path" | "GOPATH" => next.go_path = optional,
            "tools" => next.tools = optional,
            "install_markers" | "install-markers" => {
                next.install_markers = value
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            _ => match key.strip_prefix("tool.") {
                Some(name) if value.is_empty() => {
                    next.extra_tools.remove(name);
                }
                Some(name) => {
                    next.extra_tools.insert(name.to_string(), value.to_string());
                }
                None => {
                    return Err(DragonError::Config(format!(
                        "Unknown config key '{}'. Available keys: {}",
                        key, KEYS
                    )))
                }
            },
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Extra tool names must be usable inside a `tools=` selection.
    pub fn validate(&self) -> Result<()> {
        for (name, package) in &self.extra_tools {
            if name.is_empty() || name.contains([',', '@']) || name.contains(char::is_whitespace) {
                return Err(DragonError::Config(format!(
                    "Invalid tool name '{}': names cannot be empty or contain ',', '@' or spaces",
                    name
                )));
            }
            if package.trim().is_empty() {
                return Err(DragonError::Config(format!(
                    "Tool '{}' has an empty package",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Built-in catalog with the configured extra tools layered on top.
    pub fn catalog(&self) -> Catalog {
        Catalog::with_defaults().extended(&self.extra_tools)
    }

    pub fn install_policy(&self) -> InstallPolicy {
        InstallPolicy::new(self.install_markers.clone())
    }

    pub fn expanded_go_root(&self) -> Option<String> {
        expand(self.go_root.as_deref())
    }

    pub fn expanded_go_path(&self) -> Option<String> {
        expand(self.go_path.as_deref())
    }
}

fn expand(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| shellexpand::tilde(v).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.go_root.is_none());
        assert!(config.tools.is_none());
        assert!(config.extra_tools.is_empty());
        assert_eq!(config.install_markers, vec!["go install".to_string()]);
        assert_eq!(config.catalog().len(), 17);
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
go_root: /usr/local/go
tools: dlv,golint
extra_tools:
  gopls: golang.org/x/tools/gopls
install_markers:
  - go install
  - deprecated
"#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.go_root.as_deref(), Some("/usr/local/go"));
        assert!(config.go_path.is_none());
        assert_eq!(config.tools.as_deref(), Some("dlv,golint"));
        assert_eq!(config.install_markers.len(), 2);
        assert_eq!(
            config.catalog().resolve("gopls").map(|p| p.as_str()),
            Some("golang.org/x/tools/gopls")
        );
    }

    #[test]
    fn test_missing_markers_get_default() {
        let config: AppConfig = serde_yaml::from_str("tools: dlv\n").unwrap();
        assert_eq!(config.install_markers, default_install_markers());
    }

    #[test]
    fn test_config_serialization_skips_empty() {
        let yaml = serde_yaml::to_string(&AppConfig::default()).unwrap();
        assert!(!yaml.contains("go_root"));
        assert!(!yaml.contains("extra_tools"));
        assert!(yaml.contains("install_markers"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("dragon").join("config.yaml");

        let mut config = AppConfig::default();
        config.set("go_path", "/home/dev/go").unwrap();
        config.set("tool.gopls", "golang.org/x/tools/gopls").unwrap();
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&temp_dir.path().join("nope.yaml")).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "install_markers: {not: [a list").unwrap();

        let result = AppConfig::load_from(&path);
        assert!(matches!(result, Err(DragonError::Config(_))));
    }

    #[test]
    fn test_set_known_keys() {
        let mut config = AppConfig::default();
        config.set("GOROOT", "/opt/go").unwrap();
        config.set("tools", "dlv@latest").unwrap();
        config.set("install_markers", "go install, deprecated ,").unwrap();
        assert_eq!(config.go_root.as_deref(), Some("/opt/go"));
        assert_eq!(config.tools.as_deref(), Some("dlv@latest"));
        assert_eq!(config.install_markers, vec!["go install", "deprecated"]);

        config.set("go_root", "").unwrap();
        assert!(config.go_root.is_none());
    }

    #[test]
    fn test_set_and_remove_extra_tool() {
        let mut config = AppConfig::default();
        config.set("tool.gopls", "golang.org/x/tools/gopls").unwrap();
        assert!(config.catalog().contains("gopls"));
        config.set("tool.gopls", "").unwrap();
        assert!(!config.catalog().contains("gopls"));
    }

    #[test]
    fn test_set_unknown_key() {
        let mut config = AppConfig::default();
        let result = config.set("provider", "x");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown config key"));
    }

    #[test]
    fn test_validate_rejects_bad_tool_names() {
        let mut config = AppConfig::default();
        assert!(config.set("tool.a,b", "example.com/x").is_err());
        assert!(config.set("tool.a@b", "example.com/x").is_err());
        assert!(config.extra_tools.is_empty());

        config.extra_tools.insert("ok".to_string(), "  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expanded_paths() {
        let config = AppConfig {
            go_root: Some("/usr/local/go".to_string()),
            go_path: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(config.expanded_go_root().as_deref(), Some("/usr/local/go"));
        assert_eq!(config.expanded_go_path(), None);
    }
}
