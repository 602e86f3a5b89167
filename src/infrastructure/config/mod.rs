//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

pub const DEFAULT_WELCOME: &str = "Olá! 👋 Sou o assistente virtual da loja. Como posso ajudar você hoje?

Posso te ajudar com:
• Busca de produtos
• Informações sobre políticas da loja
• Consulta de pedidos
• Recomendações personalizadas

É só me dizer o que você precisa! 😊";

pub const DEFAULT_APOLOGY: &str =
    "Desculpe, ocorreu um erro ao processar sua mensagem. Por favor, tente novamente.";

/// Widget configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub widget: WidgetConfig,
    pub backend: BackendConfig,
    pub console: ConsoleConfig,
}

/// What to do with a submission made while another is still in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BusyPolicy {
    /// Drop it silently
    #[default]
    Ignore,
    /// Dispatch it anyway; each submission gets its own indicator
    Allow,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct WidgetConfig {
    pub welcome_message: String,
    pub apology_message: String,
    pub busy_policy: BusyPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BackendConfig {
    pub base_url: String,
    pub chat_path: String,
    pub history_path: String,
    pub search_path: String,
    pub knowledge_path: String,
    /// Unset means requests may hang until the server answers
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConsoleConfig {
    pub prefix: String,
    pub prompt: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            welcome_message: DEFAULT_WELCOME.to_string(),
            apology_message: DEFAULT_APOLOGY.to_string(),
            busy_policy: BusyPolicy::Ignore,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            chat_path: "/chat".to_string(),
            history_path: "/chat/history".to_string(),
            search_path: "/search/products".to_string(),
            knowledge_path: "/query/knowledge".to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prefix: "/".to_string(),
            prompt: "> ".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Environment variables win over file values
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `CHAT_WIDGET_*` overrides from any variable source
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CHAT_WIDGET_URL") {
            self.backend.base_url = url;
        }

        if let Some(prefix) = lookup("CHAT_WIDGET_PREFIX") {
            self.console.prefix = prefix;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("backend.base-url".to_string()));
        }
        for (field, path) in [
            ("backend.chat-path", &self.backend.chat_path),
            ("backend.history-path", &self.backend.history_path),
            ("backend.search-path", &self.backend.search_path),
            ("backend.knowledge-path", &self.backend.knowledge_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must start with '/': {}",
                    field, path
                )));
            }
        }
        if self.console.prefix.is_empty() {
            return Err(ConfigError::MissingField("console.prefix".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.chat_path, "/chat");
        assert_eq!(config.widget.busy_policy, BusyPolicy::Ignore);
        assert!(config.widget.welcome_message.contains('\n'));
        assert_eq!(config.backend.timeout_secs, None);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
backend:
  base-url: http://shop.local:9000
widget:
  busy-policy: allow
"#;
        let config = Config::from_yaml(yaml).expect("parse");
        assert_eq!(config.backend.base_url, "http://shop.local:9000");
        assert_eq!(config.backend.chat_path, "/chat");
        assert_eq!(config.widget.busy_policy, BusyPolicy::Allow);
        assert_eq!(config.widget.apology_message, DEFAULT_APOLOGY);
        assert_eq!(config.console.prompt, "> ");
    }

    #[test]
    fn test_rejects_relative_chat_path() {
        let yaml = "backend:\n  chat-path: chat\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_rejects_empty_base_url() {
        let yaml = "backend:\n  base-url: \"  \"\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(_)));
    }

    #[test]
    fn test_yaml_roundtrip_keeps_kebab_keys() {
        let yaml = Config::default().to_yaml().expect("serialize");
        assert!(yaml.contains("base-url"));
        assert!(yaml.contains("busy-policy: ignore"));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let vars: HashMap<&str, &str> = [
            ("CHAT_WIDGET_URL", "http://env.local"),
            ("CHAT_WIDGET_PREFIX", "!"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::from_yaml("backend:\n  base-url: http://file.local\n").unwrap();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.backend.base_url, "http://env.local");
        assert_eq!(config.console.prefix, "!");
    }

    #[test]
    fn test_missing_overrides_keep_file_values() {
        let mut config = Config::from_yaml("console:\n  prefix: \"#\"\n").unwrap();
        config.apply_overrides(|_| None);

        assert_eq!(config.console.prefix, "#");
        assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.backend.search_path, "/search/products");
        assert_eq!(config.backend.knowledge_path, "/query/knowledge");
    }
}
