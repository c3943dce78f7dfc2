//! Configuration system for docmeta.
//!
//! Values are layered: built-in defaults, then an optional config file
//! (`.toml`, `.json`, `.yaml`), then environment variables.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{DocMetaError, DocMetaResult};
use crate::traits::LlmConfig;

/// Default upload limit in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 300;

/// Default reading speed in words per minute.
pub const DEFAULT_READING_SPEED_WPM: u32 = 200;
pub const DEFAULT_MAX_STORED_RESULTS: usize = 100;

/// Summarization provider type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LlmProvider {
    #[default]
    Mistral,
    OpenAI,
}

impl LlmProvider {
    /// Environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            LlmProvider::Mistral => "MISTRAL_API_KEY",
            LlmProvider::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Model used when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Mistral => "mistral-small-latest",
            LlmProvider::OpenAI => "gpt-4o-mini",
        }
    }
}

/// Provider configuration with type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmProviderConfig {
    /// Provider type.
    pub provider: LlmProvider,
    /// Provider-specific configuration.
    #[serde(flatten)]
    pub config: LlmConfig,
}

impl Default for LlmProviderConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Mistral,
            config: LlmConfig {
                model: LlmProvider::Mistral.default_model().to_string(),
                ..Default::default()
            },
        }
    }
}

/// Upload limits and staging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted upload in megabytes.
    pub max_file_size_mb: u64,
    /// Directory for staged uploads. The system temp dir when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            temp_dir: None,
        }
    }
}

impl UploadConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

/// Text statistics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Words per minute used for the reading time estimate.
    pub reading_speed_wpm: u32,
    /// How many common words to report.
    pub top_words_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            reading_speed_wpm: DEFAULT_READING_SPEED_WPM,
            top_words_limit: 10,
        }
    }
}

/// Summary generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Call the summarization provider at all.
    pub enabled: bool,
    /// Characters of document text sent to the provider.
    pub max_input_chars: usize,
    /// Upper bound on returned key points.
    pub max_key_points: usize,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_input_chars: 12_000,
            max_key_points: 5,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Finished records kept in memory; the oldest is evicted past this.
    pub max_stored_results: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_stored_results: DEFAULT_MAX_STORED_RESULTS,
        }
    }
}

/// Main docmeta configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocMetaConfig {
    pub upload: UploadConfig,
    pub analysis: AnalysisConfig,
    pub insights: InsightsConfig,
    pub llm: LlmProviderConfig,
    pub server: ServerConfig,
}

impl DocMetaConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> DocMetaResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| DocMetaError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| DocMetaError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| DocMetaError::Configuration(e.to_string())),
            _ => Err(DocMetaError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables on top of defaults.
    pub fn from_env() -> DocMetaResult<Self> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Defaults, then the config file, then the environment.
    ///
    /// The file is `$DOCMETA_CONFIG` when set, otherwise
    /// `<config dir>/docmeta/config.toml` if it exists.
    pub fn load() -> DocMetaResult<Self> {
        let mut config = match Self::config_file_path() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn config_file_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("DOCMETA_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("docmeta").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Apply overrides from a variable lookup.
    pub fn apply_env<F>(&mut self, var: F) -> DocMetaResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = var("DOCMETA_LLM_PROVIDER") {
            let provider: LlmProvider = provider.trim().parse().map_err(|_| {
                DocMetaError::Configuration(format!(
                    "DOCMETA_LLM_PROVIDER must be 'mistral' or 'openai', got '{}'",
                    provider
                ))
            })?;
            if provider != self.llm.provider {
                self.llm.config.model = provider.default_model().to_string();
            }
            self.llm.provider = provider;
        }
        if let Some(model) = var("DOCMETA_LLM_MODEL") {
            self.llm.config.model = model;
        }
        if let Some(base_url) = var("DOCMETA_LLM_BASE_URL") {
            self.llm.config.base_url = Some(base_url);
        }
        if let Some(key) = var(self.llm.provider.api_key_env()).filter(|k| !k.trim().is_empty()) {
            self.llm.config.api_key = Some(SecretString::new(key));
        }

        if let Some(size) = var("DOCMETA_MAX_FILE_SIZE_MB") {
            self.upload.max_file_size_mb = parse_number("DOCMETA_MAX_FILE_SIZE_MB", &size)?;
        }
        if let Some(wpm) = var("DOCMETA_READING_SPEED_WPM") {
            self.analysis.reading_speed_wpm = parse_number("DOCMETA_READING_SPEED_WPM", &wpm)?;
        }

        if let Some(host) = var("DOCMETA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("DOCMETA_PORT") {
            self.server.port = parse_number("DOCMETA_PORT", &port)?;
        }
        if let Some(max) = var("DOCMETA_MAX_STORED_RESULTS") {
            self.server.max_stored_results = parse_number("DOCMETA_MAX_STORED_RESULTS", &max)?;
        }

        Ok(())
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> DocMetaResult<()> {
        if self.insights.enabled && !self.llm.config.has_api_key() {
            return Err(DocMetaError::Configuration(format!(
                "{} not found. Set it in the environment or a .env file",
                self.llm.provider.api_key_env()
            )));
        }
        if self.upload.max_file_size_mb == 0 {
            return Err(DocMetaError::Configuration(
                "max_file_size_mb must be greater than zero".to_string(),
            ));
        }
        if self.analysis.reading_speed_wpm == 0 {
            return Err(DocMetaError::Configuration(
                "reading_speed_wpm must be greater than zero".to_string(),
            ));
        }
        if self.server.max_stored_results == 0 {
            return Err(DocMetaError::Configuration(
                "max_stored_results must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> DocMetaConfigBuilder {
        DocMetaConfigBuilder::default()
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> DocMetaResult<T> {
    value.trim().parse().map_err(|_| {
        DocMetaError::Configuration(format!("{} must be a number, got '{}'", name, value))
    })
}

/// Builder for DocMetaConfig.
#[derive(Default)]
pub struct DocMetaConfigBuilder {
    config: DocMetaConfig,
}

impl DocMetaConfigBuilder {
    /// Set upload configuration.
    pub fn upload(mut self, config: UploadConfig) -> Self {
        self.config.upload = config;
        self
    }

    /// Set analysis configuration.
    pub fn analysis(mut self, config: AnalysisConfig) -> Self {
        self.config.analysis = config;
        self
    }

    /// Set insights configuration.
    pub fn insights(mut self, config: InsightsConfig) -> Self {
        self.config.insights = config;
        self
    }

    /// Set LLM configuration.
    pub fn llm(mut self, config: LlmProviderConfig) -> Self {
        self.config.llm = config;
        self
    }

    /// Set the provider API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.llm.config.api_key = Some(SecretString::new(key.into()));
        self
    }

    /// Set server configuration.
    pub fn server(mut self, config: ServerConfig) -> Self {
        self.config.server = config;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> DocMetaConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DocMetaConfig::default();
        assert_eq!(config.upload.max_file_size_mb, 300);
        assert_eq!(config.upload.max_file_size_bytes(), 300 * 1024 * 1024);
        assert_eq!(config.analysis.reading_speed_wpm, 200);
        assert_eq!(config.analysis.top_words_limit, 10);
        assert_eq!(config.insights.max_input_chars, 12_000);
        assert_eq!(config.llm.provider, LlmProvider::Mistral);
        assert_eq!(config.llm.config.model, "mistral-small-latest");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = DocMetaConfig::default();
        config
            .apply_env(lookup(&[
                ("MISTRAL_API_KEY", "secret-key"),
                ("DOCMETA_MAX_FILE_SIZE_MB", "50"),
                ("DOCMETA_READING_SPEED_WPM", "250"),
                ("DOCMETA_PORT", "9000"),
                ("DOCMETA_MAX_STORED_RESULTS", "25"),
            ]))
            .unwrap();

        assert_eq!(
            config.llm.config.api_key.as_ref().unwrap().expose_secret(),
            "secret-key"
        );
        assert_eq!(config.upload.max_file_size_mb, 50);
        assert_eq!(config.analysis.reading_speed_wpm, 250);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.max_stored_results, 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_provider_switch_picks_matching_key_and_model() {
        let mut config = DocMetaConfig::default();
        config
            .apply_env(lookup(&[
                ("DOCMETA_LLM_PROVIDER", "OpenAI"),
                ("MISTRAL_API_KEY", "wrong"),
                ("OPENAI_API_KEY", "right"),
            ]))
            .unwrap();

        assert_eq!(config.llm.provider, LlmProvider::OpenAI);
        assert_eq!(config.llm.config.model, "gpt-4o-mini");
        assert_eq!(
            config.llm.config.api_key.as_ref().unwrap().expose_secret(),
            "right"
        );
    }

    #[test]
    fn test_bad_env_values() {
        let mut config = DocMetaConfig::default();
        assert!(config
            .apply_env(lookup(&[("DOCMETA_PORT", "eighty")]))
            .is_err());
        assert!(config
            .apply_env(lookup(&[("DOCMETA_LLM_PROVIDER", "claude")]))
            .is_err());
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = DocMetaConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("MISTRAL_API_KEY"));

        let mut config = DocMetaConfig::default();
        config.insights.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = DocMetaConfig::builder().api_key("k").build();
        config.upload.max_file_size_mb = 0;
        assert!(config.validate().is_err());

        let mut config = DocMetaConfig::builder().api_key("k").build();
        config.analysis.reading_speed_wpm = 0;
        assert!(config.validate().is_err());

        let mut config = DocMetaConfig::builder().api_key("k").build();
        config.server.max_stored_results = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_formats() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("config.toml");
        std::fs::write(
            &toml_path,
            "[upload]\nmax_file_size_mb = 10\n\n[llm]\nprovider = \"openai\"\nmodel = \"gpt-4o\"\n",
        )
        .unwrap();
        let config = DocMetaConfig::from_file(&toml_path).unwrap();
        assert_eq!(config.upload.max_file_size_mb, 10);
        assert_eq!(config.llm.provider, LlmProvider::OpenAI);
        assert_eq!(config.llm.config.model, "gpt-4o");
        assert_eq!(config.analysis.reading_speed_wpm, 200);

        let yaml_path = dir.path().join("config.yaml");
        std::fs::write(&yaml_path, "analysis:\n  reading_speed_wpm: 180\n").unwrap();
        let config = DocMetaConfig::from_file(&yaml_path).unwrap();
        assert_eq!(config.analysis.reading_speed_wpm, 180);

        let json_path = dir.path().join("config.json");
        std::fs::write(&json_path, r#"{"server": {"port": 3000}}"#).unwrap();
        let config = DocMetaConfig::from_file(&json_path).unwrap();
        assert_eq!(config.server.port, 3000);

        let ini_path = dir.path().join("config.ini");
        std::fs::write(&ini_path, "x=1").unwrap();
        assert!(DocMetaConfig::from_file(&ini_path).is_err());
    }

    #[test]
    fn test_api_key_never_serialized() {
        let config = DocMetaConfig::builder().api_key("top-secret").build();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("top-secret"));
    }
}
