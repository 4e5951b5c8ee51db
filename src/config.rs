//! Application configuration: optional TOML file plus environment overrides.
//!
//! MOCKTEST_CONFIG_PATH points at a TOML file shaped like:
//!
//! ```toml
//! [generation]
//! model = "gemini-2.5-flash"
//! temperature = 0.5
//!
//! [paper]
//! brand = "Oms BSE Odisha Mock Test"
//! file_prefix = "Oms_BSE_Odisha_PreBoard"
//! years = ["2026", "2027"]
//! sets = ["A", "B"]
//!
//! [distribution.difficulty]
//! easy = 25
//! moderate = 50
//! difficult = 25
//!
//! [logging]
//! filter = "info,paper=debug"
//! format = "json"
//! ```
//!
//! GEMINI_MODEL and GEMINI_BASE_URL override the `[generation]` values,
//! LOG_LEVEL and LOG_FORMAT override `[logging]`.
//!
//! The file is read before the subscriber exists, so `load` hands back where the
//! config came from and `LoadedConfig::report` logs it once tracing is up.

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::blueprint::{BloomDistribution, DifficultyDistribution, GeneratorConfig};
use crate::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub generation: GenerationCfg,
  #[serde(default)]
  pub paper: PaperCfg,
  #[serde(default)]
  pub distribution: DistributionCfg,
  #[serde(default)]
  pub logging: LoggingCfg,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GenerationCfg {
  #[serde(default = "default_model")] pub model: String,
  #[serde(default = "default_base_url")] pub base_url: String,
  #[serde(default = "default_temperature")] pub temperature: f32,
}

fn default_model() -> String { DEFAULT_MODEL.into() }
fn default_base_url() -> String { DEFAULT_BASE_URL.into() }
fn default_temperature() -> f32 { 0.5 }

impl Default for GenerationCfg {
  fn default() -> Self {
    Self { model: default_model(), base_url: default_base_url(), temperature: default_temperature() }
  }
}

/// Branding and the year/set choices offered to the user.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PaperCfg {
  pub brand: String,
  pub subtitle: String,
  /// Prefix of the downloaded Word file name.
  pub file_prefix: String,
  pub years: Vec<String>,
  pub sets: Vec<String>,
  pub default_year: String,
  pub default_set: String,
}

impl Default for PaperCfg {
  fn default() -> Self {
    Self {
      brand: "Oms BSE Odisha Mock Test".into(),
      subtitle: "Class X - General Science (Odia Medium)".into(),
      file_prefix: "Oms_BSE_Odisha_PreBoard".into(),
      years: ["2026", "2027", "2028", "2029", "2030"].map(String::from).to_vec(),
      sets: ["A", "B", "C", "D"].map(String::from).to_vec(),
      default_year: "2026".into(),
      default_set: "A".into(),
    }
  }
}

impl PaperCfg {
  pub fn allows(&self, year: &str, set: &str) -> bool {
    self.years.iter().any(|y| y == year) && self.sets.iter().any(|s| s == set)
  }
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct DistributionCfg {
  #[serde(default)] pub difficulty: DifficultyDistribution,
  #[serde(default)] pub bloom: BloomDistribution,
}

impl DistributionCfg {
  pub fn generator_config(&self) -> GeneratorConfig {
    GeneratorConfig {
      difficulty_distribution: self.difficulty.clone(),
      bloom_distribution: self.bloom.clone(),
    }
  }
}

/// Directives used when neither the file nor LOG_LEVEL sets a filter.
pub const DEFAULT_LOG_FILTER: &str =
  "info,paper=debug,gemini=debug,mocktest_backend=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  #[default]
  Pretty,
  Json,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingCfg {
  /// EnvFilter directives.
  pub filter: String,
  pub format: LogFormat,
}

impl Default for LoggingCfg {
  fn default() -> Self {
    Self { filter: DEFAULT_LOG_FILTER.into(), format: LogFormat::Pretty }
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file {path}: {source}")]
  Read { path: String, #[source] source: std::io::Error },
  #[error("failed to parse config file {path}: {source}")]
  Parse { path: String, #[source] source: toml::de::Error },
}

/// Where the effective config came from.
#[derive(Debug)]
pub enum ConfigSource {
  Defaults,
  File(String),
  /// The file was unusable; defaults were used instead.
  Rejected(ConfigError),
}

#[derive(Debug)]
pub struct LoadedConfig {
  pub config: AppConfig,
  pub source: ConfigSource,
}

impl LoadedConfig {
  pub fn report(&self) {
    match &self.source {
      ConfigSource::Defaults => info!(target: "mocktest_backend", "No config file; using defaults"),
      ConfigSource::File(path) => info!(target: "mocktest_backend", %path, "Loaded config (TOML)"),
      ConfigSource::Rejected(e) => error!(target: "mocktest_backend", error = %e, "Config file unusable; using defaults"),
    }
  }
}

impl AppConfig {
  /// File config (if any) with environment overrides applied.
  pub fn load() -> LoadedConfig {
    let (mut config, source) = match read_config_file() {
      Ok(Some((path, cfg))) => (cfg, ConfigSource::File(path)),
      Ok(None) => (AppConfig::default(), ConfigSource::Defaults),
      Err(e) => (AppConfig::default(), ConfigSource::Rejected(e)),
    };
    config.apply_overrides(|name| std::env::var(name).ok());
    LoadedConfig { config, source }
  }

  /// Blank variables are ignored.
  pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
    let get = |name: &str| var(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    if let Some(model) = get("GEMINI_MODEL") { self.generation.model = model; }
    if let Some(url) = get("GEMINI_BASE_URL") { self.generation.base_url = url; }
    if let Some(filter) = get("LOG_LEVEL") { self.logging.filter = filter; }
    if let Some(format) = get("LOG_FORMAT") {
      self.logging.format = if format.eq_ignore_ascii_case("json") { LogFormat::Json } else { LogFormat::Pretty };
    }
  }
}

pub fn parse_config(s: &str) -> Result<AppConfig, toml::de::Error> {
  toml::from_str::<AppConfig>(s)
}

/// Read `AppConfig` from MOCKTEST_CONFIG_PATH. `Ok(None)` when the variable is unset.
pub fn read_config_file() -> Result<Option<(String, AppConfig)>, ConfigError> {
  let Ok(path) = std::env::var("MOCKTEST_CONFIG_PATH") else { return Ok(None) };
  let raw = std::fs::read_to_string(&path)
    .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
  let cfg = parse_config(&raw).map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
  Ok(Some((path, cfg)))
}
