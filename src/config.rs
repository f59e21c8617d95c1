use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_FILE: &str = ".env";
const API_KEY_VAR: &str = "GROQ_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub commentary: CommentaryConfig,
}

/// Where the classifier and label encoders live on disk.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    #[serde(default = "default_model_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_classifier")]
    pub classifier: String,
    #[serde(default = "default_encoder_prefix")]
    pub encoder_prefix: String,
}

fn default_model_dir() -> PathBuf { PathBuf::from("models") }
fn default_classifier() -> String { "ipl_random_forest.json".to_string() }
fn default_encoder_prefix() -> String { "label_encoder_".to_string() }

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dir: default_model_dir(),
            classifier: default_classifier(),
            encoder_prefix: default_encoder_prefix(),
        }
    }
}

impl ModelConfig {
    pub fn classifier_path(&self) -> PathBuf {
        self.dir.join(&self.classifier)
    }

    /// `label_encoder_<field>.json` under the model directory.
    pub fn encoder_path(&self, field: &str) -> PathBuf {
        self.dir.join(format!("{}{}.json", self.encoder_prefix, field))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommentaryConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_chat_model")]
    pub model: String,
    #[serde(default = "default_timeout_s")]
    pub timeout_s: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_api_url() -> String { "https://api.groq.com/openai/v1/chat/completions".to_string() }
fn default_chat_model() -> String { "llama3-8b-8192".to_string() }
fn default_timeout_s() -> u64 { 45 }
fn default_temperature() -> f64 { 0.95 }
fn default_max_tokens() -> u32 { 300 }

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_chat_model(),
            timeout_s: default_timeout_s(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl CommentaryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_s)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config TOML")
    }

    /// Load .env file into process environment. Real env vars take precedence.
    pub fn load_env_file() {
        let content = match std::fs::read_to_string(Path::new(ENV_FILE)) {
            Ok(c) => c,
            Err(_) => return,
        };
        for (key, value) in parse_env_lines(&content) {
            if std::env::var(&key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }

    /// Bearer token for the completion API. A missing key is not fatal:
    /// requests go out unauthenticated and the API rejects them.
    pub fn groq_api_key() -> Option<String> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => Some(sanitize_key(&key)),
            _ => None,
        }
    }
}

/// KEY=VALUE pairs from a dotenv file. Comments and blank lines are skipped,
/// surrounding quotes are stripped.
fn parse_env_lines(content: &str) -> Vec<(String, String)> {
    // Strip BOM if present (common on Windows-created files)
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content
        .lines()
        .map(|line| line.trim().trim_matches('\r'))
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// Strip carriage returns, BOM, and other invisible chars from a key value.
fn sanitize_key(raw: &str) -> String {
    raw.replace(['\r', '\u{feff}', '\u{200b}'], "")
        .trim()
        .to_string()
}
