//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and then passed
//! explicitly to the censor engine and upload validator. Nothing reads the
//! environment after that.
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:5000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IP from forwarding headers (default: `false`)
//! - `UPLOAD_FOLDER` - Directory for stored photos (default: `static/uploads`)
//! - `UPLOAD_URL_PREFIX` - URL path stored photos are served under
//!   (default: `/static/uploads`)
//! - `ALLOWED_MIME_TYPES` - Comma-separated sniffed types to accept
//!   (default: `image/jpeg,image/png,image/gif`)
//! - `ALLOWED_EXTENSIONS` - Comma-separated claimed extensions to accept
//!   (default: `png,jpg,jpeg,gif`, empty disables the check)
//! - `MAX_CONTENT_LENGTH` - Request body limit in bytes (default: 10 MiB)
//! - `BAD_WORDS_ID` - Comma-separated extra banned words (default: none)
//! - `RATE_LIMIT_PER_SECOND` / `RATE_LIMIT_BURST` - Per-IP token bucket
//!   for `/api` (default: 2 / 50)
//!
//! ```bash
//! export UPLOAD_FOLDER="/var/lib/lelana/uploads"
//! export BAD_WORDS_ID="anjing,bangsat,kampret"
//! ```

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::domain::banned_words::BannedWordSet;
use crate::domain::upload::UploadPolicy;

const DEFAULT_ALLOWED_EXTENSIONS: &str = "png,jpg,jpeg,gif";
const DEFAULT_MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub upload_folder: PathBuf,
    pub upload_url_prefix: String,
    pub allowed_mime_types: Vec<String>,
    /// Empty means any claimed extension is accepted.
    pub allowed_extensions: Vec<String>,
    pub max_content_length: usize,
    /// Extra banned words on top of the built-in English list.
    pub bad_words: Vec<String>,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            behind_proxy: false,
            upload_folder: PathBuf::from("static/uploads"),
            upload_url_prefix: "/static/uploads".to_string(),
            allowed_mime_types: UploadPolicy::DEFAULT_MIME_TYPES
                .iter()
                .map(|m| m.to_string())
                .collect(),
            allowed_extensions: parse_list(DEFAULT_ALLOWED_EXTENSIONS),
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            bad_words: Vec::new(),
            rate_limit_per_second: 2,
            rate_limit_burst: 50,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let upload_folder = env::var("UPLOAD_FOLDER")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_folder);
        let upload_url_prefix = env::var("UPLOAD_URL_PREFIX")
            .map(|p| p.trim_end_matches('/').to_string())
            .unwrap_or(defaults.upload_url_prefix);

        let allowed_mime_types = env::var("ALLOWED_MIME_TYPES")
            .map(|v| parse_list(&v))
            .unwrap_or(defaults.allowed_mime_types);
        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .map(|v| parse_list(&v))
            .unwrap_or(defaults.allowed_extensions);

        let max_content_length = parse_number("MAX_CONTENT_LENGTH")?
            .unwrap_or(defaults.max_content_length);

        let bad_words = env::var("BAD_WORDS_ID")
            .map(|v| parse_list(&v))
            .unwrap_or_default();

        let rate_limit_per_second = parse_number("RATE_LIMIT_PER_SECOND")?
            .unwrap_or(defaults.rate_limit_per_second);
        let rate_limit_burst =
            parse_number("RATE_LIMIT_BURST")?.unwrap_or(defaults.rate_limit_burst);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            upload_folder,
            upload_url_prefix,
            allowed_mime_types,
            allowed_extensions,
            max_content_length,
            bad_words,
            rate_limit_per_second,
            rate_limit_burst,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `upload_url_prefix` does not start with `/` or is the root path
    /// - `allowed_mime_types` is empty or contains a non-image type
    /// - `max_content_length` or either rate limit value is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.upload_url_prefix.starts_with('/') || self.upload_url_prefix.len() < 2 {
            anyhow::bail!(
                "UPLOAD_URL_PREFIX must be an absolute path below '/', got '{}'",
                self.upload_url_prefix
            );
        }

        if self.allowed_mime_types.is_empty() {
            anyhow::bail!("ALLOWED_MIME_TYPES must name at least one type");
        }

        if let Some(mime) = self
            .allowed_mime_types
            .iter()
            .find(|m| !m.starts_with("image/"))
        {
            anyhow::bail!("ALLOWED_MIME_TYPES may only contain image types, got '{mime}'");
        }

        if self.max_content_length == 0 {
            anyhow::bail!("MAX_CONTENT_LENGTH must be greater than 0");
        }

        if self.rate_limit_per_second == 0 || self.rate_limit_burst == 0 {
            anyhow::bail!("RATE_LIMIT_PER_SECOND and RATE_LIMIT_BURST must be greater than 0");
        }

        Ok(())
    }

    /// Builds the banned-word dictionary: built-in list plus `BAD_WORDS_ID`.
    pub fn banned_words(&self) -> BannedWordSet {
        BannedWordSet::new(&self.bad_words)
    }

    /// Builds the upload acceptance policy.
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(&self.allowed_mime_types)
            .with_allowed_extensions(&self.allowed_extensions)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Upload folder: {}", self.upload_folder.display());
        tracing::info!("  Upload URL prefix: {}", self.upload_url_prefix);
        tracing::info!("  Allowed MIME types: {}", self.allowed_mime_types.join(", "));

        if self.allowed_extensions.is_empty() {
            tracing::info!("  Allowed extensions: any");
        } else {
            tracing::info!("  Allowed extensions: {}", self.allowed_extensions.join(", "));
        }

        tracing::info!("  Max content length: {} bytes", self.max_content_length);
        // Word list itself is not logged.
        tracing::info!("  Extra banned words: {}", self.bad_words.len());
        tracing::info!(
            "  Rate limit: {}/s, burst {}",
            self.rate_limit_per_second,
            self.rate_limit_burst
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Splits a comma-separated value into trimmed, non-empty items.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads an optional numeric variable, failing on garbage instead of
/// silently falling back.
fn parse_number<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a number, got '{value}'")),
        Err(_) => Ok(None),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
