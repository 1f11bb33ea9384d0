use contracts::usecases::u501_feedback::FeedbackSettings;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
    #[serde(default)]
    pub compliance_engine: ComplianceEngineConfig,
    #[serde(default)]
    pub company: CompanyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory with the built client, served as the fallback route
    pub static_dir: String,
    /// Address the server is reached at from outside, used in email links
    #[serde(default)]
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: "dist".into(),
            public_url: None,
        }
    }
}

impl ServerConfig {
    /// Configured public address, or the local one when none is set
    pub fn public_base_url(&self) -> String {
        match self.public_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("http://localhost:{}", self.port),
        }
    }
}

/// `[company]`: company used when an action has no company of its own
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CompanyConfig {
    #[serde(default)]
    pub default: Option<String>,
}

/// `[feedback]`: limits handed to the dialog and the mail recipients
#[derive(Debug, Deserialize, Clone)]
pub struct FeedbackConfig {
    pub recipient_emails: Vec<String>,
    pub max_file_size_mb: f64,
    pub allowed_file_types: Vec<String>,
    pub max_number_of_files: usize,
    pub max_description_length: usize,
    pub contact_page: String,
    #[serde(default)]
    pub default_sender_email: Option<String>,
}

impl FeedbackConfig {
    /// Snapshot sent to the client when a dialog opens
    pub fn to_settings(&self) -> FeedbackSettings {
        FeedbackSettings {
            max_files: self.max_number_of_files,
            max_file_size_mb: self.max_file_size_mb,
            allowed_file_types: self
                .allowed_file_types
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            max_description_length: self.max_description_length,
            contact_url: self.contact_page.clone(),
            default_sender_email: self
                .default_sender_email
                .clone()
                .filter(|e| !e.trim().is_empty()),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Outgoing address of the default account
    pub from: String,
    pub starttls: bool,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from: String::new(),
            starttls: true,
        }
    }
}

impl SmtpConfig {
    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty() && !self.from.trim().is_empty()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadsConfig {
    pub dir: String,
    /// Body limit of the upload route
    pub max_request_mb: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: "target/files".into(),
            max_request_mb: 25,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ComplianceEngineConfig {
    /// Base URL of the service that talks to the Fatoora portal
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,
}

fn default_engine_timeout() -> u64 {
    60
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/app.db"

[server]
port = 3000
static_dir = "dist"
# public_url = "https://erp.example.com"

[feedback]
recipient_emails = []
max_file_size_mb = 5
allowed_file_types = [".pdf", ".png", ".jpeg", ".docx"]
max_number_of_files = 3
max_description_length = 500
contact_page = "https://lavaloon.com/contact-us"

[smtp]
host = ""
port = 587
from = ""
starttls = true

[uploads]
dir = "target/files"
max_request_mb = 25

[compliance_engine]
timeout_secs = 60
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Stores the loaded configuration for the lifetime of the process
pub fn init_config(config: Config) -> anyhow::Result<&'static Config> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Configuration is already initialized"))?;
    get_config()
}

pub fn get_config() -> anyhow::Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| anyhow::anyhow!("Configuration has not been initialized"))
}

/// Resolves a configured path: absolute paths as is, relative ones next to
/// the executable, falling back to the current directory
pub fn resolve_path(configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }
    PathBuf::from(configured)
}

pub fn get_database_path(config: &Config) -> PathBuf {
    resolve_path(&config.database.path)
}

pub fn get_uploads_dir(config: &Config) -> PathBuf {
    resolve_path(&config.uploads.dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/app.db");
        assert_eq!(config.server.port, 3000);
        assert!(!config.smtp.is_configured());
        assert!(config.compliance_engine.url.is_none());
    }

    #[test]
    fn test_feedback_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        let settings = config.feedback.to_settings();
        assert_eq!(settings.max_files, 3);
        assert_eq!(settings.max_file_size_bytes(), 5 * 1024 * 1024);
        assert_eq!(settings.max_description_length, 500);
        assert!(settings.allowed_file_types.contains(".jpeg"));
        assert_eq!(settings.contact_url, "https://lavaloon.com/contact-us");
        assert_eq!(settings.default_sender_email, None);
    }

    #[test]
    fn test_optional_sections_default() {
        let minimal = r#"
            [database]
            path = "app.db"

            [feedback]
            recipient_emails = ["support@example.com"]
            max_file_size_mb = 2.5
            allowed_file_types = [" .PDF "]
            max_number_of_files = 1
            max_description_length = 200
            contact_page = "https://example.com"
            default_sender_email = " "
        "#;
        let config: Config = toml::from_str(minimal).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.uploads.max_request_mb, 25);
        assert_eq!(config.compliance_engine.timeout_secs, 60);
        assert_eq!(config.server.public_base_url(), "http://localhost:3000");
        assert_eq!(config.company.default, None);

        let settings = config.feedback.to_settings();
        assert!(settings.allowed_file_types.contains(".pdf"));
        assert_eq!(settings.default_sender_email, None);
    }

    #[test]
    fn test_public_url_for_email_links() {
        let with_url = r#"
            [database]
            path = "app.db"

            [server]
            port = 8080
            static_dir = "dist"
            public_url = "https://erp.acme.sa/ "

            [feedback]
            recipient_emails = []
            max_file_size_mb = 5
            allowed_file_types = [".pdf"]
            max_number_of_files = 3
            max_description_length = 500
            contact_page = "https://example.com"

            [company]
            default = "ACME KSA"
        "#;
        let config: Config = toml::from_str(with_url).unwrap();
        assert_eq!(config.server.public_base_url(), "https://erp.acme.sa");
        assert_eq!(config.company.default.as_deref(), Some("ACME KSA"));

        let blank = ServerConfig {
            public_url: Some("  ".into()),
            ..ServerConfig::default()
        };
        assert_eq!(blank.public_base_url(), "http://localhost:3000");
    }
}
