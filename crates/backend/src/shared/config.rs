use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Remote licensing backend used by the proxy routes
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL, e.g. `https://licensing.example.org/api/v1`; proxy routes
    /// answer 500 while it is empty
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub app_code: Option<String>,
    /// Bearer token forwarded as-is
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            app_code: None,
            api_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub preview_mode: bool,
    /// Load the shipped reference dataset into the mock store at startup
    #[serde(default = "default_true")]
    pub seed_mock_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preview_mode: false,
            seed_mock_data: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    /// URL prefix under which uploaded files are served back
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            public_prefix: default_public_prefix(),
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_public_prefix() -> String {
    "/uploads".to_string()
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[upstream]
timeout_secs = 30

[app]
preview_mode = false
seed_mock_data = true

[upload]
dir = "uploads"
public_prefix = "/uploads"
"#;

impl Config {
    pub fn backend_configured(&self) -> bool {
        self.upstream
            .base_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    pub fn app_code(&self) -> &str {
        self.upstream.app_code.as_deref().unwrap_or("")
    }

    /// Overrides file values with environment variables
    pub fn apply_env(&mut self, vars: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(url) = vars("BACKEND_URL") {
            self.upstream.base_url = Some(url);
        }
        if let Some(code) = vars("APP_CODE") {
            self.upstream.app_code = Some(code);
        }
        if let Some(token) = vars("API_TOKEN") {
            self.upstream.api_token = Some(token);
        }
        if let Some(preview) = vars("PREVIEW_MODE") {
            self.app.preview_mode = matches!(preview.trim(), "1" | "true" | "TRUE" | "yes");
        }
        if let Some(dir) = vars("UPLOAD_DIR") {
            self.upload.dir = dir;
        }
        if let Some(port) = vars("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", port, e))?;
        }
        Ok(())
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current working directory
/// 3. Falls back to embedded default config
///
/// Environment variables are applied on top.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match find_config_file() {
        Some(path) => {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            toml::from_str::<Config>(DEFAULT_CONFIG)?
        }
    };
    config.apply_env(|name| std::env::var(name).ok())?;
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }
            tracing::warn!("config.toml not found at: {}", config_path.display());
        }
    }
    let local = PathBuf::from("config.toml");
    local.exists().then_some(local)
}

/// Resolves the upload directory; relative paths are taken from the working directory
pub fn get_upload_dir(config: &Config) -> PathBuf {
    let dir = Path::new(&config.upload.dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(dir))
        .unwrap_or_else(|_| dir.to_path_buf())
}
