use log::Level;
use web_sys::window;

const STORAGE_PREFIX: &str = "demandcast_";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Prediction API host (e.g., "localhost" or "api.example.com")
    pub api_host: String,

    /// Prediction API port (e.g., 8000)
    pub api_port: u16,

    /// API path prefix, empty when the service is mounted at the root
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Request timeout in milliseconds; forecasts routinely take over a minute
    pub request_timeout_ms: u32,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,

    /// Number of runs listed on the history page
    pub history_limit: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 8000,
            api_path: String::new(),
            api_use_https: false,
            log_level: Level::Info,
            request_timeout_ms: 120_000,
            debug_mode: false,
            toast_duration_ms: 5000,
            history_limit: 4,
        }
    }
}

fn storage_key(name: &str) -> String {
    format!("{}{}", STORAGE_PREFIX, name)
}

fn parse_level(raw: &str) -> Option<Level> {
    match raw.to_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        "trace" => Some(Level::Trace),
        _ => None,
    }
}

impl AppSettings {
    /// Create settings from environment/window location
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        let Ok(Some(storage)) = window.local_storage() else {
            return settings;
        };
        let read = |name: &str| storage.get_item(&storage_key(name)).ok().flatten();

        if let Some(api_host) = read("api_host") {
            settings.api_host = api_host;
        }
        if let Some(port) = read("api_port").and_then(|v| v.parse().ok()) {
            settings.api_port = port;
        }
        if let Some(api_path) = read("api_path") {
            settings.api_path = api_path;
        }
        if let Some(use_https) = read("api_use_https") {
            settings.api_use_https = use_https.to_lowercase() == "true";
        }
        if let Some(level) = read("log_level").as_deref().and_then(parse_level) {
            settings.log_level = level;
        }
        if let Some(timeout) = read("request_timeout_ms").and_then(|v| v.parse().ok()) {
            settings.request_timeout_ms = timeout;
        }
        if let Some(duration) = read("toast_duration_ms").and_then(|v| v.parse().ok()) {
            settings.toast_duration_ms = duration;
        }

        settings
    }

    /// Get the base API URL (protocol + host + port)
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}{}", protocol, self.api_host, self.api_port, self.api_path)
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url(), endpoint)
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
