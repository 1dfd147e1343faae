// --- File: crates/slotbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request timeout of the booking API client, in seconds, unless configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// --- Booking API Config ---
// Token may be "secret_from_env", resolved from API_TOKEN.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>, // Mandatory for real (non-mock) flows
    #[serde(default)]
    pub token: Option<String>, // Static fallback bearer token
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// The configured base URL with any trailing `/` removed, or `None` when
    /// it is missing or blank.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
    }

    /// The static token, ignoring blanks and unresolved secret markers.
    pub fn static_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty() && *token != crate::SECRET_MARKER)
    }
}

// --- Widget Behaviour Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WidgetConfig {
    /// Price label shown when the page URL carries no `price` parameter.
    #[serde(default = "default_price")]
    pub default_price: String,
    /// Length of the slot window fetched at mount, and of the mock fallback.
    #[serde(default = "default_slot_window_days")]
    pub slot_window_days: u32,
    /// Simulated round trip for bookings made in mock mode.
    #[serde(default = "default_mock_latency_ms")]
    pub mock_latency_ms: u64,
    /// IANA zone used for mock slot hours and for display.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Offer terms the user agrees to before paying.
    #[serde(default)]
    pub agreement_url: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_price: default_price(),
            slot_window_days: default_slot_window_days(),
            mock_latency_ms: default_mock_latency_ms(),
            time_zone: default_time_zone(),
            locale: default_locale(),
            agreement_url: None,
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    // Practitioner id -> bearer token. Values may be "secret_from_env",
    // resolved from PRACTITIONERS_<ID>.
    #[serde(default)]
    pub practitioners: BTreeMap<String, String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            widget: WidgetConfig::default(),
            practitioners: BTreeMap::new(),
            log_level: default_log_level(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_price() -> String {
    "€20".to_string()
}

fn default_slot_window_days() -> u32 {
    14
}

fn default_mock_latency_ms() -> u64 {
    600
}

fn default_time_zone() -> String {
    "Europe/Kyiv".to_string()
}

fn default_locale() -> String {
    "uk_UA".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
