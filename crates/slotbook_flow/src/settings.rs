use slotbook_config::WidgetConfig;
use std::time::Duration;

use crate::display::{parse_locale, parse_time_zone, SlotFormatter};

/// Flow tunables resolved from the `widget` configuration section.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    /// Days of availability requested from the API and generated in mock mode.
    pub window_days: u32,
    /// Simulated round trip of a mock booking.
    pub mock_latency: Duration,
    /// Price shown when the page URL carries none.
    pub default_price: String,
    pub agreement_url: Option<String>,
    pub formatter: SlotFormatter,
}

impl FlowSettings {
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self {
            window_days: config.slot_window_days,
            mock_latency: Duration::from_millis(config.mock_latency_ms),
            default_price: config.default_price.clone(),
            agreement_url: config
                .agreement_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            formatter: SlotFormatter::new(
                parse_time_zone(&config.time_zone),
                parse_locale(&config.locale),
            ),
        }
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self::from_config(&WidgetConfig::default())
    }
}
