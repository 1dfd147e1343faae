//! Local time strings for slot labels. Display only: nothing here feeds
//! back into requests.

use chrono::{DateTime, Locale};
use chrono_tz::Tz;
use slotbook_common::Slot;
use tracing::warn;

/// Maps a configured locale name (`uk_UA`, `uk-UA`, `uk`) to chrono's tables.
/// Unknown names fall back to POSIX.
pub fn parse_locale(name: &str) -> Locale {
    match name.trim().replace('-', "_").as_str() {
        "uk" | "uk_UA" => Locale::uk_UA,
        "en" | "en_US" => Locale::en_US,
        "en_GB" => Locale::en_GB,
        "de" | "de_DE" => Locale::de_DE,
        "de_CH" => Locale::de_CH,
        "fr" | "fr_FR" => Locale::fr_FR,
        "pl" | "pl_PL" => Locale::pl_PL,
        "" | "C" | "POSIX" => Locale::POSIX,
        other => {
            warn!("Unsupported locale '{}', using POSIX", other);
            Locale::POSIX
        }
    }
}

/// Parses an IANA zone name, falling back to UTC.
pub fn parse_time_zone(name: &str) -> Tz {
    name.trim().parse().unwrap_or_else(|_| {
        warn!("Unknown time zone '{}', using UTC", name);
        Tz::UTC
    })
}

/// Renders UTC slot times in the visitor's zone and language.
#[derive(Debug, Clone, Copy)]
pub struct SlotFormatter {
    pub tz: Tz,
    pub locale: Locale,
}

impl Default for SlotFormatter {
    fn default() -> Self {
        Self {
            tz: Tz::UTC,
            locale: Locale::POSIX,
        }
    }
}

impl SlotFormatter {
    pub fn new(tz: Tz, locale: Locale) -> Self {
        Self { tz, locale }
    }

    fn render(&self, iso: &str, pattern: &str) -> String {
        match DateTime::parse_from_rfc3339(iso.trim()) {
            Ok(at) => at
                .with_timezone(&self.tz)
                .format_localized(pattern, self.locale)
                .to_string(),
            Err(_) => iso.to_string(),
        }
    }

    /// `HH:MM` in the local zone.
    pub fn format_local_time(&self, iso: &str) -> String {
        self.render(iso, "%H:%M")
    }

    /// Abbreviated weekday with day and month, e.g. `Mon, 05.05`.
    pub fn format_local_date(&self, iso: &str) -> String {
        self.render(iso, "%a, %d.%m")
    }

    /// `10:00 — 10:30 (Mon, 05.05)`
    pub fn format_slot_label(&self, slot: &Slot) -> String {
        format!(
            "{} — {} ({})",
            self.format_local_time(&slot.start_utc),
            self.format_local_time(&slot.end_utc),
            self.format_local_date(&slot.start_utc)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> Slot {
        Slot::new("2025-05-05T07:00:00.000Z", "2025-05-05T07:30:00.000Z")
    }

    #[test]
    fn test_label_in_utc() {
        let fmt = SlotFormatter::default();
        assert_eq!(fmt.format_slot_label(&slot()), "07:00 — 07:30 (Mon, 05.05)");
    }

    #[test]
    fn test_label_in_kyiv() {
        let fmt = SlotFormatter::new(chrono_tz::Europe::Kyiv, Locale::POSIX);
        assert_eq!(fmt.format_slot_label(&slot()), "10:00 — 10:30 (Mon, 05.05)");
    }

    #[test]
    fn test_localized_weekday() {
        let fmt = SlotFormatter::new(chrono_tz::Europe::Kyiv, Locale::uk_UA);
        assert_eq!(fmt.format_local_date("2025-05-05T07:00:00Z"), "пн, 05.05");
    }

    #[test]
    fn test_unparseable_input_is_echoed() {
        let fmt = SlotFormatter::default();
        assert_eq!(fmt.format_local_time("soon"), "soon");
        assert_eq!(
            fmt.format_slot_label(&Slot::new("a", "b")),
            "a — b (a)"
        );
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_locale("uk-UA"), Locale::uk_UA);
        assert_eq!(parse_locale("xx_YY"), Locale::POSIX);
        assert_eq!(parse_time_zone("Europe/Kyiv"), chrono_tz::Europe::Kyiv);
        assert_eq!(parse_time_zone("Mars/Olympus"), Tz::UTC);
    }
}
