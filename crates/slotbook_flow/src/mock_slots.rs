use chrono::{DateTime, Days, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use slotbook_common::time::to_iso_millis;
use slotbook_common::Slot;

/// Local hours at which mock slots start.
pub const MOCK_SLOT_HOURS: [u32; 3] = [10, 14, 18];

pub const MOCK_SLOT_MINUTES: i64 = 30;

/// Fallback availability: three half-hour slots per day for `days` calendar
/// days in `tz`, starting with the day `now` falls on.
///
/// Start and end are UTC with millisecond precision. A local start that does
/// not exist in `tz` (DST gap) is read as UTC instead, so the result always
/// holds `3 * days` slots, sorted by start.
pub fn generate_mock_slots(days: u32, now: DateTime<Utc>, tz: Tz) -> Vec<Slot> {
    let today = now.with_timezone(&tz).date_naive();
    let mut slots = Vec::with_capacity(days as usize * MOCK_SLOT_HOURS.len());

    for offset in 0..days {
        let Some(day) = today.checked_add_days(Days::new(u64::from(offset))) else {
            break;
        };
        for hour in MOCK_SLOT_HOURS {
            let Some(local) = day.and_hms_opt(hour, 0, 0) else {
                continue;
            };
            let start = tz
                .from_local_datetime(&local)
                .earliest()
                .map(|start| start.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&local));
            let end = start + Duration::minutes(MOCK_SLOT_MINUTES);
            slots.push(Slot::new(to_iso_millis(start), to_iso_millis(end)));
        }
    }

    slots.sort_by(|a, b| a.start_utc.cmp(&b.start_utc));
    slots
}
