//! Wall-clock synchronization from a fetched observation timestamp.
//!
//! Embedded targets have no battery-backed clock, so the wall clock is an
//! epoch anchor paired with the monotonic uptime at the moment it was set.
//! Callers pass uptime seconds in, which keeps this module free of any
//! platform time driver.

use chrono::{DateTime, Datelike, FixedOffset, Weekday};
use core::fmt::Write;
use heapless::String;

/// `YYYY/MM/DD` fits comfortably.
pub type DateText = String<16>;

/// Epoch-anchored wall clock with a fixed UTC offset standing in for
/// local-time rules.
pub struct WallClock {
    anchor: Option<Anchor>,
    utc_offset_secs: i32,
}

struct Anchor {
    epoch_secs: i64,
    uptime_secs: u64,
}

impl WallClock {
    pub const fn new(utc_offset_secs: i32) -> Self {
        Self {
            anchor: None,
            utc_offset_secs,
        }
    }

    pub fn utc_offset_secs(&self) -> i32 {
        self.utc_offset_secs
    }

    /// Sets the wall clock to `epoch_secs` as of `uptime_secs`.
    ///
    /// The epoch value is applied as-is; no timezone conversion happens at
    /// this step.
    pub fn apply(&mut self, epoch_secs: i64, uptime_secs: u64) {
        self.anchor = Some(Anchor {
            epoch_secs,
            uptime_secs,
        });
    }

    /// Current epoch seconds extrapolated from the anchor, or `None` if the
    /// clock has never been set.
    pub fn now(&self, uptime_secs: u64) -> Option<i64> {
        let anchor = self.anchor.as_ref()?;
        let elapsed = uptime_secs.saturating_sub(anchor.uptime_secs);
        Some(anchor.epoch_secs + elapsed as i64)
    }

    pub fn is_set(&self) -> bool {
        self.anchor.is_some()
    }
}

/// Converts an epoch timestamp into a `YYYY/MM/DD` date string and a full
/// English weekday name, under the given fixed UTC offset.
///
/// Returns `None` for offsets or timestamps outside chrono's representable
/// range.
pub fn derive_date_and_weekday(
    epoch_secs: i64,
    utc_offset_secs: i32,
) -> Option<(DateText, &'static str)> {
    let offset = FixedOffset::east_opt(utc_offset_secs)?;
    let local = DateTime::from_timestamp(epoch_secs, 0)?.with_timezone(&offset);

    let mut date = DateText::new();
    write!(
        date,
        "{:04}/{:02}/{:02}",
        local.year(),
        local.month(),
        local.day()
    )
    .ok()?;

    Some((date, weekday_name(local.weekday())))
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
