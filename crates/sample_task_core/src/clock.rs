use crate::error::AppError;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Local date-time with second precision and no offset, e.g. `2025-01-31T09:15:00`.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

pub trait Clock {
    /// Milliseconds from an arbitrary fixed origin. Never goes backwards.
    fn monotonic_millis(&self) -> u64;

    /// Wall-clock milliseconds since the Unix epoch, used to name captured files.
    fn unix_millis(&self) -> u64;

    fn local_timestamp(&self) -> String;
}

pub fn format_timestamp(value: PrimitiveDateTime) -> String {
    value
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| value.to_string())
}

pub fn parse_timestamp(raw: &str) -> Result<PrimitiveDateTime, AppError> {
    PrimitiveDateTime::parse(raw.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| AppError::invalid_data("timestamp must be YYYY-MM-DDTHH:MM:SS"))
}

#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn monotonic_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn unix_millis(&self) -> u64 {
        u64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000).unwrap_or(0)
    }

    fn local_timestamp(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        format_timestamp(PrimitiveDateTime::new(now.date(), now.time()))
    }
}

/// Clock that only moves when told to. Clones share the same elapsed time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    elapsed_ms: Arc<AtomicU64>,
    base: PrimitiveDateTime,
}

impl ManualClock {
    pub fn new(base: PrimitiveDateTime) -> Self {
        Self {
            elapsed_ms: Arc::new(AtomicU64::new(0)),
            base,
        }
    }

    pub fn starting_at(raw: &str) -> Result<Self, AppError> {
        Ok(Self::new(parse_timestamp(raw)?))
    }

    pub fn advance(&self, by: Duration) {
        let millis = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.elapsed_ms.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }

    fn current(&self) -> PrimitiveDateTime {
        let elapsed = i64::try_from(self.monotonic_millis()).unwrap_or(i64::MAX);
        self.base
            .checked_add(time::Duration::milliseconds(elapsed))
            .unwrap_or(self.base)
    }
}

impl Clock for ManualClock {
    fn monotonic_millis(&self) -> u64 {
        self.elapsed_ms.load(Ordering::SeqCst)
    }

    fn unix_millis(&self) -> u64 {
        let base_ms = self.base.assume_utc().unix_timestamp().max(0) as u64 * 1000;
        base_ms + self.monotonic_millis()
    }

    fn local_timestamp(&self) -> String {
        format_timestamp(self.current())
    }
}
