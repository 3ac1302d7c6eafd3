//! Temporal values
//!
//! Six temporal kinds, each its own [`ValueGroup`]:
//!
//! | variant | group | payload |
//! |---|---|---|
//! | `Date` | `DATE` | [`NaiveDate`] |
//! | `LocalTime` | `LOCAL_TIME` | [`NaiveTime`] |
//! | `Time` | `ZONED_TIME` | [`OffsetTime`] |
//! | `LocalDateTime` | `LOCAL_DATE_TIME` | [`NaiveDateTime`] |
//! | `DateTime` | `ZONED_DATE_TIME` | `DateTime<FixedOffset>` |
//! | `Duration` | `DURATION` | [`DurationValue`] |
//!
//! Values with an offset order by the instant they denote first and by the
//! offset second, so `12:00+01:00` and `11:00Z` are ordered but not equal.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{ValueError, ValueResult};
use crate::group::ValueGroup;
use crate::writer::ValueWriter;

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

const SECONDS_PER_DAY: i128 = 86_400;

/// 365.2425 days / 12, in seconds
const AVG_SECONDS_PER_MONTH: i128 = 2_629_746;

pub(crate) const LOCAL_TIME_FORMAT: &str = "%H:%M:%S%.f";
pub(crate) const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

// ============================================================================
// OFFSET TIME
// ============================================================================

/// Time of day with a fixed UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTime {
    time: NaiveTime,
    offset: FixedOffset,
}

impl OffsetTime {
    pub const fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        Self { time, offset }
    }

    /// Build from clock components and an offset east of UTC in seconds
    pub fn from_hms_nano(
        hour: u32,
        minute: u32,
        second: u32,
        nano: u32,
        offset_seconds: i32,
    ) -> ValueResult<Self> {
        let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nano).ok_or_else(|| {
            ValueError::invalid_temporal(format!(
                "time {hour:02}:{minute:02}:{second:02}.{nano:09}"
            ))
        })?;
        let offset = FixedOffset::east_opt(offset_seconds).ok_or_else(|| {
            ValueError::invalid_temporal(format!("offset of {offset_seconds} seconds"))
        })?;
        Ok(Self { time, offset })
    }

    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Nanoseconds since midnight UTC; may lie outside `0..86_400e9`
    pub fn utc_nanos_of_day(&self) -> i64 {
        let local = i64::from(self.time.num_seconds_from_midnight()) * NANOS_PER_SECOND
            + i64::from(self.time.nanosecond());
        local - i64::from(self.offset.local_minus_utc()) * NANOS_PER_SECOND
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        self.utc_nanos_of_day()
            .cmp(&other.utc_nanos_of_day())
            .then_with(|| {
                self.offset
                    .local_minus_utc()
                    .cmp(&other.offset.local_minus_utc())
            })
            .then_with(|| self.time.cmp(&other.time))
    }
}

impl fmt::Display for OffsetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.time.format(LOCAL_TIME_FORMAT), self.offset)
    }
}

// ============================================================================
// DURATION
// ============================================================================

/// Calendar-aware duration: months, days, seconds and nanoseconds
///
/// The components are kept separate because a month has no fixed length.
/// `nanos` is always in `0..1_000_000_000`; negative sub-second amounts borrow
/// from `seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DurationValue {
    months: i64,
    days: i64,
    seconds: i64,
    nanos: i32,
}

impl DurationValue {
    pub const ZERO: Self = Self {
        months: 0,
        days: 0,
        seconds: 0,
        nanos: 0,
    };

    /// Build a duration, carrying whole seconds out of `nanos`
    pub fn new(months: i64, days: i64, seconds: i64, nanos: i64) -> ValueResult<Self> {
        let seconds = seconds
            .checked_add(nanos.div_euclid(NANOS_PER_SECOND))
            .ok_or_else(|| ValueError::overflow("duration normalization"))?;
        Ok(Self {
            months,
            days,
            seconds,
            nanos: nanos.rem_euclid(NANOS_PER_SECOND) as i32,
        })
    }

    pub const fn months(&self) -> i64 {
        self.months
    }

    pub const fn days(&self) -> i64 {
        self.days
    }

    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    pub const fn nanos(&self) -> i32 {
        self.nanos
    }

    pub const fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0 && self.seconds == 0 && self.nanos == 0
    }

    /// Length in nanoseconds with a month counted as 1/12 of 365.2425 days
    pub fn average_length_nanos(&self) -> i128 {
        let seconds = i128::from(self.months) * AVG_SECONDS_PER_MONTH
            + i128::from(self.days) * SECONDS_PER_DAY
            + i128::from(self.seconds);
        seconds * i128::from(NANOS_PER_SECOND) + i128::from(self.nanos)
    }

    /// Average length first, then months, then days
    pub fn compare(&self, other: &Self) -> Ordering {
        self.average_length_nanos()
            .cmp(&other.average_length_nanos())
            .then_with(|| self.months.cmp(&other.months))
            .then_with(|| self.days.cmp(&other.days))
    }
}

/// ISO-8601, e.g. `P1Y2M3DT4H5M6.5S`; zero is `PT0S`
impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("PT0S");
        }
        f.write_str("P")?;
        let (years, months) = (self.months / 12, self.months % 12);
        if years != 0 {
            write!(f, "{years}Y")?;
        }
        if months != 0 {
            write!(f, "{months}M")?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }

        let nanos_total =
            i128::from(self.seconds) * i128::from(NANOS_PER_SECOND) + i128::from(self.nanos);
        if nanos_total == 0 {
            return Ok(());
        }
        f.write_str("T")?;
        let sign = if nanos_total < 0 { "-" } else { "" };
        let abs = nanos_total.unsigned_abs();
        let nanos_per_second = NANOS_PER_SECOND as u128;
        let hours = abs / (3_600 * nanos_per_second);
        let minutes = abs / (60 * nanos_per_second) % 60;
        let seconds = abs / nanos_per_second % 60;
        let fraction = abs % nanos_per_second;
        if hours != 0 {
            write!(f, "{sign}{hours}H")?;
        }
        if minutes != 0 {
            write!(f, "{sign}{minutes}M")?;
        }
        if seconds != 0 || fraction != 0 {
            write!(f, "{sign}{seconds}")?;
            if fraction != 0 {
                let digits = format!("{fraction:09}");
                write!(f, ".{}", digits.trim_end_matches('0'))?;
            }
            f.write_str("S")?;
        }
        Ok(())
    }
}

// ============================================================================
// TEMPORAL VALUE
// ============================================================================

/// Any temporal value
#[derive(Debug, Clone, Copy)]
pub enum TemporalValue {
    Date(NaiveDate),
    LocalTime(NaiveTime),
    Time(OffsetTime),
    LocalDateTime(NaiveDateTime),
    DateTime(DateTime<FixedOffset>),
    Duration(DurationValue),
}

impl TemporalValue {
    pub const fn value_group(&self) -> ValueGroup {
        match self {
            Self::Date(_) => ValueGroup::Date,
            Self::LocalTime(_) => ValueGroup::LocalTime,
            Self::Time(_) => ValueGroup::ZonedTime,
            Self::LocalDateTime(_) => ValueGroup::LocalDateTime,
            Self::DateTime(_) => ValueGroup::ZonedDateTime,
            Self::Duration(_) => ValueGroup::Duration,
        }
    }

    /// Order within a group; different kinds order by group
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::LocalTime(a), Self::LocalTime(b)) => a.cmp(b),
            (Self::Time(a), Self::Time(b)) => a.compare(b),
            (Self::LocalDateTime(a), Self::LocalDateTime(b)) => a.cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => compare_date_time(a, b),
            (Self::Duration(a), Self::Duration(b)) => a.compare(b),
            _ => self.value_group().cmp(&other.value_group()),
        }
    }

    pub(crate) fn hash_into<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Date(v) => v.hash(state),
            Self::LocalTime(v) => v.hash(state),
            Self::Time(v) => v.hash(state),
            Self::LocalDateTime(v) => v.hash(state),
            Self::DateTime(v) => {
                state.write_i64(v.timestamp());
                state.write_u32(v.timestamp_subsec_nanos());
                state.write_i32(v.offset().local_minus_utc());
            }
            Self::Duration(v) => v.hash(state),
        }
    }

    pub fn write_to<W: ValueWriter + ?Sized>(&self, writer: &mut W) -> Result<(), W::Error> {
        match *self {
            Self::Date(v) => writer.write_date(v),
            Self::LocalTime(v) => writer.write_local_time(v),
            Self::Time(v) => writer.write_time(v),
            Self::LocalDateTime(v) => writer.write_local_date_time(v),
            Self::DateTime(v) => writer.write_date_time(v),
            Self::Duration(v) => writer.write_duration(v),
        }
    }
}

/// Instant first, then offset; chrono's own `Eq` ignores the offset
pub(crate) fn compare_date_time(a: &DateTime<FixedOffset>, b: &DateTime<FixedOffset>) -> Ordering {
    a.cmp(b)
        .then_with(|| a.offset().local_minus_utc().cmp(&b.offset().local_minus_utc()))
}
