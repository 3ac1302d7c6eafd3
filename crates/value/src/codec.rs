//! Reference binary encoding
//!
//! A compact, tag-prefixed, big-endian byte form that exercises the writer
//! contract end to end: [`BinaryWriter`] is an ordinary [`ValueWriter`], and
//! [`decode_value`] parses the bytes back by driving a [`ValueBuilder`].
//! It is not a storage or wire format.
//!
//! ```text
//! 0x00 null
//! 0x01 boolean          u8
//! 0x02 byte             i8
//! 0x03 short            i16
//! 0x04 int              i32
//! 0x05 long             i64
//! 0x06 float            f32
//! 0x07 double           f64
//! 0x08 char             u32 scalar value
//! 0x09 string           u32 length, UTF-8 bytes
//! 0x0A date             i32 days from 0001-01-01 (day 1)
//! 0x0B local time       u32 seconds of day, u32 nanos
//! 0x0C time             u32 seconds of day, u32 nanos, i32 offset seconds
//! 0x0D local date time  i64 epoch seconds, u32 nanos
//! 0x0E date time        i64 epoch seconds (UTC), u32 nanos, i32 offset seconds
//! 0x0F duration         i64 months, i64 days, i64 seconds, i32 nanos
//! 0x10 point            i32 srid, u8 dimension, f64 per coordinate
//! 0x11 array            u8 element type, u32 length, tagged elements
//! 0x12 byte array       u32 length, raw bytes
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use smallvec::SmallVec;

use crate::error::{ValueError, ValueResult};
use crate::limits::ValueLimits;
use crate::point::CoordinateReferenceSystem;
use crate::temporal::{DurationValue, OffsetTime};
use crate::value::Value;
use crate::writer::{ArrayType, ValueBuilder, ValueWriter};

mod tag {
    pub const NULL: u8 = 0x00;
    pub const BOOLEAN: u8 = 0x01;
    pub const BYTE: u8 = 0x02;
    pub const SHORT: u8 = 0x03;
    pub const INT: u8 = 0x04;
    pub const LONG: u8 = 0x05;
    pub const FLOAT: u8 = 0x06;
    pub const DOUBLE: u8 = 0x07;
    pub const CHAR: u8 = 0x08;
    pub const STRING: u8 = 0x09;
    pub const DATE: u8 = 0x0A;
    pub const LOCAL_TIME: u8 = 0x0B;
    pub const TIME: u8 = 0x0C;
    pub const LOCAL_DATE_TIME: u8 = 0x0D;
    pub const DATE_TIME: u8 = 0x0E;
    pub const DURATION: u8 = 0x0F;
    pub const POINT: u8 = 0x10;
    pub const ARRAY: u8 = 0x11;
    pub const BYTE_ARRAY: u8 = 0x12;
}

/// Encode a value into a fresh buffer
///
/// # Errors
///
/// [`ValueError::LimitExceeded`] if a string or array is longer than
/// `u32::MAX`.
pub fn encode_value(value: &Value) -> ValueResult<Bytes> {
    let mut writer = BinaryWriter::new();
    value.write_to(&mut writer)?;
    Ok(writer.into_bytes())
}

/// Decode exactly one value, rejecting trailing bytes
///
/// # Errors
///
/// [`ValueError::Decode`] for malformed input. Limit and protocol violations
/// raised by the [`ValueBuilder`] are returned as they are.
pub fn decode_value(input: &[u8], limits: &ValueLimits) -> ValueResult<Value> {
    let mut decoder = Decoder {
        buf: input,
        total: input.len(),
    };
    let mut builder = ValueBuilder::with_limits(*limits);
    decoder
        .value(&mut builder, true)
        .and_then(|()| decoder.expect_end())
        .and_then(|()| builder.finish())
        .inspect_err(|error| tracing::debug!(%error, len = input.len(), "failed to decode value"))
}

// ============================================================================
// ENCODER
// ============================================================================

/// [`ValueWriter`] producing the reference byte form
#[derive(Debug, Default)]
pub struct BinaryWriter {
    buf: BytesMut,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    fn put_len(&mut self, len: usize) -> ValueResult<()> {
        let len = u32::try_from(len)
            .map_err(|_| ValueError::limit_exceeded("encoded length", u32::MAX as usize, len))?;
        self.buf.put_u32(len);
        Ok(())
    }

    fn put_time_of_day(&mut self, time: NaiveTime) {
        self.buf.put_u32(time.num_seconds_from_midnight());
        self.buf.put_u32(time.nanosecond());
    }
}

impl ValueWriter for BinaryWriter {
    type Error = ValueError;

    fn write_null(&mut self) -> ValueResult<()> {
        self.buf.put_u8(tag::NULL);
        Ok(())
    }

    fn write_boolean(&mut self, value: bool) -> ValueResult<()> {
        self.buf.put_u8(tag::BOOLEAN);
        self.buf.put_u8(value.into());
        Ok(())
    }

    fn write_i8(&mut self, value: i8) -> ValueResult<()> {
        self.buf.put_u8(tag::BYTE);
        self.buf.put_i8(value);
        Ok(())
    }

    fn write_i16(&mut self, value: i16) -> ValueResult<()> {
        self.buf.put_u8(tag::SHORT);
        self.buf.put_i16(value);
        Ok(())
    }

    fn write_i32(&mut self, value: i32) -> ValueResult<()> {
        self.buf.put_u8(tag::INT);
        self.buf.put_i32(value);
        Ok(())
    }

    fn write_i64(&mut self, value: i64) -> ValueResult<()> {
        self.buf.put_u8(tag::LONG);
        self.buf.put_i64(value);
        Ok(())
    }

    fn write_f32(&mut self, value: f32) -> ValueResult<()> {
        self.buf.put_u8(tag::FLOAT);
        self.buf.put_f32(value);
        Ok(())
    }

    fn write_f64(&mut self, value: f64) -> ValueResult<()> {
        self.buf.put_u8(tag::DOUBLE);
        self.buf.put_f64(value);
        Ok(())
    }

    fn write_char(&mut self, value: char) -> ValueResult<()> {
        self.buf.put_u8(tag::CHAR);
        self.buf.put_u32(value.into());
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> ValueResult<()> {
        self.buf.put_u8(tag::STRING);
        self.put_len(value.len())?;
        self.buf.put_slice(value.as_bytes());
        Ok(())
    }

    fn write_date(&mut self, value: NaiveDate) -> ValueResult<()> {
        self.buf.put_u8(tag::DATE);
        self.buf.put_i32(value.num_days_from_ce());
        Ok(())
    }

    fn write_local_time(&mut self, value: NaiveTime) -> ValueResult<()> {
        self.buf.put_u8(tag::LOCAL_TIME);
        self.put_time_of_day(value);
        Ok(())
    }

    fn write_time(&mut self, value: OffsetTime) -> ValueResult<()> {
        self.buf.put_u8(tag::TIME);
        self.put_time_of_day(value.time());
        self.buf.put_i32(value.offset().local_minus_utc());
        Ok(())
    }

    fn write_local_date_time(&mut self, value: NaiveDateTime) -> ValueResult<()> {
        let utc = value.and_utc();
        self.buf.put_u8(tag::LOCAL_DATE_TIME);
        self.buf.put_i64(utc.timestamp());
        self.buf.put_u32(utc.timestamp_subsec_nanos());
        Ok(())
    }

    fn write_date_time(&mut self, value: DateTime<FixedOffset>) -> ValueResult<()> {
        self.buf.put_u8(tag::DATE_TIME);
        self.buf.put_i64(value.timestamp());
        self.buf.put_u32(value.timestamp_subsec_nanos());
        self.buf.put_i32(value.offset().local_minus_utc());
        Ok(())
    }

    fn write_duration(&mut self, value: DurationValue) -> ValueResult<()> {
        self.buf.put_u8(tag::DURATION);
        self.buf.put_i64(value.months());
        self.buf.put_i64(value.days());
        self.buf.put_i64(value.seconds());
        self.buf.put_i32(value.nanos());
        Ok(())
    }

    fn write_point(
        &mut self,
        crs: CoordinateReferenceSystem,
        coordinates: &[f64],
    ) -> ValueResult<()> {
        self.buf.put_u8(tag::POINT);
        self.buf.put_i32(crs.code());
        // dimension is 2 or 3
        self.buf.put_u8(coordinates.len() as u8);
        for &c in coordinates {
            self.buf.put_f64(c);
        }
        Ok(())
    }

    fn begin_array(&mut self, len: usize, element_type: ArrayType) -> ValueResult<()> {
        self.buf.put_u8(tag::ARRAY);
        self.buf.put_u8(element_type as u8);
        self.put_len(len)
    }

    fn end_array(&mut self) -> ValueResult<()> {
        Ok(())
    }

    fn write_byte_array(&mut self, value: &[i8]) -> ValueResult<()> {
        self.buf.put_u8(tag::BYTE_ARRAY);
        self.put_len(value.len())?;
        self.buf.reserve(value.len());
        for &b in value {
            self.buf.put_i8(b);
        }
        Ok(())
    }
}

// ============================================================================
// DECODER
// ============================================================================

struct Decoder<'a> {
    buf: &'a [u8],
    total: usize,
}

impl<'a> Decoder<'a> {
    fn offset(&self) -> usize {
        self.total - self.buf.remaining()
    }

    fn error(&self, reason: impl Into<String>) -> ValueError {
        ValueError::decode(self.offset(), reason)
    }

    fn need(&self, n: usize) -> ValueResult<()> {
        if self.buf.remaining() < n {
            return Err(self.error(format!(
                "truncated input: need {n} bytes, {} left",
                self.buf.remaining()
            )));
        }
        Ok(())
    }

    fn expect_end(&self) -> ValueResult<()> {
        if self.buf.has_remaining() {
            return Err(self.error(format!("{} trailing bytes", self.buf.remaining())));
        }
        Ok(())
    }

    fn u8(&mut self) -> ValueResult<u8> {
        self.need(1)?;
        Ok(self.buf.get_u8())
    }

    fn u32(&mut self) -> ValueResult<u32> {
        self.need(4)?;
        Ok(self.buf.get_u32())
    }

    fn i32(&mut self) -> ValueResult<i32> {
        self.need(4)?;
        Ok(self.buf.get_i32())
    }

    fn i64(&mut self) -> ValueResult<i64> {
        self.need(8)?;
        Ok(self.buf.get_i64())
    }

    fn f64(&mut self) -> ValueResult<f64> {
        self.need(8)?;
        Ok(self.buf.get_f64())
    }

    fn len(&mut self) -> ValueResult<usize> {
        Ok(self.u32()? as usize)
    }

    fn bytes(&mut self, n: usize) -> ValueResult<&'a [u8]> {
        self.need(n)?;
        let (head, rest) = self.buf.split_at(n);
        self.buf = rest;
        Ok(head)
    }

    fn time_of_day(&mut self) -> ValueResult<NaiveTime> {
        let seconds = self.u32()?;
        let nanos = self.u32()?;
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos)
            .ok_or_else(|| self.error(format!("invalid time of day {seconds}s {nanos}ns")))
    }

    fn offset_seconds(&mut self) -> ValueResult<FixedOffset> {
        let seconds = self.i32()?;
        FixedOffset::east_opt(seconds)
            .ok_or_else(|| self.error(format!("invalid offset of {seconds} seconds")))
    }

    fn instant(&mut self) -> ValueResult<DateTime<chrono::Utc>> {
        let seconds = self.i64()?;
        let nanos = self.u32()?;
        DateTime::from_timestamp(seconds, nanos)
            .ok_or_else(|| self.error(format!("instant {seconds}s {nanos}ns out of range")))
    }

    /// One tagged value; arrays only at the top level
    fn value(&mut self, builder: &mut ValueBuilder, top_level: bool) -> ValueResult<()> {
        let start = self.offset();
        match self.u8()? {
            tag::NULL => builder.write_null(),
            tag::BOOLEAN => match self.u8()? {
                0 => builder.write_boolean(false),
                1 => builder.write_boolean(true),
                other => Err(self.error(format!("invalid boolean byte {other:#04x}"))),
            },
            tag::BYTE => {
                self.need(1)?;
                builder.write_i8(self.buf.get_i8())
            }
            tag::SHORT => {
                self.need(2)?;
                builder.write_i16(self.buf.get_i16())
            }
            tag::INT => builder.write_i32(self.i32()?),
            tag::LONG => builder.write_i64(self.i64()?),
            tag::FLOAT => {
                self.need(4)?;
                builder.write_f32(self.buf.get_f32())
            }
            tag::DOUBLE => builder.write_f64(self.f64()?),
            tag::CHAR => {
                let code = self.u32()?;
                let c = char::from_u32(code)
                    .ok_or_else(|| self.error(format!("invalid char U+{code:X}")))?;
                builder.write_char(c)
            }
            tag::STRING => {
                let len = self.len()?;
                let offset = self.offset();
                let s = std::str::from_utf8(self.bytes(len)?)
                    .map_err(|e| ValueError::decode(offset, format!("invalid UTF-8: {e}")))?;
                builder.write_string(s)
            }
            tag::DATE => {
                let days = self.i32()?;
                let date = NaiveDate::from_num_days_from_ce_opt(days)
                    .ok_or_else(|| self.error(format!("day {days} out of range")))?;
                builder.write_date(date)
            }
            tag::LOCAL_TIME => builder.write_local_time(self.time_of_day()?),
            tag::TIME => {
                let time = self.time_of_day()?;
                let offset = self.offset_seconds()?;
                builder.write_time(OffsetTime::new(time, offset))
            }
            tag::LOCAL_DATE_TIME => builder.write_local_date_time(self.instant()?.naive_utc()),
            tag::DATE_TIME => {
                let instant = self.instant()?;
                let offset = self.offset_seconds()?;
                builder.write_date_time(instant.with_timezone(&offset))
            }
            tag::DURATION => {
                let months = self.i64()?;
                let days = self.i64()?;
                let seconds = self.i64()?;
                let nanos = self.i32()?;
                if !(0..1_000_000_000).contains(&nanos) {
                    return Err(self.error(format!("duration nanos {nanos} out of range")));
                }
                builder.write_duration(DurationValue::new(
                    months,
                    days,
                    seconds,
                    nanos.into(),
                )?)
            }
            tag::POINT => {
                let code = self.i32()?;
                let crs = CoordinateReferenceSystem::from_code(code)
                    .ok_or_else(|| self.error(format!("unknown srid {code}")))?;
                let dimension = usize::from(self.u8()?);
                if dimension != crs.dimension() {
                    return Err(self.error(format!(
                        "{crs} expects {} coordinates, got {dimension}",
                        crs.dimension()
                    )));
                }
                let mut coordinates = SmallVec::<[f64; 3]>::new();
                for _ in 0..dimension {
                    coordinates.push(self.f64()?);
                }
                builder.write_point(crs, &coordinates)
            }
            tag::ARRAY if top_level => {
                let code = self.u8()?;
                let element_type = ArrayType::ALL
                    .get(usize::from(code))
                    .copied()
                    .ok_or_else(|| self.error(format!("unknown array element type {code}")))?;
                let len = self.len()?;
                builder.begin_array(len, element_type)?;
                for _ in 0..len {
                    self.value(builder, false)?;
                }
                builder.end_array()
            }
            tag::BYTE_ARRAY if top_level => {
                let len = self.len()?;
                let bytes: Vec<i8> = self
                    .bytes(len)?
                    .iter()
                    .map(|&b| i8::from_be_bytes([b]))
                    .collect();
                builder.write_byte_array(&bytes)
            }
            tag::ARRAY | tag::BYTE_ARRAY => {
                Err(ValueError::decode(start, "arrays cannot be nested"))
            }
            other => Err(ValueError::decode(start, format!("unknown tag {other:#04x}"))),
        }
    }
}
