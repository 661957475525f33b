//! 时间类型模块
//!
//! 提供三个概念：
//! - `Timestamp`: 可序列化的毫秒时间戳，用于传输、存储和比较
//! - `LocalClock`: 视图侧的时钟快照（当前时刻 + 本地时区偏移）
//! - `DateRange`: 相对日期区间（今天 / 近 7 天 / 近 30 天），用于列表过滤
//!
//! 时间戳一律按 UTC 传输和比较；"今天" 的边界与界面显示
//! 则按访问者的本地时区计算，偏移量由视图层从浏览器取得。
//!
//! 后端的时间字段形态不统一：部分接口返回毫秒数，部分返回
//! RFC 3339 或不带时区的 `LocalDateTime` 字符串。`Timestamp`
//! 的反序列化对这三种形态都宽容，序列化统一输出毫秒数。

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::time::Duration;

// =========================================================
// Timestamp - 可传输的时间戳类型
// =========================================================

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    /// 创建新的时间戳
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    /// 获取毫秒值
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// 获取秒值
    #[inline]
    pub const fn as_secs(&self) -> i64 {
        self.0 / 1000
    }

    /// 从时间字符串解析
    ///
    /// 依次尝试 RFC 3339 与不带时区的 `LocalDateTime`
    /// （如 `2026-08-30T19:30:00`，按 UTC 解释）。
    /// 返回 None 如果解析失败
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.timestamp_millis()));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Self(naive.and_utc().timestamp_millis()));
            }
        }
        None
    }

    /// 界面显示用的格式化串 `YYYY-MM-DD HH:MM`，按给定偏移换算成本地时间
    pub fn display(&self, offset_minutes: i32) -> String {
        let local = self.0 + i64::from(offset_minutes) * 60_000;
        match DateTime::<Utc>::from_timestamp_millis(local) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            None => "-".to_string(),
        }
    }

    /// 本地当天零点对应的 UTC 时间戳
    ///
    /// `offset_minutes` 为本地时区相对 UTC 的偏移（东为正，UTC+8 即 480）。
    pub fn start_of_day(&self, offset_minutes: i32) -> Self {
        let shift = i64::from(offset_minutes) * 60_000;
        match DateTime::<Utc>::from_timestamp_millis(self.0 + shift) {
            Some(dt) => {
                let midnight = dt
                    .date_naive()
                    .and_hms_opt(0, 0, 0)
                    .expect("midnight is a valid time");
                Self(midnight.and_utc().timestamp_millis() - shift)
            }
            // 超出 chrono 可表示范围时退回原值
            None => *self,
        }
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.as_millis() as i64)
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self(self.0 - rhs.as_millis() as i64)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("epoch milliseconds or a datetime string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
        Ok(Timestamp(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
        Ok(Timestamp(v as i64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Timestamp, E> {
        Ok(Timestamp(v as i64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
        Timestamp::parse(v)
            .ok_or_else(|| E::custom(format!("unrecognized datetime string: {v}")))
    }
}

// =========================================================
// LocalClock - 视图侧时钟快照
// =========================================================

/// 当前时刻与访问者本地时区偏移的快照
///
/// 整批过滤取一次快照，所有条目共用同一 "现在"。偏移量由
/// 视图层从浏览器取得，纯计算层不关心它的来源。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalClock {
    pub now: Timestamp,
    /// 本地时区相对 UTC 的偏移（东为正）
    pub offset_minutes: i32,
}

impl LocalClock {
    pub fn new(now: Timestamp, offset_minutes: i32) -> Self {
        Self {
            now,
            offset_minutes,
        }
    }

    /// 按 UTC 解读的时钟，测试与不关心时区的场合使用
    pub fn utc(now: Timestamp) -> Self {
        Self::new(now, 0)
    }
}

// =========================================================
// DateRange - 相对日期区间
// =========================================================

/// 相对日期区间过滤
///
/// 截止点以传入的时钟快照为基准计算一次，整批过滤使用同一截止点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    /// 今天（本地当天零点起）
    Today,
    /// 近 7 天
    Last7Days,
    /// 近 30 天
    Last30Days,
}

impl DateRange {
    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    /// 计算截止时间戳；时间戳 >= 截止点的条目保留
    ///
    /// 只有 "今天" 依赖天然的日界，因此只有它用到时区偏移；
    /// 近 7 / 30 天是纯粹的时长回溯。
    pub fn cutoff(&self, clock: LocalClock) -> Timestamp {
        match self {
            DateRange::Today => clock.now.start_of_day(clock.offset_minutes),
            DateRange::Last7Days => clock.now - 7 * Self::DAY,
            DateRange::Last30Days => clock.now - 30 * Self::DAY,
        }
    }

    /// 判断时间戳是否落在区间内
    pub fn contains(&self, ts: Timestamp, clock: LocalClock) -> bool {
        ts >= self.cutoff(clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rfc3339() {
        let ts = Timestamp::parse("2026-08-30T12:00:00Z").unwrap();
        assert_eq!(ts.as_secs() % 86400, 12 * 3600);
    }

    #[test]
    fn parse_local_datetime_without_offset() {
        assert!(Timestamp::parse("2026-08-30T19:30:00").is_some());
        assert!(Timestamp::parse("2026-08-30 19:30:00.123").is_some());
        assert!(Timestamp::parse("not a date").is_none());
    }

    #[test]
    fn display_is_minute_precision() {
        let ts = Timestamp::parse("2026-08-30T19:30:45Z").unwrap();
        assert_eq!(ts.display(0), "2026-08-30 19:30");
    }

    #[test]
    fn display_shifts_into_local_time() {
        let ts = Timestamp::parse("2026-08-30T19:30:00Z").unwrap();
        // UTC+5:30，跨入次日
        assert_eq!(ts.display(330), "2026-08-31 01:00");
        // UTC-5
        assert_eq!(ts.display(-300), "2026-08-30 14:30");
    }

    #[test]
    fn deserializes_millis_and_strings() {
        let a: Timestamp = serde_json::from_str("1756500000000").unwrap();
        assert_eq!(a.as_millis(), 1_756_500_000_000);
        let b: Timestamp = serde_json::from_str("\"2026-08-30T00:00:00Z\"").unwrap();
        assert_eq!(b.start_of_day(0), b);
    }

    #[test]
    fn today_cutoff_is_start_of_day() {
        let now = Timestamp::parse("2026-08-30T15:45:00Z").unwrap();
        let clock = LocalClock::utc(now);
        let cutoff = DateRange::Today.cutoff(clock);
        assert_eq!(cutoff, Timestamp::parse("2026-08-30T00:00:00Z").unwrap());
        assert!(DateRange::Today.contains(now, clock));
        let yesterday = Timestamp::parse("2026-08-29T23:59:00Z").unwrap();
        assert!(!DateRange::Today.contains(yesterday, clock));
    }

    #[test]
    fn today_boundary_follows_local_timezone() {
        // UTC+8 的早晨 9 点，即 UTC 的 01:00；本地日界是 UTC 前一日 16:00
        let now = Timestamp::parse("2026-08-30T01:00:00Z").unwrap();
        let east = LocalClock::new(now, 480);
        assert_eq!(
            DateRange::Today.cutoff(east),
            Timestamp::parse("2026-08-29T16:00:00Z").unwrap()
        );
        // 本地日内但 UTC 日之外的条目算 "今天"
        let late_yesterday_utc = Timestamp::parse("2026-08-29T18:00:00Z").unwrap();
        assert!(DateRange::Today.contains(late_yesterday_utc, east));

        // UTC-5 的傍晚：UTC 当日凌晨的条目在本地还属于昨天
        let now = Timestamp::parse("2026-08-30T23:00:00Z").unwrap();
        let west = LocalClock::new(now, -300);
        let early_today_utc = Timestamp::parse("2026-08-30T02:00:00Z").unwrap();
        assert!(!DateRange::Today.contains(early_today_utc, west));
    }

    #[test]
    fn relative_cutoffs() {
        let now = Timestamp::new(100 * 24 * 3600 * 1000);
        let clock = LocalClock::utc(now);
        let eight_days_ago = now - Duration::from_secs(8 * 24 * 3600);
        assert!(!DateRange::Last7Days.contains(eight_days_ago, clock));
        assert!(DateRange::Last30Days.contains(eight_days_ago, clock));
    }
}
