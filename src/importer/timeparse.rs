// ==========================================
// 会议日程图谱构建系统 - 时间解析
// ==========================================
// 依据: Source_Formats_v0.1.md - 3. 时间口径
// 口径: 源表时间为会议本地时间(固定 UTC 偏移),图谱内统一存 UTC
// ==========================================

use crate::importer::error::ImportError;
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// 表格日期列格式
pub const SHEET_DATE_FMT: &str = "%Y-%m-%d %H:%M";

/// booklet/socials 的 ISO 本地时间格式（无时区后缀）
pub const ISO_LOCAL_FMT: &str = "%Y-%m-%dT%H:%M:%S";

// ==========================================
// Spotlight 策略窗口
// ==========================================
// spotlight 表没有可用的时间列,统一落在当日晚间固定窗口;
// 这是显式策略,不是缺省回退
pub const SPOTLIGHT_WINDOW_START: &str = "19:00";
pub const SPOTLIGHT_WINDOW_END: &str = "20:30";

/// 解析 "{日期} {时刻}" 为 UTC 时间
fn parse_local(
    date_str: &str,
    clock: &str,
    offset: FixedOffset,
    context: &str,
) -> Result<DateTime<Utc>, ImportError> {
    let raw = format!("{} {}", date_str.trim(), clock.trim());
    let naive = NaiveDateTime::parse_from_str(&raw, SHEET_DATE_FMT).map_err(|_| {
        ImportError::DateTimeFormat {
            context: context.to_string(),
            value: raw.clone(),
        }
    })?;
    let local = offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| ImportError::DateTimeFormat {
            context: context.to_string(),
            value: raw,
        })?;
    Ok(local.with_timezone(&Utc))
}

/// 解析 "HH:MM-HH:MM" 时间区间
///
/// # 参数
/// - date_str: YYYY-MM-DD
/// - time_str: "09:00-10:30"（容忍 '-' 两侧空白）
/// - offset: 会议本地固定偏移
/// - context: 错误报告用的定位信息（表名/行标识）
pub fn parse_time_range(
    date_str: &str,
    time_str: &str,
    offset: FixedOffset,
    context: &str,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ImportError> {
    let mut parts = time_str.splitn(2, '-');
    let (start, end) = match (parts.next(), parts.next()) {
        (Some(s), Some(e)) => (s, e),
        _ => {
            return Err(ImportError::TimeRangeFormat {
                context: context.to_string(),
                value: time_str.to_string(),
            })
        }
    };
    let start_dt = parse_local(date_str, start, offset, context)?;
    let end_dt = parse_local(date_str, end, offset, context)?;
    Ok((start_dt, end_dt))
}

/// 解析拆成两列的起止时刻（extras 表）
pub fn parse_start_end(
    date_str: &str,
    start_clock: &str,
    end_clock: &str,
    offset: FixedOffset,
    context: &str,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ImportError> {
    let start_dt = parse_local(date_str, start_clock, offset, context)?;
    let end_dt = parse_local(date_str, end_clock, offset, context)?;
    Ok((start_dt, end_dt))
}

/// spotlight 策略窗口（当日 19:00-20:30 会议本地时间）
pub fn spotlight_time_window(
    date_str: &str,
    offset: FixedOffset,
    context: &str,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ImportError> {
    let start_dt = parse_local(date_str, SPOTLIGHT_WINDOW_START, offset, context)?;
    let end_dt = parse_local(date_str, SPOTLIGHT_WINDOW_END, offset, context)?;
    Ok((start_dt, end_dt))
}

/// 解析 booklet/socials 的 ISO 本地时间
pub fn parse_iso_local(
    value: &str,
    offset: FixedOffset,
    context: &str,
) -> Result<DateTime<Utc>, ImportError> {
    let naive =
        NaiveDateTime::parse_from_str(value.trim(), ISO_LOCAL_FMT).map_err(|_| {
            ImportError::DateTimeFormat {
                context: context.to_string(),
                value: value.to_string(),
            }
        })?;
    let local = offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| ImportError::DateTimeFormat {
            context: context.to_string(),
            value: value.to_string(),
        })?;
    Ok(local.with_timezone(&Utc))
}

/// workshop 缺省时长（booklet 未给终点时 start + 8h）
pub const WORKSHOP_DEFAULT_HOURS: i64 = 8;

pub fn default_workshop_end(start: DateTime<Utc>) -> DateTime<Utc> {
    start + Duration::hours(WORKSHOP_DEFAULT_HOURS)
}
