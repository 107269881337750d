// ==========================================
// 会议日程图谱构建系统 - 杂项活动表解析器
// ==========================================
// 依据: Source_Formats_v0.1.md - 7. extras 工作簿
// ==========================================
// 结构: 两张工作表
//   - "Tracks": 轨道显示名 → 类型 token（break/social/plenary）
//   - "Events": 带时间的杂项活动行
// 口径: extras 是增益数据,整个文件缺失只记错误并跳过,不中断导入
// ==========================================

use crate::domain::types::{derive_event_id, name_to_id, EventType, SessionType};
use crate::domain::Event;
use crate::importer::builder::ConferenceBuilder;
use crate::importer::error::ImportError;
use crate::importer::file_parser::ExcelParser;
use crate::importer::rows::ExtraEventRow;
use crate::importer::timeparse::parse_start_end;
use chrono::FixedOffset;
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, warn};

pub const TRACKS_SHEET: &str = "Tracks";
pub const EVENTS_SHEET: &str = "Events";

/// 类型 token → (时段类型, 活动类型)
///
/// 未知 token 返回 None,调用方按行告警跳过
pub fn extra_kind_for_token(token: &str) -> Option<(SessionType, EventType)> {
    match token.trim().to_ascii_lowercase().as_str() {
        "break" | "breaks" => Some((SessionType::Breaks, EventType::Break)),
        "social" | "socials" => Some((SessionType::Socials, EventType::Social)),
        "plenary" | "plenaries" => Some((SessionType::PlenarySessions, EventType::Plenary)),
        _ => None,
    }
}

/// "Tracks" 表 → 轨道名到类型 token 的映射
pub fn parse_track_map(rows: Vec<HashMap<String, String>>) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for row in rows {
        let track = row.get("Track").map(|s| s.trim()).unwrap_or_default();
        let id = row.get("ID").map(|s| s.trim()).unwrap_or_default();
        if track.is_empty() || id.is_empty() {
            continue;
        }
        map.insert(track.to_string(), id.to_string());
    }
    map
}

/// "Events" 表行 → 强类型行结构
pub fn parse_event_rows(rows: Vec<HashMap<String, String>>) -> Vec<ExtraEventRow> {
    let get = |row: &HashMap<String, String>, key: &str| -> String {
        row.get(key).map(|s| s.trim().to_string()).unwrap_or_default()
    };
    let opt = |row: &HashMap<String, String>, key: &str| -> Option<String> {
        row.get(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    rows.into_iter()
        .map(|row| {
            let event = get(&row, "Event");
            let session = {
                let s = get(&row, "Session");
                if s.is_empty() {
                    event.clone() // 无独立时段名时回落到活动名
                } else {
                    s
                }
            };
            ExtraEventRow {
                event,
                track: get(&row, "Track"),
                session,
                date: get(&row, "Date"),
                start_time: get(&row, "Start Time"),
                end_time: get(&row, "End Time"),
                room: opt(&row, "Room"),
                link: opt(&row, "Link"),
            }
        })
        .collect()
}

/// 按类型映射合并杂项活动（纯逻辑,供单测直连）
pub fn merge_extra_events(
    track_map: &HashMap<String, String>,
    rows: Vec<ExtraEventRow>,
    offset: FixedOffset,
    builder: &mut ConferenceBuilder,
) -> usize {
    let mut merged = 0;
    for row in rows {
        if row.event.is_empty() {
            continue;
        }

        let token = match track_map.get(&row.track) {
            Some(t) => t.clone(),
            None => {
                warn!(event = %row.event, track = %row.track, "extras 轨道未登记,跳过行");
                builder.note_warning();
                continue;
            }
        };
        let (session_type, event_type) = match extra_kind_for_token(&token) {
            Some(kinds) => kinds,
            None => {
                warn!(event = %row.event, token = %token, "extras 类型 token 未知,跳过行");
                builder.note_warning();
                continue;
            }
        };

        let context = format!("extras: {}", row.event);
        let (start, end) = match parse_start_end(
            &row.date,
            &row.start_time,
            &row.end_time,
            offset,
            &context,
        ) {
            Ok(window) => window,
            Err(e) => {
                warn!(event = %row.event, error = %e, "extras 时间不可解析,跳过行");
                builder.note_warning();
                continue;
            }
        };

        let session_id = name_to_id(&row.session);
        builder.get_or_create_session(
            &session_id,
            &row.session,
            session_type,
            Some(start),
            Some(end),
        );

        let event = Event {
            id: derive_event_id(&row.session, &row.track, event_type),
            session: row.session.clone(),
            session_id,
            track: row.track.clone(),
            event_type,
            start_time: Some(start),
            end_time: Some(end),
            chairs: vec![],
            paper_ids: vec![],
            link: row.link.clone(),
            room: row.room.clone(),
        };
        builder.upsert_event(event);
        merged += 1;
    }
    merged
}

/// 加载并合并 extras 工作簿
///
/// 文件缺失或不可读: 记错误日志,返回 0（增益数据,不阻断装配）
pub fn load_extras<P: AsRef<Path>>(
    path: P,
    offset: FixedOffset,
    builder: &mut ConferenceBuilder,
) -> usize {
    let path = path.as_ref();

    let load = || -> Result<(HashMap<String, String>, Vec<ExtraEventRow>), ImportError> {
        let parser = ExcelParser;
        let track_map = parse_track_map(parser.parse_sheet(path, TRACKS_SHEET)?);
        let rows = parse_event_rows(parser.parse_sheet(path, EVENTS_SHEET)?);
        Ok((track_map, rows))
    };

    match load() {
        Ok((track_map, rows)) => merge_extra_events(&track_map, rows, offset, builder),
        Err(e) => {
            error!(file = %path.display(), error = %e, "extras 工作簿不可用,跳过杂项活动");
            builder.note_warning();
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset() -> FixedOffset {
        FixedOffset::east_opt(-4 * 3600).unwrap()
    }

    fn track_map() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("Breaks".to_string(), "break".to_string());
        m.insert("Social Program".to_string(), "social".to_string());
        m
    }

    fn extra_row(event: &str, track: &str) -> ExtraEventRow {
        ExtraEventRow {
            event: event.to_string(),
            track: track.to_string(),
            session: event.to_string(),
            date: "2023-07-10".to_string(),
            start_time: "12:30".to_string(),
            end_time: "14:00".to_string(),
            room: Some("Foyer".to_string()),
            link: None,
        }
    }

    #[test]
    fn test_merge_extra_events_creates_break() {
        let mut builder = ConferenceBuilder::new();
        let merged = merge_extra_events(
            &track_map(),
            vec![extra_row("Lunch Break", "Breaks")],
            offset(),
            &mut builder,
        );
        assert_eq!(merged, 1);

        let event_id = derive_event_id("Lunch Break", "Breaks", EventType::Break);
        let event = builder.event(&event_id).unwrap();
        assert_eq!(event.event_type, EventType::Break);
        assert_eq!(event.room.as_deref(), Some("Foyer"));

        let session = builder.session(&name_to_id("Lunch Break")).unwrap();
        assert_eq!(session.session_type, SessionType::Breaks);
    }

    #[test]
    fn test_merge_extra_events_unknown_track_skipped() {
        let mut builder = ConferenceBuilder::new();
        let merged = merge_extra_events(
            &track_map(),
            vec![extra_row("Mystery", "Unregistered")],
            offset(),
            &mut builder,
        );
        assert_eq!(merged, 0);
        assert_eq!(builder.stats().warnings, 1);
    }

    #[test]
    fn test_load_extras_missing_file_is_recoverable() {
        let mut builder = ConferenceBuilder::new();
        let merged = load_extras("does_not_exist.xlsx", offset(), &mut builder);
        assert_eq!(merged, 0);
    }

    #[test]
    fn test_extra_kind_for_token() {
        assert_eq!(
            extra_kind_for_token("break"),
            Some((SessionType::Breaks, EventType::Break))
        );
        assert_eq!(
            extra_kind_for_token("Plenary"),
            Some((SessionType::PlenarySessions, EventType::Plenary))
        );
        assert_eq!(extra_kind_for_token("sponsor"), None);
    }
}
