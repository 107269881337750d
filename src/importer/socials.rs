// ==========================================
// 会议日程图谱构建系统 - 社交活动注册表解析器
// ==========================================
// 依据: Source_Formats_v0.1.md - 11. socials JSON
// ==========================================
// 口径: 注册表中的社交活动带显式 id/时间/地点,
//       每条生成一个独占 Socials 时段 + 一个通用活动
// ==========================================

use crate::domain::event::Session;
use crate::domain::types::{derive_event_id, name_to_id, EventType, SessionType};
use crate::domain::Event;
use crate::importer::builder::ConferenceBuilder;
use crate::importer::error::ImportError;
use crate::importer::timeparse::parse_iso_local;
use chrono::FixedOffset;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

// ==========================================
// 注册表原始结构
// ==========================================

#[derive(Debug, Deserialize)]
pub struct SocialRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: String, // ISO 本地时间
    pub end_time: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// 读取 socials JSON
pub fn load_socials<P: AsRef<Path>>(path: P) -> Result<Vec<SocialRecord>, ImportError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// 社交活动装配
pub fn merge_socials(
    records: Vec<SocialRecord>,
    offset: FixedOffset,
    builder: &mut ConferenceBuilder,
) -> Result<usize, ImportError> {
    let mut count = 0;
    for record in records {
        let context = format!("social {}", record.id);
        let start = parse_iso_local(&record.start_time, offset, &context)?;
        let end = parse_iso_local(&record.end_time, offset, &context)?;

        let session_id = name_to_id(&record.id);
        let event_id = derive_event_id(&record.name, "Social", EventType::Social);

        builder.register_session(Session {
            id: session_id.clone(),
            name: record.name.clone(),
            start_time: Some(start),
            end_time: Some(end),
            session_type: SessionType::Socials,
            event_ids: vec![],
        })?;

        builder.upsert_event(Event {
            id: event_id,
            session: record.name.clone(),
            session_id,
            track: record.name,
            event_type: EventType::Social,
            start_time: Some(start),
            end_time: Some(end),
            chairs: vec![],
            paper_ids: vec![],
            link: record.link,
            room: record.room,
        });
        count += 1;
    }
    debug!(socials = count, "社交活动装配完成");
    Ok(count)
}
