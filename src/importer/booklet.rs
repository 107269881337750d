// ==========================================
// 会议日程图谱构建系统 - booklet 导出解析器
// ==========================================
// 依据: Source_Formats_v0.1.md - 8. booklet JSON
// ==========================================
// 职责: 生成 plenary/tutorial/workshop 特化记录,并注册独占时段
// 红线: 特化记录只进特化表;时段 id 与论文时段撞键即致命错误
// ==========================================

use crate::domain::event::{Plenary, Session, Tutorial, Workshop};
use crate::domain::types::{name_to_id, SessionType};
use crate::importer::builder::ConferenceBuilder;
use crate::importer::error::ImportError;
use crate::importer::timeparse::{default_workshop_end, parse_iso_local};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

// ==========================================
// booklet 原始结构
// ==========================================

#[derive(Debug, Deserialize)]
pub struct BookletData {
    #[serde(default)]
    pub plenaries: Vec<BookletPlenary>,
    #[serde(default)]
    pub tutorials: Vec<BookletTutorial>,
    #[serde(default)]
    pub workshops: Vec<BookletWorkshop>,
}

#[derive(Debug, Deserialize)]
pub struct BookletPlenary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    pub speaker_name: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookletTutorial {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub hosts: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookletWorkshop {
    pub id: String, // workshop 短名,论文关联键
    pub title: String,
    #[serde(default)]
    pub chair: Vec<String>,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub desc: String,
}

/// 读取 booklet JSON
pub fn load_booklet<P: AsRef<Path>>(path: P) -> Result<BookletData, ImportError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    let data: BookletData = serde_json::from_str(&content)?;
    Ok(data)
}

/// booklet → 特化时段/活动装配
///
/// # 返回
/// (plenaries, tutorials, workshops) 计数
pub fn merge_booklet(
    data: BookletData,
    offset: FixedOffset,
    builder: &mut ConferenceBuilder,
) -> Result<(usize, usize, usize), ImportError> {
    let mut counts = (0usize, 0usize, 0usize);

    for p in data.plenaries {
        let context = format!("booklet plenary {}", p.id);
        let start = parse_iso_local(&p.start_time, offset, &context)?;
        let end = match p.end_time.as_deref() {
            Some(raw) => Some(parse_iso_local(raw, offset, &context)?),
            None => None,
        };
        let session_id = name_to_id(&p.id);
        register_specialized_session(
            builder,
            &session_id,
            &p.title,
            SessionType::PlenarySessions,
            Some(start),
            end,
        )?;
        builder.register_plenary(Plenary {
            id: session_id,
            session_id: name_to_id(&p.id),
            title: p.title,
            image: p.image,
            presenter: p.speaker_name,
            institution: p.institution,
            abstract_text: p.desc,
            bio: p.bio,
            start_time: Some(start),
            end_time: end,
        });
        counts.0 += 1;
    }

    for t in data.tutorials {
        let context = format!("booklet tutorial {}", t.id);
        let start = parse_iso_local(&t.start_time, offset, &context)?;
        let end = parse_iso_local(&t.end_time, offset, &context)?;
        let session_id = name_to_id(&t.id);
        register_specialized_session(
            builder,
            &session_id,
            &t.title,
            SessionType::Tutorials,
            Some(start),
            Some(end),
        )?;
        builder.register_tutorial(Tutorial {
            id: session_id.clone(),
            session_id,
            title: t.title,
            organizers: t.hosts,
            abstract_text: t.desc,
            website: t.website,
            start_time: Some(start),
            end_time: Some(end),
        });
        counts.1 += 1;
    }

    for w in data.workshops {
        let context = format!("booklet workshop {}", w.id);
        let start = parse_iso_local(&w.start_time, offset, &context)?;
        // booklet 常缺 workshop 终点,按全天缺省时长补齐
        let end = match w.end_time.as_deref() {
            Some(raw) => parse_iso_local(raw, offset, &context)?,
            None => default_workshop_end(start),
        };
        let session_id = name_to_id(&w.id);
        register_specialized_session(
            builder,
            &session_id,
            &w.title,
            SessionType::Workshops,
            Some(start),
            Some(end),
        )?;
        builder.register_workshop(Workshop {
            id: session_id.clone(),
            session_id,
            title: w.title,
            organizers: w.chair,
            description: w.desc,
            website: w.url,
            committee: vec![],
            anthology_venue_id: None,
            start_time: Some(start),
            end_time: Some(end),
        });
        counts.2 += 1;
    }

    debug!(
        plenaries = counts.0,
        tutorials = counts.1,
        workshops = counts.2,
        "booklet 装配完成"
    );
    Ok(counts)
}

/// 注册独占时段并把特化活动挂为时段成员
fn register_specialized_session(
    builder: &mut ConferenceBuilder,
    id: &str,
    name: &str,
    session_type: SessionType,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(), ImportError> {
    builder.register_session(Session {
        id: id.to_string(),
        name: name.to_string(),
        start_time: start,
        end_time: end,
        session_type,
        event_ids: vec![id.to_string()], // 特化活动与时段同 id
    })
}
