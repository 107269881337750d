// ==========================================
// 会议日程图谱构建系统 - workshop 注册表与论文解析器
// ==========================================
// 依据: Source_Formats_v0.1.md - 9. workshops 注册表 / 10. workshop 论文
// ==========================================
// 口径: workshop 论文不承担 event_ids 契约,以 workshop_id 关联
//       （终检对 program=Workshop 豁免非空 event_ids,改查 workshop_id）
// ==========================================

use crate::domain::event::{Session, Workshop};
use crate::domain::paper::{AnthologyAuthor, Paper};
use crate::domain::types::{name_to_id, Program, SessionType};
use crate::importer::builder::ConferenceBuilder;
use crate::importer::error::ImportError;
use crate::importer::paper_events::truncate_tldr;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

// ==========================================
// 注册表原始结构 (workshops.yaml)
// ==========================================

#[derive(Debug, Deserialize)]
pub struct RegistryWorkshop {
    pub name: String,
    pub short_name: String, // 与 booklet workshop id 对齐
    #[serde(default)]
    pub anthology_venue_id: Option<String>,
    #[serde(default)]
    pub committee: Vec<AnthologyAuthor>,
}

// ==========================================
// workshop 论文原始结构 (workshop_papers.yaml)
// ==========================================

#[derive(Debug, Deserialize)]
pub struct WorkshopPaperRecord {
    pub id: String,       // workshop 内部投稿号
    pub workshop: String, // workshop 短名
    pub title: String,
    #[serde(default)]
    pub authors: Vec<AnthologyAuthor>,
    #[serde(default)]
    pub paper_type: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
}

/// 读取注册表 YAML
pub fn load_workshop_registry<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<RegistryWorkshop>, ImportError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// 读取 workshop 论文 YAML
pub fn load_workshop_papers<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<WorkshopPaperRecord>, ImportError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// 注册表并入 booklet 生成的 workshop 记录
///
/// - 命中: 补 committee / anthology_venue_id
/// - 未命中: 以注册表数据补建 workshop（无时间窗口）并告警
pub fn merge_workshop_registry(
    registry: Vec<RegistryWorkshop>,
    builder: &mut ConferenceBuilder,
) -> Result<usize, ImportError> {
    let mut merged = 0;
    for entry in registry {
        let workshop_id = name_to_id(&entry.short_name);
        match builder.workshop_mut(&workshop_id) {
            Some(ws) => {
                ws.committee = entry.committee;
                ws.anthology_venue_id = entry.anthology_venue_id;
                merged += 1;
            }
            None => {
                warn!(
                    workshop = %entry.short_name,
                    "注册表 workshop 未出现在 booklet,按注册表补建"
                );
                builder.note_warning();
                builder.register_session(Session {
                    id: workshop_id.clone(),
                    name: entry.name.clone(),
                    start_time: None,
                    end_time: None,
                    session_type: SessionType::Workshops,
                    event_ids: vec![workshop_id.clone()],
                })?;
                builder.register_workshop(Workshop {
                    id: workshop_id.clone(),
                    session_id: workshop_id,
                    title: entry.name,
                    organizers: vec![],
                    description: String::new(),
                    website: None,
                    committee: entry.committee,
                    anthology_venue_id: entry.anthology_venue_id,
                    start_time: None,
                    end_time: None,
                });
                merged += 1;
            }
        }
    }
    Ok(merged)
}

/// workshop 论文装配（放在全部时段之后,见装配顺序）
///
/// 论文 id 规则: "{文集 venue 前缀}_{内部投稿号}",
/// 前缀缺失时回落到 workshop 短名
pub fn merge_workshop_papers(
    records: Vec<WorkshopPaperRecord>,
    builder: &mut ConferenceBuilder,
) -> usize {
    let mut count = 0;
    for record in records {
        let workshop_id = name_to_id(&record.workshop);
        let (prefix, track_title) = match builder.workshop(&workshop_id) {
            Some(ws) => (
                ws.anthology_venue_id
                    .clone()
                    .unwrap_or_else(|| ws.id.clone()),
                ws.title.clone(),
            ),
            None => {
                warn!(
                    workshop = %record.workshop,
                    paper = %record.id,
                    "workshop 论文引用未知 workshop,跳过"
                );
                builder.note_warning();
                continue;
            }
        };

        let abstract_text = record.abstract_text.unwrap_or_default();
        let authors: Vec<String> =
            record.authors.iter().map(|a| a.full_name()).collect();
        let paper = Paper {
            id: format!("{}_{}", prefix, record.id),
            title: record.title,
            authors,
            track: track_title,
            paper_type: record
                .paper_type
                .unwrap_or_else(|| "long".to_string()),
            category: Program::Workshop.as_str().to_string(),
            tldr: truncate_tldr(&abstract_text),
            abstract_text,
            keywords: vec![],
            languages: vec![],
            underline_url: None,
            underline_id: None,
            poster_pdf: None,
            slides_pdf: None,
            video_url: None,
            paper_pdf: None,
            anthology_id: None,
            event_ids: vec![], // workshop 论文无活动契约
            workshop_id: Some(workshop_id),
            similar_paper_ids: vec![],
            program: Program::Workshop.as_str().to_string(),
        };
        builder.upsert_paper(paper, false);
        count += 1;
    }
    debug!(papers = count, "workshop 论文装配完成");
    count
}
