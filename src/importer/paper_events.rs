// ==========================================
// 会议日程图谱构建系统 - 论文表格解析器
// ==========================================
// 依据: Program_Import_Spec_v0.2.md - 2. 论文类活动装配
// ==========================================
// 流程: 行过滤 → (时段,标签) 分组 → 组内排序 →
//       活动/论文记录生成 → builder 合并写入
// 红线: 解析器内不做全局变更,合并语义全部走 ConferenceBuilder
// ==========================================

use crate::domain::paper::{AnthologyEntry, KeywordEntry, Paper, PaperAssets};
use crate::domain::types::{
    derive_event_id, name_to_id, parse_author_string, EventType, Program, SessionType,
};
use crate::domain::Event;
use crate::importer::anthology::strip_pid_prefix;
use crate::importer::assets::to_asset_key;
use crate::importer::builder::ConferenceBuilder;
use crate::importer::error::ImportError;
use crate::importer::rows::{split_list_field, PaperSheetRow};
use crate::importer::timeparse::{parse_time_range, spotlight_time_window};
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 短摘要截断长度（字符数）
pub const TLDR_LENGTH: usize = 250;

/// 摘要 → 短摘要（按字符边界截断）
pub fn truncate_tldr(abstract_text: &str) -> String {
    abstract_text.chars().take(TLDR_LENGTH).collect()
}

// ==========================================
// ImportContext - 解析期交叉引用上下文
// ==========================================
// 文集/资产/关键词表先于论文表载入（装配顺序的硬依赖）
#[derive(Default)]
pub struct ImportContext {
    pub anthology: std::collections::HashMap<String, AnthologyEntry>,
    pub assets: std::collections::HashMap<String, PaperAssets>,
    pub keywords: std::collections::HashMap<String, KeywordEntry>,
}

// ==========================================
// PaperSheetKind - 论文表格类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSheetKind {
    Oral,
    Poster,
    VirtualPoster,
    Spotlight,
}

impl PaperSheetKind {
    pub fn event_type(&self) -> EventType {
        match self {
            PaperSheetKind::Oral => EventType::Oral,
            PaperSheetKind::Poster => EventType::Poster,
            PaperSheetKind::VirtualPoster => EventType::VirtualPoster,
            PaperSheetKind::Spotlight => EventType::Spotlight,
        }
    }

    /// 日志用表名
    pub fn sheet_name(&self) -> &'static str {
        match self {
            PaperSheetKind::Oral => "oral",
            PaperSheetKind::Poster => "poster",
            PaperSheetKind::VirtualPoster => "virtual",
            PaperSheetKind::Spotlight => "spotlight",
        }
    }

    /// 分组标签: 常规表用 Track,spotlight 表用会场
    fn group_label(&self, row: &PaperSheetRow) -> Option<String> {
        let raw = match self {
            PaperSheetKind::Spotlight => row.room.as_deref(),
            _ => row.track.as_deref(),
        };
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// 组内排序键: oral 按 Track Order,其余按 Local Order
    fn order_key(&self, row: &PaperSheetRow) -> f64 {
        let key = match self {
            PaperSheetKind::Oral => row.track_order,
            _ => row.local_order,
        };
        key.unwrap_or(f64::MAX) // 缺序号的行排尾
    }

    /// spotlight 是 virtual poster 的有意重放,合并时不告警
    fn quiet_merge(&self) -> bool {
        matches!(self, PaperSheetKind::Spotlight)
    }
}

// ==========================================
// SheetStats - 单表解析统计
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetStats {
    pub events: usize,
    pub papers: usize,
    pub skipped_rows: usize,
}

/// 解析一张论文表格并合并进图谱
pub fn parse_paper_sheet(
    kind: PaperSheetKind,
    rows: Vec<PaperSheetRow>,
    ctx: &ImportContext,
    offset: FixedOffset,
    builder: &mut ConferenceBuilder,
) -> Result<SheetStats, ImportError> {
    let mut stats = SheetStats::default();

    // === 行过滤 + 分组 ===
    let mut groups: BTreeMap<(String, String), Vec<PaperSheetRow>> = BTreeMap::new();
    for row in rows {
        if !row.has_identity() {
            stats.skipped_rows += 1;
            continue;
        }
        let session = row
            .session
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let label = match kind.group_label(&row) {
            Some(l) => l,
            None => {
                warn!(
                    sheet = kind.sheet_name(),
                    pid = row.pid.as_deref().unwrap_or(""),
                    "行缺少分组标签,跳过"
                );
                builder.note_warning();
                stats.skipped_rows += 1;
                continue;
            }
        };
        groups.entry((session, label)).or_default().push(row);
    }

    // === 逐组生成活动与论文 ===
    for ((session_name, label), mut group) in groups {
        group.sort_by(|a, b| kind.order_key(a).total_cmp(&kind.order_key(b)));

        let context = format!("{} {}: {}", kind.sheet_name(), session_name, label);
        let (start, end) = group_window(kind, &group, offset, &context)?;

        let session_id = name_to_id(&session_name);
        builder.get_or_create_session(
            &session_id,
            &session_name,
            SessionType::PaperSessions,
            Some(start),
            Some(end),
        );

        let event_id = derive_event_id(&session_name, &label, kind.event_type());

        // 会场/主持人取排序后首行
        let first = &group[0];
        let room = match kind {
            // 海报活动没有独立会场列时落在统一海报区
            PaperSheetKind::Poster => first
                .room
                .clone()
                .or_else(|| Some("Poster Session".to_string())),
            _ => first.room.clone(),
        };
        let chairs = first
            .chairs
            .as_deref()
            .map(split_list_field)
            .unwrap_or_default();

        // 论文记录
        let mut paper_ids: Vec<String> = Vec::new();
        for row in &group {
            let paper = build_paper(kind, row, &label, &event_id, ctx)?;
            if !paper_ids.iter().any(|p| p == &paper.id) {
                paper_ids.push(paper.id.clone());
            }
            builder.upsert_paper(paper, kind.quiet_merge());
            stats.papers += 1;
        }

        let event = Event {
            id: event_id,
            session: session_name.clone(),
            session_id,
            track: event_track(kind, first, &label),
            event_type: kind.event_type(),
            start_time: Some(start),
            end_time: Some(end),
            chairs,
            paper_ids,
            link: None,
            room,
        };
        builder.upsert_event(event);
        stats.events += 1;
    }

    debug!(
        sheet = kind.sheet_name(),
        events = stats.events,
        papers = stats.papers,
        skipped = stats.skipped_rows,
        "论文表格解析完成"
    );
    Ok(stats)
}

/// 组代表时间窗口
///
/// - spotlight: 策略窗口（表内无可用时间列）
/// - oral: 起点取首行、终点取末行（口头报告逐篇排程）
/// - 其他: 起止都取首行
fn group_window(
    kind: PaperSheetKind,
    group: &[PaperSheetRow],
    offset: FixedOffset,
    context: &str,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ImportError> {
    let first = &group[0];
    let first_date = require_field(first.date.as_deref(), "Date", context)?;

    if kind == PaperSheetKind::Spotlight {
        return spotlight_time_window(&first_date, offset, context);
    }

    let first_time = require_field(first.time.as_deref(), "Time", context)?;
    let (start, first_end) = parse_time_range(&first_date, &first_time, offset, context)?;

    let end = if kind == PaperSheetKind::Oral && group.len() > 1 {
        let last = &group[group.len() - 1];
        let last_date = require_field(last.date.as_deref(), "Date", context)?;
        let last_time = require_field(last.time.as_deref(), "Time", context)?;
        parse_time_range(&last_date, &last_time, offset, context)?.1
    } else {
        first_end
    };

    Ok((start, end))
}

fn require_field(
    value: Option<&str>,
    field: &str,
    context: &str,
) -> Result<String, ImportError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ImportError::MissingField {
            context: context.to_string(),
            field: field.to_string(),
        })
}

/// 活动 track 字段: spotlight 组的标签是会场,track 回落到首行 Track 列
fn event_track(kind: PaperSheetKind, first: &PaperSheetRow, label: &str) -> String {
    match kind {
        PaperSheetKind::Spotlight => first
            .track
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(label)
            .to_string(),
        _ => label.to_string(),
    }
}

/// 单行 → 论文记录（交叉引用在此回填）
fn build_paper(
    kind: PaperSheetKind,
    row: &PaperSheetRow,
    label: &str,
    event_id: &str,
    ctx: &ImportContext,
) -> Result<Paper, ImportError> {
    let pid = row.pid.as_deref().map(str::trim).unwrap_or_default().to_string();

    let category = require_field(
        row.category.as_deref(),
        "Category",
        &format!("{} 行 {}", kind.sheet_name(), pid),
    )?;
    let program =
        Program::from_category(&category).ok_or_else(|| ImportError::UnknownCategory {
            paper_id: pid.clone(),
            category: category.clone(),
        })?;

    // 文集回填（缺失时显式空值,不视为错误）
    let anthology = ctx.anthology.get(&strip_pid_prefix(&pid));
    let abstract_text = anthology
        .and_then(|a| a.abstract_text.clone())
        .unwrap_or_default();
    let authors = match anthology.filter(|a| !a.authors.is_empty()) {
        Some(a) => a.authors.iter().map(|au| au.full_name()).collect(),
        None => parse_author_string(row.author.as_deref().unwrap_or_default()),
    };

    // 资产回填
    let assets = ctx
        .assets
        .get(&to_asset_key(&pid, program))
        .cloned()
        .unwrap_or_default();

    // 关键词回填
    let keyword_entry = ctx.keywords.get(&pid).cloned().unwrap_or_default();

    Ok(Paper {
        id: pid,
        title: row.title.as_deref().unwrap_or_default().trim().to_string(),
        authors,
        track: row
            .track
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(label)
            .to_string(),
        paper_type: row.length.as_deref().unwrap_or_default().trim().to_string(),
        category,
        tldr: truncate_tldr(&abstract_text),
        abstract_text,
        keywords: keyword_entry.keywords,
        languages: keyword_entry.languages,
        underline_url: assets.underline_url,
        underline_id: assets.underline_id,
        poster_pdf: assets.poster_pdf,
        slides_pdf: assets.slides_pdf,
        video_url: assets.video_url,
        paper_pdf: assets
            .paper_pdf
            .or_else(|| anthology.and_then(|a| a.file.clone())),
        anthology_id: anthology.and_then(|a| a.anthology_id.clone()),
        event_ids: vec![event_id.to_string()],
        workshop_id: None,
        similar_paper_ids: vec![],
        program: program.as_str().to_string(),
    })
}
