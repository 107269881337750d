// ==========================================
// 会议日程图谱构建系统 - 只读视图派生
// ==========================================
// 依据: Schedule_Graph_Spec_v0.2.md - 6. 只读视图
// ==========================================
// 职责: 按日/按 track/按 program 的二级索引,供展示层查询
// 红线: 只消费图谱,不回写
// ==========================================

use crate::domain::conference::Conference;
use crate::domain::event::Session;
use crate::domain::paper::Paper;
use crate::domain::types::Program;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// SessionDay - 会议日导航条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDay {
    pub tab_id: String, // "jul10"
    pub label: String,  // "Jul 10"
    pub active: bool,   // 首日默认选中
}

/// 会议日列表（升序,首日 active）
pub fn session_days(conference: &Conference) -> Vec<SessionDay> {
    let days: BTreeSet<NaiveDate> = conference
        .sessions
        .values()
        .filter_map(|s| s.day())
        .collect();

    days.into_iter()
        .enumerate()
        .map(|(i, day)| SessionDay {
            tab_id: day.format("%b %d").to_string().replace(' ', "").to_lowercase(),
            label: day.format("%b %d").to_string(),
            active: i == 0,
        })
        .collect()
}

/// 按会议日分组时段（组内按显示名排序）
pub fn sessions_by_day(conference: &Conference) -> BTreeMap<NaiveDate, Vec<&Session>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&Session>> = BTreeMap::new();
    for session in conference.sessions.values() {
        if let Some(day) = session.day() {
            grouped.entry(day).or_default().push(session);
        }
    }
    for sessions in grouped.values_mut() {
        sessions.sort_by(|a, b| a.name.cmp(&b.name));
    }
    grouped
}

/// 全部 track 目录（去重升序）
pub fn track_catalog(conference: &Conference) -> Vec<String> {
    let tracks: BTreeSet<String> = conference
        .papers
        .values()
        .map(|p| p.track.clone())
        .collect();
    tracks.into_iter().collect()
}

/// track id 目录（name_to_id 变换后）
pub fn track_id_catalog(conference: &Conference) -> Vec<String> {
    let ids: BTreeSet<String> = conference
        .papers
        .values()
        .map(|p| crate::domain::types::name_to_id(&p.track))
        .collect();
    ids.into_iter().collect()
}

/// 主会 track 目录
pub fn main_program_tracks(conference: &Conference) -> Vec<String> {
    let tracks: BTreeSet<String> = conference
        .papers
        .values()
        .filter(|p| p.program == Program::Main.as_str())
        .map(|p| p.track.clone())
        .collect();
    tracks.into_iter().collect()
}

/// 按 track 过滤某 program 的论文
pub fn papers_by_track<'a>(
    conference: &'a Conference,
    program: Program,
    track: &str,
) -> Vec<&'a Paper> {
    conference
        .papers
        .values()
        .filter(|p| p.program == program.as_str() && p.track == track)
        .collect()
}
