// ==========================================
// 会议日程图谱构建系统 - 图谱构建器
// ==========================================
// 依据: Schedule_Graph_Spec_v0.2.md - 3. 标识与合并规则
// ==========================================
// 职责: 集中执行 get_or_create / upsert 合并语义,
//       各解析器不得各自维护合并逻辑
// 红线: 内容字段先写优先;关系字段并集;合并必须幂等
// ==========================================

use crate::domain::conference::Conference;
use crate::domain::event::{Event, Plenary, Session, Tutorial, Workshop};
use crate::domain::paper::Paper;
use crate::domain::types::SessionType;
use crate::importer::error::ImportError;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::warn;

// ==========================================
// MergeOutcome - 合并结果标签
// ==========================================
// 显式标签替代"只在日志里体现"的静默合并,便于调用方与测试断言
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Created,  // 新建
    Merged,   // 命中已有记录,关系字段并集
    Conflict, // 命中已有记录且内容字段不一致（内容仍保持先写值）
}

// ==========================================
// MergeStats - 合并统计
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeStats {
    pub papers_created: usize,
    pub papers_merged: usize,
    pub merge_conflicts: usize,
    pub warnings: usize,
}

// ==========================================
// ConferenceBuilder - 装配期上下文
// ==========================================
pub struct ConferenceBuilder {
    sessions: BTreeMap<String, Session>,
    events: BTreeMap<String, Event>,
    papers: BTreeMap<String, Paper>,
    plenaries: BTreeMap<String, Plenary>,
    tutorials: BTreeMap<String, Tutorial>,
    workshops: BTreeMap<String, Workshop>,
    stats: MergeStats,
}

impl ConferenceBuilder {
    pub fn new() -> Self {
        Self {
            sessions: BTreeMap::new(),
            events: BTreeMap::new(),
            papers: BTreeMap::new(),
            plenaries: BTreeMap::new(),
            tutorials: BTreeMap::new(),
            workshops: BTreeMap::new(),
            stats: MergeStats::default(),
        }
    }

    pub fn stats(&self) -> MergeStats {
        self.stats
    }

    /// 记录一次可恢复告警（解析器侧发现的数据问题）
    pub fn note_warning(&mut self) {
        self.stats.warnings += 1;
    }

    // ==========================================
    // 时段
    // ==========================================

    /// 共享时段: 不存在则创建,存在则扩张显示窗口
    ///
    /// 论文类解析器共用（同一 "Session 1" 会被 oral/poster 先后触达）
    pub fn get_or_create_session(
        &mut self,
        id: &str,
        name: &str,
        session_type: SessionType,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> &mut Session {
        let entry = self.sessions.entry(id.to_string()).or_insert_with(|| Session {
            id: id.to_string(),
            name: name.to_string(),
            start_time: None,
            end_time: None,
            session_type,
            event_ids: vec![],
        });
        if entry.session_type != session_type {
            warn!(
                session_id = id,
                existing = %entry.session_type,
                incoming = %session_type,
                "时段类型不一致,保留先写类型"
            );
        }
        entry.widen_window(start, end);
        entry
    }

    /// 独占时段: 只允许唯一生成路径注册一次
    ///
    /// plenary/tutorial/workshop/social 时段走此口;撞键即致命错误,
    /// 不做静默覆盖
    pub fn register_session(&mut self, session: Session) -> Result<(), ImportError> {
        if let Some(existing) = self.sessions.get(&session.id) {
            return Err(ImportError::DuplicateSession {
                session_id: session.id.clone(),
                existing: existing.session_type.to_string(),
                incoming: session.session_type.to_string(),
            });
        }
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    // ==========================================
    // 通用活动
    // ==========================================

    /// 合并写入活动
    ///
    /// 已存在时: 新见 paper id 追加（查活动自身列表去重,不查全局）,
    /// 内容字段保持先写值,显示窗口扩张
    pub fn upsert_event(&mut self, event: Event) -> MergeOutcome {
        let outcome = match self.events.get_mut(&event.id) {
            Some(existing) => {
                for pid in &event.paper_ids {
                    if !existing.paper_ids.iter().any(|p| p == pid) {
                        existing.paper_ids.push(pid.clone());
                    }
                }
                if let (Some(s), Some(e)) = (event.start_time, event.end_time) {
                    if existing.start_time.map(|cur| s < cur).unwrap_or(true) {
                        existing.start_time = Some(s);
                    }
                    if existing.end_time.map(|cur| e > cur).unwrap_or(true) {
                        existing.end_time = Some(e);
                    }
                }
                MergeOutcome::Merged
            }
            None => {
                self.events.insert(event.id.clone(), event.clone());
                MergeOutcome::Created
            }
        };

        // 活动挂到父时段（幂等）
        if let Some(session) = self.sessions.get_mut(&event.session_id) {
            session.push_event(&event.id);
        } else {
            warn!(
                event_id = %event.id,
                session_id = %event.session_id,
                "活动的父时段不存在,跳过挂载"
            );
            self.stats.warnings += 1;
        }
        outcome
    }

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.get(id)
    }

    // ==========================================
    // 论文
    // ==========================================

    /// 合并写入论文
    ///
    /// # 合并规则
    /// - 已存在: event_ids 并集、workshop_id 补空,内容字段一律保持先写值
    /// - 标题不一致 → Conflict（仍按先写值保留,计入冲突统计）
    /// - quiet: spotlight 等有意重复的来源置 true,抑制重复告警
    pub fn upsert_paper(&mut self, paper: Paper, quiet: bool) -> MergeOutcome {
        match self.papers.get_mut(&paper.id) {
            Some(existing) => {
                let conflict =
                    !paper.title.is_empty() && existing.title != paper.title;

                for event_id in &paper.event_ids {
                    if !existing.event_ids.iter().any(|e| e == event_id) {
                        existing.event_ids.push(event_id.clone());
                    }
                }
                if existing.workshop_id.is_none() {
                    existing.workshop_id = paper.workshop_id.clone();
                }

                if conflict {
                    warn!(
                        paper_id = %paper.id,
                        existing_title = %existing.title,
                        incoming_title = %paper.title,
                        "论文重复且标题不一致,保留先写内容"
                    );
                    self.stats.merge_conflicts += 1;
                    self.stats.warnings += 1;
                    MergeOutcome::Conflict
                } else {
                    if !quiet {
                        warn!(paper_id = %paper.id, "论文 id 重复,执行合并");
                        self.stats.warnings += 1;
                    }
                    self.stats.papers_merged += 1;
                    MergeOutcome::Merged
                }
            }
            None => {
                self.papers.insert(paper.id.clone(), paper);
                self.stats.papers_created += 1;
                MergeOutcome::Created
            }
        }
    }

    pub fn paper(&self, id: &str) -> Option<&Paper> {
        self.papers.get(id)
    }

    // ==========================================
    // 特化活动
    // ==========================================

    pub fn register_plenary(&mut self, plenary: Plenary) {
        self.plenaries.insert(plenary.id.clone(), plenary);
    }

    pub fn register_tutorial(&mut self, tutorial: Tutorial) {
        self.tutorials.insert(tutorial.id.clone(), tutorial);
    }

    pub fn register_workshop(&mut self, workshop: Workshop) {
        self.workshops.insert(workshop.id.clone(), workshop);
    }

    pub fn workshop(&self, id: &str) -> Option<&Workshop> {
        self.workshops.get(id)
    }

    pub fn workshop_mut(&mut self, id: &str) -> Option<&mut Workshop> {
        self.workshops.get_mut(id)
    }

    // ==========================================
    // 收尾
    // ==========================================

    /// 实体计数 (sessions, events, papers, plenaries, tutorials, workshops)
    pub fn counts(&self) -> (usize, usize, usize, usize, usize, usize) {
        (
            self.sessions.len(),
            self.events.len(),
            self.papers.len(),
            self.plenaries.len(),
            self.tutorials.len(),
            self.workshops.len(),
        )
    }

    /// 移交为只读聚合根
    pub fn finish(self) -> Conference {
        Conference {
            sessions: self.sessions,
            events: self.events,
            papers: self.papers,
            plenaries: self.plenaries,
            tutorials: self.tutorials,
            workshops: self.workshops,
        }
    }
}

impl Default for ConferenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::EventType;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 7, 10, h, m, 0).single().unwrap()
    }

    fn test_paper(id: &str, title: &str, event_ids: &[&str]) -> Paper {
        Paper {
            id: id.to_string(),
            title: title.to_string(),
            authors: vec!["Alice Zhang".to_string()],
            track: "NLP".to_string(),
            paper_type: "Long".to_string(),
            category: "Main-Oral".to_string(),
            abstract_text: "An abstract".to_string(),
            tldr: "An abstract".to_string(),
            keywords: vec![],
            languages: vec![],
            underline_url: None,
            underline_id: None,
            poster_pdf: None,
            slides_pdf: None,
            video_url: None,
            paper_pdf: None,
            anthology_id: None,
            event_ids: event_ids.iter().map(|s| s.to_string()).collect(),
            workshop_id: None,
            similar_paper_ids: vec![],
            program: "Main".to_string(),
        }
    }

    fn test_event(id: &str, session_id: &str, paper_ids: &[&str]) -> Event {
        Event {
            id: id.to_string(),
            session: "Session 1".to_string(),
            session_id: session_id.to_string(),
            track: "NLP".to_string(),
            event_type: EventType::Oral,
            start_time: Some(utc(13, 0)),
            end_time: Some(utc(14, 30)),
            chairs: vec![],
            paper_ids: paper_ids.iter().map(|s| s.to_string()).collect(),
            link: None,
            room: None,
        }
    }

    #[test]
    fn test_upsert_paper_created_then_merged() {
        let mut builder = ConferenceBuilder::new();

        let outcome = builder.upsert_paper(test_paper("P1", "A Paper", &["e1"]), false);
        assert_eq!(outcome, MergeOutcome::Created);

        let outcome = builder.upsert_paper(test_paper("P1", "A Paper", &["e2"]), false);
        assert_eq!(outcome, MergeOutcome::Merged);

        let paper = builder.paper("P1").unwrap();
        assert_eq!(paper.event_ids, vec!["e1", "e2"]);
    }

    #[test]
    fn test_upsert_paper_no_content_overwrite() {
        let mut builder = ConferenceBuilder::new();
        builder.upsert_paper(test_paper("P1", "First Title", &["e1"]), false);

        let mut second = test_paper("P1", "First Title", &["e2"]);
        second.abstract_text = "Another abstract".to_string();
        second.authors = vec!["Bob Li".to_string()];
        builder.upsert_paper(second, false);

        let paper = builder.paper("P1").unwrap();
        assert_eq!(paper.abstract_text, "An abstract");
        assert_eq!(paper.authors, vec!["Alice Zhang"]);
        assert_eq!(paper.event_ids, vec!["e1", "e2"]);
    }

    #[test]
    fn test_upsert_paper_title_conflict_tagged() {
        let mut builder = ConferenceBuilder::new();
        builder.upsert_paper(test_paper("P1", "First Title", &["e1"]), false);

        let outcome = builder.upsert_paper(test_paper("P1", "Other Title", &["e2"]), false);
        assert_eq!(outcome, MergeOutcome::Conflict);
        // 内容仍为先写值,关系字段已并集
        let paper = builder.paper("P1").unwrap();
        assert_eq!(paper.title, "First Title");
        assert_eq!(paper.event_ids, vec!["e1", "e2"]);
        assert_eq!(builder.stats().merge_conflicts, 1);
    }

    #[test]
    fn test_upsert_paper_merge_commutative() {
        let row_a = || test_paper("P1", "A Paper", &["e1"]);
        let row_b = || test_paper("P1", "A Paper", &["e2"]);

        let mut forward = ConferenceBuilder::new();
        forward.upsert_paper(row_a(), false);
        forward.upsert_paper(row_b(), false);

        let mut backward = ConferenceBuilder::new();
        backward.upsert_paper(row_b(), false);
        backward.upsert_paper(row_a(), false);

        let mut ids_f = forward.paper("P1").unwrap().event_ids.clone();
        let mut ids_b = backward.paper("P1").unwrap().event_ids.clone();
        ids_f.sort();
        ids_b.sort();
        assert_eq!(ids_f, ids_b);
    }

    #[test]
    fn test_upsert_paper_idempotent() {
        let mut builder = ConferenceBuilder::new();
        builder.upsert_paper(test_paper("P1", "A Paper", &["e1"]), false);
        builder.upsert_paper(test_paper("P1", "A Paper", &["e1"]), true);
        builder.upsert_paper(test_paper("P1", "A Paper", &["e1"]), true);

        let paper = builder.paper("P1").unwrap();
        assert_eq!(paper.event_ids, vec!["e1"]);
    }

    #[test]
    fn test_upsert_event_unions_paper_ids() {
        let mut builder = ConferenceBuilder::new();
        builder.get_or_create_session("session-1", "Session 1", SessionType::PaperSessions, None, None);

        builder.upsert_event(test_event("e1", "session-1", &["P1"]));
        let outcome = builder.upsert_event(test_event("e1", "session-1", &["P1", "P2"]));

        assert_eq!(outcome, MergeOutcome::Merged);
        assert_eq!(builder.event("e1").unwrap().paper_ids, vec!["P1", "P2"]);
        // 父时段只挂载一次
        assert_eq!(builder.session("session-1").unwrap().event_ids, vec!["e1"]);
    }

    #[test]
    fn test_register_session_duplicate_is_fatal() {
        let mut builder = ConferenceBuilder::new();
        let session = Session {
            id: "opening".to_string(),
            name: "Opening".to_string(),
            start_time: None,
            end_time: None,
            session_type: SessionType::PlenarySessions,
            event_ids: vec![],
        };
        builder.register_session(session.clone()).unwrap();
        let err = builder.register_session(session).unwrap_err();
        assert!(matches!(err, ImportError::DuplicateSession { .. }));
    }

    #[test]
    fn test_get_or_create_session_widens_window() {
        let mut builder = ConferenceBuilder::new();
        builder.get_or_create_session(
            "session-1",
            "Session 1",
            SessionType::PaperSessions,
            Some(utc(13, 0)),
            Some(utc(14, 0)),
        );
        builder.get_or_create_session(
            "session-1",
            "Session 1",
            SessionType::PaperSessions,
            Some(utc(12, 0)),
            Some(utc(15, 0)),
        );
        let session = builder.session("session-1").unwrap();
        assert_eq!(session.start_time, Some(utc(12, 0)));
        assert_eq!(session.end_time, Some(utc(15, 0)));
    }
}
