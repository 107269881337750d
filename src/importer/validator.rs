// ==========================================
// 会议日程图谱构建系统 - 图谱终检
// ==========================================
// 依据: Schedule_Graph_Spec_v0.2.md - 4. 全局不变量
// ==========================================
// 红线: 任一违规即中止导入,不得向展示层移交半成品图谱
// ==========================================

use crate::domain::conference::Conference;
use crate::domain::types::Program;
use crate::importer::error::ImportError;
use tracing::error;

// ==========================================
// GraphViolation - 终检违规记录
// ==========================================
#[derive(Debug, Clone)]
pub struct GraphViolation {
    pub entity: &'static str, // "paper" / "event" / "session"
    pub id: String,
    pub message: String,
}

impl GraphViolation {
    fn new(entity: &'static str, id: &str, message: String) -> Self {
        Self {
            entity,
            id: id.to_string(),
            message,
        }
    }
}

/// 收集全部违规（供测试与报告使用）
pub fn collect_violations(conference: &Conference) -> Vec<GraphViolation> {
    let mut violations = Vec::new();

    // ===== 论文不变量 =====
    for paper in conference.papers.values() {
        if Program::parse_exact(&paper.program).is_none() {
            violations.push(GraphViolation::new(
                "paper",
                &paper.id,
                format!("program 不在固定枚举内: {}", paper.program),
            ));
            continue;
        }

        if paper.program == Program::Workshop.as_str() {
            // 文档化的特例: workshop 论文豁免 event_ids,改查 workshop 关联
            match paper.workshop_id.as_deref() {
                Some(ws) if conference.workshops.contains_key(ws) => {}
                Some(ws) => violations.push(GraphViolation::new(
                    "paper",
                    &paper.id,
                    format!("workshop_id 指向未知 workshop: {}", ws),
                )),
                None => violations.push(GraphViolation::new(
                    "paper",
                    &paper.id,
                    "workshop 论文缺少 workshop_id".to_string(),
                )),
            }
        } else if paper.event_ids.is_empty() {
            violations.push(GraphViolation::new(
                "paper",
                &paper.id,
                "event_ids 为空".to_string(),
            ));
        }

        for event_id in &paper.event_ids {
            if !conference.events.contains_key(event_id) {
                violations.push(GraphViolation::new(
                    "paper",
                    &paper.id,
                    format!("引用不存在的活动: {}", event_id),
                ));
            }
        }
    }

    // ===== 活动不变量 =====
    for event in conference.events.values() {
        // 特化活动只允许出现在特化表
        if conference.is_specialized_event_id(&event.id) {
            violations.push(GraphViolation::new(
                "event",
                &event.id,
                "通用活动 id 与特化表撞键".to_string(),
            ));
        }
        if !conference.sessions.contains_key(&event.session_id) {
            violations.push(GraphViolation::new(
                "event",
                &event.id,
                format!("父时段不存在: {}", event.session_id),
            ));
        }
        for paper_id in &event.paper_ids {
            if !conference.papers.contains_key(paper_id) {
                violations.push(GraphViolation::new(
                    "event",
                    &event.id,
                    format!("引用不存在的论文: {}", paper_id),
                ));
            }
        }
    }

    // ===== 时段不变量 =====
    for session in conference.sessions.values() {
        for event_id in &session.event_ids {
            let resolvable = conference.events.contains_key(event_id)
                || conference.is_specialized_event_id(event_id);
            if !resolvable {
                violations.push(GraphViolation::new(
                    "session",
                    &session.id,
                    format!("成员活动无法解析: {}", event_id),
                ));
            }
        }
    }

    violations
}

/// 终检入口: 违规即失败
pub fn validate_conference(conference: &Conference) -> Result<(), ImportError> {
    let violations = collect_violations(conference);
    if violations.is_empty() {
        return Ok(());
    }

    for v in &violations {
        error!(entity = v.entity, id = %v.id, "{}", v.message);
    }
    let first = &violations[0];
    Err(ImportError::ValidationFailed {
        violations: violations.len(),
        first: format!("{} {}: {}", first.entity, first.id, first.message),
    })
}
