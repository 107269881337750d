// ==========================================
// 会议日程图谱构建系统 - 会议聚合根
// ==========================================
// 依据: Schedule_Graph_Spec_v0.2.md - 2.3 Conference
// ==========================================
// 红线: 装配完成后只读,展示层不得回写
// ==========================================

use crate::domain::event::{Event, Plenary, Session, Tutorial, Workshop};
use crate::domain::paper::Paper;
use crate::domain::types::Program;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Conference - 日程图谱聚合根
// ==========================================
// BTreeMap 保证序列化输出的确定性
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conference {
    pub sessions: BTreeMap<String, Session>,
    pub events: BTreeMap<String, Event>,
    pub papers: BTreeMap<String, Paper>,

    // 特化活动（与 events 表不共键）
    pub plenaries: BTreeMap<String, Plenary>,
    pub tutorials: BTreeMap<String, Tutorial>,
    pub workshops: BTreeMap<String, Workshop>,
}

impl Conference {
    /// 按计划过滤论文
    pub fn papers_in_program(&self, program: Program) -> Vec<&Paper> {
        self.papers
            .values()
            .filter(|p| p.program == program.as_str())
            .collect()
    }

    pub fn main_papers(&self) -> Vec<&Paper> {
        self.papers_in_program(Program::Main)
    }

    pub fn workshop_papers(&self) -> Vec<&Paper> {
        self.papers_in_program(Program::Workshop)
    }

    pub fn findings_papers(&self) -> Vec<&Paper> {
        self.papers_in_program(Program::Findings)
    }

    pub fn demo_papers(&self) -> Vec<&Paper> {
        self.papers_in_program(Program::Demo)
    }

    pub fn industry_papers(&self) -> Vec<&Paper> {
        self.papers_in_program(Program::Industry)
    }

    /// 活动 id 是否属于某特化表
    pub fn is_specialized_event_id(&self, event_id: &str) -> bool {
        self.plenaries.contains_key(event_id)
            || self.tutorials.contains_key(event_id)
            || self.workshops.contains_key(event_id)
    }
}

// ==========================================
// ImportReport - 导入批次报告
// ==========================================
// 用途: 记录一次装配的统计与耗时,随图谱一并落盘
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String, // UUID
    pub imported_at: DateTime<Utc>,
    pub elapsed_ms: u64,

    // ===== 实体计数 =====
    pub sessions: usize,
    pub events: usize,
    pub papers: usize,
    pub plenaries: usize,
    pub tutorials: usize,
    pub workshops: usize,

    // ===== 合并统计 =====
    pub papers_created: usize,
    pub papers_merged: usize,
    pub merge_conflicts: usize,
    pub warnings: usize,
}
