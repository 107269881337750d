// ==========================================
// 会议日程图谱构建系统 - 领域类型定义
// ==========================================
// 依据: Schedule_Graph_Spec_v0.2.md - 1. 核心枚举与标识规则
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Program - 论文所属计划 (Program)
// ==========================================
// 红线: 固定枚举,论文的 program 字段必须落在其中
// 来源: 表格 Category 列的前缀映射
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Program {
    Main,     // 主会
    Workshop, // 研讨会
    Findings, // Findings
    Demo,     // 系统演示
    Industry, // 工业赛道
}

impl Program {
    /// 全部合法取值（终检时做成员校验）
    pub const ALL: [Program; 5] = [
        Program::Main,
        Program::Workshop,
        Program::Findings,
        Program::Demo,
        Program::Industry,
    ];

    /// 从 Category 列解析 program
    ///
    /// # 规则
    /// - 取 '-' 之前的首段（如 "Main-Oral" → "Main"）
    /// - 大小写不敏感
    /// - 无法映射 → None（调用方按致命错误处理）
    pub fn from_category(category: &str) -> Option<Program> {
        let head = category.split('-').next().unwrap_or(category).trim();
        match head.to_ascii_lowercase().as_str() {
            "main" => Some(Program::Main),
            "workshop" => Some(Program::Workshop),
            "findings" => Some(Program::Findings),
            "demo" => Some(Program::Demo),
            "industry" => Some(Program::Industry),
            _ => None,
        }
    }

    /// 精确解析（"Main"/"Workshop"/...），用于已落库字符串的校验
    pub fn parse_exact(s: &str) -> Option<Program> {
        Program::ALL.iter().copied().find(|p| p.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Main => "Main",
            Program::Workshop => "Workshop",
            Program::Findings => "Findings",
            Program::Demo => "Demo",
            Program::Industry => "Industry",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// EventType - 活动类型
// ==========================================
// 说明: Plenary/Tutorial/Workshop 三类同时存在特化记录,
//       通用 events 表中的活动 id 不得与特化表撞键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Oral,     // 口头报告
    Poster,   // 海报
    #[serde(rename = "Virtual Poster")]
    VirtualPoster, // 线上海报
    Spotlight, // 聚光灯快讲
    Social,   // 社交活动
    Plenary,  // 全体大会
    Tutorial, // 讲习班
    Workshop, // 研讨会
    Break,    // 休息
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Oral => "Oral",
            EventType::Poster => "Poster",
            EventType::VirtualPoster => "Virtual Poster",
            EventType::Spotlight => "Spotlight",
            EventType::Social => "Social",
            EventType::Plenary => "Plenary",
            EventType::Tutorial => "Tutorial",
            EventType::Workshop => "Workshop",
            EventType::Break => "Break",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// SessionType - 时段类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    #[serde(rename = "Paper Sessions")]
    PaperSessions,
    #[serde(rename = "Plenary Sessions")]
    PlenarySessions,
    Tutorials,
    Workshops,
    Socials,
    Breaks,
}

impl SessionType {
    /// 从显示串反查（"Paper Sessions" 等）
    pub fn from_display(s: &str) -> Option<SessionType> {
        [
            SessionType::PaperSessions,
            SessionType::PlenarySessions,
            SessionType::Tutorials,
            SessionType::Workshops,
            SessionType::Socials,
            SessionType::Breaks,
        ]
        .into_iter()
        .find(|t| t.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::PaperSessions => "Paper Sessions",
            SessionType::PlenarySessions => "Plenary Sessions",
            SessionType::Tutorials => "Tutorials",
            SessionType::Workshops => "Workshops",
            SessionType::Socials => "Socials",
            SessionType::Breaks => "Breaks",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 标识派生规则
// ==========================================
// 红线: 纯函数,相同语义输入必须得到相同 id（重复导入的幂等前提）

/// 名称转 id-safe 标识
///
/// # 规则
/// - 空格 → '-'
/// - 冒号 → '_'
/// - 全小写
pub fn name_to_id(name: &str) -> String {
    name.replace(' ', "-").replace(':', "_").to_lowercase()
}

/// 拼接活动的可读名称: "{时段}: {标签} ({类型})"
///
/// 标签通常为 track 名,spotlight 类活动用会场名替代
pub fn session_event_name(session: &str, label: &str, event_type: EventType) -> String {
    format!("{}: {} ({})", session, label, event_type)
}

/// 派生活动 id（可读名称 → id-safe 标识）
pub fn derive_event_id(session: &str, label: &str, event_type: EventType) -> String {
    name_to_id(&session_event_name(session, label, event_type))
}

// ==========================================
// 作者串解析
// ==========================================

/// 解析表格中的作者串
///
/// # 规则
/// - 以 ',' 分隔;最后一段再按 " and " 拆分
/// - 单段时整体按 " and " 拆分
/// - 各段 trim,空段丢弃
pub fn parse_author_string(author_string: &str) -> Vec<String> {
    let parts: Vec<&str> = author_string.split(',').collect();
    let raw: Vec<&str> = if parts.len() == 1 {
        parts[0].split(" and ").collect()
    } else {
        let (front, last) = parts.split_at(parts.len() - 1);
        front
            .iter()
            .copied()
            .chain(last[0].split(" and "))
            .collect()
    };
    raw.into_iter()
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .collect()
}
