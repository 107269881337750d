// ==========================================
// 会议日程图谱构建系统 - 时段与活动领域模型
// ==========================================
// 依据: Schedule_Graph_Spec_v0.2.md - 2.2 Session / Event
// 依据: Source_Formats_v0.1.md - booklet 导出字段
// ==========================================

use crate::domain::paper::AnthologyAuthor;
use crate::domain::types::{EventType, SessionType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Event - 通用活动
// ==========================================
// 标识: 由 (时段, 标签, 类型) 派生,见 domain::types::derive_event_id
// 红线: Plenary/Tutorial/Workshop 的特化记录不进本表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub session: String,    // 父时段显示名（如 "Session 1"）
    pub session_id: String, // 父时段 id
    pub track: String,      // 标签（track 名;spotlight 为会场名）
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub chairs: Vec<String>,
    pub paper_ids: Vec<String>, // 合并时追加,同活动内去重
    pub link: Option<String>,
    pub room: Option<String>,
}

impl Event {
    /// 所在会议日（UTC）
    pub fn day(&self) -> Option<NaiveDate> {
        self.start_time.map(|t| t.date_naive())
    }
}

// ==========================================
// Session - 时段
// ==========================================
// 一对多持有活动（按活动 id 引用）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub event_ids: Vec<String>,
}

impl Session {
    /// 所在会议日（UTC）
    pub fn day(&self) -> Option<NaiveDate> {
        self.start_time.map(|t| t.date_naive())
    }

    /// 追加活动引用（幂等）
    pub fn push_event(&mut self, event_id: &str) {
        if !self.event_ids.iter().any(|e| e == event_id) {
            self.event_ids.push(event_id.to_string());
        }
    }

    /// 按成员活动扩张显示窗口（取 min 起点 / max 终点）
    pub fn widen_window(
        &mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) {
        if let Some(s) = start {
            self.start_time = Some(match self.start_time {
                Some(cur) => cur.min(s),
                None => s,
            });
        }
        if let Some(e) = end {
            self.end_time = Some(match self.end_time {
                Some(cur) => cur.max(e),
                None => e,
            });
        }
    }
}

// ==========================================
// Plenary - 全体大会（特化活动）
// ==========================================
// 来源: booklet 导出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plenary {
    pub id: String,
    pub session_id: String,
    pub title: String,
    pub image: Option<String>,
    pub presenter: String,
    pub institution: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub bio: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

// ==========================================
// Tutorial - 讲习班（特化活动）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: String,
    pub session_id: String,
    pub title: String,
    pub organizers: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub website: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

// ==========================================
// Workshop - 研讨会（特化活动）
// ==========================================
// id 即 workshop 短名,workshop 论文以此关联
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workshop {
    pub id: String,
    pub session_id: String,
    pub title: String,
    pub organizers: Vec<String>,
    pub description: String,
    pub website: Option<String>,
    pub committee: Vec<AnthologyAuthor>,       // 注册表补充
    pub anthology_venue_id: Option<String>,    // 注册表补充
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}
