// ==========================================
// 会议日程图谱构建系统 - 领域层
// ==========================================
// 依据: Schedule_Graph_Spec_v0.2.md - 2. 数据模型
// ==========================================

pub mod conference;
pub mod event;
pub mod paper;
pub mod types;

// 重导出核心类型
pub use conference::{Conference, ImportReport};
pub use event::{Event, Plenary, Session, Tutorial, Workshop};
pub use paper::{AnthologyAuthor, AnthologyEntry, KeywordEntry, Paper, PaperAssets};
pub use types::{
    derive_event_id, name_to_id, parse_author_string, session_event_name, EventType, Program,
    SessionType,
};
