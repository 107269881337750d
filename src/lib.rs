// ==========================================
// 会议日程图谱构建系统 - 核心库
// ==========================================
// 依据: Schedule_Graph_Spec_v0.2.md
// 技术栈: Rust + serde + chrono
// 系统定位: 离线批处理,多源会议数据 → 只读日程图谱
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部数据解析与合并
pub mod importer;

// 引擎层 - 时间归并与只读视图
pub mod engine;

// 配置层 - 数据源清单
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    derive_event_id, name_to_id, session_event_name, EventType, Program, SessionType,
};

// 领域实体
pub use domain::{
    AnthologyAuthor, Conference, Event, ImportReport, Paper, Plenary, Session, Tutorial,
    Workshop,
};

// 导入层
pub use importer::{
    AssemblyResult, ConferenceAssembler, ConferenceBuilder, ImportError, MergeOutcome,
};

// 引擎层
pub use engine::{compute_schedule_blocks, FrontendCalendarEvent};

// 配置
pub use config::SourcesConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "会议日程图谱构建系统";
