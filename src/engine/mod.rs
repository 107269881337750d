// ==========================================
// 会议日程图谱构建系统 - 引擎层
// ==========================================
// 职责: 时间归并算法与只读视图派生
// ==========================================

pub mod calendar;
pub mod schedule_blocks;
pub mod views;

// 重导出核心类型
pub use calendar::{
    build_overall_calendar, build_schedule, build_type_overview, FrontendCalendarEvent,
};
pub use schedule_blocks::{block_window, compute_schedule_blocks, TimeBounded};
pub use views::{
    main_program_tracks, papers_by_track, session_days, sessions_by_day, track_catalog,
    track_id_catalog, SessionDay,
};
