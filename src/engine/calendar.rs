// ==========================================
// 会议日程图谱构建系统 - 前端日历投影
// ==========================================
// 依据: Schedule_Graph_Spec_v0.2.md - 6. 只读视图
// ==========================================
// 职责: 图谱 → 日历组件事件列表（周视图 + 日视图）
// 红线: 只读投影,不回写图谱
// ==========================================

use crate::domain::conference::Conference;
use crate::domain::event::Session;
use crate::domain::types::SessionType;
use crate::engine::schedule_blocks::{block_window, compute_schedule_blocks};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// FrontendCalendarEvent - 日历组件事件
// ==========================================
// 字段名对齐前端日历组件的约定（classNames 驼峰）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendCalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: String,
    pub url: String,
    pub category: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub view: String, // "week" / "day"
    #[serde(rename = "classNames")]
    pub class_names: Vec<String>,
}

/// 时段类型 → 日视图跳转页锚点
fn session_url(session: &Session, tab_id: &str) -> String {
    match session.session_type {
        SessionType::PlenarySessions => format!("plenary_sessions.html#tab-{}", tab_id),
        SessionType::Workshops => format!("workshops.html#tab-{}", tab_id),
        SessionType::Tutorials => format!("tutorials.html#tab-{}", tab_id),
        SessionType::Socials => format!("socials.html#tab-{}", tab_id),
        _ => format!("sessions.html#tab-{}", tab_id),
    }
}

/// 时段类型 → 日历着色 class
fn session_class_name(session_type: SessionType) -> &'static str {
    match session_type {
        SessionType::PlenarySessions => "calendar-event-plenary",
        SessionType::Tutorials => "calendar-event-tutorial",
        SessionType::Workshops => "calendar-event-workshops",
        SessionType::PaperSessions => "calendar-event-paper-sessions",
        SessionType::Socials => "calendar-event-socials",
        SessionType::Breaks => "calendar-event-other",
    }
}

/// 会议日 tab 锚点（"Jul 10" → "jul10"）
pub fn day_tab_id(start: DateTime<Utc>) -> String {
    start.format("%b %d").to_string().replace(' ', "").to_lowercase()
}

/// 图谱 → 日历事件全集
///
/// - 每个带完整窗口的时段出一条周视图事件
/// - 时段内按 (时段, 标签, 起点) 去重后逐活动出日视图事件
pub fn build_overall_calendar(conference: &Conference) -> Vec<FrontendCalendarEvent> {
    let mut calendar = Vec::new();

    for session in conference.sessions.values() {
        let (start, end) = match (session.start_time, session.end_time) {
            (Some(s), Some(e)) => (s, e),
            _ => continue, // 无窗口时段不投影（注册表补建的 workshop 等）
        };
        let tab_id = day_tab_id(start);

        calendar.push(FrontendCalendarEvent {
            title: session.name.clone(),
            start,
            end,
            location: String::new(),
            url: session_url(session, &tab_id),
            category: "time".to_string(),
            event_type: session.session_type.to_string(),
            view: "week".to_string(),
            class_names: vec![],
        });

        // 同 (时段, 标签, 起点) 的活动聚到一条日视图事件
        let mut seen: HashSet<(String, String, Option<DateTime<Utc>>)> = HashSet::new();
        for event_id in &session.event_ids {
            let event = match conference.events.get(event_id) {
                Some(e) => e,
                None => continue, // 特化活动由周视图条目覆盖
            };
            let key = (
                event.session.clone(),
                event.track.clone(),
                event.start_time,
            );
            if !seen.insert(key) {
                continue;
            }
            calendar.push(FrontendCalendarEvent {
                title: format!("<b>{}</b>", event.track),
                start,
                end,
                location: String::new(),
                url: format!("papers.html?session={}&program=all", session.id),
                category: "time".to_string(),
                event_type: session.session_type.to_string(),
                view: "day".to_string(),
                class_names: vec![],
            });
        }
    }

    calendar
}

/// 同类时段的周视图总览条（"Workshops"/"Tutorials" 等横幅）
///
/// 把该类型全部时段窗口按容差归并为日程块,每块出一条周视图事件;
/// workshop 子场次间的短休息用非零 leeway 吞并
pub fn build_type_overview(
    conference: &Conference,
    session_type: SessionType,
    leeway: Duration,
) -> Vec<FrontendCalendarEvent> {
    let spans: Vec<(DateTime<Utc>, DateTime<Utc>)> = conference
        .sessions
        .values()
        .filter(|s| s.session_type == session_type)
        .filter_map(|s| Some((s.start_time?, s.end_time?)))
        .collect();

    let url = match session_type {
        SessionType::PlenarySessions => "plenary_sessions.html",
        SessionType::Tutorials => "tutorials.html",
        SessionType::Workshops => "workshops.html",
        SessionType::Socials => "socials.html",
        _ => "sessions.html",
    };

    compute_schedule_blocks(&spans, leeway)
        .iter()
        .filter_map(|block| block_window(block))
        .map(|(start, end)| FrontendCalendarEvent {
            title: session_type.to_string(),
            start,
            end,
            location: String::new(),
            url: url.to_string(),
            category: "time".to_string(),
            event_type: session_type.to_string(),
            view: "week".to_string(),
            class_names: vec![],
        })
        .collect()
}

/// 着色装饰（日历页使用的最终事件列表）
pub fn build_schedule(
    overall_calendar: &[FrontendCalendarEvent],
) -> Vec<FrontendCalendarEvent> {
    overall_calendar
        .iter()
        .cloned()
        .map(|mut event| {
            let class = SessionType::from_display(&event.event_type)
                .map(session_class_name)
                .unwrap_or("calendar-event-other");
            event.class_names = vec![class.to_string(), "calendar-event".to_string()];
            event
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::Event;
    use crate::domain::types::EventType;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 7, 10, h, m, 0).single().unwrap()
    }

    fn sample_conference() -> Conference {
        let mut conf = Conference::default();
        conf.sessions.insert(
            "session-1".to_string(),
            Session {
                id: "session-1".to_string(),
                name: "Session 1".to_string(),
                start_time: Some(utc(13, 0)),
                end_time: Some(utc(14, 30)),
                session_type: SessionType::PaperSessions,
                event_ids: vec!["e1".to_string(), "e2".to_string()],
            },
        );
        for (id, track) in [("e1", "NLP"), ("e2", "NLP")] {
            conf.events.insert(
                id.to_string(),
                Event {
                    id: id.to_string(),
                    session: "Session 1".to_string(),
                    session_id: "session-1".to_string(),
                    track: track.to_string(),
                    event_type: EventType::Oral,
                    start_time: Some(utc(13, 0)),
                    end_time: Some(utc(14, 30)),
                    chairs: vec![],
                    paper_ids: vec![],
                    link: None,
                    room: None,
                },
            );
        }
        conf
    }

    #[test]
    fn test_build_overall_calendar_dedups_day_events() {
        let conf = sample_conference();
        let calendar = build_overall_calendar(&conf);

        let week: Vec<_> = calendar.iter().filter(|e| e.view == "week").collect();
        let day: Vec<_> = calendar.iter().filter(|e| e.view == "day").collect();
        assert_eq!(week.len(), 1);
        // 同 (时段,标签,起点) 的两个活动折叠为一条
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].title, "<b>NLP</b>");
    }

    #[test]
    fn test_day_tab_id() {
        assert_eq!(day_tab_id(utc(13, 0)), "jul10");
    }

    #[test]
    fn test_build_type_overview_merges_blocks() {
        let mut conf = sample_conference();
        // 两个近邻 Workshops 时段 + 一个次日时段
        for (id, start, end) in [
            ("w1", utc(13, 0), utc(15, 0)),
            ("w2", utc(15, 30), utc(17, 0)),
        ] {
            conf.sessions.insert(
                id.to_string(),
                Session {
                    id: id.to_string(),
                    name: id.to_string(),
                    start_time: Some(start),
                    end_time: Some(end),
                    session_type: SessionType::Workshops,
                    event_ids: vec![],
                },
            );
        }

        // 无容差: 两块;1 小时容差: 吞并为一块
        let strict = build_type_overview(&conf, SessionType::Workshops, Duration::zero());
        assert_eq!(strict.len(), 2);

        let merged = build_type_overview(&conf, SessionType::Workshops, Duration::hours(1));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "Workshops");
        assert_eq!(merged[0].start, utc(13, 0));
        assert_eq!(merged[0].end, utc(17, 0));
    }

    #[test]
    fn test_build_schedule_assigns_classes() {
        let conf = sample_conference();
        let overall = build_overall_calendar(&conf);
        let schedule = build_schedule(&overall);

        assert!(schedule.iter().all(|e| e
            .class_names
            .contains(&"calendar-event".to_string())));
        assert!(schedule[0]
            .class_names
            .contains(&"calendar-event-paper-sessions".to_string()));
    }
}
