// ==========================================
// 引擎层集成测试 - 只读视图与日历投影
// ==========================================
// 测试目标: 装配产物上的二级索引与日历事件派生
// ==========================================


use chrono::Duration;
use conf_graph::engine::{
    build_overall_calendar, build_schedule, compute_schedule_blocks, main_program_tracks,
    session_days, sessions_by_day, track_catalog,
};
use conf_graph::importer::ConferenceAssembler;
use conf_graph::logging;
use test_helpers::{PaperRowBuilder, SourceFixture};

fn assembled() -> conf_graph::Conference {
    let fixture = SourceFixture::new()
        .with_oral_rows(&[
            PaperRowBuilder::new("P1")
                .session("Session 1")
                .track("NLP")
                .category("Main-Oral")
                .build(),
            PaperRowBuilder::new("P2")
                .session("Session 2")
                .track("Semantics")
                .category("Findings-Oral")
                .date("2023-07-11")
                .order(2.0)
                .build(),
        ])
        .with_poster_rows(&[PaperRowBuilder::new("P3")
            .session("Session 1")
            .track("Semantics")
            .category("Main-Poster")
            .time("09:00-10:30")
            .build()]);

    ConferenceAssembler::new(fixture.config.clone())
        .assemble()
        .expect("装配应成功")
        .conference
}

#[test]
fn test_session_days_span_conference() {
    logging::init_test();
    let conference = assembled();

    let days = session_days(&conference);
    // Jul 09 (讲习班) / Jul 10 / Jul 11 / Jul 13 (workshop)
    let labels: Vec<&str> = days.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["Jul 09", "Jul 10", "Jul 11", "Jul 13"]);
    assert!(days[0].active);
    assert_eq!(days.iter().filter(|d| d.active).count(), 1);
}

#[test]
fn test_sessions_by_day_groups_and_sorts() {
    logging::init_test();
    let conference = assembled();

    let grouped = sessions_by_day(&conference);
    // Jul 10: keynote-1 + Session 1
    let jul10: Vec<&str> = grouped
        .iter()
        .find(|(day, _)| day.format("%b %d").to_string() == "Jul 10")
        .map(|(_, sessions)| sessions.iter().map(|s| s.name.as_str()).collect())
        .unwrap();
    assert_eq!(jul10, vec!["Opening Keynote", "Session 1"]);
}

#[test]
fn test_track_catalogs() {
    logging::init_test();
    let conference = assembled();

    let tracks = track_catalog(&conference);
    assert!(tracks.contains(&"NLP".to_string()));
    assert!(tracks.contains(&"Semantics".to_string()));
    assert!(tracks.contains(&"Workshop on NLP".to_string())); // workshop 论文 track

    // Findings/workshop 论文不进主会 track 目录
    let main_tracks = main_program_tracks(&conference);
    assert_eq!(main_tracks, vec!["NLP", "Semantics"]);
}

#[test]
fn test_calendar_projection() {
    logging::init_test();
    let conference = assembled();

    let overall = build_overall_calendar(&conference);
    let schedule = build_schedule(&overall);

    // 每个带窗口的时段一条周视图事件
    let week_count = overall.iter().filter(|e| e.view == "week").count();
    let windowed_sessions = conference
        .sessions
        .values()
        .filter(|s| s.start_time.is_some() && s.end_time.is_some())
        .count();
    assert_eq!(week_count, windowed_sessions);

    // Session 1 下两个不同 track 的活动 → 两条日视图事件
    let day_titles: Vec<&str> = overall
        .iter()
        .filter(|e| e.view == "day")
        .map(|e| e.title.as_str())
        .collect();
    assert!(day_titles.contains(&"<b>NLP</b>"));
    assert!(day_titles.contains(&"<b>Semantics</b>"));

    // 装饰后的事件都带基础 class
    assert!(schedule
        .iter()
        .all(|e| e.class_names.contains(&"calendar-event".to_string())));
}

#[test]
fn test_schedule_blocks_on_assembled_sessions() {
    logging::init_test();
    let conference = assembled();

    // 同日近连续时段归并为一个日程块
    let spans: Vec<_> = conference
        .sessions
        .values()
        .filter(|s| s.day().map(|d| d.to_string() == "2023-07-10").unwrap_or(false))
        .filter_map(|s| Some((s.start_time?, s.end_time?)))
        .collect();
    assert!(spans.len() >= 2);

    let blocks = compute_schedule_blocks(&spans, Duration::hours(1));
    // keynote 08:00-09:00 与 Session 1 09:00-10:30 在 1h 容差内连成一块
    assert_eq!(blocks.len(), 1);
}
