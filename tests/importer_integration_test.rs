// ==========================================
// ConferenceAssembler 集成测试
// ==========================================
// 测试目标: 验证完整的多源装配流程与合并语义
// ==========================================


use conf_graph::domain::types::{derive_event_id, EventType};
use conf_graph::importer::{ConferenceAssembler, ImportError};
use conf_graph::logging;
use test_helpers::{PaperRowBuilder, SourceFixture};

#[test]
fn test_end_to_end_oral_poster_merge() {
    // 初始化日志系统
    logging::init_test();

    // 一条 oral 行 + 一条 poster 行重引用同一 PID
    let fixture = SourceFixture::new()
        .with_oral_rows(&[PaperRowBuilder::new("P1")
            .session("Session 1")
            .track("NLP")
            .category("Main-Oral")
            .time("09:00-10:30")
            .build()])
        .with_poster_rows(&[PaperRowBuilder::new("P1")
            .session("Session 7")
            .track("NLP")
            .category("Main-Poster")
            .date("2023-07-11")
            .time("11:00-12:30")
            .build()]);

    let result = ConferenceAssembler::new(fixture.config.clone())
        .assemble()
        .expect("装配应成功");
    let conference = result.conference;

    // 仅一条论文记录,program 归一为 Main
    let workshop_fixture_papers = 1; // 夹具自带一条 workshop 论文
    assert_eq!(conference.papers.len(), 1 + workshop_fixture_papers);
    let paper = &conference.papers["P1"];
    assert_eq!(paper.program, "Main");

    // event_ids 同时包含两个派生活动 id
    let oral_id = derive_event_id("Session 1", "NLP", EventType::Oral);
    let poster_id = derive_event_id("Session 7", "NLP", EventType::Poster);
    assert!(paper.event_ids.contains(&oral_id));
    assert!(paper.event_ids.contains(&poster_id));

    // 两个活动都指回该论文
    assert_eq!(conference.events[&oral_id].paper_ids, vec!["P1"]);
    assert_eq!(conference.events[&poster_id].paper_ids, vec!["P1"]);

    // 合并统计: 第二次出现走合并路径
    assert_eq!(result.report.papers_merged, 1);
    assert_eq!(result.report.merge_conflicts, 0);
}

#[test]
fn test_spotlight_remerges_virtual_poster() {
    logging::init_test();

    // spotlight 是 virtual poster 的有意重放
    let fixture = SourceFixture::new()
        .with_virtual_rows(&[PaperRowBuilder::new("P9")
            .session("Virtual Session 2")
            .track("Machine Translation")
            .category("Main-Virtual")
            .time("11:00-12:30")
            .build()])
        .with_spotlight_rows(&[PaperRowBuilder::new("P9")
            .session("Spotlight 1")
            .room("Virtual Room A")
            .category("Main-Spotlight")
            .build()]);

    let result = ConferenceAssembler::new(fixture.config.clone())
        .assemble()
        .expect("装配应成功");
    let conference = result.conference;

    let virtual_id = derive_event_id(
        "Virtual Session 2",
        "Machine Translation",
        EventType::VirtualPoster,
    );
    // spotlight 组标签取会场名
    let spotlight_id = derive_event_id("Spotlight 1", "Virtual Room A", EventType::Spotlight);

    let paper = &conference.papers["P9"];
    assert!(paper.event_ids.contains(&virtual_id));
    assert!(paper.event_ids.contains(&spotlight_id));
    assert_eq!(result.report.papers_merged, 1);

    // spotlight 活动落在策略窗口（当日 19:00 本地 → 23:00 UTC）
    let spotlight = &conference.events[&spotlight_id];
    assert_eq!(
        spotlight.start_time.unwrap().to_rfc3339(),
        "2023-07-10T23:00:00+00:00"
    );
}

#[test]
fn test_workshop_papers_exempt_from_event_contract() {
    logging::init_test();

    let fixture = SourceFixture::new();
    let result = ConferenceAssembler::new(fixture.config.clone())
        .assemble()
        .expect("workshop 论文空 event_ids 不应导致终检失败");
    let conference = result.conference;

    let paper = &conference.papers["wnlp_12"];
    assert_eq!(paper.program, "Workshop");
    assert!(paper.event_ids.is_empty());
    assert_eq!(paper.workshop_id.as_deref(), Some("wnlp"));

    // 注册表信息已并入 booklet workshop
    let workshop = &conference.workshops["wnlp"];
    assert_eq!(workshop.committee.len(), 1);
    assert_eq!(workshop.anthology_venue_id.as_deref(), Some("wnlp"));
}

#[test]
fn test_unknown_category_aborts_import() {
    logging::init_test();

    let fixture = SourceFixture::new().with_oral_rows(&[PaperRowBuilder::new("P1")
        .category("Sponsor-Oral")
        .build()]);

    let err = ConferenceAssembler::new(fixture.config.clone())
        .assemble()
        .unwrap_err();
    assert!(matches!(err, ImportError::UnknownCategory { .. }));
}

#[test]
fn test_anthology_and_keywords_backfill() {
    logging::init_test();

    let fixture = SourceFixture::new()
        .with_oral_rows(&[PaperRowBuilder::new("P7")
            .category("Main-Oral")
            .build()])
        .with_anthology(
            "long.yaml",
            r#"- id: '7'
  abstract: 'Backfilled abstract'
  anthology_id: '2023.conf-long.7'
  authors:
    - first_name: Dana
      last_name: Chen
"#,
        )
        .with_keywords("PID\tKeywords\tLanguages\nP7\tparsing|syntax\tEnglish\n");

    let result = ConferenceAssembler::new(fixture.config.clone())
        .assemble()
        .expect("装配应成功");
    let paper = &result.conference.papers["P7"];

    // 文集回填覆盖表内作者串,摘要与出版号就位
    assert_eq!(paper.abstract_text, "Backfilled abstract");
    assert_eq!(paper.tldr, "Backfilled abstract");
    assert_eq!(paper.anthology_id.as_deref(), Some("2023.conf-long.7"));
    assert_eq!(paper.authors, vec!["Dana Chen"]);
    assert_eq!(paper.keywords, vec!["parsing", "syntax"]);
    assert_eq!(paper.languages, vec!["English"]);
}

#[test]
fn test_assembly_is_idempotent_per_row() {
    logging::init_test();

    // 同一行出现两次（重复导出),合并后与单次一致
    let row = || {
        PaperRowBuilder::new("P1")
            .session("Session 1")
            .track("NLP")
            .category("Main-Oral")
            .build()
    };
    let fixture = SourceFixture::new().with_oral_rows(&[row(), row()]);

    let result = ConferenceAssembler::new(fixture.config.clone())
        .assemble()
        .expect("装配应成功");
    let conference = result.conference;

    let oral_id = derive_event_id("Session 1", "NLP", EventType::Oral);
    assert_eq!(conference.events[&oral_id].paper_ids, vec!["P1"]);
    assert_eq!(conference.papers["P1"].event_ids, vec![oral_id]);
}

#[test]
fn test_specialized_sessions_seeded_before_paper_sessions() {
    logging::init_test();

    let fixture = SourceFixture::new().with_oral_rows(&[PaperRowBuilder::new("P1")
        .session("Session 1")
        .build()]);

    let result = ConferenceAssembler::new(fixture.config.clone())
        .assemble()
        .expect("装配应成功");
    let conference = result.conference;

    // 特化时段与论文时段并存,特化活动不进通用 events 表
    assert!(conference.sessions.contains_key("keynote-1"));
    assert!(conference.sessions.contains_key("t1"));
    assert!(conference.sessions.contains_key("wnlp"));
    assert!(conference.sessions.contains_key("session-1"));
    assert!(!conference.events.contains_key("keynote-1"));
    assert!(conference.plenaries.contains_key("keynote-1"));
    assert!(conference.tutorials.contains_key("t1"));

    // 社交注册表生成 Socials 时段
    assert!(conference.sessions.contains_key("s1"));
}

#[test]
fn test_graph_serializes_with_iso_timestamps() {
    logging::init_test();

    let fixture = SourceFixture::new().with_oral_rows(&[PaperRowBuilder::new("P1")
        .time("09:00-10:30")
        .build()]);

    let result = ConferenceAssembler::new(fixture.config.clone())
        .assemble()
        .expect("装配应成功");

    let json = serde_json::to_string_pretty(&result.conference).expect("图谱应可序列化");
    // 本地 09:00(-04:00) → 13:00 UTC,RFC3339 落盘
    assert!(json.contains("2023-07-10T13:00:00Z"));
    // 往返反序列化无损
    let roundtrip: conf_graph::Conference = serde_json::from_str(&json).unwrap();
    assert_eq!(roundtrip.papers.len(), result.conference.papers.len());
}

#[test]
fn test_report_counts_cover_all_entities() {
    logging::init_test();

    let fixture = SourceFixture::new().with_oral_rows(&[
        PaperRowBuilder::new("P1").order(1.0).build(),
        PaperRowBuilder::new("P2").order(2.0).build(),
    ]);

    let result = ConferenceAssembler::new(fixture.config.clone())
        .assemble()
        .expect("装配应成功");
    let report = &result.report;

    assert!(!report.batch_id.is_empty());
    assert_eq!(report.papers, result.conference.papers.len());
    assert_eq!(report.sessions, result.conference.sessions.len());
    assert_eq!(report.events, result.conference.events.len());
    assert_eq!(report.plenaries, 1);
    assert_eq!(report.tutorials, 1);
    assert_eq!(report.workshops, 1);
    // P1/P2 + workshop 论文
    assert_eq!(report.papers_created, 3);
}
