// ==========================================
// 会议日程图谱构建系统 - 命令行主入口
// ==========================================
// 用法: conf-graph --config import_config.json --output conference.json
// 退出码: 任一致命错误 → 非零退出并打印违规记录定位
// ==========================================

use anyhow::Context;
use chrono::Duration;
use clap::Parser;
use conf_graph::config::SourcesConfig;
use conf_graph::domain::types::SessionType;
use conf_graph::engine::{build_overall_calendar, build_schedule, build_type_overview};
use conf_graph::importer::ConferenceAssembler;
use conf_graph::logging;
use std::fs;
use std::path::PathBuf;

// ==========================================
// 命令行参数
// ==========================================
#[derive(Parser, Debug)]
#[command(name = "conf-graph", version, about = "会议日程图谱构建系统 - 多源数据导入与规整")]
struct Cli {
    /// 数据源配置文件（JSON）
    #[arg(long)]
    config: PathBuf,

    /// 图谱输出路径（JSON）
    #[arg(long, default_value = "conference.json")]
    output: PathBuf,

    /// 导入批次报告输出路径（JSON,可选）
    #[arg(long)]
    report: Option<PathBuf>,

    /// 日历事件投影输出路径（JSON,可选）
    #[arg(long)]
    calendar: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", conf_graph::APP_NAME);
    tracing::info!("系统版本: {}", conf_graph::VERSION);
    tracing::info!("==================================================");

    let cli = Cli::parse();

    // 加载数据源配置
    let config = SourcesConfig::load(&cli.config)
        .with_context(|| format!("加载配置失败: {}", cli.config.display()))?;
    tracing::info!("数据源配置: {}", cli.config.display());

    // 执行装配（单线程单趟;任一致命错误即整体中止）
    let block_leeway = Duration::minutes(config.block_leeway_minutes);
    let assembler = ConferenceAssembler::new(config);
    let result = assembler.assemble().context("图谱装配失败")?;

    // 落盘图谱文档
    let graph_json = serde_json::to_string_pretty(&result.conference)?;
    fs::write(&cli.output, graph_json)
        .with_context(|| format!("写入图谱失败: {}", cli.output.display()))?;
    tracing::info!("图谱已写入: {}", cli.output.display());

    // 落盘日历投影（周/日视图事件 + 同类时段总览条）
    if let Some(calendar_path) = &cli.calendar {
        let mut calendar = build_overall_calendar(&result.conference);
        for session_type in [
            SessionType::PlenarySessions,
            SessionType::Tutorials,
            SessionType::Workshops,
            SessionType::Socials,
        ] {
            calendar.extend(build_type_overview(
                &result.conference,
                session_type,
                block_leeway,
            ));
        }
        let calendar = build_schedule(&calendar);
        let calendar_json = serde_json::to_string_pretty(&calendar)?;
        fs::write(calendar_path, calendar_json)
            .with_context(|| format!("写入日历失败: {}", calendar_path.display()))?;
        tracing::info!("日历投影已写入: {}", calendar_path.display());
    }

    // 落盘批次报告
    if let Some(report_path) = &cli.report {
        let report_json = serde_json::to_string_pretty(&result.report)?;
        fs::write(report_path, report_json)
            .with_context(|| format!("写入报告失败: {}", report_path.display()))?;
        tracing::info!("批次报告已写入: {}", report_path.display());
    }

    tracing::info!(
        "装配完成: {} 时段 / {} 活动 / {} 论文",
        result.report.sessions,
        result.report.events,
        result.report.papers
    );

    Ok(())
}
