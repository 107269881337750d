// ==========================================
// 会议日程图谱构建系统 - 装配编排器
// ==========================================
// 依据: Program_Import_Spec_v0.2.md - 1. 装配主流程
// ==========================================
// 红线: 装配顺序是硬依赖链,不得调整:
//   文集/资产/关键词先行（论文构造要回填交叉引用）,
//   特化时段先于论文时段（独占 id 占位）,
//   spotlight 放在 virtual poster 之后（有意重复走静默合并）,
//   workshop 论文最后（无活动契约）,终检收尾
// ==========================================

use crate::config::SourcesConfig;
use crate::domain::conference::{Conference, ImportReport};
use crate::importer::anthology::load_anthology_dir;
use crate::importer::assets::{load_assets_xlsx, load_keywords_tsv};
use crate::importer::booklet::{load_booklet, merge_booklet};
use crate::importer::builder::ConferenceBuilder;
use crate::importer::error::ImportError;
use crate::importer::extras::load_extras;
use crate::importer::file_parser::TsvParser;
use crate::importer::paper_events::{
    parse_paper_sheet, ImportContext, PaperSheetKind,
};
use crate::importer::rows::PaperSheetRow;
use crate::importer::socials::{load_socials, merge_socials};
use crate::importer::validator::validate_conference;
use crate::importer::workshop_papers::{
    load_workshop_papers, load_workshop_registry, merge_workshop_papers,
    merge_workshop_registry,
};
use chrono::Utc;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

// ==========================================
// AssemblyResult - 装配结果
// ==========================================
#[derive(Debug, Clone)]
pub struct AssemblyResult {
    pub conference: Conference,
    pub report: ImportReport,
}

// ==========================================
// ConferenceAssembler - 装配编排器
// ==========================================
pub struct ConferenceAssembler {
    config: SourcesConfig,
}

impl ConferenceAssembler {
    pub fn new(config: SourcesConfig) -> Self {
        Self { config }
    }

    /// 执行完整装配流程（单线程单趟）
    pub fn assemble(&self) -> Result<AssemblyResult, ImportError> {
        let started = Instant::now();
        let offset = self.config.conference_offset()?;
        let mut builder = ConferenceBuilder::new();

        // ==========================================
        // 步骤1: 文集元数据
        // ==========================================
        info!("步骤1: 载入文集元数据");
        let anthology = match &self.config.anthology_dir {
            Some(dir) => load_anthology_dir(dir)?,
            None => {
                info!("未配置文集目录,摘要/结构化作者按空值回填");
                HashMap::new()
            }
        };

        // ==========================================
        // 步骤2: 资产表
        // ==========================================
        info!("步骤2: 载入资产表");
        let assets = match &self.config.assets_xlsx {
            Some(path) => load_assets_xlsx(path)?,
            None => {
                info!("未配置资产表,资产链接留空");
                HashMap::new()
            }
        };

        // ==========================================
        // 步骤3: 关键词侧表
        // ==========================================
        info!("步骤3: 载入关键词侧表");
        let keywords = match &self.config.keywords_tsv {
            Some(path) => load_keywords_tsv(path)?,
            None => {
                info!("未配置关键词侧表,关键词/语言留空");
                HashMap::new()
            }
        };

        let ctx = ImportContext {
            anthology,
            assets,
            keywords,
        };
        info!(
            anthology = ctx.anthology.len(),
            assets = ctx.assets.len(),
            keywords = ctx.keywords.len(),
            "交叉引用上下文就绪"
        );

        // ==========================================
        // 步骤4: 特化时段（workshop/plenary/tutorial 占位先行）
        // ==========================================
        info!("步骤4: 装配特化时段");
        let booklet = load_booklet(&self.config.booklet_json)?;
        let (plenaries, tutorials, workshops) =
            merge_booklet(booklet, offset, &mut builder)?;
        let registry = load_workshop_registry(&self.config.workshops_yaml)?;
        let registered = merge_workshop_registry(registry, &mut builder)?;
        info!(
            plenaries,
            tutorials, workshops, registry = registered, "特化时段装配完成"
        );

        // ==========================================
        // 步骤5: 论文表格（固定顺序 Oral → Poster → Virtual → Spotlight）
        // ==========================================
        info!("步骤5: 装配论文时段");
        let sheets = [
            (PaperSheetKind::Oral, &self.config.oral_tsv),
            (PaperSheetKind::Poster, &self.config.poster_tsv),
            (PaperSheetKind::VirtualPoster, &self.config.virtual_tsv),
            (PaperSheetKind::Spotlight, &self.config.spotlight_tsv),
        ];
        for (kind, path) in sheets {
            let rows: Vec<PaperSheetRow> = TsvParser.parse(path)?;
            let stats = parse_paper_sheet(kind, rows, &ctx, offset, &mut builder)?;
            info!(
                sheet = kind.sheet_name(),
                events = stats.events,
                papers = stats.papers,
                skipped = stats.skipped_rows,
                "论文表格装配完成"
            );
        }

        // ==========================================
        // 步骤6: 杂项活动（增益,文件缺失只告警）
        // ==========================================
        info!("步骤6: 装配杂项活动");
        match &self.config.extras_xlsx {
            Some(path) => {
                let merged = load_extras(path, offset, &mut builder);
                info!(extras = merged, "杂项活动装配完成");
            }
            None => info!("未配置 extras 工作簿,跳过杂项活动"),
        }

        // ==========================================
        // 步骤7: 社交活动注册表
        // ==========================================
        info!("步骤7: 装配社交活动");
        let socials = load_socials(&self.config.socials_json)?;
        let social_count = merge_socials(socials, offset, &mut builder)?;
        info!(socials = social_count, "社交活动装配完成");

        // ==========================================
        // 步骤8: workshop 论文（最后,无活动契约）
        // ==========================================
        info!("步骤8: 装配 workshop 论文");
        let ws_papers = load_workshop_papers(&self.config.workshop_papers_yaml)?;
        let ws_count = merge_workshop_papers(ws_papers, &mut builder);
        info!(papers = ws_count, "workshop 论文装配完成");

        // ==========================================
        // 步骤9: 图谱终检
        // ==========================================
        info!("步骤9: 图谱终检");
        let stats = builder.stats();
        let (sessions, events, papers, n_plenaries, n_tutorials, n_workshops) =
            builder.counts();
        let conference = builder.finish();
        validate_conference(&conference)?;

        if stats.warnings > 0 {
            warn!(warnings = stats.warnings, "装配完成但存在可恢复告警");
        }

        let report = ImportReport {
            batch_id: Uuid::new_v4().to_string(),
            imported_at: Utc::now(),
            elapsed_ms: started.elapsed().as_millis() as u64,
            sessions,
            events,
            papers,
            plenaries: n_plenaries,
            tutorials: n_tutorials,
            workshops: n_workshops,
            papers_created: stats.papers_created,
            papers_merged: stats.papers_merged,
            merge_conflicts: stats.merge_conflicts,
            warnings: stats.warnings,
        };

        info!(
            batch_id = %report.batch_id,
            sessions,
            events,
            papers,
            elapsed_ms = report.elapsed_ms,
            "图谱装配完成"
        );

        Ok(AssemblyResult { conference, report })
    }
}
