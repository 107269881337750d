// ==========================================
// 会议日程图谱构建系统 - 数据源配置
// ==========================================
// 依据: Source_Formats_v0.1.md - 1. 数据源清单
// ==========================================
// 职责: 声明一次装配所需的全部输入路径与口径参数
// 口径: 必选源缺失为致命错误;可选源(文集/资产/关键词/extras)
//       未配置时按空表处理
// ==========================================

use crate::importer::error::ImportError;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 会议本地时间的缺省 UTC 偏移（小时）
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -4;

fn default_utc_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}

// ==========================================
// SourcesConfig - 装配输入配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    // ===== 论文表格（必选,TSV）=====
    pub oral_tsv: PathBuf,
    pub poster_tsv: PathBuf,
    pub virtual_tsv: PathBuf,
    pub spotlight_tsv: PathBuf,

    // ===== 结构化注册表（必选）=====
    pub booklet_json: PathBuf,
    pub workshops_yaml: PathBuf,
    pub workshop_papers_yaml: PathBuf,
    pub socials_json: PathBuf,

    // ===== 增益源（可选）=====
    #[serde(default)]
    pub anthology_dir: Option<PathBuf>,
    #[serde(default)]
    pub assets_xlsx: Option<PathBuf>,
    #[serde(default)]
    pub keywords_tsv: Option<PathBuf>,
    #[serde(default)]
    pub extras_xlsx: Option<PathBuf>,

    // ===== 口径参数 =====
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    #[serde(default)]
    pub block_leeway_minutes: i64, // 日程块合并容差
}

impl SourcesConfig {
    /// 从 JSON 配置文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)
            .map_err(|e| ImportError::ConfigReadError(format!("{}: {}", path.display(), e)))?;
        let config: SourcesConfig = serde_json::from_str(&content)
            .map_err(|e| ImportError::ConfigReadError(format!("{}: {}", path.display(), e)))?;
        config.conference_offset()?; // 偏移合法性提前校验
        Ok(config)
    }

    /// 会议本地固定偏移
    pub fn conference_offset(&self) -> Result<FixedOffset, ImportError> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or_else(|| {
            ImportError::ConfigValueError {
                key: "utc_offset_hours".to_string(),
                value: self.utc_offset_hours.to_string(),
                message: "超出合法时区偏移范围".to_string(),
            }
        })
    }
}
