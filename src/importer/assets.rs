// ==========================================
// 会议日程图谱构建系统 - 资产表与关键词侧表加载
// ==========================================
// 依据: Source_Formats_v0.1.md - 5. 资产表 / 6. 关键词侧表
// ==========================================
// 口径: 资产表用点分替代 id（"main.123"）,与 PID 的换算见 to_asset_key
// ==========================================

use crate::domain::paper::{KeywordEntry, PaperAssets};
use crate::domain::types::Program;
use crate::importer::anthology::strip_pid_prefix;
use crate::importer::error::ImportError;
use crate::importer::file_parser::{ExcelParser, TsvParser};
use crate::importer::rows::{split_list_field, KeywordRow};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// (PID, program) → 资产表键换算
///
/// 例: ("P123", Main) → "main.123"
pub fn to_asset_key(pid: &str, program: Program) -> String {
    format!(
        "{}.{}",
        program.as_str().to_lowercase(),
        strip_pid_prefix(pid)
    )
}

/// 非空取值,空串归一为 None
fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 从行记录解析资产条目（纯函数,便于单测）
pub fn parse_asset_rows(
    rows: Vec<HashMap<String, String>>,
) -> HashMap<String, PaperAssets> {
    let mut index = HashMap::new();
    for row in rows {
        let key = match non_empty(row.get("Paper ID")) {
            Some(k) => k,
            None => continue, // 无身份键的行在边界过滤
        };
        let underline_id = non_empty(row.get("Underline ID")).and_then(|v| {
            // Excel 数值单元常带 ".0" 尾巴
            v.trim_end_matches(".0").parse::<i64>().ok()
        });
        let assets = PaperAssets {
            underline_url: non_empty(row.get("Underline URL")),
            underline_id,
            poster_pdf: non_empty(row.get("Poster PDF")),
            slides_pdf: non_empty(row.get("Slides PDF")),
            video_url: non_empty(row.get("Video URL")),
            paper_pdf: non_empty(row.get("Paper PDF")),
        };
        if index.insert(key.clone(), assets).is_some() {
            warn!(asset_key = %key, "资产表键重复,保留后写行");
        }
    }
    index
}

/// 加载资产表 xlsx（首个工作表）
pub fn load_assets_xlsx<P: AsRef<Path>>(
    path: P,
) -> Result<HashMap<String, PaperAssets>, ImportError> {
    let rows = ExcelParser.parse_first_sheet(path)?;
    Ok(parse_asset_rows(rows))
}

/// 加载关键词/语言侧表（TSV,键为 PID）
pub fn load_keywords_tsv<P: AsRef<Path>>(
    path: P,
) -> Result<HashMap<String, KeywordEntry>, ImportError> {
    let rows: Vec<KeywordRow> = TsvParser.parse(path)?;
    let mut index = HashMap::new();
    for row in rows {
        let pid = match row.pid.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => continue,
        };
        index.insert(
            pid,
            KeywordEntry {
                keywords: row
                    .keywords
                    .as_deref()
                    .map(split_list_field)
                    .unwrap_or_default(),
                languages: row
                    .languages
                    .as_deref()
                    .map(split_list_field)
                    .unwrap_or_default(),
            },
        );
    }
    Ok(index)
}
