// ==========================================
// 会议日程图谱构建系统 - 导入中间行结构
// ==========================================
// 依据: Source_Formats_v0.1.md - 各源表列定义
// 用途: 解析边界上的强类型中间产物,替代按列名索引的松散行
// 生命周期: 仅在导入流程内
// ==========================================

use serde::Deserialize;

// ==========================================
// PaperSheetRow - 论文表格行（四类表共用列超集）
// ==========================================
// oral 表有 Track Order,poster/virtual/spotlight 表有 Local Order;
// 其余列缺失时取 None
#[derive(Debug, Clone, Deserialize)]
pub struct PaperSheetRow {
    #[serde(default, rename = "PID")]
    pub pid: Option<String>,
    #[serde(default, rename = "Session")]
    pub session: Option<String>,
    #[serde(default, rename = "Track")]
    pub track: Option<String>,
    #[serde(default, rename = "Room")]
    pub room: Option<String>,
    #[serde(default, rename = "Local Order")]
    pub local_order: Option<f64>,
    #[serde(default, rename = "Track Order")]
    pub track_order: Option<f64>,
    #[serde(default, rename = "Category")]
    pub category: Option<String>,
    #[serde(default, rename = "Author")]
    pub author: Option<String>,
    #[serde(default, rename = "Title")]
    pub title: Option<String>,
    #[serde(default, rename = "Length")]
    pub length: Option<String>,
    #[serde(default, rename = "Date")]
    pub date: Option<String>,
    #[serde(default, rename = "Time")]
    pub time: Option<String>,
    #[serde(default, rename = "Chairs")]
    pub chairs: Option<String>,
}

impl PaperSheetRow {
    /// 行是否具备身份键（无 PID 的行在解析边界被过滤）
    pub fn has_identity(&self) -> bool {
        self.pid.as_deref().map(|p| !p.trim().is_empty()).unwrap_or(false)
            && self
                .session
                .as_deref()
                .map(|s| !s.trim().is_empty())
                .unwrap_or(false)
    }
}

// ==========================================
// KeywordRow - 关键词/语言侧表行
// ==========================================
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordRow {
    #[serde(default, rename = "PID")]
    pub pid: Option<String>,
    #[serde(default, rename = "Keywords")]
    pub keywords: Option<String>, // '|' 分隔
    #[serde(default, rename = "Languages")]
    pub languages: Option<String>, // '|' 分隔
}

// ==========================================
// ExtraEventRow - 杂项活动表行（extras xlsx 第二张表）
// ==========================================
// Excel 行先经 ExcelParser 转为列名→值映射,再映射到本结构
#[derive(Debug, Clone, Default)]
pub struct ExtraEventRow {
    pub event: String,      // 活动显示名
    pub track: String,      // 轨道名（经第一张表映射出类型 token）
    pub session: String,    // 时段显示名（缺省回落到活动名）
    pub date: String,       // YYYY-MM-DD
    pub start_time: String, // HH:MM
    pub end_time: String,   // HH:MM
    pub room: Option<String>,
    pub link: Option<String>,
}

/// '|' 分隔列表列拆分
pub fn split_list_field(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
