// ==========================================
// 会议日程图谱构建系统 - 论文领域模型
// ==========================================
// 依据: Schedule_Graph_Spec_v0.2.md - 2.1 Paper
// 依据: Source_Formats_v0.1.md - 论文表格/文集元数据
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Paper - 论文记录
// ==========================================
// 用途: 导入层写入,展示层只读
// 红线: 内容字段先写优先,关系字段(event_ids)做并集合并
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    // ===== 主键 =====
    pub id: String, // 带前缀的投稿号（如 "P123"）

    // ===== 内容字段（首次写入后不再覆盖）=====
    pub title: String,
    pub authors: Vec<String>,          // 有序作者列表
    pub track: String,                 // 主 track
    pub paper_type: String,            // 长短文等（Length 列）
    pub category: String,              // 源表原始分类（如 "Main-Oral"）
    #[serde(rename = "abstract")]
    pub abstract_text: String,         // 摘要（文集缺失时为空串）
    pub tldr: String,                  // 摘要截断生成的短摘要

    // ===== 标签 =====
    pub keywords: Vec<String>,
    pub languages: Vec<String>,

    // ===== 资产链接（缺失时为 None）=====
    pub underline_url: Option<String>,
    pub underline_id: Option<i64>,
    pub poster_pdf: Option<String>,
    pub slides_pdf: Option<String>,
    pub video_url: Option<String>,
    pub paper_pdf: Option<String>,

    // ===== 文集信息 =====
    pub anthology_id: Option<String>, // 文集正式出版号

    // ===== 关系字段（合并时做并集）=====
    pub event_ids: Vec<String>,          // 所属活动 id（workshop 论文除外,非空）
    pub workshop_id: Option<String>,     // workshop 论文改用此关联
    pub similar_paper_ids: Vec<String>,  // 相似论文推荐

    // ===== 计划归属 =====
    pub program: String, // 必须落在 Program 枚举取值内（终检校验）
}

// ==========================================
// AnthologyAuthor - 文集结构化作者
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnthologyAuthor {
    pub first_name: String,
    pub last_name: String,
}

impl AnthologyAuthor {
    /// 拼接显示名
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// ==========================================
// AnthologyEntry - 文集论文条目
// ==========================================
// 来源: 各子 track 的 proceedings YAML
// 键: 文集自身的去前缀投稿号（见 importer::anthology 的 id 换算）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthologyEntry {
    pub id: String, // 文集侧投稿号（纯数字串）
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub anthology_id: Option<String>, // 正式出版号
    #[serde(default)]
    pub file: Option<String>, // PDF 路径
    #[serde(default)]
    pub authors: Vec<AnthologyAuthor>,
}

// ==========================================
// PaperAssets - 外部资产条目
// ==========================================
// 来源: 资产表（underline 导出 xlsx）
// 键: 点分替代 id（如 "main.123"）,与 PID 的换算见 importer::assets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaperAssets {
    pub underline_url: Option<String>,
    pub underline_id: Option<i64>,
    pub poster_pdf: Option<String>,
    pub slides_pdf: Option<String>,
    pub video_url: Option<String>,
    pub paper_pdf: Option<String>,
}

// ==========================================
// KeywordEntry - 关键词/语言侧表条目
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct KeywordEntry {
    pub keywords: Vec<String>,
    pub languages: Vec<String>,
}
