// ==========================================
// 会议日程图谱构建系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("TSV 解析失败: {0}")]
    TsvParseError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("Excel 工作表缺失: {file} 中无 {sheet}")]
    MissingSheet { file: String, sheet: String },

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    #[error("YAML 解析失败: {0}")]
    YamlParseError(String),

    // ===== 数据映射错误 =====
    #[error("必填列缺失 ({file}): {column}")]
    MissingColumn { file: String, column: String },

    #[error("必填字段为空 ({context}): {field}")]
    MissingField { context: String, field: String },

    #[error("时间格式错误 ({context}): 期望 HH:MM-HH:MM,实际 {value}")]
    TimeRangeFormat { context: String, value: String },

    #[error("日期时间解析失败 ({context}): {value}")]
    DateTimeFormat { context: String, value: String },

    // ===== 标识与合并错误 =====
    #[error("Category 无法映射到 program (论文 {paper_id}): {category}")]
    UnknownCategory { paper_id: String, category: String },

    #[error("时段 id 重复注册: {session_id}（已有类型 {existing}, 新来类型 {incoming}）")]
    DuplicateSession {
        session_id: String,
        existing: String,
        incoming: String,
    },

    // ===== 终检错误 =====
    #[error("图谱终检失败: {violations} 项违规,首项: {first}")]
    ValidationFailed { violations: usize, first: String },

    // ===== 配置错误 =====
    #[error("配置读取失败: {0}")]
    ConfigReadError(String),

    #[error("配置值非法 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::TsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

// 实现 From<serde_yaml::Error>
impl From<serde_yaml::Error> for ImportError {
    fn from(err: serde_yaml::Error) -> Self {
        ImportError::YamlParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
