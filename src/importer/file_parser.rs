// ==========================================
// 会议日程图谱构建系统 - 文件解析器
// ==========================================
// 依据: Source_Formats_v0.1.md - 0. 物理格式
// 支持: TSV (.tsv/.txt) / Excel (.xlsx)
// ==========================================

use crate::importer::error::ImportError;
use calamine::{open_workbook, Reader, Xlsx};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// TsvParser - 制表符分隔表格解析
// ==========================================
// 直接反序列化到源表行结构,解析边界即完成类型校验
pub struct TsvParser;

impl TsvParser {
    pub fn parse<T, P>(&self, file_path: P) -> Result<Vec<T>, ImportError>
    where
        T: DeserializeOwned,
        P: AsRef<Path>,
    {
        let path = file_path.as_ref();

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let row: T = result?;
            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// ExcelParser - xlsx 工作表解析
// ==========================================
// 输出列名→值映射,供调用方映射到行结构;
// extras 等多工作表文件按表名取数
pub struct ExcelParser;

impl ExcelParser {
    /// 读取指定工作表为行记录
    pub fn parse_sheet<P: AsRef<Path>>(
        &self,
        file_path: P,
        sheet_name: &str,
    ) -> Result<Vec<HashMap<String, String>>, ImportError> {
        let path = file_path.as_ref();

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        if !sheet_names.iter().any(|s| s == sheet_name) {
            return Err(ImportError::MissingSheet {
                file: path.display().to_string(),
                sheet: sheet_name.to_string(),
            });
        }

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 提取表头（第一行）
        let mut rows_iter = range.rows();
        let header_row = rows_iter.next().ok_or_else(|| {
            ImportError::ExcelParseError(format!("工作表 {} 无数据行", sheet_name))
        })?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows_iter {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    let value = cell.to_string().trim().to_string();
                    row_map.insert(header.clone(), value);
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }

    /// 读取第一个工作表（单表文件,如资产表）
    pub fn parse_first_sheet<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<Vec<HashMap<String, String>>, ImportError> {
        let path = file_path.as_ref();

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        let first = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        self.parse_sheet(path, &first)
    }
}
