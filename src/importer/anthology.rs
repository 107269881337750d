// ==========================================
// 会议日程图谱构建系统 - 文集元数据加载
// ==========================================
// 依据: Source_Formats_v0.1.md - 4. proceedings YAML
// ==========================================
// 职责: 加载各子 track 的文集 YAML,建立投稿号 → 条目索引
// 口径: 表格 PID 带字母前缀("P123"),文集侧为纯数字串;
//       查询前经 strip_pid_prefix 换算
// ==========================================

use crate::domain::paper::AnthologyEntry;
use crate::importer::error::ImportError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// PID → 文集投稿号换算（去掉字母前缀）
///
/// 例: "P123" → "123", "D45" → "45"
pub fn strip_pid_prefix(pid: &str) -> String {
    pid.trim()
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .to_string()
}

/// 加载文集目录下的全部 YAML 文件
///
/// # 返回
/// 投稿号（纯数字串）→ 条目。同号重复时先载入者优先并告警。
///
/// # 容错
/// 个别文件的 YAML 不合规时尝试逐行修复 title/abstract 的裸冒号
/// 后重解析;仍失败才报错
pub fn load_anthology_dir<P: AsRef<Path>>(
    dir: P,
) -> Result<HashMap<String, AnthologyEntry>, ImportError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Err(ImportError::FileNotFound(dir.display().to_string()));
    }

    let mut index: HashMap<String, AnthologyEntry> = HashMap::new();
    let mut file_paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e == "yaml" || e == "yml")
                .unwrap_or(false)
        })
        .collect();
    file_paths.sort(); // 载入顺序确定,保证"先载入优先"可复现

    for path in file_paths {
        let entries = load_anthology_file(&path)?;
        debug!(file = %path.display(), entries = entries.len(), "文集文件已载入");
        for entry in entries {
            let key = strip_pid_prefix(&entry.id);
            if index.contains_key(&key) {
                warn!(
                    paper_id = %entry.id,
                    file = %path.display(),
                    "文集投稿号重复,保留先载入条目"
                );
                continue;
            }
            index.insert(key, entry);
        }
    }

    Ok(index)
}

/// 加载单个文集 YAML 文件
pub fn load_anthology_file(path: &Path) -> Result<Vec<AnthologyEntry>, ImportError> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Vec<AnthologyEntry>>(&content) {
        Ok(entries) => Ok(entries),
        Err(first_err) => {
            // 部分主办方导出的 YAML 中 title/abstract 含未加引号的冒号,
            // 逐行加引号(abstract 置空)后重试
            let fixed = fix_unquoted_lines(&content);
            match serde_yaml::from_str::<Vec<AnthologyEntry>>(&fixed) {
                Ok(entries) => {
                    warn!(file = %path.display(), "文集 YAML 不合规,已按修复行重解析");
                    Ok(entries)
                }
                Err(_) => Err(ImportError::YamlParseError(format!(
                    "{}: {}",
                    path.display(),
                    first_err
                ))),
            }
        }
    }
}

/// 逐行修复: title 加引号,abstract 整体置空
fn fix_unquoted_lines(content: &str) -> String {
    let mut lines = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];
        if let Some(rest) = trimmed.strip_prefix("title: ") {
            let quoted = rest.replace('"', "\\\"");
            lines.push(format!("{}title: \"{}\"", indent, quoted));
        } else if trimmed.starts_with("abstract: ") {
            lines.push(format!("{}abstract: \"\"", indent));
        } else {
            lines.push(line.to_string());
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_strip_pid_prefix() {
        assert_eq!(strip_pid_prefix("P123"), "123");
        assert_eq!(strip_pid_prefix("D45"), "45");
        assert_eq!(strip_pid_prefix("123"), "123");
    }

    #[test]
    fn test_load_anthology_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.yaml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "- id: '123'").unwrap();
        writeln!(f, "  abstract: 'An abstract'").unwrap();
        writeln!(f, "  anthology_id: '2023.conf-long.1'").unwrap();
        writeln!(f, "  authors:").unwrap();
        writeln!(f, "    - first_name: Alice").unwrap();
        writeln!(f, "      last_name: Zhang").unwrap();

        let entries = load_anthology_file(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "123");
        assert_eq!(entries[0].authors[0].full_name(), "Alice Zhang");
    }

    #[test]
    fn test_load_anthology_fixes_unquoted_colon() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "- id: '9'").unwrap();
        // 裸冒号让首次解析失败
        writeln!(f, "  title: Parsing: why it breaks").unwrap();
        writeln!(f, "  abstract: also: broken").unwrap();

        let entries = load_anthology_file(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].abstract_text.as_deref(), Some(""));
    }

    #[test]
    fn test_load_anthology_dir_first_wins() {
        let dir = tempfile::tempdir().unwrap();
        for (name, abs) in [("a.yaml", "first"), ("b.yaml", "second")] {
            let mut f = std::fs::File::create(dir.path().join(name)).unwrap();
            writeln!(f, "- id: '7'").unwrap();
            writeln!(f, "  abstract: '{}'", abs).unwrap();
        }
        let index = load_anthology_dir(dir.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index["7"].abstract_text.as_deref(), Some("first"));
    }
}
