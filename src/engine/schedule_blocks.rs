// ==========================================
// 会议日程图谱构建系统 - 日程块归并引擎
// ==========================================
// 依据: Schedule_Graph_Spec_v0.2.md - 5. 日程块
// ==========================================
// 算法: 按起点排序后做贪心间隙扫描,
//       起点超过 "当前块终点 + 容差" 即切块
// 说明: 只依赖 (start, end) 对,与标识/合并逻辑无关
// ==========================================

use chrono::{DateTime, Duration, Utc};

// ==========================================
// TimeBounded - 时间界定对象
// ==========================================
pub trait TimeBounded {
    fn span_start(&self) -> DateTime<Utc>;
    fn span_end(&self) -> DateTime<Utc>;
}

impl TimeBounded for (DateTime<Utc>, DateTime<Utc>) {
    fn span_start(&self) -> DateTime<Utc> {
        self.0
    }

    fn span_end(&self) -> DateTime<Utc> {
        self.1
    }
}

/// 近连续子活动归并为日程块
///
/// # 参数
/// - events: 时间界定对象集合（顺序任意）
/// - leeway: 容差（workshop 子场次间的短休息用非零容差吞并）
///
/// # 返回
/// 按时间先后排列的块列表,每块内按起点有序
pub fn compute_schedule_blocks<T: TimeBounded + Clone>(
    events: &[T],
    leeway: Duration,
) -> Vec<Vec<T>> {
    if events.is_empty() {
        return vec![];
    }

    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.span_start());

    // 从首个区间的终点起扫
    let mut now = sorted[0].span_end();
    let mut blocks: Vec<Vec<T>> = Vec::new();
    let mut block: Vec<T> = Vec::new();

    for event in sorted {
        if event.span_start() - (now + leeway) > Duration::zero() {
            // 发现严格间隙,封块另起
            blocks.push(block);
            block = vec![event.clone()];
        } else {
            block.push(event.clone());
        }

        // 终点只进不退（长区间覆盖后续短区间的情形）
        now = now.max(event.span_end());
    }

    if !block.is_empty() {
        blocks.push(block);
    }

    blocks
}

/// 块的覆盖窗口 (min start, max end)
pub fn block_window<T: TimeBounded>(block: &[T]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = block.iter().map(|e| e.span_start()).min()?;
    let end = block.iter().map(|e| e.span_end()).max()?;
    Some((start, end))
}
