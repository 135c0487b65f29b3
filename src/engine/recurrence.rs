// ==========================================
// 零件日库存推演系统 - 结存递推引擎
// ==========================================
// 职责: 以期初库存为种子, 沿日期轴逐日递推结存
// 红线: 递推是纯函数, 同输入必得逐位一致的结果;
//       负结存合法(表示缺口), 不得截断为 0;
//       每日一步、严格递增、不跳日、无中间产物
// ==========================================

use crate::domain::{DayPartGrid, InitialStock};
use crate::engine::error::{ProjectionError, ProjectionResult};
use tracing::debug;

/// 单步递推: 当日结存 = 前日结存 + 当日进货 - 当日出货
///
/// 第 0 日以期初库存为"前日结存"。
#[inline]
pub fn next_balance(prev: f64, daily_in: f64, daily_out: f64) -> f64 {
    prev + daily_in - daily_out
}

// ==========================================
// StockRecurrenceEngine - 结存递推引擎
// ==========================================
pub struct StockRecurrenceEngine;

impl StockRecurrenceEngine {
    pub fn new() -> Self {
        Self
    }

    /// 产出结存矩阵(与输入网格同形)
    ///
    /// daily_in / daily_out 形状不一致视为计算错误, 整体失败。
    pub fn project(
        &self,
        initial: &InitialStock,
        daily_in: &DayPartGrid,
        daily_out: &DayPartGrid,
    ) -> ProjectionResult<DayPartGrid> {
        if !daily_in.same_shape(daily_out) {
            return Err(ProjectionError::GridShapeMismatch {
                context: "daily_in 与 daily_out".to_string(),
                in_days: daily_in.day_count(),
                in_parts: daily_in.part_count(),
                out_days: daily_out.day_count(),
                out_parts: daily_out.part_count(),
            });
        }

        let mut balance =
            DayPartGrid::zeros(daily_in.days().to_vec(), daily_in.parts().to_vec());

        for (part_idx, part_no) in daily_in.parts().iter().enumerate() {
            let mut prev = initial.qty(part_no);
            for day_idx in 0..daily_in.day_count() {
                let today = next_balance(
                    prev,
                    daily_in.value_at(day_idx, part_idx),
                    daily_out.value_at(day_idx, part_idx),
                );
                balance.set_at(day_idx, part_idx, today);
                prev = today;
            }
        }

        debug!(
            days = balance.day_count(),
            parts = balance.part_count(),
            "结存递推完成"
        );
        Ok(balance)
    }
}

impl Default for StockRecurrenceEngine {
    fn default() -> Self {
        Self::new()
    }
}
