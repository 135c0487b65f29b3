// ==========================================
// 零件日库存推演系统 - 报表装配引擎
// ==========================================
// 职责: 结存矩阵转置(零件为行轴) + 机型标签左连接
//       + 月末标记, 产出交付给报表写出方的最终表
// 红线: 机型标签缺失是常态, 不是错误
// ==========================================

use crate::domain::{DayPartGrid, ProjectionRow, ProjectionTable};
use crate::engine::calendar::is_month_end;
use std::collections::HashMap;
use tracing::debug;

// ==========================================
// ProjectionAssembler - 报表装配引擎
// ==========================================
pub struct ProjectionAssembler;

impl ProjectionAssembler {
    pub fn new() -> Self {
        Self
    }

    /// 装配最终报表
    ///
    /// 行序 = 矩阵列序(归并后), 日期轴原样携带。
    pub fn assemble(
        &self,
        grid: &DayPartGrid,
        model_map: &HashMap<String, String>,
    ) -> ProjectionTable {
        let days = grid.days().to_vec();
        let month_end_flags = days.iter().map(|d| is_month_end(*d)).collect();

        let rows = grid
            .parts()
            .iter()
            .map(|part_no| ProjectionRow {
                part_no: part_no.clone(),
                model: model_map.get(part_no).cloned(),
                balances: grid
                    .column(part_no)
                    .expect("列名取自 parts(), 列必然存在")
                    .to_vec(),
            })
            .collect();

        let table = ProjectionTable {
            days,
            rows,
            month_end_flags,
        };
        debug!(
            parts = table.part_count(),
            days = table.day_count(),
            "报表装配完成"
        );
        table
    }
}

impl Default for ProjectionAssembler {
    fn default() -> Self {
        Self::new()
    }
}
