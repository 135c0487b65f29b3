// ==========================================
// 零件日库存推演系统 - 推演矩阵与结果表
// ==========================================
// 职责: 日期×零件 二维网格(进货/出货/结存共用)
//       与最终交付报表的行结构
// 红线: 列顺序 = 首次插入顺序, 同输入重复运行结果逐位一致
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// DayPartGrid - 日期×零件网格
// ==========================================
/// 日期为行轴、零件为列轴的数值网格
///
/// 三种用途共用同一结构: daily_in / daily_out / 结存矩阵。
/// 内部按列存储(每列一条 Vec<f64>), 便于合并/改名/删除列。
#[derive(Debug, Clone, PartialEq)]
pub struct DayPartGrid {
    days: Vec<NaiveDate>,
    day_index: HashMap<NaiveDate, usize>,
    parts: Vec<String>,
    part_index: HashMap<String, usize>,
    columns: Vec<Vec<f64>>,
}

impl DayPartGrid {
    /// 创建全 0 网格
    pub fn zeros(days: Vec<NaiveDate>, parts: Vec<String>) -> Self {
        let day_index = days.iter().enumerate().map(|(i, d)| (*d, i)).collect();
        let part_index = parts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), i))
            .collect();
        let columns = vec![vec![0.0; days.len()]; parts.len()];
        Self {
            days,
            day_index,
            parts,
            part_index,
            columns,
        }
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn has_part(&self, part_no: &str) -> bool {
        self.part_index.contains_key(part_no)
    }

    /// 两网格是否同形(行轴与列轴完全一致)
    pub fn same_shape(&self, other: &DayPartGrid) -> bool {
        self.days == other.days && self.parts == other.parts
    }

    /// 累加一个事件量; 未知零件或越界日期返回 false(事件被丢弃)
    pub fn add(&mut self, day: NaiveDate, part_no: &str, qty: f64) -> bool {
        let (Some(&d), Some(&p)) = (self.day_index.get(&day), self.part_index.get(part_no))
        else {
            return false;
        };
        self.columns[p][d] += qty;
        true
    }

    pub fn get(&self, day: NaiveDate, part_no: &str) -> Option<f64> {
        let d = *self.day_index.get(&day)?;
        let p = *self.part_index.get(part_no)?;
        Some(self.columns[p][d])
    }

    /// 按序号取值(recurrence 主循环使用)
    pub fn value_at(&self, day_idx: usize, part_idx: usize) -> f64 {
        self.columns[part_idx][day_idx]
    }

    pub fn set_at(&mut self, day_idx: usize, part_idx: usize, value: f64) {
        self.columns[part_idx][day_idx] = value;
    }

    /// 某零件的整列(按日期顺序)
    pub fn column(&self, part_no: &str) -> Option<&[f64]> {
        let p = *self.part_index.get(part_no)?;
        Some(&self.columns[p])
    }

    // ==========================================
    // 列操作(供别名归并使用)
    // ==========================================

    /// 删除一列; 不存在时返回 false
    pub fn drop_part(&mut self, part_no: &str) -> bool {
        let Some(idx) = self.part_index.remove(part_no) else {
            return false;
        };
        self.parts.remove(idx);
        self.columns.remove(idx);
        // 后续列序号整体前移
        for (i, p) in self.parts.iter().enumerate().skip(idx) {
            self.part_index.insert(p.clone(), i);
        }
        true
    }

    /// 改名一列(保留原列位置); 源不存在或目标已存在时返回 false
    pub fn rename_part(&mut self, from: &str, to: &str) -> bool {
        if self.part_index.contains_key(to) {
            return false;
        }
        let Some(idx) = self.part_index.remove(from) else {
            return false;
        };
        self.parts[idx] = to.to_string();
        self.part_index.insert(to.to_string(), idx);
        true
    }

    /// 将 src 列逐日加入 dst 列; 任一不存在时返回 false
    pub fn add_into(&mut self, src: &str, dst: &str) -> bool {
        let (Some(&s), Some(&d)) = (self.part_index.get(src), self.part_index.get(dst)) else {
            return false;
        };
        if s == d {
            return false;
        }
        for day_idx in 0..self.days.len() {
            let v = self.columns[s][day_idx];
            self.columns[d][day_idx] += v;
        }
        true
    }

    /// 在末尾追加一个新列; 列名已存在或长度不符时返回 false
    pub fn append_part(&mut self, part_no: &str, values: Vec<f64>) -> bool {
        if self.part_index.contains_key(part_no) || values.len() != self.days.len() {
            return false;
        }
        self.part_index
            .insert(part_no.to_string(), self.parts.len());
        self.parts.push(part_no.to_string());
        self.columns.push(values);
        true
    }

    /// 取出并删除一列
    pub fn take_column(&mut self, part_no: &str) -> Option<Vec<f64>> {
        let values = self.column(part_no)?.to_vec();
        self.drop_part(part_no);
        Some(values)
    }

    /// 某日全部列的合计(守恒性校验使用)
    pub fn day_total(&self, day: NaiveDate) -> Option<f64> {
        let d = *self.day_index.get(&day)?;
        Some(self.columns.iter().map(|col| col[d]).sum())
    }
}

// ==========================================
// ProjectionRow / ProjectionTable - 交付报表
// ==========================================
/// 报表行: 零件号为主键, 机型标签允许缺失
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub part_no: String,
    pub model: Option<String>,
    /// 按日期顺序的结存(允许为负, 表示缺口)
    pub balances: Vec<f64>,
}

/// 交付给报表写出方的最终结构
///
/// 行 = 零件(归并后的规范零件号), 列 = 日期。
/// month_end_flags 与 days 等长, 标记该日是否为当月最后一天,
/// 由写出方用于展示层强调。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionTable {
    pub days: Vec<NaiveDate>,
    pub rows: Vec<ProjectionRow>,
    pub month_end_flags: Vec<bool>,
}

impl ProjectionTable {
    pub fn part_count(&self) -> usize {
        self.rows.len()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn row(&self, part_no: &str) -> Option<&ProjectionRow> {
        self.rows.iter().find(|r| r.part_no == part_no)
    }
}
