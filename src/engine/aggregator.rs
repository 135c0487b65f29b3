// ==========================================
// 零件日库存推演系统 - 日流量聚合引擎
// ==========================================
// 职责: 原始进货/订单行 → 按(日期,零件)求和的
//       daily_in / daily_out 网格
// 红线: 订单过滤(状态排除+日期窗口)先于分组;
//       未知零件的事件静默丢弃, 只记 debug 计数
// ==========================================

use crate::config::ProjectionConfig;
use crate::domain::{DayPartGrid, OrderRecord, PartNameIndex, ShipmentRecord};
use crate::engine::calendar::ProjectionCalendar;
use tracing::debug;

// ==========================================
// FlowAggregator - 日流量聚合引擎
// ==========================================
pub struct FlowAggregator;

impl FlowAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 进货行 → daily_in 网格
    ///
    /// 缺失/越界日期与未知零件的行不落网格。
    pub fn aggregate_shipments(
        &self,
        calendar: &ProjectionCalendar,
        universe: &[String],
        shipments: &[ShipmentRecord],
    ) -> DayPartGrid {
        let mut grid = DayPartGrid::zeros(calendar.days().to_vec(), universe.to_vec());
        let mut dropped = 0usize;

        for rec in shipments {
            let Some(eta) = rec.eta_date else {
                dropped += 1;
                continue;
            };
            if !grid.add(eta, rec.part_no.trim(), rec.qty) {
                dropped += 1;
            }
        }

        debug!(
            total = shipments.len(),
            dropped, "进货行聚合完成(丢弃 = 日期缺失/越界 + 零件未知)"
        );
        grid
    }

    /// 订单行 → daily_out 网格
    ///
    /// 过滤顺序: 状态排除 → 日期窗口 → 产品名解析, 之后才分组求和。
    pub fn aggregate_orders(
        &self,
        calendar: &ProjectionCalendar,
        universe: &[String],
        name_index: &PartNameIndex,
        config: &ProjectionConfig,
        orders: &[OrderRecord],
    ) -> DayPartGrid {
        let mut grid = DayPartGrid::zeros(calendar.days().to_vec(), universe.to_vec());
        let mut excluded = 0usize;
        let mut out_of_window = 0usize;
        let mut unknown = 0usize;

        for rec in orders {
            if config.is_excluded_status(rec.status.as_deref()) {
                excluded += 1;
                continue;
            }
            let Some(ship_date) = rec.shipment_date else {
                out_of_window += 1;
                continue;
            };
            if !calendar.contains(ship_date) {
                out_of_window += 1;
                continue;
            }
            let Some(part_no) = name_index.resolve(rec.product_name.trim()) else {
                unknown += 1;
                continue;
            };
            grid.add(ship_date, part_no, rec.quantity);
        }

        debug!(
            total = orders.len(),
            excluded, out_of_window, unknown, "订单行聚合完成"
        );
        grid
    }
}

impl Default for FlowAggregator {
    fn default() -> Self {
        Self::new()
    }
}
