// ==========================================
// 零件日库存推演系统 - 推演主流程编排
// ==========================================
// 职责: 原始三路数据 → 聚合 → 递推 → 归并 → 装配
// 红线: 单线程批处理, 不重试, 不产出部分结果;
//       输入在一次运行内视为不可变快照
// ==========================================

use crate::config::{AliasRules, ProjectionConfig};
use crate::domain::{
    model_labels, InitialStock, OrderRecord, PartNameIndex, ProductRecord, ProjectionTable,
    ShipmentRecord,
};
use crate::engine::aggregator::FlowAggregator;
use crate::engine::assembler::ProjectionAssembler;
use crate::engine::calendar::ProjectionCalendar;
use crate::engine::error::{ProjectionError, ProjectionResult};
use crate::engine::recurrence::StockRecurrenceEngine;
use crate::engine::resolver::PartAliasResolver;
use chrono::{Local, NaiveDate};
use std::time::Instant;
use tracing::info;

// ==========================================
// ProjectionRunStats - 运行统计
// ==========================================
#[derive(Debug, Clone)]
pub struct ProjectionRunStats {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub part_count_raw: usize,      // 归并前列数
    pub part_count_resolved: usize, // 归并后列数
    pub shipment_rows: usize,
    pub order_rows: usize,
    pub elapsed_ms: i64,
}

// ==========================================
// ProjectionOrchestrator - 推演编排器
// ==========================================
pub struct ProjectionOrchestrator {
    config: ProjectionConfig,
    aggregator: FlowAggregator,
    recurrence: StockRecurrenceEngine,
    resolver: PartAliasResolver,
    assembler: ProjectionAssembler,
}

impl ProjectionOrchestrator {
    pub fn new(config: ProjectionConfig, alias_rules: AliasRules) -> Self {
        Self {
            config,
            aggregator: FlowAggregator::new(),
            recurrence: StockRecurrenceEngine::new(),
            resolver: PartAliasResolver::new(alias_rules),
            assembler: ProjectionAssembler::new(),
        }
    }

    /// 生产口径: 默认参数 + 现行归并规则表
    pub fn standard() -> Self {
        Self::new(ProjectionConfig::default(), AliasRules::standard())
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// 执行一次完整推演(起始日按当前系统日期解析)
    pub fn run(
        &self,
        shipments: &[ShipmentRecord],
        orders: &[OrderRecord],
        products: &[ProductRecord],
    ) -> ProjectionResult<(ProjectionTable, ProjectionRunStats)> {
        self.run_at(Local::now().date_naive(), shipments, orders, products)
    }

    /// 以指定"今日"执行推演(测试与回放场景)
    pub fn run_at(
        &self,
        today: NaiveDate,
        shipments: &[ShipmentRecord],
        orders: &[OrderRecord],
        products: &[ProductRecord],
    ) -> ProjectionResult<(ProjectionTable, ProjectionRunStats)> {
        let started = Instant::now();

        // 期初库存与零件全集
        let initial = InitialStock::from_products(products);
        if initial.is_empty() {
            return Err(ProjectionError::EmptyPartUniverse);
        }

        // 日期轴
        let start_date = self.config.resolve_start_date(today);
        let calendar = ProjectionCalendar::new(start_date, self.config.horizon_days)?;
        info!(
            start = %calendar.start(),
            end = %calendar.end(),
            parts = initial.len(),
            "推演窗口就绪"
        );

        // 聚合
        let universe = initial.parts().to_vec();
        let name_index = PartNameIndex::from_universe(&universe);
        let daily_in = self
            .aggregator
            .aggregate_shipments(&calendar, &universe, shipments);
        let daily_out = self.aggregator.aggregate_orders(
            &calendar,
            &universe,
            &name_index,
            &self.config,
            orders,
        );

        // 递推
        let balance = self.recurrence.project(&initial, &daily_in, &daily_out)?;
        let part_count_raw = balance.part_count();

        // 归并
        let resolved = self.resolver.resolve(balance);
        let part_count_resolved = resolved.part_count();

        // 装配
        let models = model_labels(products);
        let table = self.assembler.assemble(&resolved, &models);

        let stats = ProjectionRunStats {
            start_date: calendar.start(),
            end_date: calendar.end(),
            part_count_raw,
            part_count_resolved,
            shipment_rows: shipments.len(),
            order_rows: orders.len(),
            elapsed_ms: started.elapsed().as_millis() as i64,
        };
        info!(
            parts_raw = stats.part_count_raw,
            parts_resolved = stats.part_count_resolved,
            elapsed_ms = stats.elapsed_ms,
            "推演完成"
        );

        Ok((table, stats))
    }
}
