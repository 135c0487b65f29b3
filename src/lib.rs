// ==========================================
// 零件日库存推演系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统 (报表口径人工最终确认)
// ==========================================
// 主流程: 三路数据源 → 日流量聚合 → 结存递推
//         → 零件别名归并 → 报表装配 → CSV 写出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与矩阵类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 推演核心
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 报表交付
pub mod export;

// 配置层 - 推演参数与归并规则
pub mod config;

// 数据库基础设施(连接初始化/PRAGMA/建表 统一)
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    DayPartGrid, FeedKind, InitialStock, OrderRecord, PartNameIndex, ProductRecord,
    ProjectionRow, ProjectionTable, ShipmentRecord,
};

// 引擎
pub use engine::{
    is_month_end, next_balance, FlowAggregator, PartAliasResolver, ProjectionAssembler,
    ProjectionCalendar, ProjectionError, ProjectionOrchestrator, ProjectionRunStats,
    StockRecurrenceEngine,
};

// 配置
pub use config::{AliasRules, ProjectionConfig};

// 仓储
pub use repository::{
    FactoryShipmentRepository, OrderInfoRepository, ProductInfoRepository, RepositoryError,
};

// 导入/导出
pub use export::ReportWriter;
pub use importer::{FeedImporter, ImportSummary};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "零件日库存推演系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
