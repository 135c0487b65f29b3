// ==========================================
// 零件日库存推演系统 - 领域模型层
// ==========================================
// 职责: 定义数据源记录、推演矩阵、结果表
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================

pub mod feed;
pub mod projection;
pub mod types;

// 重导出核心类型
pub use feed::{
    model_labels, InitialStock, OrderRecord, PartNameIndex, ProductRecord, ShipmentRecord,
};
pub use projection::{DayPartGrid, ProjectionRow, ProjectionTable};
pub use types::FeedKind;
