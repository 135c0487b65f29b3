// ==========================================
// 零件日库存推演系统 - 配置层
// ==========================================
// 职责: 推演参数与别名归并规则
// 红线: 所有常量可被调用方覆写, 引擎不读环境
// ==========================================

pub mod alias_rules;
pub mod projection;

// 重导出核心类型
pub use alias_rules::{AliasRules, MergeRule, RenameRule};
pub use projection::{
    ProjectionConfig, DEFAULT_EXCLUDED_ORDER_STATUSES, DEFAULT_HORIZON_DAYS,
};
