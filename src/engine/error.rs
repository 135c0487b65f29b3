// ==========================================
// 零件日库存推演系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 推演不产出部分结果, 任一错误即整体失败
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum ProjectionError {
    // ===== 输入形状错误 =====
    #[error("零件全集为空: 产品主数据未提供任何零件号")]
    EmptyPartUniverse,

    #[error("推演窗口非法: horizon_days={0}, 要求 >= 0")]
    InvalidHorizon(i64),

    // ===== 计算错误 =====
    #[error("网格形状不一致: {context} (进货 {in_days}天×{in_parts}列, 出货 {out_days}天×{out_parts}列)")]
    GridShapeMismatch {
        context: String,
        in_days: usize,
        in_parts: usize,
        out_days: usize,
        out_parts: usize,
    },

    #[error("推演计算失败: {0}")]
    Computation(String),
}

/// Result 类型别名
pub type ProjectionResult<T> = Result<T, ProjectionError>;
