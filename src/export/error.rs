// ==========================================
// 零件日库存推演系统 - 导出模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("输出目录创建失败: {0}")]
    OutputDirError(String),

    #[error("报表写出失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 序列化失败: {0}")]
    Csv(#[from] csv::Error),
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
