// ==========================================
// 零件日库存推演系统 - 导入层
// ==========================================
// 职责: 外部文件(Excel/CSV) → 数据库三张数据表
// 支持: 三 sheet 工作簿整体导入 / 单数据源 CSV 导入
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod feed_importer;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use feed_importer::{FeedImporter, ImportSummary};
pub use field_mapper::{FieldMapper, MappedRows, OrderRow, ProductRow, ShipmentRow};
pub use file_parser::{CsvParser, ExcelParser, RawRecord};
