// ==========================================
// 零件日库存推演系统 - 数据仓储层
// ==========================================
// 职责: 三路数据源的只读访问, 屏蔽数据库细节
// 红线: Repository 不含推演逻辑; 所有查询参数化
// ==========================================

pub mod error;
pub mod order_repo;
pub mod product_repo;
pub mod shipment_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use order_repo::OrderInfoRepository;
pub use product_repo::ProductInfoRepository;
pub use shipment_repo::FactoryShipmentRepository;

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::warn;

/// 各数据表的必需列(缺任一列即整体失败)
const REQUIRED_COLUMNS: [(&str, &[&str]); 3] = [
    ("factory_shipment", &["part_no", "eta_fltc", "qty"]),
    (
        "order_info",
        &[
            "product_name",
            "actual_shipment_date",
            "estimated_shipment_date",
            "quantity",
            "quotation_status",
        ],
    ),
    (
        "product_info",
        &["part_no", "month_end_sap_inventory", "model"],
    ),
];

/// 运行前校验三张数据表的形状
///
/// 表或必需列缺失 → 带上下文的类型化错误, 推演不启动。
pub fn verify_feed_schema(conn: &Connection) -> RepositoryResult<()> {
    for (table, columns) in REQUIRED_COLUMNS {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
        let existing: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<_, _>>()?;

        if existing.is_empty() {
            return Err(RepositoryError::MissingTable {
                table: table.to_string(),
            });
        }
        for column in columns {
            if !existing.iter().any(|c| c == column) {
                return Err(RepositoryError::MissingColumn {
                    table: table.to_string(),
                    column: column.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// 宽松日期解析: ISO 日期优先, 兼容带时间后缀与斜杠格式
///
/// 解析失败返回 None(该行不参与推演), 记 warn。
pub(crate) fn parse_date_lenient(table: &str, raw: Option<String>) -> Option<NaiveDate> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // 形如 "2025-06-05 00:00:00" 的取日期部分
    let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);
    let parsed = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y/%m/%d"))
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y%m%d"));

    match parsed {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(table = %table, raw = %trimmed, "日期不可解析, 该行不参与推演");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_feed_schema};

    #[test]
    fn test_verify_feed_schema_passes_on_initialized_db() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_feed_schema(&conn).unwrap();
        assert!(verify_feed_schema(&conn).is_ok());
    }

    #[test]
    fn test_verify_feed_schema_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        let err = verify_feed_schema(&conn).unwrap_err();
        assert!(matches!(err, RepositoryError::MissingTable { .. }));
    }

    #[test]
    fn test_verify_feed_schema_missing_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE factory_shipment (part_no TEXT, qty REAL);
            CREATE TABLE order_info (product_name TEXT, actual_shipment_date TEXT,
                estimated_shipment_date TEXT, quantity REAL, quotation_status TEXT);
            CREATE TABLE product_info (part_no TEXT, month_end_sap_inventory TEXT, model TEXT);
            "#,
        )
        .unwrap();
        let err = verify_feed_schema(&conn).unwrap_err();
        match err {
            RepositoryError::MissingColumn { table, column } => {
                assert_eq!(table, "factory_shipment");
                assert_eq!(column, "eta_fltc");
            }
            other => panic!("意外错误: {other:?}"),
        }
    }

    #[test]
    fn test_parse_date_lenient_formats() {
        let parse = |s: &str| parse_date_lenient("t", Some(s.to_string()));
        let expected = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        assert_eq!(parse("2025-06-05"), Some(expected));
        assert_eq!(parse("2025-06-05 00:00:00"), Some(expected));
        assert_eq!(parse("2025/06/05"), Some(expected));
        assert_eq!(parse("20250605"), Some(expected));
        assert_eq!(parse("not-a-date"), None);
        assert_eq!(parse("  "), None);
        assert_eq!(parse_date_lenient("t", None), None);
    }
}
