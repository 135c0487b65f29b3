// ==========================================
// 零件日库存推演系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout, 减少并发写入时的偶发 busy 错误
// - 集中三张数据表的建表语句(导入与测试共用)
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout(毫秒)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明:
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化三张数据表(不存在才建; 导入走整表替换, 不做迁移)
///
/// 日期列统一存 ISO 文本(YYYY-MM-DD), 读取侧宽松解析。
pub fn init_feed_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS factory_shipment (
            part_no  TEXT NOT NULL,
            eta_fltc TEXT,
            qty      REAL,
            status   TEXT
        );

        CREATE TABLE IF NOT EXISTS order_info (
            order_no                INTEGER PRIMARY KEY AUTOINCREMENT,
            product_name            TEXT NOT NULL,
            actual_shipment_date    TEXT,
            estimated_shipment_date TEXT,
            quantity                REAL,
            quotation_status        TEXT
        );

        CREATE TABLE IF NOT EXISTS product_info (
            part_no                 TEXT NOT NULL,
            month_end_sap_inventory TEXT,
            model                   TEXT
        );

        CREATE TABLE IF NOT EXISTS import_batch (
            batch_id    TEXT PRIMARY KEY,
            source_file TEXT NOT NULL,
            imported_at TEXT NOT NULL DEFAULT (datetime('now')),
            row_count   INTEGER NOT NULL
        );
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_feed_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_feed_schema(&conn).unwrap();
        init_feed_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN
                 ('factory_shipment','order_info','product_info','import_batch')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 4);
    }
}
