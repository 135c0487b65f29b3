// ==========================================
// 零件日库存推演系统 - 工厂进货仓储
// ==========================================
// 红线: Repository 不含推演逻辑
// ==========================================

use crate::domain::ShipmentRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::parse_date_lenient;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// ==========================================
// FactoryShipmentRepository - 工厂进货仓储
// ==========================================
pub struct FactoryShipmentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl FactoryShipmentRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取全部进货行
    ///
    /// 数量为 NULL 时按 0 读出; 日期宽松解析, 失败置 None。
    pub fn fetch_all(&self) -> RepositoryResult<Vec<ShipmentRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT part_no, eta_fltc, qty, status
            FROM factory_shipment
            "#,
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(ShipmentRecord {
                    part_no: row.get::<_, String>(0)?,
                    eta_date: parse_date_lenient(
                        "factory_shipment",
                        row.get::<_, Option<String>>(1)?,
                    ),
                    qty: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                    status: row.get::<_, Option<String>>(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}
