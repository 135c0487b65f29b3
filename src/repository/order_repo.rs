// ==========================================
// 零件日库存推演系统 - 客户订单仓储
// ==========================================
// 口径: 出货日 = COALESCE(实际出货日, 预计出货日),
//       在 SQL 边界完成, 引擎只见单一 shipment_date
// 红线: Repository 不含推演逻辑
// ==========================================

use crate::domain::OrderRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::parse_date_lenient;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// ==========================================
// OrderInfoRepository - 客户订单仓储
// ==========================================
pub struct OrderInfoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderInfoRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取全部订单行(状态过滤属于引擎职责, 这里原样读出)
    pub fn fetch_all(&self) -> RepositoryResult<Vec<OrderRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                product_name,
                COALESCE(actual_shipment_date, estimated_shipment_date) AS shipment_date,
                quantity,
                quotation_status
            FROM order_info
            "#,
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(OrderRecord {
                    product_name: row.get::<_, String>(0)?,
                    shipment_date: parse_date_lenient(
                        "order_info",
                        row.get::<_, Option<String>>(1)?,
                    ),
                    quantity: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                    status: row.get::<_, Option<String>>(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}
