// ==========================================
// 零件日库存推演系统 - 产品主数据仓储
// ==========================================
// 口径: 期初库存原样读出文本, 宽松解析在领域层完成
//       (兼容历史系统"不可解析按 0"的行为)
// 红线: Repository 不含推演逻辑
// ==========================================

use crate::domain::ProductRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// ==========================================
// ProductInfoRepository - 产品主数据仓储
// ==========================================
pub struct ProductInfoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductInfoRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取全部产品主数据行(行序即零件全集顺序)
    pub fn fetch_all(&self) -> RepositoryResult<Vec<ProductRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT part_no, month_end_sap_inventory, model
            FROM product_info
            ORDER BY rowid
            "#,
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(ProductRecord {
                    part_no: row.get::<_, String>(0)?,
                    initial_stock_raw: row.get::<_, Option<String>>(1)?,
                    model: row.get::<_, Option<String>>(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}
