// ==========================================
// 零件日库存推演系统 - 数据源导入器
// ==========================================
// 职责: 工作簿(三个 sheet) / 单表 CSV → 数据库三张表
// 口径: 整表替换(先清后插, 单事务), 不做增量合并;
//       每次导入登记一条 import_batch 记录
// ==========================================

use crate::domain::FeedKind;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{FieldMapper, OrderRow, ProductRow, ShipmentRow};
use crate::importer::file_parser::{CsvParser, ExcelParser, RawRecord};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

// ==========================================
// ImportSummary - 导入结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub batch_id: String,
    pub source_file: String,
    /// 各数据源实际入库的行数
    pub loaded: Vec<(FeedKind, usize)>,
    /// 主键为空被跳过的行数(全 sheet 合计)
    pub skipped: usize,
}

impl ImportSummary {
    pub fn total_rows(&self) -> usize {
        self.loaded.iter().map(|(_, n)| n).sum()
    }
}

// ==========================================
// FeedImporter - 数据源导入器
// ==========================================
pub struct FeedImporter {
    conn: Arc<Mutex<Connection>>,
    mapper: FieldMapper,
}

impl FeedImporter {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            conn,
            mapper: FieldMapper::new(),
        }
    }

    /// 导入一个包含三个 sheet 的 Excel 工作簿
    pub fn import_workbook(&self, path: &Path) -> ImportResult<ImportSummary> {
        let parser = ExcelParser;
        let shipments = parser.parse_sheet(path, FeedKind::FactoryShipment.sheet_name())?;
        let orders = parser.parse_sheet(path, FeedKind::OrderInfo.sheet_name())?;
        let products = parser.parse_sheet(path, FeedKind::ProductInfo.sheet_name())?;
        self.load_all(path, shipments, orders, products)
    }

    /// 导入单个数据源的 CSV 文件(整表替换该数据源)
    pub fn import_csv(&self, path: &Path, kind: FeedKind) -> ImportResult<ImportSummary> {
        let records = CsvParser.parse(path)?;
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;

        let (count, skipped) = match kind {
            FeedKind::FactoryShipment => {
                let mapped = self.mapper.map_shipments(&records)?;
                (insert_shipments(&tx, &mapped.rows)?, mapped.skipped)
            }
            FeedKind::OrderInfo => {
                let mapped = self.mapper.map_orders(&records)?;
                (insert_orders(&tx, &mapped.rows)?, mapped.skipped)
            }
            FeedKind::ProductInfo => {
                let mapped = self.mapper.map_products(&records)?;
                (insert_products(&tx, &mapped.rows)?, mapped.skipped)
            }
        };

        let summary = ImportSummary {
            batch_id: Uuid::new_v4().to_string(),
            source_file: path.display().to_string(),
            loaded: vec![(kind, count)],
            skipped,
        };
        record_batch(&tx, &summary)?;
        tx.commit()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;

        info!(
            batch_id = %summary.batch_id,
            feed = %kind,
            rows = count,
            skipped,
            "CSV 数据源导入完成"
        );
        Ok(summary)
    }

    fn load_all(
        &self,
        path: &Path,
        shipments: Vec<RawRecord>,
        orders: Vec<RawRecord>,
        products: Vec<RawRecord>,
    ) -> ImportResult<ImportSummary> {
        // 三个 sheet 的映射都成功后才触库, 避免半成品状态
        let shipments = self.mapper.map_shipments(&shipments)?;
        let orders = self.mapper.map_orders(&orders)?;
        let products = self.mapper.map_products(&products)?;

        let mut conn = self
            .conn
            .lock()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;
        let tx = conn
            .transaction()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;

        let shipment_count = insert_shipments(&tx, &shipments.rows)?;
        let order_count = insert_orders(&tx, &orders.rows)?;
        let product_count = insert_products(&tx, &products.rows)?;

        let summary = ImportSummary {
            batch_id: Uuid::new_v4().to_string(),
            source_file: path.display().to_string(),
            loaded: vec![
                (FeedKind::FactoryShipment, shipment_count),
                (FeedKind::OrderInfo, order_count),
                (FeedKind::ProductInfo, product_count),
            ],
            skipped: shipments.skipped + orders.skipped + products.skipped,
        };
        record_batch(&tx, &summary)?;
        tx.commit()
            .map_err(|e| ImportError::DatabaseError(e.to_string()))?;

        info!(
            batch_id = %summary.batch_id,
            shipments = shipment_count,
            orders = order_count,
            products = product_count,
            skipped = summary.skipped,
            "工作簿导入完成"
        );
        Ok(summary)
    }
}

// ==========================================
// 表写入(整表替换)
// ==========================================

fn insert_shipments(tx: &Connection, rows: &[ShipmentRow]) -> ImportResult<usize> {
    tx.execute("DELETE FROM factory_shipment", [])?;
    let mut stmt = tx.prepare(
        "INSERT INTO factory_shipment (part_no, eta_fltc, qty, status) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.part_no,
            row.eta_fltc.map(|d| d.format("%Y-%m-%d").to_string()),
            row.qty,
            row.status,
        ])?;
    }
    Ok(rows.len())
}

fn insert_orders(tx: &Connection, rows: &[OrderRow]) -> ImportResult<usize> {
    tx.execute("DELETE FROM order_info", [])?;
    let mut stmt = tx.prepare(
        r#"INSERT INTO order_info
           (product_name, actual_shipment_date, estimated_shipment_date, quantity, quotation_status)
           VALUES (?1, ?2, ?3, ?4, ?5)"#,
    )?;
    for row in rows {
        stmt.execute(params![
            row.product_name,
            row.actual_shipment_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            row.estimated_shipment_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            row.quantity,
            row.quotation_status,
        ])?;
    }
    Ok(rows.len())
}

fn insert_products(tx: &Connection, rows: &[ProductRow]) -> ImportResult<usize> {
    tx.execute("DELETE FROM product_info", [])?;
    let mut stmt = tx.prepare(
        "INSERT INTO product_info (part_no, month_end_sap_inventory, model) VALUES (?1, ?2, ?3)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.part_no,
            row.month_end_sap_inventory,
            row.model,
        ])?;
    }
    Ok(rows.len())
}

fn record_batch(tx: &Connection, summary: &ImportSummary) -> ImportResult<()> {
    tx.execute(
        "INSERT INTO import_batch (batch_id, source_file, row_count) VALUES (?1, ?2, ?3)",
        params![
            summary.batch_id,
            summary.source_file,
            summary.total_rows() as i64
        ],
    )?;
    Ok(())
}
