// ==========================================
// 零件日库存推演系统 - 字段映射器
// ==========================================
// 职责: 源表头 → 标准字段映射 + 类型转换
// 口径: 表头存在多套历史命名, 以别名表对齐;
//       必需表头整列缺失 → 类型化错误, 导入失败
// ==========================================

use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRecord;
use chrono::NaiveDate;

// ==========================================
// 表行结构(入库前的标准形)
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentRow {
    pub part_no: String,
    pub eta_fltc: Option<NaiveDate>,
    pub qty: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub product_name: String,
    pub actual_shipment_date: Option<NaiveDate>,
    pub estimated_shipment_date: Option<NaiveDate>,
    pub quantity: Option<f64>,
    pub quotation_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub part_no: String,
    pub month_end_sap_inventory: Option<String>,
    pub model: Option<String>,
}

// ==========================================
// 表头别名表
// ==========================================
fn header_aliases(key: &str) -> &'static [&'static str] {
    match key {
        "Part_No" => &["Part_No", "PartNo", "Part No"],
        "ETA_FLTC" => &["ETA_FLTC", "eta_FLTC", "ETA FLTC"],
        "Qty" => &["Qty", "QTY", "Quantity"],
        "Status" => &["Status", "status"],
        "Product_Name" => &["Product_Name", "ProductName", "Product Name"],
        "Actual_shipment_Date" => &["Actual_shipment_Date", "Actual_Shipment_Date"],
        "Estimated_Shipment_Date" => &["Estimated_Shipment_Date", "Estimated_shipment_Date"],
        "Quotation_status" => &["Quotation_status", "Quotation_Status"],
        "Delta_PartNO" => &["Delta_PartNO", "Delta_PartNo", "Part_No"],
        "Month-End_SAP_Inventory" => &["Month-End_SAP_Inventory", "Month-End SAP Inventory"],
        "Model" => &["Model", "model"],
        _ => &[],
    }
}

// ==========================================
// FieldMapper - 字段映射器
// ==========================================
pub struct FieldMapper {
    cleaner: DataCleaner,
}

/// 单 sheet 的映射产物; skipped = 主键为空被跳过的行数
#[derive(Debug)]
pub struct MappedRows<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    pub fn map_shipments(&self, records: &[RawRecord]) -> ImportResult<MappedRows<ShipmentRow>> {
        require_header(records, "FactoryShipment", "Part_No")?;
        require_header(records, "FactoryShipment", "ETA_FLTC")?;
        require_header(records, "FactoryShipment", "Qty")?;

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for rec in records {
            let Some(part_no) = self.key_field(rec, "Part_No") else {
                skipped += 1;
                continue;
            };
            rows.push(ShipmentRow {
                part_no,
                eta_fltc: self.date_field(rec, "ETA_FLTC"),
                qty: self.f64_field(rec, "Qty"),
                status: self.text_field(rec, "Status"),
            });
        }
        Ok(MappedRows { rows, skipped })
    }

    pub fn map_orders(&self, records: &[RawRecord]) -> ImportResult<MappedRows<OrderRow>> {
        require_header(records, "Orderinfo", "Product_Name")?;
        require_header(records, "Orderinfo", "Qty")?;

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for rec in records {
            let Some(product_name) = self.key_field(rec, "Product_Name") else {
                skipped += 1;
                continue;
            };
            rows.push(OrderRow {
                product_name,
                actual_shipment_date: self.date_field(rec, "Actual_shipment_Date"),
                estimated_shipment_date: self.date_field(rec, "Estimated_Shipment_Date"),
                quantity: self.f64_field(rec, "Qty"),
                quotation_status: self.text_field(rec, "Quotation_status"),
            });
        }
        Ok(MappedRows { rows, skipped })
    }

    pub fn map_products(&self, records: &[RawRecord]) -> ImportResult<MappedRows<ProductRow>> {
        require_header(records, "Productinfo", "Delta_PartNO")?;
        require_header(records, "Productinfo", "Month-End_SAP_Inventory")?;

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for rec in records {
            let Some(part_no) = self.key_field(rec, "Delta_PartNO") else {
                skipped += 1;
                continue;
            };
            rows.push(ProductRow {
                part_no,
                month_end_sap_inventory: self.text_field(rec, "Month-End_SAP_Inventory"),
                model: self.text_field(rec, "Model"),
            });
        }
        Ok(MappedRows { rows, skipped })
    }

    // ==========================================
    // 字段提取辅助
    // ==========================================

    fn raw_field<'a>(&self, rec: &'a RawRecord, key: &str) -> Option<&'a str> {
        header_aliases(key)
            .iter()
            .find_map(|alias| rec.get(*alias))
            .map(|s| s.as_str())
    }

    /// 主键字段: 清洗后为空视为无效行
    fn key_field(&self, rec: &RawRecord, key: &str) -> Option<String> {
        let value = self.cleaner.clean_text(self.raw_field(rec, key)?);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    fn text_field(&self, rec: &RawRecord, key: &str) -> Option<String> {
        self.cleaner
            .normalize_null(self.raw_field(rec, key).map(|s| s.to_string()))
    }

    fn date_field(&self, rec: &RawRecord, key: &str) -> Option<NaiveDate> {
        self.cleaner.parse_date(self.raw_field(rec, key)?)
    }

    fn f64_field(&self, rec: &RawRecord, key: &str) -> Option<f64> {
        self.cleaner.parse_f64(self.raw_field(rec, key)?)
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// 必需表头整列缺失 → MissingHeader(空数据集视为形状合法)
fn require_header(records: &[RawRecord], sheet: &str, key: &str) -> ImportResult<()> {
    if records.is_empty() {
        return Ok(());
    }
    let aliases = header_aliases(key);
    let present = records
        .iter()
        .any(|rec| aliases.iter().any(|alias| rec.contains_key(*alias)));
    if present {
        Ok(())
    } else {
        Err(ImportError::MissingHeader {
            sheet: sheet.to_string(),
            column: key.to_string(),
        })
    }
}
