// ==========================================
// 零件日库存推演系统 - 数据源记录
// ==========================================
// 职责: 定义三路数据源的行级记录与期初库存快照
// 红线: 不含数据访问逻辑, 不含引擎逻辑
// ==========================================
// 已知的历史口径: 进货/库存按 part_no 键入,
// 订单按 product_name 键入。两个标识空间的对齐
// 由 PartNameIndex 显式完成, 不依赖字符串巧合。
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ==========================================
// ShipmentRecord - 工厂进货记录
// ==========================================
/// 工厂进货行: 某零件在 eta_date 到库 qty 件
/// 同一 (part_no, eta_date) 的多行数量可累加
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub part_no: String,
    /// 到库日; 源数据可能缺失或无法解析, 此时该行不参与推演
    pub eta_date: Option<NaiveDate>,
    pub qty: f64,
    pub status: Option<String>,
}

// ==========================================
// OrderRecord - 客户订单记录
// ==========================================
/// 客户订单行: 出货日取 实际出货日 COALESCE 预计出货日
/// 报价/取消类状态不参与推演(状态集合见配置层)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// 订单侧使用产品名标识, 与零件号是两个标识空间
    pub product_name: String,
    pub shipment_date: Option<NaiveDate>,
    pub quantity: f64,
    pub status: Option<String>,
}

// ==========================================
// ProductRecord - 产品主数据记录
// ==========================================
/// 产品主数据行: 零件号 + 月末SAP库存(期初) + 机型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub part_no: String,
    /// 期初库存原始值; 允许缺失/不可解析, 解析规则见 InitialStock
    pub initial_stock_raw: Option<String>,
    pub model: Option<String>,
}

// ==========================================
// InitialStock - 期初库存快照
// ==========================================
/// 期初库存快照(推演起始日前一日的口径)
///
/// 构建规则:
/// - 零件全集 = 产品主数据中 part_no 的首次出现顺序去重
/// - 同一零件多行时取第一条可解析数量的行
/// - 数量缺失/不可解析按 0 处理(兼容历史行为, 记 warn)
#[derive(Debug, Clone)]
pub struct InitialStock {
    parts: Vec<String>,
    qty: HashMap<String, f64>,
}

impl InitialStock {
    pub fn from_products(records: &[ProductRecord]) -> Self {
        let mut parts: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut qty: HashMap<String, f64> = HashMap::new();

        for rec in records {
            let part_no = rec.part_no.trim();
            if part_no.is_empty() {
                continue;
            }

            if seen.insert(part_no.to_string()) {
                parts.push(part_no.to_string());
            }

            // 已有可解析数量的零件不再被后续行覆盖
            if qty.contains_key(part_no) {
                continue;
            }
            match parse_quantity(rec.initial_stock_raw.as_deref()) {
                Some(v) => {
                    qty.insert(part_no.to_string(), v);
                }
                None => {
                    if let Some(raw) = rec.initial_stock_raw.as_deref() {
                        tracing::warn!(
                            part_no = %part_no,
                            raw = %raw,
                            "期初库存不可解析, 按 0 处理"
                        );
                    }
                }
            }
        }

        Self { parts, qty }
    }

    /// 零件全集(首次出现顺序)
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// 某零件的期初数量, 未知/缺失为 0
    pub fn qty(&self, part_no: &str) -> f64 {
        self.qty.get(part_no).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }
}

/// 宽松数量解析: 去除千分位逗号与空白后按 f64 解析
fn parse_quantity(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.replace(',', "").parse::<f64>().ok()
}

// ==========================================
// PartNameIndex - 产品名 → 零件号索引
// ==========================================
/// 订单侧产品名到零件号的显式映射
///
/// 默认口径与历史系统一致: 产品名与零件号同名即对齐,
/// 不在零件全集中的名字视为未知并被丢弃。
#[derive(Debug, Clone)]
pub struct PartNameIndex {
    known: HashSet<String>,
}

impl PartNameIndex {
    pub fn from_universe(parts: &[String]) -> Self {
        Self {
            known: parts.iter().cloned().collect(),
        }
    }

    /// 解析产品名; 未知产品名返回 None(调用方丢弃该事件)
    pub fn resolve(&self, product_name: &str) -> Option<&str> {
        self.known.get(product_name).map(|s| s.as_str())
    }

    pub fn contains(&self, part_no: &str) -> bool {
        self.known.contains(part_no)
    }
}

// ==========================================
// 机型标签映射
// ==========================================
/// 从产品主数据提取 part_no → Model 标签(首条非空者优先)
pub fn model_labels(records: &[ProductRecord]) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    for rec in records {
        let part_no = rec.part_no.trim();
        if part_no.is_empty() {
            continue;
        }
        if let Some(model) = rec.model.as_deref() {
            let model = model.trim();
            if !model.is_empty() {
                labels
                    .entry(part_no.to_string())
                    .or_insert_with(|| model.to_string());
            }
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(part_no: &str, stock: Option<&str>, model: Option<&str>) -> ProductRecord {
        ProductRecord {
            part_no: part_no.to_string(),
            initial_stock_raw: stock.map(|s| s.to_string()),
            model: model.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_initial_stock_keeps_first_parseable() {
        let stock = InitialStock::from_products(&[
            product("A", None, None),
            product("A", Some("80"), None),
            product("A", Some("999"), None),
        ]);
        assert_eq!(stock.parts(), &["A".to_string()]);
        assert_eq!(stock.qty("A"), 80.0);
    }

    #[test]
    fn test_initial_stock_unparseable_defaults_to_zero() {
        let stock = InitialStock::from_products(&[product("B", Some("n/a"), None)]);
        assert_eq!(stock.qty("B"), 0.0);
    }

    #[test]
    fn test_initial_stock_universe_order() {
        let stock = InitialStock::from_products(&[
            product("X", Some("1"), None),
            product("Y", Some("2"), None),
            product("X", Some("3"), None),
            product("Z", None, None),
        ]);
        assert_eq!(
            stock.parts(),
            &["X".to_string(), "Y".to_string(), "Z".to_string()]
        );
        assert_eq!(stock.qty("Z"), 0.0);
    }

    #[test]
    fn test_parse_quantity_with_thousand_separator() {
        assert_eq!(parse_quantity(Some("1,280")), Some(1280.0));
        assert_eq!(parse_quantity(Some(" 42.5 ")), Some(42.5));
        assert_eq!(parse_quantity(Some("")), None);
        assert_eq!(parse_quantity(None), None);
    }

    #[test]
    fn test_part_name_index_identity_mapping() {
        let index = PartNameIndex::from_universe(&["X001".to_string()]);
        assert_eq!(index.resolve("X001"), Some("X001"));
        assert_eq!(index.resolve("UNKNOWN"), None);
    }

    #[test]
    fn test_model_labels_first_non_empty_wins() {
        let labels = model_labels(&[
            product("A", None, Some("")),
            product("A", None, Some("MODEL-1")),
            product("A", None, Some("MODEL-2")),
        ]);
        assert_eq!(labels.get("A").map(|s| s.as_str()), Some("MODEL-1"));
    }
}
