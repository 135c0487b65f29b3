// ==========================================
// 零件日库存推演系统 - 领域类型定义
// ==========================================
// 三路数据源: 工厂进货 / 客户订单 / 产品主数据
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 数据源类型 (Feed Kind)
// ==========================================
// 对应数据库三张数据表, 也是导入工作簿的 sheet 名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedKind {
    FactoryShipment, // 工厂进货
    OrderInfo,       // 客户订单
    ProductInfo,     // 产品主数据(期初库存 + 机型)
}

impl FeedKind {
    /// 数据库表名
    pub fn table_name(&self) -> &'static str {
        match self {
            FeedKind::FactoryShipment => "factory_shipment",
            FeedKind::OrderInfo => "order_info",
            FeedKind::ProductInfo => "product_info",
        }
    }

    /// 导入工作簿中的 sheet 名
    pub fn sheet_name(&self) -> &'static str {
        match self {
            FeedKind::FactoryShipment => "FactoryShipment",
            FeedKind::OrderInfo => "Orderinfo",
            FeedKind::ProductInfo => "Productinfo",
        }
    }

    /// 全部数据源(导入顺序固定)
    pub fn all() -> [FeedKind; 3] {
        [
            FeedKind::FactoryShipment,
            FeedKind::OrderInfo,
            FeedKind::ProductInfo,
        ]
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_kind_table_names() {
        assert_eq!(FeedKind::FactoryShipment.table_name(), "factory_shipment");
        assert_eq!(FeedKind::OrderInfo.table_name(), "order_info");
        assert_eq!(FeedKind::ProductInfo.table_name(), "product_info");
    }

    #[test]
    fn test_feed_kind_all_order() {
        let all = FeedKind::all();
        assert_eq!(all[0], FeedKind::FactoryShipment);
        assert_eq!(all[2], FeedKind::ProductInfo);
    }
}
