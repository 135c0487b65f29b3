// ==========================================
// 零件日库存推演系统 - 推演参数配置
// ==========================================
// 职责: 推演窗口、起始日、订单排除状态
// 红线: 参数显式可覆写, 核心代码不埋字面量
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// 默认推演窗口: 起始日起 180 天(含两端共 181 天)
pub const DEFAULT_HORIZON_DAYS: i64 = 180;

/// 默认不参与推演的订单状态
pub const DEFAULT_EXCLUDED_ORDER_STATUSES: [&str; 4] =
    ["quotation", "cancel", "confirming", "double cancel"];

// ==========================================
// ProjectionConfig - 推演参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// 推演窗口天数(起始日之外再向前推演的天数)
    pub horizon_days: i64,
    /// 起始日覆写; None 时取运行当日所在月的 1 号
    pub start_date: Option<NaiveDate>,
    /// 不参与推演的订单状态(精确匹配, 匹配前 trim)
    pub excluded_order_statuses: Vec<String>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            start_date: None,
            excluded_order_statuses: DEFAULT_EXCLUDED_ORDER_STATUSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ProjectionConfig {
    /// 固定起始日的配置(测试与回放场景)
    pub fn with_start_date(start_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            ..Self::default()
        }
    }

    /// 解析实际起始日: 覆写值优先, 否则取 today 所在月的 1 号
    pub fn resolve_start_date(&self, today: NaiveDate) -> NaiveDate {
        self.start_date
            .unwrap_or_else(|| today.with_day(1).expect("每月1号恒存在"))
    }

    /// 判断订单状态是否被排除
    pub fn is_excluded_status(&self, status: Option<&str>) -> bool {
        let Some(status) = status else {
            return false;
        };
        let status = status.trim();
        self.excluded_order_statuses.iter().any(|s| s == status)
    }
}
