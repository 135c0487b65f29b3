// ==========================================
// 推演引擎 集成测试
// ==========================================
// 测试范围:
// 1. 端到端推演场景(平台期结存)
// 2. 别名归并守恒与排除
// 3. 订单状态过滤
// 4. 确定性(重复运行逐位一致)
// ==========================================

use chrono::NaiveDate;
use parts_inventory_sim::config::{AliasRules, MergeRule, ProjectionConfig, RenameRule};
use parts_inventory_sim::domain::{OrderRecord, ProductRecord, ShipmentRecord};
use parts_inventory_sim::ProjectionOrchestrator;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn product(part_no: &str, stock: &str) -> ProductRecord {
    ProductRecord {
        part_no: part_no.to_string(),
        initial_stock_raw: Some(stock.to_string()),
        model: None,
    }
}

fn shipment(part_no: &str, eta: NaiveDate, qty: f64) -> ShipmentRecord {
    ShipmentRecord {
        part_no: part_no.to_string(),
        eta_date: Some(eta),
        qty,
        status: Some("shipped".to_string()),
    }
}

fn order(name: &str, day: NaiveDate, qty: f64, status: &str) -> OrderRecord {
    OrderRecord {
        product_name: name.to_string(),
        shipment_date: Some(day),
        quantity: qty,
        status: Some(status.to_string()),
    }
}

/// 固定起始日 2025-06-01、窗口 180 天的编排器
fn orchestrator(rules: AliasRules) -> ProjectionOrchestrator {
    let config = ProjectionConfig::with_start_date(date(2025, 6, 1));
    ProjectionOrchestrator::new(config, rules)
}

// ==========================================
// 端到端场景
// ==========================================

#[test]
fn test_end_to_end_plateau_scenario() {
    // X001 期初 100; 06-05 进货 50; 06-10 确认订单出货 30
    let orch = orchestrator(AliasRules::none());
    let (table, stats) = orch
        .run_at(
            date(2025, 6, 17),
            &[shipment("X001", date(2025, 6, 5), 50.0)],
            &[order("X001", date(2025, 6, 10), 30.0, "confirmed")],
            &[product("X001", "100")],
        )
        .unwrap();

    // 窗口: 2025-06-01 ..= 2025-11-28, 共 181 天
    assert_eq!(stats.start_date, date(2025, 6, 1));
    assert_eq!(stats.end_date, date(2025, 11, 28));
    assert_eq!(table.day_count(), 181);

    let row = table.row("X001").unwrap();
    let balance_on = |day: NaiveDate| {
        let idx = table.days.iter().position(|d| *d == day).unwrap();
        row.balances[idx]
    };

    // 06-01..06-04 = 100
    for d in 1..=4 {
        assert_eq!(balance_on(date(2025, 6, d)), 100.0);
    }
    // 06-05..06-09 = 150
    for d in 5..=9 {
        assert_eq!(balance_on(date(2025, 6, d)), 150.0);
    }
    // 06-10 起 = 120, 直到窗口末日
    assert_eq!(balance_on(date(2025, 6, 10)), 120.0);
    assert_eq!(balance_on(date(2025, 8, 15)), 120.0);
    assert_eq!(balance_on(date(2025, 11, 28)), 120.0);
}

#[test]
fn test_negative_balance_preserved_as_shortfall() {
    let orch = orchestrator(AliasRules::none());
    let (table, _) = orch
        .run_at(
            date(2025, 6, 17),
            &[],
            &[order("X001", date(2025, 6, 3), 40.0, "confirmed")],
            &[product("X001", "10")],
        )
        .unwrap();

    let row = table.row("X001").unwrap();
    assert_eq!(row.balances[0], 10.0);
    assert_eq!(row.balances[2], -30.0);
    assert_eq!(*row.balances.last().unwrap(), -30.0);
}

#[test]
fn test_determinism_two_runs_identical() {
    let shipments = vec![
        shipment("A", date(2025, 6, 2), 1.5),
        shipment("B", date(2025, 7, 10), 3.0),
    ];
    let orders = vec![order("A", date(2025, 6, 20), 2.0, "confirmed")];
    let products = vec![product("A", "7"), product("B", "0")];

    let orch = orchestrator(AliasRules::standard());
    let first = orch
        .run_at(date(2025, 6, 17), &shipments, &orders, &products)
        .unwrap()
        .0;
    let second = orch
        .run_at(date(2025, 6, 17), &shipments, &orders, &products)
        .unwrap()
        .0;
    assert_eq!(first, second);
}

// ==========================================
// 订单过滤
// ==========================================

#[test]
fn test_cancelled_order_contributes_nothing() {
    // 取消状态订单不产生出货量, 无论日期与数量
    let orch = orchestrator(AliasRules::none());
    let (table, _) = orch
        .run_at(
            date(2025, 6, 17),
            &[],
            &[
                order("X001", date(2025, 6, 10), 999.0, "cancel"),
                order("X001", date(2025, 6, 10), 999.0, "quotation"),
                order("X001", date(2025, 6, 10), 999.0, "confirming"),
                order("X001", date(2025, 6, 10), 999.0, "double cancel"),
            ],
            &[product("X001", "100")],
        )
        .unwrap();

    let row = table.row("X001").unwrap();
    assert!(row.balances.iter().all(|b| *b == 100.0));
}

#[test]
fn test_unknown_product_name_order_dropped() {
    let orch = orchestrator(AliasRules::none());
    let (table, _) = orch
        .run_at(
            date(2025, 6, 17),
            &[],
            &[order("GHOST-PRODUCT", date(2025, 6, 10), 30.0, "confirmed")],
            &[product("X001", "100")],
        )
        .unwrap();

    let row = table.row("X001").unwrap();
    assert!(row.balances.iter().all(|b| *b == 100.0));
    assert!(table.row("GHOST-PRODUCT").is_none());
}

// ==========================================
// 别名归并
// ==========================================

#[test]
fn test_merge_conservation_day_zero() {
    // 规范零件 C 期初 10, 别名 A 期初 5: 归并后 C=15, A 消失
    let rules = AliasRules {
        rename: vec![RenameRule {
            alias: "A".to_string(),
            canonical: "C".to_string(),
        }],
        ..AliasRules::none()
    };
    let orch = orchestrator(rules);
    let (table, stats) = orch
        .run_at(
            date(2025, 6, 17),
            &[],
            &[],
            &[product("C", "10"), product("A", "5")],
        )
        .unwrap();

    assert_eq!(stats.part_count_raw, 2);
    assert_eq!(stats.part_count_resolved, 1);
    assert_eq!(table.row("C").unwrap().balances[0], 15.0);
    assert!(table.row("A").is_none());
}

#[test]
fn test_excluded_part_absent_despite_flows() {
    let rules = AliasRules {
        exclude: vec!["SCRAP".to_string()],
        ..AliasRules::none()
    };
    let orch = orchestrator(rules);
    let (table, _) = orch
        .run_at(
            date(2025, 6, 17),
            &[shipment("SCRAP", date(2025, 6, 5), 500.0)],
            &[order("SCRAP", date(2025, 6, 10), 100.0, "confirmed")],
            &[product("SCRAP", "50"), product("KEEP", "1")],
        )
        .unwrap();

    assert!(table.row("SCRAP").is_none());
    assert!(table.row("KEEP").is_some());
}

#[test]
fn test_many_to_one_merge_sums_flows() {
    let rules = AliasRules {
        merge: vec![MergeRule {
            canonical: "M".to_string(),
            aliases: vec!["M(a)".to_string(), "M(b)".to_string()],
        }],
        ..AliasRules::none()
    };
    let orch = orchestrator(rules);
    let (table, _) = orch
        .run_at(
            date(2025, 6, 17),
            &[shipment("M(a)", date(2025, 6, 5), 10.0)],
            &[],
            &[product("M(a)", "3"), product("M(b)", "4")],
        )
        .unwrap();

    let row = table.row("M").unwrap();
    assert_eq!(row.balances[0], 7.0); // 3 + 4
    let idx_0605 = table
        .days
        .iter()
        .position(|d| *d == date(2025, 6, 5))
        .unwrap();
    assert_eq!(row.balances[idx_0605], 17.0);
}

// ==========================================
// 机型标签
// ==========================================

#[test]
fn test_model_label_join_allows_missing() {
    let orch = orchestrator(AliasRules::none());
    let products = vec![
        ProductRecord {
            part_no: "A".to_string(),
            initial_stock_raw: Some("1".to_string()),
            model: Some("RECT-48V".to_string()),
        },
        ProductRecord {
            part_no: "B".to_string(),
            initial_stock_raw: Some("2".to_string()),
            model: None,
        },
    ];
    let (table, _) = orch.run_at(date(2025, 6, 17), &[], &[], &products).unwrap();

    assert_eq!(table.row("A").unwrap().model.as_deref(), Some("RECT-48V"));
    assert_eq!(table.row("B").unwrap().model, None);
}
