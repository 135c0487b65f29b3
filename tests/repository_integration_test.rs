// ==========================================
// 仓储层 集成测试
// ==========================================
// 测试范围:
// 1. 三张数据表的读取口径
// 2. 出货日 COALESCE(实际, 预计) 行为
// 3. 宽松日期/数量解析
// 4. 数据源形状校验(缺表/缺列)
// ==========================================


use chrono::NaiveDate;
use parts_inventory_sim::repository::{
    verify_feed_schema, FactoryShipmentRepository, OrderInfoRepository, ProductInfoRepository,
    RepositoryError,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_shipment_round_trip() {
    let (_file, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    test_helpers::insert_shipment(&conn, "X001", Some("2025-06-05"), Some(50.0));
    test_helpers::insert_shipment(&conn, "X002", None, None);

    let records = FactoryShipmentRepository::from_connection(conn)
        .fetch_all()
        .unwrap();
    assert_eq!(records.len(), 2);

    let first = records.iter().find(|r| r.part_no == "X001").unwrap();
    assert_eq!(first.eta_date, Some(date(2025, 6, 5)));
    assert_eq!(first.qty, 50.0);

    // 日期/数量缺失: 日期置 None, 数量按 0 读出
    let second = records.iter().find(|r| r.part_no == "X002").unwrap();
    assert_eq!(second.eta_date, None);
    assert_eq!(second.qty, 0.0);
}

#[test]
fn test_shipment_malformed_date_becomes_none() {
    let (_file, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    test_helpers::insert_shipment(&conn, "X001", Some("not-a-date"), Some(1.0));

    let records = FactoryShipmentRepository::from_connection(conn)
        .fetch_all()
        .unwrap();
    assert_eq!(records[0].eta_date, None);
}

#[test]
fn test_order_coalesce_prefers_actual_date() {
    let (_file, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    test_helpers::insert_order(
        &conn,
        "X001",
        Some("2025-06-10"),
        Some("2025-06-20"),
        Some(30.0),
        "confirmed",
    );
    test_helpers::insert_order(&conn, "X002", None, Some("2025-06-20"), Some(5.0), "confirmed");
    test_helpers::insert_order(&conn, "X003", None, None, Some(5.0), "confirmed");

    let records = OrderInfoRepository::from_connection(conn).fetch_all().unwrap();

    let by_name = |name: &str| records.iter().find(|r| r.product_name == name).unwrap();
    // 实际出货日优先
    assert_eq!(by_name("X001").shipment_date, Some(date(2025, 6, 10)));
    // 实际缺失回退预计
    assert_eq!(by_name("X002").shipment_date, Some(date(2025, 6, 20)));
    // 两者皆缺: None
    assert_eq!(by_name("X003").shipment_date, None);
}

#[test]
fn test_product_rows_in_insert_order() {
    let (_file, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_test_connection(&db_path).unwrap();
    test_helpers::insert_product(&conn, "B", Some("5"), Some("MODEL-B"));
    test_helpers::insert_product(&conn, "A", Some("n/a"), None);

    let records = ProductInfoRepository::from_connection(conn)
        .fetch_all()
        .unwrap();
    // 行序即零件全集顺序
    assert_eq!(records[0].part_no, "B");
    assert_eq!(records[1].part_no, "A");
    // 期初库存原样读出文本, 不在仓储层解析
    assert_eq!(records[1].initial_stock_raw.as_deref(), Some("n/a"));
    assert_eq!(records[0].model.as_deref(), Some("MODEL-B"));
}

#[test]
fn test_verify_feed_schema_detects_missing_table() {
    let temp_file = tempfile::NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();
    let conn = parts_inventory_sim::db::open_sqlite_connection(&db_path).unwrap();

    let err = verify_feed_schema(&conn).unwrap_err();
    assert!(matches!(err, RepositoryError::MissingTable { .. }));
}

#[test]
fn test_verify_feed_schema_passes_after_init() {
    let (_file, db_path) = test_helpers::create_test_db().unwrap();
    let conn = parts_inventory_sim::db::open_sqlite_connection(&db_path).unwrap();
    assert!(verify_feed_schema(&conn).is_ok());
}
