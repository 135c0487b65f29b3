// ==========================================
// 零件日库存推演系统 - 批处理主入口
// ==========================================
// 用法:
//   parts-inventory-sim                运行推演并写出报表
//   parts-inventory-sim calc           同上
//   parts-inventory-sim import <file>  导入数据工作簿(.xlsx)
// ==========================================

use anyhow::{bail, Context};
use parts_inventory_sim::export::ReportWriter;
use parts_inventory_sim::importer::FeedImporter;
use parts_inventory_sim::repository::{
    self, FactoryShipmentRepository, OrderInfoRepository, ProductInfoRepository,
};
use parts_inventory_sim::{db, logging, ProjectionOrchestrator};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持系统", parts_inventory_sim::APP_NAME);
    tracing::info!("系统版本: {}", parts_inventory_sim::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let conn = db::open_sqlite_connection(&db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path))?;
    db::init_feed_schema(&conn).context("数据表初始化失败")?;
    let conn = Arc::new(Mutex::new(conn));

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(|s| s.as_str()) {
        None | Some("calc") => run_projection(conn),
        Some("import") => {
            let Some(file) = args.get(1) else {
                bail!("用法: parts-inventory-sim import <workbook.xlsx>");
            };
            run_import(conn, Path::new(file))
        }
        Some(other) => {
            bail!("未知命令: {}(支持 calc / import <file>)", other);
        }
    }
}

/// 导入数据工作簿
fn run_import(conn: Arc<Mutex<rusqlite::Connection>>, file: &Path) -> anyhow::Result<()> {
    let importer = FeedImporter::from_connection(conn);
    let summary = importer
        .import_workbook(file)
        .with_context(|| format!("导入失败: {}", file.display()))?;

    tracing::info!(
        batch_id = %summary.batch_id,
        rows = summary.total_rows(),
        skipped = summary.skipped,
        "数据导入完成"
    );
    Ok(())
}

/// 执行推演并写出报表
fn run_projection(conn: Arc<Mutex<rusqlite::Connection>>) -> anyhow::Result<()> {
    // 运行前校验数据源形状(缺表/缺列即失败)
    {
        let guard = conn.lock().expect("连接锁不可恢复");
        repository::verify_feed_schema(&guard).context("数据源校验失败")?;
    }

    let shipments = FactoryShipmentRepository::from_connection(Arc::clone(&conn))
        .fetch_all()
        .context("读取工厂进货失败")?;
    let orders = OrderInfoRepository::from_connection(Arc::clone(&conn))
        .fetch_all()
        .context("读取客户订单失败")?;
    let products = ProductInfoRepository::from_connection(Arc::clone(&conn))
        .fetch_all()
        .context("读取产品主数据失败")?;

    let orchestrator = ProjectionOrchestrator::standard();
    let (table, stats) = orchestrator
        .run(&shipments, &orders, &products)
        .context("库存推演失败")?;

    let report_dir = get_default_report_dir();
    let report_path = ReportWriter::new(&report_dir)
        .write(&table)
        .context("报表写出失败")?;

    tracing::info!(
        report = %report_path.display(),
        parts = stats.part_count_resolved,
        elapsed_ms = stats.elapsed_ms,
        "推演流程全部完成"
    );
    Ok(())
}

/// 解析数据库路径
///
/// 优先级: 环境变量 > 用户数据目录 > 当前目录
fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var("PARTS_INVENTORY_SIM_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./parts_inventory_sim.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("parts-inventory-sim");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("parts_inventory_sim.db");
        }
    }
    path.to_string_lossy().to_string()
}

/// 解析报表输出目录(环境变量优先)
fn get_default_report_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PARTS_INVENTORY_SIM_REPORT_DIR") {
        let trimmed = dir.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("parts-inventory-sim").join("reports"),
        None => PathBuf::from("./reports"),
    }
}
