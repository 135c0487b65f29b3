// ==========================================
// 零件日库存推演系统 - 日库存报表写出
// ==========================================
// 职责: 最终推演表 → 带时间戳的 CSV 报表文件
// 口径: 行 = 零件(Part_No + Model), 列 = 日期;
//       月末列表头带 "(月末)" 标记(由核心侧的月末
//       信号驱动, 写出方不自行判定日期)
// ==========================================

use crate::domain::ProjectionTable;
use crate::export::error::{ExportError, ExportResult};
use chrono::Local;
use csv::WriterBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 报表文件名前缀(与既有报表命名一致)
pub const REPORT_FILE_PREFIX: &str = "Daily_Inventory_Simulate";

// ==========================================
// ReportWriter - 报表写出器
// ==========================================
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// 写出报表, 返回完整文件路径
    pub fn write(&self, table: &ProjectionTable) -> ExportResult<PathBuf> {
        let timestamp = Local::now().format("%Y-%m-%d_%H-%M");
        let file_name = format!("{}_{}.csv", REPORT_FILE_PREFIX, timestamp);
        self.write_named(table, &file_name)
    }

    /// 写出到指定文件名(测试与回放场景)
    pub fn write_named(&self, table: &ProjectionTable, file_name: &str) -> ExportResult<PathBuf> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| ExportError::OutputDirError(e.to_string()))?;
        let full_path = self.output_dir.join(file_name);

        let mut writer = WriterBuilder::new().from_path(&full_path)?;

        // 表头: Part_No, Model, 日期...(月末列带标记)
        let mut header = vec!["Part_No".to_string(), "Model".to_string()];
        for (day, is_month_end) in table.days.iter().zip(&table.month_end_flags) {
            let label = if *is_month_end {
                format!("{}(月末)", day.format("%Y-%m-%d"))
            } else {
                day.format("%Y-%m-%d").to_string()
            };
            header.push(label);
        }
        writer.write_record(&header)?;

        for row in &table.rows {
            let mut record = vec![
                row.part_no.clone(),
                row.model.clone().unwrap_or_default(),
            ];
            for balance in &row.balances {
                record.push(format_qty(*balance));
            }
            writer.write_record(&record)?;
        }
        writer.flush()?;

        info!(
            path = %full_path.display(),
            parts = table.part_count(),
            days = table.day_count(),
            "日库存报表写出完成"
        );
        Ok(full_path)
    }
}

/// 整数值不带小数点, 其余保留原始精度
fn format_qty(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectionRow;
    use chrono::NaiveDate;

    fn sample_table() -> ProjectionTable {
        let days = vec![
            NaiveDate::from_ymd_opt(2025, 6, 29).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        ];
        ProjectionTable {
            days,
            rows: vec![ProjectionRow {
                part_no: "X001".to_string(),
                model: None,
                balances: vec![100.0, -2.5],
            }],
            month_end_flags: vec![false, true],
        }
    }

    #[test]
    fn test_write_named_marks_month_end_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = ReportWriter::new(dir.path())
            .write_named(&sample_table(), "report.csv")
            .unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("2025-06-29"));
        assert!(header.contains("2025-06-30(月末)"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("X001,,100,-2.5"));
    }

    #[test]
    fn test_format_qty() {
        assert_eq!(format_qty(120.0), "120");
        assert_eq!(format_qty(-3.0), "-3");
        assert_eq!(format_qty(2.5), "2.5");
    }
}
