// ==========================================
// 零件日库存推演系统 - 数据清洗器
// ==========================================
// 职责: TRIM / NULL 标准化 / 全角→半角 / 宽松类型解析
// 业务背景: 源 Excel 由人工维护, 零件号常混入全角
// 破折号与全角空格, 不统一会导致同一零件裂成两列
// ==========================================

use chrono::NaiveDate;

pub struct DataCleaner;

impl DataCleaner {
    pub fn clean_text(&self, value: &str) -> String {
        self.normalize_halfwidth(value.trim())
    }

    /// 空白串归一为 None
    pub fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(self.normalize_halfwidth(trimmed))
            }
        })
    }

    /// 全角字符转半角
    ///
    /// 覆盖: 全角 ASCII 区(U+FF01..=U+FF5E)、全角空格(U+3000)、
    /// 连字符变体(U+2010)。
    pub fn normalize_halfwidth(&self, value: &str) -> String {
        value
            .chars()
            .map(|c| match c {
                '\u{FF01}'..='\u{FF5E}' => {
                    char::from_u32(c as u32 - 0xFF01 + 0x21).unwrap_or(c)
                }
                '\u{3000}' => ' ',
                '\u{2010}' => '-',
                _ => c,
            })
            .collect()
    }

    /// 宽松日期解析; 失败返回 None(该格按空值入库)
    pub fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y/%m/%d"))
            .or_else(|_| NaiveDate::parse_from_str(date_part, "%Y%m%d"))
            .ok()
    }

    /// 宽松数值解析; 去千分位逗号, 失败返回 None
    pub fn parse_f64(&self, value: &str) -> Option<f64> {
        let trimmed = self.normalize_halfwidth(value.trim());
        if trimmed.is_empty() {
            return None;
        }
        trimmed.replace(',', "").parse::<f64>().ok()
    }
}
