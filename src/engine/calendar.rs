// ==========================================
// 零件日库存推演系统 - 推演日历
// ==========================================
// 职责: 固定前向窗口的日期轴与月末判定
// 红线: 日期轴连续、升序、含两端, 共 horizon_days + 1 天
// ==========================================

use crate::engine::error::{ProjectionError, ProjectionResult};
use chrono::{Datelike, Days, NaiveDate};

// ==========================================
// ProjectionCalendar - 推演日历
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionCalendar {
    start: NaiveDate,
    days: Vec<NaiveDate>,
}

impl ProjectionCalendar {
    /// 构建 [start, start + horizon_days] 的连续日期轴
    pub fn new(start: NaiveDate, horizon_days: i64) -> ProjectionResult<Self> {
        if horizon_days < 0 {
            return Err(ProjectionError::InvalidHorizon(horizon_days));
        }

        let mut days = Vec::with_capacity(horizon_days as usize + 1);
        let mut day = start;
        for _ in 0..=horizon_days {
            days.push(day);
            day = day
                .checked_add_days(Days::new(1))
                .ok_or_else(|| ProjectionError::Computation("日期轴越界".to_string()))?;
        }

        Ok(Self { start, days })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// 窗口末日(含)
    pub fn end(&self) -> NaiveDate {
        *self.days.last().expect("日历至少含起始日")
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// 日期是否落在窗口内(含两端)
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end()
    }
}

/// 判断某日是否为当月最后一天
///
/// 报表写出方据此对月末列做展示层强调; 判定只依赖日期本身。
pub fn is_month_end(day: NaiveDate) -> bool {
    match day.checked_add_days(Days::new(1)) {
        Some(next) => next.month() != day.month(),
        None => true,
    }
}
