//! Attendance tracking for resources.
//!
//! Attendance is marked either for a single day or for a date range. Each
//! mark overwrites whatever was recorded for the dates it covers.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Attendance status for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// The resource worked.
    Present,
    /// The resource was expected but did not work.
    Absent,
    /// The day does not count (weekend, leave, outside the assignment).
    #[serde(alias = "n/a", alias = "not-applicable")]
    NotApplicable,
}

/// One day of attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The day.
    pub date: NaiveDate,
    /// What happened.
    pub status: AttendanceStatus,
    /// Clock-in time, only kept for present days.
    pub time_in: Option<NaiveTime>,
    /// Clock-out time, only kept for present days.
    pub time_out: Option<NaiveTime>,
    /// Optional free-text comment.
    pub comment: Option<String>,
}

/// The dates an attendance mark applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AttendanceSpan {
    /// One day.
    Single {
        /// The day.
        date: NaiveDate,
    },
    /// An inclusive range. A missing end means a single day.
    Range {
        /// First day.
        from: NaiveDate,
        /// Last day, inclusive.
        to: Option<NaiveDate>,
    },
}

impl AttendanceSpan {
    /// First day covered.
    pub fn first(&self) -> NaiveDate {
        match self {
            AttendanceSpan::Single { date } => *date,
            AttendanceSpan::Range { from, .. } => *from,
        }
    }

    /// Expands the span into its dates.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAttendance` if a range ends before it starts.
    pub fn dates(&self) -> EngineResult<Vec<NaiveDate>> {
        match *self {
            AttendanceSpan::Single { date } => Ok(vec![date]),
            AttendanceSpan::Range { from, to: None } => Ok(vec![from]),
            AttendanceSpan::Range { from, to: Some(to) } => {
                if to < from {
                    return Err(EngineError::InvalidAttendance {
                        date: from,
                        message: format!("range ends on {} before it starts", to),
                    });
                }
                Ok(from.iter_days().take_while(|d| *d <= to).collect())
            }
        }
    }
}

/// Default clock-in time.
pub fn default_time_in() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

/// Default clock-out time.
pub fn default_time_out() -> NaiveTime {
    NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default()
}

/// Returns true for Monday to Friday.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn on_half_hour_grid(time: NaiveTime) -> bool {
    time.second() == 0 && time.nanosecond() == 0 && time.minute() % 30 == 0
}

/// A request to mark attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMark {
    /// Which days.
    pub span: AttendanceSpan,
    /// The status to record.
    pub status: AttendanceStatus,
    /// Clock-in time (30 minute steps).
    #[serde(default = "default_time_in")]
    pub time_in: NaiveTime,
    /// Clock-out time (30 minute steps).
    #[serde(default = "default_time_out")]
    pub time_out: NaiveTime,
    /// Optional comment; blank means none.
    #[serde(default)]
    pub comment: String,
}

impl AttendanceMark {
    /// A mark for one day with default times and no comment.
    pub fn single(date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            span: AttendanceSpan::Single { date },
            status,
            time_in: default_time_in(),
            time_out: default_time_out(),
            comment: String::new(),
        }
    }

    fn validate(&self) -> EngineResult<()> {
        if self.status != AttendanceStatus::Present {
            return Ok(());
        }
        let date = self.span.first();
        if !on_half_hour_grid(self.time_in) || !on_half_hour_grid(self.time_out) {
            return Err(EngineError::InvalidAttendance {
                date,
                message: "times must be on the hour or half hour".to_string(),
            });
        }
        if self.time_out <= self.time_in {
            return Err(EngineError::InvalidAttendance {
                date,
                message: format!(
                    "time out {} must be after time in {}",
                    self.time_out.format("%H:%M"),
                    self.time_in.format("%H:%M")
                ),
            });
        }
        Ok(())
    }

    fn record_for(&self, date: NaiveDate) -> AttendanceRecord {
        let present = self.status == AttendanceStatus::Present;
        let comment = self.comment.trim();
        AttendanceRecord {
            date,
            status: self.status,
            time_in: present.then_some(self.time_in),
            time_out: present.then_some(self.time_out),
            comment: (!comment.is_empty()).then(|| comment.to_string()),
        }
    }
}

/// Counts over a date window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Days marked present.
    pub present: u32,
    /// Days marked absent.
    pub absent: u32,
    /// Days marked not applicable, plus unmarked weekends.
    pub not_applicable: u32,
    /// Working days with no mark.
    pub unmarked: u32,
    /// `present / (present + absent) * 100`, rounded to 2 places.
    pub attendance_rate: Option<Decimal>,
}

/// The attendance history of one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceLog {
    /// The resource this log belongs to.
    pub resource_id: String,
    records: BTreeMap<NaiveDate, AttendanceRecord>,
}

impl AttendanceLog {
    /// Creates an empty log.
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            records: BTreeMap::new(),
        }
    }

    /// Applies a mark and returns the number of days written.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAttendance` if the range is inverted or, for present
    /// days, if the times are off the half-hour grid or out of order. Nothing
    /// is written on error.
    ///
    /// # Example
    ///
    /// ```
    /// use rate_engine::models::{AttendanceLog, AttendanceMark, AttendanceSpan, AttendanceStatus};
    /// use chrono::NaiveDate;
    ///
    /// let mut log = AttendanceLog::new("res_001");
    /// let mut mark = AttendanceMark::single(
    ///     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
    ///     AttendanceStatus::Present,
    /// );
    /// mark.span = AttendanceSpan::Range {
    ///     from: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
    ///     to: NaiveDate::from_ymd_opt(2024, 3, 8),
    /// };
    /// assert_eq!(log.mark(&mark).unwrap(), 5);
    /// ```
    pub fn mark(&mut self, mark: &AttendanceMark) -> EngineResult<usize> {
        mark.validate()?;
        let dates = mark.span.dates()?;
        for date in &dates {
            self.records.insert(*date, mark.record_for(*date));
        }
        Ok(dates.len())
    }

    /// The record for a day, if marked.
    pub fn get(&self, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.records.get(&date)
    }

    /// All records in date order.
    pub fn records(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.records.values()
    }

    /// Summarises the inclusive window `from..=to`.
    pub fn summary(&self, from: NaiveDate, to: NaiveDate) -> AttendanceSummary {
        let mut summary = AttendanceSummary::default();

        for date in from.iter_days().take_while(|d| *d <= to) {
            match self.records.get(&date).map(|r| r.status) {
                Some(AttendanceStatus::Present) => summary.present += 1,
                Some(AttendanceStatus::Absent) => summary.absent += 1,
                Some(AttendanceStatus::NotApplicable) => summary.not_applicable += 1,
                None if is_working_day(date) => summary.unmarked += 1,
                None => summary.not_applicable += 1,
            }
        }

        let counted = summary.present + summary.absent;
        if counted > 0 {
            let rate = Decimal::from(summary.present) * Decimal::ONE_HUNDRED
                / Decimal::from(counted);
            summary.attendance_rate = Some(rate.round_dp(2));
        }

        summary
    }
}
