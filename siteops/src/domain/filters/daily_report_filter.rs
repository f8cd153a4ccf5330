use time::Date;

use super::{field_matches, RecordFilter};
use crate::domain::DailyReport;

/// Filters for the daily report list: exact date, project, site location and
/// vendor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyReportFilter {
    pub date: Option<Date>,
    pub project: String,
    pub location: String,
    pub vendor: String,
}

impl RecordFilter<DailyReport> for DailyReportFilter {
    fn matches(&self, record: &DailyReport) -> bool {
        self.date.map_or(true, |date| record.date == date)
            && field_matches(&self.project, &record.project)
            && field_matches(&self.location, &record.site_location)
            && field_matches(&self.vendor, &record.vendor)
    }

    fn is_active(&self) -> bool {
        self.date.is_some()
            || !self.project.is_empty()
            || !self.location.is_empty()
            || !self.vendor.is_empty()
    }
}
