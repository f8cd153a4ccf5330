use super::{field_matches, name_matches, RecordFilter};
use crate::domain::{Project, ProjectStatus};

/// Filters for the project list: name search plus exact location, vendor,
/// supervisor and status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub name: String,
    pub location: String,
    pub vendor: String,
    /// Matches when any supervisor on the project has this exact name.
    pub supervisor: String,
    pub status: Option<ProjectStatus>,
}

impl RecordFilter<Project> for ProjectFilter {
    fn matches(&self, record: &Project) -> bool {
        name_matches(&self.name, &record.name)
            && field_matches(&self.location, &record.location)
            && field_matches(&self.vendor, &record.vendor)
            && (self.supervisor.is_empty()
                || record
                    .supervisors
                    .iter()
                    .any(|s| s.name == self.supervisor))
            && self.status.map_or(true, |status| record.status == status)
    }

    fn is_active(&self) -> bool {
        !self.name.is_empty()
            || !self.location.is_empty()
            || !self.vendor.is_empty()
            || !self.supervisor.is_empty()
            || self.status.is_some()
    }
}
