use super::{field_matches, name_matches, RecordFilter};
use crate::domain::Supervisor;

/// Filters for the supervisor list: name search plus exact project name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupervisorFilter {
    pub name: String,
    pub project: String,
}

impl RecordFilter<Supervisor> for SupervisorFilter {
    fn matches(&self, record: &Supervisor) -> bool {
        name_matches(&self.name, &record.name)
            && (self.project.is_empty()
                || record
                    .project
                    .as_deref()
                    .map_or(false, |project| field_matches(&self.project, project)))
    }

    fn is_active(&self) -> bool {
        !self.name.is_empty() || !self.project.is_empty()
    }
}
