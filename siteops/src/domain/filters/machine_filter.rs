use super::{field_matches, name_matches, RecordFilter};
use crate::domain::{Machine, MachineStatus};

/// Filters for the machinery list: name search plus exact type and status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MachineFilter {
    pub name: String,
    pub kind: String,
    pub status: Option<MachineStatus>,
}

impl RecordFilter<Machine> for MachineFilter {
    fn matches(&self, record: &Machine) -> bool {
        name_matches(&self.name, &record.name)
            && field_matches(&self.kind, &record.kind)
            && self.status.map_or(true, |status| record.status == status)
    }

    fn is_active(&self) -> bool {
        !self.name.is_empty() || !self.kind.is_empty() || self.status.is_some()
    }
}
