use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::Date;

use super::{date_fmt, Entity, EntityId, Machine, Supervisor};

/// A geotechnical investigation project.
///
/// Supervisors and machinery are embedded as full records rather than id
/// references; that is the shape the backend serves and the seed data uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Server-assigned; defaults to 0 in drafts, replaced on create.
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    pub location: String,
    pub vendor: String,
    #[serde(default)]
    pub supervisors: Vec<Supervisor>,
    #[serde(default)]
    pub machinery: Vec<Machine>,
    pub status: ProjectStatus,
    /// Completion percentage, 0-100.
    pub progress: u8,
    /// Total boreholes planned.
    #[serde(rename = "totalBH")]
    pub total_bh: u32,
    /// Boreholes completed so far.
    #[serde(rename = "completedBH")]
    pub completed_bh: u32,
    /// Date the last daily report touched this project, if any.
    #[serde(default, with = "date_fmt::option")]
    pub report_updated_at: Option<Date>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum ProjectStatus {
    Active,
    #[serde(rename = "On Hold")]
    #[strum(serialize = "On Hold")]
    OnHold,
    Completed,
}

impl Entity for Project {
    const ENDPOINT: &'static str = "projects";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn wire_format_matches_the_backend() {
        let projects = seed::projects();
        let value = serde_json::to_value(&projects[1]).unwrap();

        assert_eq!(value["status"], "On Hold");
        assert_eq!(value["totalBH"], 80);
        assert_eq!(value["completedBH"], 32);
        assert_eq!(value["reportUpdatedAt"], serde_json::Value::Null);
        assert!(seed::projects()[0].report_updated_at.is_some());

        let back: Project = serde_json::from_value(value).unwrap();
        assert_eq!(back, projects[1]);
    }

    #[test]
    fn status_displays_like_the_wire_name() {
        assert_eq!(ProjectStatus::OnHold.to_string(), "On Hold");
        assert_eq!(ProjectStatus::Active.to_string(), "Active");
    }

    #[test]
    fn deserializes_without_embedded_lists() {
        // Some backend variants serve projects without the embedded
        // supervisor/machinery arrays; those default to empty.
        let raw = r#"{
            "id": 7,
            "name": "Test",
            "location": "Sylhet",
            "vendor": "ABC",
            "status": "Completed",
            "progress": 100,
            "totalBH": 10,
            "completedBH": 10
        }"#;
        let project: Project = serde_json::from_str(raw).unwrap();
        assert!(project.supervisors.is_empty());
        assert!(project.machinery.is_empty());
        assert_eq!(project.report_updated_at, None);
    }
}
