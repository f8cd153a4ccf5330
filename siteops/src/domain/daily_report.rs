use serde::{Deserialize, Serialize};
use time::Date;

use super::{date_fmt, Entity, EntityId};

/// A daily execution report (DER) filed from a drilling site.
///
/// All depth figures are meters. Project, vendor and client references are
/// display names, matching the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    #[serde(default)]
    pub id: EntityId,
    pub project: String,
    pub site_location: String,
    pub vendor: String,
    // The backend's field name, misspelling included; kept for compatibility.
    #[serde(rename = "bhoreholesNo")]
    pub boreholes_no: u32,
    pub rig_no: String,
    pub chainage: String,
    pub depth_started: f64,
    pub depth_completed: f64,
    pub depth_in_soil: f64,
    pub depth_in_soft_rock: f64,
    pub depth_in_hard_rock: f64,
    pub total_depth_drilled: f64,
    pub engineer: String,
    pub client: String,
    pub client_person_name: String,
    pub client_person_designation: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(with = "date_fmt")]
    pub date: Date,
}

impl Entity for DailyReport {
    const ENDPOINT: &'static str = "daily-reports";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.chainage
    }
}
