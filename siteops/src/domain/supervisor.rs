use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::Date;

use super::{date_fmt, Entity, EntityId};

/// A site supervisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supervisor {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    pub contact: String,
    pub email: String,
    #[serde(default)]
    pub status: SupervisorStatus,
    /// Project association by display name. The backend never carried a
    /// project id on this record, so lookups against projects are by name.
    #[serde(default)]
    pub project: Option<String>,
    /// Date this supervisor last filed a daily report.
    #[serde(default, with = "date_fmt::option")]
    pub last_report_updated: Option<Date>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SupervisorStatus {
    Working,
    #[default]
    Idle,
}

impl Entity for Supervisor {
    const ENDPOINT: &'static str = "supervisors";

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
