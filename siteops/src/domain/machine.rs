use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::Date;

use super::{date_fmt, Entity, EntityId};

/// A piece of site machinery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: MachineStatus,
    #[serde(default, with = "date_fmt::option")]
    pub last_maintenance: Option<Date>,
    /// Deployment associations, by display name where present.
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub supervisor: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum MachineStatus {
    Working,
    Idle,
    #[serde(rename = "In Maintenance")]
    #[strum(serialize = "In Maintenance")]
    InMaintenance,
}

impl Entity for Machine {
    const ENDPOINT: &'static str = "machinery";

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
    use time::macros::date;

    #[test]
    fn wire_format_uses_type_and_spaced_status() {
        let machine = Machine {
            id: 3,
            name: "Bulldozer B150".to_string(),
            kind: "Bulldozer".to_string(),
            status: MachineStatus::InMaintenance,
            last_maintenance: Some(date!(2025 - 09 - 30)),
            project: None,
            location: None,
            supervisor: None,
        };

        let value = serde_json::to_value(&machine).unwrap();
        assert_eq!(value["type"], "Bulldozer");
        assert_eq!(value["status"], "In Maintenance");
        assert_eq!(value["lastMaintenance"], "2025-09-30");

        let back: Machine = serde_json::from_value(value).unwrap();
        assert_eq!(back, machine);
    }
}
