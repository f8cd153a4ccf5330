use serde::{Deserialize, Serialize};

use super::{Entity, EntityId};

/// A drilling vendor/contractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    pub company: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Contracted drilling depth in hard rock, meters.
    pub depth_hard_rock: f64,
    /// Contracted drilling depth in soft rock, meters.
    pub depth_soft_rock: f64,
}

impl Entity for Vendor {
    const ENDPOINT: &'static str = "vendors";

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
