pub mod filters;

mod daily_report;
mod machine;
mod project;
mod supervisor;
mod vendor;

pub use daily_report::DailyReport;
pub use machine::{Machine, MachineStatus};
pub use project::{Project, ProjectStatus};
pub use supervisor::{Supervisor, SupervisorStatus};
pub use vendor::Vendor;

use serde::{de::DeserializeOwned, Serialize};

pub type EntityId = i64;

/// A record type managed by an [`EntityStore`](crate::store::EntityStore).
///
/// Implementors are plain serde records with a numeric identifier. The
/// identifier is server-assigned; freshly created records carry a
/// clock-derived temporary id until the backend confirms them.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Path segment under `/api/` for this entity's collection.
    const ENDPOINT: &'static str;

    fn id(&self) -> EntityId;
    fn set_id(&mut self, id: EntityId);

    /// Human-readable label used in diagnostics and CLI output.
    fn label(&self) -> &str;
}

/// Serde adapter for `YYYY-MM-DD` date fields, matching the wire format the
/// backend and the seed data use.
pub mod date_fmt {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;
    use time::Date;

    const FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = date.format(FORMAT).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&raw)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Date::parse(&raw, FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|raw| Date::parse(&raw, super::FORMAT).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
