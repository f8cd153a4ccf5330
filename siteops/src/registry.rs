use std::sync::Arc;

use crate::client::ApiClient;
use crate::domain::{DailyReport, Entity, Machine, Project, Supervisor, Vendor};
use crate::endpoint::RestEndpoint;
use crate::seed;
use crate::store::{EntityStore, LoadSource};

/// All five entity stores, wired once at application start over a single
/// [`ApiClient`]. Pure composition; no cross-store coordination lives here.
pub struct StoreRegistry {
    pub projects: EntityStore<Project>,
    pub supervisors: EntityStore<Supervisor>,
    pub vendors: EntityStore<Vendor>,
    pub machinery: EntityStore<Machine>,
    pub daily_reports: EntityStore<DailyReport>,
}

impl StoreRegistry {
    pub fn new(client: ApiClient) -> Self {
        Self {
            projects: EntityStore::new(rest(&client, Project::ENDPOINT), seed::projects()),
            supervisors: EntityStore::new(rest(&client, Supervisor::ENDPOINT), seed::supervisors()),
            vendors: EntityStore::new(rest(&client, Vendor::ENDPOINT), seed::vendors()),
            machinery: EntityStore::new(rest(&client, Machine::ENDPOINT), seed::machinery()),
            daily_reports: EntityStore::new(
                rest(&client, DailyReport::ENDPOINT),
                seed::daily_reports(),
            ),
        }
    }

    /// Load every store concurrently and report where each one got its data.
    pub async fn load_all(&self) -> LoadReport {
        let (projects, supervisors, vendors, machinery, daily_reports) = tokio::join!(
            self.projects.load(),
            self.supervisors.load(),
            self.vendors.load(),
            self.machinery.load(),
            self.daily_reports.load(),
        );

        LoadReport {
            projects,
            supervisors,
            vendors,
            machinery,
            daily_reports,
        }
    }
}

/// Per-store outcome of [`StoreRegistry::load_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub projects: LoadSource,
    pub supervisors: LoadSource,
    pub vendors: LoadSource,
    pub machinery: LoadSource,
    pub daily_reports: LoadSource,
}

impl LoadReport {
    /// True when any store fell back to its seed dataset.
    pub fn any_seeded(&self) -> bool {
        [
            &self.projects,
            &self.supervisors,
            &self.vendors,
            &self.machinery,
            &self.daily_reports,
        ]
        .iter()
        .any(|source| matches!(source, LoadSource::Seed { .. }))
    }
}

fn rest(client: &ApiClient, entity_path: &str) -> Arc<RestEndpoint> {
    Arc::new(RestEndpoint::new(client.clone(), entity_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_all_seeds_every_store_when_backend_is_down() {
        // Nothing listens on this port; every load settles on its seed.
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let registry = StoreRegistry::new(client);

        let report = registry.load_all().await;

        assert!(report.any_seeded());
        assert!(matches!(report.projects, LoadSource::Seed { reason: Some(_) }));
        assert_eq!(registry.projects.len(), 2);
        assert_eq!(registry.supervisors.len(), 2);
        assert_eq!(registry.vendors.len(), 2);
        assert_eq!(registry.machinery.len(), 2);
        assert_eq!(registry.daily_reports.len(), 2);
        assert!(!registry.projects.is_loading());
    }
}
