//! Summary counts for the overview dashboard, computed from the loaded
//! stores rather than fetched from a separate endpoint, so there is only one
//! source of truth for the numbers.

use serde::Serialize;
use time::Date;

use crate::domain::{MachineStatus, ProjectStatus, SupervisorStatus};
use crate::registry::StoreRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub projects: ProjectCounts,
    pub supervisors: SupervisorCounts,
    pub vendors: VendorCounts,
    pub machinery: MachineryCounts,
    /// Daily reports dated today.
    pub reports_today: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCounts {
    pub total: usize,
    pub ongoing: usize,
    pub hold: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupervisorCounts {
    pub total: usize,
    /// Supervisors with a project association.
    pub assigned: usize,
    pub idle: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorCounts {
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineryCounts {
    pub total: usize,
    pub working: usize,
    pub maintenance: usize,
    pub idle: usize,
}

impl DashboardSummary {
    pub fn from_registry(registry: &StoreRegistry, today: Date) -> Self {
        let projects = registry.projects.items();
        let supervisors = registry.supervisors.items();
        let machinery = registry.machinery.items();
        let reports = registry.daily_reports.items();

        Self {
            projects: ProjectCounts {
                total: projects.len(),
                ongoing: projects
                    .iter()
                    .filter(|p| p.status == ProjectStatus::Active)
                    .count(),
                hold: projects
                    .iter()
                    .filter(|p| p.status == ProjectStatus::OnHold)
                    .count(),
                completed: projects
                    .iter()
                    .filter(|p| p.status == ProjectStatus::Completed)
                    .count(),
            },
            supervisors: SupervisorCounts {
                total: supervisors.len(),
                assigned: supervisors.iter().filter(|s| s.project.is_some()).count(),
                idle: supervisors
                    .iter()
                    .filter(|s| s.status == SupervisorStatus::Idle)
                    .count(),
            },
            vendors: VendorCounts {
                total: registry.vendors.len(),
            },
            machinery: MachineryCounts {
                total: machinery.len(),
                working: machinery
                    .iter()
                    .filter(|m| m.status == MachineStatus::Working)
                    .count(),
                maintenance: machinery
                    .iter()
                    .filter(|m| m.status == MachineStatus::InMaintenance)
                    .count(),
                idle: machinery
                    .iter()
                    .filter(|m| m.status == MachineStatus::Idle)
                    .count(),
            },
            reports_today: reports.iter().filter(|r| r.date == today).count(),
        }
    }
}
