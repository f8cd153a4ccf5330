//! Built-in fallback datasets, one per entity.
//!
//! [`EntityStore::load`](crate::store::EntityStore::load) falls back to these
//! when the backend is unreachable or returns an empty collection, so the
//! application stays usable offline.

use time::macros::date;

use crate::domain::{
    DailyReport, Machine, MachineStatus, Project, ProjectStatus, Supervisor, SupervisorStatus,
    Vendor,
};

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Urban Infrastructure Upgrade Phase 2".to_string(),
            location: "Dhaka".to_string(),
            vendor: "GeoSolution Inc.".to_string(),
            supervisors: vec![Supervisor {
                id: 1,
                name: "Ahmed Ali".to_string(),
                contact: "01712345678".to_string(),
                email: "ahmed@example.com".to_string(),
                status: SupervisorStatus::Working,
                project: None,
                last_report_updated: None,
            }],
            machinery: vec![
                Machine {
                    id: 11,
                    name: "Excavator X200".to_string(),
                    kind: "Excavator".to_string(),
                    status: MachineStatus::Working,
                    last_maintenance: None,
                    project: None,
                    location: None,
                    supervisor: None,
                },
                Machine {
                    id: 12,
                    name: "Crane C350".to_string(),
                    kind: "Crane".to_string(),
                    status: MachineStatus::Idle,
                    last_maintenance: None,
                    project: None,
                    location: None,
                    supervisor: None,
                },
            ],
            status: ProjectStatus::Active,
            progress: 75,
            total_bh: 120,
            completed_bh: 90,
            report_updated_at: Some(date!(2025 - 11 - 28)),
        },
        Project {
            id: 2,
            name: "Green Energy Initiative - Wind Farm Site Selection".to_string(),
            location: "Chattogram".to_string(),
            vendor: "EarthMovers Ltd.".to_string(),
            supervisors: vec![Supervisor {
                id: 2,
                name: "Fatima Khan".to_string(),
                contact: "01798765432".to_string(),
                email: "fatima@example.com".to_string(),
                status: SupervisorStatus::Idle,
                project: None,
                last_report_updated: None,
            }],
            machinery: vec![Machine {
                id: 13,
                name: "Bulldozer B150".to_string(),
                kind: "Bulldozer".to_string(),
                status: MachineStatus::InMaintenance,
                last_maintenance: None,
                project: None,
                location: None,
                supervisor: None,
            }],
            status: ProjectStatus::OnHold,
            progress: 40,
            total_bh: 80,
            completed_bh: 32,
            report_updated_at: None,
        },
    ]
}

pub fn supervisors() -> Vec<Supervisor> {
    vec![
        Supervisor {
            id: 1,
            name: "Ahmed Ali".to_string(),
            contact: "01712345678".to_string(),
            email: "ahmed@example.com".to_string(),
            status: SupervisorStatus::Working,
            project: Some("Urban Infrastructure Upgrade Phase 2".to_string()),
            last_report_updated: Some(date!(2025 - 11 - 28)),
        },
        Supervisor {
            id: 2,
            name: "Fatima Khan".to_string(),
            contact: "01798765432".to_string(),
            email: "fatima@example.com".to_string(),
            status: SupervisorStatus::Idle,
            project: Some("Wind Farm Site Selection".to_string()),
            last_report_updated: None,
        },
    ]
}

pub fn vendors() -> Vec<Vendor> {
    vec![
        Vendor {
            id: 1,
            name: "ABC Supplies".to_string(),
            company: "ABC Ltd.".to_string(),
            contact_person: "John Doe".to_string(),
            phone: "9876543210".to_string(),
            email: "abc@example.com".to_string(),
            address: "123 Main St".to_string(),
            depth_hard_rock: 120.0,
            depth_soft_rock: 80.0,
        },
        Vendor {
            id: 2,
            name: "XYZ Materials".to_string(),
            company: "XYZ Pvt. Ltd.".to_string(),
            contact_person: "Jane Smith".to_string(),
            phone: "9876543211".to_string(),
            email: "xyz@example.com".to_string(),
            address: "456 Second St".to_string(),
            depth_hard_rock: 100.0,
            depth_soft_rock: 70.0,
        },
    ]
}

pub fn machinery() -> Vec<Machine> {
    vec![
        Machine {
            id: 1,
            name: "Excavator X200".to_string(),
            kind: "Excavator".to_string(),
            status: MachineStatus::Working,
            last_maintenance: Some(date!(2025 - 11 - 01)),
            project: None,
            location: None,
            supervisor: None,
        },
        Machine {
            id: 2,
            name: "Crane C350".to_string(),
            kind: "Crane".to_string(),
            status: MachineStatus::Idle,
            last_maintenance: Some(date!(2025 - 10 - 15)),
            project: None,
            location: None,
            supervisor: None,
        },
    ]
}

pub fn daily_reports() -> Vec<DailyReport> {
    vec![
        DailyReport {
            id: 1,
            project: "Project Alpha".to_string(),
            site_location: "Site A".to_string(),
            vendor: "ABC Supplies".to_string(),
            boreholes_no: 3,
            rig_no: "Rig-12".to_string(),
            chainage: "C-001".to_string(),
            depth_started: 0.0,
            depth_completed: 30.0,
            depth_in_soil: 10.0,
            depth_in_soft_rock: 10.0,
            depth_in_hard_rock: 10.0,
            total_depth_drilled: 30.0,
            engineer: "John Smith".to_string(),
            client: "XYZ Corp".to_string(),
            client_person_name: "Alice Johnson".to_string(),
            client_person_designation: "Site Manager".to_string(),
            remarks: "Smooth drilling".to_string(),
            date: date!(2025 - 11 - 20),
        },
        DailyReport {
            id: 2,
            project: "Project Beta".to_string(),
            site_location: "Site B".to_string(),
            vendor: "DEF Contractors".to_string(),
            boreholes_no: 2,
            rig_no: "Rig-03".to_string(),
            chainage: "C-002".to_string(),
            depth_started: 0.0,
            depth_completed: 25.0,
            depth_in_soil: 5.0,
            depth_in_soft_rock: 10.0,
            depth_in_hard_rock: 10.0,
            total_depth_drilled: 25.0,
            engineer: "Sarah Lee".to_string(),
            client: "LMN Corp".to_string(),
            client_person_name: "Bob Martin".to_string(),
            client_person_designation: "Project Lead".to_string(),
            remarks: "Soft rock slower than expected".to_string(),
            date: date!(2025 - 11 - 20),
        },
    ]
}
