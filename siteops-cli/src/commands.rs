use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use siteops::dashboard::DashboardSummary;
use siteops::domain::filters::{
    self, DailyReportFilter, MachineFilter, ProjectFilter, SupervisorFilter, VendorFilter,
};
use siteops::domain::{Entity, EntityId};
use siteops::store::{EntityStore, Patch};
use siteops::StoreRegistry;

use crate::output;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Args)]
pub struct AddArgs {
    /// Draft record as a JSON object (no id)
    #[arg(long)]
    pub data: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub id: EntityId,
    /// Fields to merge over the record, as a JSON object
    #[arg(long)]
    pub data: String,
}

#[derive(Args)]
pub struct RmArgs {
    pub id: EntityId,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List projects, optionally filtered
    List(ProjectListArgs),
    /// Create a project from a JSON draft
    Add(AddArgs),
    /// Merge JSON fields over a project
    Update(UpdateArgs),
    /// Delete a project
    Rm(RmArgs),
}

#[derive(Args)]
pub struct ProjectListArgs {
    /// Substring match on the project name
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value = "")]
    vendor: String,
    /// Exact supervisor name on the project
    #[arg(long, default_value = "")]
    supervisor: String,
    /// Exact status: Active, "On Hold" or Completed
    #[arg(long)]
    status: Option<String>,
}

#[derive(Subcommand)]
pub enum SupervisorAction {
    /// List supervisors, optionally filtered
    List(SupervisorListArgs),
    /// Create a supervisor from a JSON draft
    Add(AddArgs),
    /// Merge JSON fields over a supervisor
    Update(UpdateArgs),
    /// Delete a supervisor
    Rm(RmArgs),
}

#[derive(Args)]
pub struct SupervisorListArgs {
    /// Substring match on the supervisor name
    #[arg(long, default_value = "")]
    name: String,
    /// Exact project name
    #[arg(long, default_value = "")]
    project: String,
}

#[derive(Subcommand)]
pub enum VendorAction {
    /// List vendors, optionally filtered
    List(VendorListArgs),
    /// Create a vendor from a JSON draft
    Add(AddArgs),
    /// Merge JSON fields over a vendor
    Update(UpdateArgs),
    /// Delete a vendor
    Rm(RmArgs),
}

#[derive(Args)]
pub struct VendorListArgs {
    /// Substring match on the vendor name
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    company: String,
}

#[derive(Subcommand)]
pub enum MachineAction {
    /// List machinery, optionally filtered
    List(MachineListArgs),
    /// Register a machine from a JSON draft
    Add(AddArgs),
    /// Merge JSON fields over a machine
    Update(UpdateArgs),
    /// Delete a machine
    Rm(RmArgs),
}

#[derive(Args)]
pub struct MachineListArgs {
    /// Substring match on the machine name
    #[arg(long, default_value = "")]
    name: String,
    /// Exact machine type, e.g. Excavator
    #[arg(long = "type", default_value = "")]
    kind: String,
    /// Exact status: Working, Idle or "In Maintenance"
    #[arg(long)]
    status: Option<String>,
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// List daily execution reports, optionally filtered
    List(ReportListArgs),
    /// File a report from a JSON draft
    Add(AddArgs),
    /// Merge JSON fields over a report
    Update(UpdateArgs),
    /// Delete a report
    Rm(RmArgs),
}

#[derive(Args)]
pub struct ReportListArgs {
    /// Exact date, YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "")]
    project: String,
    /// Exact site location
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long, default_value = "")]
    vendor: String,
}

pub async fn run_projects(
    registry: &StoreRegistry,
    action: ProjectAction,
    json_out: bool,
) -> Result<()> {
    let store = &registry.projects;
    store.load().await;

    match action {
        ProjectAction::List(args) => {
            let filter = ProjectFilter {
                name: args.name,
                location: args.location,
                vendor: args.vendor,
                supervisor: args.supervisor,
                status: parse_status(args.status.as_deref(), "project status")?,
            };
            let items = store.items();
            let rows = filters::apply(&items, &filter);
            if json_out {
                print_json(&rows)?;
            } else {
                output::print_projects(&rows);
            }
            Ok(())
        }
        ProjectAction::Add(args) => add_record(store, &args.data, json_out, "project").await,
        ProjectAction::Update(args) => {
            update_record(store, args.id, &args.data, json_out, "project").await
        }
        ProjectAction::Rm(args) => rm_record(store, args.id, "project").await,
    }
}

pub async fn run_supervisors(
    registry: &StoreRegistry,
    action: SupervisorAction,
    json_out: bool,
) -> Result<()> {
    let store = &registry.supervisors;
    store.load().await;

    match action {
        SupervisorAction::List(args) => {
            let filter = SupervisorFilter {
                name: args.name,
                project: args.project,
            };
            let items = store.items();
            let rows = filters::apply(&items, &filter);
            if json_out {
                print_json(&rows)?;
            } else {
                output::print_supervisors(&rows);
            }
            Ok(())
        }
        SupervisorAction::Add(args) => add_record(store, &args.data, json_out, "supervisor").await,
        SupervisorAction::Update(args) => {
            update_record(store, args.id, &args.data, json_out, "supervisor").await
        }
        SupervisorAction::Rm(args) => rm_record(store, args.id, "supervisor").await,
    }
}

pub async fn run_vendors(
    registry: &StoreRegistry,
    action: VendorAction,
    json_out: bool,
) -> Result<()> {
    let store = &registry.vendors;
    store.load().await;

    match action {
        VendorAction::List(args) => {
            let filter = VendorFilter {
                name: args.name,
                company: args.company,
            };
            let items = store.items();
            let rows = filters::apply(&items, &filter);
            if json_out {
                print_json(&rows)?;
            } else {
                output::print_vendors(&rows);
            }
            Ok(())
        }
        VendorAction::Add(args) => add_record(store, &args.data, json_out, "vendor").await,
        VendorAction::Update(args) => {
            update_record(store, args.id, &args.data, json_out, "vendor").await
        }
        VendorAction::Rm(args) => rm_record(store, args.id, "vendor").await,
    }
}

pub async fn run_machinery(
    registry: &StoreRegistry,
    action: MachineAction,
    json_out: bool,
) -> Result<()> {
    let store = &registry.machinery;
    store.load().await;

    match action {
        MachineAction::List(args) => {
            let filter = MachineFilter {
                name: args.name,
                kind: args.kind,
                status: parse_status(args.status.as_deref(), "machine status")?,
            };
            let items = store.items();
            let rows = filters::apply(&items, &filter);
            if json_out {
                print_json(&rows)?;
            } else {
                output::print_machinery(&rows);
            }
            Ok(())
        }
        MachineAction::Add(args) => add_record(store, &args.data, json_out, "machine").await,
        MachineAction::Update(args) => {
            update_record(store, args.id, &args.data, json_out, "machine").await
        }
        MachineAction::Rm(args) => rm_record(store, args.id, "machine").await,
    }
}

pub async fn run_reports(
    registry: &StoreRegistry,
    action: ReportAction,
    json_out: bool,
) -> Result<()> {
    let store = &registry.daily_reports;
    store.load().await;

    match action {
        ReportAction::List(args) => {
            let filter = DailyReportFilter {
                date: parse_date(args.date.as_deref())?,
                project: args.project,
                location: args.location,
                vendor: args.vendor,
            };
            let items = store.items();
            let rows = filters::apply(&items, &filter);
            if json_out {
                print_json(&rows)?;
            } else {
                output::print_reports(&rows);
            }
            Ok(())
        }
        ReportAction::Add(args) => add_record(store, &args.data, json_out, "report").await,
        ReportAction::Update(args) => {
            update_record(store, args.id, &args.data, json_out, "report").await
        }
        ReportAction::Rm(args) => rm_record(store, args.id, "report").await,
    }
}

pub async fn run_dashboard(registry: &StoreRegistry, json_out: bool) -> Result<()> {
    let report = registry.load_all().await;
    if report.any_seeded() {
        tracing::warn!("one or more stores fell back to seed data; counts may be offline values");
    }

    let today = time::OffsetDateTime::now_utc().date();
    let summary = DashboardSummary::from_registry(registry, today);
    if json_out {
        print_json(&summary)?;
    } else {
        output::print_dashboard(&summary);
    }
    Ok(())
}

async fn add_record<T: Entity>(
    store: &EntityStore<T>,
    raw: &str,
    json_out: bool,
    noun: &str,
) -> Result<()> {
    let draft: T = serde_json::from_str(raw).with_context(|| format!("invalid {noun} draft"))?;
    let saved = store
        .create(draft)
        .await
        .with_context(|| format!("{noun} was not persisted (kept locally for this run only)"))?;

    if json_out {
        print_json(&saved)?;
    } else {
        println!("created {} #{} ({})", noun, saved.id(), saved.label());
    }
    Ok(())
}

async fn update_record<T: Entity>(
    store: &EntityStore<T>,
    id: EntityId,
    raw: &str,
    json_out: bool,
    noun: &str,
) -> Result<()> {
    let patch: Patch = serde_json::from_str(raw).context("patch must be a JSON object")?;
    let merged = store
        .update(id, patch)
        .await
        .with_context(|| format!("failed to update {noun} #{id}"))?;

    if json_out {
        print_json(&merged)?;
    } else {
        println!("updated {} #{} ({})", noun, id, merged.label());
    }
    Ok(())
}

async fn rm_record<T: Entity>(store: &EntityStore<T>, id: EntityId, noun: &str) -> Result<()> {
    store
        .remove(id)
        .await
        .with_context(|| format!("failed to delete {noun} #{id}"))?;
    println!("deleted {noun} #{id}");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_status<S>(raw: Option<&str>, what: &str) -> Result<Option<S>>
where
    S: std::str::FromStr,
    S::Err: std::fmt::Display,
{
    raw.map(|raw| {
        raw.parse::<S>()
            .map_err(|e| anyhow!("invalid {what} `{raw}`: {e}"))
    })
    .transpose()
}

fn parse_date(raw: Option<&str>) -> Result<Option<Date>> {
    raw.map(|raw| {
        Date::parse(raw, DATE_FORMAT).with_context(|| format!("invalid date `{raw}`"))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteops::domain::{MachineStatus, ProjectStatus};
    use time::macros::date;

    #[test]
    fn parses_spaced_status_names() {
        let status: Option<ProjectStatus> = parse_status(Some("On Hold"), "project status").unwrap();
        assert_eq!(status, Some(ProjectStatus::OnHold));
        let status: Option<MachineStatus> =
            parse_status(Some("In Maintenance"), "machine status").unwrap();
        assert_eq!(status, Some(MachineStatus::InMaintenance));
    }

    #[test]
    fn rejects_unknown_status() {
        let result: Result<Option<ProjectStatus>> = parse_status(Some("Paused"), "project status");
        assert!(result.is_err());
    }

    #[test]
    fn parses_dates_and_rejects_garbage() {
        assert_eq!(
            parse_date(Some("2025-11-20")).unwrap(),
            Some(date!(2025 - 11 - 20))
        );
        assert_eq!(parse_date(None).unwrap(), None);
        assert!(parse_date(Some("yesterday")).is_err());
    }
}
