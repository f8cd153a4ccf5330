//! Plain-text table rendering for list output.

use siteops::dashboard::DashboardSummary;
use siteops::domain::{DailyReport, Machine, Project, Supervisor, Vendor};

/// Render a width-aligned table; two spaces between columns.
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    out.push_str(&render_row(&header_cells));
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

fn print(headers: &[&str], rows: Vec<Vec<String>>) {
    print!("{}", render(headers, &rows));
}

fn opt_date(date: &Option<time::Date>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn print_projects(projects: &[&Project]) {
    let rows = projects
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.location.clone(),
                p.vendor.clone(),
                p.status.to_string(),
                format!("{}%", p.progress),
                format!("{}/{}", p.completed_bh, p.total_bh),
            ]
        })
        .collect();
    print(
        &["ID", "NAME", "LOCATION", "VENDOR", "STATUS", "PROGRESS", "BH"],
        rows,
    );
}

pub fn print_supervisors(supervisors: &[&Supervisor]) {
    let rows = supervisors
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.name.clone(),
                s.contact.clone(),
                s.email.clone(),
                s.status.to_string(),
                s.project.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print(
        &["ID", "NAME", "CONTACT", "EMAIL", "STATUS", "PROJECT"],
        rows,
    );
}

pub fn print_vendors(vendors: &[&Vendor]) {
    let rows = vendors
        .iter()
        .map(|v| {
            vec![
                v.id.to_string(),
                v.name.clone(),
                v.company.clone(),
                v.contact_person.clone(),
                v.phone.clone(),
                v.depth_hard_rock.to_string(),
                v.depth_soft_rock.to_string(),
            ]
        })
        .collect();
    print(
        &[
            "ID",
            "NAME",
            "COMPANY",
            "CONTACT",
            "PHONE",
            "HARD ROCK",
            "SOFT ROCK",
        ],
        rows,
    );
}

pub fn print_machinery(machinery: &[&Machine]) {
    let rows = machinery
        .iter()
        .map(|m| {
            vec![
                m.id.to_string(),
                m.name.clone(),
                m.kind.clone(),
                m.status.to_string(),
                opt_date(&m.last_maintenance),
            ]
        })
        .collect();
    print(&["ID", "NAME", "TYPE", "STATUS", "LAST MAINTENANCE"], rows);
}

pub fn print_reports(reports: &[&DailyReport]) {
    let rows = reports
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.to_string(),
                r.project.clone(),
                r.site_location.clone(),
                r.vendor.clone(),
                r.rig_no.clone(),
                r.chainage.clone(),
                format!("{}m", r.total_depth_drilled),
            ]
        })
        .collect();
    print(
        &[
            "ID", "DATE", "PROJECT", "SITE", "VENDOR", "RIG", "CHAINAGE", "DRILLED",
        ],
        rows,
    );
}

pub fn print_dashboard(summary: &DashboardSummary) {
    println!(
        "Projects     total {:>3}  ongoing {:>3}  on hold {:>3}  completed {:>3}",
        summary.projects.total,
        summary.projects.ongoing,
        summary.projects.hold,
        summary.projects.completed,
    );
    println!(
        "Supervisors  total {:>3}  assigned {:>2}  idle {:>6}",
        summary.supervisors.total, summary.supervisors.assigned, summary.supervisors.idle,
    );
    println!("Vendors      total {:>3}", summary.vendors.total);
    println!(
        "Machinery    total {:>3}  working {:>3}  maintenance {:>2}  idle {:>3}",
        summary.machinery.total,
        summary.machinery.working,
        summary.machinery.maintenance,
        summary.machinery.idle,
    );
    println!("Reports filed today: {}", summary.reports_today);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_aligns_columns_to_the_widest_cell() {
        let out = render(
            &["ID", "NAME"],
            &[
                vec!["1".to_string(), "Excavator X200".to_string()],
                vec!["12".to_string(), "Crane".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID  NAME");
        assert_eq!(lines[1], "1   Excavator X200");
        assert_eq!(lines[2], "12  Crane");
    }

    #[test]
    fn render_handles_empty_row_set() {
        let out = render(&["ID"], &[]);
        assert_eq!(out, "ID\n");
    }
}
