use crate::calendar::DateRange;
use crate::model::{Assignment, NewStaff};
use crate::roster::RosterStore;
use crate::schedule::ScheduleStore;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Import du personnel depuis CSV : header `name[,department]`
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<NewStaff>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid staff row {}: empty name", line + 2);
        }
        let mut staff = NewStaff::new(name);
        if let Some(dept) = rec.get(1).map(str::trim).filter(|d| !d.is_empty()) {
            staff = staff.with_department(dept);
        }
        out.push(staff);
    }
    Ok(out)
}

/// Export CSV d'une période : header `date,staff_id,name,shift`
pub fn export_assignments_csv<P: AsRef<Path>>(
    path: P,
    roster: &RosterStore,
    schedule: &ScheduleStore,
    range: &DateRange,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "staff_id", "name", "shift"])?;
    for a in schedule.in_range(range) {
        let name = roster.get(&a.staff_id).map(|s| s.name.as_str()).unwrap_or("");
        let date = a.date.to_string();
        w.write_record([date.as_str(), a.staff_id.as_str(), name, a.shift.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct Snapshot<'a> {
    staff: &'a RosterStore,
    assignments: Vec<Assignment>,
}

/// Export JSON complet (personnel + affectations), jolie mise en forme.
pub fn export_snapshot_json<P: AsRef<Path>>(
    path: P,
    roster: &RosterStore,
    schedule: &ScheduleStore,
) -> anyhow::Result<()> {
    let mut assignments: Vec<Assignment> = schedule.iter().collect();
    assignments.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.staff_id.cmp(&b.staff_id)));
    let s = serde_json::to_string_pretty(&Snapshot {
        staff: roster,
        assignments,
    })?;
    fs::write(path, s)?;
    Ok(())
}
