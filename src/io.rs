use crate::detector::ScheduleConflict;
use crate::model::{Dataset, TimeSlot};
use anyhow::Context;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Charge un jeu de données JSON (catalogues + plannings).
pub fn load_dataset_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Dataset> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let dataset: Dataset = serde_json::from_slice(&data)
        .with_context(|| format!("parsing dataset {}", path.display()))?;
    validate_time_slots(&dataset.catalog.time_slots)?;
    Ok(dataset)
}

/// Import de créneaux depuis CSV: header `id,start_time,end_time` (`HH:mm`)
pub fn import_time_slots_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<TimeSlot>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let start = rec.get(1).context("missing start_time")?.trim();
        let end = rec.get(2).context("missing end_time")?.trim();
        if id.is_empty() {
            anyhow::bail!("invalid time slot row (empty id)");
        }
        let slot = TimeSlot::new(id, start, end)
            .with_context(|| format!("invalid time slot {id}"))?;
        out.push(slot);
    }
    Ok(out)
}

/// Export CSV des conflits: header `kind,severity,staff_id,time_slot_id,message`
pub fn export_conflicts_csv<P: AsRef<Path>>(
    path: P,
    conflicts: &[ScheduleConflict],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["kind", "severity", "staff_id", "time_slot_id", "message"])?;
    for c in conflicts {
        w.write_record([
            c.kind.as_str(),
            c.severity.as_str(),
            c.staff_id.as_str(),
            c.time_slot_id.as_str(),
            c.message.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

// Le moteur suppose des créneaux bien formés : on les refuse dès le chargement.
fn validate_time_slots(slots: &[TimeSlot]) -> anyhow::Result<()> {
    for slot in slots {
        TimeSlot::new(slot.id.as_str(), &slot.start_time, &slot.end_time)
            .with_context(|| format!("invalid time slot {}", slot.id))?;
    }
    Ok(())
}
