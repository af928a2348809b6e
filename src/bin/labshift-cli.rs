#![forbid(unsafe_code)]
use anyhow::{anyhow, bail, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use labshift::{
    detector::{detect_conflicts_at, has_errors, DetectOptions, ScheduleConflict},
    io,
    model::{Catalog, Dataset, EntryId, EntryPatch, ScheduleEntry, StaffId, TimeSlotId},
    storage::{JsonStorage, Storage},
    store::ScheduleStore,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de validation des plannings du laboratoire
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON (personnel, créneaux, plannings)
    #[arg(long, global = true, default_value = "roster.json")]
    data: String,

    #[command(subcommand)]
    cmd: Commands,
}

/// Seuils des règles de temps de travail (minutes)
#[derive(Args, Debug, Clone, Copy)]
struct Thresholds {
    #[arg(long, default_value_t = 480)]
    overtime_minutes: u32,
    #[arg(long, default_value_t = 240)]
    break_after_minutes: u32,
}

impl From<Thresholds> for DetectOptions {
    fn from(t: Thresholds) -> Self {
        DetectOptions {
            overtime_threshold_minutes: t.overtime_minutes,
            break_required_after_minutes: t.break_after_minutes,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Créer le planning d'une date (YYYY-MM-DD)
    CreateSchedule {
        #[arg(long)]
        date: NaiveDate,
    },

    /// Importer des créneaux depuis un CSV `id,start_time,end_time`
    ImportSlots {
        #[arg(long)]
        csv: String,
    },

    /// Ajouter une entrée (les conflits détectés sont affichés)
    AddEntry {
        #[arg(long)]
        date: NaiveDate,
        /// id ou nom du membre du personnel
        #[arg(long)]
        staff: String,
        #[arg(long)]
        slot: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        station: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long = "break")]
        is_break: bool,
        /// Refuse l'ajout en cas de conflit ERROR
        #[arg(long)]
        strict: bool,
        #[command(flatten)]
        thresholds: Thresholds,
    },

    /// Modifier une entrée existante
    UpdateEntry {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        id: String,
        #[arg(long)]
        slot: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        station: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long = "break")]
        is_break: Option<bool>,
    },

    /// Supprimer une entrée
    RemoveEntry {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        id: String,
    },

    /// Publier le planning d'une date
    Publish {
        #[arg(long)]
        date: NaiveDate,
    },

    /// Vérifier les conflits d'un planning
    Check {
        #[arg(long)]
        date: NaiveDate,
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
        #[command(flatten)]
        thresholds: Thresholds,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.data)?;
    let dataset = if storage.exists() {
        storage.load()?
    } else {
        Dataset::default()
    };
    let Dataset { mut catalog, schedules } = dataset;
    let mut store = ScheduleStore::from_schedules(schedules)?;
    let read_only = matches!(cli.cmd, Commands::Check { .. });

    let code = match cli.cmd {
        Commands::CreateSchedule { date } => {
            let id = store.create_schedule(date)?;
            println!("schedule {} created for {}", id, date);
            0
        }
        Commands::ImportSlots { csv } => {
            let slots = io::import_time_slots_csv(csv)?;
            for slot in slots {
                if catalog.find_time_slot(&slot.id).is_some() {
                    bail!("time slot {} already exists", slot.id);
                }
                catalog.time_slots.push(slot);
            }
            0
        }
        Commands::AddEntry {
            date,
            staff,
            slot,
            role,
            id,
            station,
            notes,
            is_break,
            strict,
            thresholds,
        } => {
            store.select_date(date)?;
            let staff_id = resolve_staff(&catalog, &staff);
            let mut entry = ScheduleEntry::new(staff_id, TimeSlotId::new(slot), date, role);
            if let Some(id) = id {
                entry.id = EntryId::new(id);
            }
            entry.station = station;
            entry.notes = notes;
            entry.is_break = is_break;

            let conflicts = store.check_entry(&entry, &catalog, thresholds.into());
            print_conflicts(&conflicts);
            if strict && has_errors(&conflicts) {
                bail!("entry rejected: blocking conflicts");
            }
            let entry_id = entry.id.clone();
            store.add_entry(entry)?;
            println!("entry {} added", entry_id);
            0
        }
        Commands::UpdateEntry {
            date,
            id,
            slot,
            role,
            station,
            notes,
            is_break,
        } => {
            store.select_date(date)?;
            let patch = EntryPatch {
                time_slot_id: slot.map(TimeSlotId::new),
                role,
                station: station.map(Some),
                notes: notes.map(Some),
                is_break,
                ..EntryPatch::default()
            };
            if store.update_entry(&EntryId::new(&id), patch).is_none() {
                eprintln!("entry {} not found (nothing updated)", id);
            }
            0
        }
        Commands::RemoveEntry { date, id } => {
            store.select_date(date)?;
            if store.remove_entry(&EntryId::new(&id)).is_none() {
                eprintln!("entry {} not found (nothing removed)", id);
            }
            0
        }
        Commands::Publish { date } => {
            let schedule_id = store.select_date(date)?.id.clone();
            store.publish_schedule(&schedule_id)?;
            println!("schedule {} published", date);
            0
        }
        Commands::Check {
            date,
            report,
            thresholds,
        } => {
            let schedule = store
                .schedule_for_date(date)
                .cloned()
                .ok_or_else(|| anyhow!("no schedule for {}", date))?;
            let mut conflicts = store.detect_conflicts_for_schedule(&schedule.id)?.to_vec();
            let now = Utc::now();
            for entry in &schedule.entries {
                conflicts.extend(detect_conflicts_at(
                    entry,
                    &schedule.entries,
                    &catalog.staff,
                    &catalog.time_slots,
                    thresholds.into(),
                    now,
                ));
            }
            if let Some(path) = report {
                io::export_conflicts_csv(path, &conflicts)?;
            }
            if conflicts.is_empty() {
                println!("OK: no conflicts");
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                print_conflicts(&conflicts);
            }
            // Code 2 = au moins un conflit ERROR
            if has_errors(&conflicts) {
                2
            } else {
                0
            }
        }
    };

    if !read_only {
        storage.save(&Dataset {
            catalog,
            schedules: store.into_schedules(),
        })?;
    }
    std::process::exit(code);
}

fn resolve_staff(catalog: &Catalog, raw: &str) -> StaffId {
    catalog
        .find_staff_by_name(raw)
        .map(|s| s.id.clone())
        .unwrap_or_else(|| StaffId::new(raw))
}

fn print_conflicts(conflicts: &[ScheduleConflict]) {
    for c in conflicts {
        println!("{c}");
    }
}
