#![forbid(unsafe_code)]
use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use gardes::{
    io,
    model::{NewStaff, ShiftType, StaffId},
    storage::{self, DirBlobStore, PersistListener},
    AssignOptions, DateRange, Planning,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planning des gardes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Répertoire des fichiers staff.json / assignments.json
    #[arg(long, global = true, default_value = ".")]
    data_dir: String,

    #[command(subcommand)]
    cmd: Commands,
}

/// Période ciblée : un mois (`YYYY-MM`) ou la semaine contenant une date.
#[derive(Args, Debug)]
struct PeriodArgs {
    #[arg(long, conflicts_with = "week")]
    month: Option<String>,
    /// Date quelconque de la semaine (dimanche → samedi)
    #[arg(long)]
    week: Option<String>,
}

impl PeriodArgs {
    fn range(&self) -> Result<DateRange> {
        match (&self.month, &self.week) {
            (Some(month), _) => {
                let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
                    .with_context(|| format!("invalid month (expected YYYY-MM): {month}"))?;
                Ok(DateRange::month(first))
            }
            (None, Some(week)) => Ok(DateRange::week(parse_date(week)?)),
            (None, None) => Ok(DateRange::month(Utc::now().date_naive())),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter une personne
    AddStaff {
        #[arg(long)]
        name: String,
        #[arg(long)]
        department: Option<String>,
    },

    /// Retirer une personne (et toutes ses gardes)
    RemoveStaff {
        /// id ou nom
        #[arg(long)]
        staff: String,
    },

    /// Importer du personnel depuis un CSV (`name,department`)
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Lister le personnel
    Staff,

    /// Poser une garde sur une case
    Set {
        #[arg(long)]
        staff: String,
        #[arg(long)]
        date: String,
        /// day | night
        #[arg(long)]
        shift: String,
    },

    /// Libérer une case
    Clear {
        #[arg(long)]
        staff: String,
        #[arg(long)]
        date: String,
    },

    /// Basculer une case (re-sélectionner la même garde la libère)
    Toggle {
        #[arg(long)]
        staff: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        shift: String,
    },

    /// Générer aléatoirement les gardes d'une période (remplace la période)
    Generate {
        #[command(flatten)]
        period: PeriodArgs,
        /// Graine pour un résultat reproductible
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 0.4)]
        night_probability: f64,
        #[arg(long, default_value_t = 1)]
        min_rest_days: u32,
    },

    /// Afficher la grille d'une période
    Show {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Compteurs jour/nuit par personne
    Stats {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Exporter une période (CSV) et/ou l'ensemble (JSON)
    Export {
        #[command(flatten)]
        period: PeriodArgs,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
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

    let store = DirBlobStore::open(&cli.data_dir)?;
    let mut planning = storage::load_planning(&store)?;
    planning.subscribe(PersistListener::new(store));

    let code = match cli.cmd {
        Commands::AddStaff { name, department } => {
            let mut attrs = NewStaff::new(name);
            if let Some(dept) = department {
                attrs = attrs.with_department(dept);
            }
            let staff = planning.add_staff(attrs)?;
            println!("{}", staff.id);
            0
        }
        Commands::RemoveStaff { staff } => {
            let id = resolve_staff(&planning, &staff)?;
            planning.remove_staff(&id)?;
            0
        }
        Commands::ImportStaff { csv } => {
            let people = io::import_staff_csv(csv)?;
            let count = people.len();
            for attrs in people {
                planning.add_staff(attrs)?;
            }
            println!("imported {count} staff");
            0
        }
        Commands::Staff => {
            for s in planning.roster() {
                println!(
                    "{} | {} | {}",
                    s.id,
                    s.name,
                    s.department.as_deref().unwrap_or("-")
                );
            }
            0
        }
        Commands::Set { staff, date, shift } => {
            let id = resolve_staff(&planning, &staff)?;
            planning.upsert(&id, parse_date(&date)?, parse_shift(&shift)?)?;
            0
        }
        Commands::Clear { staff, date } => {
            let id = resolve_staff(&planning, &staff)?;
            planning.clear(&id, parse_date(&date)?)?;
            0
        }
        Commands::Toggle { staff, date, shift } => {
            let id = resolve_staff(&planning, &staff)?;
            let now = planning.toggle(&id, parse_date(&date)?, parse_shift(&shift)?)?;
            println!("{}", now.map(ShiftType::as_str).unwrap_or("off"));
            0
        }
        Commands::Generate {
            period,
            seed,
            night_probability,
            min_rest_days,
        } => {
            if !(0.0..=1.0).contains(&night_probability) {
                bail!("night probability must be within [0, 1]");
            }
            let range = period.range()?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let opts = AssignOptions {
                night_probability,
                min_rest_days,
            };
            let outcome = planning.regenerate(range, &mut rng, opts)?;
            println!("{}: {} shift(s) assigned", range.label(), outcome.assigned);
            if planning.roster().is_empty() {
                eprintln!("no staff: nothing generated");
                0
            } else if outcome.unassigned.is_empty() {
                0
            } else {
                let dates: Vec<String> = outcome.unassigned.iter().map(|d| d.to_string()).collect();
                eprintln!("unassigned: {}", dates.join(", "));
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Show { period } => {
            let range = period.range()?;
            let days = range.days();
            println!("{}", range.label());
            let header: Vec<String> = days.iter().map(|d| d.format("%d").to_string()).collect();
            println!("{:<20} {}", "", header.join(" "));
            for s in planning.roster() {
                let cells: Vec<&str> = days
                    .iter()
                    .map(|d| match planning.schedule().find(&s.id, *d) {
                        Some(ShiftType::Day) => " D",
                        Some(ShiftType::Night) => " N",
                        None => " -",
                    })
                    .collect();
                println!("{:<20} {}", s.name, cells.join(" "));
            }
            0
        }
        Commands::Stats { period } => {
            let range = period.range()?;
            let tally = planning.schedule().tally(&range);
            for s in planning.roster() {
                let t = tally.get(&s.id).copied().unwrap_or_default();
                println!(
                    "{} | day {} | night {} | total {}",
                    s.name,
                    t.day,
                    t.night,
                    t.total()
                );
            }
            0
        }
        Commands::Export {
            period,
            out_csv,
            out_json,
        } => {
            if let Some(path) = out_csv {
                let range = period.range()?;
                io::export_assignments_csv(path, planning.roster(), planning.schedule(), &range)?;
            }
            if let Some(path) = out_json {
                io::export_snapshot_json(path, planning.roster(), planning.schedule())?;
            }
            0
        }
    };

    std::process::exit(code);
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date (expected YYYY-MM-DD): {raw}"))
}

fn parse_shift(raw: &str) -> Result<ShiftType> {
    raw.parse::<ShiftType>().map_err(anyhow::Error::msg)
}

/// Accepte un id exact ou un nom (insensible à la casse).
fn resolve_staff(planning: &Planning, key: &str) -> Result<StaffId> {
    let id = StaffId::new(key);
    if planning.roster().exists(&id) {
        return Ok(id);
    }
    planning
        .roster()
        .find_by_name(key)
        .map(|s| s.id.clone())
        .ok_or_else(|| anyhow!("unknown staff: {key}"))
}
