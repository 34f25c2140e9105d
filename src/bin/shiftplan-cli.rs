#![forbid(unsafe_code)]
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use shiftplan::{
    engine::{DuplicateShiftPolicy, EngineOptions, Scheduler},
    io::LoadFilters,
    report,
    storage::{JsonStorage, Storage},
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification du personnel
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Document JSON d'entrée (staff, shifts, rules)
    #[arg(long, global = true, default_value = "input.json")]
    input: String,

    /// Ne planifier que les shifts de cette unité
    #[arg(long, global = true)]
    unit: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct EngineFlags {
    /// Désactive le départage par heures cumulées
    #[arg(long)]
    no_fairness: bool,
    /// Ignore les préférences (nuits, unités)
    #[arg(long)]
    ignore_preferences: bool,
    /// Planifie aussi les shifts dont l'id est répété
    #[arg(long)]
    keep_duplicate_shifts: bool,
}

impl From<EngineFlags> for EngineOptions {
    fn from(f: EngineFlags) -> Self {
        Self {
            fairness_on: !f.no_fairness,
            respect_preferences: !f.ignore_preferences,
            duplicate_shifts: if f.keep_duplicate_shifts {
                DuplicateShiftPolicy::KeepAll
            } else {
                DuplicateShiftPolicy::KeepFirst
            },
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Construire le planning et écrire les CSV
    Plan {
        /// CSV du planning (défaut : schedule.csv ou schedule_<unit>.csv)
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Export JSON du résultat (optionnel)
        #[arg(long)]
        out_json: Option<PathBuf>,
        #[command(flatten)]
        engine: EngineFlags,
    },

    /// Vérifier couverture et contraintes
    Check {
        /// Export CSV des problèmes (optionnel)
        #[arg(long)]
        report: Option<PathBuf>,
        #[command(flatten)]
        engine: EngineFlags,
    },

    /// Lister le personnel et les shifts chargés
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let filters = LoadFilters {
        unit: cli.unit.clone(),
    };
    let storage = JsonStorage::open(&cli.input)?;
    let scheduler = Scheduler::new(storage.load(&filters)?);

    let code = match cli.cmd {
        Commands::Plan {
            csv,
            out_json,
            engine,
        } => {
            let opts = EngineOptions::from(engine);
            let result = scheduler.build_schedule(opts);
            print!(
                "{}",
                report::render_text(&result, &cli.input, cli.unit.as_deref())
            );

            let csv_path = csv.unwrap_or_else(|| report::default_csv_path(cli.unit.as_deref()));
            let (staff_csv, warnings_csv) = report::companion_paths(&csv_path);
            let roster = scheduler.roster();

            report::write_schedule_csv(&csv_path, roster, &result, opts.duplicate_shifts)?;
            println!("Schedule CSV written to: {}", csv_path.display());
            report::write_staff_summary_csv(&staff_csv, roster, &result, opts.duplicate_shifts)?;
            println!("Staff summary CSV written to: {}", staff_csv.display());
            report::write_warnings_csv(&warnings_csv, &result)?;
            println!("Warnings CSV written to: {}", warnings_csv.display());

            if let Some(path) = out_json {
                report::export_result_json(&path, &result)?;
                println!("Result JSON written to: {}", path.display());
            }
            0
        }
        Commands::Check {
            report: report_path,
            engine,
        } => {
            let opts = EngineOptions::from(engine);
            let result = scheduler.build_schedule(opts);
            let violations = scheduler.audit(&result, opts);

            if result.warnings.is_empty() && violations.is_empty() {
                println!("OK: full coverage, no violations");
                0
            } else {
                eprintln!(
                    "Found {} warning(s), {} violation(s)",
                    result.warnings.len(),
                    violations.len()
                );
                for w in &result.warnings {
                    eprintln!(" - {w}");
                }
                for v in &violations {
                    eprintln!(" ! {v}");
                }
                if let Some(path) = report_path {
                    report::write_check_csv(&path, &result, &violations)?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::List => {
            let roster = scheduler.roster();
            for s in &roster.staff {
                println!(
                    "{} | {} | {} | max {}h | rest {}h",
                    s.id, s.name, s.role, s.max_weekly_hours, s.min_rest
                );
            }
            for sh in &roster.shifts {
                println!(
                    "{} | {} | {} → {} | {} x{}",
                    sh.id,
                    sh.name,
                    sh.start.to_rfc3339(),
                    sh.end.to_rfc3339(),
                    sh.required_role,
                    sh.required_count
                );
            }
            0
        }
    };

    std::process::exit(code);
}
