use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;
use tracing::info;

use intake_core::models::pain_map::PainBodyMap;
use intake_instruments::instruments::gad7::Gad7;
use intake_instruments::instruments::pc_ptsd5::PcPtsd5;
use intake_instruments::instruments::phq9::Phq9;
use intake_instruments::inventory::Inventory;
use intake_instruments::{Instrument, all_instruments, get_instrument};
use intake_storage::{Database, FormRecord};

mod config;
mod render;

use config::IntakeConfig;
use render::Render;

#[derive(Parser)]
#[command(name = "intake", version, about = "Clinical intake form records")]
struct Cli {
    /// SQLite database file. Overrides the configured path.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bulk-import forms from a CSV file with a header row.
    Import { form: FormArg, csv: PathBuf },
    /// Print one stored form.
    Show { form: FormArg, id: i64 },
    /// List a case's forms, oldest first.
    List { form: FormArg, case_id: i64 },
    /// Delete one stored form.
    Delete { form: FormArg, id: i64 },
    /// Write a config file recording the database path.
    InitConfig,
    /// Describe the supported inventories, or one of them by id.
    Instruments { id: Option<String> },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormArg {
    PainMap,
    Phq9,
    Gad7,
    PcPtsd5,
}

enum Action {
    Import(PathBuf),
    Show(i64),
    List(i64),
    Delete(i64),
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Import { form, csv } => with_form(form, cli.db, Action::Import(csv)),
        Command::Show { form, id } => with_form(form, cli.db, Action::Show(id)),
        Command::List { form, case_id } => with_form(form, cli.db, Action::List(case_id)),
        Command::Delete { form, id } => with_form(form, cli.db, Action::Delete(id)),
        Command::InitConfig => init_config(cli.db),
        Command::Instruments { id } => describe_instruments(id.as_deref()),
    }
}

fn open_database(db: Option<PathBuf>) -> Result<Database> {
    let path = config::resolve_database_path(db)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    info!(path = %path.display(), "opening database");
    Ok(Database::open(&path)?)
}

fn with_form(form: FormArg, db: Option<PathBuf>, action: Action) -> Result<()> {
    let db = open_database(db)?;
    match form {
        FormArg::PainMap => run::<PainBodyMap>(&db, action),
        FormArg::Phq9 => run::<Inventory<Phq9>>(&db, action),
        FormArg::Gad7 => run::<Inventory<Gad7>>(&db, action),
        FormArg::PcPtsd5 => run::<Inventory<PcPtsd5>>(&db, action),
    }
}

fn run<T: FormRecord + Render>(db: &Database, action: Action) -> Result<()> {
    let store = db.forms::<T>();
    match action {
        Action::Import(path) => {
            let summary = store.import_csv(&path)?;
            if summary.aborted() {
                return Err(eyre::eyre!(
                    "{}: missing required columns: {}",
                    path.display(),
                    summary.missing_columns.join(", ")
                ));
            }
            println!(
                "{} rows read, {} imported, {} failed",
                summary.rows, summary.imported, summary.failed
            );
        }
        Action::Show(id) => {
            let record = store
                .get_by_id(id)?
                .ok_or_else(|| eyre::eyre!("no {} with id {id}", T::kind()))?;
            print!("{}", record.detail());
        }
        Action::List(case_id) => {
            let records = store.list_by_case(case_id)?;
            if records.is_empty() {
                println!("no {} forms for case {case_id}", T::kind());
            }
            for record in &records {
                println!("{}", record.headline());
            }
        }
        Action::Delete(id) => {
            if !store.delete_by_id(id)? {
                return Err(eyre::eyre!("no {} with id {id}", T::kind()));
            }
            println!("deleted {id}");
        }
    }
    Ok(())
}

fn init_config(db: Option<PathBuf>) -> Result<()> {
    let database_path = match db {
        Some(path) => path,
        None => config::default_database_path()?,
    };
    let config = IntakeConfig {
        config_version: 0,
        database_path,
        created_at: jiff::Timestamp::now(),
    };
    let written = config::save_config(&config)?;
    open_database(Some(config.database_path.clone()))?;
    println!(
        "wrote {} (database {})",
        written.display(),
        config.database_path.display()
    );
    Ok(())
}

fn describe_instruments(id: Option<&str>) -> Result<()> {
    let Some(id) = id else {
        for instrument in all_instruments() {
            println!(
                "{:<10} {:<10} {} items, total 0-{}",
                instrument.id(),
                instrument.name(),
                instrument.items().len(),
                instrument.max_total()
            );
        }
        return Ok(());
    };

    let instrument = get_instrument(id)?;
    println!("{} ({})", instrument.name(), instrument.kind());
    for item in instrument.items() {
        println!("  {:<12} {}", item.id, item.text);
    }
    println!();
    for band in instrument.bands() {
        println!("  {:>2}-{:<2} {}", band.min, band.max, band.label);
    }
    Ok(())
}
