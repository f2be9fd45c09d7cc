//! MediGo command-line front end.
//!
//! Builds the catalog from configuration, wires the collaborators and runs one
//! engine operation per invocation.
//!
//! Usage:
//!   medigo search "fever" --lat 4.05 --lng 9.77
//!   medigo search Doliprane --dosage 500mg
//!   medigo verify Coartem
//!   medigo scan box.jpg
//!   medigo catalogue --category Analgesic
//!   medigo dashboard admin --json

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use medigo_core::dashboard::{AdminDashboard, PharmacyDashboard};
use medigo_core::{
    CatalogStore, Coordinates, MatchOutcome, MediGoConfig, PrescriptionSearch, SeededGenerator,
    VerificationReport,
};
use medigo_llm::Collaborators;

// ── CLI definition ────────────────────────────────────────────────────────────

/// MediGo: find medication stock in pharmacies near you.
#[derive(Parser)]
#[command(name = "medigo", about = "Medication availability search and packaging verification")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the catalog generator seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a medication by name, category or symptoms.
    Search {
        query: String,
        /// Preferred strength (e.g., 500mg)
        #[arg(long)]
        dosage: Option<String>,
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Maximum pharmacies to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Read a prescription photo and search for the first medication on it.
    Prescription {
        image: PathBuf,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Check a brand name read from packaging.
    Verify { name: String },
    /// Identify and verify a packaging photo.
    Scan { image: PathBuf },
    /// Browse the catalogue.
    Catalogue {
        /// Name or generic-name filter
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long)]
        category: Option<String>,
        /// List categories only
        #[arg(long)]
        categories: bool,
    },
    /// Partner and admin dashboards.
    #[command(subcommand)]
    Dashboard(DashboardCommand),
}

#[derive(Subcommand)]
enum DashboardCommand {
    /// Pharmacy partner dashboard.
    Pharmacy {
        id: String,
        /// Inventory name filter
        #[arg(long, default_value = "")]
        term: String,
    },
    /// Platform admin dashboard.
    Admin,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("medigo: {:#}", e);
        std::process::exit(1);
    }
}

struct App {
    config: MediGoConfig,
    catalog: Arc<CatalogStore>,
    collaborators: Collaborators,
    json: bool,
}

fn run(cli: Cli) -> Result<()> {
    let config = MediGoConfig::load(cli.config.as_deref()).context("loading configuration")?;

    let seed = cli.seed.or(config.catalog.seed);
    let mut generator = SeededGenerator::new(seed);
    let catalog = Arc::new(
        CatalogStore::generate(&mut generator, config.catalog.pharmacy_count).context("building catalog")?,
    );
    info!(?seed, pharmacies = catalog.pharmacies().len(), "catalog ready");

    let collaborators = Collaborators::from_config(&config.ai, catalog.clone());
    let app = App {
        config,
        catalog,
        collaborators,
        json: cli.json,
    };

    match cli.command {
        Command::Search {
            query,
            dosage,
            lat,
            lng,
            limit,
        } => {
            let location = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
                _ => app.config.default_location(),
            };
            app.search(&query, dosage.as_deref(), location, limit)
        }
        Command::Prescription { image, limit } => app.prescription(&image, limit),
        Command::Verify { name } => app.verify(&name),
        Command::Scan { image } => app.scan(&image),
        Command::Catalogue {
            text,
            category,
            categories,
        } => app.catalogue(&text, category.as_deref(), categories),
        Command::Dashboard(DashboardCommand::Pharmacy { id, term }) => {
            let dash = PharmacyDashboard::build(&app.catalog, &id, &term)?;
            app.emit(&dash, || print_pharmacy_dashboard(&dash))
        }
        Command::Dashboard(DashboardCommand::Admin) => {
            let dash = AdminDashboard::build(&app.catalog);
            app.emit(&dash, || print_admin_dashboard(&dash))
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

impl App {
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce()) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text();
        }
        Ok(())
    }

    fn search(&self, query: &str, dosage: Option<&str>, location: Option<Coordinates>, limit: usize) -> Result<()> {
        let engine = self.collaborators.search_engine(self.catalog.clone());
        let outcome = engine.search(query, dosage, location.as_ref())?;
        self.emit(&outcome, || print_outcome(&outcome, limit))
    }

    fn prescription(&self, image: &Path, limit: usize) -> Result<()> {
        let bytes = std::fs::read(image).with_context(|| format!("reading {}", image.display()))?;
        let engine = self.collaborators.search_engine(self.catalog.clone());
        let location = self.config.default_location();

        match engine.search_prescription(&bytes, location.as_ref()) {
            PrescriptionSearch::Searched {
                medication_names,
                outcome,
            } => self.emit(&outcome, || {
                println!("Prescription lists: {}", medication_names.join(", "));
                print_outcome(&outcome, limit);
            }),
            PrescriptionSearch::Unreadable => bail!("could not read any medication from the prescription"),
        }
    }

    fn verify(&self, name: &str) -> Result<()> {
        let verdict = self
            .collaborators
            .verification_engine(self.catalog.clone())
            .verify(name);
        self.emit(&verdict, || println!("{:?}: {}", verdict, name))
    }

    fn scan(&self, image: &Path) -> Result<()> {
        let bytes = std::fs::read(image).with_context(|| format!("reading {}", image.display()))?;
        let report = self
            .collaborators
            .verification_engine(self.catalog.clone())
            .verify_image(&bytes);
        self.emit(&report, || print_report(&report))
    }

    fn catalogue(&self, text: &str, category: Option<&str>, categories_only: bool) -> Result<()> {
        if categories_only {
            let categories = self.catalog.categories();
            return self.emit(&categories, || {
                for c in &categories {
                    println!("{}", c);
                }
            });
        }

        let meds = self.catalog.browse(text, category);
        self.emit(&meds, || {
            for m in &meds {
                println!("{:<10} {:<28} {:<14} {:>6} {}", m.id, m.label(), m.category, m.price.amount, m.price.currency);
            }
            println!("{} medications", meds.len());
        })
    }
}

// ── Text output ───────────────────────────────────────────────────────────────

fn print_outcome(outcome: &MatchOutcome, limit: usize) {
    match outcome {
        MatchOutcome::Matched { medication, results } => {
            println!("{} ({}), {}", medication.label(), medication.generic_name, medication.category);
            if results.is_empty() {
                println!("No pharmacy currently lists this medication.");
                return;
            }
            let now = Utc::now();
            for r in results.iter().take(limit) {
                let distance = if r.distance.is_measured() {
                    format!("{:.1} km", r.distance.km())
                } else {
                    format!("~{:.0} km", r.distance.km())
                };
                println!(
                    "  {:<12} {:<36} {:<10} {:>9} {:>6} {}",
                    r.stock.status.as_str(),
                    r.pharmacy.name,
                    r.pharmacy.city,
                    distance,
                    r.stock.price.unwrap_or(r.medication.price.amount),
                    r.stock.freshness_label(now),
                );
            }
            if results.len() > limit {
                println!("  ... {} more", results.len() - limit);
            }
        }
        MatchOutcome::NoMatch {
            target_term,
            alternatives,
        } => {
            println!("No medication matches \"{}\".", target_term);
            if !alternatives.is_empty() {
                println!("Try: {}", alternatives.join(", "));
            }
        }
    }
}

fn print_report(report: &VerificationReport) {
    println!(
        "{:?}: {} (confidence {})",
        report.verdict, report.detected_name, report.confidence
    );
    if let Some(id) = &report.matched_medication_id {
        println!("Matches catalog entry {}", id);
    }
}

fn print_pharmacy_dashboard(dash: &PharmacyDashboard) {
    println!("{} ({})", dash.pharmacy_name, dash.pharmacy_id);
    println!("  Active orders:    {}", dash.active_orders);
    println!("  Low stock alerts: {}", dash.low_stock_alerts);
    println!("  Out of stock:     {}", dash.out_of_stock);
    println!("  Revenue:          {} XAF", dash.revenue);
    for row in &dash.inventory {
        println!(
            "    {:<24} {:<14} {:<12} {:>4} {:>6}",
            row.name,
            row.category,
            row.status.as_str(),
            row.quantity,
            row.price
        );
    }
}

fn print_admin_dashboard(dash: &AdminDashboard) {
    println!("Pharmacies:   {}", dash.pharmacy_count);
    println!("Verified:     {:.0}%", dash.verified_share * 100.0);
    println!("Open reports: {}", dash.open_reports);
    for (kind, count) in &dash.reports_by_kind {
        println!("  {:?}: {}", kind, count);
    }
    println!("Shortages:");
    for s in &dash.shortages {
        println!("  {:<24} out at {} pharmacies", s.name, s.out_of_stock_pharmacies);
    }
}
