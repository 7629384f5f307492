mod calc;
mod config;
mod error;
mod locale;
mod sync;
mod template;

use chrono::{Datelike, Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use crate::calc::{allocate, price};
use crate::config::{
    config_dir, device_id, load_config, load_state, load_template, reset_template, save_state,
    save_template, CostDetails, ExtraCost, HistoryEntry, State, CONFIG_TEMPLATE,
};
use crate::error::{Result, RotaError};
use crate::locale::{format_currency, format_distance, normalize_currency, parse_currency};
use crate::template::{build_values, render, DEFAULT_TEMPLATE};

#[derive(Parser)]
#[command(name = "rotacalc")]
#[command(version, about = "CLI route displacement and excess-distance calculator", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.rotacalc or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with default template files
    Init,

    /// Run a route calculation and store it in the history
    Calc {
        /// Rota 3: service round-trip distance in KM (e.g. "52,3")
        rota3: String,

        /// Rota 4: provider's full logistics distance in KM
        #[arg(long)]
        rota4: Option<String>,

        /// Client coverage limit in KM (blank means unlimited)
        #[arg(long)]
        cobertura: Option<String>,
    },

    /// Attach or replace cost details on a calculation
    Price {
        /// Entry index from 'list' or full id (default: latest)
        entry: Option<String>,

        /// Billable rate per excess KM (e.g. "3,50")
        #[arg(long)]
        km: Option<String>,

        /// Toll charged to the client
        #[arg(long)]
        pedagio: Option<String>,

        /// Toll paid by the provider (internal cost, never billed)
        #[arg(long = "provider-pedagio")]
        provider_pedagio: Option<String>,

        /// Extra internal cost in format "description:value" (can be repeated)
        #[arg(long = "extra", value_name = "DESC:VALUE")]
        extras: Vec<String>,
    },

    /// Remove cost details from a calculation
    RemoveCosts {
        /// Entry index from 'list' or full id (default: latest)
        entry: Option<String>,
    },

    /// Render the summary text for a calculation
    Summary {
        /// Entry index from 'list' or full id (default: latest)
        entry: Option<String>,

        /// Also copy the summary to the system clipboard
        #[arg(long)]
        copy: bool,
    },

    /// List stored calculations
    List {
        /// Number of entries to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Filter by period (all, today, week, month)
        #[arg(long)]
        period: Option<String>,
    },

    /// Show aggregate history statistics
    Stats {
        /// Filter by period (all, today, week, month)
        #[arg(long)]
        period: Option<String>,
    },

    /// Export the history as semicolon-separated CSV
    Export {
        /// Filter by period (all, today, week, month)
        #[arg(long)]
        period: Option<String>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete one calculation from the history
    Delete {
        /// Entry index from 'list' or full id
        entry: String,
    },

    /// Clear the whole history for this device
    Clear,

    /// Manage the shared summary template
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Replace the local history mirror with the remote store's rows
    Sync,

    /// Show current weather conditions (decorative)
    Weather {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },
}

#[derive(Subcommand)]
enum TemplateAction {
    /// Print the active summary template
    Show,

    /// Replace the summary template with the contents of a file
    Set {
        /// Path to a template file
        file: PathBuf,
    },

    /// Restore the built-in default template
    Reset,

    /// Fetch the shared template from the remote store
    Pull,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Calc {
            rota3,
            rota4,
            cobertura,
        } => cmd_calc(&cfg_dir, &rota3, rota4.as_deref(), cobertura.as_deref()),
        Commands::Price {
            entry,
            km,
            pedagio,
            provider_pedagio,
            extras,
        } => cmd_price(
            &cfg_dir,
            entry.as_deref(),
            km.as_deref(),
            pedagio.as_deref(),
            provider_pedagio.as_deref(),
            &extras,
        ),
        Commands::RemoveCosts { entry } => cmd_remove_costs(&cfg_dir, entry.as_deref()),
        Commands::Summary { entry, copy } => cmd_summary(&cfg_dir, entry.as_deref(), copy),
        Commands::List { limit, period } => cmd_list(&cfg_dir, limit, period.as_deref()),
        Commands::Stats { period } => cmd_stats(&cfg_dir, period.as_deref()),
        Commands::Export { period, output } => cmd_export(&cfg_dir, period.as_deref(), output),
        Commands::Delete { entry } => cmd_delete(&cfg_dir, &entry),
        Commands::Clear => cmd_clear(&cfg_dir),
        Commands::Template { action } => cmd_template(&cfg_dir, action),
        Commands::Sync => cmd_sync(&cfg_dir),
        Commands::Weather { lat, lon } => cmd_weather(&cfg_dir, lat, lon),
    }
}

/// Initialize config directory with default template files
fn cmd_init(cfg_dir: &PathBuf) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(RotaError::AlreadyInitialized(cfg_dir.clone()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("template.txt"), DEFAULT_TEMPLATE)?;
    device_id(cfg_dir)?;

    println!("Initialized rotacalc config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Optional remote sync:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Adjust the summary:    $EDITOR {}/template.txt",
        cfg_dir.display()
    );
    println!();
    println!("Then run your first calculation:");
    println!("  rotacalc calc 52,3 --rota4 105");

    Ok(())
}

// Table row struct for tabled
#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "ROTA 3")]
    service: String,
    #[tabled(rename = "ROTA 4")]
    total: String,
    #[tabled(rename = "EXCEDENTE")]
    client_excess: String,
    #[tabled(rename = "TOTAL")]
    charged: String,
}

#[derive(Clone, Copy, PartialEq)]
enum Period {
    All,
    Today,
    Week,
    Month,
}

impl Period {
    fn as_str(&self) -> &'static str {
        match self {
            Period::All => "all",
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
        }
    }
}

fn parse_period(period: Option<&str>) -> Result<Period> {
    match period.unwrap_or("all") {
        "all" => Ok(Period::All),
        "today" => Ok(Period::Today),
        "week" => Ok(Period::Week),
        "month" => Ok(Period::Month),
        other => Err(RotaError::InvalidPeriod(other.to_string())),
    }
}

/// Earliest entry id (ms timestamp) included in the period, None for all.
fn period_threshold(period: Period) -> Option<i64> {
    let now = Local::now();
    match period {
        Period::All => None,
        Period::Today => local_midnight_millis(now.date_naive()),
        Period::Week => Some(now.timestamp_millis() - 7 * 24 * 60 * 60 * 1000),
        Period::Month => local_midnight_millis(now.date_naive().with_day(1)?),
    }
}

fn local_midnight_millis(date: NaiveDate) -> Option<i64> {
    date.and_hms_opt(0, 0, 0)?
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

fn filter_by_period(state: &State, period: Period) -> Vec<&HistoryEntry> {
    let threshold = period_threshold(period);
    state
        .history
        .iter()
        .filter(|e| threshold.map_or(true, |t| e.id >= t))
        .collect()
}

fn entry_datetime(id: i64) -> String {
    chrono::DateTime::from_timestamp_millis(id)
        .map(|dt| dt.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| id.to_string())
}

fn entry_date(id: i64) -> String {
    chrono::DateTime::from_timestamp_millis(id)
        .map(|dt| dt.with_timezone(&Local).format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Resolve an entry reference to its id. Accepts either a 1-based index
/// from 'list' (newest first) or the full numeric id.
fn resolve_entry_id(state: &State, reference: &str) -> Result<i64> {
    if let Ok(index) = reference.parse::<usize>() {
        if index == 0 {
            return Err(RotaError::InvalidEntryIndex(reference.to_string()));
        }
        if index <= state.history.len() {
            return Ok(state.history[index - 1].id);
        }
    }

    if let Ok(id) = reference.parse::<i64>() {
        if state.history.iter().any(|e| e.id == id) {
            return Ok(id);
        }
    }

    // Small numbers were meant as indexes; anything else looked like an id.
    if reference.parse::<usize>().is_ok_and(|n| n < 1_000_000) {
        Err(RotaError::InvalidEntryIndex(reference.to_string()))
    } else {
        Err(RotaError::EntryNotFound(reference.to_string()))
    }
}

fn parse_required(field: &str, value: &str) -> Result<f64> {
    locale::parse_decimal(value).ok_or_else(|| RotaError::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_optional(field: &str, value: Option<&str>) -> Result<Option<f64>> {
    match value {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_required(field, s).map(Some),
    }
}

fn warn_sync(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("Sync warning: {e}");
    }
}

/// Run a route calculation, store it locally and best-effort remotely
fn cmd_calc(
    cfg_dir: &PathBuf,
    rota3: &str,
    rota4: Option<&str>,
    cobertura: Option<&str>,
) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(RotaError::ConfigNotFound(cfg_dir.clone()));
    }

    let service = parse_required("rota-3", rota3)?;
    let total = parse_optional("rota-4", rota4)?;
    let coverage = parse_optional("cobertura", cobertura)?;

    let allocation = allocate(service, total, coverage);
    let id = Utc::now().timestamp_millis();
    let entry = HistoryEntry::from_allocation(id, &allocation);

    let mut state = load_state(cfg_dir)?;
    state.push_entry(entry.clone());
    save_state(cfg_dir, &state)?;

    println!("Calculation {} (id {})", entry_datetime(id), id);
    println!(
        "  Rota 3:        {} KM",
        format_distance(allocation.service_distance)
    );
    if let Some(total) = allocation.total_distance {
        println!("  Rota 4:        {} KM", format_distance(total));
    }
    match allocation.coverage_limit {
        Some(limit) => println!("  Cobertura:     {} KM", format_distance(limit)),
        None => println!("  Cobertura:     ilimitada"),
    }
    match allocation.displacement {
        Some(displacement) => {
            println!("  Deslocamento:  {} KM", format_distance(displacement))
        }
        None => println!("  Deslocamento:  -"),
    }
    println!(
        "  KM Cobertura:  {} KM",
        format_distance(allocation.provider_excess)
    );
    println!(
        "  Excedente Beneficiário: {} KM",
        format_distance(allocation.client_excess)
    );

    if allocation.client_excess > 0.0 {
        println!();
        println!("Atenção: existe KM excedente do beneficiário.");
        println!("  1. Incluir no Genesis no campo KM Excedente.");
        println!("  2. Alterar o campo Refat para Beneficiário.");
    }

    let config = load_config(cfg_dir)?;
    if config.remote.enabled {
        let device = device_id(cfg_dir)?;
        match sync::push_calculation(&config.remote, &device, &entry) {
            Ok(Some(remote_id)) => {
                if let Some(stored) = state.find_mut(id) {
                    stored.remote_id = Some(remote_id);
                }
                save_state(cfg_dir, &state)?;
            }
            Ok(None) => {}
            Err(e) => eprintln!("Sync warning: {e}"),
        }
    }

    Ok(())
}

/// Attach or replace cost details on a calculation
fn cmd_price(
    cfg_dir: &PathBuf,
    entry_ref: Option<&str>,
    km: Option<&str>,
    pedagio: Option<&str>,
    provider_pedagio: Option<&str>,
    extras: &[String],
) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(RotaError::ConfigNotFound(cfg_dir.clone()));
    }

    if km.is_none() && pedagio.is_none() && provider_pedagio.is_none() && extras.is_empty() {
        return Err(RotaError::NoCostInput);
    }

    let mut state = load_state(cfg_dir)?;
    let id = resolve_entry_id(&state, entry_ref.unwrap_or("1"))?;

    let rate = km.map_or_else(|| "0,00".to_string(), normalize_currency);
    let toll = pedagio.map_or_else(|| "0,00".to_string(), normalize_currency);
    let extra_costs = parse_extra_costs(extras)?;

    let entry = state
        .find_mut(id)
        .ok_or_else(|| RotaError::EntryNotFound(id.to_string()))?;

    let total = price(
        entry.client_excess,
        parse_currency(&rate),
        parse_currency(&toll),
    );

    entry.cost_details = Some(CostDetails {
        rate_per_km: rate,
        toll,
        total,
        provider_toll: provider_pedagio.map(normalize_currency),
        extra_costs,
    });

    let snapshot = entry.clone();
    save_state(cfg_dir, &state)?;

    println!("Updated costs for calculation {}", entry_datetime(id));
    println!(
        "  Excedente:  {} KM",
        format_distance(snapshot.client_excess)
    );
    println!("  Total:      {}", format_currency(total));

    let config = load_config(cfg_dir)?;
    if config.remote.enabled {
        let device = device_id(cfg_dir)?;
        warn_sync(sync::update_costs(&config.remote, &device, &snapshot));
    }

    Ok(())
}

fn parse_extra_costs(extras: &[String]) -> Result<Vec<ExtraCost>> {
    let base_id = Utc::now().timestamp_millis();
    let mut costs = Vec::with_capacity(extras.len());

    for (i, raw) in extras.iter().enumerate() {
        let Some((description, value)) = raw.split_once(':') else {
            return Err(RotaError::InvalidExtraFormat(raw.clone()));
        };
        costs.push(ExtraCost {
            id: (base_id + i as i64).to_string(),
            description: description.trim().to_string(),
            value: normalize_currency(value),
        });
    }

    Ok(costs)
}

/// Remove cost details from a calculation
fn cmd_remove_costs(cfg_dir: &PathBuf, entry_ref: Option<&str>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(RotaError::ConfigNotFound(cfg_dir.clone()));
    }

    let mut state = load_state(cfg_dir)?;
    let id = resolve_entry_id(&state, entry_ref.unwrap_or("1"))?;

    let entry = state
        .find_mut(id)
        .ok_or_else(|| RotaError::EntryNotFound(id.to_string()))?;

    if entry.cost_details.is_none() {
        return Err(RotaError::NoCosts(entry_datetime(id)));
    }

    entry.cost_details = None;
    let snapshot = entry.clone();
    save_state(cfg_dir, &state)?;

    println!("Removed costs from calculation {}", entry_datetime(id));

    let config = load_config(cfg_dir)?;
    if config.remote.enabled {
        let device = device_id(cfg_dir)?;
        warn_sync(sync::update_costs(&config.remote, &device, &snapshot));
    }

    Ok(())
}

/// Render the summary text for a calculation
fn cmd_summary(cfg_dir: &PathBuf, entry_ref: Option<&str>, copy: bool) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(RotaError::ConfigNotFound(cfg_dir.clone()));
    }

    let state = load_state(cfg_dir)?;
    let id = resolve_entry_id(&state, entry_ref.unwrap_or("1"))?;
    let entry = state
        .find(id)
        .ok_or_else(|| RotaError::EntryNotFound(id.to_string()))?;

    let template = load_template(cfg_dir)?;
    let summary = render(&template, &build_values(entry));

    println!("{summary}");

    if copy {
        match copy_to_clipboard(&summary) {
            Ok(()) => eprintln!("(copied to clipboard)"),
            Err(e) => eprintln!("Clipboard warning: {e}"),
        }
    }

    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use std::io::Write;
    use std::process::{Command, Stdio};

    #[cfg(target_os = "macos")]
    let mut command = Command::new("pbcopy");

    #[cfg(target_os = "linux")]
    let mut command = {
        let mut c = Command::new("xclip");
        c.args(["-selection", "clipboard"]);
        c
    };

    #[cfg(target_os = "windows")]
    let mut command = Command::new("clip");

    let mut child = command
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| RotaError::Clipboard(e.to_string()))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| RotaError::Clipboard(e.to_string()))?;
    }

    let status = child
        .wait()
        .map_err(|e| RotaError::Clipboard(e.to_string()))?;
    if !status.success() {
        return Err(RotaError::Clipboard(format!(
            "clipboard tool exited with {status}"
        )));
    }

    Ok(())
}

/// List stored calculations
fn cmd_list(cfg_dir: &PathBuf, limit: Option<usize>, period: Option<&str>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(RotaError::ConfigNotFound(cfg_dir.clone()));
    }

    let period = parse_period(period)?;
    let state = load_state(cfg_dir)?;
    let entries = filter_by_period(&state, period);

    if entries.is_empty() {
        println!("No calculations stored yet.");
        return Ok(());
    }

    let shown = match limit {
        Some(n) => &entries[..n.min(entries.len())],
        None => &entries[..],
    };

    let rows: Vec<EntryRow> = shown
        .iter()
        .enumerate()
        .map(|(idx, entry)| EntryRow {
            index: idx + 1,
            date: entry_datetime(entry.id),
            service: format!("{} KM", format_distance(entry.service_distance)),
            total: entry
                .total_distance
                .map_or_else(|| "-".to_string(), |t| format!("{} KM", format_distance(t))),
            client_excess: format!("{} KM", format_distance(entry.client_excess)),
            charged: if entry.charged_total() > 0.0 {
                format_currency(entry.charged_total())
            } else {
                "-".to_string()
            },
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    println!("Total: {} calculations", entries.len());
    println!("Use index number with price/summary/delete (e.g., 'rotacalc summary 1')");

    Ok(())
}

/// Show aggregate history statistics
fn cmd_stats(cfg_dir: &PathBuf, period: Option<&str>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(RotaError::ConfigNotFound(cfg_dir.clone()));
    }

    let period = parse_period(period)?;
    let state = load_state(cfg_dir)?;
    let entries = filter_by_period(&state, period);

    let excess_total: f64 = entries.iter().map(|e| e.client_excess).sum();
    let charged_total: f64 = entries.iter().map(|e| e.charged_total()).sum();

    println!("Calculation Stats");
    println!("{}", "-".repeat(50));
    println!("Period:          {}", period.as_str());
    println!("Calculations:    {}", entries.len());
    println!(
        "Excedente total: {} KM",
        format!("{excess_total:.1}").replace('.', ",")
    );
    println!("Total cobrado:   {}", format_currency(charged_total));

    Ok(())
}

/// Export the history as semicolon-separated CSV
fn cmd_export(cfg_dir: &PathBuf, period: Option<&str>, output: Option<PathBuf>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(RotaError::ConfigNotFound(cfg_dir.clone()));
    }

    let period = parse_period(period)?;
    let state = load_state(cfg_dir)?;
    let entries = filter_by_period(&state, period);

    let mut csv = String::from("Data;R3 (KM);R4 (KM);Cobertura (KM);Excedente (KM);Total (R$)\n");
    for entry in &entries {
        csv.push_str(&format!(
            "{};{};{};{};{};{}\n",
            entry_date(entry.id),
            entry.service_distance,
            entry
                .total_distance
                .map_or_else(|| "-".to_string(), |t| t.to_string()),
            entry
                .coverage_limit
                .map_or_else(|| "Ilimitada".to_string(), |c| c.to_string()),
            entry.client_excess,
            entry.charged_total(),
        ));
    }

    match output {
        Some(path) => {
            std::fs::write(&path, csv)?;
            println!("Exported {} calculations", entries.len());
            println!("  Saved: {}", path.display());
        }
        None => print!("{csv}"),
    }

    Ok(())
}

/// Delete one calculation from the history
fn cmd_delete(cfg_dir: &PathBuf, entry_ref: &str) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(RotaError::ConfigNotFound(cfg_dir.clone()));
    }

    let mut state = load_state(cfg_dir)?;
    let id = resolve_entry_id(&state, entry_ref)?;

    let snapshot = state
        .find(id)
        .cloned()
        .ok_or_else(|| RotaError::EntryNotFound(id.to_string()))?;

    state.history.retain(|e| e.id != id);
    save_state(cfg_dir, &state)?;

    println!("Deleted calculation {}", entry_datetime(id));

    let config = load_config(cfg_dir)?;
    if config.remote.enabled {
        let device = device_id(cfg_dir)?;
        warn_sync(sync::delete_calculation(&config.remote, &device, &snapshot));
    }

    Ok(())
}

/// Clear the whole history for this device
fn cmd_clear(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(RotaError::ConfigNotFound(cfg_dir.clone()));
    }

    let mut state = load_state(cfg_dir)?;
    let removed = state.history.len();
    state.history.clear();
    save_state(cfg_dir, &state)?;

    println!("Cleared {removed} calculations from the local history");

    let config = load_config(cfg_dir)?;
    if config.remote.enabled {
        let device = device_id(cfg_dir)?;
        warn_sync(sync::delete_all(&config.remote, &device));
    }

    Ok(())
}

/// Manage the shared summary template
fn cmd_template(cfg_dir: &PathBuf, action: TemplateAction) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(RotaError::ConfigNotFound(cfg_dir.clone()));
    }

    match action {
        TemplateAction::Show => {
            println!("{}", load_template(cfg_dir)?);
        }
        TemplateAction::Set { file } => {
            let template = std::fs::read_to_string(&file)?;
            save_template(cfg_dir, &template)?;
            println!("Saved summary template from {}", file.display());

            let config = load_config(cfg_dir)?;
            if config.remote.enabled {
                warn_sync(sync::push_template(&config.remote, &template));
            }
        }
        TemplateAction::Reset => {
            reset_template(cfg_dir)?;
            println!("Restored the built-in default template");
        }
        TemplateAction::Pull => {
            let config = load_config(cfg_dir)?;
            if !config.remote.enabled {
                return Err(RotaError::SyncDisabled);
            }
            match sync::fetch_template(&config.remote) {
                Ok(Some(template)) => {
                    save_template(cfg_dir, &template)?;
                    println!("Pulled the shared summary template");
                }
                Ok(None) => println!("No shared template stored remotely."),
                Err(e) => eprintln!("Sync warning: {e}"),
            }
        }
    }

    Ok(())
}

/// Replace the local history mirror with the remote store's rows
fn cmd_sync(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(RotaError::ConfigNotFound(cfg_dir.clone()));
    }

    let config = load_config(cfg_dir)?;
    if !config.remote.enabled {
        return Err(RotaError::SyncDisabled);
    }

    let device = device_id(cfg_dir)?;
    match sync::fetch_history(&config.remote, &device) {
        Ok(history) => {
            let mut state = load_state(cfg_dir)?;
            state.history = history;
            state.history.truncate(config::HISTORY_CAP);
            save_state(cfg_dir, &state)?;
            println!(
                "Synced {} calculations from the remote store",
                state.history.len()
            );
        }
        Err(e) => {
            // Non-fatal: the local mirror stays untouched.
            eprintln!("Sync warning: {e}");
            return Ok(());
        }
    }

    if let Ok(Some(template)) = sync::fetch_template(&config.remote) {
        save_template(cfg_dir, &template)?;
        println!("Refreshed the shared summary template");
    }

    Ok(())
}

/// Show current weather conditions (decorative)
fn cmd_weather(cfg_dir: &PathBuf, lat: f64, lon: f64) -> Result<()> {
    let config = load_config(cfg_dir)?;
    if config.weather.api_key.is_empty() {
        println!("Weather lookup is not configured (set [weather].api_key in config.toml).");
        return Ok(());
    }

    match sync::fetch_weather(&config.weather.api_key, lat, lon) {
        Some(weather) => {
            println!(
                "{}: {}°C - {}",
                weather.city, weather.temp_celsius, weather.condition
            );
            if weather.is_bad {
                println!("Atenção: condições ruins para deslocamento.");
            }
        }
        None => println!("Weather unavailable."),
    }

    Ok(())
}
