//! reflex - personal urge-tracking CLI
//!
//! Log urges, review statistics and insights, and export your data.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use reflex_core::analytics::{
    compute_statistics, generate_insights, pick_quote, StatsWindow,
};
use reflex_core::format::format_relative_time;
use reflex_core::store::{keys, ActionStore, KeyValueStore, LogStore, SettingsStore, SqliteStore};
use reflex_core::{export_all, import_all, Config, Error, LogDraft, UrgeLogUpdate};

#[derive(Parser)]
#[command(name = "reflex")]
#[command(about = "Personal urge-tracking and habit companion")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record an urge
    Log {
        /// What the urge was
        urge: String,

        /// Whether you acted on it (mutually exclusive with --resisted)
        #[arg(long, conflicts_with = "resisted")]
        acted: bool,

        /// Whether you resisted it
        #[arg(long)]
        resisted: bool,

        /// Where it happened
        #[arg(short, long, default_value = "")]
        location: String,

        /// What set it off
        #[arg(short, long, default_value = "")]
        trigger: String,

        /// How you felt
        #[arg(short, long)]
        emotion: Option<String>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// List recent logs
    List {
        /// Maximum number of logs to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Toggle a log's acted/resisted outcome
    Toggle {
        /// Log id (prefix match supported)
        id: String,
    },

    /// Attach a replacement action or notes to a log
    Annotate {
        /// Log id (prefix match supported)
        id: String,

        /// Replacement action taken instead
        #[arg(short, long)]
        action: Option<String>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Delete a log
    Delete {
        /// Log id (prefix match supported)
        id: String,
    },

    /// Show dashboard statistics
    Stats {
        /// Lookback window: week, month, or all
        #[arg(short, long)]
        window: Option<StatsWindow>,
    },

    /// Show rule-based insights
    Insights {
        /// Lookback window: week, month, or all
        #[arg(short, long)]
        window: Option<StatsWindow>,
    },

    /// Print a motivational quote
    Quote {
        /// Fixed RNG seed (for scripting)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List the replacement-action catalog
    Actions,

    /// Record a use of a replacement action
    #[command(name = "use")]
    UseAction {
        /// Action id
        id: String,
    },

    /// Rate a replacement action's effectiveness (1-5)
    Rate {
        /// Action id
        id: String,

        /// Rating from 1 to 5
        rating: u8,
    },

    /// Export all data as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a previously exported JSON payload
    Import {
        /// Path to the export file
        path: PathBuf,
    },

    /// Delete all stored data
    Wipe {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

struct Stores {
    storage: Arc<dyn KeyValueStore>,
}

impl Stores {
    fn open() -> Result<Self> {
        let db_path = Config::database_path();
        tracing::info!(path = %db_path.display(), "Opening document store");
        let storage: Arc<dyn KeyValueStore> = Arc::new(
            SqliteStore::open(&db_path).context("failed to open document store")?,
        );
        Ok(Self { storage })
    }

    fn logs(&self) -> LogStore {
        LogStore::new(self.storage.clone())
    }

    fn settings(&self, config: &Config) -> SettingsStore {
        SettingsStore::with_recent_limit(self.storage.clone(), config.tracking.recent_limit)
    }

    fn actions(&self) -> ActionStore {
        ActionStore::new(self.storage.clone())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    Config::ensure_xdg_env();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard =
        reflex_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let stores = Stores::open()?;

    match args.command {
        Command::Log {
            urge,
            acted,
            resisted,
            location,
            trigger,
            emotion,
            notes,
        } => cmd_log(
            &stores, &config, urge, acted, resisted, location, trigger, emotion, notes,
        ),
        Command::List { limit } => cmd_list(&stores, limit),
        Command::Toggle { id } => cmd_toggle(&stores, &id),
        Command::Annotate { id, action, notes } => cmd_annotate(&stores, &id, action, notes),
        Command::Delete { id } => cmd_delete(&stores, &id),
        Command::Stats { window } => cmd_stats(&stores, &config, window),
        Command::Insights { window } => cmd_insights(&stores, &config, window),
        Command::Quote { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            println!("{}", pick_quote(&mut rng));
            Ok(())
        }
        Command::Actions => cmd_actions(&stores),
        Command::UseAction { id } => {
            let action = stores.actions().record_use(&id)?;
            println!("{} used {} time(s)", action.title, action.times_used);
            Ok(())
        }
        Command::Rate { id, rating } => {
            let action = stores.actions().rate(&id, rating)?;
            println!("{} rated {}/5", action.title, rating);
            Ok(())
        }
        Command::Export { output } => cmd_export(&stores, &config, output),
        Command::Import { path } => cmd_import(&stores, &config, path),
        Command::Wipe { yes } => cmd_wipe(&stores, yes),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_log(
    stores: &Stores,
    config: &Config,
    urge: String,
    acted: bool,
    resisted: bool,
    location: String,
    trigger: String,
    emotion: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let draft = LogDraft {
        urge,
        location,
        trigger,
        emotion,
        acted_on: match (acted, resisted) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
        replacement_action: None,
        notes,
    };

    let log = match draft.finalize(Utc::now()) {
        Ok(log) => log,
        Err(Error::Validation(messages)) => {
            eprintln!("Could not save this log:");
            for message in messages {
                eprintln!("  - {}", message);
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let settings = stores.settings(config);
    let was_resisted = log.resisted();
    let trigger = log.trigger.clone();
    let location = log.location.clone();
    let emotion = log.emotion.clone();

    stores.logs().append(log)?;

    settings.touch_trigger(&trigger)?;
    settings.touch_location(&location)?;
    if let Some(emotion) = emotion {
        settings.touch_emotion(&emotion)?;
    }

    if was_resisted {
        let updated = settings.record_resisted()?;
        let active = updated.streak_goals.iter().filter(|g| g.is_active).count();
        if active > 0 {
            println!("Logged. {} active goal(s) advanced.", active);
        } else {
            println!("Logged. Nice resist.");
        }
    } else {
        println!("Logged.");
    }

    Ok(())
}

fn cmd_list(stores: &Stores, limit: usize) -> Result<()> {
    let logs = stores.logs().list()?;
    if logs.is_empty() {
        println!("No urges logged yet. Record one with 'reflex log'.");
        return Ok(());
    }

    for log in logs.iter().take(limit) {
        let outcome = if log.acted_on { "acted" } else { "resisted" };
        let mut context = String::new();
        if !log.trigger.is_empty() {
            context.push_str(&format!("  trigger: {}", log.trigger));
        }
        if !log.location.is_empty() {
            context.push_str(&format!("  at: {}", log.location));
        }
        println!(
            "{:<26} {:<9} {:<20} {}{}",
            log.id,
            outcome,
            format_relative_time(log.timestamp),
            log.urge,
            context
        );
    }

    Ok(())
}

fn resolve_log_id(stores: &Stores, prefix: &str) -> Result<String> {
    let logs = stores.logs().list()?;
    let matches: Vec<_> = logs.iter().filter(|l| l.id.starts_with(prefix)).collect();
    match matches.len() {
        0 => anyhow::bail!("no log found matching '{}'", prefix),
        1 => Ok(matches[0].id.clone()),
        n => anyhow::bail!("'{}' is ambiguous ({} logs match)", prefix, n),
    }
}

fn cmd_toggle(stores: &Stores, prefix: &str) -> Result<()> {
    let id = resolve_log_id(stores, prefix)?;
    let current = stores
        .logs()
        .list()?
        .into_iter()
        .find(|l| l.id == id)
        .context("log disappeared")?;

    let updated = stores.logs().update(
        &id,
        UrgeLogUpdate {
            acted_on: Some(!current.acted_on),
            ..Default::default()
        },
    )?;

    println!(
        "{} is now marked {}",
        updated.id,
        if updated.acted_on { "acted" } else { "resisted" }
    );
    Ok(())
}

fn cmd_annotate(
    stores: &Stores,
    prefix: &str,
    action: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    if action.is_none() && notes.is_none() {
        anyhow::bail!("nothing to annotate: pass --action and/or --notes");
    }

    let id = resolve_log_id(stores, prefix)?;
    stores.logs().update(
        &id,
        UrgeLogUpdate {
            acted_on: None,
            replacement_action: action,
            notes,
        },
    )?;
    println!("Updated {}", id);
    Ok(())
}

fn cmd_delete(stores: &Stores, prefix: &str) -> Result<()> {
    let id = resolve_log_id(stores, prefix)?;
    stores.logs().delete(&id)?;
    println!("Deleted {}", id);
    Ok(())
}

fn window_or_default(config: &Config, window: Option<StatsWindow>) -> StatsWindow {
    window.unwrap_or_else(|| {
        config
            .tracking
            .default_window
            .parse()
            .unwrap_or(StatsWindow::Month)
    })
}

fn cmd_stats(stores: &Stores, config: &Config, window: Option<StatsWindow>) -> Result<()> {
    let window = window_or_default(config, window);
    let logs = stores.logs().list()?;
    let stats = compute_statistics(&logs, window.days(), Local::now());

    println!("Last {} days", window.days());
    println!(
        "  urges: {}   resisted: {}   success rate: {}%",
        stats.total_urges, stats.urges_resisted, stats.success_rate
    );
    println!(
        "  streak: {} day(s) now, {} day(s) at best",
        stats.current_streak, stats.longest_streak
    );
    println!("  average: {:.1} urges/day", stats.average_urges_per_day);

    if !stats.common_urges.is_empty() {
        println!("\n  Top urges:");
        for entry in stats.common_urges.iter().take(5) {
            println!("    {:<24} {}", entry.label, entry.count);
        }
    }
    if !stats.common_triggers.is_empty() {
        println!("\n  Top triggers:");
        for entry in stats.common_triggers.iter().take(5) {
            println!("    {:<24} {}", entry.label, entry.count);
        }
    }

    if !stats.weekly_trend.is_empty() {
        println!("\n  This week:");
        for point in &stats.weekly_trend {
            println!("    {} {:<10} {}", point.day, point.date, "#".repeat(point.count as usize));
        }
    }

    Ok(())
}

fn cmd_insights(stores: &Stores, config: &Config, window: Option<StatsWindow>) -> Result<()> {
    let window = window_or_default(config, window);
    let logs = stores.logs().list()?;
    let stats = compute_statistics(&logs, window.days(), Local::now());
    let insights = generate_insights(&stats);

    if insights.is_empty() {
        println!("Not enough data yet. Log a few urges first.");
        return Ok(());
    }

    for insight in insights {
        println!("- {}", insight);
    }
    Ok(())
}

fn cmd_actions(stores: &Stores) -> Result<()> {
    for action in stores.actions().list()? {
        let rating = action
            .effectiveness
            .map(|e| format!("{}/5", e))
            .unwrap_or_else(|| "unrated".to_string());
        println!(
            "{:<10} {:<24} {:<8} {:<8} used {}x, {}",
            action.id,
            action.title,
            action.duration,
            action.difficulty.as_str(),
            action.times_used,
            rating
        );
    }
    Ok(())
}

fn cmd_export(stores: &Stores, config: &Config, output: Option<PathBuf>) -> Result<()> {
    let payload = export_all(
        &stores.logs(),
        &stores.settings(config),
        &stores.actions(),
        Local::now(),
    )?;
    let text = serde_json::to_string_pretty(&payload)?;

    match output {
        Some(path) => {
            std::fs::write(&path, text).with_context(|| format!("failed to write {:?}", path))?;
            println!("Exported {} log(s) to {}", payload.logs.len(), path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn cmd_import(stores: &Stores, config: &Config, path: PathBuf) -> Result<()> {
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {:?}", path))?;
    let payload: reflex_core::ExportData =
        serde_json::from_str(&text).context("failed to parse export payload")?;

    import_all(
        &payload,
        &stores.logs(),
        &stores.settings(config),
        &stores.actions(),
    )?;
    println!(
        "Imported {} log(s) from export version {}",
        payload.logs.len(),
        payload.version
    );
    Ok(())
}

fn cmd_wipe(stores: &Stores, yes: bool) -> Result<()> {
    if !yes {
        print!("This deletes every log, setting, and action rating. Type 'wipe' to confirm: ");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if answer.trim() != "wipe" {
            println!("Aborted.");
            return Ok(());
        }
    }

    stores.storage.remove_all(keys::ALL)?;
    tracing::warn!("All data wiped");
    println!("All data deleted.");
    Ok(())
}
