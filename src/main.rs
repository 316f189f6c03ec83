use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use monarch_progress::adapters::storage::open_key_value_store;
use monarch_progress::application::{ArchiveOutcome, ProgressStore};
use monarch_progress::config::{AppConfig, LogFormat, LoggingConfig};
use monarch_progress::domain::cycle::{Achievement, AchievementFields, AchievementFilter, Cycle};
use monarch_progress::domain::foundation::{AchievementId, AchievementStatus, Stage, Timestamp};

#[derive(Parser)]
#[command(name = "monarch-progress")]
#[command(about = "Track achievements through the Caterpillar, Chrysalis and Butterfly stages")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show progress for the active cycle
    Status,
    /// List achievements of a stage
    List {
        /// Stage to list (defaults to the current stage)
        #[arg(short, long, value_enum)]
        stage: Option<StageArg>,

        #[arg(short, long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
    },
    /// Add an achievement to the current stage
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        details: String,

        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        target_date: Option<NaiveDate>,

        /// Record it as already done
        #[arg(long)]
        done: bool,
    },
    /// Edit an in-progress achievement
    Edit {
        id: AchievementId,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        details: Option<String>,

        /// Target date (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "clear_target_date")]
        target_date: Option<NaiveDate>,

        #[arg(long)]
        clear_target_date: bool,

        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Delete an in-progress achievement
    Delete { id: AchievementId },
    /// Set an achievement's status
    SetStatus {
        id: AchievementId,

        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Flip an achievement between in progress and done
    Toggle { id: AchievementId },
    /// Archive the active cycle if all three stages are complete
    Archive,
    /// Show archived cycles
    History,
    /// Show or complete onboarding
    Onboarding {
        #[arg(long)]
        complete: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StageArg {
    Caterpillar,
    Chrysalis,
    Butterfly,
}

impl From<StageArg> for Stage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Caterpillar => Stage::Caterpillar,
            StageArg::Chrysalis => Stage::Chrysalis,
            StageArg::Butterfly => Stage::Butterfly,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Completed,
    InProgress,
}

impl From<FilterArg> for AchievementFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => AchievementFilter::All,
            FilterArg::Completed => AchievementFilter::Completed,
            FilterArg::InProgress => AchievementFilter::InProgress,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    InProgress,
    Done,
}

impl From<StatusArg> for AchievementStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::InProgress => AchievementStatus::InProgress,
            StatusArg::Done => AchievementStatus::Done,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    init_tracing(&config.logging);

    let mut store = ProgressStore::from_store(open_key_value_store(&config.storage));
    store.load().await.context("Failed to load progress")?;

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => {
            let cycle = active(&store)?;
            print_status(cycle);
        }
        Commands::List { stage, filter } => {
            let cycle = active(&store)?;
            let stage = stage.map(Stage::from).unwrap_or_else(|| cycle.current_stage());
            let list = cycle.achievements_for_display(stage, filter.into());
            println!("{} ({} shown)", stage.title(), list.len());
            for achievement in list {
                print_achievement(achievement);
            }
        }
        Commands::Add {
            title,
            details,
            target_date,
            done,
        } => {
            let status = if done {
                AchievementStatus::Done
            } else {
                AchievementStatus::InProgress
            };
            let fields = AchievementFields::new(title)
                .with_details(details)
                .with_target_date(target_date.map(Timestamp::from_date))
                .with_status(status);
            let cycle = store.add_achievement(fields).await?;
            if let Some(added) = cycle.achievements().last() {
                println!("Added to {}:", added.stage().title());
                print_achievement(added);
            }
        }
        Commands::Edit {
            id,
            title,
            details,
            target_date,
            clear_target_date,
            status,
        } => {
            let existing = active(&store)?
                .achievement(id)
                .with_context(|| format!("Achievement {} not found", id))?;
            let fields = merge_edit(
                existing,
                EditFlags {
                    title,
                    details,
                    target_date,
                    clear_target_date,
                    status: status.map(Into::into),
                },
            );

            let cycle = store.update_achievement(id, fields).await?;
            print_updated(cycle, id);
        }
        Commands::Delete { id } => {
            store.delete_achievement(id).await?;
            println!("Deleted {}", id);
        }
        Commands::SetStatus { id, status } => {
            let cycle = store.set_status(id, status.into()).await?;
            print_updated(cycle, id);
        }
        Commands::Toggle { id } => {
            let cycle = store.toggle_status(id).await?;
            print_updated(cycle, id);
        }
        Commands::Archive => match store.archive_if_completed_and_start_new().await? {
            ArchiveOutcome::StartedFirstCycle => println!("Started your first cycle."),
            ArchiveOutcome::NotCompleted => {
                let cycle = active(&store)?;
                println!(
                    "Cycle not complete yet: {} of 60 done.",
                    cycle.total_done_count()
                );
            }
            ArchiveOutcome::Archived {
                archived_id,
                new_cycle,
            } => {
                println!("Archived cycle {}.", archived_id);
                println!("New cycle {} started.", new_cycle.id());
            }
        },
        Commands::History => {
            let archived = store.archived_cycles();
            if archived.is_empty() {
                println!("No archived cycles.");
            }
            for cycle in archived {
                let archived_on = cycle
                    .archived_at()
                    .map(|t| t.date().to_string())
                    .unwrap_or_default();
                println!(
                    "{}  {} -> {}  {} of 60 done",
                    cycle.id(),
                    cycle.started_at().date(),
                    archived_on,
                    cycle.total_done_count()
                );
            }
        }
        Commands::Onboarding { complete } => {
            if complete {
                store.complete_onboarding().await?;
            }
            let done = store.is_onboarding_completed().await?;
            println!("Onboarding {}", if done { "completed" } else { "pending" });
        }
    }

    Ok(())
}

/// Options given to `edit`. Anything left out keeps its current value.
struct EditFlags {
    title: Option<String>,
    details: Option<String>,
    target_date: Option<NaiveDate>,
    clear_target_date: bool,
    status: Option<AchievementStatus>,
}

fn merge_edit(existing: &Achievement, flags: EditFlags) -> AchievementFields {
    let target = if flags.clear_target_date {
        None
    } else {
        flags
            .target_date
            .map(Timestamp::from_date)
            .or(existing.target_date())
    };
    AchievementFields::new(flags.title.unwrap_or_else(|| existing.title().to_string()))
        .with_details(flags.details.unwrap_or_else(|| existing.details().to_string()))
        .with_target_date(target)
        .with_status(flags.status.unwrap_or(existing.status()))
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so command output stays clean on stdout.
    match config.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn active(store: &ProgressStore) -> anyhow::Result<&Cycle> {
    store.active_cycle().context("No active cycle loaded")
}

fn print_status(cycle: &Cycle) {
    let progress = cycle.progress();
    println!(
        "Cycle {} started {}",
        cycle.id(),
        cycle.started_at().date()
    );
    for stage in progress.stages() {
        let marker = if stage.stage == progress.current_stage() { ">" } else { " " };
        println!(
            "{} {:<12} {:>2}/{} done  ({} added)",
            marker,
            stage.stage.title(),
            stage.done,
            stage.capacity(),
            stage.total
        );
    }
    println!(
        "  {}% complete ({} of {})",
        progress.percent_complete(),
        progress.total_done(),
        progress.total_capacity()
    );
    if progress.is_completed() {
        println!("All stages complete. Run `monarch-progress archive` to start a new cycle.");
    }
}

fn print_achievement(achievement: &Achievement) {
    let check = if achievement.is_done() { "x" } else { " " };
    let target = achievement
        .target_date()
        .map(|t| format!("  (target {})", t.date()))
        .unwrap_or_default();
    println!("[{}] {}  {}{}", check, achievement.id(), achievement.title(), target);
    if !achievement.details().is_empty() {
        println!("      {}", achievement.details());
    }
}

fn print_updated(cycle: &Cycle, id: AchievementId) {
    if let Some(achievement) = cycle.achievement(id) {
        print_achievement(achievement);
    }
}
