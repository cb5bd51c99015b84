use crate::infra::{build_manager, parse_time_range, ConfiguredStore};
use clap::{Args, Subcommand};
use interview_insights::aspects::{
    write_time_series_csv, AspectScoreManager, StoreError, TimeRange,
};
use interview_insights::config::AppConfig;
use interview_insights::error::AppError;
use interview_insights::scoring::{InterviewScoringService, ScoreRequest, ScoringEngine};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the interview signals to score
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Aspect store file used when recording (defaults to APP_ASPECT_STORE)
    #[arg(long)]
    pub(crate) store: Option<PathBuf>,
    /// Append the four headline scores to the aspect history
    #[arg(long)]
    pub(crate) record: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum AspectsCommand {
    /// Print summary statistics and the latest score per aspect
    Stats,
    /// Write the full history as a JSON array
    Export(ExportArgs),
    /// Replace the history with a previously exported JSON array
    Import(ImportArgs),
    /// Print per-day values for the selected aspects
    Timeseries(TimeseriesArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Destination file (prints to stdout when omitted)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// JSON array produced by `aspects export`
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct TimeseriesArgs {
    /// Comma separated aspect names
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) aspects: Vec<String>,
    /// Trailing window: 30, 60, 90 or all
    #[arg(long, default_value = "all", value_parser = parse_time_range)]
    pub(crate) range: TimeRange,
    /// Emit CSV instead of JSON
    #[arg(long)]
    pub(crate) csv: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        store,
        record,
    } = args;

    let config = AppConfig::load()?;
    let raw = fs::read_to_string(&input)?;
    let mut request: ScoreRequest = serde_json::from_str(&raw)?;
    request.record |= record;

    let store_path = if request.record {
        store.or(config.storage.aspect_store_path)
    } else {
        None
    };
    let manager = build_manager(store_path);
    let service = InterviewScoringService::new(ScoringEngine::default(), manager.clone())
        .with_default_difficulty(config.scoring.default_difficulty);

    let scorecard = service.evaluate(&request);
    println!("{}", serde_json::to_string_pretty(&scorecard)?);

    if request.record {
        ensure_persisted(&manager)?;
        println!(
            "Recorded 4 aspect scores for {} in {}",
            scorecard.interview_id,
            manager.store().describe()
        );
    }
    Ok(())
}

pub(crate) fn run_aspects(
    store: Option<PathBuf>,
    command: AspectsCommand,
) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let path = store.or(config.storage.aspect_store_path).ok_or_else(|| {
        AppError::InvalidInput(
            "no aspect store configured; pass --store or set APP_ASPECT_STORE".to_string(),
        )
    })?;
    let manager = build_manager(Some(path));
    // Import replaces the whole log, so an unreadable store is not a blocker.
    if !matches!(command, AspectsCommand::Import(_)) {
        ensure_persisted(&manager)?;
    }

    match command {
        AspectsCommand::Stats => {
            print_statistics(&manager);
            Ok(())
        }
        AspectsCommand::Export(ExportArgs { output }) => {
            let payload = manager.export_scores()?;
            match output {
                Some(path) => {
                    fs::write(&path, payload)?;
                    println!("Exported {} scores to {}", manager.len(), path.display());
                }
                None => println!("{payload}"),
            }
            Ok(())
        }
        AspectsCommand::Import(ImportArgs { input }) => {
            let raw = fs::read_to_string(&input)?;
            let imported = manager.import_scores(&raw)?;
            ensure_persisted(&manager)?;
            println!(
                "Imported {imported} scores into {}",
                manager.store().describe()
            );
            Ok(())
        }
        AspectsCommand::Timeseries(TimeseriesArgs {
            aspects,
            range,
            csv,
        }) => {
            let rows = manager.time_series(&aspects, range);
            if csv {
                write_time_series_csv(&rows, &aspects, std::io::stdout().lock())?;
            } else {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
            Ok(())
        }
    }
}

fn ensure_persisted(manager: &AspectScoreManager<ConfiguredStore>) -> Result<(), AppError> {
    if manager.persistence_degraded() {
        return Err(AppError::Store(StoreError::Unavailable(format!(
            "aspect store {} could not be read or written",
            manager.store().describe()
        ))));
    }
    Ok(())
}

fn print_statistics(manager: &AspectScoreManager<ConfiguredStore>) {
    let stats = manager.statistics();
    println!("Aspect score history ({})", manager.store().describe());
    println!(
        "- {} scores across {} interviews | {} aspects tracked | mean {:.2}",
        stats.total_scores, stats.total_interviews, stats.aspects_tracked, stats.average_score
    );
    if let (Some(best), Some(worst)) = (&stats.best_aspect, &stats.worst_aspect) {
        println!("- Strongest aspect: {best} | weakest aspect: {worst}");
    }

    let histories = manager.all_aspect_histories();
    if histories.is_empty() {
        println!("No scores recorded yet.");
        return;
    }
    println!("Latest scores:");
    for history in histories {
        println!(
            "  - {}: {:.1} (avg {:.2}, {} scores, {})",
            history.aspect_name,
            history.latest_score,
            history.average_score,
            history.scores.len(),
            history.trend.label()
        );
    }
}
