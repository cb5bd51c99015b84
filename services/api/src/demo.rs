use crate::infra::{build_manager, ConfiguredStore};
use chrono::{DateTime, Duration, TimeZone, Utc};
use clap::Args;
use interview_insights::aspects::{AspectScoreManager, TimeRange};
use interview_insights::error::AppError;
use interview_insights::scoring::domain::{
    BodyLanguageSignalSummary, Difficulty, SpeechSignalSummary,
};
use interview_insights::scoring::{
    InterviewScoringService, RecordValidator, ScoreRequest, Scorecard, ScoringEngine,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Persist the demo history to this JSON file instead of memory.
    #[arg(long)]
    pub(crate) store: Option<PathBuf>,
    /// Difficulty applied to every demo interview (easy, medium, hard).
    #[arg(long)]
    pub(crate) difficulty: Option<String>,
    /// Print the per-day communication series as well.
    #[arg(long)]
    pub(crate) include_series: bool,
}

/// Candidate progress across three practice sessions, one week apart.
struct DemoSession {
    interview_id: &'static str,
    clarity: f64,
    filler_percentage: f64,
    words_per_minute: f64,
    eye_contact: f64,
    posture: f64,
}

const SESSIONS: [DemoSession; 3] = [
    DemoSession {
        interview_id: "demo-week-1",
        clarity: 48.0,
        filler_percentage: 14.0,
        words_per_minute: 95.0,
        eye_contact: 42.0,
        posture: 55.0,
    },
    DemoSession {
        interview_id: "demo-week-2",
        clarity: 63.0,
        filler_percentage: 8.0,
        words_per_minute: 118.0,
        eye_contact: 58.0,
        posture: 66.0,
    },
    DemoSession {
        interview_id: "demo-week-3",
        clarity: 79.0,
        filler_percentage: 4.0,
        words_per_minute: 142.0,
        eye_contact: 74.0,
        posture: 81.0,
    },
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        store,
        difficulty,
        include_series,
    } = args;

    let difficulty = difficulty
        .as_deref()
        .map(Difficulty::from_label)
        .unwrap_or_default();
    let manager = build_manager(store);
    let service = InterviewScoringService::new(ScoringEngine::default(), manager.clone())
        .with_default_difficulty(difficulty);

    println!("Interview insights demo ({difficulty} difficulty)");
    let start = demo_start()?;
    for (week, session) in SESSIONS.iter().enumerate() {
        let weeks = i64::try_from(week)
            .map_err(|_| AppError::InvalidInput("demo session index overflow".to_string()))?;
        let request = demo_request(session, start + Duration::weeks(weeks));
        let scorecard = service.evaluate(&request);
        render_scorecard(&scorecard);
    }

    let record = service.rescore_record(&demo_record(start)?);
    let validation = RecordValidator.validate(&record);
    println!(
        "\nStored record {} -> overall {:.1} | valid {} | origin {:?}",
        record.id, record.overall_score, validation.is_valid, validation.origin
    );

    render_history(&manager, include_series);
    Ok(())
}

fn demo_start() -> Result<DateTime<Utc>, AppError> {
    Utc.with_ymd_and_hms(2025, 3, 3, 16, 0, 0)
        .single()
        .ok_or_else(|| AppError::InvalidInput("invalid demo start date".to_string()))
}

fn demo_speech(session: &DemoSession) -> SpeechSignalSummary {
    SpeechSignalSummary {
        filler_word_percentage: Some(session.filler_percentage),
        words_per_minute: Some(session.words_per_minute),
        clarity: Some(session.clarity),
        articulation: Some(session.clarity + 2.0),
        fluency: Some(session.clarity - 3.0),
        pronunciation: Some(session.clarity + 4.0),
        confidence: Some(session.clarity - 1.0),
        ..SpeechSignalSummary::default()
    }
}

fn demo_body(session: &DemoSession) -> BodyLanguageSignalSummary {
    BodyLanguageSignalSummary {
        posture_score: Some(session.posture),
        eye_contact_percentage: Some(session.eye_contact),
        eye_contact_score: Some(session.eye_contact),
        gesture_score: Some(session.posture - 5.0),
        facial_confidence: Some(session.eye_contact + 3.0),
        facial_engagement: Some(session.eye_contact + 6.0),
        overall_score: Some(session.posture - 2.0),
        professionalism: Some(session.posture + 4.0),
        ..BodyLanguageSignalSummary::default()
    }
}

fn demo_request(session: &DemoSession, timestamp: DateTime<Utc>) -> ScoreRequest {
    ScoreRequest {
        interview_id: session.interview_id.to_string(),
        timestamp: Some(timestamp),
        difficulty: None,
        duration_seconds: 540.0,
        question_count: 4,
        speech: Some(demo_speech(session)),
        body_language: Some(demo_body(session)),
        record: true,
    }
}

fn demo_record(
    start: DateTime<Utc>,
) -> Result<interview_insights::scoring::InterviewPerformanceRecord, AppError> {
    let session = SESSIONS
        .last()
        .ok_or_else(|| AppError::InvalidInput("no demo sessions defined".to_string()))?;
    Ok(interview_insights::scoring::InterviewPerformanceRecord {
        id: session.interview_id.to_string(),
        role: "Platform Engineer".to_string(),
        difficulty: Difficulty::Medium,
        timestamp: start + Duration::weeks(2),
        duration_seconds: 540.0,
        questions_answered: 4,
        overall_score: 0.0,
        technical_score: 0.0,
        communication_score: 0.0,
        behavioral_score: 0.0,
        speech_analysis: Some(demo_speech(session)),
        body_language_analysis: Some(demo_body(session)),
        strengths: vec!["Concise system design answers".to_string()],
        weaknesses: vec!["Eye contact drops on follow-up questions".to_string()],
        recommendations: vec!["Rehearse STAR stories aloud".to_string()],
    })
}

fn render_scorecard(scorecard: &Scorecard) {
    println!(
        "\n{} -> overall {:.1} ({} quality)",
        scorecard.interview_id,
        scorecard.overall.score,
        scorecard.data_quality.label()
    );
    println!(
        "  technical {:.1} | communication {:.1} | behavioral {:.1}",
        scorecard.technical.score, scorecard.communication.score, scorecard.behavioral.score
    );
    let observations: Vec<&String> = scorecard
        .technical
        .issues
        .iter()
        .chain(&scorecard.communication.issues)
        .chain(&scorecard.behavioral.issues)
        .collect();
    for issue in observations {
        println!("  - {issue}");
    }
}

fn render_history(manager: &AspectScoreManager<ConfiguredStore>, include_series: bool) {
    let stats = manager.statistics();
    println!(
        "\nHistory ({}): {} scores across {} interviews, mean {:.2}",
        manager.store().describe(),
        stats.total_scores,
        stats.total_interviews,
        stats.average_score
    );

    println!("Trends:");
    for history in manager.all_aspect_histories() {
        println!(
            "  - {}: latest {:.1}, avg {:.2}, {}",
            history.aspect_name,
            history.latest_score,
            history.average_score,
            history.trend.label()
        );
    }

    println!("Latest radar:");
    for point in manager.radar_chart(None) {
        println!("  - {}: {}/{}", point.aspect, point.score, point.full_mark);
    }

    println!("Category comparison:");
    for entry in manager.category_comparison() {
        println!(
            "  - {}: {} ({} scores)",
            entry.category, entry.average_score, entry.count
        );
    }

    if include_series {
        let names = vec!["Communication".to_string(), "Behavioral".to_string()];
        println!("Daily series:");
        for row in manager.time_series(&names, TimeRange::All) {
            let cells: Vec<String> = names
                .iter()
                .map(|name| match row.values.get(name).copied().flatten() {
                    Some(value) => format!("{name}={value:.1}"),
                    None => format!("{name}=-"),
                })
                .collect();
            println!("  - {} {}", row.date, cells.join(" "));
        }
    }
}
