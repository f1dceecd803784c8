//! Interactive planning wizard: upload, goals, then the review loop.

use anyhow::{Context, Result};
use aura_client::PlannerClient;
use aura_core::{EventStore, PlanningSession, SyllabusUpload, WizardStep};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::state;

enum ReviewOutcome {
    Accepted,
    StartOver,
    Quit,
}

pub async fn run_plan(client: PlannerClient, syllabus: PathBuf, out: Option<PathBuf>) -> Result<()> {
    let mut session = PlanningSession::new(client);

    // The committed collection outlives the wizard draft; seed it from disk
    // so accepted events merge with earlier runs.
    let mut store = EventStore::new();
    store.replace_events(state::read_events()?);

    let mut syllabus = Some(syllabus);
    loop {
        if !upload_step(&mut session, syllabus.take()).await? {
            return Ok(());
        }
        if !goals_step(&mut session).await? {
            return Ok(());
        }
        match review_step(&mut session, &mut store, out.as_deref()).await? {
            ReviewOutcome::Accepted | ReviewOutcome::Quit => return Ok(()),
            ReviewOutcome::StartOver => session.reset(),
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

fn read_upload(path: &Path) -> Result<SyllabusUpload> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "syllabus.pdf".to_string());
    Ok(SyllabusUpload { file_name, bytes })
}

/// Returns false when the user gave up instead of reaching the Goals step.
async fn upload_step(
    session: &mut PlanningSession<PlannerClient>,
    initial: Option<PathBuf>,
) -> Result<bool> {
    let mut next = initial;
    loop {
        let path = match next.take() {
            Some(p) => p,
            None => {
                let answer = prompt("Path to syllabus PDF (blank to quit)")?;
                if answer.is_empty() {
                    return Ok(false);
                }
                PathBuf::from(answer)
            }
        };

        match read_upload(&path) {
            Ok(upload) => {
                println!("Parsing syllabus...");
                session.upload_syllabus(upload).await;
            }
            Err(err) => {
                eprintln!("Error: {err:#}");
                continue;
            }
        }

        if session.step() == WizardStep::Goals {
            println!("Found {} fixed events.", session.fixed_schedule().len());
            for item in session.fixed_schedule().iter().take(5) {
                println!(
                    "  {} · {} {}",
                    item.summary,
                    item.date,
                    item.start_time.as_deref().unwrap_or("TBA")
                );
            }
            return Ok(true);
        }
        eprintln!("Error: {}", session.error());
    }
}

/// Returns false when the user gave up instead of reaching the Review step.
async fn goals_step(session: &mut PlanningSession<PlannerClient>) -> Result<bool> {
    loop {
        let goals = prompt("Describe what success looks like for this course (blank to quit)")?;
        if goals.is_empty() {
            return Ok(false);
        }
        session.set_goals_input(goals);
        println!("Analyzing goals and generating a first schedule...");
        session.analyze_goals().await;
        if session.step() == WizardStep::Review {
            return Ok(true);
        }
        eprintln!("Error: {}", session.error());
    }
}

async fn review_step(
    session: &mut PlanningSession<PlannerClient>,
    store: &mut EventStore,
    out: Option<&Path>,
) -> Result<ReviewOutcome> {
    loop {
        print_review(session);
        let choice = prompt(
            "[r]egenerate  [f]eedback  [a]ccept & sync  [d]ownload ics  [s]tart over  [q]uit",
        )?;
        // Feedback, accept, and download need a schedule to act on.
        if !session.has_schedule() && matches!(choice.as_str(), "f" | "a" | "d") {
            println!("No schedule yet. Regenerate to try again.");
            continue;
        }
        match choice.as_str() {
            "r" => {
                println!("Generating schedule...");
                session.regenerate().await;
                report(session);
            }
            "f" => {
                let feedback = prompt("What should change")?;
                session.set_feedback_input(feedback);
                println!("Processing feedback...");
                session.apply_feedback().await;
                report(session);
            }
            "a" => {
                println!("Syncing events to Google Calendar...");
                match session.accept(store).await {
                    Some(result) => {
                        state::write_events(store.events())?;
                        println!(
                            "Success! {} events added to Google Calendar.",
                            result.events_created
                        );
                        println!("Committed calendar now holds {} events.", store.len());
                        return Ok(ReviewOutcome::Accepted);
                    }
                    None => report(session),
                }
            }
            "d" => {
                println!("Creating ICS file...");
                match session.download_ics().await {
                    Some(payload) => {
                        let path = out
                            .map(Path::to_path_buf)
                            .unwrap_or_else(|| PathBuf::from("aura-planner-schedule.ics"));
                        fs::write(&path, payload)
                            .with_context(|| format!("write {}", path.display()))?;
                        println!("Wrote {}", path.display());
                    }
                    None => report(session),
                }
            }
            "s" => return Ok(ReviewOutcome::StartOver),
            "q" => return Ok(ReviewOutcome::Quit),
            other => println!("Unknown choice: {other}"),
        }
    }
}

fn report(session: &PlanningSession<PlannerClient>) {
    if session.error().is_empty() {
        println!("Done.");
    } else {
        eprintln!("Error: {}", session.error());
    }
}

fn print_review(session: &PlanningSession<PlannerClient>) {
    if !session.goals_summary().is_empty() {
        println!("\nGoals summary:\n{}", session.goals_summary());
    }

    println!("\nProposed schedule ({} items):", session.schedule().len());
    for item in session.schedule() {
        let time = match (item.start_time.as_deref(), item.end_time.as_deref()) {
            (Some(s), Some(e)) => format!("{s} - {e}"),
            (Some(s), None) => s.to_string(),
            _ => "-".to_string(),
        };
        println!(
            "  {} {:<12} {:<18} {} [{}]",
            item.date,
            item.day.as_deref().unwrap_or(""),
            time,
            item.task,
            item.category.as_deref().unwrap_or("General")
        );
    }

    if !session.schedule_notes().is_empty() {
        println!("\nPlanner notes:\n{}", session.schedule_notes());
    }
    if let Some(constraints) = session.feedback_constraints() {
        println!("\nActive constraints: {constraints}");
    }
    println!();
}
