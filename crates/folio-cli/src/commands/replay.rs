use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use folio_core::geometry::SimulatedSurface;
use folio_core::gesture::Disposition;
use folio_core::time::{Clock, ManualClock};
use folio_core::transition::RequestOutcome;
use folio_core::AppConfig;
use folio_view::scroll::ScrollConfigExt;
use folio_view::{Applied, Command, SelectOutcome, Session, SessionSnapshot};

use crate::trace::Trace;

pub fn run(config: &AppConfig, path: &Path, json: bool) -> Result<()> {
    let trace = Trace::load(path).with_context(|| format!("failed to load trace {}", path.display()))?;
    let mut session = trace.session(config)?;
    let clock = ManualClock::new();
    let frame = config.scroll.frame_interval();

    info!(steps = trace.steps.len(), "Replaying trace {}", path.display());

    for step in &trace.steps {
        run_frames(&mut session, &clock, step.at, frame);
        clock.set(step.at);

        let command = match &step.command {
            Command::Input { event } => {
                let mut event = event.clone();
                event.set_timestamp(step.at);
                Command::Input { event }
            }
            other => other.clone(),
        };
        let applied = session.apply(&command, clock.now());
        let snapshot = session.snapshot();

        if json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            println!("{:>7}ms  {:<28} {}", step.at.as_millis(), describe(&applied), summarize(&snapshot));
        }
        let events = session.take_events();
        if !json {
            for event in events {
                println!("           event {}", serde_json::to_string(&event)?);
            }
        }
    }

    // let pending transitions and scroll animations finish
    while let Some(deadline) = session.next_deadline() {
        run_frames(&mut session, &clock, deadline, frame);
        clock.set(deadline);
        session.advance(deadline);
    }
    let events = session.take_events();
    let snapshot = session.snapshot();

    if json {
        println!("{}", serde_json::to_string(&snapshot)?);
    } else {
        for event in events {
            println!("           event {}", serde_json::to_string(&event)?);
        }
        println!("{:>7}ms  {:<28} {}", clock.now().as_millis(), "settled", summarize(&snapshot));
    }

    Ok(())
}

/// Step animation frames from the clock's current time up to `until`
fn run_frames(
    session: &mut Session<SimulatedSurface>,
    clock: &ManualClock,
    until: Duration,
    frame: Duration,
) {
    while session.needs_frames() {
        let next = clock.now() + frame;
        if next >= until {
            break;
        }
        clock.set(next);
        session.advance(next);
    }
}

fn describe(applied: &Applied) -> String {
    match applied {
        Applied::Input(outcome) => {
            let disposition = match outcome.disposition {
                Disposition::Consume => "consume",
                Disposition::PassThrough => "pass",
            };
            match (&outcome.intent, &outcome.request) {
                (Some(intent), Some(request)) => {
                    format!("{:?} {} ({})", intent, request_label(request), disposition)
                }
                _ => format!("input ({})", disposition),
            }
        }
        Applied::Scroll(accepted) => {
            if *accepted {
                "scroll".to_string()
            } else {
                "scroll (ignored)".to_string()
            }
        }
        Applied::Select(outcome) => match outcome {
            SelectOutcome::Scrolling { target_offset } => format!("select -> {:.0}px", target_offset),
            SelectOutcome::Pending => "select (waiting for mount)".to_string(),
            SelectOutcome::Abandoned => "select (never mounted)".to_string(),
            SelectOutcome::AlreadyActive => "select (already active)".to_string(),
            SelectOutcome::Unknown => "select (unknown card)".to_string(),
        },
        Applied::Navigate(outcome) => format!("navigate {}", request_label(&outcome.request)),
    }
}

fn request_label(request: &RequestOutcome) -> String {
    match request {
        RequestOutcome::Started { to, .. } => format!("-> {}", to),
        RequestOutcome::Rejected(reason) => format!("rejected: {:?}", reason),
    }
}

fn summarize(snapshot: &SessionSnapshot) -> String {
    let nav = &snapshot.navigation;
    let mut line = match &nav.previous_page {
        Some(previous) => format!("page={} (from {})", nav.current_page, previous),
        None => format!("page={}", nav.current_page),
    };
    line.push_str(&format!(" phase={:?}", nav.phase));
    if let Some(carousel) = &snapshot.carousel {
        line.push_str(&format!(
            " card={}/{} owner={:?}",
            carousel.committed_index, carousel.visual_index, carousel.scroll_owner
        ));
    }
    line
}
