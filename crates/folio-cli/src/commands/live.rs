use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

use folio_core::geometry::{ElementId, SimulatedSurface};
use folio_core::time::MonotonicClock;
use folio_core::AppConfig;
use folio_view::{Command, Session, SessionService};

use crate::trace::Trace;

/// Container used when no surface file is given
const DEFAULT_CONTAINER: ElementId = ElementId(1);

/// Read JSON-lines commands from stdin and run them in real time
pub async fn run(config: &AppConfig, surface: Option<&Path>) -> Result<()> {
    let session = match surface {
        Some(path) => Trace::load(path)
            .with_context(|| format!("failed to load surface {}", path.display()))?
            .session(config)?,
        None => {
            let mut surface = SimulatedSurface::new();
            surface.add_element(DEFAULT_CONTAINER, None, None);
            Session::new(config.clone(), DEFAULT_CONTAINER, surface)?
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(64);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let shutdown_tx_clone = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = shutdown_tx_clone.send(true);
    });

    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!("Failed to encode session event: {}", e),
            }
        }
    });

    let service = SessionService::new(session, MonotonicClock::new(), &config.scroll)
        .with_event_sender(event_tx);
    let service = tokio::spawn(service.run(cmd_rx, shutdown_rx));

    let mut stop = shutdown_tx.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = stop.changed() => break,
        };
        let Some(line) = line else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let command = match serde_json::from_str::<Command>(line) {
            Ok(command) => command,
            Err(e) => {
                warn!("Skipping invalid command: {}", e);
                continue;
            }
        };
        if cmd_tx.send(command).await.is_err() {
            // service already stopped
            break;
        }
    }
    drop(cmd_tx);

    let session = service.await?;
    printer.await?;

    println!("{}", serde_json::to_string(&session.snapshot())?);
    Ok(())
}
