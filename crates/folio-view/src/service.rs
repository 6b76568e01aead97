use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use folio_core::geometry::GeometryProvider;
use folio_core::time::Clock;

use crate::event::{Command, SessionEvent};
use crate::scroll::ScrollConfigExt;
use crate::session::Session;

/// Runs a [`Session`] in real time
///
/// Commands are stamped with the service clock on arrival; a frame interval at the
/// configured animation FPS drives timers and scroll animations between them.
pub struct SessionService<G, C> {
    session: Session<G>,
    clock: C,
    frame_interval: Duration,
    event_tx: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl<G, C> SessionService<G, C>
where
    G: GeometryProvider,
    C: Clock,
{
    pub fn new(session: Session<G>, clock: C, scroll: &folio_core::ScrollConfig) -> Self {
        Self {
            session,
            clock,
            frame_interval: scroll.frame_interval(),
            event_tx: None,
        }
    }

    /// Set the event sender for session notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn send_events(&mut self) {
        let events = self.session.take_events();
        if let Some(ref tx) = self.event_tx {
            for event in events {
                if tx.send(event).is_err() {
                    warn!("Failed to send session event: receiver dropped");
                    break;
                }
            }
        }
    }

    /// Process commands until shutdown or until the command channel closes
    ///
    /// Returns the session so callers can inspect its final state.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Session<G> {
        info!(
            frame_ms = self.frame_interval.as_millis() as u64,
            "Session service started"
        );

        let mut frames = tokio::time::interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Session service received shutdown signal");
                        break;
                    }
                }

                command = commands.recv() => {
                    let Some(command) = command else {
                        debug!("Command channel closed");
                        break;
                    };
                    let now = self.clock.now();
                    let command = match command {
                        Command::Input { mut event } => {
                            event.set_timestamp(now);
                            Command::Input { event }
                        }
                        other => other,
                    };
                    self.session.apply(&command, now);
                    self.send_events();
                }

                _ = frames.tick() => {
                    self.session.advance(self.clock.now());
                    self.send_events();
                }
            }
        }

        // flush anything due at shutdown
        self.session.advance(self.clock.now());
        self.send_events();
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::geometry::{ElementId, SimulatedSurface};
    use folio_core::time::MonotonicClock;
    use folio_core::transition::NavigatorEvent;
    use folio_core::AppConfig;

    fn session() -> Session<SimulatedSurface> {
        let mut surface = SimulatedSurface::new();
        surface.add_element(ElementId(1), None, None);
        Session::new(AppConfig::default(), ElementId(1), surface).unwrap()
    }

    #[tokio::test]
    async fn test_service_shutdown() {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (_cmd_tx, cmd_rx) = mpsc::channel(8);
        let service = SessionService::new(session(), MonotonicClock::new(), &Default::default());

        shutdown_tx.send(true).unwrap();
        let session = service.run(cmd_rx, shutdown_rx).await;
        assert_eq!(session.navigator().current().as_str(), "home");
    }

    #[tokio::test(start_paused = true)]
    async fn test_service_runs_transition_to_completion() {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        let service = SessionService::new(session(), MonotonicClock::new(), &Default::default())
            .with_event_sender(event_tx);
        let handle = tokio::spawn(service.run(cmd_rx, shutdown_rx));

        cmd_tx
            .send(Command::Navigate {
                page: "work".into(),
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        drop(cmd_tx);

        let session = handle.await.unwrap();
        assert!(!session.navigator().is_transitioning());

        let mut events = Vec::new();
        while let Ok(event) = event_rx.try_recv() {
            events.push(event);
        }
        assert_eq!(
            events.last(),
            Some(&SessionEvent::Navigation(NavigatorEvent::TransitionSettled {
                current: "work".into()
            }))
        );
    }
}
