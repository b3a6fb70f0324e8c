//! Actor that owns a mounted carousel
//!
//! Timer deadlines, user commands and motion-preference changes are all
//! handled by one task, so they apply in arrival order and never race.

use shanny_model::{CarouselState, InteractionEvent, NavigationKey};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::controller::CarouselController;
use super::motion::ReducedMotionDetector;
use super::slides::SlideDeck;
use super::types::CarouselSettings;
use crate::clock::sleep_until_deadline;
use crate::error::{EngineError, Result};

/// User-initiated operations accepted by a mounted carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselCommand {
    Next,
    Prev,
    GoTo(usize),
    Pause,
    Resume,
    Key(NavigationKey),
    Interaction(InteractionEvent),
}

#[derive(Debug)]
struct Envelope {
    command: CarouselCommand,
    reply: oneshot::Sender<CarouselState>,
}

/// Handle to a mounted carousel.
///
/// Dropping the handle cancels the runtime task. Prefer [`unmount`] when the
/// caller needs to know the timer is gone.
///
/// [`unmount`]: CarouselHandle::unmount
#[derive(Debug)]
pub struct CarouselHandle {
    commands: mpsc::Sender<Envelope>,
    state: watch::Receiver<CarouselState>,
    deck: SlideDeck,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl CarouselHandle {
    /// Mounts `deck` and spawns its runtime on the current tokio runtime.
    pub fn mount(
        deck: SlideDeck,
        settings: CarouselSettings,
        detector: ReducedMotionDetector,
    ) -> Self {
        let mut controller = CarouselController::new(
            deck.clone(),
            &settings,
            detector.prefers_reduced_motion(),
        );
        controller.mount(Instant::now());

        let (state_tx, state_rx) = watch::channel(controller.state());
        let (command_tx, command_rx) =
            mpsc::channel(settings.command_buffer.max(1));
        let shutdown = CancellationToken::new();

        let runtime = CarouselRuntime {
            controller,
            detector,
            commands: command_rx,
            state: state_tx,
            shutdown: shutdown.clone(),
        };
        let task = tokio::spawn(runtime.run());

        info!(
            slide_count = deck.len(),
            interval_ms = settings.interval.as_millis() as u64,
            "hero carousel mounted"
        );

        Self {
            commands: command_tx,
            state: state_rx,
            deck,
            shutdown,
            task: Some(task),
        }
    }

    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    /// Latest published state.
    pub fn state(&self) -> CarouselState {
        *self.state.borrow()
    }

    /// Receiver notified on every state change. Once the carousel is
    /// unmounted, `changed()` and `has_changed()` return errors.
    pub fn subscribe(&self) -> watch::Receiver<CarouselState> {
        self.state.clone()
    }

    pub async fn next(&self) -> Result<CarouselState> {
        self.send(CarouselCommand::Next).await
    }

    pub async fn prev(&self) -> Result<CarouselState> {
        self.send(CarouselCommand::Prev).await
    }

    pub async fn go_to(&self, index: usize) -> Result<CarouselState> {
        self.send(CarouselCommand::GoTo(index)).await
    }

    pub async fn pause(&self) -> Result<CarouselState> {
        self.send(CarouselCommand::Pause).await
    }

    pub async fn resume(&self) -> Result<CarouselState> {
        self.send(CarouselCommand::Resume).await
    }

    /// Forwards a `KeyboardEvent.key` value. Keys other than the arrows are
    /// ignored without a round-trip.
    pub async fn key(&self, key: &str) -> Result<CarouselState> {
        match NavigationKey::from_key(key) {
            Some(key) => self.send(CarouselCommand::Key(key)).await,
            None if self.is_mounted() => Ok(self.state()),
            None => Err(EngineError::CarouselClosed),
        }
    }

    pub async fn interaction(
        &self,
        event: InteractionEvent,
    ) -> Result<CarouselState> {
        self.send(CarouselCommand::Interaction(event)).await
    }

    pub async fn send(&self, command: CarouselCommand) -> Result<CarouselState> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Envelope { command, reply })
            .await
            .map_err(|_| EngineError::CarouselClosed)?;
        response.await.map_err(|_| EngineError::CarouselClosed)
    }

    pub fn is_mounted(&self) -> bool {
        !self.shutdown.is_cancelled() && !self.commands.is_closed()
    }

    /// Stops the runtime and waits until its timer has been released.
    /// Subsequent commands fail with [`EngineError::CarouselClosed`].
    pub async fn unmount(&mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
        {
            debug!(error = %err, "carousel runtime ended abnormally");
        }
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[derive(Debug)]
struct CarouselRuntime {
    controller: CarouselController,
    detector: ReducedMotionDetector,
    commands: mpsc::Receiver<Envelope>,
    state: watch::Sender<CarouselState>,
    shutdown: CancellationToken,
}

impl CarouselRuntime {
    async fn run(mut self) {
        loop {
            let deadline = self.controller.next_deadline();
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => break,

                envelope = self.commands.recv() => {
                    let Some(Envelope { command, reply }) = envelope else {
                        break;
                    };
                    self.apply(command, Instant::now());
                    self.publish();
                    let _ = reply.send(self.controller.state());
                }

                reduced_motion = self.detector.changed() => {
                    self.controller.set_reduced_motion(reduced_motion, Instant::now());
                    self.publish();
                }

                _ = sleep_until_deadline(deadline) => {
                    if self.controller.on_tick(Instant::now()) {
                        self.publish();
                    }
                }
            }
        }

        self.controller.teardown();
        info!("hero carousel unmounted");
    }

    fn apply(&mut self, command: CarouselCommand, now: Instant) {
        let controller = &mut self.controller;
        match command {
            CarouselCommand::Next => controller.next(now),
            CarouselCommand::Prev => controller.prev(now),
            CarouselCommand::GoTo(index) => controller.go_to(index, now),
            CarouselCommand::Pause => controller.pause(),
            CarouselCommand::Resume => controller.resume(),
            CarouselCommand::Key(key) => controller.handle_key(key, now),
            CarouselCommand::Interaction(event) => {
                controller.handle_interaction(event)
            }
        };
    }

    fn publish(&self) {
        let next = self.controller.state();
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}
