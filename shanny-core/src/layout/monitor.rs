use std::fmt;
use std::future;
use std::sync::Arc;
use std::time::Duration;

use shanny_model::{LayoutDefaults, LayoutOffsets, LayoutTrigger};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::measure::{LayoutProbe, measure};
use super::scheduler::MeasurementScheduler;
use crate::clock::sleep_until_deadline;

/// Window-level events that invalidate the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Load,
    Resize,
    OrientationChange,
}

impl From<WindowEvent> for LayoutTrigger {
    fn from(event: WindowEvent) -> Self {
        match event {
            WindowEvent::Load => LayoutTrigger::Load,
            WindowEvent::Resize => LayoutTrigger::Resize,
            WindowEvent::OrientationChange => LayoutTrigger::OrientationChange,
        }
    }
}

/// Event subscriptions handed to the monitor. The monitor owns them and drops
/// them when it stops.
#[derive(Debug)]
pub struct LayoutSignals {
    pub window: mpsc::Receiver<WindowEvent>,
    /// Footer resize observations. `None` when the host has no resize
    /// observer.
    pub footer_resize: Option<mpsc::Receiver<()>>,
}

impl LayoutSignals {
    /// Creates signal channels, returning the host-side senders alongside.
    pub fn channel(
        buffer: usize,
        observe_footer: bool,
    ) -> (Self, mpsc::Sender<WindowEvent>, Option<mpsc::Sender<()>>) {
        let (window_tx, window_rx) = mpsc::channel(buffer.max(1));
        let (footer_tx, footer_rx) = if observe_footer {
            let (tx, rx) = mpsc::channel(buffer.max(1));
            (Some(tx), Some(rx))
        } else {
            (None, None)
        };
        (
            Self {
                window: window_rx,
                footer_resize: footer_rx,
            },
            window_tx,
            footer_tx,
        )
    }
}

/// Measures header and footer heights whenever the layout may have changed.
pub struct LayoutMonitor {
    probe: Arc<dyn LayoutProbe>,
    defaults: LayoutDefaults,
    frame: Duration,
}

impl LayoutMonitor {
    pub fn new(probe: Arc<dyn LayoutProbe>, defaults: LayoutDefaults) -> Self {
        Self {
            probe,
            defaults,
            frame: MeasurementScheduler::DEFAULT_FRAME,
        }
    }

    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = frame;
        self
    }

    /// Publishes the defaults immediately, schedules the mount measurement and
    /// starts listening on `signals`.
    pub fn spawn(self, signals: LayoutSignals) -> LayoutHandle {
        let (offsets_tx, offsets_rx) =
            watch::channel(LayoutOffsets::from(self.defaults));
        let shutdown = CancellationToken::new();

        let mut scheduler = MeasurementScheduler::new(self.frame);
        scheduler.request(LayoutTrigger::Mount, Instant::now());

        let observing_footer = signals.footer_resize.is_some();
        let worker = LayoutWorker {
            probe: self.probe,
            defaults: self.defaults,
            scheduler,
            window: Some(signals.window),
            footer_resize: signals.footer_resize,
            offsets: offsets_tx,
            shutdown: shutdown.clone(),
        };
        let task = tokio::spawn(worker.run());

        info!(observing_footer, "layout monitor started");

        LayoutHandle {
            offsets: offsets_rx,
            shutdown,
            task: Some(task),
        }
    }
}

impl fmt::Debug for LayoutMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutMonitor")
            .field("defaults", &self.defaults)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

/// Handle to a running [`LayoutMonitor`]. Dropping it stops the monitor.
#[derive(Debug)]
pub struct LayoutHandle {
    offsets: watch::Receiver<LayoutOffsets>,
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl LayoutHandle {
    pub fn offsets(&self) -> LayoutOffsets {
        *self.offsets.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<LayoutOffsets> {
        self.offsets.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops listening, cancels any pending frame and waits for the worker to
    /// release its subscriptions.
    pub async fn shutdown(&mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
        {
            debug!(error = %err, "layout monitor ended abnormally");
        }
    }
}

impl Drop for LayoutHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

struct LayoutWorker {
    probe: Arc<dyn LayoutProbe>,
    defaults: LayoutDefaults,
    scheduler: MeasurementScheduler,
    window: Option<mpsc::Receiver<WindowEvent>>,
    footer_resize: Option<mpsc::Receiver<()>>,
    offsets: watch::Sender<LayoutOffsets>,
    shutdown: CancellationToken,
}

impl LayoutWorker {
    async fn run(mut self) {
        loop {
            let deadline = self.scheduler.deadline();
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => break,

                event = next_signal(&mut self.window) => match event {
                    Some(event) => self.request(event.into()),
                    None => {
                        debug!("window event source closed");
                        self.window = None;
                    }
                },

                observed = next_signal(&mut self.footer_resize) => match observed {
                    Some(()) => self.request(LayoutTrigger::FooterResize),
                    None => {
                        debug!("footer resize observer disconnected");
                        self.footer_resize = None;
                    }
                },

                _ = sleep_until_deadline(deadline) => {
                    if self.scheduler.poll(Instant::now()) {
                        self.remeasure();
                    }
                }
            }
        }

        self.scheduler.cancel();
        info!("layout monitor stopped");
    }

    fn request(&mut self, trigger: LayoutTrigger) {
        if self.scheduler.request(trigger, Instant::now()) {
            debug!(?trigger, "layout measurement scheduled");
        }
    }

    fn remeasure(&self) {
        let next = measure(self.probe.as_ref(), self.defaults);
        self.offsets.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            debug!(
                top_offset_px = next.top_offset_px,
                footer_height_px = next.footer_height_px,
                "layout offsets changed"
            );
            *current = next;
            true
        });
    }
}

async fn next_signal<T>(source: &mut Option<mpsc::Receiver<T>>) -> Option<T> {
    match source {
        Some(rx) => rx.recv().await,
        None => future::pending().await,
    }
}
