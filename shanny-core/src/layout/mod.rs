//! Layout measurement
//!
//! Keeps the fixed header and footer from overlapping page content. The
//! measurement itself is a pure function over a [`LayoutProbe`];
//! [`LayoutMonitor`] re-runs it on window and footer resize signals, at most
//! once per frame, and publishes [`LayoutOffsets`](shanny_model::LayoutOffsets).

pub mod measure;
pub mod monitor;
pub mod scheduler;
pub mod scroll;

pub use measure::{LayoutProbe, SharedLayoutProbe, measure};
pub use monitor::{LayoutHandle, LayoutMonitor, LayoutSignals, WindowEvent};
pub use scheduler::MeasurementScheduler;
pub use scroll::{HeaderScrollState, ScrollSpy, SectionRect};
