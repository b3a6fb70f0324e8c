use std::collections::HashMap;

use parking_lot::RwLock;
use shanny_model::{LayoutDefaults, LayoutOffsets, LayoutTarget};

/// Reads rendered element geometry from the host document.
pub trait LayoutProbe: Send + Sync {
    /// Rendered height in CSS pixels, or `None` when no element matches any
    /// of the target's selectors.
    fn element_height(&self, target: LayoutTarget) -> Option<f64>;
}

impl<F> LayoutProbe for F
where
    F: Fn(LayoutTarget) -> Option<f64> + Send + Sync,
{
    fn element_height(&self, target: LayoutTarget) -> Option<f64> {
        self(target)
    }
}

/// Probe backed by a mutable height table. Hosts that push geometry (rather
/// than answer queries) write into it before signalling a resize.
#[derive(Debug, Default)]
pub struct SharedLayoutProbe {
    heights: RwLock<HashMap<LayoutTarget, f64>>,
}

impl SharedLayoutProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, target: LayoutTarget, height: f64) {
        self.heights.write().insert(target, height);
    }

    pub fn remove(&self, target: LayoutTarget) {
        self.heights.write().remove(&target);
    }
}

impl LayoutProbe for SharedLayoutProbe {
    fn element_height(&self, target: LayoutTarget) -> Option<f64> {
        self.heights.read().get(&target).copied()
    }
}

/// Computes offsets from the current geometry.
///
/// The top offset is the ribbon and navigation heights, each rounded up,
/// summed. Either group falls back to `defaults` when absent or zero.
pub fn measure(probe: &dyn LayoutProbe, defaults: LayoutDefaults) -> LayoutOffsets {
    let ribbon = ceil_px(probe.element_height(LayoutTarget::TopRibbon));
    let nav = ceil_px(probe.element_height(LayoutTarget::Navigation));
    let footer = ceil_px(probe.element_height(LayoutTarget::Footer));

    let top = ribbon.saturating_add(nav);

    LayoutOffsets {
        top_offset_px: if top == 0 { defaults.top_offset_px } else { top },
        footer_height_px: if footer == 0 {
            defaults.footer_height_px
        } else {
            footer
        },
    }
}

fn ceil_px(height: Option<f64>) -> u32 {
    match height {
        Some(h) if h.is_finite() && h > 0.0 => h.ceil().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}
