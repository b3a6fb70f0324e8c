//! Scroll-position helpers for the header and in-page navigation

/// Viewport-relative bounds of a page section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionRect {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
}

impl SectionRect {
    pub fn new(id: impl Into<String>, top: f64, bottom: f64) -> Self {
        Self {
            id: id.into(),
            top,
            bottom,
        }
    }
}

/// Picks the section currently under the fixed header.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollSpy {
    offset: f64,
}

impl ScrollSpy {
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }

    /// First section, in document order, whose top has passed `offset` and
    /// whose bottom is still on screen.
    pub fn active<'a>(&self, sections: &'a [SectionRect]) -> Option<&'a str> {
        sections
            .iter()
            .find(|s| s.top - self.offset <= 0.0 && s.bottom > 0.0)
            .map(|s| s.id.as_str())
    }
}

/// Whether the header should render its condensed, scrolled style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderScrollState {
    scrolled: bool,
}

impl HeaderScrollState {
    pub const THRESHOLD_PX: f64 = 48.0;

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    /// Feeds the current `scrollY`. Returns `true` when the state flipped.
    pub fn update(&mut self, scroll_y: f64) -> bool {
        let scrolled = scroll_y > Self::THRESHOLD_PX;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }
}
