#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pixel offsets keeping fixed chrome from overlapping page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LayoutOffsets {
    pub top_offset_px: u32,
    pub footer_height_px: u32,
}

impl LayoutOffsets {
    /// CSS `min-height` expression for the main area.
    pub fn main_min_height(&self) -> String {
        format!(
            "calc(100vh - {}px)",
            self.top_offset_px.saturating_add(self.footer_height_px)
        )
    }
}

impl From<LayoutDefaults> for LayoutOffsets {
    fn from(defaults: LayoutDefaults) -> Self {
        Self {
            top_offset_px: defaults.top_offset_px,
            footer_height_px: defaults.footer_height_px,
        }
    }
}

/// Fallback offsets used before the first successful measurement and
/// whenever a measured element is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LayoutDefaults {
    pub top_offset_px: u32,
    pub footer_height_px: u32,
}

impl LayoutDefaults {
    pub const DEFAULT_TOP_OFFSET_PX: u32 = 88;
    pub const DEFAULT_FOOTER_HEIGHT_PX: u32 = 88;
}

impl Default for LayoutDefaults {
    fn default() -> Self {
        Self {
            top_offset_px: Self::DEFAULT_TOP_OFFSET_PX,
            footer_height_px: Self::DEFAULT_FOOTER_HEIGHT_PX,
        }
    }
}

/// Elements whose rendered height feeds the layout offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutTarget {
    TopRibbon,
    Navigation,
    Footer,
}

impl LayoutTarget {
    /// Selectors tried in order when resolving the element in a document.
    pub fn selectors(self) -> &'static [&'static str] {
        match self {
            Self::TopRibbon => {
                &["[data-top-ribbon]", ".fixed.inset-x-0.top-0.z-50"]
            }
            Self::Navigation => {
                &["nav[aria-label=\"Main navigation\"]", "header nav"]
            }
            Self::Footer => &["[data-site-footer]", "footer"],
        }
    }
}

/// Reasons a layout measurement is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutTrigger {
    Mount,
    Load,
    Resize,
    OrientationChange,
    FooterResize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_header_height() {
        let offsets = LayoutOffsets::from(LayoutDefaults::default());
        assert_eq!(offsets.top_offset_px, 88);
        assert_eq!(offsets.footer_height_px, 88);
        assert_eq!(offsets.main_min_height(), "calc(100vh - 176px)");
    }
}
