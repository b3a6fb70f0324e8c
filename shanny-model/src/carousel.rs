#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Observable state of a mounted hero carousel.
///
/// `active_index` is the only field driving presentation. It stays within
/// `0..slide_count` and is `0` for an empty deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CarouselState {
    pub active_index: usize,
    pub slide_count: usize,
    pub paused: bool,
    pub reduced_motion: bool,
}

impl CarouselState {
    pub fn new(slide_count: usize, reduced_motion: bool) -> Self {
        Self {
            active_index: 0,
            slide_count,
            paused: false,
            reduced_motion,
        }
    }

    /// Whether auto-rotation is meaningful at all for this deck.
    pub fn can_rotate(&self) -> bool {
        self.slide_count > 1
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.slide_count > 0 && self.active_index == index
    }
}

/// Keys the carousel reacts to. Anything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKey {
    ArrowLeft,
    ArrowRight,
}

impl NavigationKey {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

/// Pointer and focus activity on the carousel region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    PointerEnter,
    PointerLeave,
    FocusIn,
    FocusOut,
}

impl InteractionEvent {
    pub fn pauses(self) -> bool {
        matches!(self, Self::PointerEnter | Self::FocusIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_key_only_maps_arrows() {
        assert_eq!(
            NavigationKey::from_key("ArrowLeft"),
            Some(NavigationKey::ArrowLeft)
        );
        assert_eq!(
            NavigationKey::from_key("ArrowRight"),
            Some(NavigationKey::ArrowRight)
        );
        assert_eq!(NavigationKey::from_key("ArrowUp"), None);
        assert_eq!(NavigationKey::from_key("Enter"), None);
    }

    #[test]
    fn empty_deck_has_no_active_slide() {
        let state = CarouselState::new(0, false);
        assert!(!state.can_rotate());
        assert!(!state.is_active(0));
    }
}
