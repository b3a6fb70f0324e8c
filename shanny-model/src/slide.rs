use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Opaque, stable identifier of a hero slide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SlideId(String);

impl SlideId {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ModelError::InvalidSlideId(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static copy for a slide before an image has been assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideCopy {
    pub id: &'static str,
    pub headline: &'static str,
    pub subhead: &'static str,
    pub call_to_action_label: Option<&'static str>,
    pub call_to_action_target: Option<&'static str>,
}

/// A fully resolved hero slide. Immutable once the deck is built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Slide {
    pub id: SlideId,
    pub headline: String,
    pub subhead: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub call_to_action_label: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub call_to_action_target: Option<String>,
    /// Resource locator of the background image; empty when no asset exists.
    pub image: String,
}

impl Slide {
    pub fn from_copy(copy: &SlideCopy, image: impl Into<String>) -> Result<Self> {
        Ok(Self {
            id: SlideId::new(copy.id)?,
            headline: copy.headline.to_string(),
            subhead: copy.subhead.to_string(),
            call_to_action_label: copy.call_to_action_label.map(str::to_string),
            call_to_action_target: copy
                .call_to_action_target
                .map(str::to_string),
            image: image.into(),
        })
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_id_rejects_blank_values() {
        assert!(SlideId::new("slide-1").is_ok());
        assert_eq!(
            SlideId::new("   "),
            Err(ModelError::InvalidSlideId("   ".to_string()))
        );
    }

    #[test]
    fn from_copy_keeps_optional_call_to_action() {
        let copy = SlideCopy {
            id: "slide-1",
            headline: "Build faster",
            subhead: "Ship smarter",
            call_to_action_label: None,
            call_to_action_target: Some("/contact"),
        };
        let slide = Slide::from_copy(&copy, "").unwrap();
        assert_eq!(slide.id.as_str(), "slide-1");
        assert_eq!(slide.call_to_action_label, None);
        assert_eq!(slide.call_to_action_target.as_deref(), Some("/contact"));
        assert!(!slide.has_image());
    }
}
