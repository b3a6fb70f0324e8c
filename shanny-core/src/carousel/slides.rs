//! Slide data source for the hero carousel

use std::sync::Arc;

use shanny_model::{ModelResult, Slide, SlideCopy};

/// Copy for the hero slides, in display order.
pub const HERO_SLIDES: [SlideCopy; 3] = [
    SlideCopy {
        id: "slide-1",
        headline: "Build faster. Ship smarter.",
        subhead: "Modern web & cloud products with AI integrations that scale.",
        call_to_action_label: Some("Get a free consultation"),
        call_to_action_target: Some("/contact"),
    },
    SlideCopy {
        id: "slide-2",
        headline: "Make data useful with semantic search",
        subhead: "Turn documents into answers — fast retrieval and helpful assistants.",
        call_to_action_label: Some("Explore AI services"),
        call_to_action_target: Some("/services/ai-integrations"),
    },
    SlideCopy {
        id: "slide-3",
        headline: "Reliable APIs & infrastructure",
        subhead: "Bun + Express, scalable MySQL backends, and observability built-in.",
        call_to_action_label: Some("See our stack"),
        call_to_action_target: Some("/services/cloud-devops"),
    },
];

/// Immutable, ordered sequence of slides.
///
/// Cloning is cheap; the slides are shared behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideDeck {
    slides: Arc<[Slide]>,
}

impl SlideDeck {
    /// Zips slide copy with image locators.
    ///
    /// Images are sorted first. Slide `i` takes image `i`, falling back to the
    /// first image, then to the empty string when no images exist.
    pub fn resolve<I, S>(copy: &[SlideCopy], images: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut images: Vec<String> = images.into_iter().map(Into::into).collect();
        images.sort();

        let slides = copy
            .iter()
            .enumerate()
            .map(|(index, copy)| {
                let image = images
                    .get(index)
                    .or_else(|| images.first())
                    .cloned()
                    .unwrap_or_default();
                Slide::from_copy(copy, image)
            })
            .collect::<ModelResult<Vec<_>>>()?;

        Ok(Self::from_slides(slides))
    }

    /// The built-in hero deck.
    pub fn hero<I, S>(images: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::resolve(&HERO_SLIDES, images)
    }

    pub fn from_slides(slides: Vec<Slide>) -> Self {
        Self {
            slides: slides.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slide> {
        self.slides.iter()
    }

    pub fn as_slice(&self) -> &[Slide] {
        &self.slides
    }
}

impl<'a> IntoIterator for &'a SlideDeck {
    type Item = &'a Slide;
    type IntoIter = std::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_are_sorted_before_assignment() {
        let deck =
            SlideDeck::hero(["/img/c.jpg", "/img/a.jpg", "/img/b.jpg"]).unwrap();
        let images: Vec<_> = deck.iter().map(|s| s.image.as_str()).collect();
        assert_eq!(images, ["/img/a.jpg", "/img/b.jpg", "/img/c.jpg"]);
    }

    #[test]
    fn missing_images_fall_back_to_the_first() {
        let deck = SlideDeck::hero(["/img/only.webp"]).unwrap();
        assert_eq!(deck.len(), 3);
        assert!(deck.iter().all(|s| s.image == "/img/only.webp"));
    }

    #[test]
    fn no_images_yield_empty_locators() {
        let deck = SlideDeck::hero(Vec::<String>::new()).unwrap();
        assert_eq!(deck.len(), 3);
        assert!(deck.iter().all(|s| !s.has_image()));
        assert_eq!(deck.get(0).unwrap().headline, "Build faster. Ship smarter.");
        assert_eq!(
            deck.get(2).unwrap().call_to_action_target.as_deref(),
            Some("/services/cloud-devops")
        );
    }

    #[test]
    fn empty_deck_is_legal() {
        let deck = SlideDeck::empty();
        assert!(deck.is_empty());
        assert!(deck.get(0).is_none());
    }
}
