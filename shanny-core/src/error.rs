use thiserror::Error;

/// Failures surfaced by the actor handles in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("carousel has been unmounted")]
    CarouselClosed,

    #[error("layout monitor has stopped")]
    LayoutClosed,
}

pub type Result<T> = std::result::Result<T, EngineError>;
