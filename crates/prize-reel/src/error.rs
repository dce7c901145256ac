//! Error types, one enum per failure domain.
//!
//! None of these reach the player: the page-facing wheel degrades silently
//! (logged) and keeps the reveal running. They exist for callers that load
//! data eagerly and want to reject it up front.

use thiserror::Error;

/// A prize list that cannot be drawn from fairly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrizeTableError {
    #[error("prize table is empty")]
    Empty,

    #[error("prize {name:?} has a negative probability")]
    NegativeProbability { name: String },

    #[error("prize probabilities sum to {sum}, expected 100")]
    ProbabilitySum { sum: f64 },
}

/// Why a render surface could not be mounted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("surface has zero size ({width}x{height})")]
    ZeroSize { width: f32, height: f32 },

    #[error("no prizes to build reel strips from")]
    NoPrizes,

    #[error("at least one reel is required")]
    NoReels,

    #[error("{requested} reels requested, animated capacity is {capacity}")]
    TooManyReels { requested: usize, capacity: usize },
}

/// Audio output could not be created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("audio unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid engine config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("competition {competition:?} has an invalid prize table: {source}")]
    Prizes {
        competition: String,
        #[source]
        source: PrizeTableError,
    },

    #[error("duplicate competition id {0:?}")]
    DuplicateId(String),
}
