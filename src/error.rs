//! Error types for the card renderer

use thiserror::Error;

/// Result type alias for renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while enriching a build record or rendering a card
#[derive(Error, Debug)]
pub enum Error {
    /// Element name absent from the color/icon tables
    #[error("Unknown element: {0}")]
    UnknownElement(String),

    /// Stat name absent from the stat-icon table
    #[error("Unknown stat name: {0}")]
    UnknownStat(String),

    /// Build type absent from the label table
    #[error("Unknown build type: {0}")]
    UnknownBuildType(String),

    /// Character id absent from the character table
    #[error("Unknown character id: {0}")]
    UnknownCharacter(String),

    /// Costume id absent from the character's costume table
    #[error("Unknown costume {costume_id} for character {character_id}")]
    UnknownCostume {
        character_id: String,
        costume_id: String,
    },

    /// Artifact or weapon icon name absent from the icon tables
    #[error("Unknown icon name: {0}")]
    UnknownIcon(String),

    /// Failed to render or composite a panel
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Failed to decode or encode an image asset
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to parse the asset manifest or a build record
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Filesystem error while reading assets or writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
