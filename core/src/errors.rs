use thiserror::Error;

// Failures the terrain core can report. Both end the current generation
// attempt; a partial height map is never handed out.
#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("height map has no cells")]
    EmptyGrid,
}
