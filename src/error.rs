use thiserror::Error;

/// Errors that can occur while generating a city.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CityError {
    /// The configuration cannot produce a city.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No cell of the validity grid is buildable, so no site can be selected.
    #[error("no buildable cell to place buildings on")]
    EmptyCandidateSet,
}
