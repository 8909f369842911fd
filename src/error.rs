use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid move notation: {0}")]
    InvalidMove(String),
    #[error("facelet string must hold 54 facelets with fixed centers")]
    InvalidFaceletString,
    #[error("invalid facelet value: {0}")]
    InvalidFaceletValue(char),

    #[error("cube is already solved")]
    AlreadySolved,
    #[error("cubie carries a color outside the palette")]
    InvalidColor,
    #[error("cubie shows the same color twice")]
    DuplicateColor,
    #[error("cubie colors match no corner or edge")]
    UnknownCubie,
    #[error("two cubies claim the same slot")]
    DuplicateCubie,
    #[error("corner twist is unsolvable")]
    CornerTwist,
    #[error("edge flip is unsolvable")]
    EdgeFlip,
    #[error("corner and edge permutation parities differ")]
    PermutationParity,

    #[error("invalid solver configuration: {0}")]
    Config(String),
    #[error("solve was cancelled")]
    Cancelled,
    #[error("solve timed out after {attempts} generations")]
    Timeout { attempts: u64 },
}

impl Error {
    /// True for every error produced by cube verification.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidColor
                | Error::DuplicateColor
                | Error::UnknownCubie
                | Error::DuplicateCubie
                | Error::CornerTwist
                | Error::EdgeFlip
                | Error::PermutationParity
        )
    }
}
