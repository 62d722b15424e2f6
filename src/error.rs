use thiserror::Error;

/// Top-level error type for the SimpleSets kernel.
#[derive(Debug, Error)]
pub enum SimpleSetsError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    NoDrawing(#[from] NoDrawingError),

    #[error("offset of polygon produced holes, which is not supported")]
    OffsetHoled,

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors from parsing point files or project configuration.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("points line {line} has {found} tokens, expected 3 (category x y)")]
    MalformedPointLine { line: usize, found: usize },

    #[error("could not parse number on line {line}: {source}")]
    NumberParse {
        line: usize,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("could not parse category on line {line}: {source}")]
    CategoryParse {
        line: usize,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid project configuration: {0}")]
    Config(String),
}

/// Errors indicating degenerate or malformed geometry.
///
/// These are fatal: they indicate either malformed input or a programming
/// error, and abort the current operation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("circle has zero or negative radius")]
    ZeroRadiusCircle,

    #[error("polyline has fewer than two vertices")]
    DegeneratePolyline,

    #[error("curve endpoints are not incident to their supporting primitive")]
    NonIncidentEndpoints,

    #[error("unhandled tangency while constructing curve: {0}")]
    UnhandledTangency(String),

    #[error("division by zero in constructive geometry routine: {0}")]
    DivisionByZero(&'static str),
}

/// The drawing engine refuses to produce output for the given partition.
#[derive(Debug, Error)]
#[error("points of different categories are within 2*pointSize of each other: {detail}")]
pub struct NoDrawingError {
    pub detail: String,
}

/// Errors from operations that are not geometry-kind-specific.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`SimpleSetsError`].
pub type Result<T> = std::result::Result<T, SimpleSetsError>;
