use thiserror::Error;

use crate::algorithms::threads::WorkItem;
use crate::model::PointId;

/// Errors raised by graph construction, tracing and rendering.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum KolamError {
    #[error("coordinates ({x}, {y}) are not finite or out of range")]
    NonFinite { x: f64, y: f64 },

    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    #[error("point {0} does not exist")]
    UnknownPoint(PointId),

    #[error("edge from point {0} to itself")]
    SelfLoop(PointId),

    #[error("edge at ({x}, {y}) has coincident endpoints")]
    ZeroLengthEdge { x: f64, y: f64 },

    #[error("edge {from}->{to} is not in the graph")]
    MissingEdge { from: PointId, to: PointId },

    #[error("edge {a}-{b} is present more than once")]
    DuplicateEdge { a: PointId, b: PointId },

    #[error("work item {0:?} consumed twice; thread closure invariant violated")]
    Invariant(WorkItem),

    #[error("{what} limit of {max} exceeded")]
    LimitExceeded { what: &'static str, max: usize },

    #[error("invalid knotwork style: {0}")]
    InvalidStyle(&'static str),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Structured error from the text and JSON loaders.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    pub offset: usize,
    pub kind: ParseErrorKind,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseErrorKind {
    #[error("expected {0}")]
    Expected(&'static str),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("missing ' - ' separator between points and edges")]
    MissingSeparator,

    #[error("edge list has an unpaired endpoint")]
    OddEdgeList,

    #[error("edge endpoint {0} is not in the point list")]
    UnknownEndpoint(String),

    #[error("invalid edge: {0}")]
    InvalidEdge(String),

    #[error("input too large")]
    TooLarge,

    #[error("malformed document: {0}")]
    Document(String),
}

impl ParseError {
    pub fn new(offset: usize, kind: ParseErrorKind) -> Self {
        Self { offset, kind }
    }
}
