// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Position;

/// Reasons for rejecting the input of [approximate_tour](super::approximate_tour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("start {0} is not a navigable cell")]
    UnknownStart(Position),

    #[error("stop {0} is not a navigable cell")]
    UnknownStop(Position),

    #[error("stop {0} is requested more than once")]
    DuplicateStop(Position),

    #[error("stop {0} is the same as the start")]
    StopAtStart(Position),
}

/// Error conditions which may occur during [approximate_tour](super::approximate_tour).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TourError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// An internal invariant of the approximation was broken.
    /// This never happens on valid input and indicates a bug.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The circuit search gave up, either because it has tried every candidate
    /// or because it has exceeded its step limit.
    #[error("no tour found over {nodes} nodes")]
    NoTour { nodes: usize },
}
