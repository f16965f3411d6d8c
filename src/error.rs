// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::grid::ConfigurationError;
use crate::tour::{InvalidInput, TourError};
use crate::PathError;

/// Any error reported by a [Warehouse](crate::Warehouse) or a [Registry](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The warehouse layout is malformed.
    #[error("configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// No walkable path exists between two positions.
    #[error("no path: {0}")]
    NoPath(#[from] PathError),

    /// A pick-path request is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// An internal invariant was broken - this is a bug.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// No tour over the requested stops was found.
    #[error("no tour found over {nodes} nodes")]
    NoTour { nodes: usize },

    /// The registry has no warehouse with the provided name or identifier.
    #[error("unknown warehouse: {0}")]
    UnknownWarehouse(String),
}

impl From<TourError> for Error {
    fn from(e: TourError) -> Self {
        match e {
            TourError::InvalidInput(e) => Self::InvalidInput(e),
            TourError::InvariantViolation(msg) => Self::InvariantViolation(msg),
            TourError::NoTour { nodes } => Self::NoTour { nodes },
        }
    }
}
