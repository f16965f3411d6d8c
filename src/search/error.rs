// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Position;

/// Recommended number of allowed node expansions in [find_path](crate::find_path)
/// before [PathError::StepLimitExceeded] is returned.
pub const DEFAULT_STEP_LIMIT: usize = 1_000_000;

/// Error conditions which may occur during [find_path](crate::find_path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The start or end position is not a node of the graph
    /// (it's outside of the grid, or it's not a navigable cell).
    InvalidReference(Position),

    /// The start and end nodes are in disconnected parts of the graph.
    NoPath { from: Position, to: Position },

    /// Path search has exceeded its limit of steps.
    StepLimitExceeded,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReference(pos) => write!(f, "invalid node: {}", pos),
            Self::NoPath { from, to } => write!(f, "no path from {} to {}", from, to),
            Self::StepLimitExceeded => write!(f, "step limit exceeded"),
        }
    }
}

impl std::error::Error for PathError {}
