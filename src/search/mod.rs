// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod astar;
mod error;

pub use astar::find_path;
pub use error::{PathError, DEFAULT_STEP_LIMIT};
