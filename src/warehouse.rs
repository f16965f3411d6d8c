// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::tour::{self, approximate_tour};
use crate::{assemble, build_graph, find_path, layout, Error, Graph, Grid, Position};

/// Additional controls for planning paths in a [Warehouse].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Max number of node expansions of every single [find_path] call,
    /// see [DEFAULT_STEP_LIMIT](crate::DEFAULT_STEP_LIMIT).
    pub path_step_limit: usize,

    /// How pick tours are planned.
    pub tour: tour::Options,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            path_step_limit: crate::DEFAULT_STEP_LIMIT,
            tour: tour::Options::default(),
        }
    }
}

/// Result of [Warehouse::find_pick_path].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickPath {
    /// The planned tour: the start, every stop in visiting order, and the start again.
    pub stops: Vec<Position>,

    /// Walkable path realizing the tour.
    pub path: Vec<Position>,
}

/// Read-only view of a warehouse's navigation graph, see [Registry::get_graph].
#[derive(Debug, Clone, Copy)]
pub struct GraphSnapshot<'a> {
    /// `(height, width)` of the grid.
    pub dimensions: (usize, usize),
    pub graph: &'a Graph,
}

/// A warehouse floor plan together with its navigation [Graph].
///
/// The graph is built once, on construction; afterwards a warehouse is immutable
/// and may be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Warehouse {
    grid: Grid,
    graph: Graph,
    options: Options,
}

impl Warehouse {
    /// Creates a warehouse with default [Options].
    pub fn new(grid: Grid) -> Result<Self, Error> {
        Self::with_options(grid, Options::default())
    }

    pub fn with_options(grid: Grid, options: Options) -> Result<Self, Error> {
        let graph = build_graph(&grid)?;
        Ok(Self {
            grid,
            graph,
            options,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns `(height, width)` of the grid.
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    /// Finds the shortest walkable path between two navigable cells.
    pub fn find_path(&self, from: Position, to: Position) -> Result<Vec<Position>, Error> {
        Ok(find_path(&self.graph, from, to, self.options.path_step_limit)?)
    }

    /// Plans a round trip from `from` through all `stops` and back,
    /// see [approximate_tour] and [assemble].
    pub fn find_pick_path(&self, from: Position, stops: &[Position]) -> Result<PickPath, Error> {
        let tour = approximate_tour(&self.graph, from, stops, &self.options.tour)?;
        let path = assemble(&self.graph, &tour, self.options.path_step_limit)?;
        Ok(PickPath { stops: tour, path })
    }
}

/// Opaque handle of a [Warehouse] stored in a [Registry].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WarehouseId(usize);

/// Named set of [Warehouses](Warehouse), built once at startup and then
/// shared read-only by all request handlers.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    warehouses: Vec<Warehouse>,
    names: HashMap<String, WarehouseId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in reference layouts:
    /// `simple`, `larger` and `library`.
    pub fn with_reference_layouts() -> Result<Self, Error> {
        let mut r = Self::default();
        r.insert("simple", Warehouse::new(layout::simple_warehouse())?);
        r.insert("larger", Warehouse::new(layout::larger_warehouse())?);
        r.insert("library", Warehouse::new(layout::library_warehouse())?);
        Ok(r)
    }

    /// Adds a warehouse under the provided name. A warehouse previously
    /// registered under the same name becomes unreachable by name,
    /// but its [WarehouseId] stays valid.
    pub fn insert<S: Into<String>>(&mut self, name: S, warehouse: Warehouse) -> WarehouseId {
        let name = name.into();
        let id = WarehouseId(self.warehouses.len());
        log::debug!(
            "registering warehouse {:?} ({}x{}, {} nodes)",
            name,
            warehouse.dimensions().0,
            warehouse.dimensions().1,
            warehouse.graph().len(),
        );
        self.warehouses.push(warehouse);
        self.names.insert(name, id);
        id
    }

    /// Looks up the identifier of a warehouse by its name.
    pub fn id(&self, name: &str) -> Result<WarehouseId, Error> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownWarehouse(name.to_string()))
    }

    pub fn get(&self, id: WarehouseId) -> Result<&Warehouse, Error> {
        self.warehouses
            .get(id.0)
            .ok_or_else(|| Error::UnknownWarehouse(format!("#{}", id.0)))
    }

    /// Returns the names of all registered warehouses, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn get_graph(&self, id: WarehouseId) -> Result<GraphSnapshot<'_>, Error> {
        let w = self.get(id)?;
        Ok(GraphSnapshot {
            dimensions: w.dimensions(),
            graph: w.graph(),
        })
    }

    pub fn find_path(
        &self,
        id: WarehouseId,
        from: Position,
        to: Position,
    ) -> Result<Vec<Position>, Error> {
        self.get(id)?.find_path(from, to)
    }

    pub fn find_pick_path(
        &self,
        id: WarehouseId,
        from: Position,
        stops: &[Position],
    ) -> Result<PickPath, Error> {
        self.get(id)?.find_pick_path(from, stops)
    }
}
