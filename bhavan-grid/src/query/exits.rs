//! Exit detection.
//!
//! A Door cell is an exit when, looking along at least one axis direction,
//! nothing but non-Wall, non-Door cells separates it from the grid edge. The
//! ray starts at the neighbor cell, so a door touching the edge still needs a
//! clear neighbor. Exits in one 4-connected group of Door cells (one physical
//! door spans several cells) collapse to the first one found scanning floor,
//! then `x`, then `y`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{CellPos, CellType, GridCoord};
use crate::grid::{BuildingGrid, FloorGrid};

/// A deduplicated exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitCandidate {
    /// Representative Door cell
    pub position: CellPos,
    /// Exit cells merged into this one (including itself)
    pub group_size: usize,
}

/// Finds Door cells with a clear line to the building perimeter.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExitDetector;

const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

impl ExitDetector {
    pub fn new() -> Self {
        Self
    }

    /// Does a straight ray from the Door at `coord` reach the grid edge?
    pub fn is_exit(&self, floor: &FloorGrid, coord: GridCoord) -> bool {
        DIRECTIONS.iter().any(|&(dx, dy)| {
            let mut c = GridCoord::new(coord.x + dx, coord.y + dy);
            while let Some(cell) = floor.get(c) {
                if matches!(cell, CellType::Wall | CellType::Door) {
                    return false;
                }
                if floor.is_edge(c) {
                    return true;
                }
                c = GridCoord::new(c.x + dx, c.y + dy);
            }
            false
        })
    }

    /// Deduplicated exits over every floor.
    pub fn detect(&self, grid: &BuildingGrid) -> Vec<ExitCandidate> {
        let mut exits = Vec::new();
        for (floor_index, floor) in grid.floors().iter().enumerate() {
            exits.extend(self.detect_floor(floor, floor_index));
        }
        log::info!("Found {} exits", exits.len());
        exits
    }

    /// Deduplicated exits on one floor.
    pub fn detect_floor(&self, floor: &FloorGrid, floor_index: usize) -> Vec<ExitCandidate> {
        let labels = label_door_groups(floor);
        let mut group_slot: Vec<Option<usize>> = Vec::new();
        let mut exits: Vec<ExitCandidate> = Vec::new();

        for x in 0..floor.width() as i32 {
            for y in 0..floor.height() as i32 {
                let coord = GridCoord::new(x, y);
                if floor.get(coord) != Some(CellType::Door) || !self.is_exit(floor, coord) {
                    continue;
                }
                let Some(group) = floor.coord_to_index(coord).and_then(|i| labels[i]) else {
                    continue;
                };
                if group >= group_slot.len() {
                    group_slot.resize(group + 1, None);
                }
                match group_slot[group] {
                    Some(slot) => exits[slot].group_size += 1,
                    None => {
                        group_slot[group] = Some(exits.len());
                        exits.push(ExitCandidate {
                            position: coord.on_floor(floor_index),
                            group_size: 1,
                        });
                    }
                }
            }
        }
        exits
    }
}

/// Connected-component labels of 4-connected Door cells (`None` elsewhere).
fn label_door_groups(floor: &FloorGrid) -> Vec<Option<usize>> {
    let mut labels = vec![None; floor.cell_count()];
    let mut next = 0;
    let mut queue = VecDeque::new();

    for (coord, cell) in floor.iter() {
        let Some(i) = floor.coord_to_index(coord) else {
            continue;
        };
        if cell != CellType::Door || labels[i].is_some() {
            continue;
        }
        labels[i] = Some(next);
        queue.push_back(coord);
        while let Some(c) = queue.pop_front() {
            for n in c.neighbors_4() {
                if floor.get(n) != Some(CellType::Door) {
                    continue;
                }
                if let Some(ni) = floor.coord_to_index(n) {
                    if labels[ni].is_none() {
                        labels[ni] = Some(next);
                        queue.push_back(n);
                    }
                }
            }
        }
        next += 1;
    }
    labels
}

/// Convenience wrapper around [`ExitDetector::detect`].
pub fn detect_exits(grid: &BuildingGrid) -> Vec<ExitCandidate> {
    ExitDetector::new().detect(grid)
}
