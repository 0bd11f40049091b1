//! A* search from the head to the food over a board whose body segments
//! open up as the search advances in time.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;
use rand::Rng;

use crate::coords::Coords;
use crate::error::GameError;
use crate::grid::Grid;
use crate::occupant::is_passable;
use crate::state::GameState;

/// Search bookkeeping for one cell, valid only inside a single search.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    g: u32,
    parent: Option<Coords>,
}

/// Frontier entry ordered by `f`, then `h`, then insertion order.
type FrontierKey = Reverse<(u32, u32, u64, Coords)>;

/// Shortest path from the head to the food, head excluded, food included.
///
/// Empty when the food cannot be reached.
pub fn find_path<R: Rng>(state: &GameState<R>) -> Vec<Coords> {
    // Head and food are always on the board.
    find_path_between(state.grid(), state.head(), state.food()).unwrap_or_default()
}

/// Shortest path from `start` to `goal` over `grid`, `start` excluded and
/// `goal` included, in travel order.
///
/// A neighbour is entered only if its occupant is passable at the cost the
/// mover would have on arrival there, so trail cells that will have decayed
/// by then count as free. An unreachable goal yields an empty path.
pub fn find_path_between(grid: &Grid, start: Coords, goal: Coords) -> Result<Vec<Coords>, GameError> {
    let start_index = index(grid, start)?;
    index(grid, goal)?;

    let mut nodes: Vec<Option<SearchNode>> = vec![None; grid.len()];
    let mut closed = vec![false; grid.len()];
    let mut frontier: BinaryHeap<FrontierKey> = BinaryHeap::new();
    let mut seq = 0u64;

    nodes[start_index] = Some(SearchNode { g: 0, parent: None });
    let h = heuristic(start, goal);
    frontier.push(Reverse((h, h, seq, start)));

    while let Some(Reverse((_, _, _, current))) = frontier.pop() {
        let current_index = index(grid, current)?;
        if closed[current_index] {
            continue;
        }
        closed[current_index] = true;

        if current == goal {
            let path = reconstruct(grid, &nodes, goal)?;
            debug!("path {} -> {} of length {}", start, goal, path.len());
            return Ok(path);
        }

        let g = match nodes[current_index] {
            Some(node) => node.g,
            None => continue,
        };
        let arrival = g + 1;

        for neighbor in grid.neighbors_of(current) {
            let neighbor_index = index(grid, neighbor)?;
            if closed[neighbor_index] {
                continue;
            }

            if !is_passable(*grid.cell_at(neighbor)?, arrival) {
                continue;
            }

            let improved = match nodes[neighbor_index] {
                Some(node) => arrival < node.g,
                None => true,
            };
            if !improved {
                continue;
            }

            nodes[neighbor_index] = Some(SearchNode { g: arrival, parent: Some(current) });
            seq += 1;
            let h = heuristic(neighbor, goal);
            frontier.push(Reverse((arrival + h, h, seq, neighbor)));
        }
    }

    debug!("no path {} -> {}", start, goal);
    Ok(Vec::new())
}

fn heuristic(from: Coords, goal: Coords) -> u32 {
    from.manhattan(goal) as u32
}

fn index(grid: &Grid, coords: Coords) -> Result<usize, GameError> {
    grid.index_of(coords).ok_or(GameError::OutOfBounds {
        coords,
        height: grid.height(),
        width: grid.width(),
    })
}

fn reconstruct(grid: &Grid, nodes: &[Option<SearchNode>], goal: Coords) -> Result<Vec<Coords>, GameError> {
    let mut path = Vec::new();
    let mut cursor = goal;

    while let Some(SearchNode { parent: Some(parent), .. }) = nodes[index(grid, cursor)?] {
        path.push(cursor);
        cursor = parent;
    }

    path.reverse();
    Ok(path)
}
