//! # Pathfinding
//!
//! A* search used by monster AI to walk toward a target.

use crate::game::Position;
use ::pathfinding::prelude::astar;

/// Finds the first step of a shortest 8-way path from `start` to `goal`.
///
/// `passable` decides which intermediate tiles may be entered; `goal` itself is
/// always considered reachable so a monster can path onto its target's tile.
/// Returns `None` if no path exists or `start == goal`.
///
/// # Examples
///
/// ```
/// use burrow::{first_step_toward, Position};
///
/// // A one-row corridor leaves a single shortest path.
/// let step = first_step_toward(Position::new(0, 0), Position::new(3, 0), |p| p.y == 0);
/// assert_eq!(step, Some(Position::new(1, 0)));
/// ```
pub fn first_step_toward<F>(start: Position, goal: Position, passable: F) -> Option<Position>
where
    F: Fn(Position) -> bool,
{
    if start == goal {
        return None;
    }

    let (path, _cost) = astar(
        &start,
        |&pos| {
            pos.adjacent_positions()
                .into_iter()
                .filter(|&next| next == goal || passable(next))
                .map(|next| (next, 1))
                .collect::<Vec<_>>()
        },
        |&pos| pos.chebyshev_distance(goal),
        |&pos| pos == goal,
    )?;

    path.get(1).copied()
}
