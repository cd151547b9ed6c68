//! # Field of View
//!
//! Symmetric shadowcasting. Each of the four quadrants around the origin is
//! scanned row by row, outward; walls split the scanned arc into narrower
//! arcs for the following rows. Floor tiles are lit only when their center
//! lies inside the arc, which makes sight symmetric: if A sees B, B sees A.
//! Walls are lit when any part of them is reached so room edges show up.

use crate::game::{Map, Position};

/// A slope `num / den` with `den > 0`.
#[derive(Debug, Clone, Copy)]
struct Slope {
    num: i32,
    den: i32,
}

impl Slope {
    const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Slope through the left edge of the tile at (`depth`, `col`).
    fn edge(depth: i32, col: i32) -> Self {
        Self::new(2 * col - 1, 2 * depth)
    }
}

#[derive(Debug, Clone, Copy)]
enum Quadrant {
    North,
    East,
    South,
    West,
}

impl Quadrant {
    const ALL: [Quadrant; 4] = [Quadrant::North, Quadrant::East, Quadrant::South, Quadrant::West];

    fn transform(self, origin: Position, depth: i32, col: i32) -> Position {
        match self {
            Quadrant::North => Position::new(origin.x + col, origin.y - depth),
            Quadrant::South => Position::new(origin.x + col, origin.y + depth),
            Quadrant::East => Position::new(origin.x + depth, origin.y + col),
            Quadrant::West => Position::new(origin.x - depth, origin.y + col),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Row {
    depth: i32,
    start: Slope,
    end: Slope,
}

impl Row {
    fn min_col(&self) -> i32 {
        // round half up of depth * start
        floor_div(2 * self.depth * self.start.num + self.start.den, 2 * self.start.den)
    }

    fn max_col(&self) -> i32 {
        // round half down of depth * end
        -floor_div(self.end.den - 2 * self.depth * self.end.num, 2 * self.end.den)
    }

    fn is_symmetric(&self, col: i32) -> bool {
        col * self.start.den >= self.depth * self.start.num && col * self.end.den <= self.depth * self.end.num
    }

    fn next(&self) -> Row {
        Row {
            depth: self.depth + 1,
            ..*self
        }
    }
}

fn floor_div(a: i32, b: i32) -> i32 {
    a.div_euclid(b)
}

/// Computes which positions are visible from `origin` within `radius`.
///
/// `is_blocking` reports opaque tiles; `mark_visible` is called for every lit
/// position, possibly more than once. The origin is always lit.
pub fn shadowcast<B, M>(origin: Position, radius: i32, is_blocking: B, mut mark_visible: M)
where
    B: Fn(Position) -> bool,
    M: FnMut(Position),
{
    mark_visible(origin);
    let radius_squared = radius * radius;
    for quadrant in Quadrant::ALL {
        let first = Row {
            depth: 1,
            start: Slope::new(-1, 1),
            end: Slope::new(1, 1),
        };
        scan(quadrant, origin, radius, radius_squared, first, &is_blocking, &mut mark_visible);
    }
}

fn scan<B, M>(
    quadrant: Quadrant,
    origin: Position,
    radius: i32,
    radius_squared: i32,
    mut row: Row,
    is_blocking: &B,
    mark_visible: &mut M,
) where
    B: Fn(Position) -> bool,
    M: FnMut(Position),
{
    if row.depth > radius {
        return;
    }

    let mut prev_wall: Option<bool> = None;
    for col in row.min_col()..=row.max_col() {
        let pos = quadrant.transform(origin, row.depth, col);
        let wall = is_blocking(pos);

        if (wall || row.is_symmetric(col)) && pos.distance_squared(origin) <= radius_squared {
            mark_visible(pos);
        }
        if prev_wall == Some(true) && !wall {
            row.start = Slope::edge(row.depth, col);
        }
        if prev_wall == Some(false) && wall {
            let mut next = row.next();
            next.end = Slope::edge(row.depth, col);
            scan(quadrant, origin, radius, radius_squared, next, is_blocking, mark_visible);
        }
        prev_wall = Some(wall);
    }

    if prev_wall == Some(false) {
        scan(quadrant, origin, radius, radius_squared, row.next(), is_blocking, mark_visible);
    }
}

/// Recomputes `map.visible` from `origin` and marks every lit tile explored.
///
/// Out-of-bounds positions block sight and are never lit.
pub fn compute_fov(map: &mut Map, origin: Position, radius: i32) {
    map.visible.fill(false);

    let mut lit = Vec::new();
    shadowcast(
        origin,
        radius,
        |pos| !map.is_transparent(pos),
        |pos| lit.push(pos),
    );

    for pos in lit {
        if map.in_bounds(pos) {
            map.visible.set(pos, true);
            map.explored.set(pos, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MapId;

    fn open_room() -> Map {
        Map::from_rows(
            MapId::dungeon(1),
            &[
                "###########",
                "#.........#",
                "#.........#",
                "#.........#",
                "#.........#",
                "#.........#",
                "###########",
            ],
        )
    }

    #[test]
    fn test_origin_and_walls_lit() {
        let mut map = open_room();
        let origin = Position::new(5, 3);
        compute_fov(&mut map, origin, 8);
        assert!(map.is_visible(origin));
        assert!(map.is_visible(Position::new(1, 1)));
        assert!(map.is_visible(Position::new(0, 3)));
        assert!(map.is_visible(Position::new(10, 6)));
    }

    #[test]
    fn test_radius_limits_sight() {
        let mut map = open_room();
        compute_fov(&mut map, Position::new(1, 3), 3);
        assert!(map.is_visible(Position::new(4, 3)));
        assert!(!map.is_visible(Position::new(5, 3)));
    }

    #[test]
    fn test_walls_block_sight() {
        let mut map = Map::from_rows(
            MapId::dungeon(1),
            &[
                "#######",
                "#..#..#",
                "#..#..#",
                "#######",
            ],
        );
        compute_fov(&mut map, Position::new(1, 1), 8);
        assert!(map.is_visible(Position::new(3, 1)));
        assert!(!map.is_visible(Position::new(4, 1)));
        assert!(!map.is_visible(Position::new(5, 2)));
    }

    #[test]
    fn test_explored_persists_after_moving() {
        let mut map = Map::from_rows(
            MapId::dungeon(1),
            &[
                "##########################",
                "#........................#",
                "##########################",
            ],
        );
        compute_fov(&mut map, Position::new(1, 1), 8);
        assert!(map.is_visible(Position::new(5, 1)));

        compute_fov(&mut map, Position::new(24, 1), 8);
        assert!(!map.is_visible(Position::new(5, 1)));
        assert!(map.is_explored(Position::new(5, 1)));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut map = open_room();
        compute_fov(&mut map, Position::new(3, 2), 8);
        let first = map.visible.clone();
        compute_fov(&mut map, Position::new(3, 2), 8);
        assert_eq!(map.visible, first);
    }

    #[test]
    fn test_symmetry_around_pillar() {
        let map = Map::from_rows(
            MapId::dungeon(1),
            &[
                "#########",
                "#.......#",
                "#...#...#",
                "#.......#",
                "#.......#",
                "#########",
            ],
        );
        let floors: Vec<Position> = map
            .tiles
            .positions()
            .filter(|pos| map.is_walkable(*pos))
            .collect();

        let sees = |from: Position, to: Position| {
            let mut seen = false;
            shadowcast(from, 8, |pos| !map.is_transparent(pos), |pos| {
                if pos == to {
                    seen = true;
                }
            });
            seen
        };

        for &a in &floors {
            for &b in &floors {
                assert_eq!(sees(a, b), sees(b, a), "asymmetric sight between {:?} and {:?}", a, b);
            }
        }
    }
}
