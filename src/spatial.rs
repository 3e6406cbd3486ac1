//! Uniform-grid neighbour search.
//!
//! Points are bucketed into square cells whose side equals the search
//! radius, so every pair closer than the radius lies in the same or an
//! adjacent cell. The result is identical to the brute-force pair scan.

#[cfg(test)]
#[path = "spatial_test.rs"]
mod spatial_test;

use std::collections::HashMap;

use crate::geom::Point;

/// A pair of point indices `a < b` closer than the search radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

/// Half of the 3×3 neighbourhood; the other half is covered from the
/// opposite cell, so every cell pair is visited once.
const FORWARD_CELLS: [(i64, i64); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// Every pair of `points` strictly closer than `radius`, sorted by `(a, b)`.
#[must_use]
pub fn neighbors_within(points: &[Point], radius: f64) -> Vec<Neighbor> {
    if points.len() < 2 || radius.is_nan() || radius <= 0.0 {
        return Vec::new();
    }

    let mut grid: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, p) in points.iter().enumerate() {
        grid.entry(cell_of(*p, radius)).or_default().push(i);
    }

    let mut out = Vec::new();
    for (&(cx, cy), members) in &grid {
        for (k, &i) in members.iter().enumerate() {
            for &j in &members[k + 1..] {
                push_if_close(points, i, j, radius, &mut out);
            }
        }
        for (dx, dy) in FORWARD_CELLS {
            let Some(others) = grid.get(&(cx + dx, cy + dy)) else {
                continue;
            };
            for &i in members {
                for &j in others {
                    push_if_close(points, i, j, radius, &mut out);
                }
            }
        }
    }

    out.sort_by(|l, r| (l.a, l.b).cmp(&(r.a, r.b)));
    out
}

/// Reference O(N²) scan. Same output contract as [`neighbors_within`].
#[must_use]
pub fn neighbors_within_brute(points: &[Point], radius: f64) -> Vec<Neighbor> {
    let mut out = Vec::new();
    for i in 0..points.len() {
        for j in i + 1..points.len() {
            push_if_close(points, i, j, radius, &mut out);
        }
    }
    out
}

fn push_if_close(points: &[Point], i: usize, j: usize, radius: f64, out: &mut Vec<Neighbor>) {
    let distance = points[i].distance(points[j]);
    if distance < radius {
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        out.push(Neighbor { a, b, distance });
    }
}

#[allow(clippy::cast_possible_truncation)]
fn cell_of(p: Point, size: f64) -> (i64, i64) {
    ((p.x / size).floor() as i64, (p.y / size).floor() as i64)
}
