use super::*;

fn scatter(count: usize, width: f64, height: f64) -> Vec<Point> {
    // Low-discrepancy layout: deterministic without an RNG.
    let golden = 0.618_033_988_749_894_9;
    let mut points = Vec::with_capacity(count);
    let (mut u, mut v) = (0.1, 0.7);
    for _ in 0..count {
        u = (u + golden) % 1.0;
        v = (v + golden * golden) % 1.0;
        points.push(Point::new(u * width, v * height));
    }
    points
}

#[test]
fn empty_and_single_inputs_have_no_pairs() {
    assert!(neighbors_within(&[], 10.0).is_empty());
    assert!(neighbors_within(&[Point::new(1.0, 1.0)], 10.0).is_empty());
}

#[test]
fn non_positive_radius_has_no_pairs() {
    let points = [Point::new(0.0, 0.0), Point::new(0.0, 0.0)];
    assert!(neighbors_within(&points, 0.0).is_empty());
    assert!(neighbors_within(&points, -5.0).is_empty());
}

#[test]
fn threshold_is_strict() {
    let points = [Point::new(0.0, 0.0), Point::new(80.0, 0.0), Point::new(159.0, 0.0)];
    let pairs = neighbors_within(&points, 80.0);
    assert_eq!(pairs.len(), 1);
    assert_eq!((pairs[0].a, pairs[0].b), (1, 2));
}

#[test]
fn pairs_across_cell_borders_are_found() {
    // Straddle the cell boundary at x = 80 and the diagonal neighbour.
    let points = [Point::new(79.0, 79.0), Point::new(81.0, 81.0), Point::new(81.0, 78.0), Point::new(78.0, 81.0)];
    let grid = neighbors_within(&points, 80.0);
    assert_eq!(grid, neighbors_within_brute(&points, 80.0));
    assert_eq!(grid.len(), 6);
}

#[test]
fn negative_coordinates_are_bucketed() {
    let points = [Point::new(-1.0, -1.0), Point::new(1.0, 1.0), Point::new(-79.0, 0.0)];
    assert_eq!(neighbors_within(&points, 80.0), neighbors_within_brute(&points, 80.0));
}

#[test]
fn grid_matches_brute_force_on_dense_field() {
    let points = scatter(300, 1280.0, 720.0);
    let grid = neighbors_within(&points, 80.0);
    let brute = neighbors_within_brute(&points, 80.0);
    assert!(!brute.is_empty());
    assert_eq!(grid, brute);
}

#[test]
fn output_is_sorted_and_indices_ordered() {
    let points = scatter(120, 400.0, 400.0);
    let pairs = neighbors_within(&points, 60.0);
    assert!(pairs.iter().all(|n| n.a < n.b));
    assert!(pairs.windows(2).all(|w| (w[0].a, w[0].b) < (w[1].a, w[1].b)));
}

#[test]
fn result_is_deterministic() {
    let points = scatter(150, 800.0, 600.0);
    assert_eq!(neighbors_within(&points, 80.0), neighbors_within(&points, 80.0));
}
