use super::*;

fn unit_square_ccw() -> Polygon<f64> {
    Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
}

fn unit_square_cw() -> Polygon<f64> {
    Polygon::from_xy(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
}

#[test]
fn winding_of_squares_and_flip() {
    assert_eq!(unit_square_ccw().winding(), Winding::AntiClockwise);
    assert_eq!(unit_square_cw().winding(), Winding::Clockwise);
    let mut p = unit_square_ccw();
    p.flip();
    assert!(p.is_clockwise());
    assert_eq!(Winding::Clockwise.reversed(), Winding::AntiClockwise);
}

#[test]
fn winding_rejects_non_convex_and_degenerate() {
    // Bow-tie (self-intersecting order).
    let bowtie = Polygon::from_xy(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
    assert_eq!(bowtie.winding(), Winding::None);
    // Concave dart.
    let dart = Polygon::from_xy(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.5), (1.0, 2.0)]);
    assert!(!dart.winding().is_valid());
    // Too few vertices.
    assert_eq!(Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0)]).winding(), Winding::None);
    assert_eq!(Polygon::<f64>::default().winding(), Winding::None);
    // All collinear: no turn at all.
    let line = Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
    assert_eq!(line.winding(), Winding::None);
}

#[test]
fn winding_tolerates_forward_collinear_vertex() {
    let p = Polygon::<f64>::from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
    assert_eq!(p.winding(), Winding::AntiClockwise);
    assert!((p.area() - 4.0).abs() < 1e-12);
    // Folding back along the same line invalidates the order.
    let folded = Polygon::from_xy(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    assert_eq!(folded.winding(), Winding::None);
}

#[test]
fn area_and_sentinel() {
    assert!((unit_square_ccw().area() - 1.0).abs() < 1e-12);
    assert!((unit_square_cw().area() - 1.0).abs() < 1e-12);
    let tri = Polygon::<f64>::from_xy(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
    assert!((tri.area() - 6.0).abs() < 1e-12);
    let bowtie = Polygon::from_xy(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
    assert_eq!(bowtie.area(), -1.0);
    assert_eq!(bowtie.try_area(), Err(GeomError::NotConvex));
    assert_eq!(Polygon::from_xy(&[(0.0, 0.0), (0.0, 0.0)]).area(), -1.0);
}

#[test]
fn signed_area_tracks_orientation() {
    assert!((unit_square_ccw().signed_area() - 1.0).abs() < 1e-12);
    assert!((unit_square_cw().signed_area() + 1.0).abs() < 1e-12);
    assert_eq!(Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0)]).signed_area(), 0.0);
}

#[test]
fn area_invariant_under_start_rotation() {
    let hex: Vec<Point<f64>> = (0..6)
        .map(|k| {
            let t = std::f64::consts::TAU * k as f64 / 6.0;
            point(2.0 + t.cos(), -1.0 + 0.5 * t.sin())
        })
        .collect();
    let base = Polygon::new(hex.clone());
    for k in 1..hex.len() {
        let mut rotated = hex.clone();
        rotated.rotate_left(k);
        let p = Polygon::new(rotated);
        assert_eq!(p.winding(), base.winding());
        assert!((p.area() - base.area()).abs() < 1e-12);
    }
}

#[test]
fn sort_recovers_convex_order() {
    let scrambled = Polygon::<f64>::from_xy(&[(1.0, 1.0), (0.0, 0.0), (0.0, 1.0), (1.0, 0.0)]);
    assert_eq!(scrambled.winding(), Winding::None);

    let mut cw = scrambled.clone();
    cw.sort_clockwise();
    assert_eq!(cw.winding(), Winding::Clockwise);
    assert!((cw.area() - 1.0).abs() < 1e-12);

    let mut ccw = scrambled.clone();
    ccw.sort_anticlockwise();
    assert_eq!(ccw.winding(), Winding::AntiClockwise);

    // None leaves the order alone.
    let mut same = scrambled.clone();
    same.sort_in(Winding::None);
    assert_eq!(same, scrambled);
}

#[test]
fn sort_is_idempotent() {
    let mut once = Polygon::from_xy(&[(3.0, 1.0), (0.5, 0.2), (2.0, 2.5), (0.0, 1.5), (2.8, 0.1)]);
    once.sort_clockwise();
    let mut twice = once.clone();
    twice.sort_clockwise();
    assert_eq!(once, twice);
}

#[test]
fn sort_cannot_repair_non_convex_sets() {
    // (1, 0.9) sits inside the triangle of the other three.
    let mut p = Polygon::from_xy(&[(0.0, 0.0), (2.0, 0.0), (1.0, 3.0), (1.0, 0.9)]);
    p.sort_clockwise();
    assert_eq!(p.winding(), Winding::None);
}

#[test]
fn centroid_is_vertex_mean() {
    let c = unit_square_ccw().centroid().unwrap();
    assert!(c.tol_eq(&point(0.5, 0.5)));
    assert!(Polygon::<f64>::default().centroid().is_none());
}

#[test]
fn location_small_polygons() {
    let empty = Polygon::<f64>::default();
    assert_eq!(empty.location(&point(0.0, 0.0)), Location::Outside);

    let single = Polygon::from_xy(&[(1.0, 1.0)]);
    assert_eq!(single.location(&point(1.0, 1.0)), Location::Inside);
    assert_eq!(single.location(&point(1.0, 2.0)), Location::Outside);

    let two = Polygon::from_xy(&[(0.0, 0.0), (2.0, 0.0)]);
    assert_eq!(two.location(&point(1.0, 0.0)), Location::OnEdge);
    assert_eq!(two.location(&point(0.0, 0.0)), Location::Outside);
    assert_eq!(two.location(&point(1.0, 1.0)), Location::Outside);
}

#[test]
fn location_in_square() {
    let sq = unit_square_ccw();
    assert_eq!(sq.location(&point(0.5, 0.5)), Location::Inside);
    assert_eq!(sq.location(&point(0.2, 0.9)), Location::Inside);
    assert_eq!(sq.location(&point(0.5, 0.0)), Location::OnEdge);
    assert_eq!(sq.location(&point(1.0, 0.3)), Location::OnEdge);
    assert_eq!(sq.location(&point(1.0, 1.0)), Location::Inside);
    assert_eq!(sq.location(&point(1.5, 0.5)), Location::Outside);
    assert_eq!(sq.location(&point(-0.1, -0.3)), Location::Outside);
    // Collinear with an edge but beyond it.
    assert_eq!(sq.location(&point(2.0, 0.0)), Location::Outside);
}

#[test]
fn boundary_intersections_in_traversal_order() {
    let sq = unit_square_ccw();
    let horizontal = Segment::new(point(-1.0, 0.5), point(2.0, 0.5));
    let hits = sq.intersections(&horizontal);
    assert_eq!(hits.len(), 2);
    // Edge 1 is the right side (x = 1), edge 3 the left side (x = 0).
    assert!(hits[0].tol_eq(&point(1.0, 0.5)));
    assert!(hits[1].tol_eq(&point(0.0, 0.5)));

    let inside = Segment::new(point(0.2, 0.2), point(0.8, 0.8));
    assert!(sq.intersections(&inside).is_empty());
    let along_edge = Segment::new(point(-1.0, 0.0), point(2.0, 0.0));
    assert!(sq.intersections(&along_edge).is_empty());
}

#[test]
fn edges_are_cyclic() {
    let sq = unit_square_ccw();
    let edges: Vec<_> = sq.edges().collect();
    assert_eq!(edges.len(), 4);
    assert!(edges[3].p2.tol_eq(&sq.vertices()[0]));
    assert_eq!(Polygon::from_xy(&[(1.0, 1.0)]).edges().count(), 1);
    assert!(Polygon::from_xy(&[(1.0, 1.0)]).edge(0).is_degenerate());
}

#[test]
fn single_precision_polygon() {
    let p: Polygon<f32> = Polygon::from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
    assert_eq!(p.winding(), Winding::AntiClockwise);
    assert!((p.area() - 4.0).abs() < 1e-5);
    assert_eq!(p.location(&point(1.0_f32, 1.0)), Location::Inside);
}

#[test]
fn location_ray_through_vertex_is_outside() {
    // From the inner centroid (0.5, 0.5) the ray to (0, 0) runs through the inner
    // corner (0.25, 0.25) without crossing any edge interior.
    let inner = Polygon::from_xy(&[(0.25, 0.25), (0.25, 0.75), (0.75, 0.75), (0.75, 0.25)]);
    assert_eq!(inner.location(&point(0.0, 0.0)), Location::Outside);
    assert_eq!(inner.location(&point(1.0, 1.0)), Location::Outside);
    assert_eq!(inner.location(&point(0.3, 0.3)), Location::Inside);
}

#[test]
fn location_ray_near_vertex_with_rounded_coordinates() {
    // 1.8 and 4.2 are not exact in binary: the ray from (5, 3) to (0, 0) runs
    // through (3, 1.8) only up to rounding.
    let inner = Polygon::from_xy(&[(3.0, 1.8), (7.0, 1.8), (7.0, 4.2), (3.0, 4.2)]);
    for corner in [(0.0, 0.0), (10.0, 0.0), (10.0, 6.0), (0.0, 6.0)] {
        assert_eq!(
            inner.location(&point(corner.0, corner.1)),
            Location::Outside,
            "corner {corner:?}"
        );
    }
    assert_eq!(inner.location(&point(3.5, 2.1)), Location::Inside);
}
