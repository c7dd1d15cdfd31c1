use super::*;
use approx::assert_relative_eq;

fn unit_square() -> Polygon {
    Polygon::new(
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(0.0, 10.0),
            DVec2::new(0.0, 0.0),
        ],
        Vec::new(),
    )
    .unwrap()
}

#[test]
fn test_closed_ring_is_kept_as_is() {
    let square = unit_square();
    assert_eq!(square.exterior().len(), 5);
    assert_eq!(square.vertex_count(), 4);
}

#[test]
fn test_open_ring_is_closed() {
    let tri = Polygon::triangle(
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(0.0, 1.0),
    )
    .unwrap();
    assert_eq!(tri.exterior().len(), 4);
    assert_eq!(tri.exterior()[0], tri.exterior()[3]);
    assert_eq!(tri.open_exterior().len(), 3);
}

#[test]
fn test_too_few_points_rejected() {
    let result = Polygon::new(vec![DVec2::ZERO, DVec2::X], Vec::new());
    assert!(matches!(result, Err(GeometryError::InvalidRing(_))));
}

#[test]
fn test_collinear_duplicates_rejected() {
    let result = Polygon::new(
        vec![DVec2::ZERO, DVec2::X, DVec2::ZERO, DVec2::X],
        Vec::new(),
    );
    assert!(matches!(result, Err(GeometryError::InvalidRing(_))));
}

#[test]
fn test_bounds() {
    let bounds = unit_square().bounds();
    assert_eq!(bounds.min, DVec2::ZERO);
    assert_eq!(bounds.max, DVec2::splat(10.0));
    assert_eq!(bounds.width(), 10.0);
    assert_eq!(bounds.height(), 10.0);
}

#[test]
fn test_area_with_hole() {
    let hole = vec![
        DVec2::new(2.0, 2.0),
        DVec2::new(4.0, 2.0),
        DVec2::new(4.0, 4.0),
        DVec2::new(2.0, 4.0),
    ];
    let square = unit_square();
    let with_hole = Polygon::new(square.exterior().to_vec(), vec![hole]).unwrap();
    assert_relative_eq!(square.area(), 100.0);
    assert_relative_eq!(with_hole.area(), 96.0);
}

#[test]
fn test_contains_interior_and_exterior() {
    let square = unit_square();
    assert!(square.contains(DVec2::new(5.0, 5.0)));
    assert!(!square.contains(DVec2::new(-1.0, -1.0)));
}

#[test]
fn test_contains_excludes_boundary() {
    let square = unit_square();
    assert!(!square.contains(DVec2::new(0.0, 5.0)));
    assert!(!square.contains(DVec2::new(10.0, 10.0)));
}

#[test]
fn test_contains_respects_holes() {
    let hole = vec![
        DVec2::new(2.0, 2.0),
        DVec2::new(4.0, 2.0),
        DVec2::new(4.0, 4.0),
        DVec2::new(2.0, 4.0),
    ];
    let poly = Polygon::new(unit_square().exterior().to_vec(), vec![hole]).unwrap();
    assert!(!poly.contains(DVec2::new(3.0, 3.0)));
    assert!(poly.contains(DVec2::new(6.0, 6.0)));
}

#[test]
fn test_map_keeps_closure() {
    let lifted: Polygon<DVec3> = unit_square().map(|p| p.extend(7.0));
    assert_eq!(lifted.exterior().len(), 5);
    assert_eq!(lifted.exterior()[0], lifted.exterior()[4]);
    assert!(lifted.exterior().iter().all(|p| p.z == 7.0));
}

#[test]
fn test_try_map_propagates_error() {
    let result: Result<Polygon, &str> = unit_square().try_map(|p| {
        if p.x > 5.0 {
            Err("too far")
        } else {
            Ok(*p)
        }
    });
    assert_eq!(result.unwrap_err(), "too far");
}

#[test]
fn test_bounds_from_points() {
    assert!(Bounds::from_points(Vec::new()).is_none());
    let b = Bounds::from_points(vec![DVec2::new(3.0, -1.0), DVec2::new(-2.0, 4.0)]).unwrap();
    assert_eq!(b.min, DVec2::new(-2.0, -1.0));
    assert_eq!(b.max, DVec2::new(3.0, 4.0));
    assert!(b.contains_point(DVec2::ZERO));
    assert!(!b.contains_point(DVec2::new(5.0, 0.0)));
}
