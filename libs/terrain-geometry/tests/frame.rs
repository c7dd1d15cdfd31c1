use approx::assert_relative_eq;
use glam::DVec2;
use terrain_geometry::grid::generate_triangle_mesh;
use terrain_geometry::persistence::{load_mesh, save_mesh};
use terrain_geometry::wkt::{parse_boundary, parse_region, with_srid};
use terrain_geometry::{CoordinateScaler, Mesh2};

const BOUNDARY: &str = "SRID=4326;MULTIPOLYGON(((-46.8 -23.9,-46.3 -23.9,-46.3 -23.4,-46.8 -23.4,-46.8 -23.9)),((-40 -20,-39 -20,-39 -19,-40 -20)))";

#[test]
fn grid_pulled_back_covers_region_bounds() {
    let boundary = parse_boundary(BOUNDARY).unwrap();
    let mut scaler = CoordinateScaler::new();
    scaler.fit(&boundary).unwrap();

    let grid = generate_triangle_mesh(0.0, 0.0, 20.0, 20.0, 0.5).unwrap();
    let regional = scaler.inverse_transform_mesh(&grid).unwrap();
    assert_eq!(regional.len(), grid.len());

    // The working frame [1, 19] maps onto the boundary's bounding box.
    let b = boundary.bounds();
    let lower = scaler.inverse_transform_point(DVec2::splat(1.0)).unwrap();
    let upper = scaler.inverse_transform_point(DVec2::splat(19.0)).unwrap();
    assert_relative_eq!(lower.x, b.min.x, epsilon = 1e-9);
    assert_relative_eq!(lower.y, b.min.y, epsilon = 1e-9);
    assert_relative_eq!(upper.x, b.max.x, epsilon = 1e-9);
    assert_relative_eq!(upper.y, b.max.y, epsilon = 1e-9);

    // The whole frame is larger than the boundary by one unit of margin per side.
    let rb = regional.bounds().unwrap();
    assert!(rb.min.x < b.min.x && rb.max.x > b.max.x);
    assert!(rb.min.y < b.min.y && rb.max.y > b.max.y);
}

#[test]
fn regional_mesh_survives_disk() {
    let boundary = parse_boundary(BOUNDARY).unwrap();
    let mut scaler = CoordinateScaler::new();
    scaler.fit(&boundary).unwrap();
    let grid = generate_triangle_mesh(0.0, 0.0, 20.0, 20.0, 1.0).unwrap();
    let regional = scaler.inverse_transform_mesh(&grid).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid_10.json");
    save_mesh(&regional, &path).unwrap();
    let loaded: Mesh2 = load_mesh(&path).unwrap();
    assert_eq!(loaded, regional);
}

#[test]
fn boundary_text_round_trips() {
    let region = parse_region(BOUNDARY).unwrap();
    assert_eq!(region.polygon_count(), 2);
    let text = with_srid(Some("4326"), &region.to_wkt());
    assert_eq!(parse_region(&text).unwrap(), region);
}
