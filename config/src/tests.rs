use crate::constants::*;

// =============================================================================
// WORKING FRAME
// =============================================================================

#[test]
fn test_fitted_region_is_centered_in_frame() {
    let total = WORKING_MARGIN + WORKING_SPAN + WORKING_MARGIN;
    assert!(approx_equal(total, WORKING_FRAME_MAX - WORKING_FRAME_MIN));
}

#[test]
fn test_print_envelope_matches_frame() {
    // Normalized x/y span [XY_MARGIN, XY_MARGIN + DEFAULT_XY_TARGET]
    assert!(approx_equal(XY_MARGIN + DEFAULT_XY_TARGET, WORKING_FRAME_MAX));
}

// =============================================================================
// TESSELLATION
// =============================================================================

#[test]
fn test_height_ratio_is_cube_root_of_three_halved() {
    assert!((TRIANGLE_HEIGHT_RATIO - 3.0_f64.cbrt() / 2.0).abs() < 1e-15);
    // Not the equilateral altitude
    assert!((TRIANGLE_HEIGHT_RATIO - 3.0_f64.sqrt() / 2.0).abs() > 0.1);
}

#[test]
fn test_default_grid_within_limit() {
    let span = WORKING_FRAME_MAX - WORKING_FRAME_MIN;
    let columns = (span / DEFAULT_TRIANGLE_BASE).ceil();
    let rows = (span / (DEFAULT_TRIANGLE_BASE * TRIANGLE_HEIGHT_RATIO)).ceil();
    assert!(2.0 * columns * rows < MAX_TRIANGLES as f64);

    let fine = 0.01;
    let rows = (span / (fine * TRIANGLE_HEIGHT_RATIO)).ceil();
    assert!(2.0 * (span / fine).ceil() * rows > MAX_TRIANGLES as f64);
}

#[test]
fn test_vertex_key_step_below_grid_spacing() {
    assert!(1.0 / VERTEX_KEY_SCALE < EPSILON * 100.0);
}

// =============================================================================
// ELEVATION
// =============================================================================

#[test]
fn test_tile_exceptions_keep_suffix() {
    for (computed, published) in TILE_NAME_EXCEPTIONS {
        assert!(computed.ends_with(TILE_FILE_SUFFIX));
        assert!(published.ends_with(TILE_FILE_SUFFIX));
        assert_ne!(computed, published);
    }
}

#[test]
fn test_idw_floor_below_sample_spacing() {
    // Samples are at least arc-seconds apart, far above the floor
    let arc_second = (1.0_f64 / 3600.0).to_radians();
    assert!(IDW_DISTANCE_FLOOR < arc_second / 10.0);
    assert_eq!(DEFAULT_NEIGHBORS, 1);
}

// =============================================================================
// SURFACE AND EXPORT
// =============================================================================

#[test]
fn test_placeholders_are_distinct() {
    assert!(!approx_equal(INTERIOR_PLACEHOLDER, EXTERIOR_PLACEHOLDER));
    assert!(PEDESTAL_DEPTH_FRACTION > 0.0 && PEDESTAL_DEPTH_FRACTION < 1.0);
}

#[test]
fn test_stl_facet_size_matches_layout() {
    // normal (3 x f32) + 3 vertices (9 x f32) + u16 attribute
    assert_eq!(STL_FACET_SIZE, 12 * 4 + 2);
    assert_eq!(STL_HEADER_SIZE, 80);
}
