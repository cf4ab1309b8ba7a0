use super::*;

fn sz(w: u32, h: u32) -> PixelSize {
    PixelSize::new(w, h)
}

#[test]
fn plan_1000x700_with_400_tiles() {
    let p = plan(sz(1000, 700), sz(400, 400)).unwrap();
    assert_eq!(p.grid, TileGrid { columns: 3, rows: 2 });
    assert_eq!(p.last_tile_size, sz(200, 300));
    assert_eq!(p.tiles_total(), 6);
}

#[test]
fn evenly_divisible_content_keeps_full_last_tile() {
    let p = plan(sz(800, 800), sz(400, 400)).unwrap();
    assert_eq!(p.grid, TileGrid { columns: 2, rows: 2 });
    assert_eq!(p.last_tile_size, sz(400, 400));
}

#[test]
fn content_smaller_than_one_tile_is_a_single_short_tile() {
    let p = plan(sz(150, 90), sz(400, 300)).unwrap();
    assert_eq!(p.grid, TileGrid { columns: 1, rows: 1 });
    assert_eq!(p.last_tile_size, sz(150, 90));
    assert_eq!(p.tile_extent(0, 0), sz(150, 90));
}

#[test]
fn tiles_sum_back_to_content_size() {
    for total in [1u32, 7, 399, 400, 401, 799, 800, 1234] {
        for tile in [1u32, 3, 64, 400] {
            let p = plan(sz(total, total), sz(tile, tile)).unwrap();
            assert_eq!(p.grid.columns, total.div_ceil(tile));
            assert_eq!(
                (p.grid.columns - 1) * tile + p.last_tile_size.width,
                total,
                "total={total} tile={tile}"
            );
            if total % tile == 0 {
                assert_eq!(p.last_tile_size.width, tile);
            } else {
                assert_eq!(p.last_tile_size.width, total % tile);
            }
        }
    }
}

#[test]
fn zero_sizes_are_rejected() {
    assert!(matches!(
        plan(sz(0, 10), sz(4, 4)),
        Err(TilecapError::Precondition(_))
    ));
    assert!(matches!(
        plan(sz(10, 10), sz(4, 0)),
        Err(TilecapError::Precondition(_))
    ));
}

#[test]
fn tile_extent_uses_last_size_only_on_final_index() {
    let p = plan(sz(1000, 700), sz(400, 400)).unwrap();
    assert_eq!(p.tile_extent(0, 0), sz(400, 400));
    assert_eq!(p.tile_extent(2, 0), sz(200, 400));
    assert_eq!(p.tile_extent(1, 1), sz(400, 300));
    assert_eq!(p.tile_extent(2, 1), sz(200, 300));
}

#[test]
fn measure_divides_viewport_by_zoom() {
    let t = ViewTransform::new(Vec2::new(-50.0, 20.0), Vec2::new(0.5, 0.25));
    let viewport = Rect::new(30.0, 40.0, 430.0, 340.0);
    let m = ViewMeasure::of_view(t, viewport).unwrap();
    assert_eq!(m.tile_size, sz(400, 300));
    assert_eq!(m.content_size, sz(800, 1200));
    assert_eq!(m.content_origin, Point::new(100.0, -80.0));
}

#[test]
fn measure_floors_fractional_extents() {
    let t = ViewTransform::new(Vec2::ZERO, Vec2::new(3.0, 3.0));
    let m = ViewMeasure::of_view(t, Rect::new(0.0, 0.0, 100.5, 50.0)).unwrap();
    assert_eq!(m.tile_size, sz(100, 50));
    assert_eq!(m.content_size, sz(33, 16));
}

#[test]
fn measure_rejects_zero_scale() {
    let t = ViewTransform::new(Vec2::ZERO, Vec2::new(0.0, 1.0));
    assert!(ViewMeasure::of_view(t, Rect::new(0.0, 0.0, 10.0, 10.0)).is_err());
}

#[test]
fn tile_position_pans_by_whole_tiles() {
    let m = ViewMeasure {
        content_origin: Point::new(100.0, -80.0),
        content_size: sz(800, 1200),
        tile_size: sz(400, 300),
    };
    assert_eq!(m.tile_position(0, 0), Vec2::new(-100.0, 80.0));
    assert_eq!(m.tile_position(1, 2), Vec2::new(-500.0, -520.0));
}

#[test]
fn cursor_walks_columns_forward_and_rows_backward() {
    let p = plan(sz(1000, 700), sz(400, 400)).unwrap();
    let mut cur = Some(TileCursor::first(&p));
    let mut visited = Vec::new();
    while let Some(c) = cur {
        visited.push((c.column, c.row, c.dest.x, c.dest.y));
        cur = c.advance(&p, p.tile_extent(c.column, c.row));
    }
    assert_eq!(
        visited,
        vec![
            (0, 1, 0, 0),
            (0, 0, 0, 300),
            (1, 1, 400, 0),
            (1, 0, 400, 300),
            (2, 1, 800, 0),
            (2, 0, 800, 300),
        ]
    );
}
