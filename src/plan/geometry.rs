//! Tile grid planning and view-space to pixel-space measurement.

use crate::foundation::core::{PixelOffset, PixelSize, Point, Rect, Size, Vec2, ViewTransform};
use crate::foundation::error::{TilecapError, TilecapResult};

/// Number of tiles along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TileGrid {
    /// Tiles along x.
    pub columns: u32,
    /// Tiles along y.
    pub rows: u32,
}

/// How a content area splits into capture tiles.
///
/// Invariant: `tile_size * (count - 1) + last_tile_size == content_size` on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TilePlan {
    /// Full destination size.
    pub content_size: PixelSize,
    /// Tile counts.
    pub grid: TileGrid,
    /// Size of every tile except the final one on each axis.
    pub tile_size: PixelSize,
    /// Size of the final tile on each axis.
    pub last_tile_size: PixelSize,
}

impl TilePlan {
    /// Total number of tiles in the grid.
    pub fn tiles_total(&self) -> u64 {
        u64::from(self.grid.columns) * u64::from(self.grid.rows)
    }

    /// Pixel extent of tile `(column, row)`.
    pub fn tile_extent(&self, column: u32, row: u32) -> PixelSize {
        PixelSize {
            width: if column + 1 == self.grid.columns {
                self.last_tile_size.width
            } else {
                self.tile_size.width
            },
            height: if row + 1 == self.grid.rows {
                self.last_tile_size.height
            } else {
                self.tile_size.height
            },
        }
    }
}

/// Split `content_size` into tiles of `tile_size`.
///
/// Zero on any axis of either size is a precondition violation.
#[tracing::instrument]
pub fn plan(content_size: PixelSize, tile_size: PixelSize) -> TilecapResult<TilePlan> {
    if content_size.is_empty() {
        tracing::error!(%content_size, "content size must be positive on both axes");
        return Err(TilecapError::precondition(format!(
            "content size {content_size} must be positive on both axes"
        )));
    }
    if tile_size.is_empty() {
        tracing::error!(%tile_size, "tile size must be positive on both axes");
        return Err(TilecapError::precondition(format!(
            "tile size {tile_size} must be positive on both axes"
        )));
    }

    fn last(total: u32, tile: u32) -> u32 {
        match total % tile {
            0 => tile,
            rem => rem,
        }
    }

    Ok(TilePlan {
        content_size,
        grid: TileGrid {
            columns: content_size.width.div_ceil(tile_size.width),
            rows: content_size.height.div_ceil(tile_size.height),
        },
        tile_size,
        last_tile_size: PixelSize {
            width: last(content_size.width, tile_size.width),
            height: last(content_size.height, tile_size.height),
        },
    })
}

/// What a view shows, measured once before its scale is touched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewMeasure {
    /// Content-space point under the viewport's top-left corner.
    pub content_origin: Point,
    /// Visible content, in pixels at 1x scale.
    pub content_size: PixelSize,
    /// Whole on-screen pixels of the viewport; one tile per viewport.
    pub tile_size: PixelSize,
}

impl ViewMeasure {
    /// Measure the content visible through `viewport` under `transform`.
    ///
    /// Both viewport corners go through the inverse transform; the floored absolute difference
    /// is the content size at 1x.
    pub fn of_view(transform: ViewTransform, viewport: Rect) -> TilecapResult<Self> {
        let viewport_size = viewport.size();
        let top_left = transform.screen_to_content(Point::ORIGIN)?;
        let bottom_right =
            transform.screen_to_content(Point::new(viewport_size.width, viewport_size.height))?;
        let extent = bottom_right - top_left;

        Ok(Self {
            content_origin: top_left,
            content_size: PixelSize::floor_from(Size::new(extent.x.abs(), extent.y.abs()))?,
            tile_size: PixelSize::floor_from(viewport_size)?,
        })
    }

    /// View position (at 1x) that puts tile `(column, row)` at the viewport's top-left corner.
    pub fn tile_position(&self, column: u32, row: u32) -> Vec2 {
        -self.content_origin.to_vec2()
            - Vec2::new(
                f64::from(column) * f64::from(self.tile_size.width),
                f64::from(row) * f64::from(self.tile_size.height),
            )
    }
}

/// Where the next tile lands in the destination.
///
/// Columns advance left to right; within a column rows are visited last-to-first and the
/// vertical offset grows from zero, so the destination fills bottom row first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TileCursor {
    pub(crate) column: u32,
    pub(crate) row: u32,
    pub(crate) dest: PixelOffset,
}

impl TileCursor {
    pub(crate) fn first(plan: &TilePlan) -> Self {
        Self {
            column: 0,
            row: plan.grid.rows - 1,
            dest: PixelOffset::default(),
        }
    }

    /// Step past a tile of `extent`; `None` after the last tile.
    pub(crate) fn advance(self, plan: &TilePlan, extent: PixelSize) -> Option<Self> {
        if self.row > 0 {
            return Some(Self {
                row: self.row - 1,
                dest: PixelOffset::new(self.dest.x, self.dest.y + i64::from(extent.height)),
                ..self
            });
        }
        if self.column + 1 < plan.grid.columns {
            return Some(Self {
                column: self.column + 1,
                row: plan.grid.rows - 1,
                dest: PixelOffset::new(self.dest.x + i64::from(extent.width), 0),
            });
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/geometry.rs"]
mod tests;
