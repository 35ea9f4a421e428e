use image::{imageops::index_colors, DynamicImage, GenericImageView};

use crate::error::Result;
use crate::grid::{Grid, Point};
use crate::palette::MarkerPalette;

/// Reduce an image to one 8-bit palette index per pixel. Every pixel snaps to
/// the nearest [`Marker`](crate::palette::Marker) colour, so dark pixels
/// become obstacles and everything else is walkable.
pub fn parse_img(img: &DynamicImage) -> Result<Grid> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let indexed = index_colors(&img.to_rgb8(), &MarkerPalette);

    Grid::new(height, width, indexed.into_raw())
}

/// Open and decode an image file and reduce it with [`parse_img`].
pub fn load_grid<P: AsRef<std::path::Path>>(path: P) -> Result<Grid> {
    let img = image::open(path)?;
    log::debug!(
        "loaded {}x{} image ({:?})",
        img.width(),
        img.height(),
        img.color()
    );
    parse_img(&img)
}

/// The start and goal used by the mask tooling: one cell inside the top left
/// and the bottom right corner of the border.
pub fn default_endpoints(grid: &Grid) -> (Point, Point) {
    let (rows, columns) = grid.dimensions();
    (
        Point::new(1, 1),
        Point::new(rows.saturating_sub(2), columns.saturating_sub(2)),
    )
}
