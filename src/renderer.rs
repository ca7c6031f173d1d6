/// Axonometric drawing of a reconstructed point grid onto a fixed canvas.
///
/// Occlusion is resolved by draw order alone: rows are painted from the
/// highest index down to row 0, columns ascending, and a later write
/// overwrites an earlier one at the same destination pixel. For the default
/// camera geometry this approximates a back-to-front painter's order; a
/// camera with different geometry may occlude incorrectly. There is no
/// depth buffer, and the scan order is part of the output contract.
use image::RgbImage;
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::debug;

use crate::constants::RenderSettings;
use crate::projector::PointGrid;

/// Failures while validating renderer inputs.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(
        "color image is {color_cols}x{color_rows} but the depth grid is \
         {cols}x{rows}; both inputs must describe the same sensor frame"
    )]
    DimensionMismatch {
        color_cols: u32,
        color_rows: u32,
        cols: usize,
        rows: usize,
    },
}

/// Draw every point onto a black canvas using a 30-degree axonometric
/// transform, coloring each destination pixel from the matching source
/// sample. Projections falling outside the canvas are silently discarded.
pub fn render(
    points: &PointGrid,
    colors: &RgbImage,
    settings: &RenderSettings,
) -> Result<RgbImage, RenderError> {
    let rows = points.rows();
    let cols = points.cols();
    if colors.width() as usize != cols || colors.height() as usize != rows {
        return Err(RenderError::DimensionMismatch {
            color_cols: colors.width(),
            color_rows: colors.height(),
            cols,
            rows,
        });
    }

    let width = settings.canvas_width;
    let height = settings.canvas_height;
    debug!(width, height, "drawing axonometry");

    // Zero-initialized buffer, i.e. an all-black canvas.
    let mut canvas = RgbImage::new(width, height);

    let cos_axis = settings.axis_angle.cos();
    let sin_axis = settings.axis_angle.sin();

    let pb = ProgressBar::new(rows as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} rows ({percent}%) {msg}")
            .unwrap()
            .progress_chars("▉▊▋▌▍▎▏ "),
    );
    pb.set_message("Drawing axonometry");

    // Serial scan, far rows first: the overwrite order is semantic.
    for r in (0..rows).rev() {
        for c in 0..cols {
            let p = points.get(r, c);

            let mut x = (p.y - p.x) * cos_axis;
            let mut y = -p.z - (p.x + p.y) * sin_axis;
            x = x * settings.scale + width as f32 / 2.0;
            y = y * settings.scale + height as f32;

            if x >= 0.0 && x < width as f32 && y >= 0.0 && y < height as f32 {
                canvas.put_pixel(x as u32, y as u32, *colors.get_pixel(c as u32, r as u32));
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Axonometry drawn");

    Ok(canvas)
}
