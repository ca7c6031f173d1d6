/// Spherical reconstruction of 3D points from perpendicular depth samples.
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use tracing::debug;

use crate::constants::CameraModel;
use crate::depth_map::DepthGrid;

/// 3D point in metric camera-frame coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Grid of reconstructed points with the same shape as the source depth grid.
pub struct PointGrid {
    rows: usize,
    cols: usize,
    points: Vec<Point3>,
}

impl PointGrid {
    /// Build a grid from raw points, mainly for tests.
    pub fn from_points(rows: usize, cols: usize, points: Vec<Point3>) -> Self {
        assert!(rows >= 1 && cols >= 1, "point grid must be at least 1x1");
        assert_eq!(
            points.len(),
            rows * cols,
            "point buffer does not match dimensions"
        );
        Self { rows, cols, points }
    }

    /// Number of point rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of point columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bounds-checked point access.
    pub fn get(&self, row: usize, col: usize) -> Point3 {
        assert!(
            row < self.rows && col < self.cols,
            "point index ({row}, {col}) out of {}x{} grid",
            self.rows,
            self.cols
        );
        self.points[row * self.cols + col]
    }
}

/// Convert spherical coordinates to Cartesian, physics convention.
fn spherical_to_cartesian(radius: f32, teta: f32, fi: f32) -> Point3 {
    Point3 {
        x: radius * teta.sin() * fi.cos(),
        y: radius * teta.sin() * fi.sin(),
        z: radius * teta.cos(),
    }
}

/// Symmetric per-index angle table around `base`.
///
/// Indices sweep away from the grid center; a half-pixel offset keeps the
/// sweep centered when the index count is even, and the middle index of an
/// odd count sits exactly on `base`.
fn angle_table(len: usize, base: f32, dist_to_camera: f32) -> Vec<f32> {
    let center = (len + 1) / 2;
    let half_pixel = if len % 2 == 0 { 0.5 } else { 0.0 };

    let mut angles = vec![base; len];
    for i in 0..len / 2 {
        let offset = (center - 1 - i) as f32 + half_pixel;
        let angle = offset.atan2(dist_to_camera);
        angles[i] = base - angle;
        angles[len - 1 - i] = base + angle;
    }
    angles
}

/// Reconstruct a 3D point per depth sample.
///
/// Each stored sample is the perpendicular distance from the camera plane,
/// not the radial distance along the viewing ray, so samples away from the
/// image center are inflated by the obliquity of their ray before the
/// spherical-to-Cartesian conversion. Rows sweep the polar angle around
/// pi/2 and columns sweep the azimuth around pi/4, both derived from a
/// single focal distance computed from the horizontal field of view.
///
/// Pure per-pixel transformation; rows are processed in parallel.
pub fn project(depth: &DepthGrid, camera: &CameraModel) -> PointGrid {
    let rows = depth.rows();
    let cols = depth.cols();

    let center_width = (cols + 1) / 2;
    let dist_to_camera = center_width as f32 / (camera.fov_horizontal() / 2.0).tan();
    debug!(rows, cols, dist_to_camera, "reconstructing point grid");

    let teta = angle_table(rows, FRAC_PI_2, dist_to_camera);
    let fi = angle_table(cols, FRAC_PI_4, dist_to_camera);

    // Pixel-space offsets from the true image center, used for the
    // oblique-ray length correction.
    let center_row = (rows as f32 - 1.0) / 2.0;
    let center_col = (cols as f32 - 1.0) / 2.0;

    let pb = ProgressBar::new(rows as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.green/blue}] {pos}/{len} rows ({percent}%) {msg}")
            .unwrap()
            .progress_chars("▉▊▋▌▍▎▏ "),
    );
    pb.set_message("Reconstructing points");

    let mut points = vec![Point3::default(); rows * cols];
    points
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(r, row_points)| {
            let row_offset = r as f32 - center_row;
            for (c, point) in row_points.iter_mut().enumerate() {
                let col_offset = c as f32 - center_col;
                let pixel_radius = (row_offset * row_offset + col_offset * col_offset).sqrt();
                let radial_length =
                    f32::from(depth.get(r, c)) / pixel_radius.atan2(dist_to_camera).cos();
                *point = spherical_to_cartesian(radial_length, teta[r], fi[c]);
            }
            pb.inc(1);
        });
    pb.finish_with_message("Points reconstructed");

    PointGrid { rows, cols, points }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-2;

    fn uniform_grid(rows: usize, cols: usize, value: u16) -> DepthGrid {
        DepthGrid::from_samples(rows, cols, vec![value; rows * cols])
    }

    fn norm(p: Point3) -> f32 {
        (p.x * p.x + p.y * p.y + p.z * p.z).sqrt()
    }

    #[test]
    fn center_pixel_sits_on_the_optical_axis() {
        let depth = uniform_grid(5, 5, 1000);
        let points = project(&depth, &CameraModel::default());

        // teta = pi/2 and fi = pi/4 at the center: z vanishes, x equals y,
        // and the ray is not inflated, so the norm is the stored depth.
        let center = points.get(2, 2);
        assert!(center.z.abs() < TOLERANCE);
        assert!((center.x - center.y).abs() < TOLERANCE);
        assert!((norm(center) - 1000.0).abs() < 0.1);
    }

    #[test]
    fn single_pixel_grid_projects_along_the_axis() {
        let depth = uniform_grid(1, 1, 500);
        let points = project(&depth, &CameraModel::default());

        let p = points.get(0, 0);
        assert!(p.z.abs() < TOLERANCE);
        assert!((norm(p) - 500.0).abs() < 0.1);
    }

    #[test]
    fn columns_mirror_across_the_vertical_center_line() {
        for cols in [4usize, 5] {
            let depth = uniform_grid(3, cols, 1200);
            let points = project(&depth, &CameraModel::default());

            for r in 0..3 {
                for c in 0..cols {
                    let left = points.get(r, c);
                    let right = points.get(r, cols - 1 - c);

                    // The azimuth mirrors around pi/4, which swaps the x and
                    // y components and flips the sign of their difference.
                    assert!((left.x - right.y).abs() < TOLERANCE);
                    assert!((left.y - right.x).abs() < TOLERANCE);
                    assert!(((left.y - left.x) + (right.y - right.x)).abs() < TOLERANCE);
                }
            }
        }
    }

    #[test]
    fn rows_mirror_across_the_horizontal_center_line() {
        let depth = uniform_grid(4, 3, 800);
        let points = project(&depth, &CameraModel::default());

        for r in 0..4 {
            for c in 0..3 {
                let top = points.get(r, c);
                let bottom = points.get(3 - r, c);

                // The polar angle mirrors around pi/2: z is antisymmetric
                // while x and y are unchanged.
                assert!((top.z + bottom.z).abs() < TOLERANCE);
                assert!((top.x - bottom.x).abs() < TOLERANCE);
                assert!((top.y - bottom.y).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn oblique_rays_inflate_the_radial_length() {
        let depth = uniform_grid(3, 3, 1000);
        let points = project(&depth, &CameraModel::default());

        let center = norm(points.get(1, 1));
        let corner = norm(points.get(0, 0));
        assert!((center - 1000.0).abs() < 0.1);
        assert!(corner > center);
    }

    #[test]
    fn wider_fov_shortens_the_focal_distance() {
        let depth = uniform_grid(3, 5, 1000);
        let narrow = CameraModel {
            fov_horizontal_deg: 40.0,
            fov_vertical_deg: 45.0,
        };
        let wide = CameraModel {
            fov_horizontal_deg: 90.0,
            fov_vertical_deg: 45.0,
        };

        // The same off-center pixel subtends a larger angle under the wider
        // FOV, pushing its point further from the optical axis plane.
        let p_narrow = project(&depth, &narrow).get(1, 0);
        let p_wide = project(&depth, &wide).get(1, 0);
        let axis_dist_narrow = (p_narrow.y - p_narrow.x).abs();
        let axis_dist_wide = (p_wide.y - p_wide.x).abs();
        assert!(axis_dist_wide > axis_dist_narrow);
    }
}
