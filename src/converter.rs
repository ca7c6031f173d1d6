/// Pipeline orchestrator wiring depth parsing, projection and rendering.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbImage;
use tracing::info;

use crate::constants::{CameraModel, RenderSettings};
use crate::depth_map::DepthGrid;
use crate::{projector, renderer};

/// Load a JSON camera preset.
pub fn load_camera_preset(path: &Path) -> Result<CameraModel> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("can't read camera preset {}", path.display()))?;
    let camera = serde_json::from_str(&raw)
        .with_context(|| format!("invalid camera preset {}", path.display()))?;
    Ok(camera)
}

/// Converts one RGB-D capture into an axonometric rendering.
///
/// Owns the three file paths and the camera/render configuration, and runs
/// the stages strictly in sequence: decode color image, load depth map,
/// reconstruct points, draw, encode. Any stage failure aborts the run; the
/// output file is only written once every stage has succeeded.
pub struct AxonometryConverter {
    /// Input color image path.
    rgb_path: PathBuf,
    /// Input binary depth map path.
    depth_map_path: PathBuf,
    /// Output image path; the codec is chosen from its extension.
    output_path: PathBuf,
    camera: CameraModel,
    settings: RenderSettings,
}

impl AxonometryConverter {
    /// Create a converter with the default camera and canvas configuration.
    pub fn new(rgb_path: PathBuf, depth_map_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            rgb_path,
            depth_map_path,
            output_path,
            camera: CameraModel::default(),
            settings: RenderSettings::default(),
        }
    }

    /// Override the camera model, e.g. from a loaded preset.
    pub fn with_camera(mut self, camera: CameraModel) -> Self {
        self.camera = camera;
        self
    }

    /// Override the canvas and axonometric transform settings.
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Run the full pipeline and write the rendered image.
    pub fn convert(&self) -> Result<()> {
        let colors: RgbImage = image::open(&self.rgb_path)
            .with_context(|| format!("can't open image {}", self.rgb_path.display()))?
            .to_rgb8();
        info!(
            width = colors.width(),
            height = colors.height(),
            "decoded color image {}",
            self.rgb_path.display()
        );

        let depth = DepthGrid::load(&self.depth_map_path)
            .with_context(|| format!("can't open depth map {}", self.depth_map_path.display()))?;
        info!(
            rows = depth.rows(),
            cols = depth.cols(),
            "loaded depth map {}",
            self.depth_map_path.display()
        );

        let points = projector::project(&depth, &self.camera);
        let canvas = renderer::render(&points, &colors, &self.settings)?;

        canvas
            .save(&self.output_path)
            .with_context(|| format!("can't write output image {}", self.output_path.display()))?;
        info!("saved axonometry to {}", self.output_path.display());
        Ok(())
    }
}
