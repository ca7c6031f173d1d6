//! RGB-D to axonometry conversion pipeline.
//!
//! Takes a color image plus a binary depth map from the same sensor frame,
//! reconstructs per-pixel 3D positions with a spherical camera model, and
//! draws the scene from an oblique axonometric viewpoint onto a fixed-size
//! canvas. Data flows one way: depth map loader -> projector -> renderer.

pub mod constants;
pub mod converter;
pub mod depth_map;
pub mod projector;
pub mod renderer;
