//! Spinning mesh animation
//!
//! Each frame the mesh is rotated about a fixed axis, pushed away from the
//! eye and projected: `rotation * translation * perspective`.

use crate::config::RenderConfig;
use crate::display::DisplaySurface;
use crate::error::Result;
use crate::math3d::Mat4;
use crate::mesh::Mesh;
use crate::rasterizer::Renderer;
use crate::transform::{perspective, rotation, translation};
use std::f32::consts::TAU;

pub struct Spinner {
    mesh: Mesh,
    axis: [f32; 3],
    angle: f32,
    angular_speed: f32,
    distance: f32,
    fov: f32,
    near: f32,
    far: f32,
    paused: bool,
}

impl Spinner {
    pub fn new(mesh: Mesh, config: &RenderConfig) -> Self {
        Self {
            mesh,
            axis: config.axis,
            angle: 0.0,
            angular_speed: config.angular_speed,
            distance: config.distance,
            fov: config.fov,
            near: config.near,
            far: config.far,
            paused: false,
        }
    }

    /// The demo: a cube of `config.mesh_size`
    pub fn cube(config: &RenderConfig) -> Self {
        Self::new(Mesh::cube(config.mesh_size), config)
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle.rem_euclid(TAU);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Advance the rotation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if !self.paused {
            self.set_angle(self.angle + self.angular_speed * dt);
        }
    }

    /// Model-view-projection for the current angle
    pub fn transform(&self, aspect: f32) -> Result<Mat4> {
        let [x, y, z] = self.axis;
        let r = rotation(x, y, z, self.angle)?;
        let t = translation(0.0, 0.0, self.distance);
        let p = perspective(self.fov, aspect, self.near, self.far)?;
        Ok(r * t * p)
    }

    /// Clear and draw one frame. Presenting is left to the caller.
    pub fn render<S: DisplaySurface>(&self, renderer: &mut Renderer<S>) -> Result<()> {
        let transform = self.transform(renderer.aspect())?;
        renderer.clear();
        renderer.draw_mesh(&self.mesh, &transform)
    }
}
