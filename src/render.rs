//! Draw boundary
//!
//! The simulation knows nothing about pixels. Each agent hands a [`Sprite`]
//! (image, center, orientation, size) to a [`Renderer`].

use crate::assets::ImageHandle;
use crate::sim::Vector2D;

/// One textured quad, rotated around its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub image: ImageHandle,
    pub center: Vector2D,
    /// Radians
    pub orientation: f64,
    pub width: f64,
    pub height: f64,
}

pub trait Renderer {
    fn draw_sprite(&mut self, sprite: &Sprite);

    /// Debug overlay: axis-aligned box outline
    fn draw_box(&mut self, _center: Vector2D, _width: f64, _height: f64) {}

    /// Debug overlay: line between two points
    fn draw_line(&mut self, _from: Vector2D, _to: Vector2D) {}
}

/// Renderer that records draw calls, for headless runs and tests
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub sprites: Vec<Sprite>,
    pub boxes: usize,
    pub lines: usize,
}

impl Renderer for RecordingRenderer {
    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.sprites.push(*sprite);
    }

    fn draw_box(&mut self, _center: Vector2D, _width: f64, _height: f64) {
        self.boxes += 1;
    }

    fn draw_line(&mut self, _from: Vector2D, _to: Vector2D) {
        self.lines += 1;
    }
}
