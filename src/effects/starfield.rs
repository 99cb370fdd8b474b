//! Perspective starfield.
//!
//! Stars live in a fixed-size vec and fly toward the viewer; whatever crosses
//! the near plane respawns at the far plane with a fresh lateral position.
//! Rendering is a perspective divide onto the buffer center plus a palette
//! lookup: depth attenuates brightness, capped by the star's own index so the
//! field keeps some intrinsic variety.

use crate::animation::{Effect, FrameCtx};
use crate::color::Palette;
use crate::gfx::PixelBuffer;

pub const DEFAULT_STAR_COUNT: usize = 1024;
const SPREAD: f32 = 200.0;
const NEAR_PLANE: f32 = 1.0;
const FAR_PLANE: f32 = 400.0;
const FOCAL: f32 = 256.0;

#[derive(Clone, Copy, Debug)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub speed: i32,
    pub color: u8,
}

impl Star {
    fn spawn(index: usize) -> Self {
        Self {
            x: -SPREAD + fastrand::f32() * 2.0 * SPREAD,
            y: -SPREAD + fastrand::f32() * 2.0 * SPREAD,
            z: NEAR_PLANE + fastrand::f32() * (FAR_PLANE - NEAR_PLANE),
            speed: 2 + fastrand::i32(0..2),
            color: (index % 256) as u8,
        }
    }

    fn respawn(&mut self) {
        self.x = -SPREAD + fastrand::f32() * 2.0 * SPREAD;
        self.y = -SPREAD + fastrand::f32() * 2.0 * SPREAD;
        self.z = FAR_PLANE;
    }
}

pub struct Starfield {
    stars: Vec<Star>,
    palette: Palette,
}

impl Starfield {
    pub fn new(count: usize) -> Self {
        let stars = (0..count.max(1)).map(Star::spawn).collect();
        Self {
            stars,
            palette: Palette::grayscale(),
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Palette index for a depth: 1 (brightest) at the near plane out to 255
    /// (darkest) at the far plane.
    fn depth_index(z: f32) -> u8 {
        let depth = ((z - NEAR_PLANE) / (FAR_PLANE - NEAR_PLANE)).clamp(0.0, 1.0);
        1 + (depth * 254.0) as u8
    }
}

impl Effect for Starfield {
    fn name(&self) -> &'static str {
        "starfield"
    }

    fn update(&mut self, _ctx: &FrameCtx) {
        for star in &mut self.stars {
            star.z -= star.speed as f32;
            if star.z < NEAR_PLANE {
                star.respawn();
            }
        }
    }

    fn render(&mut self, ctx: &FrameCtx, fb: &mut PixelBuffer) {
        fb.clear();
        let cx = ctx.w as f32 * 0.5;
        let cy = ctx.h as f32 * 0.5;

        for star in &self.stars {
            let inv = FOCAL / star.z;
            let px = (cx + star.x * inv) as i32;
            let py = (cy + star.y * inv) as i32;

            // Off-screen stars are skipped, not clamped onto the border.
            if px < 0 || py < 0 || px as usize >= ctx.w || py as usize >= ctx.h {
                continue;
            }

            let index = Self::depth_index(star.z).max(star.color.max(1));
            fb.set_pixel(px, py, self.palette.color(index));
        }
    }
}
