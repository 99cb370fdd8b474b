//! Texture loading.
//!
//! Decoding happens either synchronously (`load_texture`) or on a one-shot
//! worker thread (`TextureLoad`) that the frame loop polls without blocking.
//! Dropping a pending load abandons it: the worker's send fails and the
//! decoded image is discarded, so a late completion can never touch buffers
//! that are already gone.

use crate::color::{Hsla, Rgba};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// A decoded RGBA image. Immutable once constructed.
pub struct Texture {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Texture {
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let need = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| anyhow!("texture dimensions overflow: {width}x{height}"))?;
        if data.len() != need {
            return Err(anyhow!(
                "texture byte length mismatch: {width}x{height} needs {need}, got {}",
                data.len()
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Uniform single-color texture. Handy for tests and degenerate inputs.
    pub fn solid(width: usize, height: usize, color: Rgba) -> Self {
        let mut data = Vec::with_capacity(width * height * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

pub fn load_texture(path: &Path) -> Result<Texture> {
    let img = image::open(path)
        .with_context(|| format!("decode texture {}", path.display()))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    Texture::from_rgba(w as usize, h as usize, img.into_raw())
}

/// One-shot background texture load.
pub struct TextureLoad {
    rx: Receiver<Result<Texture>>,
}

impl TextureLoad {
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver may already be gone if the animation shut down
            // first; the send result is intentionally ignored.
            let _ = tx.send(load_texture(&path));
        });
        Self { rx }
    }

    /// Non-blocking poll. Returns `None` while the decode is still running,
    /// then the result exactly once.
    pub fn poll(&mut self) -> Option<Result<Texture>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(anyhow!("texture loader exited without a result")))
            }
        }
    }
}

/// Built-in color-wash texture used when no `--texture` path is given, so the
/// twister demos out of the box. Four hue bands make the quarter slices easy
/// to tell apart once the band starts rotating.
pub fn procedural_texture(width: usize, height: usize) -> Texture {
    let width = width.max(4);
    let height = height.max(1);
    let hue0 = fastrand::f32() * 360.0;
    let slice_w = width / 4;

    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let fy = y as f32 / height as f32;
        for x in 0..width {
            let slice = (x / slice_w.max(1)).min(3) as f32;
            let fx = (x % slice_w.max(1)) as f32 / slice_w.max(1) as f32;
            let c: Rgba = Hsla::new(
                hue0 + slice * 90.0 + fy * 40.0,
                0.85,
                0.22 + fx * 0.45,
                1.0,
            )
            .into();
            data.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }

    Texture {
        width,
        height,
        data,
    }
}
