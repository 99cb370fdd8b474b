//! Sinusoidal texture-distortion "twister".
//!
//! Every scanline gets four boundary x-coordinates from phase-shifted sines
//! of the same angle; each adjacent pair bounds one quarter slice of the
//! texture row, resampled nearest-neighbor across the span. A pair whose
//! boundaries come out backwards is skipped for that scanline, which is what
//! produces the rotating-band illusion.

use crate::animation::{Effect, FrameCtx, Readiness};
use crate::assets::{Texture, TextureLoad};
use crate::gfx::PixelBuffer;
use anyhow::anyhow;
use std::f32::consts::FRAC_PI_2;
use std::path::PathBuf;

pub const ANGLE_STEP: f32 = 0.035;
pub const AMPLITUDE_STEP: f32 = 0.05;
pub const AMPLITUDE_MAX: f32 = 1.8;
/// Amplitude moves once per this many rendered frames.
pub const AMPLITUDE_CADENCE: u64 = 50;
pub const DEFAULT_BAR_WIDTH: usize = 240;

/// The twister's logical state: a monotonically advancing rotation angle and
/// an amplitude that oscillates inside (0, `AMPLITUDE_MAX`].
#[derive(Clone, Copy, Debug)]
pub struct TwisterParams {
    angle: f32,
    amplitude: f32,
    amplitude_dir: f32,
}

impl TwisterParams {
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            amplitude: 0.0,
            amplitude_dir: 1.0,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// One frame's worth of motion. The amplitude direction flips *before*
    /// a step would leave (0, `AMPLITUDE_MAX`], so the value itself never
    /// exits the band.
    pub fn advance(&mut self, frame: u64) {
        self.angle += ANGLE_STEP;
        if frame % AMPLITUDE_CADENCE == 0 {
            self.step_amplitude();
        }
    }

    pub fn step_amplitude(&mut self) {
        let next = self.amplitude + AMPLITUDE_STEP * self.amplitude_dir;
        if next <= 0.0 || next > AMPLITUDE_MAX {
            self.amplitude_dir = -self.amplitude_dir;
        }
        self.amplitude += AMPLITUDE_STEP * self.amplitude_dir;
    }
}

impl Default for TwisterParams {
    fn default() -> Self {
        Self::new()
    }
}

/// The four boundary x-coordinates for one scanline. `fv` is the row
/// fraction y/H; the k-th boundary leads the first by k quarter turns.
pub fn boundaries(angle: f32, amplitude: f32, fv: f32, x0: f32, half_width: f32) -> [f32; 4] {
    std::array::from_fn(|k| {
        x0 + half_width * (amplitude * fv + angle + FRAC_PI_2 * k as f32).sin()
    })
}

enum TextureSource {
    Pending(TextureLoad),
    Ready(Texture),
    Missing,
}

pub struct Twister {
    params: TwisterParams,
    half_width: usize,
    source: TextureSource,
    slice_w: usize,
}

impl Twister {
    /// Starts a background load; the animation stays stopped until it lands.
    pub fn load(path: PathBuf, bar_width: usize) -> Self {
        Self {
            params: TwisterParams::new(),
            half_width: (bar_width / 2).max(1),
            source: TextureSource::Pending(TextureLoad::spawn(path)),
            slice_w: 0,
        }
    }

    /// Ready immediately with an already-decoded texture.
    pub fn with_texture(texture: Texture, bar_width: usize) -> Self {
        let slice_w = texture.width() / 4;
        Self {
            params: TwisterParams::new(),
            half_width: (bar_width / 2).max(1),
            source: TextureSource::Ready(texture),
            slice_w,
        }
    }

    pub fn params(&self) -> &TwisterParams {
        &self.params
    }
}

impl Effect for Twister {
    fn name(&self) -> &'static str {
        "twister"
    }

    fn poll_ready(&mut self) -> Readiness {
        match &mut self.source {
            TextureSource::Ready(_) => Readiness::Ready,
            TextureSource::Missing => Readiness::Failed(anyhow!("twister has no texture source")),
            TextureSource::Pending(load) => match load.poll() {
                None => Readiness::Pending,
                Some(Ok(texture)) => {
                    log::info!(
                        "texture loaded ({}x{})",
                        texture.width(),
                        texture.height()
                    );
                    self.slice_w = texture.width() / 4;
                    self.source = TextureSource::Ready(texture);
                    Readiness::Ready
                }
                Some(Err(err)) => {
                    self.source = TextureSource::Missing;
                    Readiness::Failed(err)
                }
            },
        }
    }

    fn update(&mut self, ctx: &FrameCtx) {
        self.params.advance(ctx.frame);
    }

    fn render(&mut self, _ctx: &FrameCtx, fb: &mut PixelBuffer) {
        let TextureSource::Ready(texture) = &self.source else {
            return;
        };
        fb.clear();
        render_band(&self.params, self.half_width, texture, self.slice_w, fb);
    }
}

/// Draws the full twisted band into `fb`.
pub fn render_band(
    params: &TwisterParams,
    half_width: usize,
    texture: &Texture,
    slice_w: usize,
    fb: &mut PixelBuffer,
) {
    let w = fb.width();
    let h = fb.height();
    if w == 0 || h == 0 || texture.width() == 0 || texture.height() == 0 {
        return;
    }

    let x0 = (w / 2) as f32;
    for y in 0..h {
        let fv = y as f32 / h as f32;
        let xs = boundaries(params.angle(), params.amplitude(), fv, x0, half_width as f32);
        let xi = xs.map(|x| x.floor() as i32);

        let yt = ((fv * texture.height() as f32) as usize).min(texture.height() - 1);

        // Quarter-slice index is fixed per boundary pair; a backward pair is
        // simply not drawn this scanline.
        for k in 0..4 {
            let a = xi[k];
            let b = xi[(k + 1) & 3];
            if a < b {
                copy_span(fb, texture, y, a, b, yt, slice_w * k, slice_w);
            }
        }
    }
}

/// Resamples one quarter slice of `texture` row `tex_row` across the
/// destination span `[x_start, x_end)` of scanline `y`, nearest neighbor,
/// stepping the source address in 16.16 fixed point.
fn copy_span(
    fb: &mut PixelBuffer,
    texture: &Texture,
    y: usize,
    x_start: i32,
    x_end: i32,
    tex_row: usize,
    slice_x: usize,
    slice_w: usize,
) {
    let w = fb.width();
    let span = (x_end - x_start) as u64;
    if span == 0 {
        return;
    }
    let ratio = ((slice_w as u64) << 16) / span;

    let tex_w = texture.width();
    let row_base = tex_row * tex_w;
    let src = texture.data();
    let dst = fb.bytes_mut();

    let mut addr: u64 = 0;
    for x in x_start..x_end {
        let tx = slice_x + (addr >> 16) as usize;
        addr += ratio;
        if x < 0 || x as usize >= w {
            continue;
        }
        // Clamp the read to the texture row so rounding can never walk past
        // the end of the buffer.
        let si = (row_base + tx.min(tex_w - 1)) * 4;
        let di = (y * w + x as usize) * 4;
        dst[di..di + 4].copy_from_slice(&src[si..si + 4]);
    }
}
