use crate::render::{frame_begin, frame_end, luma_u8, write_fg_rgb, Frame, Renderer};
use std::io::Write;

// Dark -> bright, ASCII-safe.
const RAMP: &[u8] = b" .,:;irsXA253hMHGS#9B&@";

/// One glyph per pixel, chosen from a luminance ramp and tinted with the
/// pixel's own color.
pub struct AsciiRenderer {
    last_fg: Option<(u8, u8, u8)>,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self { last_fg: None }
    }
}

impl Renderer for AsciiRenderer {
    fn name(&self) -> &'static str {
        "ascii"
    }

    fn cell_geometry(&self) -> (usize, usize) {
        (1, 1)
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        if !frame.geometry_ok(1, 1) {
            return Ok(());
        }

        frame_begin(frame, out)?;
        self.last_fg = None;

        let w = frame.pixel_width;
        let px = frame.pixels_rgba;

        for y in 0..frame.visual_rows as usize {
            for x in 0..frame.term_cols as usize {
                let i = (y * w + x) * 4;
                let (r, g, b) = (px[i], px[i + 1], px[i + 2]);

                let l = luma_u8(r, g, b) as usize;
                let glyph = RAMP[l * (RAMP.len() - 1) / 255];

                if self.last_fg != Some((r, g, b)) {
                    write_fg_rgb(out, r, g, b)?;
                    self.last_fg = Some((r, g, b));
                }
                out.write_all(&[glyph])?;
            }
            out.write_all(b"\r\n")?;
        }

        frame_end(frame, out)
    }
}
