use crate::render::{frame_end, Frame, Renderer};
use anyhow::Context;
use base64::Engine;
use std::io::Write;

// 3072 raw bytes -> 4096 base64 bytes per escape chunk.
const RAW_CHUNK: usize = 3 * 1024;

/// Kitty graphics protocol: ships the raw RGBA frame base64-encoded and lets
/// the terminal scale it to the cell grid. Sharpest backend where supported.
pub struct KittyRenderer {
    b64_buf: Vec<u8>,
}

impl KittyRenderer {
    pub fn new() -> Self {
        Self {
            b64_buf: vec![0; RAW_CHUNK.div_ceil(3) * 4],
        }
    }
}

impl Renderer for KittyRenderer {
    fn name(&self) -> &'static str {
        "kitty"
    }

    fn cell_geometry(&self) -> (usize, usize) {
        (2, 4)
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        if !frame.geometry_ok(2, 4) {
            return Ok(());
        }

        if frame.sync_updates {
            out.write_all(b"\x1b[?2026h")?;
        }
        out.write_all(b"\x1b[H\x1b[0m")?;

        let rgba = &frame.pixels_rgba[..frame.pixel_width * frame.pixel_height * 4];
        let engine = &base64::engine::general_purpose::STANDARD;

        let mut off = 0usize;
        let mut first = true;
        while off < rgba.len() {
            let end = (off + RAW_CHUNK).min(rgba.len());
            let chunk = &rgba[off..end];
            let more = if end < rgba.len() { 1 } else { 0 };

            if first {
                // f=32: RGBA; a=T: transmit and display; q=2: no replies;
                // r: rows to occupy so the image lands on the cell grid.
                write!(
                    out,
                    "\x1b_Gf=32,a=T,q=2,s={},v={},c={},r={},m={};",
                    frame.pixel_width,
                    frame.pixel_height,
                    frame.term_cols,
                    frame.visual_rows,
                    more
                )?;
                first = false;
            } else {
                write!(out, "\x1b_Gm={more};")?;
            }

            let b64_len = chunk.len().div_ceil(3) * 4;
            let written = engine
                .encode_slice(chunk, &mut self.b64_buf[..b64_len])
                .context("base64 encode pixels")?;
            out.write_all(&self.b64_buf[..written])?;
            out.write_all(b"\x1b\\")?;

            off = end;
        }

        frame_end(frame, out)
    }
}
