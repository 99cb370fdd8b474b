mod ascii;
mod halfblock;
mod kitty;

pub use ascii::AsciiRenderer;
pub use halfblock::HalfBlockRenderer;
pub use kitty::KittyRenderer;

use std::io::Write;

/// One frame's worth of presentation input: the RGBA pixels plus the
/// terminal geometry they were rendered for and a single HUD line.
pub struct Frame<'a> {
    pub term_cols: u16,
    pub term_rows: u16,
    pub visual_rows: u16,
    pub pixel_width: usize,
    pub pixel_height: usize,
    pub pixels_rgba: &'a [u8],
    pub hud: &'a str,
    pub sync_updates: bool,
}

impl Frame<'_> {
    /// True when the pixel buffer actually covers the advertised geometry.
    /// Renderers bail out on a mismatch instead of indexing past the end.
    pub(crate) fn geometry_ok(&self, cell_w: usize, cell_h: usize) -> bool {
        let w = self.pixel_width;
        let h = self.pixel_height;
        w > 0
            && h > 0
            && w == self.term_cols as usize * cell_w
            && h == self.visual_rows as usize * cell_h
            && self.pixels_rgba.len() >= w * h * 4
    }
}

pub trait Renderer {
    fn name(&self) -> &'static str;

    /// Pixels per terminal cell, (width, height).
    fn cell_geometry(&self) -> (usize, usize);

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()>;
}

pub(crate) fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    // Rec. 709 weights, integer arithmetic.
    ((r as u32 * 2126 + g as u32 * 7152 + b as u32 * 722) / 10_000) as u8
}

/// Begin-of-frame escapes: optional synchronized-update guard, home the
/// cursor, reset attributes, disable autowrap so full-width rows don't leave
/// gaps on terminals that wrap eagerly.
pub(crate) fn frame_begin(frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
    if frame.sync_updates {
        out.write_all(b"\x1b[?2026h")?;
    }
    out.write_all(b"\x1b[H\x1b[0m\x1b[?7l")?;
    Ok(())
}

/// End-of-frame: HUD line on the last row, restore autowrap, close the
/// synchronized update, flush.
pub(crate) fn frame_end(frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
    write!(out, "\x1b[{};1H\x1b[0m\x1b[2K", frame.term_rows)?;
    let cols = frame.term_cols as usize;
    let hud: String = frame.hud.chars().take(cols).collect();
    out.write_all(hud.as_bytes())?;

    out.write_all(b"\x1b[?7h")?;
    if frame.sync_updates {
        out.write_all(b"\x1b[?2026l")?;
    }
    out.flush()?;
    Ok(())
}

pub(crate) fn write_fg_rgb(out: &mut dyn Write, r: u8, g: u8, b: u8) -> anyhow::Result<()> {
    write!(out, "\x1b[38;2;{r};{g};{b}m")?;
    Ok(())
}

pub(crate) fn write_bg_rgb(out: &mut dyn Write, r: u8, g: u8, b: u8) -> anyhow::Result<()> {
    write!(out, "\x1b[48;2;{r};{g};{b}m")?;
    Ok(())
}
