//! Host frame loop: terminal setup, input, pacing, presentation.

use crate::animation::{Animation, AnimationState, Effect};
use crate::assets;
use crate::config::{Config, EffectMode, RendererMode};
use crate::effects::{Starfield, Twister};
use crate::gfx::PixelBuffer;
use crate::render::{AsciiRenderer, Frame, HalfBlockRenderer, KittyRenderer, Renderer};
use crate::terminal::TerminalGuard;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseEventKind};
use std::io::BufWriter;
use std::time::{Duration, Instant};

pub fn run(cfg: Config) -> anyhow::Result<()> {
    let effect: Box<dyn Effect> = match cfg.effect {
        EffectMode::Twister => match &cfg.texture {
            Some(path) => Box::new(Twister::load(path.clone(), cfg.bar_width)),
            None => Box::new(Twister::with_texture(
                assets::procedural_texture(256, 256),
                cfg.bar_width,
            )),
        },
        EffectMode::Starfield => Box::new(Starfield::new(cfg.stars)),
    };
    let mut animation = Animation::new(effect);

    let mut renderer: Box<dyn Renderer> = match cfg.renderer {
        RendererMode::HalfBlock => Box::new(HalfBlockRenderer::new()),
        RendererMode::Ascii => Box::new(AsciiRenderer::new()),
        RendererMode::Kitty => Box::new(KittyRenderer::new()),
    };
    let (cell_w, cell_h) = renderer.cell_geometry();

    let _term = TerminalGuard::new()?;
    let mut out = BufWriter::new(std::io::stdout());

    let mut last_size = crossterm::terminal::size().context("get terminal size")?;
    if last_size.0 < 4 || last_size.1 < 2 {
        return Err(anyhow::anyhow!(
            "terminal too small (need at least 4x2, got {}x{})",
            last_size.0,
            last_size.1
        ));
    }

    let (mut w, mut h) = pixel_dims(last_size, cell_w, cell_h);
    let mut fb = PixelBuffer::new(w, h);
    animation.resize(w, h);

    let mut fps = FpsCounter::new();
    let mut start_paused = cfg.paused;

    loop {
        let now = Instant::now();

        // Drain input events (non-blocking).
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => match k.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        animation.shutdown();
                        return Ok(());
                    }
                    KeyCode::Char(' ') | KeyCode::Enter => animation.toggle(),
                    _ => {}
                },
                Event::Mouse(m) if matches!(m.kind, MouseEventKind::Down(_)) => {
                    animation.toggle()
                }
                Event::Resize(c, r) => {
                    last_size = (c, r);
                    (w, h) = pixel_dims(last_size, cell_w, cell_h);
                    fb.resize(w, h);
                    animation.resize(w, h);
                }
                _ => {}
            }
        }

        // Size check once per frame; resize events can be missed in some
        // terminals.
        let sz = crossterm::terminal::size()?;
        if sz != last_size {
            last_size = sz;
            (w, h) = pixel_dims(last_size, cell_w, cell_h);
            fb.resize(w, h);
            animation.resize(w, h);
        }

        animation.tick(now, &mut fb);

        if let Some(err) = animation.take_load_error() {
            animation.shutdown();
            return Err(err.context("effect failed to initialize"));
        }

        // --paused: pause as soon as the effect comes up.
        if start_paused && animation.state() == AnimationState::Running {
            animation.toggle();
            start_paused = false;
        }

        let hud = format!(
            "{} [{}] | {} | {:.0} fps | {}x{} | space/click pause - q quit",
            animation.effect_name(),
            renderer.name(),
            state_label(animation.state()),
            fps.fps(),
            w,
            h,
        );

        let frame = Frame {
            term_cols: last_size.0,
            term_rows: last_size.1,
            visual_rows: last_size.1.saturating_sub(1).max(1),
            pixel_width: w,
            pixel_height: h,
            pixels_rgba: fb.as_bytes(),
            hud: &hud,
            sync_updates: cfg.sync_updates,
        };
        renderer.render(&frame, &mut out)?;
        fps.tick();

        // Frame pacing.
        let target = Duration::from_secs_f32(1.0 / cfg.fps.max(1) as f32);
        let elapsed = now.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }
    }
}

/// One HUD row is reserved at the bottom; the rest of the terminal maps to
/// pixels through the renderer's cell geometry.
fn pixel_dims(size: (u16, u16), cell_w: usize, cell_h: usize) -> (usize, usize) {
    let visual_rows = size.1.saturating_sub(1).max(1) as usize;
    (size.0 as usize * cell_w, visual_rows * cell_h)
}

fn state_label(state: AnimationState) -> &'static str {
    match state {
        AnimationState::Stopped => "loading",
        AnimationState::Running => "running",
        AnimationState::Paused => "paused",
    }
}

struct FpsCounter {
    last: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        if dt >= 0.5 {
            self.fps = self.frames as f32 / dt;
            self.frames = 0;
            self.last = now;
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}
