use crate::effects::{DEFAULT_BAR_WIDTH, DEFAULT_STAR_COUNT};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "retrofx", version, about = "Old-school demo effects (twister, starfield) in the terminal")]
pub struct Config {
    #[arg(long, value_enum, default_value_t = EffectMode::Twister)]
    pub effect: EffectMode,

    #[arg(long, value_enum, default_value_t = RendererMode::HalfBlock)]
    pub renderer: RendererMode,

    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Image file for the twister band; a procedural color wash is generated
    /// when omitted.
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Full width of the twister band in pixels.
    #[arg(long, default_value_t = DEFAULT_BAR_WIDTH)]
    pub bar_width: usize,

    #[arg(long, default_value_t = DEFAULT_STAR_COUNT)]
    pub stars: usize,

    /// Start paused; space, enter or a mouse click resumes.
    #[arg(long, default_value_t = false)]
    pub paused: bool,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EffectMode {
    Twister,
    Starfield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererMode {
    #[value(name = "half-block", alias = "halfblock", alias = "half_block", alias = "hb")]
    HalfBlock,
    #[value(alias = "ansi", alias = "text")]
    Ascii,
    Kitty,
}
