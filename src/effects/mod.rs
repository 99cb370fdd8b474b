mod starfield;
mod twister;

pub use starfield::{Star, Starfield, DEFAULT_STAR_COUNT};
pub use twister::{
    boundaries, render_band, Twister, TwisterParams, AMPLITUDE_CADENCE, AMPLITUDE_MAX,
    AMPLITUDE_STEP, ANGLE_STEP, DEFAULT_BAR_WIDTH,
};
