use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    // Logging goes to stderr; initialize before the alternate screen is
    // entered so startup failures stay readable.
    env_logger::init();

    let cfg = retrofx::config::Config::parse();
    retrofx::app::run(cfg)
}
