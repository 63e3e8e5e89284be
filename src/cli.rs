// cli.rs - Command-line configuration for the native binary
use std::path::PathBuf;

use clap::Parser;

use crate::controller::DEFAULT_MAX_TICKS_PER_FRAME;
use crate::model::DEFAULT_TICK_RATE_HZ;

#[derive(Parser, Debug, Clone)]
#[command(name = "skiff")]
#[command(about = "Mouselook ship controller", long_about = None)]
pub struct Cli {
    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Fixed simulation tick rate
    #[arg(long = "tick-hz", default_value_t = DEFAULT_TICK_RATE_HZ)]
    pub tick_hz: u32,

    /// Ticks run per frame before a stall's backlog is dropped
    #[arg(long = "max-ticks-per-frame", default_value_t = DEFAULT_MAX_TICKS_PER_FRAME)]
    pub max_ticks_per_frame: u32,

    /// Also write logs to this daily-rolling file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["skiff"]);
        assert_eq!((cli.width, cli.height), (800, 600));
        assert_eq!(cli.tick_hz, 60);
        assert_eq!(cli.max_ticks_per_frame, 5);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["skiff", "--tick-hz", "120", "--log-file", "logs/run.log"]);
        assert_eq!(cli.tick_hz, 120);
        assert_eq!(cli.log_file, Some(PathBuf::from("logs/run.log")));
    }
}
