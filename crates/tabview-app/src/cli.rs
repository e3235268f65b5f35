use std::path::PathBuf;

use clap::Parser;

/// Tabview: replay rendering-engine and transport events against a tab's
/// content controller.
#[derive(Parser, Debug)]
#[command(name = "tabview", version, about)]
pub struct Args {
    /// Scenario file (JSON) to replay.
    pub scenario: PathBuf,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Replay speed multiplier for step delays; 0 replays without sleeping.
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_is_required() {
        assert!(Args::try_parse_from(["tabview"]).is_err());
    }

    #[test]
    fn defaults_and_overrides() {
        let args = Args::try_parse_from(["tabview", "run.json"]).unwrap();
        assert_eq!(args.scenario, PathBuf::from("run.json"));
        assert_eq!(args.speed, 1.0);
        assert!(args.config.is_none());

        let args = Args::try_parse_from([
            "tabview",
            "run.json",
            "--config",
            "tab.toml",
            "--log-level",
            "debug",
            "--speed",
            "0",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("tab.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.speed, 0.0);
    }
}
