pub mod config;
pub mod run;
pub mod stats;

/// clap value parser for phase lengths.
pub fn parse_secs(s: &str) -> Result<u64, String> {
    pomotimer_core::timer::parse_duration_secs(s).map_err(|e| e.to_string())
}
