use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "careconnect",
    version,
    about = "Terminal content manager for CareConnect volunteer activities",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend origin.
    #[arg(long, env = "CARECONNECT_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Bearer token to use when the keyring holds no session.
    #[arg(long, env = "CARECONNECT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Nominatim origin.
    #[arg(long, value_name = "URL")]
    pub geocoder_url: Option<String>,

    /// Contact email sent to the geocoder.
    #[arg(long, value_name = "EMAIL")]
    pub contact_email: Option<String>,

    /// Enable mouse support.
    #[arg(long)]
    pub mouse: Option<bool>,

    /// Toast duration in seconds.
    #[arg(long)]
    pub notification_duration: Option<u64>,

    /// Screen to open first, e.g. `/activity/42`.
    #[arg(value_name = "ROUTE")]
    pub route: Option<String>,
}
