use clap::Parser;

/// Secure kiosk browser shell.
#[derive(Parser, Debug)]
#[command(name = "secure-browser", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log filter override (e.g. `kiosk=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Run as a plain window instead of a kiosk session. The content view is
    /// not navigated to the launch URL in this mode.
    #[arg(long)]
    pub windowed: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
