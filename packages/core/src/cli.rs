use clap::Parser;

/// Holiday Resolver CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "holiday-resolver",
    version,
    about = "Public holidays, weekends and work days by country"
)]
pub struct Cli {
    /// Holiday provider base URL (Kayaposoft Enrico)
    #[arg(long)]
    pub provider_url: Option<String>,

    /// SQLite database URL, e.g. sqlite://holidays.db
    #[arg(long)]
    pub database_url: Option<String>,

    /// HTTP port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Keep fetched data in memory only (nothing survives a restart)
    #[arg(long)]
    pub in_memory: bool,
}
