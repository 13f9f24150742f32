use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use solaris::core::{config, session};
use solaris::tui;

#[derive(Parser)]
#[command(name = "solaris", about = "Terminal client for the Solaris AI query service")]
struct Args {
    /// Base URL of the query backend
    #[arg(short, long)]
    server: Option<String>,

    /// User id to attribute queries to (defaults to the persisted session id)
    #[arg(short, long)]
    user_id: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to solaris.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("solaris.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    let resolved = config::resolve(&file_config, args.server.as_deref(), args.user_id.as_deref());

    // The session id is resolved once here and injected; nothing below
    // reaches for an ambient accessor.
    let user_id = resolved
        .user_id
        .clone()
        .unwrap_or_else(session::load_or_create_session_id);

    log::info!(
        "Solaris starting up (server: {}, user: {})",
        resolved.server_base_url,
        user_id
    );

    tui::run(resolved, user_id)
}
