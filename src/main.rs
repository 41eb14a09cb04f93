use clap::Parser;

use glyphcast::cli::{self, Args, Command};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match args.command {
        Some(Command::Config { ref action }) => {
            cli::handle_config_action(action.clone(), args.config.as_deref())
        }
        None => cli::convert(&args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
