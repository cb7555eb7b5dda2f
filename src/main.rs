use std::process::ExitCode;
use std::sync::Arc;

use siteserve::config::{self, AppState, CliArgs, ServerConfig, Settings};
use siteserve::error::StartupError;
use siteserve::{logger, server};
use tokio::sync::Notify;

fn main() -> ExitCode {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}\n\n{}", config::USAGE);
            return ExitCode::from(2);
        }
    };

    if args.help {
        println!("{}", config::USAGE);
        return ExitCode::SUCCESS;
    }
    if args.version {
        println!("serve {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), StartupError> {
    let settings_path = args
        .config
        .as_deref()
        .unwrap_or(config::DEFAULT_SETTINGS_FILE);
    let settings = Settings::load_from(settings_path)?;
    logger::init(&settings.logging).map_err(StartupError::Logger)?;

    let cwd = std::env::current_dir().map_err(StartupError::CurrentDir)?;
    let server_config = ServerConfig::resolve(args, |key| std::env::var(key).ok(), &cwd)?;

    // Not fatal: `/` falls back to a directory listing
    server::warn_if_missing_index(&server_config.root_dir);

    // One thread: connections are accepted and served one at a time
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(server_config, settings))
}

async fn async_main(server_config: ServerConfig, settings: Settings) -> Result<(), StartupError> {
    let listener = server::bind(&server_config)?;
    let bound_addr = listener.local_addr()?;
    logger::log_server_start(&bound_addr, &server_config, &settings.logging);

    let shutdown = Arc::new(Notify::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown))?;

    let state = Arc::new(AppState::new(server_config.root_dir, settings));
    server::start_server_loop(listener, state, shutdown).await;

    Ok(())
}
