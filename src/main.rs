use clap::Parser;
use tokio_util::sync::CancellationToken;

mod backend;
mod config;
mod constants;
mod error;
mod generation;
mod handlers;
mod http;
mod logging;
mod model;
mod server;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::parse();

    setup_logging(&cfg.log_level)?;

    if let Err(e) = config::validate_config(&cfg) {
        log::error!("{}", e.message);
        return Err(e.into());
    }

    let debug_enabled =
        cfg.log_level.eq_ignore_ascii_case("debug") || cfg.log_level.eq_ignore_ascii_case("trace");
    logging::LogConfig::init(debug_enabled);

    let list_only = cfg.list_models;
    let server = server::RelayServer::new(cfg)?;

    if list_only {
        return print_models(&server).await;
    }

    server.run().await
}

async fn print_models(server: &server::RelayServer) -> Result<(), Box<dyn std::error::Error>> {
    let models = server.backend.list_models(CancellationToken::new()).await?;
    let preferred = server.model_slot.selector().select(&models).ok();

    for model in &models {
        let marker = if preferred.as_ref().is_some_and(|p| p.name == model.name) {
            " (selected)"
        } else {
            ""
        };
        println!("{}{}", model.name, marker);
    }
    Ok(())
}

fn setup_logging(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let level = log_level
        .to_lowercase()
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Info);

    fern::Dispatch::new()
        .format(|out, message, record| {
            let level_str = match record.level() {
                log::Level::Error => "\x1b[1;31merror:\x1b[0m",
                log::Level::Warn => "\x1b[1;33mwarn:\x1b[0m",
                log::Level::Info => "\x1b[1;32minfo:\x1b[0m",
                log::Level::Debug => "\x1b[1;34mdebug:\x1b[0m",
                log::Level::Trace => "\x1b[1;35mtrace:\x1b[0m",
            };
            out.finish(format_args!("{} {}", level_str, message))
        })
        .level(level)
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}
