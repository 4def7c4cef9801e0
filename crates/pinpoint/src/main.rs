mod app;
mod config;
mod keyboard;
mod map;
mod router;
mod screen;
mod views;

#[cfg(test)]
mod testing;

use clap::Parser;
use is_terminal::IsTerminal;
use macro_rules_attribute::apply;
use smol_macros::main;

use crate::config::Config;
use crate::keyboard::Keyboard;
use crate::router::Router;

#[apply(main!)]
async fn main() {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "warn,pinpoint=info,pinpoint_locate=info,isahc=error",
                )
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    tracing::info!(position = ?config.position, start = %config.start, "started");

    let keyboard = Keyboard::new();
    let (router, navigator) = Router::new();
    let ctx = views::Context {
        positions: config.position_source(),
        geocoder: Box::new(config.geocoder()),
        map: Box::new(config.tile_map()),
        screen: Box::new(screen::terminal(std::io::stdout().is_terminal())),
        keyboard: keyboard.clone(),
        navigator,
        acquire_timeout: config.acquire_timeout(),
        zoom: config.zoom,
    };

    let stdin = blocking::Unblock::new(std::io::stdin());
    let input = futures_lite::io::BufReader::new(stdin);

    // After stdin closes the active view still gets to settle.
    futures_lite::future::zip(
        app::run(&ctx, &router, config.start),
        keyboard::pump(input, &keyboard),
    )
    .await;
}
