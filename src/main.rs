//! Task Board Frontend Entry Point

mod app;
mod board;
mod board_store;
mod components;
mod config;
mod context;
mod error;
mod identity;
mod logging;
mod models;
mod session;
mod storage;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    logging::init(config.log_level);
    log::info!("Starting task board against {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
