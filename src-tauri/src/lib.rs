pub mod cache;
mod commands;
pub mod compat;
pub mod error;
pub mod groq;
pub mod hltb;
pub mod http;
pub mod itad;
pub mod rawg;
pub mod steam;

pub use compat::{check_compatibility, CompatReport, GameRequirements, HardwareProfile};

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::keychain::set_api_key,
            commands::keychain::get_api_key,
            commands::keychain::delete_api_key,
            commands::config::get_preference,
            commands::config::set_preference,
            commands::health::run_health_check,
            commands::library::sync_library,
            commands::library::list_library,
            commands::library::search_game_meta,
            commands::library::game_meta_detail,
            commands::library::clear_api_cache,
            commands::deals::fetch_deals,
            commands::deals::price_overview,
            commands::deals::deal_digest,
            commands::deals::list_groq_models,
            commands::hltb::hltb_search,
            commands::compat::check_compatibility,
            commands::compat::save_hardware_profile,
            commands::compat::load_hardware_profile,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
