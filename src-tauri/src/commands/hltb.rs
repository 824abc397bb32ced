use tracing::info;

use crate::hltb::{self, HltbTimes};

/// Look up completion times on HowLongToBeat.
/// Returns null when no reasonable match exists.
#[tauri::command]
pub async fn hltb_search(game_name: String) -> Result<Option<HltbTimes>, String> {
    info!("hltb_search called for: {}", game_name);

    if game_name.trim().is_empty() {
        return Err("No game name provided".to_string());
    }
    hltb::search(&game_name).await
}
