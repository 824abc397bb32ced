use tauri::AppHandle;
use tracing::info;

use crate::compat::{self, CompatReport, GameRequirements, HardwareProfile};

use super::config::preferences;

/// Compare a hardware profile against game requirement scores.
#[tauri::command]
pub fn check_compatibility(
    hardware: HardwareProfile,
    requirements: GameRequirements,
) -> Result<CompatReport, String> {
    info!(
        "check_compatibility called: cpu='{}' gpu='{}' ram={}GB",
        hardware.cpu_name, hardware.gpu_name, hardware.ram_gb
    );
    Ok(compat::check_compatibility(&hardware, &requirements))
}

/// Persist the hardware profile so the Can It Run page remembers it.
#[tauri::command]
pub fn save_hardware_profile(app: AppHandle, hardware: HardwareProfile) -> Result<(), String> {
    info!("save_hardware_profile called");
    let store = preferences(&app)?;
    let json = serde_json::to_value(&hardware)
        .map_err(|e| format!("Failed to serialize hardware profile: {}", e))?;
    store.set("hardware_profile", json);
    store
        .save()
        .map_err(|e| format!("Failed to save store: {}", e))
}

/// Load the saved hardware profile, if any.
#[tauri::command]
pub fn load_hardware_profile(app: AppHandle) -> Result<Option<HardwareProfile>, String> {
    info!("load_hardware_profile called");
    let store = preferences(&app)?;
    match store.get("hardware_profile") {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| format!("Saved hardware profile is malformed: {}", e)),
        None => Ok(None),
    }
}
