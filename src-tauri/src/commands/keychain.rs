use keyring::Entry;
use tracing::{info, warn};

use crate::error::GameDockError;

#[tauri::command]
pub fn set_api_key(service: &str, key: &str) -> Result<(), String> {
    info!("Setting API key for service: {}", service);
    let entry = Entry::new(service, "gamedock").map_err(|e| {
        warn!("Failed to create keyring entry for {}: {}", service, e);
        GameDockError::Keychain(e.to_string())
    })?;
    entry.set_password(key).map_err(|e| {
        warn!("Failed to set password for {}: {}", service, e);
        GameDockError::Keychain(e.to_string()).into()
    })
}

#[tauri::command]
pub fn get_api_key(service: &str) -> Result<Option<String>, String> {
    info!("Getting API key for service: {}", service);
    let entry = Entry::new(service, "gamedock").map_err(|e| {
        warn!("Failed to create keyring entry for {}: {}", service, e);
        GameDockError::Keychain(e.to_string())
    })?;
    match entry.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => {
            info!("No API key found for service: {}", service);
            Ok(None)
        }
        Err(e) => {
            warn!("Failed to get password for {}: {}", service, e);
            Err(GameDockError::Keychain(e.to_string()).into())
        }
    }
}

#[tauri::command]
pub fn delete_api_key(service: &str) -> Result<(), String> {
    info!("Deleting API key for service: {}", service);
    let entry = Entry::new(service, "gamedock").map_err(|e| {
        warn!("Failed to create keyring entry for {}: {}", service, e);
        GameDockError::Keychain(e.to_string())
    })?;
    entry.delete_credential().map_err(|e| {
        warn!("Failed to delete credential for {}: {}", service, e);
        GameDockError::Keychain(e.to_string()).into()
    })
}

/// Read a required API key for one of the integrated services.
/// Maps a friendly service name to its keyring identifier and turns a
/// missing key into a settings hint. Shared by the other command modules.
pub fn require_api_key(service: &str) -> Result<String, String> {
    let service_id = match service {
        "steam" => "gamedock-steam-api",
        "rawg" => "gamedock-rawg-api",
        "itad" => "gamedock-itad-api",
        "groq" => "gamedock-groq-api",
        _ => {
            return Err(format!(
                "Unknown service: '{}'. Supported: steam, rawg, itad, groq",
                service
            ))
        }
    };
    let entry = Entry::new(service_id, "gamedock")
        .map_err(|e| GameDockError::Keychain(e.to_string()))?;
    match entry.get_password() {
        Ok(key) => Ok(key),
        Err(keyring::Error::NoEntry) => Err(format!(
            "No API key configured for '{}'. Please set it in Settings.",
            service
        )),
        Err(e) => Err(GameDockError::Keychain(format!(
            "Failed to read API key for '{}': {}",
            service, e
        ))
        .into()),
    }
}
