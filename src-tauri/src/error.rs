use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameDockError {
    #[error("Keychain error: {0}")]
    Keychain(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Library error: {0}")]
    Library(String),

    #[error("Deals error: {0}")]
    Deals(String),
}

impl From<GameDockError> for String {
    fn from(err: GameDockError) -> Self {
        err.to_string()
    }
}
