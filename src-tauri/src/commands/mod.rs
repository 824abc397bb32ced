pub mod compat;
pub mod config;
pub mod deals;
pub mod health;
pub mod hltb;
pub mod keychain;
pub mod library;
