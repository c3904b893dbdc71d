//! API key lookup: environment first, then the OS keyring.

use crate::error::ApiError;

pub const API_KEY_ENV: &str = "STUDYROOM_GEMINI_API_KEY";
pub const API_KEY_ENTRY: &str = "gemini_api_key";

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    use crate::error::ApiError;

    const SERVICE: &str = "studyroom";

    pub fn get(key: &str) -> Result<Option<String>, ApiError> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), ApiError> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), ApiError> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Where a resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Env,
    Keyring,
}

pub fn resolve_api_key() -> Result<(String, KeySource), ApiError> {
    if let Some(key) = key_from_env() {
        return Ok((key, KeySource::Env));
    }
    match keyring_store::get(API_KEY_ENTRY)? {
        Some(key) if !key.trim().is_empty() => Ok((key, KeySource::Keyring)),
        _ => Err(ApiError::MissingApiKey),
    }
}

fn key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

pub fn store_api_key(key: &str) -> Result<(), ApiError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ApiError::MissingApiKey);
    }
    keyring_store::set(API_KEY_ENTRY, key)
}

pub fn clear_api_key() -> Result<(), ApiError> {
    keyring_store::delete(API_KEY_ENTRY)
}
