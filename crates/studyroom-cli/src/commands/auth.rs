use clap::Subcommand;
use studyroom_core::ai::credentials::API_KEY_ENV;
use studyroom_core::ai::{clear_api_key, resolve_api_key, store_api_key, KeySource};
use studyroom_core::ApiError;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the Gemini API key in the OS keyring
    SetKey {
        /// API key
        key: String,
    },
    /// Remove the stored API key
    Clear,
    /// Show where the API key would be read from
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetKey { key } => {
            store_api_key(&key)?;
            println!("API key stored in keyring");
        }
        AuthAction::Clear => {
            clear_api_key()?;
            println!("API key removed from keyring");
        }
        AuthAction::Status => match resolve_api_key() {
            Ok((_, KeySource::Env)) => println!("configured (from {API_KEY_ENV})"),
            Ok((_, KeySource::Keyring)) => println!("configured (from keyring)"),
            Err(ApiError::MissingApiKey) => println!("not configured"),
            Err(e) => return Err(e.into()),
        },
    }
    Ok(())
}
