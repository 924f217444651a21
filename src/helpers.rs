/// Reads `name` from the environment; unset or non-unicode values are `None`.
pub fn read_optional_env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Loads `.env` from the working directory. A missing file is fine.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("loaded environment from {}", path.display()),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("failed to load .env file: {e}"),
    }
}
