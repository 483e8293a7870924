use std::fs;
use std::path::Path;

use crate::domain::{
    AppError, KeyEnvelope, SecretRole, normalize_line_endings, validate_key_envelope,
};

/// Validate the private key envelope of an existing key file.
pub fn execute(path: &Path) -> Result<KeyEnvelope, AppError> {
    let content = fs::read_to_string(path)
        .map_err(|source| AppError::ReadFile { path: path.to_path_buf(), source })?;
    validate_key_envelope(&normalize_line_endings(&content)).map_err(|reason| {
        AppError::InvalidCredentialMaterial { role: SecretRole::PrivateKey, reason }
    })
}
