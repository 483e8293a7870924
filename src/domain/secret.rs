//! Credential material rules: line-ending normalization and private key envelopes.

use std::fmt;

const MARKER_DASHES: &str = "-----";
const BEGIN_PREFIX: &str = "-----BEGIN ";
const END_PREFIX: &str = "-----END ";
const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

/// Kind of secret being materialized. Only `PrivateKey` is structurally validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretRole {
    PrivateKey,
    VaultPassword,
}

impl SecretRole {
    /// File name prefix for staged files of this role.
    pub fn file_prefix(self) -> &'static str {
        match self {
            SecretRole::PrivateKey => "ansible-key-",
            SecretRole::VaultPassword => "ansible-vault-",
        }
    }

    pub fn requires_envelope(self) -> bool {
        matches!(self, SecretRole::PrivateKey)
    }
}

impl fmt::Display for SecretRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretRole::PrivateKey => f.write_str("private key"),
            SecretRole::VaultPassword => f.write_str("vault password"),
        }
    }
}

/// Coerce CRLF and bare CR to LF and guarantee a trailing LF.
pub fn normalize_line_endings(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

/// Private key envelope type, e.g. `RSA` or empty for PKCS#8 `PRIVATE KEY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEnvelope {
    pub key_type: String,
}

/// Check that `content` holds a `BEGIN ... PRIVATE KEY` marker followed by an
/// `END` marker declaring the same type.
pub fn validate_key_envelope(content: &str) -> Result<KeyEnvelope, String> {
    let (begin_type, body_start) = find_begin_marker(content)
        .ok_or_else(|| "missing BEGIN PRIVATE KEY marker".to_string())?;

    let rest = &content[body_start..];
    let end_offset = rest
        .find(END_PREFIX)
        .ok_or_else(|| format!("missing END marker for {}", describe(&begin_type)))?;
    let end_label = marker_label(&rest[end_offset + END_PREFIX.len()..])
        .ok_or_else(|| "unterminated END marker".to_string())?;

    let end_type = key_type_of(end_label);
    if end_type.as_deref() != Some(begin_type.as_str()) {
        return Err(format!(
            "BEGIN {} does not match END {}",
            describe(&begin_type),
            end_label
        ));
    }

    Ok(KeyEnvelope { key_type: begin_type })
}

/// First BEGIN marker whose label is a private key. Returns its type and the
/// offset just past the marker.
fn find_begin_marker(content: &str) -> Option<(String, usize)> {
    let mut offset = 0;
    while let Some(found) = content[offset..].find(BEGIN_PREFIX) {
        let label_start = offset + found + BEGIN_PREFIX.len();
        if let Some(label) = marker_label(&content[label_start..]) {
            let marker_end = label_start + label.len() + MARKER_DASHES.len();
            if let Some(key_type) = key_type_of(label) {
                return Some((key_type, marker_end));
            }
            offset = marker_end;
        } else {
            return None;
        }
    }
    None
}

/// Text between a marker prefix and its closing dashes, on the same line.
fn marker_label(after_prefix: &str) -> Option<&str> {
    let close = after_prefix.find(MARKER_DASHES)?;
    let label = &after_prefix[..close];
    if label.contains('\n') { None } else { Some(label) }
}

/// `"RSA PRIVATE KEY"` -> `Some("RSA")`, `"PRIVATE KEY"` -> `Some("")`,
/// `"CERTIFICATE"` -> `None`.
fn key_type_of(label: &str) -> Option<String> {
    let prefix = label.strip_suffix(PRIVATE_KEY_LABEL)?;
    if prefix.is_empty() {
        return Some(String::new());
    }
    let key_type = prefix.strip_suffix(' ')?;
    let valid = !key_type.is_empty()
        && key_type.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == ' ');
    valid.then(|| key_type.to_string())
}

fn describe(key_type: &str) -> String {
    if key_type.is_empty() {
        PRIVATE_KEY_LABEL.to_string()
    } else {
        format!("{} {}", key_type, PRIVATE_KEY_LABEL)
    }
}
