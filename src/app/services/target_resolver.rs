//! Playbook target resolution.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::{AppError, ResolvedTarget, is_collection_reference};

/// Service turning playbook patterns into concrete, validated targets.
pub struct TargetResolver;

impl TargetResolver {
    /// Resolve patterns in order.
    ///
    /// Collection references are accepted verbatim. Anything else is glob
    /// expanded; every match must still exist. A pattern with no matches must
    /// exist as a literal path.
    pub fn resolve(patterns: &[String]) -> Result<Vec<ResolvedTarget>, AppError> {
        if patterns.is_empty() {
            return Err(AppError::NoTargetsSpecified);
        }

        let mut resolved = Vec::new();
        for pattern in patterns {
            if is_collection_reference(pattern) {
                debug!(%pattern, "collection playbook reference");
                resolved.push(ResolvedTarget::collection(pattern.as_str()));
                continue;
            }

            let matches = expand_glob(pattern)?;
            if matches.is_empty() {
                require_exists(pattern)?;
                resolved.push(ResolvedTarget::local(pattern.as_str()));
                continue;
            }

            for path in matches {
                require_exists(&path)?;
                resolved.push(ResolvedTarget::local(path));
            }
        }

        if resolved.is_empty() {
            return Err(AppError::NoTargetsResolved);
        }
        debug!(count = resolved.len(), "resolved playbooks");
        Ok(resolved)
    }
}

/// Glob matches in traversal order. An invalid pattern yields no matches so
/// it falls back to literal lookup.
fn expand_glob(pattern: &str) -> Result<Vec<String>, AppError> {
    let Ok(entries) = glob::glob(pattern) else {
        return Ok(Vec::new());
    };

    let mut matches = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => matches.push(path.to_string_lossy().into_owned()),
            Err(e) => {
                let target = e.path().to_string_lossy().into_owned();
                return Err(AppError::TargetNotFound { target, source: Some(e.into_error()) });
            }
        }
    }
    Ok(matches)
}

fn require_exists(path: &str) -> Result<(), AppError> {
    fs::metadata(Path::new(path))
        .map(|_| ())
        .map_err(|e| AppError::TargetNotFound { target: path.to_string(), source: Some(e) })
}
