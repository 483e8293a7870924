use std::fmt;

/// Where a resolved playbook lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Local file that existed at resolution time.
    Local,
    /// `namespace.collection.playbook` reference resolved by the interpreter.
    Collection,
}

/// A playbook reference ready to be passed as a positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    reference: String,
    kind: TargetKind,
}

impl ResolvedTarget {
    pub fn local(path: impl Into<String>) -> Self {
        Self { reference: path.into(), kind: TargetKind::Local }
    }

    pub fn collection(reference: impl Into<String>) -> Self {
        Self { reference: reference.into(), kind: TargetKind::Collection }
    }

    pub fn as_str(&self) -> &str {
        &self.reference
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }
}

impl fmt::Display for ResolvedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference)
    }
}

/// True for exactly three dot-separated identifier segments, e.g.
/// `my_namespace.my_collection.site`.
pub fn is_collection_reference(pattern: &str) -> bool {
    let segments: Vec<&str> = pattern.split('.').collect();
    segments.len() == 3 && segments.iter().all(|segment| is_identifier(segment))
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn detects_collection_references() {
        assert!(is_collection_reference("namespace.collection.playbook"));
        assert!(is_collection_reference("my_namespace.my_collection.my_playbook"));
    }

    #[test]
    fn rejects_paths_and_patterns() {
        for reference in [
            "playbook.yml",
            "./playbooks/site.yml",
            "/etc/ansible/playbook.yml",
            "playbook",
            "*.yml",
            "a..b",
            "ns.col.play.extra",
            "ns.col-name.play",
            "1ns.col.play",
        ] {
            assert!(!is_collection_reference(reference), "{reference} is not a collection reference");
        }
    }

    proptest! {
        #[test]
        fn identifier_triples_are_collection_references(
            ns in "[a-z_][a-z0-9_]{0,12}",
            col in "[a-z_][a-z0-9_]{0,12}",
            play in "[A-Za-z_][A-Za-z0-9_]{0,12}",
        ) {
            let reference = format!("{ns}.{col}.{play}");
            prop_assert!(is_collection_reference(&reference));
        }
    }
}
