//! Declarative flag rendering.
//!
//! Every configurable flag is described once as an [`OptionDescriptor`] and
//! rendered by the same rule: empty or zero values are omitted.

/// Highest verbosity the interpreter understands (`-vvvv`).
pub const MAX_VERBOSITY: u8 = 4;

/// Source value of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionValue<'a> {
    /// Emitted bare when true.
    Presence(bool),
    /// Emitted as `flag value` when non-empty.
    Single(&'a str),
    /// Emitted as `flag value` when non-zero.
    Number(u32),
    /// One `flag value` pair per non-empty element, in order.
    Repeated(&'a [String]),
}

/// A `(flag, value)` pair consumed by [`render_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor<'a> {
    flag: &'static str,
    value: OptionValue<'a>,
}

impl<'a> OptionDescriptor<'a> {
    pub const fn presence(flag: &'static str, value: bool) -> Self {
        Self { flag, value: OptionValue::Presence(value) }
    }

    pub const fn single(flag: &'static str, value: &'a str) -> Self {
        Self { flag, value: OptionValue::Single(value) }
    }

    pub const fn number(flag: &'static str, value: u32) -> Self {
        Self { flag, value: OptionValue::Number(value) }
    }

    pub const fn repeated(flag: &'static str, values: &'a [String]) -> Self {
        Self { flag, value: OptionValue::Repeated(values) }
    }

    /// Append this option's arguments, if any, to `args`.
    pub fn render_into(&self, args: &mut Vec<String>) {
        match self.value {
            OptionValue::Presence(true) => args.push(self.flag.to_string()),
            OptionValue::Presence(false) => {}
            OptionValue::Single(value) => {
                if !value.is_empty() {
                    args.push(self.flag.to_string());
                    args.push(value.to_string());
                }
            }
            OptionValue::Number(value) => {
                if value != 0 {
                    args.push(self.flag.to_string());
                    args.push(value.to_string());
                }
            }
            OptionValue::Repeated(values) => {
                for value in values.iter().filter(|v| !v.is_empty()) {
                    args.push(self.flag.to_string());
                    args.push(value.clone());
                }
            }
        }
    }
}

/// Render every descriptor in order.
pub fn render_options(args: &mut Vec<String>, options: &[OptionDescriptor<'_>]) {
    for option in options {
        option.render_into(args);
    }
}

/// `-v` repeated `level` times, clamped to [`MAX_VERBOSITY`]. Level 0 renders nothing.
pub fn verbosity_flag(level: u8) -> Option<String> {
    if level == 0 {
        return None;
    }
    let count = usize::from(level.min(MAX_VERBOSITY));
    Some(format!("-{}", "v".repeat(count)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn render(option: OptionDescriptor<'_>) -> Vec<String> {
        let mut args = Vec::new();
        option.render_into(&mut args);
        args
    }

    #[test]
    fn presence_flag_only_when_true() {
        assert_eq!(render(OptionDescriptor::presence("--check", true)), vec!["--check"]);
        assert!(render(OptionDescriptor::presence("--check", false)).is_empty());
    }

    #[test]
    fn single_value_omitted_when_empty() {
        assert_eq!(render(OptionDescriptor::single("--user", "deploy")), vec!["--user", "deploy"]);
        assert!(render(OptionDescriptor::single("--user", "")).is_empty());
    }

    #[test]
    fn number_omitted_when_zero() {
        assert_eq!(render(OptionDescriptor::number("--forks", 5)), vec!["--forks", "5"]);
        assert!(render(OptionDescriptor::number("--forks", 0)).is_empty());
    }

    #[test]
    fn repeated_skips_empty_entries() {
        let values = vec!["a=1".to_string(), String::new(), "b=2".to_string()];
        assert_eq!(
            render(OptionDescriptor::repeated("--extra-vars", &values)),
            vec!["--extra-vars", "a=1", "--extra-vars", "b=2"]
        );
    }

    #[test]
    fn render_options_keeps_declaration_order() {
        let mut args = vec!["--inventory".to_string(), "hosts".to_string()];
        render_options(
            &mut args,
            &[
                OptionDescriptor::presence("--diff", true),
                OptionDescriptor::single("--limit", ""),
                OptionDescriptor::presence("--check", true),
            ],
        );
        assert_eq!(args, vec!["--inventory", "hosts", "--diff", "--check"]);
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity_flag(0), None);
        assert_eq!(verbosity_flag(1).as_deref(), Some("-v"));
        assert_eq!(verbosity_flag(3).as_deref(), Some("-vvv"));
        assert_eq!(verbosity_flag(7).as_deref(), Some("-vvvv"));
    }

    proptest! {
        #[test]
        fn verbosity_never_exceeds_four(level in 1u8..=u8::MAX) {
            let flag = verbosity_flag(level).unwrap();
            let vs = flag.len() - 1;
            prop_assert_eq!(vs, usize::from(level.min(4)));
            prop_assert!(flag.starts_with('-'));
        }
    }
}
