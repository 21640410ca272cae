// SPDX-License-Identifier: MPL-2.0
//! Deferred, translatable text.

use super::fluent::I18n;

/// Text shown to the user, either literal or resolved from a Fluent key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// Literal text, shown as-is.
    Text(String),
    /// Fluent message key with optional placeholder arguments.
    Key {
        key: &'static str,
        args: Vec<(&'static str, String)>,
    },
}

impl Label {
    /// Creates a label resolved from the given Fluent key.
    #[must_use]
    pub fn key(key: &'static str) -> Self {
        Self::Key {
            key,
            args: Vec::new(),
        }
    }

    /// Creates a literal label.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Adds a placeholder argument. No-op on literal labels.
    #[must_use]
    pub fn with_arg(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Self::Key { args, .. } = &mut self {
            args.push((name, value.into()));
        }
        self
    }

    /// Returns the Fluent key, if this label is translatable.
    #[must_use]
    pub fn key_name(&self) -> Option<&'static str> {
        match self {
            Self::Key { key, .. } => Some(key),
            Self::Text(_) => None,
        }
    }

    /// Resolves the label in the current locale.
    #[must_use]
    pub fn resolve(&self, i18n: &I18n) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Key { key, args } if args.is_empty() => i18n.tr(key),
            Self::Key { key, args } => {
                let args: Vec<(&str, &str)> = args
                    .iter()
                    .map(|(name, value)| (*name, value.as_str()))
                    .collect();
                i18n.tr_with_args(key, &args)
            }
        }
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_arg_is_ignored_for_literal_text() {
        let label = Label::text("hello").with_arg("name", "bob");
        assert_eq!(label, Label::Text("hello".to_string()));
    }

    #[test]
    fn with_arg_accumulates_on_keys() {
        let label = Label::key("dialog-ban-confirm").with_arg("username", "bob");
        match label {
            Label::Key { key, args } => {
                assert_eq!(key, "dialog-ban-confirm");
                assert_eq!(args, vec![("username", "bob".to_string())]);
            }
            Label::Text(_) => panic!("expected a key label"),
        }
    }

    #[test]
    fn literal_resolves_verbatim() {
        let i18n = I18n::default();
        assert_eq!(Label::from("as is").resolve(&i18n), "as is");
    }
}
