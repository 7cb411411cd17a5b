use serde::{Deserialize, Serialize};
use std::fmt;

/// A spending/saving category. The name is the stable identity key; the
/// emoji is display-only decoration.
///
/// Older clients encoded categories as a single string, either "emoji|name"
/// or "emoji name". `parse` accepts both encodings plus a plain name so
/// legacy data keeps loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub emoji: Option<String>,
    pub name: String,
}

impl Category {
    pub fn new(emoji: Option<String>, name: impl Into<String>) -> Self {
        Category {
            emoji,
            name: name.into(),
        }
    }

    /// Parses a raw category tag into its structured form.
    pub fn parse(raw: &str) -> Category {
        let raw = raw.trim();

        if let Some((emoji_part, name_part)) = raw.split_once('|') {
            let emoji_part = emoji_part.trim();
            let name_part = name_part.trim();
            if !name_part.is_empty() {
                let emoji = (!emoji_part.is_empty()).then(|| emoji_part.to_string());
                return Category::new(emoji, name_part);
            }
        }

        // "emoji name": a leading whitespace-delimited token with no
        // alphanumeric characters is treated as the emoji.
        if let Some((first, rest)) = raw.split_once(char::is_whitespace) {
            let rest = rest.trim();
            if !rest.is_empty() && looks_like_emoji(first) {
                return Category::new(Some(first.to_string()), rest);
            }
        }

        Category::new(None, raw)
    }
}

fn looks_like_emoji(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(|c| c.is_alphanumeric())
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.emoji {
            Some(emoji) => write!(f, "{} {}", emoji, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
