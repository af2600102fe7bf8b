//! Markdown segment rendering.
//!
//! Pure string builders. Gating happens in the reporter before any of
//! these run.

use serde::{Deserialize, Serialize};

const FENCE: &str = "```";

/// Header order, `#` through `#####`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeaderLevel {
    H1,
    #[default]
    H2,
    H3,
    H4,
    H5,
}

impl HeaderLevel {
    pub fn order(self) -> u8 {
        match self {
            Self::H1 => 1,
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
            Self::H5 => 5,
        }
    }
}

impl TryFrom<u8> for HeaderLevel {
    type Error = String;

    fn try_from(order: u8) -> Result<Self, Self::Error> {
        match order {
            1 => Ok(Self::H1),
            2 => Ok(Self::H2),
            3 => Ok(Self::H3),
            4 => Ok(Self::H4),
            5 => Ok(Self::H5),
            other => Err(format!("header level must be between 1 and 5, got {other}")),
        }
    }
}

impl From<HeaderLevel> for u8 {
    fn from(level: HeaderLevel) -> Self {
        level.order()
    }
}

/// Join `parts` with a single space.
pub fn join_parts<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(part.as_ref());
    }
    out
}

/// `## text\n`
pub fn header(text: &str, level: HeaderLevel) -> String {
    format!("{} {text}\n", "#".repeat(usize::from(level.order())))
}

/// Paragraph text; `::` is shorthand for an inline-code backtick.
pub fn paragraph<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = join_parts(parts);
    format!("{}\n", joined.replace("::", "`"))
}

/// Fenced code block with optional language tag and leading comment line.
pub fn code_block(code: &str, lang: Option<&str>, comment: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(FENCE);
    out.push_str(lang.unwrap_or_default());
    out.push('\n');
    if let Some(comment) = comment.filter(|c| !c.is_empty()) {
        out.push_str("// ");
        out.push_str(comment);
        out.push_str("\n\n");
    }
    out.push_str(code);
    out.push('\n');
    out.push_str(FENCE);
    out.push('\n');
    out
}

/// Pretty-printed JSON (two-space indent) in a `JSON` block.
pub fn json_block<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let pretty = serde_json::to_string_pretty(value)?;
    Ok(code_block(&pretty, Some("JSON"), None))
}
