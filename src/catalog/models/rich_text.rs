//! Pre-sanitised rich text carried verbatim from the results server.

/// Markup that has been sanitised at the data-source boundary.
///
/// The core never inspects or rewrites the markup. Terminal views use
/// [`RichText::to_plain_text`] to project it into printable lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RichText(String);

/// Tags that start a new line when projected to plain text.
const BLOCK_TAGS: &[&str] = &[
    "br", "p", "div", "li", "tr", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "pre",
];

/// Entities decoded by the plain-text projection.
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

impl RichText {
    /// Wraps markup without modification.
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Returns the stored markup verbatim.
    #[must_use]
    pub fn as_markup(&self) -> &str {
        &self.0
    }

    /// Returns whether the markup is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Projects the markup to plain text lines for terminal display.
    ///
    /// Tags are dropped, block-level tags become line breaks, common
    /// entities are decoded, and blank lines are removed.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let stripped = strip_tags(&self.0);
        let decoded = ENTITIES
            .iter()
            .fold(stripped, |text, (entity, replacement)| {
                text.replace(entity, replacement)
            });

        decoded
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<&str> for RichText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

fn strip_tags(markup: &str) -> String {
    let mut output = String::with_capacity(markup.len());
    let mut tag: Option<String> = None;

    for ch in markup.chars() {
        if let Some(name) = tag.as_mut() {
            if ch == '>' {
                if is_block_tag(name) {
                    output.push('\n');
                }
                tag = None;
            } else {
                name.push(ch);
            }
        } else if ch == '<' {
            tag = Some(String::new());
        } else {
            output.push(ch);
        }
    }

    output
}

fn is_block_tag(raw: &str) -> bool {
    let name: String = raw
        .trim_start_matches('/')
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}
