//! Rich text runs.

use serde::{Deserialize, Serialize};

/// One span of literal text with optional styling.
///
/// Serializes as a Notion `text` rich text object:
/// `{"type": "text", "text": {"content": ...}, "annotations": {...}}`.
/// Annotations are omitted entirely when every flag is at its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RichTextObject", from = "RichTextObject")]
pub struct RichText {
    /// Literal text content.
    pub content: String,
    /// Optional hyperlink target.
    pub link: Option<String>,
    /// Style flags.
    pub annotations: Annotations,
}

impl RichText {
    /// Unstyled text run.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            link: None,
            annotations: Annotations::default(),
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.annotations.bold = true;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.annotations.italic = true;
        self
    }

    #[must_use]
    pub fn strikethrough(mut self) -> Self {
        self.annotations.strikethrough = true;
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.annotations.underline = true;
        self
    }

    /// Inline code formatting.
    #[must_use]
    pub fn code(mut self) -> Self {
        self.annotations.code = true;
        self
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.annotations.color = color;
        self
    }

    #[must_use]
    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    /// Number of characters in the content, as counted by Notion's length limit.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

impl From<&str> for RichText {
    fn from(content: &str) -> Self {
        Self::plain(content)
    }
}

/// Independent style flags of a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub code: bool,
    #[serde(skip_serializing_if = "Color::is_default")]
    pub color: Color,
}

impl Annotations {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !value
}

/// Notion text and background colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    GrayBackground,
    BrownBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
    RedBackground,
}

impl Color {
    #[allow(clippy::trivially_copy_pass_by_ref)]
    fn is_default(&self) -> bool {
        *self == Self::Default
    }
}

// Wire representation.

#[derive(Serialize, Deserialize)]
struct RichTextObject {
    #[serde(rename = "type")]
    kind: TextKind,
    text: TextContent,
    #[serde(default, skip_serializing_if = "Annotations::is_default")]
    annotations: Annotations,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TextKind {
    Text,
}

#[derive(Serialize, Deserialize)]
struct TextContent {
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<LinkObject>,
}

#[derive(Serialize, Deserialize)]
struct LinkObject {
    url: String,
}

impl From<RichText> for RichTextObject {
    fn from(run: RichText) -> Self {
        Self {
            kind: TextKind::Text,
            text: TextContent {
                content: run.content,
                link: run.link.map(|url| LinkObject { url }),
            },
            annotations: run.annotations,
        }
    }
}

impl From<RichTextObject> for RichText {
    fn from(object: RichTextObject) -> Self {
        Self {
            content: object.text.content,
            link: object.text.link.map(|l| l.url),
            annotations: object.annotations,
        }
    }
}
