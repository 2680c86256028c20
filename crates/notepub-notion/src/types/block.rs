//! Content blocks.
//!
//! [`Block`] is the typed document model. On the wire every block becomes a
//! Notion block object of the shape `{"object": "block", "type": T, T: {...}}`;
//! the private `BlockObject` mirror handles that mapping in both directions.

use serde::{Deserialize, Serialize};

use super::rich_text::RichText;
use crate::error::PayloadError;

/// One renderable content unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BlockObject", try_from = "BlockObject")]
pub enum Block {
    Heading {
        level: HeadingLevel,
        text: Vec<RichText>,
    },
    Paragraph(Vec<RichText>),
    Divider,
    Callout {
        /// Emoji icon.
        icon: String,
        text: Vec<RichText>,
    },
    Code {
        /// Notion language tag (`json`, `rust`, `plain text`, ...).
        language: String,
        text: Vec<RichText>,
    },
    Table(Table),
    BulletedListItem(Vec<RichText>),
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<RichText>) -> Self {
        Self::Heading {
            level,
            text: vec![text.into()],
        }
    }

    pub fn paragraph(text: impl IntoIterator<Item = RichText>) -> Self {
        Self::Paragraph(text.into_iter().collect())
    }

    pub fn callout(icon: impl Into<String>, text: impl IntoIterator<Item = RichText>) -> Self {
        Self::Callout {
            icon: icon.into(),
            text: text.into_iter().collect(),
        }
    }

    /// Code block holding `source` as a single unstyled run.
    pub fn code(language: impl Into<String>, source: impl Into<String>) -> Self {
        Self::Code {
            language: language.into(),
            text: vec![RichText::plain(source)],
        }
    }

    pub fn bulleted(text: impl IntoIterator<Item = RichText>) -> Self {
        Self::BulletedListItem(text.into_iter().collect())
    }

    /// All text runs carried by this block, including table cells.
    pub fn rich_text(&self) -> Box<dyn Iterator<Item = &RichText> + '_> {
        match self {
            Self::Heading { text, .. }
            | Self::Paragraph(text)
            | Self::Callout { text, .. }
            | Self::Code { text, .. }
            | Self::BulletedListItem(text) => Box::new(text.iter()),
            Self::Divider => Box::new(std::iter::empty()),
            Self::Table(table) => Box::new(
                table
                    .rows
                    .iter()
                    .flat_map(|row| row.cells.iter().flatten()),
            ),
        }
    }
}

/// Heading level (Notion supports 1 through 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    One,
    Two,
    Three,
}

/// Table with a fixed column count.
///
/// Every row holds exactly `width` cells. [`Table::from_rows`] enforces this
/// at compile time, [`Table::try_new`] at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    width: usize,
    has_column_header: bool,
    has_row_header: bool,
    rows: Vec<TableRow>,
}

/// One table row. Each cell is a sequence of text runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<Vec<RichText>>,
}

impl Table {
    /// Build a table whose width is fixed by the row array length.
    ///
    /// A zero-column table is rejected at compile time.
    pub fn from_rows<const N: usize>(
        has_column_header: bool,
        rows: impl IntoIterator<Item = [Vec<RichText>; N]>,
    ) -> Self {
        const { assert!(N > 0, "a table needs at least one column") };
        Self {
            width: N,
            has_column_header,
            has_row_header: false,
            rows: rows
                .into_iter()
                .map(|cells| TableRow {
                    cells: cells.into(),
                })
                .collect(),
        }
    }

    /// Build a table, checking every row against `width`.
    pub fn try_new(
        width: usize,
        has_column_header: bool,
        has_row_header: bool,
        rows: Vec<TableRow>,
    ) -> Result<Self, PayloadError> {
        let table = Self {
            width,
            has_column_header,
            has_row_header,
            rows,
        };
        table.check()?;
        Ok(table)
    }

    /// Check that the table has columns and every row spans all of them.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::EmptyTable`] for a zero width, or
    /// [`PayloadError::TableRowWidth`] for the first mismatched row.
    pub fn check(&self) -> Result<(), PayloadError> {
        if self.width == 0 {
            return Err(PayloadError::EmptyTable);
        }
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.cells.len() != self.width)
        {
            Some((index, row)) => Err(PayloadError::TableRowWidth {
                row: index,
                expected: self.width,
                actual: row.cells.len(),
            }),
            None => Ok(()),
        }
    }

    /// Mark the first column as a row header.
    #[must_use]
    pub fn with_row_header(mut self) -> Self {
        self.has_row_header = true;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn has_column_header(&self) -> bool {
        self.has_column_header
    }

    pub fn has_row_header(&self) -> bool {
        self.has_row_header
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }
}

// Wire representation.

#[derive(Serialize, Deserialize)]
struct BlockObject {
    object: ObjectKind,
    #[serde(flatten)]
    body: BlockBody,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ObjectKind {
    Block,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BlockBody {
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: TextBody },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: TextBody },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: TextBody },
    Paragraph {
        paragraph: TextBody,
    },
    Divider {
        divider: EmptyBody,
    },
    Callout {
        callout: CalloutBody,
    },
    Code {
        code: CodeBody,
    },
    Table {
        table: TableBody,
    },
    TableRow {
        table_row: TableRowBody,
    },
    BulletedListItem {
        bulleted_list_item: TextBody,
    },
}

#[derive(Serialize, Deserialize)]
struct TextBody {
    rich_text: Vec<RichText>,
}

#[allow(clippy::empty_structs_with_brackets)]
#[derive(Default, Serialize, Deserialize)]
struct EmptyBody {}

#[derive(Serialize, Deserialize)]
struct CalloutBody {
    icon: EmojiIcon,
    rich_text: Vec<RichText>,
}

#[derive(Serialize, Deserialize)]
struct EmojiIcon {
    emoji: String,
}

#[derive(Serialize, Deserialize)]
struct CodeBody {
    language: String,
    rich_text: Vec<RichText>,
}

#[derive(Serialize, Deserialize)]
struct TableBody {
    table_width: usize,
    has_column_header: bool,
    has_row_header: bool,
    #[serde(default)]
    children: Vec<BlockObject>,
}

#[derive(Serialize, Deserialize)]
struct TableRowBody {
    cells: Vec<Vec<RichText>>,
}

impl BlockObject {
    fn new(body: BlockBody) -> Self {
        Self {
            object: ObjectKind::Block,
            body,
        }
    }
}

impl From<Block> for BlockObject {
    fn from(block: Block) -> Self {
        let body = match block {
            Block::Heading { level, text } => {
                let body = TextBody { rich_text: text };
                match level {
                    HeadingLevel::One => BlockBody::Heading1 { heading_1: body },
                    HeadingLevel::Two => BlockBody::Heading2 { heading_2: body },
                    HeadingLevel::Three => BlockBody::Heading3 { heading_3: body },
                }
            }
            Block::Paragraph(text) => BlockBody::Paragraph {
                paragraph: TextBody { rich_text: text },
            },
            Block::Divider => BlockBody::Divider {
                divider: EmptyBody::default(),
            },
            Block::Callout { icon, text } => BlockBody::Callout {
                callout: CalloutBody {
                    icon: EmojiIcon { emoji: icon },
                    rich_text: text,
                },
            },
            Block::Code { language, text } => BlockBody::Code {
                code: CodeBody {
                    language,
                    rich_text: text,
                },
            },
            Block::Table(table) => BlockBody::Table {
                table: TableBody {
                    table_width: table.width,
                    has_column_header: table.has_column_header,
                    has_row_header: table.has_row_header,
                    children: table
                        .rows
                        .into_iter()
                        .map(|row| {
                            Self::new(BlockBody::TableRow {
                                table_row: TableRowBody { cells: row.cells },
                            })
                        })
                        .collect(),
                },
            },
            Block::BulletedListItem(text) => BlockBody::BulletedListItem {
                bulleted_list_item: TextBody { rich_text: text },
            },
        };
        Self::new(body)
    }
}

impl TryFrom<BlockObject> for Block {
    type Error = PayloadError;

    fn try_from(object: BlockObject) -> Result<Self, Self::Error> {
        let block = match object.body {
            BlockBody::Heading1 { heading_1 } => Self::Heading {
                level: HeadingLevel::One,
                text: heading_1.rich_text,
            },
            BlockBody::Heading2 { heading_2 } => Self::Heading {
                level: HeadingLevel::Two,
                text: heading_2.rich_text,
            },
            BlockBody::Heading3 { heading_3 } => Self::Heading {
                level: HeadingLevel::Three,
                text: heading_3.rich_text,
            },
            BlockBody::Paragraph { paragraph } => Self::Paragraph(paragraph.rich_text),
            BlockBody::Divider { .. } => Self::Divider,
            BlockBody::Callout { callout } => Self::Callout {
                icon: callout.icon.emoji,
                text: callout.rich_text,
            },
            BlockBody::Code { code } => Self::Code {
                language: code.language,
                text: code.rich_text,
            },
            BlockBody::Table { table } => {
                let rows = table
                    .children
                    .into_iter()
                    .map(|child| match child.body {
                        BlockBody::TableRow { table_row } => Ok(TableRow {
                            cells: table_row.cells,
                        }),
                        _ => Err(PayloadError::UnexpectedTableChild),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::Table(Table::try_new(
                    table.table_width,
                    table.has_column_header,
                    table.has_row_header,
                    rows,
                )?)
            }
            BlockBody::TableRow { .. } => return Err(PayloadError::OrphanTableRow),
            BlockBody::BulletedListItem { bulleted_list_item } => {
                Self::BulletedListItem(bulleted_list_item.rich_text)
            }
        };
        Ok(block)
    }
}
