//! Notion API payload types.

mod block;
mod page;
mod rich_text;

pub use block::{Block, HeadingLevel, Table, TableRow};
pub use page::{CreatedPage, MAX_CHILDREN, MAX_TEXT_LENGTH, PageRequest, Parent, PropertyValue};
pub use rich_text::{Annotations, Color, RichText};
