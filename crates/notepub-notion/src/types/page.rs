//! Notion page types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::rich_text::RichText;
use crate::error::PayloadError;

/// Maximum number of top-level children accepted in one create request.
pub const MAX_CHILDREN: usize = 100;

/// Maximum length of a single rich text content string.
pub const MAX_TEXT_LENGTH: usize = 2000;

/// Request body for `POST /pages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Where the page is created.
    pub parent: Parent,
    /// Page properties keyed by property name.
    pub properties: BTreeMap<String, PropertyValue>,
    /// Page content, in display order.
    #[serde(default)]
    pub children: Vec<Block>,
}

impl PageRequest {
    /// Create a page request in a database with a `Name` title property.
    pub fn in_database(database_id: impl Into<String>, title: impl Into<RichText>) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(
            "Name".to_owned(),
            PropertyValue::Title(vec![title.into()]),
        );
        Self {
            parent: Parent::Database {
                database_id: database_id.into(),
            },
            properties,
            children: Vec::new(),
        }
    }

    /// Append content blocks.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Block>) -> Self {
        self.children.extend(children);
        self
    }

    /// Target database ID.
    pub fn database_id(&self) -> &str {
        match &self.parent {
            Parent::Database { database_id } => database_id,
        }
    }

    /// Plain text of the title property, if any.
    pub fn title(&self) -> Option<String> {
        self.properties.values().find_map(|value| match value {
            PropertyValue::Title(text) => {
                Some(text.iter().map(|r| r.content.as_str()).collect())
            }
            PropertyValue::RichText(_) => None,
        })
    }

    /// Check the request against the limits Notion enforces on create.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.database_id().is_empty() {
            return Err(PayloadError::MissingDatabaseId);
        }
        if self.children.len() > MAX_CHILDREN {
            return Err(PayloadError::TooManyChildren {
                count: self.children.len(),
                max: MAX_CHILDREN,
            });
        }

        let property_text = self.properties.values().flat_map(|value| match value {
            PropertyValue::Title(text) | PropertyValue::RichText(text) => text.iter(),
        });
        let block_text = self.children.iter().flat_map(Block::rich_text);

        for run in property_text.chain(block_text) {
            let length = run.char_count();
            if length > MAX_TEXT_LENGTH {
                return Err(PayloadError::TextTooLong {
                    length,
                    max: MAX_TEXT_LENGTH,
                });
            }
        }

        for block in &self.children {
            if let Block::Table(table) = block {
                table.check()?;
            }
        }

        Ok(())
    }
}

/// Parent of a new page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Parent {
    Database { database_id: String },
}

/// Value of one page property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
}

/// Page returned by a successful create.
///
/// Both fields are optional: a 200 means the page exists even when the
/// response omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreatedPage {
    /// Page ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Canonical web URL.
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::block::HeadingLevel;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = PageRequest::in_database("db-1", "Hello")
            .with_children([Block::heading(HeadingLevel::One, "Top")]);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["parent"], json!({"database_id": "db-1"}));
        assert_eq!(
            value["properties"],
            json!({"Name": {"title": [{"type": "text", "text": {"content": "Hello"}}]}})
        );
        assert_eq!(value["children"][0]["type"], "heading_1");
    }

    #[test]
    fn test_rich_text_property_name() {
        let value = serde_json::to_value(PropertyValue::RichText(vec!["x".into()])).unwrap();
        assert_eq!(
            value,
            json!({"rich_text": [{"type": "text", "text": {"content": "x"}}]})
        );
    }

    #[test]
    fn test_title_and_database_id_accessors() {
        let request = PageRequest::in_database("db-1", "Hello");
        assert_eq!(request.database_id(), "db-1");
        assert_eq!(request.title().as_deref(), Some("Hello"));
    }

    #[test]
    fn test_validate_ok() {
        let request = PageRequest::in_database("db-1", "Hello").with_children([Block::Divider]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_database_id() {
        let request = PageRequest::in_database("", "Hello");
        assert!(matches!(
            request.validate(),
            Err(PayloadError::MissingDatabaseId)
        ));
    }

    #[test]
    fn test_validate_too_many_children() {
        let request = PageRequest::in_database("db-1", "Hello")
            .with_children(std::iter::repeat_n(Block::Divider, MAX_CHILDREN + 1));
        assert!(matches!(
            request.validate(),
            Err(PayloadError::TooManyChildren { count: 101, max: 100 })
        ));
    }

    #[test]
    fn test_validate_text_too_long_in_block() {
        let long = "a".repeat(MAX_TEXT_LENGTH + 1);
        let request = PageRequest::in_database("db-1", "Hello")
            .with_children([Block::code("plain text", long)]);
        assert!(matches!(
            request.validate(),
            Err(PayloadError::TextTooLong { length: 2001, .. })
        ));
    }

    #[test]
    fn test_validate_text_too_long_in_title() {
        let request = PageRequest::in_database("db-1", "a".repeat(MAX_TEXT_LENGTH + 1).as_str());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_text_at_limit_is_accepted() {
        let request = PageRequest::in_database("db-1", "Hello")
            .with_children([Block::code("plain text", "a".repeat(MAX_TEXT_LENGTH))]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_created_page_ignores_extra_fields() {
        let page: CreatedPage = serde_json::from_value(json!({
            "object": "page",
            "id": "X",
            "url": "Y",
            "created_time": "2025-06-11T00:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(
            page,
            CreatedPage {
                id: Some("X".to_owned()),
                url: Some("Y".to_owned())
            }
        );
    }

    #[test]
    fn test_created_page_tolerates_missing_fields() {
        let page: CreatedPage = serde_json::from_value(json!({"object": "page"})).unwrap();
        assert_eq!(page, CreatedPage::default());
    }
}
