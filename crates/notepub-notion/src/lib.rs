//! Notion integration for notepub.
//!
//! This crate provides:
//! - [`types`]: the typed page model ([`Block`], [`RichText`], [`PageRequest`])
//!   with serde mapping to the Notion wire format
//! - [`Publisher`]: single-attempt page creation over a [`Transport`]
//! - [`ApiToken`]: integration token with prefix check and masking
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::time::Duration;
//! use notepub_notion::{ApiToken, Block, HeadingLevel, PageRequest, Publisher};
//!
//! let token = ApiToken::parse("secret_...")?;
//! let publisher = Publisher::from_config(
//!     "https://api.notion.com/v1",
//!     "2022-06-28",
//!     token,
//!     Duration::from_secs(30),
//! );
//!
//! let request = PageRequest::in_database("database-id", "Title")
//!     .with_children([Block::heading(HeadingLevel::One, "Hello")]);
//! let page = publisher.publish(&request)?;
//! println!("{}", page.url.as_deref().unwrap_or("(no url)"));
//! # Ok(())
//! # }
//! ```

// Token handling
mod auth;
pub use auth::{ApiToken, TOKEN_PREFIXES};

// HTTP transport
mod client;
pub use client::{HttpResponse, Transport, UreqTransport};

// Page creation
mod publisher;
pub use publisher::{PublishResult, Publisher, PublisherSettings};

// Payload types
pub mod types;
pub use types::{Block, HeadingLevel, PageRequest, RichText, Table};

// Errors
pub mod error;
pub use error::NotionError;
