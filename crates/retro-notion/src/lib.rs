// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! retro-notion: Notion page creation for daily-retro
//!
//! This library crate provides typed request bodies for the parts of the
//! Notion page schema daily-retro uses (title and date properties, paragraph
//! and code blocks) and a small async client for `POST /pages`.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use retro_notion::{Block, CreatePageRequest, NotionClient};
//!
//! # async fn run() -> Result<(), retro_notion::NotionError> {
//! let date = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
//! let request = CreatePageRequest::in_database("0123abcd")
//!     .title("Name", "회고록 - 2026-01-16")
//!     .date("날짜", date)
//!     .child(Block::paragraph("오늘의 회고"));
//!
//! let client = NotionClient::new("secret_...")?;
//! let page = client.create_page(&request).await?;
//! println!("{}", page.url);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod block;
pub mod client;
pub mod error;
pub mod page;

pub use block::{
    Block, BlockContent, CodeBlock, MAX_RICH_TEXT_ITEMS, MAX_TEXT_LEN, ParagraphBlock, RichText,
    rich_text_chunks,
};
pub use client::{NOTION_VERSION, NotionClient};
pub use error::NotionError;
pub use page::{CreatePageRequest, DateValue, Page, Parent, PropertyValue};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::block::{Block, RichText};
    pub use crate::client::NotionClient;
    pub use crate::error::NotionError;
    pub use crate::page::{CreatePageRequest, Page};
}
