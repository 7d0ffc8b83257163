// Copyright (c) 2026 - present daily-retro contributors
// SPDX-License-Identifier: MIT

//! Page creation request and response types

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::block::{Block, RichText, rich_text_chunks};

/// Database a new page is created in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parent {
    /// Database ID
    pub database_id: String,
}

/// Value of a date property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateValue {
    /// Start date, serialized as `YYYY-MM-DD`
    pub start: NaiveDate,
}

/// Value of a page property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    /// The database's title column
    Title(Vec<RichText>),
    /// A date column
    Date(DateValue),
}

/// Body of `POST /pages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePageRequest {
    /// Database the page belongs to
    pub parent: Parent,
    /// Property values keyed by column name
    pub properties: BTreeMap<String, PropertyValue>,
    /// Page body
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

impl CreatePageRequest {
    /// Start a request for a page in `database_id`
    #[must_use]
    pub fn in_database(database_id: impl Into<String>) -> Self {
        Self {
            parent: Parent {
                database_id: database_id.into(),
            },
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Set the title column `name` to `text`
    #[must_use]
    pub fn title(mut self, name: impl Into<String>, text: &str) -> Self {
        self.properties
            .insert(name.into(), PropertyValue::Title(rich_text_chunks(text)));
        self
    }

    /// Set the date column `name` to `date`
    #[must_use]
    pub fn date(mut self, name: impl Into<String>, date: NaiveDate) -> Self {
        self.properties
            .insert(name.into(), PropertyValue::Date(DateValue { start: date }));
        self
    }

    /// Append a child block
    #[must_use]
    pub fn child(mut self, block: Block) -> Self {
        self.children.push(block);
        self
    }

    /// Append several child blocks in order
    #[must_use]
    pub fn children(mut self, blocks: impl IntoIterator<Item = Block>) -> Self {
        self.children.extend(blocks);
        self
    }
}

/// A created page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Page {
    /// Page ID
    pub id: String,
    /// Public URL of the page
    pub url: String,
}
