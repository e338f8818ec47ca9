//! The minimal Patient resource posted alongside generated statements.

use serde::Serialize;

use crate::types::{Identifier, Meta};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    #[serde(rename = "resourceType")]
    resource_type: &'static str,
    /// Client-assigned id, only set when writing resources to files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub meta: Meta,
    pub identifier: Vec<Identifier>,
}

impl Patient {
    pub fn new(meta: Meta, identifier: Identifier) -> Self {
        Self {
            resource_type: "Patient",
            id: None,
            meta,
            identifier: vec![identifier],
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
