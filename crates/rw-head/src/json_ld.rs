//! Structured-data (JSON-LD) blocks.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::escape::escape_script_close;

/// Vocabulary every block is bound to. Always overwrites caller input.
pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// MIME type of the script element carrying a block.
pub const JSON_LD_MIME: &str = "application/ld+json";

/// One structured-data object destined for a `<script type="application/ld+json">`.
///
/// Blocks are expected to carry `@type`. Any `@context` supplied by the
/// caller is discarded when the block is encoded. Keys serialize in
/// insertion order; an injected `@context` goes last unless the caller
/// already placed one.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct JsonLdBlock(Map<String, Value>);

impl JsonLdBlock {
    /// Create a block with the given `@type`.
    #[must_use]
    pub fn new(schema_type: impl Into<String>) -> Self {
        let schema_type: String = schema_type.into();
        Self::default().with("@type", schema_type)
    }

    /// Builder-style field insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Serialize to script-safe JSON with the schema.org context injected.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut object = self.0.clone();
        object.insert("@context".to_owned(), Value::from(SCHEMA_CONTEXT));
        let json = Value::Object(object).to_string();
        escape_script_close(&json).into_owned()
    }
}

impl From<Map<String, Value>> for JsonLdBlock {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
