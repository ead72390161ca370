use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::plan::DefinitionKind;

/// File name of the service description inside a build directory.
pub const DESCRIPTION_FILE: &str = "service_description.json";

/// A parsed `service_description.json`.
///
/// Only `id.value`, `dockerRoleDefinitions` and `dockerContextDefinitions`
/// are interpreted. Every other key is kept as-is (including key order) so
/// the published document matches the input apart from rewritten image ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ServiceDescription {
    document: Value,
}

impl ServiceDescription {
    /// Load `<build_path>/service_description.json`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::MissingFile`] if the file does not exist
    /// - [`crate::Error::ReadFile`] for any other I/O failure
    /// - [`crate::Error::MalformedDescription`] if the content is not valid JSON
    /// - [`crate::Error::InvalidField`] if the top level is not a JSON object
    pub fn load(build_path: &Path) -> crate::Result<Self> {
        let path = build_path.join(DESCRIPTION_FILE);
        tracing::debug!(path = %path.display(), "loading service description");

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(crate::Error::MissingFile { path });
            }
            Err(e) => return Err(crate::Error::ReadFile { path, source: e }),
        };

        let document: Value = serde_json::from_str(&content)
            .map_err(|e| crate::Error::MalformedDescription { path, source: e })?;

        Self::from_value(document)
    }

    /// Wrap an already-parsed JSON document.
    pub fn from_value(document: Value) -> crate::Result<Self> {
        if !document.is_object() {
            return Err(crate::Error::InvalidField {
                pointer: String::new(),
                expected: "a JSON object",
            });
        }
        Ok(Self { document })
    }

    /// The service name (`id.value`).
    pub fn service_id(&self) -> crate::Result<&str> {
        non_empty_str(&self.document, "/id/value")
    }

    /// Look up a value by JSON pointer (RFC 6901).
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.document.pointer(pointer)
    }

    pub fn as_value(&self) -> &Value {
        &self.document
    }

    /// Compact JSON, as published.
    pub fn to_json(&self) -> String {
        self.document.to_string()
    }

    /// Indented JSON, for `--pretty-print`.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.document)
    }

    pub(crate) fn definitions(&self, kind: DefinitionKind) -> crate::Result<&[Value]> {
        let pointer = format!("/{}", kind.field());
        match self.document.pointer(&pointer) {
            Some(Value::Array(entries)) => Ok(entries.as_slice()),
            Some(_) => Err(crate::Error::InvalidField {
                pointer,
                expected: "an array",
            }),
            None => Err(crate::Error::MissingField { pointer }),
        }
    }

    pub(crate) fn definitions_mut(&mut self, kind: DefinitionKind) -> Option<&mut Vec<Value>> {
        self.document
            .pointer_mut(&format!("/{}", kind.field()))
            .and_then(Value::as_array_mut)
    }
}

/// Read a non-empty string at `pointer` inside `value`.
pub(crate) fn non_empty_str<'a>(value: &'a Value, pointer: &str) -> crate::Result<&'a str> {
    match value.pointer(pointer) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
        Some(_) => Err(crate::Error::InvalidField {
            pointer: pointer.to_owned(),
            expected: "a non-empty string",
        }),
        None => Err(crate::Error::MissingField {
            pointer: pointer.to_owned(),
        }),
    }
}
