//! Span-labeled diagnostics for YAML form files.
//!
//! Parses the input with `yaml-spanned`, indexes every value's byte range
//! by its JSON pointer, and turns each rule violation into a miette
//! diagnostic pointing at the offending value in the source.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::collections::HashMap;
use std::path::Path;
use yaml_spanned::{Spanned, Value as YamlValue, from_str};

use super::rules::FieldPath;
use crate::models::FormValues;

#[derive(Debug, Clone, Copy)]
struct ByteRange {
    start: usize,
    end: usize,
}

#[derive(thiserror::Error, Debug, Diagnostic)]
#[error("{message}")]
pub struct FormFileError {
    #[source_code]
    pub source_code: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,

    pub message: String,
}

/// A form file parsed with source spans retained.
pub struct SpannedForm {
    spans: HashMap<String, ByteRange>,
    json_value: serde_json::Value,
    source: String,
    file_path: String,
}

impl SpannedForm {
    pub fn new(file_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let source = std::fs::read_to_string(file_path)?;
        Self::from_source(source, file_path.display().to_string())
    }

    pub fn from_source(
        source: String,
        file_path: String,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let spanned: Spanned<YamlValue> = from_str(&source)?;

        let mut spans = HashMap::new();
        let json_value = index_spans(&spanned, String::new(), &mut spans);

        Ok(Self {
            spans,
            json_value,
            source,
            file_path,
        })
    }

    /// Deserialize the parsed document into the form model.
    pub fn values(&self) -> Result<FormValues, serde_json::Error> {
        serde_json::from_value(self.json_value.clone())
    }

    /// Build a diagnostic for a rule violation at `path`.
    ///
    /// Paths with no recorded span (e.g. a missing key) fall back to the
    /// enclosing donation row, then to the whole document.
    pub fn create_error(&self, path: &FieldPath, message: String) -> FormFileError {
        let pointer = path.pointer();

        let range = self
            .spans
            .get(&pointer)
            .or_else(|| self.spans.get(parent_pointer(&pointer)))
            .or_else(|| self.spans.get(""))
            .copied()
            .unwrap_or(ByteRange { start: 0, end: 0 });

        FormFileError {
            source_code: NamedSource::new(&self.file_path, self.source.clone()),
            span: SourceSpan::new(range.start.into(), range.end - range.start),
            message,
        }
    }
}

/// Everything up to the last `/` segment, so `/donations/0/percentage`
/// falls back to `/donations/0`.
fn parent_pointer(pointer: &str) -> &str {
    match pointer.rfind('/') {
        Some(idx) => &pointer[..idx],
        None => "",
    }
}

/// Walk the spanned YAML tree, recording each node's byte range under its
/// JSON pointer and producing the plain JSON equivalent for serde.
fn index_spans(
    node: &Spanned<YamlValue>,
    pointer: String,
    spans: &mut HashMap<String, ByteRange>,
) -> serde_json::Value {
    let span = node.span();
    spans.insert(
        pointer.clone(),
        ByteRange {
            start: span.start.unwrap_or_default().byte_index,
            end: span.end.unwrap_or_default().byte_index,
        },
    );

    match node.as_ref() {
        YamlValue::Null => serde_json::Value::Null,
        YamlValue::Bool(b) => serde_json::Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                serde_json::Value::Number(serde_json::Number::from(i))
            } else if let Some(u) = n.as_u64() {
                serde_json::Value::Number(serde_json::Number::from(u))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            } else {
                serde_json::Value::Null
            }
        }
        YamlValue::String(s) => serde_json::Value::String(s.clone()),
        YamlValue::Sequence(items) => serde_json::Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| index_spans(item, format!("{pointer}/{i}"), spans))
                .collect(),
        ),
        YamlValue::Mapping(mapping) => {
            let mut object = serde_json::Map::new();
            for (key, value) in mapping {
                if let YamlValue::String(key) = key.as_ref() {
                    let child = index_spans(value, format!("{pointer}/{key}"), spans);
                    object.insert(key.clone(), child);
                }
            }
            serde_json::Value::Object(object)
        }
        YamlValue::Tagged(tagged) => index_spans(&tagged.value, pointer, spans),
    }
}
