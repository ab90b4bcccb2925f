//! Notebook document parser (nbformat 4).
//!
//! Extraction is a pure transform: the notebook JSON is parsed into an
//! ordered, flat sequence of [`Cell`] records. Notebook cells appear in
//! original order; a code cell's execution outputs follow it immediately
//! as their own records.

use std::fs;
use std::io::Read;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Cell, CellContent, OutputData};

/// Image MIME types in preference order.
const IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif"];

/// A parsed notebook: the extracted cell sequence plus kernel language.
#[derive(Debug, Clone)]
pub struct Notebook {
    /// Extracted cells in document order
    pub cells: Vec<Cell>,

    /// Kernel language (drives code highlighting), if declared
    pub language: Option<String>,
}

impl Notebook {
    /// Number of extracted cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the notebook has any cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Notebook document parser.
pub struct NotebookParser {
    root: Value,
}

impl NotebookParser {
    /// Open a notebook file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Parse a notebook from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let root: Value = serde_json::from_slice(data)?;
        if !root.is_object() {
            return Err(Error::MalformedInput(
                "notebook root is not a JSON object".into(),
            ));
        }
        Ok(Self { root })
    }

    /// Parse a notebook from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Parse a notebook from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_bytes(json.as_bytes())
    }

    /// Extract the ordered cell sequence.
    pub fn parse(&self) -> Result<Notebook> {
        let raw_cells = self
            .root
            .get("cells")
            .ok_or_else(|| Error::MalformedInput("missing \"cells\" array".into()))?
            .as_array()
            .ok_or_else(|| Error::MalformedInput("\"cells\" is not an array".into()))?;

        let mut cells = Vec::with_capacity(raw_cells.len());
        for (i, value) in raw_cells.iter().enumerate() {
            let raw: RawCell = serde_json::from_value(value.clone())
                .map_err(|e| Error::MalformedInput(format!("cell {}: {}", i, e)))?;
            extract_cell(raw, &mut cells);
        }

        Ok(Notebook {
            cells,
            language: self.language(),
        })
    }

    /// Kernel language from notebook metadata.
    fn language(&self) -> Option<String> {
        let metadata = self.root.get("metadata")?;
        metadata
            .pointer("/language_info/name")
            .or_else(|| metadata.pointer("/kernelspec/language"))
            .and_then(Value::as_str)
            .map(str::to_owned)
    }
}

/// Flatten one notebook cell record into the extracted sequence.
fn extract_cell(raw: RawCell, cells: &mut Vec<Cell>) {
    match raw {
        RawCell::Markdown { source } => {
            cells.push(Cell::new(cells.len(), CellContent::Markdown { source }));
        }
        RawCell::Code {
            source,
            execution_count,
            outputs,
        } => {
            cells.push(Cell::new(
                cells.len(),
                CellContent::Code {
                    source,
                    execution_count,
                },
            ));
            for output in outputs {
                if let Some(content) = extract_output(output) {
                    cells.push(Cell::new(cells.len(), content));
                }
            }
        }
        RawCell::Raw { source } => {
            cells.push(Cell::new(cells.len(), CellContent::Raw { source }));
        }
    }
}

/// Convert one output record, dropping bundles with no usable representation.
fn extract_output(output: RawOutput) -> Option<CellContent> {
    match output {
        RawOutput::Stream { name, text } => Some(CellContent::Output(OutputData::Stream {
            text,
            stderr: name == "stderr",
        })),
        RawOutput::ExecuteResult { data } | RawOutput::DisplayData { data } => {
            output_from_bundle(&data).map(CellContent::Output)
        }
        RawOutput::Error {
            ename,
            evalue,
            traceback,
        } => Some(CellContent::Error {
            name: ename,
            message: evalue,
            traceback,
        }),
    }
}

/// Pick the richest representation from a MIME bundle.
///
/// Preference: raster images > SVG > HTML > plain text.
fn output_from_bundle(data: &serde_json::Map<String, Value>) -> Option<OutputData> {
    for media_type in IMAGE_TYPES {
        if let Some(value) = data.get(*media_type) {
            // Notebook base64 payloads may be split across lines.
            let payload: String = bundle_text(value)
                .split_whitespace()
                .collect::<Vec<_>>()
                .concat();
            return Some(OutputData::Image {
                media_type: (*media_type).to_string(),
                data: payload,
            });
        }
    }
    if let Some(value) = data.get("image/svg+xml") {
        // SVG arrives as XML text; encode it so image data is uniformly base64.
        return Some(OutputData::Image {
            media_type: "image/svg+xml".to_string(),
            data: BASE64.encode(bundle_text(value)),
        });
    }
    if let Some(value) = data.get("text/html") {
        return Some(OutputData::Html {
            html: bundle_text(value),
        });
    }
    if let Some(value) = data.get("text/plain") {
        return Some(OutputData::Text {
            text: bundle_text(value),
        });
    }
    None
}

/// MIME bundle values are a string or an array of lines.
fn bundle_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(lines) => lines
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .concat(),
        _ => String::new(),
    }
}

/// One notebook cell record as stored on disk.
#[derive(Debug, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
enum RawCell {
    Markdown {
        #[serde(default, deserialize_with = "string_or_lines")]
        source: String,
    },
    Code {
        #[serde(default, deserialize_with = "string_or_lines")]
        source: String,
        #[serde(default)]
        execution_count: Option<i64>,
        #[serde(default)]
        outputs: Vec<RawOutput>,
    },
    Raw {
        #[serde(default, deserialize_with = "string_or_lines")]
        source: String,
    },
}

/// One execution output record.
#[derive(Debug, Deserialize)]
#[serde(tag = "output_type", rename_all = "snake_case")]
enum RawOutput {
    Stream {
        #[serde(default)]
        name: String,
        #[serde(default, deserialize_with = "string_or_lines")]
        text: String,
    },
    ExecuteResult {
        #[serde(default)]
        data: serde_json::Map<String, Value>,
    },
    DisplayData {
        #[serde(default)]
        data: serde_json::Map<String, Value>,
    },
    Error {
        #[serde(default)]
        ename: String,
        #[serde(default)]
        evalue: String,
        #[serde(default)]
        traceback: Vec<String>,
    },
}

/// nbformat stores source text as a string or an array of lines.
fn string_or_lines<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lines {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Lines::deserialize(deserializer)? {
        Lines::One(s) => s,
        Lines::Many(lines) => lines.concat(),
    })
}
