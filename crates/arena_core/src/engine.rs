use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A parsing backend the arena can dispatch a document to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineId {
    Docling,
    Pdfminer,
    Pymupdf,
    Pypdf2,
}

impl EngineId {
    /// Every known engine, in the order the selector lists them.
    pub const ALL: [EngineId; 4] = [
        EngineId::Docling,
        EngineId::Pdfminer,
        EngineId::Pymupdf,
        EngineId::Pypdf2,
    ];

    /// Identifier sent to the parse endpoint as `parser_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            EngineId::Docling => "docling",
            EngineId::Pdfminer => "pdfminer",
            EngineId::Pymupdf => "pymupdf",
            EngineId::Pypdf2 => "pypdf2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EngineId::Docling => "Docling",
            EngineId::Pdfminer => "PDFMiner",
            EngineId::Pymupdf => "PyMuPDF",
            EngineId::Pypdf2 => "PyPDF2",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EngineId::Docling => "Advanced layout analysis (Slower, Accurate)",
            EngineId::Pdfminer => "Text extraction (Fast, Basic)",
            EngineId::Pymupdf => "High performance rendering",
            EngineId::Pypdf2 => "Pure Python library",
        }
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown engine '{0}' (expected one of: docling, pdfminer, pymupdf, pypdf2)")]
pub struct UnknownEngine(pub String);

impl FromStr for EngineId {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EngineId::ALL
            .into_iter()
            .find(|engine| engine.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownEngine(wanted.to_string()))
    }
}
