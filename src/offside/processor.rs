//! File processing API
//!
//! This module processes source files at different stages (raw tokens, tracked tokens, block
//! tree) into different output formats. Format strings name the stage first and the output
//! second: `token-simple`, `token-raw-json`, `tree-treeviz`, ...

use crate::offside::config::TrackerConfig;
use crate::offside::error::Error;
use crate::offside::formats::{to_dump_str, to_json_str, to_treeviz_str};
use crate::offside::lexing::{lex_with_config, tokenize};
use crate::offside::structure::parse_structure;
use std::fs;
use std::path::Path;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Tree,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    RawSimple,
    RawJson,
    Treeviz,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "token-raw-simple"
    pub fn from_string(format_str: &str) -> Result<Self, Error> {
        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| Error::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "tree" => ProcessingStage::Tree,
            other => return Err(Error::InvalidStage(other.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "raw-simple" => OutputFormat::RawSimple,
            "raw-json" => OutputFormat::RawJson,
            "treeviz" => OutputFormat::Treeviz,
            other => return Err(Error::InvalidFormat(other.to_string())),
        };

        // Validate stage/format compatibility
        match (stage, format) {
            (ProcessingStage::Token, OutputFormat::Treeviz) => Err(Error::InvalidFormat(
                "treeviz only works with the tree stage".to_string(),
            )),
            (ProcessingStage::Tree, OutputFormat::RawSimple | OutputFormat::RawJson) => Err(
                Error::InvalidFormat("raw formats only work with the token stage".to_string()),
            ),
            (ProcessingStage::Tree, OutputFormat::Simple) => Err(Error::InvalidFormat(
                "simple only works with the token stage".to_string(),
            )),
            _ => Ok(ProcessingSpec { stage, format }),
        }
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        use OutputFormat::*;
        use ProcessingStage::*;
        [
            (Token, Simple),
            (Token, Json),
            (Token, RawSimple),
            (Token, RawJson),
            (Tree, Treeviz),
            (Tree, Json),
        ]
        .into_iter()
        .map(|(stage, format)| ProcessingSpec { stage, format })
        .collect()
    }

    /// The format string this spec parses from
    pub fn name(&self) -> String {
        let stage = match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Tree => "tree",
        };
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::RawSimple => "raw-simple",
            OutputFormat::RawJson => "raw-json",
            OutputFormat::Treeviz => "treeviz",
        };
        format!("{stage}-{format}")
    }
}

/// Process source text according to the given specification
pub fn process_str(
    source: &str,
    spec: &ProcessingSpec,
    config: &TrackerConfig,
) -> Result<String, Error> {
    match (spec.stage, spec.format) {
        (ProcessingStage::Token, OutputFormat::RawSimple) => Ok(to_dump_str(&tokenize(source)?)),
        (ProcessingStage::Token, OutputFormat::RawJson) => to_json_str(&tokenize(source)?),
        (ProcessingStage::Token, OutputFormat::Json) => {
            to_json_str(&lex_with_config(source, config)?)
        }
        (ProcessingStage::Token, _) => Ok(to_dump_str(&lex_with_config(source, config)?)),
        (ProcessingStage::Tree, format) => {
            let nodes = parse_structure(lex_with_config(source, config)?)?;
            match format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&nodes)?),
                _ => Ok(to_treeviz_str(&nodes)),
            }
        }
    }
}

/// Process a source file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    config: &TrackerConfig,
) -> Result<String, Error> {
    let content = fs::read_to_string(file_path.as_ref())?;
    process_str(&content, spec, config)
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}
