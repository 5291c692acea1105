//! Minimal EXPRESS (ISO 10303-11) reader. Only the parts needed to rebuild
//! the entity inheritance tree are understood: the schema name and each
//! entity header with its `ABSTRACT` and `SUBTYPE OF` clauses.

use crate::error::{IconError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\(\*.*?\*\)").expect("valid regex"));
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"--[^\n]*").expect("valid regex"));
static SCHEMA_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bSCHEMA\s+([A-Za-z_][A-Za-z0-9_]*)\s*;").expect("valid regex")
});
static ENTITY_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bENTITY\s+([A-Za-z_][A-Za-z0-9_]*)([^;]*);").expect("valid regex")
});
static ABSTRACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bABSTRACT\b").expect("valid regex"));
static SUBTYPE_OF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bSUBTYPE\s+OF\s*\(\s*([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex")
});

/// An entity header as written in the schema file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntity {
    pub name: String,
    pub supertype: Option<String>,
    pub is_abstract: bool,
}

#[derive(Debug, Clone)]
pub struct RawSchema {
    pub name: String,
    pub entities: Vec<RawEntity>,
}

pub fn parse_express(text: &str) -> Result<RawSchema> {
    let text = COMMENT.replace_all(text, " ");
    let text = LINE_COMMENT.replace_all(&text, " ");

    let name = SCHEMA_NAME
        .captures(&text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| IconError::SchemaParse("missing SCHEMA declaration".to_string()))?;

    let entities = ENTITY_HEADER
        .captures_iter(&text)
        .map(|caps| {
            let header = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            RawEntity {
                name: caps[1].to_string(),
                supertype: SUBTYPE_OF
                    .captures(header)
                    .map(|c| c[1].to_string()),
                is_abstract: ABSTRACT.is_match(header),
            }
        })
        .collect();

    Ok(RawSchema { name, entities })
}
