use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IconError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema parse error: {0}")]
    SchemaParse(String),

    #[error("Entity '{name}' not found in schema {schema}")]
    UnknownDeclaration { schema: String, name: String },

    #[error("Entity '{entity}' in schema {schema} is a subtype of unknown entity '{supertype}'")]
    DanglingSupertype {
        schema: String,
        entity: String,
        supertype: String,
    },

    #[error("No EXPRESS schemas found under {0}")]
    NoSchemas(PathBuf),

    #[error("Malformed codepoints file {path} at line {line}: {content}")]
    Codepoints {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Invalid icon mapping: {0}")]
    InvalidMapping(String),
}

pub type Result<T> = std::result::Result<T, IconError>;
