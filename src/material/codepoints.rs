use crate::error::{IconError, Result};
use crate::material::style::IconStyle;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Icon name to lowercase hex codepoint, as listed in a Material Icons font
#[derive(Debug, Clone, Default)]
pub struct Codepoints {
    by_name: HashMap<String, String>,
}

impl Codepoints {
    /// Parse the `<name> <hex>` lines of a `.codepoints` file
    pub fn parse(text: &str, source: &Path) -> Result<Self> {
        let mut by_name = HashMap::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let (name, hex) = match (parts.next(), parts.next(), parts.next()) {
                (Some(name), Some(hex), None) => match normalize_codepoint(hex) {
                    Some(hex) => (name, hex),
                    None => {
                        return Err(IconError::Codepoints {
                            path: source.to_path_buf(),
                            line: i + 1,
                            content: line.to_string(),
                        })
                    }
                },
                _ => {
                    return Err(IconError::Codepoints {
                        path: source.to_path_buf(),
                        line: i + 1,
                        content: line.to_string(),
                    })
                }
            };
            by_name.insert(name.to_string(), hex);
        }
        Ok(Self { by_name })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Canonical form of a codepoint: lowercase hex, zero-padded to four digits
pub fn format_codepoint(value: u32) -> String {
    format!("{value:04x}")
}

/// Parse a bare hex codepoint (`E88A`, `0e88a`) into its canonical form
pub fn normalize_codepoint(hex: &str) -> Option<String> {
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(format_codepoint)
}

pub fn codepoints_path(material_icons_root: &Path, style: IconStyle) -> PathBuf {
    material_icons_root
        .join("font")
        .join(style.codepoints_file_name())
}

/// Load the codepoints for `style` from a material-design-icons checkout
pub fn get_codepoints(material_icons_root: &Path, style: IconStyle) -> Result<Codepoints> {
    let path = codepoints_path(material_icons_root, style);
    let text = fs::read_to_string(&path)?;
    let codepoints = Codepoints::parse(&text, &path)?;
    debug!("Loaded {} codepoints from {}", codepoints.len(), path.display());
    Ok(codepoints)
}
