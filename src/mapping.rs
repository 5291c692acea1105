use crate::error::{IconError, Result};
use crate::material::codepoints::{format_codepoint, normalize_codepoint};
use crate::material::{IconCatalog, MaterialIcon};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// IFC class name to icon glyph, `None` for classes without an icon
pub type IconMapping = BTreeMap<String, Option<String>>;

/// An IFC class joined with the Material icon sharing its codepoint
#[derive(Debug, Clone, Serialize)]
pub struct IconMatch {
    pub ifc_class: String,
    pub codepoint: Option<String>,
    pub icon: Option<MaterialIcon>,
}

/// Parse a JSON icon mapping. Values must be strings or null.
pub fn parse_mapping_bytes(bytes: &[u8]) -> Result<IconMapping> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    let object = value
        .as_object()
        .ok_or_else(|| IconError::InvalidMapping("expected a JSON object".to_string()))?;

    let mut mapping = IconMapping::new();
    for (class, icon) in object {
        let icon = match icon {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => {
                return Err(IconError::InvalidMapping(format!(
                    "value for {class} is not a string: {other}"
                )))
            }
        };
        mapping.insert(class.clone(), icon);
    }
    Ok(mapping)
}

pub fn load_icon_mapping(path: &Path) -> Result<IconMapping> {
    let bytes = fs::read(path)?;
    let mapping = parse_mapping_bytes(&bytes)?;
    debug!("Loaded {} icon assignments from {}", mapping.len(), path.display());
    Ok(mapping)
}

pub fn write_icon_mapping(path: &Path, mapping: &IconMapping) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(mapping)?;
    fs::write(path, json)?;
    Ok(())
}

/// Turn an icon value into the lowercase hex codepoint used by the font
/// codepoints files.
///
/// Accepts the glyph itself (`"\u{e88a}"`) as well as already-escaped forms
/// such as `"e88a"`, `"U+E88A"` or `"\\ue88a"`.
pub fn codepoint_of(icon: Option<&str>) -> Option<String> {
    let icon = icon?.trim();
    let mut chars = icon.chars();
    match (chars.next(), chars.next()) {
        (None, _) => None,
        (Some(c), None) if !c.is_ascii_hexdigit() => Some(format_codepoint(c as u32)),
        _ => {
            let lower = icon.to_ascii_lowercase();
            let hex = lower
                .strip_prefix("\\u")
                .or_else(|| lower.strip_prefix("u+"))
                .or_else(|| lower.strip_prefix("0x"))
                .unwrap_or(lower.as_str());
            normalize_codepoint(hex.trim_start_matches('{').trim_end_matches('}'))
        }
    }
}

/// Left-join every IFC class with the catalog by codepoint
pub fn get_ifc_icons_from_codepoints(
    catalog: &IconCatalog,
    mapping: &IconMapping,
) -> Vec<IconMatch> {
    mapping
        .iter()
        .map(|(class, icon)| {
            let codepoint = codepoint_of(icon.as_deref());
            let icon = codepoint
                .as_deref()
                .and_then(|cp| catalog.by_codepoint(cp))
                .cloned();
            IconMatch {
                ifc_class: class.clone(),
                codepoint,
                icon,
            }
        })
        .collect()
}
