use crate::constants::PNG_EXTENSION;
use crate::error::Result;
use crate::material::codepoints::get_codepoints;
use crate::material::style::{IconSize, IconStyle, IconZoom};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// One PNG rendition of a Material Design icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialIcon {
    pub category: String,
    pub name: String,
    pub file: PathBuf,
    pub codepoint: Option<String>,
}

/// All icons found for one style/size/zoom, joined with their codepoints
#[derive(Debug, Default)]
pub struct IconCatalog {
    icons: Vec<MaterialIcon>,
    by_codepoint: HashMap<String, usize>,
    pub not_found: usize,
}

impl IconCatalog {
    fn from_icons(icons: Vec<MaterialIcon>, not_found: usize) -> Self {
        let mut by_codepoint = HashMap::new();
        for (i, icon) in icons.iter().enumerate() {
            if let Some(cp) = &icon.codepoint {
                // First icon in (category, name) order keeps the codepoint
                by_codepoint.entry(cp.clone()).or_insert(i);
            }
        }
        Self {
            icons,
            by_codepoint,
            not_found,
        }
    }

    pub fn icons(&self) -> &[MaterialIcon] {
        &self.icons
    }

    pub fn found(&self) -> usize {
        self.icons.len()
    }

    pub fn by_codepoint(&self, codepoint: &str) -> Option<&MaterialIcon> {
        self.by_codepoint.get(codepoint).map(|&i| &self.icons[i])
    }

    pub fn without_codepoint(&self) -> usize {
        self.icons.iter().filter(|i| i.codepoint.is_none()).count()
    }
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn first_png(dir: &Path) -> Result<Option<PathBuf>> {
    let mut pngs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(PNG_EXTENSION))
            .unwrap_or(false);
        if is_png && path.is_file() {
            pngs.push(path);
        }
    }
    pngs.sort();
    Ok(pngs.into_iter().next())
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Scan `png/<category>/<icon>/materialicons<style>/<size>/<zoom>/` and join
/// the result with the font codepoints for `style`.
#[instrument(skip_all, fields(style = %style, size = %size, zoom = %zoom))]
pub fn get_list_icons_png(
    material_icons_root: &Path,
    style: IconStyle,
    size: IconSize,
    zoom: IconZoom,
) -> Result<IconCatalog> {
    let png_root = material_icons_root.join("png");
    let codepoints = get_codepoints(material_icons_root, style)?;

    let mut icons = Vec::new();
    let mut not_found = 0usize;

    for category in sorted_subdirs(&png_root)? {
        for icon_dir in sorted_subdirs(&category)? {
            let rendition = icon_dir
                .join(style.png_dir_name())
                .join(size.as_str())
                .join(zoom.as_str());
            let file = if rendition.is_dir() {
                first_png(&rendition)?
            } else {
                None
            };
            match file {
                Some(file) => {
                    let name = dir_name(&icon_dir);
                    let codepoint = codepoints.get(&name).map(str::to_string);
                    icons.push(MaterialIcon {
                        category: dir_name(&category),
                        name,
                        file,
                        codepoint,
                    });
                }
                None => {
                    debug!("No rendition at {}", rendition.display());
                    not_found += 1;
                }
            }
        }
    }

    let catalog = IconCatalog::from_icons(icons, not_found);
    info!("{} material design icons were found", catalog.found());
    info!("{} material design icons weren't found", catalog.not_found);
    if catalog.without_codepoint() > 0 {
        debug!("{} icons have no codepoint", catalog.without_codepoint());
    }
    Ok(catalog)
}
