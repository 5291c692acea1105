use crate::constants::{FULL_ICONS_FILE, MATERIAL_ICONS_DIR, OUTPUT_DIR};
use crate::error::Result;
use crate::manifest::{sha256_file, Manifest, ManifestEntry};
use crate::mapping::{get_ifc_icons_from_codepoints, load_icon_mapping, IconMatch};
use crate::material::{get_list_icons_png, IconSize, IconStyle, IconZoom};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Options for [`save_ifc_icons`]
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub material_icons_root: PathBuf,
    pub mapping_file: PathBuf,
    pub save_path: PathBuf,
    pub style: IconStyle,
    pub size: IconSize,
    pub zoom: IconZoom,
    pub overwrite: bool,
    pub invert_colors: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            material_icons_root: PathBuf::from(MATERIAL_ICONS_DIR),
            mapping_file: PathBuf::from(FULL_ICONS_FILE),
            save_path: PathBuf::from(OUTPUT_DIR),
            style: IconStyle::default(),
            size: IconSize::default(),
            zoom: IconZoom::default(),
            overwrite: true,
            invert_colors: true,
        }
    }
}

/// Result of an export run
#[derive(Debug, Serialize)]
pub struct ExportReport {
    pub saved: usize,
    pub unmatched: Vec<String>,
    pub output_dir: PathBuf,
    pub manifest: PathBuf,
}

/// Load the catalog and the mapping and join them
pub fn match_icons(options: &ExportOptions) -> Result<Vec<IconMatch>> {
    let catalog = get_list_icons_png(
        &options.material_icons_root,
        options.style,
        options.size,
        options.zoom,
    )?;
    let mapping = load_icon_mapping(&options.mapping_file)?;
    Ok(get_ifc_icons_from_codepoints(&catalog, &mapping))
}

/// Copy the matched icon of every IFC class into `save_path` as
/// `<IfcClass>.png`, optionally inverting its colors.
#[instrument(skip_all, fields(output = %options.save_path.display()))]
pub fn save_ifc_icons(options: &ExportOptions) -> Result<ExportReport> {
    let matches = match_icons(options)?;

    if options.overwrite {
        match fs::remove_dir_all(&options.save_path) {
            Ok(()) => debug!("Removed previous output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    fs::create_dir_all(&options.save_path)?;

    let mut entries = Vec::new();
    let mut unmatched = Vec::new();

    for m in &matches {
        let (icon, codepoint) = match (&m.icon, &m.codepoint) {
            (Some(icon), Some(codepoint)) => (icon, codepoint),
            _ => {
                debug!("No material icon for {} ({:?})", m.ifc_class, m.codepoint);
                unmatched.push(m.ifc_class.clone());
                continue;
            }
        };

        let file = match icon_file_name(&m.ifc_class) {
            Some(file) => file,
            None => {
                warn!("Skipping IFC class with unusable file name: {:?}", m.ifc_class);
                unmatched.push(m.ifc_class.clone());
                continue;
            }
        };
        let target = options.save_path.join(&file);
        fs::copy(&icon.file, &target)?;
        if options.invert_colors {
            invert_image_color(&target, "")?;
        }

        entries.push(ManifestEntry {
            ifc_class: m.ifc_class.clone(),
            codepoint: codepoint.clone(),
            material_icon: icon.name.clone(),
            category: icon.category.clone(),
            source: icon.file.clone(),
            sha256: sha256_file(&target)?,
            file,
        });
    }

    if !unmatched.is_empty() {
        warn!("{} IFC classes have no matching icon", unmatched.len());
    }

    let manifest = Manifest {
        generated_at: Utc::now(),
        style: options.style,
        size: options.size,
        zoom: options.zoom,
        inverted: options.invert_colors,
        entries,
        unmatched,
    };
    let manifest_path = manifest.write(&options.save_path)?;

    info!(
        "{} IFC icons saved to {}",
        manifest.entries.len(),
        options.save_path.display()
    );

    Ok(ExportReport {
        saved: manifest.entries.len(),
        unmatched: manifest.unmatched,
        output_dir: options.save_path.clone(),
        manifest: manifest_path,
    })
}

/// `<IfcClass>.png`, or `None` when the class name is not a plain single
/// path component and would escape the output directory
fn icon_file_name(ifc_class: &str) -> Option<String> {
    if ifc_class.contains(std::path::is_separator) {
        return None;
    }
    let mut components = Path::new(ifc_class).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(format!("{ifc_class}.png")),
        _ => None,
    }
}

/// Invert the RGB channels of a PNG, keeping alpha, and save it as
/// `<stem><suffix><ext>` next to the input. An empty suffix overwrites it.
pub fn invert_image_color(image_path: &Path, save_suffix: &str) -> Result<PathBuf> {
    let mut image = image::open(image_path)?.to_rgba8();
    for pixel in image.pixels_mut() {
        for channel in &mut pixel.0[0..3] {
            *channel = 255 - *channel;
        }
    }

    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match image_path.extension() {
        Some(ext) => format!("{stem}{save_suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{save_suffix}"),
    };
    let target = image_path.with_file_name(file_name);
    image.save_with_format(&target, image::ImageFormat::Png)?;
    Ok(target)
}
