use anyhow::Result;
use image::{Rgba, RgbaImage};
use ifc_icons::export::{match_icons, save_ifc_icons, ExportOptions};
use ifc_icons::manifest::{self, Manifest};
use ifc_icons::material::{get_list_icons_png, IconSize, IconStyle, IconZoom};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Write a 2x2 icon rendition into a fake material-design-icons checkout
fn add_icon(root: &Path, category: &str, name: &str, style_dir: &str, color: [u8; 4]) -> PathBuf {
    let dir = root
        .join("png")
        .join(category)
        .join(name)
        .join(style_dir)
        .join("48dp")
        .join("1x");
    fs::create_dir_all(&dir).unwrap();
    let file = dir.join(format!("baseline_{name}_black_48dp.png"));
    RgbaImage::from_pixel(2, 2, Rgba(color)).save(&file).unwrap();
    file
}

fn fake_checkout(root: &Path) {
    add_icon(root, "action", "home", "materialicons", [0, 0, 0, 255]);
    add_icon(root, "action", "door_front", "materialicons", [10, 20, 30, 128]);
    add_icon(root, "navigation", "home", "materialicons", [99, 99, 99, 255]);
    // Only an outlined rendition: counted as not found for baseline
    add_icon(root, "social", "roofing", "materialiconsoutlined", [0, 0, 0, 255]);

    fs::create_dir_all(root.join("font")).unwrap();
    fs::write(
        root.join("font").join("MaterialIcons-Regular.codepoints"),
        "home e88a\ndoor_front efcc\nroofing f201\n",
    )
    .unwrap();
}

fn write_mapping(path: &Path) {
    fs::write(
        path,
        r#"{
            "IfcBuilding": "\ue88a",
            "IfcDoor": "\uefcc",
            "IfcRoof": "\uf201",
            "IfcSite": null
        }"#,
    )
    .unwrap();
}

fn options(root: &Path, mapping: &Path, out: &Path) -> ExportOptions {
    ExportOptions {
        material_icons_root: root.to_path_buf(),
        mapping_file: mapping.to_path_buf(),
        save_path: out.to_path_buf(),
        ..ExportOptions::default()
    }
}

#[test]
fn test_catalog_counts_and_codepoints() -> Result<()> {
    let temp = tempdir()?;
    fake_checkout(temp.path());

    let catalog = get_list_icons_png(temp.path(), IconStyle::Baseline, IconSize::Dp48, IconZoom::One)?;
    assert_eq!(catalog.found(), 3);
    assert_eq!(catalog.not_found, 1);
    let home = catalog.by_codepoint("e88a").expect("home icon");
    assert_eq!(home.category, "action");
    assert_eq!(home.name, "home");
    Ok(())
}

#[test]
fn test_match_icons_left_joins_every_class() -> Result<()> {
    let temp = tempdir()?;
    fake_checkout(temp.path());
    let mapping = temp.path().join("ifc-full-icons.json");
    write_mapping(&mapping);

    let matches = match_icons(&options(temp.path(), &mapping, &temp.path().join("out")))?;
    let classes: Vec<_> = matches.iter().map(|m| m.ifc_class.as_str()).collect();
    assert_eq!(classes, vec!["IfcBuilding", "IfcDoor", "IfcRoof", "IfcSite"]);

    assert_eq!(matches[0].icon.as_ref().map(|i| i.name.as_str()), Some("home"));
    assert_eq!(matches[1].icon.as_ref().map(|i| i.name.as_str()), Some("door_front"));
    assert_eq!(matches[2].codepoint.as_deref(), Some("f201"));
    assert!(matches[2].icon.is_none());
    assert!(matches[3].codepoint.is_none());
    Ok(())
}

#[test]
fn test_save_ifc_icons_inverts_and_writes_manifest() -> Result<()> {
    let temp = tempdir()?;
    fake_checkout(temp.path());
    let mapping = temp.path().join("ifc-full-icons.json");
    write_mapping(&mapping);
    let out = temp.path().join("ifc_icons");

    // Left over from a previous run; removed because overwrite is on
    fs::create_dir_all(&out)?;
    fs::write(out.join("stale.png"), b"old")?;

    let report = save_ifc_icons(&options(temp.path(), &mapping, &out))?;
    assert_eq!(report.saved, 2);
    assert_eq!(report.unmatched, vec!["IfcRoof".to_string(), "IfcSite".to_string()]);
    assert!(!out.join("stale.png").exists());

    let building = image::open(out.join("IfcBuilding.png"))?.to_rgba8();
    assert_eq!(building.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    let door = image::open(out.join("IfcDoor.png"))?.to_rgba8();
    assert_eq!(door.get_pixel(1, 1), &Rgba([245, 235, 225, 128]));

    let manifest = Manifest::load(&out)?;
    assert!(manifest.inverted);
    assert_eq!(manifest.entries.len(), 2);
    assert_eq!(manifest.entries[0].ifc_class, "IfcBuilding");
    assert_eq!(manifest.entries[0].codepoint, "e88a");

    assert!(manifest::verify(&out)?.is_ok());
    Ok(())
}

#[test]
fn test_save_without_invert_copies_bytes() -> Result<()> {
    let temp = tempdir()?;
    fake_checkout(temp.path());
    let mapping = temp.path().join("ifc-full-icons.json");
    write_mapping(&mapping);
    let out = temp.path().join("plain");

    let mut opts = options(temp.path(), &mapping, &out);
    opts.invert_colors = false;
    save_ifc_icons(&opts)?;

    let source = temp
        .path()
        .join("png/action/home/materialicons/48dp/1x/baseline_home_black_48dp.png");
    assert_eq!(fs::read(out.join("IfcBuilding.png"))?, fs::read(source)?);
    Ok(())
}

#[test]
fn test_verify_flags_modified_icon() -> Result<()> {
    let temp = tempdir()?;
    fake_checkout(temp.path());
    let mapping = temp.path().join("ifc-full-icons.json");
    write_mapping(&mapping);
    let out = temp.path().join("ifc_icons");
    save_ifc_icons(&options(temp.path(), &mapping, &out))?;

    RgbaImage::from_pixel(2, 2, Rgba([1, 1, 1, 1])).save(out.join("IfcDoor.png"))?;
    fs::remove_file(out.join("IfcBuilding.png"))?;

    let report = manifest::verify(&out)?;
    assert_eq!(report.ok, 0);
    assert_eq!(report.mismatched, vec!["IfcDoor".to_string()]);
    assert_eq!(report.missing, vec!["IfcBuilding".to_string()]);
    Ok(())
}

#[test]
fn test_class_names_cannot_escape_output_dir() -> Result<()> {
    let temp = tempdir()?;
    fake_checkout(temp.path());
    let mapping = temp.path().join("ifc-full-icons.json");
    fs::write(
        &mapping,
        r#"{"../escaped": "\ue88a", "Ifc/Slash": "\ue88a", "IfcWall": "\ue88a"}"#,
    )?;
    let out = temp.path().join("out");

    let report = save_ifc_icons(&options(temp.path(), &mapping, &out))?;
    assert_eq!(report.saved, 1);
    assert_eq!(
        report.unmatched,
        vec!["../escaped".to_string(), "Ifc/Slash".to_string()]
    );
    assert!(!temp.path().join("escaped.png").exists());
    assert!(out.join("IfcWall.png").is_file());
    assert!(manifest::verify(&out)?.is_ok());
    Ok(())
}
