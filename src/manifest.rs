use crate::constants::MANIFEST_FILE;
use crate::error::Result;
use crate::material::{IconSize, IconStyle, IconZoom};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One exported PNG
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub ifc_class: String,
    pub codepoint: String,
    pub material_icon: String,
    pub category: String,
    pub source: PathBuf,
    /// File name relative to the manifest's directory
    pub file: String,
    pub sha256: String,
}

/// Description of an export run, written next to the PNGs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub style: IconStyle,
    pub size: IconSize,
    pub zoom: IconZoom,
    pub inverted: bool,
    pub entries: Vec<ManifestEntry>,
    #[serde(default)]
    pub unmatched: Vec<String>,
}

impl Manifest {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILE)
    }

    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = Self::path_in(dir);
        fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    pub fn load(dir: &Path) -> Result<Self> {
        let text = fs::read_to_string(Self::path_in(dir))?;
        Ok(serde_json::from_str(&text)?)
    }
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

#[derive(Debug, Default, Serialize)]
pub struct VerifyReport {
    pub ok: usize,
    pub missing: Vec<String>,
    pub mismatched: Vec<String>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.mismatched.is_empty()
    }
}

/// Check every file listed in `dir/manifest.json` against its digest
pub fn verify(dir: &Path) -> Result<VerifyReport> {
    let manifest = Manifest::load(dir)?;
    let mut report = VerifyReport::default();

    for entry in &manifest.entries {
        let path = dir.join(&entry.file);
        if !path.is_file() {
            warn!("Missing icon for {}: {}", entry.ifc_class, path.display());
            report.missing.push(entry.ifc_class.clone());
            continue;
        }
        if sha256_file(&path)? == entry.sha256 {
            report.ok += 1;
        } else {
            warn!("Digest mismatch for {}: {}", entry.ifc_class, path.display());
            report.mismatched.push(entry.ifc_class.clone());
        }
    }

    info!(
        "Verified {} icons in {} ({} missing, {} mismatched)",
        report.ok,
        dir.display(),
        report.missing.len(),
        report.mismatched.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.txt");
        fs::write(&path, b"abc").unwrap();
        assert_eq!(
            sha256_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify_detects_missing_and_mismatched() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("IfcWall.png"), b"wall").unwrap();
        fs::write(dir.path().join("IfcDoor.png"), b"door").unwrap();

        let entry = |class: &str, sha256: String| ManifestEntry {
            ifc_class: class.to_string(),
            codepoint: "e88a".to_string(),
            material_icon: "home".to_string(),
            category: "action".to_string(),
            source: PathBuf::from("src.png"),
            file: format!("{class}.png"),
            sha256,
        };
        let manifest = Manifest {
            generated_at: Utc::now(),
            style: IconStyle::Baseline,
            size: IconSize::Dp48,
            zoom: IconZoom::One,
            inverted: false,
            entries: vec![
                entry("IfcWall", sha256_file(&dir.path().join("IfcWall.png")).unwrap()),
                entry("IfcDoor", "00".repeat(32)),
                entry("IfcSlab", "00".repeat(32)),
            ],
            unmatched: vec![],
        };
        manifest.write(dir.path()).unwrap();

        let report = verify(dir.path()).unwrap();
        assert_eq!(report.ok, 1);
        assert_eq!(report.mismatched, vec!["IfcDoor".to_string()]);
        assert_eq!(report.missing, vec!["IfcSlab".to_string()]);
        assert!(!report.is_ok());
    }
}
