//! IFC schemas loaded from EXPRESS files, indexed for inheritance queries.

pub mod express;

use crate::constants::SCHEMA_EXTENSION;
use crate::error::{IconError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use express::{parse_express, RawEntity, RawSchema};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDecl {
    pub name: String,
    pub supertype: Option<String>,
    pub is_abstract: bool,
}

#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    entities: Vec<EntityDecl>,
    // lowercase name -> position in `entities`
    index: HashMap<String, usize>,
    subtypes: Vec<Vec<usize>>,
}

impl Schema {
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_raw(parse_express(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let schema = Self::parse(&text)?;
        debug!(
            "Loaded schema {} ({} entities) from {}",
            schema.name,
            schema.len(),
            path.display()
        );
        Ok(schema)
    }

    pub fn from_raw(raw: RawSchema) -> Result<Self> {
        let mut index = HashMap::with_capacity(raw.entities.len());
        for (i, entity) in raw.entities.iter().enumerate() {
            if index.insert(entity.name.to_ascii_lowercase(), i).is_some() {
                return Err(IconError::SchemaParse(format!(
                    "entity {} declared twice in schema {}",
                    entity.name, raw.name
                )));
            }
        }

        let mut subtypes = vec![Vec::new(); raw.entities.len()];
        for (i, entity) in raw.entities.iter().enumerate() {
            if let Some(parent) = &entity.supertype {
                let parent_idx = index.get(&parent.to_ascii_lowercase()).copied().ok_or_else(|| {
                    IconError::DanglingSupertype {
                        schema: raw.name.clone(),
                        entity: entity.name.clone(),
                        supertype: parent.clone(),
                    }
                })?;
                subtypes[parent_idx].push(i);
            }
        }

        let entities = raw
            .entities
            .into_iter()
            .map(|e| EntityDecl {
                name: e.name,
                supertype: e.supertype,
                is_abstract: e.is_abstract,
            })
            .collect();

        Ok(Self {
            name: raw.name,
            entities,
            index,
            subtypes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.index
            .get(&name.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| IconError::UnknownDeclaration {
                schema: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Case-insensitive entity lookup
    pub fn declaration_by_name(&self, name: &str) -> Result<&EntityDecl> {
        Ok(&self.entities[self.position(name)?])
    }

    /// Direct subtypes in declaration order
    pub fn subtypes(&self, name: &str) -> Result<Vec<&EntityDecl>> {
        let pos = self.position(name)?;
        Ok(self.subtypes[pos].iter().map(|&i| &self.entities[i]).collect())
    }

    pub fn supertype(&self, name: &str) -> Result<Option<&EntityDecl>> {
        let decl = self.declaration_by_name(name)?;
        match &decl.supertype {
            Some(parent) => Ok(Some(self.declaration_by_name(parent)?)),
            None => Ok(None),
        }
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityDecl> {
        self.entities.iter()
    }
}

fn is_schema_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(SCHEMA_EXTENSION))
            .unwrap_or(false)
}

/// Load every schema named by `paths`. Directories contribute all of their
/// `*.exp` files. The result is sorted by schema name.
pub fn load_schemas(paths: &[PathBuf]) -> Result<Vec<Schema>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in fs::read_dir(path)? {
                let file = entry?.path();
                if is_schema_file(&file) {
                    files.push(file);
                }
            }
        } else {
            files.push(path.clone());
        }
    }

    if files.is_empty() {
        let shown = paths.first().cloned().unwrap_or_default();
        return Err(IconError::NoSchemas(shown));
    }

    let mut schemas = files
        .iter()
        .map(|f| Schema::load(f))
        .collect::<Result<Vec<_>>>()?;
    schemas.sort_by(|a, b| a.name.cmp(&b.name));

    info!(
        "Loaded {} schemas: {}",
        schemas.len(),
        schemas.iter().map(Schema::name).collect::<Vec<_>>().join(", ")
    );
    Ok(schemas)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = "SCHEMA IFC4;
ENTITY IfcProduct ABSTRACT SUPERTYPE OF (ONEOF (IfcElement, IfcSpatialElement)); END_ENTITY;
ENTITY IfcElement ABSTRACT SUBTYPE OF (IfcProduct); END_ENTITY;
ENTITY IfcSpatialElement ABSTRACT SUBTYPE OF (IfcProduct); END_ENTITY;
ENTITY IfcWall SUBTYPE OF (IfcElement); END_ENTITY;
ENTITY IfcDoor SUBTYPE OF (IfcElement); END_ENTITY;
END_SCHEMA;";

    #[test]
    fn test_subtypes_in_declaration_order() {
        let schema = Schema::parse(TREE).unwrap();
        let subs: Vec<_> = schema
            .subtypes("IfcElement")
            .unwrap()
            .into_iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(subs, vec!["IfcWall", "IfcDoor"]);
        assert!(schema.subtypes("IfcWall").unwrap().is_empty());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let schema = Schema::parse(TREE).unwrap();
        assert_eq!(schema.declaration_by_name("IFCWALL").unwrap().name, "IfcWall");
        assert_eq!(
            schema.supertype("ifcwall").unwrap().map(|d| d.name.as_str()),
            Some("IfcElement")
        );
        assert!(matches!(
            schema.declaration_by_name("IfcBeam"),
            Err(IconError::UnknownDeclaration { .. })
        ));
    }

    #[test]
    fn test_dangling_supertype() {
        let err = Schema::parse("SCHEMA X; ENTITY A SUBTYPE OF (B); END_ENTITY; END_SCHEMA;")
            .unwrap_err();
        assert!(matches!(err, IconError::DanglingSupertype { .. }));
    }

    #[test]
    fn test_duplicate_entity() {
        let err = Schema::parse("SCHEMA X; ENTITY A; END_ENTITY; ENTITY a; END_ENTITY; END_SCHEMA;")
            .unwrap_err();
        assert!(matches!(err, IconError::SchemaParse(_)));
    }

    #[test]
    fn test_load_schemas_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.exp"), "SCHEMA IFC4; ENTITY A; END_ENTITY; END_SCHEMA;").unwrap();
        fs::write(dir.path().join("a.exp"), "SCHEMA IFC4X3; ENTITY A; END_ENTITY; END_SCHEMA;").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let schemas = load_schemas(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = schemas.iter().map(Schema::name).collect();
        assert_eq!(names, vec!["IFC4", "IFC4X3"]);
    }

    #[test]
    fn test_load_schemas_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_schemas(&[dir.path().to_path_buf()]),
            Err(IconError::NoSchemas(_))
        ));
    }
}
