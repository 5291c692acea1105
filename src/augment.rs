use crate::error::Result;
use crate::mapping::IconMapping;
use crate::schema::Schema;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Propagate icons from `root` down the inheritance tree of `schema`.
///
/// Each entity keeps its own non-empty icon from `icons`; otherwise it
/// inherits the icon of its nearest ancestor, or `None` when no ancestor
/// below `root` has one.
#[instrument(skip(schema, icons), fields(schema = schema.name()))]
pub fn augment(schema: &Schema, root: &str, icons: &IconMapping) -> Result<IconMapping> {
    let root = schema.declaration_by_name(root)?;
    let mut out = IconMapping::new();
    let mut visited = HashSet::new();
    let mut stack: Vec<(&str, Option<String>)> = vec![(root.name.as_str(), None)];

    while let Some((name, inherited)) = stack.pop() {
        if !visited.insert(name) {
            continue;
        }
        let own = icons
            .get(name)
            .and_then(|icon| icon.as_ref())
            .filter(|icon| !icon.is_empty())
            .cloned();
        let icon = own.or(inherited);

        // Reverse so subtypes are visited in declaration order
        for subtype in schema.subtypes(name)?.into_iter().rev() {
            stack.push((subtype.name.as_str(), icon.clone()));
        }
        out.insert(name.to_string(), icon);
    }

    debug!("Augmented {} entities", out.len());
    Ok(out)
}

/// Run [`augment`] over every schema and merge the results. Schemas are
/// applied in the given order, so later schemas win for shared classes.
pub fn augment_all(schemas: &[Schema], root: &str, icons: &IconMapping) -> Result<IconMapping> {
    let mut merged = IconMapping::new();
    for schema in schemas {
        let augmented = augment(schema, root, icons)?;
        info!(
            "Schema {}: {} classes below {}",
            schema.name(),
            augmented.len(),
            root
        );
        merged.extend(augmented);
    }
    Ok(merged)
}
