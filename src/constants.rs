/// File and entity name defaults shared by the CLI and the config layer

// Icon mapping files
pub const BASE_ICONS_FILE: &str = "ifc-icons.json";
pub const FULL_ICONS_FILE: &str = "ifc-full-icons.json";

// Published copies of the mapping files
pub const BASE_ICONS_URL: &str = "https://github.com/AECgeeks/ifc-icons/raw/main/ifc-icons.json";
pub const FULL_ICONS_URL: &str =
    "https://github.com/AECgeeks/ifc-icons/raw/main/ifc-full-icons.json";

/// Entity the icon propagation starts from
pub const ROOT_ENTITY: &str = "IfcProduct";

// Local layout
pub const MATERIAL_ICONS_DIR: &str = "material-design-icons";
pub const SCHEMAS_DIR: &str = "schemas";
pub const OUTPUT_DIR: &str = "ifc_icons";
pub const LOG_DIR: &str = "logs";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Config file looked up in the working directory when none is given
pub const CONFIG_FILE: &str = "ifc_icons.toml";
pub const CONFIG_ENV_VAR: &str = "IFC_ICONS_CONFIG";

pub const SCHEMA_EXTENSION: &str = "exp";
pub const PNG_EXTENSION: &str = "png";
