//! Material Design icon catalog: style/size/zoom selectors, font codepoints
//! and the PNG tree of a `google/material-design-icons` checkout.

pub mod catalog;
pub mod codepoints;
pub mod style;

pub use catalog::{get_list_icons_png, IconCatalog, MaterialIcon};
pub use codepoints::{get_codepoints, Codepoints};
pub use style::{IconSize, IconStyle, IconZoom};
