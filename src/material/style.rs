use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Material Icons theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IconStyle {
    #[default]
    Baseline,
    Outlined,
    Round,
    Sharp,
    #[value(name = "twotone")]
    TwoTone,
}

impl IconStyle {
    /// Suffix used in the `png/` tree, e.g. `materialiconsoutlined`
    pub fn dir_suffix(self) -> &'static str {
        match self {
            IconStyle::Baseline => "",
            IconStyle::Outlined => "outlined",
            IconStyle::Round => "round",
            IconStyle::Sharp => "sharp",
            IconStyle::TwoTone => "twotone",
        }
    }

    /// Suffix used by the font codepoints file, e.g. `MaterialIconsTwoTone`
    pub fn font_suffix(self) -> &'static str {
        match self {
            IconStyle::Baseline => "",
            IconStyle::Outlined => "Outlined",
            IconStyle::Round => "Round",
            IconStyle::Sharp => "Sharp",
            IconStyle::TwoTone => "TwoTone",
        }
    }

    pub fn png_dir_name(self) -> String {
        format!("materialicons{}", self.dir_suffix())
    }

    pub fn codepoints_file_name(self) -> String {
        format!("MaterialIcons{}-Regular.codepoints", self.font_suffix())
    }
}

impl fmt::Display for IconStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconStyle::Baseline => f.write_str("baseline"),
            other => f.write_str(other.dir_suffix()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum IconSize {
    #[serde(rename = "18dp")]
    #[value(name = "18dp")]
    Dp18,
    #[serde(rename = "24dp")]
    #[value(name = "24dp")]
    Dp24,
    #[serde(rename = "36dp")]
    #[value(name = "36dp")]
    Dp36,
    #[default]
    #[serde(rename = "48dp")]
    #[value(name = "48dp")]
    Dp48,
}

impl IconSize {
    pub fn as_str(self) -> &'static str {
        match self {
            IconSize::Dp18 => "18dp",
            IconSize::Dp24 => "24dp",
            IconSize::Dp36 => "36dp",
            IconSize::Dp48 => "48dp",
        }
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum IconZoom {
    #[default]
    #[serde(rename = "1x")]
    #[value(name = "1x")]
    One,
    #[serde(rename = "2x")]
    #[value(name = "2x")]
    Two,
}

impl IconZoom {
    pub fn as_str(self) -> &'static str {
        match self {
            IconZoom::One => "1x",
            IconZoom::Two => "2x",
        }
    }
}

impl fmt::Display for IconZoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_dir_names() {
        assert_eq!(IconStyle::Baseline.png_dir_name(), "materialicons");
        assert_eq!(IconStyle::TwoTone.png_dir_name(), "materialiconstwotone");
        assert_eq!(IconStyle::Sharp.png_dir_name(), "materialiconssharp");
    }

    #[test]
    fn test_codepoints_file_names() {
        assert_eq!(
            IconStyle::Baseline.codepoints_file_name(),
            "MaterialIcons-Regular.codepoints"
        );
        assert_eq!(
            IconStyle::TwoTone.codepoints_file_name(),
            "MaterialIconsTwoTone-Regular.codepoints"
        );
        assert_eq!(
            IconStyle::Outlined.codepoints_file_name(),
            "MaterialIconsOutlined-Regular.codepoints"
        );
    }

    #[test]
    fn test_deserialize_from_config_values() {
        #[derive(Deserialize)]
        struct Opts {
            style: IconStyle,
            size: IconSize,
            zoom: IconZoom,
        }
        let opts: Opts = toml::from_str("style = \"twotone\"\nsize = \"24dp\"\nzoom = \"2x\"").unwrap();
        assert_eq!(opts.style, IconStyle::TwoTone);
        assert_eq!(opts.size, IconSize::Dp24);
        assert_eq!(opts.zoom, IconZoom::Two);
    }
}
