use std::path::{Path, PathBuf};

use genpdf::fonts::{Builtin, FontData, FontFamily};
use tracing::debug;

use crate::config::ReportSettings;
use crate::core::{AppError, Result};
use crate::modules::reports::models::FontName;

/// Searched in order when no font directory is configured
const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
    "/Library/Fonts",
    "C:\\Windows\\Fonts",
];

/// File stems of one TrueType family
struct MetricFiles {
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

const fn files(
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
) -> MetricFiles {
    MetricFiles {
        regular,
        bold,
        italic,
        bold_italic,
    }
}

const SANS: &[MetricFiles] = &[
    files(
        "LiberationSans-Regular",
        "LiberationSans-Bold",
        "LiberationSans-Italic",
        "LiberationSans-BoldItalic",
    ),
    files("Arial", "Arial Bold", "Arial Italic", "Arial Bold Italic"),
    files(
        "DejaVuSans",
        "DejaVuSans-Bold",
        "DejaVuSans-Oblique",
        "DejaVuSans-BoldOblique",
    ),
];

const SERIF: &[MetricFiles] = &[
    files(
        "LiberationSerif-Regular",
        "LiberationSerif-Bold",
        "LiberationSerif-Italic",
        "LiberationSerif-BoldItalic",
    ),
    files(
        "DejaVuSerif",
        "DejaVuSerif-Bold",
        "DejaVuSerif-Italic",
        "DejaVuSerif-BoldItalic",
    ),
];

const MONO: &[MetricFiles] = &[
    files(
        "LiberationMono-Regular",
        "LiberationMono-Bold",
        "LiberationMono-Italic",
        "LiberationMono-BoldItalic",
    ),
    files(
        "DejaVuSansMono",
        "DejaVuSansMono-Bold",
        "DejaVuSansMono-Oblique",
        "DejaVuSansMono-BoldOblique",
    ),
];

fn builtin(name: FontName) -> Builtin {
    match name {
        FontName::Helvetica => Builtin::Helvetica,
        FontName::Times => Builtin::Times,
        FontName::Courier => Builtin::Courier,
    }
}

fn metric_files(name: FontName) -> &'static [MetricFiles] {
    match name {
        FontName::Helvetica => SANS,
        FontName::Times => SERIF,
        FontName::Courier => MONO,
    }
}

/// Directories searched for the metric files of `settings`
pub fn font_dirs(settings: &ReportSettings) -> Vec<PathBuf> {
    match &settings.font_dir {
        Some(dir) => vec![dir.clone()],
        None => SYSTEM_FONT_DIRS.iter().map(PathBuf::from).collect(),
    }
}

/// Loads the standard PDF family named by the settings.
///
/// Text is drawn with the built-in PDF font, so nothing is embedded; the
/// TrueType files only provide the glyph metrics used for line breaking.
/// A missing italic face falls back to the upright one.
///
/// # Errors
/// `AppError::Configuration` when no directory holds a usable family
pub fn load_font_family(settings: &ReportSettings) -> Result<FontFamily<FontData>> {
    let dirs = font_dirs(settings);
    let builtin = builtin(settings.font_name);

    for dir in &dirs {
        for files in metric_files(settings.font_name) {
            if let Some(family) = load_family(dir, files, builtin)? {
                debug!(
                    font = %settings.font_name,
                    dir = %dir.display(),
                    metrics = files.regular,
                    "Font metrics loaded"
                );
                return Ok(family);
            }
        }
    }

    let searched = dirs
        .iter()
        .map(|dir| dir.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(AppError::configuration(format!(
        "No TrueType metrics for font '{}' found in {}; set REPORT_FONT_DIR",
        settings.font_name, searched
    )))
}

fn load_family(
    dir: &Path,
    files: &MetricFiles,
    builtin: Builtin,
) -> Result<Option<FontFamily<FontData>>> {
    let path = |stem: &str| dir.join(format!("{}.ttf", stem));
    let (regular, bold) = (path(files.regular), path(files.bold));
    if !regular.is_file() || !bold.is_file() {
        return Ok(None);
    }

    let load = |path: &Path| {
        FontData::load(path, Some(builtin)).map_err(|e| {
            AppError::configuration(format!("Cannot load font {}: {}", path.display(), e))
        })
    };
    let optional = |stem: &str, fallback: &FontData| -> Result<FontData> {
        let path = path(stem);
        if path.is_file() {
            load(&path)
        } else {
            Ok(fallback.clone())
        }
    };

    let regular = load(&regular)?;
    let bold = load(&bold)?;
    let italic = optional(files.italic, &regular)?;
    let bold_italic = optional(files.bold_italic, &bold)?;

    Ok(Some(FontFamily {
        regular,
        bold,
        italic,
        bold_italic,
    }))
}
