//! Header template loading and title substitution
//!
//! Every receipt starts from a fixed header (doctype, `<head>`, styles and the
//! opening `<body>`). The header lives in a text file containing a single
//! title placeholder which is replaced verbatim with the receipt title.

use crate::error::ResourceError;
use std::fs;
use std::path::Path;

/// Placeholder token replaced with the receipt title
pub const TITLE_PLACEHOLDER: &str = ":::TITLE:::";

/// Default location of the header template, relative to the working directory
pub const DEFAULT_TEMPLATE_PATH: &str = "html/header.template";

/// Replace every title placeholder in a template with the given title
///
/// The title is inserted as-is; no escaping is applied.
///
/// # Parameters
/// * `template` - Template text containing [`TITLE_PLACEHOLDER`]
/// * `title` - Text to substitute for the placeholder
///
/// # Returns
/// * `String` - The substituted header
pub fn substitute_title(template: &str, title: &str) -> String {
    if !template.contains(TITLE_PLACEHOLDER) {
        log::warn!(
            "Header template does not contain the {} placeholder",
            TITLE_PLACEHOLDER
        );
    }
    template.replace(TITLE_PLACEHOLDER, title)
}

/// Read a header template from disk and substitute the title
///
/// # Parameters
/// * `path` - Path to the template file
/// * `title` - Text to substitute for the placeholder
///
/// # Returns
/// * `Ok(String)` - The substituted header
/// * `Err(ResourceError::TemplateRead)` - The template file could not be read
pub fn load_header<P: AsRef<Path>>(path: P, title: &str) -> Result<String, ResourceError> {
    let path = path.as_ref();
    let template = fs::read_to_string(path).map_err(|source| ResourceError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Loaded header template from {}", path.display());
    Ok(substitute_title(&template, title))
}
