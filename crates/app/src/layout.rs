use tilt_scene::Document;

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    Parse(String),
    MissingRoot,
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::Parse(message) => write!(f, "layout parse error: {message}"),
            LayoutError::MissingRoot => write!(f, "layout has no root element"),
        }
    }
}

/// Reads a laid-out page snapshot (viewport plus element tree) from JSON.
pub fn parse_document(json: &str) -> Result<Document, LayoutError> {
    let document: Document =
        serde_json::from_str(json).map_err(|err| LayoutError::Parse(err.to_string()))?;
    if document.root.tag.is_empty() {
        return Err(LayoutError::MissingRoot);
    }
    Ok(document)
}
