//! The text overlay shown when a body is clicked.

/// CSS class carried by the overlay element.
pub const DESCRIPTION_CLASS: &str = "description";

#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("no document available")]
    NoDocument,

    #[error("document has no body element")]
    NoBody,

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// Somewhere to show a body description.
///
/// Implementations keep at most one element with class
/// [`DESCRIPTION_CLASS`]: showing new text removes the previous element
/// before inserting a fresh one.
pub trait DescriptionSurface {
    fn show_description(&mut self, text: &str) -> Result<(), OverlayError>;
}

/// One overlay element as recorded by [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayElement {
    pub class: String,
    pub text: String,
}

/// Headless surface that records elements in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    elements: Vec<OverlayElement>,
    inserted: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[OverlayElement] {
        &self.elements
    }

    /// Text of the current description element, if one exists.
    pub fn current(&self) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.class == DESCRIPTION_CLASS)
            .map(|e| e.text.as_str())
    }

    /// Elements ever inserted, including removed ones.
    pub fn inserted(&self) -> usize {
        self.inserted
    }
}

impl DescriptionSurface for MemorySurface {
    fn show_description(&mut self, text: &str) -> Result<(), OverlayError> {
        self.elements.retain(|e| e.class != DESCRIPTION_CLASS);
        self.elements.push(OverlayElement {
            class: DESCRIPTION_CLASS.to_string(),
            text: text.to_string(),
        });
        self.inserted += 1;
        Ok(())
    }
}
