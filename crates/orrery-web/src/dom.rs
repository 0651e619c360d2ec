use orrery_engine::{DescriptionSurface, OverlayError, DESCRIPTION_CLASS};
use wasm_bindgen::{JsCast, JsValue};

/// Description overlay rendered as a `<div class="description">` appended
/// to the document body.
#[derive(Debug, Default)]
pub struct DomOverlay;

impl DomOverlay {
    pub fn new() -> Self {
        Self
    }
}

impl DescriptionSurface for DomOverlay {
    fn show_description(&mut self, text: &str) -> Result<(), OverlayError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(OverlayError::NoDocument)?;

        let selector = format!(".{}", DESCRIPTION_CLASS);
        while let Some(existing) = document.query_selector(&selector).map_err(js_error)? {
            existing.remove();
        }

        let element = document.create_element("div").map_err(js_error)?;
        element.set_class_name(DESCRIPTION_CLASS);
        element.set_text_content(Some(text));

        let body = document.body().ok_or(OverlayError::NoBody)?;
        body.append_child(&element).map_err(js_error)?;
        Ok(())
    }
}

fn js_error(value: JsValue) -> OverlayError {
    let message = match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => value.as_string().unwrap_or_else(|| format!("{:?}", value)),
    };
    OverlayError::Dom(message)
}
