use std::{fs, path::Path};

use egui::Vec2;

use crate::command::History;
use crate::error::DrawResult;
use crate::renderer::replay;
use crate::surface::{RasterSurface, Surface};

/// Magnification used by the export button.
pub const DEFAULT_EXPORT_SCALE: f32 = 4.0;

pub const PNG_MIME: &str = "image/png";

/// An encoded image of the drawing.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub mime_type: &'static str,
}

impl ExportedImage {
    pub fn save<A: AsRef<Path>>(&self, path: A) -> DrawResult<()> {
        fs::write(path, &self.bytes)?;
        Ok(())
    }

    /// Offer the image to the browser as a file download named `file_name`.
    #[cfg(target_arch = "wasm32")]
    pub fn download(&self, file_name: &str) -> DrawResult<()> {
        use crate::error::DrawError;
        use eframe::wasm_bindgen::{JsCast as _, JsValue};
        use web_sys::js_sys;

        let failed = |err: JsValue| DrawError::Download(format!("{err:?}"));
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| DrawError::Download("no document".to_owned()))?;

        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(self.bytes.as_slice()));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(self.mime_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(failed)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(failed)?;

        let anchor = document
            .create_element("a")
            .map_err(failed)?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|element| failed(element.into()))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).map_err(failed)
    }
}

/// Replay the committed commands onto an offscreen surface `scale` times
/// the size of the canvas. The cursor preview and any command still being
/// drawn are left out.
pub fn render_scaled(
    history: &History,
    canvas_size: Vec2,
    scale: f32,
) -> DrawResult<RasterSurface> {
    let mut surface = RasterSurface::new(canvas_size * scale)?;
    surface.set_scale(scale);
    replay(history.committed(), &mut surface);
    Ok(surface)
}

/// Render the drawing at `scale` and encode it as PNG.
pub fn export(history: &History, canvas_size: Vec2, scale: f32) -> DrawResult<ExportedImage> {
    let surface = render_scaled(history, canvas_size, scale)?;
    let [width, height] = surface.pixel_size();
    let bytes = surface.to_image(PNG_MIME)?;
    log::info!(
        "Exported {} commands as {width}x{height} PNG ({} bytes)",
        history.committed().len(),
        bytes.len()
    );
    Ok(ExportedImage {
        bytes,
        width,
        height,
        mime_type: PNG_MIME,
    })
}
