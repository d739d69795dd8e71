use std::io::Cursor;

use ab_glyph::FontArc;
use image::{ImageFormat, RgbaImage};

use crate::config::SketchConfig;
use crate::element::Drawable;
use crate::error::SketchResult;
use crate::renderer::Renderer;
use crate::surface::RasterSurface;

/// Render the drawables offscreen at the configured export scale.
///
/// No preview is drawn; only what is passed in ends up in the image.
pub fn render_export(
    committed: &[Drawable],
    config: &SketchConfig,
    fonts: Vec<FontArc>,
) -> SketchResult<RgbaImage> {
    let mut surface = RasterSurface::new(
        config.canvas_size,
        config.export_scale,
        config.background_color(),
    )?
    .with_fonts(fonts);
    Renderer::replay(&mut surface, committed, None);
    Ok(surface.into_image())
}

/// Encode an image as PNG
pub fn encode_png(image: &RgbaImage) -> SketchResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Render and encode in one step
pub fn export_png(
    committed: &[Drawable],
    config: &SketchConfig,
    fonts: Vec<FontArc>,
) -> SketchResult<Vec<u8>> {
    let image = render_export(committed, config, fonts)?;
    let bytes = encode_png(&image)?;
    log::info!(
        "Exported {} drawables as {}x{} PNG ({} bytes)",
        committed.len(),
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(bytes)
}

/// Ask where to save the PNG and write it. Cancelling the dialog is not an error.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_png(bytes: &[u8], file_name: &str) -> SketchResult<()> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("PNG image", &["png"])
        .set_file_name(file_name)
        .save_file()
    else {
        log::info!("Export cancelled");
        return Ok(());
    };

    std::fs::write(&path, bytes)?;
    log::info!("Saved export to {}", path.display());
    Ok(())
}

/// How long the browser keeps the export's object URL alive after the click
#[cfg(target_arch = "wasm32")]
const REVOKE_DELAY_MS: i32 = 10_000;

/// Hand the PNG to the browser as a file download
#[cfg(target_arch = "wasm32")]
pub fn save_png(bytes: &[u8], file_name: &str) -> SketchResult<()> {
    use crate::error::SketchError;
    use eframe::wasm_bindgen::{JsCast as _, JsValue, closure::Closure};

    let js_error = |err: JsValue| SketchError::Download(format!("{err:?}"));
    let missing = |what: &str| SketchError::Download(format!("no {what} available"));

    let window = web_sys::window().ok_or_else(|| missing("window"))?;
    let document = window.document().ok_or_else(|| missing("document"))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| missing("anchor element"))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    // Revoking right after the click can cancel the download
    let revoke = Closure::once_into_js(move || {
        if let Err(err) = web_sys::Url::revoke_object_url(&url) {
            log::warn!("Failed to revoke export URL: {:?}", err);
        }
    });
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            revoke.unchecked_ref(),
            REVOKE_DELAY_MS,
        )
        .map_err(js_error)?;
    log::info!("Started download of {}", file_name);
    Ok(())
}
