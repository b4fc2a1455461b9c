use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{LifegridError, LifegridResult};

/// Rasterised page.
#[derive(Clone, Debug)]
pub struct RasterFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Vec<u8>,
}

/// Parse `svg` and render it at `scale` into an RGBA8 frame.
///
/// `fontdb` should be the database the emitting surface measured with so
/// the preview shapes text using the same faces.
pub fn rasterize_svg(
    svg: &[u8],
    fontdb: Arc<usvg::fontdb::Database>,
    scale: f32,
) -> LifegridResult<RasterFrame> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(LifegridError::validation(
            "raster scale must be finite and > 0",
        ));
    }

    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg, &opts).with_context(|| "parse svg tree")?;

    let size = tree.size();
    let width = ((size.width() * scale).ceil() as u32).max(1);
    let height = ((size.height() * scale).ceil() as u32).max(1);

    // Keep pixmap allocations bounded; callers wanting poster-resolution
    // output should rasterise tiles instead.
    const MAX_DIM: u32 = 16_384;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(LifegridError::layout_infeasible(format!(
            "raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("failed to allocate {width}x{height} pixmap"))?;

    let xform = resvg::tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    Ok(RasterFrame {
        width,
        height,
        rgba8_premul: pixmap.data().to_vec(),
    })
}
