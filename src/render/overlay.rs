//! Centered overlay sizing and compositing.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::error::{QrError, Result};
use crate::models::ECLevel;

/// An image composited over the center of a rendered symbol.
#[derive(Debug, Clone)]
pub struct Overlay {
    /// Overlay pixels; the aspect ratio is preserved when scaling
    pub image: RgbaImage,
    /// Fraction (0.0-1.0) of the error correction budget the overlay may cover
    pub max_area_fraction: f64,
}

impl Overlay {
    /// Overlay `image` limited to `max_area_fraction` of the correction budget
    pub fn new(image: RgbaImage, max_area_fraction: f64) -> Self {
        Self {
            image,
            max_area_fraction,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.image.width() == 0 || self.image.height() == 0 {
            return Err(QrError::RenderTargetError("overlay image is empty".into()));
        }
        if !(0.0..=1.0).contains(&self.max_area_fraction) {
            return Err(QrError::RenderTargetError(format!(
                "overlay area fraction {} outside 0.0-1.0",
                self.max_area_fraction
            )));
        }
        Ok(())
    }
}

/// Largest box with the overlay's aspect ratio whose area stays within
/// `percent_correction * max_area_fraction` of the canvas.
///
/// Returns `None` when not even a one-pixel-wide box fits.
pub fn overlay_box(
    canvas: (u32, u32),
    overlay: (u32, u32),
    ec_level: ECLevel,
    max_area_fraction: f64,
) -> Option<(u32, u32)> {
    let (width, height) = canvas;
    let (ow, oh) = overlay;
    if ow == 0 || oh == 0 {
        return None;
    }
    let budget =
        ec_level.percent_correction() * max_area_fraction * f64::from(width) * f64::from(height);

    // Height tracks width monotonically, so area grows with w and the last
    // fitting candidate is the largest
    let mut best = None;
    for w in 1..=width {
        let h = ((f64::from(w) * f64::from(oh) / f64::from(ow)).round() as u32).max(1);
        if h > height || f64::from(w) * f64::from(h) > budget {
            break;
        }
        best = Some((w, h));
    }
    best
}

/// Scale `overlay` into its budgeted box and alpha-blend it over the center.
pub fn composite(canvas: &mut RgbaImage, overlay: &Overlay, ec_level: ECLevel) -> Result<()> {
    overlay.validate()?;
    let Some((bw, bh)) = overlay_box(
        canvas.dimensions(),
        overlay.image.dimensions(),
        ec_level,
        overlay.max_area_fraction,
    ) else {
        debug!(
            fraction = overlay.max_area_fraction,
            ec = ec_level.as_str(),
            "overlay budget too small, skipping"
        );
        return Ok(());
    };

    let scaled = imageops::resize(&overlay.image, bw, bh, FilterType::Triangle);
    let x0 = (canvas.width() - bw) / 2;
    let y0 = (canvas.height() - bh) / 2;
    debug!(width = bw, height = bh, x = x0, y = y0, "overlay placed");

    for (x, y, pixel) in scaled.enumerate_pixels() {
        let bg = canvas.get_pixel(x0 + x, y0 + y);
        let blended = alpha_blend(bg, pixel);
        canvas.put_pixel(x0 + x, y0 + y, blended);
    }
    Ok(())
}

/// Alpha-blend foreground pixel over background pixel.
fn alpha_blend(bg: &Rgba<u8>, fg: &Rgba<u8>) -> Rgba<u8> {
    let fa = f64::from(fg.0[3]) / 255.0;
    let ba = f64::from(bg.0[3]) / 255.0;
    let out_a = fa + ba * (1.0 - fa);
    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |i: usize| {
        ((f64::from(fg.0[i]) * fa + f64::from(bg.0[i]) * ba * (1.0 - fa)) / out_a).round() as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round() as u8,
    ])
}
