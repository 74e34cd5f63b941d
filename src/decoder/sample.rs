//! Sampling a rendered buffer back onto the module grid.

use image::RgbaImage;

use crate::error::{QrError, Result};
use crate::models::{Module, ModuleMatrix};
use crate::render::RenderConfig;

/// Pixel at the middle of the run of pixels that render module `m`.
///
/// Inverts the renderer's `p * span / pixels` mapping exactly.
fn module_center(m: usize, span: usize, pixels: u32) -> Option<u32> {
    let pixels = pixels as usize;
    let start = (m * pixels).div_ceil(span);
    let end = ((m + 1) * pixels).div_ceil(span);
    (end > start).then(|| ((start + end - 1) / 2) as u32)
}

fn distance(a: image::Rgba<u8>, b: image::Rgba<u8>) -> u32 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(&x, &y)| u32::from(x.abs_diff(y)).pow(2))
        .sum()
}

/// Sample the center of every module of a `dimension`-wide symbol drawn with
/// `config`, classifying each as the nearer of the two configured colors.
pub fn sample_rendered(
    image: &RgbaImage,
    dimension: usize,
    config: &RenderConfig,
) -> Result<ModuleMatrix> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(QrError::RenderTargetError("empty image".into()));
    }
    let span = config.span(dimension);
    let quiet = config.quiet_zone as usize;
    let fg = config.foreground.to_rgba8();
    let bg = config.background.to_rgba8();

    let cols = (0..dimension)
        .map(|m| module_center(quiet + m, span, width))
        .collect::<Option<Vec<_>>>()
        .ok_or(QrError::Unreadable("image narrower than the module grid"))?;
    let rows = (0..dimension)
        .map(|m| module_center(quiet + m, span, height))
        .collect::<Option<Vec<_>>>()
        .ok_or(QrError::Unreadable("image shorter than the module grid"))?;

    let mut matrix = ModuleMatrix::new(dimension);
    for (my, &py) in rows.iter().enumerate() {
        for (mx, &px) in cols.iter().enumerate() {
            let pixel = *image.get_pixel(px, py);
            let dark = distance(pixel, fg) < distance(pixel, bg);
            matrix.set(mx, my, Module::from_dark(dark));
        }
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ECLevel;
    use crate::render::render;

    #[test]
    fn test_module_center_inverts_render_mapping() {
        for (span, pixels) in [(21usize, 21u32), (21, 100), (29, 200), (33, 57)] {
            for m in 0..span {
                let p = module_center(m, span, pixels).unwrap();
                assert_eq!(p as usize * span / pixels as usize, m);
            }
        }
        assert_eq!(module_center(3, 10, 5), None);
    }

    #[test]
    fn test_sample_matches_rendered_matrix() {
        let mut m = ModuleMatrix::new(5);
        for y in 0..5 {
            for x in 0..5 {
                m.set(x, y, Module::from_dark((x * 7 + y * 3) % 4 == 0));
            }
        }
        let config = RenderConfig::new(43, 61).with_quiet_zone(2);
        let img = render(&m, ECLevel::L, &config).unwrap();
        assert_eq!(sample_rendered(&img, 5, &config).unwrap(), m);
    }

    #[test]
    fn test_too_small_image() {
        let config = RenderConfig::new(10, 10);
        let img = RgbaImage::new(10, 10);
        assert!(matches!(
            sample_rendered(&img, 21, &config),
            Err(QrError::Unreadable(_))
        ));
    }
}
