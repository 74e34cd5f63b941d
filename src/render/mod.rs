//! Raster rendering of module matrices.
//!
//! Modules are scaled with nearest-neighbour sampling only: every output
//! pixel takes exactly the foreground or background color, so module edges
//! never blur.

/// Overlay sizing and compositing
pub mod overlay;

use image::RgbaImage;

use crate::error::{QrError, Result};
use crate::models::{ECLevel, ModuleMatrix, Rgba};

pub use overlay::{Overlay, overlay_box};

/// Output parameters for [`render`]
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Color of dark modules
    pub foreground: Rgba,
    /// Color of light modules and the quiet zone
    pub background: Rgba,
    /// Light margin around the symbol, in modules
    pub quiet_zone: u32,
    /// Optional centered overlay
    pub overlay: Option<Overlay>,
}

impl RenderConfig {
    /// Black on white, no quiet zone, no overlay
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            foreground: Rgba::BLACK,
            background: Rgba::WHITE,
            quiet_zone: 0,
            overlay: None,
        }
    }

    /// Set foreground and background colors
    pub fn with_colors(mut self, foreground: Rgba, background: Rgba) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    /// Set the quiet zone width in modules
    pub fn with_quiet_zone(mut self, modules: u32) -> Self {
        self.quiet_zone = modules;
        self
    }

    /// Attach an overlay
    pub fn with_overlay(mut self, overlay: Overlay) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Modules per side including the quiet zone on both edges
    pub fn span(&self, dimension: usize) -> usize {
        dimension + 2 * self.quiet_zone as usize
    }
}

/// Map each output pixel along one axis to a module index within `span`.
fn axis_map(pixels: u32, span: usize) -> Vec<usize> {
    (0..u64::from(pixels))
        .map(|p| (p * span as u64 / u64::from(pixels)) as usize)
        .collect()
}

/// Render `matrix` to an RGBA8 buffer of exactly `config.width` x `config.height`.
///
/// `ec_level` sets the overlay's area budget.
pub fn render(matrix: &ModuleMatrix, ec_level: ECLevel, config: &RenderConfig) -> Result<RgbaImage> {
    if config.width == 0 || config.height == 0 {
        return Err(QrError::RenderTargetError(format!(
            "output size {}x{} has a zero dimension",
            config.width, config.height
        )));
    }

    let quiet = config.quiet_zone as usize;
    let span = config.span(matrix.size());
    let cols = axis_map(config.width, span);
    let rows = axis_map(config.height, span);
    let fg = config.foreground.to_rgba8();
    let bg = config.background.to_rgba8();

    let mut image = RgbaImage::from_fn(config.width, config.height, |px, py| {
        let mx = cols[px as usize].wrapping_sub(quiet);
        let my = rows[py as usize].wrapping_sub(quiet);
        // Quiet-zone indices wrap past the matrix and read as light
        if matrix.is_dark(mx, my) { fg } else { bg }
    });

    if let Some(overlay) = &config.overlay {
        overlay::composite(&mut image, overlay, ec_level)?;
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Module;

    fn checker(size: usize) -> ModuleMatrix {
        let mut m = ModuleMatrix::new(size);
        for y in 0..size {
            for x in 0..size {
                m.set(x, y, Module::from_dark((x + y) % 2 == 0));
            }
        }
        m
    }

    #[test]
    fn test_zero_size_rejected() {
        let m = checker(3);
        for (w, h) in [(0, 10), (10, 0), (0, 0)] {
            let config = RenderConfig::new(w, h);
            assert!(matches!(
                render(&m, ECLevel::L, &config),
                Err(QrError::RenderTargetError(_))
            ));
        }
    }

    #[test]
    fn test_integer_scale_blocks() {
        let m = checker(3);
        let img = render(&m, ECLevel::L, &RenderConfig::new(9, 9)).unwrap();
        let black = image::Rgba([0, 0, 0, 255]);
        let white = image::Rgba([255, 255, 255, 255]);
        for y in 0..9 {
            for x in 0..9 {
                let expected = if (x / 3 + y / 3) % 2 == 0 { black } else { white };
                assert_eq!(*img.get_pixel(x, y), expected, "({x},{y})");
            }
        }
    }

    #[test]
    fn test_fractional_scale_uses_only_two_colors() {
        let m = checker(21);
        let fg = Rgba::from_hex("e74c3c").unwrap();
        let bg = Rgba::from_hex("fff").unwrap();
        let config = RenderConfig::new(100, 77).with_colors(fg, bg);
        let img = render(&m, ECLevel::L, &config).unwrap();
        assert_eq!(img.dimensions(), (100, 77));
        let (f8, b8) = (fg.to_rgba8(), bg.to_rgba8());
        assert!(img.pixels().all(|p| *p == f8 || *p == b8));
    }

    #[test]
    fn test_quiet_zone_is_background() {
        let mut m = ModuleMatrix::new(1);
        m.set(0, 0, Module::Dark);
        let config = RenderConfig::new(10, 10).with_quiet_zone(2);
        let img = render(&m, ECLevel::L, &config).unwrap();
        // span 5 modules over 10 pixels: the dark module covers pixels 4-5
        assert_eq!(img.get_pixel(4, 4).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(5, 5).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(3, 4).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(9, 9).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let m = checker(25);
        let config = RenderConfig::new(123, 123).with_quiet_zone(4);
        let a = render(&m, ECLevel::Q, &config).unwrap();
        let b = render(&m, ECLevel::Q, &config).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }
}
