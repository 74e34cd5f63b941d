use crate::error::{QrError, Result};
use crate::models::ModuleMatrix;
use image::{GenericImageView, RgbaImage};
use std::env;
use std::path::Path;

fn max_dim_from_env() -> Option<u32> {
    match env::var("QR_OVERLAY_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an overlay image as RGBA.
///
/// Images larger than `QR_OVERLAY_MAX_DIM` on either side are downscaled
/// first; the overlay is resized again at composite time anyway.
pub fn load_overlay<P: AsRef<Path>>(path: P) -> std::result::Result<RgbaImage, image::ImageError> {
    let img = image::open(path)?;
    let rgba = match max_dim_from_env() {
        Some(max_dim) if img.dimensions().0.max(img.dimensions().1) > max_dim => img
            .resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
            .to_rgba8(),
        _ => img.to_rgba8(),
    };
    Ok(rgba)
}

/// Write a rendered buffer as PNG.
pub fn save_png<P: AsRef<Path>>(
    image: &RgbaImage,
    path: P,
) -> std::result::Result<(), image::ImageError> {
    image.save_with_format(path, image::ImageFormat::Png)
}

/// Parse `WxH` (or a single `N` for a square) into a pixel size.
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let parse = |v: &str| {
        v.trim()
            .parse::<u32>()
            .map_err(|_| QrError::RenderTargetError(format!("invalid size '{s}'")))
    };
    match s.split_once(['x', 'X']) {
        Some((w, h)) => Ok((parse(w)?, parse(h)?)),
        None => {
            let n = parse(s)?;
            Ok((n, n))
        }
    }
}

/// Summary statistics for a module matrix.
#[derive(Debug, Clone, Copy)]
pub struct ModuleStats {
    /// Modules per side.
    pub dimension: usize,
    /// Count of dark modules.
    pub dark_modules: usize,
    /// Total modules in the matrix.
    pub total_modules: usize,
    /// Ratio of dark modules to total modules.
    pub dark_ratio: f64,
}

/// Compute dark module stats for a matrix.
pub fn module_stats(matrix: &ModuleMatrix) -> ModuleStats {
    let dark = matrix.dark_count();
    let total = matrix.size() * matrix.size();
    let ratio = if total == 0 {
        0.0
    } else {
        dark as f64 / total as f64
    };
    ModuleStats {
        dimension: matrix.size(),
        dark_modules: dark,
        total_modules: total,
        dark_ratio: ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Module;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_path(ext: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        path.push(format!("rust_qrcode_tools_{nanos}_{sequence}.{ext}"));
        path
    }

    #[test]
    fn save_and_load_png_round_trip() {
        let path = temp_path("png");
        let img = RgbaImage::from_fn(6, 4, |x, y| image::Rgba([x as u8 * 40, y as u8 * 60, 7, 255]));
        save_png(&img, &path).unwrap();
        let loaded = load_overlay(&path).unwrap();
        assert_eq!(loaded, img);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn parse_size_accepts_pair_and_square() {
        assert_eq!(parse_size("300x200").unwrap(), (300, 200));
        assert_eq!(parse_size("512").unwrap(), (512, 512));
        assert!(parse_size("12xfoo").is_err());
        assert!(parse_size("").is_err());
    }

    #[test]
    fn module_stats_counts_dark() {
        let mut m = ModuleMatrix::new(2);
        m.set(0, 0, Module::Dark);
        m.set(1, 1, Module::Dark);
        let stats = module_stats(&m);
        assert_eq!(stats.dark_modules, 2);
        assert_eq!(stats.total_modules, 4);
        assert!((stats.dark_ratio - 0.5).abs() < f64::EPSILON);
    }
}
