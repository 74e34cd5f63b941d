//! End-to-end tests: encode, render, sample and read back
//!
//! These tests exercise the full pipeline the way a caller does and use the
//! in-crate reader as the decoding oracle.

use image::RgbaImage;
use rust_qrcode::encoder::segment::Segment;
use rust_qrcode::render::overlay_box;
use rust_qrcode::{
    ECLevel, Module, Overlay, QRCode, QrError, RenderConfig, Rgba, VersionChoice, encode,
    encode_segments, read_symbol, sample_rendered,
};

fn render_and_read(payload: &[u8], ec: ECLevel, config: &RenderConfig) -> Vec<u8> {
    let symbol = encode(payload, ec, VersionChoice::Auto).unwrap();
    let image = symbol.render(config).unwrap();
    let sampled = sample_rendered(&image, symbol.dimension(), config).unwrap();
    read_symbol(&sampled).unwrap().payload
}

#[test]
fn test_hello_is_version_1() {
    let symbol = encode(b"hello", ECLevel::L, VersionChoice::Auto).unwrap();
    assert_eq!(symbol.version().number(), 1);
    assert_eq!(symbol.dimension(), 21);
    assert_eq!(symbol.matrix().size(), 21);
}

#[test]
fn test_version_40_low_byte_capacity_boundary() {
    let max = vec![b'A'; 2953];
    let symbol = encode(&max, ECLevel::L, VersionChoice::Auto).unwrap();
    assert_eq!(symbol.version().number(), 40);
    assert_eq!(symbol.dimension(), 177);
    assert_eq!(read_symbol(symbol.matrix()).unwrap().payload, max);

    let over = vec![b'A'; 2954];
    match encode(&over, ECLevel::L, VersionChoice::Auto) {
        Err(QrError::CapacityExceeded {
            needed_bits,
            available_bits,
        }) => {
            assert_eq!(available_bits, 2956 * 8);
            assert!(needed_bits > available_bits);
        }
        other => panic!("expected CapacityExceeded, got {other:?}"),
    }
}

#[test]
fn test_overlay_box_within_high_budget() {
    // 30% correction x 0.50 fraction = 15% of the rendered area
    for (w, h, ow, oh) in [(400, 400, 50, 50), (640, 480, 300, 100), (333, 517, 7, 9)] {
        let (bw, bh) = overlay_box((w, h), (ow, oh), ECLevel::H, 0.5).unwrap();
        let area = f64::from(bw) * f64::from(bh);
        let budget = 0.15 * f64::from(w) * f64::from(h);
        assert!(area <= budget, "{bw}x{bh} exceeds {budget}");
        // One pixel wider (with matching aspect height) no longer fits
        let next_h = ((f64::from(bw + 1) * f64::from(oh) / f64::from(ow)).round() as u32).max(1);
        assert!(f64::from(bw + 1) * f64::from(next_h) > budget || next_h > h);
    }
}

#[test]
fn test_overlay_survives_readback() {
    let payload = b"https://example.org/path/to/a/resource?with=query-string&n=42";
    let logo = RgbaImage::from_pixel(32, 32, image::Rgba([231, 76, 60, 255]));
    let config = RenderConfig::new(450, 450).with_overlay(Overlay::new(logo, 0.2));

    let symbol = encode(payload, ECLevel::H, VersionChoice::Auto).unwrap();
    let image = symbol.render(&config).unwrap();
    assert_eq!(image.get_pixel(225, 225), &image::Rgba([231, 76, 60, 255]));

    let sampled = sample_rendered(&image, symbol.dimension(), &config).unwrap();
    let readback = read_symbol(&sampled).unwrap();
    assert_eq!(readback.payload, payload);
    assert!(readback.corrected > 0);
}

#[test]
fn test_render_is_idempotent() {
    let symbol = encode(b"idempotent", ECLevel::M, VersionChoice::Auto).unwrap();
    let config = RenderConfig::new(301, 299)
        .with_colors("e74c3c".parse().unwrap(), "fff".parse().unwrap())
        .with_quiet_zone(3);
    let a = symbol.render(&config).unwrap();
    let b = symbol.render(&config).unwrap();
    assert_eq!(a.dimensions(), (301, 299));
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn test_render_zero_size_fails() {
    let symbol = encode(b"x", ECLevel::L, VersionChoice::Auto).unwrap();
    assert!(matches!(
        symbol.render(&RenderConfig::new(0, 100)),
        Err(QrError::RenderTargetError(_))
    ));
}

#[test]
fn test_color_strings() {
    let white: Rgba = "fff".parse().unwrap();
    assert_eq!(white, Rgba::new(1.0, 1.0, 1.0, 1.0));

    let red: Rgba = "e74c3c".parse().unwrap();
    assert_eq!(red, Rgba::new(231.0 / 255.0, 76.0 / 255.0, 60.0 / 255.0, 1.0));

    for bad in ["ab", "abcde", "e74c3", "zzz", "", "#"] {
        assert!(
            matches!(bad.parse::<Rgba>(), Err(QrError::InvalidColorFormat(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_colored_render_round_trip() {
    let config = RenderConfig::new(260, 260)
        .with_colors("#1a237e".parse().unwrap(), "fff8e1".parse().unwrap())
        .with_quiet_zone(4);
    assert_eq!(render_and_read(b"colors", ECLevel::Q, &config), b"colors");
}

#[test]
fn test_round_trip_across_versions() {
    for (len, ec) in [(10, ECLevel::L), (150, ECLevel::M), (400, ECLevel::Q), (900, ECLevel::H)] {
        let payload: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
        let symbol = encode(&payload, ec, VersionChoice::Auto).unwrap();
        let side = (symbol.dimension() as u32 + 8) * 3;
        let config = RenderConfig::new(side, side).with_quiet_zone(4);
        assert_eq!(render_and_read(&payload, ec, &config), payload, "len {len}");
    }
}

#[test]
fn test_latin1_payload_round_trip() {
    let qr = QRCode::from_latin1("caf\u{e9} cr\u{e8}me").unwrap();
    assert_eq!(qr.data, b"caf\xE9 cr\xE8me");
    let symbol = qr.symbol().unwrap();
    assert_eq!(read_symbol(symbol.matrix()).unwrap().payload, qr.data);

    assert!(matches!(
        QRCode::from_latin1("\u{65e5}\u{672c}"),
        Err(QrError::InvalidEncoding(_))
    ));
}

#[test]
fn test_qrcode_defaults_render() {
    let qr = QRCode::new("defaults");
    let image = qr.image().unwrap();
    assert_eq!(image.dimensions(), (200, 200));
    assert!(image.pixels().all(|p| p.0 == [0, 0, 0, 255] || p.0 == [255, 255, 255, 255]));
}

#[test]
fn test_mixed_segments_round_trip() {
    let segments = vec![
        Segment::numeric(b"31415926535").unwrap(),
        Segment::alphanumeric(b" PI:").unwrap(),
        Segment::bytes(b" approx"),
    ];
    let symbol = encode_segments(&segments, ECLevel::M, VersionChoice::Auto).unwrap();
    assert_eq!(
        read_symbol(symbol.matrix()).unwrap().payload,
        b"31415926535 PI: approx"
    );
}

#[test]
fn test_damaged_modules_are_corrected() {
    let symbol = encode(b"damage tolerant payload", ECLevel::M, VersionChoice::Auto).unwrap();
    let mut damaged = symbol.matrix().clone();
    // Bottom-right data region, away from format and finder areas
    let size = damaged.size();
    for (x, y) in [(size - 1, size - 1), (size - 2, size - 3), (size - 1, size - 12)] {
        let flipped = Module::from_dark(!damaged.is_dark(x, y));
        damaged.set(x, y, flipped);
    }
    let readback = read_symbol(&damaged).unwrap();
    assert_eq!(readback.payload, b"damage tolerant payload");
    assert!(readback.corrected >= 1);
}
