use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::RgbaImage;
use rust_qrcode::{ECLevel, Overlay, RenderConfig, Rgba, VersionChoice, encode};

fn bench_render_200(c: &mut Criterion) {
    let symbol = encode(b"render benchmark", ECLevel::M, VersionChoice::Auto).unwrap();
    let config = RenderConfig::new(200, 200);
    c.bench_function("render_200x200", |b| {
        b.iter(|| symbol.render(black_box(&config)))
    });
}

fn bench_render_1024_colored(c: &mut Criterion) {
    let symbol = encode(&[b'z'; 500], ECLevel::Q, VersionChoice::Auto).unwrap();
    let fg = "e74c3c".parse::<Rgba>().unwrap();
    let bg = "fffc".parse::<Rgba>().unwrap();
    let config = RenderConfig::new(1024, 1024)
        .with_colors(fg, bg)
        .with_quiet_zone(4);
    c.bench_function("render_1024x1024_colored", |b| {
        b.iter(|| symbol.render(black_box(&config)))
    });
}

fn bench_render_overlay(c: &mut Criterion) {
    let symbol = encode(b"overlay benchmark payload", ECLevel::H, VersionChoice::Auto).unwrap();
    let logo = RgbaImage::from_pixel(128, 96, image::Rgba([20, 120, 220, 200]));
    let config = RenderConfig::new(600, 600).with_overlay(Overlay::new(logo, 0.5));
    c.bench_function("render_600x600_overlay", |b| {
        b.iter(|| symbol.render(black_box(&config)))
    });
}

criterion_group!(
    benches,
    bench_render_200,
    bench_render_1024_colored,
    bench_render_overlay
);
criterion_main!(benches);
