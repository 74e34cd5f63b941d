//! Property-based tests for encoding, rendering and read-back

use proptest::prelude::*;
use rust_qrcode::{
    ECLevel, QrError, RenderConfig, Rgba, VersionChoice, encode, read_symbol, sample_rendered,
};

fn ec_level_strategy() -> impl Strategy<Value = ECLevel> {
    prop::sample::select(ECLevel::ALL.to_vec())
}

fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_auto_version_is_smallest_fit(
        payload in payload_strategy(),
        ec in ec_level_strategy()
    ) {
        let symbol = encode(&payload, ec, VersionChoice::Auto).unwrap();
        prop_assert!(symbol.encoded_bits() <= symbol.data_capacity_bits());

        let number = u32::from(symbol.version().number());
        if number > 1 {
            let smaller = encode(&payload, ec, VersionChoice::Exact(number - 1));
            let too_small = matches!(smaller, Err(QrError::CapacityExceeded { .. }));
            prop_assert!(too_small);
        }
    }

    #[test]
    fn test_encoding_is_deterministic(
        payload in payload_strategy(),
        ec in ec_level_strategy()
    ) {
        let a = encode(&payload, ec, VersionChoice::Auto).unwrap();
        let b = encode(&payload, ec, VersionChoice::Auto).unwrap();
        prop_assert_eq!(a.mask(), b.mask());
        prop_assert_eq!(a.matrix(), b.matrix());
    }

    #[test]
    fn test_matrix_reads_back_payload(
        payload in payload_strategy(),
        ec in ec_level_strategy()
    ) {
        let symbol = encode(&payload, ec, VersionChoice::Auto).unwrap();
        prop_assert!(symbol.matrix().is_complete());
        let back = read_symbol(symbol.matrix()).unwrap();
        prop_assert_eq!(back.payload, payload);
        prop_assert_eq!(back.ec_level, ec);
        prop_assert_eq!(back.corrected, 0);
    }

    #[test]
    fn test_render_sample_round_trip(
        payload in prop::collection::vec(any::<u8>(), 1..40),
        extra_w in 0u32..200,
        extra_h in 0u32..200,
        quiet_zone in 0u32..5
    ) {
        let symbol = encode(&payload, ECLevel::M, VersionChoice::Auto).unwrap();
        let span = symbol.dimension() as u32 + 2 * quiet_zone;
        let config = RenderConfig::new(span + extra_w, span + extra_h).with_quiet_zone(quiet_zone);

        let image = symbol.render(&config).unwrap();
        prop_assert_eq!(image.dimensions(), (config.width, config.height));

        let sampled = sample_rendered(&image, symbol.dimension(), &config).unwrap();
        prop_assert_eq!(&sampled, symbol.matrix());
    }

    #[test]
    fn test_six_digit_colors_parse(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let hex = format!("{r:02x}{g:02X}{b:02x}");
        let color: Rgba = hex.parse().unwrap();
        prop_assert_eq!(color.to_rgba8().0, [r, g, b, 255]);

        let prefixed: Rgba = format!("#{hex}").parse().unwrap();
        prop_assert_eq!(prefixed, color);
    }
}
