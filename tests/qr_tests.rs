#[cfg(test)]
mod qr_tests {
    use rayon::prelude::*;

    use optiqr::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_hello_world_symbol() {
        init_logger();
        let symbol = QRBuilder::new("HELLO WORLD").encode().unwrap();
        assert_eq!(symbol.width(), 21);
        assert_eq!(symbol.height(), 21);
        assert_eq!(symbol.row_heights, vec![1; 21]);
        assert!(symbol.info.starts_with("Version: 1\nECC Level: Q\nMask Pattern: "));
        assert!(symbol.info.ends_with('\n'));

        // Finder pattern in the top left corner
        let bits = symbol.to_bit_strings();
        assert_eq!(&bits[0][..8], "11111110");
        assert_eq!(&bits[2][..8], "10111010");
        assert_eq!(&bits[6][..8], "11111110");
        assert_eq!(&bits[7][..8], "00000000");
    }

    #[test]
    fn test_short_digit_run_is_not_numeric() {
        let content = "12345".chars().collect::<Vec<_>>();
        let segs = compute_segments(&content, false);
        assert_eq!(segs.len(), 1);
        assert_ne!(segs[0].mode, Mode::Numeric);
    }

    #[test]
    fn test_gs1() {
        init_logger();
        let data = "[01]12345678901231";
        let gs1 = QRBuilder::new(data).gs1(true).debug(true).build().unwrap();
        let plain = QRBuilder::new(data).build().unwrap();
        assert_eq!(*gs1.version(), 1);
        assert_ne!(gs1.to_symbol().rows, plain.to_symbol().rows);
    }

    #[test]
    fn test_gs1_conflicts_with_reader_init() {
        let res = QRBuilder::new("[01]12345678901231").gs1(true).reader_init(true).encode();
        assert_eq!(res, Err(QRError::ConflictingOptions));
        assert!(QRBuilder::new("HELLO").reader_init(true).encode().is_ok());
    }

    #[test]
    fn test_forced_version_too_small_is_ignored() {
        let data = "a".repeat(40);
        let symbol = QRBuilder::new(&data).forced_version(1).encode().unwrap();
        assert_eq!(symbol.width(), 29);
        assert!(symbol.info.starts_with("Version: 3\n"));
    }

    #[test]
    fn test_forced_version_larger_is_used() {
        let symbol = QRBuilder::new("HELLO WORLD").forced_version(5).encode().unwrap();
        assert_eq!(symbol.width(), 37);
        // Extra room lifts the level all the way to H
        assert!(symbol.info.starts_with("Version: 5\nECC Level: H\n"));
    }

    #[test]
    fn test_version_info_area() {
        let reserved = |qr: &QR| qr.grid().iter().filter(|m| m.kind == ModuleKind::Reserved).count();

        let v6 = QRBuilder::new("HELLO").version(Version::new(6).unwrap()).build().unwrap();
        assert_eq!(reserved(&v6), 30);

        let v7 = QRBuilder::new("HELLO").version(Version::new(7).unwrap()).build().unwrap();
        assert_eq!(reserved(&v7), 66);

        // Both 3x6 blocks carry the same bits, mirrored across the diagonal
        let w = v7.width() as i16;
        for i in 0..6 {
            for j in 0..3 {
                let bottom_left = v7.get(w - 11 + j, i);
                let top_right = v7.get(i, w - 11 + j);
                assert_eq!(bottom_left.kind, ModuleKind::Reserved);
                assert_eq!(bottom_left.color, top_right.color);
            }
        }
        let info = (0..18).fold(0u32, |acc, k| {
            let dark = v7.get(w - 11 + k % 3, k / 3).color.is_dark();
            acc | ((dark as u32) << k)
        });
        assert_eq!(info, 0x07c94);
    }

    #[test]
    fn test_errors() {
        assert_eq!(QRBuilder::new("").encode(), Err(QRError::EmptyData));

        let data = "a".repeat(3000);
        let res = QRBuilder::new(&data).ec_level(ECLevel::H).encode();
        assert!(matches!(res, Err(QRError::CapacityExceeded { .. })));

        assert_eq!(Version::new(0), Err(QRError::InvalidVersion));
        assert_eq!(Version::new(41), Err(QRError::InvalidVersion));
    }

    #[test]
    fn test_mixed_modes() {
        init_logger();
        let qr = QRBuilder::new("点茗 Price: 0123456789 JPY").ec_level(ECLevel::M).build().unwrap();
        assert!(qr.ec_level() >= ECLevel::M);
        assert!(qr.mask().is_some());
        assert_eq!(qr.width(), qr.version().width());
    }

    #[test]
    fn test_parallel_builds_match() {
        let data = (1..=40).map(|i| "OPTIQR-".repeat(i)).collect::<Vec<_>>();
        let sequential = data.iter().map(|d| QRBuilder::new(d).encode().unwrap()).collect::<Vec<_>>();
        let parallel = data.par_iter().map(|d| QRBuilder::new(d).encode().unwrap()).collect::<Vec<_>>();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_reed_solomon_presets() {
        let qr = ReedSolomon::qr(10).unwrap();
        assert_eq!(qr.field().poly(), 0x11d);
        assert_eq!(qr.fcr(), 0);

        let dm = ReedSolomon::data_matrix(5).unwrap();
        assert_eq!(dm.field().poly(), 0x12d);
        assert_eq!(dm.fcr(), 1);
        assert_eq!(dm.encode(&[142, 164, 186]).unwrap().len(), 5);

        let ap = ReedSolomon::australia_post(4).unwrap();
        assert_eq!(ap.field().size(), 64);
        assert_eq!(ap.encode(&[1, 2, 3]).unwrap().len(), 4);
        assert_eq!(ap.encode(&[64]), Err(QRError::InvalidCodecConfig));

        assert_eq!(ReedSolomon::new(0x11d, 0, 0).unwrap_err(), QRError::InvalidCodecConfig);
        assert!(GaloisField::new(0x11c).is_err());
    }
}

#[cfg(test)]
mod qr_proptests {
    use prop::string::string_regex;
    use proptest::prelude::*;

    use optiqr::*;

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    pub fn qr_strategy(regex: &str, max_sz: usize) -> impl Strategy<Value = (ECLevel, String)> {
        let pattern = format!(r"{regex}{{1,{max_sz}}}");
        (ec_level_strategy(), string_regex(&pattern).unwrap())
    }

    fn check_symbol(data: &str, ecl: ECLevel) -> Result<(), TestCaseError> {
        let qr = QRBuilder::new(data).ec_level(ecl).build().unwrap();
        let symbol = qr.to_symbol();
        let width = qr.version().width();

        prop_assert!(qr.ec_level() >= ecl);
        prop_assert_eq!(symbol.width(), width);
        prop_assert_eq!(symbol.height(), width);
        prop_assert_eq!(symbol.info, qr.info());
        prop_assert_eq!(qr.get(-8, 8).color, Color::Dark);
        prop_assert_eq!(qr.get(-8, 8).kind, ModuleKind::Functional);
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn proptest_numeric(params in qr_strategy("[0-9]", 1000)) {
            let (ecl, data) = params;
            check_symbol(&data, ecl)?;
        }

        #[test]
        fn proptest_alphanumeric(params in qr_strategy(r"[0-9A-Z $%*+\-./:]", 800)) {
            let (ecl, data) = params;
            check_symbol(&data, ecl)?;
        }

        #[test]
        fn proptest_byte(params in qr_strategy("[a-z0-9,;!?]", 500)) {
            let (ecl, data) = params;
            check_symbol(&data, ecl)?;
        }

        #[test]
        fn proptest_same_input_same_symbol(data in "[ -~]{1,200}") {
            let first = QRBuilder::new(&data).encode().unwrap();
            let second = QRBuilder::new(&data).encode().unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
