use super::*;

#[test]
fn formats_with_suffix_tiers() {
    let f = CompactFormat::default();
    assert_eq!(f.format(1.5e9), "$1.50B");
    assert_eq!(f.format(950.0), "$950.00");
    assert_eq!(f.format(12_346.0), "$12.35K");
    assert_eq!(f.format(2.5e12), "$2.50T");
    assert_eq!(f.format(-12_000.0), "-$12.00K");
    assert_eq!(f.format(0.0), "$0.00");
    assert_eq!(f.format(f64::NAN), "$0.00");
}

#[test]
fn rounding_promotes_to_next_tier() {
    let f = CompactFormat::default();
    assert_eq!(f.format(999_999.0), "$1.00M");
    assert_eq!(f.format(999.999), "$1.00K");
    // no tier above T
    assert_eq!(f.format(5e15), "$5000.00T");
}

#[test]
fn parse_inverts_format() {
    let f = CompactFormat::default();
    assert_eq!(f.parse("$1.50B"), Some(1.5e9));
    assert_eq!(f.parse("-$12.00K"), Some(-12_000.0));
    assert_eq!(f.parse("$950.00"), Some(950.0));
    assert_eq!(f.parse("$3m"), Some(3e6));
    assert_eq!(f.parse("1.50B"), None);
    assert_eq!(f.parse("$1.5X"), None);
    assert_eq!(f.parse("$"), None);

    for v in [0.0, 7.0, 1234.5, 98_765.0, 4.2e7, -3.3e9, 1.25e12] {
        let text = f.format(v);
        let back = f.parse(&text).unwrap();
        assert_eq!(f.format(back), text, "{v}");
    }
}

#[test]
fn tick_labels_drop_trailing_zeros() {
    let f = CompactFormat::default();
    assert_eq!(f.format_tick(1.5e9), "$1.5B");
    assert_eq!(f.format_tick(2000.0), "$2K");
    assert_eq!(f.format_tick(0.0), "$0");
    assert_eq!(f.parse(&f.format_tick(2.25e6)), Some(2.25e6));

    let plain = CompactFormat::new("", 0);
    assert_eq!(plain.format(42.0), "42");
    assert_eq!(plain.format_tick(42.0), "42");
}

#[test]
fn precision_is_clamped() {
    for decimals in [2, 6, 15, 20, 30, 40] {
        let f = CompactFormat::new("$", decimals);
        assert!(f.decimals <= MAX_DECIMALS);
        for v in [0.5, 1234.5678, 9.87e11] {
            let text = f.format(v);
            let fraction = text.split_once('.').map_or(0, |(_, rest)| {
                rest.bytes().take_while(u8::is_ascii_digit).count()
            });
            assert_eq!(fraction as u32, decimals.min(MAX_DECIMALS), "{text}");
            let back = f.parse(&text).unwrap_or_else(|| panic!("{text} did not parse"));
            assert_eq!(f.format(back), text);
        }
    }

    // deserialized formatters bypass `new` and are clamped at use
    let wide = CompactFormat {
        prefix: String::new(),
        decimals: 40,
    };
    assert_eq!(wide.format(1.0), format!("1.{}", "0".repeat(15)));
}

#[test]
fn ordinals() {
    let got: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 101, 111].map(ordinal).to_vec();
    assert_eq!(
        got,
        ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "101st", "111th"]
    );
}
