use super::*;

fn ids<'a>(v: &[&'a Datum]) -> Vec<&'a str> {
    v.iter().map(|d| d.id.as_str()).collect()
}

#[test]
fn hex_colors_parse_and_print() {
    assert_eq!(Color::from_hex("#FF8000").unwrap(), Color::rgb(255, 128, 0));
    assert_eq!(Color::from_hex("11223344").unwrap().a, 0x44);
    assert!(Color::from_hex("#12345").is_err());
    assert_eq!(Color::rgb(1, 2, 255).to_hex(), "#0102ff");

    let c: Color = serde_json::from_str("\"#0a0b0c\"").unwrap();
    assert_eq!(c, Color::rgb(10, 11, 12));
    let c: Color = serde_json::from_str("[1, 2, 3, 4]").unwrap();
    assert_eq!(c.a, 4);
    assert_eq!(serde_json::to_string(&Color::rgb(0, 0, 0)).unwrap(), "\"#000000\"");
}

#[test]
fn datum_defaults_name_and_color_from_id() {
    let d: Datum = serde_json::from_str(r#"{"id": "nl", "value": 3}"#).unwrap();
    assert_eq!(d.display_name(), "nl");
    assert_eq!(d.display_color(), Color::for_id("nl"));
}

#[test]
fn ranking_is_descending_and_stable_on_ties() {
    let prev = [Datum::new("b", 9.0), Datum::new("a", 8.0)];
    let prev_ranked = rank_items(&prev, None);
    let lookup = rank_lookup(&prev_ranked);

    let data = [
        Datum::new("a", 5.0),
        Datum::new("c", 7.0),
        Datum::new("b", 5.0),
        Datum::new("z", f64::NAN),
    ];
    // b was ahead of a before, so it stays ahead on a tie
    assert_eq!(ids(&rank_items(&data, Some(&lookup))), ["c", "b", "a", "z"]);
    // without history ties keep input order
    assert_eq!(ids(&rank_items(&data, None)), ["c", "a", "b", "z"]);
}

#[test]
fn windows_take_head_or_tail() {
    let data: Vec<Datum> = (0..5).map(|i| Datum::new(format!("d{i}"), i as f64)).collect();
    let ranked = rank_items(&data, None);

    let (start, w) = rank_window(&ranked, 2, RankDirection::Forward);
    assert_eq!((start, ids(w)), (0, vec!["d4", "d3"]));

    let (start, w) = rank_window(&ranked, 2, RankDirection::Reverse);
    assert_eq!((start, ids(w)), (3, vec!["d1", "d0"]));

    let (start, w) = rank_window(&ranked, 10, RankDirection::Reverse);
    assert_eq!((start, w.len()), (0, 5));
}
