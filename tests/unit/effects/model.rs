use super::*;

#[test]
fn json_uses_type_field_and_defaults() {
    let def: EffectDef =
        serde_json::from_str(r#"{"type": "surge", "target": "nl"}"#).unwrap();
    assert_eq!(def.kind, "surge");
    assert_eq!(def.duration_secs, 1.5);
    assert_eq!(def.delay_secs, 0.0);
    assert!(def.params.is_null());

    let def: EffectDef = serde_json::from_str(r#"{"kind": "loading"}"#).unwrap();
    assert_eq!(def.kind, "loading");
}

#[test]
fn parses_every_known_kind() {
    let cases = [
        ("confetti", serde_json::json!({"particles": 10})),
        ("Surge", serde_json::Value::Null),
        ("arrow", serde_json::json!({"direction": "down"})),
        ("change", serde_json::json!({"delta": -2.5})),
        ("focus", serde_json::json!({})),
        ("lottie", serde_json::json!({"asset": "star.json", "loop": true, "frames": 24})),
        ("loading", serde_json::json!({"rpm": 30})),
    ];
    for (kind, params) in cases {
        let def = EffectDef::new(kind).params(params);
        let parsed = parse_effect(&def).unwrap();
        assert_eq!(parsed.name(), kind.to_ascii_lowercase());
    }
    let arrow = parse_effect(&EffectDef::new("arrow").params(serde_json::json!({"direction": "down"})));
    assert!(matches!(
        arrow.unwrap(),
        EffectKind::Arrow {
            direction: ArrowDirection::Down,
            ..
        }
    ));
}

#[test]
fn rejects_unknown_kinds_and_bad_params() {
    assert!(parse_effect(&EffectDef::new("sparkles")).is_err());
    assert!(parse_effect(&EffectDef::new("  ")).is_err());
    assert!(parse_effect(&EffectDef::new("lottie")).is_err());
    assert!(
        parse_effect(&EffectDef::new("surge").params(serde_json::json!({"peak_scale": "big"})))
            .is_err()
    );
    assert!(parse_effect(&EffectDef::new("surge").params(serde_json::json!([1, 2]))).is_err());
}

#[test]
fn signature_tracks_content_and_position() {
    let a = EffectDef::new("arrow")
        .target("nl")
        .params(serde_json::json!({"direction": "up", "amplitude_px": 4}));
    let same = EffectDef::new("arrow")
        .target("nl")
        .params(serde_json::json!({"amplitude_px": 4, "direction": "up"}));
    assert_eq!(a.signature(0), same.signature(0));
    assert_ne!(a.signature(0), a.signature(1));
    assert_ne!(a.signature(0), a.clone().target("de").signature(0));
}

#[test]
fn lifetimes() {
    let loading = EffectKind::Loading { rpm: 60.0 };
    assert_eq!(loading.lifetime_secs(0.0), None);
    assert_eq!(loading.lifetime_secs(2.0), Some(2.0));
    let change = EffectKind::Change { delta: 1.0 };
    assert_eq!(change.lifetime_secs(-1.0), Some(0.0));
}
