use super::*;

#[test]
fn duration_source_accepts_all_json_shapes() {
    let v: Vec<DurationSource> =
        serde_json::from_str(r#"[2.5, {"secs": 3}, {"asset": "a/b.mp3"}]"#).unwrap();
    assert_eq!(v[0].literal_secs(), Some(2.5));
    assert_eq!(v[1].literal_secs(), Some(3.0));
    assert_eq!(
        v[2],
        DurationSource::Asset {
            asset: PathBuf::from("a/b.mp3")
        }
    );
}

#[test]
fn resolves_assets_and_literals_in_order() {
    let resolver = StaticDurations::new().with("one.mp3", 4.0);
    let sources = vec![
        DurationSource::from(1.0),
        DurationSource::Asset {
            asset: "one.mp3".into(),
        },
        DurationSource::Bare(2.0),
    ];
    let out = resolve_event_durations(&sources, &resolver, 3.0);
    assert_eq!(out.secs, vec![1.0, 4.0, 2.0]);
    assert!(out.diagnostics.is_empty());
}

#[test]
fn failures_fall_back_and_are_reported() {
    let resolver = StaticDurations::new().with("zero.mp3", 0.0);
    let sources = vec![
        DurationSource::Asset {
            asset: "missing.mp3".into(),
        },
        DurationSource::Asset {
            asset: "zero.mp3".into(),
        },
        DurationSource::Bare(f64::NAN),
        DurationSource::Bare(1.5),
    ];
    let out = resolve_event_durations(&sources, &resolver, 3.0);
    assert_eq!(out.secs, vec![3.0, 3.0, 3.0, 1.5]);
    assert_eq!(out.diagnostics.len(), 3);
    assert!(
        out.diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::DurationFallback)
    );
    assert!(out.diagnostics[0].message.contains("missing.mp3"));
}

#[cfg(not(feature = "media-ffmpeg"))]
#[test]
fn ffprobe_resolver_without_feature_falls_back() {
    let resolver = FfprobeDurationResolver::new(".").with_timeout(Duration::from_millis(50));
    let out = resolve_event_durations(
        &[DurationSource::Asset {
            asset: "voice.mp3".into(),
        }],
        &resolver,
        3.0,
    );
    assert_eq!(out.secs, vec![3.0]);
    assert_eq!(out.diagnostics.len(), 1);
}
