use super::*;

fn base() -> CompositionBuilder {
    CompositionBuilder::new(
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 640,
            height: 360,
        },
    )
}

#[test]
fn builders_create_expected_structure() {
    let comp = base()
        .seed(7)
        .event(EventBuilder::new("w1", 2.0).datum("a", 5.0).datum("b", 3.0).build())
        .unwrap()
        .event(
            EventBuilder::from_asset("w2", "voice/02.mp3")
                .datum("a", 6.0)
                .effect(EffectDef::new("surge").target("a"))
                .easing("sineInOut")
                .build(),
        )
        .unwrap()
        .board(BoardTiming {
            transition_frames: 10,
            ..BoardTiming::default()
        })
        .build()
        .unwrap();

    assert_eq!(comp.seed, 7);
    assert_eq!(comp.events.len(), 2);
    assert_eq!(comp.events[0].duration.literal_secs(), Some(2.0));
    assert_eq!(comp.events[1].effects.len(), 1);
    assert_eq!(comp.board.map(|b| b.transition_frames), Some(10));
}

#[test]
fn duplicate_keys_are_rejected_early() {
    let err = base()
        .event(EventBuilder::new("w1", 1.0).build())
        .unwrap()
        .event(EventBuilder::new("w1", 1.0).build());
    assert!(err.is_err());
}

#[test]
fn build_validates_config() {
    let res = base()
        .config(RenderConfig {
            fallback_duration_secs: 0.0,
            ..RenderConfig::default()
        })
        .build();
    assert!(matches!(res, Err(FramecueError::Validation(_))));
}
