use super::*;
use crate::{
    composition::builder::{CompositionBuilder, EventBuilder},
    effects::model::EffectDef,
    foundation::core::{Canvas, Fps},
    timing::resolve::StaticDurations,
};

fn prepared() -> PreparedComposition {
    let comp = CompositionBuilder::new(
        Fps::new(30, 1).unwrap(),
        Canvas {
            width: 640,
            height: 360,
        },
    )
    .event(EventBuilder::new("a", 1.0).datum("x", 1.0).datum("y", 2.0).build())
    .unwrap()
    .event(
        EventBuilder::new("b", 1.0)
            .datum("x", 3.0)
            .datum("y", 2.5)
            .effect(EffectDef::new("confetti").target("x"))
            .build(),
    )
    .unwrap()
    .build()
    .unwrap();
    PreparedComposition::prepare(comp, &StaticDurations::new()).unwrap()
}

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap()
}

#[test]
fn sequential_range_is_ordered() {
    let p = prepared();
    let states = eval_range(&p, range(0, 60), &EvalThreading::default()).unwrap();
    assert_eq!(states.len(), 60);
    assert!(states.iter().enumerate().all(|(i, s)| s.frame.0 == i as u64));
}

#[test]
fn parallel_matches_sequential() {
    let p = prepared();
    let seq = eval_range(&p, range(0, 60), &EvalThreading::default()).unwrap();
    let par = eval_range(
        &p,
        range(0, 60),
        &EvalThreading {
            parallel: true,
            chunk_size: 7,
            threads: Some(3),
        },
    )
    .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn zero_chunk_size_is_normalized() {
    let p = prepared();
    let states = eval_range(
        &p,
        range(10, 14),
        &EvalThreading {
            parallel: true,
            chunk_size: 0,
            threads: Some(1),
        },
    )
    .unwrap();
    assert_eq!(states.len(), 4);
    assert_eq!(states[0].frame, FrameIndex(10));
}

#[test]
fn zero_threads_is_rejected() {
    let p = prepared();
    let threading = EvalThreading {
        parallel: true,
        chunk_size: 8,
        threads: Some(0),
    };
    assert!(eval_range(&p, range(0, 4), &threading).is_err());
}

#[test]
fn empty_range_is_rejected() {
    let p = prepared();
    let empty = FrameRange {
        start: FrameIndex(5),
        end: FrameIndex(5),
    };
    assert!(eval_range(&p, empty, &EvalThreading::default()).is_err());
}

#[test]
fn sink_errors_stop_evaluation() {
    let p = prepared();
    let mut seen = 0;
    let res = eval_range_with(&p, range(0, 30), &EvalThreading::default(), |_| {
        seen += 1;
        if seen == 3 {
            Err(FramecueError::evaluation("sink full"))
        } else {
            Ok(())
        }
    });
    assert!(res.is_err());
    assert_eq!(seen, 3);
}
