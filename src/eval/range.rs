use crate::{
    eval::evaluator::{Evaluator, FrameState, PreparedComposition},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{FramecueError, FramecueResult},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// How a frame range is split across worker threads.
pub struct EvalThreading {
    /// Evaluate chunks on a rayon pool.
    pub parallel: bool,
    /// Frames per chunk. `0` is treated as `1`.
    pub chunk_size: usize,
    /// Worker count. `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for EvalThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Evaluate every frame of `range`, in order.
pub fn eval_range(
    prepared: &PreparedComposition,
    range: FrameRange,
    threading: &EvalThreading,
) -> FramecueResult<Vec<FrameState>> {
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    eval_range_with(prepared, range, threading, |state| {
        out.push(state);
        Ok(())
    })?;
    Ok(out)
}

/// Evaluate every frame of `range` and hand each state to `sink` in frame order.
///
/// With `threading.parallel` the range is evaluated chunk by chunk on a dedicated pool; output
/// order and content are identical to sequential evaluation.
#[tracing::instrument(skip(prepared, sink))]
pub fn eval_range_with(
    prepared: &PreparedComposition,
    range: FrameRange,
    threading: &EvalThreading,
    mut sink: impl FnMut(FrameState) -> FramecueResult<()>,
) -> FramecueResult<()> {
    if range.is_empty() {
        return Err(FramecueError::validation("eval range must be non-empty"));
    }

    if !threading.parallel {
        for f in range.start.0..range.end.0 {
            sink(Evaluator::eval_frame(prepared, FrameIndex(f)))?;
        }
        return Ok(());
    }

    let pool = build_thread_pool(threading.threads)?;
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = chunk_start.saturating_add(chunk_size).min(range.end.0);
        let frames: Vec<u64> = (chunk_start..chunk_end).collect();
        let states: Vec<FrameState> = pool.install(|| {
            use rayon::prelude::*;
            frames
                .par_iter()
                .map(|&f| Evaluator::eval_frame(prepared, FrameIndex(f)))
                .collect()
        });
        tracing::trace!(chunk_start, chunk_end, "chunk evaluated");
        for state in states {
            sink(state)?;
        }
        chunk_start = chunk_end;
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> FramecueResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FramecueError::validation(
            "eval threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FramecueError::evaluation(format!("failed to build thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 { 1 } else { chunk_size as u64 }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/range.rs"]
mod tests;
