//! Paragraph correction: the pre-pass that fixes paragraph boundary
//! mismatches before sentence alignment runs.
//!
//! Each side is projected to one synthetic unit per paragraph run (length =
//! sum of the contained sentence lengths) and the two projections are aligned
//! in a single whole-document DP run. The backtrace is then translated into
//! paragraph-id rewrites: 1-2, 2-1 and 2-2 paragraph alignments merge the
//! involved runs by renumbering the later run to the earlier run's id, while
//! 1-0 and 0-1 alignments only flag the paragraph for the sentence pass to
//! skip. Renumbering is recorded against an immutable snapshot of the run
//! boundaries and applied after the walk.

use std::collections::BTreeSet;

use log::debug;

use super::cost::CostParams;
use super::{dp, AlignOp};
use crate::store::{Side, StoreError, TextStore, UnitKey};

/// A maximal range of consecutive units sharing one paragraph id.
/// `start..end` indexes into the side's ordered key sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Run {
    pub paragraph: u32,
    pub start: usize,
    pub end: usize,
    pub total_len: usize,
}

pub(super) fn paragraph_runs<S: TextStore>(store: &S, side: Side) -> Result<Vec<Run>, StoreError> {
    let mut runs: Vec<Run> = vec![];
    for (pos, &key) in store.ordered_keys(side).iter().enumerate() {
        let paragraph = store.paragraph_id(side, key)?;
        let length = store.length(side, key)?;
        match runs.last_mut() {
            Some(run) if run.paragraph == paragraph => {
                run.end = pos + 1;
                run.total_len += length;
            }
            _ => runs.push(Run {
                paragraph,
                start: pos,
                end: pos + 1,
                total_len: length,
            }),
        }
    }
    Ok(runs)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct ParagraphCorrection {
    /// Source paragraphs with no counterpart in the translation.
    pub deleted: BTreeSet<u32>,
    /// Destination paragraphs with no counterpart in the source.
    pub inserted: BTreeSet<u32>,
}

pub(super) fn correct_paragraphs<S: TextStore>(
    store: &mut S,
    params: &CostParams,
) -> Result<ParagraphCorrection, StoreError> {
    let mut correction = ParagraphCorrection::default();
    let runs = [
        paragraph_runs(store, Side::Source)?,
        paragraph_runs(store, Side::Dest)?,
    ];
    if runs[0].is_empty() || runs[1].is_empty() {
        return Ok(correction);
    }

    // The projected sequences; the key is the run's index in the snapshot.
    fn project(runs: &[Run]) -> Vec<(usize, usize)> {
        runs.iter().map(|run| run.total_len).enumerate().collect()
    }
    let backtrace = dp::align(params, &project(&runs[0]), &project(&runs[1]));
    debug!(
        "paragraph projection: {} vs {} runs, total cost {}",
        runs[0].len(),
        runs[1].len(),
        backtrace.total_cost()
    );

    // (run index, replacement id) per side, to apply once the walk is done.
    let mut renumber: [Vec<(usize, u32)>; 2] = [vec![], vec![]];
    for step in backtrace {
        match step.op {
            AlignOp::Substitution => {}
            AlignOp::Deletion => {
                correction.deleted.insert(runs[0][step.x1.unwrap()].paragraph);
            }
            AlignOp::Insertion => {
                correction.inserted.insert(runs[1][step.y1.unwrap()].paragraph);
            }
            AlignOp::Contraction => {
                renumber[0].push((step.x2.unwrap(), runs[0][step.x1.unwrap()].paragraph));
            }
            AlignOp::Expansion => {
                renumber[1].push((step.y2.unwrap(), runs[1][step.y1.unwrap()].paragraph));
            }
            AlignOp::Merger => {
                renumber[0].push((step.x2.unwrap(), runs[0][step.x1.unwrap()].paragraph));
                renumber[1].push((step.y2.unwrap(), runs[1][step.y1.unwrap()].paragraph));
            }
        }
    }

    for (side, side_runs, side_renumber) in [
        (Side::Source, &runs[0], &renumber[0]),
        (Side::Dest, &runs[1], &renumber[1]),
    ] {
        for &(run_index, new_id) in side_renumber {
            let run = &side_runs[run_index];
            let keys: Vec<UnitKey> = store.ordered_keys(side)[run.start..run.end].to_vec();
            for key in keys {
                store.set_paragraph_id(side, key, new_id)?;
            }
        }
    }
    Ok(correction)
}
