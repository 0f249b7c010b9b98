//! Sentence alignment inside corrected paragraph blocks.
//!
//! Both sides' paragraph runs are walked in lock-step; runs flagged deleted
//! (source) or inserted (destination) by paragraph correction are skipped.
//! Each matched pair of runs gets its own DP table, and the backtrace is
//! translated into edges. When either side runs out of paragraphs the walk
//! stops; trailing paragraphs on the longer side stay unaligned.

use std::collections::BTreeSet;

use log::debug;

use super::cost::CostParams;
use super::paragraphs::{paragraph_runs, Run};
use super::{dp, AlignOp};
use crate::store::{Side, StoreError, TextStore, UnitKey};

fn block_units<S: TextStore>(
    store: &S,
    side: Side,
    run: &Run,
) -> Result<Vec<(UnitKey, usize)>, StoreError> {
    store.ordered_keys(side)[run.start..run.end]
        .iter()
        .map(|&key| Ok((key, store.length(side, key)?)))
        .collect()
}

/// Returns the number of edge creations requested.
pub(super) fn align_sentences<S: TextStore>(
    store: &mut S,
    params: &CostParams,
    deleted: &BTreeSet<u32>,
    inserted: &BTreeSet<u32>,
) -> Result<usize, StoreError> {
    let runs = [
        paragraph_runs(store, Side::Source)?,
        paragraph_runs(store, Side::Dest)?,
    ];
    let mut edges = 0;
    let (mut r1, mut r2) = (0, 0);
    loop {
        while r1 < runs[0].len() && deleted.contains(&runs[0][r1].paragraph) {
            r1 += 1;
        }
        while r2 < runs[1].len() && inserted.contains(&runs[1][r2].paragraph) {
            r2 += 1;
        }
        if r1 == runs[0].len() || r2 == runs[1].len() {
            break;
        }
        let a = block_units(store, Side::Source, &runs[0][r1])?;
        let b = block_units(store, Side::Dest, &runs[1][r2])?;
        let backtrace = dp::align(params, &a, &b);
        debug!(
            "block {}/{}: {} vs {} sentences, cost {}",
            runs[0][r1].paragraph,
            runs[1][r2].paragraph,
            a.len(),
            b.len(),
            backtrace.total_cost()
        );
        for step in backtrace {
            let pairs: Vec<(Option<UnitKey>, Option<UnitKey>)> = match step.op {
                AlignOp::Deletion | AlignOp::Insertion => vec![],
                AlignOp::Substitution => vec![(step.x1, step.y1)],
                AlignOp::Expansion => vec![(step.x1, step.y1), (step.x1, step.y2)],
                AlignOp::Contraction => vec![(step.x1, step.y1), (step.x2, step.y1)],
                AlignOp::Merger => vec![
                    (step.x1, step.y1),
                    (step.x1, step.y2),
                    (step.x2, step.y1),
                    (step.x2, step.y2),
                ],
            };
            for (x, y) in pairs {
                store.add_edge(x.unwrap(), y.unwrap())?;
                edges += 1;
            }
        }
        r1 += 1;
        r2 += 1;
    }
    Ok(edges)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::Document;

    fn edge_indices(doc: &Document) -> Vec<(usize, usize)> {
        // Edges as (position in source order, position in dest order).
        let position = |side: Side, key: UnitKey| {
            doc.ordered_keys(side).iter().position(|&k| k == key).unwrap()
        };
        doc.edge_pairs()
            .into_iter()
            .map(|(x, y)| (position(Side::Source, x), position(Side::Dest, y)))
            .collect()
    }

    #[test]
    fn one_to_one_paragraph_connects_sentences_pairwise() {
        let mut doc = Document::new();
        doc.push_source("a".repeat(40), 0);
        doc.push_source("b".repeat(70), 0);
        doc.push_dest("c".repeat(42), 0);
        doc.push_dest("d".repeat(68), 0);
        let edges =
            align_sentences(&mut doc, &CostParams::default(), &BTreeSet::new(), &BTreeSet::new())
                .unwrap();
        assert_eq!(edges, 2);
        assert_eq!(edge_indices(&doc), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn split_sentence_gets_both_edges() {
        let mut doc = Document::new();
        doc.push_source("a".repeat(100), 0);
        doc.push_dest("b".repeat(48), 0);
        doc.push_dest("c".repeat(52), 0);
        align_sentences(&mut doc, &CostParams::default(), &BTreeSet::new(), &BTreeSet::new())
            .unwrap();
        assert_eq!(edge_indices(&doc), vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn inserted_paragraph_is_skipped_and_the_rest_pair_in_order() {
        let mut doc = Document::new();
        doc.push_source("a".repeat(50), 1);
        doc.push_source("b".repeat(60), 3);
        doc.push_dest("c".repeat(50), 1);
        doc.push_dest("x".repeat(500), 2);
        doc.push_dest("d".repeat(60), 3);
        let inserted = BTreeSet::from([2]);
        align_sentences(&mut doc, &CostParams::default(), &BTreeSet::new(), &inserted).unwrap();
        assert_eq!(edge_indices(&doc), vec![(0, 0), (1, 2)]);
    }

    #[test]
    fn deleted_paragraph_is_skipped() {
        let mut doc = Document::new();
        doc.push_source("a".repeat(50), 1);
        doc.push_source("x".repeat(500), 2);
        doc.push_source("b".repeat(60), 3);
        doc.push_dest("c".repeat(50), 1);
        doc.push_dest("d".repeat(60), 3);
        let deleted = BTreeSet::from([2]);
        align_sentences(&mut doc, &CostParams::default(), &deleted, &BTreeSet::new()).unwrap();
        assert_eq!(edge_indices(&doc), vec![(0, 0), (2, 1)]);
    }

    #[test]
    fn trailing_paragraphs_on_the_longer_side_are_dropped() {
        let mut doc = Document::new();
        doc.push_source("a".repeat(50), 0);
        doc.push_dest("b".repeat(50), 0);
        doc.push_dest("c".repeat(50), 1);
        doc.push_dest("d".repeat(50), 2);
        align_sentences(&mut doc, &CostParams::default(), &BTreeSet::new(), &BTreeSet::new())
            .unwrap();
        assert_eq!(edge_indices(&doc), vec![(0, 0)]);
    }

    #[test]
    fn empty_document_aligns_to_nothing() {
        let mut doc = Document::new();
        let edges =
            align_sentences(&mut doc, &CostParams::default(), &BTreeSet::new(), &BTreeSet::new())
                .unwrap();
        assert_eq!(edges, 0);
    }
}
