//! The dynamic programming core shared by paragraph and sentence alignment.
//!
//! Fills a cost table between two finite sequences of `(key, length)` pairs
//! and yields the minimum-cost backtrace. Cells live in a flat arena indexed
//! by `(i, j)`; the predecessor link is an arena index, which always points
//! at a strictly smaller combined index, so the chain cannot cycle.

use super::cost::{cost, CostParams};
use super::AlignOp;

/// One operation of a finished backtrace, carrying the keys it consumed.
/// Second keys are present only for the two-unit ops (2-1, 1-2, 2-2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Step<K> {
    pub op: AlignOp,
    pub x1: Option<K>,
    pub x2: Option<K>,
    pub y1: Option<K>,
    pub y2: Option<K>,
    /// Accumulated cost at the cell this step leads into.
    pub cost: i64,
}

struct Cell<K> {
    cost: i64,
    from: Option<(Step<K>, usize)>,
}

fn consumed<K: Copy>(seq: &[(K, usize)], end: usize, count: usize) -> [Option<K>; 2] {
    match count {
        1 => [Some(seq[end - 1].0), None],
        2 => [Some(seq[end - 2].0), Some(seq[end - 1].0)],
        _ => [None, None],
    }
}

/// Fills the table and returns the backtrace from the bottom-right cell.
/// O(m*n) time and space; the table is discarded with the returned iterator.
pub(super) fn align<K: Copy>(params: &CostParams, a: &[(K, usize)], b: &[(K, usize)]) -> Backtrace<K> {
    let (m, n) = (a.len(), b.len());
    let width = n + 1;
    let mut cells: Vec<Cell<K>> = Vec::with_capacity((m + 1) * width);

    for i in 0..=m {
        for j in 0..=n {
            let mut best: Option<(Step<K>, usize)> = None;
            for op in AlignOp::PRIORITY {
                let [di, dj] = op.movement();
                if i < di || j < dj {
                    continue;
                }
                let len1: usize = a[i - di..i].iter().map(|&(_, len)| len).sum();
                let len2: usize = b[j - dj..j].iter().map(|&(_, len)| len).sum();
                let predecessor = (i - di) * width + (j - dj);
                let total = cells[predecessor].cost + cost(params, len1, len2, op) as i64;
                // Strict comparison: the first candidate at the minimum wins,
                // in PRIORITY order.
                if best.as_ref().map_or(true, |(step, _)| total < step.cost) {
                    let [x1, x2] = consumed(a, i, di);
                    let [y1, y2] = consumed(b, j, dj);
                    best = Some((Step { op, x1, x2, y1, y2, cost: total }, predecessor));
                }
            }
            cells.push(match best {
                Some((step, predecessor)) => Cell {
                    cost: step.cost,
                    from: Some((step, predecessor)),
                },
                // Only (0, 0) has no valid transition into it.
                None => Cell { cost: 0, from: None },
            });
        }
    }

    let last = cells.len() - 1;
    Backtrace { cells, current: last }
}

/// Walks predecessor links from the final cell to the origin, yielding the
/// operations last-to-first.
pub(super) struct Backtrace<K> {
    cells: Vec<Cell<K>>,
    current: usize,
}

impl<K: Copy> Backtrace<K> {
    pub fn total_cost(&self) -> i64 {
        self.cells.last().map_or(0, |cell| cell.cost)
    }
}

impl<K: Copy> Iterator for Backtrace<K> {
    type Item = Step<K>;

    fn next(&mut self) -> Option<Step<K>> {
        let (step, predecessor) = self.cells[self.current].from?;
        self.current = predecessor;
        Some(step)
    }
}
