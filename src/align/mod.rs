//! Statistical alignment of a text and its translation, at paragraph and at
//! sentence granularity.
//!
//! Paragraph correction runs first and rewrites paragraph boundaries so that
//! both sides have matching paragraph runs (whole-paragraph insertions and
//! deletions are flagged, 1-2 / 2-1 / 2-2 paragraph alignments are merged by
//! renumbering). Sentence alignment then walks the corrected runs in
//! lock-step and connects sentences inside each matched paragraph pair.

pub mod cost;
mod dp;
mod paragraphs;
mod sentences;

use std::collections::BTreeSet;

use log::info;

use self::cost::CostParams;
use crate::store::{StoreError, TextStore};

/// One alignment step: how many units it consumes on the source and on the
/// destination side.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AlignOp {
    /// 1-1
    Substitution,
    /// 1-0
    Deletion,
    /// 0-1
    Insertion,
    /// 2-1
    Contraction,
    /// 1-2
    Expansion,
    /// 2-2
    Merger,
}

impl AlignOp {
    /// Candidate order during the table fill. Ties are broken by this order:
    /// the first candidate reaching the minimum wins.
    pub const PRIORITY: [AlignOp; 6] = [
        AlignOp::Substitution,
        AlignOp::Deletion,
        AlignOp::Insertion,
        AlignOp::Contraction,
        AlignOp::Expansion,
        AlignOp::Merger,
    ];

    pub fn movement(&self) -> [usize; 2] {
        match self {
            AlignOp::Substitution => [1, 1],
            AlignOp::Deletion => [1, 0],
            AlignOp::Insertion => [0, 1],
            AlignOp::Contraction => [2, 1],
            AlignOp::Expansion => [1, 2],
            AlignOp::Merger => [2, 2],
        }
    }
}

/// Where a document is in the one-shot alignment sequence. Paragraph
/// correction is unsafe to re-apply once sentence-level edges exist, so both
/// entry points are gated on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotAligned,
    ParagraphsCorrected,
    SentencesAligned,
}

/// Drives both alignment passes over one document.
pub struct Aligner<'a, S: TextStore> {
    store: &'a mut S,
    params: CostParams,
    phase: Phase,
    deleted_paragraphs: BTreeSet<u32>,
    inserted_paragraphs: BTreeSet<u32>,
}

impl<'a, S: TextStore> Aligner<'a, S> {
    pub fn new(store: &'a mut S) -> Aligner<'a, S> {
        Aligner::with_params(store, CostParams::default())
    }

    pub fn with_params(store: &'a mut S, params: CostParams) -> Aligner<'a, S> {
        Aligner {
            store,
            params,
            phase: Phase::NotAligned,
            deleted_paragraphs: BTreeSet::new(),
            inserted_paragraphs: BTreeSet::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Paragraph ids on the source side with no counterpart in the
    /// translation, as determined by paragraph correction.
    pub fn deleted_paragraphs(&self) -> &BTreeSet<u32> {
        &self.deleted_paragraphs
    }

    /// Paragraph ids on the destination side with no counterpart in the
    /// source, as determined by paragraph correction.
    pub fn inserted_paragraphs(&self) -> &BTreeSet<u32> {
        &self.inserted_paragraphs
    }

    /// Aligns whole paragraphs and rewrites paragraph boundaries in the
    /// store. Calling this anywhere but at the start of the sequence is a
    /// no-op returning the current phase; callers that want rejection rather
    /// than silence should check [`Aligner::phase`] first.
    pub fn correct_paragraphs(&mut self) -> Result<Phase, StoreError> {
        if self.phase != Phase::NotAligned {
            return Ok(self.phase);
        }
        let correction = paragraphs::correct_paragraphs(self.store, &self.params)?;
        info!(
            "paragraph correction: {} deleted, {} inserted",
            correction.deleted.len(),
            correction.inserted.len()
        );
        self.deleted_paragraphs = correction.deleted;
        self.inserted_paragraphs = correction.inserted;
        self.phase = Phase::ParagraphsCorrected;
        Ok(self.phase)
    }

    /// Aligns sentences inside all corresponding paragraphs and records the
    /// resulting edges in the store. Paragraphs flagged deleted or inserted
    /// by [`Aligner::correct_paragraphs`] are skipped; trailing paragraphs
    /// left over when one side runs out are ignored. Runs at most once; a
    /// second call is a no-op.
    pub fn align_sentences(&mut self) -> Result<Phase, StoreError> {
        if self.phase == Phase::SentencesAligned {
            return Ok(self.phase);
        }
        let edges = sentences::align_sentences(
            self.store,
            &self.params,
            &self.deleted_paragraphs,
            &self.inserted_paragraphs,
        )?;
        info!("sentence alignment: {edges} edges");
        self.phase = Phase::SentencesAligned;
        Ok(self.phase)
    }
}
