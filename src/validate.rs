//! Sanity checks on an aligned document. These verify invariants the engine
//! is supposed to maintain; a non-empty result is a bug report, not a user
//! error.

use std::collections::BTreeSet;

use crate::store::{Document, Side, TextStore};

pub fn validate(doc: &Document) -> Vec<String> {
    let mut errors = vec![];

    // Every edge crosses sides and is recorded on both endpoints.
    for side in [Side::Source, Side::Dest] {
        for &key in doc.ordered_keys(side) {
            for &other in doc.edges(key).unwrap() {
                match doc.side(other) {
                    None => errors.push(format!(
                        "unit {} has an edge to nonexistent unit {}",
                        key.raw(),
                        other.raw()
                    )),
                    Some(other_side) if other_side == side => errors.push(format!(
                        "units {} and {} are connected but both are on side {side:?}",
                        key.raw(),
                        other.raw()
                    )),
                    Some(_) => {
                        if !doc.edges(other).is_some_and(|edges| edges.contains(&key)) {
                            errors.push(format!(
                                "edge {}-{} is recorded on one endpoint only",
                                key.raw(),
                                other.raw()
                            ));
                        }
                    }
                }
            }
        }
    }

    // Paragraph ids must form contiguous runs in key order.
    for side in [Side::Source, Side::Dest] {
        let mut seen = BTreeSet::new();
        let mut last = None;
        for &key in doc.ordered_keys(side) {
            let id = doc.paragraph_id(side, key).unwrap();
            if last != Some(id) {
                if !seen.insert(id) {
                    errors.push(format!(
                        "paragraph {id} on side {side:?} is split into non-contiguous runs"
                    ));
                }
                last = Some(id);
            }
        }
    }

    errors
}

pub fn print_errors(errors: &[String]) {
    for error in errors {
        eprintln!("validation: {error}");
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::align::Aligner;
    use crate::store::Document;

    #[test]
    fn aligned_document_passes() {
        let mut doc = Document::new();
        doc.push_source("a".repeat(50), 0);
        doc.push_source("b".repeat(80), 1);
        doc.push_dest("c".repeat(50), 0);
        doc.push_dest("d".repeat(80), 1);
        let mut aligner = Aligner::new(&mut doc);
        aligner.correct_paragraphs().unwrap();
        aligner.align_sentences().unwrap();
        assert_eq!(validate(&doc), Vec::<String>::new());
    }

    #[test]
    fn interleaved_paragraph_ids_are_reported() {
        let mut doc = Document::new();
        doc.push_source("a", 0);
        doc.push_source("b", 1);
        doc.push_source("c", 0);
        let errors = validate(&doc);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("non-contiguous"));
    }
}
