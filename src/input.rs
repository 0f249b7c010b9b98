//! Plain-text loading and segmentation into a [`Document`].
//!
//! Paragraphs are separated by blank lines; sentences end at `.`, `!` or `?`
//! followed by whitespace (the terminator stays with the sentence). This is
//! deliberately not a linguistic segmenter; the alignment engine only needs
//! consistent units on both sides.

use std::path::Path;

use anyhow::{Context, Result};

use crate::store::Document;

pub fn read_document(source_path: &Path, dest_path: &Path) -> Result<Document> {
    let source = std::fs::read_to_string(source_path)
        .with_context(|| format!("failed to read {}", source_path.display()))?;
    let dest = std::fs::read_to_string(dest_path)
        .with_context(|| format!("failed to read {}", dest_path.display()))?;
    Ok(segment_into_document(&source, &dest))
}

pub fn segment_into_document(source: &str, dest: &str) -> Document {
    let mut doc = Document::new();
    for (paragraph, text) in split_paragraphs(source).iter().enumerate() {
        for sentence in split_sentences(text) {
            doc.push_source(sentence, paragraph as u32);
        }
    }
    for (paragraph, text) in split_paragraphs(dest).iter().enumerate() {
        for sentence in split_sentences(text) {
            doc.push_dest(sentence, paragraph as u32);
        }
    }
    doc
}

fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = vec![];
    let mut current: Vec<&str> = vec![];
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs
}

fn split_sentences(paragraph: &str) -> Vec<String> {
    let mut sentences = vec![];
    let mut current = String::new();
    let mut chars = paragraph.chars().peekable();
    while let Some(ch) = chars.next() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let at_boundary = chars.peek().map_or(true, |next| next.is_whitespace());
            if at_boundary {
                let sentence = current.trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                current.clear();
            }
        }
    }
    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}
