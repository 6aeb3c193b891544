use std::{
    cmp::Reverse,
    collections::HashMap,
};

use super::models::TermEntry;
use crate::{
    rules::RuleSet,
    segmentation::{
        normalizer::Normalizer,
        tokenizer::{
            char_len,
            extract_tokens,
        },
    },
};

/// Normalized token -> number of occurrences across the request's phrases.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, u32>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: String) {
        *self.counts.entry(token).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, token: &str) -> u32 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Every counted occurrence.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Highest frequency first; equal frequencies in ascending token order.
    pub fn ranked_entries(&self) -> Vec<TermEntry> {
        let mut entries: Vec<TermEntry> = self
            .counts
            .iter()
            .map(|(term, &frequency)| TermEntry { term: term.clone(), frequency })
            .collect();

        entries.sort_by(|a, b| {
            Reverse(a.frequency).cmp(&Reverse(b.frequency)).then_with(|| a.term.cmp(&b.term))
        });
        entries
    }

    pub fn ranked(&self) -> Vec<String> {
        self.ranked_entries().into_iter().map(|entry| entry.term).collect()
    }
}

pub fn build_frequency_table<S: AsRef<str>>(
    phrases: &[S],
    rules: &RuleSet,
    min_length: usize,
    normalizer: &Normalizer,
) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    let mut too_short = 0usize;
    let mut excluded = 0usize;

    for phrase in phrases {
        for token in extract_tokens(phrase.as_ref(), normalizer) {
            let lower = token.raw.to_lowercase();
            if char_len(&lower) < min_length {
                too_short += 1;
                continue;
            }

            // The reducer may shorten a word below the limit.
            if char_len(&token.normalized) < min_length {
                too_short += 1;
                continue;
            }

            if rules.should_exclude_token(&lower, &token.normalized) {
                excluded += 1;
                continue;
            }

            table.add(token.normalized);
        }
    }

    log::debug!(
        "Counted {} tokens ({} distinct), skipped {} short and {} excluded",
        table.total(),
        table.len(),
        too_short,
        excluded
    );

    table
}

/// Surviving normalized tokens, most frequent first, ties alphabetical.
pub fn rank_tokens<S: AsRef<str>>(
    phrases: &[S],
    rules: &RuleSet,
    min_length: usize,
    normalizer: &Normalizer,
) -> Vec<String> {
    build_frequency_table(phrases, rules, min_length, normalizer).ranked()
}
