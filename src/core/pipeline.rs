use std::time::Instant;

use super::MinuswordError;
use crate::{
    analysis::{
        apply_toggle,
        build_frequency_table,
        HierarchyBuilder,
        PhraseTree,
        SelectionQuery,
        SelectionState,
        TermEntry,
        ToggleTarget,
    },
    rules::{
        DroppedRule,
        RuleSet,
    },
    segmentation::{
        normalizer::Normalizer,
        tokenizer::split_words,
    },
};

#[derive(Debug, Clone)]
pub struct ExclusionReport {
    /// Ranked normalized tokens with their counts.
    pub entries: Vec<TermEntry>,
    /// Exclusion entries that failed to compile and were ignored.
    pub dropped: Vec<DroppedRule>,
}

impl ExclusionReport {
    pub fn tokens(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.term.clone()).collect()
    }
}

fn ensure_phrases<S: AsRef<str>>(phrases: &[S]) -> Result<(), MinuswordError> {
    if phrases.iter().all(|p| p.as_ref().trim().is_empty()) {
        return Err(MinuswordError::EmptyInput);
    }
    Ok(())
}

pub fn generate_exclusion_report<S: AsRef<str>>(
    phrases: &[S],
    exclusion_spec: &str,
    min_word_length: usize,
    normalizer: &Normalizer,
) -> Result<ExclusionReport, MinuswordError> {
    ensure_phrases(phrases)?;
    let start = Instant::now();

    let rules = RuleSet::from_spec(exclusion_spec, normalizer);
    log::info!("Compiled {} exclusion rules ({} dropped)", rules.len(), rules.dropped().len());

    let table = build_frequency_table(phrases, &rules, min_word_length, normalizer);
    let entries = table.ranked_entries();

    log::info!(
        "Ranked {} tokens from {} phrases ({:.3}s)",
        entries.len(),
        phrases.len(),
        start.elapsed().as_secs_f32()
    );

    Ok(ExclusionReport { entries, dropped: rules.dropped().to_vec() })
}

/// Ranked minus-word candidates for `phrases` after applying `exclusion_spec`.
pub fn generate_exclusion_list<S: AsRef<str>>(
    phrases: &[S],
    exclusion_spec: &str,
    min_word_length: usize,
    normalizer: &Normalizer,
) -> Result<Vec<String>, MinuswordError> {
    Ok(generate_exclusion_report(phrases, exclusion_spec, min_word_length, normalizer)?.tokens())
}

pub fn build_group_tree<S: AsRef<str>>(phrases: &[S]) -> Result<PhraseTree, MinuswordError> {
    ensure_phrases(phrases)?;

    let tree = HierarchyBuilder::build_tree(phrases);
    log::info!("Built {} groups over {} phrases", tree.groups.len(), tree.total_phrases());
    Ok(tree)
}

pub fn toggle_and_query(
    tree: &PhraseTree,
    selection: &mut SelectionState,
    target: ToggleTarget<'_>,
    include: bool,
) -> Result<SelectionQuery, MinuswordError> {
    let changed = apply_toggle(tree, selection, target, include)?;
    log::debug!("Toggle {:?} include={} changed {} phrases", target, include, changed);
    Ok(selection.query(tree))
}

/// Splits phrases into those no rule touches and those at least one rule
/// matches somewhere in the phrase's normalized text.
pub fn partition_phrases<S: AsRef<str>>(
    phrases: &[S],
    rules: &RuleSet,
    normalizer: &Normalizer,
) -> (Vec<String>, Vec<String>) {
    phrases
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .partition(|phrase| {
            let lower = split_words(phrase).collect::<Vec<_>>().join(" ").to_lowercase();
            !rules.excludes_phrase(&lower, &normalize_phrase(phrase, normalizer))
        })
}

pub fn normalize_phrase(phrase: &str, normalizer: &Normalizer) -> String {
    split_words(phrase).map(|word| normalizer.normalize(word, false)).collect::<Vec<_>>().join(" ")
}

pub fn render_minus_words<S: AsRef<str>>(tokens: &[S], marker: &str) -> Vec<String> {
    tokens.iter().map(|token| format!("{}{}", marker, token.as_ref())).collect()
}
