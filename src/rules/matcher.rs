use regex::{
    Regex,
    RegexBuilder,
};

use super::parser::{
    parse_exclusion_spec,
    PatternSpec,
    RuleKind,
};
use crate::{
    core::MinuswordError,
    segmentation::normalizer::Normalizer,
};

/// A compiled exclusion rule. Immutable once built.
#[derive(Debug, Clone)]
pub struct ExclusionRule {
    entry: String,
    kind: RuleKind,
    exact_form: bool,
    search: Regex,
    full: Option<Regex>,
}

impl ExclusionRule {
    pub fn compile(spec: &PatternSpec) -> Result<Self, MinuswordError> {
        let search = build_case_insensitive(&spec.pattern)
            .map_err(|e| MinuswordError::invalid_pattern(&spec.entry, e))?;

        let full = match spec.kind {
            RuleKind::Exact | RuleKind::Phrase => Some(
                build_case_insensitive(&format!("^(?:{})$", spec.pattern))
                    .map_err(|e| MinuswordError::invalid_pattern(&spec.entry, e))?,
            ),
            RuleKind::Wildcard | RuleKind::Regex => None,
        };

        Ok(Self {
            entry: spec.entry.clone(),
            kind: spec.kind,
            exact_form: spec.exact_form,
            search,
            full,
        })
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn pattern(&self) -> &str {
        self.search.as_str()
    }

    /// Written with `!`: the pattern holds unreduced words.
    pub fn is_exact_form(&self) -> bool {
        self.exact_form
    }

    /// Token-level test. Exact and phrase rules must cover the whole token;
    /// wildcard and regex rules match anywhere inside it.
    pub fn matches(&self, token: &str) -> bool {
        match &self.full {
            Some(full) => full.is_match(token),
            None => self.search.is_match(token),
        }
    }

    /// Text-level test: the rule matches anywhere inside `text`.
    pub fn occurs_in(&self, text: &str) -> bool {
        self.search.is_match(text)
    }

    /// Token test against both forms of a word. Exact-form rules also see the
    /// lower-cased surface form, since the reducer never ran on their words.
    pub fn matches_token(&self, lower: &str, normalized: &str) -> bool {
        self.matches(normalized) || (self.exact_form && self.matches(lower))
    }

    pub fn occurs_in_phrase(&self, lower_text: &str, normalized_text: &str) -> bool {
        self.occurs_in(normalized_text) || (self.exact_form && self.occurs_in(lower_text))
    }
}

fn build_case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// An entry that could not be compiled and was left out of the rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRule {
    pub entry: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ExclusionRule>,
    dropped: Vec<DroppedRule>,
}

impl RuleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses and compiles `text`. Entries that fail to compile are skipped
    /// and reported through [`RuleSet::dropped`].
    pub fn from_spec(text: &str, normalizer: &Normalizer) -> Self {
        Self::compile(&parse_exclusion_spec(text, normalizer))
    }

    pub fn compile(specs: &[PatternSpec]) -> Self {
        let mut rules = Vec::with_capacity(specs.len());
        let mut dropped = Vec::new();

        for spec in specs {
            match ExclusionRule::compile(spec) {
                Ok(rule) => rules.push(rule),
                Err(e) => {
                    log::warn!("Dropping exclusion entry: {}", e);
                    dropped.push(DroppedRule { entry: spec.entry.clone(), reason: e.to_string() });
                }
            }
        }

        Self { rules, dropped }
    }

    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    pub fn dropped(&self) -> &[DroppedRule] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn should_exclude(&self, normalized_token: &str) -> bool {
        should_exclude(normalized_token, &self.rules)
    }

    /// Like [`RuleSet::should_exclude`], with the surface form available for
    /// rules written with `!`.
    pub fn should_exclude_token(&self, lower: &str, normalized: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches_token(lower, normalized))
    }

    pub fn excludes_text(&self, normalized_text: &str) -> bool {
        self.rules.iter().any(|rule| rule.occurs_in(normalized_text))
    }

    pub fn excludes_phrase(&self, lower_text: &str, normalized_text: &str) -> bool {
        self.rules.iter().any(|rule| rule.occurs_in_phrase(lower_text, normalized_text))
    }
}

pub fn should_exclude(normalized_token: &str, rules: &[ExclusionRule]) -> bool {
    rules.iter().any(|rule| rule.matches(normalized_token))
}
