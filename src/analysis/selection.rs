use std::collections::BTreeSet;

use serde::Serialize;

use super::{
    hierarchy::HierarchyBuilder,
    models::{
        PhraseNode,
        PhraseTree,
    },
};
use crate::core::MinuswordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    Included,
    Excluded,
    Partial,
}

/// Result of a toggle: the tree's phrases split into two disjoint lists that
/// together cover every phrase, each in tree order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionQuery {
    pub excluded: Vec<String>,
    pub remaining: Vec<String>,
}

/// Phrases the user has switched off, keyed by phrase text.
///
/// Not tied to any particular tree, so rebuilding the hierarchy keeps the
/// user's choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    excluded: BTreeSet<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the state changed.
    pub fn toggle_phrase(&mut self, phrase: &str, included: bool) -> bool {
        if included {
            self.excluded.remove(phrase)
        } else {
            self.excluded.insert(phrase.to_string())
        }
    }

    /// Same as toggling every phrase under `node`. Returns how many changed.
    pub fn toggle_group(&mut self, node: &PhraseNode, included: bool) -> usize {
        self.toggle_phrases(node.all_phrases(), included)
    }

    pub fn toggle_phrases<I, S>(&mut self, phrases: I, included: bool) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        phrases.into_iter().filter(|p| self.toggle_phrase(p.as_ref(), included)).count()
    }

    pub fn is_excluded(&self, phrase: &str) -> bool {
        self.excluded.contains(phrase)
    }

    pub fn excluded_phrases(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    /// `all` minus the excluded phrases, in the order given.
    pub fn remaining_phrases<I, S>(&self, all: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        all.into_iter()
            .filter(|p| !self.is_excluded(p.as_ref()))
            .map(|p| p.as_ref().to_string())
            .collect()
    }

    pub fn group_status(&self, node: &PhraseNode) -> GroupStatus {
        let phrases = node.all_phrases();
        let excluded = phrases.iter().filter(|p| self.is_excluded(p)).count();

        if excluded == 0 {
            GroupStatus::Included
        } else if excluded == phrases.len() {
            GroupStatus::Excluded
        } else {
            GroupStatus::Partial
        }
    }

    pub fn query(&self, tree: &PhraseTree) -> SelectionQuery {
        let (excluded, remaining): (Vec<&str>, Vec<&str>) =
            tree.all_phrases().into_iter().partition(|p| self.is_excluded(p));

        SelectionQuery {
            excluded: excluded.into_iter().map(str::to_string).collect(),
            remaining: remaining.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn clear(&mut self) {
        self.excluded.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }
}

/// What a toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleTarget<'a> {
    /// Full key path of a group, e.g. `"купить дом недорого"`.
    Group(&'a str),
    Phrase(&'a str),
}

pub fn apply_toggle(
    tree: &PhraseTree,
    selection: &mut SelectionState,
    target: ToggleTarget<'_>,
    include: bool,
) -> Result<usize, MinuswordError> {
    match target {
        ToggleTarget::Group(path) => {
            let node =
                tree.find_group(path).ok_or_else(|| MinuswordError::UnknownTarget(path.to_string()))?;
            Ok(selection.toggle_group(node, include))
        }
        ToggleTarget::Phrase(phrase) => {
            if !tree.contains_phrase(phrase) {
                return Err(MinuswordError::UnknownTarget(phrase.to_string()));
            }
            Ok(usize::from(selection.toggle_phrase(phrase, include)))
        }
    }
}

/// One user's interactive review: the current tree plus their selection.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    tree: PhraseTree,
    selection: SelectionState,
}

impl ReviewSession {
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Result<Self, MinuswordError> {
        let mut session = Self::default();
        session.rebuild(phrases)?;
        Ok(session)
    }

    /// Replaces the tree. Selections survive the rebuild.
    pub fn rebuild<S: AsRef<str>>(&mut self, phrases: &[S]) -> Result<(), MinuswordError> {
        let tree = HierarchyBuilder::build_tree(phrases);
        if tree.is_empty() {
            return Err(MinuswordError::EmptyInput);
        }
        self.tree = tree;
        Ok(())
    }

    pub fn tree(&self) -> &PhraseTree {
        &self.tree
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn toggle(
        &mut self,
        target: ToggleTarget<'_>,
        include: bool,
    ) -> Result<SelectionQuery, MinuswordError> {
        apply_toggle(&self.tree, &mut self.selection, target, include)?;
        Ok(self.query())
    }

    pub fn query(&self) -> SelectionQuery {
        self.selection.query(&self.tree)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Hard reset: drops both the tree and the selection.
    pub fn reset(&mut self) {
        self.tree = PhraseTree::default();
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASES: &[&str] = &[
        "купить дом",
        "купить дом недорого",
        "купить дом в москве",
        "продать дом",
        "снять квартиру",
    ];

    fn tree() -> PhraseTree {
        HierarchyBuilder::build_tree(PHRASES)
    }

    fn assert_partition(selection: &SelectionState, tree: &PhraseTree) {
        let all: BTreeSet<&str> = tree.all_phrases().into_iter().collect();
        let query = selection.query(tree);

        let excluded: BTreeSet<&str> = query.excluded.iter().map(String::as_str).collect();
        let remaining: BTreeSet<&str> = query.remaining.iter().map(String::as_str).collect();

        assert!(excluded.is_disjoint(&remaining));
        assert_eq!(excluded.union(&remaining).copied().collect::<BTreeSet<_>>(), all);
    }

    #[test]
    fn test_group_toggle_covers_subgroups() {
        let tree = tree();
        let mut selection = SelectionState::new();

        let changed = apply_toggle(&tree, &mut selection, ToggleTarget::Group("купить дом"), false)
            .unwrap();
        assert_eq!(changed, 3);
        assert!(selection.is_excluded("купить дом недорого"));
        assert!(!selection.is_excluded("продать дом"));

        let query = selection.query(&tree);
        assert_eq!(query.remaining, vec!["продать дом", "снять квартиру"]);
        assert_partition(&selection, &tree);
    }

    #[test]
    fn test_toggle_is_idempotent() {
        let mut selection = SelectionState::new();

        assert!(selection.toggle_phrase("купить дом", false));
        assert!(!selection.toggle_phrase("купить дом", false));
        assert_eq!(selection.excluded_phrases().len(), 1);

        assert!(selection.toggle_phrase("купить дом", true));
        assert!(!selection.toggle_phrase("купить дом", true));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_exclude_then_include_restores_remaining() {
        let tree = tree();
        let mut selection = SelectionState::new();
        selection.toggle_phrase("снять квартиру", false);

        let before = selection.remaining_phrases(tree.all_phrases());
        let target = ToggleTarget::Group("купить дом");

        apply_toggle(&tree, &mut selection, target, false).unwrap();
        assert_ne!(selection.remaining_phrases(tree.all_phrases()), before);

        apply_toggle(&tree, &mut selection, target, true).unwrap();
        assert_eq!(selection.remaining_phrases(tree.all_phrases()), before);
    }

    #[test]
    fn test_partition_holds_for_toggle_sequence() {
        let tree = tree();
        let mut selection = SelectionState::new();

        let steps = [
            (ToggleTarget::Group("купить дом"), false),
            (ToggleTarget::Phrase("купить дом недорого"), true),
            (ToggleTarget::Phrase("продать дом"), false),
            (ToggleTarget::Group("купить дом недорого"), false),
            (ToggleTarget::Group("снять квартиру"), false),
            (ToggleTarget::Group("купить дом"), true),
            (ToggleTarget::Phrase("продать дом"), false),
        ];

        for (target, include) in steps {
            apply_toggle(&tree, &mut selection, target, include).unwrap();
            assert_partition(&selection, &tree);
        }
    }

    #[test]
    fn test_group_status() {
        let tree = tree();
        let group = tree.find_group("купить дом").unwrap();
        let mut selection = SelectionState::new();

        assert_eq!(selection.group_status(group), GroupStatus::Included);
        selection.toggle_phrase("купить дом в москве", false);
        assert_eq!(selection.group_status(group), GroupStatus::Partial);
        selection.toggle_group(group, false);
        assert_eq!(selection.group_status(group), GroupStatus::Excluded);
    }

    #[test]
    fn test_unknown_target() {
        let tree = tree();
        let mut selection = SelectionState::new();

        let err = apply_toggle(&tree, &mut selection, ToggleTarget::Phrase("купить"), false);
        assert!(matches!(err, Err(MinuswordError::UnknownTarget(_))));

        let err = apply_toggle(&tree, &mut selection, ToggleTarget::Group("купить"), false);
        assert!(matches!(err, Err(MinuswordError::UnknownTarget(_))));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_session_keeps_selection_across_rebuild() {
        let mut session = ReviewSession::new(PHRASES).unwrap();
        session.toggle(ToggleTarget::Phrase("продать дом"), false).unwrap();

        session.rebuild(&["продать дом", "продать дачу"]).unwrap();
        let query = session.query();
        assert_eq!(query.excluded, vec!["продать дом"]);
        assert_eq!(query.remaining, vec!["продать дачу"]);

        session.clear_selection();
        assert_eq!(session.query().excluded.len(), 0);
    }

    #[test]
    fn test_session_reset_and_empty_input() {
        let mut session = ReviewSession::new(PHRASES).unwrap();
        session.toggle(ToggleTarget::Group("продать дом"), false).unwrap();

        session.reset();
        assert!(session.tree().is_empty());
        assert!(session.selection().is_empty());

        let empty: [&str; 1] = ["   "];
        assert!(matches!(ReviewSession::new(&empty), Err(MinuswordError::EmptyInput)));
    }
}
