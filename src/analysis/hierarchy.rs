use std::collections::{
    HashMap,
    HashSet,
};

use super::models::{
    key_path,
    PhraseNode,
    PhraseTree,
};

/// Greedy prefix grouping of phrases.
///
/// Each phrase goes under the longest key path registered so far that prefixes
/// it word by word. The words left over become a new subgroup; a phrase with no
/// leftover words is stored on the matched node itself. A phrase that no
/// registered key prefixes opens a new top-level group keyed by its own words.
///
/// Keys are registered as phrases arrive and are never re-split, so the shape
/// of the tree depends on insertion order: `"купить дом недорого"` followed by
/// `"купить дом"` yields two unrelated top-level groups, while the reverse
/// order nests the first under the second.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    groups: Vec<PhraseNode>,
    // key path -> child indices from the root
    registry: HashMap<String, Vec<usize>>,
    seen: HashSet<String>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_tree<S: AsRef<str>>(phrases: &[S]) -> PhraseTree {
        let mut builder = Self::new();
        for phrase in phrases {
            builder.insert(phrase.as_ref());
        }
        builder.finish()
    }

    /// Returns `false` for blank and already inserted phrases.
    pub fn insert(&mut self, phrase: &str) -> bool {
        let phrase = phrase.trim();
        if phrase.is_empty() || !self.seen.insert(phrase.to_string()) {
            return false;
        }

        let words: Vec<&str> = phrase.split_whitespace().collect();
        let path = key_path(phrase);

        match self.longest_registered_prefix(&words) {
            Some((matched, index_path)) if matched == words.len() => {
                if let Some(node) = self.node_mut(&index_path) {
                    node.phrases.push(phrase.to_string());
                }
            }
            Some((matched, mut index_path)) => {
                let mut child = PhraseNode::new(words[matched..].join(" "), path.clone());
                child.phrases.push(phrase.to_string());

                let Some(parent) = self.node_mut(&index_path) else {
                    return false;
                };
                parent.children.push(child);
                index_path.push(parent.children.len() - 1);
                self.registry.insert(path, index_path);
            }
            None => {
                let mut group = PhraseNode::new(words.join(" "), path.clone());
                group.phrases.push(phrase.to_string());

                self.groups.push(group);
                self.registry.insert(path, vec![self.groups.len() - 1]);
            }
        }

        true
    }

    pub fn finish(mut self) -> PhraseTree {
        for group in &mut self.groups {
            Self::assign_counts(group);
        }
        Self::sort_nodes(&mut self.groups);

        log::debug!(
            "Grouped {} phrases into {} top-level groups",
            self.seen.len(),
            self.groups.len()
        );

        PhraseTree { groups: self.groups }
    }

    fn longest_registered_prefix(&self, words: &[&str]) -> Option<(usize, Vec<usize>)> {
        let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

        (1..=lowered.len()).rev().find_map(|len| {
            self.registry.get(&lowered[..len].join(" ")).map(|index_path| (len, index_path.clone()))
        })
    }

    fn node_mut(&mut self, index_path: &[usize]) -> Option<&mut PhraseNode> {
        let (first, rest) = index_path.split_first()?;
        let mut node = self.groups.get_mut(*first)?;
        for idx in rest {
            node = node.children.get_mut(*idx)?;
        }
        Some(node)
    }

    fn assign_counts(node: &mut PhraseNode) -> usize {
        let mut count = node.phrases.len();
        for child in &mut node.children {
            count += Self::assign_counts(child);
        }
        node.count = count;
        count
    }

    // Stable: equal counts keep insertion order.
    fn sort_nodes(nodes: &mut [PhraseNode]) {
        nodes.sort_by(|a, b| b.count.cmp(&a.count));
        for node in nodes {
            Self::sort_nodes(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(nodes: &[PhraseNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.key.as_str()).collect()
    }

    #[test]
    fn test_groups_by_registered_prefix() {
        let tree = HierarchyBuilder::build_tree(&["купить дом", "купить дом недорого", "продать дом"]);

        assert_eq!(keys(&tree.groups), vec!["купить дом", "продать дом"]);

        let buy = &tree.groups[0];
        assert_eq!(buy.count, 2);
        assert_eq!(buy.phrases, vec!["купить дом"]);
        assert_eq!(keys(&buy.children), vec!["недорого"]);
        assert!(buy.children[0].is_leaf());
        assert_eq!(buy.children[0].phrases, vec!["купить дом недорого"]);

        assert_eq!(tree.groups[1].count, 1);
        assert_eq!(tree.total_phrases(), 3);
    }

    #[test]
    fn test_insertion_order_changes_shape() {
        let tree = HierarchyBuilder::build_tree(&["купить дом недорого", "купить дом"]);

        assert_eq!(keys(&tree.groups), vec!["купить дом недорого", "купить дом"]);
        assert!(tree.groups.iter().all(PhraseNode::is_leaf));
    }

    #[test]
    fn test_longest_prefix_wins() {
        let tree = HierarchyBuilder::build_tree(&[
            "купить",
            "купить дом",
            "купить дом недорого",
            "купить машину",
        ]);

        assert_eq!(keys(&tree.groups), vec!["купить"]);
        let buy = &tree.groups[0];
        assert_eq!(buy.count, 4);
        assert_eq!(keys(&buy.children), vec!["дом", "машину"]);
        assert_eq!(keys(&buy.children[0].children), vec!["недорого"]);
        assert_eq!(buy.children[0].children[0].path, "купить дом недорого");
    }

    #[test]
    fn test_remainder_may_span_several_words() {
        let tree = HierarchyBuilder::build_tree(&["дом", "дом из бруса под ключ"]);

        assert_eq!(keys(&tree.groups[0].children), vec!["из бруса под ключ"]);
    }

    #[test]
    fn test_sorted_by_count_then_insertion() {
        let tree = HierarchyBuilder::build_tree(&[
            "продать дом",
            "снять дом",
            "купить дом",
            "купить дом недорого",
            "снять дом посуточно",
        ]);

        // "снять дом" and "купить дом" tie at two; "снять дом" was registered first.
        assert_eq!(keys(&tree.groups), vec!["снять дом", "купить дом", "продать дом"]);
    }

    #[test]
    fn test_children_sorted_by_count() {
        let tree = HierarchyBuilder::build_tree(&[
            "дом",
            "дом недорого",
            "дом москва",
            "дом москва центр",
        ]);

        assert_eq!(keys(&tree.groups[0].children), vec!["москва", "недорого"]);
    }

    #[test]
    fn test_prefix_match_ignores_case() {
        let tree = HierarchyBuilder::build_tree(&["Купить Дом", "купить дом СРОЧНО", "КУПИТЬ ДОМ"]);

        assert_eq!(tree.groups.len(), 1);
        let group = &tree.groups[0];
        assert_eq!(group.key, "Купить Дом");
        assert_eq!(group.phrases, vec!["Купить Дом", "КУПИТЬ ДОМ"]);
        assert_eq!(keys(&group.children), vec!["СРОЧНО"]);
    }

    #[test]
    fn test_skips_blank_and_duplicate_phrases() {
        let mut builder = HierarchyBuilder::new();
        assert!(builder.insert("купить дом"));
        assert!(!builder.insert("  купить дом "));
        assert!(!builder.insert("   "));

        let tree = builder.finish();
        assert_eq!(tree.total_phrases(), 1);
    }

    #[test]
    fn test_empty_input_gives_empty_tree() {
        let phrases: Vec<String> = Vec::new();
        assert!(HierarchyBuilder::build_tree(&phrases).is_empty());
    }
}
