use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermEntry {
    pub term: String,
    pub frequency: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseNode {
    /// Words this node adds on top of its parent's key.
    pub key: String,
    /// Full lower-cased key path from the root, space separated.
    pub path: String,
    /// Phrases rooted here, transitively.
    pub count: usize,
    pub phrases: Vec<String>,
    pub children: Vec<PhraseNode>,
}

impl PhraseNode {
    pub fn new(key: String, path: String) -> Self {
        Self { key, path, count: 0, phrases: Vec::new(), children: Vec::new() }
    }

    pub fn count_phrases(&self) -> usize {
        self.phrases.len() + self.children.iter().map(PhraseNode::count_phrases).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Every phrase under this node, own phrases first, then children in order.
    pub fn all_phrases(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.count);
        self.collect_phrases(&mut out);
        out
    }

    fn collect_phrases<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.extend(self.phrases.iter().map(String::as_str));
        for child in &self.children {
            child.collect_phrases(out);
        }
    }

    pub fn find(&self, path: &str) -> Option<&PhraseNode> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhraseTree {
    pub groups: Vec<PhraseNode>,
}

impl PhraseTree {
    pub fn total_phrases(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn all_phrases(&self) -> Vec<&str> {
        self.groups.iter().flat_map(PhraseNode::all_phrases).collect()
    }

    /// Looks a group up by its full key path, e.g. `"купить дом недорого"`.
    /// Matching ignores case and repeated whitespace.
    pub fn find_group(&self, path: &str) -> Option<&PhraseNode> {
        let path = key_path(path);
        self.groups.iter().find_map(|group| group.find(&path))
    }

    pub fn contains_phrase(&self, phrase: &str) -> bool {
        self.all_phrases().iter().any(|p| *p == phrase)
    }
}

pub(crate) fn key_path(text: &str) -> String {
    text.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join(" ")
}
