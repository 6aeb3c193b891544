//! Minus-word generation and phrase grouping for search-advertising keyword lists.
//!
//! Two independent flows share the same text handling:
//!
//! - phrases + exclusion text -> [`RuleSet`] -> ranked minus-word candidates
//!   ([`generate_exclusion_list`]);
//! - phrases -> [`PhraseTree`] -> [`SelectionState`] toggled by the user
//!   ([`build_group_tree`], [`toggle_and_query`]).
//!
//! Morphology is injected through the [`Reducer`] trait. Everything works with
//! [`IdentityReducer`]; a better reducer only improves grouping of word forms.

pub mod analysis;
pub mod core;
pub mod persistence;
pub mod rules;
pub mod segmentation;

pub use analysis::{
    FrequencyTable,
    GroupStatus,
    HierarchyBuilder,
    PhraseNode,
    PhraseTree,
    ReviewSession,
    SelectionQuery,
    SelectionState,
    TermEntry,
    ToggleTarget,
};
pub use self::core::{
    build_group_tree,
    generate_exclusion_list,
    generate_exclusion_report,
    partition_phrases,
    render_minus_words,
    toggle_and_query,
    EngineSettings,
    ExclusionReport,
    MinuswordError,
};
pub use rules::{
    ExclusionRule,
    RuleKind,
    RuleSet,
};
pub use segmentation::{
    IdentityReducer,
    Normalizer,
    Reducer,
    SnowballReducer,
    StemLanguage,
};
