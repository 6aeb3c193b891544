pub mod frequency;
pub mod hierarchy;
pub mod models;
pub mod selection;

pub use frequency::{
    build_frequency_table,
    rank_tokens,
    FrequencyTable,
};
pub use hierarchy::HierarchyBuilder;
pub use models::{
    PhraseNode,
    PhraseTree,
    TermEntry,
};
pub use selection::{
    apply_toggle,
    GroupStatus,
    ReviewSession,
    SelectionQuery,
    SelectionState,
    ToggleTarget,
};
