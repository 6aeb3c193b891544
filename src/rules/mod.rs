pub mod matcher;

pub mod parser;

pub use matcher::{
    should_exclude,
    DroppedRule,
    ExclusionRule,
    RuleSet,
};
pub use parser::{
    parse_exclusion_spec,
    PatternSpec,
    RuleKind,
};
