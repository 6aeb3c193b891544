pub mod errors;
pub mod exclusion_list;
pub mod pipeline;
pub mod settings;

pub use errors::MinuswordError;
pub use exclusion_list::{
    load_exclusion_file,
    ExclusionFile,
    ExclusionListData,
};
pub use pipeline::{
    build_group_tree,
    generate_exclusion_list,
    generate_exclusion_report,
    partition_phrases,
    render_minus_words,
    toggle_and_query,
    ExclusionReport,
};
pub use settings::{
    EngineSettings,
    ReducerSettings,
};
