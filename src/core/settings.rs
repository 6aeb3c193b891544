use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::{
    exclusion_list::ExclusionListData,
    MinuswordError,
};
use crate::{
    persistence::{
        get_data_file_path,
        load_json,
        load_json_or_default,
        save_json,
    },
    segmentation::normalizer::{
        Normalizer,
        StemLanguage,
    },
};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;
pub const DEFAULT_NEGATION_MARKER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReducerSettings {
    Identity,
    Snowball { language: StemLanguage },
}

impl Default for ReducerSettings {
    fn default() -> Self {
        ReducerSettings::Snowball { language: StemLanguage::Russian }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub min_word_length: usize,
    pub reducer: ReducerSettings,
    pub negation_marker: String,
    pub exclusions: ExclusionListData,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            reducer: ReducerSettings::default(),
            negation_marker: DEFAULT_NEGATION_MARKER.to_string(),
            exclusions: ExclusionListData::default(),
        }
    }
}

impl EngineSettings {
    pub fn default_path() -> PathBuf {
        get_data_file_path(SETTINGS_FILE)
    }

    /// Strict load: a malformed file is an error. A missing file gives defaults.
    pub fn load(path: &Path) -> Result<Self, MinuswordError> {
        load_json(path)
    }

    pub fn load_or_default(path: &Path) -> Self {
        load_json_or_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), MinuswordError> {
        save_json(self, path)
    }

    pub fn build_normalizer(&self) -> Normalizer {
        match self.reducer {
            ReducerSettings::Identity => Normalizer::identity(),
            ReducerSettings::Snowball { language } => Normalizer::snowball(language),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.min_word_length, 3);
        assert_eq!(settings.negation_marker, "-");
        assert_eq!(settings.reducer, ReducerSettings::Snowball { language: StemLanguage::Russian });
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: EngineSettings =
            serde_json::from_str(r#"{ "reducer": { "kind": "identity" } }"#).unwrap();
        assert_eq!(settings.reducer, ReducerSettings::Identity);
        assert_eq!(settings.min_word_length, DEFAULT_MIN_WORD_LENGTH);

        let settings: EngineSettings = serde_json::from_str(
            r#"{ "min_word_length": 4, "reducer": { "kind": "snowball", "language": "english" } }"#,
        )
        .unwrap();
        assert_eq!(settings.min_word_length, 4);
        assert_eq!(settings.reducer, ReducerSettings::Snowball { language: StemLanguage::English });
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let mut settings = EngineSettings { min_word_length: 5, ..Default::default() };
        settings.exclusions.add_entry("бесплатно");
        settings.save(&path).unwrap();

        assert_eq!(EngineSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert_eq!(EngineSettings::load(&missing).unwrap(), EngineSettings::default());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(EngineSettings::load(&broken), Err(MinuswordError::Json(_))));
        assert_eq!(EngineSettings::load_or_default(&broken), EngineSettings::default());
    }

    #[test]
    fn test_build_normalizer_follows_reducer() {
        let identity = EngineSettings { reducer: ReducerSettings::Identity, ..Default::default() };
        assert_eq!(identity.build_normalizer().normalize("Квартиры", false), "квартиры");

        let snowball = EngineSettings::default().build_normalizer();
        assert_eq!(snowball.normalize("квартиры", false), snowball.normalize("квартира", false));
    }
}
