use std::{
    collections::HashSet,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use super::MinuswordError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExclusionFile {
    pub path: PathBuf,
    pub enabled: bool,
}

/// Standing exclusion entries plus files of entries, one per line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExclusionListData {
    #[serde(default)]
    pub entries: Vec<String>,
    #[serde(default)]
    pub files: Vec<ExclusionFile>,
}

impl ExclusionListData {
    pub fn add_entry(&mut self, entry: &str) -> bool {
        let entry = entry.trim();
        if entry.is_empty() || self.entries.iter().any(|e| e == entry) {
            return false;
        }
        self.entries.push(entry.to_string());
        true
    }

    pub fn remove_entry(&mut self, entry: &str) -> bool {
        match self.entries.iter().position(|e| e == entry.trim()) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Every entry, files included, as one newline separated exclusion text.
    /// Unreadable files are skipped with a warning.
    pub fn to_spec_text(&self) -> String {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();

        for entry in &self.entries {
            if seen.insert(entry.clone()) {
                lines.push(entry.clone());
            }
        }

        for file in self.files.iter().filter(|f| f.enabled) {
            match load_terms_from_file(&file.path) {
                Ok(terms) => {
                    for term in terms {
                        if seen.insert(term.clone()) {
                            lines.push(term);
                        }
                    }
                }
                Err(e) => log::warn!("Skipping exclusion file {}: {}", file.path.display(), e),
            }
        }

        lines.join("\n")
    }
}

pub fn load_terms_from_file(path: &Path) -> Result<Vec<String>, MinuswordError> {
    let content = fs::read_to_string(path).map_err(|e| {
        MinuswordError::Custom(format!("Failed to read file {}: {}", path.display(), e))
    })?;

    Ok(content
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Reads an exclusion file into exclusion text, one entry per line.
pub fn load_exclusion_file(path: &Path) -> Result<String, MinuswordError> {
    Ok(load_terms_from_file(path)?.join("\n"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_exclusion_file_drops_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "бесплатно\n\n  скачать  \n/торрент|crack/").unwrap();

        let text = load_exclusion_file(file.path()).unwrap();
        assert_eq!(text, "бесплатно\nскачать\n/торрент|crack/");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_exclusion_file(Path::new("/definitely/not/here.txt"));
        assert!(matches!(result, Err(MinuswordError::Custom(_))));
    }

    #[test]
    fn test_spec_text_merges_entries_and_enabled_files() {
        let mut enabled = tempfile::NamedTempFile::new().unwrap();
        writeln!(enabled, "скачать\nбесплатно").unwrap();
        let mut disabled = tempfile::NamedTempFile::new().unwrap();
        writeln!(disabled, "отзывы").unwrap();

        let mut data = ExclusionListData::default();
        assert!(data.add_entry(" бесплатно "));
        assert!(!data.add_entry("бесплатно"));
        data.files = vec![
            ExclusionFile { path: enabled.path().to_path_buf(), enabled: true },
            ExclusionFile { path: disabled.path().to_path_buf(), enabled: false },
            ExclusionFile { path: PathBuf::from("/missing/list.txt"), enabled: true },
        ];

        assert_eq!(data.to_spec_text(), "бесплатно\nскачать");

        assert!(data.remove_entry("бесплатно"));
        assert!(!data.remove_entry("бесплатно"));
    }
}
