use crate::error::Result;
use crate::upload::types::{FileRejection, RejectionCode, SelectedFile, ValidationFailure};
use crate::utils::file_size::format_size;
use glob::{MatchOptions, Pattern};
use ignore::Walk;
use std::path::{Path, PathBuf};

pub const MAX_FILE_SIZE: u64 = 200 * 1024 * 1024;

const ACCEPTED_EXTENSIONS: &[&str] = &[
    "txt", "md", "pdf", "docx", "pptx", "xlsx", "rtf", "odt", "tex", "epub", "html", "htm",
    "csv", "json", "xml", "yaml", "yml", "log", "conf", "ini", "properties", "sql", "bat",
    "sh", "c", "cpp", "py", "java", "js", "ts", "swift", "go", "rb", "php", "css", "scss",
    "less",
];

#[derive(Debug, Clone)]
pub struct PickerConfig {
    /// Glob patterns matched against the file name, case-insensitively.
    pub accepted: Vec<String>,
    pub max_size: u64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            accepted: ACCEPTED_EXTENSIONS
                .iter()
                .map(|ext| format!("*.{}", ext))
                .collect(),
            max_size: MAX_FILE_SIZE,
        }
    }
}

#[derive(Debug, Default)]
pub struct Selection {
    pub accepted: Vec<SelectedFile>,
    pub rejected: Vec<FileRejection>,
}

/// Validates picked paths and splits them into accepted and rejected files.
#[derive(Debug, Clone)]
pub struct FilePicker {
    config: PickerConfig,
    patterns: Vec<Pattern>,
}

impl FilePicker {
    pub fn new(config: PickerConfig) -> Result<Self> {
        let patterns = config
            .accepted
            .iter()
            .map(|pattern| Pattern::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { config, patterns })
    }

    fn is_accepted_type(&self, name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_with(name, options))
    }

    fn check(&self, file: &SelectedFile) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();
        if !self.is_accepted_type(&file.name) {
            failures.push(ValidationFailure {
                code: RejectionCode::FileInvalidType,
                message: format!("File type must be one of {}", self.config.accepted.join(", ")),
            });
        }
        if file.size > self.config.max_size {
            failures.push(ValidationFailure {
                code: RejectionCode::FileTooLarge,
                message: format!("File is larger than {}", format_size(self.config.max_size)),
            });
        }
        failures
    }

    pub fn validate(&self, paths: &[PathBuf]) -> Selection {
        let mut selection = Selection::default();

        for path in paths {
            let file = match SelectedFile::from_path(path) {
                Ok(file) => file,
                Err(err) => {
                    log::warn!("Cannot read {}: {}", path.display(), err);
                    selection.rejected.push(FileRejection {
                        file: SelectedFile {
                            name: path
                                .file_name()
                                .map(|n| n.to_string_lossy().to_string())
                                .unwrap_or_else(|| path.display().to_string()),
                            path: path.clone(),
                            size: 0,
                        },
                        errors: vec![ValidationFailure {
                            code: RejectionCode::Other("file-unreadable".to_string()),
                            message: err.to_string(),
                        }],
                    });
                    continue;
                }
            };

            let errors = self.check(&file);
            if errors.is_empty() {
                selection.accepted.push(file);
            } else {
                selection.rejected.push(FileRejection { file, errors });
            }
        }

        selection
    }

    /// Files under `folder`, skipping anything `.gitignore` excludes.
    pub fn collect_folder(&self, folder: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for entry in Walk::new(folder) {
            match entry {
                Ok(entry) if entry.path().is_file() => paths.push(entry.path().to_path_buf()),
                Ok(_) => {}
                Err(err) => log::warn!("Error walking directory: {}", err),
            }
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn splits_accepted_and_rejected() {
        let dir = tempdir().unwrap();
        let pdf = dir.path().join("Report.PDF");
        let exe = dir.path().join("tool.exe");
        fs::write(&pdf, b"%PDF").unwrap();
        fs::write(&exe, b"MZ").unwrap();

        let picker = FilePicker::new(PickerConfig::default()).unwrap();
        let selection = picker.validate(&[pdf, exe]);

        assert_eq!(selection.accepted.len(), 1);
        assert_eq!(selection.accepted[0].name, "Report.PDF");
        assert_eq!(selection.accepted[0].size, 4);
        assert_eq!(selection.rejected.len(), 1);
        assert_eq!(selection.rejected[0].errors[0].code, RejectionCode::FileInvalidType);
    }

    #[test]
    fn oversized_files_are_rejected() {
        let dir = tempdir().unwrap();
        let big = dir.path().join("big.txt");
        fs::write(&big, vec![b'a'; 32]).unwrap();

        let picker = FilePicker::new(PickerConfig {
            accepted: vec!["*.txt".to_string()],
            max_size: 16,
        })
        .unwrap();
        let selection = picker.validate(&[big]);

        assert!(selection.accepted.is_empty());
        let failure = &selection.rejected[0].errors[0];
        assert_eq!(failure.code, RejectionCode::FileTooLarge);
        assert_eq!(failure.message, "File is larger than 16 B");
    }

    #[test]
    fn missing_file_is_rejected_not_dropped() {
        let dir = tempdir().unwrap();
        let picker = FilePicker::new(PickerConfig::default()).unwrap();
        let selection = picker.validate(&[dir.path().join("gone.pdf")]);

        assert_eq!(selection.rejected.len(), 1);
        assert_eq!(selection.rejected[0].file.name, "gone.pdf");
    }

    #[test]
    fn folder_walk_honours_gitignore() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".gitignore"), "skip.md\n").unwrap();
        fs::write(dir.path().join("keep.md"), "# keep").unwrap();
        fs::write(dir.path().join("skip.md"), "# skip").unwrap();

        let picker = FilePicker::new(PickerConfig::default()).unwrap();
        let names: Vec<_> = picker
            .collect_folder(dir.path())
            .into_iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect();

        assert!(names.contains(&"keep.md".to_string()));
        assert!(!names.contains(&"skip.md".to_string()));
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(FilePicker::new(PickerConfig {
            accepted: vec!["[".to_string()],
            max_size: 1,
        })
        .is_err());
    }
}
