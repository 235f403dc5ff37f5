use std::collections::HashMap;

/// Keyed update applied to [`UploadIndex`]. Every write touches one name (or
/// an explicit list of names) and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexUpdate {
    Progress { name: String, percent: u8 },
    /// Terminal failure: progress forced to 100 and the message recorded.
    Failed { name: String, message: String },
    ClearErrors(Vec<String>),
}

/// Progress and error messages for the files visible in the dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadIndex {
    progresses: HashMap<String, u8>,
    errors: HashMap<String, String>,
}

impl UploadIndex {
    pub fn apply(&mut self, update: IndexUpdate) {
        match update {
            IndexUpdate::Progress { name, percent } => {
                // an errored file stays at 100 until its error is cleared
                if !self.errors.contains_key(&name) {
                    self.progresses.insert(name, percent.min(100));
                }
            }
            IndexUpdate::Failed { name, message } => {
                self.progresses.insert(name.clone(), 100);
                self.errors.insert(name, message);
            }
            IndexUpdate::ClearErrors(names) => {
                for name in names {
                    self.errors.remove(&name);
                }
            }
        }
    }

    pub fn progress(&self, name: &str) -> Option<u8> {
        self.progresses.get(name).copied()
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    pub fn progresses(&self) -> &HashMap<String, u8> {
        &self.progresses
    }

    pub fn is_empty(&self) -> bool {
        self.progresses.is_empty() && self.errors.is_empty()
    }

    pub fn clear(&mut self) {
        self.progresses.clear();
        self.errors.clear();
    }
}
