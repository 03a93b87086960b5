use crate::diff::FileStatus;

/// One row of the report: a file's change at a glance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// Path on the new side
    pub name: String,
    /// Path on the old side, only set for renames
    pub old_name: Option<String>,
    pub status: FileStatus,
    /// Lines added in this file
    pub additions: usize,
    /// Lines deleted in this file
    pub deletions: usize,
    /// Number of hunks
    pub sections: usize,
    pub is_binary: bool,
    pub is_submodule: bool,
    /// Output for this file was cut short by a limit
    pub is_incomplete: bool,
}

/// Complete summary of a parsed diff.
#[derive(Debug)]
pub struct Report {
    /// Per-file summaries in diff order
    pub files: Vec<FileSummary>,
    /// Lines added
    pub additions: usize,
    /// Lines deleted
    pub deletions: usize,
    /// Some output was omitted because a limit was hit
    pub is_incomplete: bool,
}

impl Report {
    pub fn files_changed(&self) -> usize {
        self.files.len()
    }
}

impl FileSummary {
    /// Short flag list such as "binary, incomplete".
    pub fn flags(&self) -> String {
        let mut flags = Vec::new();
        if self.is_binary {
            flags.push("binary");
        }
        if self.is_submodule {
            flags.push("submodule");
        }
        if self.is_incomplete {
            flags.push("output omitted");
        }
        flags.join(", ")
    }

    /// "old -> new" for renames, the plain name otherwise.
    pub fn display_name(&self) -> String {
        match &self.old_name {
            Some(old) => format!("{} -> {}", old, self.name),
            None => self.name.clone(),
        }
    }
}
