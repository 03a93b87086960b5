/// Mode git records for a submodule (gitlink) entry.
pub const SUBMODULE_MODE: u32 = 0o160000;

/// Classification of a single line of diff output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Context line, present on both sides
    Plain,
    /// Line only present in the new file
    Addition,
    /// Line only present in the old file
    Deletion,
    /// The `@@ -l,n +r,n @@` line opening a section
    SectionHeader,
}

/// One physical line of diff output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: LineKind,
    /// Raw text of the line, marker byte included, newline stripped
    pub content: String,
    /// 1-based line number in the old file, 0 when absent on that side
    pub left_line: usize,
    /// 1-based line number in the new file, 0 when absent on that side
    pub right_line: usize,
}

impl DiffLine {
    /// Line text without its leading marker byte.
    ///
    /// Section headers are returned whole.
    pub fn text(&self) -> &str {
        match self.kind {
            LineKind::SectionHeader => &self.content,
            _ => self.content.get(1..).unwrap_or(""),
        }
    }
}

/// A contiguous region of changes within a file (one hunk).
///
/// `lines[0]` is always the section header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSection {
    pub lines: Vec<DiffLine>,
    /// Addition lines in this section
    pub num_additions: usize,
    /// Deletion lines in this section
    pub num_deletions: usize,
}

impl DiffSection {
    /// Find the line that pairs with `line_number` on the opposite side.
    ///
    /// For `LineKind::Deletion` the number is taken as a new-file line and the
    /// deletion sitting at the same display position is returned; for
    /// `LineKind::Addition` it is an old-file line and the matching addition is
    /// returned. Positions are translated with the left/right offset of the
    /// closest preceding context or header line.
    ///
    /// A match is only returned when the run of additions/deletions that holds
    /// it is balanced. Unbalanced runs cannot be paired line for line, so they
    /// yield `None` even when a candidate exists. This is a display heuristic,
    /// not an alignment.
    pub fn line(&self, kind: LineKind, line_number: usize) -> Option<&DiffLine> {
        if !matches!(kind, LineKind::Addition | LineKind::Deletion) {
            return None;
        }

        let target = line_number as i64;
        let mut offset: i64 = 0;
        let mut add_count = 0usize;
        let mut del_count = 0usize;
        let mut matched = None;

        for line in &self.lines {
            match line.kind {
                LineKind::Addition => add_count += 1,
                LineKind::Deletion => del_count += 1,
                LineKind::Plain | LineKind::SectionHeader => {
                    // The run holding the match is complete.
                    if matched.is_some() {
                        break;
                    }
                    offset = line.right_line as i64 - line.left_line as i64;
                    add_count = 0;
                    del_count = 0;
                }
            }

            if line.kind != kind {
                continue;
            }
            let hit = match kind {
                LineKind::Deletion => line.right_line == 0 && line.left_line as i64 == target - offset,
                _ => line.left_line == 0 && line.right_line as i64 == target + offset,
            };
            if hit {
                matched = Some(line);
            }
        }

        if add_count == del_count {
            matched
        } else {
            None
        }
    }
}

/// How a file changed between the two sides of the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileStatus {
    Added,
    #[default]
    Changed,
    Deleted,
    Renamed,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStatus::Added => write!(f, "ADDED"),
            FileStatus::Changed => write!(f, "CHANGED"),
            FileStatus::Deleted => write!(f, "DELETED"),
            FileStatus::Renamed => write!(f, "RENAMED"),
        }
    }
}

/// A single file's change record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffFile {
    /// Path on the new side (e.g., "src/auth/config.rs")
    pub name: String,
    /// Path on the old side; equal to `name` unless renamed
    pub old_name: String,
    pub status: FileStatus,
    /// Object hash of the old blob from the `index` line, empty when absent
    pub old_index: String,
    /// Object hash of the new blob from the `index` line, empty when absent
    pub new_index: String,
    pub old_mode: Option<u32>,
    pub new_mode: Option<u32>,
    pub sections: Vec<DiffSection>,
    /// Lines added across all sections
    pub num_additions: usize,
    /// Lines deleted across all sections
    pub num_deletions: usize,
    pub is_binary: bool,
    pub is_submodule: bool,
    /// Set when a limit cut this file short; later hunks were skipped
    pub is_incomplete: bool,
}

impl DiffFile {
    pub fn new(old_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            old_name: old_name.into(),
            ..Self::default()
        }
    }

    pub fn is_renamed(&self) -> bool {
        self.status == FileStatus::Renamed
    }

    /// Number of content lines (headers excluded) recorded for this file.
    pub fn line_count(&self) -> usize {
        self.sections
            .iter()
            .map(|s| s.lines.len().saturating_sub(1))
            .sum()
    }
}

/// The whole parse result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    /// Files in input order
    pub files: Vec<DiffFile>,
    pub total_additions: usize,
    pub total_deletions: usize,
    /// Set once any limit truncated the output
    pub is_incomplete: bool,
}

impl Diff {
    pub fn num_files(&self) -> usize {
        self.files.len()
    }
}

/// Truncation limits for a parse. Zero means unlimited for that dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Files after which the rest of the stream is discarded
    pub max_files: usize,
    /// Content lines after which a file stops accumulating hunks
    pub max_lines_per_file: usize,
    /// Characters after which a single line truncates its section
    pub max_line_chars: usize,
}

impl ParseOptions {
    pub(crate) fn file_limit(&self) -> Option<usize> {
        (self.max_files > 0).then_some(self.max_files)
    }

    pub(crate) fn line_limit(&self) -> Option<usize> {
        (self.max_lines_per_file > 0).then_some(self.max_lines_per_file)
    }
}
