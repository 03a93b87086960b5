//! Push-style state machine that builds a [`Diff`] one line at a time.
//!
//! Drivers read lines (see `reader`), feed them to [`DiffParser::feed`], and
//! stop reading in earnest once it answers [`Flow::Drain`].

use tracing::{debug, info};

use super::header::{parse_git_header_paths, parse_hunk_header, parse_mode, path_token};
use super::types::{Diff, DiffFile, DiffLine, DiffSection, FileStatus, LineKind, ParseOptions, SUBMODULE_MODE};
use super::DiffError;

/// What the driver should do with the rest of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep feeding lines.
    Continue,
    /// The diff is final; read and discard the remaining input.
    Drain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No file open yet.
    Idle,
    /// Between `diff --git` and the line that ends header scanning.
    FileHeader,
    /// Header done, waiting for hunks or the next file.
    FileBody,
    /// Inside a hunk.
    Hunk,
    /// The open file is incomplete; wait for the next file.
    SkipFile,
    /// File limit reached; everything else is discarded.
    Draining,
}

/// Hunk under construction with its running line counters.
struct OpenSection {
    section: DiffSection,
    left: usize,
    right: usize,
    old_remaining: usize,
    new_remaining: usize,
}

impl OpenSection {
    fn exhausted(&self) -> bool {
        self.old_remaining == 0 && self.new_remaining == 0
    }

    fn push(&mut self, kind: LineKind, content: &str) {
        let (left_line, right_line) = match kind {
            LineKind::Plain => {
                let at = (self.left, self.right);
                self.left += 1;
                self.right += 1;
                self.old_remaining = self.old_remaining.saturating_sub(1);
                self.new_remaining = self.new_remaining.saturating_sub(1);
                at
            }
            LineKind::Addition => {
                let at = (0, self.right);
                self.right += 1;
                self.new_remaining = self.new_remaining.saturating_sub(1);
                self.section.num_additions += 1;
                at
            }
            LineKind::Deletion => {
                let at = (self.left, 0);
                // A side with no lines stays pinned at 0.
                if self.left > 0 {
                    self.left += 1;
                }
                self.old_remaining = self.old_remaining.saturating_sub(1);
                self.section.num_deletions += 1;
                at
            }
            LineKind::SectionHeader => (self.left, self.right),
        };
        self.section.lines.push(DiffLine {
            kind,
            content: content.to_string(),
            left_line,
            right_line,
        });
    }
}

/// Incremental diff parser.
///
/// Owns the in-progress diff exclusively; [`DiffParser::finish`] hands the
/// completed [`Diff`] over by value.
pub struct DiffParser {
    options: ParseOptions,
    diff: Diff,
    file: Option<DiffFile>,
    section: Option<OpenSection>,
    state: State,
    line_number: usize,
}

impl DiffParser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            diff: Diff::default(),
            file: None,
            section: None,
            state: State::Idle,
            line_number: 0,
        }
    }

    /// Feed one line, terminator stripped.
    ///
    /// `overlong` marks a line longer than the configured character limit.
    pub fn feed(&mut self, line: &str, overlong: bool) -> Result<Flow, DiffError> {
        self.line_number += 1;

        if self.state == State::Draining {
            return Ok(Flow::Drain);
        }
        if let Some(rest) = line.strip_prefix("diff --git ") {
            return Ok(self.start_file(rest, overlong));
        }

        if self.state == State::Hunk {
            if overlong {
                self.truncate_file("line exceeds character limit");
                return Ok(Flow::Continue);
            }
            if self.take_hunk_line(line) {
                return Ok(Flow::Continue);
            }
            // Not content: the hunk is over, look at the line again as file context.
            self.close_section();
            self.state = State::FileBody;
        }

        if overlong && matches!(self.state, State::FileHeader | State::FileBody) {
            self.truncate_file("header line exceeds character limit");
            return Ok(Flow::Continue);
        }

        match self.state {
            State::FileHeader => self.header_line(line)?,
            State::FileBody => self.body_line(line),
            State::Idle | State::SkipFile | State::Hunk | State::Draining => {}
        }
        Ok(Flow::Continue)
    }

    /// Close whatever is open and return the finished diff.
    pub fn finish(mut self) -> Diff {
        self.close_file();
        self.diff
    }

    fn start_file(&mut self, rest: &str, overlong: bool) -> Flow {
        self.close_file();

        if let Some(limit) = self.options.file_limit() {
            if self.diff.files.len() >= limit {
                info!(limit, line = self.line_number, "file limit reached, discarding remaining input");
                self.diff.is_incomplete = true;
                self.state = State::Draining;
                return Flow::Drain;
            }
        }

        let (old_name, name) = parse_git_header_paths(rest);
        debug!(name = %name, old_name = %old_name, line = self.line_number, "file opened");
        self.file = Some(DiffFile::new(old_name, name));
        self.state = State::FileHeader;

        if overlong {
            self.truncate_file("file header exceeds character limit");
        }
        Flow::Continue
    }

    /// Metadata lines between `diff --git` and the first hunk.
    fn header_line(&mut self, line: &str) -> Result<(), DiffError> {
        let line_number = self.line_number;
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };

        if line.starts_with("new file") {
            file.status = FileStatus::Added;
            if let Some(mode) = last_field_mode(line) {
                file.new_mode = Some(mode);
                file.old_mode.get_or_insert(mode);
                file.is_submodule |= mode == SUBMODULE_MODE;
            }
        } else if line.starts_with("deleted") {
            file.status = FileStatus::Deleted;
            if let Some(mode) = last_field_mode(line) {
                file.old_mode = Some(mode);
                file.new_mode.get_or_insert(mode);
                file.is_submodule |= mode == SUBMODULE_MODE;
            }
        } else if let Some(rest) = line.strip_prefix("index ") {
            apply_index(file, rest).ok_or_else(|| DiffError::MalformedIndex {
                line_number,
                line: line.to_string(),
            })?;
            self.state = State::FileBody;
        } else if let Some(rest) = line.strip_prefix("similarity index ") {
            file.status = FileStatus::Renamed;
            if rest.trim() == "100%" {
                // Pure rename: no index line follows.
                self.state = State::FileBody;
            }
        } else if let Some(rest) = line.strip_prefix("new mode ") {
            if let Some(mode) = parse_mode(rest) {
                file.new_mode = Some(mode);
            }
        } else if let Some(rest) = line.strip_prefix("old mode ") {
            if let Some(mode) = parse_mode(rest) {
                file.old_mode = Some(mode);
            }
        } else {
            self.body_line(line);
        }
        Ok(())
    }

    /// Lines after header scanning: hunk headers, binary markers, renames.
    /// Everything else (`---`/`+++`, blank lines, stray text) is dropped.
    fn body_line(&mut self, line: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        if line.starts_with("@@") {
            self.open_section(line);
        } else if line.starts_with("Binary") {
            file.is_binary = true;
        } else if let Some(rest) = line.strip_prefix("rename from ") {
            if file.sections.is_empty() {
                file.old_name = path_token(rest);
            }
        } else if let Some(rest) = line.strip_prefix("rename to ") {
            if file.sections.is_empty() {
                file.name = path_token(rest);
            }
        }
    }

    fn open_section(&mut self, line: &str) {
        // Earlier hunks are closed by now, so the file's sections hold every line so far.
        let recorded = self.file.as_ref().map_or(0, DiffFile::line_count);
        if self.options.line_limit().is_some_and(|limit| recorded > limit) {
            self.truncate_file("per-file line limit exceeded");
            return;
        }

        let range = parse_hunk_header(line);
        let mut open = OpenSection {
            section: DiffSection::default(),
            left: range.old_start,
            right: range.new_start,
            old_remaining: range.old_count,
            new_remaining: range.new_count,
        };
        open.push(LineKind::SectionHeader, line);
        self.section = Some(open);
        self.state = State::Hunk;
    }

    /// Record `line` in the open hunk if it is a content line.
    fn take_hunk_line(&mut self, line: &str) -> bool {
        let Some(open) = self.section.as_mut() else {
            return false;
        };

        // Once the declared ranges are used up, `--- `/`+++ ` are file markers.
        let file_marker = open.exhausted() && (line.starts_with("--- ") || line.starts_with("+++ "));
        let kind = match line.as_bytes().first() {
            Some(b' ') => LineKind::Plain,
            Some(b'+') if !file_marker => LineKind::Addition,
            Some(b'-') if !file_marker => LineKind::Deletion,
            Some(b'\\') => return is_no_newline_marker(line),
            _ => return false,
        };

        open.push(kind, line);
        true
    }

    fn close_section(&mut self) {
        let Some(open) = self.section.take() else {
            return;
        };
        if let Some(file) = self.file.as_mut() {
            file.num_additions += open.section.num_additions;
            file.num_deletions += open.section.num_deletions;
            file.sections.push(open.section);
        }
    }

    fn close_file(&mut self) {
        self.close_section();
        if let Some(file) = self.file.take() {
            self.diff.total_additions += file.num_additions;
            self.diff.total_deletions += file.num_deletions;
            self.diff.files.push(file);
        }
    }

    /// Keep what the open file has so far and skip the rest of it.
    fn truncate_file(&mut self, reason: &str) {
        self.close_section();
        if let Some(file) = self.file.as_mut() {
            info!(name = %file.name, line = self.line_number, reason, "file truncated");
            file.is_incomplete = true;
            self.diff.is_incomplete = true;
            self.state = State::SkipFile;
        }
    }
}

fn last_field_mode(line: &str) -> Option<u32> {
    line.split_whitespace().last().and_then(parse_mode)
}

/// Apply `<old>..<new> [mode]`. `None` when the hashes are malformed.
fn apply_index(file: &mut DiffFile, rest: &str) -> Option<()> {
    let mut fields = rest.split_whitespace();
    let (old, new) = fields.next()?.split_once("..")?;
    if old.is_empty() || new.is_empty() || new.contains("..") {
        return None;
    }
    file.old_index = old.to_string();
    file.new_index = new.to_string();

    if let Some(mode) = fields.next().and_then(parse_mode) {
        file.old_mode = Some(mode);
        file.new_mode = Some(mode);
        file.is_submodule |= mode == SUBMODULE_MODE;
    }
    Some(())
}

fn is_no_newline_marker(line: &str) -> bool {
    line[1..].trim().eq_ignore_ascii_case("no newline at end of file")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, options: ParseOptions) -> Result<Diff, DiffError> {
        let mut parser = DiffParser::new(options);
        for line in input.lines() {
            if parser.feed(line, false)? == Flow::Drain {
                break;
            }
        }
        Ok(parser.finish())
    }

    fn kinds(section: &DiffSection) -> Vec<(LineKind, usize, usize)> {
        section
            .lines
            .iter()
            .map(|l| (l.kind, l.left_line, l.right_line))
            .collect()
    }

    #[test]
    fn test_pure_addition() {
        let diff = run(
            "diff --git a/x b/x\nnew file mode 100644\nindex 0000000..e69de29\n--- /dev/null\n+++ b/x\n@@ -0,0 +1,2 @@\n+a\n+b\n",
            ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(diff.files.len(), 1);
        let file = &diff.files[0];
        assert_eq!(file.status, FileStatus::Added);
        assert_eq!(file.num_additions, 2);
        assert_eq!(file.num_deletions, 0);
        assert_eq!(file.old_index, "0000000");
        assert_eq!(file.new_index, "e69de29");
        assert_eq!(file.new_mode, Some(0o100644));
        assert_eq!(file.old_mode, Some(0o100644));
        assert_eq!(
            kinds(&file.sections[0]),
            vec![
                (LineKind::SectionHeader, 0, 1),
                (LineKind::Addition, 0, 1),
                (LineKind::Addition, 0, 2),
            ]
        );
    }

    #[test]
    fn test_deleted_file_left_numbers() {
        let diff = run(
            "diff --git a/gone.txt b/gone.txt\ndeleted file mode 100755\nindex e69de29..0000000\n--- a/gone.txt\n+++ /dev/null\n@@ -1,2 +0,0 @@\n-hello\n-world\n",
            ParseOptions::default(),
        )
        .unwrap();

        let file = &diff.files[0];
        assert_eq!(file.status, FileStatus::Deleted);
        assert_eq!(file.old_mode, Some(0o100755));
        assert_eq!(file.num_deletions, 2);
        assert_eq!(
            kinds(&file.sections[0])[1..],
            [(LineKind::Deletion, 1, 0), (LineKind::Deletion, 2, 0)]
        );
    }

    #[test]
    fn test_line_numbers_advance() {
        let diff = run(
            "diff --git a/m.rs b/m.rs\nindex abc1234..def5678 100644\n--- a/m.rs\n+++ b/m.rs\n@@ -10,4 +10,4 @@ fn main() {\n ctx\n-old\n+new\n ctx2\n",
            ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(
            kinds(&diff.files[0].sections[0]),
            vec![
                (LineKind::SectionHeader, 10, 10),
                (LineKind::Plain, 10, 10),
                (LineKind::Deletion, 11, 0),
                (LineKind::Addition, 0, 11),
                (LineKind::Plain, 12, 12),
            ]
        );
    }

    #[test]
    fn test_pure_rename() {
        let diff = run(
            "diff --git a/old.rs b/new.rs\nsimilarity index 100%\nrename from old.rs\nrename to new.rs\n",
            ParseOptions::default(),
        )
        .unwrap();

        let file = &diff.files[0];
        assert_eq!(file.status, FileStatus::Renamed);
        assert!(file.is_renamed());
        assert_eq!(file.old_name, "old.rs");
        assert_eq!(file.name, "new.rs");
        assert_ne!(file.old_name, file.name);
        assert!(file.sections.is_empty());
        assert!(file.old_index.is_empty());
    }

    #[test]
    fn test_rename_lines_override_header_split() {
        let diff = run(
            "diff --git a/a b/c b/d\nsimilarity index 90%\nrename from a b/c\nrename to d\nindex 1111111..2222222 100644\n",
            ParseOptions::default(),
        )
        .unwrap();

        let file = &diff.files[0];
        assert_eq!(file.old_name, "a b/c");
        assert_eq!(file.name, "d");
        assert_eq!(file.new_index, "2222222");
    }

    #[test]
    fn test_mode_change_only() {
        let diff = run(
            "diff --git a/run.sh b/run.sh\nold mode 100644\nnew mode 100755\n",
            ParseOptions::default(),
        )
        .unwrap();

        let file = &diff.files[0];
        assert_eq!(file.status, FileStatus::Changed);
        assert_eq!(file.old_mode, Some(0o100644));
        assert_eq!(file.new_mode, Some(0o100755));
    }

    #[test]
    fn test_binary_and_submodule() {
        let diff = run(
            "diff --git a/logo.png b/logo.png\nindex 876e6a1..8c46810 100644\nBinary files a/logo.png and b/logo.png differ\ndiff --git a/vendor/lib b/vendor/lib\nnew file mode 160000\nindex 0000000..a1b2c3d\n--- /dev/null\n+++ b/vendor/lib\n@@ -0,0 +1 @@\n+Subproject commit a1b2c3d\n",
            ParseOptions::default(),
        )
        .unwrap();

        assert!(diff.files[0].is_binary);
        assert!(diff.files[0].sections.is_empty());
        assert!(!diff.files[1].is_binary);
        assert!(diff.files[1].is_submodule);
        assert_eq!(diff.files[1].status, FileStatus::Added);
    }

    #[test]
    fn test_malformed_index_is_fatal() {
        let err = run(
            "diff --git a/x b/x\nindex zzz 100644\n@@ -1 +1 @@\n-a\n+b\n",
            ParseOptions::default(),
        )
        .unwrap_err();

        match err {
            DiffError::MalformedIndex { line_number, line } => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "index zzz 100644");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_index_with_too_many_ranges_is_fatal() {
        assert!(run("diff --git a/x b/x\nindex a..b..c\n", ParseOptions::default()).is_err());
        assert!(run("diff --git a/x b/x\nindex ..b\n", ParseOptions::default()).is_err());
    }

    #[test]
    fn test_index_ends_header_scanning() {
        // A mode line after the index line is not header metadata any more.
        let diff = run(
            "diff --git a/x b/x\nindex 1111111..2222222 100644\nnew mode 100755\n",
            ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(diff.files[0].new_mode, Some(0o100644));
    }

    #[test]
    fn test_no_newline_marker_keeps_section_open() {
        let diff = run(
            "diff --git a/x b/x\nindex 1111111..2222222 100644\n--- a/x\n+++ b/x\n@@ -1,2 +1,2 @@\n-a\n\\ No newline at end of file\n+a\n+b\n",
            ParseOptions::default(),
        )
        .unwrap();

        let section = &diff.files[0].sections[0];
        assert_eq!(section.lines.len(), 4);
        assert_eq!(section.num_deletions, 1);
        assert_eq!(section.num_additions, 2);
    }

    #[test]
    fn test_dashed_content_inside_hunk() {
        // "--- x" inside a declared range is a deleted line "-- x".
        let diff = run(
            "diff --git a/notes.md b/notes.md\nindex 1111111..2222222 100644\n--- a/notes.md\n+++ b/notes.md\n@@ -1,2 +1,2 @@\n--- x\n+++ y\n ok\ndiff --git a/b b/b\n",
            ParseOptions::default(),
        )
        .unwrap();

        let section = &diff.files[0].sections[0];
        assert_eq!(section.num_deletions, 1);
        assert_eq!(section.num_additions, 1);
        assert_eq!(section.lines[1].text(), "-- x");
        assert_eq!(diff.files.len(), 2);
    }

    #[test]
    fn test_blank_line_closes_section() {
        let diff = run(
            "diff --git a/x b/x\nindex 1111111..2222222 100644\n@@ -1 +1 @@\n-a\n+b\n\n+stray\n@@ -5 +5 @@\n-c\n+d\n",
            ParseOptions::default(),
        )
        .unwrap();

        let file = &diff.files[0];
        assert_eq!(file.sections.len(), 2);
        assert_eq!(file.num_additions, 2);
        assert_eq!(diff.total_additions, 2);
    }

    #[test]
    fn test_lines_before_first_file_are_ignored() {
        let diff = run(
            "commit 664b2f5\nAuthor: someone\n\n+not a diff\ndiff --git a/x b/x\nindex 1111111..2222222\n",
            ParseOptions::default(),
        )
        .unwrap();
        assert_eq!(diff.files.len(), 1);
        assert_eq!(diff.total_additions, 0);
    }

    #[test]
    fn test_file_limit_drains() {
        let mut parser = DiffParser::new(ParseOptions {
            max_files: 1,
            ..ParseOptions::default()
        });
        assert_eq!(parser.feed("diff --git a/x b/x", false).unwrap(), Flow::Continue);
        assert_eq!(parser.feed("index 1111111..2222222", false).unwrap(), Flow::Continue);
        assert_eq!(parser.feed("diff --git a/y b/y", false).unwrap(), Flow::Drain);
        // Even a malformed line is ignored once draining.
        assert_eq!(parser.feed("index nope", false).unwrap(), Flow::Drain);

        let diff = parser.finish();
        assert_eq!(diff.files.len(), 1);
        assert!(diff.is_incomplete);
    }

    #[test]
    fn test_line_limit_skips_rest_of_file_only() {
        let diff = run(
            "diff --git a/big b/big\nindex 1111111..2222222\n@@ -1,2 +1,2 @@\n-a\n+b\n@@ -9 +9 @@\n-c\n+d\ndiff --git a/small b/small\nindex 3333333..4444444\n@@ -1 +1 @@\n-e\n+f\n",
            ParseOptions {
                max_lines_per_file: 1,
                ..ParseOptions::default()
            },
        )
        .unwrap();

        assert!(diff.is_incomplete);
        let big = &diff.files[0];
        assert!(big.is_incomplete);
        assert_eq!(big.sections.len(), 1);
        assert_eq!(big.num_additions, 1);
        let small = &diff.files[1];
        assert!(!small.is_incomplete);
        assert_eq!(small.num_additions, 1);
        assert_eq!(diff.total_additions, 2);
    }

    #[test]
    fn test_line_limit_reached_exactly_keeps_file_complete() {
        let diff = run(
            "diff --git a/x b/x\nindex 1111111..2222222\n@@ -1 +1 @@\n-a\n+b\n@@ -9 +9 @@\n-c\n+d\n",
            ParseOptions {
                max_lines_per_file: 2,
                ..ParseOptions::default()
            },
        )
        .unwrap();

        let file = &diff.files[0];
        assert!(!file.is_incomplete);
        assert!(!diff.is_incomplete);
        assert_eq!(file.sections.len(), 2);
        assert_eq!(file.num_additions, 2);
        assert_eq!(file.line_count(), 4);
    }

    #[test]
    fn test_line_limit_exceeded_by_earlier_hunks() {
        let diff = run(
            "diff --git a/x b/x\nindex 1111111..2222222\n@@ -1,2 +1,2 @@\n a\n-b\n+c\n@@ -9 +9 @@\n-d\n+e\n",
            ParseOptions {
                max_lines_per_file: 2,
                ..ParseOptions::default()
            },
        )
        .unwrap();

        let file = &diff.files[0];
        assert!(file.is_incomplete);
        assert!(diff.is_incomplete);
        assert_eq!(file.sections.len(), 1);
        assert_eq!(file.line_count(), 3);
    }

    #[test]
    fn test_overlong_line_truncates_section() {
        let mut parser = DiffParser::new(ParseOptions {
            max_line_chars: 10,
            ..ParseOptions::default()
        });
        for line in ["diff --git a/x b/x", "index 1111111..2222222", "@@ -1,3 +1,3 @@", " keep"] {
            parser.feed(line, false).unwrap();
        }
        parser.feed("+this line is far too long", true).unwrap();
        parser.feed("+dropped", false).unwrap();
        parser.feed("diff --git a/y b/y", false).unwrap();
        parser.feed("@@ -1 +1 @@", false).unwrap();
        parser.feed("+kept", false).unwrap();

        let diff = parser.finish();
        assert!(diff.is_incomplete);
        let x = &diff.files[0];
        assert!(x.is_incomplete);
        assert_eq!(x.sections.len(), 1);
        assert_eq!(x.sections[0].lines.len(), 2);
        assert_eq!(x.num_additions, 0);
        assert!(!diff.files[1].is_incomplete);
        assert_eq!(diff.files[1].num_additions, 1);
    }

    #[test]
    fn test_totals_match_file_sums() {
        let diff = run(
            "diff --git a/a b/a\nindex 1111111..2222222\n@@ -1,2 +1,3 @@\n a\n+b\n+c\n-d\ndiff --git a/e b/e\nindex 3333333..4444444\n@@ -4,2 +4 @@\n-f\n-g\n+h\n",
            ParseOptions::default(),
        )
        .unwrap();

        let additions: usize = diff.files.iter().map(|f| f.num_additions).sum();
        let deletions: usize = diff.files.iter().map(|f| f.num_deletions).sum();
        assert_eq!(diff.total_additions, additions);
        assert_eq!(diff.total_deletions, deletions);
        assert_eq!((additions, deletions), (3, 3));
    }

    #[test]
    fn test_parsed_section_pairs_replacement() {
        let diff = run(
            "diff --git a/x b/x\nindex 1111111..2222222\n@@ -4,3 +4,3 @@\n a\n-b\n+c\n d\n",
            ParseOptions::default(),
        )
        .unwrap();
        let section = &diff.files[0].sections[0];

        let added = section.line(LineKind::Addition, 5).unwrap();
        assert_eq!((added.kind, added.right_line), (LineKind::Addition, 5));
        let deleted = section.line(LineKind::Deletion, 5).unwrap();
        assert_eq!((deleted.kind, deleted.left_line), (LineKind::Deletion, 5));
    }

    #[test]
    fn test_reparse_reproduces_line_numbers() {
        let input = "diff --git a/a b/a\nindex 1111111..2222222\n@@ -3,4 +3,4 @@\n a\n-b\n+c\n d\n-e\n";
        let first = run(input, ParseOptions::default()).unwrap();

        let mut serialized = String::from("diff --git a/a b/a\n");
        for line in &first.files[0].sections[0].lines {
            serialized.push_str(&line.content);
            serialized.push('\n');
        }
        let second = run(&serialized, ParseOptions::default()).unwrap();

        assert_eq!(
            kinds(&first.files[0].sections[0]),
            kinds(&second.files[0].sections[0])
        );
    }
}
