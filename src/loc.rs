//! Line-count estimation over a source tree.
//!
//! A deliberately blunt instrument: walk every regular file under a root,
//! keep the ones whose extension is on the allowlist, and count
//! newline-terminated lines. The result feeds a single "lines of code"
//! bullet in the README — estimation, not analysis. No comment stripping,
//! no language awareness, no blank-line classification.
//!
//! ## Counting Rule
//!
//! Lines = number of `\n` characters, plus one if the content is non-empty
//! and does not end with `\n` (the unterminated last line still counts).
//! An empty file is 0 lines.
//!
//! ## Failure Semantics
//!
//! The scan never aborts because of one bad file: unreadable files are
//! skipped silently and contribute nothing to either counter. Decoding tries
//! UTF-8 first and falls back to Latin-1, which maps every byte sequence, so
//! in practice only I/O errors cause a skip.

use std::path::Path;
use walkdir::WalkDir;

/// Extensions counted toward the line total (matched case-insensitively).
const CODE_EXTENSIONS: &[&str] = &[
    "c", "cc", "cpp", "cs", "css", "go", "h", "hpp", "html", "java", "js", "jsx", "kt", "lua",
    "php", "py", "rb", "rs", "scss", "sh", "sql", "swift", "ts", "tsx", "vue", "zig",
];

/// Accumulated result of scanning one or more trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCount {
    pub total_lines: u64,
    pub files_counted: u64,
}

impl LineCount {
    /// Fold another count into this one. Used when summing across cloned
    /// repositories.
    pub fn absorb(&mut self, other: LineCount) {
        self.total_lines += other.total_lines;
        self.files_counted += other.files_counted;
    }
}

/// Recursively count lines in every allowlisted file under `root`.
pub fn count_tree(root: &Path) -> LineCount {
    let mut count = LineCount::default();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        if !has_counted_extension(entry.path()) {
            continue;
        }
        if let Some(lines) = count_file(entry.path()) {
            count.total_lines += lines;
            count.files_counted += 1;
        }
    }

    count
}

/// Count one file's lines, or `None` when it cannot be read. A `None`
/// contributes to neither counter.
fn count_file(path: &Path) -> Option<u64> {
    let bytes = std::fs::read(path).ok()?;
    Some(count_lines(&decode_text(&bytes)))
}

fn has_counted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| CODE_EXTENSIONS.iter().any(|c| e.eq_ignore_ascii_case(c)))
}

/// Decode file bytes as UTF-8, falling back to Latin-1.
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback cannot fail — garbage in, mojibake out, but the newline count
/// survives intact either way.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Count lines in decoded content: `\n` occurrences, plus one for a
/// non-empty unterminated last line.
fn count_lines(content: &str) -> u64 {
    let newlines = content.matches('\n').count() as u64;
    if !content.is_empty() && !content.ends_with('\n') {
        newlines + 1
    } else {
        newlines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn empty_content_is_zero_lines() {
        assert_eq!(count_lines(""), 0);
    }

    #[test]
    fn trailing_newline_counts_newlines_only() {
        assert_eq!(count_lines("a\nb\n"), 2);
    }

    #[test]
    fn unterminated_last_line_counts() {
        assert_eq!(count_lines("a\nb"), 2);
        assert_eq!(count_lines("x"), 1);
    }

    #[test]
    fn latin1_fallback_preserves_newlines() {
        // 0xFF is invalid UTF-8 but a perfectly good Latin-1 'ÿ'.
        let decoded = decode_text(&[0xFF, b'\n', 0xFE]);
        assert_eq!(count_lines(&decoded), 2);
    }

    #[test]
    fn counts_only_allowlisted_extensions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "one\ntwo\nthree\n").unwrap();
        fs::write(dir.path().join("photo.jpg"), [0u8; 64]).unwrap();

        let count = count_tree(dir.path());
        assert_eq!(count.files_counted, 1);
        assert_eq!(count.total_lines, 1);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Main.RS"), "a\nb\n").unwrap();

        let count = count_tree(dir.path());
        assert_eq!(count.files_counted, 1);
        assert_eq!(count.total_lines, 2);
    }

    #[test]
    fn recurses_into_subdirectories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/deep")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), "x\n").unwrap();
        fs::write(dir.path().join("src/deep/util.py"), "y\nz").unwrap();

        let count = count_tree(dir.path());
        assert_eq!(count.files_counted, 2);
        assert_eq!(count.total_lines, 3);
    }

    #[test]
    fn empty_file_counts_as_file_with_zero_lines() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("empty.go"), "").unwrap();

        let count = count_tree(dir.path());
        assert_eq!(count.files_counted, 1);
        assert_eq!(count.total_lines, 0);
    }

    #[test]
    fn undecodable_bytes_still_count_via_latin1() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blob.c"), [0xC3u8, 0x28, b'\n', 0x80]).unwrap();

        let count = count_tree(dir.path());
        assert_eq!(count.files_counted, 1);
        assert_eq!(count.total_lines, 2);
    }

    #[test]
    fn unreadable_file_contributes_nothing() {
        assert_eq!(count_file(Path::new("/nonexistent/gone.rs")), None);
    }

    #[cfg(unix)]
    #[test]
    fn permission_denied_skips_file_without_aborting() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("ok.rs"), "a\n").unwrap();
        let locked = dir.path().join("locked.rs");
        fs::write(&locked, "b\nc\n").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes; check whether the lock actually holds
        // before asserting on the skip.
        let locked_readable = fs::read(&locked).is_ok();
        let count = count_tree(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

        if locked_readable {
            assert_eq!(count.files_counted, 2);
            assert_eq!(count.total_lines, 3);
        } else {
            assert_eq!(count.files_counted, 1);
            assert_eq!(count.total_lines, 1);
        }
    }

    #[test]
    fn absorb_sums_both_fields() {
        let mut a = LineCount {
            total_lines: 10,
            files_counted: 2,
        };
        a.absorb(LineCount {
            total_lines: 5,
            files_counted: 1,
        });
        assert_eq!(a.total_lines, 15);
        assert_eq!(a.files_counted, 3);
    }
}
