//! Line edits meant to be bound to editor keys.
//!
//! Line numbers are 0-based indices into the file's lines. The file helpers
//! read a file, apply one edit and write it back.

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Marker carried by every inserted debug print.
pub const DEBUG_MARKER: &str = "wackydebugoutput";

/// Default debug print; `{name}` and `{n}` are substituted.
pub const DEFAULT_DEBUG_TEMPLATE: &str = "println!(\"wackydebugoutput {name} {n}\");";

/// A function body ends at a line starting with `}`.
fn ends_function(line: &str) -> bool {
    line.starts_with('}')
}

fn check_line(lines: &[String], line: usize) -> Result<()> {
    if line >= lines.len() {
        return Err(Error::LineOutOfRange {
            line,
            len: lines.len(),
        });
    }
    Ok(())
}

fn check_range(lines: &[String], start: usize, end: usize) -> Result<()> {
    if end < start {
        return Err(Error::BadRange { start, end });
    }
    check_line(lines, end)
}

/// Insert a numbered debug print after every line from `start` containing
/// a brace, until the end of the function.
pub fn insert_debug_prints(
    lines: &mut Vec<String>,
    start: usize,
    name: &str,
    template: &str,
) -> Result<usize> {
    check_line(lines, start)?;

    let mut n = 0;
    let mut i = start;
    while i < lines.len() {
        let line = &lines[i];
        if ends_function(line) {
            break;
        }
        if line.contains('{') || line.contains('}') {
            let print = template
                .replace("{name}", name)
                .replace("{n}", &n.to_string());
            lines.insert(i + 1, print);
            n += 1;
            i += 1;
        }
        i += 1;
    }
    Ok(n)
}

/// Remove debug prints from `start` until the end of the function.
pub fn remove_debug_prints(lines: &mut Vec<String>, start: usize) -> Result<usize> {
    check_line(lines, start)?;

    let mut removed = 0;
    let mut i = start;
    while i < lines.len() && !ends_function(&lines[i]) {
        if lines[i].contains(DEBUG_MARKER) {
            lines.remove(i);
            removed += 1;
        } else {
            i += 1;
        }
    }
    Ok(removed)
}

/// Right-pad lines in `start..=end` shorter than `width` characters.
pub fn pad_to_column(lines: &mut [String], start: usize, end: usize, width: usize) -> Result<()> {
    check_range(lines, start, end)?;
    for line in &mut lines[start..=end] {
        let len = line.chars().count();
        if len < width {
            line.push_str(&" ".repeat(width - len));
        }
    }
    Ok(())
}

/// Within `start..=end`, drop the first line and every second one after it.
pub fn remove_every_other(lines: &mut Vec<String>, start: usize, end: usize) -> Result<()> {
    check_range(lines, start, end)?;
    let kept: Vec<String> = lines
        .drain(start..=end)
        .enumerate()
        .filter(|(i, _)| i % 2 == 1)
        .map(|(_, l)| l)
        .collect();
    lines.splice(start..start, kept);
    Ok(())
}

/// Read `path`, apply `edit` to its lines and write them back.
pub fn edit_file<P, F, T>(path: P, edit: F) -> Result<T>
where
    P: AsRef<Path>,
    F: FnOnce(&mut Vec<String>) -> Result<T>,
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let mut lines: Vec<String> = text.lines().map(String::from).collect();
    let out = edit(&mut lines)?;

    let mut text = lines.join("\n");
    text.push('\n');
    fs::write(path, text)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "\
fn other() {
}

fn parse(lines: &[String]) -> usize {
    let mut n = 0;
    for line in lines {
        if line.is_empty() {
            continue;
        }
        n += 1;
    }
    n
}
";

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    #[test]
    fn test_insert_and_remove_debug_prints() {
        let mut src = lines(SOURCE);
        let inserted = insert_debug_prints(&mut src, 3, "parse", DEFAULT_DEBUG_TEMPLATE).unwrap();
        assert_eq!(inserted, 5);
        assert_eq!(src[4], "println!(\"wackydebugoutput parse 0\");");
        assert_eq!(src[7], "println!(\"wackydebugoutput parse 1\");");
        assert_eq!(src[src.len() - 3], "println!(\"wackydebugoutput parse 4\");");
        // the function above is untouched
        assert_eq!(src[1], "}");

        let removed = remove_debug_prints(&mut src, 3).unwrap();
        assert_eq!(removed, 5);
        assert_eq!(src, lines(SOURCE));
    }

    #[test]
    fn test_line_out_of_range() {
        let mut src = lines(SOURCE);
        assert!(matches!(
            insert_debug_prints(&mut src, 99, "x", DEFAULT_DEBUG_TEMPLATE),
            Err(Error::LineOutOfRange { line: 99, .. })
        ));
        assert!(matches!(
            pad_to_column(&mut src, 3, 1, 10),
            Err(Error::BadRange { .. })
        ));
    }

    #[test]
    fn test_pad_to_column() {
        let mut src = lines("ab\nabcdef\nx\n");
        pad_to_column(&mut src, 0, 1, 4).unwrap();
        assert_eq!(src, vec!["ab  ", "abcdef", "x"]);
    }

    #[test]
    fn test_remove_every_other() {
        let mut src = lines("0\n1\n2\n3\n4\n5\n6");
        remove_every_other(&mut src, 1, 5).unwrap();
        assert_eq!(src, vec!["0", "2", "4", "6"]);
    }

    #[test]
    fn test_edit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.rs");
        fs::write(&path, "a\nb\nc\n").unwrap();
        edit_file(&path, |lines| remove_every_other(lines, 0, 2)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "b\n");
    }
}
