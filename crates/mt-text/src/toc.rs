//! Markdown tables of contents.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::Result;

/// A markdown file's title and second-level headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub title: String,
    pub link: String,
    pub sections: Vec<String>,
}

/// GitHub's heading anchor: lower case, spaces to dashes, punctuation dropped.
pub fn anchor(heading: &str) -> String {
    heading
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

fn headings<'a>(text: &'a str, prefix: &str) -> Vec<&'a str> {
    text.lines()
        .filter_map(|l| l.strip_prefix(prefix))
        .map(str::trim)
        .collect()
}

fn link_path(dir: &Path, name: &str) -> String {
    let path: PathBuf = dir.join(name);
    path.strip_prefix(".")
        .unwrap_or(&path)
        .to_string_lossy()
        .into_owned()
}

/// Collect entries for the markdown files directly in `dir`.
///
/// Hidden files and any `readme.md` are skipped; files come in name order.
pub fn collect_entries<P: AsRef<Path>>(dir: P) -> Result<Vec<TocEntry>> {
    let dir = dir.as_ref();
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let lower = name.to_lowercase();
        if name.starts_with('.') || lower == "readme.md" || !lower.ends_with(".md") {
            continue;
        }

        let text = fs::read_to_string(entry.path())?;
        let titles = headings(&text, "# ");
        let title = match titles.as_slice() {
            [only] => only.to_string(),
            _ => name.to_string(),
        };
        entries.push(TocEntry {
            title,
            link: link_path(dir, &name),
            sections: headings(&text, "## ").into_iter().map(String::from).collect(),
        });
    }
    log::debug!("{} markdown files in {}", entries.len(), dir.display());
    Ok(entries)
}

/// Render a numbered table of contents for `dir`.
pub fn table_of_contents<P: AsRef<Path>>(dir: P) -> Result<String> {
    let mut out = String::new();
    for (i, entry) in collect_entries(dir)?.iter().enumerate() {
        out.push_str(&format!("{}. **[{}]({})**\n", i + 1, entry.title, entry.link));
        for section in &entry.sections {
            out.push_str(&format!(
                "    - [{}]({}#{})\n",
                section,
                entry.link,
                anchor(section)
            ));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor() {
        assert_eq!(anchor("Getting Started"), "getting-started");
        assert_eq!(anchor("What's new? (v2)"), "whats-new-v2");
        assert_eq!(anchor("snake_case-ok"), "snake_case-ok");
    }

    #[test]
    fn test_table_of_contents() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "# Bread\n## Sour Dough\n## Rye\n").unwrap();
        fs::write(dir.path().join("a.md"), "no title here\n## Only Section\n").unwrap();
        fs::write(dir.path().join("c.md"), "# One\n# Two\n").unwrap();
        fs::write(dir.path().join("README.md"), "# Skip\n").unwrap();
        fs::write(dir.path().join(".hidden.md"), "# Skip\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "# Skip\n").unwrap();
        fs::create_dir(dir.path().join("sub.md")).unwrap();

        let entries = collect_entries(dir.path()).unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["a.md", "Bread", "c.md"]);

        let toc = table_of_contents(dir.path()).unwrap();
        let lines: Vec<&str> = toc.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("1. **[a.md]("));
        assert!(lines[2].starts_with("2. **[Bread]("));
        assert!(lines[3].ends_with("b.md#sour-dough)"));
        assert!(lines[3].starts_with("    - [Sour Dough]("));
    }

    #[test]
    fn test_link_path() {
        assert_eq!(link_path(Path::new("."), "a.md"), "a.md");
        assert_eq!(link_path(Path::new("notes"), "a.md"), "notes/a.md");
    }
}
