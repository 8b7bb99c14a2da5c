//! Numbered file mirroring.
//!
//! Frames named `prefix{N}suffix` for `N` in `min..=max` are copied in
//! reverse to `max + 1` onwards, so the sequence plays forward and then
//! back again.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::Result;

/// The number in a file name of the form `prefix{N}suffix`.
fn frame_number(name: &str, prefix: &str, suffix: &str) -> Option<u64> {
    let middle = name.strip_prefix(prefix)?.strip_suffix(suffix)?;
    if middle.is_empty() || !middle.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    middle.parse().ok()
}

/// Numbered frames in `dir`, sorted by number.
pub fn find_frames<P: AsRef<Path>>(dir: P, prefix: &str, suffix: &str) -> Result<Vec<(u64, PathBuf)>> {
    let dir = dir.as_ref();
    let pattern = Path::new(&Pattern::escape(&dir.to_string_lossy())).join(format!(
        "{}*{}",
        Pattern::escape(prefix),
        Pattern::escape(suffix)
    ));

    let mut frames = Vec::new();
    for path in glob::glob(&pattern.to_string_lossy())? {
        let path = path?;
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(n) = frame_number(name, prefix, suffix) {
            frames.push((n, path));
        }
    }
    frames.sort();
    Ok(frames)
}

/// Copy frames `max..=min` to `max + 1` onwards, returning the new paths.
///
/// Numbers missing from the sequence are skipped without leaving a gap.
pub fn mirror_numbered<P: AsRef<Path>>(dir: P, prefix: &str, suffix: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let frames = find_frames(dir, prefix, suffix)?;
    let Some(&(max, _)) = frames.last() else {
        log::warn!("no frames matching {}N{} in {}", prefix, suffix, dir.display());
        return Ok(Vec::new());
    };

    let mut written = Vec::with_capacity(frames.len());
    for (i, (_, source)) in frames.iter().rev().enumerate() {
        let target = dir.join(format!("{}{}{}", prefix, max + 1 + i as u64, suffix));
        fs::copy(source, &target)?;
        log::debug!("{} -> {}", source.display(), target.display());
        written.push(target);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_number() {
        assert_eq!(frame_number("frame12.png", "frame", ".png"), Some(12));
        assert_eq!(frame_number("frame.png", "frame", ".png"), None);
        assert_eq!(frame_number("frame1a.png", "frame", ".png"), None);
        assert_eq!(frame_number("other3.png", "frame", ".png"), None);
    }

    #[test]
    fn test_mirror_numbered() {
        let dir = tempfile::tempdir().unwrap();
        for n in [1, 2, 4] {
            fs::write(dir.path().join(format!("f{}.txt", n)), n.to_string()).unwrap();
        }
        fs::write(dir.path().join("fx.txt"), "skip").unwrap();

        let written = mirror_numbered(dir.path(), "f", ".txt").unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["f5.txt", "f6.txt", "f7.txt"]);

        let read = |n: u32| fs::read_to_string(dir.path().join(format!("f{}.txt", n))).unwrap();
        assert_eq!(read(5), "4");
        assert_eq!(read(6), "2");
        assert_eq!(read(7), "1");
    }

    #[test]
    fn test_mirror_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(mirror_numbered(dir.path(), "f", ".txt").unwrap().is_empty());
    }
}
