//! CSV column helpers.

use std::fs;
use std::path::Path;

use crate::Result;

/// The last comma-separated field of every line.
pub fn last_column(text: &str) -> Vec<&str> {
    text.lines()
        .map(|line| line.rsplit(',').next().unwrap_or(line))
        .collect()
}

/// Write the last column of `input` to `output`, returning the line count.
pub fn last_column_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<usize> {
    let text = fs::read_to_string(input)?;
    let column = last_column(&text);
    let mut out = column.join("\n");
    out.push('\n');
    fs::write(output, out)?;
    Ok(column.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_column() {
        assert_eq!(last_column("a,b,c\nd\n,e\nf,\n"), vec!["c", "d", "e", ""]);
    }

    #[test]
    fn test_last_column_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "name,qty\nrice,2\n").unwrap();

        assert_eq!(last_column_file(&input, &output).unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "qty\n2\n");
        assert!(last_column_file(dir.path().join("missing.csv"), &output).is_err());
    }
}
