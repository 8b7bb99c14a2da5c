//! Chat log cleanup.
//!
//! Pasted chat logs carry timestamps, blank lines and `@` mentions. Cleaning
//! removes those and turns the lines holding only a speaker's name into
//! bold markdown headings.

use regex::Regex;

use crate::Result;

const TIMESTAMP: &str = r"\[\d{1,2}:\d\d(?:\s[A-Z]{2})?\]";

/// Clean `text`, marking lines that hold only one of `names` as speakers.
pub fn clean_chat(text: &str, names: &[String]) -> Result<String> {
    let timestamps = Regex::new(TIMESTAMP)?;
    let text = timestamps.replace_all(text, "").replace('@', "");

    let mut out: Vec<String> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let trimmed = line.trim_end();
        if names.iter().any(|n| n == trimmed) {
            if !out.is_empty() {
                out.push(String::new());
            }
            out.push(format!("**{}**", trimmed));
        } else {
            out.push(line.to_string());
        }
    }
    Ok(out.join("\n"))
}
