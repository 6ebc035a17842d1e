//! Lecturer list parsing
//!
//! Lecturer lists are plain text with one SINTA author ID per line. Blank
//! lines and lines starting with `#` are ignored.

/// Extracts lecturer IDs from a plain-text list, preserving order
pub fn parse_lecturer_ids(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_comments_and_blank_lines() {
        let text = "# Daftar ID SINTA Dosen\n# Satu ID per baris\n\n6005631\n  6680215  \n\n#6019284\n5975416\n";
        assert_eq!(
            parse_lecturer_ids(text),
            vec!["6005631", "6680215", "5975416"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_lecturer_ids("").is_empty());
        assert!(parse_lecturer_ids("\n  \n# only comments\n").is_empty());
    }

    #[test]
    fn test_handles_crlf() {
        assert_eq!(parse_lecturer_ids("111\r\n222\r\n"), vec!["111", "222"]);
    }
}
