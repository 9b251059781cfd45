//! ATX heading splitter.
//!
//! Splits a markdown document into [`Section`]s, one per heading plus an
//! optional leading section (level 0, empty heading) for content that
//! precedes the first heading.
//!
//! A heading line is 1–6 `#` characters at the very start of the line,
//! at least one whitespace character, then non-blank heading text.
//! Setext headings (`===`/`---` underlines) are not recognized.
//!
//! Fenced code blocks are not tracked: a `# comment` line inside a ```
//! fence starts a new section like any other heading line.

use tracing::debug;

use crate::models::Section;

/// Parse a single line as an ATX heading, returning `(level, heading)`.
///
/// ```rust
/// use mdchunk_core::headings::parse_heading;
///
/// assert_eq!(parse_heading("## Install"), Some((2, "Install")));
/// assert_eq!(parse_heading("#hashtag"), None);
/// assert_eq!(parse_heading("####### seven"), None);
/// ```
pub fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }

    let rest = &line[hashes..];
    let after = rest.trim_start();
    if after.len() == rest.len() {
        return None;
    }

    let heading = after.trim_end();
    if heading.is_empty() {
        None
    } else {
        Some((hashes as u8, heading))
    }
}

/// Section being accumulated while scanning lines.
struct OpenSection<'a> {
    heading: &'a str,
    level: u8,
    lines: Vec<&'a str>,
}

impl<'a> OpenSection<'a> {
    fn leading() -> Self {
        Self {
            heading: "",
            level: 0,
            lines: Vec::new(),
        }
    }

    fn start(level: u8, heading: &'a str, line: &'a str) -> Self {
        Self {
            heading,
            level,
            lines: vec![line],
        }
    }

    /// Finish the section, dropping it when it holds only blank lines.
    fn close(self) -> Option<Section> {
        let first = self.lines.iter().position(|l| !l.trim().is_empty())?;
        let last = self.lines.iter().rposition(|l| !l.trim().is_empty())?;
        Some(Section {
            heading: self.heading.to_string(),
            level: self.level,
            text: self.lines[first..=last].join("\n"),
        })
    }
}

/// Split a document into sections in document order.
///
/// Runs in a single pass over the lines (split on `\n`). Each section's
/// text includes its own heading line and has leading and trailing blank
/// lines removed. A document with no non-blank content yields no sections.
pub fn split_sections(markdown: &str) -> Vec<Section> {
    let (mut sections, open) = markdown.split('\n').fold(
        (Vec::<Section>::new(), OpenSection::leading()),
        |(mut sections, mut open), line| match parse_heading(line) {
            Some((level, heading)) => {
                sections.extend(open.close());
                (sections, OpenSection::start(level, heading, line))
            }
            None => {
                open.lines.push(line);
                (sections, open)
            }
        },
    );
    sections.extend(open.close());

    debug!(sections = sections.len(), "split document by headings");
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heading_levels() {
        for level in 1..=6u8 {
            let line = format!("{} Title", "#".repeat(level as usize));
            assert_eq!(parse_heading(&line), Some((level, "Title")));
        }
    }

    #[test]
    fn test_parse_heading_rejects_non_headings() {
        assert_eq!(parse_heading("####### Too deep"), None);
        assert_eq!(parse_heading("#NoSpace"), None);
        assert_eq!(parse_heading("#   "), None);
        assert_eq!(parse_heading("  # indented"), None);
        assert_eq!(parse_heading("plain text"), None);
        assert_eq!(parse_heading(""), None);
    }

    #[test]
    fn test_parse_heading_whitespace_variants() {
        assert_eq!(parse_heading("#\tTabbed"), Some((1, "Tabbed")));
        assert_eq!(parse_heading("##   Spaced out  "), Some((2, "Spaced out")));
        assert_eq!(parse_heading("### C# notes"), Some((3, "C# notes")));
    }

    #[test]
    fn test_two_headings() {
        let sections = split_sections("# A\ntext1\n\n# B\ntext2");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "A");
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[0].text, "# A\ntext1");
        assert_eq!(sections[1].heading, "B");
        assert_eq!(sections[1].text, "# B\ntext2");
    }

    #[test]
    fn test_leading_content_section() {
        let sections = split_sections("Intro line.\n\n## First\nBody");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "");
        assert_eq!(sections[0].level, 0);
        assert_eq!(sections[0].text, "Intro line.");
        assert_eq!(sections[1].level, 2);
    }

    #[test]
    fn test_blank_leading_span_dropped() {
        let sections = split_sections("\n\n   \n# Only\nBody\n\n\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text, "# Only\nBody");
    }

    #[test]
    fn test_empty_document() {
        assert!(split_sections("").is_empty());
        assert!(split_sections("\n \n").is_empty());
    }

    #[test]
    fn test_heading_without_body() {
        let sections = split_sections("# A\n# B\n");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].text, "# A");
        assert_eq!(sections[1].text, "# B");
    }

    #[test]
    fn test_interior_blank_lines_preserved() {
        let sections = split_sections("# A\n\npara one\n\n\npara two\n");
        assert_eq!(sections[0].text, "# A\n\npara one\n\n\npara two");
    }

    #[test]
    fn test_fenced_code_hash_starts_new_section() {
        let doc = "# Script\n```bash\n# install deps\nnpm install\n```\nDone.";
        let sections = split_sections(doc);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].text, "# Script\n```bash");
        assert_eq!(sections[1].heading, "install deps");
        assert_eq!(sections[1].level, 1);
        assert!(sections[1].text.ends_with("```\nDone."));
    }

    #[test]
    fn test_setext_not_recognized() {
        let sections = split_sections("Title\n=====\n\nBody");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].level, 0);
    }

    #[test]
    fn test_sections_reconstruct_document() {
        let doc = "lead\n# A\na body\n## B\nb body";
        let joined = split_sections(doc)
            .into_iter()
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(joined, doc);
    }
}
