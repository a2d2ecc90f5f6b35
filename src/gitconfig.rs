//! Lossless reader and writer for Git's INI-style configuration files.
//!
//! Every physical line is kept exactly as it was read, so text that is not
//! touched gets written back byte-for-byte. A section owns its header line
//! and every line up to the next header; lines before the first header make
//! up the preamble.

use std::fmt;

/// Indentation of entries written by this crate
const ENTRY_INDENT: &str = "    ";

/// Parsed configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    preamble: Vec<String>,
    sections: Vec<Section>,
}

/// One `[name "subsection"]` block together with its raw lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    subsection: Option<String>,
    header: String,
    /// Offset in `header` where an entry written after `]` starts
    inline_at: usize,
    body: Vec<String>,
}

impl ConfigFile {
    /// Parses config text. Lines that are neither headers nor entries are
    /// kept as-is, so parsing never fails.
    pub fn parse(text: &str) -> Self {
        let mut file = ConfigFile::default();

        for line in text.split_inclusive('\n') {
            if let Some((name, subsection, inline_at)) = parse_header(line) {
                file.sections.push(Section {
                    name,
                    subsection,
                    header: line.to_string(),
                    inline_at,
                    body: Vec::new(),
                });
                continue;
            }

            match file.sections.last_mut() {
                Some(section) => section.body.push(line.to_string()),
                None => file.preamble.push(line.to_string()),
            }
        }

        file
    }

    /// Sections in file order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Whether the file has no lines at all
    pub fn is_empty(&self) -> bool {
        self.preamble.is_empty() && self.sections.is_empty()
    }

    /// Returns the last value of `key` across all sections matching
    /// `name` and `subsection`
    pub fn get(&self, name: &str, subsection: Option<&str>, key: &str) -> Option<String> {
        self.sections
            .iter()
            .filter(|section| section.matches(name, subsection))
            .filter_map(|section| section.get(key))
            .last()
    }

    /// Appends a section, separated from existing content by one blank line
    pub fn append_section(&mut self, section: Section) {
        if !self.is_empty() {
            if let Some(line) = self.last_line_mut() {
                if !line.ends_with('\n') {
                    line.push('\n');
                }
            }
            self.tail_mut().push("\n".to_string());
        }
        self.sections.push(section);
    }

    /// Removes every section matching `predicate` and returns how many went.
    ///
    /// When the last section is removed, blank lines left dangling at the new
    /// end of the file are dropped as well.
    pub fn remove_sections<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&Section) -> bool,
    {
        let before = self.sections.len();
        let last_removed = self.sections.last().is_some_and(|section| predicate(section));

        self.sections.retain(|section| !predicate(section));

        let removed = before - self.sections.len();
        if removed > 0 && last_removed {
            let tail = self.tail_mut();
            while tail.last().is_some_and(|line| line.trim().is_empty()) {
                tail.pop();
            }
        }
        removed
    }

    fn tail_mut(&mut self) -> &mut Vec<String> {
        match self.sections.last_mut() {
            Some(section) => &mut section.body,
            None => &mut self.preamble,
        }
    }

    fn last_line_mut(&mut self) -> Option<&mut String> {
        match self.sections.last_mut() {
            Some(section) => Some(section.body.last_mut().unwrap_or(&mut section.header)),
            None => self.preamble.last_mut(),
        }
    }
}

impl fmt::Display for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.preamble {
            f.write_str(line)?;
        }
        for section in &self.sections {
            f.write_str(&section.header)?;
            for line in &section.body {
                f.write_str(line)?;
            }
        }
        Ok(())
    }
}

impl Section {
    /// Builds a new section with an empty body
    pub fn new(name: &str, subsection: Option<&str>) -> Self {
        let header = match subsection {
            Some(sub) => format!("[{name} \"{}\"]\n", escape_subsection(sub)),
            None => format!("[{name}]\n"),
        };

        Section {
            name: name.to_string(),
            subsection: subsection.map(str::to_string),
            inline_at: header.len(),
            header,
            body: Vec::new(),
        }
    }

    /// Adds a `key = value` line, quoting the value when Git would need it
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.body
            .push(format!("{ENTRY_INDENT}{key} = {}\n", format_value(value)));
        self
    }

    /// Section name as written in the header
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Quoted subsection with escapes resolved, if any
    pub fn subsection(&self) -> Option<&str> {
        self.subsection.as_deref()
    }

    /// Section names compare case-insensitively, subsections exactly
    pub fn matches(&self, name: &str, subsection: Option<&str>) -> bool {
        self.name.eq_ignore_ascii_case(name) && self.subsection.as_deref() == subsection
    }

    /// Key/value pairs in file order, comments and blank lines skipped.
    /// An entry sharing the header line comes first.
    pub fn entries(&self) -> impl Iterator<Item = (&str, String)> {
        std::iter::once(&self.header[self.inline_at..])
            .chain(self.body.iter().map(String::as_str))
            .filter_map(parse_entry)
    }

    /// Last value of `key`; keys compare case-insensitively
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries()
            .filter(|(entry_key, _)| entry_key.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
            .last()
    }
}

/// Returns name, subsection and the offset just past the closing `]`
fn parse_header(line: &str) -> Option<(String, Option<String>, usize)> {
    let rest = line.trim_start().strip_prefix('[')?;
    let name_end = rest.find(|c: char| c.is_whitespace() || c == '"' || c == ']')?;
    let name = &rest[..name_end];
    if name.is_empty() {
        return None;
    }

    let rest = rest[name_end..].trim_start();
    if let Some(after) = rest.strip_prefix(']') {
        let inline_at = line.len() - after.len();
        // Legacy `[section.subsection]` form
        return Some(match name.split_once('.') {
            Some((section, sub)) => (section.to_string(), Some(sub.to_string()), inline_at),
            None => (name.to_string(), None, inline_at),
        });
    }

    let mut chars = rest.strip_prefix('"')?.chars();
    let mut subsection = String::new();
    loop {
        match chars.next()? {
            '\\' => subsection.push(chars.next()?),
            '"' => break,
            c => subsection.push(c),
        }
    }

    let after = chars.as_str().trim_start().strip_prefix(']')?;
    Some((name.to_string(), Some(subsection), line.len() - after.len()))
}

fn parse_entry(line: &str) -> Option<(&str, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
        return None;
    }

    match trimmed.split_once('=') {
        Some((key, raw_value)) => Some((key.trim(), parse_value(raw_value))),
        // A bare key is boolean shorthand for `key = true`
        None => Some((trimmed, "true".to_string())),
    }
}

fn parse_value(raw: &str) -> String {
    let mut value = String::new();
    // Length that survives trimming of unquoted trailing whitespace
    let mut keep = 0;
    let mut in_quotes = false;
    let mut chars = raw.trim_start().chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                keep = value.len();
            }
            '\\' => {
                let escaped = match chars.next() {
                    Some('n') => '\n',
                    Some('t') => '\t',
                    Some('b') => '\u{8}',
                    Some(other) => other,
                    None => break,
                };
                value.push(escaped);
                keep = value.len();
            }
            '#' | ';' if !in_quotes => break,
            c => {
                value.push(c);
                if in_quotes || !c.is_whitespace() {
                    keep = value.len();
                }
            }
        }
    }

    value.truncate(keep);
    value
}

fn format_value(value: &str) -> String {
    let needs_quotes = value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.contains(&['#', ';', '"', '\\', '\n'][..]);
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn escape_subsection(subsection: &str) -> String {
    subsection.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# global settings
[core]
\teditor = vim
[user]
    name = Someone
    email = someone@example.com ; work address

[includeIf \"gitdir:/repos/alpha/\"]
    path = /repos/alpha/.gitconfig
";

    #[test]
    fn parse_round_trips_text_exactly() {
        let file = ConfigFile::parse(SAMPLE);
        assert_eq!(file.to_string(), SAMPLE);

        let no_newline = "[user]\n\tname = x";
        assert_eq!(ConfigFile::parse(no_newline).to_string(), no_newline);
    }

    #[test]
    fn parse_reads_headers_and_subsections() {
        let file = ConfigFile::parse(SAMPLE);
        let headers: Vec<(&str, Option<&str>)> = file
            .sections()
            .iter()
            .map(|section| (section.name(), section.subsection()))
            .collect();

        assert_eq!(
            headers,
            vec![
                ("core", None),
                ("user", None),
                ("includeIf", Some("gitdir:/repos/alpha/")),
            ]
        );
    }

    #[test]
    fn parse_reads_legacy_and_escaped_headers() {
        let file = ConfigFile::parse("[branch.main]\n[remote \"a \\\"b\\\"\"]\n[broken\n");
        assert_eq!(file.sections().len(), 2);
        assert!(file.sections()[0].matches("branch", Some("main")));
        assert!(file.sections()[1].matches("remote", Some("a \"b\"")));
        // the malformed header stays in the body of the previous section
        assert_eq!(file.to_string(), "[branch.main]\n[remote \"a \\\"b\\\"\"]\n[broken\n");
    }

    #[test]
    fn get_handles_comments_quotes_and_case() {
        let file = ConfigFile::parse(SAMPLE);
        assert_eq!(file.get("USER", None, "Name").as_deref(), Some("Someone"));
        assert_eq!(
            file.get("user", None, "email").as_deref(),
            Some("someone@example.com")
        );
        assert_eq!(file.get("user", None, "signingkey"), None);

        let quoted = ConfigFile::parse("[user]\n  name = \" Ada # L \\\"x\\\" \" # note\n");
        assert_eq!(
            quoted.get("user", None, "name").as_deref(),
            Some(" Ada # L \"x\" ")
        );
    }

    #[test]
    fn get_reads_entry_on_header_line() {
        let text = "[user] name = x\n\temail = x@example.com\n[core] # editor settings\n";
        let file = ConfigFile::parse(text);

        assert_eq!(file.get("user", None, "name").as_deref(), Some("x"));
        assert_eq!(file.get("user", None, "email").as_deref(), Some("x@example.com"));
        assert_eq!(file.sections()[1].entries().count(), 0);
        assert_eq!(file.to_string(), text);

        let quoted = ConfigFile::parse("[includeIf \"gitdir:/a/\"] path = /a/.gitconfig\n");
        assert_eq!(
            quoted.get("includeIf", Some("gitdir:/a/"), "path").as_deref(),
            Some("/a/.gitconfig")
        );
    }

    #[test]
    fn get_returns_last_value_across_sections() {
        let file = ConfigFile::parse("[user]\nname = a\n[core]\n[user]\nname = b\n");
        assert_eq!(file.get("user", None, "name").as_deref(), Some("b"));
    }

    #[test]
    fn empty_value_is_written_and_read_verbatim() {
        let section = Section::new("user", None).with_entry("name", "");
        let mut file = ConfigFile::default();
        file.append_section(section);

        assert_eq!(file.to_string(), "[user]\n    name = \n");
        assert_eq!(file.get("user", None, "name").as_deref(), Some(""));
    }

    #[test]
    fn special_values_are_quoted_on_write() {
        let mut file = ConfigFile::default();
        file.append_section(Section::new("user", None).with_entry("name", "a;b \"c\""));

        assert_eq!(file.to_string(), "[user]\n    name = \"a;b \\\"c\\\"\"\n");
        let reread = ConfigFile::parse(&file.to_string());
        assert_eq!(reread.get("user", None, "name").as_deref(), Some("a;b \"c\""));
    }

    #[test]
    fn append_to_empty_file_adds_no_separator() {
        let mut file = ConfigFile::parse("");
        file.append_section(Section::new("includeIf", Some("gitdir:/a/")).with_entry("path", "/a/.gitconfig"));
        assert_eq!(
            file.to_string(),
            "[includeIf \"gitdir:/a/\"]\n    path = /a/.gitconfig\n"
        );
    }

    #[test]
    fn append_separates_with_blank_line_and_fixes_missing_newline() {
        let mut file = ConfigFile::parse("[core]\n\tbare = false");
        file.append_section(Section::new("user", None).with_entry("name", "x"));
        assert_eq!(
            file.to_string(),
            "[core]\n\tbare = false\n\n[user]\n    name = x\n"
        );

        let mut header_only = ConfigFile::parse("[core]");
        header_only.append_section(Section::new("user", None));
        assert_eq!(header_only.to_string(), "[core]\n\n[user]\n");
    }

    #[test]
    fn remove_last_section_trims_separator() {
        let original = "[core]\n\tbare = false\n";
        let mut file = ConfigFile::parse(original);
        file.append_section(Section::new("includeIf", Some("gitdir:/a/")).with_entry("path", "/a/.gitconfig"));

        let removed = file.remove_sections(|section| section.matches("includeif", Some("gitdir:/a/")));
        assert_eq!(removed, 1);
        assert_eq!(file.to_string(), original);
    }

    #[test]
    fn remove_middle_section_keeps_neighbours() {
        let mut file = ConfigFile::parse(SAMPLE);
        let removed = file.remove_sections(|section| section.matches("user", None));

        assert_eq!(removed, 1);
        assert_eq!(
            file.to_string(),
            "# global settings\n[core]\n\teditor = vim\n[includeIf \"gitdir:/repos/alpha/\"]\n    path = /repos/alpha/.gitconfig\n"
        );
    }

    #[test]
    fn remove_without_match_changes_nothing() {
        let mut file = ConfigFile::parse(SAMPLE);
        assert_eq!(file.remove_sections(|section| section.matches("alias", None)), 0);
        assert_eq!(file.to_string(), SAMPLE);
    }
}
