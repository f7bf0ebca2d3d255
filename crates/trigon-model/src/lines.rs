use crate::error::ParseError;

// ── Record ────────────────────────────────────────────────────────────────

/// One data line split into a label and its numeric fields.
///
/// The label is every leading token that does not start a number, lowercased
/// and joined by single spaces: `"diffuse color 1 0 0"` has label
/// `"diffuse color"` and fields `["1", "0", "0"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'s> {
    pub label: String,
    pub fields: Vec<&'s str>,
    /// 1-based source line number.
    pub line: usize,
}

impl<'s> Record<'s> {
    pub fn split(text: &'s str, line: usize) -> Self {
        let mut tokens = text.split_whitespace().peekable();
        let mut label = Vec::new();
        while let Some(tok) = tokens.next_if(|t| !starts_number(t)) {
            label.push(tok.to_ascii_lowercase());
        }
        Self { label: label.join(" "), fields: tokens.collect(), line }
    }

    pub fn error(&self, msg: impl Into<String>) -> ParseError {
        ParseError::new(msg, self.line)
    }

    /// Fails unless the label is one of `accepted`.
    pub fn expect_label(&self, accepted: &[&str]) -> Result<(), ParseError> {
        if accepted.contains(&self.label.as_str()) {
            Ok(())
        } else {
            Err(self.error(format!(
                "expected '{}' line, got label {:?}",
                accepted[0], self.label
            )))
        }
    }

    pub fn expect_field_count(&self, count: usize) -> Result<(), ParseError> {
        if self.fields.len() == count {
            Ok(())
        } else {
            Err(self.error(format!(
                "'{}' line needs {count} numeric fields, found {}",
                self.label,
                self.fields.len()
            )))
        }
    }

    pub fn float(&self, index: usize) -> Result<f32, ParseError> {
        let tok = self.field(index)?;
        tok.parse::<f32>()
            .map_err(|_| self.error(format!("invalid number {tok:?} in '{}' line", self.label)))
    }

    pub fn vec3(&self, first: usize) -> Result<[f32; 3], ParseError> {
        Ok([self.float(first)?, self.float(first + 1)?, self.float(first + 2)?])
    }

    /// Parses a non-negative integer field.
    pub fn index(&self, index: usize) -> Result<usize, ParseError> {
        let tok = self.field(index)?;
        tok.parse::<usize>()
            .map_err(|_| self.error(format!("invalid index {tok:?} in '{}' line", self.label)))
    }

    fn field(&self, index: usize) -> Result<&'s str, ParseError> {
        self.fields
            .get(index)
            .copied()
            .ok_or_else(|| self.error(format!("'{}' line is missing field {}", self.label, index + 1)))
    }
}

fn starts_number(tok: &str) -> bool {
    matches!(tok.chars().next(), Some('0'..='9' | '-' | '+' | '.'))
}

// ── Lines ─────────────────────────────────────────────────────────────────

/// Line cursor over a scene source that tracks line numbers for diagnostics.
pub struct Lines<'s> {
    inner: std::str::Lines<'s>,
    line: usize,
}

impl<'s> Lines<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { inner: src.lines(), line: 0 }
    }

    fn eof(&self, expected: &str) -> ParseError {
        ParseError::new(format!("unexpected end of file, expected {expected}"), self.line + 1)
    }

    /// Returns the next line as-is, blank or not.
    pub fn next_raw(&mut self, expected: &str) -> Result<(usize, &'s str), ParseError> {
        let text = self.inner.next().ok_or_else(|| self.eof(expected))?;
        self.line += 1;
        Ok((self.line, text))
    }

    /// Returns the next line that contains something other than whitespace.
    pub fn next_content(&mut self, expected: &str) -> Result<(usize, &'s str), ParseError> {
        loop {
            let (line, text) = self.next_raw(expected)?;
            if !text.trim().is_empty() {
                return Ok((line, text));
            }
        }
    }

    pub fn next_record(&mut self, expected: &str) -> Result<Record<'s>, ParseError> {
        let (line, text) = self.next_content(expected)?;
        Ok(Record::split(text, line))
    }

    /// Counts the non-blank lines left in the source, consuming them.
    pub fn drain_content(&mut self) -> usize {
        self.inner.by_ref().filter(|l| !l.trim().is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Record::split ─────────────────────────────────────────────────────

    #[test]
    fn split_multi_word_label() {
        let r = Record::split("Diffuse Color 1 0.5 -2", 4);
        assert_eq!(r.label, "diffuse color");
        assert_eq!(r.fields, vec!["1", "0.5", "-2"]);
        assert_eq!(r.line, 4);
    }

    #[test]
    fn split_vertex_label_with_digit() {
        // `v0` starts with a letter, so it stays part of the label.
        let r = Record::split("v0 .5 0 0 0 0 1 2", 1);
        assert_eq!(r.label, "v0");
        assert_eq!(r.fields.len(), 7);
    }

    #[test]
    fn split_label_only() {
        let r = Record::split("face normal", 1);
        assert_eq!(r.label, "face normal");
        assert!(r.fields.is_empty());
    }

    // ── Record fields ─────────────────────────────────────────────────────

    #[test]
    fn index_rejects_negative() {
        let r = Record::split("v0 0 0 0 0 0 0 -1", 9);
        let err = r.index(6).unwrap_err();
        assert_eq!(err.line, 9);
    }

    #[test]
    fn float_rejects_garbage() {
        let r = Record::split("shine 1x", 2);
        assert!(r.float(0).is_err());
    }

    #[test]
    fn missing_field_reports_position() {
        let r = Record::split("diffuse 1 0", 3);
        let err = r.vec3(0).unwrap_err();
        assert!(err.message.contains("missing field 3"));
    }

    // ── Lines ─────────────────────────────────────────────────────────────

    #[test]
    fn next_content_skips_blank_lines() {
        let mut lines = Lines::new("a\n\n   \r\nb\n");
        assert_eq!(lines.next_content("a").unwrap(), (1, "a"));
        assert_eq!(lines.next_content("b").unwrap(), (4, "b"));
    }

    #[test]
    fn eof_points_past_last_line() {
        let mut lines = Lines::new("only\n");
        lines.next_raw("header").unwrap();
        let err = lines.next_raw("count").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("expected count"));
    }
}
