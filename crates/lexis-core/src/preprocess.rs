const BOM: char = '\u{feff}';

/// Drop a leading byte-order mark. Only the first line of a stream has one.
pub fn strip_bom(line: &str) -> &str {
    line.strip_prefix(BOM).unwrap_or(line)
}

/// Per-stream line preparation: the BOM is stripped exactly once
#[derive(Debug, Default)]
pub struct LinePreprocessor {
    seen_first: bool,
}

impl LinePreprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process<'a>(&mut self, line: &'a str) -> &'a str {
        if self.seen_first {
            return line;
        }
        self.seen_first = true;
        strip_bom(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_from_first_line_only() {
        let mut pre = LinePreprocessor::new();
        assert_eq!(pre.process("\u{feff}word"), "word");
        assert_eq!(pre.process("\u{feff}other"), "\u{feff}other");
    }

    #[test]
    fn first_line_without_bom_is_untouched() {
        let mut pre = LinePreprocessor::new();
        assert_eq!(pre.process("word add"), "word add");
        assert_eq!(pre.process("\u{feff}x"), "\u{feff}x");
    }
}
