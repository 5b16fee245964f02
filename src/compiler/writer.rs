use std::io::{self, Write};

/// Spaces added per indentation level.
pub const INDENT_STEP: usize = 4;

/// Buffers output until a full line has formed, then writes it to the sink.
///
/// Indentation is applied when a fragment starts a fresh line. A fragment
/// spanning several lines has every one of its lines indented.
#[derive(Debug)]
pub struct LineWriter<W: Write> {
    sink: W,
    pending: String,
    indent_level: usize,
}

impl<W: Write> LineWriter<W> {
    pub fn new(sink: W) -> Self {
        LineWriter {
            sink,
            pending: String::new(),
            indent_level: 0,
        }
    }

    fn indented(&self, line: &str) -> String {
        format!("{}{}", " ".repeat(self.indent_level), line)
    }

    /// Appends `fragment`, indenting it when `indent` is set and it starts a line.
    pub fn output(&mut self, fragment: &str, indent: bool) -> io::Result<()> {
        if indent && self.pending.is_empty() {
            if fragment.trim_end_matches('\n').contains('\n') {
                let lines: Vec<String> = fragment
                    .lines()
                    .map(|line| self.indented(line).trim_end().to_string())
                    .collect();
                self.pending.push_str(&lines.join("\n"));
                if fragment.ends_with('\n') {
                    self.pending.push('\n');
                }
            } else {
                let line = self.indented(fragment);
                self.pending.push_str(&line);
            }
        } else {
            self.pending.push_str(fragment);
        }

        if self.pending.ends_with('\n') {
            log::trace!("flushing {} bytes", self.pending.len());
            self.sink.write_all(self.pending.as_bytes())?;
            self.pending.clear();
        }
        Ok(())
    }

    pub fn indent(&mut self) {
        self.indent_level += INDENT_STEP;
    }

    pub fn outdent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(INDENT_STEP);
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Writes any unterminated remainder and hands back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        if !self.pending.is_empty() {
            self.sink.write_all(self.pending.as_bytes())?;
            self.pending.clear();
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}
