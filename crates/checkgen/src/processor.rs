//! Line-by-line conversion of an IR listing into check lines.

use tracing::{debug, trace};

use crate::banner::Banner;
use crate::config::CheckGenConfig;
use crate::error::{CheckGenError, Result};
use crate::line::{
    escape_filecheck, is_block_label, split_at_sigil, strip_block_comment, substitute_chunks,
};
use crate::namer::ScopeNamer;

/// Padding that aligns plain check lines with `-LABEL` check lines.
const LABEL_PADDING: usize = "-LABEL".len();

/// A group of check lines for one top-level construct. Each entry may span
/// several physical lines (a label followed by its `-SAME` lines).
pub type OutputSegment = Vec<String>;

pub struct LineProcessor<'a> {
    config: &'a CheckGenConfig,
    banner: Option<Banner>,
    namer: ScopeNamer,
    segments: Vec<OutputSegment>,
    line_number: usize,
}

impl<'a> LineProcessor<'a> {
    pub fn new(config: &'a CheckGenConfig) -> Self {
        Self {
            config,
            banner: config.banner.as_deref().map(Banner::new),
            namer: ScopeNamer::new(),
            segments: vec![Vec::new()],
            line_number: 0,
        }
    }

    /// Feed every line of `input` to the processor.
    pub fn process_input(&mut self, input: &str) -> Result<()> {
        for line in input.lines() {
            self.process_line(line)?;
        }
        Ok(())
    }

    pub fn process_line(&mut self, raw_line: &str) -> Result<()> {
        self.line_number += 1;
        let mut input_line = raw_line.trim_end();

        if input_line.is_empty() || self.is_stale_output(input_line) {
            return Ok(());
        }

        // Block labels carry a trailing predecessor comment.
        if is_block_label(input_line) {
            input_line = strip_block_comment(input_line);
        }
        let lstripped = input_line.trim_start();

        let mut cur_level = self.namer.depth();

        if lstripped.starts_with('}') {
            self.namer
                .pop_scope()
                .map_err(|_| CheckGenError::ScopeUnderflow {
                    line_number: self.line_number,
                    line: raw_line.to_string(),
                })?;
            cur_level = self.namer.depth();
            debug!(depth = cur_level, line = self.line_number, "closed scope");
        }

        if input_line.ends_with('{') {
            self.namer.push_scope();
            debug!(
                depth = self.namer.depth(),
                line = self.line_number,
                "opened scope"
            );
            if cur_level == self.config.starts_from_scope {
                debug!(
                    segment = self.segments.len(),
                    line = self.line_number,
                    "starting segment"
                );
                self.segments.push(Vec::new());
            }
        }

        // Omit wrappers above the first checked level, e.g. `module {`.
        if cur_level < self.config.starts_from_scope {
            trace!(line = self.line_number, "skipping line above starting scope");
            return Ok(());
        }

        let segment_is_empty = self.current_segment().is_empty();
        if segment_is_empty {
            self.namer.reset_counter();
        }

        let escaped = escape_filecheck(input_line);
        let ssa_split = split_at_sigil(&escaped);
        let (head, chunks) = ssa_split
            .split_first()
            .map(|(head, rest)| (*head, rest))
            .unwrap_or_default();

        let output_line = if !segment_is_empty || head.is_empty() {
            self.format_plain(raw_line, head, chunks)?
        } else {
            self.format_label(raw_line, head, chunks)?
        };

        trace!(line = self.line_number, output = %output_line, "emitted check");
        self.current_segment_mut().push(output_line);
        Ok(())
    }

    /// Check lines generated so far, grouped by top-level construct.
    pub fn segments(&self) -> &[OutputSegment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<OutputSegment> {
        self.segments
    }

    /// Render the check segments, each preceded by an empty line.
    pub fn finish(self) -> String {
        let mut output = self.banner_text();
        for segment in &self.segments {
            output.push('\n');
            for line in segment {
                output.push_str(line);
            }
        }
        output.push('\n');
        output
    }

    /// Render each check segment followed by the matching source segment.
    pub fn finish_interleaved(self, source_segments: &[Vec<String>]) -> Result<String> {
        if self.segments.len() != source_segments.len() {
            return Err(CheckGenError::SegmentMismatch {
                generated: self.segments.len(),
                source_count: source_segments.len(),
            });
        }

        let mut output = self.banner_text();
        for (check_segment, source_segment) in self.segments.iter().zip(source_segments) {
            for line in check_segment {
                output.push_str(line);
            }
            for line in source_segment {
                output.push_str(line);
                output.push('\n');
            }
        }
        Ok(output)
    }

    pub(crate) fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    fn banner_text(&self) -> String {
        self.banner
            .as_ref()
            .map(|banner| banner.text().to_string())
            .unwrap_or_default()
    }

    /// Lines left over from a previous run: old checks and the note.
    fn is_stale_output(&self, line: &str) -> bool {
        line.contains(&self.config.check_prefix)
            || self
                .banner
                .as_ref()
                .is_some_and(|banner| banner.contains_line(line))
    }

    fn format_plain(&mut self, raw_line: &str, head: &str, chunks: &[&str]) -> Result<String> {
        let mut output_line = format!(
            "{}: {}{}",
            self.config.check_prefix,
            " ".repeat(LABEL_PADDING),
            head
        );
        output_line.push_str(&self.substitute(raw_line, chunks)?);
        output_line.push('\n');
        Ok(output_line)
    }

    fn format_label(&mut self, raw_line: &str, head: &str, chunks: &[&str]) -> Result<String> {
        let mut output_line = format!("{}-LABEL: {}\n", self.config.check_prefix, head);

        // Align each argument under its original column.
        let padding = " ".repeat(head.len());
        for chunk in chunks {
            output_line.push_str(&self.config.check_prefix);
            output_line.push_str("-SAME:  ");
            output_line.push_str(&padding);
            output_line.push_str(&self.substitute(raw_line, std::slice::from_ref(chunk))?);
            output_line.push('\n');
        }
        Ok(output_line)
    }

    fn substitute(&mut self, raw_line: &str, chunks: &[&str]) -> Result<String> {
        substitute_chunks(chunks, &mut self.namer).ok_or_else(|| {
            CheckGenError::UnmatchedIdentifier {
                line_number: self.line_number,
                line: raw_line.to_string(),
            }
        })
    }

    fn current_segment(&self) -> &OutputSegment {
        // `segments` starts with one element and only ever grows.
        &self.segments[self.segments.len() - 1]
    }

    fn current_segment_mut(&mut self) -> &mut OutputSegment {
        let last = self.segments.len() - 1;
        &mut self.segments[last]
    }
}
