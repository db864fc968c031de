use crate::core::lines::split_lines;
use crate::core::link::LinkPattern;
use crate::domain::model::{DroppedLine, FilterOutput, FilterSet, LineDecision, MatchField};

/// Drops lines whose first link names an excluded entry and keeps all other
/// lines verbatim, each followed by a single `\n`.
#[derive(Debug, Clone)]
pub struct LineFilter {
    pattern: LinkPattern,
    filter_set: FilterSet,
    match_field: MatchField,
}

impl LineFilter {
    pub fn new(filter_set: FilterSet) -> Self {
        Self {
            pattern: LinkPattern::new(),
            filter_set,
            match_field: MatchField::Target,
        }
    }

    pub fn with_match_field(mut self, match_field: MatchField) -> Self {
        self.match_field = match_field;
        self
    }

    pub fn filter_set(&self) -> &FilterSet {
        &self.filter_set
    }

    pub fn decide(&self, line: &str) -> LineDecision {
        match self.pattern.find_first(line) {
            Some(link) => {
                let key = self.match_field.select(&link);
                if self.filter_set.contains(key) {
                    LineDecision::Drop {
                        key: key.to_string(),
                    }
                } else {
                    LineDecision::Retain
                }
            }
            None => LineDecision::Retain,
        }
    }

    /// Processes `lines` in order into a fresh output buffer.
    pub fn filter_lines<I, S>(&self, lines: I) -> FilterOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut output = FilterOutput::default();

        for line in lines {
            let line = line.as_ref();
            output.lines_read += 1;

            match self.decide(line) {
                LineDecision::Retain => {
                    output.content.push_str(line);
                    output.content.push('\n');
                    output.lines_kept += 1;
                }
                LineDecision::Drop { key } => {
                    tracing::debug!("Dropping line {}: links to '{}'", output.lines_read, key);
                    output.dropped.push(DroppedLine {
                        line_number: output.lines_read,
                        key,
                    });
                }
            }
        }

        output
    }

    /// Filters a whole text, splitting it the way the file reader does.
    pub fn filter_str(&self, text: &str) -> String {
        self.filter_lines(split_lines(text)).content
    }
}

impl Default for LineFilter {
    fn default() -> Self {
        Self::new(FilterSet::default())
    }
}
