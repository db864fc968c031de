use crate::domain::model::LinkRef;
use regex::Regex;
use std::sync::LazyLock;

static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[\[([^\]\[]+)\|([^\]\[]+)\]\]").expect("link pattern is a valid regex")
});

/// Matcher for the two-part wiki link `[[target|display]]`.
///
/// A candidate is rejected when the remainder of the line after its opening
/// `[[` holds a colon at least one character in, which is how typed
/// references such as `[[type:page|Page]]` are told apart from plain links.
/// The remainder is the rest of the line, not just the bracketed part, so a
/// colon later on the line also disqualifies an earlier construct.
#[derive(Debug, Clone)]
pub struct LinkPattern {
    regex: Regex,
}

impl LinkPattern {
    pub fn new() -> Self {
        Self {
            regex: LINK_REGEX.clone(),
        }
    }

    /// First qualifying link on `line`, if any.
    pub fn find_first<'a>(&self, line: &'a str) -> Option<LinkRef<'a>> {
        for caps in self.regex.captures_iter(line) {
            let (Some(whole), Some(target), Some(display)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            // Candidates cannot start inside an earlier one (targets hold no
            // brackets), so non-overlapping iteration visits every start.
            if has_prefix_colon(&line[whole.start() + 2..]) {
                tracing::trace!("Skipping typed link at byte {}", whole.start());
                continue;
            }

            return Some(LinkRef {
                target: target.as_str(),
                display: display.as_str(),
            });
        }

        None
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.find_first(line).is_some()
    }
}

impl Default for LinkPattern {
    fn default() -> Self {
        Self::new()
    }
}

fn has_prefix_colon(rest: &str) -> bool {
    rest.chars()
        .take_while(|c| !is_line_terminator(*c))
        .skip(1)
        .any(|c| c == ':')
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
