use regex::Regex;
use thiserror::Error;

use crate::tree::{ConfigTree, LineId};

/// Errors raised while building a [`TypedPattern`].
#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern is not a valid regular expression.
    #[error("invalid pattern: {0}")]
    Invalid(#[from] regex::Error),
    /// Typed capture requires at least one capture group.
    #[error("pattern `{0}` has no capture group")]
    MissingCaptureGroup(String),
}

/// A compiled regex guaranteed to carry at least one capture group.
///
/// Typed queries return the first group of the first match. Validating the
/// group count at construction turns a silently-empty capture into an error
/// at the point the pattern is written.
#[derive(Debug, Clone)]
pub struct TypedPattern {
    regex: Regex,
}

impl TypedPattern {
    /// Compile `pattern`, rejecting it when no capture group is present.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern)?;
        // captures_len() counts the implicit whole-match group 0
        if regex.captures_len() < 2 {
            return Err(PatternError::MissingCaptureGroup(pattern.to_string()));
        }
        Ok(Self { regex })
    }

    /// Underlying regex, for presence-only searches.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// First capture group of the first match in `text`.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|group| group.as_str())
    }
}

impl ConfigTree {
    /// Capture from a single line's text.
    pub fn match_typed(&self, id: LineId, pattern: &TypedPattern) -> Option<String> {
        pattern.capture(self.text(id)).map(str::to_string)
    }

    /// First capture over all lines in source order.
    pub fn first_match_typed(&self, pattern: &TypedPattern) -> Option<String> {
        self.lines()
            .iter()
            .find_map(|line| pattern.capture(&line.text))
            .map(str::to_string)
    }

    /// All lines, at any depth, whose text matches `pattern`.
    pub fn find_objects(&self, pattern: &Regex) -> Vec<LineId> {
        self.lines()
            .iter()
            .enumerate()
            .filter(|(_, line)| pattern.is_match(&line.text))
            .map(|(id, _)| id)
            .collect()
    }

    /// First capture among `anchor`'s children, or its full subtree when
    /// `recurse` is set. Scans in declaration order.
    pub fn match_iter_typed(
        &self,
        anchor: LineId,
        pattern: &TypedPattern,
        recurse: bool,
    ) -> Option<String> {
        self.scope(anchor, recurse)
            .into_iter()
            .find_map(|id| pattern.capture(self.text(id)))
            .map(str::to_string)
    }

    /// Matching descendants of `anchor` (direct children, or the full
    /// subtree when `recurse` is set) in declaration order.
    pub fn search_children(&self, anchor: LineId, pattern: &Regex, recurse: bool) -> Vec<LineId> {
        self.scope(anchor, recurse)
            .into_iter()
            .filter(|&id| pattern.is_match(self.text(id)))
            .collect()
    }

    /// Lines matching `root_pattern` that have, for *each* pattern in
    /// `child_patterns`, at least one matching descendant.
    pub fn find_objects_with_all_children(
        &self,
        root_pattern: &Regex,
        child_patterns: &[Regex],
    ) -> Vec<LineId> {
        self.find_objects(root_pattern)
            .into_iter()
            .filter(|&root| {
                let subtree = self.descendants(root);
                child_patterns
                    .iter()
                    .all(|child| subtree.iter().any(|&id| child.is_match(self.text(id))))
            })
            .collect()
    }

    fn scope(&self, anchor: LineId, recurse: bool) -> Vec<LineId> {
        if recurse {
            self.descendants(anchor)
        } else {
            self.children(anchor).to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use regex::Regex;

    use super::{PatternError, TypedPattern};
    use crate::parser::{parse, Syntax};
    use crate::tree::ConfigTree;

    fn sample() -> ConfigTree {
        parse(
            concat!(
                "hostname sw1\n",
                "interface Gi0/1\n",
                " channel-group 5 mode active\n",
                "interface Gi0/2\n",
                " channel-group 5 mode active\n",
                "interface Gi0/3\n",
                " ip address 10.0.0.1 255.255.255.0\n",
                "interface Port-channel5\n",
            ),
            Syntax::Ios,
        )
        .expect("parse")
    }

    #[test]
    fn typed_pattern_requires_a_capture_group() {
        let err = TypedPattern::new(r"hostname\s+\S+").unwrap_err();
        assert!(matches!(err, PatternError::MissingCaptureGroup(_)));
        assert!(TypedPattern::new(r"hostname\s+(\S+)").is_ok());
    }

    #[test]
    fn first_match_typed_scans_in_source_order() {
        let tree = sample();
        let pattern = TypedPattern::new(r"^interface\s+(\S+)").expect("pattern");
        assert_eq!(tree.first_match_typed(&pattern), Some("Gi0/1".to_string()));
    }

    #[test]
    fn match_iter_typed_checks_children_only_unless_recursing() {
        let tree = sample();
        let pattern = TypedPattern::new(r"channel-group\s+(\d+)").expect("pattern");
        let anchors = tree.find_objects(&Regex::new(r"^interface\s").expect("regex"));

        assert_eq!(
            tree.match_iter_typed(anchors[0], &pattern, false),
            Some("5".to_string())
        );
        assert_eq!(tree.match_iter_typed(anchors[3], &pattern, false), None);
    }

    #[test]
    fn find_objects_with_all_children_requires_every_pattern() {
        let tree = sample();
        let root = Regex::new(r"^interface\s+\S+").expect("regex");
        let member = Regex::new(r"channel-group\s+5(\s|$)").expect("regex");

        let hits = tree.find_objects_with_all_children(&root, &[member]);
        let names: Vec<_> = hits.iter().map(|&id| tree.text(id)).collect();
        assert_eq!(names, vec!["interface Gi0/1", "interface Gi0/2"]);

        let impossible = Regex::new(r"channel-group\s+9").expect("regex");
        let member = Regex::new(r"channel-group\s+5(\s|$)").expect("regex");
        assert!(tree
            .find_objects_with_all_children(&root, &[member, impossible])
            .is_empty());
    }
}
