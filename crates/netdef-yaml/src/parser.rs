//! YAML parser that builds [`Node`] trees and reports located syntax errors.

use crate::error::Result;
use crate::node::{Node, NodeEntry};
use crate::position::{LineStarts, mark_at_byte, resolve_char_index};
use crate::source::SourceUnit;
use netdef_error_reporting::{
    NetdefError, ParserState, ScanState, ScanWindow, SyntaxProblem, invalid_yaml, syntax_error,
};
use yaml_rust2::Yaml;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, ScanError, TScalarStyle};

/// Parse a network definition into a [`Node`] tree.
///
/// Only the first document is read. An empty document yields a null node.
/// Aliases are rejected even though the YAML itself is well-formed.
///
/// # Example
///
/// ```rust
/// use netdef_yaml::{SourceUnit, parse};
///
/// let unit = SourceUnit::from_text("network:\n  version: 2\n", None);
/// let root = parse(&unit).unwrap();
/// assert_eq!(root.get("network").and_then(|n| n.get("version")).and_then(|v| v.as_i64()), Some(2));
/// ```
///
/// # Errors
///
/// Returns [`Error::Invalid`](crate::Error::Invalid) holding an
/// `InvalidYaml` error if the text is not acceptable YAML.
pub fn parse(unit: &SourceUnit) -> Result<Node> {
    let content = unit.content();
    let mut parser = Parser::new_from_str(content);
    let mut builder = NodeBuilder::new(content);

    if let Err(e) = parser.load(&mut builder, false) {
        return Err(scan_failure(unit, &e).into());
    }

    if let Some(alias) = builder.first_alias {
        let (offset, mark) = resolve_char_index(content, alias.index());
        let window = ScanWindow::new(content.as_bytes(), offset);
        let name = unit.name();
        return Err(invalid_yaml(&SyntaxProblem::AliasUnsupported, name.as_deref(), &window, mark).into());
    }

    Ok(builder.finish())
}

/// Translate a scanner failure into the tokenizer state the reporter reads.
///
/// The whole source is the scan window. Parser-stage failures are the ones
/// where the scanner already handed over a token.
fn scan_failure(unit: &SourceUnit, error: &ScanError) -> NetdefError {
    let content = unit.content();
    let problem = error.info();
    let (mut offset, mut mark) = resolve_char_index(content, error.marker().index());

    if is_tab_problem(problem)
        && let Some(tab) = find_tab(content.as_bytes(), offset)
    {
        offset = tab;
        mark = mark_at_byte(content, tab);
    }

    let scan = ScanState::new(ScanWindow::new(content.as_bytes(), offset), problem, mark)
        .with_token_available(problem.starts_with("while parsing"))
        .with_state(parser_state(problem));

    tracing::debug!(problem, line = mark.line, column = mark.column, "YAML scan failed");

    let name = unit.name();
    syntax_error(&scan, name.as_deref())
}

fn is_tab_problem(problem: &str) -> bool {
    problem.contains("tabs disallowed") || problem.contains("found a tab")
}

/// Locate the tab a tab problem refers to.
///
/// The scanner reports tab indentation just past the tab, so the
/// whitespace before `offset` is searched first. A plain scalar running into
/// a tab on a later line is reported at the scalar, so the search then
/// continues forward.
fn find_tab(bytes: &[u8], offset: usize) -> Option<usize> {
    let before = &bytes[..offset];
    let indent = before
        .iter()
        .rev()
        .take_while(|&&b| b == b' ' || b == b'\t')
        .count();
    before[offset - indent..]
        .iter()
        .rposition(|&b| b == b'\t')
        .map(|i| offset - indent + i)
        .or_else(|| {
            bytes[offset..]
                .iter()
                .position(|&b| b == b'\t')
                .map(|i| offset + i)
        })
}

fn parser_state(problem: &str) -> ParserState {
    if problem.contains("<document start>") {
        ParserState::DocumentStart
    } else if problem.contains("block mapping") && problem.contains("expected key") {
        ParserState::BlockMappingKey
    } else if problem.starts_with("while parsing a block collection") {
        ParserState::BlockSequenceEntry
    } else if problem.starts_with("while parsing a flow") {
        ParserState::FlowNode
    } else {
        ParserState::Unknown
    }
}

/// Receives marked events and assembles the node tree.
struct NodeBuilder {
    lines: LineStarts,
    stack: Vec<Frame>,
    root: Option<Node>,
    first_alias: Option<Marker>,
}

/// A collection whose children are still being parsed.
enum Frame {
    Sequence {
        start: Marker,
        items: Vec<Node>,
    },
    Mapping {
        start: Marker,
        entries: Vec<NodeEntry>,
        pending_key: Option<Node>,
    },
}

impl NodeBuilder {
    fn new(source: &str) -> Self {
        Self {
            lines: LineStarts::new(source),
            stack: Vec::new(),
            root: None,
            first_alias: None,
        }
    }

    fn finish(self) -> Node {
        self.root
            .unwrap_or_else(|| Node::new_scalar(Yaml::Null, Default::default()))
    }

    fn push_complete(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                Some(key) => entries.push(NodeEntry { key, value: node }),
                None => *pending_key = Some(node),
            },
        }
    }
}

impl MarkedEventReceiver for NodeBuilder {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart
            | Event::DocumentEnd => {}

            Event::Scalar(value, style, _anchor_id, _tag) => {
                let yaml = if style == TScalarStyle::Plain {
                    parse_scalar_value(&value)
                } else {
                    Yaml::String(value)
                };
                let node = Node::new_scalar(yaml, self.lines.mark(marker.index()));
                self.push_complete(node);
            }

            Event::SequenceStart(_anchor_id, _tag) => {
                self.stack.push(Frame::Sequence {
                    start: marker,
                    items: Vec::new(),
                });
            }

            Event::MappingStart(_anchor_id, _tag) => {
                self.stack.push(Frame::Mapping {
                    start: marker,
                    entries: Vec::new(),
                    pending_key: None,
                });
            }

            Event::SequenceEnd | Event::MappingEnd => {
                let node = match self.stack.pop() {
                    Some(Frame::Sequence { start, items }) => {
                        Node::new_array(self.lines.mark(start.index()), items)
                    }
                    Some(Frame::Mapping { start, entries, .. }) => {
                        Node::new_hash(self.lines.mark(start.index()), entries)
                    }
                    None => return,
                };
                self.push_complete(node);
            }

            Event::Alias(_anchor_id) => {
                if self.first_alias.is_none() {
                    self.first_alias = Some(marker);
                }
                let node = Node::new_scalar(Yaml::Null, self.lines.mark(marker.index()));
                self.push_complete(node);
            }
        }
    }
}

/// Type a plain scalar: integers, floats, booleans, null, else string.
fn parse_scalar_value(value: &str) -> Yaml {
    if let Ok(i) = value.parse::<i64>() {
        return Yaml::Integer(i);
    }

    if value.parse::<f64>().is_ok() {
        return Yaml::Real(value.to_string());
    }

    match value {
        "true" | "True" | "TRUE" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" => Yaml::Boolean(true),
        "false" | "False" | "FALSE" | "no" | "No" | "NO" | "off" | "Off" | "OFF" => {
            Yaml::Boolean(false)
        }
        "null" | "Null" | "NULL" | "~" | "" => Yaml::Null,
        _ => Yaml::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netdef_error_reporting::{ErrorKind, Mark};
    use std::path::PathBuf;

    fn unit(text: &str) -> SourceUnit {
        SourceUnit::from_text(text, Some(PathBuf::from("net.yaml")))
    }

    #[test]
    fn test_parse_nested_structure() {
        let root = parse(&unit(
            "network:\n  version: 2\n  ethernets:\n    eth0:\n      dhcp4: true\n",
        ))
        .unwrap();

        assert!(root.is_hash());
        let network = root.get("network").unwrap();
        assert_eq!(network.get("version").and_then(Node::as_i64), Some(2));

        let eth0 = network.get("ethernets").and_then(|e| e.get("eth0")).unwrap();
        assert_eq!(eth0.get("dhcp4").and_then(Node::as_bool), Some(true));
    }

    #[test]
    fn test_marks_are_zero_based() {
        let root = parse(&unit("network:\n  renderer: networkd\n")).unwrap();
        let network = root.get_entry("network").unwrap();
        assert_eq!(network.key.mark, Mark::new(0, 0));

        let renderer = network.value.get_entry("renderer").unwrap();
        assert_eq!(renderer.key.mark, Mark::new(1, 2));
        assert_eq!(renderer.value.mark, Mark::new(1, 12));
    }

    #[test]
    fn test_sequence_items() {
        let root = parse(&unit("addresses: [10.0.0.1/24, 10.0.0.2/24]\n")).unwrap();
        let addresses = root.get("addresses").unwrap();
        assert!(addresses.is_array());
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses.items().unwrap()[1].as_str(), Some("10.0.0.2/24"));
    }

    #[test]
    fn test_quoted_scalars_stay_strings() {
        let root = parse(&unit("a: \"2\"\nb: 'true'\n")).unwrap();
        assert_eq!(root.get("a").and_then(Node::as_str), Some("2"));
        assert_eq!(root.get("b").and_then(Node::as_str), Some("true"));
    }

    #[test]
    fn test_empty_document_is_null() {
        let root = parse(&unit("")).unwrap();
        assert!(root.is_null());
    }

    #[test]
    fn test_syntax_error_is_located() {
        let source = "network:\n  ethernets: [eth0\n";
        let err = parse(&unit(source)).unwrap_err();
        let err = err.as_netdef().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidYaml);

        // header line, then the source line it names, then a caret under its column
        let mut lines = err.message().split('\n');
        let header = lines.next().unwrap();
        let location = header.strip_prefix("net.yaml:").unwrap();
        let mut fields = location.splitn(3, ':');
        let line: usize = fields.next().unwrap().parse().unwrap();
        let column: usize = fields.next().unwrap().parse().unwrap();
        assert!(fields.next().unwrap().starts_with(" Invalid YAML: "));
        assert!(header.ends_with(':'));

        assert_eq!(lines.next(), source.split('\n').nth(line - 1));
        assert_eq!(lines.next(), Some(format!("{}^", " ".repeat(column - 1)).as_str()));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_tab_indentation_reported_at_tab() {
        let err = parse(&unit("network:\n\tversion: 2\n")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "net.yaml:2:1: Invalid YAML: tabs are not allowed for indent:\n\tversion: 2\n^"
        );
    }

    #[test]
    fn test_tab_after_plain_scalar_reported_at_tab() {
        let err = parse(&unit("network:\n  version: 2\n\tethernets: {}\n")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "net.yaml:3:1: Invalid YAML: tabs are not allowed for indent:\n\tethernets: {}\n^"
        );
    }

    #[test]
    fn test_find_tab() {
        // just past an indenting tab
        assert_eq!(find_tab(b"a:\n\tb: 1\n", 4), Some(3));
        // mixed indentation before the marker
        assert_eq!(find_tab(b"a:\n \t b: 1\n", 6), Some(4));
        // tab further on
        assert_eq!(find_tab(b"a: 2\n\tb: {}\n", 3), Some(5));
        assert_eq!(find_tab(b"a: 2\n", 3), None);
    }

    #[test]
    fn test_syntax_error_unnamed_source() {
        let err = parse(&SourceUnit::from_text("a: [b\n", None)).unwrap_err();
        assert!(err.to_string().starts_with("(unnamed file):"));
    }

    #[test]
    fn test_alias_rejected() {
        let err = parse(&unit("a: &x 1\nb: *x\n")).unwrap_err();
        let err = err.as_netdef().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidYaml);
        assert_eq!(
            err.message(),
            "net.yaml:2:4: Invalid YAML: aliases are not supported:\nb: *x\n   ^"
        );
    }

    #[test]
    fn test_parser_state_from_problem() {
        assert_eq!(
            parser_state("while parsing a block mapping, did not find expected key"),
            ParserState::BlockMappingKey
        );
        assert_eq!(
            parser_state("while parsing a flow sequence, expected ',' or ']'"),
            ParserState::FlowNode
        );
        assert_eq!(
            parser_state("while parsing a block collection, did not find expected '-' indicator"),
            ParserState::BlockSequenceEntry
        );
        assert_eq!(
            parser_state("did not find expected <document start>"),
            ParserState::DocumentStart
        );
        assert_eq!(parser_state("mapping values are not allowed in this context"), ParserState::Unknown);
    }

    #[test]
    fn test_parse_scalar_value() {
        assert_eq!(parse_scalar_value("42"), Yaml::Integer(42));
        assert_eq!(parse_scalar_value("1.5"), Yaml::Real("1.5".into()));
        assert_eq!(parse_scalar_value("yes"), Yaml::Boolean(true));
        assert_eq!(parse_scalar_value("off"), Yaml::Boolean(false));
        assert_eq!(parse_scalar_value("~"), Yaml::Null);
        assert_eq!(parse_scalar_value("eth0"), Yaml::String("eth0".into()));
    }
}
