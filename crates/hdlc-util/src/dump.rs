//! Structured dump graphs.
//!
//! A [`DumpGraph`] is an intermediate representation of an object graph:
//! named nodes with string-valued fields and pointer-valued fields. The
//! builder keys nodes on the identity of the objects being dumped, so
//! shared and cyclic structure survives; the JSON writer emits `@id` /
//! `@ref` markers for it and the DOT writer draws it as edges.
//!
//! Field names are ordered by a natural-number-aware comparator so that
//! `parts[10]` sorts after `parts[9]`.
//!
//! # Examples
//!
//! ```
//! use hdlc_util::dump::DumpGraph;
//!
//! let mut graph = DumpGraph::new();
//! let root = graph.add_node("module");
//! graph.set_simple(root, "name", "m");
//! let json = graph.to_json(Some(root));
//! assert!(json.contains("\"@name\": \"module\""));
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Write;

/// Handle to one node in a [`DumpGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DumpId(usize);

/// One dumped object: a name plus simple and pointer fields.
#[derive(Default)]
pub struct DumpNode {
    pub name: String,
    pub simple: Vec<(String, String)>,
    pub pointers: Vec<(String, Option<DumpId>)>,
}

/// An object graph prepared for structured output.
#[derive(Default)]
pub struct DumpGraph {
    nodes: Vec<DumpNode>,
}

impl DumpGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: impl Into<String>) -> DumpId {
        let id = DumpId(self.nodes.len());
        self.nodes.push(DumpNode {
            name: name.into(),
            ..DumpNode::default()
        });
        id
    }

    pub fn set_simple(&mut self, id: DumpId, key: impl Into<String>, value: impl Into<String>) {
        self.nodes[id.0].simple.push((key.into(), value.into()));
    }

    pub fn set_pointer(&mut self, id: DumpId, key: impl Into<String>, target: Option<DumpId>) {
        self.nodes[id.0].pointers.push((key.into(), target));
    }

    /// Pointer field with an index baked into the key, e.g.
    /// `statements[3]`. The natural comparator keeps these in numeric
    /// order.
    pub fn set_pointer_indexed(
        &mut self,
        id: DumpId,
        key: &str,
        index: usize,
        target: Option<DumpId>,
    ) {
        self.set_pointer(id, format!("{key}[{index}]"), target);
    }

    pub fn node(&self, id: DumpId) -> &DumpNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize the graph reachable from `root` as JSON. Revisited nodes
    /// become `{ "@ref": N }` where `N` is the `@id` of the first visit.
    pub fn to_json(&self, root: Option<DumpId>) -> String {
        let mut out = String::new();
        let mut writer = JsonWriter {
            graph: self,
            ids: HashMap::new(),
            out: &mut out,
        };
        writer.visit(root, 0, false);
        out
    }

    /// Serialize the graph reachable from `root` as Graphviz DOT.
    pub fn to_dot(&self, root: Option<DumpId>) -> String {
        let mut out = String::new();
        out.push_str("digraph\n{\n");
        out.push_str("    node [shape=box]\n");
        if let Some(root) = root {
            let mut seen = vec![false; self.nodes.len()];
            let mut work = vec![root];
            seen[root.0] = true;
            while let Some(id) = work.pop() {
                let node = &self.nodes[id.0];
                let mut label = escape_dot(&node.name);
                let mut simple: Vec<_> = node.simple.iter().collect();
                simple.sort_by(|a, b| compare_names(&a.0, &b.0));
                for (key, value) in simple {
                    let _ = write!(label, "\\l{}={}", escape_dot(key), escape_dot(value));
                }
                let _ = writeln!(out, "    id{} [label=\"{}\\l\"]", id.0, label);
                let mut pointers: Vec<_> = node.pointers.iter().collect();
                pointers.sort_by(|a, b| compare_names(&a.0, &b.0));
                for (key, target) in pointers {
                    if let Some(target) = target {
                        let _ = writeln!(
                            out,
                            "    id{} -> id{} [label=\"{}\"]",
                            id.0,
                            target.0,
                            escape_dot(key)
                        );
                        if !seen[target.0] {
                            seen[target.0] = true;
                            work.push(*target);
                        }
                    }
                }
            }
        }
        out.push_str("}\n");
        out
    }
}

struct JsonWriter<'g, 'o> {
    graph: &'g DumpGraph,
    ids: HashMap<DumpId, usize>,
    out: &'o mut String,
}

impl JsonWriter<'_, '_> {
    fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push_str("    ");
        }
    }

    fn visit(&mut self, id: Option<DumpId>, level: usize, trailing_comma: bool) {
        let comma = if trailing_comma { "," } else { "" };
        let Some(id) = id else {
            self.indent(level);
            let _ = writeln!(self.out, "null{comma}");
            return;
        };
        if let Some(&display) = self.ids.get(&id) {
            self.indent(level);
            let _ = writeln!(self.out, "{{ \"@ref\": {display} }}{comma}");
            return;
        }
        let display = self.ids.len();
        self.ids.insert(id, display);

        let node = self.graph.node(id);
        self.indent(level);
        self.out.push_str("{\n");
        self.indent(level + 1);
        let _ = writeln!(self.out, "\"@id\": {display},");
        self.indent(level + 1);
        let _ = write!(self.out, "\"@name\": {}", json_string(&node.name));

        let mut simple: Vec<_> = node.simple.iter().collect();
        simple.sort_by(|a, b| compare_names(&a.0, &b.0));
        for (key, value) in simple {
            self.out.push_str(",\n");
            self.indent(level + 1);
            let _ = write!(self.out, "{}: {}", json_string(key), json_string(value));
        }

        let mut pointers: Vec<_> = node.pointers.iter().collect();
        pointers.sort_by(|a, b| compare_names(&a.0, &b.0));
        for (key, target) in pointers {
            self.out.push_str(",\n");
            self.indent(level + 1);
            let _ = write!(self.out, "{}:", json_string(key));
            match target {
                Some(target) => {
                    self.out.push('\n');
                    self.visit(Some(*target), level + 1, false);
                    // visit ends with a newline; strip it so the comma
                    // logic above stays uniform
                    if self.out.ends_with('\n') {
                        self.out.pop();
                    }
                }
                None => self.out.push_str(" null"),
            }
        }
        self.out.push('\n');
        self.indent(level);
        let _ = writeln!(self.out, "}}{comma}");
    }
}

fn json_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 || ch == '\u{7f}' => {
                let _ = write!(out, "\\u{:04X}", ch as u32);
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn escape_dot(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\l"),
            ch => out.push(ch),
        }
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PartKind {
    Text,
    Number,
}

/// Split a field name into text parts and bracketed-number parts. A digit
/// run counts as a number only when it immediately follows `[`.
fn name_parts(name: &str) -> Vec<(&str, PartKind)> {
    let bytes = name.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'[' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit() {
            // text part through the '[', then the digit run
            parts.push((&name[start..=i], PartKind::Text));
            let digits_start = i + 1;
            let mut j = digits_start;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            parts.push((&name[digits_start..j], PartKind::Number));
            start = j;
            i = j;
        } else {
            i += 1;
        }
    }
    if start < bytes.len() {
        parts.push((&name[start..], PartKind::Text));
    }
    parts
}

/// Natural-number-aware field-name ordering: digit runs after `[` compare
/// as numbers, so `parts[10]` follows `parts[9]`.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let parts_a = name_parts(a);
    let parts_b = name_parts(b);
    let mut iter_a = parts_a.iter();
    let mut iter_b = parts_b.iter();
    loop {
        match (iter_a.next(), iter_b.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&(text_a, kind_a)), Some(&(text_b, kind_b))) => {
                let ordering = if kind_a == PartKind::Number && kind_b == PartKind::Number {
                    let trimmed_a = text_a.trim_start_matches('0');
                    let trimmed_b = text_b.trim_start_matches('0');
                    trimmed_a
                        .len()
                        .cmp(&trimmed_b.len())
                        .then_with(|| trimmed_a.cmp(trimmed_b))
                } else {
                    text_a.cmp(text_b)
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_names_plain() {
        assert_eq!(compare_names("", ""), Ordering::Equal);
        assert_eq!(compare_names("a", "b"), Ordering::Less);
        assert_eq!(compare_names("name", "name"), Ordering::Equal);
    }

    #[test]
    fn test_compare_names_numeric() {
        assert_eq!(compare_names("[10]", "[9]"), Ordering::Greater);
        assert_eq!(compare_names("parts[2]", "parts[10]"), Ordering::Less);
        assert_eq!(compare_names("parts[010]", "parts[10]"), Ordering::Equal);
        assert_eq!(
            compare_names("statements[9]", "statements[10]"),
            Ordering::Less
        );
    }

    #[test]
    fn test_compare_names_mixed() {
        // Digits not after '[' compare as text.
        assert_eq!(compare_names("a10", "a9"), Ordering::Less);
        assert_eq!(compare_names("x[1]y", "x[1]z"), Ordering::Less);
    }

    #[test]
    fn test_json_simple_fields_sorted() {
        let mut graph = DumpGraph::new();
        let root = graph.add_node("node");
        graph.set_simple(root, "b", "2");
        graph.set_simple(root, "a", "1");
        let json = graph.to_json(Some(root));
        let a = json.find("\"a\": \"1\"").unwrap();
        let b = json.find("\"b\": \"2\"").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_json_shared_node_uses_ref() {
        let mut graph = DumpGraph::new();
        let root = graph.add_node("root");
        let shared = graph.add_node("shared");
        graph.set_pointer(root, "left", Some(shared));
        graph.set_pointer(root, "right", Some(shared));
        let json = graph.to_json(Some(root));
        assert_eq!(json.matches("\"@name\": \"shared\"").count(), 1);
        assert!(json.contains("\"@ref\": 1"));
    }

    #[test]
    fn test_json_cycle_terminates() {
        let mut graph = DumpGraph::new();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        graph.set_pointer(a, "next", Some(b));
        graph.set_pointer(b, "back", Some(a));
        let json = graph.to_json(Some(a));
        assert!(json.contains("\"@ref\": 0"));
    }

    #[test]
    fn test_json_null_root_and_pointer() {
        let graph = DumpGraph::new();
        assert_eq!(graph.to_json(None).trim(), "null");

        let mut graph = DumpGraph::new();
        let root = graph.add_node("root");
        graph.set_pointer(root, "missing", None);
        let json = graph.to_json(Some(root));
        assert!(json.contains("\"missing\": null"));
    }

    #[test]
    fn test_json_string_escaping() {
        assert_eq!(json_string("a\"b"), "\"a\\\"b\"");
        assert_eq!(json_string("tab\there"), "\"tab\\there\"");
        assert_eq!(json_string("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_dot_output() {
        let mut graph = DumpGraph::new();
        let root = graph.add_node("module");
        let child = graph.add_node("statement");
        graph.set_simple(root, "name", "m");
        graph.set_pointer_indexed(root, "statements", 0, Some(child));
        let dot = graph.to_dot(Some(root));
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("id0 -> id1"));
        assert!(dot.contains("statements[0]"));
    }
}
