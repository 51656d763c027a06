//! Lenient markup parser.
//!
//! The composed render output is an opaque string produced by component
//! authors, so this parser is a small, forgiving scanner rather than a
//! spec-compliant HTML engine: elements, self-closing and void tags,
//! quoted / bare / valueless attributes, comments skipped, and anything
//! malformed degrades to text or gets dropped without an error.

use super::{Dom, NodeId};

/// Tags that never take children and do not need a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

impl Dom {
    /// Replace the children of `parent` with the parse of `markup`.
    pub fn set_markup(&mut self, parent: NodeId, markup: &str) {
        self.clear_children(parent);
        let mut stack: Vec<NodeId> = vec![parent];
        let mut i = 0;

        while i < markup.len() {
            let rest = &markup[i..];
            if let Some(rest) = rest.strip_prefix("<!--") {
                i = match rest.find("-->") {
                    Some(p) => i + 4 + p + 3,
                    None => markup.len(),
                };
            } else if let Some(rest) = rest.strip_prefix("</") {
                match rest.find('>') {
                    Some(p) => {
                        let name = rest[..p].trim();
                        close_tag(&mut stack, name, self);
                        i += 2 + p + 1;
                    }
                    None => break,
                }
            } else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic())
            {
                match self.parse_open_tag(&rest[1..], &mut stack) {
                    Some(consumed) => i += 1 + consumed,
                    None => break,
                }
            } else {
                // Text run, up to the next plausible tag start. A stray '<'
                // that opens nothing becomes part of the text.
                let skip = if rest.starts_with('<') { 1 } else { 0 };
                let end = rest[skip..]
                    .find('<')
                    .map(|p| skip + p)
                    .unwrap_or(rest.len());
                let text = &rest[..end];
                if !text.trim().is_empty() {
                    let node = self.create_text(text);
                    let top = *stack.last().expect("parse stack never empty");
                    self.append_child(top, node);
                }
                i += end;
            }
        }
    }

    /// Parse one open tag starting just past the `<`. Returns the number
    /// of bytes consumed, or `None` when the tag never terminates.
    fn parse_open_tag(&mut self, input: &str, stack: &mut Vec<NodeId>) -> Option<usize> {
        let mut i = 0;
        let bytes = input.as_bytes();

        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
            i += 1;
        }
        let tag = input[..i].to_ascii_lowercase();

        let node = self.create_element(&tag);
        let mut self_closing = false;

        loop {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= bytes.len() {
                return None;
            }
            if bytes[i] == b'>' {
                i += 1;
                break;
            }
            if bytes[i] == b'/' {
                self_closing = true;
                i += 1;
                continue;
            }

            // Attribute name.
            let name_start = i;
            while i < bytes.len()
                && !bytes[i].is_ascii_whitespace()
                && bytes[i] != b'='
                && bytes[i] != b'>'
                && bytes[i] != b'/'
            {
                i += 1;
            }
            let name = input[name_start..i].to_ascii_lowercase();

            let mut value = String::new();
            if i < bytes.len() && bytes[i] == b'=' {
                i += 1;
                if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                    let quote = bytes[i];
                    i += 1;
                    let value_start = i;
                    while i < bytes.len() && bytes[i] != quote {
                        i += 1;
                    }
                    value = input[value_start..i].to_string();
                    if i < bytes.len() {
                        i += 1;
                    }
                } else {
                    let value_start = i;
                    while i < bytes.len()
                        && !bytes[i].is_ascii_whitespace()
                        && bytes[i] != b'>'
                        && bytes[i] != b'/'
                    {
                        i += 1;
                    }
                    value = input[value_start..i].to_string();
                }
            }
            if !name.is_empty() {
                self.set_attribute_raw(node, &name, &value);
            }
        }

        let top = *stack.last().expect("parse stack never empty");
        self.append_child(top, node);
        if !self_closing && !VOID_TAGS.contains(&tag.as_str()) {
            stack.push(node);
        }
        Some(i)
    }
}

/// Pop the stack down to (and including) the innermost open element with
/// a matching tag. An unmatched close tag is dropped.
fn close_tag(stack: &mut Vec<NodeId>, name: &str, dom: &Dom) {
    let name = name.to_ascii_lowercase();
    // index 0 is the parse root and never pops
    for k in (1..stack.len()).rev() {
        if dom.tag(stack[k]) == Some(name.as_str()) {
            stack.truncate(k);
            return;
        }
    }
}
