//! Simple selector matching over a subtree.
//!
//! Event-binding declarations resolve their targets with compound simple
//! selectors: `*`, a tag name, `#id`, `.class`, and conjunctions of those
//! (`button.primary#send`). Comma-separated lists match any branch.
//! Combinators are not supported; the declarations this serves only ever
//! select direct shadow content.

use super::{Dom, NodeId};

#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

fn parse_compound(input: &str) -> Compound {
    let mut out = Compound::default();
    let mut rest = input.trim();

    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix('*') {
            rest = tail;
            continue;
        }
        let marker = rest.chars().next();
        let (body, tail) = match marker {
            Some('#') | Some('.') => {
                let body = &rest[1..];
                let end = body
                    .find(|c| c == '#' || c == '.' || c == '*')
                    .unwrap_or(body.len());
                (&body[..end], &body[end..])
            }
            _ => {
                let end = rest
                    .find(|c| c == '#' || c == '.' || c == '*')
                    .unwrap_or(rest.len());
                (&rest[..end], &rest[end..])
            }
        };
        match marker {
            Some('#') => out.id = Some(body.to_string()),
            Some('.') => out.classes.push(body.to_string()),
            _ => out.tag = Some(body.to_ascii_lowercase()),
        }
        rest = tail;
    }
    out
}

impl Compound {
    fn matches(&self, dom: &Dom, node: NodeId) -> bool {
        let Some(tag) = dom.tag(node) else {
            return false;
        };
        if let Some(want) = &self.tag {
            if want != tag {
                return false;
            }
        }
        if let Some(want) = &self.id {
            if dom.attribute(node, "id").as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let attr = dom.attribute(node, "class").unwrap_or_default();
            let have: Vec<&str> = attr.split_ascii_whitespace().collect();
            if !self.classes.iter().all(|c| have.contains(&c.as_str())) {
                return false;
            }
        }
        true
    }
}

impl Dom {
    /// All element nodes under `root` (exclusive) matching `selector`, in
    /// document order. An unparseable or empty selector matches nothing.
    pub fn query_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let compounds: Vec<Compound> = selector
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(parse_compound)
            .collect();
        if compounds.is_empty() {
            return Vec::new();
        }

        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if compounds.iter().any(|c| c.matches(self, node)) {
                found.push(node);
            }
            for child in self.children(node).iter().rev() {
                stack.push(*child);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::super::Dom;
    use super::*;

    #[test]
    fn test_parse_compound() {
        let c = parse_compound("button.primary#send");
        assert_eq!(c.tag.as_deref(), Some("button"));
        assert_eq!(c.id.as_deref(), Some("send"));
        assert_eq!(c.classes, vec!["primary".to_string()]);

        let star = parse_compound("*");
        assert_eq!(star, Compound::default());
    }

    #[test]
    fn test_query_by_tag_id_class() {
        let dom = Dom::new();
        let mut dom = dom.borrow_mut();
        let root = dom.create_element("root");
        dom.set_markup(
            root,
            r#"<div class="item hot" id="first"></div><span class="item"></span><div></div>"#,
        );

        assert_eq!(dom.query_all(root, "div").len(), 2);
        assert_eq!(dom.query_all(root, ".item").len(), 2);
        assert_eq!(dom.query_all(root, "#first").len(), 1);
        assert_eq!(dom.query_all(root, "div.item").len(), 1);
        assert_eq!(dom.query_all(root, ".item.hot").len(), 1);
        assert_eq!(dom.query_all(root, "*").len(), 3);
        assert!(dom.query_all(root, "p").is_empty());
    }

    #[test]
    fn test_query_comma_list_and_order() {
        let dom = Dom::new();
        let mut dom = dom.borrow_mut();
        let root = dom.create_element("root");
        dom.set_markup(root, "<a></a><b><c></c></b><d></d>");

        let hits = dom.query_all(root, "a, c, d");
        let tags: Vec<_> = hits.iter().map(|&n| dom.tag(n).unwrap().to_string()).collect();
        assert_eq!(tags, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_query_descends_into_subtree() {
        let dom = Dom::new();
        let mut dom = dom.borrow_mut();
        let root = dom.create_element("root");
        dom.set_markup(root, "<div><ul><li class=x></li><li></li></ul></div>");
        assert_eq!(dom.query_all(root, "li").len(), 2);
        assert_eq!(dom.query_all(root, "li.x").len(), 1);
    }
}
