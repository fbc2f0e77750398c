//! Minimal markup tree: enough HTML to round-trip report tables.
//!
//! The parser keeps attribute text verbatim so unedited markup serialises
//! back unchanged, apart from closing tags added for elements left open.

use super::MarkupError;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    /// `<!DOCTYPE ...>` and processing instructions, kept as written.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Element {
    /// Tag name as written.
    pub name: String,
    /// Lowercased tag name for comparisons.
    pub key: String,
    /// Everything between the tag name and `>` (or `/>`).
    pub attrs: String,
    pub self_closing: bool,
    pub children: Vec<Node>,
}

impl Element {
    fn new(name: &str, attrs: &str, self_closing: bool) -> Self {
        Self {
            name: name.to_string(),
            key: name.to_ascii_lowercase(),
            attrs: attrs.to_string(),
            self_closing,
            children: Vec::new(),
        }
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.key.as_str())
    }

    fn is_raw_text(&self) -> bool {
        RAW_TEXT_ELEMENTS.contains(&self.key.as_str())
    }

    /// Whether an attribute with this (lowercase) name is present.
    pub fn has_attr(&self, name: &str) -> bool {
        let attrs = self.attrs.to_ascii_lowercase();
        let mut quote = None;
        let mut word_start = None;
        for (index, c) in attrs.char_indices() {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None if c == '"' || c == '\'' => quote = Some(c),
                None if c.is_whitespace() || c == '=' || c == '/' => {
                    if word_start.take().is_some_and(|start| &attrs[start..index] == name) {
                        return true;
                    }
                }
                None => {
                    word_start.get_or_insert(index);
                }
            }
        }
        word_start.is_some_and(|start| &attrs[start..] == name)
    }

    pub fn contains_image(&self) -> bool {
        self.children.iter().any(|child| match child {
            Node::Element(el) => el.key == "img" || el.contains_image(),
            _ => false,
        })
    }

    /// Text-bearing element with no element children other than `br`.
    pub fn is_leaf_text(&self) -> bool {
        if self.is_void() || self.is_raw_text() || self.contains_image() {
            return false;
        }
        let mut has_text = false;
        for child in &self.children {
            match child {
                Node::Text(text) => has_text |= !text.trim().is_empty(),
                Node::Element(el) if el.key == "br" => {}
                Node::Element(_) => return false,
                Node::Comment(_) | Node::Raw(_) => {}
            }
        }
        has_text
    }

    /// Visible text, with `br` rendered as a newline and entities decoded.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(&unescape_text(text)),
                Node::Element(el) if el.key == "br" => out.push('\n'),
                Node::Element(el) => out.push_str(&el.text()),
                Node::Comment(_) | Node::Raw(_) => {}
            }
        }
        out
    }
}

/// Parses a markup fragment into a forest of nodes.
pub(crate) fn parse(markup: &str) -> Result<Vec<Node>, MarkupError> {
    let mut root = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut pos = 0;

    while pos < markup.len() {
        let rest = &markup[pos..];

        if let Some(body) = rest.strip_prefix("<!--") {
            let end = body.find("-->").ok_or(MarkupError::UnterminatedComment { offset: pos })?;
            attach(&mut stack, &mut root, Node::Comment(body[..end].to_string()));
            pos += 4 + end + 3;
        } else if rest.starts_with("</") {
            let end = rest.find('>').ok_or(MarkupError::UnterminatedTag { offset: pos })?;
            let key = rest[2..end].trim().to_ascii_lowercase();
            close(&mut stack, &mut root, &key, pos)?;
            pos += end + 1;
        } else if rest.starts_with("<!") || rest.starts_with("<?") {
            let end = rest.find('>').ok_or(MarkupError::UnterminatedTag { offset: pos })?;
            attach(&mut stack, &mut root, Node::Raw(rest[..=end].to_string()));
            pos += end + 1;
        } else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            let end = tag_end(rest).ok_or(MarkupError::UnterminatedTag { offset: pos })?;
            let inner = &rest[1..end];
            let name_len =
                inner.find(|c: char| c.is_whitespace() || c == '/').unwrap_or(inner.len());
            let (name, attrs) = inner.split_at(name_len);
            let (attrs, self_closing) =
                attrs.strip_suffix('/').map_or((attrs, false), |attrs| (attrs, true));
            let mut element = Element::new(name, attrs, self_closing);
            pos += end + 1;

            if element.is_void() || self_closing {
                attach(&mut stack, &mut root, Node::Element(element));
            } else {
                if element.is_raw_text() {
                    let closing = format!("</{}", element.key);
                    let body_len = markup[pos..]
                        .to_ascii_lowercase()
                        .find(&closing)
                        .unwrap_or(markup.len() - pos);
                    if body_len > 0 {
                        element.children.push(Node::Text(markup[pos..pos + body_len].to_string()));
                    }
                    pos += body_len;
                }
                stack.push(element);
            }
        } else {
            let len = rest
                .char_indices()
                .skip(1)
                .find(|&(_, c)| c == '<')
                .map_or(rest.len(), |(i, _)| i);
            attach(&mut stack, &mut root, Node::Text(rest[..len].to_string()));
            pos += len;
        }
    }

    while let Some(element) = stack.pop() {
        attach(&mut stack, &mut root, Node::Element(element));
    }
    Ok(root)
}

/// Serialises nodes, adding `contenteditable="true"` to elements whose
/// path is in `editable`.
pub(crate) fn render(nodes: &[Node], editable: &[Vec<usize>]) -> String {
    let mut out = String::new();
    let mut path = Vec::new();
    write_nodes(&mut out, nodes, &mut path, editable);
    out
}

fn write_nodes(out: &mut String, nodes: &[Node], path: &mut Vec<usize>, editable: &[Vec<usize>]) {
    for (index, node) in nodes.iter().enumerate() {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            Node::Raw(text) => out.push_str(text),
            Node::Element(el) => {
                path.push(index);
                out.push('<');
                out.push_str(&el.name);
                out.push_str(&el.attrs);
                if editable.contains(path) && !el.has_attr("contenteditable") {
                    out.push_str(" contenteditable=\"true\"");
                }
                if el.self_closing {
                    out.push('/');
                }
                out.push('>');
                write_nodes(out, &el.children, path, editable);
                if !el.is_void() && !el.self_closing {
                    out.push_str("</");
                    out.push_str(&el.name);
                    out.push('>');
                }
                path.pop();
            }
        }
    }
}

/// Pre-order path to the first element with the given key.
pub(crate) fn find_first(nodes: &[Node], key: &str) -> Option<Vec<usize>> {
    for (index, node) in nodes.iter().enumerate() {
        if let Node::Element(el) = node {
            if el.key == key {
                return Some(vec![index]);
            }
            if let Some(mut rest) = find_first(&el.children, key) {
                rest.insert(0, index);
                return Some(rest);
            }
        }
    }
    None
}

pub(crate) fn element_at<'a>(nodes: &'a [Node], path: &[usize]) -> Option<&'a Element> {
    let (first, rest) = path.split_first()?;
    match nodes.get(*first)? {
        Node::Element(el) if rest.is_empty() => Some(el),
        Node::Element(el) => element_at(&el.children, rest),
        _ => None,
    }
}

pub(crate) fn element_at_mut<'a>(nodes: &'a mut [Node], path: &[usize]) -> Option<&'a mut Element> {
    let (first, rest) = path.split_first()?;
    let Node::Element(el) = nodes.get_mut(*first)? else {
        return None;
    };
    if rest.is_empty() {
        Some(el)
    } else {
        element_at_mut(&mut el.children, rest)
    }
}

/// Paths of every leaf text-bearing element under `nodes`.
pub(crate) fn leaf_text_paths(nodes: &[Node], prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    for (index, node) in nodes.iter().enumerate() {
        if let Node::Element(el) = node {
            prefix.push(index);
            if el.is_leaf_text() {
                out.push(prefix.clone());
            } else {
                leaf_text_paths(&el.children, prefix, out);
            }
            prefix.pop();
        }
    }
}

/// Nodes for plain text, escaped, with each newline as a `br`.
pub(crate) fn text_nodes(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            nodes.push(Node::Element(Element::new("br", "", false)));
        }
        if !line.is_empty() {
            nodes.push(Node::Text(escape_text(line)));
        }
    }
    nodes
}

pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Decodes the named entities `escape_text` produces plus `&quot;`, `&apos;`,
/// `&nbsp;` and numeric references. Unknown entities are left as written.
pub(crate) fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let decoded = rest
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&rest[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

fn attach(stack: &mut [Element], root: &mut Vec<Node>, node: Node) {
    let siblings = match stack.last_mut() {
        Some(parent) => &mut parent.children,
        None => root,
    };
    if let (Node::Text(text), Some(Node::Text(previous))) = (&node, siblings.last_mut()) {
        previous.push_str(text);
        return;
    }
    siblings.push(node);
}

fn close(
    stack: &mut Vec<Element>,
    root: &mut Vec<Node>,
    key: &str,
    offset: usize,
) -> Result<(), MarkupError> {
    let Some(depth) = stack.iter().rposition(|el| el.key == key) else {
        return Err(MarkupError::StrayClose { tag: key.to_string(), offset });
    };
    while stack.len() > depth {
        let Some(element) = stack.pop() else { break };
        attach(stack, root, Node::Element(element));
    }
    Ok(())
}

/// Index of the `>` ending the tag that starts `rest`, skipping quoted values.
fn tag_end(rest: &str) -> Option<usize> {
    let mut quote = None;
    for (index, c) in rest.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return Some(index),
            None => {}
        }
    }
    None
}
