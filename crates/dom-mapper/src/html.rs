//! HTML fragment parsing and serialization for [`Dom`].
//!
//! The parser covers the markup the mapper produces and what people write by
//! hand around it: elements with quoted, unquoted or bare attributes, void
//! elements, `/>` self-closing syntax, comments and the common character
//! references. Doctypes and processing instructions are skipped. It is not a full
//! HTML5 tree builder: there is no implied-tag insertion and
//! no foster parenting.
//!
//! # Error policy
//!
//! - Elements still open at end of input are closed implicitly.
//! - An end tag with no matching open element is an error.
//! - Unterminated tags, comments and quoted attribute values are errors.
//!
//! Errors carry the 1-based line where the offending construct starts.

use crate::dom::{Dom, NodeData, NodeId};
use crate::error::{Error, Result};

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Parse `markup` into a new fragment node of `dom`.
pub fn parse_fragment(dom: &mut Dom, markup: &str) -> Result<NodeId> {
    let fragment = dom.create_fragment();
    let mut parser = Parser {
        dom,
        input: markup,
        pos: 0,
        open: vec![fragment],
    };
    parser.run()?;
    Ok(fragment)
}

struct Parser<'a> {
    dom: &'a mut Dom,
    input: &'a str,
    pos: usize,
    /// Open element stack; the fragment root sits at the bottom.
    open: Vec<NodeId>,
}

impl<'a> Parser<'a> {
    fn run(&mut self) -> Result<()> {
        let input = self.input;
        while self.pos < input.len() {
            let rest = &input[self.pos..];
            if rest.starts_with("<!--") {
                self.comment()?;
            } else if rest.starts_with("</") {
                self.end_tag()?;
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_declaration()?;
            } else if rest.starts_with('<')
                && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic())
            {
                self.start_tag()?;
            } else {
                self.text();
            }
        }
        Ok(())
    }

    fn current(&self) -> NodeId {
        self.open[self.open.len() - 1]
    }

    fn line_at(&self, pos: usize) -> usize {
        self.input[..pos].matches('\n').count() + 1
    }

    fn error(&self, pos: usize, message: impl Into<String>) -> Error {
        Error::MarkupParse {
            line: self.line_at(pos),
            message: message.into(),
        }
    }

    fn text(&mut self) {
        let start = self.pos;
        // A lone '<' that does not open a tag is literal text.
        let from = if self.input[start..].starts_with('<') {
            start + 1
        } else {
            start
        };
        let end = self.input[from..]
            .find('<')
            .map_or(self.input.len(), |i| from + i);
        self.pos = end;
        let text = decode_entities(&self.input[start..end]);
        let node = self.dom.create_text(&text);
        let parent = self.current();
        self.dom.append_child(parent, node);
    }

    fn comment(&mut self) -> Result<()> {
        let start = self.pos;
        let body_start = start + "<!--".len();
        // `<!-->` and `<!--->` are complete empty comments.
        for abrupt in [">", "->"] {
            if self.input[body_start..].starts_with(abrupt) {
                let node = self.dom.create_comment("");
                let parent = self.current();
                self.dom.append_child(parent, node);
                self.pos = body_start + abrupt.len();
                return Ok(());
            }
        }
        let len = self.input[body_start..]
            .find("-->")
            .ok_or_else(|| self.error(start, "unterminated comment"))?;
        let node = self
            .dom
            .create_comment(&self.input[body_start..body_start + len]);
        let parent = self.current();
        self.dom.append_child(parent, node);
        self.pos = body_start + len + "-->".len();
        Ok(())
    }

    fn skip_declaration(&mut self) -> Result<()> {
        let start = self.pos;
        let len = self.input[start..]
            .find('>')
            .ok_or_else(|| self.error(start, "unterminated declaration"))?;
        self.pos = start + len + 1;
        Ok(())
    }

    fn end_tag(&mut self) -> Result<()> {
        let start = self.pos;
        let len = self.input[start..]
            .find('>')
            .ok_or_else(|| self.error(start, "unterminated end tag"))?;
        let name = self.input[start + 2..start + len].trim().to_ascii_lowercase();
        self.pos = start + len + 1;

        let position = self
            .open
            .iter()
            .skip(1)
            .rposition(|&id| self.dom.tag_name(id) == Some(name.as_str()));
        match position {
            // `rposition` on the skipped iterator counts from index 1.
            Some(index) => {
                self.open.truncate(index + 1);
                Ok(())
            }
            None if is_void(&name) => Ok(()),
            None => Err(self.error(start, format!("unexpected end tag </{}>", name))),
        }
    }

    fn start_tag(&mut self) -> Result<()> {
        let input = self.input;
        let start = self.pos;
        self.pos += 1;
        let name = self.take_while(|c| !c.is_whitespace() && c != '>' && c != '/');
        let tag = name.to_ascii_lowercase();
        let element = self.dom.create_element(&tag);

        let self_closing = loop {
            self.skip_whitespace();
            let rest = &input[self.pos..];
            if rest.is_empty() {
                return Err(self.error(start, format!("unterminated start tag <{}>", tag)));
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                break true;
            }
            if rest.starts_with('>') {
                self.pos += 1;
                break false;
            }
            if rest.starts_with('/') {
                self.pos += 1;
                continue;
            }
            let (key, value) = self.attribute(start)?;
            if self.dom.get_attribute(element, &key).is_none() {
                self.dom.set_attribute(element, &key, &value);
            }
        };

        let parent = self.current();
        self.dom.append_child(parent, element);
        if !self_closing && !is_void(&tag) {
            self.open.push(element);
        }
        Ok(())
    }

    fn attribute(&mut self, tag_start: usize) -> Result<(String, String)> {
        let input = self.input;
        let key = self
            .take_while(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/')
            .to_ascii_lowercase();
        if key.is_empty() {
            return Err(self.error(self.pos, "malformed attribute"));
        }
        self.skip_whitespace();
        if !input[self.pos..].starts_with('=') {
            return Ok((key, String::new()));
        }
        self.pos += 1;
        self.skip_whitespace();

        let rest = &input[self.pos..];
        let raw = match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let len = rest[1..].find(quote).ok_or_else(|| {
                    self.error(tag_start, format!("unterminated value for attribute {}", key))
                })?;
                self.pos += len + 2;
                &rest[1..1 + len]
            }
            Some(_) => self.take_while(|c| !c.is_whitespace() && c != '>'),
            None => return Err(self.error(tag_start, "unterminated start tag")),
        };
        Ok((key, decode_entities(raw)))
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let input = self.input;
        let start = self.pos;
        let len = input[start..]
            .find(|c: char| !pred(c))
            .unwrap_or(input.len() - start);
        self.pos = start + len;
        &input[start..start + len]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }
}

/// Longest character reference recognised, `&` and `;` included.
const MAX_REFERENCE_LEN: usize = 32;

/// Replace character references with the characters they name. Unknown or
/// malformed references are kept verbatim.
fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let semi = rest
            .bytes()
            .take(MAX_REFERENCE_LEN)
            .position(|b| b == b';');
        match semi.and_then(|semi| Some((lookup_entity(&rest[1..semi])?, semi))) {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &rest[semi + 1..];
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

fn lookup_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

/// Serialize `node`: elements as outer HTML, documents and fragments as the
/// concatenation of their children.
pub fn to_html(dom: &Dom, node: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, node, &mut out);
    out
}

/// Serialize the children of `node`.
pub fn inner_html(dom: &Dom, node: NodeId) -> String {
    let mut out = String::new();
    for &child in dom.children(node) {
        write_node(dom, child, &mut out);
    }
    out
}

/// Pending serialization work: a node to open, or an element end tag.
enum Step<'a> {
    Node(NodeId),
    Close(&'a str),
}

fn write_node(dom: &Dom, node: NodeId, out: &mut String) {
    let mut stack = vec![Step::Node(node)];
    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Node(node) => node,
            Step::Close(tag) => {
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                continue;
            }
        };
        match dom.data(node) {
            NodeData::Document | NodeData::Fragment => {
                stack.extend(dom.children(node).iter().rev().map(|&c| Step::Node(c)));
            }
            NodeData::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (key, value) in attributes {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    escape_into(value, true, out);
                    out.push('"');
                }
                out.push('>');
                if is_void(tag) {
                    continue;
                }
                stack.push(Step::Close(tag));
                stack.extend(dom.children(node).iter().rev().map(|&c| Step::Node(c)));
            }
            NodeData::Text(text) => escape_into(text, false, out),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}
