//! A small CSS selector subset used to resolve split targets.
//!
//! Supported: type selectors (`p`), the universal selector (`*`), id (`#lead`)
//! and class (`.intro`) selectors, any compound of those (`p.intro#lead`), the
//! descendant combinator (`article p`) and selector lists (`h1, h2`).

use super::document::{Document, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("missing name after '#' or '.' at position {pos}")]
    MissingName { pos: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(tag) = doc.tag(node) else {
            return false;
        };
        if let Some(expected) = &self.tag
            && !expected.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        if let Some(id) = &self.id
            && doc.attribute(node, "id") != Some(id.as_str())
        {
            return false;
        }
        self.classes.iter().all(|class| doc.has_class(node, class))
    }
}

/// Compounds joined by descendant combinators, outermost first
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex(Vec<Compound>);

impl Complex {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some((subject, ancestors)) = self.0.split_last() else {
            return false;
        };
        if !subject.matches(doc, node) {
            return false;
        }
        // Greedy right-to-left walk is exact for descendant-only chains
        let mut current = doc.parent(node);
        for compound in ancestors.iter().rev() {
            loop {
                let Some(candidate) = current else {
                    return false;
                };
                current = doc.parent(candidate);
                if compound.matches(doc, candidate) {
                    break;
                }
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Complex>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut alternatives = Vec::new();
        let mut offset = 0;
        for part in input.split(',') {
            alternatives.push(parse_complex(part, offset)?);
            offset += part.len() + 1;
        }
        Ok(Self { alternatives })
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|complex| complex.matches(doc, node))
    }
}

fn is_name_char(ch: char) -> bool {
    !ch.is_whitespace() && (ch.is_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii())
}

fn parse_complex(input: &str, offset: usize) -> Result<Complex, SelectorError> {
    let mut compounds = Vec::new();
    let mut current: Option<Compound> = None;
    let mut chars = input.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if let Some(done) = current.take() {
                    compounds.push(done);
                }
            }
            '*' => {
                if current.is_some() {
                    return Err(SelectorError::UnexpectedChar {
                        ch,
                        pos: offset + pos,
                    });
                }
                current = Some(Compound::default());
            }
            '#' | '.' => {
                let mut name = String::new();
                while let Some(&(_, next)) = chars.peek() {
                    if !is_name_char(next) {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                if name.is_empty() {
                    return Err(SelectorError::MissingName { pos: offset + pos });
                }
                let compound = current.get_or_insert_with(Compound::default);
                if ch == '#' {
                    compound.id = Some(name);
                } else {
                    compound.classes.push(name);
                }
            }
            c if is_name_char(c) => {
                if current.is_some() {
                    return Err(SelectorError::UnexpectedChar {
                        ch,
                        pos: offset + pos,
                    });
                }
                let mut tag = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !is_name_char(next) {
                        break;
                    }
                    tag.push(next);
                    chars.next();
                }
                current = Some(Compound {
                    tag: Some(tag),
                    ..Compound::default()
                });
            }
            _ => {
                return Err(SelectorError::UnexpectedChar {
                    ch,
                    pos: offset + pos,
                });
            }
        }
    }
    if let Some(done) = current {
        compounds.push(done);
    }

    if compounds.is_empty() {
        return Err(SelectorError::Empty);
    }
    Ok(Complex(compounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// root > article#post > (p.intro.lead "a", div > p "b"), section > p.intro
    fn sample() -> (Document, [NodeId; 5]) {
        let mut doc = Document::new();
        let article = doc.create_element("article");
        doc.set_attribute(article, "id", "post");
        let intro = doc.create_element("p");
        doc.set_attribute(intro, "class", "intro lead");
        let div = doc.create_element("div");
        let nested = doc.create_element("p");
        let section = doc.create_element("section");
        let outside = doc.create_element("p");
        doc.set_attribute(outside, "class", "intro");

        doc.append_child(div, nested);
        doc.append_children(article, [intro, div]);
        doc.append_child(section, outside);
        let root = doc.root();
        doc.append_children(root, [article, section]);
        (doc, [article, intro, nested, section, outside])
    }

    #[rstest]
    #[case("p", 1)]
    #[case("P", 1)]
    #[case("#post", 0)]
    #[case(".intro", 1)]
    #[case("p.lead", 1)]
    #[case("article p", 1)]
    #[case("div p", 2)]
    #[case("section .intro", 4)]
    #[case("aside, section", 3)]
    fn test_query_selector_first_match(#[case] selector: &str, #[case] expected: usize) {
        let (doc, nodes) = sample();
        let found = doc.query_selector(selector).unwrap();
        assert_eq!(found, Some(nodes[expected]), "selector {selector}");
    }

    #[test]
    fn test_universal_selector_matches_root_first() {
        let (doc, _) = sample();
        assert_eq!(doc.query_selector("*").unwrap(), Some(doc.root()));
    }

    #[test]
    fn test_query_selector_all_in_document_order() {
        let (doc, nodes) = sample();
        let found = doc.query_selector_all("p").unwrap();
        assert_eq!(found, vec![nodes[1], nodes[2], nodes[4]]);
    }

    #[test]
    fn test_no_match_returns_none() {
        let (doc, _) = sample();
        assert_eq!(doc.query_selector("#missing").unwrap(), None);
        assert_eq!(doc.query_selector("section div").unwrap(), None);
    }

    #[rstest]
    #[case("", SelectorError::Empty)]
    #[case("   ", SelectorError::Empty)]
    #[case("p,", SelectorError::Empty)]
    #[case("#", SelectorError::MissingName { pos: 0 })]
    #[case("p .", SelectorError::MissingName { pos: 2 })]
    #[case("p[href]", SelectorError::UnexpectedChar { ch: '[', pos: 1 })]
    #[case(".a*", SelectorError::UnexpectedChar { ch: '*', pos: 2 })]
    #[case("div > p", SelectorError::UnexpectedChar { ch: '>', pos: 4 })]
    fn test_parse_errors(#[case] input: &str, #[case] expected: SelectorError) {
        assert_eq!(Selector::parse(input), Err(expected));
    }

    #[rstest]
    #[case("article\u{a0}p", 1)]
    #[case("section\u{3000}p", 4)]
    #[case("#post\u{2003}.intro", 1)]
    fn test_unicode_whitespace_separates_compounds(#[case] input: &str, #[case] expected: usize) {
        let ascii = input.replace(char::is_whitespace, " ");
        assert_eq!(Selector::parse(input), Selector::parse(&ascii));

        let (doc, nodes) = sample();
        assert_eq!(doc.query_selector(input).unwrap(), Some(nodes[expected]));
    }

    #[test]
    fn test_non_ascii_names_still_parse() {
        let mut doc = Document::new();
        let el = doc.create_element("p");
        doc.set_attribute(el, "class", "café");
        let root = doc.root();
        doc.append_child(root, el);

        assert_eq!(doc.query_selector(".café").unwrap(), Some(el));
    }

    #[test]
    fn test_text_nodes_never_match() {
        let mut doc = Document::new();
        let text = doc.create_text("p");
        let selector = Selector::parse("*").unwrap();
        assert!(!selector.matches(&doc, text));
    }
}
