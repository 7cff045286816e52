//! A forgiving-but-strict parser for a small HTML-like markup subset.
//!
//! Supported: elements with quoted, unquoted or bare attributes, self-closing
//! tags, void elements, comments, doctype declarations, raw-text `style` and
//! `script` bodies, and the common character references. Mismatched or
//! unclosed tags are errors rather than being repaired.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1, take_until, take_while, take_while1};
use nom::character::complete::{char, multispace0, multispace1, none_of};
use nom::combinator::{cut, map, not, opt, recognize, value};
use nom::error::{context, VerboseError, VerboseErrorKind};
use nom::multi::{many0, many1};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;

use crate::document::{Document, NodeId};
use crate::element::{Child, Element};
use crate::error::{DomError, Result};

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

type ParseResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Parse markup into templates.
pub fn parse(src: &str) -> Result<Vec<Child>> {
    let mut roots: Vec<Child> = Vec::new();
    // Open elements with the byte offset of their start tag.
    let mut stack: Vec<(Element, usize)> = Vec::new();
    let mut rest = src;

    while !rest.is_empty() {
        let start = src.len() - rest.len();
        let (after, token) = token(rest).map_err(|err| nom_error(src, err))?;
        rest = after;

        match token {
            Token::Skip => {}
            Token::Text(text) => {
                push_child(&mut stack, &mut roots, Child::Text(decode_entities(text)));
            }
            Token::Close(name) => {
                let Some((element, _)) = stack.pop() else {
                    return Err(DomError::Markup {
                        position: start,
                        message: format!("unexpected closing tag </{name}>"),
                    });
                };
                if element.tag != name {
                    return Err(DomError::Markup {
                        position: start,
                        message: format!("expected </{}>, found </{name}>", element.tag),
                    });
                }
                push_child(&mut stack, &mut roots, element.into());
            }
            Token::Open(element, self_closing) => {
                let tag_name = element.tag.as_str();
                if self_closing || VOID_ELEMENTS.contains(&tag_name) {
                    push_child(&mut stack, &mut roots, element.into());
                } else if RAW_TEXT_ELEMENTS.contains(&tag_name) {
                    let close = format!("</{tag_name}>");
                    let (after, body) = raw_text(rest, &close).map_err(|_| DomError::Markup {
                        position: start,
                        message: format!("unclosed <{tag_name}>"),
                    })?;
                    rest = after;
                    let element = if body.is_empty() {
                        element
                    } else {
                        element.text(body)
                    };
                    push_child(&mut stack, &mut roots, element.into());
                } else {
                    stack.push((element, start));
                }
            }
        }
    }

    if let Some((element, position)) = stack.pop() {
        return Err(DomError::Markup {
            position,
            message: format!("unclosed <{}>", element.tag),
        });
    }
    Ok(roots)
}

impl Document {
    /// Parse `src` and append the result to `parent`. Returns the top-level nodes.
    pub fn append_markup(&mut self, parent: NodeId, src: &str) -> Result<Vec<NodeId>> {
        let children = parse(src)?;
        self.mount_children(parent, &children)
    }
}

#[derive(Clone)]
enum Token<'a> {
    /// Comments and declarations.
    Skip,
    Text(&'a str),
    Open(Element, bool),
    Close(String),
}

fn token(input: &str) -> ParseResult<'_, Token<'_>> {
    alt((
        value(Token::Skip, comment),
        value(Token::Skip, declaration),
        map(close_tag, Token::Close),
        map(open_tag, |(element, self_closing)| Token::Open(element, self_closing)),
        map(take_till1(|c| c == '<'), Token::Text),
    ))(input)
}

fn comment(input: &str) -> ParseResult<'_, &str> {
    preceded(
        tag("<!--"),
        cut(context("end of comment", terminated(take_until("-->"), tag("-->")))),
    )(input)
}

fn declaration(input: &str) -> ParseResult<'_, &str> {
    preceded(
        tag("<!"),
        cut(context("end of declaration", terminated(take_until(">"), char('>')))),
    )(input)
}

fn close_tag(input: &str) -> ParseResult<'_, String> {
    preceded(
        tag("</"),
        cut(context("closing tag", terminated(name, pair(multispace0, char('>'))))),
    )(input)
}

/// `<name attr=value ...>` or `<name ... />`.
fn open_tag(input: &str) -> ParseResult<'_, (Element, bool)> {
    let (rest, (name, (attributes, self_closing))) = pair(
        preceded(char('<'), name),
        cut(context(
            "end of tag",
            pair(
                many0(preceded(multispace1, attribute)),
                preceded(
                    multispace0,
                    alt((value(true, tag("/>")), value(false, char('>')))),
                ),
            ),
        )),
    )(input)?;

    let element = attributes
        .into_iter()
        .fold(Element::new(name), |element, (name, value)| element.attr(name, value));
    Ok((rest, (element, self_closing)))
}

/// `name`, `name=value`, `name="value"` or `name='value'`. Bare names get an empty value.
fn attribute(input: &str) -> ParseResult<'_, (String, String)> {
    let (rest, (name, value)) = pair(
        name,
        opt(preceded(
            tuple((multispace0, char('='), multispace0)),
            cut(context(
                "attribute value",
                alt((quoted('"'), quoted('\''), unquoted)),
            )),
        )),
    )(input)?;
    Ok((rest, (name, value.map(decode_entities).unwrap_or_default())))
}

fn quoted<'a>(quote: char) -> impl FnMut(&'a str) -> ParseResult<'a, &'a str> {
    delimited(char(quote), take_while(move |c| c != quote), char(quote))
}

/// Unquoted values run to whitespace or `>`; a `/` directly before `>` closes the tag.
fn unquoted(input: &str) -> ParseResult<'_, &str> {
    recognize(many1(alt((
        recognize(none_of(" \t\r\n>/")),
        recognize(terminated(char('/'), not(char('>')))),
    ))))(input)
}

fn name(input: &str) -> ParseResult<'_, String> {
    map(
        take_while1(|c: char| c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '.' | '@')),
        str::to_ascii_lowercase,
    )(input)
}

/// Everything up to `close`, consuming `close` too.
fn raw_text<'a>(input: &'a str, close: &str) -> ParseResult<'a, &'a str> {
    terminated(take_until(close), tag(close))(input)
}

fn nom_error(src: &str, err: nom::Err<VerboseError<&str>>) -> DomError {
    let (position, message) = match err {
        nom::Err::Error(err) | nom::Err::Failure(err) => {
            let position = err
                .errors
                .first()
                .map_or(src.len(), |(rest, _)| src.len() - rest.len());
            let message = err
                .errors
                .iter()
                .find_map(|(_, kind)| match kind {
                    VerboseErrorKind::Context(label) => Some(format!("expected {label}")),
                    _ => None,
                })
                .unwrap_or_else(|| "unexpected input".to_string());
            (position, message)
        }
        nom::Err::Incomplete(_) => (src.len(), "unexpected end of input".to_string()),
    };
    DomError::Markup { position, message }
}

fn push_child(stack: &mut [(Element, usize)], roots: &mut Vec<Child>, child: Child) {
    match stack.last_mut() {
        Some((parent, _)) => parent.children.push(child),
        None => roots.push(child),
    }
}

/// Decode `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;` and numeric
/// references. Unknown references are kept verbatim.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest.find(';').and_then(|semi| {
            let name = &rest[1..semi];
            let c = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => name
                    .strip_prefix("#x")
                    .or_else(|| name.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| name.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, semi))
        });

        match decoded {
            Some((c, semi)) => {
                out.push(c);
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
