//! A small subset of CSS selectors.
//!
//! Supported: type (`div`), universal (`*`), class (`.a`), id (`#a`),
//! attribute presence (`[a]`) and equality (`[a=b]`, `[a="b"]`) compounds,
//! the descendant (` `) and child (`>`) combinators, and comma-separated
//! selector lists. Matching never looks past the element's tree scope.

use nom::branch::alt;
use nom::bytes::complete::{take_while, take_while1};
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::{all_consuming, cut, map, opt, value, verify};
use nom::error::{context, VerboseError, VerboseErrorKind};
use nom::multi::{many0, separated_list1};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::{Finish, IResult};

use crate::document::{Document, NodeId};
use crate::error::{DomError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Complex>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    /// Compounds left to right.
    compounds: Vec<Compound>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self> {
        let (_, alternatives) = all_consuming(selector_list)(input)
            .finish()
            .map_err(|err| DomError::InvalidSelector {
                selector: input.to_string(),
                reason: describe(input, &err),
            })?;
        Ok(Self { alternatives })
    }

    /// Whether `element` matches any alternative of this selector.
    pub fn matches(&self, doc: &Document, element: NodeId) -> bool {
        doc.is_element(element)
            && self.alternatives.iter().any(|complex| {
                let last = complex.compounds.len() - 1;
                complex.matches_at(doc, last, element)
            })
    }
}

impl std::str::FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Complex {
    fn matches_at(&self, doc: &Document, index: usize, element: NodeId) -> bool {
        if !self.compounds[index].matches(doc, element) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match self.combinators[index - 1] {
            Combinator::Child => doc
                .parent_element(element)
                .is_some_and(|parent| self.matches_at(doc, index - 1, parent)),
            Combinator::Descendant => {
                let mut current = doc.parent_element(element);
                while let Some(ancestor) = current {
                    if self.matches_at(doc, index - 1, ancestor) {
                        return true;
                    }
                    current = doc.parent_element(ancestor);
                }
                false
            }
        }
    }
}

impl Compound {
    fn matches(&self, doc: &Document, element: NodeId) -> bool {
        let Some(data) = doc.element_data(element) else {
            return false;
        };

        if let Some(tag) = &self.tag {
            if data.tag != *tag {
                return false;
            }
        }

        if let Some(id) = &self.id {
            if data.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }

        if !self.classes.iter().all(|c| data.classes.contains(c)) {
            return false;
        }

        self.attributes.iter().all(|(name, expected)| {
            let actual = if name == "class" {
                (!data.classes.is_empty()).then(|| data.classes.to_string())
            } else {
                data.attribute(name).map(str::to_string)
            };
            match (actual, expected) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == *expected,
            }
        })
    }
}

type ParseResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// One simple selector inside a compound.
enum Simple {
    Class(String),
    Id(String),
    Attribute(String, Option<String>),
}

fn selector_list(input: &str) -> ParseResult<'_, Vec<Complex>> {
    separated_list1(char(','), delimited(multispace0, complex, multispace0))(input)
}

/// Compounds joined by `>` or whitespace.
fn complex(input: &str) -> ParseResult<'_, Complex> {
    let (rest, (first, tail)) = pair(compound, many0(pair(combinator, compound)))(input)?;

    let mut compounds = vec![first];
    let mut combinators = Vec::with_capacity(tail.len());
    for (combinator, compound) in tail {
        combinators.push(combinator);
        compounds.push(compound);
    }
    Ok((
        rest,
        Complex {
            compounds,
            combinators,
        },
    ))
}

fn combinator(input: &str) -> ParseResult<'_, Combinator> {
    alt((
        value(
            Combinator::Child,
            delimited(multispace0, char('>'), multispace0),
        ),
        value(Combinator::Descendant, multispace1),
    ))(input)
}

/// An optional type or universal selector followed by classes, ids and
/// attribute selectors. At least one part is required.
fn compound(input: &str) -> ParseResult<'_, Compound> {
    let type_selector = alt((
        value(None, char('*')),
        map(ident, |tag| Some(tag.to_ascii_lowercase())),
    ));
    let (rest, (tag, simples)) = context(
        "compound selector",
        verify(
            pair(opt(type_selector), many0(simple)),
            |(tag, simples): &(Option<Option<String>>, Vec<Simple>)| {
                tag.is_some() || !simples.is_empty()
            },
        ),
    )(input)?;

    let mut compound = Compound {
        tag: tag.flatten(),
        ..Compound::default()
    };
    for simple in simples {
        match simple {
            Simple::Class(class) => compound.classes.push(class),
            Simple::Id(id) => compound.id = Some(id),
            Simple::Attribute(name, value) => compound.attributes.push((name, value)),
        }
    }
    Ok((rest, compound))
}

fn simple(input: &str) -> ParseResult<'_, Simple> {
    alt((
        map(preceded(char('.'), cut(context("class name", ident))), |class| {
            Simple::Class(class.to_string())
        }),
        map(preceded(char('#'), cut(context("id", ident))), |id| {
            Simple::Id(id.to_string())
        }),
        preceded(
            char('['),
            cut(context("attribute selector", terminated(attribute, char(']')))),
        ),
    ))(input)
}

/// The inside of `[name]` or `[name=value]`.
fn attribute(input: &str) -> ParseResult<'_, Simple> {
    let (rest, (name, value, _)) = tuple((
        delimited(multispace0, ident, multispace0),
        opt(preceded(
            pair(char('='), multispace0),
            alt((quoted('"'), quoted('\''), ident)),
        )),
        multispace0,
    ))(input)?;
    Ok((
        rest,
        Simple::Attribute(name.to_ascii_lowercase(), value.map(str::to_string)),
    ))
}

fn quoted<'a>(quote: char) -> impl FnMut(&'a str) -> ParseResult<'a, &'a str> {
    delimited(char(quote), take_while(move |c| c != quote), char(quote))
}

fn ident(input: &str) -> ParseResult<'_, &str> {
    take_while1(is_ident_char)(input)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// A one-line reason for a failed parse: the innermost context, and where.
fn describe(input: &str, err: &VerboseError<&str>) -> String {
    let label = err.errors.iter().find_map(|(_, kind)| match kind {
        VerboseErrorKind::Context(label) => Some(*label),
        _ => None,
    });
    let Some((rest, kind)) = err.errors.first() else {
        return "invalid selector".to_string();
    };
    let offset = input.len() - rest.len();
    let found = match rest.chars().next() {
        Some(c) => format!("'{c}'"),
        None => "end of input".to_string(),
    };
    match (label, kind) {
        (Some(label), _) => format!("expected {label} at byte {offset}, found {found}"),
        (None, VerboseErrorKind::Char(expected)) => {
            format!("expected '{expected}' at byte {offset}, found {found}")
        }
        (None, _) => format!("unexpected {found} at byte {offset}"),
    }
}
