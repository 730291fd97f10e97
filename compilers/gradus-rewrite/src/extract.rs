use nom::{
    bytes::complete::{tag, take_till, take_till1, take_until},
    character::complete::{anychar, char},
    combinator::{peek, verify},
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

/// How the rewritten text is marked inside a capability response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `<text>...</text>`, attributes on the opening tag allowed.
    Tag(String),
    /// `<...>`
    Angle,
    /// `[...]`
    Square,
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::Tag("text".to_owned())
    }
}

fn tagged<'a>(input: &'a str, name: &str, closing: &str) -> IResult<&'a str, &'a str> {
    let open = tuple((
        char('<'),
        tag(name),
        peek(verify(anychar, |c: &char| *c == '>' || c.is_whitespace())),
        take_till(|c| c == '>'),
        char('>'),
    ));
    delimited(open, take_until(closing), tag(closing))(input)
}

fn angle(input: &str) -> IResult<&str, &str> {
    delimited(char('<'), take_till1(|c| c == '>'), char('>'))(input)
}

fn square(input: &str) -> IResult<&str, &str> {
    preceded(char('['), terminated(take_until("]"), char(']')))(input)
}

/// Runs `parser` at every occurrence of `opener` and returns the first match.
fn first_match<'a, P>(input: &'a str, opener: char, mut parser: P) -> Option<&'a str>
where
    P: FnMut(&'a str) -> IResult<&'a str, &'a str>,
{
    input
        .match_indices(opener)
        .find_map(|(start, _)| parser(&input[start..]).ok().map(|(_, found)| found))
}

impl Delimiter {
    /// The delimited span of `response`, or `None` when the response is malformed.
    pub fn extract<'a>(&self, response: &'a str) -> Option<&'a str> {
        match self {
            Delimiter::Tag(name) => {
                let closing = format!("</{name}>");
                first_match(response, '<', |input| tagged(input, name, &closing))
            }
            Delimiter::Angle => first_match(response, '<', angle),
            Delimiter::Square => first_match(response, '[', square),
        }
    }

    /// Wraps `text` the way a well-behaved capability would answer.
    pub fn wrap(&self, text: &str) -> String {
        match self {
            Delimiter::Tag(name) => format!("<{name}>{text}</{name}>"),
            Delimiter::Angle => format!("<{text}>"),
            Delimiter::Square => format!("[{text}]"),
        }
    }
}

/// Trims the text and collapses every whitespace run (newlines included) to one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_text_tag_with_attributes() {
        let delimiter = Delimiter::default();
        let response = "Sure! <text lang=\"it\">Io vado\na casa.</text> Done.";
        assert_eq!(delimiter.extract(response), Some("Io vado\na casa."));
    }

    #[test]
    fn test_text_tag_needs_exact_name() {
        let delimiter = Delimiter::default();
        assert_eq!(delimiter.extract("<textual>no</textual>"), None);
        assert_eq!(delimiter.extract("<text>unterminated"), None);
        assert_eq!(
            delimiter.extract("<textual>no</textual><text>yes</text>"),
            Some("yes")
        );
    }

    #[test]
    fn test_angle_and_square() {
        assert_eq!(Delimiter::Angle.extract("answer: <Il gatto dorme.>"), Some("Il gatto dorme."));
        assert_eq!(Delimiter::Angle.extract("<> nothing"), None);
        assert_eq!(Delimiter::Square.extract("x [first] [second]"), Some("first"));
        assert_eq!(Delimiter::Square.extract("no brackets"), None);
    }

    #[test]
    fn test_wrap_is_extractable() {
        for delimiter in [Delimiter::default(), Delimiter::Angle, Delimiter::Square] {
            assert_eq!(delimiter.extract(&delimiter.wrap("ciao")), Some("ciao"));
        }
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  A  B C\n\n D \t"), "A B C D");
        assert_eq!(normalize_whitespace("\n"), "");
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(text in "[ a-c\\n\\t]{0,24}") {
            let once = normalize_whitespace(&text);
            prop_assert_eq!(normalize_whitespace(&once), once.clone());
            prop_assert!(!once.starts_with(' ') && !once.ends_with(' ') && !once.contains("  "));
        }
    }
}
