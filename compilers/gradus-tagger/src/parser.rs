use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0, one_of},
    combinator::{map, opt, recognize},
    sequence::pair,
    IResult,
};

use crate::token::{RawToken, Span, ORDINAL_MARKERS};

const PUNCTUATION: &str = ".,;:?!\"()[]«»-–…/";

fn is_word_char(c: char) -> bool {
    c.is_alphabetic()
}

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '’')
}

/// `casa`, `l'`, `dell'`.
fn word(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(is_word_char),
        opt(nom::character::complete::satisfy(is_apostrophe)),
    ))(input)
}

/// `12`, `1°`, `3ª`.
fn number(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_digit()),
        take_while(|c: char| ORDINAL_MARKERS.contains(&c)),
    ))(input)
}

fn punct(input: &str) -> IResult<&str, char> {
    one_of(PUNCTUATION)(input)
}

/// Splits `original_input` into words, numbers and punctuation with byte spans.
///
/// Unrecognised characters are skipped one at a time, so this never fails.
pub fn parse_with_spans(original_input: &str) -> Vec<(Span, RawToken<'_>)> {
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        let (next_input, _) = match multispace0::<&str, nom::error::Error<&str>>(input) {
            Ok(res) => res,
            Err(_) => break,
        };
        input = next_input;

        if input.is_empty() {
            break;
        }

        let parse_res: IResult<&str, RawToken> = alt((
            map(word, RawToken::Word),
            map(number, RawToken::Number),
            map(punct, RawToken::Punct),
            map(char('\''), RawToken::Punct),
        ))(input);

        match parse_res {
            Ok((next_input, token)) => {
                let len = input.len() - next_input.len();
                let start = input.as_ptr() as usize - original_input.as_ptr() as usize;

                result.push((Span::new(start, start + len), token));
                input = next_input;
            }
            Err(_) => {
                // Skip one char to recover
                if let Some(c) = input.chars().next() {
                    input = &input[c.len_utf8()..];
                } else {
                    break;
                }
            }
        }
    }

    result
}
