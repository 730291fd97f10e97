use nom::{
    bytes::complete::{take_till1, take_while, take_while1},
    IResult,
};

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | '’' | '”' | '»' | ')')
}

fn body(input: &str) -> IResult<&str, &str> {
    take_till1(is_terminator)(input)
}

fn terminators(input: &str) -> IResult<&str, &str> {
    take_while1(is_terminator)(input)
}

fn closers(input: &str) -> IResult<&str, &str> {
    take_while(is_closer)(input)
}

/// Rule-based sentence boundary detection.
///
/// A boundary is a run of `.`, `!`, `?` or `…` (plus closing quotes or
/// brackets) followed by whitespace or the end of the text, so decimals and
/// abbreviations glued to the next word do not split.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSplitter;

impl SentenceSplitter {
    pub fn new() -> Self {
        Self
    }

    /// Byte ranges of the sentences in `text`, trimmed of surrounding whitespace.
    pub fn spans(&self, text: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut input = text;
        let mut start = 0usize;

        let offset = |rest: &str| text.len() - rest.len();

        while !input.is_empty() {
            if let Ok((rest, _)) = body(input) {
                input = rest;
                continue;
            }

            let Ok((rest, _)) = terminators(input) else {
                break;
            };
            let (rest, _) = match closers(rest) {
                Ok(res) => res,
                Err(_) => (rest, ""),
            };
            input = rest;

            let at_boundary = input.chars().next().map_or(true, char::is_whitespace);
            if at_boundary {
                push_trimmed(text, start, offset(input), &mut spans);
                start = offset(input);
            }
        }

        push_trimmed(text, start, text.len(), &mut spans);
        spans
    }

    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.spans(text)
            .into_iter()
            .map(|(start, end)| &text[start..end])
            .collect()
    }
}

/// Anything that cuts a text into sentences, in order, without overlap.
pub trait Segmenter {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

impl Segmenter for SentenceSplitter {
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.split(text)
    }
}

impl<F> Segmenter for F
where
    F: for<'a> Fn(&'a str) -> Vec<&'a str>,
{
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self(text)
    }
}

fn push_trimmed(text: &str, start: usize, end: usize, spans: &mut Vec<(usize, usize)>) {
    let slice = &text[start..end];
    let trimmed_start = start + (slice.len() - slice.trim_start().len());
    let trimmed_end = end - (slice.len() - slice.trim_end().len());
    if trimmed_start < trimmed_end {
        spans.push((trimmed_start, trimmed_end));
    }
}
