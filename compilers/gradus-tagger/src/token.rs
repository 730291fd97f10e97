/// Byte range of a token inside the tagged text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken<'a> {
    /// Alphabetic run, including an elided article such as `l'`.
    Word(&'a str),
    /// Digit run with an optional ordinal marker (`3`, `1°`, `2ª`).
    Number(&'a str),
    Punct(char),
}

/// Ordinal indicators that may trail a digit run.
pub const ORDINAL_MARKERS: [char; 4] = ['°', 'º', 'ª', '′'];

impl RawToken<'_> {
    pub fn is_ordinal_number(&self) -> bool {
        matches!(self, RawToken::Number(s) if s.ends_with(ORDINAL_MARKERS))
    }
}
