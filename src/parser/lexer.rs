//! Lexer for layout files using logos
//!
//! A `#` comment that shares a line with earlier tokens is kept, since a comment
//! after a tuple names that panel. Comments on a line of their own are free text
//! and are dropped here.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Statement keywords
    #[token("figsize")]
    Figsize,
    #[token("bounds")]
    Bounds,

    // Punctuation
    #[token("=")]
    Equals,
    #[token(",")]
    Comma,
    #[token("-")]
    Minus,
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    /// `# text` comment; after a tuple it names the panel
    #[regex(r"#[^\n]*", |lex| lex.slice()[1..].trim().to_string())]
    Comment(String),

    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,
}

/// Lex input into tokens with spans, plus the spans that did not form a token
pub fn lex(input: &str) -> (Vec<(Token, Span)>, Vec<Span>) {
    let mut tokens = Vec::new();
    let mut invalid = Vec::new();
    let mut line_start = true;
    let mut last_end = 0;
    for (tok, span) in Token::lexer(input).spanned() {
        if input[last_end..span.start].contains('\n') {
            line_start = true;
        }
        last_end = span.end;
        match tok {
            Ok(Token::Comment(_)) if line_start => {}
            Ok(t) => {
                tokens.push((t, span));
                line_start = false;
            }
            Err(()) => {
                invalid.push(span);
                line_start = false;
            }
        }
    }
    (tokens, invalid)
}
