//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::geometry::{Bounds, FigureSize};
use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse layout file source into a syntax tree
pub fn parse(input: &str) -> Result<LayoutFile, Vec<crate::ParseError>> {
    let len = input.len();

    let (tokens, invalid) = crate::parser::lexer::lex(input);
    if !invalid.is_empty() {
        return Err(invalid
            .into_iter()
            .map(|span| crate::ParseError::unexpected_character(input, span))
            .collect());
    }

    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    layout_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn layout_parser<'a, I>() -> impl Parser<'a, I, LayoutFile, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    // Numbers, including negative via Minus token
    let number = just(Token::Minus)
        .or_not()
        .then(select! { Token::Number(n) => n })
        .map(|(neg, n)| if neg.is_some() { -n } else { n });

    let comment = select! { Token::Comment(c) => c };
    let comments = comment.clone().repeated().collect::<Vec<_>>();

    // (xll, yll, w, h)
    let bounds_tuple = number
        .clone()
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::ParenOpen), just(Token::ParenClose))
        .try_map(|values: Vec<f64>, span| match values.as_slice() {
            [xll, yll, w, h] => Ok(Bounds::new(*xll, *yll, *w, *h)),
            _ => Err(Rich::custom(
                span,
                format!(
                    "expected 4 numbers (xll, yll, w, h), found {}",
                    values.len()
                ),
            )),
        })
        .map_with(|b, e| Spanned::new(b, span_range(&e.span())));

    // A comment on the same line right after a tuple names the panel. The
    // lexer already dropped comments standing on their own line.
    let entry = comments
        .clone()
        .ignore_then(bounds_tuple)
        .then_ignore(just(Token::Comma).or_not())
        .then(
            comment
                .clone()
                .map_with(|c, e| Spanned::new(c, span_range(&e.span())))
                .or_not(),
        )
        .map(|(bounds, name)| Entry { bounds, name });

    // figsize = (w, h)
    let figsize_decl = just(Token::Figsize)
        .ignore_then(just(Token::Equals))
        .ignore_then(
            number
                .clone()
                .then_ignore(just(Token::Comma))
                .then(number.clone())
                .then_ignore(just(Token::Comma).or_not())
                .delimited_by(just(Token::ParenOpen), just(Token::ParenClose)),
        )
        .map_with(|(w, h), e| Spanned::new(FigureSize::new(w, h), span_range(&e.span())));

    // bounds = [ entry* ]
    let bounds_decl = just(Token::Bounds)
        .ignore_then(just(Token::Equals))
        .ignore_then(
            entry
                .repeated()
                .collect::<Vec<_>>()
                .then_ignore(comments.clone())
                .delimited_by(just(Token::BracketOpen), just(Token::BracketClose)),
        );

    comments
        .clone()
        .ignore_then(figsize_decl.then_ignore(comments.clone()).or_not())
        .then(bounds_decl)
        .then_ignore(comments)
        .then_ignore(end())
        .map(|(figsize, entries)| LayoutFile { figsize, entries })
}
