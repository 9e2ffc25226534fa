//! Lexer for the results notation.
//!
//! Grammar: `r | t | u | o[0-9]+ | e-?[0-9]+`, separated by any amount
//! of whitespace (or none). Anything else is a MalformedToken, as is an
//! overbump of zero places. Error lines and columns are 1-based and count
//! characters.

use crate::{
    error::{BumpsError, BumpsResult},
    types::Movement,
};
use std::{fmt, iter::Peekable, str::CharIndices};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `r`: no bump, crew holds its place.
    RowOver,
    /// `t`: racing stopped; the rest of the division has no result.
    Technical,
    /// `u`: the crew catches the crew directly ahead.
    BumpUp,
    /// `oN`: the crew catches the crew N places ahead.
    Overbump(usize),
    /// `eN`: explicit signed movement, used for corrections.
    ExactMove(Movement),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::RowOver      => write!(f, "r"),
            Token::Technical    => write!(f, "t"),
            Token::BumpUp       => write!(f, "u"),
            Token::Overbump(n)  => write!(f, "o{n}"),
            Token::ExactMove(n) => write!(f, "e{n}"),
        }
    }
}

/// Split results text into tokens.
pub fn tokenize(text: &str) -> BumpsResult<Vec<Token>> {
    let mut tokens = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let mut chars = line.char_indices().peekable();

        while let Some((col, ch)) = chars.next() {
            let malformed = || BumpsError::MalformedToken {
                line:   line_idx + 1,
                column: line[..col].chars().count() + 1,
                text:   word_at(line, col),
            };

            let token = match ch {
                c if c.is_whitespace() => continue,
                'r' => Token::RowOver,
                't' => Token::Technical,
                'u' => Token::BumpUp,
                'o' => {
                    let digits = take_digits(&mut chars);
                    let up = digits
                        .parse::<usize>()
                        .ok()
                        .filter(|&n| n > 0)
                        .ok_or_else(malformed)?;
                    Token::Overbump(up)
                }
                'e' => {
                    let negative = matches!(chars.peek(), Some((_, '-')));
                    if negative {
                        chars.next();
                    }
                    let digits = take_digits(&mut chars);
                    let value = digits.parse::<Movement>().map_err(|_| malformed())?;
                    Token::ExactMove(if negative { -value } else { value })
                }
                _ => return Err(malformed()),
            };
            tokens.push(token);
        }
    }

    Ok(tokens)
}

/// Render tokens back to text, no separators.
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(Token::to_string).collect()
}

fn take_digits(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}

fn word_at(line: &str, start: usize) -> String {
    line[start..]
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_every_token_kind() {
        let tokens = tokenize("r t u o3 e-2 e4").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::RowOver,
                Token::Technical,
                Token::BumpUp,
                Token::Overbump(3),
                Token::ExactMove(-2),
                Token::ExactMove(4),
            ]
        );
    }

    #[test]
    fn tokens_need_no_separator() {
        let tokens = tokenize("ruo13rr").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::RowOver,
                Token::BumpUp,
                Token::Overbump(13),
                Token::RowOver,
                Token::RowOver,
            ]
        );
    }

    #[test]
    fn multi_line_text_is_one_stream() {
        let tokens = tokenize("ur\n  rru \n").unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(render(&tokens), "urrru");
    }

    #[test]
    fn unknown_character_is_malformed() {
        let err = tokenize("rr\nru x9 r").unwrap_err();
        match err {
            BumpsError::MalformedToken { line, column, text } => {
                assert_eq!(line, 2);
                assert_eq!(column, 4);
                assert_eq!(text, "x9");
            }
            other => panic!("expected MalformedToken, got {other:?}"),
        }
    }

    #[test]
    fn column_counts_characters_not_bytes() {
        // Two no-break spaces, two bytes each, before the bad token.
        let err = tokenize("r\u{a0}\u{a0}x").unwrap_err();
        assert!(matches!(err, BumpsError::MalformedToken { line: 1, column: 4, .. }));
    }

    #[test]
    fn overbump_without_count_is_malformed() {
        assert!(matches!(
            tokenize("r o r"),
            Err(BumpsError::MalformedToken { .. })
        ));
        assert!(matches!(
            tokenize("o0"),
            Err(BumpsError::MalformedToken { .. })
        ));
        assert!(matches!(
            tokenize("e-"),
            Err(BumpsError::MalformedToken { .. })
        ));
    }

    #[test]
    fn display_round_trips_through_lexer() {
        let tokens = vec![Token::Overbump(5), Token::ExactMove(-1), Token::Technical];
        assert_eq!(tokenize(&render(&tokens)).unwrap(), tokens);
    }
}
