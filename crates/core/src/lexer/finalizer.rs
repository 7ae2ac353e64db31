use crate::token::{Token, TokenKind};

/// Strip trivia and postscripts, then close the stream with the EndOfFile
/// sentinel. The sentinel sits at the end offset of the last input token.
pub fn finalize(tokens: Vec<Token>) -> Vec<Token> {
    let eof_at = tokens.last().map_or(0, Token::end);
    let mut out = Vec::with_capacity(tokens.len() + 1);
    let mut in_postscript = false;

    for t in tokens {
        if in_postscript {
            if t.kind == TokenKind::Newline {
                in_postscript = false;
            }
            continue;
        }
        if t.kind == TokenKind::CommentPostscript {
            in_postscript = true;
            continue;
        }
        if t.kind.is_trivia() {
            continue;
        }
        out.push(t);
    }

    out.push(Token::end_of_file(eof_at));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn tok(start: usize, text: &str, kind: TokenKind) -> Token {
        Token::new(start, text, kind)
    }

    #[test]
    fn empty_stream_is_just_eof() {
        let out = finalize(Vec::new());
        assert_eq!(out, vec![Token::end_of_file(0)]);
    }

    #[test]
    fn trivia_is_dropped() {
        let out = finalize(vec![
            tok(0, "Hi", Identifier),
            tok(2, " ", Whitespace),
            tok(3, "(x)", CommentParen),
            tok(6, "\n", Newline),
            tok(7, "!", Punctuation),
        ]);
        let kinds: Vec<TokenKind> = out.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![Identifier, Punctuation, EndOfFile]);
        assert_eq!(out[2].start, 8);
    }

    #[test]
    fn postscript_runs_to_end_of_line() {
        let out = finalize(vec![
            tok(0, "P.S.", CommentPostscript),
            tok(4, " ", Whitespace),
            tok(5, "I said", PrintNewline),
            tok(11, "!", Punctuation),
            tok(12, "\n", Newline),
            tok(13, "Spike", Identifier),
        ]);
        let texts: Vec<&str> = out.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Spike", ""]);
        assert_eq!(out[1].start, 18);
    }

    #[test]
    fn postscript_at_end_of_stream() {
        let out = finalize(vec![
            tok(0, ".", Punctuation),
            tok(1, "P.S.", CommentPostscript),
            tok(5, "bye", Identifier),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].kind, EndOfFile);
        assert_eq!(out[1].start, 8);
    }
}
