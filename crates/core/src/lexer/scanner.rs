use crate::token::{Token, TokenKind};

/// Characters that end an atom and form a one-character atom of their own.
pub const SPLIT_CHARS: [char; 13] = [
    '.', '!', '?', ':', ',', '(', ')', '"', '\'', ' ', '\t', '\\', '\n',
];

/// Split `src` into atoms. Every split character is its own atom; each
/// maximal run of other characters is one atom. Offsets are byte offsets.
pub fn scan(src: &str) -> Vec<Token> {
    atoms(src)
        .map(|(start, text)| Token::new(start, text, TokenKind::Unknown))
        .collect()
}

/// Borrowing form of [`scan`]: `(byte offset, text)` pairs.
pub fn atoms(src: &str) -> Atoms<'_> {
    Atoms { src, pos: 0 }
}

pub struct Atoms<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Iterator for Atoms<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.src[self.pos..];
        let first = rest.chars().next()?;
        let start = self.pos;

        let len = if SPLIT_CHARS.contains(&first) {
            first.len_utf8()
        } else {
            rest.find(|c| SPLIT_CHARS.contains(&c)).unwrap_or(rest.len())
        };
        self.pos += len;
        Some((start, &self.src[start..self.pos]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(src: &str) -> Vec<String> {
        scan(src).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn empty_source_has_no_atoms() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn splits_on_every_split_char() {
        assert_eq!(
            texts("Hello World!"),
            vec!["Hello", " ", "World", "!"]
        );
        assert_eq!(
            texts("That's all."),
            vec!["That", "'", "s", " ", "all", "."]
        );
        assert_eq!(texts("a\tb\\c"), vec!["a", "\t", "b", "\\", "c"]);
    }

    #[test]
    fn adjacent_split_chars_are_separate_atoms() {
        assert_eq!(texts("!?\n"), vec!["!", "?", "\n"]);
    }

    #[test]
    fn offsets_are_exact_bytes() {
        let src = "Dear Princess: é!";
        for atom in scan(src) {
            assert_eq!(&src[atom.start..atom.end()], atom.text);
        }
        let last = scan(src).pop().unwrap();
        assert_eq!(last.start, src.len() - 1);
    }

    #[test]
    fn borrowed_atoms_match_owned_scan() {
        let src = "That's what I would do.";
        let borrowed: Vec<&str> = atoms(src).map(|(_, t)| t).collect();
        assert_eq!(borrowed, texts(src));
    }

    #[test]
    fn negative_number_stays_one_atom() {
        assert_eq!(texts("-1.5"), vec!["-1", ".", "5"]);
    }
}
