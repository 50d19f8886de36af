// src/text_analysis/tokenizer.rs
use serde::Serialize;

/// A slice of the source text, with byte offsets into it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    fn new(source: &str, start: usize, end: usize) -> Self {
        Self {
            text: source[start..end].to_string(),
            start,
            end,
        }
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn is_word(&self) -> bool {
        self.text.chars().next().map_or(false, |c| c.is_alphabetic())
    }

    pub fn is_number(&self) -> bool {
        self.text.chars().next().map_or(false, |c| c.is_ascii_digit())
    }

    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().map_or(false, |c| c.is_uppercase())
    }
}

const CLITICS: [&str; 6] = ["'s", "'re", "'ve", "'ll", "'d", "'m"];

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Split text into word, number, clitic and punctuation tokens.
///
/// Words are runs of alphanumeric characters with inner apostrophes.
/// Numbers keep inner `.` and `,` between digits ("3.5", "10,000").
/// Contractions are split the usual English way: "don't" -> "do" "n't",
/// "I'm" -> "I" "'m". Every other non-space character is its own token.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (start, c) = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() {
            let mut j = i + 1;
            while j < chars.len() {
                let ch = chars[j].1;
                let inner_separator = (ch == '.' || ch == ',')
                    && chars.get(j + 1).map_or(false, |(_, n)| n.is_ascii_digit());
                if ch.is_ascii_digit() || inner_separator {
                    j += 1;
                } else {
                    break;
                }
            }
            let end = byte_end(text, &chars, j);
            tokens.push(Token::new(text, start, end));
            i = j;
            continue;
        }

        if c.is_alphanumeric() {
            let mut j = i + 1;
            while j < chars.len() {
                let ch = chars[j].1;
                let inner_apostrophe = is_apostrophe(ch)
                    && chars.get(j + 1).map_or(false, |(_, n)| n.is_alphabetic());
                if ch.is_alphanumeric() || inner_apostrophe {
                    j += 1;
                } else {
                    break;
                }
            }
            let end = byte_end(text, &chars, j);
            push_word(text, start, end, &mut tokens);
            i = j;
            continue;
        }

        let end = byte_end(text, &chars, i + 1);
        tokens.push(Token::new(text, start, end));
        i += 1;
    }

    tokens
}

fn byte_end(text: &str, chars: &[(usize, char)], index: usize) -> usize {
    chars.get(index).map_or(text.len(), |(offset, _)| *offset)
}

/// Push a word, peeling off a trailing clitic when there is one
fn push_word(text: &str, start: usize, end: usize, tokens: &mut Vec<Token>) {
    let word = &text[start..end];
    let normalized = word.replace('\u{2019}', "'").to_lowercase();

    // "n't" attaches to the negation, not to the verb: "don't" -> "do" + "n't"
    if normalized.ends_with("n't") && normalized.len() > 3 {
        let split = end - byte_len_of_suffix(word, 3);
        tokens.push(Token::new(text, start, split));
        tokens.push(Token::new(text, split, end));
        return;
    }

    for clitic in CLITICS {
        if normalized.ends_with(clitic) && normalized.len() > clitic.len() {
            let split = end - byte_len_of_suffix(word, clitic.chars().count());
            tokens.push(Token::new(text, start, split));
            tokens.push(Token::new(text, split, end));
            return;
        }
    }

    tokens.push(Token::new(text, start, end));
}

fn byte_len_of_suffix(word: &str, char_count: usize) -> usize {
    word.chars().rev().take(char_count).map(char::len_utf8).sum()
}
