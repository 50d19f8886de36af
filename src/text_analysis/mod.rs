// src/text_analysis/mod.rs
//! Pattern annotation over part-of-speech tagged text

use serde::Serialize;
use std::sync::Arc;

pub mod rules;
pub mod tagger;
pub mod tokenizer;

pub use rules::{Rule, RuleTable, TokenPattern};
pub use tagger::{LexiconTagger, Pos, PosTagger, TAGGER_VERSION};
pub use tokenizer::{tokenize, Token};

/// A stretch of text matched by one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationSpan {
    pub label: String,
    /// Token range, end exclusive
    pub start_token: usize,
    pub end_token: usize,
    /// Byte range into the source text
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaggedToken {
    pub text: String,
    pub pos: Pos,
}

#[derive(Clone)]
pub struct Annotator {
    rules: RuleTable,
    tagger: Arc<dyn PosTagger>,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(RuleTable::default())
    }
}

impl Annotator {
    pub fn new(rules: RuleTable) -> Self {
        Self::with_tagger(rules, Arc::new(LexiconTagger::new()))
    }

    pub fn with_tagger(rules: RuleTable, tagger: Arc<dyn PosTagger>) -> Self {
        Self { rules, tagger }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn tagger_version(&self) -> &str {
        self.tagger.version()
    }

    pub fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let tokens = tokenize(text);
        let tags = self.tagger.tag(&tokens);
        tokens
            .into_iter()
            .zip(tags)
            .map(|(token, pos)| TaggedToken {
                text: token.text,
                pos,
            })
            .collect()
    }

    /// Every non-overlapping rule match, left to right.
    ///
    /// Overlaps resolve to the leftmost match, then the longest, then the
    /// rule listed first.
    pub fn annotate(&self, text: &str) -> Vec<AnnotationSpan> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Vec::new();
        }
        let tags = self.tagger.tag(&tokens);
        let lowers: Vec<String> = tokens.iter().map(Token::lower).collect();

        // (start, end, rule index)
        let mut candidates: Vec<(usize, usize, usize)> = Vec::new();
        for start in 0..tokens.len() {
            for (rule_index, rule) in self.rules.rules.iter().enumerate() {
                let end = start + rule.pattern.len();
                if end > tokens.len() {
                    continue;
                }
                let matched = rule.pattern.iter().enumerate().all(|(offset, pattern)| {
                    let i = start + offset;
                    pattern.matches(&tokens[i].text, &lowers[i], tags[i])
                });
                if matched {
                    candidates.push((start, end, rule_index));
                }
            }
        }

        candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2)));

        let mut spans = Vec::new();
        let mut covered_until = 0;
        for (start, end, rule_index) in candidates {
            if start < covered_until {
                continue;
            }
            let byte_start = tokens[start].start;
            let byte_end = tokens[end - 1].end;
            spans.push(AnnotationSpan {
                label: self.rules.rules[rule_index].label.clone(),
                start_token: start,
                end_token: end,
                start: byte_start,
                end: byte_end,
                text: text[byte_start..byte_end].to_string(),
            });
            covered_until = end;
        }

        spans
    }

    pub fn find_mentions(&self, text: &str) -> Vec<String> {
        self.annotate(text).into_iter().map(|span| span.text).collect()
    }
}

/// Surface text of every "improve" + adposition + noun match
pub fn find_improvement_mentions(text: &str) -> Vec<String> {
    Annotator::default().find_mentions(text)
}
