// src/text_analysis/tagger.rs
//! Universal part-of-speech tagging
//!
//! The built-in tagger is a closed-class lexicon plus suffix and context
//! rules for open-class words. It is deterministic and versioned: the same
//! text always gets the same tags for a given `TAGGER_VERSION`.

use super::tokenizer::Token;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const TAGGER_VERSION: &str = "lexicon-en-1.1.0";

/// Universal Dependencies coarse part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl Pos {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pos::Adj => "ADJ",
            Pos::Adp => "ADP",
            Pos::Adv => "ADV",
            Pos::Aux => "AUX",
            Pos::Cconj => "CCONJ",
            Pos::Det => "DET",
            Pos::Intj => "INTJ",
            Pos::Noun => "NOUN",
            Pos::Num => "NUM",
            Pos::Part => "PART",
            Pos::Pron => "PRON",
            Pos::Propn => "PROPN",
            Pos::Punct => "PUNCT",
            Pos::Sconj => "SCONJ",
            Pos::Sym => "SYM",
            Pos::Verb => "VERB",
            Pos::X => "X",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pos {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pos = match s.to_uppercase().as_str() {
            "ADJ" => Pos::Adj,
            "ADP" => Pos::Adp,
            "ADV" => Pos::Adv,
            "AUX" => Pos::Aux,
            "CCONJ" => Pos::Cconj,
            "DET" => Pos::Det,
            "INTJ" => Pos::Intj,
            "NOUN" => Pos::Noun,
            "NUM" => Pos::Num,
            "PART" => Pos::Part,
            "PRON" => Pos::Pron,
            "PROPN" => Pos::Propn,
            "PUNCT" => Pos::Punct,
            "SCONJ" => Pos::Sconj,
            "SYM" => Pos::Sym,
            "VERB" => Pos::Verb,
            "X" => Pos::X,
            other => anyhow::bail!("Unknown part-of-speech tag: {}", other),
        };
        Ok(pos)
    }
}

/// Anything that can assign one tag per token
pub trait PosTagger: Send + Sync {
    /// Identifies the tagging model; matches are only reproducible per version
    fn version(&self) -> &str;

    /// Returns exactly one tag per input token
    fn tag(&self, tokens: &[Token]) -> Vec<Pos>;
}

const ADPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "amid", "among", "amongst",
    "around", "as", "at", "before", "behind", "below", "beneath", "beside", "besides",
    "between", "beyond", "by", "despite", "down", "during", "except", "for", "from", "in",
    "inside", "into", "like", "near", "of", "off", "on", "onto", "out", "outside", "over",
    "past", "per", "since", "through", "throughout", "toward", "towards", "under",
    "underneath", "until", "upon", "via", "with", "within", "without",
];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "another", "all", "both", "either", "neither", "which", "what", "whatever",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "mine", "myself", "you", "yours", "yourself", "yourselves", "he", "him",
    "himself", "she", "hers", "herself", "it", "itself", "we", "us", "ours", "ourselves",
    "they", "them", "theirs", "themselves", "who", "whom", "whose", "something", "anything",
    "nothing", "everything", "someone", "anyone", "everyone", "nobody", "somebody",
    "anybody", "everybody",
];

/// Possessive determiners: the next open-class word is a noun
const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
    "must", "ca", "wo", "'m", "'re", "'ve", "'ll", "'d",
];

const PARTICLES: &[&str] = &["not", "n't", "'s"];

/// Split-off contractions; every other non-word token is punctuation
const CLITIC_FORMS: &[&str] = &["'s", "'m", "'re", "'ve", "'ll", "'d", "n't"];

const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "plus"];

const SUBORDINATORS: &[&str] = &[
    "although", "because", "if", "though", "unless", "whereas", "whether", "while",
];

const INTERJECTIONS: &[&str] = &["yes", "oh", "hello", "hi", "wow", "please", "thanks"];

const ADVERBS: &[&str] = &[
    "here", "there", "now", "then", "very", "also", "too", "well", "often", "always", "never",
    "sometimes", "soon", "already", "still", "just", "even", "again", "ever", "quite",
    "rather", "almost", "really", "so", "more", "most", "less", "least", "away", "back",
    "together", "perhaps", "maybe", "how", "when", "where", "why", "today", "tomorrow",
    "yesterday", "abroad", "forward", "instead",
];

const ADJECTIVES: &[&str] = &[
    "good", "better", "best", "great", "new", "old", "strong", "key", "high", "low", "large",
    "small", "big", "long", "short", "young", "important", "different", "strategic", "many",
    "much", "few", "several", "other", "same", "own", "able", "senior", "junior", "clear",
    "early", "late", "recent", "current", "main", "major", "minor", "technical",
    "professional", "personal", "global", "public", "private", "social", "full", "whole",
    "excellent", "proven", "open", "hard", "soft", "deep", "broad", "solid", "top", "real",
    "digital", "remote", "agile", "lean", "fast", "smart", "complex", "simple",
];

const VERB_LEMMAS: &[&str] = &[
    "improve", "want", "see", "make", "work", "build", "lead", "manage", "help", "develop",
    "create", "drive", "deliver", "grow", "learn", "focus", "look", "need", "get", "go",
    "take", "know", "think", "use", "find", "give", "tell", "ask", "seek", "try", "keep",
    "start", "run", "bring", "hold", "write", "provide", "offer", "support", "enable",
    "design", "speak", "communicate", "collaborate", "achieve", "increase", "reduce",
    "enhance", "strengthen", "boost", "expand", "become", "feel", "love", "enjoy", "believe",
    "connect", "share", "mentor", "coach", "scale", "launch", "plan", "transform", "solve",
    "explore", "pursue", "contribute", "specialize", "empower", "inspire", "hire", "train",
    "negotiate", "sell", "ship", "study", "join", "serve", "teach", "aim", "hope", "optimize",
    "like", "say", "come", "put", "let", "begin",
];

const IRREGULAR_VERBS: &[&str] = &[
    "saw", "seen", "made", "led", "built", "grew", "grown", "took", "taken", "knew", "known",
    "thought", "found", "gave", "given", "told", "got", "gotten", "went", "gone", "kept",
    "brought", "held", "wrote", "written", "spoke", "spoken", "became", "felt", "sought",
    "ran", "began", "begun", "sold", "taught", "learnt", "came", "said",
];

/// Words ending in -ly that are not adverbs
const LY_NOUNS_AND_ADJECTIVES: &[&str] = &[
    "family", "supply", "ally", "rally", "reply", "assembly", "anomaly", "italy", "july",
    "friendly", "early", "only", "likely", "daily", "weekly", "monthly", "yearly", "lovely",
    "costly", "timely", "lonely", "elderly", "holy", "ugly", "jelly", "belly", "bully",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "less", "ive", "able", "ible", "ical", "ish", "ary", "ent", "ant",
];

const NOUN_SUFFIXES: &[&str] = &[
    "ment", "tion", "sion", "ness", "ship", "ity", "ance", "ence", "ism", "ist", "hood", "dom",
];

/// Adjective suffixes that also end many common nouns
const SUFFIX_NOUN_EXCEPTIONS: &[&str] = &[
    "student", "client", "agent", "talent", "content", "event", "parent", "patent", "percent",
    "component", "assistant", "consultant", "accountant", "merchant", "restaurant", "giant",
    "plant", "grant", "summary", "salary", "library", "secretary", "boundary", "glossary",
    "anniversary", "dictionary", "itinerary", "objective", "executive", "initiative",
    "representative", "detective", "narrative", "incentive", "motive", "archive", "drive",
    "table", "cable", "variable", "deliverable", "vegetable", "fish", "wish", "dish",
    "mary", "entrant",
];

fn contains(list: &[&str], word: &str) -> bool {
    list.contains(&word)
}

/// Strip regular inflections and check the verb lemma list
fn is_verb_form(word: &str) -> bool {
    if contains(VERB_LEMMAS, word) || contains(IRREGULAR_VERBS, word) {
        return true;
    }

    let candidates = |stem: &str| -> bool {
        if stem.is_empty() {
            return false;
        }
        if contains(VERB_LEMMAS, stem) || contains(VERB_LEMMAS, &format!("{}e", stem)) {
            return true;
        }
        // running -> run, planned -> plan
        let bytes = stem.as_bytes();
        stem.is_ascii()
            && bytes.len() > 2
            && bytes[bytes.len() - 1] == bytes[bytes.len() - 2]
            && contains(VERB_LEMMAS, &stem[..stem.len() - 1])
    };

    if let Some(stem) = word.strip_suffix("ing") {
        return candidates(stem);
    }
    if let Some(stem) = word.strip_suffix("ied") {
        return contains(VERB_LEMMAS, &format!("{}y", stem));
    }
    if let Some(stem) = word.strip_suffix("ed") {
        return candidates(stem);
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return contains(VERB_LEMMAS, &format!("{}y", stem));
    }
    if let Some(stem) = word.strip_suffix("es") {
        if contains(VERB_LEMMAS, stem) {
            return true;
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        return contains(VERB_LEMMAS, stem);
    }
    false
}

fn is_symbol(text: &str) -> bool {
    text.chars()
        .all(|c| matches!(c, '$' | '%' | '&' | '+' | '=' | '<' | '>' | '#' | '@' | '€' | '£' | '*' | '^' | '~' | '|'))
}

fn ends_sentence(text: &str) -> bool {
    matches!(text, "." | "!" | "?" | ":" | ";")
}

/// Whether a word can open the object of a verbal gerund: "leading teams"
fn opens_object(lower: &str) -> bool {
    if contains(DETERMINERS, lower) || contains(PRONOUNS, lower) || contains(POSSESSIVES, lower) {
        return true;
    }
    lower != "to"
        && LexiconTagger::tag_closed_class(lower).is_none()
        && !is_verb_form(lower)
        && !lower.ends_with("ly")
}

/// Lexicon and rule based English tagger
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }

    fn tag_closed_class(lower: &str) -> Option<Pos> {
        if contains(DETERMINERS, lower) {
            Some(Pos::Det)
        } else if contains(PRONOUNS, lower) || contains(POSSESSIVES, lower) {
            Some(Pos::Pron)
        } else if contains(AUXILIARIES, lower) {
            Some(Pos::Aux)
        } else if contains(PARTICLES, lower) {
            Some(Pos::Part)
        } else if contains(COORDINATORS, lower) {
            Some(Pos::Cconj)
        } else if contains(SUBORDINATORS, lower) {
            Some(Pos::Sconj)
        } else if contains(ADPOSITIONS, lower) {
            Some(Pos::Adp)
        } else if contains(INTERJECTIONS, lower) {
            Some(Pos::Intj)
        } else if contains(ADVERBS, lower) {
            Some(Pos::Adv)
        } else if contains(ADJECTIVES, lower) {
            Some(Pos::Adj)
        } else {
            None
        }
    }

    fn tag_open_class(
        token: &Token,
        lower: &str,
        prev: Option<(&str, Pos)>,
        sentence_start: bool,
        object_follows: bool,
    ) -> Pos {
        let prev_pos = prev.map(|(_, pos)| pos);
        let after_to = matches!(prev, Some(("to", Pos::Part)));
        let noun_context = matches!(prev_pos, Some(Pos::Det | Pos::Adj | Pos::Num))
            || prev.map_or(false, |(word, _)| contains(POSSESSIVES, word));
        // "improve at coding" names an activity; "at leading teams" stays verbal
        let gerund_noun = prev_pos == Some(Pos::Adp)
            && lower.len() > 5
            && lower.ends_with("ing")
            && !object_follows;

        if is_verb_form(lower) {
            if after_to {
                return Pos::Verb;
            }
            if noun_context || gerund_noun {
                return Pos::Noun;
            }
            if prev_pos == Some(Pos::Adp) && !lower.ends_with("ing") {
                return Pos::Noun;
            }
            return Pos::Verb;
        }

        if token.is_capitalized() && !sentence_start {
            return Pos::Propn;
        }

        if lower.len() > 4
            && lower.ends_with("ly")
            && !contains(LY_NOUNS_AND_ADJECTIVES, lower)
        {
            return Pos::Adv;
        }

        if contains(SUFFIX_NOUN_EXCEPTIONS, lower)
            || NOUN_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
        {
            return Pos::Noun;
        }

        if lower.len() > 5 && lower.ends_with("ing") {
            return if noun_context || gerund_noun {
                Pos::Noun
            } else {
                Pos::Verb
            };
        }

        if lower.len() > 4 && lower.ends_with("ed") && !lower.ends_with("eed") {
            return if matches!(prev_pos, Some(Pos::Det | Pos::Adv) | None) {
                Pos::Adj
            } else {
                Pos::Verb
            };
        }

        if lower.len() > 4 && (lower.ends_with("ize") || lower.ends_with("ise")) && !noun_context {
            return Pos::Verb;
        }

        if lower.len() > 5
            && ADJECTIVE_SUFFIXES
                .iter()
                .any(|suffix| lower.ends_with(suffix))
        {
            return Pos::Adj;
        }

        Pos::Noun
    }
}

impl PosTagger for LexiconTagger {
    fn version(&self) -> &str {
        TAGGER_VERSION
    }

    fn tag(&self, tokens: &[Token]) -> Vec<Pos> {
        let lowers: Vec<String> = tokens
            .iter()
            .map(|t| t.lower().replace('\u{2019}', "'"))
            .collect();
        let mut tags: Vec<Pos> = Vec::with_capacity(tokens.len());

        for (i, token) in tokens.iter().enumerate() {
            let lower = lowers[i].as_str();
            let prev = i
                .checked_sub(1)
                .map(|p| (lowers[p].as_str(), tags[p]));
            let sentence_start = i == 0 || ends_sentence(&tokens[i - 1].text);
            let object_follows = tokens
                .get(i + 1)
                .map_or(false, |next| next.is_word() && opens_object(&lowers[i + 1]));

            let pos = if token.is_number() {
                Pos::Num
            } else if !token.is_word() && !contains(CLITIC_FORMS, lower) {
                if is_symbol(&token.text) {
                    Pos::Sym
                } else {
                    Pos::Punct
                }
            } else if lower == "to" {
                // infinitive marker when a verb follows, preposition otherwise
                let next_is_verb = lowers
                    .get(i + 1)
                    .map_or(false, |next| contains(VERB_LEMMAS, next) || next == "be" || next == "have");
                if next_is_verb {
                    Pos::Part
                } else {
                    Pos::Adp
                }
            } else if let Some(pos) = Self::tag_closed_class(lower) {
                pos
            } else {
                Self::tag_open_class(token, lower, prev, sentence_start, object_follows)
            };

            tags.push(pos);
        }

        tags
    }
}
