//! Embedded lexicon NLP backend
//!
//! A deterministic annotator built entirely from compiled-in tables: a
//! closed-class lexicon plus suffix and shape heuristics for part-of-speech
//! tagging, a gazetteer plus format patterns for entity recognition, and
//! hashed bag-of-words vectors for document similarity.
//!
//! It trades model quality for instant availability and reproducibility:
//! no model files to ship, identical output on every platform and run. The
//! built-in gazetteer can be extended with plain-text lexicon files, one
//! entity phrase per line, where the file stem names the label
//! (`person.txt`, `place.txt`, ...).

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use tracing::{debug, info};

use super::{Annotator, Doc, EntityLabel, EntitySpan, NlpError, PosTag, Token};

/// Dimension of hashed bag-of-words document vectors
const VECTOR_DIM: usize = 64;

/// Hash probes per token when building document vectors
const HASH_PROBES: u64 = 2;

// ============================================================================
// Built-in Tables
// ============================================================================

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "another", "both", "either", "neither",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "mine",
    "yours", "hers", "ours", "theirs", "who", "whom", "whose", "which", "what", "one",
    "something", "anything", "nothing", "everything", "itself", "himself", "herself",
    "themselves",
];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "over", "under",
    "between", "among", "through", "during", "against", "about", "across", "behind", "beyond",
    "near", "within", "without", "along", "around", "upon", "after", "before", "since", "until",
];

const COORDINATORS: &[&str] = &["and", "or", "but", "nor", "yet", "plus"];

const SUBORDINATORS: &[&str] = &[
    "although", "because", "unless", "while", "whereas", "if", "though", "whether",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "shall", "should", "may", "might", "must", "can", "could", "don't",
    "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't", "can't", "won't", "couldn't",
    "shouldn't", "wouldn't", "hasn't", "haven't",
];

const PARTICLES: &[&str] = &["not", "n't"];

const COMMON_ADVERBS: &[&str] = &[
    "very", "also", "only", "just", "too", "quite", "rather", "never", "always", "often",
    "sometimes", "still", "here", "there", "now", "then", "however", "later", "once", "twice",
    "eventually", "famously", "notably",
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty",
    "ninety", "hundred", "thousand", "million", "billion",
];

/// Verb lemmas and irregular past forms, matched after inflection stripping
const VERB_STEMS: &[&str] = &[
    // high-frequency lemmas
    "be", "have", "do", "say", "make", "go", "take", "come", "see", "know", "get", "give",
    "find", "think", "tell", "become", "show", "leave", "feel", "put", "bring", "begin",
    "keep", "hold", "write", "stand", "hear", "let", "mean", "set", "meet", "run", "pay",
    "sit", "speak", "lead", "read", "grow", "lose", "fall", "send", "build", "understand",
    "draw", "break", "spend", "cut", "rise", "drive", "buy", "wear", "choose", "win", "name",
    "call", "use", "work", "live", "die", "play", "move", "serve", "turn", "help", "talk",
    "identify", "describe", "include", "create", "produce", "develop", "publish", "appear",
    "fight", "arrive",
    // past forms that stripping cannot recover
    "wrote", "written", "said", "made", "went", "took", "came", "saw", "knew", "got", "gave",
    "found", "thought", "told", "became", "showed", "left", "felt", "brought", "began",
    "kept", "held", "stood", "heard", "meant", "met", "ran", "paid", "sat", "spoke", "led",
    "grew", "lost", "fell", "sent", "built", "understood", "drew", "broke", "spent", "rose",
    "drove", "bought", "wore", "chose", "won", "fought",
    // common in question prose
    "conquer", "defeat", "rule", "reign", "invade", "discover", "invent", "compose", "paint",
    "depict", "portray", "found", "establish", "author", "pen", "premiere", "derive",
    "propose", "formulate", "prove", "measure", "orbit", "succeed", "overthrow", "abdicate",
];

const ORG_SUFFIXES: &[&str] = &[
    "university", "college", "institute", "academy", "society", "company", "corporation",
    "congress", "parliament", "league",
];

static CLOSED_CLASS: Lazy<HashMap<&'static str, PosTag>> = Lazy::new(build_closed_class);

static VERB_LOOKUP: Lazy<HashSet<&'static str>> =
    Lazy::new(|| VERB_STEMS.iter().copied().collect());

fn build_closed_class() -> HashMap<&'static str, PosTag> {
    let mut map = HashMap::new();
    for word in DETERMINERS {
        map.insert(*word, PosTag::Det);
    }
    for word in PRONOUNS {
        map.insert(*word, PosTag::Pron);
    }
    for word in ADPOSITIONS {
        map.insert(*word, PosTag::Adp);
    }
    for word in COORDINATORS {
        map.insert(*word, PosTag::Cconj);
    }
    for word in SUBORDINATORS {
        map.insert(*word, PosTag::Sconj);
    }
    for word in AUXILIARIES {
        map.insert(*word, PosTag::Aux);
    }
    for word in PARTICLES {
        map.insert(*word, PosTag::Part);
    }
    for word in COMMON_ADVERBS {
        map.insert(*word, PosTag::Adv);
    }
    map
}

const PLACES: &[&str] = &[
    "france", "germany", "england", "britain", "spain", "italy", "russia", "china", "japan",
    "india", "egypt", "greece", "austria", "prussia", "persia", "america", "mexico", "brazil",
    "canada", "australia", "poland", "portugal", "netherlands", "sweden", "norway", "denmark",
    "turkey", "israel", "scotland", "ireland", "wales", "hungary", "switzerland", "belgium",
    "paris", "london", "berlin", "madrid", "vienna", "moscow", "athens", "rome", "florence",
    "venice", "boston", "chicago", "philadelphia", "alexandria", "constantinople",
    "jerusalem", "babylon", "sparta", "thebes", "carthage", "waterloo", "europe", "asia",
    "africa", "nile", "amazon", "danube", "rhine", "thames", "mississippi", "everest",
    "alps", "sahara", "mediterranean", "atlantic", "pacific",
];

const PERSONS: &[&str] = &[
    "napoleon", "austen", "shakespeare", "dickens", "newton", "einstein", "darwin", "mozart",
    "beethoven", "bach", "wagner", "chopin", "verdi", "picasso", "rembrandt", "monet",
    "caesar", "augustus", "cleopatra", "lincoln", "washington", "jefferson", "franklin",
    "gandhi", "luther", "galileo", "kepler", "copernicus", "plato", "aristotle", "socrates",
    "homer", "virgil", "dante", "goethe", "tolstoy", "dostoevsky", "chaucer", "milton",
    "keats", "shelley", "byron", "twain", "hemingway", "faulkner", "joyce", "kafka",
    "orwell", "woolf", "bronte", "tesla", "edison", "curie", "bohr", "heisenberg", "planck",
    "maxwell", "faraday", "euler", "gauss", "fermat", "pascal", "turing", "wellington",
    "nelson", "bismarck", "charlemagne",
];

const ORGS: &[&str] = &[
    "unesco", "nato", "vatican", "harvard", "oxford", "cambridge", "yale", "princeton",
    "sorbonne",
];

const WORKS: &[&str] = &["iliad", "odyssey", "aeneid", "hamlet", "macbeth", "othello"];

const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

static GAZETTEER: Lazy<HashMap<&'static str, EntityLabel>> = Lazy::new(build_gazetteer);

fn build_gazetteer() -> HashMap<&'static str, EntityLabel> {
    let mut map = HashMap::new();
    for name in PLACES {
        map.insert(*name, EntityLabel::Place);
    }
    for name in PERSONS {
        map.insert(*name, EntityLabel::Person);
    }
    for name in ORGS {
        map.insert(*name, EntityLabel::Org);
    }
    for name in WORKS {
        map.insert(*name, EntityLabel::Work);
    }
    for name in MONTHS {
        map.insert(*name, EntityLabel::Date);
    }
    map
}

// ============================================================================
// Annotator
// ============================================================================

/// Deterministic lexicon-and-heuristics backend
#[derive(Debug)]
pub struct LexiconAnnotator {
    /// Built-in gazetteer merged with any extension lexicons, lowercase keys
    gazetteer: HashMap<String, EntityLabel>,
}

impl LexiconAnnotator {
    /// Backend with the built-in tables only
    pub fn new() -> Self {
        let gazetteer = GAZETTEER
            .iter()
            .map(|(name, label)| (name.to_string(), label.clone()))
            .collect::<HashMap<_, _>>();
        info!(entries = gazetteer.len(), "lexicon annotator ready");
        Self { gazetteer }
    }

    /// Backend extended with lexicon files from `dir`
    ///
    /// Every `*.txt` file contributes entries under the label named by its
    /// file stem (`person.txt` adds `PERSON` entries). Lines are trimmed;
    /// empty lines and `#` comments are skipped. A missing or unreadable
    /// directory is a load failure, callers treat it as fatal at startup.
    pub fn with_lexicon_dir(dir: &Path) -> Result<Self, NlpError> {
        let mut annotator = Self::new();
        if !dir.is_dir() {
            return Err(NlpError::ResourceLoad(format!(
                "lexicon directory not found: {}",
                dir.display()
            )));
        }

        let mut added = 0usize;
        let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
        entries.sort_by_key(|e| e.path());
        for entry in entries {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("txt") {
                continue;
            }
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_uppercase(),
                None => continue,
            };
            let label = EntityLabel::parse(&stem);
            let content = fs::read_to_string(&path)?;
            let mut file_entries = 0usize;
            for line in content.lines() {
                let phrase = line.trim();
                if phrase.is_empty() || phrase.starts_with('#') {
                    continue;
                }
                annotator
                    .gazetteer
                    .insert(phrase.to_lowercase(), label.clone());
                file_entries += 1;
            }
            debug!(file = %path.display(), entries = file_entries, "loaded lexicon file");
            added += file_entries;
        }

        info!(dir = %dir.display(), added, "extension lexicons loaded");
        Ok(annotator)
    }

    fn lookup(&self, phrase: &str) -> Option<&EntityLabel> {
        self.gazetteer.get(&phrase.to_lowercase())
    }

    /// Label a span of proper-noun tokens, or None when nothing is known
    ///
    /// Unknown capitalized spans are deliberately skipped: this tier favors
    /// precision, and the Entity consumers compare label sets, so an
    /// unlabeled span carries no information anyway.
    fn resolve_span(&self, tokens: &[Token]) -> Option<EntityLabel> {
        let joined = tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(label) = self.lookup(&joined) {
            return Some(label.clone());
        }
        for token in tokens {
            if let Some(label) = self.lookup(&token.text) {
                return Some(label.clone());
            }
        }
        if let Some(last) = tokens.last() {
            let lower = last.text.to_lowercase();
            if ORG_SUFFIXES.contains(&lower.as_str()) {
                return Some(EntityLabel::Org);
            }
        }
        None
    }

    fn recognize_entities(&self, tokens: &[Token]) -> Vec<EntitySpan> {
        let mut entities = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];

            // Format patterns: money, percent, years, counts
            if token.pos == PosTag::Num {
                let (text, label) = if i > 0 && tokens[i - 1].text == "$" {
                    (format!("${}", token.text), EntityLabel::Money)
                } else if tokens.get(i + 1).map(|t| t.text.as_str()) == Some("%") {
                    (format!("{}%", token.text), EntityLabel::Percent)
                } else if is_year(&token.text) {
                    (token.text.clone(), EntityLabel::Date)
                } else {
                    (token.text.clone(), EntityLabel::Quantity)
                };
                entities.push(EntitySpan::new(text, label));
                i += 1;
                continue;
            }

            // Proper-noun spans, allowing "of"-style connectors inside
            if token.pos == PosTag::Propn {
                let start = i;
                let mut end = i;
                while end + 1 < tokens.len() {
                    let next = &tokens[end + 1];
                    if next.pos == PosTag::Propn {
                        end += 1;
                    } else if is_span_connector(&next.text)
                        && tokens.get(end + 2).map(|t| t.pos) == Some(PosTag::Propn)
                    {
                        end += 2;
                    } else {
                        break;
                    }
                }
                let span = &tokens[start..=end];
                if let Some(label) = self.resolve_span(span) {
                    let text = span
                        .iter()
                        .map(|t| t.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" ");
                    entities.push(EntitySpan::new(text, label));
                }
                i = end + 1;
                continue;
            }

            i += 1;
        }
        entities
    }
}

impl Default for LexiconAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotator for LexiconAnnotator {
    fn id(&self) -> &'static str {
        "lexicon"
    }

    fn parse(&self, text: &str) -> Result<Doc, NlpError> {
        let words = tokenize(text);
        if words.is_empty() {
            return Ok(Doc::empty());
        }
        let tokens: Vec<Token> = words
            .into_iter()
            .map(|word| {
                let pos = tag_word(&word);
                Token { text: word, pos }
            })
            .collect();
        let entities = self.recognize_entities(&tokens);
        let vector = embed(&tokens);
        Ok(Doc::new(tokens, entities, vector))
    }
}

// ============================================================================
// Tokenization and Tagging
// ============================================================================

/// Split text into word, number, and punctuation tokens
///
/// Underscores count as separators so wiki-style guesses like
/// `George_Washington` tokenize the same as their spaced form. Digit runs
/// keep internal `.`/`,` separators together ("5.3", "10,000").
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let chars: Vec<char> = text.chars().collect();

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_alphanumeric() || c == '\'' {
            word.push(c);
        } else if (c == '.' || c == ',')
            && !word.is_empty()
            && word.chars().all(|w| w.is_ascii_digit())
            && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())
        {
            word.push(c);
        } else {
            if !word.is_empty() {
                tokens.push(std::mem::take(&mut word));
            }
            if !c.is_whitespace() && c != '_' {
                tokens.push(c.to_string());
            }
        }
        i += 1;
    }
    if !word.is_empty() {
        tokens.push(word);
    }
    tokens
}

fn is_numeric_token(word: &str) -> bool {
    !word.is_empty()
        && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        && word.chars().any(|c| c.is_ascii_digit())
}

fn is_year(word: &str) -> bool {
    word.len() == 4
        && word.chars().all(|c| c.is_ascii_digit())
        && (1000..=2100).contains(&word.parse::<u32>().unwrap_or(0))
}

fn is_span_connector(word: &str) -> bool {
    matches!(word, "of" | "the" | "de" | "la" | "von" | "van")
}

/// Whether `lower` is a known verb lemma or an inflection of one
fn is_verb_form(lower: &str) -> bool {
    if VERB_LOOKUP.contains(lower) {
        return true;
    }
    let stem_matches = |stem: &str| {
        if VERB_LOOKUP.contains(stem) || VERB_LOOKUP.contains(format!("{stem}e").as_str()) {
            return true;
        }
        // doubled final letter ("running" strips to "runn", then "run");
        // compare and strip whole chars so multibyte stems never split
        let mut rev = stem.chars().rev();
        match (rev.next(), rev.next()) {
            (Some(last), Some(prev)) if last == prev => {
                VERB_LOOKUP.contains(&stem[..stem.len() - last.len_utf8()])
            }
            _ => false,
        }
    };
    if let Some(stem) = lower.strip_suffix("ing") {
        if stem_matches(stem) {
            return true;
        }
    }
    if let Some(stem) = lower.strip_suffix("ed") {
        if stem_matches(stem) {
            return true;
        }
    }
    if let Some(stem) = lower.strip_suffix('s') {
        if VERB_LOOKUP.contains(stem) {
            return true;
        }
    }
    if let Some(stem) = lower.strip_suffix("es") {
        if VERB_LOOKUP.contains(stem) {
            return true;
        }
    }
    false
}

fn tag_word(word: &str) -> PosTag {
    if word.chars().all(|c| !c.is_alphanumeric()) {
        return if word.chars().all(|c| matches!(c, '$' | '%' | '#' | '+' | '=' | '€' | '£')) {
            PosTag::Sym
        } else {
            PosTag::Punct
        };
    }
    if is_numeric_token(word) {
        return PosTag::Num;
    }

    let lower = word.to_lowercase();
    if NUMBER_WORDS.contains(&lower.as_str()) {
        return PosTag::Num;
    }
    if let Some(tag) = CLOSED_CLASS.get(lower.as_str()) {
        return *tag;
    }
    if is_verb_form(&lower) {
        return PosTag::Verb;
    }
    if word.chars().next().is_some_and(char::is_uppercase) {
        return PosTag::Propn;
    }

    // Derivational suffixes for open-class words
    if lower.ends_with("ly") {
        return PosTag::Adv;
    }
    if lower.ends_with("ing") || lower.ends_with("ed") {
        return PosTag::Verb;
    }
    if ["tion", "sion", "ment", "ness", "ity", "ism", "ance", "ence"]
        .iter()
        .any(|s| lower.ends_with(s))
    {
        return PosTag::Noun;
    }
    if ["ous", "ful", "ive", "ish", "able", "ible", "ical"]
        .iter()
        .any(|s| lower.ends_with(s))
    {
        return PosTag::Adj;
    }
    PosTag::Noun
}

// ============================================================================
// Document Vectors
// ============================================================================

/// FNV-1a hash with a probe-specific seed, stable across platforms
fn fnv1a(bytes: &[u8], seed: u64) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325_u64 ^ seed.wrapping_mul(0x100_0000_01b3);
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(0x100_0000_01b3);
    }
    hash
}

/// Hashed bag-of-words vector over non-punctuation tokens
fn embed(tokens: &[Token]) -> Vec<f32> {
    let mut vector = vec![0.0_f32; VECTOR_DIM];
    let mut any = false;
    for token in tokens {
        if token.pos == PosTag::Punct {
            continue;
        }
        any = true;
        let lower = token.text.to_lowercase();
        for probe in 0..HASH_PROBES {
            let hash = fnv1a(lower.as_bytes(), probe);
            let index = (hash % VECTOR_DIM as u64) as usize;
            let sign = if (hash >> 32) & 1 == 0 { 1.0 } else { -1.0 };
            vector[index] += sign;
        }
    }
    if any {
        vector
    } else {
        Vec::new()
    }
}
