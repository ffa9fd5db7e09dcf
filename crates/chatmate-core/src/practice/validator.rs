//! Rule-based checker for English sentences built with the verb TO BE.
//!
//! A sentence goes through formatting checks (capital letter, spacing,
//! spelling, proper nouns, end punctuation, missing article), then
//! subject/verb agreement, and finally is classified against the six TO BE
//! sentence shapes. Every problem found is reported together with a
//! corrected version of the sentence.

use std::fmt;

use regex::{Captures, Regex};

/// Proper nouns learners commonly type in lowercase.
const PROPER_NOUNS: [&str; 9] = [
    "michael",
    "ann",
    "cartagena",
    "charles",
    "maria",
    "john",
    "mary",
    "colombia",
    "america",
];

/// Subject pronouns other than "I", which must stay lowercase mid-sentence.
const PRONOUNS: [&str; 6] = ["you", "he", "she", "it", "we", "they"];

/// Misspelling -> correct form. Never maps a word to itself.
const SPELLING_CORRECTIONS: [(&str, &str); 9] = [
    ("im", "I'm"),
    ("youre", "you're"),
    ("hes", "he's"),
    ("shes", "she's"),
    ("studnet", "student"),
    ("techer", "teacher"),
    ("freind", "friend"),
    ("happpy", "happy"),
    ("beautifull", "beautiful"),
];

/// Singular countable nouns that need an article after TO BE.
const COUNTABLE_NOUNS: [&str; 33] = [
    "student", "teacher", "friend", "doctor", "nurse", "engineer", "lawyer", "artist", "actor",
    "singer", "writer", "driver", "pilot", "farmer", "cook", "waiter", "boy", "girl", "man",
    "woman", "child", "baby", "dog", "cat", "book", "car", "house", "city", "country", "apple",
    "egg", "umbrella", "idea",
];

const SUBJECT: &str = r"(?:I|You|He|She|It|We|They|(?:The|A|An)\s+[a-z]+|(?:This|That|These|Those)\s+[a-z]+|[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)";
const PRESENT: &str = r"(?:am|are|is)";
const PAST: &str = r"(?:was|were)";
const COMPLEMENT: &str = r"[a-z0-9']+(?:\s+[a-z0-9']+)*";
const END: &str = r"[.!?]?$";

/// The six TO BE sentence shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceKind {
    PresentAffirmative,
    PresentNegative,
    PresentInterrogative,
    PastAffirmative,
    PastNegative,
    PastInterrogative,
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SentenceKind::PresentAffirmative => "present affirmative",
            SentenceKind::PresentNegative => "present negative",
            SentenceKind::PresentInterrogative => "present interrogative",
            SentenceKind::PastAffirmative => "past affirmative",
            SentenceKind::PastNegative => "past negative",
            SentenceKind::PastInterrogative => "past interrogative",
        };
        f.write_str(name)
    }
}

/// What kind of problem made a sentence incorrect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Capitalization, spacing, spelling, punctuation or a missing article.
    Formatting,
    /// The form of TO BE does not agree with its subject.
    Grammar,
    /// Well formed, but not a TO BE sentence.
    NoToBe,
}

/// Problems found in an incorrect sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub kind: IssueKind,
    pub errors: Vec<String>,
    /// The sentence with every automatic correction applied.
    pub corrected: String,
}

/// Result of checking one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct(SentenceKind),
    Incorrect(Assessment),
}

/// Checks TO BE sentences. Build once and reuse; construction compiles all
/// patterns.
pub struct SentenceValidator {
    shapes: Vec<(SentenceKind, Regex)>,
    spelling: Vec<(Regex, &'static str, &'static str)>,
    article: Regex,
    subject_verb: Regex,
    verb_subject: Regex,
    misuse: Vec<(Regex, &'static str)>,
}

impl SentenceValidator {
    pub fn new() -> Result<Self, regex::Error> {
        let shape = |pattern: String| Regex::new(&format!("(?i)^{pattern}{END}"));

        // Negatives and questions first: an affirmative complement would
        // also swallow "not ...".
        let shapes = vec![
            (
                SentenceKind::PresentNegative,
                shape(format!(r"{SUBJECT}\s+{PRESENT}\s+not\s+{COMPLEMENT}"))?,
            ),
            (
                SentenceKind::PastNegative,
                shape(format!(r"{SUBJECT}\s+{PAST}\s+not\s+{COMPLEMENT}"))?,
            ),
            (
                SentenceKind::PresentInterrogative,
                shape(format!(r"{PRESENT}\s+{SUBJECT}\s+{COMPLEMENT}"))?,
            ),
            (
                SentenceKind::PastInterrogative,
                shape(format!(r"{PAST}\s+{SUBJECT}\s+{COMPLEMENT}"))?,
            ),
            (
                SentenceKind::PresentAffirmative,
                shape(format!(r"{SUBJECT}\s+{PRESENT}\s+{COMPLEMENT}"))?,
            ),
            (
                SentenceKind::PastAffirmative,
                shape(format!(r"{SUBJECT}\s+{PAST}\s+{COMPLEMENT}"))?,
            ),
        ];

        let spelling = SPELLING_CORRECTIONS
            .iter()
            .map(|&(wrong, right)| Ok((Regex::new(&format!(r"(?i)\b{wrong}\b"))?, wrong, right)))
            .collect::<Result<Vec<_>, regex::Error>>()?;

        let misuse = vec![
            (
                Regex::new(r"(?i)\b(?:a|an)\s+(?:am|are|is|was|were)\b")?,
                "Articles 'a/an' cannot be subjects. Use proper nouns or pronouns",
            ),
            (
                Regex::new(r"(?i)\b(?:am|are|is|was|were)\s+(?:am|are|is|was|were)\b")?,
                "Don't use two forms of 'to be' together",
            ),
        ];

        Ok(Self {
            shapes,
            spelling,
            article: Regex::new(
                r"(?i)\b(I|You|He|She|It|We|They)\s+(am|are|is|was|were)\s+(?:not\s+)?(?:(a|an|the)\s+)?([a-z]+)\b",
            )?,
            subject_verb: Regex::new(r"(?i)\b(I|you|he|she|it|we|they)\s+(am|is|are|was|were)\b")?,
            verb_subject: Regex::new(r"(?i)^(am|is|are|was|were)\s+(I|you|he|she|it|we|they)\b")?,
            misuse,
        })
    }

    /// Check a sentence and classify it.
    pub fn validate(&self, sentence: &str) -> Verdict {
        let trimmed = sentence.trim();
        if trimmed.is_empty() {
            return Verdict::Incorrect(Assessment {
                kind: IssueKind::Formatting,
                errors: vec!["Type a sentence to check".to_string()],
                corrected: String::new(),
            });
        }

        let mut errors = Vec::new();
        let mut working = trimmed.to_string();

        if !working.starts_with(|c: char| c.is_uppercase()) {
            errors.push("Sentence must start with a capital letter".to_string());
            working = capitalize_first(&working);
        }

        let collapsed = working.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed != working {
            errors.push("Remove extra spaces between words".to_string());
            working = collapsed;
        }

        self.check_spelling(&mut working, &mut errors);
        check_names_and_pronouns(&mut working, &mut errors);

        if !working.ends_with(['.', '!', '?']) {
            errors.push("Sentence should end with proper punctuation (. ! ?)".to_string());
            working.push('.');
        }

        self.check_article(&mut working, &mut errors);
        let formatting_errors = errors.len();

        self.check_agreement(&mut working, &mut errors);
        for (pattern, message) in &self.misuse {
            if pattern.is_match(&working) {
                errors.push((*message).to_string());
            }
        }

        if !errors.is_empty() {
            let kind = if errors.len() > formatting_errors {
                IssueKind::Grammar
            } else {
                IssueKind::Formatting
            };
            return Verdict::Incorrect(Assessment {
                kind,
                errors,
                corrected: working,
            });
        }

        match self.shapes.iter().find(|(_, re)| re.is_match(&working)) {
            Some((kind, _)) => Verdict::Correct(*kind),
            None => Verdict::Incorrect(Assessment {
                kind: IssueKind::NoToBe,
                errors: vec![
                    "This sentence does not use the verb TO BE (am, is, are, was, were)"
                        .to_string(),
                ],
                corrected: working,
            }),
        }
    }

    fn check_spelling(&self, working: &mut String, errors: &mut Vec<String>) {
        for word in working.split_whitespace() {
            let clean = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
            if let Some((_, right)) = SPELLING_CORRECTIONS.iter().find(|(wrong, _)| *wrong == clean) {
                errors.push(format!("\"{clean}\" should be spelled as \"{right}\""));
            }
        }

        for (pattern, _, right) in &self.spelling {
            if pattern.is_match(working) {
                *working = pattern
                    .replace_all(working, regex::NoExpand(right))
                    .into_owned();
            }
        }
    }

    fn check_article(&self, working: &mut String, errors: &mut Vec<String>) {
        let Some(caps) = self.article.captures(working) else {
            return;
        };
        if caps.get(3).is_some() {
            return;
        }
        let (Some(noun), subject, verb) = (caps.get(4), &caps[1], &caps[2]) else {
            return;
        };
        let lower = noun.as_str().to_lowercase();
        if !COUNTABLE_NOUNS.contains(&lower.as_str()) {
            return;
        }

        let article = indefinite_article(&lower);
        errors.push(format!(
            "Add an article before \"{noun}\". For example: \"{subject} {verb} {article} {noun}.\"",
            noun = noun.as_str()
        ));
        let at = noun.start();
        working.insert_str(at, &format!("{article} "));
    }

    fn check_agreement(&self, working: &mut String, errors: &mut Vec<String>) {
        let mut found: Vec<&'static str> = Vec::new();

        let fixed = self.subject_verb.replace_all(working, |caps: &Captures| {
            let (subject, verb) = (&caps[1], &caps[2]);
            match agreement_problem(subject, verb) {
                Some((message, right)) => {
                    found.push(message);
                    format!("{subject} {}", match_case(verb, right))
                }
                None => caps[0].to_string(),
            }
        });
        let mut fixed = fixed.into_owned();

        fixed = self
            .verb_subject
            .replace(&fixed, |caps: &Captures| {
                let (verb, subject) = (&caps[1], &caps[2]);
                match agreement_problem(subject, verb) {
                    Some((message, right)) => {
                        found.push(message);
                        format!("{} {subject}", match_case(verb, right))
                    }
                    None => caps[0].to_string(),
                }
            })
            .into_owned();

        for message in found {
            if !errors.iter().any(|e| e == message) {
                errors.push(message.to_string());
            }
        }
        *working = fixed;
    }
}

/// Capitalize proper nouns and "I"; lowercase other pronouns after the first word.
fn check_names_and_pronouns(working: &mut String, errors: &mut Vec<String>) {
    let mut words = Vec::new();

    for (idx, word) in working.split_whitespace().enumerate() {
        let core = word.trim_matches(|c: char| !c.is_alphanumeric());
        let lower = core.to_lowercase();
        let mut replacement = None;

        if PROPER_NOUNS.contains(&lower.as_str()) && !core.starts_with(|c: char| c.is_uppercase()) {
            errors.push(format!("\"{lower}\" should be capitalized as it's a proper noun"));
            replacement = Some(capitalize_first(&lower));
        } else if lower == "i" && core != "I" {
            errors.push("The pronoun \"I\" must always be capitalized".to_string());
            replacement = Some("I".to_string());
        } else if idx > 0
            && PRONOUNS.contains(&lower.as_str())
            && core.starts_with(|c: char| c.is_uppercase())
        {
            errors.push(format!(
                "\"{core}\" should not be capitalized unless it's the first word of the sentence"
            ));
            replacement = Some(lower.clone());
        }

        match replacement {
            Some(new) => words.push(word.replacen(core, &new, 1)),
            None => words.push(word.to_string()),
        }
    }

    *working = words.join(" ");
}

/// The error message and the agreeing verb, when `verb` does not agree with `subject`.
fn agreement_problem(subject: &str, verb: &str) -> Option<(&'static str, &'static str)> {
    let subject = subject.to_lowercase();
    let verb = verb.to_lowercase();
    let past = matches!(verb.as_str(), "was" | "were");

    let (right, message) = match (subject.as_str(), past) {
        ("i", false) => ("am", "Use 'am' with 'I' in present tense, or 'was' in past tense"),
        ("he" | "she" | "it", false) => ("is", "Use 'is' with he/she/it in present tense"),
        (_, false) => ("are", "Use 'are' with you/we/they in present tense"),
        ("i" | "he" | "she" | "it", true) => ("was", "Use 'was' with I/he/she/it in past tense"),
        (_, true) => ("were", "Use 'were' with you/we/they in past tense"),
    };

    (verb != right).then_some((message, right))
}

fn match_case(original: &str, word: &str) -> String {
    if original.starts_with(|c: char| c.is_uppercase()) {
        capitalize_first(word)
    } else {
        word.to_string()
    }
}

fn indefinite_article(noun: &str) -> &'static str {
    if noun.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
