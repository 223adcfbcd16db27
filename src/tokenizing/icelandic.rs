//! Icelandic tokenizers.
//!
//! Two families live here. The shallow tokenizer splits on whitespace and
//! peels edge punctuation, nothing more. The deep tokenizer scans the
//! sentence into classified tokens (numbers, dates, measurements, URLs and
//! so on) and renders them either as surface forms ("pass-through") or as
//! fixed category tags ("placeholders") for named-entity-poor training data.
use lazy_static::lazy_static;
use regex::Regex;

/// Token classes recognized by the deep scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Url,
    Email,
    Domain,
    Amount,
    Measurement,
    Percent,
    Telno,
    DateAbs,
    NumWithLetter,
    Year,
    NumberSection,
    Ordinal,
    Number,
    Hashtag,
    Word,
    Punctuation,
    Unknown,
}

impl Kind {
    /// Category tag emitted by the placeholder variant.
    fn tag(&self) -> &'static str {
        match self {
            Kind::Url => "VEFFANG",
            Kind::Email => "TÖLVUPÓSTUR",
            Kind::Domain => "LÉN",
            Kind::Amount => "UPPHÆÐ",
            Kind::Measurement => "MÆLING",
            Kind::Percent => "PRÓSENTA",
            Kind::Telno => "SÍMANÚMER",
            Kind::DateAbs => "DAGSETNING",
            Kind::NumWithLetter => "GILDI",
            Kind::Year => "ÁR",
            Kind::NumberSection | Kind::Number => "NÚMER",
            Kind::Ordinal => "TALA",
            Kind::Hashtag => "HASHTAG",
            Kind::Word | Kind::Punctuation | Kind::Unknown => "UNKOWN",
        }
    }
}

#[derive(Debug)]
struct Scanned {
    kind: Kind,
    text: String,
}

/// Abbreviations the deep tokenizer expands, longest match wins.
/// The numeric entries are the ordinal kludges ("1sti" and friends).
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("þ.e.a.s.", "það er að segja"),
    ("o.s.frv.", "og svo framvegis"),
    ("a.m.k.", "að minnsta kosti"),
    ("u.þ.b.", "um það bil"),
    ("t.d.", "til dæmis"),
    ("þ.e.", "það er"),
    ("m.a.", "meðal annars"),
    ("o.fl.", "og fleira"),
    ("s.s.", "svo sem"),
    ("nr.", "númer"),
    ("gr.", "grein"),
    ("1sti", "fyrsti"),
    ("1sta", "fyrsta"),
    ("2ja", "tveggja"),
    ("3ja", "þriggja"),
    ("4ða", "fjórða"),
];

lazy_static! {
    static ref CASES: Vec<(Kind, Regex)> = vec![
        (Kind::Url, Regex::new(r"^(https?://|www\.)\S*[\w/]").unwrap()),
        (
            Kind::Email,
            Regex::new(r"^[\w.+-]+@[\w-]+(\.[\w-]+)+").unwrap()
        ),
        (
            Kind::Domain,
            Regex::new(r"^[a-z0-9][a-z0-9-]+(\.[a-z0-9-]+)*\.(is|com|net|org|eu|info)").unwrap()
        ),
        (
            Kind::Amount,
            Regex::new(r"^\d+(\.\d{3})*(,\d+)? ?(kr\.|kr|ISK|EUR|USD|GBP|€|\$|£)").unwrap()
        ),
        (
            Kind::Measurement,
            Regex::new(r"^\d+(,\d+)? ?(mm|cm|km|m|mg|g|kg|t|ml|dl|l|ha|°C|kWst|kW|MW)").unwrap()
        ),
        (Kind::Percent, Regex::new(r"^\d+(,\d+)? ?%").unwrap()),
        (Kind::Telno, Regex::new(r"^\d{3}[- ]\d{4}").unwrap()),
        (
            Kind::DateAbs,
            Regex::new(r"^\d{1,2}\.\d{1,2}\.\d{2,4}").unwrap()
        ),
        (
            Kind::NumWithLetter,
            Regex::new(r"^\d+[a-záðéíóúýþæö]").unwrap()
        ),
        (Kind::Year, Regex::new(r"^(1[5-9]\d\d|20\d\d)").unwrap()),
        (Kind::NumberSection, Regex::new(r"^\d+(\.\d+)+").unwrap()),
        (Kind::Ordinal, Regex::new(r"^\d+\.").unwrap()),
        (Kind::Number, Regex::new(r"^\d+(,\d+)?").unwrap()),
        (Kind::Hashtag, Regex::new(r"^#[\w]+").unwrap()),
        (
            Kind::Word,
            Regex::new(r"^\p{L}[\p{L}\p{N}]*([-'][\p{L}\p{N}]+)*").unwrap()
        ),
        (
            Kind::Punctuation,
            Regex::new(r"^(\.\.\.|[^\s\p{L}\p{N}])").unwrap()
        ),
    ];
    static ref WEB: Regex = Regex::new(r"^(https?://|www\.)").unwrap();
}

/// Kinds whose match must end at a token boundary; without this, "2020s"
/// would scan as a year followed by a stray letter.
fn needs_boundary(kind: Kind) -> bool {
    matches!(
        kind,
        Kind::Domain
            | Kind::Amount
            | Kind::Measurement
            | Kind::Telno
            | Kind::DateAbs
            | Kind::NumWithLetter
            | Kind::Year
            | Kind::Ordinal
            | Kind::Number
    )
}

fn at_boundary(rest: &str, end: usize) -> bool {
    rest[end..].chars().next().map_or(true, |c| !c.is_alphanumeric())
}

fn match_abbreviation(rest: &str) -> Option<(&'static str, usize)> {
    for &(abbr, expansion) in ABBREVIATIONS {
        if rest.starts_with(abbr) && at_boundary(rest, abbr.len()) {
            return Some((expansion, abbr.len()));
        }
    }
    None
}

fn scan(sent: &str) -> Vec<Scanned> {
    let mut tokens = Vec::new();
    let mut rest = sent.trim_start();
    while !rest.is_empty() {
        if let Some((expansion, len)) = match_abbreviation(rest) {
            tokens.push(Scanned {
                kind: Kind::Word,
                text: expansion.to_string(),
            });
            rest = rest[len..].trim_start();
            continue;
        }
        let mut matched = None;
        for (kind, re) in CASES.iter() {
            if let Some(m) = re.find(rest) {
                if needs_boundary(*kind) && !at_boundary(rest, m.end()) {
                    continue;
                }
                // a date may not run into a further section component
                if *kind == Kind::DateAbs && rest[m.end()..].starts_with('.') {
                    continue;
                }
                matched = Some((*kind, m.end()));
                break;
            }
        }
        match matched {
            Some((kind, end)) => {
                let text = match (kind, &rest[..end]) {
                    (Kind::Punctuation, "\"") => "“".to_string(),
                    (_, t) => t.to_string(),
                };
                tokens.push(Scanned { kind, text });
                rest = rest[end..].trim_start();
            }
            None => {
                // cannot happen with the current case table, but a stray
                // char must never wedge the scanner
                let ch = rest.chars().next().unwrap();
                tokens.push(Scanned {
                    kind: Kind::Unknown,
                    text: ch.to_string(),
                });
                rest = rest[ch.len_utf8()..].trim_start();
            }
        }
    }
    tokens
}

/// Formats the numeric part of a percentage the way the pipeline expects:
/// decimal comma becomes a point, the value is printed minimally.
fn percent_value(text: &str) -> String {
    let digits: String = text
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    match digits.parse::<f64>() {
        Ok(v) => format!("{}", v),
        Err(_) => digits,
    }
}

/// Rendering variant of the deep tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Surface forms, except percentages which become `<value> %`.
    PassThrough,
    /// Fixed category tags for numeric/NE-like tokens.
    Placeholders,
}

#[derive(Debug)]
pub struct DeepTokenizer {
    variant: Variant,
}

impl DeepTokenizer {
    pub fn new(variant: Variant) -> Self {
        DeepTokenizer { variant }
    }

    pub fn tokenize(&self, sent: &str) -> Vec<String> {
        let mut out = Vec::new();
        for tok in scan(sent) {
            match self.variant {
                Variant::PassThrough => match tok.kind {
                    Kind::Percent => {
                        out.push(percent_value(&tok.text));
                        out.push("%".to_string());
                    }
                    _ => out.extend(tok.text.split_whitespace().map(String::from)),
                },
                Variant::Placeholders => match tok.kind {
                    Kind::Word => out.extend(tok.text.split_whitespace().map(String::from)),
                    Kind::Punctuation => out.push(tok.text),
                    kind => out.push(kind.tag().to_string()),
                },
            }
        }
        out
    }
}

/// Basic tokenization: whitespace split plus edge punctuation peeling.
/// Web addresses are kept whole.
pub fn shallow_tokenize(sent: &str) -> Vec<String> {
    let mut out = Vec::new();
    for chunk in sent.split_whitespace() {
        if WEB.is_match(chunk) {
            out.push(chunk.to_string());
            continue;
        }
        let mut middle = chunk;
        let mut leading = Vec::new();
        while let Some(c) = middle.chars().next() {
            if c.is_alphanumeric() {
                break;
            }
            leading.push(c.to_string());
            middle = &middle[c.len_utf8()..];
        }
        let mut trailing = Vec::new();
        while let Some(c) = middle.chars().last() {
            if c.is_alphanumeric() {
                break;
            }
            trailing.push(c.to_string());
            middle = &middle[..middle.len() - c.len_utf8()];
        }
        out.extend(leading);
        if !middle.is_empty() {
            out.push(middle.to_string());
        }
        out.extend(trailing.into_iter().rev());
    }
    out
}
