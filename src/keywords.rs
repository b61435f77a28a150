use crate::patch::Field;

/// What a recognised keyword does to the patch being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meaning {
    /// Standalone switch, takes no value.
    Power(bool),
    /// Consumes the next token as an integer for the field.
    Level(Field),
}

/// One entry of the command vocabulary.
#[derive(Debug, Clone)]
pub struct Keyword {
    pub long: &'static str,
    pub meaning: Meaning,
    pub description: &'static str,
}

impl Keyword {
    /// Short form: the first three letters of the long form.
    pub fn short(&self) -> &'static str {
        self.long.get(..3).unwrap_or(self.long)
    }

    /// Case-insensitive match against the long or short form.
    pub fn matches(&self, token: &str) -> bool {
        token.eq_ignore_ascii_case(self.long) || token.eq_ignore_ascii_case(self.short())
    }
}

/// Registry of the keywords understood in command lines.
pub struct KeywordTable;

impl KeywordTable {
    pub fn list() -> &'static [Keyword] {
        KEYWORDS
    }

    /// Find the keyword `token` spells, if any.
    pub fn lookup(token: &str) -> Option<&'static Keyword> {
        KEYWORDS.iter().find(|kw| kw.matches(token))
    }

    /// Interpret an on/off word.
    pub fn power(token: &str) -> Option<bool> {
        match Self::lookup(token)?.meaning {
            Meaning::Power(on) => Some(on),
            Meaning::Level(_) => None,
        }
    }
}

macro_rules! keyword {
    ($long:expr, $meaning:expr, $description:expr) => {
        Keyword {
            long: $long,
            meaning: $meaning,
            description: $description,
        }
    };
}

static KEYWORDS: &[Keyword] = &[
    keyword!("on", Meaning::Power(true), "Switch the group on."),
    keyword!("off", Meaning::Power(false), "Switch the group off."),
    keyword!(
        "brightness",
        Meaning::Level(Field::Brightness),
        "Integer from 0 to 254."
    ),
    keyword!(
        "saturation",
        Meaning::Level(Field::Saturation),
        "Integer from 0 to 254; 0 is white, 254 fully coloured."
    ),
    keyword!(
        "color",
        Meaning::Level(Field::Hue),
        "Wrapping integer from 0 to 65535; 0 and 65535 are red, 25500 green, 46920 blue."
    ),
];
