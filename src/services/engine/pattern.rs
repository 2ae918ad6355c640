//! Placeholder-template compiler.
//!
//! A template like `{PARENT_LETTER}.{AREA}.{NAME}.{EXT}` is compiled
//! once into an ordered segment list (used to rebuild names without a
//! textual-replacement pass) and an anchored regex (used to decompose
//! existing names).

use regex::Regex;
use thiserror::Error;

/// A placeholder field of the naming template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Prefix,
    Area,
    Name,
    Ext,
    ParentLetter,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Prefix,
        Field::Area,
        Field::Name,
        Field::Ext,
        Field::ParentLetter,
    ];

    /// The literal placeholder token in template text.
    pub fn token(self) -> &'static str {
        match self {
            Field::Prefix => "{PREFIX}",
            Field::Area => "{AREA}",
            Field::Name => "{NAME}",
            Field::Ext => "{EXT}",
            Field::ParentLetter => "{PARENT_LETTER}",
        }
    }

    fn group_name(self) -> &'static str {
        match self {
            Field::Prefix => "PREFIX",
            Field::Area => "AREA",
            Field::Name => "NAME",
            Field::Ext => "EXT",
            Field::ParentLetter => "PARENT_LETTER",
        }
    }

    /// Capture sub-pattern: short codes stop at the dot delimiter, the
    /// name body may span anything, the parent letter is one char.
    fn subpattern(self) -> &'static str {
        match self {
            Field::Prefix | Field::Area | Field::Ext => "[^.]+",
            Field::Name => ".+",
            Field::ParentLetter => ".",
        }
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Field(Field),
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("placeholder {0} appears more than once")]
    DuplicateField(&'static str),
    #[error("pattern failed to compile: {0}")]
    Regex(String),
}

/// The decomposition of a filename against a template. Fields the
/// template does not contain are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilenameComponents {
    pub prefix: Option<String>,
    pub area: Option<String>,
    pub name: Option<String>,
    pub ext: Option<String>,
    pub parent_letter: Option<String>,
}

impl FilenameComponents {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Prefix => self.prefix.as_deref(),
            Field::Area => self.area.as_deref(),
            Field::Name => self.name.as_deref(),
            Field::Ext => self.ext.as_deref(),
            Field::ParentLetter => self.parent_letter.as_deref(),
        }
    }
}

/// A compiled naming template.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    template: String,
    segments: Vec<Segment>,
    regex: Regex,
}

impl CompiledPattern {
    /// Compile a template. Every char is literal except the five
    /// placeholder tokens; each may appear at most once.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let segments = Self::parse_segments(template)?;

        let mut pattern = String::from("^");
        for segment in &segments {
            match segment {
                Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
                Segment::Field(field) => {
                    pattern.push_str(&format!(
                        "(?P<{}>{})",
                        field.group_name(),
                        field.subpattern()
                    ));
                }
            }
        }
        pattern.push('$');

        let regex = Regex::new(&pattern).map_err(|e| PatternError::Regex(e.to_string()))?;

        Ok(Self {
            template: template.to_string(),
            segments,
            regex,
        })
    }

    fn parse_segments(template: &str) -> Result<Vec<Segment>, PatternError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        'scan: while !rest.is_empty() {
            for field in Field::ALL {
                if rest.starts_with(field.token()) {
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Field(f) if *f == field))
                    {
                        return Err(PatternError::DuplicateField(field.token()));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                    rest = &rest[field.token().len()..];
                    continue 'scan;
                }
            }
            let ch = rest.chars().next().expect("non-empty rest");
            literal.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(segments)
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether the template contains the given placeholder.
    pub fn has(&self, field: Field) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Field(f) if *f == field))
    }

    /// Whole-string match of a filename against the template. A
    /// filename that does not fit produces `None`, never an error.
    pub fn matches(&self, filename: &str) -> Option<FilenameComponents> {
        let caps = self.regex.captures(filename)?;
        let value = |field: Field| {
            caps.name(field.group_name())
                .map(|m| m.as_str().to_string())
        };
        Some(FilenameComponents {
            prefix: value(Field::Prefix),
            area: value(Field::Area),
            name: value(Field::Name),
            ext: value(Field::Ext),
            parent_letter: value(Field::ParentLetter),
        })
    }

    /// Substitute field values into the template via the segment list.
    pub fn render<F>(&self, mut value_of: F) -> String
    where
        F: FnMut(Field) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => out.push_str(&value_of(*field)),
            }
        }
        out
    }
}
