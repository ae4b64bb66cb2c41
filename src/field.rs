//! Field selection and extracted rows
//!
//! A [`FieldSet`] names which token columns a view extracts. Values in a
//! [`Row`] always come out in the canonical [`Field`] order, whatever order
//! the fields were requested in.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// One token column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Index,
    Word,
    Lemma,
    Tag,
    Morph,
    Head,
    Dep,
    OptimizedTag,
}

impl Field {
    /// All fields in canonical order
    pub const ALL: [Field; 8] = [
        Field::Index,
        Field::Word,
        Field::Lemma,
        Field::Tag,
        Field::Morph,
        Field::Head,
        Field::Dep,
        Field::OptimizedTag,
    ];

    #[inline(always)]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Index => "index",
            Field::Word => "word",
            Field::Lemma => "lemma",
            Field::Tag => "tag",
            Field::Morph => "morph",
            Field::Head => "head",
            Field::Dep => "dep",
            Field::OptimizedTag => "opt",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(Field::Index),
            "word" => Ok(Field::Word),
            "lemma" => Ok(Field::Lemma),
            "tag" | "pos" => Ok(Field::Tag),
            "morph" => Ok(Field::Morph),
            "head" => Ok(Field::Head),
            "dep" | "deprel" => Ok(Field::Dep),
            "opt" | "optimized_tag" => Ok(Field::OptimizedTag),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}

/// A set of fields, iterated in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldSet(u8);

impl FieldSet {
    pub const EMPTY: FieldSet = FieldSet(0);
    pub const ALL: FieldSet = FieldSet(u8::MAX);

    pub fn of(fields: &[Field]) -> Self {
        fields.iter().copied().collect()
    }

    #[must_use]
    pub fn with(self, field: Field) -> Self {
        FieldSet(self.0 | field.bit())
    }

    #[must_use]
    pub fn without(self, field: Field) -> Self {
        FieldSet(self.0 & !field.bit())
    }

    #[inline]
    pub fn contains(self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Field> {
        Field::ALL.into_iter().filter(move |f| self.contains(*f))
    }

    /// Position of `field` within a row extracted with this set
    pub fn position(self, field: Field) -> Option<usize> {
        if !self.contains(field) {
            return None;
        }
        let below = self.0 & (field.bit() - 1);
        Some(below.count_ones() as usize)
    }
}

impl From<Field> for FieldSet {
    fn from(field: Field) -> Self {
        FieldSet(field.bit())
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        iter.into_iter().fold(FieldSet::EMPTY, FieldSet::with)
    }
}

impl BitOr for Field {
    type Output = FieldSet;

    fn bitor(self, rhs: Field) -> FieldSet {
        FieldSet::from(self).with(rhs)
    }
}

impl BitOr<Field> for FieldSet {
    type Output = FieldSet;

    fn bitor(self, rhs: Field) -> FieldSet {
        self.with(rhs)
    }
}

impl BitOr for FieldSet {
    type Output = FieldSet;

    fn bitor(self, rhs: FieldSet) -> FieldSet {
        FieldSet(self.0 | rhs.0)
    }
}

/// A single extracted cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value<'a> {
    Int(i64),
    Str(&'a str),
}

impl<'a> Value<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Value::Str(s) => Some(s),
            Value::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(n) => Some(n),
            Value::Str(_) => None,
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value<'_> {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// The selected values of one token, in canonical field order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    fields: FieldSet,
    values: Vec<Value<'a>>,
}

impl<'a> Row<'a> {
    pub(crate) fn new(fields: FieldSet, values: Vec<Value<'a>>) -> Self {
        debug_assert_eq!(fields.len(), values.len());
        Self { fields, values }
    }

    pub fn fields(&self) -> FieldSet {
        self.fields
    }

    pub fn values(&self) -> &[Value<'a>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a selected field
    pub fn get(&self, field: Field) -> Option<Value<'a>> {
        self.fields.position(field).map(|i| self.values[i])
    }

    /// The only value of a one-field row
    pub fn single(&self) -> Option<Value<'a>> {
        match self.values.as_slice() {
            [value] => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str("\t")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
