//! Built-in type tags.

use std::fmt;

/// The built-in kinds of value.
///
/// The names are the tags reported by runtime type identification for values
/// that carry no nominal type identifier, and the keys of the built-in method
/// table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Builtin {
    /// The `null` value.
    Null,
    /// The `undefined` value.
    Undefined,
    /// Booleans and boxed booleans.
    Boolean,
    /// Numbers and boxed numbers.
    Number,
    /// Dates.
    Date,
    /// Regular expressions.
    RegExp,
    /// Strings and boxed strings.
    String,
    /// Arrays.
    Array,
    /// Argument lists.
    Arguments,
    /// Errors.
    Error,
    /// Plain objects and untyped instances.
    Object,
    /// Functions and type representatives.
    Function,
}

impl Builtin {
    /// Every built-in tag, in declaration order.
    pub const ALL: [Builtin; 12] = [
        Builtin::Null,
        Builtin::Undefined,
        Builtin::Boolean,
        Builtin::Number,
        Builtin::Date,
        Builtin::RegExp,
        Builtin::String,
        Builtin::Array,
        Builtin::Arguments,
        Builtin::Error,
        Builtin::Object,
        Builtin::Function,
    ];

    /// Returns the tag name, e.g. `"Array"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Builtin::Null => "Null",
            Builtin::Undefined => "Undefined",
            Builtin::Boolean => "Boolean",
            Builtin::Number => "Number",
            Builtin::Date => "Date",
            Builtin::RegExp => "RegExp",
            Builtin::String => "String",
            Builtin::Array => "Array",
            Builtin::Arguments => "Arguments",
            Builtin::Error => "Error",
            Builtin::Object => "Object",
            Builtin::Function => "Function",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
