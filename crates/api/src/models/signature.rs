//! Erased parameter types and their JNI-style descriptor encoding.
//!
//! JSNI references spell parameter lists the way the JVM does:
//! `(ILjava/lang/String;[[D)` for `(int, String, double[][])`. Generic type
//! arguments never appear; every type is already erased.

use crate::error::{IndexError, IndexResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn descriptor(self) -> char {
        match self {
            PrimitiveType::Boolean => 'Z',
            PrimitiveType::Byte => 'B',
            PrimitiveType::Char => 'C',
            PrimitiveType::Short => 'S',
            PrimitiveType::Int => 'I',
            PrimitiveType::Long => 'J',
            PrimitiveType::Float => 'F',
            PrimitiveType::Double => 'D',
        }
    }

    pub fn from_descriptor(code: char) -> Option<Self> {
        match code {
            'Z' => Some(PrimitiveType::Boolean),
            'B' => Some(PrimitiveType::Byte),
            'C' => Some(PrimitiveType::Char),
            'S' => Some(PrimitiveType::Short),
            'I' => Some(PrimitiveType::Int),
            'J' => Some(PrimitiveType::Long),
            'F' => Some(PrimitiveType::Float),
            'D' => Some(PrimitiveType::Double),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "boolean" => Some(PrimitiveType::Boolean),
            "byte" => Some(PrimitiveType::Byte),
            "char" => Some(PrimitiveType::Char),
            "short" => Some(PrimitiveType::Short),
            "int" => Some(PrimitiveType::Int),
            "long" => Some(PrimitiveType::Long),
            "float" => Some(PrimitiveType::Float),
            "double" => Some(PrimitiveType::Double),
            _ => None,
        }
    }
}

/// A parameter type after erasure.
///
/// Serialized as its descriptor string, e.g. `"Ljava/util/Map$Entry;"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ErasedType {
    Primitive(PrimitiveType),
    /// Binary class name with `.` package separators, e.g. `java.util.Map$Entry`.
    Class(String),
    Array(Box<ErasedType>),
}

impl ErasedType {
    pub fn class(binary_name: impl Into<String>) -> Self {
        ErasedType::Class(binary_name.into())
    }

    pub fn array_of(self) -> Self {
        ErasedType::Array(Box::new(self))
    }

    /// Build a type from its Java source spelling: `int`, `java.lang.String[]`,
    /// `java.util.Map$Entry`.
    ///
    /// Anything that is not a primitive keyword is taken as a binary class name.
    pub fn from_source_name(name: &str) -> Self {
        let name = name.trim();
        if let Some(element) = name.strip_suffix("[]") {
            return Self::from_source_name(element).array_of();
        }
        match PrimitiveType::from_keyword(name) {
            Some(p) => ErasedType::Primitive(p),
            None => ErasedType::Class(name.to_string()),
        }
    }

    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        self.write_descriptor(&mut out);
        out
    }

    fn write_descriptor(&self, out: &mut String) {
        match self {
            ErasedType::Primitive(p) => out.push(p.descriptor()),
            ErasedType::Class(name) => {
                out.push('L');
                out.extend(name.chars().map(|c| if c == '.' { '/' } else { c }));
                out.push(';');
            }
            ErasedType::Array(element) => {
                out.push('[');
                element.write_descriptor(out);
            }
        }
    }

    /// Parse exactly one type descriptor.
    pub fn parse_descriptor(descriptor: &str) -> IndexResult<Self> {
        let mut types = Self::parse_descriptor_list(descriptor)?;
        if types.len() != 1 {
            return Err(IndexError::InvalidDescriptor(descriptor.to_string()));
        }
        Ok(types.remove(0))
    }

    /// Parse a concatenated parameter descriptor such as `IZ[Ljava/lang/Object;`.
    pub fn parse_descriptor_list(descriptor: &str) -> IndexResult<Vec<Self>> {
        let invalid = || IndexError::InvalidDescriptor(descriptor.to_string());
        let mut types = Vec::new();
        let mut rest = descriptor;
        while !rest.is_empty() {
            let (ty, tail) = parse_one(rest).ok_or_else(invalid)?;
            types.push(ty);
            rest = tail;
        }
        Ok(types)
    }
}

fn parse_one(input: &str) -> Option<(ErasedType, &str)> {
    let mut chars = input.chars();
    let code = chars.next()?;
    match code {
        '[' => {
            let (element, tail) = parse_one(chars.as_str())?;
            Some((element.array_of(), tail))
        }
        'L' => {
            let body = chars.as_str();
            let end = body.find(';')?;
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            Some((ErasedType::Class(name.replace('/', ".")), &body[end + 1..]))
        }
        _ => PrimitiveType::from_descriptor(code).map(|p| (ErasedType::Primitive(p), chars.as_str())),
    }
}

/// Concatenated descriptor of a parameter list, without the enclosing parentheses.
pub fn descriptor_of(parameters: &[ErasedType]) -> String {
    let mut out = String::new();
    for p in parameters {
        p.write_descriptor(&mut out);
    }
    out
}

impl fmt::Display for ErasedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErasedType::Primitive(p) => f.write_str(p.keyword()),
            ErasedType::Class(name) => f.write_str(name),
            ErasedType::Array(element) => write!(f, "{}[]", element),
        }
    }
}

impl TryFrom<String> for ErasedType {
    type Error = IndexError;

    fn try_from(value: String) -> IndexResult<Self> {
        ErasedType::parse_descriptor(&value)
    }
}

impl From<ErasedType> for String {
    fn from(value: ErasedType) -> Self {
        value.descriptor()
    }
}
