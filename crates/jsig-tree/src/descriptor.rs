use std::fmt;

use crate::error::{Error, Result};

/// A primitive type. Values carry no state, so every `BaseType::Int` is the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Byte,
    Boolean,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl BaseType {
    pub const ALL: [BaseType; 8] = [
        BaseType::Byte,
        BaseType::Boolean,
        BaseType::Short,
        BaseType::Char,
        BaseType::Int,
        BaseType::Long,
        BaseType::Float,
        BaseType::Double,
    ];

    pub const fn descriptor(self) -> char {
        match self {
            BaseType::Byte => 'B',
            BaseType::Boolean => 'Z',
            BaseType::Short => 'S',
            BaseType::Char => 'C',
            BaseType::Int => 'I',
            BaseType::Long => 'J',
            BaseType::Float => 'F',
            BaseType::Double => 'D',
        }
    }

    pub const fn from_descriptor(c: char) -> Option<Self> {
        Some(match c {
            'B' => BaseType::Byte,
            'Z' => BaseType::Boolean,
            'S' => BaseType::Short,
            'C' => BaseType::Char,
            'I' => BaseType::Int,
            'J' => BaseType::Long,
            'F' => BaseType::Float,
            'D' => BaseType::Double,
            _ => return None,
        })
    }

    /// The Java keyword for this primitive (`int`, `boolean`, ...).
    pub const fn java_name(self) -> &'static str {
        match self {
            BaseType::Byte => "byte",
            BaseType::Boolean => "boolean",
            BaseType::Short => "short",
            BaseType::Char => "char",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Float => "float",
            BaseType::Double => "double",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.java_name())
    }
}

/// An erased field type, as found in field and method descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Base(BaseType),
    /// Internal name, e.g. `java/lang/String`.
    Object(String),
    Array(Box<FieldType>),
}

impl FieldType {
    /// Binary name (`java.lang.String`) of an object type; `None` for primitives and arrays.
    pub fn binary_name(&self) -> Option<String> {
        match self {
            FieldType::Object(internal) => Some(internal.replace('/', ".")),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    pub params: Vec<FieldType>,
    /// `None` for `void`.
    pub return_type: Option<FieldType>,
}

/// Parses a field descriptor such as `[Ljava/lang/String;`.
pub fn parse_field_descriptor(desc: &str) -> Result<FieldType> {
    let mut cursor = Cursor::new(desc);
    let ty = cursor.field_type()?;
    cursor.finish()?;
    Ok(ty)
}

/// Parses a method descriptor such as `(I[J)Ljava/lang/Object;`.
pub fn parse_method_descriptor(desc: &str) -> Result<MethodDescriptor> {
    let mut cursor = Cursor::new(desc);
    cursor.expect(b'(')?;

    let mut params = Vec::new();
    while !cursor.eat(b')') {
        params.push(cursor.field_type()?);
    }
    let return_type = if cursor.eat(b'V') {
        None
    } else {
        Some(cursor.field_type()?)
    };
    cursor.finish()?;

    Ok(MethodDescriptor {
        params,
        return_type,
    })
}

/// Errors always report the whole descriptor.
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn error(&self) -> Error {
        Error::InvalidDescriptor(self.text.to_string())
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        let matched = self.peek() == Some(byte);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn finish(&self) -> Result<()> {
        if self.pos == self.text.len() {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn field_type(&mut self) -> Result<FieldType> {
        let mut dimensions = 0;
        while self.eat(b'[') {
            dimensions += 1;
        }

        let tag = self.peek().ok_or_else(|| self.error())?;
        self.pos += 1;
        let mut ty = match tag {
            b'L' => {
                let rest = &self.text[self.pos..];
                let len = rest
                    .find(';')
                    .filter(|len| *len > 0)
                    .ok_or_else(|| self.error())?;
                self.pos += len + 1;
                FieldType::Object(rest[..len].to_string())
            }
            _ => {
                let base = BaseType::from_descriptor(tag as char).ok_or_else(|| self.error())?;
                FieldType::Base(base)
            }
        };

        for _ in 0..dimensions {
            ty = FieldType::Array(Box::new(ty));
        }
        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn object(name: &str) -> FieldType {
        FieldType::Object(name.to_string())
    }

    fn array(component: FieldType) -> FieldType {
        FieldType::Array(Box::new(component))
    }

    #[test]
    fn field_descriptors() {
        assert_eq!(parse_field_descriptor("J").unwrap(), FieldType::Base(BaseType::Long));
        assert_eq!(
            parse_field_descriptor("[[Ljava/util/Map;").unwrap(),
            array(array(object("java/util/Map")))
        );
        assert_eq!(
            parse_field_descriptor("Ljava/util/Map;").unwrap().binary_name(),
            Some("java.util.Map".to_string())
        );
    }

    #[test]
    fn method_descriptor_with_params_and_return() {
        let desc = parse_method_descriptor("(Z[DLjava/lang/Object;)Ljava/lang/String;").unwrap();
        assert_eq!(
            desc.params,
            vec![
                FieldType::Base(BaseType::Boolean),
                array(FieldType::Base(BaseType::Double)),
                object("java/lang/Object"),
            ]
        );
        assert_eq!(desc.return_type, Some(object("java/lang/String")));

        let void = parse_method_descriptor("()V").unwrap();
        assert!(void.params.is_empty());
        assert_eq!(void.return_type, None);
    }

    #[test]
    fn malformed_descriptors_report_the_input() {
        for bad in ["(J", "J)V", "()VV", "(V)V", "[", ""] {
            assert_eq!(
                parse_method_descriptor(bad).unwrap_err(),
                Error::InvalidDescriptor(bad.to_string())
            );
        }
        for bad in ["L;", "Ljava/lang/String", "X", "II", "V"] {
            assert_eq!(
                parse_field_descriptor(bad).unwrap_err(),
                Error::InvalidDescriptor(bad.to_string())
            );
        }
    }

    #[test]
    fn every_base_type_maps_back_from_its_tag() {
        for base in BaseType::ALL {
            assert_eq!(BaseType::from_descriptor(base.descriptor()), Some(base));
        }
        assert_eq!(BaseType::from_descriptor('V'), None);
    }
}
