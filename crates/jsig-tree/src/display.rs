//! Renders trees back into JVM signature text.
//!
//! Output is canonical rather than byte-for-byte: nested segments are always joined with `.`,
//! and a formal type parameter whose class bound was omitted (`T::LI;`) renders as `T:LI;`.

use std::fmt::{self, Display, Formatter, Write};

use crate::signature::{
    ArrayTypeSignature, ClassSignature, ClassTypeSignature, FieldTypeSignature,
    FormalTypeParameter, MethodTypeSignature, ReturnType, SimpleClassTypeSignature,
    TypeSignature, TypeVariableSignature, Wildcard,
};

impl Display for FieldTypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FieldTypeSignature::Class(c) => c.fmt(f),
            FieldTypeSignature::Array(a) => a.fmt(f),
            FieldTypeSignature::TypeVariable(v) => v.fmt(f),
            FieldTypeSignature::Wildcard(w) => w.fmt(f),
            FieldTypeSignature::Bottom => Ok(()),
        }
    }
}

impl Display for TypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeSignature::Base(base) => f.write_char(base.descriptor()),
            TypeSignature::Field(field) => field.fmt(f),
        }
    }
}

impl Display for ReturnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Void => f.write_char('V'),
            ReturnType::Type(ty) => ty.fmt(f),
        }
    }
}

impl Display for ClassTypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('L')?;
        for (idx, segment) in self.path().iter().enumerate() {
            if idx > 0 {
                f.write_char('.')?;
            }
            segment.fmt(f)?;
        }
        f.write_char(';')
    }
}

impl Display for SimpleClassTypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        if self.type_arguments().is_empty() {
            return Ok(());
        }
        f.write_char('<')?;
        for arg in self.type_arguments() {
            arg.fmt(f)?;
        }
        f.write_char('>')
    }
}

impl Display for ArrayTypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        self.component_type().fmt(f)
    }
}

impl Display for TypeVariableSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "T{};", self.identifier())
    }
}

impl Display for Wildcard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            return f.write_char('*');
        }
        if let Some(lower) = self.lower_bounds().first() {
            return write!(f, "-{lower}");
        }
        match self.upper_bounds().first() {
            Some(upper) => write!(f, "+{upper}"),
            None => f.write_char('*'),
        }
    }
}

impl Display for FormalTypeParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        if self.bounds().is_empty() {
            return f.write_char(':');
        }
        for bound in self.bounds() {
            write!(f, ":{bound}")?;
        }
        Ok(())
    }
}

fn write_formals(f: &mut Formatter<'_>, formals: &[FormalTypeParameter]) -> fmt::Result {
    if formals.is_empty() {
        return Ok(());
    }
    f.write_char('<')?;
    for formal in formals {
        formal.fmt(f)?;
    }
    f.write_char('>')
}

impl Display for ClassSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_formals(f, self.formal_type_parameters())?;
        self.superclass().fmt(f)?;
        for iface in self.superinterfaces() {
            iface.fmt(f)?;
        }
        Ok(())
    }
}

impl Display for MethodTypeSignature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_formals(f, self.formal_type_parameters())?;
        f.write_char('(')?;
        for param in self.parameter_types() {
            param.fmt(f)?;
        }
        f.write_char(')')?;
        self.return_type().fmt(f)?;
        for exception in self.exception_types() {
            write!(f, "^{exception}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::descriptor::BaseType;
    use crate::signature::*;

    fn tv(name: &str) -> FieldTypeSignature {
        TypeVariableSignature::make(name).into()
    }

    #[test]
    fn renders_identity_method() {
        let sig = MethodTypeSignature::make(
            vec![FormalTypeParameter::make(
                "T",
                vec![ClassTypeSignature::simple("java/lang/Object").into()],
            )],
            vec![tv("T").into()],
            ReturnType::Type(tv("T").into()),
            vec![],
        );
        assert_eq!(sig.to_string(), "<T:Ljava/lang/Object;>(TT;)TT;");
    }

    #[test]
    fn renders_nested_generic_class_and_wildcards() {
        let ty = ClassTypeSignature::make(vec![
            SimpleClassTypeSignature::make("com/example/Outer", false, vec![tv("T")]),
            SimpleClassTypeSignature::make(
                "Inner",
                true,
                vec![
                    Wildcard::unbounded().into(),
                    Wildcard::extends(tv("U")).into(),
                    Wildcard::super_of(ClassTypeSignature::simple("java/lang/Number").into())
                        .into(),
                ],
            ),
        ]);
        assert_eq!(
            ty.to_string(),
            "Lcom/example/Outer<TT;>.Inner<*+TU;-Ljava/lang/Number;>;"
        );
    }

    #[test]
    fn renders_arrays_void_and_throws() {
        let sig = MethodTypeSignature::make(
            vec![],
            vec![
                TypeSignature::Field(ArrayTypeSignature::make(BaseType::Int.into()).into()),
                BaseType::Long.into(),
            ],
            ReturnType::Void,
            vec![tv("X"), ClassTypeSignature::simple("java/io/IOException").into()],
        );
        assert_eq!(sig.to_string(), "([IJ)V^TX;^Ljava/io/IOException;");
    }
}
