use jsig_tree::{
    ClassTypeSignature, FieldTypeSignature, FormalTypeParameter, ReturnType, TypeSignature,
};

use crate::error::{ReifyError, Result};
use crate::factory::GenericsFactory;

/// Turns signature trees into factory values.
///
/// A reifier borrows its factory and holds no other state, so one can be made per call.
pub struct Reifier<'f, F: ?Sized> {
    factory: &'f F,
}

impl<'f, F: GenericsFactory + ?Sized> Reifier<'f, F> {
    pub fn make(factory: &'f F) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &'f F {
        self.factory
    }

    pub fn reify_type(&self, sig: &TypeSignature) -> Result<F::Type> {
        match sig {
            TypeSignature::Base(base) => Ok(self.factory.make_base_type(*base)),
            TypeSignature::Field(field) => self.reify_field_type(field),
        }
    }

    pub fn reify_field_type(&self, sig: &FieldTypeSignature) -> Result<F::Type> {
        match sig {
            FieldTypeSignature::Class(class) => self.reify_class_type(class),
            FieldTypeSignature::Array(array) => {
                let component = self.reify_type(array.component_type())?;
                Ok(self.factory.make_array_type(component))
            }
            FieldTypeSignature::TypeVariable(tv) => {
                self.factory.find_type_variable(tv.identifier())
            }
            FieldTypeSignature::Wildcard(wildcard) => {
                let (upper, lower) = wildcard.bound_arrays();
                self.factory.make_wildcard(upper, lower)
            }
            FieldTypeSignature::Bottom => Err(ReifyError::BottomSignature),
        }
    }

    pub fn reify_return_type(&self, ret: &ReturnType) -> Result<F::Type> {
        match ret {
            ReturnType::Void => Ok(self.factory.make_void()),
            ReturnType::Type(ty) => self.reify_type(ty),
        }
    }

    /// Bounds are handed over unreified; the factory decides when to reify them.
    pub fn reify_formal_type_parameter(&self, formal: &FormalTypeParameter) -> F::Type {
        self.factory
            .make_type_variable(formal.name(), formal.bound_array())
    }

    /// Leading segments without type arguments only contribute to the class name. The first
    /// segment with arguments becomes a parameterized type without owner, and it is the owner of
    /// the type built from the next segment, and so on outward-in.
    pub fn reify_class_type(&self, sig: &ClassTypeSignature) -> Result<F::Type> {
        let mut segments = sig.path().iter();
        let mut name = String::new();
        let mut parameterized = None;

        for segment in segments.by_ref() {
            push_segment(&mut name, segment.name(), segment.dollar());
            if !segment.type_arguments().is_empty() {
                parameterized = Some(segment);
                break;
            }
        }

        let Some(first) = parameterized else {
            return self.factory.make_named_type(&name);
        };

        let raw = self.factory.make_named_type(&name)?;
        let args = self.reify_type_arguments(first.type_arguments())?;
        let mut owner = self.factory.make_parameterized_type(raw, args, None)?;

        for segment in segments {
            push_segment(&mut name, segment.name(), segment.dollar());
            let raw = self.factory.make_named_type(&name)?;
            let args = self.reify_type_arguments(segment.type_arguments())?;
            owner = self.factory.make_parameterized_type(raw, args, Some(owner))?;
        }

        Ok(owner)
    }

    pub fn reify_type_arguments(&self, args: &[FieldTypeSignature]) -> Result<Vec<F::Type>> {
        self.reify_field_types(args)
    }

    pub fn reify_field_types(&self, sigs: &[FieldTypeSignature]) -> Result<Vec<F::Type>> {
        sigs.iter().map(|sig| self.reify_field_type(sig)).collect()
    }

    pub fn reify_all(&self, sigs: &[TypeSignature]) -> Result<Vec<F::Type>> {
        sigs.iter().map(|sig| self.reify_type(sig)).collect()
    }

    pub fn reify_class_types(&self, sigs: &[ClassTypeSignature]) -> Result<Vec<F::Type>> {
        sigs.iter().map(|sig| self.reify_class_type(sig)).collect()
    }

    pub fn reify_formal_type_parameters(&self, formals: &[FormalTypeParameter]) -> Vec<F::Type> {
        formals
            .iter()
            .map(|formal| self.reify_formal_type_parameter(formal))
            .collect()
    }
}

fn push_segment(name: &mut String, segment: &str, dollar: bool) {
    if !name.is_empty() {
        name.push(if dollar { '$' } else { '.' });
    }
    name.push_str(segment);
}
