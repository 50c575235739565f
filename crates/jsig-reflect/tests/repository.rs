use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use jsig_reflect::model::{ClassInfo, ClassPath, MethodInfo};
use jsig_reflect::{
    ClassRepository, FieldRepository, GenericsFactory, MethodRepository, ReifyError, Result, Type,
    TypeNameFactory,
};
use jsig_tree::{
    ArrayTypeSignature, BaseType, ClassSignature, ClassTypeSignature, FieldTypeSignature,
    FormalTypeParameter, MethodTypeSignature, ReturnType, SignatureParser, TypeSignature,
    TypeVariableSignature, Wildcard,
};
use pretty_assertions::assert_eq;

fn object() -> FieldTypeSignature {
    ClassTypeSignature::simple("java/lang/Object").into()
}

fn tv(name: &str) -> FieldTypeSignature {
    TypeVariableSignature::make(name).into()
}

/// Answers a fixed set of signatures with prebuilt trees.
#[derive(Default)]
struct TableParser {
    classes: HashMap<&'static str, ClassSignature>,
    methods: HashMap<&'static str, MethodTypeSignature>,
    fields: HashMap<&'static str, TypeSignature>,
}

fn unknown(signature: &str) -> jsig_tree::Error {
    jsig_tree::Error::invalid_signature(signature, 0, "unexpected signature")
}

impl SignatureParser for TableParser {
    fn parse_class_signature(&self, signature: &str) -> jsig_tree::Result<ClassSignature> {
        self.classes
            .get(signature)
            .cloned()
            .ok_or_else(|| unknown(signature))
    }

    fn parse_method_signature(&self, signature: &str) -> jsig_tree::Result<MethodTypeSignature> {
        self.methods
            .get(signature)
            .cloned()
            .ok_or_else(|| unknown(signature))
    }

    fn parse_field_signature(&self, signature: &str) -> jsig_tree::Result<TypeSignature> {
        self.fields
            .get(signature)
            .cloned()
            .ok_or_else(|| unknown(signature))
    }
}

const IDENTITY: &str = "<T:Ljava/lang/Object;>(TT;)TT;";
const SORT: &str = "<T::Ljava/lang/Comparable<-TT;>;>(Ljava/util/List<TT;>;[TT;)V^Ljava/io/IOException;";
const ARRAY_LIST: &str =
    "<E:Ljava/lang/Object;>Ljava/util/AbstractList<TE;>;Ljava/util/List<TE;>;Ljava/util/RandomAccess;";
const MAP_FIELD: &str = "Ljava/util/Map<TK;[TV;>;";

fn parser() -> TableParser {
    let mut parser = TableParser::default();
    parser.methods.insert(
        IDENTITY,
        MethodTypeSignature::make(
            vec![FormalTypeParameter::make("T", vec![object()])],
            vec![TypeSignature::Field(tv("T"))],
            ReturnType::Type(TypeSignature::Field(tv("T"))),
            vec![],
        ),
    );
    parser.methods.insert(
        SORT,
        MethodTypeSignature::make(
            vec![FormalTypeParameter::make(
                "T",
                vec![ClassTypeSignature::generic(
                    "java/lang/Comparable",
                    vec![Wildcard::super_of(tv("T")).into()],
                )
                .into()],
            )],
            vec![
                TypeSignature::Field(
                    ClassTypeSignature::generic("java/util/List", vec![tv("T")]).into(),
                ),
                TypeSignature::Field(ArrayTypeSignature::make(tv("T").into()).into()),
            ],
            ReturnType::Void,
            vec![ClassTypeSignature::simple("java/io/IOException").into()],
        ),
    );
    parser.classes.insert(
        ARRAY_LIST,
        ClassSignature::make(
            vec![FormalTypeParameter::make("E", vec![object()])],
            ClassTypeSignature::generic("java/util/AbstractList", vec![tv("E")]),
            vec![
                ClassTypeSignature::generic("java/util/List", vec![tv("E")]),
                ClassTypeSignature::simple("java/util/RandomAccess"),
            ],
        ),
    );
    parser.fields.insert(
        MAP_FIELD,
        TypeSignature::Field(
            ClassTypeSignature::generic(
                "java/util/Map",
                vec![tv("K"), ArrayTypeSignature::make(tv("V").into()).into()],
            )
            .into(),
        ),
    );
    parser
}

#[test]
fn method_names_render_through_the_name_factory() {
    let repo = MethodRepository::parse(SORT, &parser(), TypeNameFactory).unwrap();

    assert_eq!(repo.type_parameters(), vec!["T".to_string()]);
    assert_eq!(
        repo.parameter_types().unwrap(),
        vec!["java.util.List<T>".to_string(), "T[]".to_string()]
    );
    assert_eq!(repo.return_type().unwrap(), "void");
    assert_eq!(
        repo.exception_types().unwrap(),
        vec!["java.io.IOException".to_string()]
    );
    assert_eq!(
        repo.as_constructor().parameter_types().unwrap(),
        repo.parameter_types().unwrap()
    );
}

#[test]
fn class_supertypes() {
    let repo = ClassRepository::parse(ARRAY_LIST, &parser(), TypeNameFactory).unwrap();
    assert_eq!(repo.type_parameters(), vec!["E".to_string()]);
    assert_eq!(repo.superclass().unwrap(), "java.util.AbstractList<E>");
    assert_eq!(
        repo.superinterfaces().unwrap(),
        vec![
            "java.util.List<E>".to_string(),
            "java.util.RandomAccess".to_string()
        ]
    );
}

#[test]
fn field_generic_type() {
    let repo = FieldRepository::parse(MAP_FIELD, &parser(), TypeNameFactory).unwrap();
    assert_eq!(repo.generic_type().unwrap(), "java.util.Map<K, V[]>");

    let primitive = FieldRepository::new(TypeSignature::Base(BaseType::Long), TypeNameFactory);
    assert_eq!(primitive.generic_type().unwrap(), "long");
}

#[test]
fn parse_errors_surface_from_the_parser() {
    let err = MethodRepository::parse("(TT;", &parser(), TypeNameFactory).unwrap_err();
    assert!(
        matches!(err, jsig_tree::Error::InvalidSignature { ref signature, .. } if signature == "(TT;"),
        "{err:?}"
    );
}

#[test]
fn accessors_return_fresh_equal_vecs() {
    let repo = MethodRepository::parse(SORT, &parser(), TypeNameFactory).unwrap();

    let mut first = repo.parameter_types().unwrap();
    first.push("mutated".to_string());
    first[0].clear();

    let second = repo.parameter_types().unwrap();
    let third = repo.parameter_types().unwrap();
    assert_eq!(second, vec!["java.util.List<T>".to_string(), "T[]".to_string()]);
    assert_eq!(second, third);

    let mut params = repo.type_parameters();
    params.clear();
    assert_eq!(repo.type_parameters().len(), 1);
}

/// Renders names like [`TypeNameFactory`] but fails class lookups while `broken` is set.
struct FlakyFactory {
    broken: AtomicBool,
}

impl GenericsFactory for FlakyFactory {
    type Type = String;

    fn make_type_variable(&self, name: &str, bounds: Arc<[FieldTypeSignature]>) -> String {
        TypeNameFactory.make_type_variable(name, bounds)
    }

    fn make_wildcard(
        &self,
        upper_bounds: Arc<[FieldTypeSignature]>,
        lower_bounds: Arc<[FieldTypeSignature]>,
    ) -> Result<String> {
        TypeNameFactory.make_wildcard(upper_bounds, lower_bounds)
    }

    fn make_named_type(&self, name: &str) -> Result<String> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(ReifyError::TypeNotPresent {
                name: name.to_string(),
            });
        }
        TypeNameFactory.make_named_type(name)
    }

    fn make_deferred_named_type(&self, name: &str) -> String {
        TypeNameFactory.make_deferred_named_type(name)
    }

    fn make_parameterized_type(
        &self,
        raw: String,
        type_arguments: Vec<String>,
        owner: Option<String>,
    ) -> Result<String> {
        TypeNameFactory.make_parameterized_type(raw, type_arguments, owner)
    }

    fn make_array_type(&self, component: String) -> String {
        TypeNameFactory.make_array_type(component)
    }

    fn find_type_variable(&self, name: &str) -> Result<String> {
        TypeNameFactory.find_type_variable(name)
    }

    fn make_byte(&self) -> String {
        TypeNameFactory.make_byte()
    }

    fn make_boolean(&self) -> String {
        TypeNameFactory.make_boolean()
    }

    fn make_short(&self) -> String {
        TypeNameFactory.make_short()
    }

    fn make_char(&self) -> String {
        TypeNameFactory.make_char()
    }

    fn make_int(&self) -> String {
        TypeNameFactory.make_int()
    }

    fn make_long(&self) -> String {
        TypeNameFactory.make_long()
    }

    fn make_float(&self) -> String {
        TypeNameFactory.make_float()
    }

    fn make_double(&self) -> String {
        TypeNameFactory.make_double()
    }

    fn make_void(&self) -> String {
        TypeNameFactory.make_void()
    }
}

#[test]
fn failures_are_not_memoized() {
    let repo = ClassRepository::parse(
        ARRAY_LIST,
        &parser(),
        FlakyFactory {
            broken: AtomicBool::new(true),
        },
    )
    .unwrap();

    assert_eq!(
        repo.superclass().unwrap_err(),
        ReifyError::TypeNotPresent {
            name: "java/util/AbstractList".to_string()
        }
    );

    repo.factory().broken.store(false, Ordering::SeqCst);
    assert_eq!(repo.superclass().unwrap(), "java.util.AbstractList<E>");

    repo.factory().broken.store(true, Ordering::SeqCst);
    assert_eq!(repo.superclass().unwrap(), "java.util.AbstractList<E>");
}

#[test]
fn identity_method_resolves_t_in_its_own_scope() {
    let class =
        ClassInfo::builder("com.example.Util", Arc::new(ClassPath::with_java_base())).build();
    let descriptor = "(Ljava/lang/Object;)Ljava/lang/Object;";
    let method = MethodInfo::builder(&class, "identity", descriptor)
        .unwrap()
        .parse_signature(IDENTITY, &parser())
        .unwrap()
        .build();

    let formals = method.type_parameters();
    assert_eq!(formals.len(), 1);
    let t = &formals[0];
    assert_eq!(t.name(), "T");
    assert_eq!(t.bounds().unwrap(), vec![Type::object()]);
    assert!(t
        .generic_declaration()
        .is_some_and(|decl| decl.ptr_eq(&jsig_reflect::GenericDecl::Method(method.clone()))));

    let params = method.generic_parameter_types().unwrap();
    assert_eq!(params, vec![Type::TypeVariable(t.clone())]);
    assert_eq!(
        method.generic_return_type().unwrap(),
        Type::TypeVariable(t.clone())
    );
    assert_eq!(method.generic_exception_types().unwrap(), Vec::<Type>::new());
}

#[test]
fn concurrent_first_access_agrees() {
    let repo = Arc::new(MethodRepository::parse(SORT, &parser(), TypeNameFactory).unwrap());

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                scope.spawn(move || {
                    (
                        repo.type_parameters(),
                        repo.parameter_types().unwrap(),
                        repo.exception_types().unwrap(),
                        repo.return_type().unwrap(),
                    )
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let later = (
        repo.type_parameters(),
        repo.parameter_types().unwrap(),
        repo.exception_types().unwrap(),
        repo.return_type().unwrap(),
    );
    assert_eq!(later.1, vec!["java.util.List<T>".to_string(), "T[]".to_string()]);
    for result in results {
        assert_eq!(result, later);
    }
}
