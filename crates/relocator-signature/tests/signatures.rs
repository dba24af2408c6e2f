//! End-to-end tests over the public signature API: parse, inspect, rebuild.

use std::collections::HashSet;

use relocator_signature::{
    BuilderStateError, ClassSignature, ClassTypeBuilder, Kind, MethodSignature, SignatureError,
    TypeArgument, TypeParameter, TypeSignature, Variance,
};

const TYPE_SIGNATURES: &[&str] = &[
    "V",
    "Z",
    "[[D",
    "TT;",
    "[TElement;",
    "Ljava/lang/String;",
    "[Ljava/lang/Object;",
    "Ljava/util/List<Ljava/lang/String;>;",
    "Ljava/util/Map<TK;TV;>;",
    "Ljava/util/List<+Ljava/lang/Number;>;",
    "Ljava/util/List<-Ljava/lang/Integer;>;",
    "Ljava/util/List<*>;",
    "Ljava/util/List<[I>;",
    "Ljava/util/Map<Ljava/lang/String;Ljava/util/List<TT;>;>.Entry<*-TU;>;",
    "Lcom/example/Outer.Middle.Inner;",
    "Lcom/example/Outer<TA;>.Middle.Inner<TB;>;",
];

const CLASS_SIGNATURES: &[&str] = &[
    "Ljava/lang/Object;",
    "<T:Ljava/lang/Object;>Ljava/lang/Object;Ljava/lang/Comparable<TT;>;",
    "<K::Ljava/lang/Comparable<TK;>;V:Ljava/lang/Object;:Ljava/io/Serializable;>Ljava/util/AbstractMap<TK;TV;>;Ljava/util/Map<TK;TV;>;",
    "Ljava/lang/Enum<Lcom/example/Color;>;",
];

const METHOD_SIGNATURES: &[&str] = &[
    "()V",
    "(I)V",
    "(ILjava/lang/String;[J)Ljava/lang/Object;",
    "<T:Ljava/lang/Object;>(Ljava/util/List<+TT;>;)TT;",
    "<X:Ljava/lang/Throwable;>(Ljava/util/function/Supplier<+TX;>;)V^TX;",
    "()V^Ljava/io/IOException;^Ljava/lang/InterruptedException;",
];

#[test]
fn type_signatures_round_trip() {
    for text in TYPE_SIGNATURES {
        let signature = TypeSignature::parse(text).unwrap();
        assert_eq!(signature.as_str(), *text);
        assert_eq!(signature.to_string(), *text);
    }
}

#[test]
fn class_and_method_signatures_round_trip() {
    for text in CLASS_SIGNATURES {
        assert_eq!(ClassSignature::parse(text).unwrap().as_str(), *text);
    }
    for text in METHOD_SIGNATURES {
        assert_eq!(MethodSignature::parse(text).unwrap().as_str(), *text);
    }
}

#[test]
fn canonical_text_is_stable() {
    let built = ClassTypeBuilder::new("java/util/List")
        .unwrap()
        .add_type_argument(TypeSignature::type_variable("E").unwrap())
        .unwrap()
        .build()
        .unwrap();
    let first = built.as_str().to_string();
    assert_eq!(built.as_str(), first);
    assert_eq!(built.as_str(), "Ljava/util/List<TE;>;");
}

#[test]
fn equal_values_hash_equal() {
    let parsed: HashSet<TypeSignature> = TYPE_SIGNATURES
        .iter()
        .map(|text| TypeSignature::parse(text).unwrap())
        .collect();
    assert_eq!(parsed.len(), TYPE_SIGNATURES.len());

    let built = ClassTypeBuilder::new("java/util/List")
        .unwrap()
        .add_wildcard()
        .unwrap()
        .build()
        .unwrap();
    assert!(parsed.contains(&built));

    let method = MethodSignature::builder()
        .add_value_param(TypeSignature::INT)
        .unwrap()
        .returns(TypeSignature::VOID)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(method, MethodSignature::parse("(I)V").unwrap());
}

#[test]
fn list_of_string() {
    let signature = TypeSignature::parse("Ljava/util/List<Ljava/lang/String;>;").unwrap();
    assert_eq!(signature.kind(), Kind::Class);
    assert_eq!(signature.root_class_name().unwrap(), "java/util/List");
    assert_eq!(signature.inner_class_count().unwrap(), 0);

    let arguments = signature.type_arguments(0).unwrap();
    assert_eq!(arguments.len(), 1);
    assert_eq!(arguments[0].variance(), Variance::Invariant);
    assert_eq!(
        arguments[0].signature().map(TypeSignature::as_str),
        Some("Ljava/lang/String;")
    );
}

#[test]
fn int_to_void_method() {
    let signature = MethodSignature::builder()
        .add_value_param(TypeSignature::INT)
        .unwrap()
        .returns(TypeSignature::VOID)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(signature.as_str(), "(I)V");
}

#[test]
fn array_of_map() {
    let signature = TypeSignature::class_of("java/util/Map")
        .unwrap()
        .array(2)
        .unwrap();
    assert_eq!(signature.as_str(), "[[Ljava/util/Map;");
    assert_eq!(signature.array_dimensions(), 2);
}

#[test]
fn type_parameter_with_class_bound() {
    let param = TypeParameter::parse("T:Ljava/lang/Object;").unwrap();
    assert_eq!(param.name(), "T");
    assert_eq!(
        param.class_bound().map(TypeSignature::as_str),
        Some("Ljava/lang/Object;")
    );
    assert!(param.interface_bounds().is_empty());
}

#[test]
fn invariant_rejections() {
    assert!(matches!(
        TypeArgument::of(TypeSignature::INT, Variance::Invariant),
        Err(SignatureError::InvalidArgument(_))
    ));
    assert!(matches!(
        MethodSignature::builder().add_value_param(TypeSignature::VOID),
        Err(SignatureError::InvalidArgument(_))
    ));
    assert_eq!(
        TypeParameter::builder("T").unwrap().build().unwrap_err(),
        SignatureError::Builder(BuilderStateError::MissingRequired("bound"))
    );
}

#[test]
fn builders_are_single_use() {
    let already = SignatureError::Builder(BuilderStateError::AlreadyBuilt);
    let object = TypeSignature::class_of("java/lang/Object").unwrap();

    let mut class_type = ClassTypeBuilder::new("a/B").unwrap();
    assert!(class_type.is_open());
    class_type.build().unwrap();
    assert!(!class_type.is_open());
    assert_eq!(class_type.add_wildcard().unwrap_err(), already);

    let mut class = ClassSignature::builder();
    class.super_class(object.clone()).unwrap();
    assert!(class.is_open());
    class.build().unwrap();
    assert!(!class.is_open());
    assert_eq!(class.add_interface(object.clone()).unwrap_err(), already);
    assert_eq!(class.build().unwrap_err(), already);

    let mut method = MethodSignature::builder();
    method.returns(TypeSignature::VOID).unwrap();
    assert!(method.is_open());
    method.build().unwrap();
    assert!(!method.is_open());
    assert_eq!(method.add_throws(object.clone()).unwrap_err(), already);
    assert_eq!(method.build().unwrap_err(), already);

    let mut param = TypeParameter::builder("T").unwrap();
    param.class_bound(object).unwrap();
    assert!(param.is_open());
    param.build().unwrap();
    assert!(!param.is_open());
    assert_eq!(param.build().unwrap_err(), already);
}

#[test]
fn malformed_inputs_are_reported_with_offsets() {
    let cases: &[(&str, usize)] = &[
        ("", 0),
        ("Q", 0),
        ("Ljava/lang/String", 17),
        ("Ljava//lang/String;", 6),
        ("Ljava/lang/String;X", 18),
        ("TT", 2),
        ("La/B<>;", 4),
    ];
    for (text, offset) in cases {
        let err = TypeSignature::parse(text).unwrap_err();
        assert!(err.is_malformed(), "{:?}: {}", text, err);
        assert_eq!(err.offset(), Some(*offset), "{:?}: {}", text, err);
    }
}

#[test]
fn class_signature_rejects_non_class_super_types() {
    for text in ["TT;", "I", "[Ljava/lang/Object;", "Ljava/lang/Object;TT;"] {
        let err = ClassSignature::parse(text).unwrap_err();
        assert!(err.is_malformed(), "{:?}: {}", text, err);
    }
}

#[test]
fn rebuild_with_renamed_classes() {
    let original =
        TypeSignature::parse("Lcom/example/Box<Lcom/example/Item;>.Lid<*>;").unwrap();
    let rename = |name: &str| name.replacen("com/example/", "shaded/", 1);

    let elements = original.class_elements().unwrap();
    let mut builder = ClassTypeBuilder::new(&rename(elements[0].name())).unwrap();
    for (index, element) in elements.iter().enumerate() {
        if index > 0 {
            builder.inner_class(element.name()).unwrap();
        }
        for argument in element.type_arguments() {
            match argument.signature() {
                None => builder.add_wildcard().unwrap(),
                Some(signature) => {
                    let renamed =
                        TypeSignature::class_of(&rename(signature.root_class_name().unwrap()))
                            .unwrap();
                    builder
                        .add_type_argument_with(renamed, argument.variance())
                        .unwrap()
                }
            };
        }
    }
    let rebuilt = builder.build().unwrap();
    assert_eq!(rebuilt.as_str(), "Lshaded/Box<Lshaded/Item;>.Lid<*>;");
}

#[test]
fn class_names_cover_every_position() {
    let signature = MethodSignature::parse(
        "<T:Lp/Bound;>(Lp/Arg<Lp/Nested;>;[Lp/Array;TT;)Lp/Ret;^Lp/Ex;",
    )
    .unwrap();
    assert_eq!(
        signature.class_names(),
        vec!["p/Bound", "p/Arg", "p/Nested", "p/Array", "p/Ret", "p/Ex"]
    );
}
