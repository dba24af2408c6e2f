//! Mapping lookups resolved against call-site values, through the public API.

use relocator_reflect::internal::{ClassRepr, Representation, StringRepr};
use relocator_reflect::{
    CallSiteValues, ClassRef, ConstantValue, MethodReference, MethodTypeRef, ParamSlot,
    ReflectError, ReflectionMappings, ResolvedMethod, ResolvedTarget, StringRef,
};

fn class_for_name() -> MethodReference {
    MethodReference::new("java/lang/Class", "forName", "(Ljava/lang/String;)Ljava/lang/Class;")
        .unwrap()
}

#[test]
fn class_for_name_with_constant_argument() {
    let mappings = ReflectionMappings::with_defaults().unwrap();
    let mapping = mappings.method(&class_for_name()).unwrap();

    let values = CallSiteValues::new(vec![Some(ConstantValue::String(
        "com.example.Plugin".to_string(),
    ))]);
    assert_eq!(
        mapping.resolve(&values),
        Some(ResolvedTarget::Class("Lcom/example/Plugin;".to_string()))
    );
    assert_eq!(mapping.resolve(&CallSiteValues::new(vec![None])), None);
}

#[test]
fn get_constructor_resolves_init() {
    let mappings = ReflectionMappings::with_defaults().unwrap();
    let get_constructor = MethodReference::new(
        "java/lang/Class",
        "getConstructor",
        "([Ljava/lang/Class;)Ljava/lang/reflect/Constructor;",
    )
    .unwrap();
    let values = CallSiteValues::new(vec![Some(ConstantValue::Array(vec![
        ConstantValue::Class("Ljava/lang/String;".to_string()),
    ]))])
    .with_receiver(ConstantValue::Class("Lcom/example/Plugin;".to_string()));

    let target = mappings.method(&get_constructor).unwrap().resolve(&values);
    assert_eq!(
        target,
        Some(ResolvedTarget::Method(ResolvedMethod::Partial {
            owner: "com/example/Plugin".to_string(),
            name: "<init>".to_string(),
            parameters: "(Ljava/lang/String;)".to_string(),
        }))
    );
    assert_eq!(
        target.map(|t| t.to_string()).as_deref(),
        Some("method com/example/Plugin.<init>(Ljava/lang/String;)")
    );
}

#[test]
fn custom_mapping_with_joined_name() {
    let mut mappings = ReflectionMappings::new();
    let lookup = MethodReference::new(
        "com/example/Registry",
        "implementation",
        "(Ljava/lang/String;)Ljava/lang/Class;",
    )
    .unwrap();
    let name = StringRef::joined([
        StringRef::constant("com.example.impl."),
        StringRef::param(0).unwrap(),
    ]);
    mappings
        .add_method_class(lookup.clone(), ClassRef::named(name))
        .unwrap();

    let values = CallSiteValues::new(vec![Some(ConstantValue::String("Fast".to_string()))]);
    assert_eq!(
        mappings.method(&lookup).unwrap().resolve(&values),
        Some(ResolvedTarget::Class("Lcom/example/impl/Fast;".to_string()))
    );
}

#[test]
fn receiver_sentinel_and_slots() {
    assert_eq!(ClassRef::param(-1).unwrap(), ClassRef::RECEIVER);
    assert_eq!(ClassRef::slot(ParamSlot::Receiver), ClassRef::RECEIVER);
    assert_eq!(MethodTypeRef::param(-1).unwrap(), MethodTypeRef::RECEIVER);
    assert_eq!(
        StringRef::param(70_000).unwrap_err(),
        ReflectError::IndexOutOfRange(70_000)
    );
}

#[test]
fn representation_can_be_walked() {
    let class = ClassRef::named(StringRef::param(2).unwrap());
    match class.repr() {
        ClassRepr::Named(name) => {
            assert_eq!(name.repr(), &StringRepr::Param(ParamSlot::Index(2)));
        }
        other => panic!("unexpected representation: {:?}", other),
    }
}
