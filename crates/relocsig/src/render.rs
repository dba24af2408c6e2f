//! Output for the `relocsig` subcommands, as plain text or JSON.

use relocator_reflect::internal::{ClassRepr, MethodTypeRepr, Representation, StringRepr};
use relocator_reflect::{ClassRef, MemberRef, MethodTypeRef, ReflectionMappings, StringRef};
use relocator_signature::{
    ClassSignature, Kind, MethodSignature, PrimitiveType, TypeArgument, TypeParameter, TypeSignature,
    Variance,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::OutputFormat;
use crate::signature::ParsedSignature;

// === Structure views ===

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeView {
    Primitive {
        descriptor: &'static str,
        keyword: &'static str,
    },
    TypeVariable {
        name: String,
    },
    Array {
        dimensions: usize,
        element: Box<TypeView>,
    },
    Class {
        elements: Vec<ClassElementView>,
    },
}

#[derive(Debug, Serialize)]
pub struct ClassElementView {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentView>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "variance", rename_all = "snake_case")]
pub enum ArgumentView {
    Wildcard,
    Covariant { bound: TypeView },
    Contravariant { bound: TypeView },
    Invariant { bound: TypeView },
}

#[derive(Debug, Serialize)]
pub struct TypeParameterView {
    pub name: String,
    pub class_bound: Option<TypeView>,
    pub interface_bounds: Vec<TypeView>,
}

#[derive(Debug, Serialize)]
pub struct ClassSignatureView {
    pub type_parameters: Vec<TypeParameterView>,
    pub super_class: TypeView,
    pub super_interfaces: Vec<TypeView>,
}

#[derive(Debug, Serialize)]
pub struct MethodSignatureView {
    pub type_parameters: Vec<TypeParameterView>,
    pub parameters: Vec<TypeView>,
    pub returns: TypeView,
    pub throws: Vec<TypeView>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StructureView {
    Type(TypeView),
    Class(ClassSignatureView),
    Method(MethodSignatureView),
    Param(TypeParameterView),
}

#[derive(Debug, Serialize)]
pub struct ParseOutput<'a> {
    pub kind: &'static str,
    pub signature: String,
    pub java: String,
    pub classes: Vec<&'a str>,
    pub structure: StructureView,
}

impl TypeView {
    pub fn of(sig: &TypeSignature) -> Self {
        match sig.kind() {
            Kind::Primitive => {
                let primitive = sig.as_primitive().unwrap_or(PrimitiveType::Void);
                TypeView::Primitive {
                    descriptor: primitive.descriptor(),
                    keyword: primitive.keyword(),
                }
            }
            Kind::Array => TypeView::Array {
                dimensions: sig.array_dimensions(),
                element: Box::new(TypeView::of(&sig.element_type())),
            },
            Kind::TypeVariable => TypeView::TypeVariable {
                name: sig.type_variable_name().unwrap_or_default().to_string(),
            },
            Kind::Class => TypeView::Class {
                elements: sig
                    .class_elements()
                    .unwrap_or_default()
                    .iter()
                    .map(|element| ClassElementView {
                        name: element.name().to_string(),
                        arguments: element.type_arguments().iter().map(ArgumentView::of).collect(),
                    })
                    .collect(),
            },
        }
    }
}

impl ArgumentView {
    fn of(argument: &TypeArgument) -> Self {
        let Some(bound) = argument.signature() else {
            return ArgumentView::Wildcard;
        };
        let bound = TypeView::of(bound);
        match argument.variance() {
            Variance::Covariant => ArgumentView::Covariant { bound },
            Variance::Contravariant => ArgumentView::Contravariant { bound },
            Variance::Invariant => ArgumentView::Invariant { bound },
        }
    }
}

impl TypeParameterView {
    fn of(param: &TypeParameter) -> Self {
        Self {
            name: param.name().to_string(),
            class_bound: param.class_bound().map(TypeView::of),
            interface_bounds: param.interface_bounds().iter().map(TypeView::of).collect(),
        }
    }
}

impl StructureView {
    pub fn of(parsed: &ParsedSignature) -> Self {
        match parsed {
            ParsedSignature::Type(sig) => StructureView::Type(TypeView::of(sig)),
            ParsedSignature::Class(sig) => StructureView::Class(ClassSignatureView {
                type_parameters: sig.type_parameters().iter().map(TypeParameterView::of).collect(),
                super_class: TypeView::of(sig.super_class()),
                super_interfaces: sig.super_interfaces().iter().map(TypeView::of).collect(),
            }),
            ParsedSignature::Method(sig) => StructureView::Method(MethodSignatureView {
                type_parameters: sig.type_parameters().iter().map(TypeParameterView::of).collect(),
                parameters: sig.value_parameters().iter().map(TypeView::of).collect(),
                returns: TypeView::of(sig.returns()),
                throws: sig.throws_types().iter().map(TypeView::of).collect(),
            }),
            ParsedSignature::Param(param) => StructureView::Param(TypeParameterView::of(param)),
        }
    }
}

// === Java source rendering ===

pub fn java_type(sig: &TypeSignature) -> String {
    match sig.kind() {
        Kind::Primitive => sig.as_primitive().map(|p| p.keyword()).unwrap_or_default().to_string(),
        Kind::TypeVariable => sig.type_variable_name().unwrap_or_default().to_string(),
        Kind::Array => {
            let mut out = java_type(&sig.element_type());
            for _ in 0..sig.array_dimensions() {
                out.push_str("[]");
            }
            out
        }
        Kind::Class => {
            let mut out = String::new();
            for (index, element) in sig.class_elements().unwrap_or_default().iter().enumerate() {
                if index == 0 {
                    out.push_str(&element.name().replace('/', "."));
                } else {
                    out.push('.');
                    out.push_str(element.name());
                }
                let arguments = element.type_arguments();
                if !arguments.is_empty() {
                    let rendered: Vec<String> = arguments.iter().map(java_argument).collect();
                    out.push('<');
                    out.push_str(&rendered.join(", "));
                    out.push('>');
                }
            }
            out
        }
    }
}

fn java_argument(argument: &TypeArgument) -> String {
    match argument.signature() {
        None => "?".to_string(),
        Some(bound) => match argument.variance() {
            Variance::Covariant => format!("? extends {}", java_type(bound)),
            Variance::Contravariant => format!("? super {}", java_type(bound)),
            Variance::Invariant => java_type(bound),
        },
    }
}

pub fn java_type_parameter(param: &TypeParameter) -> String {
    let bounds: Vec<String> = param.bounds().map(java_type).collect();
    format!("{} extends {}", param.name(), bounds.join(" & "))
}

fn java_type_parameters(params: &[TypeParameter]) -> Option<String> {
    if params.is_empty() {
        return None;
    }
    let rendered: Vec<String> = params.iter().map(java_type_parameter).collect();
    Some(format!("<{}>", rendered.join(", ")))
}

fn java_list(types: &[TypeSignature]) -> String {
    types.iter().map(java_type).collect::<Vec<_>>().join(", ")
}

pub fn java_class_signature(sig: &ClassSignature) -> String {
    let mut parts = Vec::new();
    parts.extend(java_type_parameters(sig.type_parameters()));
    parts.push(format!("extends {}", java_type(sig.super_class())));
    if !sig.super_interfaces().is_empty() {
        parts.push(format!("implements {}", java_list(sig.super_interfaces())));
    }
    parts.join(" ")
}

pub fn java_method_signature(sig: &MethodSignature) -> String {
    let mut parts = Vec::new();
    parts.extend(java_type_parameters(sig.type_parameters()));
    parts.push(java_type(sig.returns()));
    parts.push(format!("({})", java_list(sig.value_parameters())));
    if !sig.throws_types().is_empty() {
        parts.push(format!("throws {}", java_list(sig.throws_types())));
    }
    parts.join(" ")
}

pub fn java(parsed: &ParsedSignature) -> String {
    match parsed {
        ParsedSignature::Type(sig) => java_type(sig),
        ParsedSignature::Class(sig) => java_class_signature(sig),
        ParsedSignature::Method(sig) => java_method_signature(sig),
        ParsedSignature::Param(param) => java_type_parameter(param),
    }
}

// === Subcommand output ===

pub fn parse_output(parsed: &ParsedSignature, format: OutputFormat) -> serde_json::Result<String> {
    let output = ParseOutput {
        kind: parsed.kind().label(),
        signature: parsed.to_string(),
        java: java(parsed),
        classes: parsed.class_names(),
        structure: StructureView::of(parsed),
    };
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&output),
        OutputFormat::Text => {
            let mut lines = vec![
                format!("kind:      {}", output.kind),
                format!("signature: {}", output.signature),
                format!("java:      {}", output.java),
            ];
            if !output.classes.is_empty() {
                lines.push(format!("classes:   {}", output.classes.join(", ")));
            }
            Ok(lines.join("\n"))
        }
    }
}

pub fn classes_output(parsed: &ParsedSignature, format: OutputFormat) -> serde_json::Result<String> {
    let classes = parsed.class_names();
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&classes),
        OutputFormat::Text => Ok(classes.join("\n")),
    }
}

pub fn rename_output(
    original: &ParsedSignature,
    renamed: &ParsedSignature,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "original": original.to_string(),
            "renamed": renamed.to_string(),
            "changed": original != renamed,
        })),
        OutputFormat::Text => Ok(renamed.to_string()),
    }
}

pub fn reflection_output(mappings: &ReflectionMappings, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => {
            let methods: Vec<Value> = mappings
                .methods()
                .into_iter()
                .map(|(reference, member)| {
                    json!({
                        "owner": reference.owner(),
                        "name": reference.name(),
                        "descriptor": reference.descriptor().as_str(),
                        "produces": member_json(member),
                    })
                })
                .collect();
            let fields: Vec<Value> = mappings
                .fields()
                .into_iter()
                .map(|(reference, member)| {
                    json!({
                        "owner": reference.owner(),
                        "name": reference.name(),
                        "descriptor": reference.descriptor(),
                        "produces": member_json(member),
                    })
                })
                .collect();
            serde_json::to_string_pretty(&json!({ "methods": methods, "fields": fields }))
        }
        OutputFormat::Text => {
            let methods = mappings
                .methods()
                .into_iter()
                .map(|(reference, member)| format!("{} -> {}", reference, member));
            let fields = mappings
                .fields()
                .into_iter()
                .map(|(reference, member)| format!("{} -> {}", reference, member));
            Ok(methods.chain(fields).collect::<Vec<_>>().join("\n"))
        }
    }
}

// === Reflection reference trees ===

fn string_json(string: &StringRef) -> Value {
    match string.repr() {
        StringRepr::Param(slot) => json!({ "param": slot.to_string() }),
        StringRepr::Constant(text) => json!({ "constant": text }),
        StringRepr::Joined(parts) => {
            json!({ "joined": parts.iter().map(string_json).collect::<Vec<_>>() })
        }
    }
}

fn class_json(class: &ClassRef) -> Value {
    match class.repr() {
        ClassRepr::Named(name) => json!({ "named": string_json(name) }),
        ClassRepr::Descriptor(descriptor) => json!({ "descriptor": string_json(descriptor) }),
        ClassRepr::Param(slot) => json!({ "instance": slot.to_string() }),
    }
}

fn method_type_json(method_type: &MethodTypeRef) -> Value {
    match method_type.repr() {
        MethodTypeRepr::PartialDescriptor(text) => json!({ "partial_descriptor": string_json(text) }),
        MethodTypeRepr::FullDescriptor(text) => json!({ "full_descriptor": string_json(text) }),
        MethodTypeRepr::ParameterTypes(slot) => json!({ "parameter_types": slot.to_string() }),
        MethodTypeRepr::ParameterAndReturnTypes(slot, returns) => json!({
            "parameter_types": slot.to_string(),
            "return_type": class_json(returns),
        }),
        MethodTypeRepr::Param(slot) => json!({ "instance": slot.to_string() }),
    }
}

fn member_json(member: &MemberRef) -> Value {
    match member {
        MemberRef::Class(class) => json!({ "class": class_json(class) }),
        MemberRef::Field(field) => json!({
            "field": {
                "owner": class_json(&field.owner),
                "name": string_json(&field.name),
                "type": field.field_type.as_ref().map(class_json),
            }
        }),
        MemberRef::Method(method) => json!({
            "method": {
                "owner": class_json(&method.owner),
                "name": string_json(&method.name),
                "type": method.method_type.as_ref().map(method_type_json),
            }
        }),
    }
}
