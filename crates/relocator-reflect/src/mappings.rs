//! Which member calls produce reflective class, field or method objects,
//! and how to compute their targets from the call's arguments.

use std::collections::HashMap;

use crate::class_ref::ClassRef;
use crate::descriptors::ParameterDescriptors;
use crate::error::{ReflectError, Result};
use crate::member::{FieldRef, MemberRef, MethodRef};
use crate::method_type_ref::MethodTypeRef;
use crate::reference::{FieldReference, MethodReference};
use crate::string_ref::StringRef;

/// Static types a `Class` instance can be returned as.
const CLASS_TYPES: &[&str] = &[
    "Ljava/lang/Class;",
    "Ljava/lang/Object;",
    "Ljava/io/Serializable;",
    "Ljava/lang/constant/Constable;",
    "Ljava/lang/invoke/TypeDescriptor;",
    "Ljava/lang/invoke/TypeDescriptor$OfField;",
    "Ljava/lang/reflect/AnnotatedElement;",
    "Ljava/lang/reflect/GenericDeclaration;",
    "Ljava/lang/reflect/Type;",
];

/// Static types a `Field` instance can be returned as.
const FIELD_TYPES: &[&str] = &[
    "Ljava/lang/reflect/Field;",
    "Ljava/lang/reflect/AccessibleObject;",
    "Ljava/lang/Object;",
    "Ljava/lang/reflect/AnnotatedElement;",
    "Ljava/lang/reflect/Member;",
];

/// Static types a `Method` or `Constructor` instance can be returned as.
const METHOD_TYPES: &[&str] = &[
    "Ljava/lang/reflect/Method;",
    "Ljava/lang/reflect/Constructor;",
    "Ljava/lang/reflect/Executable;",
    "Ljava/lang/reflect/AccessibleObject;",
    "Ljava/lang/Object;",
    "Ljava/lang/reflect/AnnotatedElement;",
    "Ljava/lang/reflect/GenericDeclaration;",
    "Ljava/lang/reflect/Member;",
];

#[derive(Debug, Clone, Copy)]
enum Produces {
    Class,
    Field,
    Method,
}

impl Produces {
    fn allowed(self) -> &'static [&'static str] {
        match self {
            Produces::Class => CLASS_TYPES,
            Produces::Field => FIELD_TYPES,
            Produces::Method => METHOD_TYPES,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Produces::Class => "class",
            Produces::Field => "field",
            Produces::Method => "method",
        }
    }

    fn check(self, reference: &dyn std::fmt::Display, result_type: &str) -> Result<()> {
        if self.allowed().contains(&result_type) {
            return Ok(());
        }
        tracing::debug!(%reference, result_type, expected = self.name(), "rejected reflection mapping");
        Err(ReflectError::NotA {
            reference: reference.to_string(),
            expected: self.name(),
        })
    }
}

/// Reflection mappings keyed by the member whose call produces the
/// reflective object.
#[derive(Debug, Clone, Default)]
pub struct ReflectionMappings {
    methods: HashMap<MethodReference, MemberRef>,
    fields: HashMap<FieldReference, MemberRef>,
}

impl ReflectionMappings {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table preloaded with the JDK's class, field and method lookups.
    pub fn with_defaults() -> Result<Self> {
        let mut mappings = Self::new();
        mappings.add_defaults()?;
        Ok(mappings)
    }

    fn add_defaults(&mut self) -> Result<()> {
        const CLASS_LOADER: &str = "java/lang/ClassLoader";
        const CLASS: &str = "java/lang/Class";

        let name_param = |index| Ok::<_, ReflectError>(ClassRef::named(StringRef::param(index)?));

        self.add_method_class(
            MethodReference::new(CLASS_LOADER, "loadClass", "(Ljava/lang/String;)Ljava/lang/Class;")?,
            name_param(0)?,
        )?;
        self.add_method_class(
            MethodReference::new(CLASS_LOADER, "loadClass", "(Ljava/lang/String;Z)Ljava/lang/Class;")?,
            name_param(0)?,
        )?;
        self.add_method_class(
            MethodReference::new(
                CLASS,
                "forName",
                "(Ljava/lang/Module;Ljava/lang/String;)Ljava/lang/Class;",
            )?,
            name_param(1)?,
        )?;
        self.add_method_class(
            MethodReference::new(CLASS, "forName", "(Ljava/lang/String;)Ljava/lang/Class;")?,
            name_param(0)?,
        )?;
        self.add_method_class(
            MethodReference::new(
                CLASS,
                "forName",
                "(Ljava/lang/String;ZLjava/lang/ClassLoader;)Ljava/lang/Class;",
            )?,
            name_param(0)?,
        )?;

        self.add_method_field(
            MethodReference::new(CLASS, "getField", "(Ljava/lang/String;)Ljava/lang/reflect/Field;")?,
            ClassRef::RECEIVER,
            StringRef::param(0)?,
            None,
        )?;
        self.add_method_method(
            MethodReference::new(
                CLASS,
                "getMethod",
                "(Ljava/lang/String;[Ljava/lang/Class;)Ljava/lang/reflect/Method;",
            )?,
            ClassRef::RECEIVER,
            StringRef::param(0)?,
            Some(MethodTypeRef::parameter_types(1)?),
        )?;
        self.add_method_method(
            MethodReference::new(
                CLASS,
                "getConstructor",
                "([Ljava/lang/Class;)Ljava/lang/reflect/Constructor;",
            )?,
            ClassRef::RECEIVER,
            StringRef::constant("<init>"),
            Some(MethodTypeRef::parameter_types(0)?),
        )?;

        let wrappers = [
            ("java/lang/Void", ClassRef::VOID),
            ("java/lang/Integer", ClassRef::INT),
            ("java/lang/Long", ClassRef::LONG),
            ("java/lang/Float", ClassRef::FLOAT),
            ("java/lang/Double", ClassRef::DOUBLE),
            ("java/lang/Byte", ClassRef::BYTE),
            ("java/lang/Character", ClassRef::CHAR),
            ("java/lang/Short", ClassRef::SHORT),
            ("java/lang/Boolean", ClassRef::BOOLEAN),
        ];
        for (owner, primitive) in wrappers {
            self.add_field_class(
                FieldReference::new(owner, "TYPE", "Ljava/lang/Class;")?,
                primitive,
            )?;
        }
        Ok(())
    }

    fn insert_method(&mut self, reference: MethodReference, produces: Produces, mapping: MemberRef) -> Result<()> {
        produces.check(&reference, reference.descriptor().return_type())?;
        mapping.check_usable(&ParameterDescriptors::for_method(&reference))?;
        tracing::debug!(%reference, %mapping, "registered reflection mapping");
        self.methods.insert(reference, mapping);
        Ok(())
    }

    fn insert_field(&mut self, reference: FieldReference, produces: Produces, mapping: MemberRef) -> Result<()> {
        produces.check(&reference, reference.descriptor())?;
        mapping.check_usable(&ParameterDescriptors::for_field(&reference))?;
        tracing::debug!(%reference, %mapping, "registered reflection mapping");
        self.fields.insert(reference, mapping);
        Ok(())
    }

    /// Calls to `reference` return the class described by `class`.
    pub fn add_method_class(&mut self, reference: MethodReference, class: ClassRef) -> Result<()> {
        self.insert_method(reference, Produces::Class, MemberRef::Class(class))
    }

    /// Calls to `reference` return the field `owner.name`.
    pub fn add_method_field(
        &mut self,
        reference: MethodReference,
        owner: ClassRef,
        name: StringRef,
        field_type: Option<ClassRef>,
    ) -> Result<()> {
        let field = FieldRef::new(owner, name, field_type);
        self.insert_method(reference, Produces::Field, MemberRef::Field(field))
    }

    /// Calls to `reference` return the method or constructor `owner.name`.
    pub fn add_method_method(
        &mut self,
        reference: MethodReference,
        owner: ClassRef,
        name: StringRef,
        method_type: Option<MethodTypeRef>,
    ) -> Result<()> {
        let method = MethodRef::new(owner, name, method_type);
        self.insert_method(reference, Produces::Method, MemberRef::Method(method))
    }

    pub fn add_field_class(&mut self, reference: FieldReference, class: ClassRef) -> Result<()> {
        self.insert_field(reference, Produces::Class, MemberRef::Class(class))
    }

    pub fn add_field_field(
        &mut self,
        reference: FieldReference,
        owner: ClassRef,
        name: StringRef,
        field_type: Option<ClassRef>,
    ) -> Result<()> {
        let field = FieldRef::new(owner, name, field_type);
        self.insert_field(reference, Produces::Field, MemberRef::Field(field))
    }

    pub fn add_field_method(
        &mut self,
        reference: FieldReference,
        owner: ClassRef,
        name: StringRef,
        method_type: Option<MethodTypeRef>,
    ) -> Result<()> {
        let method = MethodRef::new(owner, name, method_type);
        self.insert_field(reference, Produces::Method, MemberRef::Method(method))
    }

    pub fn method(&self, reference: &MethodReference) -> Option<&MemberRef> {
        self.methods.get(reference)
    }

    pub fn field(&self, reference: &FieldReference) -> Option<&MemberRef> {
        self.fields.get(reference)
    }

    /// Method mappings, ordered by reference for stable output.
    pub fn methods(&self) -> Vec<(&MethodReference, &MemberRef)> {
        let mut entries: Vec<_> = self.methods.iter().collect();
        entries.sort_by_key(|(reference, _)| reference.to_string());
        entries
    }

    /// Field mappings, ordered by reference for stable output.
    pub fn fields(&self) -> Vec<(&FieldReference, &MemberRef)> {
        let mut entries: Vec<_> = self.fields.iter().collect();
        entries.sort_by_key(|(reference, _)| reference.to_string());
        entries
    }

    pub fn len(&self) -> usize {
        self.methods.len() + self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
