//! Wrapper source emission
//!
//! Every fragment of the generated class comes from a template below. The
//! emitter never widens a capability: an accessor the source does not
//! support is emitted as a restricted bodiless declaration, and an indexed
//! accessor without a getter or setter gets `null` for that closure.

use std::fmt;

use crate::config::GeneratorOptions;
use crate::descriptor::{MethodDescriptor, PropertyDescriptor, TypeDescriptor};
use crate::generator::classify::classify;
use crate::generator::template::{format, TemplateContext, TemplateError};

const WRAPPER: &str = "namespace {namespace} {
    class {wrapper} {
        private readonly source: {target};

        constructor(source: {target}) { this.source = source; }

        public toString(): string { return this.source.toString(); }

        public {source_accessor}: {target} { get { return this.source; } private set; }
{members}    }
}
";

const PROPERTY: &str = "
        {visibility} {name}: {type} {
            {getter}
            {setter}
        }
";

const GETTER: &str = "get { return this.source.{name}; }";
const SETTER: &str = "set { this.source.{name} = value; }";
const RESTRICTED_GETTER: &str = "private get;";
const RESTRICTED_SETTER: &str = "private set;";

const INDEXED_PROPERTY: &str = "
        {visibility} {name}: IndexedAccessor<{key}, {type}> {
            get { return new IndexedAccessor<{key}, {type}>({getter}, {setter}); }
            private set;
        }
";

const INDEX_GETTER: &str = "(index) => this.source.{accessor}(index)";
const INDEX_SETTER: &str = "(index, value) => this.source.{accessor}(index, value)";
const NO_CLOSURE: &str = "null";

const METHOD: &str = "
        public {name}({params}): {returns} { {ret}this.source.{name}({args}); }
";

/// Generated wrapper source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    wrapper_name: String,
    text: String,
}

impl GeneratedSource {
    /// Name of the generated wrapper class.
    pub fn wrapper_name(&self) -> &str {
        &self.wrapper_name
    }

    /// The source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for GeneratedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Assembles the wrapper class for one type.
#[derive(Debug, Clone, Copy)]
pub struct SourceEmitter<'a> {
    options: &'a GeneratorOptions,
}

impl<'a> SourceEmitter<'a> {
    pub fn new(options: &'a GeneratorOptions) -> Self {
        Self { options }
    }

    /// Emit the wrapper for `ty`.
    pub fn emit(&self, ty: &TypeDescriptor) -> Result<GeneratedSource, TemplateError> {
        let members = classify(ty);
        let mut fragments = String::new();

        for property in &members.simple {
            fragments.push_str(&self.property(property)?);
        }
        for property in &members.indexed {
            fragments.push_str(&self.indexed_property(property)?);
        }
        for method in &members.methods {
            fragments.push_str(&self.method(method)?);
        }

        let wrapper_name = self.options.wrapper_name(&ty.name);
        let context = TemplateContext::new()
            .with("namespace", &self.options.namespace)
            .with("wrapper", &wrapper_name)
            .with("target", &ty.name)
            .with("source_accessor", &self.options.source_accessor)
            .with("members", fragments);
        let text = format(WRAPPER, &context)?;

        log::debug!(
            "emitted {} ({} simple, {} indexed, {} methods, {} bytes)",
            wrapper_name,
            members.simple.len(),
            members.indexed.len(),
            members.methods.len(),
            text.len()
        );
        Ok(GeneratedSource { wrapper_name, text })
    }

    fn property(&self, property: &PropertyDescriptor) -> Result<String, TemplateError> {
        let name = TemplateContext::new().with("name", &property.name);
        let getter = if property.readable {
            format(GETTER, &name)?
        } else {
            RESTRICTED_GETTER.to_string()
        };
        let setter = if property.writable {
            format(SETTER, &name)?
        } else {
            RESTRICTED_SETTER.to_string()
        };

        let context = name
            .with("visibility", visibility(property))
            .with("type", &property.ty)
            .with("getter", getter)
            .with("setter", setter);
        format(PROPERTY, &context)
    }

    fn indexed_property(&self, property: &PropertyDescriptor) -> Result<String, TemplateError> {
        let closure = |template: &str, accessor: Option<String>| match accessor {
            Some(accessor) => format(template, &TemplateContext::new().with("accessor", accessor)),
            None => Ok(NO_CLOSURE.to_string()),
        };
        let getter = closure(INDEX_GETTER, property.getter_name())?;
        let setter = closure(INDEX_SETTER, property.setter_name())?;

        let mut context = TemplateContext::new()
            .with("visibility", visibility(property))
            .with("name", &property.name)
            .with("type", &property.ty)
            .with("getter", getter)
            .with("setter", setter);
        // Shape validation guarantees exactly one index parameter.
        match property.index.first() {
            Some(key) => context.insert("key", key),
            None => context.insert_absent("key"),
        }
        format(INDEXED_PROPERTY, &context)
    }

    fn method(&self, method: &MethodDescriptor) -> Result<String, TemplateError> {
        let params = method
            .params
            .iter()
            .map(|p| format!("{}{}: {}", out_prefix(p.is_out()), p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ");
        let args = method
            .params
            .iter()
            .map(|p| format!("{}{}", out_prefix(p.is_out()), p.name))
            .collect::<Vec<_>>()
            .join(", ");

        let context = TemplateContext::new()
            .with("name", &method.name)
            .with("params", params)
            .with("returns", &method.returns)
            .with("ret", if method.has_return_value() { "return " } else { "" })
            .with("args", args);
        format(METHOD, &context)
    }
}

fn visibility(property: &PropertyDescriptor) -> &'static str {
    if property.readable || property.writable {
        "public"
    } else {
        "private"
    }
}

fn out_prefix(out: bool) -> &'static str {
    if out {
        "out "
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeRef;

    fn emit(ty: &TypeDescriptor) -> String {
        SourceEmitter::new(&GeneratorOptions::default())
            .emit(ty)
            .unwrap()
            .into_text()
    }

    #[test]
    fn test_outer_template() {
        let source = SourceEmitter::new(&GeneratorOptions::default())
            .emit(&TypeDescriptor::new("Mock"))
            .unwrap();
        assert_eq!(source.wrapper_name(), "MockWrapper");
        let text = source.text();
        assert!(text.starts_with("namespace Stubs {\n    class MockWrapper {"));
        assert!(text.contains("private readonly source: Mock;"));
        assert!(text.contains("constructor(source: Mock) { this.source = source; }"));
        assert!(text.contains("public toString(): string { return this.source.toString(); }"));
        assert!(text.contains("public __Source: Mock { get { return this.source; } private set; }"));
    }

    #[test]
    fn test_simple_property_capabilities() {
        let ty = TypeDescriptor::new("Mock")
            .with_property(PropertyDescriptor::new("Name", TypeRef::String).read_write())
            .with_property(PropertyDescriptor::new("Size", TypeRef::Int).readable())
            .with_property(PropertyDescriptor::new("Sink", TypeRef::Int).writable())
            .with_property(PropertyDescriptor::new("Hidden", TypeRef::Int));
        let text = emit(&ty);

        assert!(text.contains(
            "public Name: string {
            get { return this.source.Name; }
            set { this.source.Name = value; }
        }"
        ));
        assert!(text.contains(
            "public Size: int {
            get { return this.source.Size; }
            private set;
        }"
        ));
        assert!(text.contains(
            "public Sink: int {
            private get;
            set { this.source.Sink = value; }
        }"
        ));
        assert!(text.contains(
            "private Hidden: int {
            private get;
            private set;
        }"
        ));
    }

    #[test]
    fn test_indexed_property() {
        let ty = TypeDescriptor::new("Mock")
            .with_property(
                PropertyDescriptor::new("Item", TypeRef::Double)
                    .read_write()
                    .indexed_by(TypeRef::Int),
            )
            .with_property(
                PropertyDescriptor::new("Label", TypeRef::String)
                    .readable()
                    .indexed_by(TypeRef::Int),
            );
        let text = emit(&ty);

        assert!(text.contains("public Item: IndexedAccessor<int, double> {"));
        assert!(text.contains(
            "get { return new IndexedAccessor<int, double>((index) => this.source.get_Item(index), (index, value) => this.source.set_Item(index, value)); }"
        ));
        assert!(text.contains(
            "get { return new IndexedAccessor<int, string>((index) => this.source.get_Label(index), null); }"
        ));
        assert!(!text.contains("public get_Item("));
    }

    #[test]
    fn test_methods_preserve_out_parameters() {
        let ty = TypeDescriptor::new("Mock")
            .with_method(MethodDescriptor::new("Reset"))
            .with_method(
                MethodDescriptor::new("TryGet")
                    .param("key", TypeRef::String)
                    .out_param("found", TypeRef::Double)
                    .returns(TypeRef::Bool),
            );
        let text = emit(&ty);

        assert!(text.contains("public Reset(): void { this.source.Reset(); }"));
        assert!(text.contains(
            "public TryGet(key: string, out found: double): bool { return this.source.TryGet(key, out found); }"
        ));
    }

    #[test]
    fn test_options_are_applied() {
        let options = GeneratorOptions {
            namespace: "Bindings".to_string(),
            wrapper_suffix: "Stub".to_string(),
            source_accessor: "Inner".to_string(),
        };
        let source = SourceEmitter::new(&options)
            .emit(&TypeDescriptor::new("Core"))
            .unwrap();
        assert_eq!(source.wrapper_name(), "CoreStub");
        assert!(source.text().starts_with("namespace Bindings {"));
        assert!(source.text().contains("public Inner: Core {"));
    }

    #[test]
    fn test_emission_is_deterministic() {
        let ty = TypeDescriptor::new("Mock")
            .with_property(PropertyDescriptor::new("Name", TypeRef::String).read_write())
            .with_method(MethodDescriptor::new("Reset"));
        assert_eq!(emit(&ty), emit(&ty));
    }
}
