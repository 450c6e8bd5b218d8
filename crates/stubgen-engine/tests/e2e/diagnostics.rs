//! Failures before a wrapper exists: shapes, templates, compilation.

use stubgen_engine::compiler::checker::codes;
use stubgen_engine::{
    format, Backend, Compiler, Error, PropertyDescriptor, References, ShapeError, StubGenerator,
    TemplateContext, TemplateError, TypeDescriptor, TypeRef,
};

use super::harness::*;

#[test]
fn test_multi_index_property_is_rejected() {
    let ty = TypeDescriptor::new("Grid").with_property(
        PropertyDescriptor::new("Cell", TypeRef::Double)
            .read_write()
            .indexed_by(TypeRef::Int)
            .indexed_by(TypeRef::Int),
    );
    let err = StubGenerator::new(ty).generate().unwrap_err();
    match err {
        Error::Shape(ShapeError::MultiIndex { property, count }) => {
            assert_eq!(property, "Cell");
            assert_eq!(count, 2);
        }
        other => panic!("expected a shape error, got {}", other),
    }
}

#[test]
fn test_misspelled_template_key_is_named() {
    let ctx = TemplateContext::new().with("name", "Count");
    let err = format("public {nmae}: int { get { return this.source.{name}; } }", &ctx).unwrap_err();
    assert_eq!(
        err,
        TemplateError::MissingValues {
            keys: vec!["nmae".to_string()]
        }
    );
    assert!(err.to_string().contains("{nmae}"));
}

#[test]
fn test_every_error_is_reported_once() {
    let source = "namespace Stubs {
    class MockWrapper {
        private readonly source: Mock;
        constructor(source: Mock) { this.source = source; }
        public Size: int { get { return this.source.Size; } set { this.source.Size = value; } }
        public Name: Missing { get { return this.source.Name; } private set; }
        public Reset(): void { this.source.Reset(1); }
    }
}";
    let err = Compiler::new()
        .build(source, &References::for_target(&mock_descriptor()))
        .unwrap_err();

    let found: Vec<_> = err.diagnostics().iter().filter_map(|d| d.code()).collect();
    assert_eq!(
        found,
        vec![codes::NOT_WRITABLE, codes::UNKNOWN_TYPE, codes::ARGUMENT_COUNT]
    );

    let report = err.to_string();
    assert_eq!(report.lines().count(), 4);
    assert!(report.lines().nth(1).unwrap().starts_with("5:"));
    assert!(report.lines().nth(2).unwrap().starts_with("6:"));
    assert!(report.lines().nth(3).unwrap().starts_with("7:"));
}

#[test]
fn test_parse_errors_share_the_channel() {
    let err = Compiler::new()
        .build(
            "class W {\n  x: ;\n  y(): int { return 1; }\n  z(: int;\n}",
            &References::for_target(&mock_descriptor()),
        )
        .unwrap_err();
    let lines: Vec<u32> = err.diagnostics().iter().map(|d| d.span().line).collect();
    assert_eq!(lines, vec![2, 4]);
}

#[test]
fn test_rendered_report_names_the_file() {
    let source = "class W { constructor(source: Mock) { } public A(): int { return nope; } }";
    let err = Compiler::new()
        .build(source, &References::for_target(&mock_descriptor()))
        .unwrap_err();

    let mut buffer = termcolor::Buffer::no_color();
    err.emit(&mut buffer, "wrapper.stub").unwrap();
    let rendered = String::from_utf8(buffer.into_inner()).unwrap();
    assert!(rendered.contains("error[E0004]"));
    assert!(rendered.contains("wrapper.stub"));
}

#[test]
fn test_generated_source_is_stable_but_names_are_not() {
    let generator = StubGenerator::new(mock_descriptor());
    let first = generator.compile().unwrap();
    let second = generator.compile().unwrap();
    assert_eq!(first.source(), second.source());
    assert_ne!(first.name(), second.name());
}
