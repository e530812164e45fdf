mod common;

use common::{logging_class, server_class, Document};
use pretty_assertions::assert_eq;
use xcl::{primitives, write_tokens, Error, Native, Record, TokenKind};

const SERVER: &str = "Server { \n  Port = 8080\n  Debug = false\n}";

#[test]
fn test_untouched_document_is_byte_identical() {
    let text = "# listeners\n\nServer {  # main\n  Port   = 8080\n\n  Debug=false\n}\n\n# end\n";
    let mut doc = Document::parse(text, &[server_class()]).unwrap();
    assert_eq!(doc.write(), text);
    assert_eq!(doc.write(), text);
}

#[test]
fn test_generate_tokens_repeated_calls_are_stable() {
    let mut doc = Document::parse(SERVER, &[server_class()]).unwrap();
    let instance = &mut doc.instances[0];
    let first: Vec<_> = instance.generate_tokens().to_vec();
    let second: Vec<_> = instance.generate_tokens().to_vec();
    assert_eq!(first, second);
    assert_eq!(write_tokens(&first), SERVER);
}

#[test]
fn test_set_debug_rewrites_section() {
    let mut doc = Document::parse(SERVER, &[server_class()]).unwrap();
    let instance = &mut doc.instances[0];
    let debug = instance.class().field("Debug").unwrap().clone();
    let value = primitives::boolean().to_value(Native::Bool(true)).unwrap();
    instance.set_value(&debug, value).unwrap();

    assert_eq!(
        write_tokens(instance.generate_tokens()),
        "Server {\n  Port = 8080\n  Debug = true\n}"
    );
}

#[test]
fn test_minimal_diff_keeps_other_lines() {
    let original = "Server {\n  Port = 8080\n  Debug = false\n}";
    let mut doc = Document::parse(original, &[server_class()]).unwrap();
    doc.instances[0].set("Port", 9090).unwrap();
    let rewritten = doc.write();

    let before: Vec<_> = original.lines().collect();
    let after: Vec<_> = rewritten.lines().collect();
    assert_eq!(before.len(), after.len());
    let changed: Vec<_> = before
        .iter()
        .zip(&after)
        .filter(|(b, a)| b != a)
        .collect();
    assert_eq!(changed, vec![(&"  Port = 8080", &"  Port = 9090")]);
}

#[test]
fn test_only_changed_section_is_rebuilt() {
    let text = "# a\nServer {\n  Port   = 1 # first\n}\n# b\nServer {\n  Port   = 2 # second\n}\n";
    let mut doc = Document::parse(text, &[server_class()]).unwrap();
    doc.instances[1].set("Port", 3).unwrap();
    assert_eq!(
        doc.write(),
        "# a\nServer {\n  Port   = 1 # first\n}\n# b\nServer {\n  Port = 3\n  Debug = false\n}\n"
    );
}

#[test]
fn test_pre_tokens_survive_rebuild() {
    let text = "# keep this comment\nServer {\n  Debug = true\n}";
    let mut doc = Document::parse(text, &[server_class()]).unwrap();
    doc.instances[0].set("Debug", false).unwrap();
    assert_eq!(
        doc.write(),
        "# keep this comment\nServer {\n  Port = 0\n  Debug = false\n}"
    );
    let pre = doc.instances[0].pre_tokens().unwrap();
    assert_eq!(pre[0].data(), "# keep this comment");
}

#[test]
fn test_update_data_after_direct_host_change() {
    let mut doc = Document::parse(SERVER, &[server_class()]).unwrap();
    let instance = &mut doc.instances[0];
    instance
        .host_as_mut::<Record>()
        .unwrap()
        .set("Port", 8081)
        .unwrap();

    // not yet visible to the regenerator
    assert_eq!(write_tokens(instance.generate_tokens()), SERVER);

    instance.update_data().unwrap();
    assert_eq!(
        write_tokens(instance.generate_tokens()),
        "Server {\n  Port = 8081\n  Debug = false\n}"
    );
}

#[test]
fn test_update_data_same_text_stays_clean() {
    let mut doc = Document::parse(SERVER, &[server_class()]).unwrap();
    let instance = &mut doc.instances[0];
    instance
        .host_as_mut::<Record>()
        .unwrap()
        .set("Port", 8080)
        .unwrap();
    instance.update_data().unwrap();
    assert!(!instance.has_dirty_fields());
    assert_eq!(write_tokens(instance.generate_tokens()), SERVER);
}

#[test]
fn test_non_canonical_literal_is_dirty_after_update() {
    let text = "Server {\n  Debug = True\n}";
    let mut doc = Document::parse(text, &[server_class()]).unwrap();
    let instance = &mut doc.instances[0];
    assert_eq!(instance.value("Debug").unwrap().as_bool(), Some(true));

    instance.update_data().unwrap();
    let dirty: Vec<_> = instance.dirty_fields().map(|f| f.name()).collect();
    assert_eq!(dirty, vec!["Debug"]);
}

#[test]
fn test_parameter_round_trip() {
    let text = "Server: \"edge \\\"one\\\"\" {\n  Port = 80\n}";
    let mut doc = Document::parse(text, &[server_class()]).unwrap();
    assert_eq!(
        doc.instances[0].parameter().unwrap().as_str(),
        Some("edge \"one\"")
    );
    assert_eq!(doc.write(), text);

    doc.instances[0].set("Port", 81).unwrap();
    assert_eq!(
        doc.write(),
        "Server: \"edge \\\"one\\\"\" {\n  Port = 81\n  Debug = false\n}"
    );
}

#[test]
fn test_typed_fields_round_trip() {
    let text = "Logging {\n  Level = Warn\n  Path = \"/var/log/app.log\"\n  Ratio = 0.25\n  Since = \"2024-01-15T10:30:00Z\"\n}";
    let mut doc = Document::parse(text, &[logging_class()]).unwrap();
    let instance = &mut doc.instances[0];
    assert_eq!(instance.value("Level").unwrap().native(), &Native::Enum(2));
    assert_eq!(instance.value("Path").unwrap().as_str(), Some("/var/log/app.log"));
    assert_eq!(instance.value("Ratio").unwrap().as_f64(), Some(0.25));

    instance.update_data().unwrap();
    assert!(!instance.has_dirty_fields());

    instance.set("Ratio", 1.0).unwrap();
    assert_eq!(
        doc.write(),
        "Logging {\n  Level = Warn\n  Path = \"/var/log/app.log\"\n  Ratio = 1.0\n  Since = \"2024-01-15T10:30:00Z\"\n}"
    );
}

#[test]
fn test_conversion_error_names_literal() {
    let err = Document::parse("Server {\n  Port = 80a\n}", &[server_class()])
        .err()
        .unwrap();
    assert!(err.is_conversion());
    assert!(err.to_string().contains("`80a`"));
}

#[test]
fn test_unknown_enum_variant() {
    let err = Document::parse("Logging {\n  Level = Verbose\n}", &[logging_class()])
        .err()
        .unwrap();
    match err {
        Error::Conversion {
            symbol, type_name, ..
        } => {
            assert_eq!(symbol.name(), "Verbose");
            assert_eq!(symbol.token().kind(), TokenKind::Value);
            assert_eq!(type_name, "Level");
        }
        other => panic!("Expected conversion error, got {:?}", other),
    }
}

#[test]
fn test_fast_path_iff_dirty_field_name_cached() {
    // Port is written in the file, Debug is not
    let text = "Server {\n  Port = 1\n}";
    let mut doc = Document::parse(text, &[server_class()]).unwrap();
    let instance = &mut doc.instances[0];

    instance.set("Debug", true).unwrap();
    assert_eq!(write_tokens(instance.generate_tokens()), text);

    instance.set("Port", 1).unwrap();
    let tokens = instance.generate_tokens();
    assert!(tokens
        .iter()
        .any(|t| t.kind() == TokenKind::FieldName && t.data() == "Debug"));
    assert_eq!(write_tokens(tokens), "Server {\n  Port = 1\n  Debug = true\n}");
}
