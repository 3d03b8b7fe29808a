//! Integration test: JSON Pointer resolution through every concrete backend.
//!
//! Each case is a document, a pointer, and either the pointer to the node
//! that must come back or the failure kind that must be reported. The same
//! table runs against `serde_json` and `serde_yaml` documents so that the
//! resolver's behaviour is shown to be independent of the backend.

use jsonval_adapters::{JsonAdapter, YamlAdapter};
use jsonval_core::{resolve_json_pointer, Adapter, PointerErrorKind};
use serde_json::{json, Value};

enum Expected {
    /// Canonical pointer (resolved directly on the serde_json tree) of the
    /// node the resolver must return.
    Node(&'static str),
    Failure(PointerErrorKind),
}

struct Case {
    description: &'static str,
    document: Value,
    pointer: &'static str,
    expected: Expected,
}

fn three_element_array() -> Value {
    json!({"test": ["test0", "test1", "test2"]})
}

fn cases() -> Vec<Case> {
    use Expected::{Failure, Node};
    use PointerErrorKind::*;

    vec![
        Case {
            description: "resolving '#' is rejected",
            document: Value::Null,
            pointer: "#",
            expected: Failure(InvalidPointer),
        },
        Case {
            description: "the empty pointer returns the root",
            document: Value::Null,
            pointer: "",
            expected: Node(""),
        },
        Case {
            description: "'/' returns the root",
            document: Value::Null,
            pointer: "/",
            expected: Node(""),
        },
        Case {
            description: "'//' returns the root",
            document: Value::Null,
            pointer: "//",
            expected: Node(""),
        },
        Case {
            description: "'/test' selects the member named 'test'",
            document: json!({"test": "test"}),
            pointer: "/test",
            expected: Node("/test"),
        },
        Case {
            description: "a trailing separator does not descend",
            document: json!({"test": "test"}),
            pointer: "/test/",
            expected: Node("/test"),
        },
        Case {
            description: "repeated separators do not descend",
            document: json!({"test": "test"}),
            pointer: "//test//",
            expected: Node("/test"),
        },
        Case {
            description: "a missing member is not found",
            document: json!({"test": "test"}),
            pointer: "/missing",
            expected: Failure(NotFound),
        },
        Case {
            description: "a non-empty string cannot be traversed",
            document: json!({"value": "hello, world"}),
            pointer: "/value/bar",
            expected: Failure(NotATraversable),
        },
        Case {
            description: "an empty string cannot be traversed",
            document: json!({"empty": ""}),
            pointer: "/empty/after_empty",
            expected: Failure(NotATraversable),
        },
        Case {
            description: "'/test/0' selects the first element",
            document: three_element_array(),
            pointer: "/test/0",
            expected: Node("/test/0"),
        },
        Case {
            description: "'/test/1' selects the second element",
            document: three_element_array(),
            pointer: "/test/1",
            expected: Node("/test/1"),
        },
        Case {
            description: "'/test/2' selects the third element",
            document: three_element_array(),
            pointer: "/test/2",
            expected: Node("/test/2"),
        },
        Case {
            description: "'/test/3' is out of bounds",
            document: three_element_array(),
            pointer: "/test/3",
            expected: Failure(NotFound),
        },
        Case {
            description: "'-' is never a usable array index",
            document: three_element_array(),
            pointer: "/test/-",
            expected: Failure(InvalidIndexToken),
        },
        Case {
            description: "'-' is rejected on an empty array too",
            document: json!({"test": []}),
            pointer: "/test/-",
            expected: Failure(InvalidIndexToken),
        },
        Case {
            description: "'~1' unescapes to '/'",
            document: json!({"hello/world": 10.0}),
            pointer: "/hello~1world",
            expected: Node("/hello~1world"),
        },
        Case {
            description: "'~0' unescapes to '~'",
            document: json!({"hello~world": 10.0}),
            pointer: "/hello~0world",
            expected: Node("/hello~0world"),
        },
        Case {
            description: "'~01' unescapes to '~1', not '/'",
            document: json!({"hello~1world": 10.0, "hello/world": 0}),
            pointer: "/hello~01world",
            expected: Node("/hello~01world"),
        },
    ]
}

/// Resolve `pointer` on the serde_json tree without going through the
/// resolver under test.
fn expected_node<'a>(document: &'a Value, pointer: &str) -> &'a Value {
    document
        .pointer(pointer)
        .unwrap_or_else(|| panic!("fixture pointer '{pointer}' must exist"))
}

#[test]
fn test_pointer_cases_with_serde_json() {
    for case in cases() {
        let root = JsonAdapter::new(&case.document);
        let result = resolve_json_pointer(root, case.pointer);
        match case.expected {
            Expected::Node(target) => {
                let actual = result.unwrap_or_else(|e| panic!("{}: {e}", case.description));
                let expected = expected_node(&case.document, target);
                assert!(
                    std::ptr::eq(actual.value(), expected),
                    "{}: resolved to the wrong node",
                    case.description
                );
                assert!(actual.equal_to(&JsonAdapter::new(expected), true));
            }
            Expected::Failure(kind) => {
                let err = result.err().unwrap_or_else(|| {
                    panic!("{}: expected {kind:?}, resolution succeeded", case.description)
                });
                assert_eq!(err.kind(), kind, "{}: {err}", case.description);
                assert_eq!(err.pointer(), case.pointer);
            }
        }
    }
}

#[test]
fn test_pointer_cases_with_serde_yaml() {
    for case in cases() {
        let yaml: serde_yaml::Value =
            serde_yaml::to_value(&case.document).expect("JSON fixtures convert to YAML");
        let result = resolve_json_pointer(YamlAdapter::new(&yaml), case.pointer);
        match case.expected {
            Expected::Node(target) => {
                let actual = result.unwrap_or_else(|e| panic!("{}: {e}", case.description));
                let expected: serde_yaml::Value =
                    serde_yaml::to_value(expected_node(&case.document, target))
                        .expect("JSON fixtures convert to YAML");
                assert!(
                    actual.equal_to(&YamlAdapter::new(&expected), true),
                    "{}: resolved to the wrong node",
                    case.description
                );
            }
            Expected::Failure(kind) => {
                let err = result.err().unwrap_or_else(|| {
                    panic!("{}: expected {kind:?}, resolution succeeded", case.description)
                });
                assert_eq!(err.kind(), kind, "{}: {err}", case.description);
            }
        }
    }
}

#[test]
fn test_hyphen_failure_message_explains_itself() {
    let document = three_element_array();
    let err = resolve_json_pointer(JsonAdapter::new(&document), "/test/-").unwrap_err();
    assert!(
        err.to_string().contains("not supported"),
        "unexpected message: {err}"
    );
}
