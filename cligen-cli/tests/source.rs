use cligen_cli::source::{ModuleDecl, SourceDocument, SourceError};

fn doc(source: &str) -> SourceDocument {
    SourceDocument::parse(source).unwrap()
}

// ── Parsing ─────────────────────────────────────────────────────────

#[test]
fn invalid_source_is_a_parse_error() {
    let err = SourceDocument::parse("fn main() {}\nstruct ;\n").err().unwrap();
    assert!(matches!(err, SourceError::Parse(_)));
    assert!(err.to_string().starts_with("2:"), "{err}");
}

#[test]
fn modules_lists_out_of_line_declarations() {
    let d = doc("mod a;\npub mod b;\nmod inline {}\nfn main() {}\n");
    assert_eq!(
        d.modules(),
        vec![
            ModuleDecl { name: "a".into(), public: false },
            ModuleDecl { name: "b".into(), public: true },
        ]
    );
}

// ── Insertion ───────────────────────────────────────────────────────

#[test]
fn inserts_before_first_item_when_no_modules() {
    let mut d = doc("// header\n\nuse std::env;\n\nfn main() {}\n");
    assert!(d.add_import("github.com/acme/tool/origin").unwrap());
    assert_eq!(
        d.as_str(),
        "// header\n\nmod origin;\n\nuse std::env;\n\nfn main() {}\n"
    );
}

#[test]
fn inserts_after_last_module_in_order() {
    let mut d = doc("mod alpha;\nmod beta;\n\nfn main() {}\n");
    assert!(d.add_module("gamma", false).unwrap());
    assert_eq!(d.as_str(), "mod alpha;\nmod beta;\nmod gamma;\n\nfn main() {}\n");
}

#[test]
fn inserts_before_the_next_module_by_name() {
    let mut d = doc("mod alpha;\n#[cfg(unix)]\nmod gamma;\n\nfn main() {}\n");
    assert!(d.add_module("beta", false).unwrap());
    assert_eq!(
        d.as_str(),
        "mod alpha;\nmod beta;\n#[cfg(unix)]\nmod gamma;\n\nfn main() {}\n"
    );
}

#[test]
fn appends_to_file_without_items() {
    let mut d = doc("// Code generated by cligen;\n");
    assert!(d.add_module("push", true).unwrap());
    assert_eq!(d.as_str(), "// Code generated by cligen;\n\npub mod push;\n");

    let mut empty = doc("");
    assert!(empty.add_module("push", true).unwrap());
    assert_eq!(empty.as_str(), "pub mod push;\n");
}

#[test]
fn last_module_without_trailing_newline() {
    let mut d = doc("mod alpha;");
    assert!(d.add_module("beta", false).unwrap());
    assert_eq!(d.as_str(), "mod alpha;\nmod beta;\n");
}

#[test]
fn preserves_everything_else_verbatim() {
    let original = "#![allow(dead_code)]\n\n/// Entry.\nmod  weird_spacing ;\n\nfn main() {\n    let x = 1;   // odd\n}\n";
    let mut d = doc(original);
    assert!(d.add_module("zed", false).unwrap());
    assert_eq!(
        d.as_str(),
        original.replace("mod  weird_spacing ;\n", "mod  weird_spacing ;\nmod zed;\n")
    );
}

#[test]
fn non_ascii_columns_are_handled() {
    let mut d = doc("mod café_ü; // ünïcode\nfn main() {}\n");
    assert!(d.add_module("zed", false).unwrap());
    assert_eq!(d.as_str(), "mod café_ü; // ünïcode\nmod zed;\nfn main() {}\n");
}

fn names(d: &SourceDocument) -> Vec<String> {
    d.modules().into_iter().map(|m| m.name).collect()
}

#[test]
fn first_item_sharing_a_line_with_a_block_comment() {
    let mut d = doc("/* license\n */ fn main() {}\n");
    assert!(d.add_import("pkg/origin").unwrap());
    assert_eq!(d.as_str(), "/* license\n */ mod origin;\n\nfn main() {}\n");
    assert_eq!(names(&d), vec!["origin"]);
    assert!(!d.add_import("pkg/origin").unwrap());
}

#[test]
fn block_comment_after_last_module() {
    let mut d = doc("mod alpha; /* note\n */\nfn main() {}\n");
    assert!(d.add_module("beta", false).unwrap());
    assert_eq!(d.as_str(), "mod alpha;\nmod beta; /* note\n */\nfn main() {}\n");
    assert_eq!(names(&d), vec!["alpha", "beta"]);
}

#[test]
fn item_on_the_same_line_as_last_module() {
    let mut d = doc("mod alpha; fn main() {\n}\n");
    assert!(d.add_module("beta", false).unwrap());
    assert_eq!(d.as_str(), "mod alpha;\nmod beta; fn main() {\n}\n");
    assert_eq!(names(&d), vec!["alpha", "beta"]);
}

#[test]
fn doc_comment_after_last_module_stays_with_its_item() {
    let mut d = doc("mod alpha; /// Entry.\nfn main() {}\n");
    assert!(d.add_module("beta", false).unwrap());
    assert_eq!(d.as_str(), "mod alpha;\nmod beta; /// Entry.\nfn main() {}\n");
    assert_eq!(names(&d), vec!["alpha", "beta"]);
}

#[test]
fn next_module_on_a_shared_line() {
    let mut d = doc("mod alpha; mod gamma;\n");
    assert!(d.add_module("beta", false).unwrap());
    assert_eq!(d.as_str(), "mod alpha; mod beta;\nmod gamma;\n");
    assert_eq!(names(&d), vec!["alpha", "beta", "gamma"]);
}

// ── Uniqueness ──────────────────────────────────────────────────────

#[test]
fn same_module_twice_is_unchanged() {
    let mut d = doc("fn main() {}\n");
    assert!(d.add_import("pkg/origin").unwrap());
    let once = d.as_str().to_string();
    assert!(!d.add_import("other/pkg/origin").unwrap());
    assert!(!d.add_module("origin", true).unwrap());
    assert_eq!(d.as_str(), once);
    assert_eq!(d.modules().len(), 1);
}

#[test]
fn type_namespace_items_conflict() {
    for (source, kind) in [
        ("struct origin;\n", "struct"),
        ("enum origin {}\n", "enum"),
        ("mod origin {}\n", "inline module"),
        ("use remote::origin;\n", "use declaration"),
        ("use remote::{other as origin};\n", "use declaration"),
        ("extern crate origin;\n", "extern crate"),
        ("type origin = u8;\n", "type alias"),
    ] {
        let mut d = doc(source);
        match d.add_module("origin", false) {
            Err(SourceError::Conflict { name, item }) => {
                assert_eq!(name, "origin");
                assert_eq!(item, kind, "{source}");
            }
            other => panic!("{source}: expected conflict, got {:?}", other.map(|_| ())),
        }
        assert_eq!(d.as_str(), source);
    }
}

#[test]
fn value_namespace_items_do_not_conflict() {
    let mut d = doc("fn origin() {}\nconst ORIGIN: u8 = 0;\n");
    assert!(d.add_module("origin", false).unwrap());
    assert!(d.as_str().starts_with("mod origin;\n\nfn origin() {}"));
}

#[test]
fn invalid_module_names_are_rejected() {
    let mut d = doc("fn main() {}\n");
    for name in ["", "fn", "with-dash", "1st"] {
        assert!(matches!(
            d.add_module(name, false),
            Err(SourceError::InvalidName(_))
        ));
    }
    assert!(matches!(d.add_import("pkg/"), Err(SourceError::InvalidName(_))));
}
