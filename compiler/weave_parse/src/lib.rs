//! Reference-spec parser.
//!
//! Turns one wiring spec string into an [`Item`]. Classification runs as a
//! fixed ordered sequence of rules, each firing only while the kind is
//! still undetermined; the group/reference/exec markers are stripped up
//! front regardless of the eventual kind.
//!
//! Grammar by example:
//!
//! ```text
//! [Main]*github.com/acme/app/cfg.Config   group + reference + struct
//! .github.com/acme/app/cfg.Load("x", 5)   exec-marked function call
//! "hello"    5.02    true                 literals
//! ```

mod args;
mod error;

pub use args::split_call_args;
pub use error::ParseError;

use weave_ir::{Item, ItemKind};

/// The spec parser. Holds no state; constructed explicitly and shared
/// freely across independent generation requests.
#[derive(Clone, Copy, Default, Debug)]
pub struct SpecParser;

impl SpecParser {
    pub fn new() -> Self {
        SpecParser
    }

    /// Parse one spec string into an item with no dependencies attached.
    pub fn parse(&self, input: &str) -> Result<Item, ParseError> {
        parse_spec(input)
    }
}

/// Parse one spec string into an item.
///
/// Rules, in order: group marker, reference marker, exec marker, quoted
/// string, numeric literal, boolean literal, function call, struct path.
pub fn parse_spec(input: &str) -> Result<Item, ParseError> {
    let original = input.trim().to_string();
    let mut rest = original.as_str();

    // 1. group marker `[Name]`
    let mut group = None;
    if let Some(tail) = rest.strip_prefix('[') {
        let end = tail
            .find(']')
            .ok_or_else(|| ParseError::GroupUnterminated(original.clone()))?;
        group = Some(tail[..end].to_string());
        rest = &tail[end + 1..];
    }

    // 2. reference marker `*`
    let mut is_ref = false;
    if let Some(tail) = rest.strip_prefix('*') {
        is_ref = true;
        rest = tail;
    }

    // 3. exec marker `.` (invoke on use)
    let mut exec = false;
    if let Some(tail) = rest.strip_prefix('.') {
        exec = true;
        rest = tail;
    }

    let mut item = Item {
        kind: ItemKind::Struct,
        name: String::new(),
        pkg: String::new(),
        path: String::new(),
        group,
        is_ref,
        exec,
        // `rest` still borrows `original` past this point.
        original: original.clone(),
        deps: Vec::new(),
    };

    // 4. quoted string literal
    if rest.starts_with('"') {
        item.kind = ItemKind::String;
        item.name = rest.to_string();
        return Ok(item);
    }

    // 5. numeric literal
    if !rest.is_empty() && rest.parse::<f64>().is_ok() {
        item.kind = ItemKind::Number;
        item.name = rest.to_string();
        return Ok(item);
    }

    // 6. boolean literal
    if rest == "true" || rest == "false" {
        item.kind = ItemKind::Boolean;
        item.name = rest.to_string();
        return Ok(item);
    }

    // 7. function call: a `(` anywhere before the kind is fixed
    let callee = if let Some(pos) = rest.find('(') {
        item.kind = ItemKind::Func;
        args::check_balance(rest).map_err(|_| ParseError::UnbalancedParens(item.original.clone()))?;
        &rest[..pos]
    } else {
        // 8. struct path
        rest
    };

    parse_path(callee, &mut item);
    if item.name.is_empty() {
        return Err(ParseError::UnrecognizedSpec(item.original));
    }
    Ok(item)
}

/// Split `callee` into directory path, package alias and bare name.
fn parse_path(callee: &str, item: &mut Item) {
    let mut segments: Vec<&str> = callee.split('/').collect();
    let full_name = segments.pop().unwrap_or_default();
    if !segments.is_empty() {
        item.path = format!("{}/", segments.join("/"));
    }
    if full_name.is_empty() {
        return;
    }
    let parts: Vec<&str> = full_name.split('.').collect();
    item.name = parts[parts.len() - 1].to_string();
    if parts.len() > 1 {
        item.pkg = parts[0].to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_struct_with_full_path() {
        let it = parse_spec("github.com/acme/app/cfg.Config").unwrap();
        assert_eq!(it.kind, ItemKind::Struct);
        assert_eq!(it.path, "github.com/acme/app/");
        assert_eq!(it.pkg, "cfg");
        assert_eq!(it.name, "Config");
        assert!(!it.is_ref);
        assert!(it.group.is_none());
    }

    #[test]
    fn parses_local_struct_without_package() {
        let it = parse_spec("Config").unwrap();
        assert_eq!(it.kind, ItemKind::Struct);
        assert_eq!(it.name, "Config");
        assert_eq!(it.pkg, "");
        assert_eq!(it.path, "");
    }

    #[test]
    fn group_marker_is_stripped_and_recorded() {
        let it = parse_spec("[Main]github.com/acme/app/cfg.Config").unwrap();
        assert_eq!(it.group.as_deref(), Some("Main"));
        assert_eq!(it.name, "Config");
        assert_eq!(it.original, "[Main]github.com/acme/app/cfg.Config");
    }

    #[test]
    fn reference_marker_sets_ref() {
        let it = parse_spec("*github.com/acme/app/cfg.Config").unwrap();
        assert!(it.is_ref);
        assert_eq!(it.path, "github.com/acme/app/");
        assert_eq!(it.type_id(), "github.com/acme/app/cfg.Config");
    }

    #[test]
    fn group_and_reference_combine() {
        let it = parse_spec("[Hi]*github.com/acme/app/cfg.Config").unwrap();
        assert!(it.is_ref);
        assert_eq!(it.group.as_deref(), Some("Hi"));
        assert_eq!(it.name, "Config");
    }

    #[test]
    fn exec_marker_sets_exec() {
        let it = parse_spec(".github.com/acme/app/cfg.Load()").unwrap();
        assert!(it.exec);
        assert_eq!(it.kind, ItemKind::Func);
        assert_eq!(it.name, "Load");
    }

    #[test]
    fn original_text_survives_classification() {
        // Rules keep consuming `rest` after the item exists; the recorded
        // text must stay the full trimmed spec, markers included.
        let it = parse_spec("  .a/pkg.Load(\"x\", 5)  ").unwrap();
        assert_eq!(it.kind, ItemKind::Func);
        assert_eq!(it.original, ".a/pkg.Load(\"x\", 5)");

        let lit = parse_spec("5.02").unwrap();
        assert_eq!(lit.original, "5.02");
    }

    #[test]
    fn string_literal() {
        let it = parse_spec("\"hello\"").unwrap();
        assert_eq!(it.kind, ItemKind::String);
        assert_eq!(it.name, "\"hello\"");
    }

    #[test]
    fn number_literals() {
        assert_eq!(parse_spec("5").unwrap().kind, ItemKind::Number);
        assert_eq!(parse_spec("5.02").unwrap().kind, ItemKind::Number);
        assert_eq!(parse_spec("-3").unwrap().kind, ItemKind::Number);
    }

    #[test]
    fn boolean_literals() {
        assert_eq!(parse_spec("true").unwrap().kind, ItemKind::Boolean);
        assert_eq!(parse_spec("false").unwrap().kind, ItemKind::Boolean);
    }

    #[test]
    fn function_call_with_arguments() {
        let it = parse_spec("github.com/acme/app/cfg.New(\"x\", 5)").unwrap();
        assert_eq!(it.kind, ItemKind::Func);
        assert_eq!(it.pkg, "cfg");
        assert_eq!(it.name, "New");
        assert_eq!(it.path, "github.com/acme/app/");
    }

    #[test]
    fn unterminated_group_is_a_syntax_error() {
        assert!(matches!(
            parse_spec("[Main github.com/a.B"),
            Err(ParseError::GroupUnterminated(_))
        ));
    }

    #[test]
    fn unbalanced_parens_are_a_syntax_error() {
        assert!(matches!(
            parse_spec("pkg.New(\"x\""),
            Err(ParseError::UnbalancedParens(_))
        ));
        assert!(matches!(
            parse_spec("pkg.New(a, f(b)"),
            Err(ParseError::UnbalancedParens(_))
        ));
    }

    #[test]
    fn empty_spec_is_unrecognized() {
        assert!(matches!(
            parse_spec(""),
            Err(ParseError::UnrecognizedSpec(_))
        ));
        assert!(matches!(
            parse_spec("*"),
            Err(ParseError::UnrecognizedSpec(_))
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_float_classifies_as_number(n in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
                let it = parse_spec(&n.to_string()).unwrap();
                prop_assert_eq!(it.kind, ItemKind::Number);
            }

            #[test]
            fn plain_identifiers_classify_as_struct(name in "[A-Za-z][A-Za-z0-9_]{0,12}") {
                prop_assume!(name != "true" && name != "false");
                let it = parse_spec(&name).unwrap();
                prop_assert_eq!(it.kind, ItemKind::Struct);
                prop_assert_eq!(it.name, name);
            }
        }
    }
}
