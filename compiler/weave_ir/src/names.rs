//! Naming scheme for generated symbols.
//!
//! Every constructor in the emitted unit is `Use<Group?><Pkg><Type><Ref?>`,
//! every synthesized adapter ends in `Adapter`. The scheme is deterministic
//! so repeated generations produce byte-identical output.

/// Prefix of every generated constructor function.
pub const CTOR_PREFIX: &str = "Use";

/// Suffix separating a group qualifier from the rest of a symbol.
pub const GROUP_SUFFIX: &str = "Group";

/// Suffix of constructors returning a pointer.
pub const REF_SUFFIX: &str = "Ref";

/// Suffix of synthesized adapter types.
pub const ADAPTER_SUFFIX: &str = "Adapter";

/// Uppercase the first ASCII letter, leaving the rest untouched.
///
/// Used to turn a package alias into a symbol segment (`test` -> `Test`).
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
