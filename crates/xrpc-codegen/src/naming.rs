//! Naming convention utilities for code generation.
//!
//! Every generated identifier is derived from descriptor names with the case
//! transforms below. Nothing is hashed or numbered, so the same descriptors
//! always produce the same names.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `greeter_service` | [`to_pascal_case`] | `GreeterService` |
//! | `GetHTTPStatus` | [`to_snake_case`] | `get_http_status` |
//! | `HTTPRequest` | [`to_upper_camel_case`] | `HttpRequest` |
//! | `word` | [`capitalize`] | `Word` |
//! | `Word` | [`decapitalize`] | `word` |
//! | `type` | [`sanitize_ident`] | `r#type` |

/// Suffix appended to generated client and server type names.
pub const FRAMEWORK_SUFFIX: &str = "X";

/// Convert a string to PascalCase.
///
/// Handles snake_case and kebab-case. Letters inside a word keep their case,
/// so acronyms survive (`HTTPService` stays `HTTPService`).
///
/// # Examples
///
/// ```
/// use xrpc_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("hello-world"), "HelloWorld");
/// assert_eq!(to_pascal_case("Greeter"), "Greeter");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_']).map(capitalize).collect()
}

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use xrpc_codegen::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lower-case the first letter of a string.
///
/// Used for the private concrete client type (`GreeterClientX` -> `greeterClientX`).
///
/// # Examples
///
/// ```
/// use xrpc_codegen::naming::decapitalize;
///
/// assert_eq!(decapitalize("GreeterClientX"), "greeterClientX");
/// assert_eq!(decapitalize(""), "");
/// ```
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Split an identifier into words at separators and case boundaries.
///
/// `HTTPRequest` splits into `HTTP` and `Request`; digits stay attached to the
/// word they follow.
fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Convert an identifier to snake_case.
///
/// # Examples
///
/// ```
/// use xrpc_codegen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("Greet"), "greet");
/// assert_eq!(to_snake_case("SayHello"), "say_hello");
/// assert_eq!(to_snake_case("GetHTTPStatus"), "get_http_status");
/// ```
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert an identifier to UpperCamelCase the way prost names message types.
///
/// Unlike [`to_pascal_case`], the rest of each word is lower-cased.
///
/// # Examples
///
/// ```
/// use xrpc_codegen::naming::to_upper_camel_case;
///
/// assert_eq!(to_upper_camel_case("GreetRequest"), "GreetRequest");
/// assert_eq!(to_upper_camel_case("HTTPRequest"), "HttpRequest");
/// assert_eq!(to_upper_camel_case("foo_bar"), "FooBar");
/// ```
pub fn to_upper_camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| capitalize(&word.to_lowercase()))
        .collect()
}

/// Rust keywords that can be used as raw identifiers
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers
const RESERVED_KEYWORDS: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Make an identifier safe to emit.
///
/// Keywords become raw identifiers; the few keywords that cannot be raw get a
/// trailing underscore.
///
/// # Examples
///
/// ```
/// use xrpc_codegen::naming::sanitize_ident;
///
/// assert_eq!(sanitize_ident("greet"), "greet");
/// assert_eq!(sanitize_ident("type"), "r#type");
/// assert_eq!(sanitize_ident("self"), "self_");
/// ```
pub fn sanitize_ident(ident: &str) -> String {
    if RESERVED_KEYWORDS.contains(&ident) {
        format!("{ident}_")
    } else if RAW_KEYWORDS.contains(&ident) {
        format!("r#{ident}")
    } else {
        ident.to_string()
    }
}

/// Rust method name for an RPC method (`SayHello` -> `say_hello`).
pub fn method_ident(method_name: &str) -> String {
    sanitize_ident(&to_snake_case(method_name))
}
