//! Derivation of source-level names from project coordinates.
//!
//! When the caller omits them, the application class name and the base
//! package are derived from the artifact id and group id. The derived names
//! are always valid identifiers on every supported JVM language.

/// Suffix appended to derived application class names.
const APPLICATION_SUFFIX: &str = "Application";

/// Package segments that are reserved words in at least one supported language.
const RESERVED: &[&str] = &[
    "abstract", "as", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "def", "default", "do", "double", "else", "enum", "extends", "false",
    "final", "finally", "float", "for", "fun", "goto", "if", "implements", "import", "in",
    "instanceof", "int", "interface", "is", "long", "native", "new", "null", "object", "package",
    "private", "protected", "public", "return", "short", "static", "super", "switch",
    "synchronized", "this", "throw", "throws", "trait", "transient", "true", "try", "type", "val",
    "var", "void", "volatile", "when", "while", "yield",
];

/// Derive the main application class name from a project name.
///
/// | Input | Output |
/// |-------|--------|
/// | "demo" | "DemoApplication" |
/// | "my-app" | "MyAppApplication" |
/// | "OrderService" | "OrderServiceApplication" |
/// | "billing-application" | "BillingApplication" |
/// | "42" | "Application" |
pub fn application_name(project_name: &str) -> String {
    let candidate: String = to_pascal_case(project_name)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    match candidate.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => {
            if candidate.ends_with(APPLICATION_SUFFIX) {
                candidate
            } else {
                format!("{candidate}{APPLICATION_SUFFIX}")
            }
        }
        _ => APPLICATION_SUFFIX.to_string(),
    }
}

/// Derive the base package from the group and artifact ids.
///
/// Invalid characters are dropped, everything is lower-cased, segments that
/// start with a digit or collide with a reserved word get a `_` affix.
pub fn package_name(group_id: &str, artifact_id: &str) -> String {
    clean_package_name(&format!("{group_id}.{artifact_id}"))
}

/// Normalise a user supplied package name.
pub fn clean_package_name(raw: &str) -> String {
    raw.split('.')
        .map(|segment| {
            segment
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if segment.starts_with(|c: char| c.is_ascii_digit()) {
                format!("_{segment}")
            } else if RESERVED.contains(&segment.as_str()) {
                format!("{segment}_")
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Convert a string to PascalCase.
///
/// ## Examples
///
/// | Input | Output |
/// |-------|--------|
/// | "my-app" | "MyApp" |
/// | "HTTPRequest" | "HttpRequest" |
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Split a string into lower-cased words on separators and case boundaries.
///
/// 1. `_`, `-`, `.` and whitespace always split
/// 2. `aB` splits between `a` and `B`
/// 3. `HTTPRequest` splits between `P` and `R` (Upper Upper Lower)
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_name_from_simple_artifact() {
        assert_eq!(application_name("demo"), "DemoApplication");
        assert_eq!(application_name("my-app"), "MyAppApplication");
        assert_eq!(application_name("OrderService"), "OrderServiceApplication");
    }

    #[test]
    fn application_suffix_is_not_doubled() {
        assert_eq!(application_name("billing-application"), "BillingApplication");
    }

    #[test]
    fn application_name_falls_back_when_not_an_identifier() {
        assert_eq!(application_name("42"), "Application");
        assert_eq!(application_name(""), "Application");
    }

    #[test]
    fn package_name_joins_and_cleans() {
        assert_eq!(package_name("com.example", "demo"), "com.example.demo");
        assert_eq!(package_name("com.Example", "my-app"), "com.example.myapp");
    }

    #[test]
    fn package_segments_are_made_legal() {
        assert_eq!(package_name("org.acme", "2fa"), "org.acme._2fa");
        assert_eq!(package_name("org.acme", "class"), "org.acme.class_");
        assert_eq!(clean_package_name("com..example."), "com.example");
    }

    #[test]
    fn pascal_case_handles_acronyms() {
        assert_eq!(to_pascal_case("HTTPRequest"), "HttpRequest");
        assert_eq!(to_pascal_case("my awesome app"), "MyAwesomeApp");
    }
}
