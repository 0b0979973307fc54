use crate::ir::NormalizedName;

/// Create a `NormalizedName` from a schema type name, computing the identifier used by
/// the renderers.
pub fn normalize_name(name: &str) -> NormalizedName {
    NormalizedName {
        original: name.to_string(),
        camel_case: camel_case_type(name),
    }
}

/// Drop the namespace prefix of a qualified name: `plcm-user:plcm-user` → `plcm-user`.
pub fn strip_ns(qualified: &str) -> &str {
    qualified.rsplit(':').next().unwrap_or(qualified)
}

/// Camel-case a hyphenated name by upper-casing every character that follows a `-`.
///
/// Only hyphens are treated as separators; underscores, dots and digits are kept as-is,
/// so `plcm-user-v2` → `plcmUserV2` and `conf_room` stays `conf_room`.
pub fn camel_case_type(orig: &str) -> String {
    let mut result = String::with_capacity(orig.len());
    let mut chars = orig.chars();
    while let Some(ch) = chars.next() {
        if ch != '-' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some(next) => result.extend(next.to_uppercase()),
            None => result.push('-'),
        }
    }
    result
}

/// Upper-case the first character.
pub fn capitalize(orig: &str) -> String {
    let mut chars = orig.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Enumeration member value for a literal: camel-cased and capitalized.
///
/// `active` → `Active`, `2nd-tier` → `2ndTier`.
pub fn enum_value(literal: &str) -> String {
    capitalize(&camel_case_type(literal))
}

/// Identifier-safe key for an enumeration value. Dots, spaces and slashes become `_`
/// and a leading digit gets a `_` prefix.
pub fn enum_key(value: &str) -> String {
    let key: String = value
        .chars()
        .map(|c| if matches!(c, '.' | ' ' | '/') { '_' } else { c })
        .collect();
    if key.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{key}")
    } else {
        key
    }
}

/// Whether a raw type reference names a built-in XML Schema primitive.
pub fn is_primitive(raw: &str) -> bool {
    raw.starts_with("xs:") || raw.starts_with("xsd:")
}

/// Whether a path segment is a `{param}` placeholder.
pub fn is_path_param(segment: &str) -> bool {
    segment.starts_with('{')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ns() {
        assert_eq!(strip_ns("plcm-user:plcm-user"), "plcm-user");
        assert_eq!(strip_ns("xs:string"), "string");
        assert_eq!(strip_ns("plain"), "plain");
        assert_eq!(strip_ns("a:b:c"), "c");
    }

    #[test]
    fn test_camel_case_type() {
        assert_eq!(camel_case_type("plcm-user"), "plcmUser");
        assert_eq!(camel_case_type("plcm-site-link-v2"), "plcmSiteLinkV2");
        assert_eq!(camel_case_type("conf_room"), "conf_room");
        assert_eq!(camel_case_type("trailing-"), "trailing-");
        assert_eq!(camel_case_type("get-plcm-user"), "getPlcmUser");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("users"), "Users");
        assert_eq!(capitalize("2nd"), "2nd");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_enum_value_and_key() {
        assert_eq!(enum_value("active"), "Active");
        assert_eq!(enum_value("2nd-tier"), "2ndTier");
        assert_eq!(enum_key("Active"), "Active");
        assert_eq!(enum_key("2ndTier"), "_2ndTier");
        assert_eq!(enum_key("Video.Audio/Only Mode"), "Video_Audio_Only_Mode");
    }

    #[test]
    fn test_normalize_name() {
        let n = normalize_name("plcm-user-list");
        assert_eq!(n.original, "plcm-user-list");
        assert_eq!(n.camel_case, "plcmUserList");
    }

    #[test]
    fn test_primitives_and_params() {
        assert!(is_primitive("xs:int"));
        assert!(is_primitive("xsd:boolean"));
        assert!(!is_primitive("plcm-user:plcm-user"));
        assert!(is_path_param("{id}"));
        assert!(!is_path_param("users"));
    }
}
