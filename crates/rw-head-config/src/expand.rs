//! `${VAR}` expansion for config strings.
//!
//! Only braced references are expanded. Each `${...}` reference is handed to
//! shellexpand on its own, so text around it (including a bare `$VAR`)
//! reaches the config value unchanged. An unterminated `${` is literal text.

use std::env::VarError;

use crate::ConfigError;

/// Expand every `${VAR}` and `${VAR:-default}` reference in `value`.
///
/// `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(close) = rest[start..].find('}') else {
            break;
        };
        let end = start + close + 1;
        expanded.push_str(&rest[..start]);
        expanded.push_str(&expand_reference(&rest[start..end], field)?);
        rest = &rest[end..];
    }

    expanded.push_str(rest);
    Ok(expanded)
}

/// Expand a single `${...}` reference.
fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |name| std::env::var(name).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| {
            let reason = match e.cause {
                VarError::NotPresent => "not set",
                VarError::NotUnicode(_) => "not valid unicode",
            };
            ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{}}} {reason}", e.var_name),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_var(name: &str, value: &str) {
        // SAFETY: each test uses its own variable names
        unsafe { std::env::set_var(name, value) }
    }

    fn remove_var(name: &str) {
        // SAFETY: each test uses its own variable names
        unsafe { std::env::remove_var(name) }
    }

    #[test]
    fn test_expand_whole_value() {
        set_var("RW_HEAD_EXPAND_CHARSET", "ISO-8859-1");
        assert_eq!(
            expand_env("${RW_HEAD_EXPAND_CHARSET}", "defaults.charset").unwrap(),
            "ISO-8859-1"
        );
        remove_var("RW_HEAD_EXPAND_CHARSET");
    }

    #[test]
    fn test_expand_default_when_unset() {
        remove_var("RW_HEAD_EXPAND_UNSET");
        assert_eq!(
            expand_env("${RW_HEAD_EXPAND_UNSET:-width=320}", "defaults.viewport").unwrap(),
            "width=320"
        );
    }

    #[test]
    fn test_expand_inside_text() {
        set_var("RW_HEAD_EXPAND_WIDTH", "1024");
        assert_eq!(
            expand_env(
                "width=${RW_HEAD_EXPAND_WIDTH}, initial-scale=1",
                "defaults.viewport"
            )
            .unwrap(),
            "width=1024, initial-scale=1"
        );
        remove_var("RW_HEAD_EXPAND_WIDTH");
    }

    #[test]
    fn test_expand_several_references() {
        set_var("RW_HEAD_EXPAND_W", "800");
        set_var("RW_HEAD_EXPAND_S", "2");
        assert_eq!(
            expand_env(
                "width=${RW_HEAD_EXPAND_W}, initial-scale=${RW_HEAD_EXPAND_S}",
                "defaults.viewport"
            )
            .unwrap(),
            "width=800, initial-scale=2"
        );
        remove_var("RW_HEAD_EXPAND_W");
        remove_var("RW_HEAD_EXPAND_S");
    }

    #[test]
    fn test_unset_reference_names_field_and_var() {
        remove_var("RW_HEAD_EXPAND_MISSING");
        let err = expand_env("${RW_HEAD_EXPAND_MISSING}", "defaults.charset").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("${RW_HEAD_EXPAND_MISSING} not set"));
        assert!(message.contains("defaults.charset"));
    }

    #[test]
    fn test_bare_dollar_kept_without_braced_reference() {
        assert_eq!(expand_env("$VAR", "defaults.charset").unwrap(), "$VAR");
    }

    #[test]
    fn test_bare_dollar_kept_next_to_braced_reference() {
        set_var("RW_HEAD_EXPAND_A", "a");
        set_var("RW_HEAD_EXPAND_B", "EXPANDED");
        assert_eq!(
            expand_env("${RW_HEAD_EXPAND_A}-$RW_HEAD_EXPAND_B", "defaults.viewport").unwrap(),
            "a-$RW_HEAD_EXPAND_B"
        );
        remove_var("RW_HEAD_EXPAND_A");
        remove_var("RW_HEAD_EXPAND_B");
    }

    #[test]
    fn test_unset_bare_dollar_is_not_an_error() {
        set_var("RW_HEAD_EXPAND_SET", "x");
        remove_var("RW_HEAD_EXPAND_BARE_UNSET");
        assert_eq!(
            expand_env("${RW_HEAD_EXPAND_SET}$RW_HEAD_EXPAND_BARE_UNSET", "defaults.charset")
                .unwrap(),
            "x$RW_HEAD_EXPAND_BARE_UNSET"
        );
        remove_var("RW_HEAD_EXPAND_SET");
    }

    #[test]
    fn test_unterminated_reference_is_literal() {
        assert_eq!(
            expand_env("width=${RW_HEAD_EXPAND_OPEN", "defaults.viewport").unwrap(),
            "width=${RW_HEAD_EXPAND_OPEN"
        );
    }
}
