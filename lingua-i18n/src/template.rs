//! Placeholder substitution for message templates.
//!
//! `{name}` is replaced with the value of the named argument; `{{` and `}}`
//! stand for literal braces. Nothing else is interpreted.

use crate::{I18nError, Result};

/// Substitute named arguments into `template`.
///
/// # Example
///
/// ```
/// use lingua_i18n::format_template;
///
/// let text = format_template("Hello, {name}!", &[("name", "Alice")]).unwrap();
/// assert_eq!(text, "Hello, Alice!");
/// ```
pub fn format_template(template: &str, args: &[(&str, &str)]) -> Result<String> {
    let error = |reason: String| I18nError::FormatError {
        template: template.to_string(),
        reason,
    };

    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                result.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(error("unclosed '{'".to_string()));
                        }
                        Some(c) => name.push(c),
                    }
                }
                let value = args
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| error(format!("missing argument '{}'", name)))?;
                result.push_str(value);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                result.push('}');
            }
            '}' => return Err(error("single '}' encountered".to_string())),
            c => result.push(c),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitution() {
        let text = format_template("Username: {username}", &[("username", "test")]).unwrap();
        assert_eq!(text, "Username: test");
    }

    #[test]
    fn test_repeated_and_multiple() {
        let text = format_template("{a}-{b}-{a}", &[("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(text, "1-2-1");
    }

    #[test]
    fn test_escaped_braces() {
        let text = format_template("{{literal}} {x}", &[("x", "y")]).unwrap();
        assert_eq!(text, "{literal} y");
    }

    #[test]
    fn test_no_placeholders() {
        assert_eq!(format_template("plain", &[]).unwrap(), "plain");
    }

    #[test]
    fn test_missing_argument() {
        let err = format_template("value: {value}", &[]).unwrap_err();
        assert!(matches!(err, I18nError::FormatError { .. }));
        assert!(err.to_string().contains("value"));
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(format_template("open {name", &[("name", "x")]).is_err());
        assert!(format_template("close }", &[]).is_err());
    }
}
