//! Shell-word tokenizing of user argument text.

use crate::error::ArgsError;

/// Splits `text` into words with POSIX shell quoting rules.
///
/// `origin` names the source of the text in error messages.
pub fn tokenize(text: &str, origin: &str) -> Result<Vec<String>, ArgsError> {
    shell_words::split(text).map_err(|e| ArgsError::Tokenize {
        origin: origin.to_string(),
        reason: e.to_string(),
    })
}
