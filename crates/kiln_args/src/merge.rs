//! Override-by-key merging of argument vectors.

/// The key of an argument: the text before the first `=`, or the whole argument.
pub fn arg_key(arg: &str) -> &str {
    arg.split_once('=').map_or(arg, |(key, _)| key)
}

/// Returns `true` if any argument in `haystack` shares a key with `needle`.
pub fn contains_arg(needle: &str, haystack: &[String]) -> bool {
    let key = arg_key(needle);
    haystack.iter().any(|straw| arg_key(straw) == key)
}

/// Appends `new` to `existing`, first dropping every existing argument whose
/// key matches a new one. Survivors keep their relative order.
pub fn override_merge(existing: Vec<String>, new: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = existing
        .into_iter()
        .filter(|arg| !contains_arg(arg, &new))
        .collect();
    out.extend(new);
    out
}

/// Drops the first `-jar` and the argument following it.
pub fn strip_jar(args: Vec<String>) -> Vec<String> {
    let Some(pos) = args.iter().position(|a| a == "-jar") else {
        return args;
    };
    args.into_iter()
        .enumerate()
        .filter(|(i, _)| *i != pos && *i != pos + 1)
        .map(|(_, a)| a)
        .collect()
}
