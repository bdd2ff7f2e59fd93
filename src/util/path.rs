/// Expand environment variables in a path string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
///
/// Unresolvable variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
