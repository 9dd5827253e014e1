//! Name normalization applied at every map insertion and lookup boundary.
//!
//! Extension names arrive in several spellings: short (`blog`), suffixed
//! (`BlogBundle`) or fully qualified (`Vendor\Blog\BlogBundle`,
//! `vendor::blog::BlogBundle`). All of them normalize to the same key so the
//! aggregator's maps are insensitive to the caller's choice.

/// Normalize an extension name to its canonical lookup key.
///
/// Lowercases the input, strips trailing `bundle` suffixes and, if the
/// result is still a qualified path, keeps only the last segment. The
/// function is idempotent.
///
/// ```
/// use bundle_registry::normalize_name;
///
/// assert_eq!(normalize_name("FooBundle"), "foo");
/// assert_eq!(normalize_name(r"Vendor\Foo\BarBundle"), "bar");
/// assert_eq!(normalize_name("vendor::foo::BarBundle"), "bar");
/// ```
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut stripped = lowered.as_str();
    // doubled suffixes strip fully, keeping normalization idempotent
    while let Some(rest) = stripped.strip_suffix("bundle") {
        stripped = rest;
    }
    let tail = stripped.rsplit('\\').next().unwrap_or(stripped);
    let tail = tail.rsplit("::").next().unwrap_or(tail);
    tail.to_string()
}

/// Normalize a compound object key such as `Blog/Post` or `blog:post`.
///
/// Lowercases and folds the accepted separators (`::`, `\`, `:`) to `/`.
pub fn normalize_object_key(key: &str) -> String {
    key.to_lowercase().replace("::", "/").replace(['\\', ':'], "/")
}
