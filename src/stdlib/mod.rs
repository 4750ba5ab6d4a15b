//! Bundled standard-library modules, embedded into the binary at compile
//! time and addressable by bare name at `include` sites.

use include_dir::{include_dir, Dir};

static STDLIB_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/stdlib/ax");

/// Looks up a bundled stdlib module's source by bare name (no `.ax`, no
/// path separators). Returns `None` if no such resource is bundled.
pub fn lookup(name: &str) -> Option<&'static str> {
    STDLIB_DIR
        .get_file(format!("{}.ax", name))
        .and_then(|f| f.contents_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_bundled_math_module() {
        assert!(lookup("math").is_some());
    }

    #[test]
    fn missing_module_is_none() {
        assert!(lookup("nonexistent").is_none());
    }
}
