// ABOUTME: Version and CLI help text constants

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const ABOUT: &str = "A tree-walking interpreter for the Axion scripting language";
