//! Configuration access port trait.
//!
//! Section and key lookups are case-insensitive.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    /// All keys of a section, sorted; empty when the section is absent.
    fn get_keys(&self, section: &str) -> Vec<String>;
}
