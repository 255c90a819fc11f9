use indexmap::IndexMap;

use crate::core::error::{LauncherError, LauncherResult};

/// Ordered multi-map of launch script parameters.
///
/// Every `put` appends, so repeatable keys such as `cp` or `traits` keep the
/// order in which the parent process sent them.
#[derive(Debug, Clone, Default)]
pub struct ParamBucket {
    params: IndexMap<String, Vec<String>>,
}

impl ParamBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    /// First value recorded for `key`.
    pub fn first(&self, key: &str) -> LauncherResult<&str> {
        self.params
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
            .ok_or_else(|| LauncherError::MissingParameter(key.to_string()))
    }

    pub fn first_or(&self, key: &str, default: &str) -> String {
        self.first(key).unwrap_or(default).to_string()
    }

    /// Every value recorded for `key`, in insertion order.
    pub fn all(&self, key: &str) -> LauncherResult<&[String]> {
        self.params
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| LauncherError::MissingParameter(key.to_string()))
    }

    pub fn all_or(&self, key: &str, default: Vec<String>) -> Vec<String> {
        match self.all(key) {
            Ok(values) => values.to_vec(),
            Err(_) => default,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_preserves_insertion_order() {
        let mut bucket = ParamBucket::new();
        bucket.put("cp", "a.jar");
        bucket.put("cp", "b.jar");
        bucket.put("cp", "a.jar");

        assert_eq!(bucket.all("cp").unwrap(), ["a.jar", "b.jar", "a.jar"]);
        assert_eq!(bucket.first("cp").unwrap(), "a.jar");
    }

    #[test]
    fn unset_keys_fail_with_missing_parameter() {
        let bucket = ParamBucket::new();

        assert!(matches!(
            bucket.first("natives"),
            Err(LauncherError::MissingParameter(key)) if key == "natives"
        ));
        assert!(matches!(
            bucket.all("cp"),
            Err(LauncherError::MissingParameter(key)) if key == "cp"
        ));
    }

    #[test]
    fn defaults_never_fail() {
        let mut bucket = ParamBucket::new();
        bucket.put("windowTitle", "Custom");

        assert_eq!(bucket.first_or("windowTitle", "Minecraft"), "Custom");
        assert_eq!(bucket.first_or("windowParams", "854x480"), "854x480");
        assert_eq!(
            bucket.all_or("traits", vec!["none".into()]),
            vec!["none".to_string()]
        );
        assert!(bucket.all_or("mods", Vec::new()).is_empty());
    }

    #[test]
    fn keys_iterate_in_first_insertion_order() {
        let mut bucket = ParamBucket::new();
        bucket.put("userName", "bob");
        bucket.put("cp", "a.jar");
        bucket.put("userName", "alice");

        assert_eq!(bucket.keys().collect::<Vec<_>>(), vec!["userName", "cp"]);
    }

    #[test]
    fn values_may_contain_spaces_and_be_empty() {
        let mut bucket = ParamBucket::new();
        bucket.put("windowTitle", "My Pack 1.7");
        bucket.put("param", "");

        assert_eq!(bucket.first("windowTitle").unwrap(), "My Pack 1.7");
        assert_eq!(bucket.first("param").unwrap(), "");
    }
}
