/// Session-wide switches read while resolving mapper documents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Settings {
    /// Match constructor parameters by their declared names when no explicit
    /// name tag is present.
    pub use_actual_param_name: bool,

    /// Default fetch policy for nested selects without a `fetchType`.
    pub lazy_loading_enabled: bool,

    /// Active database dialect, used to pick between `databaseId` variants.
    pub database_id: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            use_actual_param_name: true,
            lazy_loading_enabled: false,
            database_id: None,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn deserialize_partial() {
        let settings: Settings =
            serde_json::from_str(r#"{ "databaseId": "mysql", "lazyLoadingEnabled": true }"#)
                .unwrap();

        assert_eq!(
            settings,
            Settings {
                use_actual_param_name: true,
                lazy_loading_enabled: true,
                database_id: Some("mysql".to_string()),
            }
        );
    }
}
