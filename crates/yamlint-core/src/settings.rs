use crate::lints::document_start::document_start::DocumentStartOptions;

/// Resolved configuration settings used within yamlint
#[derive(Debug, Default, Clone)]
pub struct Settings {
    pub linter: LinterSettings,
}

#[derive(Debug, Clone)]
pub struct LinterSettings {
    pub select: Option<Vec<String>>,
    pub ignore: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub default_exclude: Option<bool>,
    pub document_start: Option<DocumentStartOptions>,
}

impl Default for LinterSettings {
    /// [Default] handler for [LinterSettings]
    ///
    /// Uses `None` to indicate no rules specified, rather than empty vectors.
    fn default() -> Self {
        Self {
            select: None,
            ignore: None,
            exclude: None,
            default_exclude: None,
            document_start: None,
        }
    }
}
