//! Render configuration.

use serde::Deserialize;

/// Rendering configuration shared by both backends.
///
/// The fragment-stream backend derives its indent unit from `tab_width`
/// (and `use_tabs`); the layout-document backend additionally honors
/// `print_width` when delegating soft-wrap decisions to the document
/// printer.
///
/// Deserializes from TOML/JSON with every field optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Target line width for the layout-document backend.
    print_width: usize,

    /// Number of spaces per indentation level.
    tab_width: usize,

    /// Indent with tab characters instead of spaces.
    use_tabs: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            print_width: 80,
            tab_width: 2,
            use_tabs: false,
        }
    }
}

impl RenderConfig {
    /// Get the target line width for the layout-document backend.
    pub fn print_width(&self) -> usize {
        self.print_width
    }

    /// Get the number of spaces per indentation level.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Whether indentation uses tab characters instead of spaces.
    pub fn use_tabs(&self) -> bool {
        self.use_tabs
    }

    /// Set the target line width.
    pub fn with_print_width(mut self, print_width: usize) -> Self {
        self.print_width = print_width;
        self
    }

    /// Set the number of spaces per indentation level.
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Choose tab characters or spaces for indentation.
    pub fn with_use_tabs(mut self, use_tabs: bool) -> Self {
        self.use_tabs = use_tabs;
        self
    }

    /// The indent unit the fragment-stream backend repeats per nesting
    /// level.
    pub fn indent_unit(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.tab_width)
        }
    }
}
