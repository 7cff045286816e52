//! Select menu configuration.

use termdom::Color;

/// Behaviour shared by every container and item a registry connects.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectMenuConfig {
    /// Label shown while the container has no (or an empty) `title`.
    pub placeholder: String,

    /// Class that marks the list region and icon as open.
    pub active_class: String,

    /// Close an open menu when a click lands outside it.
    pub close_on_outside_click: bool,

    /// Colours used by the rendered markup.
    pub theme: SelectMenuTheme,
}

impl Default for SelectMenuConfig {
    fn default() -> Self {
        Self {
            placeholder: "Title".to_string(),
            active_class: "active".to_string(),
            close_on_outside_click: true,
            theme: SelectMenuTheme::default(),
        }
    }
}

impl SelectMenuConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder label.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the class used as the open marker.
    pub fn active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }

    /// Keep menus open when the user clicks elsewhere.
    pub fn keep_open_on_outside_click(mut self) -> Self {
        self.close_on_outside_click = false;
        self
    }

    pub fn theme(mut self, theme: SelectMenuTheme) -> Self {
        self.theme = theme;
        self
    }
}

/// Colours of the toggle, icon well, list and rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectMenuTheme {
    /// Toggle background, also the chevron and active row highlight.
    pub accent: Color,
    pub toggle_foreground: Color,
    pub icon_background: Color,
    pub list_background: Color,
    pub list_foreground: Color,
    /// Shown between rows.
    pub separator: Color,
}

impl Default for SelectMenuTheme {
    fn default() -> Self {
        Self {
            accent: Color::hex(0x27ae60),
            toggle_foreground: Color::hex(0xf1f5f9),
            icon_background: Color::hex(0x1e272e),
            list_background: Color::hex(0x2c3e50),
            list_foreground: Color::hex(0xe2e8f0),
            separator: Color::hex(0x34495e),
        }
    }
}
