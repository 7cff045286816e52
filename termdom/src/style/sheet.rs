use super::Style;
use crate::error::Result;
use crate::selector::Selector;

/// A selector paired with the properties it declares.
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selector: Selector,
    pub style: Style,
}

/// Ordered list of rules scoped to one tree (the document or a shadow root).
///
/// There is no specificity: when several rules match, later rules win.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule, builder style.
    pub fn rule(mut self, selector: &str, style: Style) -> Result<Self> {
        self.push(selector, style)?;
        Ok(self)
    }

    pub fn push(&mut self, selector: &str, style: Style) -> Result<()> {
        let selector = Selector::parse(selector)?;
        self.rules.push(StyleRule { selector, style });
        Ok(())
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
