use super::{Document, NodeId};
use crate::error::Result;
use crate::selector::Selector;

impl Document {
    /// Whether `element` matches `selector`.
    pub fn matches(&self, element: NodeId, selector: &str) -> Result<bool> {
        Ok(Selector::parse(selector)?.matches(self, element))
    }

    /// First matching light-tree descendant of `scope`, in tree order.
    ///
    /// `scope` is usually the document, an element, or a shadow root. The
    /// search never enters shadow trees below `scope`.
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.descendants(scope).find(|id| selector.matches(self, *id)))
    }

    /// Every matching light-tree descendant of `scope`, in tree order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .filter(|id| selector.matches(self, *id))
            .collect())
    }

    /// Nearest inclusive ancestor element of `element` matching `selector`,
    /// staying inside the element's tree scope.
    pub fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        let mut current = self.is_element(element).then_some(element);
        while let Some(id) = current {
            if selector.matches(self, id) {
                return Ok(Some(id));
            }
            current = self.parent_element(id);
        }
        Ok(None)
    }

    /// Light-tree descendants of `scope` (exclusive) in pre-order.
    pub fn descendants(&self, scope: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children(next).iter().rev());
            Some(next)
        })
    }
}
