//! Accumulators handed to application builder callbacks.
//!
//! A fresh accumulator is created for every reconciliation pass and filled
//! from scratch; the result is diffed against the previous pass, never
//! patched in place.

use crate::component::{Component, Size};

/// Flat, ordered list of components.
#[derive(Debug)]
pub struct ComponentsController {
    size: Size,
    components: Vec<Component>,
}

impl ComponentsController {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            components: Vec::new(),
        }
    }

    /// Viewport size this pass is built for.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Appends one component. Call order is render order.
    pub fn add(&mut self, component: impl Into<Component>) -> &mut Self {
        self.components.push(component.into());
        self
    }

    pub fn add_all<I>(&mut self, components: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Component>,
    {
        self.components.extend(components.into_iter().map(Into::into));
        self
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn finish(self) -> Vec<Component> {
        self.components
    }
}

/// One section of a sectioned list: an optional header and its rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    pub header: Option<Component>,
    pub components: Vec<Component>,
}

/// Accumulator for one section.
#[derive(Debug)]
pub struct SectionController {
    size: Size,
    header: Option<Component>,
    components: Vec<Component>,
}

impl SectionController {
    fn new(size: Size) -> Self {
        Self {
            size,
            header: None,
            components: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn set_header(&mut self, header: impl Into<Component>) -> &mut Self {
        self.header = Some(header.into());
        self
    }

    pub fn add(&mut self, component: impl Into<Component>) -> &mut Self {
        self.components.push(component.into());
        self
    }

    pub fn add_all<I>(&mut self, components: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Component>,
    {
        self.components.extend(components.into_iter().map(Into::into));
        self
    }

    fn finish(self) -> Section {
        Section {
            header: self.header,
            components: self.components,
        }
    }
}

/// Ordered list of sections.
#[derive(Debug)]
pub struct MultiSectionController {
    size: Size,
    sections: Vec<SectionController>,
}

impl MultiSectionController {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            sections: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Appends a new section, lets `configure` fill it and returns it for
    /// further changes.
    pub fn section_controller<F>(&mut self, configure: F) -> &mut SectionController
    where
        F: FnOnce(&mut SectionController),
    {
        let index = self.sections.len();
        self.sections.push(SectionController::new(self.size));
        let section = &mut self.sections[index];
        configure(section);
        section
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn finish(self) -> Vec<Section> {
        self.sections
            .into_iter()
            .map(SectionController::finish)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Expandable, Spacer, Text};

    #[test]
    fn preserves_call_order() {
        let mut controller = ComponentsController::new(Size::new(40.0, 20.0));
        controller
            .add(Text::new("a", "A"))
            .add_all([Text::new("b", "B"), Text::new("c", "C")])
            .add(Spacer::new("gap", 1.0));

        assert_eq!(controller.width(), 40.0);
        let ids: Vec<_> = controller
            .finish()
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "gap"]);
    }

    #[test]
    fn sections_keep_headers_and_order() {
        let mut controller = MultiSectionController::new(Size::new(30.0, 10.0));
        controller.section_controller(|section| {
            section.set_header(Expandable::new("first", "First"));
            section.add(Text::new("first.1", "one"));
        });
        controller
            .section_controller(|section| {
                assert_eq!(section.width(), 30.0);
            })
            .add(Text::new("second.1", "two"))
            .add(Text::new("second.2", "three"));

        let sections = controller.finish();
        assert_eq!(sections.len(), 2);
        assert_eq!(
            sections[0].header.as_ref().map(|h| h.id().to_string()),
            Some("first".to_string())
        );
        assert!(sections[1].header.is_none());
        assert_eq!(sections[1].components.len(), 2);
    }
}
