//! Output shapes a controller can build: a flat list or a list of sections.

use std::fmt;

use crate::builder::{ComponentsController, MultiSectionController, Section};
use crate::component::{Component, Size};
use crate::diff::{self, Changeset, SectionedChangeset};

/// Position of a row. Flat lists only use section 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Row `item` of a flat list.
    pub fn item(item: usize) -> Self {
        Self { section: 0, item }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.item)
    }
}

/// Result of one builder pass.
pub trait Blueprint: Default + Send + Sync + 'static {
    /// Accumulator handed to the builder callback.
    type Builder: Send;
    type Changes: fmt::Debug + Send + Sync + 'static;

    fn builder(size: Size) -> Self::Builder;

    fn finish(builder: Self::Builder) -> Self;

    fn diff(old: &Self, new: &Self) -> Self::Changes;

    fn change_count(changes: &Self::Changes) -> usize;

    fn component_at(&self, path: IndexPath) -> Option<&Component>;

    fn component_count(&self) -> usize;
}

impl Blueprint for Vec<Component> {
    type Builder = ComponentsController;
    type Changes = Changeset;

    fn builder(size: Size) -> ComponentsController {
        ComponentsController::new(size)
    }

    fn finish(builder: ComponentsController) -> Self {
        builder.finish()
    }

    fn diff(old: &Self, new: &Self) -> Changeset {
        diff::diff(old, new)
    }

    fn change_count(changes: &Changeset) -> usize {
        changes.len()
    }

    fn component_at(&self, path: IndexPath) -> Option<&Component> {
        if path.section != 0 {
            return None;
        }
        self.get(path.item)
    }

    fn component_count(&self) -> usize {
        self.len()
    }
}

impl Blueprint for Vec<Section> {
    type Builder = MultiSectionController;
    type Changes = SectionedChangeset;

    fn builder(size: Size) -> MultiSectionController {
        MultiSectionController::new(size)
    }

    fn finish(builder: MultiSectionController) -> Self {
        builder.finish()
    }

    fn diff(old: &Self, new: &Self) -> SectionedChangeset {
        diff::diff_sections(old, new)
    }

    fn change_count(changes: &SectionedChangeset) -> usize {
        changes.len()
    }

    fn component_at(&self, path: IndexPath) -> Option<&Component> {
        self.get(path.section)?.components.get(path.item)
    }

    fn component_count(&self) -> usize {
        self.iter()
            .map(|s| s.components.len() + usize::from(s.header.is_some()))
            .sum()
    }
}
