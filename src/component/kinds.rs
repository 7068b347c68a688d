//! Concrete component kinds.
//!
//! Every kind implements `PartialEq` and `Hash` by hand over its data fields.
//! Layout decoration (insets, alignment), styling and behavior are left out:
//! changing them alone does not make a row "updated" in a diff. Expandable
//! headers are the exception for insets, since their chevron is placed inside
//! them.

use std::hash::{Hash, Hasher};

use super::behavior::{StyleAction, TapAction, ToggleAction};
use super::geometry::{hash_f64, same_f64, Alignment, Color, Font, Insets, Size};
use super::ComponentId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    #[default]
    Primary,
    Secondary,
    Link,
}

#[derive(Debug, Clone)]
pub struct Button {
    pub id: ComponentId,
    pub title: String,
    pub kind: ButtonKind,
    pub height: f64,
    pub background: Color,
    pub insets: Insets,
    pub alignment: Alignment,
    pub style: Option<StyleAction>,
    pub on_tap: Option<TapAction>,
}

impl Button {
    pub fn new(id: impl Into<ComponentId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: ButtonKind::default(),
            height: 1.0,
            background: Color::default(),
            insets: Insets::ZERO,
            alignment: Alignment::Center,
            style: None,
            on_tap: None,
        }
    }

    pub fn kind(mut self, kind: ButtonKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn style(
        mut self,
        style: impl Fn(&mut crate::layout::RenderNode) + Send + Sync + 'static,
    ) -> Self {
        self.style = Some(StyleAction::new(style));
        self
    }

    pub fn on_tap(mut self, action: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_tap = Some(TapAction::new(action));
        self
    }
}

impl PartialEq for Button {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.kind == other.kind
            && same_f64(self.height, other.height)
            && self.background == other.background
    }
}

impl Eq for Button {}

impl Hash for Button {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.title.hash(state);
        self.kind.hash(state);
        hash_f64(self.height, state);
        self.background.hash(state);
    }
}

#[derive(Debug, Clone)]
pub struct Text {
    pub id: ComponentId,
    pub text: String,
    pub font: Font,
    pub background: Color,
    /// Extra space between wrapped lines.
    pub line_padding: f64,
    pub insets: Insets,
    pub alignment: Alignment,
    pub style: Option<StyleAction>,
}

impl Text {
    pub fn new(id: impl Into<ComponentId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            font: Font::default(),
            background: Color::default(),
            line_padding: 0.0,
            insets: Insets::ZERO,
            alignment: Alignment::default(),
            style: None,
        }
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn line_padding(mut self, padding: f64) -> Self {
        self.line_padding = padding;
        self
    }

    pub fn insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn style(
        mut self,
        style: impl Fn(&mut crate::layout::RenderNode) + Send + Sync + 'static,
    ) -> Self {
        self.style = Some(StyleAction::new(style));
        self
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.text == other.text
            && self.font == other.font
            && self.background == other.background
            && same_f64(self.line_padding, other.line_padding)
    }
}

impl Eq for Text {}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.text.hash(state);
        self.font.hash(state);
        self.background.hash(state);
        hash_f64(self.line_padding, state);
    }
}

/// Fixed-height gap.
#[derive(Debug, Clone)]
pub struct Spacer {
    pub id: ComponentId,
    pub height: f64,
    pub background: Color,
}

impl Spacer {
    pub fn new(id: impl Into<ComponentId>, height: f64) -> Self {
        Self {
            id: id.into(),
            height,
            background: Color::default(),
        }
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

impl PartialEq for Spacer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && same_f64(self.height, other.height)
            && self.background == other.background
    }
}

impl Eq for Spacer {}

impl Hash for Spacer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        hash_f64(self.height, state);
        self.background.hash(state);
    }
}

/// Header row that shows and hides content below it.
///
/// The expanded flag lives in application state (see
/// [`ExpandableState`](crate::state::ExpandableState)); the component only
/// mirrors it and asks for the opposite value when selected. The flag is not
/// part of equality, so toggling a header never updates its row.
#[derive(Debug, Clone)]
pub struct Expandable {
    pub id: ComponentId,
    pub text: String,
    pub font: Font,
    pub height: f64,
    pub background: Color,
    pub chevron_size: Size,
    pub expanded: bool,
    pub insets: Insets,
    pub style: Option<StyleAction>,
    pub on_toggle: Option<ToggleAction>,
}

impl Expandable {
    pub fn new(id: impl Into<ComponentId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            font: Font::HEADLINE,
            height: 1.0,
            background: Color::default(),
            chevron_size: Size::new(2.0, 1.0),
            expanded: false,
            insets: Insets::ZERO,
            style: None,
            on_toggle: None,
        }
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn chevron_size(mut self, size: Size) -> Self {
        self.chevron_size = size;
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn style(
        mut self,
        style: impl Fn(&mut crate::layout::RenderNode) + Send + Sync + 'static,
    ) -> Self {
        self.style = Some(StyleAction::new(style));
        self
    }

    pub fn on_toggle(mut self, action: ToggleAction) -> Self {
        self.on_toggle = Some(action);
        self
    }
}

impl PartialEq for Expandable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.text == other.text
            && self.font == other.font
            && same_f64(self.height, other.height)
            && self.background == other.background
            && self.chevron_size == other.chevron_size
            && self.insets == other.insets
    }
}

impl Eq for Expandable {}

impl Hash for Expandable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.text.hash(state);
        self.font.hash(state);
        hash_f64(self.height, state);
        self.background.hash(state);
        self.chevron_size.hash(state);
        self.insets.hash(state);
    }
}
