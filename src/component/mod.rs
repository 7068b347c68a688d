//! Immutable row descriptors.
//!
//! A [`Component`] is one of a closed set of kinds. Every kind carries a
//! stable [`ComponentId`] that decides correspondence across rebuilds, and a
//! hand-written equality over its data fields that decides whether a matched
//! row changed.

mod behavior;
mod geometry;
mod kinds;

pub use behavior::{Behavior, StyleAction, TapAction, ToggleAction};
pub use geometry::{Alignment, Color, Font, FontWeight, Insets, Point, Rect, Size};
pub use kinds::{Button, ButtonKind, Expandable, Spacer, Text};

use std::fmt;
use std::sync::Arc;

use crate::layout::LayoutSpec;

/// Stable identity of a component within one ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(Arc<str>);

impl ComponentId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<&ComponentId> for ComponentId {
    fn from(id: &ComponentId) -> Self {
        id.clone()
    }
}

/// Which cell wrapper renders a component. Renderers register every type
/// before the first changeset arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellType(&'static str);

impl CellType {
    pub const BUTTON: CellType = CellType("button");
    pub const TEXT: CellType = CellType("text");
    pub const SPACER: CellType = CellType("spacer");
    pub const EXPANDABLE: CellType = CellType("expandable");

    pub const ALL: [CellType; 4] = [
        CellType::BUTTON,
        CellType::TEXT,
        CellType::SPACER,
        CellType::EXPANDABLE,
    ];

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Component {
    Button(Button),
    Text(Text),
    Spacer(Spacer),
    Expandable(Expandable),
}

impl Component {
    pub fn id(&self) -> &ComponentId {
        match self {
            Component::Button(c) => &c.id,
            Component::Text(c) => &c.id,
            Component::Spacer(c) => &c.id,
            Component::Expandable(c) => &c.id,
        }
    }

    pub fn cell_type(&self) -> CellType {
        match self {
            Component::Button(_) => CellType::BUTTON,
            Component::Text(_) => CellType::TEXT,
            Component::Spacer(_) => CellType::SPACER,
            Component::Expandable(_) => CellType::EXPANDABLE,
        }
    }

    /// What the layout engine needs to size this component.
    pub fn layout(&self) -> LayoutSpec {
        match self {
            Component::Button(c) => LayoutSpec::Label {
                text: c.title.clone(),
                font: Font::BODY,
                insets: c.insets,
                line_padding: 0.0,
                min_height: c.height,
                trailing_reserve: 0.0,
            },
            Component::Text(c) => LayoutSpec::Label {
                text: c.text.clone(),
                font: c.font,
                insets: c.insets,
                line_padding: c.line_padding,
                min_height: 0.0,
                trailing_reserve: 0.0,
            },
            Component::Spacer(c) => LayoutSpec::Fixed { height: c.height },
            Component::Expandable(c) => LayoutSpec::Label {
                text: c.text.clone(),
                font: c.font,
                insets: c.insets,
                line_padding: 0.0,
                min_height: c.height.max(c.chevron_size.height),
                trailing_reserve: c.chevron_size.width,
            },
        }
    }

    pub fn style(&self) -> Option<&StyleAction> {
        match self {
            Component::Button(c) => c.style.as_ref(),
            Component::Text(c) => c.style.as_ref(),
            Component::Spacer(_) => None,
            Component::Expandable(c) => c.style.as_ref(),
        }
    }

    pub fn is_selectable(&self) -> bool {
        match self {
            Component::Button(c) => c.on_tap.is_some(),
            Component::Expandable(c) => c.on_toggle.is_some(),
            Component::Text(_) | Component::Spacer(_) => false,
        }
    }

    /// Runs the component's selection behavior. Returns false when it has none.
    pub fn select(&self) -> bool {
        match self {
            Component::Button(Button {
                on_tap: Some(action),
                ..
            }) => {
                action.call();
                true
            }
            Component::Expandable(Expandable {
                id,
                expanded,
                on_toggle: Some(action),
                ..
            }) => {
                action.call(id, !expanded);
                true
            }
            _ => false,
        }
    }
}

impl From<Button> for Component {
    fn from(c: Button) -> Self {
        Component::Button(c)
    }
}

impl From<Text> for Component {
    fn from(c: Text) -> Self {
        Component::Text(c)
    }
}

impl From<Spacer> for Component {
    fn from(c: Spacer) -> Self {
        Component::Spacer(c)
    }
}

impl From<Expandable> for Component {
    fn from(c: Expandable) -> Self {
        Component::Expandable(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn hash_of(component: &Component) -> u64 {
        let mut hasher = DefaultHasher::new();
        component.hash(&mut hasher);
        hasher.finish()
    }

    fn assert_same(a: impl Into<Component>, b: impl Into<Component>) {
        let (a, b) = (a.into(), b.into());
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn button_ignores_decoration_and_behavior() {
        let base = Button::new("save", "Save");
        let decorated = Button::new("save", "Save")
            .insets(Insets::uniform(4.0))
            .alignment(Alignment::Trailing)
            .style(|node| node.attributes.push("underline".into()))
            .on_tap(|| {});
        assert_same(base, decorated);
    }

    #[test]
    fn button_compares_data_fields() {
        let base = Button::new("save", "Save");
        assert_ne!(Component::from(base.clone()), Button::new("save", "Store").into());
        assert_ne!(
            Component::from(base.clone()),
            base.clone().kind(ButtonKind::Link).into()
        );
        assert_ne!(Component::from(base.clone()), base.clone().height(2.0).into());
        assert_ne!(
            Component::from(base.clone()),
            base.background(Color::WHITE).into()
        );
    }

    #[test]
    fn text_ignores_insets_alignment_and_style() {
        let base = Text::new("intro", "hello");
        let decorated = Text::new("intro", "hello")
            .insets(Insets::uniform(1.0))
            .alignment(Alignment::Center)
            .style(|_| {});
        assert_same(base.clone(), decorated);
        assert_ne!(Component::from(base.clone()), base.clone().line_padding(0.5).into());
        assert_ne!(Component::from(base.clone()), base.font(Font::HEADLINE).into());
    }

    #[test]
    fn spacer_compares_height_and_background() {
        assert_same(Spacer::new("gap", 1.0), Spacer::new("gap", 1.0));
        assert_ne!(
            Component::from(Spacer::new("gap", 1.0)),
            Spacer::new("gap", 2.0).into()
        );
        assert_ne!(
            Component::from(Spacer::new("gap", 1.0)),
            Spacer::new("gap", 1.0).background(Color::BLACK).into()
        );
    }

    #[test]
    fn expandable_ignores_expanded_flag_and_toggle() {
        let base = Expandable::new("group", "Group");
        let with_toggle = Expandable::new("group", "Group").on_toggle(ToggleAction::new(|_, _| {}));
        assert_same(base.clone(), with_toggle);
        assert_same(base.clone(), base.clone().expanded(true));
        assert_ne!(
            Component::from(base.clone()),
            Component::from(base.clone().chevron_size(Size::new(3.0, 1.0)))
        );
    }

    #[test]
    fn expandable_compares_insets() {
        let base = Expandable::new("group", "Group");
        assert_ne!(
            Component::from(base.clone()),
            Component::from(base.clone().insets(Insets::uniform(2.0)))
        );
        assert_same(
            base.clone().insets(Insets::uniform(2.0)),
            base.insets(Insets::uniform(2.0)),
        );
    }

    #[test]
    fn different_kinds_with_same_id_differ() {
        assert_ne!(
            Component::from(Text::new("row", "x")),
            Button::new("row", "x").into()
        );
    }

    #[test]
    fn select_runs_tap_action() {
        let taps = std::sync::Arc::new(AtomicUsize::new(0));
        let counter = std::sync::Arc::clone(&taps);
        let button: Component = Button::new("go", "Go")
            .on_tap(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .into();
        assert!(button.is_selectable());
        assert!(button.select());
        assert_eq!(taps.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn select_toggles_expandable_to_opposite_state() {
        let requests = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&requests);
        let header: Component = Expandable::new("group", "Group")
            .expanded(true)
            .on_toggle(ToggleAction::new(move |id, expanded| {
                sink.lock().push((id.to_string(), expanded));
            }))
            .into();
        assert!(header.select());
        assert_eq!(*requests.lock(), vec![("group".to_string(), false)]);
    }

    #[test]
    fn plain_rows_are_not_selectable() {
        let text: Component = Text::new("t", "x").into();
        assert!(!text.is_selectable());
        assert!(!text.select());
        assert!(!Component::from(Button::new("b", "B")).select());
    }

    #[test]
    fn cell_types_follow_kind() {
        assert_eq!(Component::from(Spacer::new("s", 1.0)).cell_type(), CellType::SPACER);
        assert_eq!(CellType::EXPANDABLE.name(), "expandable");
        assert_eq!(ComponentId::from(String::from("a")).as_str(), "a");
    }
}
