//! Example screen: two expandable groups, a row of optional buttons, spacers
//! and text.

use std::collections::HashMap;
use std::sync::Arc;

use crate::builder::ComponentsController;
use crate::component::{
    Button, ButtonKind, Color, Expandable, Font, FontWeight, Insets, Spacer, Text, ToggleAction,
};
use crate::pipeline::{ControllerConfig, ListController};
use crate::state::{ExpandableState, Intent, Reducer, State};
use crate::view_model::{StateSource, ViewModel};

pub const FIRST_GROUP: &str = "group.first";
pub const SECOND_GROUP: &str = "group.second";

#[derive(Debug, Clone, PartialEq)]
pub struct ExampleState {
    pub expandable: HashMap<String, bool>,
    pub strings: Vec<String>,
    pub other_strings: Vec<String>,
    pub show_buttons: bool,
}

impl Default for ExampleState {
    fn default() -> Self {
        Self {
            expandable: HashMap::new(),
            strings: vec![
                "Bacon ipsum dolor amet".to_string(),
                "Short ribs pork belly".to_string(),
                "Tri-tip brisket".to_string(),
            ],
            other_strings: vec![
                "Spare ribs".to_string(),
                "Pastrami".to_string(),
            ],
            show_buttons: false,
        }
    }
}

impl State for ExampleState {}

impl ExpandableState for ExampleState {
    fn expandable(&self) -> &HashMap<String, bool> {
        &self.expandable
    }

    fn expandable_mut(&mut self) -> &mut HashMap<String, bool> {
        &mut self.expandable
    }
}

#[derive(Debug, Clone)]
pub enum ExampleIntent {
    ToggleButtons,
    AppendString(String),
}

impl Intent for ExampleIntent {}

pub struct ExampleReducer;

impl Reducer for ExampleReducer {
    type State = ExampleState;
    type Intent = ExampleIntent;

    fn reduce(mut state: ExampleState, intent: ExampleIntent) -> ExampleState {
        match intent {
            ExampleIntent::ToggleButtons => state.show_buttons = !state.show_buttons,
            ExampleIntent::AppendString(text) => state.strings.push(text),
        }
        state
    }
}

/// Builds the screen for `state`.
pub fn build_screen(state: &ExampleState, toggle: &ToggleAction, out: &mut ComponentsController) {
    let insets = Insets::uniform(1.0);
    let body = Font {
        size: 17,
        weight: FontWeight::Regular,
    };

    out.add(
        Text::new("intro", "Bacon")
            .font(body)
            .background(Color::rgba(128, 128, 128, 255))
            .insets(insets),
    );

    let first_open = state.is_expanded(FIRST_GROUP);
    out.add(
        Expandable::new(FIRST_GROUP, "This is Expandable")
            .insets(insets)
            .expanded(first_open)
            .on_toggle(toggle.clone()),
    );
    if first_open {
        out.add_all(state.strings.iter().enumerate().map(|(n, s)| {
            Text::new(format!("{FIRST_GROUP}.{n}"), s.as_str())
                .font(body)
                .insets(insets)
        }));
    }

    out.add(Spacer::new("spacer.middle", 2.0).background(Color::rgba(211, 211, 211, 255)));

    let second_open = state.is_expanded(SECOND_GROUP);
    out.add(
        Expandable::new(SECOND_GROUP, "This is also Expandable")
            .insets(insets)
            .expanded(second_open)
            .on_toggle(toggle.clone()),
    );
    if second_open {
        out.add_all(state.other_strings.iter().enumerate().map(|(n, s)| {
            Text::new(format!("{SECOND_GROUP}.{n}"), s.as_str())
                .font(body)
                .insets(insets)
        }));
    }

    if state.show_buttons {
        out.add(
            Button::new("button.first", "First")
                .height(3.0)
                .background(Color::rgba(255, 0, 0, 255))
                .on_tap(|| tracing::info!(button = "first", "tapped")),
        );
        out.add(
            Button::new("button.second", "Second")
                .kind(ButtonKind::Secondary)
                .height(3.0)
                .background(Color::rgba(255, 165, 0, 255))
                .on_tap(|| tracing::info!(button = "second", "tapped")),
        );
    }
}

/// A flat-list controller for the example screen, observing `view_model`.
pub fn example_controller(
    view_model: &Arc<ViewModel<ExampleState>>,
    config: ControllerConfig,
) -> ListController {
    let toggle = view_model.expandable_toggle();
    let reader = Arc::clone(view_model);
    let mut controller = ListController::new(config, move |out: &mut ComponentsController| {
        build_screen(&reader.current_state(), &toggle, out);
    });
    let source: Arc<dyn StateSource> = view_model.clone();
    controller.observe(source);
    controller
}
