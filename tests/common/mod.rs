//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use listforge::builder::ComponentsController;
use listforge::component::{Expandable, Size, Text, ToggleAction};
use listforge::pipeline::{ControllerConfig, ListController};
use listforge::state::{ExpandableState, State};
use listforge::view_model::{StateSource, ViewModel};

pub const HEADER: &str = "header";

/// One expandable header over a list of strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    pub expandable: HashMap<String, bool>,
    pub strings: Vec<String>,
    pub counter: i64,
}

impl State for ListState {}

impl ExpandableState for ListState {
    fn expandable(&self) -> &HashMap<String, bool> {
        &self.expandable
    }

    fn expandable_mut(&mut self) -> &mut HashMap<String, bool> {
        &mut self.expandable
    }
}

impl ListState {
    pub fn with_strings(k: usize) -> Self {
        Self {
            strings: (0..k).map(|n| format!("row {n}")).collect(),
            ..Self::default()
        }
    }
}

/// The header, followed by one text row per string while it is expanded.
pub fn build_list(state: &ListState, toggle: &ToggleAction, out: &mut ComponentsController) {
    let open = state.is_expanded(HEADER);
    out.add(
        Expandable::new(HEADER, "Header")
            .expanded(open)
            .on_toggle(toggle.clone()),
    );
    if open {
        out.add_all(
            state
                .strings
                .iter()
                .enumerate()
                .map(|(n, s)| Text::new(format!("{HEADER}.{n}"), s.as_str())),
        );
    }
}

/// A list controller observing `view_model`.
pub fn list_controller(
    view_model: &Arc<ViewModel<ListState>>,
    config: ControllerConfig,
) -> ListController {
    let toggle = view_model.expandable_toggle();
    let reader = Arc::clone(view_model);
    let mut controller = ListController::new(config, move |out: &mut ComponentsController| {
        build_list(&reader.current_state(), &toggle, out);
    });
    let source: Arc<dyn StateSource> = view_model.clone();
    controller.observe(source);
    controller
}

pub fn viewport() -> Size {
    Size::new(40.0, 20.0)
}

/// Lets every spawned task run until the runtime is idle. Under a paused
/// clock this advances time by one millisecond.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
