use std::collections::HashMap;

use super::State;

/// State that records which expandable components are open.
///
/// Keys are component ids. A missing key means collapsed.
pub trait ExpandableState: State {
    fn expandable(&self) -> &HashMap<String, bool>;

    fn expandable_mut(&mut self) -> &mut HashMap<String, bool>;

    fn is_expanded(&self, id: &str) -> bool {
        self.expandable().get(id).copied().unwrap_or(false)
    }
}
