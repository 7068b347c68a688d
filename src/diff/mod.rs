//! Identity-keyed diffing of ordered component sequences.
//!
//! Ids decide which elements correspond across two sequences; equality
//! decides whether a corresponding element changed. Elements only in the new
//! sequence are inserts, elements only in the old one are deletes, and matched
//! elements outside the longest run that kept its relative order are moves.
//! Every changeset is minimal in moves for that reason.

mod lis;

use std::collections::HashMap;

use crate::builder::Section;
use crate::component::{Component, ComponentId};
use crate::contract;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Update {
    pub old: usize,
    pub new: usize,
}

/// Minimal operations that turn one sequence into another.
///
/// `deletes` and `moves[].from`/`updates[].old` index the old sequence;
/// `inserts` and `moves[].to`/`updates[].new` index the new one. Index lists
/// are ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Changeset {
    pub deletes: Vec<usize>,
    pub inserts: Vec<usize>,
    pub moves: Vec<Move>,
    pub updates: Vec<Update>,
}

impl Changeset {
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty()
            && self.inserts.is_empty()
            && self.moves.is_empty()
            && self.updates.is_empty()
    }

    /// Total number of operations.
    pub fn len(&self) -> usize {
        self.deletes.len() + self.inserts.len() + self.moves.len() + self.updates.len()
    }

    /// Length of the sequence this changeset produces from one of `old_len`.
    pub fn new_len(&self, old_len: usize) -> usize {
        old_len - self.deletes.len() + self.inserts.len()
    }

    /// Rebuilds the new sequence from the old one.
    ///
    /// Elements that were kept or moved are reused. `fill` produces the
    /// element for every inserted or updated new index.
    pub fn apply<T, F>(&self, old: Vec<T>, mut fill: F) -> Vec<T>
    where
        F: FnMut(usize) -> T,
    {
        let new_len = self.new_len(old.len());
        let mut old: Vec<Option<T>> = old.into_iter().map(Some).collect();
        let mut slots: Vec<Option<T>> = (0..new_len).map(|_| None).collect();

        for &index in &self.deletes {
            old[index] = None;
        }
        for &Move { from, to } in &self.moves {
            slots[to] = old[from].take();
        }
        for &index in &self.inserts {
            slots[index] = Some(fill(index));
        }

        let mut kept = old.into_iter().flatten();
        for slot in slots.iter_mut().filter(|slot| slot.is_none()) {
            *slot = kept.next();
        }

        for &Update { new, .. } in &self.updates {
            slots[new] = Some(fill(new));
        }
        slots.into_iter().flatten().collect()
    }
}

/// Diffs two sequences by `key`, treating matched elements as updated when
/// `same` returns false.
pub fn diff_by<T, K, E>(old: &[T], new: &[T], key: K, same: E) -> Changeset
where
    K: Fn(usize, &T) -> ComponentId,
    E: Fn(&T, &T) -> bool,
{
    let old_keys: Vec<ComponentId> = old.iter().enumerate().map(|(i, t)| key(i, t)).collect();
    let new_keys: Vec<ComponentId> = new.iter().enumerate().map(|(i, t)| key(i, t)).collect();
    let old_index = index_by_key(&old_keys);
    let new_index = index_by_key(&new_keys);

    let mut changes = Changeset::default();

    for (i, k) in old_keys.iter().enumerate() {
        if old_index.get(k) != Some(&i) || !new_index.contains_key(k) {
            changes.deletes.push(i);
        }
    }

    // (old, new) pairs in new order.
    let mut matched = Vec::new();
    for (j, k) in new_keys.iter().enumerate() {
        match old_index.get(k) {
            Some(&i) if new_index.get(k) == Some(&j) => matched.push((i, j)),
            _ => changes.inserts.push(j),
        }
    }

    let olds: Vec<usize> = matched.iter().map(|&(i, _)| i).collect();
    let stable = lis::longest_increasing(&olds);
    for (position, &(i, j)) in matched.iter().enumerate() {
        if !stable[position] {
            changes.moves.push(Move { from: i, to: j });
        }
        if !same(&old[i], &new[j]) {
            changes.updates.push(Update { old: i, new: j });
        }
    }
    changes
}

fn index_by_key(keys: &[ComponentId]) -> HashMap<&ComponentId, usize> {
    let mut index = HashMap::with_capacity(keys.len());
    for (i, k) in keys.iter().enumerate() {
        if index.contains_key(k) {
            contract::duplicate_id(k);
            continue;
        }
        index.insert(k, i);
    }
    index
}

/// Diffs flat component lists.
pub fn diff(old: &[Component], new: &[Component]) -> Changeset {
    diff_by(old, new, |_, c| c.id().clone(), |a, b| a == b)
}

/// Item-level changes inside one section present in both sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionItems {
    pub old_section: usize,
    pub new_section: usize,
    pub changes: Changeset,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionedChangeset {
    /// Section-level operations. A section is updated when its header changed.
    pub sections: Changeset,
    /// Non-empty item changes for sections present on both sides.
    pub items: Vec<SectionItems>,
}

impl SectionedChangeset {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len() + self.items.iter().map(|s| s.changes.len()).sum::<usize>()
    }
}

/// Sections are keyed by header id; headerless sections by position.
pub fn section_key(index: usize, section: &Section) -> ComponentId {
    match &section.header {
        Some(header) => header.id().clone(),
        None => ComponentId::new(format!("section#{index}")),
    }
}

pub fn diff_sections(old: &[Section], new: &[Section]) -> SectionedChangeset {
    let sections = diff_by(old, new, section_key, |a, b| a.header == b.header);

    let old_keys: HashMap<ComponentId, usize> = old
        .iter()
        .enumerate()
        .map(|(i, s)| (section_key(i, s), i))
        .collect();

    let mut items = Vec::new();
    for (j, section) in new.iter().enumerate() {
        let Some(&i) = old_keys.get(&section_key(j, section)) else {
            continue;
        };
        if sections.inserts.contains(&j) {
            continue;
        }
        let changes = diff(&old[i].components, &section.components);
        if !changes.is_empty() {
            items.push(SectionItems {
                old_section: i,
                new_section: j,
                changes,
            });
        }
    }

    SectionedChangeset { sections, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Expandable, Spacer, Text};

    fn text(id: &str, body: &str) -> Component {
        Text::new(id, body).into()
    }

    fn ids(components: &[Component]) -> Vec<String> {
        components.iter().map(|c| c.id().to_string()).collect()
    }

    #[test]
    fn identical_sequences_produce_nothing() {
        let list = vec![text("a", "A"), text("b", "B")];
        assert!(diff(&list, &list).is_empty());
    }

    #[test]
    fn swap_is_one_move() {
        let old = vec![text("a", "A"), text("b", "B"), text("c", "C")];
        let new = vec![text("a", "A"), text("c", "C"), text("b", "B")];
        let changes = diff(&old, &new);
        assert_eq!(changes.moves.len(), 1);
        assert!(changes.updates.is_empty());
        assert!(changes.inserts.is_empty());
        assert!(changes.deletes.is_empty());
    }

    #[test]
    fn append_is_one_insert() {
        let old = vec![text("a", "A"), text("b", "B")];
        let new = vec![text("a", "A"), text("b", "B"), text("d", "D")];
        let changes = diff(&old, &new);
        assert_eq!(changes.inserts, vec![2]);
        assert!(changes.deletes.is_empty());
        assert!(changes.updates.is_empty());
        assert!(changes.moves.is_empty());
    }

    #[test]
    fn same_id_different_content_is_update() {
        let old = vec![text("a", "A"), text("b", "B")];
        let new = vec![text("a", "A"), text("b", "changed")];
        let changes = diff(&old, &new);
        assert_eq!(changes.updates, vec![Update { old: 1, new: 1 }]);
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn style_only_change_is_not_an_update() {
        let old: Vec<Component> = vec![Text::new("a", "A").into()];
        let new: Vec<Component> = vec![Text::new("a", "A").style(|_| {}).into()];
        assert!(diff(&old, &new).is_empty());
    }

    #[test]
    fn removal_shifts_without_moves() {
        let old = vec![text("a", "A"), text("b", "B"), text("c", "C")];
        let new = vec![text("a", "A"), text("c", "C")];
        let changes = diff(&old, &new);
        assert_eq!(changes.deletes, vec![1]);
        assert!(changes.moves.is_empty());
    }

    #[test]
    fn apply_rebuilds_new_order_and_reuses_kept_rows() {
        let old = vec![text("a", "A"), text("b", "B"), text("c", "C"), text("d", "D")];
        let new = vec![text("c", "C"), text("e", "E"), text("a", "A2"), text("d", "D")];
        let changes = diff(&old, &new);

        let rebuilt = changes.apply(old.clone(), |j| new[j].clone());
        assert_eq!(rebuilt, new);
        assert_eq!(ids(&rebuilt), vec!["c", "e", "a", "d"]);
    }

    #[test]
    #[should_panic(expected = "appears more than once")]
    fn duplicate_ids_are_fatal_in_debug_builds() {
        let list = vec![text("a", "A"), Spacer::new("a", 1.0).into()];
        let _ = diff(&[], &list);
    }

    #[test]
    fn sections_match_by_header_and_diff_items() {
        let old = vec![Section {
            header: Some(Expandable::new("g", "Group").into()),
            components: vec![],
        }];
        let new = vec![
            Section {
                header: Some(Expandable::new("g", "Group").into()),
                components: vec![text("g.1", "one")],
            },
            Section {
                header: None,
                components: vec![text("x", "x")],
            },
        ];
        let changes = diff_sections(&old, &new);
        assert_eq!(changes.sections.inserts, vec![1]);
        assert!(changes.sections.updates.is_empty());
        assert_eq!(changes.items.len(), 1);
        assert_eq!(changes.items[0].changes.inserts, vec![0]);
        assert_eq!(changes.len(), 2);
        assert!(diff_sections(&new, &new).is_empty());
    }

    #[test]
    fn changed_header_updates_the_section() {
        let old = vec![Section {
            header: Some(Expandable::new("g", "Group").into()),
            components: vec![],
        }];
        let new = vec![Section {
            header: Some(Expandable::new("g", "Groups").into()),
            components: vec![],
        }];
        let changes = diff_sections(&old, &new);
        assert_eq!(changes.sections.updates, vec![Update { old: 0, new: 0 }]);
    }
}
