use proptest::prelude::*;

use listforge::builder::Section;
use listforge::component::{Component, Expandable, Spacer, Text};
use listforge::diff::{diff, diff_sections, Move, Update};

fn text(id: &str, body: &str) -> Component {
    Text::new(id, body).into()
}

fn ids(list: &[Component]) -> Vec<String> {
    list.iter().map(|c| c.id().to_string()).collect()
}

/// Lists with unique ids in random order, each carrying one of a few bodies.
fn component_list() -> impl Strategy<Value = Vec<Component>> {
    prop::collection::btree_set(0u8..24, 0..12)
        .prop_flat_map(|ids| Just(ids.into_iter().collect::<Vec<_>>()).prop_shuffle())
        .prop_flat_map(|ids| {
            let n = ids.len();
            (Just(ids), prop::collection::vec(0u8..3, n))
        })
        .prop_map(|(ids, bodies)| {
            ids.into_iter()
                .zip(bodies)
                .map(|(id, body)| text(&format!("c{id}"), &format!("body {body}")))
                .collect()
        })
}

proptest! {
    #[test]
    fn self_diff_is_empty(list in component_list()) {
        prop_assert!(diff(&list, &list).is_empty());
    }

    #[test]
    fn applying_a_changeset_rebuilds_the_new_list(
        old in component_list(),
        new in component_list(),
    ) {
        let changes = diff(&old, &new);
        prop_assert_eq!(changes.new_len(old.len()), new.len());

        let rebuilt = changes.apply(old.clone(), |j| new[j].clone());
        prop_assert_eq!(ids(&rebuilt), ids(&new));
        prop_assert_eq!(rebuilt, new);
    }

    #[test]
    fn every_old_item_is_deleted_or_matched(
        old in component_list(),
        new in component_list(),
    ) {
        let changes = diff(&old, &new);
        let matched = new.len() - changes.inserts.len();
        prop_assert_eq!(old.len() - changes.deletes.len(), matched);
        prop_assert!(changes.moves.len() <= matched);
        prop_assert!(changes.updates.len() <= matched);
    }
}

#[test]
fn swapping_two_items_is_one_move() {
    let old = vec![text("a", "A"), text("b", "B"), text("c", "C")];
    let new = vec![text("a", "A"), text("c", "C"), text("b", "B")];

    let changes = diff(&old, &new);
    assert_eq!(changes.moves.len(), 1);
    assert!(changes.inserts.is_empty());
    assert!(changes.deletes.is_empty());
    assert!(changes.updates.is_empty());
    assert!(matches!(
        changes.moves[0],
        Move { from: 2, to: 1 } | Move { from: 1, to: 2 }
    ));
}

#[test]
fn appending_is_one_insert() {
    let old = vec![text("a", "A"), text("b", "B")];
    let new = vec![text("a", "A"), text("b", "B"), text("d", "D")];

    let changes = diff(&old, &new);
    assert_eq!(changes.inserts, vec![2]);
    assert_eq!(changes.len(), 1);
}

#[test]
fn content_change_under_the_same_id_is_an_update() {
    let old = vec![text("a", "A"), Spacer::new("gap", 1.0).into()];
    let new = vec![text("a", "A!"), Spacer::new("gap", 1.0).into()];

    let changes = diff(&old, &new);
    assert_eq!(changes.updates, vec![Update { old: 0, new: 0 }]);
    assert_eq!(changes.len(), 1);
}

#[test]
fn toggling_a_header_only_inserts_its_rows() {
    let collapsed = vec![Expandable::new("g", "Group").into()];
    let mut expanded = vec![Expandable::new("g", "Group").expanded(true).into()];
    expanded.extend((0..3).map(|n| text(&format!("g.{n}"), "row")));

    let changes = diff(&collapsed, &expanded);
    assert_eq!(changes.inserts, vec![1, 2, 3]);
    assert!(changes.deletes.is_empty());
    assert!(changes.updates.is_empty());
    assert!(changes.moves.is_empty());
}

#[test]
fn sections_move_with_their_headers() {
    let section = |id: &str| Section {
        header: Some(text(id, id)),
        components: vec![text(&format!("{id}.row"), "row")],
    };
    let old = vec![section("first"), section("second")];
    let new = vec![section("second"), section("first")];

    let changes = diff_sections(&old, &new);
    assert_eq!(changes.sections.moves.len(), 1);
    assert!(changes.items.is_empty());
}
