mod common;

use common::shape;
use proptest::prelude::*;
use proptest::sample::Index;
use tree_picker::prelude::*;
use tree_picker::tree::query::{collect_ids, depth, find_node, node_count};

fn arb_draft() -> impl Strategy<Value = NodeDraft> {
    let leaf = "[a-c]{1,3}".prop_map(|name| NodeDraft::leaf(name));
    leaf.prop_recursive(4, 32, 4, |inner| {
        ("[a-c]{1,3}", prop::collection::vec(inner, 0..4))
            .prop_map(|(name, children)| NodeDraft::parent(name, children))
    })
}

fn arb_forest() -> impl Strategy<Value = Forest> {
    prop::collection::vec(arb_draft(), 1..4)
        .prop_map(|drafts| generate_identifiers(&drafts, &mut SequentialIds::new("n")))
}

/// Ids of the forest in pre-order
fn ids_of(forest: &Forest) -> Vec<NodeId> {
    ForestIndex::build(forest).ids().cloned().collect()
}

fn assert_unique_ids(forest: &Forest) -> Result<(), TestCaseError> {
    prop_assert_eq!(collect_ids(forest).len(), node_count(forest));
    Ok(())
}

/// Whether `node` or anything below it has a name containing `needle`
fn has_match(node: &TreeNode, needle: &str) -> bool {
    node.name.to_lowercase().contains(needle)
        || node.children().iter().any(|child| has_match(child, needle))
}

proptest! {
    #[test]
    fn ids_stay_unique_after_insertions(forest in arb_forest(), pick in any::<Index>(), leaf in any::<bool>()) {
        let target = pick.get(&ids_of(&forest)).clone();
        let mut ids = SequentialIds::new("n");

        let forest = add_child_node(&forest, target.as_str(), "child", &mut ids);
        assert_unique_ids(&forest)?;
        let forest = add_sibling_node(&forest, target.as_str(), "sibling", leaf, &mut ids);
        assert_unique_ids(&forest)?;
        let forest = duplicate_node(&forest, target.as_str(), &mut ids);
        assert_unique_ids(&forest)?;
    }

    #[test]
    fn search_keeps_exactly_matches_and_their_ancestors(forest in arb_forest(), query in "[a-cA-C]{1,2}") {
        let filtered = filter_by_search(&forest, &query);
        let needle = query.to_lowercase();

        // Everything shown either matches or leads to a match
        let shown = ForestIndex::build(&filtered);
        for id in shown.ids() {
            let node = find_node(&filtered, id.as_str()).unwrap();
            prop_assert!(has_match(node, &needle), "{} kept without a match", id);
            let original = find_node(&forest, id.as_str()).unwrap();
            prop_assert_eq!(&original.name, &node.name);
        }

        // Every match is shown
        let all = ForestIndex::build(&forest);
        for id in all.ids() {
            let node = find_node(&forest, id.as_str()).unwrap();
            if node.name.to_lowercase().contains(&needle) {
                prop_assert!(shown.contains(id.as_str()), "match {} was dropped", id);
            }
        }
    }

    #[test]
    fn empty_search_is_identity(forest in arb_forest()) {
        prop_assert!(filter_by_search(&forest, "").ptr_eq(&forest));
    }

    #[test]
    fn delete_undoes_duplicate(forest in arb_forest(), pick in any::<Index>()) {
        let target = pick.get(&ids_of(&forest)).clone();

        let duplicated = duplicate_node(&forest, target.as_str(), &mut SequentialIds::new("dup-"));
        let copy = find_node(&duplicated, "dup-1").unwrap();
        let original = find_node(&forest, target.as_str()).unwrap();
        prop_assert_eq!(shape(&[copy.clone()]), shape(&[original.clone()]));

        let restored = delete_node(&duplicated, "dup-1");
        prop_assert_eq!(&restored, &forest);
    }

    #[test]
    fn mutations_never_touch_their_input(forest in arb_forest(), pick in any::<Index>()) {
        let target = pick.get(&ids_of(&forest)).clone();
        let snapshot = forest.clone();
        let deep_copy: Vec<TreeNode> = forest.to_vec();
        let mut ids = SequentialIds::new("m");

        let _ = rename_node(&forest, target.as_str(), "renamed");
        let _ = set_node_icon(&forest, target.as_str(), "icon", true);
        let _ = add_child_node(&forest, target.as_str(), "child", &mut ids);
        let _ = duplicate_node(&forest, target.as_str(), &mut ids);
        let _ = delete_node(&forest, target.as_str());
        let _ = propagate_icon_to_descendants(&forest, "icon", false);
        let _ = propagate_icon_to_ancestors(&forest, "icon", false);

        prop_assert!(forest.ptr_eq(&snapshot));
        prop_assert_eq!(forest.as_slice(), deep_copy.as_slice());
    }

    #[test]
    fn unknown_ids_are_no_ops(forest in arb_forest()) {
        let mut ids = SequentialIds::new("m");

        prop_assert!(rename_node(&forest, "missing", "x").ptr_eq(&forest));
        prop_assert!(set_node_icon(&forest, "missing", "x", false).ptr_eq(&forest));
        prop_assert!(add_sibling_node(&forest, "missing", "x", false, &mut ids).ptr_eq(&forest));
        prop_assert!(add_child_node(&forest, "missing", "x", &mut ids).ptr_eq(&forest));
        prop_assert!(duplicate_node(&forest, "missing", &mut ids).ptr_eq(&forest));
        prop_assert!(delete_node(&forest, "missing").ptr_eq(&forest));
    }

    #[test]
    fn chain_length_matches_depth(forest in arb_forest()) {
        for id in ids_of(&forest) {
            let chain = ancestor_chain_summary(id.as_str(), &forest);
            prop_assert_eq!(Some(chain.len()), depth(&forest, id.as_str()));
        }
    }
}
