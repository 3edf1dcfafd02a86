// SPDX-License-Identifier: Apache-2.0

use ontoweave_core::chain::validate_chain;
use ontoweave_model::ProcessNode;
use proptest::prelude::*;
use proptest::test_runner::Config;

fn chain(len: usize) -> Vec<ProcessNode> {
    let id = |i: usize| format!("P{i}");
    (0..len)
        .map(|i| {
            let follows = (i > 0).then(|| id(i - 1));
            let precedes = (i + 1 < len).then(|| id(i + 1));
            ProcessNode::new(
                &id(i),
                follows.as_deref(),
                precedes.as_deref(),
                "CORE/operators.yaml#diff",
            )
        })
        .collect()
}

fn shuffled_chain() -> impl Strategy<Value = (usize, Vec<ProcessNode>)> {
    (1usize..24).prop_flat_map(|len| (Just(len), Just(chain(len)).prop_shuffle()))
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn reciprocal_chain_is_fully_visited_in_link_order((len, nodes) in shuffled_chain()) {
        let order = validate_chain(&nodes).expect("valid chain");
        prop_assert_eq!(order.len(), len);
        for (idx, node) in order.iter().enumerate() {
            prop_assert_eq!(&node.id, &format!("P{idx}"));
        }
    }

    #[test]
    fn severing_any_back_link_is_detected(
        (len, nodes) in (2usize..24).prop_flat_map(|len| (Just(len), Just(chain(len)))),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut nodes = nodes;
        let victim = 1 + pick.index(len - 1);
        nodes[victim].follows = Some(nodes[victim].id.clone());
        prop_assert!(validate_chain(&nodes).is_err());
    }
}
