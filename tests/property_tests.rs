//! Property tests for edge-type canonicalization and consensus invariants

mod common;

use pag_calibration::{
    CalibrationSampler, ConsensusBuilder, Edge, EdgeType, Endpoint, Graph, HosmerLemeshow,
    ObservedPredicted,
};
use proptest::prelude::*;

fn endpoint() -> impl Strategy<Value = Endpoint> {
    prop_oneof![
        Just(Endpoint::Tail),
        Just(Endpoint::Arrow),
        Just(Endpoint::Circle),
        Just(Endpoint::Null),
    ]
}

fn real_edge_type() -> impl Strategy<Value = EdgeType> {
    (0usize..7).prop_map(|i| EdgeType::ALL[i])
}

proptest! {
    #[test]
    fn reversal_matches_swapped_lookup(e1 in endpoint(), e2 in endpoint(), flip in any::<bool>()) {
        let edge = if flip { Edge::new("B", "A", e1, e2) } else { Edge::new("A", "B", e1, e2) };
        prop_assert_eq!(edge.edge_type("A", "B").reverse(), edge.edge_type("B", "A"));
    }

    #[test]
    fn real_types_round_trip_through_endpoints(edge_type in real_edge_type()) {
        let (e1, e2) = edge_type.endpoints();
        prop_assert_eq!(EdgeType::from_endpoints(e1, e2), edge_type);
        prop_assert_eq!(EdgeType::from_endpoints(e2, e1), edge_type.reverse());
    }

    #[test]
    fn unanimous_ensemble_is_certain(
        edge_type in real_edge_type(),
        size in 1usize..12,
        flip in any::<bool>(),
    ) {
        let candidates: Vec<Graph> = (0..size)
            .map(|_| {
                let stored = if flip {
                    ("Y", "X", edge_type.reverse())
                } else {
                    ("X", "Y", edge_type)
                };
                common::graph_of(&["X", "Y"], &[stored])
            })
            .collect();

        let consensus = ConsensusBuilder::new().build(&candidates);
        let edge = consensus.get_edge("X", "Y").unwrap();
        prop_assert_eq!(edge.edge_type_probabilities.len(), 1);
        let stored_type = edge.edge_type(&edge.node1, &edge.node2);
        prop_assert_eq!(edge.edge_type_probabilities[0].edge_type, stored_type);
        prop_assert_eq!(edge.edge_type_probabilities[0].probability, 1.0);
        prop_assert_eq!(edge.edge_type("X", "Y"), edge_type);
    }

    #[test]
    fn consensus_probabilities_sum_to_one(
        seed in any::<u64>(),
        size in 1usize..20,
        density in 0.1f64..0.9,
    ) {
        let nodes = common::variables(5);
        let candidates = common::random_ensemble(seed, &nodes, size, density);
        let consensus = ConsensusBuilder::new().build(&candidates);

        for edge in consensus.edges() {
            let total: f64 = edge.edge_type_probabilities.iter().map(|etp| etp.probability).sum();
            prop_assert!((total - 1.0).abs() < 1e-9, "{} sums to {}", edge, total);

            let ranked = edge
                .edge_type_probabilities
                .windows(2)
                .all(|w| w[0].probability >= w[1].probability);
            prop_assert!(ranked);
        }
    }

    #[test]
    fn sampled_probabilities_stay_in_unit_interval(
        seed in any::<u64>(),
        edge_type in real_edge_type(),
    ) {
        let nodes = common::variables(4);
        let candidates = common::random_ensemble(seed, &nodes, 9, 0.5);
        let reference = common::random_ensemble(seed.wrapping_add(1), &nodes, 1, 0.5).remove(0);
        let consensus = ConsensusBuilder::new().build(&candidates);

        let records = CalibrationSampler::new(&consensus, &reference).direct_edge(edge_type);
        let pairs = nodes.len() * (nodes.len() - 1) / 2;
        let expected = if edge_type.is_asymmetric() { pairs * 2 } else { pairs };
        prop_assert_eq!(records.len(), expected);
        for record in records.iter() {
            prop_assert!((0.0..=1.0).contains(&record.predicted));
            prop_assert!(record.observed <= 1);
        }
    }

    #[test]
    fn hosmer_lemeshow_is_finite(
        samples in prop::collection::vec((0u8..=1, 0.0f64..=1.0), 0..200),
        groups in 1usize..15,
    ) {
        let samples: Vec<_> = samples
            .into_iter()
            .map(|(o, p)| ObservedPredicted::new(o, p))
            .collect();
        let hl = HosmerLemeshow::compute(&samples, groups).unwrap();
        prop_assert!(hl.statistic().is_finite());
        prop_assert!(hl.statistic() >= 0.0);
        prop_assert_eq!(hl.groups().len(), groups);
        prop_assert_eq!(hl.groups().iter().map(|g| g.size).sum::<usize>(), samples.len());
        if let Some(p) = hl.p_value() {
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
