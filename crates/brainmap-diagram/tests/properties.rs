// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Property tests for layout, gradients and hit-testing

use brainmap_diagram::gradient::ColorDistributor;
use brainmap_diagram::layout::{layout, layout_with, LayoutParams};
use brainmap_diagram::model::synapse::distance_to_line;
use brainmap_diagram::{Color, HitResult, HitTester};
use proptest::prelude::*;

fn layer_sizes() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(1usize..8, 2..6)
}

fn color() -> impl Strategy<Value = Color> {
    any::<[u8; 4]>().prop_map(Color::from)
}

/// Colors with strictly increasing breakpoints
fn stops() -> impl Strategy<Value = (Vec<Color>, Vec<f32>)> {
    (2usize..6).prop_flat_map(|n| {
        (
            proptest::collection::vec(color(), n),
            -100.0f32..100.0,
            proptest::collection::vec(0.5f32..50.0, n - 1),
        )
            .prop_map(|(colors, start, deltas)| {
                let mut breakpoints = vec![start];
                for d in deltas {
                    let next = breakpoints[breakpoints.len() - 1] + d;
                    breakpoints.push(next);
                }
                (colors, breakpoints)
            })
    })
}

proptest! {
    #[test]
    fn proptest_layout_is_deterministic(sizes in layer_sizes()) {
        prop_assert_eq!(layout(&sizes).unwrap(), layout(&sizes).unwrap());
    }

    #[test]
    fn proptest_layers_are_centered(sizes in layer_sizes()) {
        let geometry = layout(&sizes).unwrap();
        let center = geometry.vertical_center();
        for column in &geometry.neurons {
            let top = column[0].bounds.top();
            let bottom = column[column.len() - 1].bounds.bottom();
            prop_assert!(((top + bottom) / 2.0 - center).abs() < 1e-3);
        }
    }

    #[test]
    fn proptest_one_synapse_per_adjacent_pair(sizes in layer_sizes()) {
        let geometry = layout(&sizes).unwrap();
        let expected: usize = sizes.windows(2).map(|w| w[0] * w[1]).sum();
        prop_assert_eq!(geometry.total_synapses(), expected);
        for (layer, corridor) in geometry.synapses.iter().enumerate() {
            prop_assert_eq!(corridor.len(), sizes[layer] * sizes[layer + 1]);
        }
    }

    #[test]
    fn proptest_neurons_fit_inside_canvas(sizes in layer_sizes(), gap in 0.0f32..30.0) {
        let params = LayoutParams { neuron_gap: gap, ..LayoutParams::default() };
        let geometry = layout_with(&sizes, &params).unwrap();
        for neuron in geometry.neurons.iter().flatten() {
            prop_assert!(neuron.bounds.top() >= -1e-3);
            prop_assert!(neuron.bounds.bottom() <= geometry.canvas.height);
            prop_assert!(neuron.bounds.right() <= geometry.canvas.width);
        }
    }

    #[test]
    fn proptest_gradient_hits_stop_colors((colors, breakpoints) in stops()) {
        let gradient = ColorDistributor::from_parts(&colors, &breakpoints).unwrap();
        for (bp, expected) in breakpoints.iter().zip(&colors) {
            prop_assert_eq!(gradient.color_at(*bp), *expected);
        }
    }

    #[test]
    fn proptest_gradient_clamps_outside_range((colors, breakpoints) in stops(), beyond in 0.0f32..1000.0) {
        let gradient = ColorDistributor::from_parts(&colors, &breakpoints).unwrap();
        prop_assert_eq!(gradient.color_at(breakpoints[0] - beyond), colors[0]);
        prop_assert_eq!(gradient.color_at(breakpoints[breakpoints.len() - 1] + beyond), colors[colors.len() - 1]);
    }

    #[test]
    fn proptest_gradient_channels_stay_between_stops(
        (colors, breakpoints) in stops(),
        t in 0.0f32..=1.0,
        segment in any::<prop::sample::Index>(),
    ) {
        let gradient = ColorDistributor::from_parts(&colors, &breakpoints).unwrap();
        let r = segment.index(colors.len() - 1);
        let v = breakpoints[r] + (breakpoints[r + 1] - breakpoints[r]) * t;
        let got = gradient.color_at(v).channels();
        let (lo, hi) = (colors[r].channels(), colors[r + 1].channels());
        for c in 0..4 {
            prop_assert!(got[c] >= lo[c].min(hi[c]) && got[c] <= lo[c].max(hi[c]));
        }
    }

    #[test]
    fn proptest_gradient_channels_follow_segment_slope(
        (colors, breakpoints) in stops(),
        t1 in 0.0f32..1.0,
        t2 in 0.0f32..1.0,
        segment in any::<prop::sample::Index>(),
    ) {
        let gradient = ColorDistributor::from_parts(&colors, &breakpoints).unwrap();
        let r = segment.index(colors.len() - 1);
        let at = |t: f32| breakpoints[r] + (breakpoints[r + 1] - breakpoints[r]) * t;
        let lower = gradient.color_at(at(t1.min(t2))).channels();
        let upper = gradient.color_at(at(t1.max(t2))).channels();
        let (lo, hi) = (colors[r].channels(), colors[r + 1].channels());
        for c in 0..4 {
            if hi[c] >= lo[c] {
                prop_assert!(lower[c] <= upper[c]);
            } else {
                prop_assert!(lower[c] >= upper[c]);
            }
        }
    }

    #[test]
    fn proptest_degenerate_gradient_is_constant(
        colors in proptest::collection::vec(color(), 2..5),
        at in -10.0f32..10.0,
        value in -1000.0f32..1000.0,
    ) {
        let gradient = ColorDistributor::evenly_spaced(&colors, at, at).unwrap();
        prop_assert!(gradient.is_degenerate());
        prop_assert_eq!(gradient.color_at(value), colors[colors.len() - 1]);
    }

    #[test]
    fn proptest_neuron_centers_hit_their_neuron(sizes in layer_sizes()) {
        let geometry = layout(&sizes).unwrap();
        let tester = HitTester::new(&geometry);
        for neuron in geometry.neurons.iter().flatten() {
            let hit = tester.query(neuron.center());
            prop_assert_eq!(hit.neuron_id(), Some(neuron.id));
            prop_assert_eq!(hit.distance(), Some(0.0));
        }
    }

    #[test]
    fn proptest_synapse_midpoints_hit_their_corridor(sizes in layer_sizes()) {
        let geometry = layout(&sizes).unwrap();
        let tester = HitTester::new(&geometry);
        for synapse in geometry.synapses.iter().flatten() {
            let midpoint = synapse.start.midpoint(synapse.end);
            match tester.query(midpoint) {
                HitResult::SynapseHit { layer, distance, .. } => {
                    prop_assert_eq!(layer, synapse.id.layer);
                    // crossing synapses may tie; the winner is never farther than this one
                    let own = distance_to_line(synapse.start, synapse.end, midpoint);
                    prop_assert!(distance <= own + 1e-4);
                    prop_assert!(distance < 1e-2);
                }
                other => prop_assert!(false, "expected a synapse hit, got {:?}", other),
            }
        }
    }
}
