// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Walk-through of a [2, 3, 1] network: geometry, coloring, hits and tooltips

use brainmap_diagram::{
    describe, Color, ColorDistributor, HitResult, NetworkModel, NeuronId, NeuronStyle,
    PaletteSpec, Point, Scene, Size, SynapseId,
};

fn network() -> NetworkModel {
    NetworkModel::new(&[2, 3, 1]).unwrap()
}

#[test]
fn test_geometry() {
    let model = network();
    let layout = model.layout();

    assert_eq!(layout.max_column_height, 170.0);
    assert_eq!(layout.canvas, Size::new(393.0, 173.0));

    let tops: Vec<f32> = model.layer(0).unwrap().iter().map(|n| n.top()).collect();
    assert_eq!(tops, vec![30.0, 90.0]);
    let tops: Vec<f32> = model.layer(1).unwrap().iter().map(|n| n.top()).collect();
    assert_eq!(tops, vec![0.0, 60.0, 120.0]);
    assert_eq!(model.layer(2).unwrap()[0].position(), Point::new(240.0, 60.0));

    let first = model.synapse(SynapseId::new(0, 0, 0)).unwrap();
    assert_eq!(first.start(), Point::new(50.0, 55.0));
    assert_eq!(first.end(), Point::new(120.0, 25.0));
    assert_eq!(model.iter_synapses().count(), 9);
}

#[test]
fn test_reference_scenario() {
    let model = network();
    assert_eq!(model.iter_neurons().count(), 6);
    assert_eq!(model.corridor(0).unwrap().len() + model.corridor(1).unwrap().len(), 9);

    let gradient =
        ColorDistributor::evenly_spaced(&[Color::BLACK, Color::GREEN, Color::WHITE], 0.0, 1.0)
            .unwrap();
    assert_eq!(gradient.color_at(0.5), Color::GREEN);

    assert_eq!(
        model.hit_test(Point::new(25.0, 55.0)),
        HitResult::NeuronHit {
            layer: 0,
            index: 0,
            distance: 0.0
        }
    );
}

#[test]
fn test_model_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<NetworkModel>();
}

#[test]
fn test_hits_and_tooltips() {
    let mut model = network();
    model.set_bias(NeuronId::new(0, 1), 0.5).unwrap();
    model.set_weight(SynapseId::new(0, 0, 0), 0.25).unwrap();

    let hit = model.hit_test(Point::new(30.0, 120.0));
    assert_eq!(hit.neuron_id(), Some(NeuronId::new(0, 1)));
    assert_eq!(
        describe(&model, &hit).unwrap(),
        "Neuron 2 at Layer 1\nIts Bias is 0.50"
    );

    // on the first synapse, between the two layers
    let hit = model.hit_test(Point::new(85.0, 40.0));
    assert!(matches!(
        hit,
        HitResult::SynapseHit {
            layer: 0,
            source: 0,
            target: 0,
            ..
        }
    ));
    assert_eq!(
        describe(&model, &hit).unwrap(),
        "Synapse 1 that goes\nNeuron from 1 to 1 at Layer 1\nIts Weight is 0.25"
    );

    // corridor right of the output layer
    assert_eq!(model.hit_test(Point::new(300.0, 80.0)), HitResult::Miss);
}

#[test]
fn test_scene_follows_scalars() {
    let mut model = network();
    let ids: Vec<NeuronId> = model.iter_neurons().map(|n| n.id()).collect();
    for (i, id) in ids.into_iter().enumerate() {
        model.set_bias(id, i as f32).unwrap();
    }
    model.set_output(&[0.42]).unwrap();

    let scene = Scene::compose(&model, &PaletteSpec::default()).unwrap();
    // biases 0..=5: 0 is black, 2.5 would be blue, 5 is white
    assert_eq!(scene.neurons[0].fill, Color::BLACK);
    assert_eq!(scene.neurons[5].fill, Color::WHITE);
    assert_eq!(scene.neurons[0].style, NeuronStyle::Rectangle);
    assert_eq!(scene.neurons[2].style, NeuronStyle::Ellipse);
    assert_eq!(scene.neurons[5].style, NeuronStyle::EllipseWithReadout);
    assert_eq!(scene.neurons[5].readout.as_ref().unwrap().text, "0.42");
    assert_eq!(scene.canvas, model.layout().canvas);
}
