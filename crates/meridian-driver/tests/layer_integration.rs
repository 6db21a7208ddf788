//! Integration test: encode → decode → instance layer
//!
//! Polygon records go through the line encoder and the polyline decoder,
//! then feed a layer whose accessors read the decoded features. The layer
//! takes its reference boundary from the first feature.

use meridian_decoder::polyline::decode_record;
use meridian_driver::{
    ChangeFlags, Color, DriverError, InstanceAccessors, InstanceLayer, LayerConfig, WebMercator,
};
use meridian_encoder::LineEncoder;
use meridian_types::{Coordinate, Feature, Ring};
use pretty_assertions::assert_eq;
use std::f64::consts::FRAC_PI_2;

fn hexagon(center: Coordinate) -> Ring {
    let offsets = [
        (0.5, 0.0),
        (0.25, 0.433),
        (-0.25, 0.433),
        (-0.5, 0.0),
        (-0.25, -0.433),
        (0.25, -0.433),
        (0.5, 0.0),
    ];
    Ring::new(
        offsets
            .iter()
            .map(|(dx, dy)| Coordinate::new(center.lon + dx, center.lat + dy))
            .collect(),
    )
}

fn decode_all(text: &str) -> Vec<Feature> {
    text.lines().map(|line| decode_record(line, 5).unwrap()).collect()
}

fn accessors() -> InstanceAccessors<Feature> {
    InstanceAccessors::new(|f: &Feature| {
        f.geometry
            .largest_outer_ring()
            .and_then(Ring::vertex_mean)
            .unwrap_or_default()
    })
    .with_elevation(|f: &Feature| f64::from(f.properties.classification.unwrap_or(0)) * 100.0)
    .with_color(|f: &Feature| Color::rgb(f.properties.classification.unwrap_or(0) * 20, 0, 0))
    .with_vertices(|f: &Feature| {
        f.geometry
            .largest_outer_ring()
            .map(|ring| ring.coords.clone())
            .unwrap_or_default()
    })
}

fn features() -> Vec<Feature> {
    let mut encoder = LineEncoder::new();
    for i in 0..3u8 {
        let center = Coordinate::new(-100.0 + f64::from(i) * 2.0, 40.0);
        encoder.add_feature(i + 1, &[hexagon(center)]).unwrap();
    }
    decode_all(&encoder.encode())
}

#[test]
fn decoded_features_drive_the_layer() {
    let features = features();
    let config = LayerConfig {
        dot_radius: 0.5,
        ..LayerConfig::default()
    };
    let mut layer = InstanceLayer::new(accessors(), config);
    layer
        .update(&features, &WebMercator::new(1.0), ChangeFlags::DATA)
        .unwrap();

    let attributes = layer.attributes();
    assert_eq!(attributes.len(), 3);
    assert_eq!(attributes.elevations, vec![100.0, 200.0, 300.0]);
    assert_eq!(&attributes.colors[..4], &[20, 0, 0, 255]);
    assert_eq!(&attributes.colors[8..], &[60, 0, 0, 255]);

    // the closing vertex is not double counted, so the mean is the center
    let lon = f64::from(attributes.positions[0]);
    assert!((lon + 100.0).abs() < 1e-4, "{lon}");

    let orientation = layer.orientation().unwrap();
    assert_eq!(orientation.tilt_angle, FRAC_PI_2);
    // one degree at zoom 1 is 1024/360 units; half of it, then halved again
    assert!((orientation.instance_radius - 256.0 / 360.0).abs() < 1e-6);
}

#[test]
fn viewport_change_only_touches_orientation() {
    let features = features();
    let mut layer = InstanceLayer::new(accessors(), LayerConfig::default());
    layer
        .update(&features, &WebMercator::new(0.0), ChangeFlags::DATA)
        .unwrap();
    let positions = layer.attributes().positions.clone();
    let radius = layer.orientation().unwrap().instance_radius;

    layer
        .update(&features[..1], &WebMercator::new(1.0), ChangeFlags::VIEWPORT)
        .unwrap();
    assert_eq!(layer.attributes().positions, positions);
    let zoomed = layer.orientation().unwrap().instance_radius;
    assert!((zoomed - 2.0 * radius).abs() < 1e-9);
}

#[test]
fn short_first_ring_fails_but_attributes_build() {
    let text = LineEncoder::new()
        .add_feature(
            0,
            &[Ring::new(vec![
                Coordinate::new(10.0, 10.0),
                Coordinate::new(11.0, 10.0),
                Coordinate::new(10.0, 11.0),
            ])],
        )
        .unwrap()
        .encode();
    let features = decode_all(&text);

    let mut layer = InstanceLayer::new(accessors(), LayerConfig::default());
    let result = layer.update(&features, &WebMercator::new(0.0), ChangeFlags::DATA);
    assert!(matches!(result, Err(DriverError::InsufficientGeometry { found: 3 })));
    assert_eq!(layer.attributes().len(), 1);
    assert_eq!(layer.orientation(), None);
}
