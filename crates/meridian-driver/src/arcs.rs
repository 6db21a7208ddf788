use meridian_types::{Coordinate, Feature};
use tracing::warn;

/// Colors for the inflow end of an arc, lightest first.
pub const INFLOW_COLORS: [[u8; 3]; 7] = [
    [255, 255, 204],
    [199, 233, 180],
    [127, 205, 187],
    [65, 182, 196],
    [29, 145, 192],
    [34, 94, 168],
    [12, 44, 132],
];

/// Colors for the outflow end of an arc, lightest first.
pub const OUTFLOW_COLORS: [[u8; 3]; 7] = [
    [255, 255, 178],
    [254, 217, 118],
    [254, 178, 76],
    [253, 141, 60],
    [252, 78, 42],
    [227, 26, 28],
    [177, 0, 38],
];

/// Maps values to `classes` buckets holding roughly equal shares of a
/// sample domain.
///
/// Thresholds are the `i / classes` quantiles of the sorted domain, using
/// linear interpolation between neighbouring samples. A value lands in
/// the number of thresholds less than or equal to it.
#[derive(Clone, Debug, PartialEq)]
pub struct QuantileScale {
    thresholds: Vec<f64>,
}

impl QuantileScale {
    /// Non-finite samples are ignored. `classes` below 1 is treated as 1.
    #[must_use]
    pub fn new(domain: impl IntoIterator<Item = f64>, classes: usize) -> Self {
        let mut sorted: Vec<f64> = domain.into_iter().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);
        let classes = classes.max(1);

        let thresholds = if sorted.is_empty() {
            Vec::new()
        } else {
            (1..classes).map(|i| quantile(&sorted, i, classes)).collect()
        };
        Self { thresholds }
    }

    #[must_use]
    pub fn class(&self, value: f64) -> usize {
        self.thresholds.partition_point(|&t| t <= value)
    }

    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantile(sorted: &[f64], i: usize, classes: usize) -> f64 {
    let h = (sorted.len() - 1) as f64 * i as f64 / classes as f64;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - h.floor())
}

/// One flow between two region centroids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowArc {
    pub source: Coordinate,
    pub target: Coordinate,
    pub value: i64,
    pub source_color: [u8; 3],
    pub target_color: [u8; 3],
}

/// Arcs from the selected feature to every feature it has a flow with,
/// colored by the value's quantile class among those arcs.
///
/// Links to features that are out of range or have no centroid are
/// skipped. A selection without a centroid yields no arcs.
#[must_use]
pub fn flow_arcs(features: &[Feature], selected: usize) -> Vec<FlowArc> {
    let Some(feature) = features.get(selected) else {
        warn!(selected, "selected feature out of range");
        return Vec::new();
    };
    let (Some(source), Some(flows)) = (feature.properties.centroid, &feature.properties.flows) else {
        return Vec::new();
    };

    let mut arcs: Vec<FlowArc> = flows
        .iter()
        .filter_map(|link| {
            let target = features.get(link.target)?.properties.centroid?;
            Some(FlowArc {
                source,
                target,
                value: link.flow,
                source_color: [0; 3],
                target_color: [0; 3],
            })
        })
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let scale = QuantileScale::new(arcs.iter().map(|a| a.value as f64), INFLOW_COLORS.len());
    for arc in &mut arcs {
        #[allow(clippy::cast_precision_loss)]
        let class = scale.class(arc.value as f64);
        arc.source_color = INFLOW_COLORS[class];
        arc.target_color = OUTFLOW_COLORS[class];
    }
    arcs
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_types::{FlowLinks, MultiPolygon, Properties};
    use pretty_assertions::assert_eq;

    fn feature(centroid: Option<[f64; 2]>, flows: &[(usize, i64)]) -> Feature {
        Feature::new(
            MultiPolygon::default(),
            Properties {
                centroid: centroid.map(Coordinate::from),
                flows: Some(flows.iter().copied().collect::<FlowLinks>()),
                ..Properties::default()
            },
        )
    }

    #[test]
    fn quartile_thresholds() {
        let scale = QuantileScale::new([1.0, 2.0, 3.0, 4.0, 5.0], 4);
        assert_eq!(scale.thresholds(), &[2.0, 3.0, 4.0]);
        assert_eq!(scale.class(1.0), 0);
        assert_eq!(scale.class(2.0), 1);
        assert_eq!(scale.class(4.5), 3);
        assert_eq!(scale.class(100.0), 3);
    }

    #[test]
    fn interpolates_between_samples() {
        let scale = QuantileScale::new([0.0, 10.0], 2);
        assert_eq!(scale.thresholds(), &[5.0]);
    }

    #[test]
    fn empty_domain_has_one_class() {
        let scale = QuantileScale::new([], 7);
        assert_eq!(scale.class(42.0), 0);
    }

    #[test]
    fn arcs_connect_centroids() {
        let features = vec![
            feature(Some([0.0, 0.0]), &[(1, 10), (2, -4), (9, 1)]),
            feature(Some([1.0, 1.0]), &[]),
            feature(None, &[]),
        ];
        let arcs = flow_arcs(&features, 0);
        assert_eq!(arcs.len(), 1);
        assert_eq!(arcs[0].target, Coordinate::new(1.0, 1.0));
        assert_eq!(arcs[0].value, 10);
        // a one-sample domain puts every threshold at that sample
        assert_eq!(arcs[0].source_color, INFLOW_COLORS[6]);
        assert_eq!(arcs[0].target_color, OUTFLOW_COLORS[6]);
    }

    #[test]
    fn selection_without_centroid() {
        let features = vec![feature(None, &[(0, 1)])];
        assert!(flow_arcs(&features, 0).is_empty());
        assert!(flow_arcs(&features, 5).is_empty());
    }
}
