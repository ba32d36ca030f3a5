// Sparse affine weights over the control cage.
//
// Every subdivision point is stored as `Σ w[i] * control[i]` with Σ w = 1,
// never as a cached position. Splitting and smoothing therefore only ever
// combine weight maps, and a later drag of one control node moves every
// derived point by exactly its weight on that node.

use std::collections::BTreeMap;
use glam::Vec3;
use super::error::MeshError;

/// Allowed drift of Σ w away from 1.
pub const WEIGHT_TOLERANCE: f32 = 1e-4;

/// Control-node index → weight. BTreeMap keeps summation order stable,
/// so identical inputs always produce bit-identical positions.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMap {
    weights: BTreeMap<usize, f32>,
}

impl WeightMap {
    /// Validated construction. Repeated indices are summed.
    pub fn new(entries: impl IntoIterator<Item = (usize, f32)>) -> Result<Self, MeshError> {
        let mut weights = BTreeMap::new();
        for (index, w) in entries {
            *weights.entry(index).or_insert(0.0) += w;
        }
        if weights.is_empty() {
            return Err(MeshError::EmptyWeights);
        }
        let map = Self { weights };
        let sum = map.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(MeshError::WeightSum(sum));
        }
        Ok(map)
    }

    /// `{index: 1}`: a point sitting exactly on one control node.
    pub fn identity(index: usize) -> Self {
        let mut weights = BTreeMap::new();
        weights.insert(index, 1.0);
        Self { weights }
    }

    /// Uniform average of several weight maps.
    /// An affine combination of affine combinations is still affine, so the
    /// result goes through the same validation as any other construction.
    pub fn average<'a>(maps: impl IntoIterator<Item = &'a WeightMap>) -> Result<Self, MeshError> {
        let maps: Vec<&WeightMap> = maps.into_iter().collect();
        if maps.is_empty() {
            return Err(MeshError::EmptyWeights);
        }
        let share = 1.0 / maps.len() as f32;
        Self::new(
            maps.iter()
                .flat_map(|m| m.iter().map(move |(i, w)| (i, w * share))),
        )
    }

    pub fn get(&self, index: usize) -> f32 {
        self.weights.get(&index).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.weights.iter().map(|(&i, &w)| (i, w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn sum(&self) -> f32 {
        self.weights.values().sum()
    }

    /// Evaluate against the current control nodes.
    pub fn resolve<T>(&self, control: &[T], position: impl Fn(&T) -> Vec3) -> Result<Vec3, MeshError> {
        self.iter().try_fold(Vec3::ZERO, |acc, (i, w)| {
            let node = control.get(i).ok_or(MeshError::MissingControlNode {
                index: i,
                count: control.len(),
            })?;
            Ok(acc + position(node) * w)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_unnormalized_maps() {
        assert_eq!(WeightMap::new([]), Err(MeshError::EmptyWeights));
        assert!(matches!(
            WeightMap::new([(0, 0.5), (1, 0.25)]),
            Err(MeshError::WeightSum(_))
        ));
        assert!(WeightMap::new([(0, 0.5), (1, 0.5)]).is_ok());
    }

    #[test]
    fn repeated_indices_merge() {
        let m = WeightMap::new([(3, 0.25), (3, 0.25), (1, 0.5)]).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(3), 0.5);
        assert_eq!(m.get(7), 0.0);
    }

    #[test]
    fn average_is_uniform_and_stays_affine() {
        let a = WeightMap::identity(0);
        let b = WeightMap::identity(1);
        let c = WeightMap::new([(1, 0.5), (2, 0.5)]).unwrap();
        let avg = WeightMap::average([&a, &b, &c]).unwrap();
        assert!((avg.get(0) - 1.0 / 3.0).abs() < 1e-6);
        assert!((avg.get(1) - 0.5).abs() < 1e-6);
        assert!((avg.get(2) - 1.0 / 6.0).abs() < 1e-6);
        assert!((avg.sum() - 1.0).abs() < WEIGHT_TOLERANCE);
    }

    #[test]
    fn resolve_weights_control_positions() {
        let control = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 20.0, 30.0)];
        let m = WeightMap::new([(0, 0.75), (1, 0.25)]).unwrap();
        assert_eq!(m.resolve(&control, |&p| p).unwrap(), Vec3::new(2.5, 5.0, 7.5));

        let dangling = WeightMap::identity(5);
        assert_eq!(
            dangling.resolve(&control, |&p| p),
            Err(MeshError::MissingControlNode { index: 5, count: 2 })
        );
    }
}
