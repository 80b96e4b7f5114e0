use nalgebra::{Point3, Vector3};

/// Distance (nm) between a backbone bead and its first side-chain bead.
pub const SIDECHAIN_FIRST_STEP: f64 = 0.30;
/// Distance (nm) between consecutive side-chain beads.
pub const SIDECHAIN_RING_STEP: f64 = 0.27;
/// Backbone spacing (nm) used when only one neighbour is known.
pub const BACKBONE_STEP: f64 = 0.35;

/// Position for a new backbone bead between its chain neighbours.
///
/// With both neighbours known the bead sits at their midpoint. With one, it is
/// placed [`BACKBONE_STEP`] away from it along x (after a preceding bead,
/// before a following one). With none, at the origin.
pub fn place_backbone(prev: Option<&Point3<f64>>, next: Option<&Point3<f64>>) -> Point3<f64> {
    let step = Vector3::x() * BACKBONE_STEP;
    match (prev, next) {
        (Some(p), Some(n)) => nalgebra::center(p, n),
        (Some(p), None) => p + step,
        (None, Some(n)) => n - step,
        (None, None) => Point3::origin(),
    }
}

/// Deterministic positions for `count` side-chain beads hanging off `backbone`.
///
/// The first bead is [`SIDECHAIN_FIRST_STEP`] along +y. Each following bead is
/// [`SIDECHAIN_RING_STEP`] from the previous one, turning 60 degrees per step
/// in the xy plane, which closes small rings without overlapping beads.
pub fn place_sidechain(backbone: &Point3<f64>, count: usize) -> Vec<Point3<f64>> {
    let mut positions = Vec::with_capacity(count);
    if count == 0 {
        return positions;
    }
    let mut current = backbone + Vector3::y() * SIDECHAIN_FIRST_STEP;
    positions.push(current);
    for k in 1..count {
        let theta = (k as f64) * std::f64::consts::FRAC_PI_3;
        let direction = Vector3::new(theta.sin(), theta.cos(), 0.0);
        current += direction * SIDECHAIN_RING_STEP;
        positions.push(current);
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn backbone_between_two_neighbours_is_midpoint() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 2.0, -2.0);
        let p = place_backbone(Some(&a), Some(&b));
        assert!((p - Point3::new(0.5, 1.0, -1.0)).norm() < EPS);
    }

    #[test]
    fn backbone_with_one_neighbour_steps_along_x() {
        let a = Point3::new(1.0, 1.0, 1.0);
        let after = place_backbone(Some(&a), None);
        let before = place_backbone(None, Some(&a));
        assert!((after - Point3::new(1.35, 1.0, 1.0)).norm() < EPS);
        assert!((before - Point3::new(0.65, 1.0, 1.0)).norm() < EPS);
        assert_eq!(place_backbone(None, None), Point3::origin());
    }

    #[test]
    fn sidechain_steps_have_fixed_lengths() {
        let bb = Point3::new(2.0, 2.0, 2.0);
        let beads = place_sidechain(&bb, 4);
        assert_eq!(beads.len(), 4);
        assert!(((beads[0] - bb).norm() - SIDECHAIN_FIRST_STEP).abs() < EPS);
        for pair in beads.windows(2) {
            assert!(((pair[1] - pair[0]).norm() - SIDECHAIN_RING_STEP).abs() < EPS);
        }
        for (i, a) in beads.iter().enumerate() {
            assert!((a - bb).norm() > 0.1);
            for b in &beads[i + 1..] {
                assert!((a - b).norm() > 0.1);
            }
        }
    }

    #[test]
    fn sidechain_placement_is_deterministic() {
        let bb = Point3::new(0.3, -0.2, 1.1);
        assert_eq!(place_sidechain(&bb, 3), place_sidechain(&bb, 3));
        assert!(place_sidechain(&bb, 0).is_empty());
    }
}
