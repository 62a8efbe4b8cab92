//! BHA discretization - per-node stiffness, diameters and weight

use serde::{Deserialize, Serialize};

use crate::elements::section::{apparent_inner_diameter, blade_inertia, tube_inertia};
use crate::elements::{Bha, PhysicalConstants};
use crate::error::{CalcResult, SagError};
use crate::math::Vector;

/// Smallest grid the beam stencils can work on
pub const MIN_GRID_NODES: usize = 4;

/// Discretized BHA: parallel per-node arrays on a uniform grid from the bit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    /// Node spacing (m)
    pub dz: f64,
    /// Distance from bit per node (m)
    pub z: Vector,
    /// Bending stiffness EI (N·m²)
    pub ei: Vector,
    /// Outer diameter, blade OD across stabilizer spans (m)
    pub od: Vector,
    /// Nominal inner diameter (m)
    pub id: Vector,
    /// Dry linear mass (kg/m)
    pub linear_mass: Vector,
    /// Node carrying the bend, if any
    pub bend_index: Option<usize>,
}

impl Grid {
    /// Number of nodes
    pub fn len(&self) -> usize {
        self.z.len()
    }

    /// Whether the grid has no nodes
    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }

    /// Largest outer diameter over the modelled length
    pub fn max_od(&self) -> f64 {
        self.od.max()
    }
}

/// Discretize `bha` at spacing `dz`, modelling up to `uphole_length` metres
/// past the D&I sensor.
///
/// Nodes are cell-centred: node `k` takes its properties from the element
/// covering `(k + ½)·dz`. The apparent bore from [`apparent_inner_diameter`]
/// sets the stiffness; the nominal bore is kept for display.
pub fn discretize(
    bha: &Bha,
    dz: f64,
    constants: &PhysicalConstants,
    uphole_length: f64,
) -> CalcResult<Grid> {
    bha.validate()?;
    if !(dz > 0.0) {
        return Err(SagError::InvalidOptions(format!(
            "grid spacing must be positive, got {dz}"
        )));
    }

    let cumulative: Vec<f64> = bha
        .elements
        .iter()
        .scan(0.0, |total, element| {
            *total += element.length;
            Some(*total)
        })
        .collect();
    let stop_at = bha.dni_to_bit + uphole_length + dz;

    let mut modulus = Vec::new();
    let mut od = Vec::new();
    let mut id = Vec::new();
    let mut apparent_id = Vec::new();
    let mut linear_mass = Vec::new();

    let mut position = dz / 2.0;
    let mut index = 0;
    while index < bha.elements.len() {
        let element = &bha.elements[index];
        let q = element.linear_mass();

        modulus.push(constants.modulus(element.material));
        od.push(element.od);
        id.push(element.id);
        apparent_id.push(apparent_inner_diameter(element.od, q, constants.steel_density));
        linear_mass.push(q);

        position += dz;
        while index < cumulative.len() && position >= cumulative[index] {
            index += 1;
        }
        if position > stop_at {
            break;
        }
    }

    let n = od.len();
    if n < MIN_GRID_NODES {
        return Err(SagError::GridTooShort(n));
    }

    let mut od = Vector::from_vec(od);
    let mut inertia = Vector::from_fn(n, |i, _| tube_inertia(od[i], apparent_id[i]));

    for stabilizer in &bha.stabilizers {
        let (start, stop) = stabilizer.grid_span(dz);
        if start >= n {
            log::debug!(
                "stabilizer at {:.2} m lies beyond the modelled {} nodes; skipped",
                stabilizer.distance_to_bit,
                n
            );
            continue;
        }
        let stop = stop.min(n);
        let added = blade_inertia(stabilizer.blade_od, od[start]);
        for i in start..stop {
            inertia[i] += added;
            od[i] = stabilizer.blade_od;
        }
    }

    let ei = Vector::from_vec(modulus).component_mul(&inertia);

    let bend_nodes = (bha.bend_to_bit / dz).round();
    let bend_index = if bend_nodes <= 0.0 {
        None
    } else {
        let index = bend_nodes as usize;
        if index >= n {
            return Err(SagError::BendOutsideGrid { index, len: n });
        }
        Some(index)
    };

    log::debug!(
        "discretized BHA into {} nodes at dz = {} m (bend node {:?})",
        n,
        dz,
        bend_index
    );

    Ok(Grid {
        dz,
        z: Vector::from_fn(n, |i, _| i as f64 * dz),
        ei,
        od,
        id: Vector::from_vec(id),
        linear_mass: Vector::from_vec(linear_mass),
        bend_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{BhaElement, Stabilizer};
    use approx::assert_relative_eq;

    fn collar_string(dni_to_bit: f64) -> Bha {
        Bha::new(
            vec![
                BhaElement::new("Bit", 0.2159, 0.0826, 0.2159, 0.5, 0.12),
                BhaElement::new("NM collar", 0.2, 0.08, 0.2, 9.5, 2.0).non_magnetic(),
                BhaElement::new("Collar", 0.2, 0.08, 0.2, 30.0, 6.3),
            ],
            dni_to_bit,
        )
    }

    #[test]
    fn test_node_count_and_coordinates() {
        let grid = discretize(&collar_string(5.0), 1.0, &PhysicalConstants::default(), 10.0).unwrap();

        // Nodes until (k + 1.5) > 5 + 10 + 1
        assert_eq!(grid.len(), 16);
        assert_eq!(grid.z[0], 0.0);
        assert_eq!(grid.z[15], 15.0);
        assert_eq!(grid.id.len(), 16);
        assert_eq!(grid.linear_mass.len(), 16);
        assert!(grid.bend_index.is_none());
    }

    #[test]
    fn test_element_assignment_and_material() {
        let constants = PhysicalConstants::default();
        let grid = discretize(&collar_string(5.0), 1.0, &constants, 10.0).unwrap();

        // Node 0 covers 0.5 m: the bit. Nodes 1..=9 the NM collar, then steel.
        assert_eq!(grid.od[0], 0.2159);
        assert_relative_eq!(grid.linear_mass[3], 2000.0 / 9.5, epsilon = 1e-9);
        assert_relative_eq!(grid.linear_mass[12], 6300.0 / 30.0, epsilon = 1e-9);

        let q = 2000.0 / 9.5;
        let id = apparent_inner_diameter(0.2, q, constants.steel_density);
        let expected = constants.non_magnetic_modulus * tube_inertia(0.2, id);
        assert_relative_eq!(grid.ei[3], expected, max_relative = 1e-12);
        assert!(grid.ei[12] > grid.ei[3] * 0.99);
    }

    #[test]
    fn test_stabilizer_adds_stiffness_and_blade_od() {
        let constants = PhysicalConstants::default();
        let plain = discretize(&collar_string(5.0), 1.0, &constants, 10.0).unwrap();
        let bha = collar_string(5.0).with_stabilizer(Stabilizer::new(0.21, 4.0, 2.0));
        let grid = discretize(&bha, 1.0, &constants, 10.0).unwrap();

        for i in 4..6 {
            assert_eq!(grid.od[i], 0.21);
            let added = blade_inertia(0.21, 0.2) * constants.non_magnetic_modulus;
            assert_relative_eq!(grid.ei[i], plain.ei[i] + added, max_relative = 1e-12);
        }
        assert_eq!(grid.od[6], 0.2);
        assert_eq!(grid.max_od(), 0.2159);
    }

    #[test]
    fn test_stabilizer_beyond_grid_is_skipped() {
        let bha = collar_string(5.0).with_stabilizer(Stabilizer::new(0.21, 35.0, 1.0));
        let grid = discretize(&bha, 1.0, &PhysicalConstants::default(), 10.0).unwrap();
        assert!(grid.od.iter().all(|&d| d < 0.21 || d == 0.2159));
    }

    #[test]
    fn test_bend_index() {
        let constants = PhysicalConstants::default();
        let bha = collar_string(5.0).with_bend(0.01, 2.6);
        let grid = discretize(&bha, 1.0, &constants, 10.0).unwrap();
        assert_eq!(grid.bend_index, Some(3));

        let at_bit = collar_string(5.0).with_bend(0.01, 0.3);
        assert!(discretize(&at_bit, 1.0, &constants, 10.0).unwrap().bend_index.is_none());

        let beyond = collar_string(5.0).with_bend(0.01, 25.0);
        assert!(matches!(
            discretize(&beyond, 1.0, &constants, 10.0),
            Err(SagError::BendOutsideGrid { index: 25, len: 16 })
        ));
    }

    #[test]
    fn test_zero_weight_fails_whole_request() {
        let mut bha = collar_string(5.0);
        bha.elements[2].weight = 0.0;
        let err = discretize(&bha, 1.0, &PhysicalConstants::default(), 10.0).unwrap_err();
        assert!(matches!(err, SagError::NonPositiveWeight { .. }));
    }

    #[test]
    fn test_short_bha_rejected() {
        let bha = Bha::new(vec![BhaElement::new("Bit", 0.2, 0.05, 0.2, 1.0, 0.2)], 0.5);
        assert!(matches!(
            discretize(&bha, 1.0, &PhysicalConstants::default(), 0.5),
            Err(SagError::GridTooShort(_))
        ));
    }
}
