//! Bottom-hole assembly description

use serde::{Deserialize, Serialize};

use super::component::BhaElement;
use super::stabilizer::Stabilizer;
use crate::error::{CalcResult, SagError};

/// A complete bottom-hole assembly, elements ordered bit-to-surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bha {
    /// Mechanical elements, bit first
    pub elements: Vec<BhaElement>,
    /// Stabilizers, independent of the element sequence
    #[serde(default)]
    pub stabilizers: Vec<Stabilizer>,
    /// Distance from D&I sensor to bit in m
    #[serde(default)]
    pub dni_to_bit: f64,
    /// Bend (kink) angle in radians
    #[serde(default)]
    pub bend_angle: f64,
    /// Distance from bend to bit in m
    #[serde(default)]
    pub bend_to_bit: f64,
}

impl Bha {
    /// Create a BHA from its elements with the D&I sensor at `dni_to_bit`
    pub fn new(elements: Vec<BhaElement>, dni_to_bit: f64) -> Self {
        Self {
            elements,
            stabilizers: Vec::new(),
            dni_to_bit,
            bend_angle: 0.0,
            bend_to_bit: 0.0,
        }
    }

    /// Add a stabilizer
    pub fn with_stabilizer(mut self, stabilizer: Stabilizer) -> Self {
        self.stabilizers.push(stabilizer);
        self
    }

    /// Add a point bend (e.g. adjustable bent housing)
    pub fn with_bend(mut self, bend_angle: f64, bend_to_bit: f64) -> Self {
        self.bend_angle = bend_angle;
        self.bend_to_bit = bend_to_bit;
        self
    }

    /// Total length in m
    pub fn length(&self) -> f64 {
        self.elements.iter().map(|e| e.length).sum()
    }

    /// Outer diameter of the bit (first) element
    pub fn bit_od(&self) -> Option<f64> {
        self.elements.first().map(|e| e.od)
    }

    /// Validate every element; any bad catalog entry fails the whole BHA
    pub fn validate(&self) -> CalcResult<()> {
        if self.elements.is_empty() {
            return Err(SagError::EmptyBha);
        }
        for element in &self.elements {
            element.validate()?;
        }
        Ok(())
    }
}
