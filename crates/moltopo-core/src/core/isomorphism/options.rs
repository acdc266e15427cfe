use serde::Deserialize;

/// Chemical attributes that must agree for two molecules to count as the same.
///
/// Elements and connectivity are always compared. Every other attribute is
/// compared by default and can be relaxed individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IsomorphismOptions {
    pub aromatic_matching: bool,
    pub formal_charge_matching: bool,
    pub bond_order_matching: bool,
    pub atom_stereochemistry_matching: bool,
    pub bond_stereochemistry_matching: bool,
    /// Upper bound on candidate assignments tried by the search; `None` is unbounded.
    pub max_steps: Option<usize>,
}

impl Default for IsomorphismOptions {
    fn default() -> Self {
        Self {
            aromatic_matching: true,
            formal_charge_matching: true,
            bond_order_matching: true,
            atom_stereochemistry_matching: true,
            bond_stereochemistry_matching: true,
            max_steps: None,
        }
    }
}

impl IsomorphismOptions {
    /// Compares elements and connectivity only.
    pub fn connectivity_only() -> Self {
        Self {
            aromatic_matching: false,
            formal_charge_matching: false,
            bond_order_matching: false,
            atom_stereochemistry_matching: false,
            bond_stereochemistry_matching: false,
            max_steps: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}
