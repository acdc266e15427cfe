use super::mapping::AtomMapping;
use super::options::IsomorphismOptions;
use crate::core::models::atom::{Atom, AtomStereo};
use crate::core::models::bond::{Bond, BondOrder, BondStereo};
use crate::core::models::error::MoleculeError;
use crate::core::models::molecule::FrozenMolecule;
use crate::core::models::virtual_site::VirtualSite;
use petgraph::algo::subgraph_isomorphisms_iter;
use petgraph::prelude::*;
use std::cell::Cell;
use tracing::{trace, warn};

/// Per-atom label that two matched atoms must share. Fields switched off by the
/// options are `None` on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct AtomInvariant {
    atomic_number: u8,
    degree: usize,
    formal_charge: Option<i32>,
    is_aromatic: Option<bool>,
    stereochemistry: Option<Option<AtomStereo>>,
}

impl AtomInvariant {
    fn of(atom: &Atom, options: &IsomorphismOptions) -> Self {
        Self {
            atomic_number: atom.atomic_number,
            degree: atom.degree(),
            formal_charge: options.formal_charge_matching.then_some(atom.formal_charge),
            is_aromatic: options.aromatic_matching.then_some(atom.is_aromatic),
            stereochemistry: options
                .atom_stereochemistry_matching
                .then_some(atom.stereochemistry),
        }
    }
}

/// Per-bond label, masked by the options the same way as [`AtomInvariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BondInvariant {
    order: Option<BondOrder>,
    is_aromatic: Option<bool>,
    stereochemistry: Option<Option<BondStereo>>,
}

impl BondInvariant {
    fn of(bond: &Bond, options: &IsomorphismOptions) -> Self {
        Self {
            order: options.bond_order_matching.then_some(bond.order),
            is_aromatic: options.aromatic_matching.then_some(bond.is_aromatic),
            stereochemistry: options
                .bond_stereochemistry_matching
                .then_some(bond.stereochemistry),
        }
    }
}

/// Labeled graph of a molecule. Node `i` is atom `i`.
fn molecule_graph(
    molecule: &FrozenMolecule,
    options: &IsomorphismOptions,
) -> UnGraph<AtomInvariant, BondInvariant> {
    let mut graph = UnGraph::with_capacity(molecule.n_atoms(), molecule.n_bonds());
    for atom in molecule.atoms() {
        graph.add_node(AtomInvariant::of(atom, options));
    }
    for bond in molecule.bonds() {
        let [a, b] = bond.atoms();
        graph.add_edge(
            NodeIndex::new(a),
            NodeIndex::new(b),
            BondInvariant::of(bond, options),
        );
    }
    graph
}

fn sorted_invariants(graph: &UnGraph<AtomInvariant, BondInvariant>) -> Vec<AtomInvariant> {
    let mut invariants: Vec<_> = graph.node_weights().copied().collect();
    invariants.sort_unstable();
    invariants
}

fn sites_match(query: &VirtualSite, target: &VirtualSite, forward: &[usize]) -> bool {
    query.kind() == target.kind()
        && query.charge_increments == target.charge_increments
        && query.lennard_jones == target.lennard_jones
        && query.orientation_atoms().len() == target.orientation_atoms().len()
        && query
            .orientation_atoms()
            .iter()
            .zip(target.orientation_atoms())
            .all(|(&q, &t)| forward.get(q) == Some(&t))
}

/// Site `i` of `query` must carry the same parameters as site `i` of `target`
/// and sit on the images of its orientation atoms.
fn virtual_sites_correspond(
    query: &FrozenMolecule,
    target: &FrozenMolecule,
    forward: &[usize],
) -> bool {
    query
        .virtual_sites()
        .iter()
        .zip(target.virtual_sites())
        .all(|(q, t)| sites_match(q, t, forward))
}

/// Finds an atom mapping from `query` onto `target`, if one exists.
///
/// Candidate mappings come from a VF2 search over labeled molecule graphs and
/// are accepted once every virtual site of `query` lands on the matching site of
/// `target`. With `max_steps` set, every node comparison counts as a step.
pub(crate) fn find_isomorphism(
    query: &FrozenMolecule,
    target: &FrozenMolecule,
    options: &IsomorphismOptions,
) -> Result<Option<AtomMapping>, MoleculeError> {
    let n_atoms = query.n_atoms();
    if n_atoms != target.n_atoms()
        || query.n_bonds() != target.n_bonds()
        || query.n_virtual_sites() != target.n_virtual_sites()
    {
        return Ok(None);
    }
    if n_atoms == 0 {
        return Ok(Some(AtomMapping::identity(0)));
    }

    let query_graph = molecule_graph(query, options);
    let target_graph = molecule_graph(target, options);
    if sorted_invariants(&query_graph) != sorted_invariants(&target_graph) {
        return Ok(None);
    }

    let steps = Cell::new(0usize);
    let limit = options.max_steps;
    let exhausted = || limit.is_some_and(|limit| steps.get() > limit);
    let mut node_match = |a: &AtomInvariant, b: &AtomInvariant| {
        steps.set(steps.get() + 1);
        !exhausted() && a == b
    };
    let mut edge_match = |a: &BondInvariant, b: &BondInvariant| a == b;

    // Equal node and edge counts make every subgraph match a full isomorphism.
    let (query_ref, target_ref) = (&query_graph, &target_graph);
    if let Some(mappings) =
        subgraph_isomorphisms_iter(&query_ref, &target_ref, &mut node_match, &mut edge_match)
    {
        for forward in mappings {
            if virtual_sites_correspond(query, target, &forward) {
                trace!(steps = steps.get(), n_atoms, "Isomorphism found.");
                return Ok(Some(AtomMapping::new(forward)));
            }
        }
    }

    if let Some(limit) = limit.filter(|&limit| steps.get() > limit) {
        warn!(
            limit,
            n_atoms, "Isomorphism search aborted after reaching the step limit."
        );
        return Err(MoleculeError::IsomorphismSearchLimit { limit });
    }
    trace!(steps = steps.get(), n_atoms, "Search space exhausted without a match.");
    Ok(None)
}
