use super::atom::Atom;
use super::bond::{Bond, BondOrder};
use super::molecule::Molecule;

/// Builds a molecule from atomic numbers and single bonds.
pub(crate) fn build(atomic_numbers: &[u8], bonds: &[(usize, usize)]) -> Molecule {
    let mut molecule = Molecule::new();
    for &z in atomic_numbers {
        molecule.add_atom(Atom::new(z)).unwrap();
    }
    for &(a, b) in bonds {
        molecule.add_bond(Bond::new(a, b, BondOrder::Single)).unwrap();
    }
    molecule
}

/// O0, H1, H2.
pub(crate) fn water() -> Molecule {
    build(&[8, 1, 1], &[(0, 1), (0, 2)])
}

/// H0, O1, H2.
pub(crate) fn water_hydrogen_first() -> Molecule {
    build(&[1, 8, 1], &[(1, 0), (1, 2)])
}

/// C0 with H1..H4.
pub(crate) fn methane() -> Molecule {
    build(&[6, 1, 1, 1, 1], &[(0, 1), (0, 2), (0, 3), (0, 4)])
}

/// C0-C1, H2..H4 on C0 and H5..H7 on C1.
pub(crate) fn ethane() -> Molecule {
    build(
        &[6, 6, 1, 1, 1, 1, 1, 1],
        &[(0, 1), (0, 2), (0, 3), (0, 4), (1, 5), (1, 6), (1, 7)],
    )
}

/// C0-C1-O2, H3..H5 on C0, H6..H7 on C1 and H8 on O2.
pub(crate) fn ethanol() -> Molecule {
    build(
        &[6, 6, 8, 1, 1, 1, 1, 1, 1],
        &[
            (0, 1),
            (1, 2),
            (0, 3),
            (0, 4),
            (0, 5),
            (1, 6),
            (1, 7),
            (2, 8),
        ],
    )
}

/// C0-O1-C2, H3..H5 on C0 and H6..H8 on C2.
pub(crate) fn dimethyl_ether() -> Molecule {
    build(
        &[6, 8, 6, 1, 1, 1, 1, 1, 1],
        &[
            (0, 1),
            (1, 2),
            (0, 3),
            (0, 4),
            (0, 5),
            (2, 6),
            (2, 7),
            (2, 8),
        ],
    )
}
