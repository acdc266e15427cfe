use phf::{Map, phf_map};
use std::collections::BTreeMap;
use std::fmt::Write;

pub const MAX_ATOMIC_NUMBER: u8 = 118;

const CARBON: u8 = 6;
const HYDROGEN: u8 = 1;

static ELEMENT_SYMBOLS: [&str; MAX_ATOMIC_NUMBER as usize] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg",
    "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr",
    "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd",
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf",
    "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po",
    "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm",
    "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs",
    "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

static ATOMIC_NUMBERS: Map<&'static str, u8> = phf_map! {
    "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6, "N" => 7, "O" => 8,
    "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12, "Al" => 13, "Si" => 14, "P" => 15, "S" => 16,
    "Cl" => 17, "Ar" => 18, "K" => 19, "Ca" => 20, "Sc" => 21, "Ti" => 22, "V" => 23, "Cr" => 24,
    "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28, "Cu" => 29, "Zn" => 30, "Ga" => 31, "Ge" => 32,
    "As" => 33, "Se" => 34, "Br" => 35, "Kr" => 36, "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40,
    "Nb" => 41, "Mo" => 42, "Tc" => 43, "Ru" => 44, "Rh" => 45, "Pd" => 46, "Ag" => 47, "Cd" => 48,
    "In" => 49, "Sn" => 50, "Sb" => 51, "Te" => 52, "I" => 53, "Xe" => 54, "Cs" => 55, "Ba" => 56,
    "La" => 57, "Ce" => 58, "Pr" => 59, "Nd" => 60, "Pm" => 61, "Sm" => 62, "Eu" => 63, "Gd" => 64,
    "Tb" => 65, "Dy" => 66, "Ho" => 67, "Er" => 68, "Tm" => 69, "Yb" => 70, "Lu" => 71, "Hf" => 72,
    "Ta" => 73, "W" => 74, "Re" => 75, "Os" => 76, "Ir" => 77, "Pt" => 78, "Au" => 79, "Hg" => 80,
    "Tl" => 81, "Pb" => 82, "Bi" => 83, "Po" => 84, "At" => 85, "Rn" => 86, "Fr" => 87, "Ra" => 88,
    "Ac" => 89, "Th" => 90, "Pa" => 91, "U" => 92, "Np" => 93, "Pu" => 94, "Am" => 95, "Cm" => 96,
    "Bk" => 97, "Cf" => 98, "Es" => 99, "Fm" => 100, "Md" => 101, "No" => 102, "Lr" => 103, "Rf" => 104,
    "Db" => 105, "Sg" => 106, "Bh" => 107, "Hs" => 108, "Mt" => 109, "Ds" => 110, "Rg" => 111, "Cn" => 112,
    "Nh" => 113, "Fl" => 114, "Mc" => 115, "Lv" => 116, "Ts" => 117, "Og" => 118,
};

pub fn is_valid_atomic_number(atomic_number: u8) -> bool {
    (1..=MAX_ATOMIC_NUMBER).contains(&atomic_number)
}

pub fn symbol(atomic_number: u8) -> Option<&'static str> {
    if !is_valid_atomic_number(atomic_number) {
        return None;
    }
    ELEMENT_SYMBOLS.get(usize::from(atomic_number - 1)).copied()
}

/// Looks up an atomic number by element symbol, ignoring surrounding whitespace
/// and letter case ("CL", "cl" and "Cl" all resolve to chlorine).
pub fn atomic_number(symbol: &str) -> Option<u8> {
    let mut chars = symbol.trim().chars();
    let first = chars.next()?;
    let normalized: String = first
        .to_uppercase()
        .chain(chars.flat_map(char::to_lowercase))
        .collect();
    ATOMIC_NUMBERS.get(normalized.as_str()).copied()
}

/// Builds a Hill-system formula: carbon, then hydrogen, then the remaining
/// elements alphabetically. Without carbon every element is alphabetical.
pub fn hill_formula(atomic_numbers: impl IntoIterator<Item = u8>) -> String {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for number in atomic_numbers {
        *counts.entry(number).or_default() += 1;
    }

    let mut ordered: Vec<(&'static str, usize)> = Vec::with_capacity(counts.len());
    let has_carbon = counts.contains_key(&CARBON);
    if has_carbon {
        for leading in [CARBON, HYDROGEN] {
            if let (Some(count), Some(sym)) = (counts.remove(&leading), symbol(leading)) {
                ordered.push((sym, count));
            }
        }
    }
    let mut rest: Vec<(&'static str, usize)> = counts
        .into_iter()
        .map(|(number, count)| (symbol(number).unwrap_or("X"), count))
        .collect();
    rest.sort_unstable();
    ordered.extend(rest);

    let mut formula = String::new();
    for (sym, count) in ordered {
        formula.push_str(sym);
        if count > 1 {
            let _ = write!(formula, "{count}");
        }
    }
    formula
}
