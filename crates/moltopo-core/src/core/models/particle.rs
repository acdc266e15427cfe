use super::atom::Atom;
use super::virtual_site::VirtualSite;

/// A borrowed particle of a molecule: either a real atom or a virtual site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Particle<'a> {
    Atom(&'a Atom),
    VirtualSite(&'a VirtualSite),
}

impl<'a> Particle<'a> {
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Self::Atom(atom) => atom.name.as_deref(),
            Self::VirtualSite(site) => site.name.as_deref(),
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Self::Atom(_))
    }

    pub fn as_atom(&self) -> Option<&'a Atom> {
        match self {
            Self::Atom(atom) => Some(atom),
            Self::VirtualSite(_) => None,
        }
    }

    pub fn as_virtual_site(&self) -> Option<&'a VirtualSite> {
        match self {
            Self::Atom(_) => None,
            Self::VirtualSite(site) => Some(site),
        }
    }
}
