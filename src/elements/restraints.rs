//! Restraint conditions at a node

use serde::{Deserialize, Serialize};

use crate::error::{check_len, FrameError, FrameResult};

/// Boundary condition of a single DOF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Restraint {
    #[default]
    Free,
    Restrained,
}

impl Restraint {
    pub fn is_restrained(self) -> bool {
        self == Self::Restrained
    }
}

impl TryFrom<char> for Restraint {
    type Error = FrameError;

    /// 'r' = restrained, 'f' = free
    fn try_from(code: char) -> FrameResult<Self> {
        match code {
            'r' | 'R' => Ok(Self::Restrained),
            'f' | 'F' => Ok(Self::Free),
            other => Err(FrameError::InvalidInput(format!(
                "restraint code must be 'r' or 'f', got '{other}'"
            ))),
        }
    }
}

/// Per-DOF restraint flags and prescribed displacements of one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restraints {
    flags: Vec<Restraint>,
    displacements: Vec<f64>,
}

impl Restraints {
    /// All DOFs free
    pub fn free(ndof: usize) -> Self {
        Self {
            flags: vec![Restraint::Free; ndof],
            displacements: vec![0.0; ndof],
        }
    }

    /// All DOFs restrained
    pub fn fixed(ndof: usize) -> Self {
        Self {
            flags: vec![Restraint::Restrained; ndof],
            displacements: vec![0.0; ndof],
        }
    }

    /// Parse a code string such as "rrf" (one character per DOF)
    pub fn from_codes(codes: &str, ndof: usize) -> FrameResult<Self> {
        let flags = codes
            .chars()
            .map(Restraint::try_from)
            .collect::<FrameResult<Vec<_>>>()?;
        let mut restraints = Self::free(ndof);
        restraints.set_flags(&flags)?;
        Ok(restraints)
    }

    /// Replace the restraint flags; length must equal the node's DOF count
    pub fn set_flags(&mut self, flags: &[Restraint]) -> FrameResult<()> {
        check_len("restraint flags", self.flags.len(), flags.len())?;
        self.flags = flags.to_vec();
        Ok(())
    }

    /// Replace the prescribed displacements; length must equal the node's DOF count
    pub fn set_displacements(&mut self, displacements: &[f64]) -> FrameResult<()> {
        check_len("prescribed displacements", self.displacements.len(), displacements.len())?;
        self.displacements = displacements.to_vec();
        Ok(())
    }

    pub fn with_displacements(mut self, displacements: &[f64]) -> FrameResult<Self> {
        self.set_displacements(displacements)?;
        Ok(self)
    }

    pub fn flags(&self) -> &[Restraint] {
        &self.flags
    }

    pub fn displacements(&self) -> &[f64] {
        &self.displacements
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.flags.iter().any(|f| f.is_restrained())
    }

    /// Count number of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.flags.iter().filter(|f| f.is_restrained()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_restraints() {
        let restraints = Restraints::fixed(3);
        assert!(restraints.is_supported());
        assert_eq!(restraints.num_restrained(), 3);
    }

    #[test]
    fn test_codes() {
        let pinned = Restraints::from_codes("rrf", 3).unwrap();
        assert_eq!(
            pinned.flags(),
            &[Restraint::Restrained, Restraint::Restrained, Restraint::Free]
        );
        assert!(Restraints::from_codes("rx", 2).is_err());
        assert!(Restraints::from_codes("rr", 3).is_err());
    }

    #[test]
    fn test_length_mismatch() {
        let mut restraints = Restraints::free(3);
        assert!(restraints.set_flags(&[Restraint::Free; 2]).is_err());
        assert!(restraints.set_displacements(&[0.0; 4]).is_err());
        assert!(restraints.set_displacements(&[0.0, -0.01, 0.0]).is_ok());
        assert_eq!(restraints.displacements()[1], -0.01);
    }
}
