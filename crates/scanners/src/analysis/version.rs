//! Solidity version reasoning for version-aware detection.
//!
//! The pragma constraint is stored verbatim by the context pass; this
//! module extracts the first `major.minor.patch` triple from it. Anything
//! that fails to parse is treated as requiring overflow guards, failing
//! toward flagging.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidityVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SolidityVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn is_at_least(&self, major: u32, minor: u32, patch: u32) -> bool {
        match self.major.cmp(&major) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match self.minor.cmp(&minor) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => self.patch >= patch,
            },
        }
    }

    pub fn has_builtin_overflow_protection(&self) -> bool {
        self.is_at_least(0, 8, 0)
    }
}

impl PartialOrd for SolidityVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SolidityVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

/// Whether arithmetic in a file compiled under `constraint` needs SafeMath
/// or explicit checks. A missing or unparseable constraint requires guards.
pub fn requires_overflow_guard(constraint: Option<&str>) -> bool {
    match constraint.and_then(first_version_triple) {
        Some(version) => !version.has_builtin_overflow_protection(),
        None => true,
    }
}

/// First `x.y.z` triple anywhere in the constraint, so ranges like
/// `>=0.7.0 <0.9.0` resolve to their lower bound.
pub fn first_version_triple(constraint: &str) -> Option<SolidityVersion> {
    let bytes = constraint.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        if let Some(version) = parse_triple_at(constraint, i) {
            return Some(version);
        }
        while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
            i += 1;
        }
    }

    None
}

fn parse_triple_at(constraint: &str, start: usize) -> Option<SolidityVersion> {
    let bytes = constraint.as_bytes();
    let mut parts = [0u32; 3];
    let mut i = start;

    for (index, part) in parts.iter_mut().enumerate() {
        let digits_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == digits_start {
            return None;
        }
        *part = constraint[digits_start..i].parse().ok()?;

        if index < 2 {
            if i < bytes.len() && bytes[i] == b'.' {
                i += 1;
            } else {
                return None;
            }
        }
    }

    Some(SolidityVersion::new(parts[0], parts[1], parts[2]))
}
