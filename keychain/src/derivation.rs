use crate::error::KeyError;
use crate::extended_key::HARDENED_OFFSET;
use std::fmt;
use std::str::FromStr;

/// A derivation path such as `m/0'/1/2h`, stored as raw child indices with
/// the hardened bit already applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    pub fn new(indices: Vec<u32>) -> Self {
        DerivationPath(indices)
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a path extended by one more step.
    pub fn child(&self, index: u32) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        DerivationPath(indices)
    }
}

impl From<Vec<u32>> for DerivationPath {
    fn from(indices: Vec<u32>) -> Self {
        DerivationPath(indices)
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a u32;
    type IntoIter = std::slice::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromStr for DerivationPath {
    type Err = KeyError;

    /// Parses `m`, `m/44'/0'/0'/0/0` or the same without the `m/` prefix.
    /// Hardened steps are marked with `'`, `h` or `H`.
    fn from_str(s: &str) -> Result<Self, KeyError> {
        let invalid = || KeyError::InvalidDerivationPath(s.to_string());
        let trimmed = s.trim();
        let steps = if trimmed == "m" || trimmed == "M" || trimmed.is_empty() {
            return Ok(DerivationPath::default());
        } else if let Some(rest) = trimmed
            .strip_prefix("m/")
            .or_else(|| trimmed.strip_prefix("M/"))
        {
            rest
        } else {
            trimmed
        };

        let mut indices = Vec::new();
        for part in steps.split('/') {
            let (digits, hardened) = match part.strip_suffix(['\'', 'h', 'H']) {
                Some(digits) => (digits, true),
                None => (part, false),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let index: u32 = digits.parse().map_err(|_| invalid())?;
            if index >= HARDENED_OFFSET {
                return Err(invalid());
            }
            indices.push(if hardened { index | HARDENED_OFFSET } else { index });
        }
        Ok(DerivationPath(indices))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for &index in &self.0 {
            if index & HARDENED_OFFSET != 0 {
                write!(f, "/{}'", index & !HARDENED_OFFSET)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let path: DerivationPath = "m/0'/1/2'/2/1000000000".parse().unwrap();
        assert_eq!(
            path.indices(),
            &[HARDENED_OFFSET, 1, HARDENED_OFFSET + 2, 2, 1000000000]
        );
        assert_eq!(path.to_string(), "m/0'/1/2'/2/1000000000");
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn hardened_markers_and_prefixes() {
        let a: DerivationPath = "m/44h/0H/0'".parse().unwrap();
        let b: DerivationPath = "44'/0'/0'".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "m/44'/0'/0'");
    }

    #[test]
    fn master_path_is_empty() {
        for s in ["m", "M", ""] {
            let path: DerivationPath = s.parse().unwrap();
            assert!(path.is_empty());
            assert_eq!(path.to_string(), "m");
        }
    }

    #[test]
    fn child_appends_a_step() {
        let path: DerivationPath = "m/0'".parse().unwrap();
        assert_eq!(path.child(7).to_string(), "m/0'/7");
    }

    #[test]
    fn invalid_paths() {
        for s in ["m//1", "m/abc", "m/1/", "m/-1", "m/+1", "m/2147483648", "m/1''", "x/1"] {
            assert!(
                matches!(s.parse::<DerivationPath>(), Err(KeyError::InvalidDerivationPath(_))),
                "{s} should not parse"
            );
        }
    }
}
