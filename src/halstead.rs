//! Halstead complexity accumulation and derivation.
//!
//! Tokens are classified by walker descriptors into operators and
//! operands; each category accumulates into a [`TokenBag`]. After a walk,
//! [`HalsteadMetrics::finalize`] fills in the derived scalars:
//!
//! - Length (N): `N1 + N2`
//! - Vocabulary (n): `n1 + n2`
//! - Calculated length (N^): `n1 * log2(n1) + n2 * log2(n2)`
//! - Volume (V): `N * log2(n)`
//! - Difficulty (D): `(n1 / 2) * (N2 / n2)`
//! - Effort (E): `D * V`
//! - Bugs (B): `V / 3000`
//! - Time (T): `E / 18` seconds

use rustc_hash::FxHashSet;
use serde::Serialize;

/// Multiset of identifiers for one Halstead category.
///
/// Identifiers are kept in first-seen order; re-encounters bump `total`
/// only. Invariant: `distinct == identifiers.len()`.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TokenBag {
    /// Distinct identifier count (n).
    pub distinct: u32,
    /// Total occurrence count (N).
    pub total: u32,
    /// Distinct identifiers in first-seen order.
    pub identifiers: Vec<String>,
    #[serde(skip)]
    seen: FxHashSet<String>,
}

impl TokenBag {
    /// Record one occurrence of `identifier`.
    pub fn record(&mut self, identifier: &str) {
        if self.seen.insert(identifier.to_owned()) {
            self.identifiers.push(identifier.to_owned());
            self.distinct += 1;
        }
        self.total += 1;
    }
}

impl<'de> serde::Deserialize<'de> for TokenBag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Repr {
            distinct: u32,
            total: u32,
            identifiers: Vec<String>,
        }

        let repr = Repr::deserialize(deserializer)?;
        let seen = repr.identifiers.iter().cloned().collect();
        Ok(Self {
            distinct: repr.distinct,
            total: repr.total,
            identifiers: repr.identifiers,
            seen,
        })
    }
}

/// Halstead metrics for one scope: raw bags plus derived scalars.
#[derive(Debug, Default, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct HalsteadMetrics {
    /// Operator occurrences.
    pub operators: TokenBag,
    /// Operand occurrences.
    pub operands: TokenBag,
    /// Program length: N = N1 + N2.
    pub length: u32,
    /// Vocabulary: n = n1 + n2.
    pub vocabulary: u32,
    /// Calculated (estimated) length: n1 * log2(n1) + n2 * log2(n2).
    pub calculated_length: f64,
    /// Difficulty: (n1 / 2) * (N2 / n2).
    pub difficulty: f64,
    /// Volume: N * log2(n), program size in bits.
    pub volume: f64,
    /// Effort: D * V.
    pub effort: f64,
    /// Estimated delivered bugs: V / 3000.
    pub bugs: f64,
    /// Estimated implementation time: E / 18 seconds.
    pub time: f64,
}

impl HalsteadMetrics {
    /// Fill in the derived scalars from the accumulated bags.
    ///
    /// A scope with no tokens at all gets zeros across the board. A
    /// vocabulary with no distinct operands takes an operand-density
    /// factor of 1 instead of dividing by zero.
    pub fn finalize(&mut self) {
        self.length = self.operators.total + self.operands.total;
        if self.length == 0 {
            self.vocabulary = 0;
            self.calculated_length = 0.0;
            self.difficulty = 0.0;
            self.volume = 0.0;
            self.effort = 0.0;
            self.bugs = 0.0;
            self.time = 0.0;
            return;
        }

        let n1 = self.operators.distinct;
        let n2 = self.operands.distinct;
        self.vocabulary = n1 + n2;
        self.calculated_length = if n1 > 0 && n2 > 0 {
            f64::from(n1) * f64::from(n1).log2() + f64::from(n2) * f64::from(n2).log2()
        } else {
            0.0
        };

        let operand_density = if n2 == 0 {
            1.0
        } else {
            f64::from(self.operands.total) / f64::from(n2)
        };
        self.difficulty = f64::from(n1) / 2.0 * operand_density;
        self.volume = f64::from(self.length) * f64::from(self.vocabulary).log2();
        self.effort = self.difficulty * self.volume;
        self.bugs = self.volume / 3000.0;
        self.time = self.effort / 18.0;
    }
}
