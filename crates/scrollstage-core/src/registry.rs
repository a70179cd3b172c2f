#![forbid(unsafe_code)]

//! Section registration with an explicit readiness barrier.
//!
//! Each pinned section registers its scroll range and settle ratio when its
//! host component mounts. Mount order is not under our control, so the
//! registry tolerates out-of-order and delayed calls and keeps its list
//! sorted by range start regardless of arrival order.
//!
//! # Readiness
//!
//! The snap resolver must never be built against a partial list — missing
//! sections would silently change which settle point is globally nearest.
//! Rather than waiting a fixed delay after first mount, the registry is a
//! countdown barrier: it is constructed with the number of registration
//! attempts to expect and reports [`SectionRegistry::is_ready`] once that
//! many have *resolved*. A malformed registration still consumes its slot,
//! so one broken section degrades to "no pinning there" instead of wedging
//! the whole page behind a barrier that never completes.
//!
//! # Invariants
//!
//! 1. `sections()` is always sorted ascending by `range.start`; equal starts
//!    keep registration order.
//! 2. Every stored section has a valid range and a settle ratio in `[0, 1]`.
//! 3. `is_ready()` iff resolved registration attempts ≥ expected count.

use crate::geometry::PinnedRange;

/// Settle ratio used when a section does not override it: the geometric
/// center of the pinned range.
pub const DEFAULT_SETTLE_RATIO: f64 = 0.5;

/// Opaque handle to a registered section, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(u32);

/// A registered pinned section. The range is in pixel scroll coordinates.
#[derive(Debug, Clone)]
pub struct Section {
    /// Registration handle.
    pub id: SectionId,
    /// Host-facing name, used only for diagnostics.
    pub name: String,
    /// Pinned scroll range in pixels; always valid (`start < end`).
    pub range: PinnedRange,
    /// Rest-point position within the range, in `[0, 1]`.
    pub settle_ratio: f64,
}

/// Registration failures. All are absorbed by the caller as "this section
/// doesn't pin" — nothing here is fatal to the presentation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RegistryError {
    /// `start >= end` or a non-finite bound.
    #[error("invalid pinned range [{start}, {end}] for section `{name}`")]
    InvalidRange {
        /// Section name as given at registration.
        name: String,
        /// Offending start, pixels.
        start: f64,
        /// Offending end, pixels.
        end: f64,
    },
    /// Settle ratio outside `[0, 1]`.
    #[error("settle ratio {ratio} for section `{name}` is outside [0, 1]")]
    InvalidSettleRatio {
        /// Section name as given at registration.
        name: String,
        /// Offending ratio.
        ratio: f64,
    },
    /// Unregister of a handle that was never issued or already removed.
    #[error("unknown section id {0:?}")]
    UnknownSection(SectionId),
}

/// Ordered collection of pinned sections plus the readiness barrier.
///
/// Owned by the top-level page controller and passed to whoever needs the
/// section list — registration is an explicit call on this object, never an
/// ambient side effect of mounting.
#[derive(Debug)]
pub struct SectionRegistry {
    /// Sorted ascending by `range.start` (invariant 1).
    sections: Vec<Section>,
    next_id: u32,
    expected: usize,
    resolved: usize,
}

impl SectionRegistry {
    /// Create a registry expecting `expected` registration attempts before
    /// it reports ready.
    #[must_use]
    pub fn with_expected(expected: usize) -> Self {
        Self {
            sections: Vec::with_capacity(expected),
            next_id: 0,
            expected,
            resolved: 0,
        }
    }

    /// Register a pinned section.
    ///
    /// Consumes one barrier slot whether or not the registration is valid;
    /// invalid ranges and ratios are dropped from the candidate set with a
    /// diagnostic and an error the caller may ignore.
    pub fn register(
        &mut self,
        name: &str,
        range: PinnedRange,
        settle_ratio: f64,
    ) -> Result<SectionId, RegistryError> {
        self.resolved += 1;

        if !range.is_valid() {
            tracing::warn!(
                section = name,
                start = range.start,
                end = range.end,
                "dropping section with invalid pinned range"
            );
            return Err(RegistryError::InvalidRange {
                name: name.to_string(),
                start: range.start,
                end: range.end,
            });
        }
        if !(0.0..=1.0).contains(&settle_ratio) || !settle_ratio.is_finite() {
            tracing::warn!(
                section = name,
                ratio = settle_ratio,
                "dropping section with out-of-range settle ratio"
            );
            return Err(RegistryError::InvalidSettleRatio {
                name: name.to_string(),
                ratio: settle_ratio,
            });
        }

        let id = SectionId(self.next_id);
        self.next_id += 1;

        let section = Section {
            id,
            name: name.to_string(),
            range,
            settle_ratio,
        };
        // Insert sorted by start; `<=` keeps earlier registrations first
        // among equal starts.
        let pos = self
            .sections
            .partition_point(|s| s.range.start <= range.start);
        self.sections.insert(pos, section);

        tracing::debug!(
            section = name,
            id = id.0,
            start = range.start,
            end = range.end,
            ratio = settle_ratio,
            "registered pinned section"
        );
        Ok(id)
    }

    /// Reverse a registration on section teardown, releasing its barrier
    /// slot.
    pub fn unregister(&mut self, id: SectionId) -> Result<(), RegistryError> {
        let pos = self
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or(RegistryError::UnknownSection(id))?;
        let removed = self.sections.remove(pos);
        self.resolved = self.resolved.saturating_sub(1);
        tracing::debug!(section = %removed.name, id = id.0, "unregistered pinned section");
        Ok(())
    }

    /// All live sections, sorted ascending by range start.
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Look up a section by handle.
    #[must_use]
    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Whether every expected registration attempt has resolved.
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.resolved >= self.expected
    }

    /// Number of live sections (may be less than expected when some were
    /// dropped).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no sections are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: f64, end: f64) -> PinnedRange {
        PinnedRange::new(start, end)
    }

    #[test]
    fn out_of_order_registration_is_sorted() {
        let mut reg = SectionRegistry::with_expected(3);
        reg.register("third", range(600.0, 900.0), 0.5).unwrap();
        reg.register("first", range(0.0, 200.0), 0.5).unwrap();
        reg.register("second", range(300.0, 500.0), 0.5).unwrap();

        let names: Vec<_> = reg.sections().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert!(reg.is_ready());
    }

    #[test]
    fn equal_starts_keep_registration_order() {
        let mut reg = SectionRegistry::with_expected(2);
        let a = reg.register("a", range(100.0, 200.0), 0.5).unwrap();
        let b = reg.register("b", range(100.0, 300.0), 0.5).unwrap();
        assert_eq!(reg.sections()[0].id, a);
        assert_eq!(reg.sections()[1].id, b);
    }

    #[test]
    fn not_ready_until_all_resolve() {
        let mut reg = SectionRegistry::with_expected(2);
        assert!(!reg.is_ready());
        reg.register("a", range(0.0, 100.0), 0.5).unwrap();
        assert!(!reg.is_ready());
        reg.register("b", range(200.0, 300.0), 0.5).unwrap();
        assert!(reg.is_ready());
    }

    #[test]
    fn invalid_range_consumes_slot_but_is_dropped() {
        let mut reg = SectionRegistry::with_expected(2);
        let err = reg.register("bad", range(500.0, 500.0), 0.5).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidRange { .. }));
        reg.register("good", range(0.0, 100.0), 0.5).unwrap();

        // Barrier completed despite the drop; only the good section is live.
        assert!(reg.is_ready());
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.sections()[0].name, "good");
    }

    #[test]
    fn invalid_settle_ratio_is_dropped() {
        let mut reg = SectionRegistry::with_expected(1);
        let err = reg.register("bad", range(0.0, 100.0), 1.5).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidSettleRatio { .. }));
        assert!(reg.is_ready());
        assert!(reg.is_empty());
    }

    #[test]
    fn nan_range_is_dropped() {
        let mut reg = SectionRegistry::with_expected(1);
        assert!(reg.register("nan", range(f64::NAN, 100.0), 0.5).is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn unregister_reverses_registration_and_slot() {
        let mut reg = SectionRegistry::with_expected(2);
        let a = reg.register("a", range(0.0, 100.0), 0.5).unwrap();
        reg.register("b", range(200.0, 300.0), 0.5).unwrap();
        assert!(reg.is_ready());

        reg.unregister(a).unwrap();
        assert_eq!(reg.len(), 1);
        assert!(!reg.is_ready());
        assert!(reg.get(a).is_none());

        // Double unregister is an error, not a panic.
        assert_eq!(reg.unregister(a), Err(RegistryError::UnknownSection(a)));
    }

    #[test]
    fn zero_expected_is_immediately_ready() {
        let reg = SectionRegistry::with_expected(0);
        assert!(reg.is_ready());
        assert!(reg.is_empty());
    }

    #[test]
    fn get_by_id() {
        let mut reg = SectionRegistry::with_expected(1);
        let id = reg.register("only", range(0.0, 100.0), 0.52).unwrap();
        let s = reg.get(id).unwrap();
        assert_eq!(s.name, "only");
        assert!((s.settle_ratio - 0.52).abs() < 1e-12);
    }
}
