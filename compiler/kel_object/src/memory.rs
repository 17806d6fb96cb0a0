//! Byte accounting for runtime allocations.
//!
//! The runtime charges an estimated size for every object and list growth
//! to a [`CountingPool`], which asks an upstream [`MemoryProvider`] before
//! admitting the charge. Hosts choose the provider: [`SystemProvider`]
//! admits everything, [`BudgetProvider`] enforces a fixed limit.

use std::fmt;

/// Upstream source of memory for a runtime.
pub trait MemoryProvider: Send {
    /// Admit `bytes` more on top of `in_use` already charged.
    fn reserve(&mut self, in_use: usize, bytes: usize) -> bool;

    /// Give back `bytes` previously admitted.
    fn release(&mut self, _bytes: usize) {}

    /// Hard limit, if the provider has one.
    fn limit(&self) -> Option<usize> {
        None
    }
}

/// Admits every request.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemProvider;

impl MemoryProvider for SystemProvider {
    fn reserve(&mut self, _in_use: usize, _bytes: usize) -> bool {
        true
    }
}

/// Refuses requests that would take the total past `limit` bytes.
#[derive(Copy, Clone, Debug)]
pub struct BudgetProvider {
    pub limit: usize,
}

impl BudgetProvider {
    pub fn new(limit: usize) -> Self {
        BudgetProvider { limit }
    }
}

impl MemoryProvider for BudgetProvider {
    fn reserve(&mut self, in_use: usize, bytes: usize) -> bool {
        in_use
            .checked_add(bytes)
            .is_some_and(|total| total <= self.limit)
    }

    fn limit(&self) -> Option<usize> {
        Some(self.limit)
    }
}

/// A refused charge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Refused {
    pub requested: usize,
    pub in_use: usize,
    pub limit: Option<usize>,
}

/// Running totals in front of a provider.
pub(crate) struct CountingPool {
    upstream: Box<dyn MemoryProvider>,
    allocated: usize,
    peak: usize,
}

impl CountingPool {
    pub fn new(upstream: Box<dyn MemoryProvider>) -> Self {
        CountingPool {
            upstream,
            allocated: 0,
            peak: 0,
        }
    }

    pub fn charge(&mut self, bytes: usize) -> Result<(), Refused> {
        if !self.upstream.reserve(self.allocated, bytes) {
            tracing::debug!(
                requested = bytes,
                in_use = self.allocated,
                "memory provider refused allocation"
            );
            return Err(Refused {
                requested: bytes,
                in_use: self.allocated,
                limit: self.upstream.limit(),
            });
        }
        self.allocated += bytes;
        self.peak = self.peak.max(self.allocated);
        Ok(())
    }

    pub fn release_all(&mut self) {
        self.upstream.release(self.allocated);
        self.allocated = 0;
    }

    pub fn allocated(&self) -> usize {
        self.allocated
    }

    pub fn peak(&self) -> usize {
        self.peak
    }
}

impl fmt::Debug for CountingPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountingPool")
            .field("allocated", &self.allocated)
            .field("peak", &self.peak)
            .field("limit", &self.upstream.limit())
            .finish_non_exhaustive()
    }
}
