//! Recipient list and ordering mode
//!
//! [`RecipientList`] is the unit the form-state container hands over and
//! receives back wholesale after each edit.

use crate::error::RecipientError;
use crate::signer::{Signer, SignerId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether signers act in a defined sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderingMode {
    /// Signers must act one after another
    Sequential,

    /// No ordering constraint
    #[default]
    Parallel,
}

impl OrderingMode {
    /// Check if signing orders are tracked in this mode
    #[inline]
    #[must_use]
    pub fn is_sequential(&self) -> bool {
        matches!(self, Self::Sequential)
    }
}

impl fmt::Display for OrderingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("SEQUENTIAL"),
            Self::Parallel => f.write_str("PARALLEL"),
        }
    }
}

impl FromStr for OrderingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SEQUENTIAL" => Ok(Self::Sequential),
            "PARALLEL" => Ok(Self::Parallel),
            other => Err(format!("unknown ordering mode: {other}")),
        }
    }
}

/// Ordered, never-empty sequence of signers plus its ordering settings
///
/// # Invariants
/// - at least one signer
/// - list position is the display order (and the tie-break everywhere)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientList {
    /// Ordering mode
    signing_order: OrderingMode,

    /// Recipients may pick who signs after them (sequential only)
    allow_dictate_next_signer: bool,

    /// Signers in display order
    signers: Vec<Signer>,
}

impl RecipientList {
    /// Create list from its parts
    ///
    /// # Errors
    /// [`RecipientError::EmptyList`] when `signers` is empty
    pub fn from_parts(
        signers: Vec<Signer>,
        mode: OrderingMode,
        allow_dictate_next_signer: bool,
    ) -> Result<Self, RecipientError> {
        if signers.is_empty() {
            return Err(RecipientError::EmptyList);
        }
        Ok(Self {
            signing_order: mode,
            allow_dictate_next_signer,
            signers,
        })
    }

    /// Create parallel list
    ///
    /// # Errors
    /// [`RecipientError::EmptyList`] when `signers` is empty
    pub fn parallel(signers: Vec<Signer>) -> Result<Self, RecipientError> {
        Self::from_parts(signers, OrderingMode::Parallel, false)
    }

    /// Signers in display order
    #[inline]
    #[must_use]
    pub fn signers(&self) -> &[Signer] {
        &self.signers
    }

    /// Ordering mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> OrderingMode {
        self.signing_order
    }

    /// Dictate-next-signer setting
    #[inline]
    #[must_use]
    pub fn allow_dictate_next_signer(&self) -> bool {
        self.allow_dictate_next_signer
    }

    /// Number of signers (never zero)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.signers.len()
    }

    /// Always false; present for API symmetry with slices
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// Signer at `index`
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Signer> {
        self.signers.get(index)
    }

    /// Bounds-checked access used by every index-taking edit
    ///
    /// # Errors
    /// [`RecipientError::IndexOutOfBounds`]
    pub fn signer_at(&self, index: usize) -> Result<&Signer, RecipientError> {
        self.signers.get(index).ok_or(RecipientError::IndexOutOfBounds {
            index,
            len: self.signers.len(),
        })
    }

    /// Position of the signer with `id`
    #[must_use]
    pub fn position_of(&self, id: SignerId) -> Option<usize> {
        self.signers.iter().position(|s| s.form_id == id)
    }

    /// Form ids in display order
    #[must_use]
    pub fn ids(&self) -> Vec<SignerId> {
        self.signers.iter().map(|s| s.form_id).collect()
    }

    /// Signing orders in display order
    #[must_use]
    pub fn orders(&self) -> Vec<Option<u32>> {
        self.signers.iter().map(|s| s.signing_order).collect()
    }

    /// Check the numbering matches the mode
    ///
    /// Sequential: orders are exactly `1..=N` in list order.
    /// Parallel: no signer carries an order.
    #[must_use]
    pub fn is_consistently_numbered(&self) -> bool {
        match self.signing_order {
            OrderingMode::Sequential => self
                .signers
                .iter()
                .zip(1u32..)
                .all(|(s, expected)| s.signing_order == Some(expected)),
            OrderingMode::Parallel => self.signers.iter().all(|s| s.signing_order.is_none()),
        }
    }

    /// Mutable signers; a slice, so the length cannot change through it
    #[inline]
    pub fn signers_mut(&mut self) -> &mut [Signer] {
        &mut self.signers
    }

    /// Set ordering mode without touching any signer
    #[inline]
    pub fn set_mode(&mut self, mode: OrderingMode) {
        self.signing_order = mode;
    }

    /// Set dictate-next-signer flag
    #[inline]
    pub fn set_allow_dictate_next_signer(&mut self, allow: bool) {
        self.allow_dictate_next_signer = allow;
    }

    /// Append a signer
    #[inline]
    pub fn push(&mut self, signer: Signer) {
        self.signers.push(signer);
    }

    /// Remove the signer at `index`
    ///
    /// # Errors
    /// - [`RecipientError::IndexOutOfBounds`]
    /// - [`RecipientError::LastSigner`] when it is the only signer
    pub fn remove(&mut self, index: usize) -> Result<Signer, RecipientError> {
        self.signer_at(index)?;
        if self.signers.len() == 1 {
            return Err(RecipientError::LastSigner);
        }
        Ok(self.signers.remove(index))
    }

    /// Move the signer at `source` to `destination`, shifting the ones between
    ///
    /// Same result as removing at `source` then inserting at `destination`.
    ///
    /// # Errors
    /// [`RecipientError::IndexOutOfBounds`] for either index
    pub fn relocate(&mut self, source: usize, destination: usize) -> Result<(), RecipientError> {
        self.signer_at(source)?;
        self.signer_at(destination)?;

        if source < destination {
            self.signers[source..=destination].rotate_left(1);
        } else if destination < source {
            self.signers[destination..=source].rotate_right(1);
        }
        Ok(())
    }

    /// Consume into parts
    #[must_use]
    pub fn into_parts(self) -> (Vec<Signer>, OrderingMode, bool) {
        (
            self.signers,
            self.signing_order,
            self.allow_dictate_next_signer,
        )
    }
}
