//! Signing-order renumbering
//!
//! Pure list transforms behind every recipient edit. Each operation borrows
//! the current [`RecipientList`] and returns the next one; operations that
//! can be a no-op return [`Cow::Borrowed`] so callers see "nothing changed"
//! without comparing lists.
//!
//! After any structural change [`assign_positions`] is the single place that
//! decides signing orders: `position + 1` under sequential ordering, nothing
//! under parallel ordering.

use signorder_types::{OrderingMode, RecipientError, RecipientList, Signer, SignerDraft};
use std::borrow::Cow;
use std::num::IntErrorKind;

/// Renumber every signer from its list position
///
/// Sequential: `signing_order = position + 1`. Parallel: cleared.
pub fn assign_positions(signers: &mut [Signer], mode: OrderingMode) {
    for (signer, position) in signers.iter_mut().zip(1u32..) {
        signer.signing_order = mode.is_sequential().then_some(position);
    }
}

/// Parse raw order text from an input box
///
/// Returns `None` for blank or non-integer text. Any integer is accepted,
/// clamping happens later against the list length. Integers outside `i64`
/// saturate so they still clamp to the first or last position.
#[must_use]
pub fn parse_requested_order(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<i64>() {
        Ok(order) => Some(order),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Clamp a 1-based requested order into a 0-based index of a `len` list
fn clamp_position(requested: i64, len: usize) -> usize {
    let max = i64::try_from(len).unwrap_or(i64::MAX).max(1);
    let clamped = requested.clamp(1, max);
    usize::try_from(clamped - 1).unwrap_or(0)
}

/// Move a signer to the position typed into its order box
///
/// Blank or non-integer input is a no-op. Integers clamp into `1..=N`, so
/// `0` and negatives land first and anything past `N` lands last.
///
/// # Errors
/// [`RecipientError::IndexOutOfBounds`] when `index` is not in the list
///
/// # Example
/// ```
/// use signorder_engine::renumber::renumber_by_manual_entry;
/// use signorder_types::{OrderingMode, RecipientList, RecipientRole, Signer};
///
/// let signers = ["A", "B", "C"]
///     .iter()
///     .zip(1..)
///     .map(|(n, o)| Signer::new(*n, format!("{n}@example.com"), RecipientRole::Signer).with_order(o))
///     .collect();
/// let list = RecipientList::from_parts(signers, OrderingMode::Sequential, false).unwrap();
///
/// let next = renumber_by_manual_entry(&list, 0, "3").unwrap();
/// let names: Vec<_> = next.signers().iter().map(|s| s.name.as_str()).collect();
/// assert_eq!(names, ["B", "C", "A"]);
/// assert_eq!(next.orders(), [Some(1), Some(2), Some(3)]);
/// ```
pub fn renumber_by_manual_entry<'a>(
    list: &'a RecipientList,
    index: usize,
    requested_order: &str,
) -> Result<Cow<'a, RecipientList>, RecipientError> {
    list.signer_at(index)?;

    let Some(requested) = parse_requested_order(requested_order) else {
        return Ok(Cow::Borrowed(list));
    };

    let destination = clamp_position(requested, list.len());
    relocate_and_renumber(list, index, destination).map(Cow::Owned)
}

/// Apply a completed drag-and-drop
///
/// `destination == None` means the drag was cancelled and is a no-op.
///
/// # Errors
/// [`RecipientError::IndexOutOfBounds`] when either index is not in the list
pub fn renumber_by_move(
    list: &RecipientList,
    source: usize,
    destination: Option<usize>,
) -> Result<Cow<'_, RecipientList>, RecipientError> {
    list.signer_at(source)?;

    let Some(destination) = destination else {
        return Ok(Cow::Borrowed(list));
    };

    relocate_and_renumber(list, source, destination).map(Cow::Owned)
}

fn relocate_and_renumber(
    list: &RecipientList,
    source: usize,
    destination: usize,
) -> Result<RecipientList, RecipientError> {
    let mut next = list.clone();
    next.relocate(source, destination)?;
    let mode = next.mode();
    assign_positions(next.signers_mut(), mode);
    Ok(next)
}

/// Switch ordering mode
///
/// Sequential numbers signers by their current position, keeping list order.
/// Parallel clears every order and the dictate-next-signer flag.
#[must_use]
pub fn set_ordering_mode(list: &RecipientList, mode: OrderingMode) -> RecipientList {
    let mut next = list.clone();
    next.set_mode(mode);
    assign_positions(next.signers_mut(), mode);
    if !mode.is_sequential() {
        next.set_allow_dictate_next_signer(false);
    }
    next
}

/// Append a new signer built from `draft`
///
/// The new signer gets a fresh form id and, under sequential ordering, the
/// order after the last signer's. Existing signers are untouched.
#[must_use]
pub fn add_signer(list: &RecipientList, draft: SignerDraft) -> RecipientList {
    let mut signer = draft.into_signer();
    if list.mode().is_sequential() {
        let last = list
            .signers()
            .last()
            .and_then(|s| s.signing_order)
            .unwrap_or(0);
        signer.signing_order = Some(last.saturating_add(1));
    }

    let mut next = list.clone();
    next.push(signer);
    next
}

/// Remove the signer at `index`
///
/// Under sequential ordering the remaining signers are renumbered so the
/// orders stay `1..=N`.
///
/// # Errors
/// - [`RecipientError::IndexOutOfBounds`]
/// - [`RecipientError::LastSigner`] when it is the only signer
/// - [`RecipientError::SignerDisabled`] when the signer is fixed in place
pub fn remove_signer(list: &RecipientList, index: usize) -> Result<RecipientList, RecipientError> {
    let target = list.signer_at(index)?;
    if list.len() == 1 {
        return Err(RecipientError::LastSigner);
    }
    if target.disabled {
        return Err(RecipientError::SignerDisabled { index });
    }

    let mut next = list.clone();
    next.remove(index)?;
    if next.mode().is_sequential() {
        assign_positions(next.signers_mut(), OrderingMode::Sequential);
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use signorder_test_utils::{names, orders, parallel_list, sequential_list};
    use signorder_types::RecipientRole;

    #[test]
    fn parse_requested_order_cases() {
        assert_eq!(parse_requested_order(""), None);
        assert_eq!(parse_requested_order("   "), None);
        assert_eq!(parse_requested_order("abc"), None);
        assert_eq!(parse_requested_order("1.5"), None);
        assert_eq!(parse_requested_order(" 3 "), Some(3));
        assert_eq!(parse_requested_order("-2"), Some(-2));
        assert_eq!(parse_requested_order("0"), Some(0));
        assert_eq!(parse_requested_order("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_requested_order("-99999999999999999999"), Some(i64::MIN));
        assert_eq!(parse_requested_order("99999999999999999999x"), None);
    }

    #[test]
    fn manual_entry_huge_integers_clamp() {
        let list = sequential_list(&["A", "B", "C"]);

        let next = renumber_by_manual_entry(&list, 0, "99999999999999999999").unwrap();
        assert!(matches!(next, Cow::Owned(_)));
        assert_eq!(names(&next), vec!["B", "C", "A"]);
        assert_eq!(orders(&next), vec![Some(1), Some(2), Some(3)]);

        let next = renumber_by_manual_entry(&list, 2, "-99999999999999999999").unwrap();
        assert_eq!(names(&next), vec!["C", "A", "B"]);
    }

    #[test]
    fn clamp_position_cases() {
        assert_eq!(clamp_position(0, 3), 0);
        assert_eq!(clamp_position(-7, 3), 0);
        assert_eq!(clamp_position(1, 3), 0);
        assert_eq!(clamp_position(3, 3), 2);
        assert_eq!(clamp_position(99, 3), 2);
        assert_eq!(clamp_position(i64::MAX, 1), 0);
        assert_eq!(clamp_position(i64::MIN, 3), 0);
    }

    #[test]
    fn manual_entry_moves_first_to_last() {
        let list = sequential_list(&["A", "B", "C"]);
        let next = renumber_by_manual_entry(&list, 0, "3").unwrap();
        assert_eq!(names(&next), vec!["B", "C", "A"]);
        assert_eq!(orders(&next), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn manual_entry_moves_last_to_first() {
        let list = sequential_list(&["A", "B", "C"]);
        let next = renumber_by_manual_entry(&list, 2, "1").unwrap();
        assert_eq!(names(&next), vec!["C", "A", "B"]);
        assert_eq!(orders(&next), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn manual_entry_blank_is_borrowed() {
        let list = sequential_list(&["A", "B"]);
        let next = renumber_by_manual_entry(&list, 1, "  ").unwrap();
        assert!(matches!(next, Cow::Borrowed(_)));

        let next = renumber_by_manual_entry(&list, 1, "first").unwrap();
        assert!(matches!(next, Cow::Borrowed(_)));
    }

    #[test]
    fn manual_entry_parallel_leaves_orders_empty() {
        let list = parallel_list(&["A", "B", "C"]);
        let next = renumber_by_manual_entry(&list, 2, "2").unwrap();
        assert_eq!(names(&next), vec!["A", "C", "B"]);
        assert_eq!(orders(&next), vec![None, None, None]);
    }

    #[test]
    fn manual_entry_bad_index() {
        let list = sequential_list(&["A"]);
        let err = renumber_by_manual_entry(&list, 1, "1").unwrap_err();
        assert_eq!(err, RecipientError::IndexOutOfBounds { index: 1, len: 1 });
    }

    #[test]
    fn move_swaps_two() {
        let list = sequential_list(&["A", "B"]);
        let next = renumber_by_move(&list, 0, Some(1)).unwrap();
        assert_eq!(names(&next), vec!["B", "A"]);
        assert_eq!(orders(&next), vec![Some(1), Some(2)]);
    }

    #[test]
    fn move_without_destination_is_borrowed() {
        let list = sequential_list(&["A", "B"]);
        let next = renumber_by_move(&list, 0, None).unwrap();
        assert!(matches!(next, Cow::Borrowed(_)));
    }

    #[test]
    fn move_bad_destination() {
        let list = sequential_list(&["A", "B"]);
        let err = renumber_by_move(&list, 0, Some(5)).unwrap_err();
        assert_eq!(err, RecipientError::IndexOutOfBounds { index: 5, len: 2 });
    }

    #[test]
    fn set_mode_parallel_clears_orders_and_dictate() {
        let mut list = sequential_list(&["A", "B"]);
        list.set_allow_dictate_next_signer(true);

        let next = set_ordering_mode(&list, OrderingMode::Parallel);
        assert_eq!(next.mode(), OrderingMode::Parallel);
        assert_eq!(orders(&next), vec![None, None]);
        assert!(!next.allow_dictate_next_signer());
        assert_eq!(names(&next), vec!["A", "B"]);
    }

    #[test]
    fn set_mode_sequential_numbers_by_position() {
        let list = parallel_list(&["C", "A", "B"]);
        let next = set_ordering_mode(&list, OrderingMode::Sequential);
        assert_eq!(names(&next), vec!["C", "A", "B"]);
        assert_eq!(orders(&next), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn add_appends_with_next_order() {
        let list = sequential_list(&["A", "B"]);
        let next = add_signer(&list, SignerDraft::default());
        assert_eq!(next.len(), 3);
        assert_eq!(orders(&next), vec![Some(1), Some(2), Some(3)]);

        let added = &next.signers()[2];
        assert!(added.name.is_empty());
        assert!(added.email.is_empty());
        assert_eq!(added.role, RecipientRole::Signer);
        assert!(list.position_of(added.form_id).is_none());
    }

    #[test]
    fn add_parallel_has_no_order() {
        let list = parallel_list(&["A"]);
        let next = add_signer(&list, SignerDraft::new("Bo", "bo@example.com"));
        assert_eq!(orders(&next), vec![None, None]);
        assert_eq!(next.signers()[1].name, "Bo");
    }

    #[test]
    fn add_does_not_renumber_existing() {
        let mut list = sequential_list(&["A", "B"]);
        list.signers_mut()[1].signing_order = Some(5);

        let next = add_signer(&list, SignerDraft::default());
        assert_eq!(orders(&next), vec![Some(1), Some(5), Some(6)]);
    }

    #[test]
    fn remove_renumbers_sequential() {
        let list = sequential_list(&["A", "B", "C"]);
        let next = remove_signer(&list, 0).unwrap();
        assert_eq!(names(&next), vec!["B", "C"]);
        assert_eq!(orders(&next), vec![Some(1), Some(2)]);
    }

    #[test]
    fn remove_last_signer_refused() {
        let list = sequential_list(&["A"]);
        assert_eq!(remove_signer(&list, 0).unwrap_err(), RecipientError::LastSigner);
    }

    #[test]
    fn remove_disabled_refused() {
        let mut list = parallel_list(&["A", "B"]);
        list.signers_mut()[1].disabled = true;
        assert_eq!(
            remove_signer(&list, 1).unwrap_err(),
            RecipientError::SignerDisabled { index: 1 }
        );
    }
}
