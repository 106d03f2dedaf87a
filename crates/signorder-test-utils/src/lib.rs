//! Testing utilities for Signorder workspace
//!
//! Shared test helpers, fixtures, and strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use signorder_types::{OrderingMode, RecipientList, RecipientRole, Signer, SignerId};

pub fn signer(name: &str) -> Signer {
    Signer::new(name, format!("{}@example.com", name.to_lowercase()), RecipientRole::Signer)
}

/// Sequential list numbered 1..=N in the given order
pub fn sequential_list(names: &[&str]) -> RecipientList {
    let signers = names
        .iter()
        .zip(1u32..)
        .map(|(name, order)| signer(name).with_order(order))
        .collect();
    RecipientList::from_parts(signers, OrderingMode::Sequential, false).unwrap()
}

pub fn parallel_list(names: &[&str]) -> RecipientList {
    RecipientList::parallel(names.iter().map(|name| signer(name)).collect()).unwrap()
}

/// Names in display order
pub fn names(list: &RecipientList) -> Vec<&str> {
    list.signers().iter().map(|s| s.name.as_str()).collect()
}

pub fn orders(list: &RecipientList) -> Vec<Option<u32>> {
    list.orders()
}

pub fn sorted_ids(list: &RecipientList) -> Vec<SignerId> {
    let mut ids = list.ids();
    ids.sort();
    ids
}

/// Consistently numbered list of 1..=12 signers in either mode
pub fn arb_list() -> impl Strategy<Value = RecipientList> {
    (1usize..=12, prop_oneof![Just(OrderingMode::Sequential), Just(OrderingMode::Parallel)])
        .prop_map(|(len, mode)| {
            let names: Vec<String> = (0..len).map(|i| format!("s{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            match mode {
                OrderingMode::Sequential => sequential_list(&refs),
                OrderingMode::Parallel => parallel_list(&refs),
            }
        })
}

/// List plus an index inside it
pub fn arb_list_and_index() -> impl Strategy<Value = (RecipientList, usize)> {
    arb_list().prop_flat_map(|list| {
        let len = list.len();
        (Just(list), 0..len)
    })
}
