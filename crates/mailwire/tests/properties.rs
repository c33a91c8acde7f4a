//! Property tests for the recipient model.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use mailwire::Message;
use proptest::prelude::*;

fn email() -> impl Strategy<Value = String> {
    "[a-z]{1,10}@[a-z]{1,6}\\.(com|org|net)"
}

proptest! {
    #[test]
    fn prop_from_is_independent_of_input_shape(addr in email()) {
        let mut bare = Message::new();
        bare.set_from(addr.as_str()).unwrap();

        let mut mapped = Message::new();
        mapped.set_from([(addr.as_str(), "")]).unwrap();

        prop_assert_eq!(bare.from(), mapped.from());
    }

    #[test]
    fn prop_resolve_is_idempotent(
        to in proptest::collection::vec(email(), 0..4),
        cc in proptest::collection::vec(email(), 0..4),
        bcc in proptest::collection::vec(email(), 0..4),
    ) {
        let mut message = Message::new();
        for addr in &to {
            message.set_to(addr.as_str()).unwrap();
        }
        for addr in &cc {
            message.set_cc(addr.as_str()).unwrap();
        }
        for addr in &bcc {
            message.set_bcc(addr.as_str()).unwrap();
        }

        let once = message.resolve();
        let twice = once.clone().resolve();
        prop_assert_eq!(once.recipients(), twice.recipients());
    }

    #[test]
    fn prop_cc_and_bcc_are_disjoint(
        cc in proptest::collection::hash_set("c[a-z]{1,8}@cc\\.com", 1..5),
        bcc in proptest::collection::hash_set("b[a-z]{1,8}@bcc\\.com", 1..5),
        main in email(),
    ) {
        let cc: Vec<String> = cc.into_iter().collect();
        let bcc: Vec<String> = bcc.into_iter().collect();
        let cc_pairs: Vec<(String, String)> = cc
            .iter()
            .enumerate()
            .map(|(i, e)| (i.to_string(), e.clone()))
            .collect();
        let bcc_pairs: Vec<(String, String)> = bcc
            .iter()
            .enumerate()
            .map(|(i, e)| (i.to_string(), e.clone()))
            .collect();

        let mut message = Message::new();
        message.set_to(main.as_str()).unwrap();
        message.set_cc(cc_pairs).unwrap();
        message.set_bcc(bcc_pairs).unwrap();

        let cc_view: HashSet<String> = message.cc().into_iter().collect();
        let bcc_view: HashSet<String> = message
            .bcc()
            .split(',')
            .map(str::to_string)
            .collect();

        prop_assert_eq!(&cc_view, &cc.iter().cloned().collect::<HashSet<_>>());
        prop_assert_eq!(&bcc_view, &bcc.iter().cloned().collect::<HashSet<_>>());
        prop_assert!(cc_view.is_disjoint(&bcc_view));
    }
}
