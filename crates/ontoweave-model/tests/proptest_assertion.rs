// SPDX-License-Identifier: Apache-2.0

use ontoweave_model::{RawAssertion, RequiredField};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn field() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[a-z_]{1,12}".prop_map(Some),
    ]
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn complete_iff_no_field_is_missing(
        subject in field(),
        relation in field(),
        object in field(),
    ) {
        let raw = RawAssertion {
            subject: subject.clone(),
            relation: relation.clone(),
            object: object.clone(),
            provenance: "doc".to_string(),
        };
        let all_present = [&subject, &relation, &object]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.is_empty()));
        let missing = raw.missing_fields();
        prop_assert_eq!(missing.is_empty(), all_present);
        prop_assert_eq!(
            missing.contains(&RequiredField::Relation),
            relation.as_deref().map_or(true, str::is_empty)
        );
        prop_assert_eq!(raw.into_complete().is_ok(), all_present);
    }
}
