use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;
use webclient_sdk::dom::{Element, Node, Window};
use webclient_sdk::host::memory::MemoryHost;
use webclient_sdk::prelude::*;
use webclient_sdk::{walk, NodeFilter, TokenList, Value};

fn token_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        Just("a"),
        Just("B"),
        Just("card"),
        Just("Card"),
        Just("is-open"),
        Just("x_1"),
        Just("ÄÖ"),
    ]
    .prop_map(str::to_string)
    .boxed()
}

fn separator_strategy() -> BoxedStrategy<String> {
    prop_oneof![Just(" "), Just("  "), Just("\t"), Just("\n"), Just(" \r\n ")]
        .prop_map(str::to_string)
        .boxed()
}

fn class_value_strategy() -> BoxedStrategy<String> {
    (vec((token_strategy(), separator_strategy()), 0..8), separator_strategy())
        .prop_map(|(parts, lead)| {
            let mut value = lead;
            for (token, separator) in parts {
                value.push_str(&token);
                value.push_str(&separator);
            }
            value
        })
        .boxed()
}

fn value_strategy() -> BoxedStrategy<Value> {
    prop_oneof![
        Just(Value::Null),
        Just(Value::Undefined),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
    .boxed()
}

fn normalized(value: &str) -> String {
    let mut seen: Vec<String> = Vec::new();
    for token in value.split_whitespace().map(str::to_lowercase) {
        if !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen.join(" ")
}

fn assert_token_list_round_trip(value: &str) -> TestCaseResult {
    let list = TokenList::parse(value);
    let serialized = list.to_string();
    prop_assert_eq!(&serialized, &normalized(value));
    prop_assert_eq!(TokenList::parse(&serialized).to_string(), serialized);
    Ok(())
}

fn node_strategy() -> BoxedStrategy<u8> {
    prop_oneof![Just(1u8), Just(3u8), Just(8u8)].boxed()
}

fn assert_walk_matches_types(kinds: &[u8], mask: NodeFilter) -> TestCaseResult {
    let host = MemoryHost::new();
    let parent = host.element("div");
    for kind in kinds {
        let child = match kind {
            1 => host.element("span"),
            3 => host.text("t"),
            _ => host.comment("c"),
        };
        parent.call("appendChild", &[child]);
    }
    let first = Node::from_host(parent.get("firstChild"));
    let nodes = walk(first, mask, None);

    let expected = kinds
        .iter()
        .filter(|kind| match kind {
            1 => mask.contains(NodeFilter::SHOW_ELEMENT),
            3 => mask.contains(NodeFilter::SHOW_TEXT),
            _ => mask.contains(NodeFilter::SHOW_COMMENT),
        })
        .count();
    prop_assert_eq!(nodes.len(), expected);
    for node in &nodes {
        let bit = node.node_type().map(NodeFilter::of).unwrap_or(NodeFilter::empty());
        prop_assert!(mask.contains(NodeFilter::SHOW_ALL) || mask.intersects(bit));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn token_lists_serialize_to_their_normal_form(value in class_value_strategy()) {
        assert_token_list_round_trip(&value)?;
    }

    #[test]
    fn toggling_twice_restores_the_set(value in class_value_strategy(), token in token_strategy()) {
        let original = TokenList::parse(&value);
        let mut list = original.clone();
        let added = list.toggle(&token);
        prop_assert_eq!(added, !original.contains(&token));
        list.toggle(&token);
        prop_assert_eq!(list, original);
    }

    #[test]
    fn decoding_is_total_and_rejects_only_absent_values(value in value_strategy()) {
        let absent = value.is_nullish();
        prop_assert_eq!(Element::from_host(value.clone()).is_none(), absent);
        prop_assert_eq!(Window::from_host(value.clone()).is_none(), absent);
        prop_assert_eq!(Value::from_host(value).is_none(), absent);
    }

    #[test]
    fn absent_wrappers_answer_with_zero_values(name in "[a-zA-Z]{1,12}") {
        let absent: Option<Element> = None;
        prop_assert!(absent.prop(&name).is_undefined());
        prop_assert!(absent.call_method(&name, &[]).is_undefined());
        prop_assert_eq!(absent.get_attribute(&name), None);
        prop_assert!(!absent.has_attribute(&name));
        prop_assert!(Value::Null.get(&name).is_undefined());
    }

    #[test]
    fn walks_keep_exactly_the_masked_types(
        kinds in vec(node_strategy(), 0..10),
        element in any::<bool>(),
        text in any::<bool>(),
        comment in any::<bool>(),
    ) {
        let mut mask = NodeFilter::empty();
        mask.set(NodeFilter::SHOW_ELEMENT, element);
        mask.set(NodeFilter::SHOW_TEXT, text);
        mask.set(NodeFilter::SHOW_COMMENT, comment);
        assert_walk_matches_types(&kinds, mask)?;
    }
}
