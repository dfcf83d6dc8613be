use std::collections::BTreeMap;

use vc_bean::access::{AccessStep, PathAccessor, Selector};
use vc_bean::derive::Bean;
use vc_bean::{Bean, BeanContext, ErrorKind, PropertyUtils};

#[derive(Bean, Clone, Default, Debug, PartialEq)]
struct Address {
    city: String,
}

#[derive(Bean, Clone, Default)]
struct Person {
    name: String,
    age: u32,
    address: Option<Address>,
    phones: Vec<String>,
    slots: [u8; 3],
    homes: BTreeMap<String, Address>,
}

fn person() -> Person {
    Person {
        name: "Ada".into(),
        age: 36,
        address: Some(Address {
            city: "London".into(),
        }),
        phones: vec!["555-0100".into(), "555-0199".into()],
        slots: [1, 2, 3],
        homes: BTreeMap::from([(
            String::from("summer"),
            Address {
                city: "Brighton".into(),
            },
        )]),
    }
}

fn text(utils: &PropertyUtils, bean: &dyn Bean, path: &str) -> String {
    let value = utils.get_property(bean, path).unwrap().unwrap();
    value.downcast_ref::<String>().unwrap().clone()
}

#[test]
fn simple_round_trip() {
    let utils = BeanContext::new().property_utils();
    let mut bean = person();

    utils.set_property(&mut bean, "name", Box::new(String::from("Grace"))).unwrap();
    utils.set_property(&mut bean, "age", Box::new(85_u32)).unwrap();

    assert_eq!(text(&utils, &bean, "name"), "Grace");
    let age = utils.get_property(&bean, "age").unwrap().unwrap();
    assert_eq!(age.downcast_ref::<u32>(), Some(&85));

    let err = utils.set_property(&mut bean, "age", Box::new(1_u64)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConversionFailure);
}

#[test]
fn nested_values() {
    let utils = BeanContext::new().property_utils();
    let mut bean = person();

    assert_eq!(text(&utils, &bean, "address.city"), "London");
    assert_eq!(text(&utils, &bean, "homes(summer).city"), "Brighton");
    assert_eq!(text(&utils, &bean, "phones[1]"), "555-0199");

    utils
        .set_property(&mut bean, "homes(summer).city", Box::new(String::from("Hove")))
        .unwrap();
    assert_eq!(bean.homes["summer"].city, "Hove");
    assert!(utils.get_property(&bean, "homes(winter)").unwrap().is_none());
}

#[test]
fn null_in_the_middle() {
    let utils = BeanContext::new().property_utils();
    let mut bean = person();
    bean.address = None;

    // A null leaf is a value.
    assert!(utils.get_property(&bean, "address").unwrap().is_none());

    // A null step is a broken path.
    let err = utils.get_property(&bean, "address.city").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestedNull);
    let err = utils
        .set_property(&mut bean, "address.city", Box::new(String::from("Paris")))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestedNull);

    let err = utils.get_property(&bean, "homes(winter).city").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestedNull);
}

#[test]
fn index_bounds() {
    let utils = BeanContext::new().property_utils();
    let bean = person();

    for i in 0..3 {
        let path = format!("slots[{i}]");
        let value = utils.get_property(&bean, &path).unwrap().unwrap();
        assert_eq!(value.downcast_ref::<u8>(), Some(&(i as u8 + 1)));
    }
    for path in ["slots[3]", "phones[2]"] {
        let err = utils.get_property(&bean, path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange, "{path}");
    }

    let err = utils.get_property(&bean, "name[0]").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownProperty);
}

#[test]
fn malformed_paths() {
    let utils = BeanContext::new().property_utils();
    let bean = person();

    for path in ["", "name.", "phones[x]", "phones[1", "homes(a", "a..b", "phones[-1]"] {
        let err = utils.get_property(&bean, path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedExpression, "{path:?}");
    }
}

#[test]
fn key_spans_keep_dots() {
    let path = PathAccessor::parse("a(b.c)[2].d").unwrap();
    let steps: Vec<AccessStep<'_>> = path.steps().iter().map(|s| s.step.clone()).collect();

    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0], AccessStep::mapped("a", "b.c"));
    assert_eq!(steps[1], AccessStep::nameless(Selector::Index(2)));
    assert_eq!(steps[2], AccessStep::simple("d"));
    assert_eq!(path.to_string(), "a(b.c)[2].d");
}
