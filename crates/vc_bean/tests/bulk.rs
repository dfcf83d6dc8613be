use std::collections::{BTreeMap, HashMap};

use vc_bean::derive::Bean;
use vc_bean::dyna::{DynaBean, LazyDynaBean};
use vc_bean::{Bean, BeanConfig, BeanContext, ErrorKind};

#[derive(Bean, Clone, Default, Debug)]
struct Account {
    owner: String,
    balance: i64,
    active: bool,
    tags: Vec<String>,
}

#[derive(Bean, Clone, Default)]
struct Contact {
    name: String,
    age: u32,
}

#[derive(Bean, Clone, Default)]
struct Badge {
    name: String,
}

#[derive(Bean, Clone, Default)]
struct Profile {
    extras: HashMap<String, Option<String>>,
    scores: Vec<Option<u16>>,
}

#[derive(Bean, Clone, Default)]
struct Holder {
    account: Option<Account>,
}

fn entries(pairs: &[(&'static str, &'static str)]) -> Vec<(&'static str, Box<dyn Bean>)> {
    pairs
        .iter()
        .map(|&(k, v)| (k, Box::new(v) as Box<dyn Bean>))
        .collect()
}

#[test]
fn populate_skips_unknown_names() {
    let utils = BeanContext::new().bean_utils();
    let mut account = Account {
        owner: "Ada".into(),
        ..Default::default()
    };

    let input = entries(&[("unknownProp", "v"), ("balance", "-250"), ("active", "yes")]);
    utils.populate(&mut account, input).unwrap();

    assert_eq!(account.balance, -250);
    assert!(account.active);
    assert_eq!(account.owner, "Ada");
    assert!(account.tags.is_empty());
}

#[test]
fn populate_surfaces_broken_paths() {
    let utils = BeanContext::new().bean_utils();
    let mut holder = Holder::default();

    let err = utils
        .populate(&mut holder, entries(&[("account.owner", "Ada")]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestedNull);

    holder.account = Some(Account::default());
    utils
        .populate(&mut holder, entries(&[("account.owner", "Ada"), ("account.nope", "x")]))
        .unwrap();
    assert_eq!(holder.account.as_ref().unwrap().owner, "Ada");

    let err = utils
        .populate(&mut holder, entries(&[("account.tags[3]", "x")]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
}

#[test]
fn conversion_strictness() {
    let context = BeanContext::new();
    let mut account = Account::default();

    let strict = context.bean_utils();
    let err = strict
        .populate(&mut account, entries(&[("balance", "lots")]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConversionFailure);

    let lenient = context.bean_utils_with(BeanConfig::new().lenient_conversion(true));
    lenient
        .populate(&mut account, entries(&[("balance", "lots"), ("owner", "Bo")]))
        .unwrap();
    assert_eq!((account.balance, account.owner.as_str()), (0, "Bo"));

    // Direct writes never skip.
    assert!(lenient.assign(&mut account, "balance", Box::new("lots")).is_err());
}

#[test]
fn optional_slots_in_containers() {
    let context = BeanContext::new();
    let utils = context.bean_utils();

    let mut counts: HashMap<String, Option<u32>> = HashMap::new();
    utils.assign(&mut counts, "k", Box::new("5")).unwrap();
    context.property_utils().set_property(&mut counts, "j", Box::new(6_u32)).unwrap();
    utils.populate(&mut counts, entries(&[("m", "7")])).unwrap();
    assert_eq!((counts["k"], counts["j"], counts["m"]), (Some(5), Some(6), Some(7)));

    let mut profile = Profile::default();
    let red = Box::new(String::from("red"));
    utils.assign(&mut profile, "extras(color)", red).unwrap();
    utils.assign(&mut profile, "extras(size)", Box::new(vc_bean::Null)).unwrap();
    assert_eq!(profile.extras["color"].as_deref(), Some("red"));
    assert_eq!(profile.extras["size"], None);

    utils.assign(&mut profile, "scores", Box::new(vec!["1", "2"])).unwrap();
    assert_eq!(profile.scores, [Some(1), Some(2)]);
}

#[test]
fn single_text_into_list() {
    let utils = BeanContext::new().bean_utils();
    let mut account = Account::default();

    utils.assign(&mut account, "tags", Box::new("a")).unwrap();
    assert_eq!(account.tags, ["a"]);

    utils.populate(&mut account, entries(&[("tags", "b")])).unwrap();
    assert_eq!(account.tags, ["b"]);
}

#[test]
fn copy_ignores_missing_destinations() {
    let utils = BeanContext::new().bean_utils();
    let source = Contact {
        name: "Grace".into(),
        age: 85,
    };
    let mut dest = Badge::default();

    utils.copy(&mut dest, &source).unwrap();
    assert_eq!(dest.name, source.name);
}

#[test]
fn copy_across_kinds() {
    let utils = BeanContext::new().bean_utils();
    let source = Contact {
        name: "Grace".into(),
        age: 85,
    };

    let mut lazy = LazyDynaBean::new();
    utils.copy(&mut lazy, &source).unwrap();
    assert_eq!(lazy.dyna_class().len(), 2);
    let age = lazy.get("age").unwrap().unwrap();
    assert_eq!(age.downcast_ref::<u32>(), Some(&85));

    let mut form: BTreeMap<String, String> = BTreeMap::new();
    utils.copy(&mut form, &lazy).unwrap();
    assert_eq!(form["name"], "Grace");
    assert_eq!(form["age"], "85");

    let mut back = Contact::default();
    utils.copy(&mut back, &form).unwrap();
    assert_eq!((back.name.as_str(), back.age), ("Grace", 85));
}

#[test]
fn text_views() {
    let utils = BeanContext::new().bean_utils();
    let account = Account {
        owner: "Ada".into(),
        balance: 12,
        active: true,
        tags: vec!["vip".into(), "new".into()],
    };

    assert_eq!(utils.get_property(&account, "balance").unwrap().as_deref(), Some("12"));
    assert_eq!(utils.get_property(&account, "tags").unwrap().as_deref(), Some("vip"));
    assert_eq!(
        utils.get_array_property(&account, "tags").unwrap(),
        Some(vec![String::from("vip"), String::from("new")])
    );

    let described = utils.describe(&account).unwrap();
    assert_eq!(described.len(), 4);
    assert_eq!(described["active"].as_deref(), Some("true"));

    let clone = utils.clone_bean(&account).unwrap();
    assert_eq!(clone.downcast_ref::<Account>().unwrap().owner, "Ada");
}
