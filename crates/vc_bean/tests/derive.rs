use std::sync::atomic::{AtomicU32, Ordering};

use vc_bean::derive::Bean;
use vc_bean::info::{BeanKind, Typed};
use vc_bean::ops::Properties;
use vc_bean::{Bean, BeanContext, ErrorKind};

#[derive(Bean, Default)]
#[bean(default)]
struct Session {
    #[bean(rename = "userName")]
    user: String,
    #[bean(read_only)]
    id: u64,
    #[bean(write_only)]
    token: String,
    #[bean(skip)]
    hits: AtomicU32,
}

#[derive(Bean, Clone, Debug, PartialEq)]
#[bean(clone, partial_eq, debug)]
struct Pair<T: Clone + PartialEq + core::fmt::Debug> {
    left: T,
    right: Option<T>,
}

#[derive(Bean)]
struct Plain {
    x: i32,
    y: Vec<i32>,
}

#[test]
fn descriptors_follow_attributes() {
    let session = Session::default();
    let info = session.bean_info();

    let names: Vec<&str> = info.iter().map(|d| d.name()).collect();
    assert_eq!(names, ["userName", "id", "token"]);
    assert!(!info.get("id").unwrap().is_writeable());
    assert!(!info.get("token").unwrap().is_readable());
    assert!(session.property("hits").is_none());

    assert_eq!(Session::type_info().kind(), BeanKind::Struct);
    assert!(Session::type_info().has_default());
    assert!(!Plain::type_info().has_default());
}

#[test]
fn access_directions() {
    let utils = BeanContext::new().bean_utils();
    let mut session = Session::default();
    session.hits.store(3, Ordering::Relaxed);

    utils.assign(&mut session, "userName", Box::new("ada")).unwrap();
    utils.assign(&mut session, "token", Box::new("secret")).unwrap();
    assert_eq!((session.user.as_str(), session.token.as_str()), ("ada", "secret"));

    let err = utils.assign(&mut session, "id", Box::new("7")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownProperty);
    let err = utils.get_property(&session, "token").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownProperty);
    assert!(utils.get_property(&session, "user").is_err());

    // Skipped fields are rebuilt from the default.
    let clone = session.bean_clone().unwrap().take::<Session>().unwrap();
    assert_eq!(clone.user, "ada");
    assert_eq!(clone.hits.load(Ordering::Relaxed), 0);
}

#[test]
fn generic_beans() {
    let utils = BeanContext::new().property_utils();
    let mut pair = Pair {
        left: 1_u8,
        right: None,
    };

    utils.set_property(&mut pair, "right", Box::new(Some(2_u8))).unwrap();
    assert_eq!(pair.right, Some(2));

    let copy = pair.bean_clone().unwrap();
    assert_eq!(pair.bean_partial_eq(&*copy), Some(true));
    assert_eq!(pair.bean_partial_eq(&Pair { left: 1_u8, right: None }), Some(false));
    assert_eq!(format!("{:?}", pair.as_bean()), "Pair { left: 1, right: Some(2) }");
}

#[test]
fn fallbacks_without_std_traits() {
    let plain = Plain { x: 1, y: vec![2, 3] };

    let copy = plain.bean_clone().unwrap();
    assert_eq!(plain.bean_partial_eq(&*copy), Some(true));
    assert_eq!(plain.bean_partial_eq(&Plain { x: 1, y: vec![] }), Some(false));
    assert_eq!(plain.bean_partial_eq(&1_i32), Some(false));
    assert_eq!(format!("{:?}", plain.as_bean()), "Plain { x: 1, y: [2, 3] }");
}
