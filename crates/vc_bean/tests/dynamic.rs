use std::sync::Arc;

use vc_bean::derive::Bean;
use vc_bean::dyna::{BasicDynaBean, DynaBean, DynaClass, DynaProperty, LazyDynaBean, WrapDynaBean};
use vc_bean::{Bean, BeanContext, ErrorKind};

#[derive(Bean, Clone, Default, Debug, PartialEq)]
struct Engine {
    power: u32,
}

#[test]
fn lazy_declares_on_write() {
    let utils = BeanContext::new().property_utils();
    let mut bean = LazyDynaBean::new();

    assert!(!bean.dyna_class().contains("color"));
    assert!(utils.get_property(&bean, "color").unwrap().is_none());

    utils.set_property(&mut bean, "color", Box::new(String::from("red"))).unwrap();
    let color = utils.get_property(&bean, "color").unwrap().unwrap();
    assert_eq!(color.downcast_ref::<String>().unwrap(), "red");

    let declared = bean.dyna_class().get("color").unwrap();
    assert!(declared.type_info().unwrap().is::<String>());

    // The declaration now types later writes.
    let err = utils.set_property(&mut bean, "color", Box::new(3_u8)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConversionFailure);
}

#[test]
fn lazy_containers() {
    let utils = BeanContext::new().bean_utils();
    let mut bean = LazyDynaBean::new();

    utils.assign(&mut bean, "sizes[2]", Box::new(7_u16)).unwrap();
    utils.assign(&mut bean, "labels(en)", Box::new("hello")).unwrap();

    assert_eq!(bean.size("sizes"), 3);
    assert_eq!(bean.size("labels"), 1);
    assert_eq!(utils.get_property(&bean, "labels(en)").unwrap().as_deref(), Some("hello"));
    assert!(utils.get_property(&bean, "sizes[0]").unwrap().is_none());

    bean.set_restricted(true);
    let err = utils.assign(&mut bean, "other", Box::new("x")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownProperty);
}

#[test]
fn basic_paths_and_conversion() {
    let class = Arc::new(DynaClass::with_properties(
        "car",
        [
            DynaProperty::of::<String>("model"),
            DynaProperty::of::<Engine>("engine"),
            DynaProperty::of::<Vec<u8>>("seats"),
        ],
    ));
    let utils = BeanContext::new().bean_utils();
    let mut car = BasicDynaBean::new(class);

    let err = utils.assign(&mut car, "engine.power", Box::new("90")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NestedNull);

    car.set_simple("engine", Box::new(Engine::default())).unwrap();
    utils.assign(&mut car, "engine.power", Box::new("90")).unwrap();
    assert_eq!(car.get("engine").unwrap().unwrap().downcast_ref::<Engine>(), Some(&Engine { power: 90 }));

    let input: Vec<(&str, Box<dyn Bean>)> = vec![("model", Box::new("T")), ("wings", Box::new("2"))];
    utils.populate(&mut car, input).unwrap();
    assert_eq!(utils.get_property(&car, "model").unwrap().as_deref(), Some("T"));

    let err = utils.assign(&mut car, "wings", Box::new("2")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownProperty);
}

#[test]
fn wrapped_beans() {
    let utils = BeanContext::new().property_utils();
    let mut wrapped = WrapDynaBean::new(Engine { power: 40 });

    utils.set_property(&mut wrapped, "power", Box::new(41_u32)).unwrap();
    assert_eq!(wrapped.instance().downcast_ref::<Engine>().unwrap().power, 41);

    let err = wrapped.remove("power", "key").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    let err = wrapped.contains("power", "key").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
}
