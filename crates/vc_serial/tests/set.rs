mod fixtures;

use fixtures::set::{Company, Employee};
use vc_serial::collections::{DynamicSet, Set};
use vc_serial::desc::TypeDesc;
use vc_serial::format::{Direction, Format};
use vc_serial::handler::{SetHandler, SubscribingHandler};
use vc_serial::reflect::List;
use vc_serial::{HandlerError, SerialError};

const COMPANY_JSON: &str = r#"{"name":"Apple Computer, Inc.","employees":[{"name":"Joost Nijhuis"},{"name":"John Doe"}]}"#;

const COMPANY_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<company name=\"Apple Computer, Inc.\">
  <employees>
    <employee name=\"Joost Nijhuis\"/>
    <employee name=\"John Doe\"/>
  </employees>
</company>
";

#[test]
fn subscribes_every_format_in_both_directions() {
    let subs = SetHandler.subscribing_methods();

    assert_eq!(subs.len(), 6);
    assert!(subs.iter().all(|s| s.type_name == "Set"));
    assert_eq!(
        subs.iter().filter(|s| s.direction == Direction::Deserialization).count(),
        3
    );
    assert_eq!(subs[0].method, "serialize_set");
    assert_eq!(subs[1].method, "deserialize_set");
}

#[test]
fn missing_element_type() {
    let serializer = fixtures::serializer();
    let err = serializer
        .deserialize::<Set<Employee>>("[]", Format::Json)
        .unwrap_err();

    assert!(matches!(
        err,
        SerialError::Handler(HandlerError::MissingTypeValue { type_name: "Set" })
    ));
}

#[test]
fn too_many_parameters() {
    let serializer = fixtures::serializer();
    let ty = TypeDesc::parse("Set<string, string>").unwrap();
    let err = serializer.deserialize_type("<result/>", &ty, Format::Xml).unwrap_err();

    assert!(matches!(
        err,
        SerialError::Handler(HandlerError::TooManyParameters { type_name: "Set", count: 2 })
    ));
}

#[test]
fn serialize_json() {
    let serializer = fixtures::serializer();
    let json = serializer.serialize(&Company::apple(), Format::Json).unwrap();

    assert_eq!(json, COMPANY_JSON);
}

#[test]
fn deserialize_json() {
    let serializer = fixtures::serializer();
    let company: Company = serializer.deserialize(COMPANY_JSON, Format::Json).unwrap();

    assert_eq!(company, Company::apple());
    assert!(company.employees.contains(&Employee::new("John Doe")));
}

#[test]
fn serialize_xml() {
    let serializer = fixtures::serializer();
    let xml = serializer.serialize(&Company::apple(), Format::Xml).unwrap();

    assert_eq!(xml, COMPANY_XML);
}

#[test]
fn deserialize_xml() {
    let serializer = fixtures::serializer();
    let company: Company = serializer.deserialize(COMPANY_XML, Format::Xml).unwrap();

    assert_eq!(company, Company::apple());
}

#[test]
fn duplicates_collapse() {
    let serializer = fixtures::serializer();
    let company: Company = serializer
        .deserialize(
            r#"{"name":"Apple","employees":[{"name":"John Doe"},{"name":"John Doe"}]}"#,
            Format::Json,
        )
        .unwrap();

    assert_eq!(company.employees.len(), 1);
    assert_eq!(company.employees.as_slice(), [Employee::new("John Doe")]);
}

#[test]
fn decoded_form_is_unique_and_typed() {
    let serializer = fixtures::serializer();
    let ty = TypeDesc::parse("Set<string>").unwrap();
    let value = serializer
        .deserialize_type(r#"["a", "b", "a"]"#, &ty, Format::Json)
        .unwrap();

    let dynamic = value.downcast::<DynamicSet>().unwrap();
    assert_eq!(dynamic.element_type().name(), "string");
    assert_eq!(dynamic.len(), 2);

    let json = serializer.serialize_as(&*dynamic, &ty, Format::Json).unwrap();
    assert_eq!(json, r#"["a","b"]"#);
}

#[test]
fn decoded_set_drops_equal_structs() {
    let serializer = fixtures::serializer();
    let ty = TypeDesc::parse("Set<set.Employee>").unwrap();
    let value = serializer
        .deserialize_type(
            r#"[{"name":"John Doe"},{"name":"Joost Nijhuis"},{"name":"John Doe"}]"#,
            &ty,
            Format::Json,
        )
        .unwrap();

    let json = serializer.serialize_as(&*value, &ty, Format::Json).unwrap();
    assert_eq!(json, r#"[{"name":"John Doe"},{"name":"Joost Nijhuis"}]"#);
}

#[test]
fn missing_and_null_sets_are_empty() {
    let serializer = fixtures::serializer();
    for input in [r#"{"name":"Apple"}"#, r#"{"name":"Apple","employees":null}"#] {
        let company: Company = serializer.deserialize(input, Format::Json).unwrap();
        assert_eq!(company, Company::new("Apple"));
    }
}
