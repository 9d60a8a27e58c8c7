mod fixtures;

use fixtures::union::{Book, Employee, Media, MediaContainer, Movie};
use fixtures::Age;
use vc_serial::desc::TypeDesc;
use vc_serial::format::Format;
use vc_serial::handler::{SubscribingHandler, UnionHandler};
use vc_serial::{HandlerError, SerialError};

const BOOK_JSON: &str =
    r#"{"media":{"__typename":"Book","title":"Design patterns","author":{"name":"John Doe"}}}"#;

const MOVIE_JSON: &str = r#"{"media":{"__typename":"Movie","title":"The matrix","rating":8.7}}"#;

fn handler_error(err: SerialError) -> HandlerError {
    match err {
        SerialError::Handler(err) => err,
        other => panic!("expected a handler error, got {other:?}"),
    }
}

#[test]
fn subscribes_union() {
    let subs = UnionHandler.subscribing_methods();

    assert_eq!(subs.len(), 6);
    assert!(subs.iter().all(|s| s.type_name == "union"));
    assert_eq!(subs[0].method, "serialize_union");
    assert_eq!(subs[1].method, "deserialize_union");
}

#[test]
fn serialize_book() {
    let serializer = fixtures::serializer();
    let container = MediaContainer {
        media: Media::Book(Book::design_patterns()),
    };

    assert_eq!(serializer.serialize(&container, Format::Json).unwrap(), BOOK_JSON);
}

#[test]
fn serialize_movie() {
    let serializer = fixtures::serializer();
    let container = MediaContainer {
        media: Media::Movie(Movie::the_matrix()),
    };

    assert_eq!(serializer.serialize(&container, Format::Json).unwrap(), MOVIE_JSON);
}

#[test]
fn deserialize_each_alternative() {
    let serializer = fixtures::serializer();

    let book: MediaContainer = serializer.deserialize(BOOK_JSON, Format::Json).unwrap();
    assert_eq!(book.media, Media::Book(Book::design_patterns()));

    let movie: MediaContainer = serializer.deserialize(MOVIE_JSON, Format::Json).unwrap();
    assert_eq!(movie.media, Media::Movie(Movie::the_matrix()));
}

#[test]
fn tag_is_required() {
    let serializer = fixtures::serializer();
    let err = serializer
        .deserialize::<MediaContainer>(
            r#"{"media":{"title":"The matrix","rating":8.7}}"#,
            Format::Json,
        )
        .unwrap_err();

    let err = handler_error(err);
    assert_eq!(err, HandlerError::TypeNameMissingInData {
        handler: "UnionHandler"
    });
    assert!(err.to_string().contains("`__typename` field is missing"));
}

#[test]
fn tag_outside_the_union() {
    let serializer = fixtures::serializer();
    let err = serializer
        .deserialize::<MediaContainer>(
            r#"{"media":{"__typename":"Author","name":"John Doe"}}"#,
            Format::Json,
        )
        .unwrap_err();

    assert_eq!(handler_error(err), HandlerError::InvalidClassNameConfigured {
        handler: "UnionHandler",
        class_name: "Author".into(),
        types: vec!["Book".into(), "Movie".into()],
    });
}

#[test]
fn value_outside_the_union() {
    let serializer = fixtures::serializer();
    let ty = TypeDesc::parse("union<Movie>").unwrap();
    let err = serializer
        .serialize_as(&Book::design_patterns(), &ty, Format::Json)
        .unwrap_err();

    assert!(matches!(
        handler_error(err),
        HandlerError::InvalidClassNameConfigured { class_name, .. } if class_name == "Book"
    ));
}

#[test]
fn bare_union_has_no_alternatives() {
    let serializer = fixtures::serializer();
    let ty = TypeDesc::parse("union").unwrap();

    let err = serializer
        .serialize_as(&Book::design_patterns(), &ty, Format::Json)
        .unwrap_err();
    assert_eq!(handler_error(err), HandlerError::NoTypesConfigured {
        handler: "UnionHandler"
    });

    let err = serializer
        .deserialize_type(r#"{"__typename":"Book"}"#, &ty, Format::Json)
        .unwrap_err();
    assert_eq!(handler_error(err), HandlerError::NoTypesConfigured {
        handler: "UnionHandler"
    });
}

#[test]
fn array_of_unions() {
    let serializer = fixtures::serializer();
    let employee = Employee {
        name: "Joost Nijhuis".into(),
        age: Age::of(40),
        media: vec![
            Media::Book(Book::design_patterns()),
            Media::Movie(Movie::the_matrix()),
        ],
    };

    let json = serializer.serialize(&employee, Format::Json).unwrap();
    assert_eq!(
        json,
        r#"{"name":"Joost Nijhuis","age":40,"media":[{"__typename":"Book","title":"Design patterns","author":{"name":"John Doe"}},{"__typename":"Movie","title":"The matrix","rating":8.7}]}"#
    );

    let decoded: Employee = serializer.deserialize(&json, Format::Json).unwrap();
    assert_eq!(decoded, employee);
}

#[test]
fn missing_array_is_empty() {
    let serializer = fixtures::serializer();
    let employee: Employee = serializer
        .deserialize(r#"{"name":"John Doe","age":25}"#, Format::Json)
        .unwrap();

    assert!(employee.media.is_empty());
}

#[test]
fn xml_round_trip() {
    let serializer = fixtures::serializer();
    let container = MediaContainer {
        media: Media::Book(Book::design_patterns()),
    };

    let xml = serializer.serialize(&container, Format::Xml).unwrap();
    assert!(xml.contains("<__typename>Book</__typename>"));

    let decoded: MediaContainer = serializer.deserialize(&xml, Format::Xml).unwrap();
    assert_eq!(decoded, container);
}
