use rstest::{fixture, rstest};
use serde_json::{json, Value};
use url::Url;

use json_fetch::{ErrorKind, FromParser, Parser};

#[fixture]
fn document() -> Value {
    json!({
        "aNumber": 123,
        "aURL": "http://example.com",
        "notAURL": "not a url",
        "aString": "asdf",
        "anArray": ["a", "b"],
        "anObject": {"key1": "value1", "key2": 1},
        "aNullValue": null
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Letter {
    A,
    B,
    C,
}

impl Letter {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "a" => Some(Letter::A),
            "b" => Some(Letter::B),
            "c" => Some(Letter::C),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Pair {
    key1: String,
    key2: i64,
}

impl FromParser for Pair {
    fn from_parser(parser: Parser<'_>) -> json_fetch::Result<Self> {
        Ok(Self {
            key1: parser.fetch("key1")?,
            key2: parser.fetch("key2")?,
        })
    }
}

fn parse_url(raw: &str) -> Option<Url> {
    Url::parse(raw).ok()
}

#[rstest]
fn test_absent_source() {
    let parser = Parser::new(None);

    assert!(parser.fetch::<String>("asdf").is_err());
    assert_eq!(parser.fetch_optional::<String>("jkl").unwrap(), None);
    assert_eq!(parser.fetch_optional_array::<String>("jkl").unwrap(), Vec::<String>::new());
}

#[rstest]
fn test_valid_document(document: Value) {
    let parser = Parser::from_value(&document);

    assert_eq!(parser.fetch::<i64>("aNumber").unwrap(), 123);
    assert_eq!(parser.fetch::<String>("aString").unwrap(), "asdf");
    assert_eq!(parser.fetch_optional::<&str>("aString").unwrap(), Some("asdf"));
    assert!(parser.fetch::<i64>("aString").is_err());
    assert!(parser.fetch_optional::<i64>("aString").is_err());

    assert_eq!(
        parser.fetch_with("aURL", parse_url).unwrap(),
        Url::parse("http://example.com").unwrap()
    );
    assert_eq!(
        parser.fetch_with("missingURL", parse_url).unwrap_err().kind,
        ErrorKind::NotFound
    );
    assert_eq!(
        parser.fetch_with("notAURL", parse_url).unwrap_err().kind,
        ErrorKind::TransformFailed
    );
    assert_eq!(parser.fetch_optional_with("missingURL", parse_url).unwrap(), None);
    assert_eq!(parser.fetch_optional_with("notAURL", parse_url).unwrap(), None);
    assert_eq!(
        parser.fetch_optional_with("aNumber", parse_url).unwrap_err().kind,
        ErrorKind::TypeMismatch
    );
}

#[rstest]
fn test_fetch_array(document: Value) {
    let parser = Parser::from_value(&document);

    assert_eq!(
        parser.fetch_array("anArray", Letter::parse).unwrap(),
        vec![Letter::A, Letter::B]
    );
    assert_eq!(parser.fetch::<Vec<String>>("anArray").unwrap(), vec!["a", "b"]);
    assert_eq!(
        parser.fetch_array("anArray", |s: String| Some(s)).unwrap(),
        vec!["a", "b"]
    );
}

#[rstest]
fn test_fetch_array_keeps_order_when_dropping() {
    let document = json!({"letters": ["a", "b", "c"]});
    let parser = Parser::from_value(&document);

    let kept = parser
        .fetch_array("letters", |raw: &str| Letter::parse(raw).filter(|l| *l != Letter::B))
        .unwrap();
    assert_eq!(kept, vec![Letter::A, Letter::C]);
}

#[rstest]
fn test_fetch_nested(document: Value) {
    let parser = Parser::from_value(&document);

    let pair = parser.fetch_with("anObject", Pair::from_map).ok();
    let pair = pair.expect("nested object should build");
    assert_eq!(pair.key1, "value1");
    assert_eq!(pair.key2, 1);

    let pair: Pair = parser.fetch_nested("anObject").unwrap();
    assert_eq!(pair.key1, "value1");
    assert!(parser.fetch_nested::<Pair>("aString").is_err());
    assert!(parser.fetch_optional_nested::<Pair>("aNullValue").unwrap().is_none());
    assert!(parser.fetch_optional_nested::<Pair>("missing").unwrap().is_none());
}

#[rstest]
fn test_fetch_optional_nested_propagates_inner_error() {
    let document = json!({"pair": {"key1": "value1", "key2": "two"}, "partial": {"key1": "x"}});
    let parser = Parser::from_value(&document);

    let err = parser.fetch_optional_nested::<Pair>("pair").unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeMismatch);
    assert_eq!(err.key.as_deref(), Some("key2"));

    let err = parser.fetch_optional_nested::<Pair>("partial").unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.to_string(), "The key 'key2' was not found.");
}

#[rstest]
fn test_fetch_optional_null_value(document: Value) {
    let parser = Parser::from_value(&document);

    assert_eq!(parser.fetch_optional::<Value>("aNullValue").unwrap(), None);
    assert_eq!(parser.fetch_optional::<String>("aNullValue").unwrap(), None);
    assert!(parser.fetch::<String>("aNullValue").is_err());
}

#[rstest]
#[case("aNumber", json!(123))]
#[case("aString", json!("asdf"))]
#[case("anArray", json!(["a", "b"]))]
fn test_fetch_returns_value_unchanged(document: Value, #[case] key: &str, #[case] expected: Value) {
    let parser = Parser::from_value(&document);

    assert_eq!(parser.fetch::<Value>(key).unwrap(), expected);
    assert_eq!(parser.fetch_optional::<&Value>(key).unwrap(), Some(&expected));
}

#[rstest]
fn test_free_functions(document: Value) {
    assert_eq!(json_fetch::fetch::<u8>(&document, "aNumber").unwrap(), 123);
    assert_eq!(json_fetch::fetch_optional::<u8>(&document, "missing").unwrap(), None);

    let pair: Pair = json_fetch::from_value(&document["anObject"]).unwrap();
    assert_eq!(pair.key2, 1);
    assert!(json_fetch::from_value::<Pair>(&json!("scalar")).unwrap_err().is_type_mismatch());
    assert!(json_fetch::fetch::<i64>(&json!([1, 2]), "0").unwrap_err().is_type_mismatch());
    assert!(json_fetch::fetch_optional::<i64>(&json!(null), "a").is_err());
}

#[derive(Debug, PartialEq)]
struct Settings {
    verbose: Option<bool>,
}

impl FromParser for Settings {
    fn from_parser(parser: Parser<'_>) -> json_fetch::Result<Self> {
        Ok(Self {
            verbose: parser.fetch_optional("verbose")?,
        })
    }
}

#[rstest]
#[case(json!(42))]
#[case(json!([1, 2]))]
#[case(json!("verbose"))]
fn test_non_object_root_is_rejected(#[case] value: Value) {
    let err = json_fetch::from_value::<Settings>(&value).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeMismatch);
    assert_eq!(err.expected.as_deref(), Some("object"));
    assert_eq!(Settings::from_value(&value), None);
}

#[rstest]
fn test_all_optional_type_builds_from_empty_object() {
    let value = json!({});
    assert_eq!(
        json_fetch::from_value::<Settings>(&value).unwrap(),
        Settings { verbose: None }
    );
}
