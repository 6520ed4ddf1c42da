use libiot_http::{Header, Headers};

#[test]
fn test_set_get_any_case() {
    let mut headers = Headers::new();
    headers.set("Content-Type", Some("application/json"));

    assert_eq!(headers.get("content-type"), Some("application/json"));
    assert_eq!(headers.get("CONTENT-TYPE"), Some("application/json"));

    headers.set("CONTENT-type", Some("text/plain"));
    assert_eq!(headers.get("Content-Type"), Some("text/plain"));
    assert_eq!(headers.len(), 1);
}

#[test]
fn test_upsert_keeps_first_spelling_and_position() {
    let mut headers = Headers::new();
    headers.insert("Host", "a");
    headers.insert("Accept", "*/*");
    headers.insert("HOST", "b");

    let pairs: Vec<_> = headers.iter().collect();
    assert_eq!(pairs, [("Host", "b"), ("Accept", "*/*")]);
}

#[test]
fn test_none_clears_but_keeps_entry() {
    let mut headers = Headers::new();
    headers.insert("A", "1");
    headers.insert("B", "2");
    headers.set("a", None);

    assert_eq!(headers.get("A"), None);
    assert!(!headers.contains("A"));
    assert_eq!(headers.len(), 2);
    assert_eq!(
        headers.entries()[0],
        Header {
            field: "A".into(),
            value: None
        }
    );
    assert_eq!(headers.iter().collect::<Vec<_>>(), [("B", "2")]);

    // Revived in its original slot.
    headers.insert("a", "3");
    assert_eq!(headers.iter().collect::<Vec<_>>(), [("A", "3"), ("B", "2")]);
}

#[test]
fn test_none_on_missing_field_is_noop() {
    let mut headers = Headers::new();
    headers.set("X-Missing", None);
    assert!(headers.is_empty());
}

#[test]
fn test_clear() {
    let mut headers = Headers::new();
    headers.insert("A", "1");
    headers.clear();
    assert!(headers.is_empty());
    assert_eq!(headers.get("A"), None);
}
