use super::*;
use alloc::string::ToString;

#[test]
fn test_defaults() {
    let url = Url::new();
    assert_eq!(url.scheme(), "http");
    assert_eq!(url.port(), 80);
    assert_eq!(url.host(), None);
    assert_eq!(url.path(), None);
    assert_eq!(url.params().count(), 0);
}

#[test]
fn test_https_port_still_defaults_to_80() {
    let mut url = Url::new();
    url.set_scheme("https");
    assert_eq!(url.port(), 80);
}

#[test]
fn test_set_param_upserts_case_insensitively() {
    let mut url = Url::new();
    url.set_param("Key", "1").unwrap();
    url.set_param("other", "2").unwrap();
    url.set_param("KEY", "3").unwrap();

    let params: Vec<_> = url.params().collect();
    assert_eq!(params, [("Key", "3"), ("other", "2")]);
    assert_eq!(url.param("key"), Some("3"));
}

#[test]
fn test_set_param_rejects_empty() {
    let mut url = Url::new();
    assert_eq!(url.set_param("", "v").err(), Some(Error::EmptyParam));
    assert_eq!(url.set_param("k", "").err(), Some(Error::EmptyParam));
    assert_eq!(url.params().count(), 0);
}

#[test]
fn test_build_omits_canonical_port() {
    let mut url = Url::new();
    url.set_host("example.com").set_port(80).set_path("/a");
    assert_eq!(url.to_string(), "http://example.com/a");

    url.set_scheme("https").set_port(443);
    assert_eq!(url.to_string(), "https://example.com/a");

    url.set_port(8443);
    assert_eq!(url.to_string(), "https://example.com:8443/a");

    url.set_scheme("http").set_port(443);
    assert_eq!(url.to_string(), "http://example.com:443/a");
}

#[test]
fn test_build_writes_query_values_raw() {
    let mut url = Url::new();
    url.set_host("h").set_path("/p").set_fragment("f");
    url.set_param("q", "a b").unwrap();
    url.set_param("r", "1").unwrap();

    let mut out = String::from(">");
    let written = url.build(&mut out);
    assert_eq!(out, ">http://h/p?q=a b&r=1#f");
    assert_eq!(written, out.len() - 1);
}

#[test]
fn test_parse_infers_port_from_scheme() {
    let mut url = Url::new();
    url.parse("https://example.com/").unwrap();
    assert_eq!(url.port(), 443);

    url.parse("HTTP://example.com/").unwrap();
    assert_eq!(url.port(), 80);

    url.parse("mqtt://broker/").unwrap();
    assert_eq!(url.port(), 80);
    assert_eq!(url.port, 0);

    url.parse("mqtt://broker:1883/").unwrap();
    assert_eq!(url.port(), 1883);
}

#[test]
fn test_parse_decodes_values_not_keys() {
    let mut url = Url::new();
    url.parse("/search?q%20x=a%20b+c&empty=").unwrap();
    assert_eq!(url.param("q%20x"), Some("a b c"));
    assert_eq!(url.param("empty"), Some(""));
}

#[test]
fn test_parse_stops_at_malformed_pair() {
    let mut url = Url::new();
    url.parse("/p?a=1&broken&b=2").unwrap();
    let params: Vec<_> = url.params().collect();
    assert_eq!(params, [("a", "1")]);

    url.parse("/p?a=1&=2&b=3").unwrap();
    assert_eq!(url.params().count(), 1);

    url.parse("/p?a=1&&b=2").unwrap();
    assert_eq!(url.params().count(), 1);

    url.parse("/p?a=1&b=2&").unwrap();
    assert_eq!(url.params().count(), 2);
}

#[test]
fn test_parse_clears_previous_fields() {
    let mut url = Url::new();
    url.parse("http://user:pw@example.com:8080/a?x=1#frag").unwrap();
    assert_eq!(url.userinfo(), Some("user:pw"));

    url.parse("/b").unwrap();
    assert_eq!(url.host(), None);
    assert_eq!(url.userinfo(), None);
    assert_eq!(url.fragment(), None);
    assert_eq!(url.param("x"), None);
    assert_eq!(url.path(), Some("/b"));
}

#[test]
fn test_parse_error_leaves_url_untouched() {
    let mut url = Url::new();
    url.parse("http://example.com/a").unwrap();
    let before = url.clone();

    assert_eq!(url.parse("http://exa mple.com/"), Err(Error::InvalidUrl));
    assert_eq!(url, before);
}

#[test]
fn test_round_trip() {
    let mut url = Url::new();
    url.set_scheme("http")
        .set_host("sensor.local")
        .set_port(8080)
        .set_path("/v1/pm25")
        .set_fragment("latest")
        .set_userinfo("dev:secret");
    url.set_param("room", "kitchen").unwrap();
    url.set_param("unit", "ugm3").unwrap();

    // userinfo is not part of the built form; it travels in Authorization.
    let built = url.to_string();
    assert!(!built.contains("dev:secret"));
    let mut parsed = Url::new();
    parsed.parse(&built).unwrap();
    assert_eq!(parsed.userinfo(), None);

    assert_eq!(parsed.scheme(), url.scheme());
    assert_eq!(parsed.host(), url.host());
    assert_eq!(parsed.port(), url.port());
    assert_eq!(parsed.path(), url.path());
    assert_eq!(parsed.fragment(), url.fragment());
    assert_eq!(parsed.params().collect::<Vec<_>>(), url.params().collect::<Vec<_>>());
}
