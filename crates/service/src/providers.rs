use serde_json::{Map, Value};

/// A geolocation data source. The resolver substitutes the address into
/// `url_template` and runs `accept` over the decoded body to weed out
/// responses where the provider answered but flagged that it has no data.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Provider {
    pub name: &'static str,
    url_template: &'static str,
    accept: fn(&Map<String, Value>) -> bool,
}

impl Provider {
    pub fn url(&self, ip: &str) -> String {
        self.url_template.replace("{ip}", ip)
    }

    pub fn accepts(&self, body: &Map<String, Value>) -> bool {
        (self.accept)(body)
    }
}

/// Providers in query order. The first one returning a usable, non-empty
/// body wins and the rest are never contacted. Adding a provider means
/// adding a record here.
pub(crate) const PROVIDERS: &[Provider] = &[
    Provider {
        name: "ipapi",
        url_template: "https://ipapi.co/{ip}/json/",
        accept: ipapi_accepts,
    },
    Provider {
        name: "ipwhois",
        url_template: "https://ipwho.is/{ip}",
        accept: ipwhois_accepts,
    },
];

// ipapi.co reports reserved ranges and quota misses as an `error` field
// inside a 200 response
fn ipapi_accepts(body: &Map<String, Value>) -> bool {
    !body.get("error").is_some_and(is_truthy)
}

// ipwho.is answers 200 for everything and flags misses with `success: false`
fn ipwhois_accepts(body: &Map<String, Value>) -> bool {
    !matches!(body.get("success"), Some(Value::Bool(false)))
}

/// Truthiness as the provider APIs mean it: null, false, zero and empty
/// strings, arrays or objects all count as "not flagged".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().expect("test body must be an object").clone()
    }

    #[test]
    fn urls_substitute_the_address() {
        assert_eq!(
            PROVIDERS[0].url("2001:db8::1"),
            "https://ipapi.co/2001:db8::1/json/"
        );
        assert_eq!(PROVIDERS[1].url("2001:db8::1"), "https://ipwho.is/2001:db8::1");
    }

    #[test]
    fn ipapi_rejects_flagged_errors_only() {
        assert!(!ipapi_accepts(&body(
            json!({"error": true, "reason": "Reserved IP Address"})
        )));
        assert!(!ipapi_accepts(&body(json!({"error": "rate limited"}))));
        // falsy error values do not count as a flag
        assert!(ipapi_accepts(&body(json!({"error": false, "country": "SE"}))));
        assert!(ipapi_accepts(&body(json!({"error": null, "country": "SE"}))));
        assert!(ipapi_accepts(&body(json!({"error": "", "country": "SE"}))));
        assert!(ipapi_accepts(&body(json!({"error": 0, "country": "SE"}))));
        assert!(ipapi_accepts(&body(json!({"country": "SE"}))));
    }

    #[test]
    fn ipwhois_rejects_success_false_only() {
        assert!(!ipwhois_accepts(&body(
            json!({"success": false, "message": "Reserved range"})
        )));
        assert!(ipwhois_accepts(&body(json!({"success": true, "country": "BR"}))));
        assert!(ipwhois_accepts(&body(json!({"country": "BR"}))));
        // only a boolean false is a miss, other falsy values are not
        assert!(ipwhois_accepts(&body(json!({"success": null}))));
        assert!(ipwhois_accepts(&body(json!({"success": 0}))));
        assert!(ipwhois_accepts(&body(json!({"success": "false"}))));
    }
}
