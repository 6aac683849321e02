//! Client IP extraction for audit rows.

use actix_web::HttpRequest;

const IP_HEADERS: &[&str] = &["x-forwarded-for", "x-real-ip", "cf-connecting-ip"];

/// First non-empty of `x-forwarded-for` (first hop), `x-real-ip`,
/// `cf-connecting-ip`; `"unknown"` when nothing usable is present.
pub fn client_ip(req: &HttpRequest) -> String {
    for header in IP_HEADERS {
        let Some(raw) = req.headers().get(*header).and_then(|v| v.to_str().ok()) else {
            continue;
        };
        let first = raw.split(',').next().unwrap_or("").trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }
    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn forwarded_for_takes_first_hop() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", "203.0.113.9, 10.0.0.1"))
            .insert_header(("x-real-ip", "198.51.100.2"))
            .to_http_request();
        assert_eq!(client_ip(&req), "203.0.113.9");
    }

    #[test]
    fn falls_through_header_chain() {
        let req = TestRequest::default()
            .insert_header(("cf-connecting-ip", "198.51.100.7"))
            .to_http_request();
        assert_eq!(client_ip(&req), "198.51.100.7");
    }

    #[test]
    fn unknown_when_no_headers() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(client_ip(&req), "unknown");
    }
}
