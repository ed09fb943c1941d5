use regex::Regex;

/// Percent-encodes like JavaScript's `encodeURIComponent`.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Reverses percent-encoding; `None` when the result is not valid UTF-8 or a
/// sequence is truncated or not two hex digits.
pub fn decode_uri_component(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = input.get(i + 1..i + 3)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Looks a cookie up in a `document.cookie` string.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    let pattern = format!("(?:^|; ){}=([^;]*)", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    let raw = re.captures(cookies)?.get(1)?.as_str();
    Some(decode_uri_component(raw).unwrap_or_else(|| raw.to_string()))
}

/// Where the current page lives, used for `next=` deep links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLocation {
    pub href: String,
    pub pathname: String,
}

/// Sign-in and sign-up targets shown when a spin requires authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthLinks {
    pub sign_in: String,
    pub sign_up: String,
}

impl AuthLinks {
    pub fn build(
        login_url: Option<&str>,
        sign_in_url: Option<&str>,
        sign_up_url: Option<&str>,
        page: &PageLocation,
    ) -> Self {
        let sign_in = match (login_url, sign_in_url) {
            (Some(login), _) if !login.is_empty() => login.to_string(),
            (_, Some(base)) if !base.is_empty() => {
                format!("{}?next={}", base, encode_uri_component(&page.href))
            }
            _ => "#".to_string(),
        };
        let sign_up = match sign_up_url {
            Some(base) if !base.is_empty() => {
                format!("{}?next={}", base, encode_uri_component(&page.pathname))
            }
            _ => "#".to_string(),
        };
        Self { sign_in, sign_up }
    }
}
