//! Test data generators for benchmarks.
//!
//! Inputs are deterministic so runs are comparable.

/// Generate `count` distinct dotted-quad IPv4 addresses in 10.0.0.0/8.
pub fn ipv4_addresses(count: usize) -> Vec<String> {
    (0..count as u32)
        .map(|i| {
            let n = i.wrapping_mul(2_654_435_761) & 0x00ff_ffff;
            format!("10.{}.{}.{}", n >> 16, (n >> 8) & 0xff, n & 0xff)
        })
        .collect()
}

/// Mix of page and asset paths as seen by an edge.
pub fn request_paths() -> Vec<&'static str> {
    vec![
        "/",
        "/index.html",
        "/docs/index.html",
        "/about",
        "/styles/app.css",
        "/js/vendor.min.js",
        "/img/logo.svg",
        "/favicon.ico",
        "/fonts/inter.woff2",
        "/restricted.html",
    ]
}

/// Query strings with and without the override parameter.
pub fn query_strings() -> Vec<&'static str> {
    vec![
        "",
        "ipr=letmein",
        "lang=en&ipr=letmein&utm_source=mail",
        "utm_source=mail&utm_medium=email&utm_campaign=launch",
        "ipr=let%20me%20in",
        "ipr=a&ipr=b",
    ]
}
