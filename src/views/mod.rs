pub(crate) mod chart;
pub(crate) mod components;
pub(crate) mod forms;

pub use chart::{ChartPoint, Series};

use http::StatusCode;

/// HTML-escapes user-supplied text before it lands in a page.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// $1,234.56-style formatting. Display only; the backend owns the
/// real precision.
pub fn fmt_money(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let bytes = whole.as_bytes();
    let mut grouped = String::with_capacity(bytes.len() + bytes.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*b as char);
    }

    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        frac
    )
}

pub fn fmt_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// CSS class for gain/loss coloring.
pub fn sign_class(value: f64) -> &'static str {
    if value >= 0.0 {
        "gain"
    } else {
        "loss"
    }
}

const STYLE: &str = r#"
    body { font-family: -apple-system, "Segoe UI", sans-serif; margin: 0; background: #f6f7f9; color: #1a202c; }
    nav { background: #1f2937; color: #fff; padding: 0.75rem 1.5rem; display: flex; gap: 1.25rem; align-items: center; }
    nav a { color: #d1d5db; text-decoration: none; }
    nav a:hover { color: #fff; }
    nav .brand { font-weight: 700; color: #fff; }
    nav form { margin-left: auto; }
    main { max-width: 960px; margin: 1.5rem auto; padding: 0 1rem; }
    .card { background: #fff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); padding: 1.25rem; margin-bottom: 1rem; }
    .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 1rem; margin-bottom: 1rem; }
    .metric { font-size: 1.4rem; font-weight: 600; }
    .gain { color: #059669; }
    .loss { color: #dc2626; }
    .muted { color: #6b7280; font-size: 0.875rem; }
    .empty { color: #9ca3af; }
    table { width: 100%; border-collapse: collapse; }
    th, td { text-align: left; padding: 0.5rem 0.75rem; border-bottom: 1px solid #e5e7eb; }
    .bar-track { background: #e5e7eb; border-radius: 9999px; height: 8px; }
    .bar-fill { background: #3b82f6; border-radius: 9999px; height: 8px; }
    .bar-label { display: flex; justify-content: space-between; font-size: 0.875rem; margin: 0.5rem 0 0.25rem; }
    .legend-row { display: flex; align-items: center; gap: 0.6rem; margin: 0.4rem 0; font-size: 0.9rem; }
    .swatch { width: 14px; height: 14px; border-radius: 3px; display: inline-block; }
    label { display: block; font-size: 0.875rem; margin: 0.75rem 0 0.25rem; }
    input, select { width: 100%; padding: 0.5rem; border: 1px solid #d1d5db; border-radius: 6px; box-sizing: border-box; }
    button, .btn { background: #2563eb; color: #fff; border: 0; border-radius: 6px; padding: 0.5rem 1rem; cursor: pointer; text-decoration: none; display: inline-block; }
    button.danger, .btn.danger { background: #dc2626; }
    button.quiet { background: transparent; color: #d1d5db; padding: 0; }
    .error { color: #dc2626; font-size: 0.875rem; margin: 0.25rem 0; }
    .actions { display: flex; gap: 0.75rem; margin: 1rem 0; }
    h1 { font-size: 1.6rem; }
"#;

/// Shared page shell. `user` switches the nav between the signed-in
/// and anonymous variants.
pub fn layout(title: &str, user: Option<&str>, body: &str) -> String {
    let nav = match user {
        Some(email) => format!(
            r#"<nav>
  <a class="brand" href="/dashboard">Portfolio Tracker</a>
  <a href="/dashboard">Dashboard</a>
  <a href="/portfolio">Portfolio</a>
  <a href="/stocks">Stocks</a>
  <a href="/transactions">Transactions</a>
  <a href="/profile">{}</a>
  <form method="post" action="/logout"><button class="quiet" type="submit">Sign out</button></form>
</nav>"#,
            escape(email)
        ),
        None => r#"<nav>
  <a class="brand" href="/">Portfolio Tracker</a>
  <form><a href="/login">Sign in</a></form>
  <a href="/register">Sign up</a>
</nav>"#
            .to_string(),
    };

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{} · Portfolio Tracker</title>
<style>{}</style>
</head>
<body>
{}
<main>
{}
</main>
</body>
</html>"#,
        escape(title),
        STYLE,
        nav,
        body
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        r#"<div class="card">
  <h1>{}</h1>
  <p>{}</p>
  <p><a href="/dashboard">Back to dashboard</a></p>
</div>"#,
        status.as_u16(),
        escape(message)
    );
    layout(
        status.canonical_reason().unwrap_or("Error"),
        None,
        &body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<b>&"it's"</b>"#),
            "&lt;b&gt;&amp;&quot;it&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn money_is_grouped_and_rounded() {
        assert_eq!(fmt_money(0.0), "$0.00");
        assert_eq!(fmt_money(1234567.891), "$1,234,567.89");
        assert_eq!(fmt_money(-42.5), "-$42.50");
        assert_eq!(fmt_money(999.999), "$1,000.00");
    }

    #[test]
    fn sign_class_switches_at_zero() {
        assert_eq!(sign_class(0.0), "gain");
        assert_eq!(sign_class(-0.01), "loss");
    }

    #[test]
    fn error_page_carries_status_and_message() {
        let page = error_page(StatusCode::NOT_FOUND, "Stock not found");
        assert!(page.contains("404"));
        assert!(page.contains("Stock not found"));
    }
}
