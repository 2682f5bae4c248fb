//! Shared page chrome: stylesheet, layout and escaping helpers.

const STYLE: &str = r##"
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:system-ui,-apple-system,'Segoe UI',Roboto,sans-serif;background:#fff;color:#111;min-height:100vh;padding:24px}
main{max-width:900px}
h1{font-size:24px;margin-bottom:16px}
a{color:inherit}
p{margin-top:12px}
.cards{display:grid;gap:12px;grid-template-columns:repeat(auto-fit,minmax(220px,1fr));margin-top:16px}
.card{display:block;padding:16px;border:1px solid #ddd;border-radius:10px;text-decoration:none;color:inherit}
.card.disabled{opacity:.5}
.form{margin-top:16px;display:grid;gap:10px;max-width:420px}
label{display:block}
input{width:100%;padding:10px;border-radius:8px;border:1px solid #ddd;margin-top:6px;font-size:14px}
button{width:100%;padding:12px;border-radius:10px;border:1px solid #111;background:#111;color:#fff;cursor:pointer;font-size:14px}
button:disabled{opacity:.5;cursor:not-allowed}
.bet{border:1px solid #ddd;border-radius:10px;padding:12px;margin-top:12px}
.bet-title{font-weight:700}
.numbers{margin-top:8px;font-family:ui-monospace,'SF Mono',Monaco,Consolas,monospace}
details{margin-top:10px}
pre{white-space:pre-wrap}
.plans{display:grid;gap:10px;max-width:420px;margin-top:12px}
.note{margin-top:14px;opacity:.75}
.banner{padding:10px 14px;border-radius:8px;margin-bottom:12px}
.banner-ok{background:#e6f4ea;border:1px solid #3fb950}
.banner-warn{background:#fff8e1;border:1px solid #d29922}
.notice{padding:10px 14px;border-radius:8px;margin-bottom:12px;background:#fdecea;border:1px solid #da3633}
"##;

/// Wrap a page body in the common document. Each notice is shown both as a
/// blocking `alert()` and, for script-less clients, as an inline box.
pub fn layout(title: &str, body: &str, notices: &[String]) -> String {
    let mut html = String::with_capacity(body.len() + STYLE.len() + 512);
    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str("<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<main>\n");
    for notice in notices {
        html.push_str(&format!(
            "<noscript><div class=\"notice\">{}</div></noscript>\n",
            escape(notice)
        ));
    }
    html.push_str(body);
    html.push_str("\n</main>\n");
    for notice in notices {
        html.push_str(&alert_script(notice));
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Escape text for element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text inside `<pre>`, leaving quotes readable.
pub fn escape_text(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn alert_script(message: &str) -> String {
    // a JSON string is a valid JS string literal; only `</` can end the tag
    let literal = serde_json::to_string(message)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/");
    format!("<script>alert({literal});</script>\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn alert_script_cannot_close_its_tag() {
        let script = alert_script("bad </script><b>");
        assert_eq!(script.matches("</script>").count(), 1);
        assert!(script.contains(r#"alert("bad <\/script><b>")"#));
    }

    #[test]
    fn layout_emits_one_alert_per_notice() {
        let html = layout("T", "<p>x</p>", &["um".into(), "dois".into()]);
        assert!(html.contains(r#"alert("um")"#));
        assert!(html.contains(r#"alert("dois")"#));
        assert!(html.contains("<title>T</title>"));
    }
}
