use debate::ExchangeResult;

/// A page with `{name}` placeholders, embedded at compile time.
///
/// Rendering is a single pass: substituted values are escaped and never
/// re-scanned, and braces that don't name a parameter (CSS blocks, for one)
/// are copied through untouched.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    source: &'static str,
}

pub const FORM: Template = Template::new(include_str!("../templates/form.html"));
pub const EXCHANGE: Template = Template::new(include_str!("../templates/exchange.html"));

impl Template {
    pub const fn new(source: &'static str) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn render(&self, params: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            let substitution = after.find('}').and_then(|end| {
                let key = &after[..end];
                params
                    .iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, value)| (end, *value))
            });

            match substitution {
                Some((end, value)) => {
                    push_escaped(&mut out, value);
                    rest = &after[end + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);

        out
    }
}

pub fn render_exchange(topic: &str, result: &ExchangeResult) -> String {
    EXCHANGE.render(&[
        ("message", topic),
        ("first_reply", &result.first_reply),
        ("second_reply", &result.second_reply),
        ("first_final", &result.first_final),
        ("second_final", &result.second_final),
    ])
}

fn push_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
}
