use std::sync::OnceLock;

use regex::Regex;

/// `{{ scope.NAME }}` with an optional `| default("value")`
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_]+)\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\)\s*)?\}\}"#)
            .expect("placeholder regex is valid")
    })
}

/// Expand `{{ env.NAME }}` placeholders from the process environment
///
/// `{{ env.NAME | default("value") }}` substitutes `value` when `NAME` is
/// unset. TOML comment lines are copied unchanged.
pub fn expand_env(input: &str) -> Result<String, String> {
    expand_with(input, |name| std::env::var(name).ok())
}

fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String, String> {
    let mut out = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            out.push_str(line);
            continue;
        }

        let mut cursor = 0;
        for caps in placeholder().captures_iter(line) {
            let (Some(whole), Some(scope), Some(name)) = (caps.get(0), caps.get(1), caps.get(2)) else {
                continue;
            };

            if scope.as_str() != "env" {
                return Err(format!(
                    "unsupported placeholder scope `{}` in `{}`, only `env` is available",
                    scope.as_str(),
                    whole.as_str()
                ));
            }

            let value = lookup(name.as_str())
                .or_else(|| caps.get(3).map(|d| d.as_str().to_owned()))
                .ok_or_else(|| format!("environment variable `{}` is not set", name.as_str()))?;

            out.push_str(&line[cursor..whole.start()]);
            out.push_str(&value);
            cursor = whole.end();
        }
        out.push_str(&line[cursor..]);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| pairs.iter().find(|(k, _)| *k == name).map(|(_, v)| (*v).to_owned())
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "[client]\nbase_url = \"http://localhost\"\n";
        assert_eq!(expand_with(input, vars(&[])).unwrap(), input);
    }

    #[test]
    fn substitutes_each_placeholder() {
        let out = expand_with(
            "base_url = \"{{ env.HOST }}:{{env.PORT}}\"\nkey = \"{{ env.HOST }}\"",
            vars(&[("HOST", "http://api"), ("PORT", "8080")]),
        )
        .unwrap();

        assert_eq!(out, "base_url = \"http://api:8080\"\nkey = \"http://api\"");
    }

    #[test]
    fn missing_variable_is_an_error() {
        let err = expand_with("locale = \"{{ env.SECP_LOCALE }}\"", vars(&[])).unwrap_err();
        assert!(err.contains("SECP_LOCALE"));
    }

    #[test]
    fn default_applies_only_when_unset() {
        let input = "locale = \"{{ env.SECP_LOCALE | default(\"zh-CN\") }}\"";

        assert_eq!(expand_with(input, vars(&[])).unwrap(), "locale = \"zh-CN\"");
        assert_eq!(
            expand_with(input, vars(&[("SECP_LOCALE", "en-US")])).unwrap(),
            "locale = \"en-US\""
        );
    }

    #[test]
    fn empty_default_is_allowed() {
        let out = expand_with("path = \"{{ env.SECP_STORAGE | default(\"\") }}\"", vars(&[])).unwrap();
        assert_eq!(out, "path = \"\"");
    }

    #[test]
    fn other_scopes_are_rejected() {
        let err = expand_with("key = \"{{ file.TOKEN }}\"", vars(&[])).unwrap_err();
        assert!(err.contains("`file`"));
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        let input = "  # base_url = \"{{ env.UNSET_VAR }}\"\nkey = \"{{ env.SET_VAR }}\"\n";
        let out = expand_with(input, vars(&[("SET_VAR", "x")])).unwrap();

        assert_eq!(out, "  # base_url = \"{{ env.UNSET_VAR }}\"\nkey = \"x\"\n");
    }

    #[test]
    fn reads_process_environment() {
        temp_env::with_var("SECP_TEST_BASE_URL", Some("http://from-env"), || {
            let out = expand_env("base_url = \"{{ env.SECP_TEST_BASE_URL }}\"").unwrap();
            assert_eq!(out, "base_url = \"http://from-env\"");
        });
    }
}
