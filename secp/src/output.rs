use std::io::{self, Write};

use secp_client::{ErrorDisplay, LoginBanner, LoginRedirect};

pub fn write_error(out: &mut impl Write, display: Option<&ErrorDisplay>) -> io::Result<()> {
    let Some(display) = display else {
        return Ok(());
    };

    writeln!(out, "error: {}", display.message)?;
    if let Some(debug) = &display.debug {
        writeln!(out, "debug: {debug}")?;
    }
    Ok(())
}

pub fn write_banner(out: &mut impl Write, banner: Option<&LoginBanner>) -> io::Result<()> {
    match banner {
        None => Ok(()),
        Some(LoginBanner::Text(text)) => writeln!(out, "{text}"),
        Some(LoginBanner::Generic { message, debug }) => {
            writeln!(out, "{message}")?;
            writeln!(out, "debug: {}", debug.escape_debug())
        }
    }
}

/// Print the login location; the message goes to stderr with the reason
pub fn write_redirect(out: &mut impl Write, redirect: &LoginRedirect) -> io::Result<()> {
    eprintln!(
        "{}: {}",
        redirect.reason(),
        redirect.message().unwrap_or_default()
    );
    writeln!(out, "{}", redirect.location())
}

#[cfg(test)]
mod tests {
    use secp_client::RedirectReason;
    use url::Url;

    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn error_with_debug() {
        let display = ErrorDisplay {
            message: "操作过于频繁，请稍后再试。".to_owned(),
            debug: Some(r#"{"code":"RATE_LIMITED"}"#.to_owned()),
        };

        assert_eq!(
            render(|out| write_error(out, Some(&display))),
            "error: 操作过于频繁，请稍后再试。\ndebug: {\"code\":\"RATE_LIMITED\"}\n"
        );
    }

    #[test]
    fn hidden_error_prints_nothing() {
        assert_eq!(render(|out| write_error(out, None)), "");
    }

    #[test]
    fn generic_banner_escapes_debug() {
        let banner = LoginBanner::Generic {
            message: "发生错误。".to_owned(),
            debug: "reason=a\nb".to_owned(),
        };

        assert_eq!(render(|out| write_banner(out, Some(&banner))), "发生错误。\ndebug: reason=a\\nb\n");
    }

    #[test]
    fn redirect_prints_location() {
        let page = Url::parse("http://localhost/ui/login.html").unwrap();
        let redirect = LoginRedirect::new(&page, RedirectReason::Forbidden, None);

        assert_eq!(
            render(|out| write_redirect(out, &redirect)),
            "http://localhost/ui/login.html?reason=forbidden\n"
        );
    }
}
