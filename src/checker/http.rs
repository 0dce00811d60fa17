// src/checker/http.rs
// =============================================================================
// One URL, one verdict.
//
// check_url sends a HEAD request first (lightweight, no body download).
// A HEAD answered with 400+ is retried once as GET, because some servers
// reject HEAD but serve GET just fine. The final response, or the
// transport failure, folds into a CheckStatus:
//
//   status < 400           -> Ok(code)
//   status >= 400          -> Broken(HttpStatus)
//   redirect cap exhausted -> Broken(TooManyRedirects)
//   transport failure      -> Error(timeout | dns | ...)
//
// Broken and Error stay separate end to end: a 404 is proof the resource
// is gone, a timeout is not.
// =============================================================================

use reqwest::{redirect, Client};

use crate::config::{ScanConfig, USER_AGENT};
use crate::error::ScanError;
use crate::report::{BrokenKind, CheckResult, CheckStatus, FailureKind};

/// One client per run: shared connection pool, per-request timeout, and
/// bounded redirect policy for every check.
pub(crate) fn build_client(config: &ScanConfig) -> Result<Client, ScanError> {
    let client = Client::builder()
        .timeout(config.timeout)
        .redirect(redirect::Policy::limited(config.max_redirects))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Checks a single URL and returns its finalized result.
pub(crate) async fn check_url(client: Client, url: String) -> CheckResult {
    let status = match client.head(&url).send().await {
        Ok(response) if response.status().as_u16() < 400 => classify_response(&response),
        // The server answered the HEAD with an error status. Retry once as
        // GET before believing it: plenty of hosts 405 (or blanket-4xx)
        // HEAD requests while serving GET.
        Ok(_) => match client.get(&url).send().await {
            Ok(response) => classify_response(&response),
            Err(error) => classify_error(&error),
        },
        Err(error) => classify_error(&error),
    };

    tracing::debug!(url = %url, status = %status, "checked");
    CheckResult { url, status }
}

fn classify_response(response: &reqwest::Response) -> CheckStatus {
    let code = response.status().as_u16();
    if code < 400 {
        CheckStatus::Ok(code)
    } else {
        CheckStatus::Broken(BrokenKind::HttpStatus(code))
    }
}

/// Folds a transport-level failure into the report taxonomy. reqwest
/// flags the broad categories itself; DNS, refused connections, and TLS
/// problems hide in the error chain's text.
fn classify_error(error: &reqwest::Error) -> CheckStatus {
    if error.is_redirect() {
        return CheckStatus::Broken(BrokenKind::TooManyRedirects);
    }
    if error.is_timeout() {
        return CheckStatus::Error(FailureKind::Timeout);
    }

    let text = error_chain_text(error);
    if error.is_connect() {
        if text.contains("dns") || text.contains("resolve") {
            return CheckStatus::Error(FailureKind::Dns);
        }
        if text.contains("refused") {
            return CheckStatus::Error(FailureKind::ConnectionRefused);
        }
        if text.contains("certificate") || text.contains("tls") || text.contains("ssl") {
            return CheckStatus::Error(FailureKind::Tls);
        }
        return CheckStatus::Error(FailureKind::Connection);
    }
    if text.contains("certificate") || text.contains("tls") || text.contains("ssl") {
        return CheckStatus::Error(FailureKind::Tls);
    }

    CheckStatus::Error(FailureKind::Other(error.to_string()))
}

/// The whole error chain, lowercased. reqwest's top-level message is
/// usually just "error sending request"; the cause underneath names the
/// actual failure.
fn error_chain_text(error: &reqwest::Error) -> String {
    let mut text = error.to_string().to_lowercase();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        text.push(' ');
        text.push_str(&cause.to_string().to_lowercase());
        source = cause.source();
    }
    text
}
