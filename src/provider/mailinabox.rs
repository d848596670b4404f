use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use super::DnsUpdateResult;
use crate::config::Settings;
use crate::error::HookError;
use crate::hook::Invocation;

// The admin API reads the body as the raw record value, whatever this says.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Client for the custom-DNS endpoint of the Mail-in-a-Box admin API.
pub struct AdminApi {
    client: Client,
    base_url: String,
    user: String,
    pass: String,
}

impl AdminApi {
    pub fn new(settings: &Settings) -> Self {
        Self::with_base_url(format!("https://{}", settings.host), settings)
    }

    pub fn with_base_url(base_url: impl Into<String>, settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            user: settings.user.clone(),
            pass: settings.pass.clone(),
        }
    }

    /// Domain goes in verbatim; escaping is the caller's business.
    pub fn txt_record_url(&self, domain: &str) -> String {
        format!("{}/admin/dns/custom/{}/TXT", self.base_url, domain)
    }

    /// Sends the single PUT/DELETE for `invocation` and returns the body text.
    /// The body is not judged here.
    pub async fn update_record(&self, invocation: &Invocation) -> Result<DnsUpdateResult, HookError> {
        let url = self.txt_record_url(&invocation.domain);
        let request = self
            .client
            .request(invocation.verb.method(), &url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .basic_auth(&self.user, Some(&self.pass))
            .body(invocation.value.clone())
            .build()
            .map_err(HookError::BuildRequest)?;

        debug!("{} {}", request.method(), request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(HookError::Transport)?;

        debug!("Admin API responded with {}", response.status());

        let body = response.text().await.map_err(HookError::ReadBody)?;

        Ok(DnsUpdateResult { body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::Verb;
    use wiremock::matchers::{basic_auth, body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings() -> Settings {
        Settings {
            user: "admin@example.com".into(),
            pass: "secret".into(),
            host: "box.example.com".into(),
        }
    }

    fn invocation(verb: Verb, domain: &str, value: &str) -> Invocation {
        Invocation { verb, domain: domain.into(), value: value.into() }
    }

    #[test]
    fn url_uses_https_and_host() {
        let api = AdminApi::new(&settings());
        assert_eq!(
            api.txt_record_url("_acme-challenge.example.com"),
            "https://box.example.com/admin/dns/custom/_acme-challenge.example.com/TXT"
        );
    }

    #[tokio::test]
    async fn present_sends_put_with_raw_value() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/admin/dns/custom/example.com/TXT"))
            .and(basic_auth("admin@example.com", "secret"))
            .and(header("content-type", FORM_CONTENT_TYPE))
            .and(body_string("abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_string("updated DNS: example.com"))
            .expect(1)
            .mount(&server)
            .await;

        let api = AdminApi::with_base_url(server.uri(), &settings());
        let result = api
            .update_record(&invocation(Verb::Present, "example.com", "abc123"))
            .await
            .unwrap();

        assert!(result.is_updated());
    }

    #[tokio::test]
    async fn cleanup_sends_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/admin/dns/custom/example.com/TXT"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not found"))
            .expect(1)
            .mount(&server)
            .await;

        let api = AdminApi::with_base_url(server.uri(), &settings());
        let result = api
            .update_record(&invocation(Verb::Cleanup, "example.com", ""))
            .await
            .unwrap();

        assert_eq!(result.body, "not found");
        assert!(!result.is_updated());
    }

    #[tokio::test]
    async fn error_status_body_is_still_returned() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Incorrect username or password"))
            .mount(&server)
            .await;

        let api = AdminApi::with_base_url(server.uri(), &settings());
        let result = api
            .update_record(&invocation(Verb::Present, "example.com", "abc"))
            .await
            .unwrap();

        assert!(!result.is_updated());
    }

    #[tokio::test]
    async fn malformed_host_fails_to_build() {
        let api = AdminApi::with_base_url("https://bad host", &settings());
        let err = api
            .update_record(&invocation(Verb::Present, "example.com", "abc"))
            .await
            .unwrap_err();

        assert!(matches!(err, HookError::BuildRequest(_)));
        assert_eq!(err.exit_code(), 7);
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        // Bind and drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let api = AdminApi::with_base_url(format!("http://127.0.0.1:{port}"), &settings());
        let err = api
            .update_record(&invocation(Verb::Cleanup, "example.com", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, HookError::Transport(_)));
        assert_eq!(err.exit_code(), 8);
    }
}
