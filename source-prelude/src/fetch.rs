use crate::{SourceError, SourceErrorReason, SourceId};
use url::{ParseError, Url};

pub fn build_url(
    origin: SourceId,
    base_url: &str,
    path: &str,
    params: &[(&str, &str)],
) -> Result<Url, SourceError> {
    let url = format!("{base_url}{}{path}", origin.descriptor().api_base_path);
    Url::parse_with_params(url.as_str(), params)
        .map_err(|cause| SourceError::new(origin, SourceErrorReason::UnableToBuildUrl { cause }))
}

/// Url of one resource under the source's API base path, each segment percent encoded.
pub fn build_resource_url(
    origin: SourceId,
    base_url: &str,
    segments: &[&str],
) -> Result<Url, SourceError> {
    let invalid = |cause| SourceError::new(origin, SourceErrorReason::UnableToBuildUrl { cause });
    let mut url = Url::parse(&format!("{base_url}{}", origin.descriptor().api_base_path))
        .map_err(invalid)?;
    url.path_segments_mut()
        .map_err(|_| invalid(ParseError::SetHostOnCannotBeABaseUrl))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub async fn fetch_json(
    client: &reqwest::Client,
    origin: SourceId,
    url: Url,
) -> Result<serde_json::Value, SourceError> {
    let url_str = url.to_string();

    let res = client.get(url).send().await.map_err(|err| {
        SourceError::new(
            origin,
            SourceErrorReason::UnableToQuery {
                url: url_str.clone(),
                cause: err.to_string(),
            },
        )
    })?;
    let status = res.status();
    if !status.is_success() {
        return Err(SourceError::new(
            origin,
            SourceErrorReason::UnexpectedStatus {
                url: url_str,
                status: status.as_u16(),
            },
        ));
    }
    res.json().await.map_err(|err| {
        // the body may stall after the headers went through
        let reason = if err.is_timeout() {
            SourceErrorReason::UnableToQuery {
                url: url_str,
                cause: err.to_string(),
            }
        } else {
            SourceErrorReason::UnableToRead {
                url: url_str,
                cause: err.to_string(),
            }
        };
        SourceError::new(origin, reason)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn should_build_url_under_api_base() {
        let url = build_url(
            SourceId::Melolo,
            "http://localhost:8080",
            "/search",
            &[("query", "love story")],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/melolo/search?query=love+story"
        );
    }

    #[test]
    fn should_build_resource_url() {
        let url = build_resource_url(
            SourceId::Dramabox,
            "http://localhost:8080",
            &["detail", "41000/102345"],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/dramabox/detail/41000%2F102345"
        );
    }

    #[tokio::test]
    async fn should_report_stalled_body_as_network() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n[",
                )
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        });

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(200))
            .build()
            .unwrap();
        let url = build_url(
            SourceId::Netshort,
            &format!("http://{addr}"),
            "/search",
            &[("query", "ceo")],
        )
        .unwrap();
        let err = fetch_json(&client, SourceId::Netshort, url)
            .await
            .unwrap_err();
        assert!(matches!(err.reason, SourceErrorReason::UnableToQuery { .. }));
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[test]
    fn should_fail_building_invalid_url() {
        let err = build_url(SourceId::Melolo, "not a url", "/search", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn should_report_unexpected_status() {
        let mut server = mockito::Server::new_async().await;
        let page = server
            .mock("GET", "/api/netshort/search?query=ceo")
            .with_status(503)
            .create_async()
            .await;

        let url = build_url(
            SourceId::Netshort,
            server.url().as_str(),
            "/search",
            &[("query", "ceo")],
        )
        .unwrap();
        let err = fetch_json(&reqwest::Client::new(), SourceId::Netshort, url)
            .await
            .unwrap_err();
        assert!(matches!(
            err.reason,
            SourceErrorReason::UnexpectedStatus { status: 503, .. }
        ));
        assert_eq!(err.kind(), ErrorKind::Network);

        page.assert_async().await;
    }

    #[tokio::test]
    async fn should_report_unreadable_body() {
        let mut server = mockito::Server::new_async().await;
        let page = server
            .mock("GET", "/api/netshort/search?query=ceo")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let url = build_url(
            SourceId::Netshort,
            server.url().as_str(),
            "/search",
            &[("query", "ceo")],
        )
        .unwrap();
        let err = fetch_json(&reqwest::Client::new(), SourceId::Netshort, url)
            .await
            .unwrap_err();
        assert!(matches!(err.reason, SourceErrorReason::UnableToRead { .. }));
        assert_eq!(err.kind(), ErrorKind::UpstreamFormat);

        page.assert_async().await;
    }
}
