use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, Response};
use reqwest::Url;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::common::config::Config;
use crate::common::errors::Error;
use crate::common::utils::{extract_request, http_error, json_response};
use crate::common::{TRIGGER_FAILED_ERROR, WEBHOOK_PATH};
use crate::trigger::{PlanForm, TriggerRequest};
use crate::Services;

const FORWARDED_HOST_HEADER: &str = "x-forwarded-host";

#[derive(Debug, Serialize)]
struct PlanResponse {
    status: &'static str,
    id: Uuid,
}

/// First entry of `x-forwarded-host`; proxies may append their own.
fn forwarded_host(request: &Request) -> Option<&str> {
    let host = request
        .headers()
        .get(FORWARDED_HOST_HEADER)?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim();

    (!host.is_empty()).then_some(host)
}

/// `<base>/api/webhook?id=<id>[&token=<secret>]`
///
/// The base is `https://<forwarded host>`, or the configured local base when
/// the header is absent or does not form a valid URL.
pub fn callback_url(request: &Request, config: &Config, id: Uuid) -> Result<Url, Error> {
    let forwarded = forwarded_host(request).and_then(|host| {
        let url = Url::parse(&format!("https://{host}{WEBHOOK_PATH}"));
        if url.is_err() {
            warn!("Ignoring unusable forwarded host {:?}", host);
        }
        url.ok()
    });

    let mut url = match forwarded {
        Some(url) => url,
        None => Url::parse(&format!(
            "{}{WEBHOOK_PATH}",
            config.local_base_url.trim_end_matches('/')
        ))
        .map_err(|err| {
            error!("Local base url {:?} is invalid: {}", config.local_base_url, err);
            http_error(StatusCode::INTERNAL_SERVER_ERROR, TRIGGER_FAILED_ERROR)
        })?,
    };

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("id", &id.to_string());
        if let Some(secret) = &config.webhook_secret {
            query.append_pair("token", secret);
        }
    }

    Ok(url)
}

#[tracing::instrument(skip_all, fields(method = %request.method(), path = %request.uri().path()))]
pub async fn process_request(
    request: Request,
    services: &Services,
) -> Result<Response<Body>, Error> {
    let form = extract_request::<PlanForm>(&request)?.unwrap_or_default();

    let id = Uuid::new_v4();
    let callback_url = callback_url(&request, &services.config, id)?;
    info!(
        "Sending webhook callback to: {}{}",
        callback_url.origin().ascii_serialization(),
        callback_url.path()
    );

    let trigger_request = TriggerRequest::new(form, callback_url.as_str());
    if let Err(err) = services.trigger.fire(&trigger_request).await {
        error!("Error triggering Relay: {}", err);
        return Err(http_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            TRIGGER_FAILED_ERROR,
        ));
    }

    json_response(
        StatusCode::OK,
        &PlanResponse {
            status: "Triggered",
            id,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http;

    fn request(forwarded_host: Option<&str>) -> Request {
        let mut builder = http::Request::builder().method("POST").uri("/api/plan");
        if let Some(host) = forwarded_host {
            builder = builder.header(FORWARDED_HOST_HEADER, host);
        }
        builder.body(Body::Empty).unwrap()
    }

    #[test]
    fn callback_defaults_to_local_base() {
        let id = Uuid::new_v4();
        let url = callback_url(&request(None), &Config::default(), id).unwrap();

        assert_eq!(
            url.as_str(),
            format!("http://localhost:3000/api/webhook?id={id}")
        );
    }

    #[test]
    fn callback_uses_forwarded_host_over_https() {
        let id = Uuid::new_v4();
        let url = callback_url(&request(Some("relay.example.com")), &Config::default(), id)
            .unwrap();

        assert_eq!(
            url.as_str(),
            format!("https://relay.example.com/api/webhook?id={id}")
        );
    }

    #[test]
    fn callback_takes_first_of_forwarded_host_list() {
        let id = Uuid::new_v4();
        let url = callback_url(
            &request(Some("a.example.com, b.example.com")),
            &Config::default(),
            id,
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            format!("https://a.example.com/api/webhook?id={id}")
        );
    }

    #[test]
    fn unusable_forwarded_host_falls_back_to_local_base() {
        let id = Uuid::new_v4();
        for host in ["not a host", " , b.example.com"] {
            let url = callback_url(&request(Some(host)), &Config::default(), id).unwrap();
            assert_eq!(
                url.as_str(),
                format!("http://localhost:3000/api/webhook?id={id}")
            );
        }
    }

    #[test]
    fn callback_carries_encoded_secret() {
        let config = Config {
            webhook_secret: Some("s3cr&t".into()),
            ..Default::default()
        };
        let id = Uuid::new_v4();
        let url = callback_url(&request(None), &config, id).unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("id".to_string(), id.to_string()),
                ("token".to_string(), "s3cr&t".to_string()),
            ]
        );
    }
}
