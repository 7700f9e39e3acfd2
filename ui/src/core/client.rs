//! HTTP client for the external classification endpoint.
//!
//! One multipart `POST` per call, field `file`, no retries. The outcome is
//! folded into [`PredictError`] so the view only ever shows one message.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::config::ApiConfig;
use super::timing::with_timeout;

/// Multipart field carrying the image bytes.
pub const FILE_FIELD: &str = "file";

/// A file picked by the user, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    /// MIME type is guessed from the file name.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self { name, mime, bytes }
    }

    pub fn with_mime(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// Self-contained `data:` URI, used for previews and history thumbnails.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Decoded success body. `raw` is the response verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionPayload {
    pub raw: Value,
    pub label: String,
    pub confidence: f64,
}

impl PredictionPayload {
    /// Pull `class` (or `predicted_class`) and `confidence` out of a response body.
    pub fn from_value(raw: Value) -> Self {
        let label = ["class", "predicted_class"]
            .iter()
            .filter_map(|key| raw.get(key))
            .find(|value| !value.is_null())
            .map(|value| match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => String::new(),
            })
            .unwrap_or_default();

        let confidence = coerce_confidence(raw.get("confidence"));

        Self {
            raw,
            label,
            confidence,
        }
    }
}

/// Numbers pass through, numeric strings are parsed, absent or falsy values are `0`,
/// anything unparseable is NaN.
fn coerce_confidence(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => 0.0,
        Some(Value::Bool(true)) => 1.0,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Some(_) => f64::NAN,
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictError {
    #[error("No file selected.")]
    NoFileSelected,
    #[error("Please upload a valid image file.")]
    NotAnImage { mime: String },
    #[error("Server error: {status}{}", detail_suffix(.detail))]
    Server { status: u16, detail: Option<String> },
    #[error("No response from server. Check backend and CORS.")]
    Network(String),
    #[error("Request error: {0}")]
    Request(String),
}

impl PredictError {
    /// Raised before anything is sent.
    pub fn is_client_validation(&self) -> bool {
        matches!(self, Self::NoFileSelected | Self::NotAnImage { .. })
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => format!(" {d}"),
        _ => String::new(),
    }
}

#[derive(Debug, Clone)]
pub struct PredictionClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl PredictionClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Send `image` to the endpoint and decode the answer.
    pub async fn classify(&self, image: &SelectedImage) -> Result<PredictionPayload, PredictError> {
        if !image.is_image() {
            return Err(PredictError::NotAnImage {
                mime: image.mime.clone(),
            });
        }

        let part = Part::bytes(image.bytes.clone())
            .file_name(image.name.clone())
            .mime_str(&image.mime)
            .map_err(|err| PredictError::Request(err.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        info!(
            endpoint = %self.config.endpoint,
            file = %image.name,
            bytes = image.bytes.len(),
            "dispatching classification request"
        );

        let exchange = async {
            let response = self
                .http
                .post(self.config.endpoint.as_str())
                .multipart(form)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = with_timeout(self.config.timeout, exchange)
            .await
            .ok_or_else(|| {
                warn!(timeout_ms = self.config.timeout.as_millis() as u64, "classification timed out");
                PredictError::Network(format!(
                    "timed out after {}ms",
                    self.config.timeout.as_millis()
                ))
            })?
            .map_err(transport_error)?;

        let outcome = interpret_response(status, &body);
        match &outcome {
            Ok(payload) => info!(status, label = %payload.label, "classification received"),
            Err(err) => warn!(status, "classification rejected: {err}"),
        }
        outcome
    }
}

fn transport_error(err: reqwest::Error) -> PredictError {
    if err.is_builder() {
        PredictError::Request(err.to_string())
    } else {
        warn!("no response from classification endpoint: {err}");
        PredictError::Network(err.to_string())
    }
}

/// Map a status and body onto a payload or a server error.
pub fn interpret_response(status: u16, body: &str) -> Result<PredictionPayload, PredictError> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if status == 200 {
        let raw = parsed.unwrap_or_else(|| Value::String(body.to_string()));
        return Ok(PredictionPayload::from_value(raw));
    }

    let detail = parsed
        .as_ref()
        .and_then(|value| value.get("detail"))
        .and_then(|detail| match detail {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        });
    Err(PredictError::Server { status, detail })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_reads_class_and_confidence() {
        let payload =
            interpret_response(200, r#"{"class":"Tomato___Late_blight","confidence":0.9423}"#)
                .unwrap();
        assert_eq!(payload.label, "Tomato___Late_blight");
        assert_eq!(payload.confidence, 0.9423);
    }

    #[test]
    fn predicted_class_alias_and_string_confidence() {
        let payload = interpret_response(
            200,
            r#"{"predicted_class":"Apple___healthy","confidence":"0.75"}"#,
        )
        .unwrap();
        assert_eq!(payload.label, "Apple___healthy");
        assert_eq!(payload.confidence, 0.75);
    }

    #[test]
    fn missing_confidence_defaults_to_zero() {
        let payload = PredictionPayload::from_value(json!({ "class": "Tomato___healthy" }));
        assert_eq!(payload.confidence, 0.0);
        let payload =
            PredictionPayload::from_value(json!({ "class": "x", "confidence": null }));
        assert_eq!(payload.confidence, 0.0);
    }

    #[test]
    fn unparseable_confidence_is_nan() {
        let payload = PredictionPayload::from_value(json!({ "class": "x", "confidence": "high" }));
        assert!(payload.confidence.is_nan());
    }

    #[test]
    fn null_class_falls_through_to_alias() {
        let payload = PredictionPayload::from_value(
            json!({ "class": null, "predicted_class": "Corn___Common_rust" }),
        );
        assert_eq!(payload.label, "Corn___Common_rust");
    }

    #[test]
    fn non_200_is_server_error_with_detail() {
        let err = interpret_response(500, r#"{"detail":"model not loaded"}"#).unwrap_err();
        assert_eq!(
            err,
            PredictError::Server {
                status: 500,
                detail: Some("model not loaded".into())
            }
        );
        assert_eq!(err.to_string(), "Server error: 500 model not loaded");
    }

    #[test]
    fn non_200_without_detail() {
        let err = interpret_response(404, "Not Found").unwrap_err();
        assert_eq!(err.to_string(), "Server error: 404");
    }

    #[test]
    fn structured_detail_is_stringified() {
        let err = interpret_response(422, r#"{"detail":[{"msg":"field required"}]}"#).unwrap_err();
        match err {
            PredictError::Server { status, detail } => {
                assert_eq!(status, 422);
                assert!(detail.unwrap().contains("field required"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn mime_is_guessed_from_name() {
        assert_eq!(SelectedImage::new("leaf.JPG", vec![]).mime, "image/jpeg");
        assert!(SelectedImage::new("leaf.png", vec![]).is_image());
        assert!(!SelectedImage::new("notes.txt", vec![]).is_image());
        assert!(!SelectedImage::new("no_extension", vec![]).is_image());
    }

    #[test]
    fn data_uri_embeds_base64() {
        let image = SelectedImage::with_mime("a.png", "image/png", b"abc".to_vec());
        assert_eq!(image.data_uri(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn non_image_is_rejected_before_dispatch() {
        // An unroutable endpoint: any network attempt would surface as a different error.
        let client = PredictionClient::new(ApiConfig::new("http://0.0.0.0:0/never"));
        let file = SelectedImage::with_mime("notes.txt", "text/plain", b"hello".to_vec());
        let err = futures::executor::block_on(client.classify(&file)).unwrap_err();
        assert_eq!(
            err,
            PredictError::NotAnImage {
                mime: "text/plain".into()
            }
        );
        assert!(err.is_client_validation());
        assert_eq!(err.to_string(), "Please upload a valid image file.");
    }

    #[test]
    fn malformed_endpoint_is_request_error() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let client = PredictionClient::new(ApiConfig::new("not a url"));
        let image = SelectedImage::with_mime("leaf.png", "image/png", vec![0u8; 4]);
        let err = rt.block_on(client.classify(&image)).unwrap_err();
        assert!(matches!(err, PredictError::Request(_)), "got {err:?}");
    }

    #[test]
    fn silent_server_times_out_as_network_error() {
        use std::net::TcpListener;
        use std::time::{Duration, Instant};

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        // Accept and hold the connection without ever answering.
        std::thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                std::thread::sleep(Duration::from_secs(5));
                drop(stream);
            }
        });

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let mut config = ApiConfig::new(format!("http://{addr}/predict"));
        config.timeout = Duration::from_millis(300);
        let client = PredictionClient::new(config);
        let image = SelectedImage::with_mime("leaf.png", "image/png", vec![0u8; 4]);

        let started = Instant::now();
        let err = rt.block_on(client.classify(&image)).unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(4), "timeout not applied");
        assert_eq!(err, PredictError::Network("timed out after 300ms".into()));
        assert_eq!(
            err.to_string(),
            "No response from server. Check backend and CORS."
        );
    }

    #[test]
    fn refused_connection_is_network_error() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let client = PredictionClient::new(ApiConfig::new("http://127.0.0.1:1/predict"));
        let image = SelectedImage::with_mime("leaf.png", "image/png", vec![0u8; 4]);
        let err = rt.block_on(client.classify(&image)).unwrap_err();
        assert!(matches!(err, PredictError::Network(_)), "got {err:?}");
        assert_eq!(
            err.to_string(),
            "No response from server. Check backend and CORS."
        );
    }
}
