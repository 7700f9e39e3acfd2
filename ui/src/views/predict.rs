use dioxus::prelude::*;
use tracing::{info, warn};

use crate::core::client::{PredictError, PredictionClient, PredictionPayload, SelectedImage};
use crate::core::history::{HistoryStore, PredictionRecord};
use crate::core::storage::{platform_store, PlatformStore};
use crate::core::timing::{now_ms, now_rfc3339};
use crate::results::{DisplayModel, HistoryPanel, ResultSummary};

/// UI status of the predict view. `Failed` carries the user-facing message.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PredictStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed(String),
}

impl PredictStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, PredictStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PredictStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What a classification request was started with. The preview is taken at
/// dispatch so the history record keeps the image that was actually sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub image: SelectedImage,
    pub preview: Option<String>,
}

/// Selection, preview, result and status of the predict view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UploadState {
    pub selected: Option<SelectedImage>,
    pub preview: Option<String>,
    pub payload: Option<PredictionPayload>,
    pub status: PredictStatus,
}

impl UploadState {
    /// A file was picked. Non-images leave nothing selected.
    pub fn pick(&mut self, image: SelectedImage) {
        if !image.is_image() {
            info!("rejected non-image selection ({})", image.mime);
            let err = PredictError::NotAnImage { mime: image.mime };
            self.reset(PredictStatus::Failed(err.to_string()));
            return;
        }
        self.payload = None;
        self.preview = Some(image.data_uri());
        self.selected = Some(image);
        self.status = PredictStatus::Idle;
    }

    /// The dialog was cancelled (`None`) or the file could not be read.
    pub fn drop_selection(&mut self, failure: Option<PredictError>) {
        let status = failure
            .map(|err| PredictStatus::Failed(err.to_string()))
            .unwrap_or_default();
        self.reset(status);
    }

    pub fn clear(&mut self) {
        self.reset(PredictStatus::Idle);
    }

    /// Enter `Loading` and hand back what to send.
    pub fn dispatch(&mut self) -> Result<Dispatch, PredictError> {
        let Some(image) = self.selected.clone() else {
            let err = PredictError::NoFileSelected;
            self.status = PredictStatus::Failed(err.to_string());
            return Err(err);
        };
        self.payload = None;
        self.status = PredictStatus::Loading;
        Ok(Dispatch {
            image,
            preview: self.preview.clone(),
        })
    }

    pub fn complete(&mut self, outcome: Result<PredictionPayload, PredictError>) {
        match outcome {
            Ok(payload) => {
                self.payload = Some(payload);
                self.status = PredictStatus::Success;
            }
            Err(err) => self.status = PredictStatus::Failed(err.to_string()),
        }
    }

    /// Show a stored record without a network call.
    pub fn replay(&mut self, record: &PredictionRecord) {
        self.payload = Some(record.replay_payload());
        self.preview = record.image.clone();
        self.selected = None;
        self.status = PredictStatus::Success;
    }

    /// Classify is offered only for a fresh selection with no result on screen.
    pub fn can_classify(&self) -> bool {
        !self.status.is_loading() && self.selected.is_some() && self.payload.is_none()
    }

    pub fn can_clear(&self) -> bool {
        !self.status.is_loading()
            && (self.selected.is_some() || self.preview.is_some() || self.payload.is_some())
    }

    pub fn model(&self) -> Option<DisplayModel> {
        self.payload
            .as_ref()
            .and_then(|p| DisplayModel::build(&p.label, p.confidence, self.preview.clone()))
    }

    fn reset(&mut self, status: PredictStatus) {
        self.selected = None;
        self.preview = None;
        self.payload = None;
        self.status = status;
    }
}

#[component]
pub fn Predict() -> Element {
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = _lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let client = use_hook(PredictionClient::from_env);
    let endpoint = client.endpoint().to_string();

    let mut state = use_signal(UploadState::default);
    let mut history = use_signal(|| HistoryStore::<PlatformStore>::load(platform_store()));

    let on_file = move |evt: FormEvent| async move {
        let name = evt
            .files()
            .and_then(|engine| engine.files().into_iter().next().map(|name| (engine, name)));
        let Some((engine, name)) = name else {
            state.write().drop_selection(None);
            return;
        };
        match engine.read_file(&name).await {
            Some(bytes) => state.write().pick(SelectedImage::new(name, bytes)),
            None => {
                warn!("could not read selected file {name}");
                state
                    .write()
                    .drop_selection(Some(PredictError::NoFileSelected));
            }
        }
    };

    let classify_client = client.clone();
    let on_classify = move |_| {
        let Ok(dispatch) = state.write().dispatch() else {
            return;
        };
        let client = classify_client.clone();

        spawn(async move {
            let outcome = client.classify(&dispatch.image).await;
            match &outcome {
                Ok(result) => {
                    let id = history.peek().next_id(now_ms());
                    let record =
                        PredictionRecord::from_payload(result, dispatch.preview, id, now_rfc3339());
                    match record {
                        Some(record) => history.write().append(record),
                        None => info!("prediction carried no label; not recorded"),
                    }
                }
                Err(err) => warn!("prediction failed: {err}"),
            }
            state.write().complete(outcome);
        });
    };

    let on_clear = move |_| state.write().clear();

    let on_history_select = move |record: PredictionRecord| state.write().replay(&record);

    let on_history_clear = move |_| {
        history.write().clear();
    };

    let current = state.read().clone();
    let can_classify = current.can_classify();
    let can_clear = current.can_clear();
    let loading = current.status.is_loading();
    let error = current.status.error().map(str::to_string);
    let model = current.model();
    let preview = current.preview.clone();
    let file_name = current.selected.as_ref().map(|image| image.name.clone());
    let records = history.read().records().to_vec();
    let preview_alt = crate::t!("upload-preview-alt");

    rsx! {
        section { class: "page page-predict",
            div { style: "display:none", "{_lang_marker}" }
            header { class: "page-predict__header",
                h1 { {crate::t!("predict-title")} }
                p { class: "page-predict__subtitle", {crate::t!("predict-subtitle")} }
            }

            div { class: "predict-grid",
                div { class: "card upload-card",
                    label { class: "upload",
                        r#for: "predict-file",
                        if let Some(src) = preview {
                            img {
                                class: "upload__preview",
                                src: "{src}",
                                alt: "{preview_alt}",
                            }
                        } else {
                            div { class: "upload__prompt",
                                span { class: "upload__icon", aria_hidden: "true", "⬆" }
                                p { {crate::t!("upload-prompt")} }
                                p { class: "upload__hint", {crate::t!("upload-hint")} }
                            }
                        }
                    }
                    input {
                        id: "predict-file",
                        class: "visually-hidden",
                        r#type: "file",
                        accept: "image/*",
                        disabled: loading,
                        onchange: on_file,
                    }
                    if let Some(name) = file_name {
                        p { class: "upload__filename", "{name}" }
                    }

                    div { class: "upload-card__actions",
                        button {
                            r#type: "button",
                            class: "button button--primary",
                            disabled: !can_classify,
                            onclick: on_classify,
                            if loading {
                                {crate::t!("predict-analyzing")}
                            } else {
                                {crate::t!("predict-classify")}
                            }
                        }
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            disabled: !can_clear,
                            onclick: on_clear,
                            {crate::t!("predict-clear")}
                        }
                    }

                    if let Some(message) = error {
                        p { class: "upload-card__error", role: "alert", "{message}" }
                    }
                }

                div { class: "card result-card",
                    h3 { {crate::t!("result-heading")} }
                    if let Some(model) = model {
                        ResultSummary { model }
                    } else {
                        p { class: "result-card__placeholder", {crate::t!("result-placeholder")} }
                    }

                    HistoryPanel {
                        records,
                        on_select: on_history_select,
                        on_clear: on_history_clear,
                    }
                }
            }

            if loading {
                div { class: "loading-overlay",
                    div { class: "loading-overlay__box",
                        div { class: "spinner" }
                        p { {crate::t!("loading-text")} }
                    }
                }
            }

            footer { class: "page-predict__footer",
                {crate::t!("footer-endpoint", endpoint = endpoint.as_str())}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn leaf(name: &str) -> SelectedImage {
        SelectedImage::with_mime(name, "image/png", b"leaf".to_vec())
    }

    fn picked(name: &str) -> UploadState {
        let mut state = UploadState::default();
        state.pick(leaf(name));
        state
    }

    fn late_blight() -> PredictionPayload {
        PredictionPayload::from_value(json!({ "class": "Tomato___Late_blight", "confidence": 0.94 }))
    }

    #[test]
    fn picking_an_image_previews_it() {
        let state = picked("a.png");
        assert_eq!(state.preview.as_deref(), Some("data:image/png;base64,bGVhZg=="));
        assert!(state.can_classify());
        assert!(state.can_clear());
    }

    #[test]
    fn non_image_clears_previous_selection() {
        let mut state = picked("a.png");
        state.pick(SelectedImage::with_mime("notes.txt", "text/plain", vec![1]));
        assert_eq!(state.selected, None);
        assert_eq!(state.preview, None);
        assert_eq!(state.status.error(), Some("Please upload a valid image file."));
        assert!(!state.can_classify());
    }

    #[test]
    fn cancelled_dialog_drops_stale_selection() {
        let mut state = picked("a.png");
        state.complete(Ok(late_blight()));
        state.drop_selection(None);
        assert_eq!(state, UploadState::default());
        assert!(!state.can_clear());
    }

    #[test]
    fn unreadable_file_drops_selection_and_reports() {
        let mut state = picked("a.png");
        state.drop_selection(Some(PredictError::NoFileSelected));
        assert_eq!(state.selected, None);
        assert_eq!(state.preview, None);
        assert_eq!(state.payload, None);
        assert_eq!(state.status.error(), Some("No file selected."));
    }

    #[test]
    fn dispatch_without_file_fails_fast() {
        let mut state = UploadState::default();
        assert_eq!(state.dispatch(), Err(PredictError::NoFileSelected));
        assert_eq!(state.status.error(), Some("No file selected."));
    }

    #[test]
    fn dispatch_keeps_the_preview_that_was_sent() {
        let mut state = picked("first.png");
        let sent = state.preview.clone();
        let dispatch = state.dispatch().unwrap();
        assert!(state.status.is_loading());
        assert!(!state.can_classify());
        assert!(!state.can_clear());

        // The preview moves on before the response lands.
        state.pick(SelectedImage::with_mime("second.png", "image/png", b"other".to_vec()));
        assert_ne!(state.preview, sent);
        assert_eq!(dispatch.preview, sent);
        assert_eq!(dispatch.image.name, "first.png");
    }

    #[test]
    fn success_shows_result_and_blocks_reclassify() {
        let mut state = picked("a.png");
        state.dispatch().unwrap();
        state.complete(Ok(late_blight()));
        assert_eq!(state.status, PredictStatus::Success);
        assert!(!state.can_classify());
        let model = state.model().expect("model");
        assert_eq!(model.headline(), "Tomato - Late blight");
        assert!(model.image.is_some());
    }

    #[test]
    fn failure_allows_retry() {
        let mut state = picked("a.png");
        state.dispatch().unwrap();
        state.complete(Err(PredictError::Network("refused".into())));
        assert_eq!(
            state.status.error(),
            Some("No response from server. Check backend and CORS.")
        );
        assert!(state.can_classify());
    }

    #[test]
    fn replay_shows_record_without_file() {
        let record = PredictionRecord::from_payload(
            &late_blight(),
            Some("data:image/png;base64,AAAA".into()),
            1,
            "2024-05-01T10:00:00Z".into(),
        )
        .unwrap();
        let mut state = picked("a.png");
        state.replay(&record);
        assert_eq!(state.selected, None);
        assert_eq!(state.preview.as_deref(), Some("data:image/png;base64,AAAA"));
        assert!(!state.can_classify());
        assert!(state.can_clear());
        state.clear();
        assert_eq!(state, UploadState::default());
    }
}
