//! Upload form driver: runs one attempt at a time against the backend

use bytes::Bytes;
use tracing::{info, warn};

use crate::{
    error::ClientResult,
    session::{SelectedFile, UploadEvent, UploadState},
    transport::UploadClient,
    viewer::{ImageView, DISPLAY_ERROR, INITIAL_LOAD_ERROR},
};

/// One upload form with its image panel
///
/// `submit` borrows the form mutably for the whole attempt, so a form never
/// has two uploads in flight.
#[derive(Debug, Default)]
pub struct UploadForm {
    state: UploadState,
    image: ImageView,
}

impl UploadForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &UploadState {
        &self.state
    }

    #[must_use]
    pub const fn image(&self) -> &ImageView {
        &self.image
    }

    /// Replaces the selected file, clearing any previous status
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        self.dispatch(UploadEvent::FileChosen(file));
    }

    /// Runs a full upload attempt and returns the state it ended in
    ///
    /// On success the image panel switches to the uploaded object.
    pub async fn submit(&mut self, client: &UploadClient) -> &UploadState {
        self.dispatch(UploadEvent::Submitted);

        let (file_name, content_type) = match &self.state {
            UploadState::RequestingUrl { file } => (file.name.clone(), file.content_type.clone()),
            _ => return &self.state,
        };

        match client.request_upload_url(&file_name, &content_type).await {
            Ok(issued) => self.dispatch(UploadEvent::UrlIssued {
                key: issued.file_name,
                url: issued.url,
            }),
            Err(err) => {
                warn!("Error requesting upload URL: {err}");
                self.dispatch(UploadEvent::UrlRequestFailed(err.to_string()));
                return &self.state;
            }
        }

        let (key, url, data) = match &self.state {
            UploadState::Uploading { file, key, url } => {
                (key.clone(), url.clone(), file.data.clone())
            }
            _ => return &self.state,
        };

        match client.put_object(&url, &content_type, data).await {
            Ok(()) => self.dispatch(UploadEvent::UploadSucceeded),
            Err(err) => {
                warn!("Upload to storage failed: {err}");
                self.dispatch(UploadEvent::UploadFailed(err.to_string()));
                return &self.state;
            }
        }

        self.show_image(client, &key, DISPLAY_ERROR).await;
        &self.state
    }

    /// Points the image panel at `key`, as on first page load
    pub async fn load_image(&mut self, client: &UploadClient, key: &str) -> &ImageView {
        self.show_image(client, key, INITIAL_LOAD_ERROR).await;
        &self.image
    }

    /// Fetches the bytes of the displayed image
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transfer` if storage rejects the signed GET
    pub async fn fetch_image(&self, client: &UploadClient) -> ClientResult<Option<Bytes>> {
        match self.image.url() {
            Some(url) => client.get_object(url).await.map(Some),
            None => Ok(None),
        }
    }

    async fn show_image(&mut self, client: &UploadClient, key: &str, failure_message: &str) {
        self.image = ImageView::Loading;

        self.image = match client.request_image_url(key).await {
            Ok(issued) => ImageView::Loaded {
                key: issued.file_name,
                url: issued.url,
            },
            Err(err) => {
                warn!("Error fetching presigned URL for display: {err}");
                ImageView::Failed {
                    message: failure_message.to_string(),
                }
            }
        };
    }

    fn dispatch(&mut self, event: UploadEvent) {
        self.state = std::mem::take(&mut self.state).apply(event);

        if let Some(status) = self.state.status_message() {
            info!("{status}");
        }
    }
}
