//! Upload attempt state machine

use std::fmt;

use bytes::Bytes;
use tracing::debug;

/// Status shown when submitting without a file
pub const NO_FILE_SELECTED: &str = "Please select an image to upload";

/// File picked for upload
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Original file name, used to derive the object key
    pub name: String,
    /// MIME type sent with the upload
    pub content_type: String,
    /// File contents
    pub data: Bytes,
}

impl SelectedFile {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Size in KiB
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn size_kb(&self) -> f64 {
        self.data.len() as f64 / 1024.0
    }

    /// Preview caption, e.g. `photo.png (1.50 KB)`
    #[must_use]
    pub fn preview_label(&self) -> String {
        format!("{} ({:.2} KB)", self.name, self.size_kb())
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// State of one upload form
///
/// ```text
/// Idle -> FileSelected -> RequestingUrl -> Uploading -> Succeeded
///                                       \-> Failed
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadState {
    /// Nothing selected
    #[default]
    Idle,
    /// A file is ready to submit
    FileSelected { file: SelectedFile },
    /// Waiting for the issuer to return a signed PUT URL
    RequestingUrl { file: SelectedFile },
    /// Sending the file to storage
    Uploading {
        file: SelectedFile,
        key: String,
        url: String,
    },
    /// Stored under `key`
    Succeeded { key: String },
    /// The attempt ended with `message`; a previously selected file is kept
    /// so it can be submitted again
    Failed {
        message: String,
        file: Option<SelectedFile>,
    },
}

/// Inputs that move the form between states
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// The file picker changed; `None` clears the selection
    FileChosen(Option<SelectedFile>),
    /// The user submitted the form
    Submitted,
    /// The issuer returned a signed PUT URL
    UrlIssued { key: String, url: String },
    /// The issuer request failed
    UrlRequestFailed(String),
    /// Storage accepted the PUT
    UploadSucceeded,
    /// Storage rejected the PUT or the network failed
    UploadFailed(String),
}

impl UploadState {
    /// Applies `event`, returning the next state
    ///
    /// Events that make no sense in the current state leave it unchanged.
    #[must_use]
    pub fn apply(self, event: UploadEvent) -> Self {
        use UploadEvent as E;

        match (self, event) {
            // Picker and submit are disabled while an attempt is in flight
            (
                busy @ (Self::RequestingUrl { .. } | Self::Uploading { .. }),
                E::FileChosen(_) | E::Submitted,
            ) => busy,
            (_, E::FileChosen(Some(file))) => Self::FileSelected { file },
            (_, E::FileChosen(None)) => Self::Idle,
            (
                Self::FileSelected { file }
                | Self::Failed {
                    file: Some(file), ..
                },
                E::Submitted,
            ) => Self::RequestingUrl { file },
            (_, E::Submitted) => Self::Failed {
                message: NO_FILE_SELECTED.to_string(),
                file: None,
            },
            (Self::RequestingUrl { file }, E::UrlIssued { key, url }) => {
                Self::Uploading { file, key, url }
            }
            (Self::RequestingUrl { file }, E::UrlRequestFailed(detail))
            | (Self::Uploading { file, .. }, E::UploadFailed(detail)) => Self::Failed {
                message: failure_message(&detail),
                file: Some(file),
            },
            (Self::Uploading { key, .. }, E::UploadSucceeded) => Self::Succeeded { key },
            (state, event) => {
                debug!(?state, ?event, "Ignoring event");
                state
            }
        }
    }

    /// Whether an attempt is in flight
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::RequestingUrl { .. } | Self::Uploading { .. })
    }

    /// Whether the submit control is enabled
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        matches!(
            self,
            Self::FileSelected { .. } | Self::Failed { file: Some(_), .. }
        )
    }

    /// File the next submit would upload
    #[must_use]
    pub const fn selected_file(&self) -> Option<&SelectedFile> {
        match self {
            Self::FileSelected { file }
            | Self::RequestingUrl { file }
            | Self::Uploading { file, .. }
            | Self::Failed {
                file: Some(file), ..
            } => Some(file),
            Self::Idle | Self::Succeeded { .. } | Self::Failed { file: None, .. } => None,
        }
    }

    /// Status line shown under the form
    #[must_use]
    pub fn status_message(&self) -> Option<String> {
        match self {
            Self::Idle | Self::FileSelected { .. } => None,
            Self::RequestingUrl { .. } => Some("Getting upload URL...".to_string()),
            Self::Uploading { .. } => Some("Uploading image...".to_string()),
            Self::Succeeded { key } => Some(format!("Upload successful! File name: {key}")),
            Self::Failed { message, .. } => Some(message.clone()),
        }
    }
}

fn failure_message(detail: &str) -> String {
    if detail.trim().is_empty() {
        "Upload failed: Please try again.".to_string()
    } else {
        format!("Upload failed: {detail}")
    }
}
