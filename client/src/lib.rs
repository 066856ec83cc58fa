//! Client for the image backend: requests signed URLs and moves bytes
//! directly to and from the bucket.

pub mod error;
pub mod form;
pub mod session;
pub mod transport;
pub mod viewer;

pub use error::{ClientError, ClientResult};
pub use form::UploadForm;
pub use session::{SelectedFile, UploadEvent, UploadState, NO_FILE_SELECTED};
pub use transport::UploadClient;
pub use viewer::ImageView;
