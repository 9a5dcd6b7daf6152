mod data_envelope;
mod file_page;
mod pin_result;
mod pinned_file;

pub(crate) use data_envelope::DataEnvelope;
pub use file_page::FilePage;
pub use pin_result::PinResult;
pub use pinned_file::{PinnedFile, PinnedFileId};
