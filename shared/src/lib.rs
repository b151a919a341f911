pub mod analysis;
pub mod protocol;
pub mod upload;

pub use analysis::{AnalysisPayload, RatingTier, RatingValue, StructuredFields};
pub use protocol::{
    AnalysisEnvelope, AnalysisTypeInfo, AuthStatus, ClientMessage, ServerMessage, UserInfo,
};
pub use upload::{ACCEPTED_IMAGE_TYPES, MAX_IMAGE_BYTES, UploadError, validate_image_upload};
