//! Shared HTTP plumbing: error bodies and validating extractors

mod error;
mod params;
mod validated_json;
mod validators;

pub use error::{ApiError, ApiResult, ErrorBody, MessageResponse};
pub use params::{ApiPath, ApiQuery};
pub use validated_json::{ValidatedForm, ValidatedJson};
pub use validators::password_within_bcrypt_limit;
