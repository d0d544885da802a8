//! Upload state check for `file` fields

use super::ValidationContext;
use crate::errors::Outcome;
use crate::value_source::UploadStatus;
use formguard_conf::readable_size;

/// Classify the upload status reported by the host.
///
/// Size errors report the uploaded size and the effective limit (the smaller
/// of the host and form limits) in human units. A value that is not an upload
/// descriptor at all is rejected.
pub fn validate(ctx: &ValidationContext<'_>) -> Outcome {
	let Some(file) = ctx.value.as_upload() else {
		return Outcome::invalid("Unexpected value");
	};
	match file.status {
		UploadStatus::Ok => Outcome::Valid,
		UploadStatus::ServerSizeExceeded | UploadStatus::FormSizeExceeded => {
			let limit = readable_size(ctx.limits.effective());
			match file.size {
				Some(size) => Outcome::invalid(format!(
					"File size of {} exceeds max size of {limit}",
					readable_size(size)
				)),
				None => Outcome::invalid(format!("File exceeds max size of {limit}")),
			}
		}
		UploadStatus::Partial => Outcome::invalid("The file was only partially uploaded"),
		UploadStatus::NoFile => Outcome::invalid("No file was uploaded"),
		UploadStatus::NoTempStorage => Outcome::invalid("No tmp dir to write to"),
		UploadStatus::WriteFailure => Outcome::invalid("Error writing to disk"),
	}
}
