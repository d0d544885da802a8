use super::ValidationContext;
use crate::errors::Outcome;
use crate::value_source::UploadStatus;

/// `accept`: the uploaded file must match one entry of the comma-separated
/// list.
///
/// An entry is an exact MIME type (`image/png`), a type wildcard (`image/*`)
/// or an extension (`.pdf`). Matching ignores case. Failed uploads are left to
/// the upload state check.
pub fn validate(ctx: &ValidationContext<'_>, accept: &str) -> Outcome {
	let Some(file) = ctx.value.as_upload() else {
		return Outcome::Valid;
	};
	if file.status != UploadStatus::Ok {
		return Outcome::Valid;
	}

	let entries: Vec<String> = accept
		.split(',')
		.map(|entry| entry.trim().to_lowercase())
		.filter(|entry| !entry.is_empty())
		.collect();
	if entries.is_empty() {
		return Outcome::inapplicable("Empty accept attribute");
	}

	let mime = file.detected_type.as_deref().map(str::to_lowercase);
	let extension = file.extension();
	let accepted = entries
		.iter()
		.any(|entry| matches_entry(entry, mime.as_deref(), extension.as_deref()));
	if accepted {
		return Outcome::Valid;
	}

	let shown = match (&mime, &extension) {
		(Some(mime), _) => mime.clone(),
		(None, Some(extension)) => format!(".{extension}"),
		(None, None) => "unknown".to_string(),
	};
	Outcome::invalid(format!(
		"The file type `{shown}` is not supported. Only these types are supported: {}",
		accept.trim()
	))
}

fn matches_entry(entry: &str, mime: Option<&str>, extension: Option<&str>) -> bool {
	if let Some(wanted) = entry.strip_prefix('.') {
		return extension == Some(wanted);
	}
	let Some(mime) = mime else {
		return false;
	};
	match entry.strip_suffix("/*") {
		Some(major) => mime.split('/').next() == Some(major),
		None => mime == entry,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::validators::test_support::{check, input};
	use crate::value_source::UploadedFile;
	use rstest::rstest;

	#[rstest]
	#[case("image/png", "photo.png", "image/png", true)]
	#[case("image/*", "photo.JPG", "image/jpeg", true)]
	#[case(".pdf, .docx", "report.PDF", "application/pdf", true)]
	#[case("IMAGE/PNG", "photo.png", "image/png", true)]
	#[case("image/*", "report.pdf", "application/pdf", false)]
	#[case(".pdf", "report.txt", "text/plain", false)]
	fn test_accept(
		#[case] accept: &str,
		#[case] name: &str,
		#[case] mime: &str,
		#[case] valid: bool,
	) {
		// Arrange
		let field = input("file");
		let file = UploadedFile::ok(name, 10).with_detected_type(mime);

		// Act
		let outcome = check(&field, file, |ctx| validate(ctx, accept));

		// Assert
		assert_eq!(outcome.is_valid(), valid, "{outcome:?}");
	}

	#[rstest]
	fn test_rejection_lists_accepted_types() {
		// Arrange
		let field = input("file");
		let file = UploadedFile::ok("notes.txt", 10).with_detected_type("text/plain");

		// Act
		let outcome = check(&field, file, |ctx| validate(ctx, "image/*,.pdf"));

		// Assert
		assert_eq!(
			outcome,
			Outcome::invalid(
				"The file type `text/plain` is not supported. Only these types are supported: image/*,.pdf"
			)
		);
	}

	#[rstest]
	fn test_failed_upload_is_left_to_upload_check() {
		// Arrange
		let field = input("file");
		let file = UploadedFile::failed(UploadStatus::NoFile);

		// Act
		let outcome = check(&field, file, |ctx| validate(ctx, ".pdf"));

		// Assert
		assert_eq!(outcome, Outcome::Valid);
	}
}
