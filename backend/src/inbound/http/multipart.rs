//! `multipart/form-data` decoding for coffee creation.
//!
//! Recognised fields: `name`, `description`, `price`, `image`. An `image`
//! part with a file name is treated as an upload; without one it is read as
//! a URL. Other fields are ignored.

use std::convert::Infallible;

use bytes::Bytes;
use futures_util::stream;

use crate::domain::ports::{ImageInput, NewCoffeeSubmission, PriceInput};

/// True when the content type announces a multipart form.
pub fn is_multipart(content_type: &str) -> bool {
    content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("multipart/form-data")
}

/// Decode a buffered multipart body into a create submission.
///
/// # Errors
/// Returns the [`multer::Error`] raised for a missing boundary or a
/// malformed body.
pub async fn read_coffee_form(
    content_type: &str,
    body: Bytes,
) -> Result<NewCoffeeSubmission, multer::Error> {
    let boundary = multer::parse_boundary(content_type)?;
    let body_stream = stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let mut multipart = multer::Multipart::new(body_stream, boundary);
    let mut submission = NewCoffeeSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => submission.name = Some(field.text().await?),
            Some("description") => submission.description = Some(field.text().await?),
            Some("price") => submission.price = Some(PriceInput::Text(field.text().await?)),
            Some("image") => {
                if field.file_name().is_some() {
                    let file_name = field.file_name().map(str::to_owned);
                    let content_type = field.content_type().map(ToString::to_string);
                    let bytes = field.bytes().await?;
                    submission.image = Some(ImageInput::Upload {
                        file_name,
                        content_type,
                        bytes,
                    });
                } else {
                    submission.image = Some(ImageInput::Url(field.text().await?));
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}
