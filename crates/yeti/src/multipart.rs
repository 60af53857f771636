//! Single-file `multipart/form-data` encoding.

use uuid::Uuid;

/// An encoded multipart body and the `Content-Type` header that describes it.
#[derive(Clone, Debug)]
pub struct MultipartBody {
    /// The encoded body bytes.
    pub body: Vec<u8>,
    /// `multipart/form-data; boundary=<32 lowercase hex characters>`.
    pub content_type: String,
}

/// Encode one file as a single-part `multipart/form-data` body.
///
/// Every call draws a fresh random boundary.
///
/// # Example
///
/// ```
/// let encoded = yeti::multipart::encode_single_file(
///     "archive", "archive.zip", b"PK\x03\x04", "application/zip");
/// assert!(encoded.content_type.starts_with("multipart/form-data; boundary="));
/// ```
pub fn encode_single_file(
    field_name: &str,
    filename: &str,
    data: &[u8],
    content_type: &str,
) -> MultipartBody {
    let boundary = Uuid::new_v4().simple().to_string();

    let head = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
         Content-Type: {content_type}\r\n\
         \r\n",
        escape_quoted(field_name),
        escape_quoted(filename),
    );
    let tail = format!("\r\n--{boundary}--\r\n");

    let mut body = Vec::with_capacity(head.len() + data.len() + tail.len());
    body.extend_from_slice(head.as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(tail.as_bytes());

    MultipartBody {
        body,
        content_type: format!("multipart/form-data; boundary={boundary}"),
    }
}

/// Percent-escape the characters that would end a quoted parameter or header.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
