use std::io::{self, Read, Write};

/// Boundary used for every upload body.
///
/// It never changes, so encoding the same file twice gives identical bytes.
pub const MULTIPART_BOUNDARY: &str = "NEOCITIES-GO-CLIENT";

/// `Content-Type` header value matching [`MULTIPART_BOUNDARY`].
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")
}

/// Encode the whole of `reader` as a single-part `multipart/form-data` body.
///
/// The part uses `name` as both the form field name and the filename.
/// The input is read fully into memory before anything is encoded.
///
/// Returns the body and the `Content-Type` header value to send with it.
pub fn make_multipart_file<R: Read>(mut reader: R, name: &str) -> io::Result<(Vec<u8>, String)> {
    let mut contents = Vec::new();
    reader.read_to_end(&mut contents)?;

    let name = escape_header_value(name);
    let mut body = Vec::with_capacity(contents.len() + 2 * name.len() + 160);
    write!(body, "--{MULTIPART_BOUNDARY}\r\n")?;
    write!(
        body,
        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{name}\"\r\n"
    )?;
    body.write_all(b"Content-Type: application/octet-stream\r\n\r\n")?;
    body.write_all(&contents)?;
    write!(body, "\r\n--{MULTIPART_BOUNDARY}--\r\n")?;

    Ok((body, multipart_content_type()))
}

fn escape_header_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\r' => escaped.push_str("%0D"),
            '\n' => escaped.push_str("%0A"),
            c => escaped.push(c),
        }
    }
    escaped
}
