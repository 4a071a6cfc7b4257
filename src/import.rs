use std::fs;
use std::path::{Path, PathBuf};

use crate::buffer::Payload;
use crate::root::Root;
use crate::Error;

impl Root {
    /// Loads the payload of every buffer that does not have one yet.
    ///
    /// Buffer 0 without a URI aliases the GLB BIN chunk. `data:` URIs are
    /// base64-decoded in place. URIs without a scheme are percent-decoded
    /// and read relative to the directory of `document_path` (or the working
    /// directory when no path is given). Any other scheme is rejected.
    ///
    /// Loading is all-or-nothing per buffer: buffers loaded before a failure
    /// stay loaded.
    pub fn load_buffers(&mut self, document_path: Option<&Path>) -> Result<(), Error> {
        let bin_length = self.bin.as_ref().map(Vec::len);
        if let Some(buffer) = self.buffers.first_mut() {
            if let Some(bin_length) = bin_length {
                if !buffer.payload.is_loaded() && buffer.uri.is_none() {
                    if bin_length < buffer.byte_length {
                        return Err(Error::BufferLength {
                            buffer: 0,
                            expected: buffer.byte_length,
                            actual: bin_length,
                        });
                    }
                    buffer.payload = Payload::Bin;
                }
            }
        }

        for index in 0..self.buffers.len() {
            let data = {
                let buffer = &self.buffers[index];
                if buffer.payload.is_loaded() {
                    continue;
                }
                let uri = match buffer.uri.as_deref() {
                    Some(uri) => uri,
                    None => continue,
                };
                load_uri(uri, buffer.byte_length, document_path, index)?
            };
            self.buffers[index].payload = Payload::Owned(data);
        }
        Ok(())
    }
}

fn load_uri(
    uri: &str,
    byte_length: usize,
    document_path: Option<&Path>,
    index: usize,
) -> Result<Vec<u8>, Error> {
    let mut data = if let Some(rest) = uri.strip_prefix("data:") {
        match rest.find(',') {
            // The media type must end in `;base64` for the payload to be
            // decodable.
            Some(comma) if rest[..comma].ends_with(";base64") => {
                let encoded = rest[comma + 1..].trim_end_matches('=');
                base64::decode_config(encoded, base64::STANDARD_NO_PAD)
                    .map_err(Error::Base64)?
            }
            _ => return Err(Error::UnknownFormat),
        }
    } else if !uri.contains("://") {
        let decoded = urlencoding::decode(uri).map_err(|_| Error::UnsupportedScheme)?;
        let path = match document_path {
            Some(document) => document
                .parent()
                .unwrap_or_else(|| Path::new("./"))
                .join(decoded.as_ref()),
            None => PathBuf::from(decoded.as_ref()),
        };
        fs::read(path).map_err(Error::Io)?
    } else {
        return Err(Error::UnsupportedScheme);
    };

    if data.len() < byte_length {
        return Err(Error::BufferLength {
            buffer: index,
            expected: byte_length,
            actual: data.len(),
        });
    }
    data.truncate(byte_length);
    Ok(data)
}
