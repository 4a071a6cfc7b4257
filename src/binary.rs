use byteorder::{ByteOrder, LittleEndian};
use std::borrow::Cow;
use std::{fmt, io};

/// Magic identifying a binary glTF envelope.
const GLTF: [u8; 4] = *b"glTF";

/// Magic of the mandatory JSON chunk.
const JSON: [u8; 4] = *b"JSON";

/// Magic of the optional BIN chunk.
const BIN: [u8; 4] = *b"BIN\0";

/// Represents a GLB envelope error.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The input does not begin with the `glTF` magic.
    Magic([u8; 4]),
    /// Unsupported container version.
    Version(u32),
    /// The declared envelope length exceeds the available bytes.
    Length {
        /// Byte count declared in the envelope header.
        declared: usize,
        /// Bytes actually available.
        available: usize,
    },
    /// A chunk body runs past the end of the envelope.
    ChunkLength {
        /// Magic of the chunk whose body is short.
        kind: [u8; 4],
        /// Byte count declared in the chunk header.
        declared: usize,
        /// Bytes actually available.
        available: usize,
    },
    /// A chunk of this kind was not expected at this position.
    UnexpectedChunk([u8; 4]),
    /// The envelope ended inside a header.
    Truncated,
}

/// Binary glTF contents: the two chunk bodies of a GLB envelope.
///
/// The header carries no information beyond framing (the magic is fixed and
/// only version 2 is accepted), so it is not represented.
#[derive(Clone, Debug)]
pub struct Glb<'a> {
    /// The JSON chunk body.
    pub json: Cow<'a, [u8]>,
    /// The BIN chunk body, when the envelope carries one.
    pub bin: Option<Cow<'a, [u8]>>,
}

/// Little-endian cursor over envelope bytes, the byte-level counterpart of
/// the token cursor in `decode`.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Reads one little-endian `u32`.
    fn word(&mut self) -> Result<u32, Error> {
        if self.remaining() < 4 {
            return Err(Error::Truncated);
        }
        let word = LittleEndian::read_u32(&self.bytes[self.pos..]);
        self.pos += 4;
        Ok(word)
    }

    /// Reads a four-byte magic.
    fn magic(&mut self) -> Result<[u8; 4], Error> {
        if self.remaining() < 4 {
            return Err(Error::Truncated);
        }
        let mut magic = [0; 4];
        magic.copy_from_slice(&self.bytes[self.pos..self.pos + 4]);
        self.pos += 4;
        Ok(magic)
    }

    /// Reads one framed chunk: `{u32 length, u32 magic}` then the body.
    fn chunk(&mut self) -> Result<([u8; 4], &'a [u8]), Error> {
        let declared = self.word()? as usize;
        let kind = self.magic()?;
        if declared > self.remaining() {
            return Err(Error::ChunkLength {
                kind,
                declared,
                available: self.remaining(),
            });
        }
        let body = &self.bytes[self.pos..self.pos + declared];
        self.pos += declared;
        Ok((kind, body))
    }
}

/// Walks the envelope and returns the JSON and optional BIN chunk bodies.
fn split(data: &[u8]) -> Result<(&[u8], Option<&[u8]>), Error> {
    let mut reader = Reader::new(data);

    let magic = reader.magic()?;
    if magic != GLTF {
        return Err(Error::Magic(magic));
    }
    let version = reader.word()?;
    if version != 2 {
        return Err(Error::Version(version));
    }
    let declared = reader.word()? as usize;
    if declared > data.len() {
        return Err(Error::Length {
            declared,
            available: data.len(),
        });
    }

    // Chunk 0 must be JSON.
    let (kind, json) = reader.chunk()?;
    if kind != JSON {
        return Err(Error::UnexpectedChunk(kind));
    }

    // Chunk 1, when present, must be BIN; anything after it is ignored.
    let mut bin = None;
    if reader.remaining() > 0 {
        let (kind, body) = reader.chunk()?;
        if kind != BIN {
            return Err(Error::UnexpectedChunk(kind));
        }
        bin = Some(body);
    }

    Ok((json, bin))
}

/// Rounds `length` up to the next multiple of four; chunk bodies are
/// 4-byte aligned within the envelope.
fn padded(length: usize) -> usize {
    (length + 3) & !3
}

/// Appends one framed chunk, padding the body with `pad` bytes.
fn write_chunk(out: &mut Vec<u8>, kind: [u8; 4], body: &[u8], pad: u8) {
    out.extend_from_slice(&(padded(body.len()) as u32).to_le_bytes());
    out.extend_from_slice(&kind);
    out.extend_from_slice(body);
    out.resize(out.len() + padded(body.len()) - body.len(), pad);
}

impl<'a> Glb<'a> {
    /// Byte length of the GLB header, which is also the minimum length of
    /// any parseable input.
    pub const HEADER_LENGTH: usize = 12;

    /// Splits a loaded GLB envelope into its chunks.
    ///
    /// * Mandatory header (magic `glTF`, version 2, total length).
    /// * Mandatory JSON chunk.
    /// * Optional BIN chunk.
    pub fn from_slice(data: &'a [u8]) -> Result<Self, crate::Error> {
        match split(data) {
            Ok((json, bin)) => Ok(Glb {
                json: json.into(),
                bin: bin.map(Into::into),
            }),
            Err(e) => Err(crate::Error::Binary(e)),
        }
    }

    /// Builds a binary glTF envelope.
    ///
    /// The JSON chunk is padded with spaces, the BIN chunk with zeros, and
    /// the declared envelope length covers both.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut length = Self::HEADER_LENGTH + 8 + padded(self.json.len());
        if let Some(bin) = self.bin.as_ref() {
            length += 8 + padded(bin.len());
        }

        let mut out = Vec::with_capacity(length);
        out.extend_from_slice(&GLTF);
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(length as u32).to_le_bytes());
        write_chunk(&mut out, JSON, &self.json, 0x20);
        if let Some(bin) = self.bin.as_ref() {
            write_chunk(&mut out, BIN, bin, 0);
        }
        out
    }

    /// Writes a binary glTF envelope to a writer.
    pub fn to_writer<W>(&self, mut writer: W) -> io::Result<()>
    where
        W: io::Write,
    {
        writer.write_all(&self.to_vec())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Magic(_) => write!(f, "not binary glTF"),
            Error::Version(version) => write!(f, "unsupported GLB version {}", version),
            Error::Length {
                declared,
                available,
            } => write!(
                f,
                "envelope declares {} bytes but only {} are available",
                declared, available
            ),
            Error::ChunkLength {
                kind,
                declared,
                available,
            } => write!(
                f,
                "{} chunk declares {} bytes but only {} follow",
                String::from_utf8_lossy(&kind),
                declared,
                available
            ),
            Error::UnexpectedChunk(kind) => write!(
                f,
                "unexpected {} chunk",
                String::from_utf8_lossy(&kind)
            ),
            Error::Truncated => write!(f, "envelope ended inside a header"),
        }
    }
}

impl std::error::Error for Error {}
