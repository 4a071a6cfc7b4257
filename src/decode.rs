use std::fmt;

use crate::accessor::Accessor;
use crate::animation::Animation;
use crate::asset::Asset;
use crate::buffer::{Buffer, View};
use crate::camera::Camera;
use crate::image::Image;
use crate::khr_lights_punctual::Light;
use crate::material::Material;
use crate::mesh::Mesh;
use crate::root::{Index, Root};
use crate::scene::{Node, Scene};
use crate::skin::Skin;
use crate::texture::{Sampler, Texture};
use crate::token::{Kind, Token};
use crate::Extras;

/// Schema mismatch at a JSON token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Error {
    /// Byte offset of the offending token.
    pub offset: usize,
    /// What the decoder expected to find there.
    pub expected: &'static str,
}

impl Error {
    pub(crate) fn new(offset: usize, expected: &'static str) -> Self {
        Error { offset, expected }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {} at byte offset {}", self.expected, self.offset)
    }
}

impl std::error::Error for Error {}

/// Cursor over the token stream.
///
/// Every consuming method advances past exactly the tokens of one JSON
/// value, relying on the child counts established by the tokeniser.
pub(crate) struct Parser<'a> {
    src: &'a [u8],
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a [u8], tokens: &'a [Token]) -> Self {
        Parser {
            src,
            tokens,
            pos: 0,
        }
    }

    /// Byte offset of the current token, for error reporting.
    pub fn offset(&self) -> usize {
        match self.tokens.get(self.pos) {
            Some(token) => token.start,
            None => self.src.len(),
        }
    }

    fn err<T>(&self, expected: &'static str) -> Result<T, Error> {
        Err(Error::new(self.offset(), expected))
    }

    fn token(&self) -> Result<Token, Error> {
        match self.tokens.get(self.pos) {
            Some(token) => Ok(*token),
            None => Err(Error::new(self.src.len(), "value")),
        }
    }

    fn slice(&self, token: &Token) -> &'a [u8] {
        &self.src[token.start..token.end]
    }

    /// Enters an object and returns its member count.
    pub fn begin_object(&mut self) -> Result<usize, Error> {
        let token = self.token()?;
        if token.kind != Kind::Object {
            return self.err("object");
        }
        self.pos += 1;
        Ok(token.size)
    }

    /// Enters an array and returns its element count.
    pub fn begin_array(&mut self) -> Result<usize, Error> {
        let token = self.token()?;
        if token.kind != Kind::Array {
            return self.err("array");
        }
        self.pos += 1;
        Ok(token.size)
    }

    /// Consumes a member key. A key is a string with exactly one child, the
    /// value that follows it.
    pub fn key(&mut self) -> Result<&'a str, Error> {
        let token = self.token()?;
        if token.kind != Kind::String || token.size == 0 {
            return self.err("member key");
        }
        match std::str::from_utf8(self.slice(&token)) {
            Ok(key) => {
                self.pos += 1;
                Ok(key)
            }
            Err(_) => self.err("member key"),
        }
    }

    /// Consumes a member key as an owned string.
    pub fn key_string(&mut self) -> Result<String, Error> {
        self.key().map(str::to_owned)
    }

    /// Consumes a string value, borrowing from the source bytes.
    pub fn str(&mut self) -> Result<&'a str, Error> {
        let token = self.token()?;
        if token.kind != Kind::String {
            return self.err("string");
        }
        match std::str::from_utf8(self.slice(&token)) {
            Ok(value) => {
                self.pos += 1;
                Ok(value)
            }
            Err(_) => self.err("UTF-8 string"),
        }
    }

    /// Consumes a string value as an owned string.
    pub fn string(&mut self) -> Result<String, Error> {
        self.str().map(str::to_owned)
    }

    fn primitive(&mut self) -> Result<&'a str, Error> {
        let token = self.token()?;
        if token.kind != Kind::Primitive {
            return self.err("literal");
        }
        // Primitives are ASCII by construction.
        match std::str::from_utf8(self.slice(&token)) {
            Ok(value) => {
                self.pos += 1;
                Ok(value)
            }
            Err(_) => self.err("literal"),
        }
    }

    /// Consumes a non-negative integer value.
    pub fn unsigned(&mut self) -> Result<usize, Error> {
        let offset = self.offset();
        let literal = self.primitive()?;
        if let Ok(value) = literal.parse::<u64>() {
            return Ok(value as usize);
        }
        match literal.parse::<f64>() {
            Ok(value) if value >= 0.0 => Ok(value as usize),
            _ => Err(Error::new(offset, "non-negative integer")),
        }
    }

    /// Consumes a number value.
    pub fn float(&mut self) -> Result<f32, Error> {
        let offset = self.offset();
        let literal = self.primitive()?;
        literal
            .parse::<f32>()
            .map_err(|_| Error::new(offset, "number"))
    }

    /// Consumes a boolean value.
    pub fn boolean(&mut self) -> Result<bool, Error> {
        let offset = self.offset();
        match self.primitive()? {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(Error::new(offset, "boolean")),
        }
    }

    /// Consumes an array-index value.
    pub fn index<T>(&mut self) -> Result<Index<T>, Error> {
        self.unsigned().map(|value| Index::new(value as u32))
    }

    /// Consumes a float array of exactly `out.len()` elements.
    pub fn float_array(&mut self, out: &mut [f32]) -> Result<(), Error> {
        let offset = self.offset();
        let elements = self.begin_array()?;
        if elements != out.len() {
            return Err(Error::new(offset, "fixed-length number array"));
        }
        for slot in out.iter_mut() {
            *slot = self.float()?;
        }
        Ok(())
    }

    /// Consumes a float array of at most `out.len()` elements, returning the
    /// element count.
    pub fn float_array_bounded(&mut self, out: &mut [f32]) -> Result<usize, Error> {
        let offset = self.offset();
        let elements = self.begin_array()?;
        if elements > out.len() {
            return Err(Error::new(offset, "bounded number array"));
        }
        for slot in out.iter_mut().take(elements) {
            *slot = self.float()?;
        }
        Ok(elements)
    }

    /// Consumes a float array of any length.
    pub fn float_vec(&mut self) -> Result<Vec<f32>, Error> {
        let elements = self.begin_array()?;
        let mut values = Vec::with_capacity(elements);
        for _ in 0..elements {
            values.push(self.float()?);
        }
        Ok(values)
    }

    /// Consumes a string array of any length.
    pub fn string_vec(&mut self) -> Result<Vec<String>, Error> {
        let elements = self.begin_array()?;
        let mut values = Vec::with_capacity(elements);
        for _ in 0..elements {
            values.push(self.string()?);
        }
        Ok(values)
    }

    /// Consumes an array of array-index values.
    pub fn index_vec<T>(&mut self) -> Result<Vec<Index<T>>, Error> {
        let elements = self.begin_array()?;
        let mut values = Vec::with_capacity(elements);
        for _ in 0..elements {
            values.push(self.index()?);
        }
        Ok(values)
    }

    /// Records the byte span of the current value and skips it.
    pub fn extras(&mut self) -> Result<Extras, Error> {
        let token = self.token()?;
        let extras = Extras {
            start: token.start,
            end: token.end,
        };
        self.skip()?;
        Ok(extras)
    }

    /// Skips one value of any kind, by token count.
    pub fn skip(&mut self) -> Result<(), Error> {
        let token = self.token()?;
        self.pos += 1;
        match token.kind {
            Kind::Array => {
                for _ in 0..token.size {
                    self.skip()?;
                }
            }
            Kind::Object => {
                for _ in 0..token.size {
                    self.key()?;
                    self.skip()?;
                }
            }
            Kind::String | Kind::Primitive => {}
        }
        Ok(())
    }
}

fn decode_array<T>(
    p: &mut Parser<'_>,
    decode: fn(&mut Parser<'_>) -> Result<T, Error>,
) -> Result<Vec<T>, Error> {
    let elements = p.begin_array()?;
    let mut values = Vec::with_capacity(elements);
    for _ in 0..elements {
        values.push(decode(p)?);
    }
    Ok(values)
}

/// Decodes the root object, populating every entity array of `root`.
///
/// References stay index-encoded; the fixup pass bounds-checks them once all
/// sibling arrays exist.
pub(crate) fn decode_root(src: &[u8], tokens: &[Token]) -> Result<Root, Error> {
    let mut p = Parser::new(src, tokens);
    let mut root = Root::default();
    let members = p.begin_object()?;
    for _ in 0..members {
        match p.key()? {
            "asset" => root.asset = Asset::decode(&mut p)?,
            "accessors" => root.accessors = decode_array(&mut p, Accessor::decode)?,
            "animations" => root.animations = decode_array(&mut p, Animation::decode)?,
            "buffers" => root.buffers = decode_array(&mut p, Buffer::decode)?,
            "bufferViews" => root.buffer_views = decode_array(&mut p, View::decode)?,
            "cameras" => root.cameras = decode_array(&mut p, Camera::decode)?,
            "images" => root.images = decode_array(&mut p, Image::decode)?,
            "materials" => root.materials = decode_array(&mut p, Material::decode)?,
            "meshes" => root.meshes = decode_array(&mut p, Mesh::decode)?,
            "nodes" => root.nodes = decode_array(&mut p, Node::decode)?,
            "samplers" => root.samplers = decode_array(&mut p, Sampler::decode)?,
            "scenes" => root.scenes = decode_array(&mut p, Scene::decode)?,
            "skins" => root.skins = decode_array(&mut p, Skin::decode)?,
            "textures" => root.textures = decode_array(&mut p, Texture::decode)?,
            "scene" => root.scene = Some(p.index()?),
            "extensionsUsed" => root.extensions_used = p.string_vec()?,
            "extensionsRequired" => root.extensions_required = p.string_vec()?,
            "extensions" => {
                let extensions = p.begin_object()?;
                for _ in 0..extensions {
                    match p.key()? {
                        "KHR_lights_punctual" => {
                            let extension_members = p.begin_object()?;
                            for _ in 0..extension_members {
                                match p.key()? {
                                    "lights" => {
                                        root.lights = decode_array(&mut p, Light::decode)?
                                    }
                                    _ => p.skip()?,
                                }
                            }
                        }
                        _ => p.skip()?,
                    }
                }
            }
            "extras" => root.extras = p.extras()?,
            _ => p.skip()?,
        }
    }
    Ok(root)
}
