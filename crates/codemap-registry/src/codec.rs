//! JSON text format for mapping tables.
//!
//! The top level is an object keyed by mapping area name, each holding an
//! array of `{"direction", "fromcode", "tocode"}` records in lookup order.
//! Output is pretty printed and escapes `<`, `>`, `&`, `'` and `"` as
//! `\u00XX` sequences so it can be embedded in HTML or XML as-is.

use std::io;

use codemap_model::MappingTable;
use serde::Serialize;
use serde_json::ser::{CharEscape, Formatter, PrettyFormatter};

use crate::error::{RegistryError, Result};

/// Serialize a table to markup-safe, pretty printed JSON.
pub fn to_json(table: &MappingTable, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut out = Vec::with_capacity(128);
    let formatter = MarkupSafeFormatter::new(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    table
        .serialize(&mut serializer)
        .map_err(|source| RegistryError::Serialization { source })?;

    // serde_json only writes valid UTF-8.
    String::from_utf8(out).map_err(|e| RegistryError::Serialization {
        source: serde::ser::Error::custom(e),
    })
}

/// Parse a table from JSON text.
///
/// Unknown areas, repeated areas, unknown directions, missing fields and
/// extra fields are all rejected.
pub fn from_json(text: &str) -> Result<MappingTable> {
    serde_json::from_str(text).map_err(|source| RegistryError::Parse { source })
}

/// Pretty formatter that hex-escapes characters unsafe in markup.
struct MarkupSafeFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl<'a> MarkupSafeFormatter<'a> {
    fn new(indent: &'a [u8]) -> Self {
        Self {
            inner: PrettyFormatter::with_indent(indent),
        }
    }
}

fn write_hex_escape<W>(writer: &mut W, byte: u8) -> io::Result<()>
where
    W: ?Sized + io::Write,
{
    write!(writer, "\\u{:04X}", byte)
}

impl Formatter for MarkupSafeFormatter<'_> {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, &byte) in bytes.iter().enumerate() {
            if matches!(byte, b'<' | b'>' | b'&' | b'\'') {
                writer.write_all(&bytes[start..i])?;
                write_hex_escape(writer, byte)?;
                start = i + 1;
            }
        }
        writer.write_all(&bytes[start..])
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match char_escape {
            CharEscape::Quote => write_hex_escape(writer, b'"'),
            other => self.inner.write_char_escape(writer, other),
        }
    }
}
