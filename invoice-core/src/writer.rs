//! Low-level PDF serialization: the object model, an offset-tracking
//! binary writer, and text encoding for the built-in fonts.

use std::io::{self, Write};

/// Indirect object identifier: number plus generation. Freshly
/// written documents only ever use generation 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjId(pub u32, pub u16);

/// The PDF object kinds this sink emits (PDF 32000-1:2008 §7.3).
#[derive(Debug, Clone)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Name object, stored without the leading `/`.
    Name(String),
    /// Literal string, stored without the enclosing parens.
    LiteralString(String),
    Array(Vec<PdfObject>),
    /// Key-value pairs. A Vec keeps output order deterministic.
    Dictionary(Vec<(String, PdfObject)>),
    Stream {
        dict: Vec<(String, PdfObject)>,
        data: Vec<u8>,
    },
    Reference(ObjId),
}

impl PdfObject {
    pub fn name(s: &str) -> Self {
        PdfObject::Name(s.to_string())
    }

    pub fn literal_string(s: &str) -> Self {
        PdfObject::LiteralString(s.to_string())
    }

    pub fn reference(id: ObjId) -> Self {
        PdfObject::Reference(id)
    }

    pub fn array(items: Vec<PdfObject>) -> Self {
        PdfObject::Array(items)
    }

    pub fn dict(entries: Vec<(&str, PdfObject)>) -> Self {
        PdfObject::Dictionary(owned_entries(entries))
    }

    pub fn stream(dict_entries: Vec<(&str, PdfObject)>, data: Vec<u8>) -> Self {
        PdfObject::Stream {
            dict: owned_entries(dict_entries),
            data,
        }
    }

    /// Render this object into `out` in its on-disk form. Recursive
    /// over arrays and dictionaries; streams append their raw data.
    fn serialize_into(&self, out: &mut Vec<u8>) {
        match self {
            PdfObject::Integer(n) => out.extend_from_slice(n.to_string().as_bytes()),
            PdfObject::Real(v) => out.extend_from_slice(format_real(*v).as_bytes()),
            PdfObject::Name(name) => {
                out.push(b'/');
                out.extend_from_slice(name.as_bytes());
            }
            PdfObject::LiteralString(s) => {
                out.push(b'(');
                push_escaped(s, out);
                out.push(b')');
            }
            PdfObject::Array(items) => {
                out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(b' ');
                    }
                    item.serialize_into(out);
                }
                out.push(b']');
            }
            PdfObject::Dictionary(entries) => {
                out.extend_from_slice(b"<<");
                serialize_dict(entries, out);
                out.extend_from_slice(b" >>");
            }
            PdfObject::Stream { dict, data } => {
                out.extend_from_slice(b"<<");
                serialize_dict(dict, out);
                let open = format!(" /Length {} >>\nstream\n", data.len());
                out.extend_from_slice(open.as_bytes());
                out.extend_from_slice(data);
                out.extend_from_slice(b"\nendstream");
            }
            PdfObject::Reference(id) => {
                let r = format!("{} {} R", id.0, id.1);
                out.extend_from_slice(r.as_bytes());
            }
        }
    }
}

fn owned_entries(entries: Vec<(&str, PdfObject)>) -> Vec<(String, PdfObject)> {
    entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn serialize_dict(entries: &[(String, PdfObject)], out: &mut Vec<u8>) {
    for (key, value) in entries {
        let prefix = format!(" /{} ", key);
        out.extend_from_slice(prefix.as_bytes());
        value.serialize_into(out);
    }
}

/// Escape the literal-string delimiters. Everything else passes
/// through as its UTF-8 bytes.
fn push_escaped(s: &str, out: &mut Vec<u8>) {
    let mut utf8 = [0u8; 4];
    for ch in s.chars() {
        if matches!(ch, '(' | ')' | '\\') {
            out.push(b'\\');
        }
        out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }
}

/// Streams a document to any `Write` target, tracking how many bytes
/// went out so the cross-reference table can be emitted at the end.
pub struct PdfWriter<W: Write> {
    sink: W,
    written: usize,
    offsets: Vec<(u32, usize)>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(sink: W) -> Self {
        PdfWriter {
            sink,
            written: 0,
            offsets: Vec::new(),
        }
    }

    fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.sink.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    /// Write the PDF 1.7 header line plus the binary-detection
    /// comment (four bytes above 127).
    pub fn write_header(&mut self) -> io::Result<()> {
        self.emit(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n")
    }

    /// Write one indirect object, recording its offset for the xref
    /// table.
    pub fn write_object(&mut self, id: ObjId, obj: &PdfObject) -> io::Result<()> {
        self.offsets.push((id.0, self.written));
        let mut body = format!("{} {} obj\n", id.0, id.1).into_bytes();
        obj.serialize_into(&mut body);
        body.extend_from_slice(b"\nendobj\n");
        self.emit(&body)
    }

    /// Bytes written so far.
    pub fn current_offset(&self) -> usize {
        self.written
    }

    /// Emit the xref table, the trailer dictionary, and the closing
    /// startxref / %%EOF lines.
    pub fn write_xref_and_trailer(
        &mut self,
        root_id: ObjId,
        info_id: Option<ObjId>,
    ) -> io::Result<()> {
        let table_at = self.written;

        let mut seen = std::mem::take(&mut self.offsets);
        seen.sort_by_key(|&(num, _)| num);
        let size = seen.last().map_or(1, |&(num, _)| num + 1);

        // Object 0 heads the free list. Every entry is exactly 20 bytes.
        let mut table = format!("xref\n0 {}\n", size).into_bytes();
        table.extend_from_slice(b"0000000000 65535 f\r\n");
        let mut next = seen.iter().peekable();
        for obj_num in 1..size {
            // A number written more than once resolves to its latest copy.
            let mut live = None;
            while let Some(&&(num, at)) = next.peek() {
                if num != obj_num {
                    break;
                }
                live = Some(at);
                next.next();
            }
            match live {
                Some(at) => table.extend_from_slice(format!("{:010} 00000 n\r\n", at).as_bytes()),
                // A numbering gap gets a free entry.
                None => table.extend_from_slice(b"0000000000 00000 f\r\n"),
            }
        }
        self.emit(&table)?;

        let mut trailer = format!(
            "trailer\n<< /Size {} /Root {} {} R",
            size, root_id.0, root_id.1
        );
        if let Some(info) = info_id {
            trailer.push_str(&format!(" /Info {} {} R", info.0, info.1));
        }
        trailer.push_str(&format!(" >>\nstartxref\n{}\n%%EOF\n", table_at));
        self.emit(trailer.as_bytes())
    }

    /// Consume the writer and hand back the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Encode text for a content-stream literal string: WinAnsi bytes with
/// the string delimiters escaped. The built-in fonts read WinAnsi, so
/// multi-byte UTF-8 must not leak through here.
pub(crate) fn encode_text_string(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let byte = win_ansi_byte(ch);
        if matches!(byte, b'\\' | b'(' | b')') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out
}

/// Map a char to its WinAnsi code. ASCII and the Latin-1 block pass
/// through; the typographic punctuation WinAnsi relocates into
/// 0x80..0x9F is mapped explicitly; everything else degrades to '?'.
fn win_ansi_byte(ch: char) -> u8 {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => code as u8,
        _ => match ch {
            '\u{20AC}' => 0x80, // euro
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en dash
            '\u{2014}' => 0x97, // em dash
            _ => b'?',
        },
    }
}

/// Format a float for PDF object output: no trailing zeros, no
/// scientific notation.
fn format_real(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.1}", value);
    }
    let mut s = format!("{:.6}", value);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_one(id: ObjId, obj: &PdfObject) -> String {
        let mut w = PdfWriter::new(Vec::new());
        w.write_object(id, obj).unwrap();
        String::from_utf8_lossy(&w.into_inner()).into_owned()
    }

    #[test]
    fn header_marks_binary_content() {
        let mut w = PdfWriter::new(Vec::new());
        w.write_header().unwrap();
        let buf = w.into_inner();
        assert!(buf.starts_with(b"%PDF-1.7\n%"));
        assert!(buf[10..14].iter().all(|&b| b > 127));
    }

    #[test]
    fn dictionary_renders_inline() {
        let out = write_one(
            ObjId(5, 0),
            &PdfObject::dict(vec![
                ("Type", PdfObject::name("Page")),
                ("Parent", PdfObject::reference(ObjId(2, 0))),
                ("Rotate", PdfObject::Integer(0)),
            ]),
        );
        assert_eq!(out, "5 0 obj\n<< /Type /Page /Parent 2 0 R /Rotate 0 >>\nendobj\n");
    }

    #[test]
    fn kids_array_lists_references() {
        let kids = PdfObject::array(vec![
            PdfObject::reference(ObjId(8, 0)),
            PdfObject::reference(ObjId(10, 0)),
            PdfObject::reference(ObjId(12, 0)),
        ]);
        let out = write_one(ObjId(2, 0), &kids);
        assert!(out.contains("[8 0 R 10 0 R 12 0 R]"));
    }

    #[test]
    fn array_mixes_integers_and_reals() {
        let media_box = PdfObject::array(vec![
            PdfObject::Integer(0),
            PdfObject::Integer(0),
            PdfObject::Real(595.275591),
            PdfObject::Real(841.889764),
        ]);
        let out = write_one(ObjId(7, 0), &media_box);
        assert!(out.contains("[0 0 595.275591 841.889764]"));
    }

    #[test]
    fn stream_length_matches_data() {
        let ops = b"0.1 w\n42.5198 671.811 m\n552.7559 671.811 l\nS\n".to_vec();
        let n = ops.len();
        let out = write_one(ObjId(9, 0), &PdfObject::stream(vec![], ops));
        assert!(out.contains(&format!("/Length {} >>\nstream\n", n)));
        assert!(out.ends_with("\nendstream\nendobj\n"));
    }

    #[test]
    fn parens_and_backslashes_escaped_in_strings() {
        let out = write_one(
            ObjId(1, 0),
            &PdfObject::literal_string(r"Smit & Zn. (Rotterdam) \ att. J. de Vries"),
        );
        assert!(out.contains(r"(Smit & Zn. \(Rotterdam\) \\ att. J. de Vries)"));
    }

    #[test]
    fn xref_entries_are_fixed_width() {
        let mut w = PdfWriter::new(Vec::new());
        w.write_header().unwrap();
        w.write_object(ObjId(1, 0), &PdfObject::Integer(42)).unwrap();
        let table_at = w.current_offset();
        w.write_xref_and_trailer(ObjId(1, 0), None).unwrap();
        let buf = w.into_inner();

        // The header is 15 bytes, so object 1 lands at offset 15.
        let entries = table_at + "xref\n0 2\n".len();
        assert_eq!(&buf[entries..entries + 20], b"0000000000 65535 f\r\n".as_slice());
        assert_eq!(&buf[entries + 20..entries + 40], b"0000000015 00000 n\r\n".as_slice());
    }

    #[test]
    fn unwritten_object_numbers_become_free_entries() {
        let mut w = PdfWriter::new(Vec::new());
        w.write_header().unwrap();
        w.write_object(ObjId(1, 0), &PdfObject::name("Catalog")).unwrap();
        w.write_object(ObjId(4, 0), &PdfObject::Integer(7)).unwrap();
        w.write_xref_and_trailer(ObjId(1, 0), None).unwrap();

        let text = String::from_utf8_lossy(&w.into_inner()).into_owned();
        assert!(text.contains("xref\n0 5\n"));
        assert_eq!(text.matches("0000000000 00000 f\r\n").count(), 2);
    }

    #[test]
    fn rewritten_object_resolves_to_its_latest_offset() {
        let mut w = PdfWriter::new(Vec::new());
        w.write_object(ObjId(1, 0), &PdfObject::Integer(1)).unwrap();
        w.write_object(ObjId(1, 0), &PdfObject::Integer(2)).unwrap();
        w.write_object(ObjId(2, 0), &PdfObject::Integer(3)).unwrap();
        w.write_xref_and_trailer(ObjId(1, 0), None).unwrap();

        let text = String::from_utf8_lossy(&w.into_inner()).into_owned();
        // Each "N 0 obj\n<digit>\nendobj\n" body is 17 bytes, so the three
        // writes land at 0, 17 and 34. Object 1 must point at its second
        // copy and object 2 must stay in use.
        assert!(text.contains("xref\n0 3\n"));
        assert!(text.contains("0000000017 00000 n\r\n"));
        assert!(text.contains("0000000034 00000 n\r\n"));
        assert!(!text.contains("0000000000 00000 n\r\n"));
        assert!(!text.contains("0000000000 00000 f\r\n"));
    }

    #[test]
    fn trailer_references_root_and_info() {
        let mut w = PdfWriter::new(Vec::new());
        w.write_header().unwrap();
        let catalog = PdfObject::dict(vec![("Type", PdfObject::name("Catalog"))]);
        w.write_object(ObjId(1, 0), &catalog).unwrap();
        let info = PdfObject::dict(vec![("Producer", PdfObject::literal_string("invoice-core"))]);
        w.write_object(ObjId(2, 0), &info).unwrap();
        let table_at = w.current_offset();
        w.write_xref_and_trailer(ObjId(1, 0), Some(ObjId(2, 0))).unwrap();

        let text = String::from_utf8_lossy(&w.into_inner()).into_owned();
        assert!(text.contains("trailer\n<< /Size 3 /Root 1 0 R /Info 2 0 R >>"));
        assert!(text.ends_with(&format!("startxref\n{}\n%%EOF\n", table_at)));
    }

    #[test]
    fn reals_trim_trailing_zeros() {
        assert_eq!(format_real(841.89), "841.89");
        assert_eq!(format_real(595.275591), "595.275591");
        assert_eq!(format_real(72.0), "72.0");
        assert_eq!(format_real(-3.5), "-3.5");
    }

    #[test]
    fn win_ansi_ascii_passthrough() {
        assert_eq!(encode_text_string("INVOICE"), b"INVOICE".to_vec());
        assert_eq!(encode_text_string("Qty"), b"Qty".to_vec());
    }

    #[test]
    fn win_ansi_em_dash() {
        assert_eq!(encode_text_string("\u{2014}"), vec![0x97]);
    }

    #[test]
    fn win_ansi_unmappable_degrades() {
        assert_eq!(encode_text_string("\u{4E2D}"), vec![b'?']);
    }

    #[test]
    fn text_string_delimiters_escaped() {
        assert_eq!(encode_text_string("a(b)"), b"a\\(b\\)".to_vec());
    }
}
