//! Plain text from `.docx` transcripts.
//!
//! The OCR stage saves a Word copy of every transcript next to the text
//! file. Only paragraph text is read: each non-blank `w:p` becomes one line.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::DocxError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Read the paragraphs of a `.docx` file, joined with `\n`.
pub fn read_docx_text(path: &Path) -> Result<String, DocxError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;

    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;

    paragraphs_from_xml(&xml)
}

/// Collect non-blank paragraph texts from a WordprocessingML document part.
pub fn paragraphs_from_xml(xml: &str) -> Result<String, DocxError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_run = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => current.clear(),
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    if !current.trim().is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                b"r" => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) if in_run => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => current.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Minimal document part with one paragraph per entry.
    pub(crate) fn document_xml(paragraphs: &[&str]) -> String {
        let body: String = paragraphs
            .iter()
            .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, p))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    pub(crate) fn write_docx(path: &Path, xml: &str) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        zip.start_file(DOCUMENT_PART, SimpleFileOptions::default()).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_paragraphs_skip_blank_ones() {
        let xml = document_xml(&["Договор № 5", "   ", "", "Итого: 10 &amp; 20 KZT"]);
        assert_eq!(
            paragraphs_from_xml(&xml).unwrap(),
            "Договор № 5\nИтого: 10 & 20 KZT"
        );
    }

    #[test]
    fn test_runs_tabs_and_breaks() {
        let xml = r#"<w:document xmlns:w="x"><w:body>
            <w:p><w:pPr><w:tabs><w:tab w:val="left"/></w:tabs></w:pPr>
                <w:r><w:t>ООО</w:t></w:r><w:r><w:tab/><w:t>Ромашка</w:t><w:br/><w:t>г. Москва</w:t></w:r>
            </w:p>
        </w:body></w:document>"#;
        assert_eq!(paragraphs_from_xml(xml).unwrap(), "ООО\tРомашка\nг. Москва");
    }

    #[test]
    fn test_read_docx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.docx");
        write_docx(&path, &document_xml(&["Сумма: 100 USD", "ТОО «Арман»"]));

        assert_eq!(read_docx_text(&path).unwrap(), "Сумма: 100 USD\nТОО «Арман»");
    }

    #[test]
    fn test_not_a_docx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.docx");
        std::fs::write(&path, "plain text").unwrap();

        assert!(matches!(read_docx_text(&path), Err(DocxError::Zip(_))));
    }
}
