use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

use crate::core::{AppError, Result};
use crate::modules::reports::models::DocumentMetadata;

const PRODUCER: &str = concat!("invoice-report ", env!("CARGO_PKG_VERSION"));

/// PDF text string: literal when ASCII, UTF-16BE with a byte order mark otherwise
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }
    let mut bytes = vec![0xfe, 0xff];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn info_dictionary(document: &mut Document) -> Result<&mut Dictionary> {
    let existing = document
        .trailer
        .get(b"Info")
        .and_then(Object::as_reference)
        .ok();

    let id: ObjectId = match existing {
        Some(id) => id,
        None => {
            let id = document.add_object(Dictionary::new());
            document.trailer.set("Info", id);
            id
        }
    };

    document
        .get_object_mut(id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| AppError::render(format!("Invalid PDF info dictionary: {}", e)))
}

/// Writes the document information dictionary of a rendered PDF
pub fn apply_metadata(pdf: &[u8], metadata: &DocumentMetadata) -> Result<Vec<u8>> {
    let mut document = Document::load_mem(pdf)
        .map_err(|e| AppError::render(format!("Cannot reopen rendered PDF: {}", e)))?;

    let info = info_dictionary(&mut document)?;
    let keywords = metadata.keywords.join(", ");
    let entries = [
        ("Title", metadata.title.as_deref()),
        ("Subject", metadata.subject.as_deref()),
        ("Author", metadata.author.as_deref()),
        ("Creator", metadata.creator.as_deref()),
        ("Keywords", Some(keywords.as_str()).filter(|k| !k.is_empty())),
        ("Producer", Some(PRODUCER)),
    ];
    for (key, value) in entries {
        if let Some(value) = value {
            info.set(key, text_string(value));
        }
    }

    let mut bytes = Vec::with_capacity(pdf.len());
    document
        .save_to(&mut bytes)
        .map_err(|e| AppError::render(format!("Cannot write PDF: {}", e)))?;
    Ok(bytes)
}
