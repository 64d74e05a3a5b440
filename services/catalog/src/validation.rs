//! Input validation for product forms
//!
//! Raw multipart fields arrive as a [`ProductForm`]; the functions here turn
//! them into typed [`NewProduct`] / [`ProductChanges`] values or collect every
//! offending field into [`ValidationErrors`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use common::blob::BlobObject;

use crate::models::{NewProduct, ProductChanges};

/// Largest image accepted on update, in kilobytes
pub const UPDATE_IMAGE_MAX_KB: usize = 2048;

/// Reported when `owner_id` is malformed or names no known user
pub const UNKNOWN_OWNER: &str = "The selected owner id is invalid.";

/// Largest price magnitude a `NUMERIC(15, 2)` column holds, exclusive
const PRICE_LIMIT: i64 = 10_000_000_000_000;

/// Decimal places a stored price keeps
const PRICE_SCALE: u32 = 2;

/// Leading bytes of the accepted raster formats, with the type and extension
/// stored blobs get
const IMAGE_SIGNATURES: &[(&[u8], &str, &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png", "png"),
    (b"\xff\xd8\xff", "image/jpeg", "jpg"),
    (b"GIF87a", "image/gif", "gif"),
    (b"GIF89a", "image/gif", "gif"),
    (b"BM", "image/bmp", "bmp"),
];

/// How far into a text upload the `<svg` root element is looked for
const SVG_SNIFF_LEN: usize = 1024;

/// Uploaded file as received from the client
///
/// Only the content decides whether it is an image; the client's declared
/// type and file name are not trusted.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
}

/// Raw product form
///
/// `None` means the field was not submitted at all.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub description: Option<String>,
    pub wa: Option<String>,
    pub ig: Option<String>,
    pub owner_id: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Field-level validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Validate a create form
pub fn validate_create(form: &ProductForm) -> Result<NewProduct, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = required_text(&mut errors, "name", form.name.as_deref());
    let price = required_decimal(&mut errors, "price", form.price.as_deref());
    let stock = required_integer(&mut errors, "stock", form.stock.as_deref());
    let image = optional_image(&mut errors, form.image.as_ref(), None);

    let owner_id = owner_id(form);
    if owner_id.is_none() && filled(form.owner_id.as_deref()).is_some() {
        errors.add("owner_id", UNKNOWN_OWNER);
    }

    errors.into_result(|| NewProduct {
        name: name.unwrap_or_default(),
        price: price.unwrap_or_default(),
        stock: stock.unwrap_or_default(),
        description: optional_text(form.description.as_deref()).flatten(),
        wa: optional_text(form.wa.as_deref()).flatten(),
        ig: optional_text(form.ig.as_deref()).flatten(),
        image,
        owner_id,
    })
}

/// The chosen owner, when `owner_id` is filled with a well-formed id
pub fn owner_id(form: &ProductForm) -> Option<Uuid> {
    filled(form.owner_id.as_deref()).and_then(|raw| Uuid::parse_str(raw).ok())
}

/// Validate an update form
pub fn validate_update(form: &ProductForm) -> Result<ProductChanges, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = required_text(&mut errors, "name", form.name.as_deref());
    let price = required_decimal(&mut errors, "price", form.price.as_deref());
    let stock = required_integer(&mut errors, "stock", form.stock.as_deref());
    let image = optional_image(&mut errors, form.image.as_ref(), Some(UPDATE_IMAGE_MAX_KB));

    errors.into_result(|| ProductChanges {
        name: name.unwrap_or_default(),
        price: price.unwrap_or_default(),
        stock: stock.unwrap_or_default(),
        description: optional_text(form.description.as_deref()),
        wa: optional_text(form.wa.as_deref()),
        ig: optional_text(form.ig.as_deref()),
        image,
    })
}

/// Trimmed value, or `None` when absent or blank
fn filled(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Submitted optional text: `None` absent, `Some(None)` blank
fn optional_text(value: Option<&str>) -> Option<Option<String>> {
    value.map(|v| filled(Some(v)).map(str::to_string))
}

fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
) -> Option<String> {
    match filled(value) {
        Some(v) => Some(v.to_string()),
        None => {
            errors.add(field, format!("The {field} field is required."));
            None
        }
    }
}

fn required_decimal(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
) -> Option<Decimal> {
    let raw = match filled(value) {
        Some(raw) => raw,
        None => {
            errors.add(field, format!("The {field} field is required."));
            return None;
        }
    };

    let number = match Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        Ok(number) => number.normalize(),
        Err(_) => {
            errors.add(field, format!("The {field} field must be a number."));
            return None;
        }
    };

    if number.scale() > PRICE_SCALE {
        errors.add(
            field,
            format!("The {field} field must not have more than {PRICE_SCALE} decimal places."),
        );
        return None;
    }

    if number.abs() >= Decimal::from(PRICE_LIMIT) {
        errors.add(field, format!("The {field} field must be less than {PRICE_LIMIT}."));
        return None;
    }

    Some(number)
}

fn required_integer(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
) -> Option<i32> {
    let raw = match filled(value) {
        Some(raw) => raw,
        None => {
            errors.add(field, format!("The {field} field is required."));
            return None;
        }
    };

    match raw.parse::<i32>() {
        Ok(number) => Some(number),
        Err(_) => {
            errors.add(field, format!("The {field} field must be an integer."));
            None
        }
    }
}

/// An empty upload (no file chosen) counts as no image.
fn optional_image(
    errors: &mut ValidationErrors,
    upload: Option<&ImageUpload>,
    max_kb: Option<usize>,
) -> Option<BlobObject> {
    let upload = upload.filter(|u| !u.bytes.is_empty())?;

    let Some((mime, extension)) = sniff_image(&upload.bytes) else {
        errors.add("image", "The image field must be an image.");
        return None;
    };

    if let Some(max_kb) = max_kb {
        if upload.bytes.len() > max_kb * 1024 {
            errors.add(
                "image",
                format!("The image field must not be greater than {max_kb} kilobytes."),
            );
            return None;
        }
    }

    Some(BlobObject {
        bytes: upload.bytes.clone(),
        content_type: mime.to_string(),
        extension: Some(extension.to_string()),
    })
}

/// Image type and extension detected from the file content
fn sniff_image(bytes: &[u8]) -> Option<(&'static str, &'static str)> {
    if let Some((_, mime, ext)) = IMAGE_SIGNATURES
        .iter()
        .find(|(magic, _, _)| bytes.starts_with(magic))
    {
        return Some((*mime, *ext));
    }

    // RIFF container whose form type is WEBP
    if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        return Some(("image/webp", "webp"));
    }

    is_svg(bytes).then_some(("image/svg+xml", "svg"))
}

fn is_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(SVG_SNIFF_LEN)];
    let head = head.strip_prefix(b"\xef\xbb\xbf").unwrap_or(head);
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };

    let text = text.trim_start().to_ascii_lowercase();
    text.starts_with('<') && text.contains("<svg")
}
