use super::domain::Contact;

pub const VCARD_CONTENT_TYPE: &str = "text/vcard";
pub const VCARD_FILE_NAME: &str = "contact.vcf";

/// A rendered vCard ready to be served as a download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VCardFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub file_name: &'static str,
}

/// Render the fixed vCard 3.0 subset used for exports.
///
/// Values are inserted verbatim: `,`, `;` and `\` are not escaped. Missing
/// optional fields render as empty values. Every line, including the last,
/// ends with CRLF.
pub fn render(contact: &Contact) -> String {
    let lines = [
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", contact.name),
        format!("TITLE:{}", contact.title.as_deref().unwrap_or_default()),
        format!("TEL:{}", contact.phone),
        format!("EMAIL:{}", contact.email),
        format!("URL:{}", contact.linkedin.as_deref().unwrap_or_default()),
        "END:VCARD".to_string(),
    ];
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + 2).sum());
    for line in &lines {
        out.push_str(line);
        out.push_str("\r\n");
    }
    out
}

pub fn export(contact: &Contact) -> VCardFile {
    VCardFile {
        bytes: render(contact).into_bytes(),
        content_type: VCARD_CONTENT_TYPE,
        file_name: VCARD_FILE_NAME,
    }
}
