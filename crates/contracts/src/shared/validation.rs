//! Валидаторы полей формы тикета
//!
//! Сообщения: на испанском, их видит оператор.

use thiserror::Error;

/// Результат проверки одного поля: `Err` несёт сообщение для пользователя
pub type FieldCheck = Result<(), String>;

pub const DOCUMENT_MIN_DIGITS: usize = 5;
pub const DOCUMENT_MAX_LEN: usize = 15;
pub const IMEI_MAX_LEN: usize = 15;
pub const PHONE_MIN_DIGITS: usize = 7;

pub fn validate_required(value: &str, message: &str) -> FieldCheck {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

pub fn validate_document(value: &str) -> FieldCheck {
    let value = value.trim();
    if value.is_empty() {
        return Err("El documento del cliente es obligatorio".into());
    }
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < DOCUMENT_MIN_DIGITS {
        return Err(format!(
            "El documento debe tener al menos {} dígitos",
            DOCUMENT_MIN_DIGITS
        ));
    }
    if value.chars().count() > DOCUMENT_MAX_LEN {
        return Err(format!(
            "El documento no puede tener más de {} caracteres",
            DOCUMENT_MAX_LEN
        ));
    }
    Ok(())
}

pub fn validate_imei(value: &str) -> FieldCheck {
    let value = value.trim();
    if value.is_empty() {
        return Err("El IMEI/Serial es obligatorio".into());
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("El IMEI/Serial solo puede contener números y letras".into());
    }
    if value.chars().count() > IMEI_MAX_LEN {
        return Err(format!(
            "El IMEI/Serial no puede tener más de {} caracteres",
            IMEI_MAX_LEN
        ));
    }
    Ok(())
}

/// Телефон: цифры, пробелы, `-`, `(`, `)` и не меньше 7 цифр
pub fn is_valid_phone(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '(' | ')'))
        && value.chars().filter(|c| c.is_ascii_digit()).count() >= PHONE_MIN_DIGITS
}

pub fn validate_phone(value: &str) -> FieldCheck {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err("Ingrese un número de teléfono válido".into())
    }
}

/// `local@domain.tld` без пробелов и с одним `@`
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let len = domain.len();
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < len)
}

pub fn validate_email(value: &str) -> FieldCheck {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err("Ingrese un correo electrónico válido".into())
    }
}

/// Неформатированная сумма должна быть не меньше `min`
pub fn validate_amount(value: &str, min: i64, message: &str) -> FieldCheck {
    if value.trim().is_empty() || super::number_format::unformat(value) < min {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

/// Поля формы редактирования с живой валидацией
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketField {
    ClientNames,
    ClientLastnames,
    Document,
    Phone,
    Mail,
    Imei,
    ServiceValue,
}

impl TicketField {
    pub const ALL: [TicketField; 7] = [
        TicketField::ClientNames,
        TicketField::ClientLastnames,
        TicketField::Document,
        TicketField::Phone,
        TicketField::Mail,
        TicketField::Imei,
        TicketField::ServiceValue,
    ];

    /// Имя поля в форме (и id элемента)
    pub fn name(&self) -> &'static str {
        match self {
            TicketField::ClientNames => "client_names",
            TicketField::ClientLastnames => "client_lastnames",
            TicketField::Document => "document",
            TicketField::Phone => "phone",
            TicketField::Mail => "mail",
            TicketField::Imei => "IMEI",
            TicketField::ServiceValue => "service_value",
        }
    }

    pub fn check(&self, raw: &str) -> FieldCheck {
        match self {
            TicketField::ClientNames => {
                validate_required(raw, "El nombre del cliente es obligatorio")
            }
            TicketField::ClientLastnames => Ok(()),
            TicketField::Document => validate_document(raw),
            // необязательный телефон: пустое значение не проверяется
            TicketField::Phone if raw.trim().is_empty() => Ok(()),
            TicketField::Phone => validate_phone(raw),
            TicketField::Mail => validate_email(raw),
            TicketField::Imei => validate_imei(raw),
            TicketField::ServiceValue => validate_amount(
                raw,
                0,
                "El valor del servicio debe ser un número positivo",
            ),
        }
    }
}

/// Метаданные выбранного файла (из `web_sys::File`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentMeta {
    pub name: String,
    pub mime: String,
    pub size_bytes: u64,
}

impl AttachmentMeta {
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

pub const MAX_ATTACHMENTS: usize = 5;
pub const MAX_ATTACHMENT_MB: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("Máximo {max} archivos permitidos")]
    TooMany { max: usize },
    #[error("El archivo \"{name}\" no es una imagen válida")]
    NotImage { name: String },
    #[error("El archivo \"{name}\" excede el tamaño máximo de {max_mb}MB")]
    TooLarge { name: String, max_mb: u64 },
}

/// Проверка набора вложений; первая найденная ошибка прерывает проверку
pub fn validate_attachments(
    files: &[AttachmentMeta],
    max_files: usize,
    max_size_mb: u64,
) -> Result<(), AttachmentError> {
    if files.len() > max_files {
        return Err(AttachmentError::TooMany { max: max_files });
    }
    let max_bytes = max_size_mb * 1024 * 1024;
    for file in files {
        if !file.is_image() {
            return Err(AttachmentError::NotImage {
                name: file.name.clone(),
            });
        }
        if file.size_bytes > max_bytes {
            return Err(AttachmentError::TooLarge {
                name: file.name.clone(),
                max_mb: max_size_mb,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document() {
        assert!(validate_document("1234567890").is_ok());
        assert_eq!(
            validate_document("  "),
            Err("El documento del cliente es obligatorio".to_string())
        );
        assert_eq!(
            validate_document("12-34"),
            Err("El documento debe tener al menos 5 dígitos".to_string())
        );
        assert_eq!(
            validate_document("1234567890123456"),
            Err("El documento no puede tener más de 15 caracteres".to_string())
        );
    }

    #[test]
    fn test_imei() {
        assert!(validate_imei("35209900176148A").is_ok());
        assert!(validate_imei("").is_err());
        assert_eq!(
            validate_imei("3520-99"),
            Err("El IMEI/Serial solo puede contener números y letras".to_string())
        );
        assert!(validate_imei("1234567890123456").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(is_valid_phone("(601) 555-1234"));
        assert!(is_valid_phone("3001234567"));
        assert!(!is_valid_phone("555-12"));
        assert!(!is_valid_phone("+57 3001234567"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("cliente@correo.com"));
        assert!(is_valid_email("a@b.c.d"));
        assert!(!is_valid_email("cliente@correo"));
        assert!(!is_valid_email("cliente correo@x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@@x.com"));
        assert!(!is_valid_email("a@x."));
    }

    #[test]
    fn test_ticket_fields() {
        assert!(TicketField::ClientNames.check("").is_err());
        assert!(TicketField::ClientLastnames.check("").is_ok());
        assert!(TicketField::Phone.check("").is_ok());
        assert!(TicketField::Phone.check("12").is_err());
        assert!(TicketField::Mail.check("").is_err());
        assert!(TicketField::ServiceValue.check("15.000").is_ok());
        assert!(TicketField::ServiceValue.check("0").is_ok());
        assert!(TicketField::ServiceValue.check("").is_err());
        assert!(TicketField::ServiceValue.check("-5").is_err());
    }

    fn file(name: &str, mime: &str, size_bytes: u64) -> AttachmentMeta {
        AttachmentMeta {
            name: name.into(),
            mime: mime.into(),
            size_bytes,
        }
    }

    #[test]
    fn test_attachments() {
        let ok = vec![file("a.jpg", "image/jpeg", 1024), file("b.png", "image/png", 2048)];
        assert!(validate_attachments(&ok, MAX_ATTACHMENTS, MAX_ATTACHMENT_MB).is_ok());

        let too_many: Vec<_> = (0..6).map(|i| file(&format!("{i}.jpg"), "image/jpeg", 1)).collect();
        assert_eq!(
            validate_attachments(&too_many, 5, 5),
            Err(AttachmentError::TooMany { max: 5 })
        );

        let pdf = vec![file("doc.pdf", "application/pdf", 10)];
        let err = validate_attachments(&pdf, 5, 5).unwrap_err();
        assert_eq!(err.to_string(), "El archivo \"doc.pdf\" no es una imagen válida");

        let big = vec![file("big.jpg", "image/jpeg", 6 * 1024 * 1024)];
        assert!(matches!(
            validate_attachments(&big, 5, 5),
            Err(AttachmentError::TooLarge { .. })
        ));
    }
}
