use thiserror::Error;

use crate::utils::{is_valid_email, is_valid_phone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Select,
    TextArea,
}

impl FieldKind {
    /// Maps an `<input type>` attribute. Unknown types validate like text.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type.to_ascii_lowercase().as_str() {
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            _ => FieldKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Este campo é obrigatório")]
    Required,
    #[error("Digite um e-mail válido")]
    InvalidEmail,
    #[error("Digite um telefone válido")]
    InvalidPhone,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldInput<'a> {
    pub value: &'a str,
    pub kind: FieldKind,
    pub required: bool,
}

pub fn validate(field: &FieldInput) -> Result<(), FieldError> {
    let value = field.value.trim();

    if value.is_empty() {
        return if field.required { Err(FieldError::Required) } else { Ok(()) };
    }

    match field.kind {
        FieldKind::Email if !is_valid_email(value) => Err(FieldError::InvalidEmail),
        FieldKind::Tel if !is_valid_phone(value) => Err(FieldError::InvalidPhone),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(value: &str, kind: FieldKind, required: bool) -> FieldInput<'_> {
        FieldInput { value, kind, required }
    }

    #[test]
    fn required_blank_fields_fail_first() {
        assert_eq!(validate(&field("", FieldKind::Text, true)), Err(FieldError::Required));
        assert_eq!(validate(&field("   ", FieldKind::Email, true)), Err(FieldError::Required));
        assert_eq!(validate(&field("", FieldKind::Select, true)), Err(FieldError::Required));
    }

    #[test]
    fn optional_blank_fields_pass() {
        assert_eq!(validate(&field("", FieldKind::Email, false)), Ok(()));
        assert_eq!(validate(&field("  ", FieldKind::Tel, false)), Ok(()));
        assert_eq!(validate(&field("", FieldKind::TextArea, false)), Ok(()));
    }

    #[test]
    fn typed_fields_check_their_format() {
        assert_eq!(validate(&field("ana@x", FieldKind::Email, true)), Err(FieldError::InvalidEmail));
        assert_eq!(validate(&field(" ana@x.com ", FieldKind::Email, true)), Ok(()));
        assert_eq!(validate(&field("12345", FieldKind::Tel, false)), Err(FieldError::InvalidPhone));
        assert_eq!(validate(&field("(11) 99999-8888", FieldKind::Tel, true)), Ok(()));
        assert_eq!(validate(&field("anything", FieldKind::Text, true)), Ok(()));
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(FieldError::Required.to_string(), "Este campo é obrigatório");
        assert_eq!(FieldError::InvalidEmail.to_string(), "Digite um e-mail válido");
        assert_eq!(FieldError::InvalidPhone.to_string(), "Digite um telefone válido");
    }

    #[test]
    fn input_types_map_to_kinds() {
        assert_eq!(FieldKind::from_input_type("email"), FieldKind::Email);
        assert_eq!(FieldKind::from_input_type("TEL"), FieldKind::Tel);
        assert_eq!(FieldKind::from_input_type("text"), FieldKind::Text);
        assert_eq!(FieldKind::from_input_type("number"), FieldKind::Text);
    }
}
