use roster_core::model::validation::{
    is_valid_contact, is_valid_email, is_valid_name, is_valid_student_id,
};
use roster_core::{validate_fields, StudentField, StudentFields, ValidationError};

fn valid_fields() -> StudentFields {
    StudentFields::new("Ann Lee", "1", "a@b.com", "1234567890")
}

#[test]
fn name_length_boundaries() {
    assert!(!is_valid_name("A"));
    assert!(is_valid_name("Al"));
    assert!(is_valid_name(&"a".repeat(50)));
    assert!(!is_valid_name(&"a".repeat(51)));
}

#[test]
fn name_allows_letters_and_whitespace_only() {
    assert!(is_valid_name("Ann Marie Lee"));
    assert!(!is_valid_name("Ann-Marie"));
    assert!(!is_valid_name("R2D2"));
}

#[test]
fn student_id_is_digits_only() {
    assert!(is_valid_student_id("0"));
    assert!(is_valid_student_id("000123"));
    assert!(!is_valid_student_id("12a"));
    assert!(!is_valid_student_id("-1"));
}

#[test]
fn contact_needs_ten_digits() {
    assert!(!is_valid_contact("123456789"));
    assert!(is_valid_contact("1234567890"));
    assert!(is_valid_contact("123456789012"));
    assert!(!is_valid_contact("123 4567890"));
}

#[test]
fn email_requires_dot_in_domain() {
    assert!(!is_valid_email("a@b"));
    assert!(is_valid_email("a@b.c"));
    assert!(!is_valid_email("a b@c.d"));
    assert!(!is_valid_email("@b.c"));
    assert!(!is_valid_email("a@@b.c"));
}

#[test]
fn validate_fields_accepts_valid_input() {
    assert_eq!(validate_fields(&valid_fields()), Ok(()));
}

#[test]
fn validate_fields_reports_first_failure_in_fixed_order() {
    let mut fields = valid_fields();
    fields.name = "X".to_string();
    fields.student_id = "abc".to_string();
    fields.contact = "1".to_string();
    assert_eq!(validate_fields(&fields), Err(ValidationError::InvalidName));

    fields.name = "Ann".to_string();
    assert_eq!(validate_fields(&fields), Err(ValidationError::InvalidStudentId));

    fields.student_id = "5".to_string();
    fields.email = "nope".to_string();
    assert_eq!(validate_fields(&fields), Err(ValidationError::InvalidEmail));

    fields.email = "a@b.c".to_string();
    assert_eq!(validate_fields(&fields), Err(ValidationError::InvalidContact));
}

#[test]
fn validation_messages_are_user_facing() {
    assert_eq!(
        ValidationError::MissingField(StudentField::Email).to_string(),
        "Please fill in all fields."
    );
    assert_eq!(
        ValidationError::InvalidContact.to_string(),
        "Contact number must be digits only and at least 10 digits."
    );
}
