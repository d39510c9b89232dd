use fixtura_derive::fixtura_error;
use std::borrow::Cow;

#[fixtura_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Missing '{name}'{}", format_context(.context))]
    Missing { name: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<(), DemoError> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")).context("reading fixture")
}

#[test]
fn fixtura_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/fixtura_error_pass.rs");
    t.compile_fail("tests/ui/fixtura_error_no_context.rs");
    t.compile_fail("tests/ui/fixtura_error_bad_context_type.rs");
    t.compile_fail("tests/ui/fixtura_error_tuple_variant.rs");
}

#[test]
fn source_errors_convert_with_context() {
    let err = read_missing().unwrap_err();
    assert!(matches!(err, DemoError::Io { .. }));
    assert_eq!(err.error_context(), Some("reading fixture"));
    assert_eq!(err.to_string(), "IO error (reading fixture): gone");
}

#[test]
fn question_mark_converts_sources() {
    fn inner() -> Result<u8, DemoError> {
        let read: Result<u8, std::io::Error> = Err(std::io::Error::other("boom"));
        Ok(read?)
    }

    let err = inner().unwrap_err();
    assert_eq!(err.error_context(), None);
    assert_eq!(err.to_string(), "IO error: boom");
}

#[test]
fn context_is_attached_to_own_variants() {
    let result: Result<(), DemoError> =
        Err(DemoError::Missing { name: "id".to_owned(), context: None });
    let err = result.context("resolving User").unwrap_err();
    assert_eq!(err.to_string(), "Missing 'id' (resolving User)");
}

#[test]
fn strings_become_internal_errors() {
    let err = DemoError::from("unexpected");
    assert!(matches!(err, DemoError::Internal { .. }));
    assert_eq!(err.to_string(), "Internal error: unexpected");

    let owned: DemoError = format!("bad {}", 1).into();
    assert_eq!(owned.to_string(), "Internal error: bad 1");
}
