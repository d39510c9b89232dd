#[test]
fn model_derive_ui() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/model_enum.rs");
    t.compile_fail("tests/ui/model_tuple_struct.rs");
    t.compile_fail("tests/ui/model_generic_struct.rs");
    t.compile_fail("tests/ui/model_depends_on_without_with.rs");
    t.compile_fail("tests/ui/model_unknown_attribute.rs");
}
