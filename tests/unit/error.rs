use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(ArcTextError::layout("x").to_string().contains("layout error:"));
    assert!(ArcTextError::trim("x").to_string().contains("trim error:"));
    assert!(ArcTextError::conversion("x").to_string().contains("conversion error:"));
    assert!(ArcTextError::surface("x").to_string().contains("surface error:"));
    assert!(ArcTextError::serde("x").to_string().contains("serialization error:"));
}

#[test]
fn json_errors_convert_to_serde_variant() {
    let err: ArcTextError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ArcTextError::Serde(_)));
}
