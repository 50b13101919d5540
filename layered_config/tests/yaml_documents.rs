//! Parsing YAML documents into a derived configuration.

mod common;

use anyhow::{Result, anyhow, ensure};
use common::{ALL_FIELDS, Config, EnumField, Inner, all_fields};
use layered_config::{ConfigMessage, ErrorCategory, Parser, ParserErrors, ValidationMode};
use rstest::rstest;

fn parse(doc: &str, camel: bool, validation: ValidationMode) -> (Config, Result<(), ParserErrors>) {
    Parser::builder()
        .add_yaml_str("doc", doc)
        .camel_case(camel)
        .validation(validation)
        .build()
        .parse_into()
}

fn categories(errors: &ParserErrors) -> Vec<ErrorCategory> {
    errors.iter().map(layered_config::ParserError::category).collect()
}

#[rstest]
#[case::empty("", false, Config::default())]
#[case::comment_only("# nothing here\n", false, Config::default())]
#[case::all_fields(ALL_FIELDS, false, all_fields())]
#[case::camel_case(
    "fieldI32: 5\nfieldMessage:\n  enabled: true\nfieldRepeatedEnum: [type2]\n",
    true,
    Config {
        field_i32: 5,
        field_message: Inner { enabled: true },
        field_repeated_enum: vec![EnumField::Type2],
        ..Config::default()
    }
)]
#[case::lower_case_enum(
    "field_enum: type2\n",
    false,
    Config { field_enum: EnumField::Type2, ..Config::default() }
)]
fn conforming_documents_parse_cleanly(
    #[case] doc: &str,
    #[case] camel: bool,
    #[case] expected: Config,
) -> Result<()> {
    let (config, result) = parse(doc, camel, ValidationMode::Permissive);
    result.map_err(|errors| anyhow!("unexpected errors:\n{errors}"))?;
    ensure!(config == expected, "got {config:?}");
    Ok(())
}

#[rstest]
fn every_defect_is_reported_in_traversal_order() -> Result<()> {
    let doc = "
field_i32: [1]
field_u32: -1
field_message: 3
field_repeated: {a: 1}
field_enum: TYPE3
field_repeated_enum: [TYPE1, BOGUS, TYPE2]
field_string: still applied
";
    let (config, result) = parse(doc, false, ValidationMode::Permissive);
    let errors = result.err().ok_or_else(|| anyhow!("expected errors"))?;
    ensure!(
        categories(&errors)
            == [
                ErrorCategory::TypeMismatch,
                ErrorCategory::Conversion,
                ErrorCategory::TypeMismatch,
                ErrorCategory::TypeMismatch,
                ErrorCategory::InvalidEnumValue,
                ErrorCategory::InvalidEnumValue,
            ],
        "unexpected categories: {errors}"
    );
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    ensure!(
        paths
            == [
                "field_i32",
                "field_u32",
                "field_message",
                "field_repeated",
                "field_enum",
                "field_repeated_enum[1]",
            ],
        "unexpected paths: {paths:?}"
    );
    ensure!(config.field_string == "still applied", "valid fields must still apply");
    ensure!(
        config.field_repeated_enum == [EnumField::Type1, EnumField::Type2],
        "valid elements replace the field"
    );
    Ok(())
}

#[rstest]
fn strict_mode_reports_missing_and_unknown_fields() -> Result<()> {
    let doc = "enabled: true\nfield_message: {}\nsurprise: 1\n";
    let (_, result) = parse(doc, false, ValidationMode::Strict);
    let errors = result.err().ok_or_else(|| anyhow!("expected errors"))?;
    let missing = errors.of_category(ErrorCategory::MissingField).count();
    // Ten top-level fields plus `field_message.enabled`.
    ensure!(missing == 11, "expected 11 missing fields, got {missing}: {errors}");
    let unknown: Vec<String> = errors
        .of_category(ErrorCategory::UnknownField)
        .map(ToString::to_string)
        .collect();
    ensure!(
        unknown == ["doc: surprise: unknown field 'surprise'"],
        "unexpected unknown fields: {unknown:?}"
    );
    Ok(())
}

#[rstest]
#[case::permissive(ValidationMode::Permissive, 0)]
#[case::unknown_only(ValidationMode::UnknownFieldsOnly, 2)]
fn unknown_keys_depend_on_mode(#[case] mode: ValidationMode, #[case] expected: usize) -> Result<()> {
    let doc = "field_i32: 1\nextra: true\nfield_message:\n  enabled: true\n  nested_extra: 2\n";
    let (config, result) = parse(doc, false, mode);
    let count = result.err().map_or(0, |errors| errors.len());
    ensure!(count == expected, "expected {expected} errors, got {count}");
    ensure!(config.field_i32 == 1 && config.field_message.enabled, "known fields still apply");
    Ok(())
}

#[rstest]
fn snake_keys_are_unknown_in_camel_mode() -> Result<()> {
    let (config, result) = parse("field_i32: 4\n", true, ValidationMode::UnknownFieldsOnly);
    let errors = result.err().ok_or_else(|| anyhow!("expected errors"))?;
    ensure!(
        categories(&errors) == [ErrorCategory::UnknownField],
        "unexpected errors: {errors}"
    );
    ensure!(config.field_i32 == 0, "snake key must not be applied in camel mode");
    Ok(())
}

#[rstest]
fn later_documents_override_earlier_ones() -> Result<()> {
    let parser = Parser::builder()
        .add_yaml_str("base", ALL_FIELDS)
        .add_yaml_str("site", "field_i32: 7\nfield_repeated: [9]\nfield_message: {}\n")
        .build();
    let (config, result) = parser.parse_into::<Config>();
    result.map_err(|errors| anyhow!("unexpected errors:\n{errors}"))?;
    let expected = Config {
        field_i32: 7,
        field_repeated: vec![9],
        ..all_fields()
    };
    ensure!(config == expected, "got {config:?}");
    Ok(())
}

#[rstest]
fn reapplying_a_source_is_idempotent() -> Result<()> {
    let parser = Parser::builder().add_yaml_str("doc", ALL_FIELDS).build();
    let (mut config, first) = parser.parse_into::<Config>();
    first.map_err(|errors| anyhow!("{errors}"))?;
    let snapshot = config.clone();
    parser.parse(&mut config).map_err(|errors| anyhow!("{errors}"))?;
    ensure!(config == snapshot, "second parse changed the output");
    Ok(())
}

#[rstest]
#[case::sequence_root("- 1\n- 2\n")]
#[case::scalar_root("just text\n")]
fn non_mapping_roots_are_type_mismatches(#[case] doc: &str) -> Result<()> {
    let (config, result) = parse(doc, false, ValidationMode::Permissive);
    let errors = result.err().ok_or_else(|| anyhow!("expected errors"))?;
    ensure!(
        categories(&errors) == [ErrorCategory::TypeMismatch],
        "unexpected errors: {errors}"
    );
    ensure!(config == Config::default(), "nothing may be applied");
    Ok(())
}

#[rstest]
fn syntax_errors_are_load_errors() -> Result<()> {
    let (_, result) = parse("field_i32: [1, 2\n", false, ValidationMode::Permissive);
    let errors = result.err().ok_or_else(|| anyhow!("expected errors"))?;
    ensure!(categories(&errors) == [ErrorCategory::Load], "unexpected errors: {errors}");
    Ok(())
}

#[derive(ConfigMessage, Debug, Default, PartialEq)]
struct Release {
    version: String,
    commit: String,
    zip: String,
    build_2: u32,
}

#[rstest]
fn string_fields_keep_the_text_as_written() -> Result<()> {
    let (release, result) = Parser::builder()
        .add_yaml_str("doc", "version: 1.10
commit: 0x1F
zip: 007
build_2: 010
")
        .build()
        .parse_into::<Release>();
    result.map_err(|errors| anyhow!("unexpected errors:\n{errors}"))?;
    let expected = Release {
        version: String::from("1.10"),
        commit: String::from("0x1F"),
        zip: String::from("007"),
        build_2: 10,
    };
    ensure!(release == expected, "got {release:?}");
    Ok(())
}

#[rstest]
fn camel_keys_with_digit_segments_are_known() -> Result<()> {
    let (release, result) = Parser::builder()
        .add_yaml_str("doc", "build2: 5
")
        .camel_case(true)
        .validation(ValidationMode::UnknownFieldsOnly)
        .build()
        .parse_into::<Release>();
    result.map_err(|errors| anyhow!("unexpected errors:\n{errors}"))?;
    ensure!(release.build_2 == 5, "got {release:?}");
    Ok(())
}
