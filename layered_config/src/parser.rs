//! Ordered application of configuration sources.

use camino::Utf8PathBuf;

use crate::case::KeyCase;
use crate::error::{ErrorAccumulator, ParseResult, ParserError, ParserErrors};
use crate::options::{ParserOptions, ValidationMode};
use crate::schema::{Message, MessageType};
use crate::source::{EnvSource, Source, YamlSource};

/// Applies document sources in insertion order, then the environment.
///
/// Later sources override earlier ones per field; fields a source does not
/// mention keep their previous value. Every source is applied even when
/// earlier ones report errors.
///
/// # Examples
///
/// ```
/// use layered_config::{Parser, ValidationMode};
/// use layered_config::schema::{DynamicMessage, FieldDescriptor, FieldKind, Message, MessageDescriptor, Value};
/// use std::sync::Arc;
///
/// let desc = MessageDescriptor::builder("Config")
///     .field(FieldDescriptor::new("host", FieldKind::String))
///     .field(FieldDescriptor::new("port", FieldKind::UInt32))
///     .build()?;
/// let parser = Parser::builder()
///     .add_yaml_str("base", "host: example.org\nport: 80\n")
///     .add_yaml_str("override", "port: 8080\n")
///     .validation(ValidationMode::Strict)
///     .build();
/// let mut config = DynamicMessage::new(Arc::new(desc));
/// parser.parse(&mut config)?;
/// assert_eq!(config.value("host")?, Some(Value::String("example.org".into())));
/// assert_eq!(config.value("port")?, Some(Value::UInt32(8080)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Parser {
    sources: Vec<Box<dyn Source>>,
    env: Option<EnvSource>,
    options: ParserOptions,
}

impl Parser {
    /// Starts building a parser.
    pub fn builder() -> ParserBuilder {
        ParserBuilder::default()
    }

    /// Options shared by every source.
    #[must_use]
    pub const fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Labels of every source in application order.
    #[must_use]
    pub fn sources(&self) -> Vec<&str> {
        self.sources
            .iter()
            .map(|s| s.label())
            .chain(self.env.as_ref().map(Source::label))
            .collect()
    }

    /// Overlays every source onto `message`.
    ///
    /// # Errors
    ///
    /// Returns the errors of every source, in source order. `message` keeps
    /// all values that were applied successfully.
    pub fn parse(&self, message: &mut dyn Message) -> ParseResult {
        let mut all = Vec::new();
        for source in &self.sources {
            self.apply_layer(&**source, message, &mut all);
        }
        if let Some(env) = &self.env {
            self.apply_layer(env, message, &mut all);
        }
        let outcome = ParserErrors::from_vec(all);
        if let Some(errors) = &outcome {
            tracing::warn!(count = errors.len(), "configuration parsed with errors");
        }
        outcome.map_or(Ok(()), Err)
    }

    fn apply_layer(&self, source: &dyn Source, message: &mut dyn Message, sink: &mut Vec<ParserError>) {
        let mut errors = ErrorAccumulator::new(source.label());
        source.apply(message, &self.options, &mut errors);
        tracing::info!(
            source = source.label(),
            errors = errors.len(),
            "applied configuration source"
        );
        errors.drain_into(sink);
    }

    /// Builds a default `T` and overlays every source onto it.
    ///
    /// The message is returned even on failure, holding every value that
    /// was applied.
    #[must_use]
    pub fn parse_into<T: MessageType>(&self) -> (T, ParseResult) {
        let mut message = T::default();
        let result = self.parse(&mut message);
        (message, result)
    }
}

/// Builder returned by [`Parser::builder`].
#[derive(Debug, Default)]
#[must_use = "call `build` to obtain the parser"]
pub struct ParserBuilder {
    sources: Vec<Box<dyn Source>>,
    env_prefix: Option<String>,
    env: Option<EnvSource>,
    options: ParserOptions,
}

impl ParserBuilder {
    /// Appends a YAML file that must exist.
    pub fn add_file<P: Into<Utf8PathBuf>>(self, path: P) -> Self {
        self.add_source(YamlSource::file(path))
    }

    /// Appends a YAML file that is skipped when absent.
    pub fn add_optional_file<P: Into<Utf8PathBuf>>(self, path: P) -> Self {
        self.add_source(YamlSource::optional_file(path))
    }

    /// Appends an in-memory YAML document.
    pub fn add_yaml_str(self, label: impl Into<String>, contents: impl Into<String>) -> Self {
        self.add_source(YamlSource::string(label, contents))
    }

    /// Appends any source.
    pub fn add_source(mut self, source: impl Source + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Enables the process environment under `prefix`, applied last.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self.env = None;
        self
    }

    /// Uses a custom environment source, applied last.
    pub fn env_source(mut self, source: EnvSource) -> Self {
        self.env = Some(source);
        self.env_prefix = None;
        self
    }

    /// Selects the spelling of document keys.
    pub const fn key_case(mut self, key_case: KeyCase) -> Self {
        self.options.key_case = key_case;
        self
    }

    /// Shorthand for `key_case(KeyCase::Camel)` when `enabled`.
    pub const fn camel_case(self, enabled: bool) -> Self {
        self.key_case(if enabled { KeyCase::Camel } else { KeyCase::Snake })
    }

    /// Selects the validation mode.
    pub const fn validation(mut self, validation: ValidationMode) -> Self {
        self.options.validation = validation;
        self
    }

    /// Replaces every option at once.
    pub const fn options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Finishes the parser.
    pub fn build(self) -> Parser {
        let env = self
            .env
            .or_else(|| self.env_prefix.as_deref().map(EnvSource::new));
        Parser {
            sources: self.sources,
            env,
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ErrorCategory;
    use crate::schema::{DynamicMessage, FieldDescriptor, FieldKind, MessageDescriptor, Value};
    use crate::source::MapEnv;
    use rstest::{fixture, rstest};

    #[fixture]
    fn message() -> DynamicMessage {
        let desc = MessageDescriptor::builder("Config")
            .field(FieldDescriptor::new("name", FieldKind::String))
            .field(FieldDescriptor::new("port", FieldKind::UInt32))
            .build()
            .expect("descriptor");
        DynamicMessage::new(Arc::new(desc))
    }

    #[rstest]
    fn env_is_applied_after_documents(mut message: DynamicMessage) {
        let env = MapEnv::new().with("APP_PORT", "9000");
        let parser = Parser::builder()
            .env_source(EnvSource::with_lookup("app", env))
            .add_yaml_str("first", "port: 1\nname: one\n")
            .add_yaml_str("second", "port: 2\n")
            .build();
        assert_eq!(parser.sources(), ["first", "second", "environment"]);
        parser.parse(&mut message).expect("clean parse");
        assert_eq!(message.value("port"), Ok(Some(Value::UInt32(9000))));
        assert_eq!(
            message.value("name"),
            Ok(Some(Value::String(String::from("one"))))
        );
    }

    #[rstest]
    fn errors_from_every_source_are_collected(mut message: DynamicMessage) {
        let parser = Parser::builder()
            .add_yaml_str("first", "port: [1]\n")
            .add_yaml_str("second", "port: -1\nname: ok\n")
            .add_yaml_str("third", "extra: 1\n")
            .validation(ValidationMode::UnknownFieldsOnly)
            .build();
        let errors = parser.parse(&mut message).expect_err("three problems");
        let summary: Vec<(&str, ErrorCategory)> = errors
            .iter()
            .map(|e| (e.origin.as_str(), e.category()))
            .collect();
        assert_eq!(
            summary,
            [
                ("first", ErrorCategory::TypeMismatch),
                ("second", ErrorCategory::Conversion),
                ("third", ErrorCategory::UnknownField),
            ]
        );
        assert_eq!(
            message.value("name"),
            Ok(Some(Value::String(String::from("ok"))))
        );
    }

    #[rstest]
    fn reparsing_is_idempotent(mut message: DynamicMessage) {
        let parser = Parser::builder()
            .add_yaml_str("doc", "port: 7\nname: svc\n")
            .build();
        parser.parse(&mut message).expect("first parse");
        let once = message.clone();
        parser.parse(&mut message).expect("second parse");
        assert_eq!(message, once);
    }

    #[rstest]
    fn missing_required_file_is_reported(mut message: DynamicMessage) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.yml")).expect("utf8");
        let parser = Parser::builder()
            .add_file(path.clone())
            .add_optional_file(path)
            .build();
        let errors = parser.parse(&mut message).expect_err("required file missing");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.iter().next().map(crate::ParserError::category),
            Some(ErrorCategory::Load)
        );
    }

    #[rstest]
    fn camel_case_toggle_sets_key_case() {
        let parser = Parser::builder().camel_case(true).build();
        assert_eq!(parser.options().key_case, KeyCase::Camel);
        let snake = Parser::builder().camel_case(false).build();
        assert_eq!(snake.options().key_case, KeyCase::Snake);
    }
}
