//! Tests for derive input and attribute parsing.
