//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Expr, ExprLit, ExprUnary, Lit, LitStr, UnOp};

/// Parses the string literal assigned to `key`.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}

/// Reads an enum discriminant written as an optionally negated integer
/// literal.
pub(crate) fn discriminant(expr: &Expr) -> syn::Result<i32> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => int.base10_parse::<i32>(),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => match inner.as_ref() {
            Expr::Lit(ExprLit {
                lit: Lit::Int(int), ..
            }) => {
                let magnitude = int.base10_parse::<i64>()?;
                i32::try_from(-magnitude)
                    .map_err(|_| syn::Error::new_spanned(expr, "discriminant does not fit in i32"))
            }
            _ => Err(syn::Error::new_spanned(
                expr,
                "discriminant must be an integer literal",
            )),
        },
        _ => Err(syn::Error::new_spanned(
            expr,
            "discriminant must be an integer literal",
        )),
    }
}
