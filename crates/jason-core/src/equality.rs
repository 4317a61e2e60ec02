//! # Structural Equality
//!
//! Deep equality over the JSON value model, used by `enum` membership and
//! `uniqueItems`. Differs from `serde_json::Value`'s `PartialEq` only for
//! numbers: `1` and `1.0` are the same value here.

use serde_json::{Number, Value};

/// Whether two JSON values are structurally equal.
///
/// Same kind and same content. Arrays compare element-wise in order;
/// objects compare as key sets with equal values per key. Numbers compare
/// by mathematical value.
pub fn json_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equals(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| json_equals(x, y)))
        }
        _ => false,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if x.is_f64() && y.is_f64() {
        return x.as_f64() == y.as_f64();
    }
    match (integral(x), integral(y)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// The exact integer value of `n`, if it has one. Floats qualify only when
/// integral and inside the 64-bit range, so no integer is ever rounded.
fn integral(n: &Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Some(u.into());
    }
    let f = n.as_f64()?;
    // 2^64
    (f.fract() == 0.0 && f.abs() < 18_446_744_073_709_551_616.0).then(|| f as i128)
}
