//! Lenient field readers for hand-written JSON recipes.
//!
//! A recipe typed by a person often has a key missing or a number quoted.
//! The numeric readers never fail: a quoted number is read like a bare one,
//! and anything else they cannot interpret falls back to the caller's
//! default. The seed is the exception. A seed that is present but unusable
//! is an error, since silently dropping it would make the run unrepeatable.

use serde_json::Value;

use crate::error::PatternError;

/// 2^32, the modulus a seed is reduced by.
const SEED_MODULUS: f64 = 4_294_967_296.0;

/// Reads `params[name]` as a float. Integer literals such as `640` and
/// quoted numbers such as `"640"` are accepted; anything else yields
/// `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    match params.get(name) {
        Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
        Some(v) => v.as_f64().unwrap_or(default),
        None => default,
    }
}

/// Reads `params[name]` as a non-negative integer, or `default`.
///
/// Negative integers saturate to `0` rather than falling back to the default,
/// so a recipe asking for `-5` triangles gets the smallest possible grid.
/// Quoted integers are accepted.
pub fn param_count(params: &Value, name: &str, default: usize) -> usize {
    let count = |v: &Value| {
        v.as_u64()
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
            .or_else(|| v.as_i64().map(|_| 0))
    };
    match params.get(name) {
        Some(Value::String(s)) => match s.trim().parse::<i64>() {
            Ok(n) => usize::try_from(n.max(0)).unwrap_or(usize::MAX),
            Err(_) => default,
        },
        Some(v) => count(v).unwrap_or(default),
        None => default,
    }
}

/// Reads `params[name]` as a seed.
///
/// Missing and `null` mean unseeded. Integers of either sign, unsigned
/// integers above `i64::MAX`, integral floats such as `42.0` and quoted
/// integers are all accepted. Only the low 32 bits of a seed matter, so
/// values outside `i64` are reduced modulo 2^32 first. Anything else is
/// `PatternError::InvalidParameter`.
pub fn param_seed(params: &Value, name: &str) -> Result<Option<i64>, PatternError> {
    let invalid = |v: &Value| PatternError::InvalidParameter {
        name: name.to_string(),
        reason: format!("expected an integer seed, got {v}"),
    };
    let value = match params.get(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(v) => v,
    };
    let seed = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else if let Some(u) = n.as_u64() {
                // Wraps, keeping the low 32 bits intact.
                Some(u as i64)
            } else {
                n.as_f64().and_then(integral_seed)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<u64>().ok().map(|u| u as i64))
        }
        _ => None,
    };
    seed.map(Some).ok_or_else(|| invalid(value))
}

/// Seed for an integral float, or `None` for fractions and non-finite values.
fn integral_seed(f: f64) -> Option<i64> {
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    if f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        Some(f.rem_euclid(SEED_MODULUS) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- param_f64 --

    #[test]
    fn float_is_read_as_is() {
        let recipe = json!({"displacement": 0.9});
        assert!((param_f64(&recipe, "displacement", 0.6) - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn integer_width_widens_to_float() {
        let params = json!({"width": 640});
        assert!((param_f64(&params, "width", 0.0) - 640.0).abs() < f64::EPSILON);
    }

    #[test]
    fn absent_float_uses_default() {
        let params = json!({"height": 1.0});
        assert!((param_f64(&params, "width", 3.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn quoted_number_is_read() {
        let params = json!({"width": " 640 ", "displacement": "0.25"});
        assert_eq!(param_f64(&params, "width", 1.0), 640.0);
        assert_eq!(param_f64(&params, "displacement", 0.6), 0.25);
    }

    #[test]
    fn non_numeric_string_uses_default() {
        let params = json!({"width": "wide"});
        assert_eq!(param_f64(&params, "width", 1.0), 1.0);
    }

    #[test]
    fn non_object_recipe_uses_default() {
        let params = json!([640, 480]);
        assert!((param_f64(&params, "width", 7.0) - 7.0).abs() < f64::EPSILON);
    }

    // -- param_count --

    #[test]
    fn param_count_extracts_existing_integer() {
        let params = json!({"triangle_count": 42});
        assert_eq!(param_count(&params, "triangle_count", 80), 42);
    }

    #[test]
    fn param_count_returns_default_when_key_missing() {
        assert_eq!(param_count(&json!({}), "triangle_count", 80), 80);
    }

    #[test]
    fn param_count_saturates_negative_to_zero() {
        let params = json!({"triangle_count": -12});
        assert_eq!(param_count(&params, "triangle_count", 80), 0);
        let quoted = json!({"triangle_count": "-12"});
        assert_eq!(param_count(&quoted, "triangle_count", 80), 0);
    }

    #[test]
    fn param_count_reads_quoted_integer() {
        let params = json!({"triangle_count": "18"});
        assert_eq!(param_count(&params, "triangle_count", 80), 18);
    }

    #[test]
    fn param_count_returns_default_for_float_value() {
        let params = json!({"triangle_count": 2.5});
        assert_eq!(param_count(&params, "triangle_count", 99), 99);
    }

    #[test]
    fn param_count_returns_default_for_string_value() {
        let params = json!({"triangle_count": "many"});
        assert_eq!(param_count(&params, "triangle_count", 8), 8);
    }

    // -- param_seed --

    #[test]
    fn seed_reads_negative_and_wide_integers() {
        let params = json!({"a": -1, "b": 1_763_280_663_873_i64});
        assert_eq!(param_seed(&params, "a").unwrap(), Some(-1));
        assert_eq!(param_seed(&params, "b").unwrap(), Some(1_763_280_663_873));
    }

    #[test]
    fn seed_is_none_for_null_or_missing() {
        let params = json!({"seed": null});
        assert_eq!(param_seed(&params, "seed").unwrap(), None);
        assert_eq!(param_seed(&params, "other").unwrap(), None);
    }

    #[test]
    fn integral_float_seed_equals_integer_seed() {
        let params = json!({"seed": 42.0, "neg": -7.0});
        assert_eq!(param_seed(&params, "seed").unwrap(), Some(42));
        assert_eq!(param_seed(&params, "neg").unwrap(), Some(-7));
    }

    #[test]
    fn quoted_seed_is_read() {
        let params = json!({"seed": "42", "max": "18446744073709551615"});
        assert_eq!(param_seed(&params, "seed").unwrap(), Some(42));
        assert_eq!(param_seed(&params, "max").unwrap().map(|s| s as u32), Some(u32::MAX));
    }

    #[test]
    fn unsigned_seed_keeps_low_32_bits() {
        let params = json!({"seed": u64::MAX});
        let seed = param_seed(&params, "seed").unwrap().unwrap();
        assert_eq!(seed as u32, u32::MAX);
    }

    #[test]
    fn huge_float_seed_is_reduced_mod_2_32() {
        let params = json!({"seed": 1e20});
        let seed = param_seed(&params, "seed").unwrap().unwrap();
        assert_eq!(seed, (1e20_f64 % SEED_MODULUS) as i64);
    }

    #[test]
    fn unusable_seed_is_an_error() {
        for bad in [json!(42.5), json!("forty-two"), json!(true), json!([1])] {
            let params = json!({ "seed": bad });
            let err = param_seed(&params, "seed").unwrap_err();
            assert!(
                matches!(err, PatternError::InvalidParameter { ref name, .. } if name == "seed"),
                "got {err}"
            );
        }
    }
}
