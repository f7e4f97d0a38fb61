//! Small utility helpers used across modules.

use rand::Rng;
use uuid::Builder;

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, String)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// UUID v4 drawn from the caller's RNG, so seeded runs stay reproducible.
pub fn question_id<R: Rng + ?Sized>(rng: &mut R) -> String {
  let bytes: [u8; 16] = rng.gen();
  Builder::from_random_bytes(bytes).into_uuid().to_string()
}

/// Render a value held in hundredths with trailing zeros trimmed ("3.5", "3.45", "4").
pub fn format_hundredths(value: i64) -> String {
  let whole = value / 100;
  let frac = value % 100;
  if frac == 0 {
    whole.to_string()
  } else if frac % 10 == 0 {
    format!("{}.{}", whole, frac / 10)
  } else {
    format!("{}.{:02}", whole, frac)
  }
}
