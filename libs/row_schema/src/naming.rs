//! Field name normalization.

use std::borrow::Cow;

/// Given a `lowerCamelCase` string, converts it to `lower_snake_case`.
///
/// Every ASCII uppercase letter is lowercased and, unless it is the first
/// character, prefixed with an underscore. Acronyms are split per letter.
/// Everything else is kept as-is, so normalized names come back unchanged.
///
/// # Examples
///
/// ```
/// use row_schema::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("userId"), "user_id");
/// assert_eq!(to_snake_case("user_id"), "user_id");
/// assert_eq!(to_snake_case("XValue"), "x_value");
/// assert_eq!(to_snake_case("userID"), "user_i_d");
/// ```
#[must_use]
pub fn to_snake_case(value: &str) -> Cow<'_, str> {
    if is_snake_case(value) {
        return Cow::Borrowed(value);
    }

    let upper = value.bytes().filter(u8::is_ascii_uppercase).count();
    let mut result = String::with_capacity(value.len() + upper);

    for (index, c) in value.char_indices() {
        if c.is_ascii_uppercase() {
            if index != 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }

    Cow::Owned(result)
}

/// Whether [`to_snake_case`] would leave the string unchanged.
#[must_use]
pub fn is_snake_case(value: &str) -> bool {
    !value.bytes().any(|c| c.is_ascii_uppercase())
}
