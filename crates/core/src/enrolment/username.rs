//! Username synthesis for newly created remote accounts

use academy_enrol_domain::constants::{
    FALLBACK_USERNAME_PREFIX, FALLBACK_USERNAME_SUFFIX_LEN, USERNAME_SUFFIX_LEN,
};
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Build `first.last.<suffix>` restricted to `[a-z0-9._-]`.
///
/// The random suffix keeps repeat purchases by the same person from colliding
/// on an existing username. Never returns an empty string.
pub fn synthesize_username<R: Rng + ?Sized>(first_name: &str, last_name: &str, rng: &mut R) -> String {
    let seed = format!("{first_name}.{last_name}.{}", random_suffix(rng, USERNAME_SUFFIX_LEN))
        .to_ascii_lowercase();
    let username = strip_unsafe_chars(&seed);
    if username.is_empty() {
        return format!(
            "{FALLBACK_USERNAME_PREFIX}{}",
            random_suffix(rng, FALLBACK_USERNAME_SUFFIX_LEN).to_ascii_lowercase()
        );
    }
    username
}

/// Drop every character outside `[a-z0-9._-]`.
pub fn strip_unsafe_chars(value: &str) -> String {
    value.chars().filter(|c| is_username_char(*c)).collect()
}

fn is_username_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '.' | '_' | '-')
}

fn random_suffix<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (&mut *rng).sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
