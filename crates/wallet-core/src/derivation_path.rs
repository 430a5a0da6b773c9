//! Normalization of caller-supplied BIP-32 derivation paths.
//!
//! JavaScript callers do not agree on how to write the hardened marker:
//! some send `\'` (an apostrophe escaped once too often on its way through
//! the bridge), some a typographic `’`, some the `h`/`H` suffix. The BIP-32
//! parser only understands a plain `'`, so every marker that directly
//! follows a digit is rewritten to that form before a key is derived.
//!
//! Signing and address derivation both go through [`escape_derivation_path`].

const APOSTROPHE: char = '\'';
const BACKSLASH: char = '\\';
const TYPOGRAPHIC_APOSTROPHE: char = '\u{2019}';

/// Rewrite every hardened marker that follows a digit into `'`.
///
/// Paths without such markers come back unchanged, and applying the
/// function twice gives the same result as applying it once.
pub fn escape_derivation_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();
    let mut after_digit = false;

    while let Some(c) = chars.next() {
        if after_digit {
            let marker = match c {
                BACKSLASH if chars.peek() == Some(&APOSTROPHE) => {
                    chars.next();
                    true
                }
                TYPOGRAPHIC_APOSTROPHE | 'h' | 'H' => true,
                _ => false,
            };
            if marker {
                out.push(APOSTROPHE);
                after_digit = false;
                continue;
            }
        }

        out.push(c);
        after_digit = c.is_ascii_digit();
    }

    out
}
