use std::fmt;

/// weatherstack API key.
///
/// The plaintext is only reachable through [`Credential::with_plaintext`],
/// never printed, and the backing buffer is overwritten when the value is
/// dropped. Zeroing is best-effort: copies made by the HTTP stack while the
/// request is built are outside its reach.
pub struct Credential {
    secret: String,
}

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// True when the key is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.secret.trim().is_empty()
    }

    /// Lend the plaintext to `f` for the duration of the call.
    pub fn with_plaintext<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.secret)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        wipe(&mut self.secret);
    }
}

fn wipe(secret: &mut String) {
    let mut bytes = std::mem::take(secret).into_bytes();
    bytes.iter_mut().for_each(|b| *b = 0);
    // keep the stores from being optimised away
    std::hint::black_box(&bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_is_redacted() {
        let cred = Credential::new("super-secret-key");
        let shown = format!("{cred:?}");

        assert!(!shown.contains("super-secret-key"));
        assert_eq!(shown, "Credential(<redacted>)");
    }

    #[test]
    fn blank_detection_trims_whitespace() {
        assert!(Credential::new("").is_blank());
        assert!(Credential::new("   \t").is_blank());
        assert!(!Credential::new("KEY").is_blank());
    }

    #[test]
    fn plaintext_is_lent_unchanged() {
        let cred = Credential::new("  KEY  ");
        let len = cred.with_plaintext(|key| {
            assert_eq!(key, "  KEY  ");
            key.len()
        });
        assert_eq!(len, 7);
    }

    #[test]
    fn wipe_clears_the_string() {
        let mut secret = String::from("abc");
        wipe(&mut secret);
        assert!(secret.is_empty());
    }
}
